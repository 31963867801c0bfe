use std::{
    cmp::Ordering,
    fmt::{Debug, Formatter, Result as FmtResult},
    ops::Deref,
};

use crate::parse::TimedValue;

/// A [`Vec`] whose elements are guaranteed to be in order based on the given comparator.
#[derive(Clone)]
pub struct SortedVec<T> {
    inner: Vec<T>,
    cmp: fn(&T, &T) -> Ordering,
}

impl<T> SortedVec<T> {
    /// Same as [`slice::binary_search_by`] with the internal compare function
    #[inline]
    pub fn find(&self, value: &T) -> Result<usize, usize> {
        self.inner.binary_search_by(|probe| (self.cmp)(probe, value))
    }

    /// Push a new value into the sorted list.
    /// If there is already an element that matches the new value,
    /// the old element will be replaced.
    pub(crate) fn push(&mut self, value: T) {
        match self.find(&value) {
            Ok(i) => self.inner[i] = value,
            Err(i) if i == self.inner.len() => self.inner.push(value),
            Err(i) => self.inner.insert(i, value),
        }
    }
}

impl<T> Deref for SortedVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        <Vec<T> as Deref>::deref(&self.inner)
    }
}

impl<T: Debug> Debug for SortedVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        <Vec<T> as Debug>::fmt(&self.inner, f)
    }
}

impl<T: PartialEq> PartialEq for SortedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Default for SortedVec<TimedValue> {
    #[inline]
    fn default() -> Self {
        Self {
            inner: Vec::new(),
            cmp: |a, b| a.time.cmp(&b.time),
        }
    }
}

impl SortedVec<TimedValue> {
    /// The value of the last element whose time is not after `time`.
    pub(crate) fn value_at(&self, time: i32) -> Option<f64> {
        let i = match self.inner.binary_search_by(|probe| probe.time.cmp(&time)) {
            Ok(i) => i,
            Err(0) => return None,
            Err(i) => i - 1,
        };

        Some(self.inner[i].value)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::TimedValue;

    use super::SortedVec;

    #[test]
    fn push_keeps_order_and_replaces() {
        let mut vec = SortedVec::<TimedValue>::default();

        vec.push(TimedValue::new(10, 1.0));
        vec.push(TimedValue::new(0, 2.0));
        vec.push(TimedValue::new(5, 3.0));
        vec.push(TimedValue::new(10, 4.0));

        let times: Vec<_> = vec.iter().map(|v| v.time).collect();
        assert_eq!(times, [0, 5, 10]);
        assert_eq!(vec[2].value, 4.0);
    }

    #[test]
    fn value_at() {
        let mut vec = SortedVec::<TimedValue>::default();
        vec.push(TimedValue::new(100, 1.0));
        vec.push(TimedValue::new(200, 2.0));

        assert_eq!(vec.value_at(99), None);
        assert_eq!(vec.value_at(100), Some(1.0));
        assert_eq!(vec.value_at(199), Some(1.0));
        assert_eq!(vec.value_at(1000), Some(2.0));
    }
}

use crate::{Pos2, Slider};

/// A circle or slider of a [`Beatmap`](crate::Beatmap).
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos2,
    /// Timestamp in milliseconds.
    pub start_time: i32,
    /// The type bits as they were encoded; a slider without
    /// control points is stored as plain circle.
    pub kind_mask: u32,
    pub kind: HitObjectKind,
}

/// Further data related to specific object types.
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
}

impl HitObject {
    pub const CIRCLE_FLAG: u32 = 1 << 0;
    pub const SLIDER_FLAG: u32 = 1 << 1;

    #[inline]
    pub(crate) fn circle(pos: Pos2, start_time: i32, kind_mask: u32) -> Self {
        Self {
            pos,
            start_time,
            kind_mask,
            kind: HitObjectKind::Circle,
        }
    }

    #[inline]
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle => f64::from(self.start_time),
            HitObjectKind::Slider(slider) => slider.end_time(),
        }
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    #[inline]
    pub fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider(_))
    }

    #[inline]
    pub fn slider(&self) -> Option<&Slider> {
        match &self.kind {
            HitObjectKind::Circle => None,
            HitObjectKind::Slider(slider) => Some(slider),
        }
    }

    /// The combo this object adds to the beatmap's max combo.
    #[inline]
    pub fn combo(&self) -> u32 {
        match &self.kind {
            HitObjectKind::Circle => 1,
            HitObjectKind::Slider(slider) => slider.combo(),
        }
    }

    /// Amount of points to hit for this object.
    #[inline]
    pub fn points(&self) -> u32 {
        match &self.kind {
            HitObjectKind::Circle => 1,
            HitObjectKind::Slider(slider) => slider.points(),
        }
    }
}

use std::collections::HashMap;

use super::{ParseError, ParseResult};

/// The `[Difficulty]` section of a [`Beatmap`](crate::Beatmap).
///
/// Every `key:value` pair is stored as is, later duplicates overwriting earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultySettings {
    values: HashMap<String, f64>,
}

impl DifficultySettings {
    pub const APPROACH_RATE: &'static str = "ApproachRate";
    pub const CIRCLE_SIZE: &'static str = "CircleSize";
    pub const HP_DRAIN_RATE: &'static str = "HPDrainRate";
    pub const OVERALL_DIFFICULTY: &'static str = "OverallDifficulty";
    pub const SLIDER_MULTIPLIER: &'static str = "SliderMultiplier";
    pub const SLIDER_TICK_RATE: &'static str = "SliderTickRate";

    /// The value stored for `key`, if any.
    #[inline]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_owned(), value);
    }

    /// Like [`get`](Self::get) but fails if the value is missing.
    pub(crate) fn require(&self, key: &'static str) -> ParseResult<f64> {
        self.get(key).ok_or(ParseError::MissingDifficultyField(key))
    }

    /// Maps of old versions have no approach rate, they use the overall difficulty instead.
    pub(crate) fn fill_approach_rate(&mut self) -> ParseResult<()> {
        if !self.values.contains_key(Self::APPROACH_RATE) {
            let od = self.require(Self::OVERALL_DIFFICULTY)?;
            self.insert(Self::APPROACH_RATE, od);
        }

        Ok(())
    }

    #[inline]
    pub fn approach_rate(&self) -> Option<f64> {
        self.get(Self::APPROACH_RATE)
    }

    #[inline]
    pub fn circle_size(&self) -> Option<f64> {
        self.get(Self::CIRCLE_SIZE)
    }

    #[inline]
    pub fn hp_drain_rate(&self) -> Option<f64> {
        self.get(Self::HP_DRAIN_RATE)
    }

    #[inline]
    pub fn overall_difficulty(&self) -> Option<f64> {
        self.get(Self::OVERALL_DIFFICULTY)
    }

    /// Base slider velocity in hundreds of pixels per beat.
    #[inline]
    pub fn slider_multiplier(&self) -> Option<f64> {
        self.get(Self::SLIDER_MULTIPLIER)
    }

    /// Amount of slider ticks per beat.
    #[inline]
    pub fn slider_tick_rate(&self) -> Option<f64> {
        self.get(Self::SLIDER_TICK_RATE)
    }

    /// Distance in pixels between two slider ticks, before slider velocity is applied.
    pub(crate) fn tick_distance(&self) -> ParseResult<f64> {
        let slider_multiplier = self.require(Self::SLIDER_MULTIPLIER)?;
        let tick_rate = self.require(Self::SLIDER_TICK_RATE)?;

        Ok(100.0 * slider_multiplier / tick_rate)
    }

    /// The amount of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all stored values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

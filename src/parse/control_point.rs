use crate::util::sorted_vec::SortedVec;

/// A single entry of a [`TimingTimeline`] channel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimedValue {
    /// Timestamp in milliseconds.
    pub time: i32,
    pub value: f64,
}

impl TimedValue {
    #[inline]
    pub const fn new(time: i32, value: f64) -> Self {
        Self { time, value }
    }
}

/// The channels of a [`TimingTimeline`].
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum TimingChannel {
    /// Milliseconds per beat.
    BeatLen,
    /// Beats per minute.
    Bpm,
    /// Normalized slider velocity multiplier.
    SliderVelocity,
    /// Slider velocity as it was encoded, e.g. `-50` for a multiplier of 2.
    RawSliderVelocity,
}

impl TimingChannel {
    /// The value of the channel before any point was recorded for it.
    pub const fn default_value(self) -> f64 {
        match self {
            Self::BeatLen => TimingState::DEFAULT_BEAT_LEN,
            Self::Bpm => TimingState::DEFAULT_BPM,
            Self::SliderVelocity => TimingState::DEFAULT_SLIDER_VELOCITY,
            Self::RawSliderVelocity => TimingState::DEFAULT_RAW_SLIDER_VELOCITY,
        }
    }
}

/// The effective values of all timing channels at some point in time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingState {
    pub beat_len: f64,
    pub bpm: f64,
    pub slider_velocity: f64,
    pub raw_slider_velocity: f64,
}

impl TimingState {
    pub const DEFAULT_BEAT_LEN: f64 = 600.0;
    pub const DEFAULT_BPM: f64 = 100.0;
    pub const DEFAULT_SLIDER_VELOCITY: f64 = 1.0;
    pub const DEFAULT_RAW_SLIDER_VELOCITY: f64 = -100.0;
}

impl Default for TimingState {
    fn default() -> Self {
        Self {
            beat_len: Self::DEFAULT_BEAT_LEN,
            bpm: Self::DEFAULT_BPM,
            slider_velocity: Self::DEFAULT_SLIDER_VELOCITY,
            raw_slider_velocity: Self::DEFAULT_RAW_SLIDER_VELOCITY,
        }
    }
}

/// Tempo and slider velocity changes of a beatmap.
///
/// Each channel is an independent list sorted by time. Recording a value
/// at a time that already has one replaces the previous value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingTimeline {
    beat_len: SortedVec<TimedValue>,
    bpm: SortedVec<TimedValue>,
    slider_velocity: SortedVec<TimedValue>,
    raw_slider_velocity: SortedVec<TimedValue>,
}

impl TimingTimeline {
    /// Record a new tempo, i.e. an uninherited timing point.
    ///
    /// The very first tempo is moved to time 0 so that objects before it
    /// still have a tempo. Any slider velocity multiplier is reset.
    pub fn add_uninherited(&mut self, time: i32, beat_len: f64) {
        let time = if self.beat_len.is_empty() { 0 } else { time };

        self.beat_len.push(TimedValue::new(time, beat_len));
        self.bpm.push(TimedValue::new(time, 60_000.0 / beat_len));
        self.slider_velocity
            .push(TimedValue::new(time, TimingState::DEFAULT_SLIDER_VELOCITY));
        self.raw_slider_velocity
            .push(TimedValue::new(time, TimingState::DEFAULT_RAW_SLIDER_VELOCITY));
    }

    /// Record a slider velocity change, i.e. an inherited timing point.
    ///
    /// `raw` is the negative encoded value, `-100` being a multiplier of 1.
    pub fn add_inherited(&mut self, time: i32, raw: f64) {
        self.slider_velocity.push(TimedValue::new(time, -100.0 / raw));
        self.raw_slider_velocity.push(TimedValue::new(time, raw));
    }

    /// The effective value of `channel` at `time`.
    pub fn value_at(&self, channel: TimingChannel, time: i32) -> f64 {
        self.channel(channel)
            .value_at(time)
            .unwrap_or_else(|| channel.default_value())
    }

    /// The effective values of all channels at `time`.
    pub fn state_at(&self, time: i32) -> TimingState {
        TimingState {
            beat_len: self.value_at(TimingChannel::BeatLen, time),
            bpm: self.value_at(TimingChannel::Bpm, time),
            slider_velocity: self.value_at(TimingChannel::SliderVelocity, time),
            raw_slider_velocity: self.value_at(TimingChannel::RawSliderVelocity, time),
        }
    }

    /// All recorded points of `channel`, sorted by time.
    #[inline]
    pub fn points(&self, channel: TimingChannel) -> &[TimedValue] {
        self.channel(channel)
    }

    /// Whether no timing point has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beat_len.is_empty() && self.slider_velocity.is_empty()
    }

    fn channel(&self, channel: TimingChannel) -> &SortedVec<TimedValue> {
        match channel {
            TimingChannel::BeatLen => &self.beat_len,
            TimingChannel::Bpm => &self.bpm,
            TimingChannel::SliderVelocity => &self.slider_velocity,
            TimingChannel::RawSliderVelocity => &self.raw_slider_velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TimingChannel, TimingState, TimingTimeline};

    #[test]
    fn defaults_without_points() {
        let timeline = TimingTimeline::default();

        assert!(timeline.is_empty());
        assert_eq!(timeline.state_at(1000), TimingState::default());
        assert_eq!(timeline.value_at(TimingChannel::BeatLen, 0), 600.0);
        assert_eq!(timeline.value_at(TimingChannel::Bpm, 0), 100.0);
    }

    #[test]
    fn first_tempo_moves_to_zero() {
        let mut timeline = TimingTimeline::default();
        timeline.add_uninherited(1500, 500.0);
        timeline.add_uninherited(3000, 250.0);

        assert_eq!(timeline.points(TimingChannel::BeatLen)[0].time, 0);
        assert_eq!(timeline.value_at(TimingChannel::Bpm, 0), 120.0);
        assert_eq!(timeline.value_at(TimingChannel::Bpm, 2999), 120.0);
        assert_eq!(timeline.value_at(TimingChannel::Bpm, 3000), 240.0);
    }

    #[test]
    fn tempo_resets_velocity() {
        let mut timeline = TimingTimeline::default();
        timeline.add_uninherited(0, 400.0);
        timeline.add_inherited(1000, -50.0);
        timeline.add_inherited(2000, -200.0);

        assert_eq!(timeline.value_at(TimingChannel::SliderVelocity, 1500), 2.0);
        assert_eq!(timeline.value_at(TimingChannel::SliderVelocity, 2000), 0.5);

        timeline.add_uninherited(2000, 300.0);

        let state = timeline.state_at(2000);
        assert_eq!(state.slider_velocity, 1.0);
        assert_eq!(state.raw_slider_velocity, -100.0);
        assert_eq!(state.beat_len, 300.0);

        // tempo channels are untouched by inherited points
        assert_eq!(timeline.points(TimingChannel::BeatLen).len(), 2);
    }

    #[test]
    fn bpm_matches_beat_len() {
        let mut timeline = TimingTimeline::default();
        timeline.add_uninherited(0, 333.0);
        timeline.add_inherited(500, -80.0);
        timeline.add_uninherited(1000, 461.5);

        for time in [0, 250, 500, 999, 1000, 5000] {
            let beat_len = timeline.value_at(TimingChannel::BeatLen, time);
            let bpm = timeline.value_at(TimingChannel::Bpm, time);

            assert!((bpm - 60_000.0 / beat_len).abs() < 1e-9);
        }
    }
}

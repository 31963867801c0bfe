use std::sync::Arc;

use log::debug;

use crate::{
    curve::{Curve, PERFECT_PATH_STEP},
    parse::{DifficultySettings, ParseResult, PathType, TimingState},
    Pos2,
};

/// Sliders repeating more often than this are rejected.
pub const MAX_REPEATS: u32 = 9000;
/// Ticks are only generated along this many pixels of a span.
pub const MAX_TICK_LENGTH: f64 = 100_000.0;
/// Upper bound for the amount of ticks within a single span.
pub const MAX_SPAN_TICKS: usize = 4096;

/// A scorable point in time along a slider, either a tick or an edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderTick {
    pub pos: Pos2,
    /// Timestamp in milliseconds.
    pub time: f64,
}

/// Everything gathered from a slider's line that is needed to build a [`Slider`].
#[derive(Clone, Debug)]
pub(crate) struct SliderParams {
    pub(crate) start_time: i32,
    pub(crate) path_type: PathType,
    /// Includes the object's own position as first point.
    pub(crate) control_points: Vec<Pos2>,
    pub(crate) repeats: u32,
    pub(crate) pixel_len: f64,
    pub(crate) timing: TimingState,
    pub(crate) difficulty: Arc<DifficultySettings>,
    pub(crate) tick_distance: f64,
}

/// A slider with its resolved curve, ticks, and edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    path_type: PathType,
    control_points: Vec<Pos2>,
    repeats: u32,
    pixel_len: f64,
    start_time: i32,
    timing: TimingState,
    difficulty: Arc<DifficultySettings>,
    tick_distance: f64,
    duration: f64,
    curve: Curve,
    ticks: Vec<SliderTick>,
    edges: Vec<SliderTick>,
}

impl Slider {
    pub(crate) fn new(params: SliderParams) -> ParseResult<Self> {
        let SliderParams {
            start_time,
            path_type,
            control_points,
            repeats,
            pixel_len,
            timing,
            difficulty,
            tick_distance,
        } = params;

        let slider_multiplier = difficulty.require(DifficultySettings::SLIDER_MULTIPLIER)?;

        let duration = timing.beat_len
            * (pixel_len / (slider_multiplier * timing.slider_velocity))
            / 100.0
            * f64::from(repeats);

        let (path_type, curve) = Self::resolve_curve(path_type, &control_points, start_time);

        let mut slider = Self {
            path_type,
            control_points,
            repeats,
            pixel_len,
            start_time,
            timing,
            difficulty,
            tick_distance,
            duration,
            curve,
            ticks: Vec::new(),
            edges: Vec::with_capacity(repeats as usize),
        };

        slider.generate_events();

        Ok(slider)
    }

    /// Fix up the declared path type and build the curve for it.
    fn resolve_curve(declared: PathType, points: &[Pos2], start_time: i32) -> (PathType, Curve) {
        let path_type = match declared {
            PathType::PerfectCurve if points.len() > 3 => PathType::Bezier,
            _ if points.len() == 2 => PathType::Linear,
            other => other,
        };

        match Curve::new(points, path_type) {
            Ok(curve) => (path_type, curve),
            Err(err) => {
                debug!("Slider at {start_time}ms falls back to bezier: {err}");

                (PathType::Bezier, Curve::bezier(points))
            }
        }
    }

    fn generate_events(&mut self) {
        let start_time = f64::from(self.start_time);
        let repeats = f64::from(self.repeats);
        let span_duration = self.duration / repeats;

        let first_span = self.first_span_ticks();
        self.ticks.extend_from_slice(&first_span);

        for repeat_id in 1..self.repeats {
            let reversed = repeat_id % 2 == 1;
            let time_offset = span_duration * f64::from(repeat_id);
            let dist = if reversed { self.pixel_len } else { 0.0 };

            self.edges.push(SliderTick {
                pos: self.curve.point_at_distance(dist),
                time: start_time + time_offset,
            });

            let reference = if reversed {
                start_time + span_duration
            } else {
                start_time
            };

            let reflect = |tick: &SliderTick| SliderTick {
                pos: tick.pos,
                time: start_time + time_offset + (tick.time - reference).abs(),
            };

            if reversed {
                self.ticks.extend(first_span.iter().rev().map(reflect));
            } else {
                self.ticks.extend(first_span.iter().map(reflect));
            }
        }

        let dist_end = if self.repeats % 2 == 1 {
            self.pixel_len
        } else {
            0.0
        };

        self.edges.push(SliderTick {
            pos: self.curve.point_at_distance(dist_end),
            time: start_time + self.duration,
        });
    }

    /// Ticks of the first traversal, excluding one that would be too close to the end.
    fn first_span_ticks(&self) -> Vec<SliderTick> {
        let tick_distance = self.tick_distance;

        if !(tick_distance.is_finite() && tick_distance > 0.0) {
            return Vec::new();
        }

        let start_time = f64::from(self.start_time);
        let time_per_tick =
            self.duration * (tick_distance / (self.pixel_len * f64::from(self.repeats)));
        let target = self.pixel_len.min(MAX_TICK_LENGTH) - tick_distance / 8.0;

        let expected = (target / tick_distance).max(0.0).min(MAX_SPAN_TICKS as f64) as usize;
        let mut ticks = Vec::with_capacity(expected);
        let mut current_distance = tick_distance;

        while current_distance < target {
            if ticks.len() == MAX_SPAN_TICKS {
                debug!(
                    "Slider at {}ms reached {MAX_SPAN_TICKS} ticks per span, skipping the rest",
                    self.start_time
                );

                break;
            }

            ticks.push(SliderTick {
                pos: self.curve.point_at_distance(current_distance),
                time: start_time + time_per_tick * (ticks.len() + 1) as f64,
            });

            current_distance += tick_distance;
        }

        ticks
    }

    /// The path type after resolving fallbacks.
    #[inline]
    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    /// All control points, starting with the slider's head.
    #[inline]
    pub fn control_points(&self) -> &[Pos2] {
        &self.control_points
    }

    /// Amount of times the path is traversed, 1 meaning no reverse arrows.
    #[inline]
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    #[inline]
    pub fn pixel_len(&self) -> f64 {
        self.pixel_len
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn end_time(&self) -> f64 {
        f64::from(self.start_time) + self.duration
    }

    /// Distance in pixels between two ticks.
    #[inline]
    pub fn tick_distance(&self) -> f64 {
        self.tick_distance
    }

    /// The timing values at the slider's start time.
    #[inline]
    pub fn timing(&self) -> &TimingState {
        &self.timing
    }

    /// The difficulty settings at the time the slider was parsed.
    #[inline]
    pub fn difficulty(&self) -> &DifficultySettings {
        &self.difficulty
    }

    #[inline]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Ticks of all traversals in order.
    #[inline]
    pub fn ticks(&self) -> &[SliderTick] {
        &self.ticks
    }

    /// Reverse arrows in order, followed by the slider's end.
    #[inline]
    pub fn edges(&self) -> &[SliderTick] {
        &self.edges
    }

    /// The head, every tick, every reverse arrow, and the end.
    #[inline]
    pub fn combo(&self) -> u32 {
        (self.ticks.len() as u32)
            .saturating_add(self.repeats)
            .saturating_add(1)
    }

    /// Amount of points to hit, i.e. head, ticks, and edges.
    #[inline]
    pub fn points(&self) -> u32 {
        (self.ticks.len() as u32)
            .saturating_add(self.edges.len() as u32)
            .saturating_add(1)
    }

    /// The path to draw for this slider.
    ///
    /// Perfect curves are sampled every few pixels up to the pixel length.
    pub fn path(&self) -> Vec<Pos2> {
        match self.curve.points() {
            Some(points) => points.to_vec(),
            None => {
                let steps = (self.pixel_len / PERFECT_PATH_STEP).max(0.0) as usize;

                (0..=steps)
                    .map(|i| self.curve.point_at_distance(i as f64 * PERFECT_PATH_STEP))
                    .collect()
            }
        }
    }
}

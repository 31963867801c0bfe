mod control_point;
mod difficulty;
mod error;
mod hitobject;
mod pos2;
mod reader;

pub use control_point::{TimedValue, TimingChannel, TimingState, TimingTimeline};
pub use difficulty::DifficultySettings;
pub use error::{ParseError, ParseResult};
pub use hitobject::{HitObject, HitObjectKind};
pub use pos2::Pos2;

use std::{str::FromStr, sync::Arc};

use log::{debug, trace};

use crate::slider::{Slider, SliderParams, MAX_REPEATS};

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::{fs::File, io::Read, path::Path};

#[cfg(feature = "async_tokio")]
use std::path::Path;

#[cfg(feature = "async_tokio")]
use tokio::io::AsyncRead;

#[cfg(feature = "async_std")]
use async_std::io::Read;

use reader::FileReader;

macro_rules! next_field {
    ($opt:expr, $line:ident) => {
        $opt.ok_or(ParseError::MissingField { line: $line })?
    };
}

macro_rules! validate_float {
    ($x:expr) => {{
        let x: f64 = $x;

        if x.is_finite() {
            x
        } else {
            return Err(ParseError::InvalidFloatingPoint);
        }
    }};
}

/// A decoded beatmap with all of its circles and sliders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Beatmap {
    /// The version of the .osu file.
    pub version: i32,
    /// Everything in the `[Difficulty]` section.
    pub difficulty: DifficultySettings,
    /// Tempo and slider velocity changes.
    pub timeline: TimingTimeline,
    /// Distance between slider ticks before slider velocity is applied.
    /// `None` if the map has no `[HitObjects]` section.
    pub tick_distance: Option<f64>,
    /// Circles and sliders in file order; spinners and other kinds are not included.
    pub hit_objects: Vec<HitObject>,
    /// Sum of the combo of all objects.
    pub max_combo: u32,
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl Beatmap {
    /// Parse a beatmap by providing a type that implements [`Read`].
    pub fn parse<R: Read>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);
        let mut state = ParseState::default();

        while reader.next_line()? != 0 {
            state.parse_line(reader.get_line()?, reader.line_number())?;
        }

        state.finish()
    }

    /// Read and parse the beatmap at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        Self::parse(File::open(path)?)
    }
}

#[cfg(feature = "async_tokio")]
impl Beatmap {
    /// Parse a beatmap by providing a type that implements tokio's [`AsyncRead`].
    pub async fn parse<R: AsyncRead + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);
        let mut state = ParseState::default();

        while reader.next_line().await? != 0 {
            state.parse_line(reader.get_line()?, reader.line_number())?;
        }

        state.finish()
    }

    /// Read and parse the beatmap at the given path.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        let file = tokio::fs::File::open(path).await?;

        Self::parse(file).await
    }
}

#[cfg(feature = "async_std")]
impl Beatmap {
    /// Parse a beatmap by providing a type that implements async-std's [`Read`].
    pub async fn parse<R: Read + Unpin>(input: R) -> ParseResult<Self> {
        let mut reader = FileReader::new(input);
        let mut state = ParseState::default();

        while reader.next_line().await? != 0 {
            state.parse_line(reader.get_line()?, reader.line_number())?;
        }

        state.finish()
    }
}

impl Beatmap {
    /// Parse a beatmap from its raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> ParseResult<Self> {
        std::str::from_utf8(bytes)?.parse()
    }

    /// Sum of the points of all objects, i.e. circles, slider heads, ticks, and edges.
    pub fn object_count(&self) -> u32 {
        self.hit_objects
            .iter()
            .fold(0, |count, h| count.saturating_add(h.points()))
    }

    /// Iterate over all sliders.
    pub fn sliders(&self) -> impl Iterator<Item = &Slider> {
        self.hit_objects.iter().filter_map(HitObject::slider)
    }
}

impl FromStr for Beatmap {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut state = ParseState::default();

        for (line, number) in s.lines().zip(1..) {
            if !reader::is_blank(line.as_bytes()) {
                state.parse_line(line.trim_end(), number)?;
            }
        }

        state.finish()
    }
}

/// The curve kind of a slider.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum PathType {
    Catmull = 0,
    Bezier = 1,
    Linear = 2,
    PerfectCurve = 3,
}

impl FromStr for PathType {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Self::Linear),
            "C" => Ok(Self::Catmull),
            "B" => Ok(Self::Bezier),
            "P" => Ok(Self::PerfectCurve),
            _ => Err(ParseError::UnsupportedCurveKind(s.to_owned())),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Section {
    /// Before the first section header.
    None,
    Difficulty,
    TimingPoints,
    HitObjects,
    /// Any section whose content is ignored.
    Other,
}

impl Section {
    #[inline]
    fn from_header(header: &str) -> Self {
        match header {
            "[Difficulty]" => Self::Difficulty,
            "[TimingPoints]" => Self::TimingPoints,
            "[HitObjects]" => Self::HitObjects,
            _ => Self::Other,
        }
    }
}

/// Everything gathered so far while going through a beatmap's lines.
struct ParseState {
    version: Option<i32>,
    section: Section,
    difficulty: Arc<DifficultySettings>,
    timeline: TimingTimeline,
    tick_distance: Option<f64>,
    hit_objects: Vec<HitObject>,
    max_combo: u32,
}

impl Default for ParseState {
    fn default() -> Self {
        Self {
            version: None,
            section: Section::None,
            difficulty: Arc::default(),
            timeline: TimingTimeline::default(),
            tick_distance: None,
            hit_objects: Vec::with_capacity(256),
            max_combo: 0,
        }
    }
}

impl ParseState {
    /// Handle a non-blank line without trailing whitespace.
    ///
    /// The first such line is the header, even if it looks like a comment.
    /// After that, `//` comments are skipped.
    fn parse_line(&mut self, line: &str, line_number: usize) -> ParseResult<()> {
        if self.version.is_none() {
            self.version = Some(parse_version(line)?);

            return Ok(());
        }

        if line.trim_start().starts_with("//") {
            return Ok(());
        }

        if line.starts_with('[') {
            return self.enter_section(line);
        }

        match self.section {
            Section::Difficulty => self.parse_difficulty(line, line_number),
            Section::TimingPoints => self.parse_timing_point(line, line_number),
            Section::HitObjects => self.parse_hit_object(line, line_number),
            Section::None | Section::Other => Ok(()),
        }
    }

    fn enter_section(&mut self, header: &str) -> ParseResult<()> {
        self.section = Section::from_header(header);

        match self.section {
            Section::HitObjects => self.tick_distance = Some(self.difficulty.tick_distance()?),
            Section::Other => trace!("Ignoring section {header}"),
            _ => {}
        }

        Ok(())
    }

    fn parse_difficulty(&mut self, line: &str, line_number: usize) -> ParseResult<()> {
        let (key, value) = line
            .split_once(':')
            .ok_or(ParseError::BadLine { line: line_number })?;

        let value = validate_float!(value.trim().parse()?);
        Arc::make_mut(&mut self.difficulty).insert(key.trim(), value);

        Ok(())
    }

    fn parse_timing_point(&mut self, line: &str, line_number: usize) -> ParseResult<()> {
        let mut split = line.split(',');

        let time = next_field!(split.next(), line_number).trim().parse::<f64>()?;
        let time = validate_float!(time) as i32;

        let mut value = next_field!(split.next(), line_number).trim();

        // short lines of old versions only describe tempo changes
        let uninherited = match split.nth(4) {
            Some(kind) => kind.trim().parse::<i32>()? != 0,
            None => true,
        };

        if !uninherited && !value.starts_with('-') {
            value = "-100";
        }

        let number = value.parse::<f64>()?;

        if value.starts_with('-') {
            validate_float!(-100.0 / number);
            self.timeline.add_inherited(time, number);
        } else {
            validate_float!(60_000.0 / number);
            self.timeline.add_uninherited(time, number);
        }

        Ok(())
    }

    fn parse_hit_object(&mut self, line: &str, line_number: usize) -> ParseResult<()> {
        let mut split = line.split(',');

        let x = next_field!(split.next(), line_number).trim().parse::<f64>()?;
        let y = next_field!(split.next(), line_number).trim().parse::<f64>()?;
        let pos = Pos2::new(validate_float!(x), validate_float!(y));

        let start_time = next_field!(split.next(), line_number).trim().parse::<i32>()?;
        let kind_mask = next_field!(split.next(), line_number).trim().parse::<u32>()?;

        let hit_object = if kind_mask & HitObject::SLIDER_FLAG > 0 {
            // skip hitsound
            let mut split = split.skip(1);

            let curve = next_field!(split.next(), line_number);
            let repeats = next_field!(split.next(), line_number).trim().parse::<u32>()?;

            if repeats > MAX_REPEATS {
                return Err(ParseError::TooManyRepeats(repeats));
            }

            let pixel_len = next_field!(split.next(), line_number).trim().parse::<f64>()?;

            let input = SliderInput {
                pos,
                start_time,
                kind_mask,
                curve,
                repeats,
                pixel_len: validate_float!(pixel_len),
            };

            self.parse_slider(input)?
        } else if kind_mask & HitObject::CIRCLE_FLAG > 0 {
            HitObject::circle(pos, start_time, kind_mask)
        } else {
            trace!("Skipping object of type {kind_mask} at {start_time}ms");

            return Ok(());
        };

        self.max_combo = self.max_combo.saturating_add(hit_object.combo());
        self.hit_objects.push(hit_object);

        Ok(())
    }

    fn parse_slider(&self, input: SliderInput<'_>) -> ParseResult<HitObject> {
        let SliderInput {
            pos,
            start_time,
            kind_mask,
            curve,
            repeats,
            pixel_len,
        } = input;

        let mut curve_iter = curve.split('|');
        let path_type = curve_iter.next().unwrap_or_default().trim();

        let mut points = curve_iter
            .map(|point| -> ParseResult<Pos2> {
                let (x, y) = point.split_once(':').ok_or(ParseError::InvalidCurvePoints)?;
                let x = validate_float!(x.trim().parse()?);
                let y = validate_float!(y.trim().parse()?);

                Ok(Pos2::new(x, y))
            })
            .collect::<ParseResult<Vec<_>>>()?;

        if points.is_empty() {
            debug!("Slider at {start_time}ms has no curve points, treating it as circle");

            return Ok(HitObject::circle(pos, start_time, HitObject::CIRCLE_FLAG));
        }

        let mut path_type: PathType = path_type.parse()?;
        let version = self.version.unwrap_or_default();

        if version <= 6 && points.len() >= 2 {
            if path_type == PathType::Linear {
                path_type = PathType::Bezier;
            }

            if points.len() == 2 && (pos == points[0] || points[0] == points[1]) {
                points.remove(0);
                path_type = PathType::Linear;
            }
        }

        let timing = self.timeline.state_at(start_time);

        let mut tick_distance = match self.tick_distance {
            Some(tick_distance) => tick_distance,
            None => self.difficulty.tick_distance()?,
        };

        if version >= 8 {
            tick_distance /= (-timing.raw_slider_velocity).clamp(10.0, 1000.0) / 100.0;
        }

        let mut control_points = Vec::with_capacity(points.len() + 1);
        control_points.push(pos);
        control_points.append(&mut points);

        let slider = Slider::new(SliderParams {
            start_time,
            path_type,
            control_points,
            repeats: repeats.max(1),
            pixel_len,
            timing,
            difficulty: Arc::clone(&self.difficulty),
            tick_distance,
        })?;

        Ok(HitObject {
            pos,
            start_time,
            kind_mask,
            kind: HitObjectKind::Slider(slider),
        })
    }

    fn finish(self) -> ParseResult<Beatmap> {
        let version = self.version.ok_or(ParseError::IncorrectFileHeader)?;

        let mut difficulty =
            Arc::try_unwrap(self.difficulty).unwrap_or_else(|difficulty| (*difficulty).clone());
        difficulty.fill_approach_rate()?;

        debug!(
            "Parsed v{version} beatmap with {} objects and a max combo of {}",
            self.hit_objects.len(),
            self.max_combo
        );

        Ok(Beatmap {
            version,
            difficulty,
            timeline: self.timeline,
            tick_distance: self.tick_distance,
            hit_objects: self.hit_objects,
            max_combo: self.max_combo,
        })
    }
}

/// The fields of a slider line.
struct SliderInput<'l> {
    pos: Pos2,
    start_time: i32,
    kind_mask: u32,
    curve: &'l str,
    repeats: u32,
    pixel_len: f64,
}

/// The first run of digits in the header line.
fn parse_version(line: &str) -> ParseResult<i32> {
    let line = line.trim_start_matches('\u{feff}');

    let start = line
        .find(|c: char| c.is_ascii_digit())
        .ok_or(ParseError::IncorrectFileHeader)?;

    let digits = &line[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    Ok(digits[..end].parse()?)
}

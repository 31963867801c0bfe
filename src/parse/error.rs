use std::{
    error::Error as StdError,
    fmt,
    io::Error as IoError,
    num::{ParseFloatError, ParseIntError},
    str::Utf8Error,
};

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while parsing a [`Beatmap`](crate::Beatmap).
#[derive(Debug)]
pub enum ParseError {
    /// A required `[Difficulty]` field was not set when it was needed.
    MissingDifficultyField(&'static str),
    /// A line did not contain a required field.
    MissingField {
        /// Line number of the faulty line.
        line: usize,
    },
    /// A `key:value` line had no colon.
    BadLine {
        /// Line number of the faulty line.
        line: usize,
    },
    /// The first line did not contain a format version.
    IncorrectFileHeader,
    /// A curve point was not of the form `x:y`.
    InvalidCurvePoints,
    /// A decimal number could not be parsed.
    InvalidDecimalNumber(ParseFloatError),
    /// A number turned out to be infinite or NaN.
    InvalidFloatingPoint,
    /// An integer could not be parsed.
    InvalidInteger(ParseIntError),
    /// Some IO operation failed.
    IoError(IoError),
    /// A slider repeats more often than [`MAX_REPEATS`](crate::MAX_REPEATS).
    TooManyRepeats(u32),
    /// A slider's curve kind letter is not one of `L`, `P`, `B`, or `C`.
    UnsupportedCurveKind(String),
    /// A line was not valid UTF-8.
    Utf8Error(Utf8Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDifficultyField(field) => {
                write!(f, "difficulty field `{field}` is required but was not set")
            }
            Self::MissingField { line } => write!(f, "missing field in line {line}"),
            Self::BadLine { line } => write!(f, "expected `key:value` in line {line}"),
            Self::IncorrectFileHeader => {
                f.write_str("expected a format version in the first line")
            }
            Self::InvalidCurvePoints => f.write_str("invalid curve point"),
            Self::InvalidDecimalNumber(_) => f.write_str("failed to parse decimal number"),
            Self::InvalidFloatingPoint => f.write_str("number is infinite or NaN"),
            Self::InvalidInteger(_) => f.write_str("failed to parse integer"),
            Self::IoError(_) => f.write_str("IO error"),
            Self::TooManyRepeats(repeats) => write!(f, "slider repeats {repeats} times"),
            Self::UnsupportedCurveKind(kind) => write!(f, "unsupported curve kind `{kind}`"),
            Self::Utf8Error(_) => f.write_str("line is not valid UTF-8"),
        }
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidDecimalNumber(inner) => Some(inner),
            Self::InvalidInteger(inner) => Some(inner),
            Self::IoError(inner) => Some(inner),
            Self::Utf8Error(inner) => Some(inner),
            Self::MissingDifficultyField(_)
            | Self::MissingField { .. }
            | Self::BadLine { .. }
            | Self::IncorrectFileHeader
            | Self::InvalidCurvePoints
            | Self::InvalidFloatingPoint
            | Self::TooManyRepeats(_)
            | Self::UnsupportedCurveKind(_) => None,
        }
    }
}

impl From<IoError> for ParseError {
    fn from(other: IoError) -> Self {
        Self::IoError(other)
    }
}

impl From<ParseFloatError> for ParseError {
    fn from(other: ParseFloatError) -> Self {
        Self::InvalidDecimalNumber(other)
    }
}

impl From<ParseIntError> for ParseError {
    fn from(other: ParseIntError) -> Self {
        Self::InvalidInteger(other)
    }
}

impl From<Utf8Error> for ParseError {
    fn from(other: Utf8Error) -> Self {
        Self::Utf8Error(other)
    }
}

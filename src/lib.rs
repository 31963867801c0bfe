//! Library to decode [osu!] beatmaps with exact slider geometry.
//!
//! ## Description
//!
//! Only what's needed to know where and when each object has to be hit is decoded:
//! the `[Difficulty]` section, tempo and slider velocity changes, and every circle
//! and slider. Sliders come with their resolved curve, their ticks, and their
//! edges, i.e. reverse arrows and the end. The max combo of the map is summed up
//! while parsing.
//!
//! ## Usage
//!
//! ```
//! use rosu_slider::Beatmap;
//!
//! let content = "osu file format v14
//!
//! [Difficulty]
//! OverallDifficulty:8
//! SliderMultiplier:1.4
//! SliderTickRate:1
//!
//! [TimingPoints]
//! 0,500,4,2,1,50,1,0
//!
//! [HitObjects]
//! 256,192,1000,1,0,0:0:0:0:
//! 100,100,1500,2,0,L|380:100,1,280
//! ";
//!
//! let map: Beatmap = content.parse().unwrap();
//!
//! // The circle, the slider's head, one tick, and the slider's end
//! assert_eq!(map.max_combo, 4);
//!
//! for slider in map.sliders() {
//!     for tick in slider.ticks() {
//!         println!("Tick at {}ms: {}", tick.time, tick.pos);
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | Synchronous parsing through [`std::io::Read`] |
//! | `async_tokio` | Beatmap parsing will be async through [tokio] | [`tokio`]
//! | `async_std` | Beatmap parsing will be async through [async-std] | [`async-std`]
//!
//! Decoding details are logged through the [`log`] facade.
//!
//! [osu!]: https://osu.ppy.sh/home
//! [tokio]: https://github.com/tokio-rs/tokio
//! [async-std]: https://github.com/async-rs/async-std
//! [`tokio`]: https://docs.rs/tokio
//! [`async-std`]: https://docs.rs/async-std
//! [`log`]: https://docs.rs/log

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[cfg(all(feature = "async_tokio", feature = "async_std"))]
compile_error!("Only one of the features `async_tokio` and `async_std` should be enabled");

/// Slider paths and how to travel along them.
pub mod curve;

/// Types to decode beatmaps.
pub mod parse;

mod math_util;
mod slider;
mod util;

#[doc(inline)]
pub use self::{
    curve::{Curve, DegenerateArc},
    parse::{
        Beatmap, DifficultySettings, HitObject, HitObjectKind, ParseError, ParseResult, PathType,
        Pos2, TimingChannel, TimingState, TimingTimeline,
    },
    slider::{Slider, SliderTick, MAX_REPEATS, MAX_SPAN_TICKS, MAX_TICK_LENGTH},
};

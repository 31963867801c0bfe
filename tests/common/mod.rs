#![allow(unused)]

use rosu_slider::Beatmap;

/// Paths to .osu files
pub const SIMPLE: &str = "./resources/simple.osu";
pub const LEGACY: &str = "./resources/legacy.osu";

#[macro_export]
#[rustfmt::skip]
macro_rules! test_map {
    ($path:ident) => {{
        #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
        { common::test_map(common::$path) }
        #[cfg(any(feature = "async_tokio", feature = "async_std"))]
        { common::test_map(common::$path).await }
    }};
}

#[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
pub fn test_map(path: &str) -> Beatmap {
    Beatmap::from_path(path).unwrap()
}

#[cfg(feature = "async_tokio")]
pub async fn test_map(path: &str) -> Beatmap {
    Beatmap::from_path(path).await.unwrap()
}

#[cfg(feature = "async_std")]
pub async fn test_map(path: &str) -> Beatmap {
    let file = async_std::fs::File::open(path).await.unwrap();

    Beatmap::parse(file).await.unwrap()
}

#[track_caller]
pub fn assert_eq_float(a: f64, b: f64) {
    const TOLERANCE: f64 = 1e-6;

    assert!((a - b).abs() < TOLERANCE, "{a} != {b}")
}

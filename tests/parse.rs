use rosu_slider::{Beatmap, HitObjectKind, PathType, TimingChannel};

use crate::common::assert_eq_float;

mod common;

#[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
mod sync {
    use super::*;

    #[test]
    fn parse_simple() {
        assert_simple(test_map!(SIMPLE));
    }

    #[test]
    fn parse_legacy() {
        assert_legacy(test_map!(LEGACY));
    }

    #[test]
    fn parse_reader_and_bytes_agree() {
        let bytes = std::fs::read(common::SIMPLE).unwrap();

        let from_reader = Beatmap::parse(bytes.as_slice()).unwrap();
        let from_bytes = Beatmap::from_bytes(&bytes).unwrap();

        assert_eq!(from_reader, from_bytes);
    }
}

#[cfg(feature = "async_tokio")]
mod async_tokio {
    use tokio::runtime::Builder as RuntimeBuilder;

    use super::*;

    #[test]
    fn parse_simple() {
        RuntimeBuilder::new_current_thread()
            .build()
            .unwrap()
            .block_on(async { assert_simple(test_map!(SIMPLE)) });
    }

    #[test]
    fn parse_legacy() {
        RuntimeBuilder::new_current_thread()
            .build()
            .unwrap()
            .block_on(async { assert_legacy(test_map!(LEGACY)) });
    }
}

#[cfg(feature = "async_std")]
mod async_std_runtime {
    use super::*;

    #[test]
    fn parse_simple() {
        ::async_std::task::block_on(async { assert_simple(test_map!(SIMPLE)) });
    }

    #[test]
    fn parse_legacy() {
        ::async_std::task::block_on(async { assert_legacy(test_map!(LEGACY)) });
    }
}

#[test]
fn from_str_matches_file() {
    let content = std::fs::read_to_string(common::SIMPLE).unwrap();
    let map: Beatmap = content.parse().unwrap();

    assert_simple(map);
}

fn assert_simple(map: Beatmap) {
    assert_eq!(map.version, 14);
    assert_eq!(map.difficulty.approach_rate(), Some(9.0));
    assert_eq!(map.difficulty.overall_difficulty(), Some(8.0));
    assert_eq!(map.difficulty.circle_size(), Some(4.0));
    assert_eq!(map.difficulty.hp_drain_rate(), Some(5.0));
    assert_eq!(map.difficulty.slider_multiplier(), Some(1.4));
    assert_eq!(map.difficulty.slider_tick_rate(), Some(2.0));
    assert_eq_float(map.tick_distance.unwrap(), 70.0);

    assert_eq!(map.timeline.points(TimingChannel::BeatLen).len(), 2);
    assert_eq!(map.timeline.points(TimingChannel::SliderVelocity).len(), 3);
    assert_eq_float(map.timeline.value_at(TimingChannel::Bpm, 0), 120.0);
    assert_eq_float(map.timeline.value_at(TimingChannel::Bpm, 4000), 150.0);
    assert_eq_float(map.timeline.value_at(TimingChannel::SliderVelocity, 3000), 2.0);
    assert_eq_float(map.timeline.value_at(TimingChannel::SliderVelocity, 4000), 1.0);

    // the spinner is skipped
    assert_eq!(map.hit_objects.len(), 5);
    assert_eq!(map.sliders().count(), 3);

    let kinds: Vec<_> = map
        .hit_objects
        .iter()
        .map(|h| match &h.kind {
            HitObjectKind::Circle => None,
            HitObjectKind::Slider(slider) => Some(slider.path_type()),
        })
        .collect();

    assert_eq!(
        kinds,
        [
            None,
            Some(PathType::Linear),
            Some(PathType::Linear),
            Some(PathType::PerfectCurve),
            None
        ]
    );

    assert_eq!(map.hit_objects[3].kind_mask, 6);
    assert_eq!(map.max_combo, 13);
    assert_eq!(map.object_count(), 13);
}

fn assert_legacy(map: Beatmap) {
    assert_eq!(map.version, 5);

    // filled in from the overall difficulty
    assert_eq!(map.difficulty.approach_rate(), Some(6.0));
    assert_eq_float(map.tick_distance.unwrap(), 100.0);

    // short timing point, moved to 0
    let beat_lens = map.timeline.points(TimingChannel::BeatLen);
    assert_eq!(beat_lens.len(), 1);
    assert_eq!(beat_lens[0].time, 0);
    assert_eq_float(beat_lens[0].value, 400.0);

    let sliders: Vec<_> = map.sliders().collect();
    assert_eq!(sliders.len(), 3);

    assert_eq!(sliders[0].path_type(), PathType::Linear);
    assert_eq!(sliders[0].control_points().len(), 2);
    assert_eq!(sliders[1].path_type(), PathType::Linear);
    assert_eq!(sliders[1].control_points().len(), 2);
    assert_eq!(sliders[2].path_type(), PathType::Bezier);
    assert_eq!(sliders[2].control_points().len(), 3);

    assert_eq!(map.max_combo, 9);
    assert_eq!(map.object_count(), 9);
}

use rosu_slider::{Beatmap, Curve, Pos2, Slider, SliderTick};

use crate::common::assert_eq_float;

mod common;

fn simple_sliders() -> Vec<Slider> {
    let bytes = std::fs::read(common::SIMPLE).unwrap();
    let map = Beatmap::from_bytes(&bytes).unwrap();

    map.sliders().cloned().collect()
}

#[track_caller]
fn assert_tick(tick: &SliderTick, x: f64, y: f64, time: f64) {
    assert!(
        tick.pos.distance(Pos2::new(x, y)) < 1e-6,
        "{} != ({x}, {y})",
        tick.pos
    );
    assert_eq_float(tick.time, time);
}

#[test]
fn single_span_slider() {
    let sliders = simple_sliders();
    let slider = &sliders[0];

    assert_eq_float(slider.tick_distance(), 70.0);
    assert_eq_float(slider.duration(), 500.0);
    assert_eq_float(slider.end_time(), 2000.0);

    assert_eq!(slider.ticks().len(), 1);
    assert_tick(&slider.ticks()[0], 170.0, 100.0, 1750.0);

    assert_eq!(slider.edges().len(), 1);
    assert_tick(&slider.edges()[0], 240.0, 100.0, 2000.0);

    assert_eq!(slider.combo(), 3);
}

#[test]
fn slider_velocity_change() {
    let sliders = simple_sliders();
    let slider = &sliders[1];

    assert_eq_float(slider.timing().slider_velocity, 2.0);
    assert_eq_float(slider.timing().raw_slider_velocity, -50.0);

    // doubled velocity doubles the tick distance
    assert_eq_float(slider.tick_distance(), 140.0);
    assert_eq_float(slider.duration(), 1000.0);
    assert_eq!(slider.repeats(), 2);

    let ticks = slider.ticks();
    assert_eq!(ticks.len(), 2);
    assert_tick(&ticks[0], 240.0, 100.0, 2750.0);
    assert_tick(&ticks[1], 240.0, 100.0, 3250.0);

    let edges = slider.edges();
    assert_eq!(edges.len(), 2);
    assert_tick(&edges[0], 380.0, 100.0, 3000.0);
    assert_tick(&edges[1], 100.0, 100.0, 3500.0);

    assert_eq!(slider.combo(), 5);
    assert_eq!(slider.points(), 5);
}

#[test]
fn perfect_curve_slider() {
    let sliders = simple_sliders();
    let slider = &sliders[2];

    // new tempo resets the velocity
    assert_eq_float(slider.timing().beat_len, 400.0);
    assert_eq_float(slider.timing().slider_velocity, 1.0);
    assert_eq_float(slider.duration(), 400.0 * 100.0 / 1.4 / 100.0);

    let Curve::Perfect { center, radius, .. } = slider.curve() else {
        panic!("expected perfect curve, got {:?}", slider.curve());
    };

    assert!(center.distance(Pos2::new(150.0, 100.0)) < 1e-9);
    assert_eq_float(radius.abs(), 50.0);

    assert_eq!(slider.ticks().len(), 1);
    assert_eq_float(slider.ticks()[0].time, 4500.0 + slider.duration() * 0.7);

    // every tick and edge lies on the circle
    for tick in slider.ticks().iter().chain(slider.edges()) {
        assert_eq_float(tick.pos.distance(*center), 50.0);
    }

    let path = slider.path();
    assert_eq!(path.len(), 21);
    assert!(path[0].distance(Pos2::new(100.0, 100.0)) < 1e-9);
}

#[test]
fn events_end_with_slider() {
    for slider in simple_sliders() {
        let times: Vec<_> = slider
            .ticks()
            .iter()
            .chain(slider.edges())
            .map(|tick| tick.time)
            .collect();

        assert!(times.iter().all(|&time| time <= slider.end_time() + 1e-9));

        let last_edge = slider.edges().last().unwrap();
        assert_eq_float(last_edge.time, slider.end_time());
    }
}

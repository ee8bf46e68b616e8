//! End-to-end engine workflows: ingestion, navigation, windowing and reset

mod common;

use common::assert_float_eq;
use common::builders::{ReadingBuilder, ScriptedSource};
use envdash_rs::{
    AppConfig, Channel, DisplayMode, Engine, PollOutcome, Transition, ViewCommand,
};

const START: f64 = 1_000.0;

fn engine() -> Engine<ScriptedSource> {
    Engine::new(&AppConfig::default(), ScriptedSource::new(), START)
}

#[test]
fn test_four_field_payload_reaches_every_channel() {
    let mut engine = engine();
    engine.source().write("22.5,2048,350,65.2");

    let report = engine.tick(START + 1.5);
    assert!(matches!(report.outcome, PollOutcome::Applied { .. }));

    let store = engine.store();
    for (channel, expected) in [
        (Channel::Temperature, 22.5),
        (Channel::Light, 2048.0),
        (Channel::Gas, 350.0),
        (Channel::Humidity, 65.2),
    ] {
        let latest = store.latest(channel).unwrap();
        assert_float_eq(latest.timestamp, 1.5, 1e-9);
        assert_float_eq(latest.value, expected, 1e-9);
    }
}

#[test]
fn test_legacy_payload_fills_humidity() {
    let mut engine = engine();
    engine.source().write("22.5,2048,350");
    engine.tick(START + 1.0);
    assert_eq!(
        engine.store().latest(Channel::Humidity).map(|s| s.value),
        Some(50.0)
    );
}

#[test]
fn test_malformed_payload_is_skipped_once() {
    let mut engine = engine();
    engine.source().write("abc,2048,350,65.2");

    assert!(matches!(
        engine.tick(START + 1.0).outcome,
        PollOutcome::Rejected { .. }
    ));
    assert!(engine.store().is_empty());
    assert_eq!(engine.tick(START + 2.0).outcome, PollOutcome::Unchanged);
    assert_eq!(engine.poller().rejected_count(), 1);

    // The next good payload is picked up normally
    engine.source().write(ReadingBuilder::new().temperature(19.0).payload());
    engine.tick(START + 3.0);
    assert_eq!(
        engine.store().latest(Channel::Temperature).map(|s| s.value),
        Some(19.0)
    );
}

#[test]
fn test_short_range_frame_follows_session_clock() {
    let mut engine = engine();
    for second in 1..=60 {
        engine
            .source()
            .write(ReadingBuilder::new().temperature(second as f64).payload());
        engine.tick(START + second as f64);
    }

    let frame = engine.frame(START + 60.0);
    assert_eq!(frame.mode, DisplayMode::ShortRange);
    assert_eq!(frame.x_range, (0.0, 30.0));
    // Samples at 30..=60 s fall into the last 30 s
    assert_eq!(frame.points.len(), 31);
    assert_float_eq(frame.points[0][0], 0.0, 1e-9);
    assert_float_eq(frame.points[30][0], 30.0, 1e-9);
    assert_float_eq(frame.points[30][1], 60.0, 1e-9);

    // Statistics cover the whole history, not just the window
    let stats = frame.stats.unwrap();
    assert_eq!(stats.count, 60);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 60.0);
}

#[test]
fn test_long_range_uses_history() {
    let mut engine = engine();
    for second in 1..=150 {
        engine.source().write(ReadingBuilder::new().payload());
        engine.tick(START + second as f64);
    }

    engine.apply(ViewCommand::ToggleRange, START + 150.0);
    let frame = engine.frame(START + 150.0);
    assert_eq!(frame.x_range, (0.0, 3600.0));
    // Recent capacity is 100, history keeps everything within the hour
    assert_eq!(engine.store().recent(Channel::Temperature).len(), 100);
    assert_eq!(frame.points.len(), 150);
}

#[test]
fn test_navigation_cycles_through_channels() {
    let mut engine = engine();
    let titles: Vec<String> = (0..5)
        .map(|_| {
            let title = engine.frame(START).title;
            engine.apply(ViewCommand::Next, START);
            title
        })
        .collect();
    assert_eq!(
        titles,
        vec![
            "Temperature (1/4)",
            "Light (2/4)",
            "Gas (3/4)",
            "Humidity (4/4)",
            "Temperature (1/4)",
        ]
    );
}

#[test]
fn test_reset_after_ingest() {
    let mut engine = engine();
    for second in 1..=5 {
        engine.source().write(ReadingBuilder::new().payload());
        engine.tick(START + second as f64);
    }
    assert_eq!(engine.store().len(Channel::Gas), 5);

    let before = engine.view().session_start();
    assert_eq!(engine.apply(ViewCommand::Reset, START + 6.0), Transition::Redraw);
    assert!(engine.store().is_empty());
    assert!(engine.view().session_start() >= before);

    // New samples are stamped relative to the new session start
    engine.source().write(ReadingBuilder::new().payload());
    engine.tick(START + 8.0);
    assert_float_eq(
        engine.store().latest(Channel::Gas).unwrap().timestamp,
        2.0,
        1e-9,
    );
}

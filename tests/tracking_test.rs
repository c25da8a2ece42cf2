use crosscount_rs::tracker::OptimalMatcher;
use crosscount_rs::{
    Axis, Boundary, Callbacks, CounterConfig, CrossingDirection, CrossingTally, Detection,
    LineCounter, MatchStrategy, TrackAttributes, TrackId,
};

const WIDTH: f32 = 640.0;

fn counter_at(boundary: f32) -> LineCounter {
    LineCounter::new(CounterConfig::default().with_boundary(Boundary::new(Axis::X, boundary)))
        .unwrap()
}

/// 10x10 box whose center sits at (cx, cy).
fn det(cx: f32, cy: f32) -> Detection {
    Detection::new(cx - 5.0, cy - 5.0, 10.0, 10.0)
}

#[test]
fn test_basic_tracking() {
    let mut counter = counter_at(320.0);

    // Frame 1: one detection spawns one track
    counter.update(vec![det(100.0, 100.0)], WIDTH);
    assert_eq!(counter.len(), 1);
    let id1 = counter.tracks().next().unwrap().id;

    // Frame 2: same object moved slightly keeps its id
    counter.update(vec![det(110.0, 104.0)], WIDTH);
    assert_eq!(counter.len(), 1);
    let track = counter.tracks().next().unwrap();
    assert_eq!(track.id, id1);
    assert_eq!(track.center.x, 110.0);
    assert_eq!(track.last_seen_frame, 2);
    assert_eq!(track.start_frame, 1);

    // Frame 3: object missing, track is kept
    counter.update(vec![], WIDTH);
    assert_eq!(counter.len(), 1);

    // Frame 4: object reappears nearby and is re-associated
    counter.update(vec![det(118.0, 104.0)], WIDTH);
    assert_eq!(counter.tracks().next().unwrap().id, id1);
}

#[test]
fn test_entry_scenario_fires_once() {
    let mut counter = counter_at(50.0);
    let mut tally = CrossingTally::new();

    counter.update_with_sink(vec![det(40.0, 100.0)], WIDTH, &mut tally);
    let events = counter.update_with_sink(vec![det(55.0, 100.0)], WIDTH, &mut tally);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].direction, CrossingDirection::Entry);

    let events = counter.update_with_sink(vec![det(60.0, 100.0)], WIDTH, &mut tally);
    assert!(events.is_empty());
    assert_eq!(tally.entries, 1);
    assert_eq!(tally.exits, 0);
}

#[test]
fn test_oscillation_on_line_counts_once() {
    let mut counter = counter_at(50.0);
    let mut tally = CrossingTally::new();
    counter.update_with_sink(vec![det(45.0, 100.0)], WIDTH, &mut tally);
    for x in [50.0, 49.0, 51.0, 48.0, 50.0, 52.0, 47.0, 55.0] {
        counter.update_with_sink(vec![det(x, 100.0)], WIDTH, &mut tally);
    }
    assert_eq!(tally.entries, 1);
    assert_eq!(tally.exits, 0);
}

#[test]
fn test_two_detections_contend_for_one_track() {
    let mut counter = counter_at(600.0);
    counter.update(vec![det(100.0, 100.0)], WIDTH);

    // Both are inside the 128px gate of track 1
    counter.update(vec![det(110.0, 100.0), det(95.0, 100.0)], WIDTH);
    assert_eq!(counter.len(), 2);

    let t1 = counter.track(TrackId(1)).unwrap();
    assert_eq!(t1.center.x, 110.0);
    let t2 = counter.track(TrackId(2)).unwrap();
    assert_eq!(t2.center.x, 95.0);
    assert_eq!(t2.start_frame, 2);
}

#[test]
fn test_far_apart_detections_spawn_separate_tracks() {
    let mut counter = counter_at(600.0);
    counter.update(vec![det(20.0, 20.0), det(400.0, 300.0)], WIDTH);
    let ids: Vec<_> = counter.tracks().map(|t| t.id).collect();
    assert_eq!(ids, vec![TrackId(1), TrackId(2)]);
}

#[test]
fn test_gate_follows_frame_width() {
    // 150px jump: outside the gate at 640 wide (128px), inside at 1280 (256px)
    let mut narrow = counter_at(2000.0);
    narrow.update(vec![det(100.0, 100.0)], 640.0);
    narrow.update(vec![det(250.0, 100.0)], 640.0);
    assert_eq!(narrow.len(), 2);

    let mut wide = counter_at(2000.0);
    wide.update(vec![det(100.0, 100.0)], 1280.0);
    wide.update(vec![det(250.0, 100.0)], 1280.0);
    assert_eq!(wide.len(), 1);
}

#[test]
fn test_stale_track_pruned_and_replaced() {
    let mut counter = counter_at(320.0);
    counter.update(vec![det(100.0, 100.0)], WIDTH);

    for _ in 0..15 {
        counter.update(vec![], WIDTH);
    }
    assert!(counter.track(TrackId(1)).is_some());

    counter.update(vec![], WIDTH);
    assert!(counter.is_empty());

    counter.update(vec![det(100.0, 100.0)], WIDTH);
    let ids: Vec<_> = counter.tracks().map(|t| t.id).collect();
    assert_eq!(ids, vec![TrackId(2)]);
}

#[test]
fn test_empty_stream_is_safe() {
    let mut counter = counter_at(50.0);
    let mut tally = CrossingTally::new();
    counter.update_with_sink(vec![det(40.0, 100.0)], WIDTH, &mut tally);
    for _ in 0..100 {
        assert!(counter.update_with_sink(vec![], WIDTH, &mut tally).is_empty());
    }
    assert!(counter.is_empty());
    assert_eq!(tally, CrossingTally::default());
    assert_eq!(counter.frame_count(), 101);
}

#[test]
fn test_events_follow_detection_order() {
    let mut counter = counter_at(300.0);
    // Two walkers far apart on y, both approaching the line
    counter.update(vec![det(280.0, 50.0), det(290.0, 400.0)], WIDTH);
    let events = counter.update(vec![det(310.0, 400.0), det(305.0, 50.0)], WIDTH);
    let ids: Vec<_> = events.iter().map(|e| e.track_id).collect();
    assert_eq!(ids, vec![TrackId(2), TrackId(1)]);
}

#[test]
fn test_callbacks_on_horizontal_line() {
    use std::cell::Cell;

    let entries = Cell::new(0u32);
    let exits = Cell::new(0u32);
    let mut sink = Callbacks::new(|| entries.set(entries.get() + 1), || exits.set(exits.get() + 1));

    let config = CounterConfig {
        suppress_interior_spawns: false,
        ..CounterConfig::default().with_boundary(Boundary::new(Axis::Y, 300.0))
    };
    let mut counter = LineCounter::new(config).unwrap();

    // Walker A moves down into the room, walker B walks up and out
    counter.update_with_sink(vec![det(100.0, 280.0), det(500.0, 330.0)], WIDTH, &mut sink);
    counter.update_with_sink(vec![det(100.0, 310.0), det(500.0, 295.0)], WIDTH, &mut sink);
    counter.update_with_sink(vec![det(100.0, 340.0), det(500.0, 250.0)], WIDTH, &mut sink);

    assert_eq!(entries.get(), 1);
    assert_eq!(exits.get(), 1);
}

#[test]
fn test_attributes_attach_at_spawn() {
    let mut counter = counter_at(600.0);
    let mut d = det(100.0, 100.0);
    d.attributes = Some(TrackAttributes {
        external_id: Some("badge-42".into()),
        age: Some(31),
        gender: None,
    });
    counter.update(vec![d], WIDTH);

    // Later detections carry no payload; the track keeps its own
    counter.update(vec![det(105.0, 100.0)], WIDTH);
    let track = counter.track(TrackId(1)).unwrap();
    let attrs = track.attributes.as_ref().unwrap();
    assert_eq!(attrs.external_id.as_deref(), Some("badge-42"));
    assert_eq!(attrs.age, Some(31));
}

#[test]
fn test_optimal_strategy_end_to_end() {
    let config = CounterConfig {
        matching: MatchStrategy::Optimal,
        ..CounterConfig::default().with_boundary(Boundary::new(Axis::X, 600.0))
    };
    let mut counter = LineCounter::new(config).unwrap();
    counter.update(vec![det(100.0, 100.0), det(200.0, 100.0)], WIDTH);
    counter.update(vec![det(205.0, 100.0), det(95.0, 100.0)], WIDTH);
    assert_eq!(counter.len(), 2);
    assert_eq!(counter.track(TrackId(1)).unwrap().center.x, 95.0);
    assert_eq!(counter.track(TrackId(2)).unwrap().center.x, 205.0);

    // A custom matcher can be plugged in directly too
    let mut custom = counter_at(600.0).with_matcher(Box::new(OptimalMatcher));
    custom.update(vec![det(100.0, 100.0)], WIDTH);
    custom.update(vec![det(101.0, 100.0)], WIDTH);
    assert_eq!(custom.len(), 1);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "boundary": { "axis": "y", "position": 240.0, "entry_direction": "decreasing" },
        "max_stale_frames": 30,
        "matching": "optimal"
    }"#;
    let config: CounterConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.boundary.axis, Axis::Y);
    assert_eq!(config.boundary.position, 240.0);
    assert_eq!(config.max_stale_frames, 30);
    assert_eq!(config.matching, MatchStrategy::Optimal);
    assert_eq!(config.gate_fraction, 0.2);
    assert!(config.suppress_interior_spawns);
    assert!(LineCounter::new(config).is_ok());
}

mod common;

use agent_track::flush::{TrackFrame, flush_to_jsonl, read_overlay};
use agent_track::model::Position;
use agent_track::overlay::OverlayPrimitive;
use agent_track::{AgentCache, LookAheadConfig};
use common::{pid, read_lines};

fn capture_scattered(count: u16) -> TrackFrame {
    let mut engine = agent_track::testutil::FakeEngine::new();
    engine.scatter(3, count, 200.0);
    engine.set_time(96, 0.25);
    let cache = AgentCache::new();
    TrackFrame::capture(&cache, &engine, &engine, &LookAheadConfig::default())
}

#[test]
fn flush_produces_valid_jsonl_files() {
    let frame = capture_scattered(5);
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&frame, dir.path()).unwrap();

    // Both files exist
    let poses_path = dir.path().join("poses.jsonl");
    let overlay_path = dir.path().join("overlay.jsonl");
    assert!(poses_path.exists());
    assert!(overlay_path.exists());

    // One pose per pedestrian; 4 circles + 2 arrows each while standing still
    let pose_lines = read_lines(&poses_path);
    let overlay_lines = read_lines(&overlay_path);
    assert_eq!(pose_lines.len(), 5, "expected 5 poses");
    assert_eq!(overlay_lines.len(), 5 * 6, "expected 30 overlay primitives");

    // Each line is valid JSON with expected fields
    for line in &pose_lines {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(v["tick"], 96);
        assert!(v["pedestrian"].is_number());
        assert!(v["positioning"]["angle"]["yaw"].is_number());
        assert!(v["aim"]["x"].is_number());
    }
    for line in &overlay_lines {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        let shape = v["shape"].as_str().unwrap();
        assert!(shape == "circle" || shape == "arrow", "unexpected shape {shape}");
    }
}

#[test]
fn overlay_reads_back_in_draw_order() {
    let frame = capture_scattered(2);
    let dir = tempfile::tempdir().unwrap();
    flush_to_jsonl(&frame, dir.path()).unwrap();

    let primitives = read_overlay(&dir.path().join("overlay.jsonl")).unwrap();
    assert_eq!(primitives, frame.overlay.primitives);
    assert!(matches!(primitives[0], OverlayPrimitive::Circle { radius, .. } if radius == 1.5));
    assert!(matches!(primitives[4], OverlayPrimitive::Arrow { .. }));
}

#[test]
fn poses_match_spawn_points_for_new_agents() {
    let frame = capture_scattered(3);
    assert_eq!(frame.poses.len(), 3);
    assert_eq!(frame.poses[0].pedestrian, pid(1));
    for pose in &frame.poses {
        assert_eq!(pose.aim, pose.positioning.position);
        assert_ne!(pose.aim, Position::ORIGIN);
    }
}

#[test]
fn empty_frame_writes_empty_files() {
    let frame = TrackFrame::default();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("frame");
    flush_to_jsonl(&frame, &out).unwrap();
    assert!(read_lines(&out.join("poses.jsonl")).is_empty());
    assert!(read_overlay(&out.join("overlay.jsonl")).unwrap().is_empty());
}

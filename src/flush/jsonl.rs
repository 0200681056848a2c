use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::LookAheadConfig;
use crate::engine::{RecordStore, SimulationClock};
use crate::id::PedestrianId;
use crate::model::{Position, Positioning};
use crate::object::AgentCache;
use crate::overlay::{OverlayPrimitive, RecordingOverlay, render_overlay};

/// Predicted pose of one pedestrian at one render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    pub tick: u32,
    pub sub_tick: f32,
    pub pedestrian: PedestrianId,
    pub positioning: Positioning,
    pub aim: Position,
}

/// Everything the tracker computed for one render frame.
#[derive(Debug, Clone, Default)]
pub struct TrackFrame {
    pub poses: Vec<PoseSample>,
    pub overlay: RecordingOverlay,
}

impl TrackFrame {
    /// Predict and draw every live pedestrian the cache can resolve.
    pub fn capture(
        cache: &AgentCache,
        clock: &dyn SimulationClock,
        store: &dyn RecordStore,
        config: &LookAheadConfig,
    ) -> Self {
        let mut frame = Self::default();
        for human in cache.pedestrians_where(store, |_| true) {
            let Some(ped) = human.as_pedestrian() else {
                continue;
            };
            let Some(positioning) = ped.positioning(clock, store, config) else {
                continue;
            };
            frame.poses.push(PoseSample {
                tick: clock.reference_tick(),
                sub_tick: clock.sub_tick(),
                pedestrian: ped.pedestrian_id(),
                positioning,
                aim: ped.smooth_look_position(clock),
            });
            render_overlay(ped, clock, store, config, &mut frame.overlay);
        }
        frame
    }
}

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush a captured frame to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes 2 files:
/// - `poses.jsonl`: one PoseSample per line
/// - `overlay.jsonl`: one OverlayPrimitive per line, in draw order
pub fn flush_to_jsonl(frame: &TrackFrame, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("poses.jsonl"), frame.poses.iter())?;
    write_jsonl(
        &output_dir.join("overlay.jsonl"),
        frame.overlay.primitives.iter(),
    )?;

    Ok(())
}

/// Read back an overlay file written by [`flush_to_jsonl`].
pub fn read_overlay(path: &Path) -> io::Result<Vec<OverlayPrimitive>> {
    fs::read_to_string(path)?
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(io::Error::from))
        .collect()
}

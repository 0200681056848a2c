pub mod jsonl;

pub use jsonl::{PoseSample, TrackFrame, flush_to_jsonl, read_overlay};

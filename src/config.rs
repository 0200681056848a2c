use std::fs;
use std::io;
use std::path::Path;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

/// Tunables for look-ahead facing and the debug overlay.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAheadConfig {
    /// Below this distance to the aim point the engine's own facing is kept.
    pub turn_threshold: f32,
    /// Weight of the aim direction when blending facing (0 keeps the base angle).
    pub turn_blend: f32,
    /// Length of the facing arrows drawn by the overlay.
    pub arrow_length: f32,
    /// Radius of the newest history circle; older ones shrink by a quarter each.
    pub circle_radius: f32,
}

impl Default for LookAheadConfig {
    fn default() -> Self {
        Self {
            turn_threshold: 0.1,
            turn_blend: 0.9,
            arrow_length: 20.0,
            circle_radius: 1.5,
        }
    }
}

impl LookAheadConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

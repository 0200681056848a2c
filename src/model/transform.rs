use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point in world space (y is up).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation; `t` is not clamped.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
            z: a.z + (b.z - a.z) * t,
        }
    }

    pub fn displacement_to(self, other: Self) -> Displacement {
        other - self
    }

    pub fn moved(self, by: Displacement) -> Self {
        self + by
    }
}

impl Add<Displacement> for Position {
    type Output = Position;

    fn add(self, d: Displacement) -> Position {
        Position::new(self.x + d.x, self.y + d.y, self.z + d.z)
    }
}

impl Sub for Position {
    type Output = Displacement;

    fn sub(self, other: Position) -> Displacement {
        Displacement::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// A vector between two positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Displacement {
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// The angle a viewer at the tail must face to look along this vector.
    ///
    /// Pitch is positive when looking down. A zero vector faces forward.
    pub fn as_looking_angle(self) -> Angle {
        let len = self.distance();
        if len <= f32::EPSILON {
            return Angle::default();
        }
        let yaw = self.x.atan2(self.z).to_degrees();
        let pitch = (-self.y / len).clamp(-1.0, 1.0).asin().to_degrees();
        Angle::new(yaw, pitch)
    }
}

impl Mul<f32> for Displacement {
    type Output = Displacement;

    fn mul(self, k: f32) -> Displacement {
        Displacement::new(self.x * k, self.y * k, self.z * k)
    }
}

/// Unit quaternion as handed out by the engine's smoothing primitive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Rotation about the up axis by `degrees`.
    pub fn from_yaw(degrees: f32) -> Self {
        let half = degrees.to_radians() * 0.5;
        Self {
            x: 0.0,
            y: half.sin(),
            z: 0.0,
            w: half.cos(),
        }
    }

    /// The forward axis (+z) rotated by this quaternion.
    pub fn forward(self) -> Displacement {
        let Self { x, y, z, w } = self;
        Displacement::new(
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
        )
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Heading as yaw (about the up axis) and pitch, both in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub yaw: f32,
    pub pitch: f32,
}

impl Angle {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Heading of a quaternion; roll is discarded.
    pub fn from_rotation(rotation: Rotation) -> Self {
        rotation.forward().as_looking_angle()
    }

    /// Interpolate each component along the shorter arc.
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self {
            yaw: lerp_degrees(a.yaw, b.yaw, t),
            pitch: lerp_degrees(a.pitch, b.pitch, t),
        }
    }

    /// Vector of length `distance` pointing along this heading.
    pub fn to_displacement(self, distance: f32) -> Displacement {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Displacement::new(
            yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        ) * distance
    }
}

fn lerp_degrees(from: f32, to: f32, t: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    from + delta * t
}

/// Pose of an agent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Positioning {
    pub position: Position,
    pub angle: Angle,
}

impl Positioning {
    pub fn new(position: Position, angle: Angle) -> Self {
        Self { position, angle }
    }
}

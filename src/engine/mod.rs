//! Procedural scene engine.
//!
//! The engine is a generator/updater pair over plain descriptor data:
//! [`generator::generate`] produces a population of [`PrimitiveDescriptor`]s
//! once per mount, and [`updater::advance`] moves them once per frame. Both
//! are synchronous, O(population) and allocation-light; neither returns
//! errors, and malformed inputs degrade to smaller or empty populations.

pub mod capability;
pub mod generator;
pub mod rng;
pub mod updater;

pub use capability::{DisplayProfile, ViewportInfo};
pub use generator::generate;
pub use rng::{entropy_seed, RandomSource, XorShiftRng};
pub use updater::advance;

use glam::{Vec2, Vec3};

/// Geometric flavor of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveKind {
    Sphere,
    Box,
    Torus,
    TorusKnot,
    /// A single floating character (binary digit or code symbol).
    Glyph(char),
    /// A polyline in world space. Always holds at least two points.
    LinePath(Vec<Vec3>),
}

impl PrimitiveKind {
    pub fn is_path(&self) -> bool {
        matches!(self, PrimitiveKind::LinePath(_))
    }
}

/// How the updater moves a primitive each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionRole {
    /// Spin plus a bounded sinusoidal bob.
    Drift,
    /// Fall along -Y, wrapping back to the top of the bounds.
    Fall,
    /// Circle an anchor point, optionally delayed by a trail slot.
    Orbit,
    /// Carried only by the group transform.
    Anchored,
}

/// Per-primitive animation constants, drawn once at generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSeed {
    pub role: MotionRole,
    /// Spin rate, fall rate or orbit rate depending on the role.
    pub speed: f32,
    /// Phase offset desynchronizing primitives sharing a rate.
    pub phase: f32,
    /// Surface distortion factor carried to the renderer.
    pub distort: f32,
    /// Per-axis weights for the spin increment.
    pub axis: Vec3,
    /// Orbit center for `Orbit` primitives.
    pub anchor: Vec3,
    /// Orbit radius for `Orbit` primitives.
    pub radius: f32,
    /// 0 for heads; trailing copies carry their delay slot.
    pub trail_slot: u32,
}

impl Default for MotionSeed {
    fn default() -> Self {
        Self {
            role: MotionRole::Drift,
            speed: 0.0,
            phase: 0.0,
            distort: 0.0,
            axis: Vec3::new(0.0, 1.0, 0.0),
            anchor: Vec3::ZERO,
            radius: 0.0,
            trail_slot: 0,
        }
    }
}

/// One decorative object instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveDescriptor {
    /// Stable within a scene lifetime.
    pub id: u32,
    pub kind: PrimitiveKind,
    /// Invariant: finite at all times, in-bounds at generation.
    pub position: Vec3,
    /// Euler angles, unconstrained range.
    pub rotation: Vec3,
    /// Strictly positive components, fixed at generation.
    pub size: Vec3,
    /// Fixed at generation.
    pub color: [f32; 3],
    /// Fixed at generation except for the trail fade.
    pub opacity: f32,
    pub motion: MotionSeed,
}

impl PrimitiveDescriptor {
    /// True when position, rotation and size hold only finite values.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.size.is_finite()
    }
}

/// Read-only per-frame inputs from the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Seconds since mount.
    pub elapsed: f32,
    /// Normalized pointer position in [-1, 1], when the host supplies one.
    pub pointer: Option<Vec2>,
}

/// The render group a mounted scene owns: its primitives plus the group
/// transform the updater accumulates spin into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StageGroup {
    pub rotation: Vec3,
    pub primitives: Vec<PrimitiveDescriptor>,
}

impl StageGroup {
    pub fn new(primitives: Vec<PrimitiveDescriptor>) -> Self {
        Self {
            rotation: Vec3::ZERO,
            primitives,
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_finite_check() {
        let mut prim = PrimitiveDescriptor {
            id: 0,
            kind: PrimitiveKind::Sphere,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            size: Vec3::ONE,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            motion: MotionSeed::default(),
        };
        assert!(prim.is_finite());
        prim.position.y = f32::NAN;
        assert!(!prim.is_finite());
    }

    #[test]
    fn test_stage_group_starts_unrotated() {
        let group = StageGroup::new(Vec::new());
        assert_eq!(group.rotation, Vec3::ZERO);
        assert!(group.is_empty());
    }
}

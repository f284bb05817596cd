//! Scene catalog.
//!
//! Interchangeable backdrop variants:
//! - SphereField: sparse translucent spheres drifting on a slow group spin
//! - AbstractShapes: mixed distorted/wobbling shapes with pointer attraction
//! - CircuitBoard: falling binary glyphs, circuit traces and code symbols
//! - DataCharts: floating bar columns and arc segments
//! - ParticleTrails: orbiting particles towing fading trails
//!
//! Variants are pure data: a [`SceneConfig`] plus per-variant tunables in
//! [`SceneParams`], both served by [`registry`]. One generator/updater pair
//! in [`crate::engine`] consumes every entry.

mod palette;
pub mod params;
pub mod registry;

pub use palette::{hsl_to_rgb, parse_hex_color, PaletteRamp, ThemeMode};
pub use params::{
    AbstractShapesParams, ChartsParams, CircuitParams, SceneParams, SphereFieldParams,
    TrailsParams,
};
pub use registry::{default_params, scene_config};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Available scene variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    SphereField,
    AbstractShapes,
    CircuitBoard,
    DataCharts,
    ParticleTrails,
}

impl SceneKind {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sphere-field" | "spherefield" | "spheres" | "minimal" => Some(Self::SphereField),
            "abstract-shapes" | "abstractshapes" | "abstract" => Some(Self::AbstractShapes),
            "circuit-board" | "circuitboard" | "circuit" | "binary" => Some(Self::CircuitBoard),
            "data-charts" | "datacharts" | "charts" => Some(Self::DataCharts),
            "particle-trails" | "particletrails" | "trails" => Some(Self::ParticleTrails),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SphereField => "sphere-field",
            Self::AbstractShapes => "abstract-shapes",
            Self::CircuitBoard => "circuit-board",
            Self::DataCharts => "data-charts",
            Self::ParticleTrails => "particle-trails",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SphereField => "Sparse translucent spheres on a slow drift",
            Self::AbstractShapes => "Distorted shapes that lean toward the pointer",
            Self::CircuitBoard => "Falling binary glyphs over circuit traces",
            Self::DataCharts => "Floating bar columns and arc segments",
            Self::ParticleTrails => "Orbiting particles with fading trails",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::SphereField,
            Self::AbstractShapes,
            Self::CircuitBoard,
            Self::DataCharts,
            Self::ParticleTrails,
        ]
    }
}

/// Axis-aligned placement volume for random spawning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingVolume {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Fixed camera parameters for a variant. Not mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// A single directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub intensity: f32,
}

/// Fixed lighting parameters: ambient term plus key and fill lights.
/// Only the fill tint follows the theme at render time; geometry never does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingRig {
    pub ambient: f32,
    pub key: DirectionalLight,
    pub fill: DirectionalLight,
}

impl LightingRig {
    /// Theme-dependent fill tint (indigo in dark mode, blue in light).
    pub fn fill_tint(&self, theme: ThemeMode) -> [f32; 3] {
        match theme {
            ThemeMode::Dark => parse_hex_color("#4f46e5").unwrap_or([0.3, 0.3, 0.9]),
            ThemeMode::Light => parse_hex_color("#3b82f6").unwrap_or([0.2, 0.5, 1.0]),
        }
    }
}

/// Common motion knobs consumed by the updater for every variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Per-call group rotation increment (radians per frame).
    pub group_spin: Vec3,
    /// Amplitude of the per-primitive sinusoidal bob (units per frame).
    pub bob_amplitude: f32,
    /// Rate multiplier applied to elapsed time inside the bob.
    pub bob_rate: f32,
    /// Exponential pull toward the scaled pointer target, if the variant
    /// reacts to the pointer at all.
    pub pointer_gain: Option<f32>,
}

/// One catalog entry: everything the generator and updater need besides the
/// per-variant tunables in [`SceneParams`].
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub kind: SceneKind,
    /// Target population before the capability multiplier.
    pub primitive_count: u32,
    pub bounds: BoundingVolume,
    pub palette: PaletteRamp,
    pub camera: CameraPose,
    pub lighting: LightingRig,
    pub motion: MotionProfile,
}

//! Catalog lookup tables.
//!
//! One [`SceneConfig`] and one default [`SceneParams`] per variant. These
//! tables are the whole difference between variants; the generator and
//! updater are shared.

use glam::Vec3;

use super::params::*;
use super::{
    BoundingVolume, CameraPose, DirectionalLight, LightingRig, MotionProfile, PaletteRamp,
    SceneConfig, SceneKind,
};

/// Shared two-light rig used across the catalog. Key from the upper right,
/// dim theme-tinted fill from the opposite corner.
fn standard_lighting() -> LightingRig {
    LightingRig {
        ambient: 0.4,
        key: DirectionalLight {
            direction: Vec3::new(10.0, 10.0, 5.0).normalize(),
            intensity: 0.8,
        },
        fill: DirectionalLight {
            direction: Vec3::new(-10.0, -10.0, -5.0).normalize(),
            intensity: 0.2,
        },
    }
}

/// Catalog entry for a variant.
///
/// # Example
/// ```
/// use ambient_visualizer::scenes::{scene_config, SceneKind};
///
/// let config = scene_config(SceneKind::SphereField);
/// assert_eq!(config.kind, SceneKind::SphereField);
/// assert!(config.primitive_count > 0);
/// ```
pub fn scene_config(kind: SceneKind) -> SceneConfig {
    match kind {
        SceneKind::SphereField => SceneConfig {
            kind,
            primitive_count: 8,
            bounds: BoundingVolume::new(
                Vec3::new(-15.0, -12.0, -25.0),
                Vec3::new(15.0, 12.0, -8.0),
            ),
            palette: PaletteRamp::IndigoPool,
            camera: CameraPose {
                position: Vec3::new(0.0, 0.0, 10.0),
                fov_degrees: 75.0,
                near: 0.1,
                far: 100.0,
            },
            lighting: standard_lighting(),
            motion: MotionProfile {
                group_spin: Vec3::new(0.0005, 0.001, 0.0),
                bob_amplitude: 0.01,
                bob_rate: 0.3,
                pointer_gain: None,
            },
        },
        SceneKind::AbstractShapes => SceneConfig {
            kind,
            primitive_count: 25,
            bounds: BoundingVolume::new(
                Vec3::new(-20.0, -10.0, -20.0),
                Vec3::new(20.0, 10.0, 10.0),
            ),
            palette: PaletteRamp::SlateSweep,
            camera: CameraPose {
                position: Vec3::new(0.0, 0.0, 15.0),
                fov_degrees: 60.0,
                near: 0.1,
                far: 100.0,
            },
            lighting: standard_lighting(),
            motion: MotionProfile {
                group_spin: Vec3::new(0.0002, 0.0005, 0.0),
                bob_amplitude: 0.005,
                bob_rate: 0.5,
                pointer_gain: Some(5e-4),
            },
        },
        SceneKind::CircuitBoard => SceneConfig {
            kind,
            primitive_count: 135,
            bounds: BoundingVolume::new(
                Vec3::new(-10.0, -10.0, -12.0),
                Vec3::new(10.0, 10.0, 0.0),
            ),
            palette: PaletteRamp::CircuitInk,
            camera: CameraPose {
                position: Vec3::new(0.0, 0.0, 10.0),
                fov_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
            },
            lighting: standard_lighting(),
            motion: MotionProfile {
                group_spin: Vec3::new(0.0, 0.001, 0.0005),
                bob_amplitude: 0.0,
                bob_rate: 0.0,
                pointer_gain: None,
            },
        },
        SceneKind::DataCharts => SceneConfig {
            kind,
            primitive_count: 13,
            bounds: BoundingVolume::new(
                Vec3::new(-11.0, -2.0, -23.0),
                Vec3::new(11.0, 3.0, -14.0),
            ),
            palette: PaletteRamp::ChartSeries,
            camera: CameraPose {
                position: Vec3::new(0.0, 0.0, 14.0),
                fov_degrees: 60.0,
                near: 0.1,
                far: 100.0,
            },
            lighting: standard_lighting(),
            motion: MotionProfile {
                group_spin: Vec3::new(0.0, 0.001, 0.0),
                bob_amplitude: 0.0,
                bob_rate: 0.0,
                pointer_gain: None,
            },
        },
        SceneKind::ParticleTrails => SceneConfig {
            kind,
            primitive_count: 80,
            bounds: BoundingVolume::new(
                Vec3::new(-10.0, -5.0, -20.0),
                Vec3::new(10.0, 5.0, 0.0),
            ),
            palette: PaletteRamp::NeonTrail,
            camera: CameraPose {
                position: Vec3::new(0.0, 0.0, 20.0),
                fov_degrees: 60.0,
                near: 0.1,
                far: 1000.0,
            },
            lighting: standard_lighting(),
            motion: MotionProfile {
                group_spin: Vec3::new(0.0, 0.001, 0.0),
                bob_amplitude: 0.0,
                bob_rate: 0.0,
                pointer_gain: None,
            },
        },
    }
}

/// Default tunables for a variant.
///
/// # Example
/// ```
/// use ambient_visualizer::scenes::{default_params, SceneKind, SceneParams};
///
/// let params = default_params(SceneKind::CircuitBoard);
/// assert!(matches!(params, SceneParams::CircuitBoard(_)));
/// ```
pub fn default_params(kind: SceneKind) -> SceneParams {
    match kind {
        SceneKind::SphereField => SceneParams::SphereField(SphereFieldParams::default()),
        SceneKind::AbstractShapes => SceneParams::AbstractShapes(AbstractShapesParams::default()),
        SceneKind::CircuitBoard => SceneParams::CircuitBoard(CircuitParams::default()),
        SceneKind::DataCharts => SceneParams::DataCharts(ChartsParams::default()),
        SceneKind::ParticleTrails => SceneParams::ParticleTrails(TrailsParams::default()),
    }
}

//! Per-frame motion.
//!
//! [`advance`] mutates transforms in place and nothing else: it never adds
//! or removes descriptors, and every position and rotation stays finite. The
//! one structural transition in the engine lives here too: a falling glyph
//! leaving the bottom of the bounds is repositioned at the top with a fresh
//! horizontal draw, preserving cardinality.

use glam::Vec3;

use crate::scenes::{SceneConfig, SceneParams};

use super::rng::RandomSource;
use super::{FrameInput, MotionRole, PrimitiveDescriptor, StageGroup};

/// World-space reach of the normalized pointer target.
const POINTER_TARGET_SCALE: f32 = 5.0;

/// Advance every primitive in the group by one frame.
///
/// `input.pointer` is honored only for variants with a configured pointer
/// gain; the pull is an exponential decay toward the scaled target, never a
/// snap. Non-finite host input is ignored rather than propagated into the
/// transforms.
pub fn advance(
    group: &mut StageGroup,
    input: &FrameInput,
    config: &SceneConfig,
    params: &SceneParams,
    rng: &mut dyn RandomSource,
) {
    let elapsed = if input.elapsed.is_finite() { input.elapsed } else { 0.0 };
    let pointer = input.pointer.filter(|p| p.is_finite());

    group.rotation += config.motion.group_spin;

    let secondary_ratio = match params {
        SceneParams::AbstractShapes(p) => p.secondary_axis_ratio,
        SceneParams::CircuitBoard(p) => p.secondary_axis_ratio,
        _ => 0.5,
    };
    let trail_delay = match params {
        SceneParams::ParticleTrails(p) => p.trail_delay,
        _ => 0.0,
    };
    let vertical_ratio = match params {
        SceneParams::ParticleTrails(p) => p.vertical_ratio,
        _ => 1.0,
    };

    for (index, prim) in group.primitives.iter_mut().enumerate() {
        match prim.motion.role {
            MotionRole::Drift => {
                drift(prim, index, elapsed, config, secondary_ratio);
                if let (Some(gain), Some(pointer)) = (config.motion.pointer_gain, pointer) {
                    let target = Vec3::new(
                        pointer.x * POINTER_TARGET_SCALE,
                        -pointer.y * POINTER_TARGET_SCALE,
                        prim.position.z,
                    );
                    prim.position += (target - prim.position) * gain;
                }
            }
            MotionRole::Fall => {
                prim.position.y -= prim.motion.speed;
                if prim.position.y < config.bounds.min.y {
                    prim.position.y = config.bounds.max.y;
                    prim.position.x = rng.next_range(config.bounds.min.x, config.bounds.max.x);
                }
            }
            MotionRole::Orbit => {
                let t = elapsed * prim.motion.speed + prim.motion.phase
                    - prim.motion.trail_slot as f32 * trail_delay;
                let radius = prim.motion.radius;
                prim.position = prim.motion.anchor
                    + Vec3::new(
                        t.cos() * radius,
                        (t * vertical_ratio).sin() * radius * 0.5,
                        t.sin() * radius,
                    );
                if let SceneParams::ParticleTrails(p) = params {
                    let stride = p.trail_length as f32 + 1.0;
                    prim.opacity = 1.0 - prim.motion.trail_slot as f32 / stride;
                }
            }
            MotionRole::Anchored => {}
        }
    }
}

/// Baseline spin plus a bounded sinusoidal bob. The bob amplitude is a small
/// per-frame fraction, so the accumulated offset oscillates instead of
/// drifting without bound.
fn drift(
    prim: &mut PrimitiveDescriptor,
    index: usize,
    elapsed: f32,
    config: &SceneConfig,
    secondary_ratio: f32,
) {
    let speed = prim.motion.speed;
    let axis = prim.motion.axis;

    prim.rotation.x += speed * axis.x.abs().max(0.2);
    prim.rotation.y += speed * secondary_ratio * axis.y.abs().max(0.2);
    prim.rotation.z += speed * 0.5 * axis.z;

    let amplitude = config.motion.bob_amplitude;
    if amplitude > 0.0 {
        let bob = config.motion.bob_rate * elapsed + prim.motion.phase + index as f32;
        prim.position.y += bob.sin() * amplitude;
        prim.position.x += (bob * 0.5).cos() * amplitude * 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{generate, XorShiftRng};
    use crate::scenes::{default_params, scene_config, SceneKind, ThemeMode};

    fn mounted_group(kind: SceneKind, seed: u32) -> StageGroup {
        let config = scene_config(kind);
        let params = default_params(kind);
        let mut rng = XorShiftRng::new(seed);
        StageGroup::new(generate(&config, &params, ThemeMode::Dark, 1.0, &mut rng))
    }

    #[test]
    fn test_advance_never_changes_cardinality() {
        for kind in SceneKind::all() {
            let config = scene_config(*kind);
            let params = default_params(*kind);
            let mut group = mounted_group(*kind, 13);
            let expected = group.len();
            let mut rng = XorShiftRng::new(99);
            for frame in 0..500 {
                let input = FrameInput {
                    elapsed: frame as f32 / 60.0,
                    pointer: None,
                };
                advance(&mut group, &input, &config, &params, &mut rng);
                assert_eq!(group.len(), expected, "{kind:?} frame {frame}");
            }
        }
    }

    #[test]
    fn test_advance_on_empty_group_is_a_no_op() {
        let config = scene_config(SceneKind::SphereField);
        let params = default_params(SceneKind::SphereField);
        let mut group = StageGroup::new(Vec::new());
        let mut rng = XorShiftRng::new(1);
        advance(&mut group, &FrameInput::default(), &config, &params, &mut rng);
        assert!(group.is_empty());
    }

    #[test]
    fn test_group_spin_accumulates() {
        let config = scene_config(SceneKind::SphereField);
        let params = default_params(SceneKind::SphereField);
        let mut group = mounted_group(SceneKind::SphereField, 2);
        let mut rng = XorShiftRng::new(2);
        for _ in 0..10 {
            advance(&mut group, &FrameInput::default(), &config, &params, &mut rng);
        }
        let expected = config.motion.group_spin * 10.0;
        assert!((group.rotation - expected).length() < 1e-5);
    }

    #[test]
    fn test_non_finite_host_input_is_ignored() {
        let config = scene_config(SceneKind::AbstractShapes);
        let params = default_params(SceneKind::AbstractShapes);
        let mut group = mounted_group(SceneKind::AbstractShapes, 3);
        let mut rng = XorShiftRng::new(3);
        let input = FrameInput {
            elapsed: f32::NAN,
            pointer: Some(glam::Vec2::new(f32::INFINITY, 0.0)),
        };
        for _ in 0..50 {
            advance(&mut group, &input, &config, &params, &mut rng);
        }
        assert!(group.primitives.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_anchored_primitives_only_follow_the_group() {
        let config = scene_config(SceneKind::DataCharts);
        let params = default_params(SceneKind::DataCharts);
        let mut group = mounted_group(SceneKind::DataCharts, 4);
        let before: Vec<_> = group.primitives.iter().map(|p| p.position).collect();
        let mut rng = XorShiftRng::new(4);
        advance(
            &mut group,
            &FrameInput { elapsed: 1.0, pointer: None },
            &config,
            &params,
            &mut rng,
        );
        let after: Vec<_> = group.primitives.iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert!(group.rotation.y > 0.0);
    }

    #[test]
    fn test_orbit_positions_follow_elapsed_time() {
        let config = scene_config(SceneKind::ParticleTrails);
        let params = default_params(SceneKind::ParticleTrails);
        let mut group = mounted_group(SceneKind::ParticleTrails, 5);
        let mut rng = XorShiftRng::new(5);

        advance(
            &mut group,
            &FrameInput { elapsed: 1.0, pointer: None },
            &config,
            &params,
            &mut rng,
        );
        let at_one: Vec<_> = group.primitives.iter().map(|p| p.position).collect();
        advance(
            &mut group,
            &FrameInput { elapsed: 2.0, pointer: None },
            &config,
            &params,
            &mut rng,
        );
        let at_two: Vec<_> = group.primitives.iter().map(|p| p.position).collect();
        assert_ne!(at_one, at_two);

        // Orbits are pure functions of elapsed time, so replaying a
        // timestamp reproduces the same positions.
        advance(
            &mut group,
            &FrameInput { elapsed: 1.0, pointer: None },
            &config,
            &params,
            &mut rng,
        );
        let replay: Vec<_> = group.primitives.iter().map(|p| p.position).collect();
        assert_eq!(at_one, replay);
    }
}

//! Scene population generator.
//!
//! Runs exactly once per mount. Every draw is independent and bounded:
//! positions land inside the variant's bounding volume, sizes are strictly
//! positive, colors come from the variant's palette ramp. Degenerate input
//! (zero or negative target) yields an empty population instead of an error.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::scenes::{
    AbstractShapesParams, ChartsParams, CircuitParams, SceneConfig, SceneParams,
    SphereFieldParams, ThemeMode, TrailsParams,
};

use super::rng::RandomSource;
use super::{MotionRole, MotionSeed, PrimitiveDescriptor, PrimitiveKind};

/// Generate the population for one mount.
///
/// Returns `round(config.primitive_count * multiplier)` descriptors, except
/// that path-producing variants may return fewer: a trace attempt that ends
/// up with a single point is discarded outright, not retried.
pub fn generate(
    config: &SceneConfig,
    params: &SceneParams,
    theme: ThemeMode,
    multiplier: f32,
    rng: &mut dyn RandomSource,
) -> Vec<PrimitiveDescriptor> {
    let target = (config.primitive_count as f32 * multiplier).round();
    if !target.is_finite() || target <= 0.0 {
        return Vec::new();
    }
    let target = target as usize;

    match params {
        SceneParams::SphereField(p) => sphere_field(config, p, theme, target, rng),
        SceneParams::AbstractShapes(p) => abstract_shapes(config, p, theme, target, rng),
        SceneParams::CircuitBoard(p) => circuit_board(config, p, theme, target, rng),
        SceneParams::DataCharts(p) => data_charts(config, p, theme, target, rng),
        SceneParams::ParticleTrails(p) => particle_trails(config, p, theme, target, rng),
    }
}

/// Uniform draw inside the variant's bounding volume.
fn position_in(config: &SceneConfig, rng: &mut dyn RandomSource) -> Vec3 {
    let bounds = &config.bounds;
    Vec3::new(
        rng.next_range(bounds.min.x, bounds.max.x),
        rng.next_range(bounds.min.y, bounds.max.y),
        rng.next_range(bounds.min.z, bounds.max.z),
    )
}

fn random_rotation(rng: &mut dyn RandomSource) -> Vec3 {
    Vec3::new(
        rng.next_f32() * PI,
        rng.next_f32() * PI,
        rng.next_f32() * PI,
    )
}

/// Random per-axis spin weights in [-1, 1].
fn random_axis(rng: &mut dyn RandomSource) -> Vec3 {
    Vec3::new(
        rng.next_f32() * 2.0 - 1.0,
        rng.next_f32() * 2.0 - 1.0,
        rng.next_f32() * 2.0 - 1.0,
    )
}

fn sphere_field(
    config: &SceneConfig,
    params: &SphereFieldParams,
    theme: ThemeMode,
    target: usize,
    rng: &mut dyn RandomSource,
) -> Vec<PrimitiveDescriptor> {
    let mut out = Vec::with_capacity(target);
    for i in 0..target {
        let radius = rng.next_range(params.size_range.0, params.size_range.1);
        out.push(PrimitiveDescriptor {
            id: i as u32,
            kind: PrimitiveKind::Sphere,
            position: position_in(config, rng),
            rotation: random_rotation(rng),
            size: Vec3::splat(radius),
            color: config.palette.color(theme, i),
            opacity: params.opacity,
            motion: MotionSeed {
                role: MotionRole::Drift,
                speed: rng.next_range(params.spin_range.0, params.spin_range.1),
                phase: rng.next_f32() * TAU,
                ..MotionSeed::default()
            },
        });
    }
    out
}

fn abstract_shapes(
    config: &SceneConfig,
    params: &AbstractShapesParams,
    theme: ThemeMode,
    target: usize,
    rng: &mut dyn RandomSource,
) -> Vec<PrimitiveDescriptor> {
    const KINDS: [PrimitiveKind; 4] = [
        PrimitiveKind::Sphere,
        PrimitiveKind::Box,
        PrimitiveKind::Torus,
        PrimitiveKind::TorusKnot,
    ];

    let mut out = Vec::with_capacity(target);
    for i in 0..target {
        let size = rng.next_range(params.size_range.0, params.size_range.1);
        out.push(PrimitiveDescriptor {
            id: i as u32,
            kind: KINDS[rng.next_index(KINDS.len())].clone(),
            position: position_in(config, rng),
            rotation: random_rotation(rng),
            size: Vec3::splat(size),
            color: config.palette.color(theme, i),
            opacity: params.opacity,
            motion: MotionSeed {
                role: MotionRole::Drift,
                speed: rng.next_range(params.spin_range.0, params.spin_range.1),
                phase: rng.next_f32() * TAU,
                distort: rng.next_range(params.distort_range.0, params.distort_range.1),
                axis: random_axis(rng),
                ..MotionSeed::default()
            },
        });
    }
    out
}

fn circuit_board(
    config: &SceneConfig,
    params: &CircuitParams,
    theme: ThemeMode,
    target: usize,
    rng: &mut dyn RandomSource,
) -> Vec<PrimitiveDescriptor> {
    let rain_count = ((target as f32 * params.rain_weight).round() as usize).min(target);
    let trace_count =
        ((target as f32 * params.trace_weight).round() as usize).min(target - rain_count);
    let symbol_count = target - rain_count - trace_count;

    let mut out = Vec::with_capacity(target);
    let mut id = 0u32;

    for i in 0..rain_count {
        let digit = if rng.next_f32() > 0.5 { '1' } else { '0' };
        let scale = rng.next_range(params.glyph_scale.0, params.glyph_scale.1);
        out.push(PrimitiveDescriptor {
            id,
            kind: PrimitiveKind::Glyph(digit),
            position: position_in(config, rng),
            rotation: Vec3::ZERO,
            size: Vec3::splat(0.3 * scale),
            color: config.palette.color(theme, i),
            opacity: 1.0,
            motion: MotionSeed {
                role: MotionRole::Fall,
                speed: rng.next_range(params.fall_speed_range.0, params.fall_speed_range.1),
                ..MotionSeed::default()
            },
        });
        id += 1;
    }

    for i in 0..trace_count {
        if let Some(points) = trace_path(config, params, rng) {
            let start = points[0];
            let line_width = rng.next_f32() + 0.5;
            out.push(PrimitiveDescriptor {
                id,
                kind: PrimitiveKind::LinePath(points),
                position: start,
                rotation: Vec3::ZERO,
                size: Vec3::splat(0.05 * line_width),
                color: config.palette.color(theme, i),
                opacity: 0.8,
                motion: MotionSeed {
                    role: MotionRole::Anchored,
                    ..MotionSeed::default()
                },
            });
            id += 1;
        }
        // A degenerate single-point attempt is dropped, not retried.
    }

    for i in 0..symbol_count {
        let symbol = params.symbols[rng.next_index(params.symbols.len())];
        let scale = rng.next_range(params.glyph_scale.0, params.glyph_scale.1);
        out.push(PrimitiveDescriptor {
            id,
            kind: PrimitiveKind::Glyph(symbol),
            position: position_in(config, rng),
            rotation: Vec3::new(0.0, 0.0, rng.next_f32() * TAU),
            size: Vec3::splat(0.5 * scale),
            color: config.palette.color(theme, i + 2),
            opacity: 1.0,
            motion: MotionSeed {
                role: MotionRole::Drift,
                speed: 0.002 * if i % 2 == 0 { 1.0 } else { -1.0 },
                phase: rng.next_f32() * TAU,
                axis: Vec3::new(0.0, 0.0, 1.0),
                ..MotionSeed::default()
            },
        });
        id += 1;
    }

    out
}

/// Build one right-angled circuit trace. Points alternate between x and y
/// moves from a random start inside the central band of the bounds. Returns
/// `None` when fewer than two finite points survive.
fn trace_path(
    config: &SceneConfig,
    params: &CircuitParams,
    rng: &mut dyn RandomSource,
) -> Option<Vec<Vec3>> {
    let bounds = &config.bounds;
    let center = (bounds.min + bounds.max) * 0.5;
    let span = bounds.extent() * 0.375;

    let mut x = center.x + (rng.next_f32() - 0.5) * 2.0 * span.x;
    let mut y = center.y + (rng.next_f32() - 0.5) * 2.0 * span.y;
    let z = rng.next_range(bounds.min.z, center.z);

    let mut points = Vec::new();
    points.push(Vec3::new(x, y, z));

    let (min_segments, max_segments) = params.trace_segments;
    let segments = min_segments + rng.next_index((max_segments - min_segments + 1) as usize) as u32;
    for _ in 0..segments {
        let along_x = rng.next_f32() < 0.5;
        let sign = if rng.next_f32() > 0.5 { 1.0 } else { -1.0 };
        let distance = rng.next_range(params.segment_length.0, params.segment_length.1) * sign;

        if along_x {
            x += distance;
        } else {
            y += distance;
        }
        if x.is_finite() && y.is_finite() {
            points.push(Vec3::new(x, y, z));
        }
    }

    if points.len() >= 2 {
        Some(points)
    } else {
        None
    }
}

fn data_charts(
    config: &SceneConfig,
    params: &ChartsParams,
    theme: ThemeMode,
    target: usize,
    rng: &mut dyn RandomSource,
) -> Vec<PrimitiveDescriptor> {
    let bar_anchor = Vec3::from_array(params.bar_anchor);
    let arc_anchor = Vec3::from_array(params.arc_anchor);
    let spacing = params.chart_width / params.bar_count as f32;
    let bar_footprint = spacing * params.bar_width_ratio;

    let bar_count = params.bar_count as usize;
    let arc_count = params.arc_segments as usize;

    let mut out = Vec::with_capacity(target);
    let mut start_angle = rng.next_f32() * TAU;

    for i in 0..target {
        if i < bar_count {
            let height =
                rng.next_range(params.bar_height_range.0, params.bar_height_range.1);
            let x = -params.chart_width * 0.5 + i as f32 * spacing + spacing * 0.5;
            out.push(PrimitiveDescriptor {
                id: i as u32,
                kind: PrimitiveKind::Box,
                position: bar_anchor + Vec3::new(x, height * 0.5, 0.0),
                rotation: Vec3::new(0.0, -PI / 6.0, 0.0),
                size: Vec3::new(bar_footprint, height, bar_footprint),
                color: config.palette.color(theme, i),
                opacity: 1.0,
                motion: MotionSeed {
                    role: MotionRole::Anchored,
                    ..MotionSeed::default()
                },
            });
        } else if i < bar_count + arc_count {
            let sweep = (rng.next_f32() * 0.3 + 0.1) * TAU;
            if let Some(points) =
                arc_path(arc_anchor, params.arc_radius, start_angle, sweep, params.arc_steps)
            {
                out.push(PrimitiveDescriptor {
                    id: i as u32,
                    kind: PrimitiveKind::LinePath(points),
                    position: arc_anchor,
                    rotation: Vec3::new(PI / 2.0, 0.0, PI / 6.0),
                    size: Vec3::splat(0.06),
                    color: config.palette.color(theme, i),
                    opacity: 1.0,
                    motion: MotionSeed {
                        role: MotionRole::Anchored,
                        ..MotionSeed::default()
                    },
                });
            }
            start_angle += sweep;
        } else {
            // Population beyond the two clusters becomes small legend cubes.
            out.push(PrimitiveDescriptor {
                id: i as u32,
                kind: PrimitiveKind::Box,
                position: position_in(config, rng),
                rotation: random_rotation(rng),
                size: Vec3::splat(0.3),
                color: config.palette.color(theme, i),
                opacity: 0.9,
                motion: MotionSeed {
                    role: MotionRole::Anchored,
                    ..MotionSeed::default()
                },
            });
        }
    }

    out
}

/// Sample an arc segment around `center` in the XZ plane, center point first.
fn arc_path(center: Vec3, radius: f32, start: f32, sweep: f32, steps: u32) -> Option<Vec<Vec3>> {
    let mut points = Vec::with_capacity(steps as usize + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + (step as f32 / steps.max(1) as f32) * sweep;
        points.push(center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius));
    }
    if points.len() >= 2 {
        Some(points)
    } else {
        None
    }
}

fn particle_trails(
    config: &SceneConfig,
    params: &TrailsParams,
    theme: ThemeMode,
    target: usize,
    rng: &mut dyn RandomSource,
) -> Vec<PrimitiveDescriptor> {
    let stride = params.trail_length as usize + 1;

    let mut out = Vec::with_capacity(target);
    let mut head_seed = MotionSeed::default();
    let mut head_size = 0.0f32;
    let mut head_color = [0.0f32; 3];
    let mut head_index = 0usize;

    for i in 0..target {
        let slot = i % stride;
        if slot == 0 {
            head_seed = MotionSeed {
                role: MotionRole::Orbit,
                speed: rng.next_range(params.speed_range.0, params.speed_range.1),
                phase: rng.next_f32() * TAU,
                anchor: position_in(config, rng),
                radius: rng.next_range(params.orbit_radius_range.0, params.orbit_radius_range.1),
                ..MotionSeed::default()
            };
            head_size = rng.next_range(params.head_size_range.0, params.head_size_range.1);
            head_color = config.palette.color(theme, head_index);
            head_index += 1;
        }

        let fade = 1.0 - slot as f32 / stride as f32;
        out.push(PrimitiveDescriptor {
            id: i as u32,
            kind: PrimitiveKind::Sphere,
            position: head_seed.anchor,
            rotation: Vec3::ZERO,
            size: Vec3::splat(head_size * fade.max(1.0 / stride as f32)),
            color: head_color,
            opacity: fade,
            motion: MotionSeed {
                trail_slot: slot as u32,
                ..head_seed
            },
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::XorShiftRng;
    use crate::scenes::{default_params, scene_config, SceneKind};

    fn generate_kind(kind: SceneKind, multiplier: f32, seed: u32) -> Vec<PrimitiveDescriptor> {
        let config = scene_config(kind);
        let params = default_params(kind);
        let mut rng = XorShiftRng::new(seed);
        generate(&config, &params, ThemeMode::Dark, multiplier, &mut rng)
    }

    #[test]
    fn test_counts_match_rounded_target() {
        // Variants without path primitives return exactly the rounded target.
        for kind in [SceneKind::SphereField, SceneKind::AbstractShapes, SceneKind::ParticleTrails] {
            let config = scene_config(kind);
            for multiplier in [1.0, 0.5] {
                let expected = (config.primitive_count as f32 * multiplier).round() as usize;
                assert_eq!(generate_kind(kind, multiplier, 3).len(), expected, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_path_variants_never_exceed_target() {
        for kind in [SceneKind::CircuitBoard, SceneKind::DataCharts] {
            let config = scene_config(kind);
            let generated = generate_kind(kind, 1.0, 11);
            assert!(generated.len() <= config.primitive_count as usize);
            assert!(!generated.is_empty());
        }
    }

    #[test]
    fn test_zero_and_negative_targets_yield_empty() {
        assert!(generate_kind(SceneKind::SphereField, 0.0, 1).is_empty());
        assert!(generate_kind(SceneKind::CircuitBoard, -1.0, 1).is_empty());
    }

    #[test]
    fn test_positions_finite_and_in_bounds() {
        for kind in SceneKind::all() {
            let config = scene_config(kind.to_owned());
            for prim in generate_kind(*kind, 1.0, 17) {
                assert!(prim.is_finite(), "{kind:?} id {}", prim.id);
                assert!(
                    config.bounds.contains(prim.position),
                    "{kind:?} id {} at {:?}",
                    prim.id,
                    prim.position
                );
            }
        }
    }

    #[test]
    fn test_sizes_strictly_positive() {
        for kind in SceneKind::all() {
            for prim in generate_kind(*kind, 1.0, 23) {
                assert!(prim.size.cmpgt(glam::Vec3::ZERO).all(), "{kind:?} id {}", prim.id);
            }
        }
    }

    #[test]
    fn test_ids_unique_within_population() {
        for kind in SceneKind::all() {
            let generated = generate_kind(*kind, 1.0, 29);
            let mut ids: Vec<u32> = generated.iter().map(|p| p.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), generated.len(), "{kind:?}");
        }
    }

    #[test]
    fn test_every_path_has_at_least_two_points() {
        for kind in [SceneKind::CircuitBoard, SceneKind::DataCharts] {
            for prim in generate_kind(kind, 1.0, 31) {
                if let PrimitiveKind::LinePath(points) = &prim.kind {
                    assert!(points.len() >= 2);
                    assert!(points.iter().all(|p| p.is_finite()));
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let a = generate_kind(SceneKind::AbstractShapes, 1.0, 77);
        let b = generate_kind(SceneKind::AbstractShapes, 1.0, 77);
        assert_eq!(a, b);
        let c = generate_kind(SceneKind::AbstractShapes, 1.0, 78);
        assert_ne!(a, c);
    }

    #[test]
    fn test_theme_changes_colors_only() {
        let config = scene_config(SceneKind::SphereField);
        let params = default_params(SceneKind::SphereField);
        let mut rng_dark = XorShiftRng::new(5);
        let mut rng_light = XorShiftRng::new(5);
        let dark = generate(&config, &params, ThemeMode::Dark, 1.0, &mut rng_dark);
        let light = generate(&config, &params, ThemeMode::Light, 1.0, &mut rng_light);
        assert_eq!(dark.len(), light.len());
        for (d, l) in dark.iter().zip(&light) {
            assert_eq!(d.position, l.position);
            assert_ne!(d.color, l.color);
        }
    }

    #[test]
    fn test_trail_slots_cycle_and_fade() {
        let generated = generate_kind(SceneKind::ParticleTrails, 1.0, 41);
        let stride = TrailsParams::default().trail_length as usize + 1;
        for (i, prim) in generated.iter().enumerate() {
            assert_eq!(prim.motion.trail_slot as usize, i % stride);
        }
        // Opacity decreases along each trail.
        for pair in generated.windows(2) {
            if pair[1].motion.trail_slot > 0 {
                assert!(pair[1].opacity < pair[0].opacity + 1e-6);
            }
        }
    }

    #[test]
    fn test_circuit_population_mix() {
        let generated = generate_kind(SceneKind::CircuitBoard, 1.0, 59);
        let rain = generated
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::Glyph('0') | PrimitiveKind::Glyph('1')))
            .count();
        let traces = generated.iter().filter(|p| p.kind.is_path()).count();
        assert!(rain > traces);
        assert!(traces > 0);
    }
}

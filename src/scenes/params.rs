//! Per-variant scene tunables.
//!
//! Everything here is a constant of the variant, fixed at mount. Motion
//! multipliers differ slightly between variants on purpose; they are
//! tunables, not shared invariants.

use super::SceneKind;

/// Variant-specific parameters.
#[derive(Debug, Clone)]
pub enum SceneParams {
    SphereField(SphereFieldParams),
    AbstractShapes(AbstractShapesParams),
    CircuitBoard(CircuitParams),
    DataCharts(ChartsParams),
    ParticleTrails(TrailsParams),
}

impl SceneParams {
    /// Which variant these parameters belong to.
    pub fn kind(&self) -> SceneKind {
        match self {
            Self::SphereField(_) => SceneKind::SphereField,
            Self::AbstractShapes(_) => SceneKind::AbstractShapes,
            Self::CircuitBoard(_) => SceneKind::CircuitBoard,
            Self::DataCharts(_) => SceneKind::DataCharts,
            Self::ParticleTrails(_) => SceneKind::ParticleTrails,
        }
    }
}

impl Default for SceneParams {
    fn default() -> Self {
        Self::SphereField(SphereFieldParams::default())
    }
}

// ============================================================================
// Sphere field
// ============================================================================

/// Parameters for the sphere field variant.
#[derive(Debug, Clone)]
pub struct SphereFieldParams {
    /// Sphere radius range (min, max) in world units.
    pub size_range: (f32, f32),
    /// Fixed translucency of every sphere.
    pub opacity: f32,
    /// Per-primitive rotation speed range (radians per frame).
    pub spin_range: (f32, f32),
}

impl Default for SphereFieldParams {
    fn default() -> Self {
        Self {
            size_range: (2.0, 5.0),
            opacity: 0.7,
            spin_range: (0.001, 0.003),
        }
    }
}

// ============================================================================
// Abstract shapes
// ============================================================================

/// Parameters for the abstract shapes variant.
#[derive(Debug, Clone)]
pub struct AbstractShapesParams {
    /// Shape size range (min, max) in world units.
    pub size_range: (f32, f32),
    /// Per-primitive rotation speed range (radians per frame).
    pub spin_range: (f32, f32),
    /// Distortion factor range stored on each primitive for the renderer.
    pub distort_range: (f32, f32),
    /// Secondary rotation axis advances at `speed * secondary_axis_ratio`.
    pub secondary_axis_ratio: f32,
    /// Fixed translucency of every shape.
    pub opacity: f32,
}

impl Default for AbstractShapesParams {
    fn default() -> Self {
        Self {
            size_range: (0.5, 2.0),
            spin_range: (0.002, 0.012),
            distort_range: (0.1, 0.6),
            secondary_axis_ratio: 1.3,
            opacity: 0.8,
        }
    }
}

// ============================================================================
// Circuit board
// ============================================================================

/// Code symbols floated between the traces.
pub const CODE_SYMBOLS: &[char] = &[
    '{', '}', '(', ')', '[', ']', '<', '>', ';', '=', '+', '*', '/', '%', '&', '|', '!',
];

/// Parameters for the circuit board variant.
#[derive(Debug, Clone)]
pub struct CircuitParams {
    /// Fraction of the population spawned as falling binary glyphs.
    pub rain_weight: f32,
    /// Fraction spawned as circuit trace paths.
    pub trace_weight: f32,
    /// Remainder becomes floating code symbols.
    pub symbol_weight: f32,
    /// Fall speed range for rain glyphs (units per frame).
    pub fall_speed_range: (f32, f32),
    /// Trace segment count range (inclusive).
    pub trace_segments: (u32, u32),
    /// Trace segment length range in world units.
    pub segment_length: (f32, f32),
    /// Glyph scale range.
    pub glyph_scale: (f32, f32),
    /// Symbol set for non-binary glyphs.
    pub symbols: &'static [char],
    /// Secondary rotation axis ratio for floating symbols.
    pub secondary_axis_ratio: f32,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            rain_weight: 0.74,
            trace_weight: 0.15,
            symbol_weight: 0.11,
            fall_speed_range: (0.01, 0.03),
            trace_segments: (2, 3),
            segment_length: (0.5, 1.5),
            glyph_scale: (0.5, 1.0),
            symbols: CODE_SYMBOLS,
            secondary_axis_ratio: 1.5,
        }
    }
}

// ============================================================================
// Data charts
// ============================================================================

/// Parameters for the data charts variant.
#[derive(Debug, Clone)]
pub struct ChartsParams {
    /// Bars in the bar chart cluster.
    pub bar_count: u32,
    /// Overall bar chart width in world units.
    pub chart_width: f32,
    /// Bar footprint as a fraction of the per-bar spacing.
    pub bar_width_ratio: f32,
    /// Bar height range (min, max) in world units.
    pub bar_height_range: (f32, f32),
    /// Arc segments in the ring chart cluster.
    pub arc_segments: u32,
    /// Points sampled along each arc segment.
    pub arc_steps: u32,
    /// Ring chart radius in world units.
    pub arc_radius: f32,
    /// World-space anchors for the two chart clusters.
    pub bar_anchor: [f32; 3],
    pub arc_anchor: [f32; 3],
}

impl Default for ChartsParams {
    fn default() -> Self {
        Self {
            bar_count: 8,
            chart_width: 6.0,
            bar_width_ratio: 0.7,
            bar_height_range: (0.5, 2.5),
            arc_segments: 5,
            arc_steps: 20,
            arc_radius: 2.0,
            bar_anchor: [8.0, 0.0, -20.0],
            arc_anchor: [-8.0, 0.0, -20.0],
        }
    }
}

// ============================================================================
// Particle trails
// ============================================================================

/// Parameters for the particle trails variant.
#[derive(Debug, Clone)]
pub struct TrailsParams {
    /// Trail primitives following each head.
    pub trail_length: u32,
    /// Delay between consecutive trail slots, in orbit phase units.
    pub trail_delay: f32,
    /// Orbit radius range (min, max) in world units.
    pub orbit_radius_range: (f32, f32),
    /// Orbit angular speed range (radians per second of elapsed time).
    pub speed_range: (f32, f32),
    /// Head particle size range.
    pub head_size_range: (f32, f32),
    /// Vertical orbit rate relative to the horizontal rate.
    pub vertical_ratio: f32,
}

impl Default for TrailsParams {
    fn default() -> Self {
        Self {
            trail_length: 15,
            trail_delay: 0.1,
            orbit_radius_range: (3.0, 8.0),
            speed_range: (0.01, 0.03),
            head_size_range: (0.2, 0.5),
            vertical_ratio: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_report_their_kind() {
        assert_eq!(
            SceneParams::CircuitBoard(CircuitParams::default()).kind(),
            SceneKind::CircuitBoard
        );
        assert_eq!(SceneParams::default().kind(), SceneKind::SphereField);
    }

    #[test]
    fn test_circuit_weights_cover_population() {
        let p = CircuitParams::default();
        let total = p.rain_weight + p.trace_weight + p.symbol_weight;
        assert!((total - 1.0).abs() < 1e-6);
    }
}

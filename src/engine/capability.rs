//! Display capability classification.
//!
//! Consulted once per mount to size the population and gate pointer orbit.
//! Classification is a pure function of the host-provided viewport snapshot,
//! so repeated calls within a mount always agree.

/// Read-only viewport snapshot supplied by the host at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportInfo {
    pub width: u32,
    pub height: u32,
    /// True for touch-style input without hover.
    pub coarse_pointer: bool,
}

/// Viewports narrower than this are treated as constrained.
const CONSTRAINED_WIDTH: u32 = 768;

/// Primitive-count multiplier applied on constrained displays.
const CONSTRAINED_MULTIPLIER: f32 = 0.5;

/// Display/input classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayProfile {
    Full,
    Constrained,
}

impl DisplayProfile {
    /// Classify the current display context. Inconclusive input (a
    /// zero-sized viewport) defaults to full capability.
    pub fn classify(viewport: &ViewportInfo) -> Self {
        if viewport.width == 0 || viewport.height == 0 {
            return DisplayProfile::Full;
        }
        if viewport.coarse_pointer || viewport.width < CONSTRAINED_WIDTH {
            DisplayProfile::Constrained
        } else {
            DisplayProfile::Full
        }
    }

    /// Multiplier applied to every variant's target population.
    pub fn count_multiplier(&self) -> f32 {
        match self {
            DisplayProfile::Full => 1.0,
            DisplayProfile::Constrained => CONSTRAINED_MULTIPLIER,
        }
    }

    /// Pointer-driven effects are disabled on constrained displays.
    pub fn allows_pointer(&self) -> bool {
        matches!(self, DisplayProfile::Full)
    }
}

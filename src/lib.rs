//! Ambient Visualizer Core
//!
//! Procedural backdrop engine for ambient decorative 3D scenes.
//!
//! # Features
//!
//! - Data-driven scene catalog (sphere field, abstract shapes, circuit
//!   board, data charts, particle trails)
//! - Bounded random generation with an injectable random source
//! - Per-frame updater: spin, bob, pointer attraction, wraparound respawn
//! - Display capability classification with population scaling
//! - Headless GPU rendering via wgpu with a monotonic fidelity fallback
//!   chain (primary scene → sphere field → static gradient)
//! - PNG frame export for offline rendering

pub mod engine;
pub mod gpu;
pub mod pipeline;
pub mod scenes;

// Re-export commonly used types
pub use engine::{
    advance, generate, DisplayProfile, FrameInput, MotionRole, MotionSeed, PrimitiveDescriptor,
    PrimitiveKind, RandomSource, StageGroup, ViewportInfo, XorShiftRng,
};
pub use gpu::{GpuContext, GpuError, RenderSettings, SceneRenderer, Vertex};
pub use pipeline::{
    render_frames, static_gradient, BackdropSession, Fidelity, PipelineError, SessionConfig,
};
pub use scenes::{
    default_params, parse_hex_color, scene_config, PaletteRamp, SceneConfig, SceneKind,
    SceneParams, ThemeMode,
};

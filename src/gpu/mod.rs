//! GPU rendering using wgpu.
//!
//! Provides headless offscreen rendering for backdrop scenes: a shared
//! context, CPU-side tessellation of primitives into billboarded quads, and
//! a renderer that returns RGBA frames via buffer readback.

pub mod context;
pub mod scene_renderer;
pub mod tessellate;

pub use context::{GpuContext, GpuError};
pub use scene_renderer::{RenderSettings, SceneRenderer};
pub use tessellate::{tessellate, vertex_capacity, Vertex};

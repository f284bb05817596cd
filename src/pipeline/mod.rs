//! Offline render pipeline: session configuration, the static placeholder
//! and PNG frame export.

mod session;

pub use session::{BackdropSession, Fidelity};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scenes::{SceneKind, ThemeMode};

/// Session configuration for mounting a backdrop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub scene: SceneKind,
    pub theme: ThemeMode,
    /// Hex color overriding the theme background, e.g. `"#101826"`.
    pub background: Option<String>,
    /// Touch-style input without hover; constrains the display profile.
    pub coarse_pointer: bool,
    /// Fixed seed for reproducible populations. `None` draws from entropy.
    pub seed: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            scene: SceneKind::AbstractShapes,
            theme: ThemeMode::Dark,
            background: None,
            coarse_pointer: false,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Errors that can occur during offline rendering.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CPU-rendered vertical gradient used when every rendering context has
/// failed. Slate tones matching the animated backgrounds.
pub fn static_gradient(width: u32, height: u32, theme: ThemeMode) -> Vec<u8> {
    let (top, bottom) = match theme {
        ThemeMode::Dark => ([0x0f, 0x17, 0x2a], [0x1e, 0x29, 0x3b]),
        ThemeMode::Light => ([0xf1, 0xf5, 0xf9], [0xe2, 0xe8, 0xf0]),
    };

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        let t = row as f32 / height.max(1) as f32;
        let blend = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        let rgba = [
            blend(top[0], bottom[0]),
            blend(top[1], bottom[1]),
            blend(top[2], bottom[2]),
            0xff,
        ];
        for _ in 0..width {
            pixels.extend_from_slice(&rgba);
        }
    }
    pixels
}

/// Render a sequence of frames to numbered PNGs in `output_dir`.
pub fn render_frames<P: AsRef<Path>>(
    output_dir: P,
    config: SessionConfig,
    frame_count: u32,
    progress_callback: Option<Box<dyn Fn(f32)>>,
) -> Result<(), PipelineError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let width = config.width;
    let height = config.height;
    let mut session = BackdropSession::mount(config);
    log::info!("rendering {} frames at {:?} fidelity", frame_count, session.fidelity());

    for frame_idx in 0..frame_count {
        session.advance_frame(None);
        let pixels = session.render_frame();

        let image = image::RgbaImage::from_raw(width, height, pixels)
            .expect("frame buffer matches image dimensions");
        image.save(output_dir.join(format!("frame_{frame_idx:05}.png")))?;

        if let Some(ref callback) = progress_callback {
            callback((frame_idx + 1) as f32 / frame_count as f32);
        }
    }

    Ok(())
}

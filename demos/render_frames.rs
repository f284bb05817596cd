//! Example: Render a backdrop scene to PNG frames.
//!
//! Renders a few seconds of the circuit-board scene (or the variant named
//! on the command line) into ./frames_out.
//!
//! Run with:
//!     cargo run --example render_frames [scene-name]

use ambient_visualizer::pipeline::{render_frames, SessionConfig};
use ambient_visualizer::scenes::{SceneKind, ThemeMode};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scene = std::env::args()
        .nth(1)
        .and_then(|name| SceneKind::from_str(&name))
        .unwrap_or(SceneKind::CircuitBoard);

    println!("Ambient Visualizer - Frame Export Example");
    println!("=========================================\n");
    println!("Scene: {} ({})", scene.name(), scene.description());

    let config = SessionConfig {
        width: 640,
        height: 360,
        fps: 30,
        scene,
        theme: ThemeMode::Dark,
        background: None,
        coarse_pointer: false,
        seed: None,
    };

    let seconds = 3u32;
    let frame_count = seconds * config.fps;
    println!("Resolution: {}x{}", config.width, config.height);
    println!("Frames: {} ({}s at {} fps)\n", frame_count, seconds, config.fps);

    let output_dir = std::path::Path::new("frames_out");
    render_frames(
        output_dir,
        config,
        frame_count,
        Some(Box::new(|progress| {
            print!("\rRendering... {:3.0}%", progress * 100.0);
            use std::io::Write;
            let _ = std::io::stdout().flush();
        })),
    )?;

    println!("\n\nDone. Frames written to {}", output_dir.display());
    Ok(())
}

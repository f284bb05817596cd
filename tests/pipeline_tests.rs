//! Integration tests for the offline pipeline and fallback session.

use ambient_visualizer::pipeline::{
    render_frames, BackdropSession, Fidelity, SessionConfig,
};
use ambient_visualizer::scenes::{SceneKind, ThemeMode};

fn small_config() -> SessionConfig {
    SessionConfig {
        width: 64,
        height: 64,
        fps: 30,
        scene: SceneKind::CircuitBoard,
        theme: ThemeMode::Dark,
        background: None,
        coarse_pointer: false,
        seed: Some(42),
    }
}

#[test]
fn test_render_frames_writes_numbered_pngs() {
    let dir = tempfile::tempdir().unwrap();
    let frames = 4;

    render_frames(dir.path(), small_config(), frames, None).unwrap();

    for idx in 0..frames {
        let path = dir.path().join(format!("frame_{idx:05}.png"));
        assert!(path.exists(), "missing {path:?}");
        let image = image::open(&path).unwrap();
        assert_eq!(image.width(), 64);
        assert_eq!(image.height(), 64);
    }
}

#[test]
fn test_render_frames_reports_progress() {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicU32::new(0));
    let seen = calls.clone();

    render_frames(
        dir.path(),
        small_config(),
        3,
        Some(Box::new(move |progress| {
            assert!((0.0..=1.0).contains(&progress));
            seen.fetch_add(1, Ordering::SeqCst);
        })),
    )
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_config_loads_from_json_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"scene": "trails", "theme": "light", "seed": 7}}"#).unwrap();

    let config = SessionConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.scene, SceneKind::ParticleTrails);
    assert_eq!(config.theme, ThemeMode::Light);
    assert_eq!(config.seed, Some(7));
    // Defaults fill the rest.
    assert_eq!(config.width, 1280);
}

#[test]
fn test_config_rejects_malformed_json() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{not json").unwrap();
    assert!(SessionConfig::from_json_file(file.path()).is_err());
}

#[test]
fn test_fallback_never_recovers_within_a_mount() {
    let mut session = BackdropSession::mount(small_config());

    let mut last = session.fidelity();
    for _ in 0..5 {
        session.note_failure();
        let now = session.fidelity();
        assert!(now >= last, "fidelity recovered from {last:?} to {now:?}");
        last = now;
        // Frames keep coming at every level.
        session.advance_frame(None);
        let pixels = session.render_frame();
        assert_eq!(pixels.len(), 64 * 64 * 4);
    }
    assert_eq!(session.fidelity(), Fidelity::StaticPlaceholder);
}

#[test]
fn test_unmounted_session_survives_stale_callbacks() {
    let mut session = BackdropSession::mount(small_config());
    session.unmount();
    for frame in 0..10 {
        session.advance_frame(Some(glam::Vec2::new(frame as f32 * 0.1, 0.0)));
    }
    assert_eq!(session.population(), 0);
}

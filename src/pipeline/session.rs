//! Mounted backdrop session and the fidelity fallback chain.
//!
//! A session owns one mounted scene: its primitive population, its renderer
//! and its frame clock. Rendering failures degrade fidelity monotonically,
//! from Primary (requested variant) to Secondary (sphere field on a fresh
//! context) to StaticPlaceholder (CPU gradient), and nothing ever climbs
//! back up within a mount. The engine itself never raises; only the
//! rendering context can, and every such error lands in [`note_failure`].
//!
//! [`note_failure`]: BackdropSession::note_failure

use glam::Vec2;

use crate::engine::{
    advance, generate, DisplayProfile, FrameInput, RandomSource, StageGroup, ViewportInfo,
    XorShiftRng,
};
use crate::gpu::{tessellate, vertex_capacity, RenderSettings, SceneRenderer};
use crate::scenes::{
    default_params, parse_hex_color, scene_config, SceneConfig, SceneKind, SceneParams,
};

use super::{static_gradient, SessionConfig};

/// Fidelity levels, ordered highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fidelity {
    Primary,
    Secondary,
    StaticPlaceholder,
}

impl Fidelity {
    /// The next level down, if any.
    pub fn degraded(self) -> Option<Fidelity> {
        match self {
            Fidelity::Primary => Some(Fidelity::Secondary),
            Fidelity::Secondary => Some(Fidelity::StaticPlaceholder),
            Fidelity::StaticPlaceholder => None,
        }
    }
}

/// Variant used when the requested one loses its rendering context.
const SECONDARY_KIND: SceneKind = SceneKind::SphereField;

/// One mounted backdrop.
pub struct BackdropSession {
    config: SessionConfig,
    capability: DisplayProfile,
    fidelity: Fidelity,
    scene: SceneConfig,
    params: SceneParams,
    group: Option<StageGroup>,
    renderer: Option<SceneRenderer>,
    rng: XorShiftRng,
    frame_index: u64,
}

impl BackdropSession {
    /// Mount a session. Never fails: construction errors walk the fallback
    /// chain until something (at worst the static placeholder) works.
    pub fn mount(config: SessionConfig) -> Self {
        let capability = DisplayProfile::classify(&ViewportInfo {
            width: config.width,
            height: config.height,
            coarse_pointer: config.coarse_pointer,
        });
        let mut generation_rng = match config.seed {
            Some(seed) => XorShiftRng::new(seed),
            None => XorShiftRng::from_entropy(),
        };
        // Separate stream for the updater's wraparound draws.
        let updater_seed = (generation_rng.next_f32() * u32::MAX as f32) as u32;

        let mut session = Self {
            capability,
            fidelity: Fidelity::Primary,
            scene: scene_config(config.scene),
            params: default_params(config.scene),
            group: None,
            renderer: None,
            frame_index: 0,
            rng: XorShiftRng::new(updater_seed),
            config,
        };

        if !session.try_build(session.config.scene, &mut generation_rng) {
            session.degrade(&mut generation_rng);
        }
        session
    }

    /// Populate and build a renderer for `kind`. False means the rendering
    /// context could not be created.
    fn try_build(&mut self, kind: SceneKind, rng: &mut XorShiftRng) -> bool {
        let scene = scene_config(kind);
        let params = default_params(kind);
        let population = generate(
            &scene,
            &params,
            self.config.theme,
            self.capability.count_multiplier(),
            rng,
        );
        let group = StageGroup::new(population);

        let settings = RenderSettings {
            width: self.config.width,
            height: self.config.height,
            theme: self.config.theme,
            background: self.config.background.as_deref().and_then(parse_hex_color),
            lighting: scene.lighting,
        };
        match pollster::block_on(SceneRenderer::new(settings, vertex_capacity(&group))) {
            Ok(renderer) => {
                log::info!(
                    "mounted '{}' at {:?} fidelity on {}",
                    kind.name(),
                    self.fidelity,
                    renderer.adapter_info().name
                );
                self.scene = scene;
                self.params = params;
                self.group = Some(group);
                self.renderer = Some(renderer);
                true
            }
            Err(e) => {
                log::warn!("rendering context failed for '{}': {e}", kind.name());
                false
            }
        }
    }

    /// Walk down the fallback chain until a level mounts.
    fn degrade(&mut self, rng: &mut XorShiftRng) {
        while let Some(next) = self.fidelity.degraded() {
            self.fidelity = next;
            match next {
                Fidelity::Secondary => {
                    if self.try_build(SECONDARY_KIND, rng) {
                        return;
                    }
                }
                Fidelity::StaticPlaceholder => {
                    log::warn!("all rendering contexts failed; serving static gradient");
                    self.group = None;
                    self.renderer = None;
                    return;
                }
                Fidelity::Primary => unreachable!(),
            }
        }
    }

    /// Report an observed rendering failure, degrading one level.
    pub fn note_failure(&mut self) {
        let mut rng = XorShiftRng::new((self.rng.next_f32() * u32::MAX as f32) as u32);
        self.renderer = None;
        self.group = None;
        self.degrade(&mut rng);
    }

    /// Advance the scene by one frame. A no-op after teardown or in the
    /// static placeholder state.
    pub fn advance_frame(&mut self, pointer: Option<Vec2>) {
        self.frame_index += 1;
        let Some(group) = self.group.as_mut() else {
            return;
        };
        let input = FrameInput {
            elapsed: self.frame_index as f32 / self.config.fps.max(1) as f32,
            pointer: pointer.filter(|_| self.capability.allows_pointer()),
        };
        advance(group, &input, &self.scene, &self.params, &mut self.rng);
    }

    /// Render the current frame as RGBA8 pixels. Frame-level failures
    /// degrade fidelity and fall through to the gradient for this frame.
    pub fn render_frame(&mut self) -> Vec<u8> {
        if let (Some(group), Some(renderer)) = (&self.group, &self.renderer) {
            let vertices = tessellate(group, &self.scene.camera, renderer.settings().aspect());
            match renderer.render_frame(&vertices) {
                Ok(pixels) => return pixels,
                Err(e) => {
                    log::warn!("frame render failed: {e}");
                    self.note_failure();
                }
            }
        }
        // Either the placeholder level, or the frame the failure happened
        // on; a freshly degraded scene starts rendering next frame.
        static_gradient(self.config.width, self.config.height, self.config.theme)
    }

    /// Tear the scene down. Later `advance_frame` calls no-op.
    pub fn unmount(&mut self) {
        self.group = None;
        self.renderer = None;
    }

    pub fn fidelity(&self) -> Fidelity {
        self.fidelity
    }

    pub fn capability(&self) -> DisplayProfile {
        self.capability
    }

    pub fn is_mounted(&self) -> bool {
        self.group.is_some()
    }

    /// Current population size (zero after teardown).
    pub fn population(&self) -> usize {
        self.group.as_ref().map_or(0, StageGroup::len)
    }

    /// Borrow the live group, when one exists.
    pub fn group(&self) -> Option<&StageGroup> {
        self.group.as_ref()
    }
}

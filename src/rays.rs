//! The mounted light-rays instance.

use crate::anim::clock::FrameClock;
use crate::anim::pointer::PointerSmoother;
use crate::anim::scheduler::AnimationScheduler;
use crate::color::hex_to_rgb;
use crate::config::model::RayConfig;
use crate::config::reconcile::reconcile;
use crate::foundation::core::{HostContainer, NormalizedColor, Point};
use crate::foundation::error::RaysResult;
use crate::geometry::{RayAnchorDirection, resolve_anchor_and_direction};
use crate::host::{FrameHost, FrameToken};
use crate::render::{ContextProvider, FrameRGBA};
use crate::shader::source::ShaderVariant;
use crate::shader::uniforms::{FrameInputs, FrameUniforms};
use crate::surface::manager::{DrawStatus, SurfaceManager};
use crate::surface::{SurfaceElement, SurfaceOpts, SurfaceState};

/// Counters of derived-data recomputation and drawing, per instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RaysStats {
    /// Frames that reached the drawing context.
    pub frames_drawn: u64,
    /// Times the hex color was parsed.
    pub color_parses: u64,
    /// Times anchor and direction were resolved.
    pub geometry_resolves: u64,
    /// Programs successfully compiled.
    pub program_builds: u64,
    /// Drawing contexts successfully acquired.
    pub context_acquisitions: u64,
}

/// Result of delivering a frame token to [`LightRays::on_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The token is not this instance's live registration; nothing happened.
    Stale,
    /// A frame was drawn and the next one requested.
    Drawn,
    /// Nothing to draw into (empty container); the next frame was requested.
    Skipped,
    /// The loop stopped: the context was lost or the frame failed.
    Halted,
}

/// One light-rays effect bound to a host container.
///
/// All lifecycle entry points take `&mut self`; a frame always sees one consistent
/// configuration. Dropping the instance unmounts it.
pub struct LightRays {
    config: RayConfig,
    color: NormalizedColor,
    geometry: Option<RayAnchorDirection>,
    surface: SurfaceManager,
    provider: Box<dyn ContextProvider>,
    scheduler: AnimationScheduler,
    clock: FrameClock,
    pointer: PointerSmoother,
    visible: bool,
    stats: RaysStats,
}

impl LightRays {
    /// Create an unmounted instance with default surface limits.
    pub fn new(
        config: RayConfig,
        host: Box<dyn FrameHost>,
        provider: Box<dyn ContextProvider>,
    ) -> Self {
        Self::with_opts(config, host, provider, SurfaceOpts::default())
    }

    /// Create an unmounted instance.
    pub fn with_opts(
        config: RayConfig,
        host: Box<dyn FrameHost>,
        provider: Box<dyn ContextProvider>,
        opts: SurfaceOpts,
    ) -> Self {
        let config = config.sanitized();
        let color = hex_to_rgb(&config.color);
        Self {
            config,
            color,
            geometry: None,
            surface: SurfaceManager::new(opts),
            provider,
            scheduler: AnimationScheduler::new(host),
            clock: FrameClock::default(),
            pointer: PointerSmoother::default(),
            visible: true,
            stats: RaysStats {
                color_parses: 1,
                ..RaysStats::default()
            },
        }
    }

    fn is_mounted(&self) -> bool {
        !matches!(
            self.surface.state(),
            SurfaceState::Unattached | SurfaceState::TornDown
        )
    }

    fn resolve_geometry(&mut self) {
        let (w, h) = self.surface.buffer_size();
        self.geometry = Some(resolve_anchor_and_direction(
            self.config.origin,
            f64::from(w),
            f64::from(h),
        ));
        self.stats.geometry_resolves += 1;
    }

    fn start_loop(&mut self) {
        if self.visible
            && self.surface.state() == SurfaceState::Active
            && !self.scheduler.is_running()
        {
            self.clock.reset();
            self.scheduler.start();
        }
    }

    fn acquire_and_start(&mut self) {
        match self
            .surface
            .acquire(self.provider.as_mut(), self.config.shader_variant())
        {
            Ok(()) => {
                self.stats.context_acquisitions += 1;
                self.stats.program_builds += 1;
                self.start_loop();
            }
            Err(e) => tracing::warn!(error = %e, "light rays unavailable; surface left inert"),
        }
    }

    /// Attach to `container`, acquire a context and start animating.
    ///
    /// Never fails: without a usable context the element is created and left undrawn.
    #[tracing::instrument(skip(self))]
    pub fn mount(&mut self, container: HostContainer) {
        if self.is_mounted() {
            tracing::warn!(state = ?self.surface.state(), "mount ignored: already mounted");
            return;
        }
        self.surface.attach(container, &self.config.class_name);
        self.acquire_and_start();
        self.resolve_geometry();
    }

    /// Stop the loop, then release the program, the context and the element.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self) {
        self.scheduler.cancel();
        self.surface.teardown();
        self.geometry = None;
    }

    /// Apply a new configuration, recomputing only what it invalidates.
    #[tracing::instrument(skip(self, config))]
    pub fn set_config(&mut self, config: RayConfig) {
        let next = config.sanitized();
        let diff = reconcile(&self.config, &next);
        self.config = next;
        if diff.is_empty() {
            return;
        }
        tracing::debug!(?diff, "config changed");

        if diff.color {
            self.color = hex_to_rgb(&self.config.color);
            self.stats.color_parses += 1;
        }
        if diff.class_name {
            self.surface.set_class_name(&self.config.class_name);
        }
        if diff.geometry && self.is_mounted() {
            self.resolve_geometry();
        }
        if diff.program && self.surface.state() == SurfaceState::Active {
            self.scheduler.cancel();
            match self.surface.rebuild_program(self.config.shader_variant()) {
                Ok(()) => {
                    self.stats.program_builds += 1;
                    if self.visible {
                        self.scheduler.start();
                    }
                }
                Err(e) => tracing::warn!(error = %e, "program rebuild failed; surface left inert"),
            }
        }
    }

    /// The container changed size or pixel ratio.
    pub fn resize(&mut self, container: HostContainer) {
        if !self.is_mounted() {
            return;
        }
        if let Err(e) = self.surface.resize(container) {
            tracing::error!(error = %e, "resize failed; stopping");
            self.scheduler.cancel();
            self.surface.fail();
        }
        self.resolve_geometry();
    }

    /// The container entered or left the viewport. Hidden instances keep their context but
    /// do not animate.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.start_loop();
        } else {
            self.scheduler.cancel();
        }
    }

    /// Pointer position in container CSS pixels.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if !self.config.follow_mouse {
            return;
        }
        let size = self.surface.container().size;
        if size.is_empty() {
            return;
        }
        self.pointer.set_target(Point::new(x / size.width, y / size.height));
    }

    /// The host reported that the context was lost.
    #[tracing::instrument(skip(self))]
    pub fn context_lost(&mut self) {
        self.scheduler.cancel();
        self.surface.lose();
    }

    /// The host reported that a lost context can be recreated.
    #[tracing::instrument(skip(self))]
    pub fn context_restored(&mut self) {
        if self.surface.begin_restore() {
            self.acquire_and_start();
            self.resolve_geometry();
        }
    }

    /// Deliver a due frame. Tokens other than the live registration are ignored.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64) -> FrameOutcome {
        if !self.scheduler.accept(token) {
            return FrameOutcome::Stale;
        }
        if self.surface.state() != SurfaceState::Active {
            return FrameOutcome::Halted;
        }

        let time = self.clock.tick(now_ms);
        let mouse = if self.config.follow_mouse {
            self.pointer.step(self.config.mouse_influence, time.delta)
        } else {
            self.pointer.current()
        };

        let has_area = !self.surface.container().size.is_empty();
        let Some(geometry) = self.geometry.filter(|_| has_area) else {
            self.scheduler.start();
            return FrameOutcome::Skipped;
        };

        let uniforms = FrameUniforms::compose(FrameInputs {
            config: &self.config,
            color: self.color,
            geometry,
            buffer_size: self.surface.buffer_size(),
            time: time.elapsed,
            mouse,
        });

        match self.surface.draw(&uniforms) {
            Ok(DrawStatus::Drawn) => {
                self.stats.frames_drawn += 1;
                self.scheduler.start();
                FrameOutcome::Drawn
            }
            Ok(DrawStatus::Lost) => {
                tracing::warn!("context lost during frame");
                FrameOutcome::Halted
            }
            Err(e) => {
                tracing::error!(error = %e, "frame failed; stopping");
                self.surface.fail();
                FrameOutcome::Halted
            }
        }
    }

    /// Pixels of the last drawn frame.
    pub fn read_pixels(&mut self) -> RaysResult<FrameRGBA> {
        self.surface.read_pixels()
    }

    /// Current surface state.
    pub fn state(&self) -> SurfaceState {
        self.surface.state()
    }

    /// The rendered element, present from mount to unmount.
    pub fn surface_element(&self) -> Option<&SurfaceElement> {
        self.surface.element()
    }

    /// Whether a drawing context is currently held.
    pub fn holds_context(&self) -> bool {
        self.surface.holds_context()
    }

    /// Whether a frame registration is live.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Variant of the compiled program, while a context is held.
    pub fn program_variant(&self) -> Option<ShaderVariant> {
        self.surface.program_variant()
    }

    /// Sanitized active configuration.
    pub fn config(&self) -> &RayConfig {
        &self.config
    }

    /// Parsed tint.
    pub fn color(&self) -> NormalizedColor {
        self.color
    }

    /// Resolved anchor and direction, while mounted.
    pub fn geometry(&self) -> Option<RayAnchorDirection> {
        self.geometry
    }

    /// Recompute and draw counters.
    pub fn stats(&self) -> RaysStats {
        self.stats
    }
}

impl Drop for LightRays {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../tests/unit/rays.rs"]
mod tests;

//! Start/stop control over an [`Effect`] bound to one surface.
//!
//! The player owns the surface, a frame scheduler, the active config and the
//! effect. Replacing the effect (new parameters, new canvas size) always
//! cancels the old one's pending frame before the new one is started, so two
//! animation loops never interleave on the same surface.
//!
//! Headless players use the default [`FrameQueue`] and advance with
//! [`Player::pump`]; a host with its own refresh callback (a browser's
//! `requestAnimationFrame`) calls [`Player::fire`] from that callback.

use crate::config::EffectConfig;
use crate::effect::Effect;
use crate::error::FlowError;
use crate::scheduler::{FrameQueue, FrameScheduler};
use crate::surface::Surface;

pub struct Player<S: Surface, F: FrameScheduler = FrameQueue> {
    surface: S,
    scheduler: F,
    config: EffectConfig,
    effect: Effect,
    running: bool,
}

impl<S: Surface> Player<S> {
    /// Builds an effect sized to `surface`, driven by an in-process
    /// [`FrameQueue`]. The player starts stopped.
    pub fn new(surface: S, config: EffectConfig) -> Result<Self, FlowError> {
        Self::with_scheduler(surface, FrameQueue::new(), config)
    }

    /// Fires due frames until one ticks the effect. Stale handles are
    /// drained and skipped. Returns whether a tick ran.
    pub fn pump(&mut self) -> Result<bool, FlowError> {
        while let Some(handle) = self.scheduler.next_due() {
            let ticked = self
                .effect
                .on_frame(handle, &mut self.surface, &mut self.scheduler);
            if self.halt_on_error(ticked)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Pumps up to `n` frames, stopping early if nothing is scheduled.
    /// Returns the number of ticks that ran.
    pub fn run_frames(&mut self, n: usize) -> Result<usize, FlowError> {
        let mut ran = 0;
        for _ in 0..n {
            if !self.pump()? {
                break;
            }
            ran += 1;
        }
        Ok(ran)
    }
}

impl<S: Surface, F: FrameScheduler> Player<S, F> {
    pub fn with_scheduler(surface: S, scheduler: F, config: EffectConfig) -> Result<Self, FlowError> {
        let effect = Effect::new(surface.width(), surface.height(), &config)?;
        Ok(Self {
            surface,
            scheduler,
            config,
            effect,
            running: false,
        })
    }

    /// Renders a frame immediately and schedules the next. No-op while running.
    pub fn start(&mut self) -> Result<(), FlowError> {
        if self.running {
            return Ok(());
        }
        self.effect.render(&mut self.surface, &mut self.scheduler)?;
        self.running = true;
        log::info!("animation started");
        Ok(())
    }

    /// Cancels the pending frame. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.effect.cancel_render(&mut self.scheduler);
        self.running = false;
        log::info!(
            "animation stopped after {} frames",
            self.effect.frames_rendered()
        );
    }

    /// Flips between running and stopped; returns the new state.
    pub fn toggle(&mut self) -> Result<bool, FlowError> {
        if self.running {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.running)
    }

    /// Host callback entry: the scheduler fired the frame the effect is
    /// waiting for. Returns whether a tick ran.
    ///
    /// If the next frame cannot be requested the loop has ended, so the
    /// player drops to stopped before returning the error.
    pub fn fire(&mut self) -> Result<bool, FlowError> {
        let Some(handle) = self.effect.pending_frame() else {
            return Ok(false);
        };
        let ticked = self
            .effect
            .on_frame(handle, &mut self.surface, &mut self.scheduler);
        self.halt_on_error(ticked)
    }

    fn halt_on_error<T>(&mut self, result: Result<T, FlowError>) -> Result<T, FlowError> {
        if let Err(e) = &result {
            if self.running {
                self.running = false;
                log::warn!("animation halted: {e}");
            }
        }
        result
    }

    /// Replaces the effect with one built from `config`, keeping the
    /// running state.
    ///
    /// An invalid config leaves the current effect and config untouched. If
    /// the new effect builds but its first frame cannot be scheduled, it stays
    /// installed and the player stops.
    pub fn rebuild(&mut self, config: EffectConfig) -> Result<(), FlowError> {
        let effect = Effect::new(self.surface.width(), self.surface.height(), &config)?;
        self.config = config;
        self.replace_effect(effect)?;
        log::info!(
            "rebuilt effect: {} particles, cell size {}, curve {}, zoom {}",
            config.no_of_particles,
            config.cell_size,
            config.curve,
            config.zoom
        );
        Ok(())
    }

    /// Swaps in a new surface (e.g. after a window resize) and rebuilds the
    /// effect for its dimensions with the current config.
    ///
    /// A surface too small for the config leaves the player on its old
    /// surface and effect. A scheduling failure stops the player as in
    /// [`rebuild`](Player::rebuild).
    pub fn resize(&mut self, surface: S) -> Result<(), FlowError> {
        let effect = Effect::new(surface.width(), surface.height(), &self.config)?;
        self.surface = surface;
        self.replace_effect(effect)?;
        log::info!(
            "resized to {}x{}",
            self.surface.width(),
            self.surface.height()
        );
        Ok(())
    }

    fn replace_effect(&mut self, effect: Effect) -> Result<(), FlowError> {
        self.effect.cancel_render(&mut self.scheduler);
        self.effect = effect;
        if !self.running {
            return Ok(());
        }
        let restarted = self.effect.render(&mut self.surface, &mut self.scheduler);
        self.halt_on_error(restarted)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks rendered by the current effect.
    pub fn frames_rendered(&self) -> u64 {
        self.effect.frames_rendered()
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Releases the surface, e.g. to snapshot the last frame.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

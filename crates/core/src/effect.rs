//! The simulation engine: a flow field, a fixed population of particles, and
//! the per-frame draw/update cycle.
//!
//! An [`Effect`] is built once for a canvas size and an [`EffectConfig`] and
//! never reconfigured; a parameter change means a new `Effect`. Scheduling is
//! handle based: [`Effect::render`] draws one frame and requests the next,
//! the scheduler later reports the fired handle through [`Effect::on_frame`],
//! and [`Effect::cancel_render`] withdraws whatever is pending.

use crate::config::EffectConfig;
use crate::error::FlowError;
use crate::field::FlowField;
use crate::particle::{Particle, TickContext};
use crate::prng::Xorshift64;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;

pub struct Effect {
    width: usize,
    height: usize,
    config: EffectConfig,
    field: FlowField,
    particles: Vec<Particle>,
    rng: Xorshift64,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl Effect {
    /// Builds the flow field and spawns `config.no_of_particles` particles on
    /// a `width x height` canvas.
    ///
    /// Fails if the config is invalid, the canvas has a zero dimension, or
    /// the canvas is smaller than one cell.
    pub fn new(width: usize, height: usize, config: &EffectConfig) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        config.validate()?;
        let field = FlowField::new(width, height, config.cell_size, config.curve, config.zoom)?;
        let mut effect = Self {
            width,
            height,
            config: *config,
            field,
            particles: Vec::new(),
            rng: Xorshift64::new(config.seed),
            pending: None,
            frames: 0,
        };
        effect.init();
        log::debug!(
            "effect {}x{}: {}x{} field, {} particles, curve {}, zoom {}",
            width,
            height,
            effect.field.cols(),
            effect.field.rows(),
            effect.particles.len(),
            config.curve,
            config.zoom
        );
        Ok(effect)
    }

    fn init(&mut self) {
        let (width, height) = (self.width, self.height);
        let rng = &mut self.rng;
        self.particles = (0..self.config.no_of_particles)
            .map(|_| Particle::spawn(width, height, rng))
            .collect();
    }

    /// One tick: clear the surface, then draw and update every particle in
    /// order, so what is drawn is each particle's state before this tick.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) {
        surface.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        let ctx = TickContext {
            field: &self.field,
            width: self.width,
            height: self.height,
        };
        for particle in &mut self.particles {
            particle.draw(surface);
            particle.update(&ctx, &mut self.rng);
        }
        self.frames += 1;
    }

    /// Renders one frame and requests the next one.
    ///
    /// A frame still pending from an earlier call is cancelled first, so at
    /// most one request is ever outstanding.
    pub fn render(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<(), FlowError> {
        self.cancel_render(scheduler);
        self.render_frame(surface);
        self.pending = Some(scheduler.request_frame()?);
        Ok(())
    }

    /// Entry point for a fired frame.
    ///
    /// Runs [`render`](Effect::render) if `handle` is the frame this effect
    /// is waiting for and returns `Ok(true)`; a stale or foreign handle is
    /// ignored with `Ok(false)`.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<bool, FlowError> {
        if self.pending != Some(handle) {
            return Ok(false);
        }
        self.pending = None;
        self.render(surface, scheduler)?;
        Ok(true)
    }

    /// Cancels the pending frame, if any.
    pub fn cancel_render(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Whether a frame request is outstanding.
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.config.cell_size
    }

    pub fn curve(&self) -> f64 {
        self.config.curve
    }

    pub fn zoom(&self) -> f64 {
        self.config.zoom
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn flow_field(&self) -> &FlowField {
        &self.field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of ticks rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

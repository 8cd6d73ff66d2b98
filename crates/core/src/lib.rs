#![deny(unsafe_code)]
//! Core of the flow-field particle animation.
//!
//! Provides the [`FlowField`] angle grid, [`Particle`] with its bounded trail,
//! the [`Effect`] engine that draws and updates every particle once per
//! frame, the [`Surface`] and [`FrameScheduler`] traits it renders through,
//! a deterministic [`FrameQueue`], the [`Player`] start/stop controller,
//! [`EffectConfig`], and the seedable [`Xorshift64`] PRNG.

pub mod color;
pub mod config;
pub mod effect;
pub mod error;
pub mod field;
pub mod params;
pub mod particle;
pub mod player;
pub mod prng;
pub mod scheduler;
pub mod surface;

pub use color::Srgb;
pub use config::EffectConfig;
pub use effect::Effect;
pub use error::FlowError;
pub use field::FlowField;
pub use particle::{Particle, Phase, TickContext};
pub use player::Player;
pub use prng::Xorshift64;
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use surface::{StrokeStyle, Surface};

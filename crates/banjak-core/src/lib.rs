//! Frame-driven animation engine for the banjak ambient effects.
//!
//! One generic engine, many visual variants: every effect is a strategy
//! `{init, step, draw}` mounted as an [`EffectInstance`] over a shared
//! cooperative [`FrameScheduler`] and an injectable [`PointerTracker`].
//! Everything is single-threaded and frame-driven; cancellation on unmount
//! is the one contract the engine enforces hard.

pub mod color;
pub mod effect;
pub mod motion;
pub mod particle;
pub mod pointer;
pub mod render;
pub mod schedule;
pub mod surface;

pub use color::Rgb;
pub use effect::{Effect, EffectInstance, StepCtx};
pub use motion::{MotionPreference, Speed};
pub use particle::{pointer_force, reflect, Flicker, Particle, ParticlePool};
pub use pointer::{PointerReader, PointerTracker};
pub use render::SurfaceWidget;
pub use schedule::{CancelToken, FrameFlow, FrameHandle, FrameScheduler, FrameTick};
pub use surface::{Cell, Surface};

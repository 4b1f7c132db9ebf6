//! Tilt-and-glow interaction for the About section photo cards.
//!
//! The crate is platform independent: it talks to the page through the
//! [`surface::Surface`] trait and animates through [`engine::AnimationEngine`].
//! `card_web` provides the browser implementations of both.

pub mod attach;
pub mod config;
pub mod controller;
pub mod ease;
pub mod engine;
pub mod error;
pub mod init;
pub mod model;
pub mod motion;
pub mod reveal;
pub mod surface;
pub mod timeline;

pub use attach::{CardBinder, DetachHandle};
pub use config::{CardsConfig, MotionConfig, RevealConfig, Selectors, Step, Timing};
pub use controller::{CardController, CardTargets, Controller};
pub use ease::Ease;
pub use engine::{AnimationEngine, Property, Props, Tween};
pub use error::{AttachError, ConfigError, ParseEaseError, SurfaceError};
pub use init::{Plugin, register_plugins};
pub use model::{CardModel, CardState, Model, PointerSample};
pub use surface::{CardEvent, EventKind, Rect, Surface};
pub use timeline::{Timeline, Values};

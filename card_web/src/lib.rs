//! Browser bindings for the About section cards.
//!
//! The host page calls `registerPlugins()` once, then `attachAbout(container)` after the
//! section renders and `handle.detach()` before it unmounts.

pub mod dom;
pub mod engine;
pub mod page;
pub mod reveal;

pub use dom::DomSurface;
pub use engine::WebEngine;
pub use page::{AboutHandle, CardsHandle, attach_about, attach_cards, init};

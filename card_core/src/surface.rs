//! The DOM-like event surface the binder installs listeners on.

use crate::error::SurfaceError;

/// A bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The six inputs a card reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerMove,
    PointerLeave,
    Click,
    TouchStart,
    TouchEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PointerEnter,
        EventKind::PointerMove,
        EventKind::PointerLeave,
        EventKind::Click,
        EventKind::TouchStart,
        EventKind::TouchEnd,
    ];

    /// DOM event type name.
    pub const fn dom_name(self) -> &'static str {
        match self {
            EventKind::PointerEnter => "mouseenter",
            EventKind::PointerMove => "mousemove",
            EventKind::PointerLeave => "mouseleave",
            EventKind::Click => "click",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchEnd => "touchend",
        }
    }

    /// Touch listeners must never delay scrolling.
    pub const fn passive(self) -> bool {
        matches!(self, EventKind::TouchStart | EventKind::TouchEnd)
    }
}

/// An input delivered to one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEvent {
    PointerEnter,
    PointerMove {
        client_x: f32,
        client_y: f32,
        /// The card's bounding box at the time of the event.
        bounds: Rect,
    },
    PointerLeave,
    Click,
    TouchStart,
    TouchEnd,
}

impl CardEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CardEvent::PointerEnter => EventKind::PointerEnter,
            CardEvent::PointerMove { .. } => EventKind::PointerMove,
            CardEvent::PointerLeave => EventKind::PointerLeave,
            CardEvent::Click => EventKind::Click,
            CardEvent::TouchStart => EventKind::TouchStart,
            CardEvent::TouchEnd => EventKind::TouchEnd,
        }
    }
}

pub type Handler = Box<dyn FnMut(CardEvent)>;

/// Element queries and listener registration.
///
/// Listeners are RAII guards: dropping one removes the registration, so a
/// binding's teardown is simply dropping its listeners.
pub trait Surface {
    type Element: Clone + PartialEq + 'static;
    type Listener;

    /// Every element under `scope` matching `selector`, in document order.
    fn query_all(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Vec<Self::Element>, SurfaceError>;

    /// First element under `scope` matching `selector`.
    fn query(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, SurfaceError>;

    /// Registers `handler` for `kind` on `element`. Passive registration is
    /// required when [`EventKind::passive`] is true.
    fn listen(&self, element: &Self::Element, kind: EventKind, handler: Handler)
    -> Self::Listener;
}

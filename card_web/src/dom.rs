//! [`Surface`] over the live DOM.

use card_core::surface::Handler;
use card_core::{CardEvent, EventKind, Rect, Surface, SurfaceError};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, MouseEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct DomSurface;

impl Surface for DomSurface {
    type Element = Element;
    type Listener = EventListener;

    fn query_all(&self, scope: &Element, selector: &str) -> Result<Vec<Element>, SurfaceError> {
        let list = scope
            .query_selector_all(selector)
            .map_err(|err| invalid_selector(selector, &err))?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn query(&self, scope: &Element, selector: &str) -> Result<Option<Element>, SurfaceError> {
        scope
            .query_selector(selector)
            .map_err(|err| invalid_selector(selector, &err))
    }

    fn listen(&self, element: &Element, kind: EventKind, mut handler: Handler) -> EventListener {
        let card = element.clone();
        EventListener::new_with_options(
            element,
            kind.dom_name(),
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: kind.passive(),
            },
            move |event: &Event| {
                if let Some(event) = card_event(kind, event, &card) {
                    handler(event);
                }
            },
        )
    }
}

fn card_event(kind: EventKind, event: &Event, card: &Element) -> Option<CardEvent> {
    Some(match kind {
        EventKind::PointerEnter => CardEvent::PointerEnter,
        EventKind::PointerMove => {
            let event = event.dyn_ref::<MouseEvent>()?;
            let rect = card.get_bounding_client_rect();
            CardEvent::PointerMove {
                client_x: event.client_x() as f32,
                client_y: event.client_y() as f32,
                bounds: Rect::new(
                    rect.left() as f32,
                    rect.top() as f32,
                    rect.width() as f32,
                    rect.height() as f32,
                ),
            }
        }
        EventKind::PointerLeave => CardEvent::PointerLeave,
        EventKind::Click => CardEvent::Click,
        EventKind::TouchStart => CardEvent::TouchStart,
        EventKind::TouchEnd => CardEvent::TouchEnd,
    })
}

fn invalid_selector(selector: &str, err: &JsValue) -> SurfaceError {
    let reason = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{err:?}"));
    SurfaceError::InvalidSelector {
        selector: selector.to_string(),
        reason,
    }
}

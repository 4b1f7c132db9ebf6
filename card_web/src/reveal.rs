use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use card_core::init;
use card_core::reveal::{self, Placement};
use card_core::{Plugin, RevealConfig, Selectors, Surface};
use tracing::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Node,
};

use crate::dom::DomSurface;
use crate::engine::WebEngine;

/// Starts the reveal when the container's top crosses the middle of the viewport.
const TRIGGER_MARGIN: &str = "0px 0px -50% 0px";

pub const WORD_CLASS: &str = "word";

/// A pending or finished About reveal. Dropping it stops observing and kills
/// the reveal's tweens.
pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    engine: Rc<WebEngine>,
    placements: Rc<[Placement<Element>]>,
    played: Rc<Cell<bool>>,
}

impl Reveal {
    pub fn played(&self) -> bool {
        self.played.get()
    }

    /// Number of words and cells the reveal animates.
    pub fn target_count(&self) -> usize {
        self.placements.len()
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
        reveal::stop(self.engine.as_ref(), &self.placements[..]);
        debug!(targets = self.placements.len(), "reveal torn down");
    }
}

pub fn install(
    container: &Element,
    engine: &Rc<WebEngine>,
    selectors: &Selectors,
    config: &RevealConfig,
) -> Result<Reveal> {
    init::require(&[Plugin::ScrollTrigger, Plugin::SplitText])?;

    let surface = DomSurface;
    let document = container
        .owner_document()
        .ok_or_else(|| anyhow!("container is not in a document"))?;
    let mut words = Vec::new();
    for title in surface.query_all(container, &selectors.title)? {
        words.extend(split_words(&document, &title)?);
    }
    let cells = surface.query_all(container, &selectors.cells)?;
    let placements: Rc<[Placement<Element>]> = reveal::about(&words, &cells, config).into();
    reveal::hide(engine.as_ref(), &placements[..]);
    debug!(words = words.len(), cells = cells.len(), "reveal armed");

    let played = Rc::new(Cell::new(false));
    let callback = {
        let engine = Rc::clone(engine);
        let placements = Rc::clone(&placements);
        let played = Rc::clone(&played);
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                if played.get() || !any_intersecting(&entries) {
                    return;
                }
                played.set(true);
                observer.disconnect();
                play(&engine, &placements[..]);
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_root_margin(TRIGGER_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(js_error)?;
    observer.observe(container);

    Ok(Reveal {
        observer,
        _callback: callback,
        engine: Rc::clone(engine),
        placements,
        played,
    })
}

fn play(engine: &WebEngine, placements: &[Placement<Element>]) {
    info!(targets = placements.len(), "playing about reveal");
    reveal::play(engine, placements);
}

fn any_intersecting(entries: &js_sys::Array) -> bool {
    entries.iter().any(|entry| {
        entry
            .dyn_into::<IntersectionObserverEntry>()
            .is_ok_and(|entry| entry.is_intersecting())
    })
}

/// Wraps every whitespace-separated word of `title` in an inline-block span
/// and returns the spans in reading order.
pub fn split_words(document: &Document, title: &Element) -> Result<Vec<Element>> {
    let mut words = Vec::new();
    split_node(document, title, &mut words)?;
    Ok(words)
}

fn split_node(document: &Document, node: &Node, words: &mut Vec<Element>) -> Result<()> {
    let children = node.child_nodes();
    let snapshot: Vec<Node> = (0..children.length())
        .filter_map(|i| children.item(i))
        .collect();

    for child in snapshot {
        if let Some(element) = child.dyn_ref::<Element>() {
            // already split by an earlier install
            if element.class_name() == WORD_CLASS {
                words.push(element.clone());
            } else {
                split_node(document, &child, words)?;
            }
            continue;
        }
        if child.node_type() != Node::TEXT_NODE {
            continue;
        }

        let text = child.text_content().unwrap_or_default();
        if text.trim().is_empty() {
            continue;
        }
        let fragment = document.create_document_fragment();
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 || text.starts_with(char::is_whitespace) {
                fragment.append_child(&document.create_text_node(" ")).map_err(js_error)?;
            }
            let span = document.create_element("span").map_err(js_error)?;
            span.set_class_name(WORD_CLASS);
            span.set_attribute("style", "display:inline-block").map_err(js_error)?;
            span.set_text_content(Some(word));
            fragment.append_child(&span).map_err(js_error)?;
            words.push(span);
        }
        if text.ends_with(char::is_whitespace) {
            fragment.append_child(&document.create_text_node(" ")).map_err(js_error)?;
        }
        node.replace_child(&fragment, &child).map_err(js_error)?;
    }
    Ok(())
}

fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!("{err:?}")
}

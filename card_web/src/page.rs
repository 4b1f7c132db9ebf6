use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use anyhow::Result;
use card_core::{CardBinder, CardsConfig, DetachHandle, Plugin, register_plugins};
use tracing::info;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::DomSurface;
use crate::engine::WebEngine;
use crate::reveal::{self, Reveal};

type Binder = CardBinder<DomSurface, WebEngine>;

// Shared page state
thread_local! {
    static ENGINE: Rc<WebEngine> = WebEngine::new();
    static BINDER: RefCell<Option<Binder>> = const { RefCell::new(None) };
}

static LOGGING: Once = Once::new();

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    LOGGING.call_once(tracing_wasm::set_as_global_default);
}

/// Registers the animation plugins. The host calls this once, before
/// attaching anything.
#[wasm_bindgen(js_name = registerPlugins)]
pub fn init() {
    register_plugins(&[Plugin::ScrollTrigger, Plugin::SplitText]);
}

/// Live card listeners for one container.
#[wasm_bindgen]
pub struct CardsHandle {
    handle: Option<DetachHandle<Element>>,
}

#[wasm_bindgen]
impl CardsHandle {
    /// Removes the listeners and stops the cards' animations. Safe to call twice.
    pub fn detach(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        BINDER.with(|binder| {
            if let Some(binder) = binder.borrow_mut().as_mut() {
                binder.detach(handle);
            }
        });
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        let Some(handle) = &self.handle else {
            return false;
        };
        BINDER.with(|binder| {
            binder
                .borrow()
                .as_ref()
                .is_some_and(|b| b.is_attached(handle.container()))
        })
    }
}

/// Cards plus the scroll reveal of the About section.
#[wasm_bindgen]
pub struct AboutHandle {
    cards: CardsHandle,
    reveal: Option<Reveal>,
}

#[wasm_bindgen]
impl AboutHandle {
    pub fn detach(&mut self) {
        self.cards.detach();
        self.reveal.take();
    }

    #[wasm_bindgen(getter)]
    pub fn revealed(&self) -> bool {
        self.reveal.as_ref().is_some_and(Reveal::played)
    }
}

/// Binds the tilt interaction to every card under `container`.
///
/// `config_json` overrides any subset of the defaults; see `CardsConfig`.
#[wasm_bindgen(js_name = attachCards)]
pub fn attach_cards(
    container: &Element,
    config_json: Option<String>,
) -> Result<CardsHandle, JsValue> {
    let config = parse_config(config_json.as_deref()).map_err(to_js)?;
    bind_cards(container, config).map_err(to_js)
}

/// Binds the cards and arms the scroll reveal of the About section.
#[wasm_bindgen(js_name = attachAbout)]
pub fn attach_about(
    container: &Element,
    config_json: Option<String>,
) -> Result<AboutHandle, JsValue> {
    let config = parse_config(config_json.as_deref()).map_err(to_js)?;
    let mut cards = bind_cards(container, config.clone()).map_err(to_js)?;
    let engine = ENGINE.with(Rc::clone);
    match reveal::install(container, &engine, &config.selectors, &config.reveal) {
        Ok(reveal) => Ok(AboutHandle {
            cards,
            reveal: Some(reveal),
        }),
        Err(err) => {
            cards.detach();
            Err(to_js(err))
        }
    }
}

fn parse_config(json: Option<&str>) -> Result<CardsConfig> {
    Ok(match json {
        Some(json) => CardsConfig::from_json(json)?,
        None => CardsConfig::default(),
    })
}

fn bind_cards(container: &Element, config: CardsConfig) -> Result<CardsHandle> {
    BINDER.with(|binder| {
        let mut binder = binder.borrow_mut();
        let binder = binder.get_or_insert_with(|| {
            info!("creating card binder");
            CardBinder::new(DomSurface, ENGINE.with(Rc::clone), CardsConfig::default())
        });
        binder.set_config(config);
        let handle = binder.attach(container)?;
        Ok(CardsHandle {
            handle: Some(handle),
        })
    })
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsError::new(&format!("{err:#}")).into()
}

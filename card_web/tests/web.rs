#![cfg(target_arch = "wasm32")]

use card_core::{RevealConfig, Selectors, Surface, SurfaceError};
use card_web::reveal::{self, WORD_CLASS, split_words};
use card_web::{DomSurface, WebEngine, attach_about, attach_cards, init};
use wasm_bindgen_test::*;
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn about_fixture() -> Element {
    let document = document();
    let container = document.create_element("div").unwrap();
    container.set_inner_html(
        r#"<h2>Where Every Moment <span>is a</span> Memory</h2>
           <div class="top-grid">
             <div><div class="noisy"></div><img alt="one"></div>
             <div><img alt="two"></div>
             <div><p>no image here</p></div>
           </div>
           <div class="bottom-grid">
             <div><img alt="three"></div>
           </div>"#,
    );
    document.body().unwrap().append_child(&container).unwrap();
    container
}

#[wasm_bindgen_test]
fn attach_and_detach_cards() {
    init();
    let container = about_fixture();

    let mut handle = attach_cards(&container, None).unwrap();
    assert!(handle.attached());

    handle.detach();
    assert!(!handle.attached());
    handle.detach();
    container.remove();
}

#[wasm_bindgen_test]
fn attach_rejects_bad_config() {
    init();
    let container = about_fixture();
    assert!(attach_cards(&container, Some(r#"{ "motion": { "lift": "up" } }"#.into())).is_err());
    container.remove();
}

#[wasm_bindgen_test]
fn resting_state_is_written_inline() {
    init();
    let container = about_fixture();
    let mut handle = attach_cards(&container, None).unwrap();

    let card = container.query_selector(".top-grid > div").unwrap().unwrap();
    let style = card.get_attribute("style").unwrap_or_default();
    assert!(style.contains("perspective(1000px)"), "{style}");
    assert!(style.contains("preserve-3d"), "{style}");

    handle.detach();
    container.remove();
}

#[wasm_bindgen_test]
fn invalid_selector_is_reported() {
    let container = about_fixture();
    let err = DomSurface.query_all(&container, ":::").unwrap_err();
    assert!(matches!(err, SurfaceError::InvalidSelector { ref selector, .. } if selector == ":::"));
    container.remove();
}

#[wasm_bindgen_test]
fn title_is_split_into_words() {
    let container = about_fixture();
    let title = container.query_selector("h2").unwrap().unwrap();

    let words = split_words(&document(), &title).unwrap();
    let text: Vec<_> = words.iter().filter_map(|w| w.text_content()).collect();
    assert_eq!(text, ["Where", "Every", "Moment", "is", "a", "Memory"]);
    assert!(words.iter().all(|w| w.class_name() == WORD_CLASS));
    assert_eq!(title.text_content().unwrap(), "Where Every Moment is a Memory");

    let again = split_words(&document(), &title).unwrap();
    assert_eq!(again.len(), words.len());
    container.remove();
}

#[wasm_bindgen_test]
fn about_hides_words_and_cells_until_triggered() {
    init();
    let container = about_fixture();
    let mut handle = attach_about(&container, None).unwrap();
    assert!(!handle.revealed());

    let words = container.query_selector_all(".word").unwrap();
    assert_eq!(words.length(), 6);
    let word = container.query_selector(".word").unwrap().unwrap();
    let style = word.get_attribute("style").unwrap_or_default();
    assert!(style.contains("opacity: 0"), "{style}");
    assert!(style.contains("translateY(100%)"), "{style}");

    let cell = container.query_selector(".bottom-grid div").unwrap().unwrap();
    let style = cell.get_attribute("style").unwrap_or_default();
    assert!(style.contains("opacity: 0"), "{style}");

    handle.detach();
    assert!(!handle.revealed());
    handle.detach();
    container.remove();
}

#[wasm_bindgen_test]
fn about_can_be_attached_again() {
    init();
    let container = about_fixture();
    let mut first = attach_about(&container, None).unwrap();
    let mut second = attach_about(&container, None).unwrap();

    assert_eq!(container.query_selector_all(".word").unwrap().length(), 6);
    first.detach();
    second.detach();
    container.remove();
}

#[wasm_bindgen_test]
fn dropping_reveal_leaves_engine_idle() {
    init();
    let container = about_fixture();
    let engine = WebEngine::new();
    let pending = reveal::install(
        &container,
        &engine,
        &Selectors::default(),
        &RevealConfig::default(),
    )
    .unwrap();

    // six words, five grid divs (the overlay counts)
    assert_eq!(pending.target_count(), 11);
    assert!(!pending.played());

    drop(pending);
    assert!(!engine.is_running());
    container.remove();
}

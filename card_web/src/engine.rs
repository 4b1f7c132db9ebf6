//! Browser engine: a [`Timeline`] ticked by `requestAnimationFrame`, writing
//! inline styles.

use std::cell::RefCell;
use std::fmt::Write;
use std::rc::{Rc, Weak};

use card_core::{AnimationEngine, Property, Props, Timeline, Tween, Values};
use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub struct WebEngine {
    timeline: RefCell<Timeline<Element>>,
    frame: RefCell<Option<AnimationFrame>>,
    this: Weak<WebEngine>,
}

impl WebEngine {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            timeline: RefCell::new(Timeline::new()),
            frame: RefCell::new(None),
            this: this.clone(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.frame.borrow().is_some()
    }

    fn sync_clock(&self) {
        self.timeline.borrow_mut().set_time(now());
    }

    fn queue_frame(&self) {
        if self.frame.borrow().is_some() {
            return;
        }
        let engine = self.this.clone();
        let handle = request_animation_frame(move |timestamp| {
            if let Some(engine) = engine.upgrade() {
                engine.frame.borrow_mut().take();
                engine.render(timestamp / 1000.0);
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn render(&self, now: f64) {
        let (active, dirty) = {
            let mut timeline = self.timeline.borrow_mut();
            let active = timeline.tick(now);
            (active, timeline.drain_dirty())
        };
        for (element, values) in dirty {
            apply_style(&element, &values);
        }
        if active {
            self.queue_frame();
        }
    }

    fn flush(&self) {
        let dirty = self.timeline.borrow_mut().drain_dirty();
        for (element, values) in dirty {
            apply_style(&element, &values);
        }
    }
}

impl AnimationEngine<Element> for WebEngine {
    fn set(&self, target: &Element, props: Props) {
        self.timeline.borrow_mut().set(target, props);
        self.flush();
    }

    fn to(&self, target: &Element, tween: Tween) {
        self.sync_clock();
        self.timeline.borrow_mut().to(target, tween);
        self.queue_frame();
    }

    fn sequence(&self, target: &Element, steps: Vec<Tween>) {
        self.sync_clock();
        self.timeline.borrow_mut().sequence(target, steps);
        self.queue_frame();
    }

    fn kill(&self, target: &Element) {
        self.timeline.borrow_mut().kill(target);
        if !self.timeline.borrow().is_active() {
            self.frame.borrow_mut().take();
        }
    }
}

/// Seconds on the same clock as `requestAnimationFrame` timestamps.
fn now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now() / 1000.0)
        .unwrap_or_default()
}

fn apply_style(element: &Element, values: &Values) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = element.style();
    let touched = |group: fn(Property) -> bool| {
        Property::ALL
            .iter()
            .any(|&p| group(p) && values.is_touched(p))
    };

    if touched(Property::is_transform) {
        let _ = style.set_property("transform", &transform(values));
        if values.is_touched(Property::Perspective) {
            let _ = style.set_property("transform-style", "preserve-3d");
        }
    }
    if touched(Property::is_filter) {
        let _ = style.set_property(
            "filter",
            &format!(
                "saturate({}) contrast({})",
                values.get(Property::Saturate),
                values.get(Property::Contrast)
            ),
        );
    }
    if values.is_touched(Property::Opacity) {
        let _ = style.set_property("opacity", &values.get(Property::Opacity).to_string());
    }
}

pub(crate) fn transform(values: &Values) -> String {
    let mut out = String::new();
    let perspective = values.get(Property::Perspective);
    if perspective > 0.0 {
        let _ = write!(out, "perspective({perspective}px) ");
    }
    let _ = write!(
        out,
        "translateY({}px) translateY({}%) rotateX({}deg) rotateY({}deg) scale({})",
        values.get(Property::Y),
        values.get(Property::YPercent),
        values.get(Property::RotateX),
        values.get(Property::RotateY),
        values.get(Property::Scale),
    );
    out
}

//! Installing and tearing down card listeners for a container.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::{CardsConfig, MotionConfig};
use crate::controller::{CardController, CardTargets, Controller};
use crate::engine::AnimationEngine;
use crate::error::AttachError;
use crate::init;
use crate::motion;
use crate::surface::{EventKind, Surface};

/// Returned by [`CardBinder::attach`]; pass it back to [`CardBinder::detach`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetachHandle<T> {
    container: T,
}

impl<T> DetachHandle<T> {
    pub fn container(&self) -> &T {
        &self.container
    }
}

struct Binding<S: Surface> {
    container: S::Element,
    cards: Vec<CardTargets<S::Element>>,
    listeners: Vec<S::Listener>,
}

/// Owns every live card binding on a surface.
///
/// Each container has at most one binding: attaching a container again first
/// tears down its previous binding, so a re-run never double registers.
pub struct CardBinder<S: Surface, E> {
    surface: S,
    engine: Rc<E>,
    config: Rc<CardsConfig>,
    motion: Rc<MotionConfig>,
    bindings: Vec<Binding<S>>,
}

impl<S, E> CardBinder<S, E>
where
    S: Surface,
    E: AnimationEngine<S::Element> + 'static,
{
    pub fn new(surface: S, engine: Rc<E>, config: CardsConfig) -> Self {
        let motion = Rc::new(config.motion.clone());
        Self {
            surface,
            engine,
            config: Rc::new(config),
            motion,
            bindings: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn engine(&self) -> &Rc<E> {
        &self.engine
    }

    pub fn config(&self) -> &CardsConfig {
        &self.config
    }

    /// Applies to bindings made after this call.
    pub fn set_config(&mut self, config: CardsConfig) {
        self.motion = Rc::new(config.motion.clone());
        self.config = Rc::new(config);
    }

    /// Binds every card in `container` that has an image.
    ///
    /// On error nothing stays attached for this container.
    pub fn attach(
        &mut self,
        container: &S::Element,
    ) -> Result<DetachHandle<S::Element>, AttachError> {
        if !init::is_initialized() {
            return Err(AttachError::NotInitialized);
        }
        if let Some(previous) = self.take_binding(container) {
            debug!(cards = previous.cards.len(), "re-attaching container");
            self.teardown(previous);
        }

        let selectors = &self.config.selectors;
        let found = self.surface.query_all(container, &selectors.card)?;
        let mut cards = Vec::with_capacity(found.len());
        let mut listeners = Vec::with_capacity(found.len() * EventKind::ALL.len());
        let mut skipped = 0usize;

        for root in found {
            let Some(image) = self.surface.query(&root, &selectors.image)? else {
                skipped += 1;
                continue;
            };
            let overlay = self.surface.query(&root, &selectors.overlay)?;
            let targets = CardTargets {
                root,
                image,
                overlay,
            };

            motion::rest(&targets, &*self.engine, &self.motion);

            let controller = Rc::new(RefCell::new(CardController::new(
                targets.clone(),
                Rc::clone(&self.engine),
                Rc::clone(&self.motion),
            )));
            for kind in EventKind::ALL {
                let controller = Rc::clone(&controller);
                listeners.push(self.surface.listen(
                    &targets.root,
                    kind,
                    Box::new(move |event| controller.borrow_mut().handle(event)),
                ));
            }
            cards.push(targets);
        }

        if skipped > 0 {
            debug!(skipped, "cards without an image were skipped");
        }
        info!(
            cards = cards.len(),
            listeners = listeners.len(),
            "cards attached"
        );

        self.bindings.push(Binding {
            container: container.clone(),
            cards,
            listeners,
        });
        Ok(DetachHandle {
            container: container.clone(),
        })
    }

    /// Removes every listener of the handle's container and stops its
    /// animations. Returns false if the container was not attached.
    pub fn detach(&mut self, handle: DetachHandle<S::Element>) -> bool {
        match self.take_binding(&handle.container) {
            Some(binding) => {
                self.teardown(binding);
                true
            }
            None => false,
        }
    }

    pub fn detach_all(&mut self) {
        for binding in std::mem::take(&mut self.bindings) {
            self.teardown(binding);
        }
    }

    pub fn is_attached(&self, container: &S::Element) -> bool {
        self.bindings.iter().any(|b| b.container == *container)
    }

    pub fn card_count(&self) -> usize {
        self.bindings.iter().map(|b| b.cards.len()).sum()
    }

    pub fn listener_count(&self) -> usize {
        self.bindings.iter().map(|b| b.listeners.len()).sum()
    }

    fn take_binding(&mut self, container: &S::Element) -> Option<Binding<S>> {
        let index = self
            .bindings
            .iter()
            .position(|b| b.container == *container)?;
        Some(self.bindings.swap_remove(index))
    }

    fn teardown(&self, binding: Binding<S>) {
        let Binding {
            cards, listeners, ..
        } = binding;
        let removed = listeners.len();
        drop(listeners);
        for card in &cards {
            for target in card.iter() {
                self.engine.kill(target);
            }
        }
        info!(cards = cards.len(), listeners = removed, "cards detached");
    }
}

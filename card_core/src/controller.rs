use std::rc::Rc;

use tracing::trace;

use crate::config::MotionConfig;
use crate::engine::AnimationEngine;
use crate::model::{CardModel, CardState, Model, PointerSample};
use crate::motion;
use crate::surface::CardEvent;

/// The elements one card animates.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTargets<T> {
    pub root: T,
    pub image: T,
    pub overlay: Option<T>,
}

impl<T> CardTargets<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.root, &self.image]
            .into_iter()
            .chain(self.overlay.as_ref())
    }
}

/// Controller trait defines how input events drive a card.
pub trait Controller {
    fn on_pointer_enter(&mut self);
    fn on_pointer_move(&mut self, sample: PointerSample);
    fn on_pointer_leave(&mut self);
    fn on_click(&mut self);
    fn on_touch_start(&mut self);
    fn on_touch_end(&mut self);

    fn handle(&mut self, event: CardEvent) {
        match event {
            CardEvent::PointerEnter => self.on_pointer_enter(),
            CardEvent::PointerMove {
                client_x,
                client_y,
                bounds,
            } => self.on_pointer_move(PointerSample::from_client(client_x, client_y, bounds)),
            CardEvent::PointerLeave => self.on_pointer_leave(),
            CardEvent::Click => self.on_click(),
            CardEvent::TouchStart => self.on_touch_start(),
            CardEvent::TouchEnd => self.on_touch_end(),
        }
    }
}

/// Concrete Controller for one card, tied to a Model.
pub struct CardController<T, E, M: Model = CardModel> {
    pub model: M,
    targets: CardTargets<T>,
    engine: Rc<E>,
    motion: Rc<MotionConfig>,
}

impl<T, E: AnimationEngine<T>> CardController<T, E> {
    pub fn new(targets: CardTargets<T>, engine: Rc<E>, motion: Rc<MotionConfig>) -> Self {
        Self::with_model(CardModel::new(), targets, engine, motion)
    }
}

impl<T, E: AnimationEngine<T>, M: Model> CardController<T, E, M> {
    pub fn with_model(
        model: M,
        targets: CardTargets<T>,
        engine: Rc<E>,
        motion: Rc<MotionConfig>,
    ) -> Self {
        Self {
            model,
            targets,
            engine,
            motion,
        }
    }

    pub fn targets(&self) -> &CardTargets<T> {
        &self.targets
    }
}

impl<T, E: AnimationEngine<T>, M: Model> Controller for CardController<T, E, M> {
    fn on_pointer_enter(&mut self) {
        trace!("card pointer enter");
        self.model.enter();
        motion::enter(&self.targets, &*self.engine, &self.motion);
    }

    fn on_pointer_move(&mut self, sample: PointerSample) {
        self.model.hover(sample);
        let (card, engine) = (&self.targets, &*self.engine);
        match self.model.card_state() {
            CardState::Pressed => motion::steer(card, engine, &self.motion, sample),
            _ => motion::follow(card, engine, &self.motion, sample),
        }
    }

    fn on_pointer_leave(&mut self) {
        trace!("card pointer leave");
        self.model.leave();
        motion::leave(&self.targets, &*self.engine, &self.motion);
    }

    fn on_click(&mut self) {
        trace!("card click");
        self.model.press();
        self.model.release();
        motion::acknowledge(&self.targets, &*self.engine, &self.motion);
    }

    fn on_touch_start(&mut self) {
        trace!("card touch start");
        self.model.press();
        motion::press(&self.targets, &*self.engine, &self.motion);
    }

    fn on_touch_end(&mut self) {
        trace!("card touch end");
        self.model.release();
        motion::release(&self.targets, &*self.engine, &self.motion);
    }
}

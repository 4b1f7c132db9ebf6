use crate::surface::Rect;

/// Where a card sits in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardState {
    Idle,
    Hovering { x: f32, y: f32 },
    Pressed,
    /// Settling after a press; `hovered` tells whether the pointer is still over the card.
    Releasing { hovered: bool },
}

/// Pointer position normalized to the card's bounding box, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const CENTER: PointerSample = PointerSample { x: 0.5, y: 0.5 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    pub fn from_client(client_x: f32, client_y: f32, bounds: Rect) -> Self {
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return Self::CENTER;
        }
        Self::new(
            (client_x - bounds.left) / bounds.width,
            (client_y - bounds.top) / bounds.height,
        )
    }
}

/// Model trait defines how a card's interaction state evolves.
pub trait Model {
    fn enter(&mut self);
    fn hover(&mut self, sample: PointerSample);
    fn press(&mut self);
    fn release(&mut self);
    fn leave(&mut self);
    fn card_state(&self) -> CardState;
}

pub struct CardModel {
    state: CardState,
    inside: bool,
}

impl Default for CardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CardModel {
    pub fn new() -> Self {
        Self {
            state: CardState::Idle,
            inside: false,
        }
    }
}

impl Model for CardModel {
    fn enter(&mut self) {
        self.inside = true;
        if self.state != CardState::Pressed {
            self.state = CardState::Hovering { x: 0.5, y: 0.5 };
        }
    }

    fn hover(&mut self, sample: PointerSample) {
        self.inside = true;
        if self.state != CardState::Pressed {
            self.state = CardState::Hovering {
                x: sample.x,
                y: sample.y,
            };
        }
    }

    fn press(&mut self) {
        self.state = CardState::Pressed;
    }

    fn release(&mut self) {
        self.state = CardState::Releasing {
            hovered: self.inside,
        };
    }

    fn leave(&mut self) {
        self.inside = false;
        self.state = CardState::Idle;
    }

    fn card_state(&self) -> CardState {
        self.state
    }
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use card_core::surface::Handler;
use card_core::{
    AnimationEngine, CardEvent, CardsConfig, EventKind, Props, Selectors, Surface, SurfaceError,
    Tween,
};

pub const CARD: &str = "card";
pub const IMAGE: &str = "img";
pub const OVERLAY: &str = "noisy";
pub const BAD_SELECTOR: &str = "!!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

struct Node {
    parent: Option<NodeId>,
    tag: &'static str,
}

struct Registration {
    id: u64,
    node: NodeId,
    kind: EventKind,
    passive: bool,
    handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct DomState {
    nodes: Vec<Node>,
    listeners: Vec<Registration>,
    next_listener: u64,
}

/// A tiny in-memory document. Selectors match a node's tag exactly.
#[derive(Clone)]
pub struct FakeDom {
    state: Rc<RefCell<DomState>>,
}

pub struct FakeListener {
    state: Weak<RefCell<DomState>>,
    id: u64,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|r| r.id != self.id);
        }
    }
}

impl FakeDom {
    pub fn new() -> Self {
        let dom = Self {
            state: Rc::new(RefCell::new(DomState::default())),
        };
        dom.state.borrow_mut().nodes.push(Node {
            parent: None,
            tag: "root",
        });
        dom
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add(&self, parent: NodeId, tag: &'static str) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(Node {
            parent: Some(parent),
            tag,
        });
        NodeId(state.nodes.len() - 1)
    }

    /// Adds a card under `parent`, returning `(card, image, overlay)`.
    pub fn card(
        &self,
        parent: NodeId,
        with_image: bool,
        with_overlay: bool,
    ) -> (NodeId, Option<NodeId>, Option<NodeId>) {
        let card = self.add(parent, CARD);
        let overlay = with_overlay.then(|| self.add(card, OVERLAY));
        let image = with_image.then(|| self.add(card, IMAGE));
        (card, image, overlay)
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listeners_on(&self, node: NodeId) -> Vec<(EventKind, bool)> {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|r| r.node == node)
            .map(|r| (r.kind, r.passive))
            .collect()
    }

    pub fn dispatch(&self, node: NodeId, event: CardEvent) {
        let handlers: Vec<_> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|r| r.node == node && r.kind == event.kind())
            .map(|r| Rc::clone(&r.handler))
            .collect();
        for handler in handlers {
            (&mut *handler.borrow_mut())(event);
        }
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let state = self.state.borrow();
        let mut current = state.nodes[node.0].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = state.nodes[parent.0].parent;
        }
        false
    }
}

impl Surface for FakeDom {
    type Element = NodeId;
    type Listener = FakeListener;

    fn query_all(&self, scope: &NodeId, selector: &str) -> Result<Vec<NodeId>, SurfaceError> {
        if selector.starts_with('!') {
            return Err(SurfaceError::InvalidSelector {
                selector: selector.to_string(),
                reason: "not a selector".to_string(),
            });
        }
        let count = self.state.borrow().nodes.len();
        Ok((0..count)
            .map(NodeId)
            .filter(|&id| self.state.borrow().nodes[id.0].tag == selector)
            .filter(|&id| self.is_descendant(id, *scope))
            .collect())
    }

    fn query(&self, scope: &NodeId, selector: &str) -> Result<Option<NodeId>, SurfaceError> {
        Ok(self.query_all(scope, selector)?.into_iter().next())
    }

    fn listen(&self, element: &NodeId, kind: EventKind, handler: Handler) -> FakeListener {
        let mut state = self.state.borrow_mut();
        state.next_listener += 1;
        let id = state.next_listener;
        state.listeners.push(Registration {
            id,
            node: *element,
            kind,
            passive: kind.passive(),
            handler: Rc::new(RefCell::new(handler)),
        });
        FakeListener {
            state: Rc::downgrade(&self.state),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Set(NodeId, Props),
    To(NodeId, Tween),
    Sequence(NodeId, Vec<Tween>),
    Kill(NodeId),
}

impl Call {
    pub fn target(&self) -> NodeId {
        match self {
            Call::Set(id, _) | Call::To(id, _) | Call::Sequence(id, _) | Call::Kill(id) => *id,
        }
    }
}

/// Records every engine call instead of animating.
#[derive(Default)]
pub struct RecordingEngine {
    calls: RefCell<Vec<Call>>,
}

impl RecordingEngine {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_for(&self, node: NodeId) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.target() == node)
            .cloned()
            .collect()
    }

    /// The last `to` tween issued for `node`.
    pub fn last_to(&self, node: NodeId) -> Option<Tween> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            Call::To(id, tween) if *id == node => Some(*tween),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl AnimationEngine<NodeId> for RecordingEngine {
    fn set(&self, target: &NodeId, props: Props) {
        self.calls.borrow_mut().push(Call::Set(*target, props));
    }

    fn to(&self, target: &NodeId, tween: Tween) {
        self.calls.borrow_mut().push(Call::To(*target, tween));
    }

    fn sequence(&self, target: &NodeId, steps: Vec<Tween>) {
        self.calls.borrow_mut().push(Call::Sequence(*target, steps));
    }

    fn kill(&self, target: &NodeId) {
        self.calls.borrow_mut().push(Call::Kill(*target));
    }
}

pub fn test_config() -> CardsConfig {
    CardsConfig {
        selectors: Selectors {
            card: CARD.to_string(),
            image: IMAGE.to_string(),
            overlay: OVERLAY.to_string(),
            ..Selectors::default()
        },
        ..CardsConfig::default()
    }
}

/// Every input a card listens for, with the pointer at the card's center.
pub fn all_events() -> Vec<CardEvent> {
    vec![
        CardEvent::PointerEnter,
        CardEvent::PointerMove {
            client_x: 50.0,
            client_y: 50.0,
            bounds: card_core::Rect::new(0.0, 0.0, 100.0, 100.0),
        },
        CardEvent::Click,
        CardEvent::TouchStart,
        CardEvent::TouchEnd,
        CardEvent::PointerLeave,
    ]
}

//! Clock-driven engine that realizes [`AnimationEngine`].
//!
//! The timeline keeps the current value of every property of every target it
//! has touched, plus a list of in-flight tracks. A track is either a single
//! `to` tween or a sequence of tweens. [`Timeline::tick`] advances all tracks
//! in creation order, so when two tracks write the same property in one
//! frame the one started later wins.
//!
//! ```
//! use std::cell::RefCell;
//! use card_core::{AnimationEngine, Ease, Property, Props, Timeline, Tween};
//!
//! let engine = RefCell::new(Timeline::new());
//! engine.to(&"img", Tween::new(Props::new().scale(2.0), 1.0, Ease::Linear));
//!
//! let mut timeline = engine.into_inner();
//! timeline.tick(0.5);
//! assert_eq!(timeline.values(&"img").unwrap().get(Property::Scale), 1.5);
//! ```

use std::cell::RefCell;

use crate::engine::{AnimationEngine, Property, Props, Tween};

/// Current property values of one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Values {
    values: [f32; Property::COUNT],
    touched: [bool; Property::COUNT],
}

impl Default for Values {
    fn default() -> Self {
        Self {
            values: Property::ALL.map(Property::rest),
            touched: [false; Property::COUNT],
        }
    }
}

impl Values {
    #[inline]
    pub fn get(&self, property: Property) -> f32 {
        self.values[property.index()]
    }

    /// Whether any animation has ever written `property`.
    #[inline]
    pub fn is_touched(&self, property: Property) -> bool {
        self.touched[property.index()]
    }

    fn write(&mut self, property: Property, value: f32) {
        self.values[property.index()] = value;
        self.touched[property.index()] = true;
    }
}

struct Slot<T> {
    target: T,
    values: Values,
    dirty: bool,
}

struct Track {
    slot: usize,
    sequence: bool,
    steps: Vec<Tween>,
    step: usize,
    /// When the current step's delay starts counting, seconds.
    step_start: f64,
    /// Start values of the current step, captured when it begins.
    from: Option<Props>,
}

impl Track {
    fn new(slot: usize, sequence: bool, steps: Vec<Tween>, now: f64) -> Self {
        Self {
            slot,
            sequence,
            steps,
            step: 0,
            step_start: now,
            from: None,
        }
    }

    /// Advances to `now`, writing into `values`. Returns false once finished.
    fn advance(&mut self, now: f64, values: &mut Values) -> bool {
        while let Some(tween) = self.steps.get(self.step) {
            let start = self.step_start + f64::from(tween.delay);
            if now < start {
                return true;
            }

            let from = *self.from.get_or_insert_with(|| {
                tween
                    .props
                    .iter()
                    .fold(Props::new(), |acc, (p, _)| acc.with(p, values.get(p)))
            });

            let duration = f64::from(tween.duration);
            let raw = if duration <= 0.0 {
                1.0
            } else {
                ((now - start) / duration).min(1.0) as f32
            };
            let k = tween.ease.sample(raw);
            for (property, to) in tween.props.iter() {
                let from = from.get(property).unwrap_or(to);
                values.write(property, from + (to - from) * k);
            }

            if raw < 1.0 {
                return true;
            }
            self.step += 1;
            self.step_start = start + duration;
            self.from = None;
        }
        false
    }
}

pub struct Timeline<T> {
    now: f64,
    slots: Vec<Slot<T>>,
    tracks: Vec<Track>,
}

impl<T: Clone + PartialEq> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq> Timeline<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            slots: Vec::new(),
            tracks: Vec::new(),
        }
    }

    /// Current clock, seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Moves the clock forward without rendering, so animations added next
    /// start at `now`. The clock never runs backwards.
    pub fn set_time(&mut self, now: f64) {
        self.now = self.now.max(now);
    }

    /// Advances every track to `now`. Returns true while anything is still animating.
    pub fn tick(&mut self, now: f64) -> bool {
        self.set_time(now);
        let now = self.now;
        let slots = &mut self.slots;
        self.tracks.retain_mut(|track| {
            let slot = &mut slots[track.slot];
            let alive = track.advance(now, &mut slot.values);
            slot.dirty = true;
            alive
        });
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn values(&self, target: &T) -> Option<Values> {
        self.position(target).map(|i| self.slots[i].values)
    }

    /// Targets written since the last drain, with their current values.
    pub fn drain_dirty(&mut self) -> Vec<(T, Values)> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.dirty)
            .map(|slot| {
                slot.dirty = false;
                (slot.target.clone(), slot.values)
            })
            .collect()
    }

    pub fn set(&mut self, target: &T, props: Props) {
        let slot = self.slot(target);
        let entry = &mut self.slots[slot];
        for (property, value) in props.iter() {
            entry.values.write(property, value);
        }
        entry.dirty = true;
    }

    pub fn to(&mut self, target: &T, tween: Tween) {
        let slot = self.slot(target);
        self.tracks.retain_mut(|track| {
            if track.slot != slot || track.sequence {
                return true;
            }
            for step in &mut track.steps {
                for (property, _) in tween.props.iter() {
                    step.props.remove(property);
                }
            }
            track.steps.iter().any(|step| !step.props.is_empty())
        });
        self.tracks.push(Track::new(slot, false, vec![tween], self.now));
    }

    pub fn sequence(&mut self, target: &T, steps: Vec<Tween>) {
        if steps.is_empty() {
            return;
        }
        let slot = self.slot(target);
        self.tracks
            .retain(|track| !(track.slot == slot && track.sequence));
        self.tracks.push(Track::new(slot, true, steps, self.now));
    }

    /// Drops the target's tracks and forgets its values.
    pub fn kill(&mut self, target: &T) {
        let Some(slot) = self.position(target) else {
            return;
        };
        self.tracks.retain(|track| track.slot != slot);
        self.slots.remove(slot);
        for track in &mut self.tracks {
            if track.slot > slot {
                track.slot -= 1;
            }
        }
    }

    fn position(&self, target: &T) -> Option<usize> {
        self.slots.iter().position(|slot| slot.target == *target)
    }

    fn slot(&mut self, target: &T) -> usize {
        if let Some(i) = self.position(target) {
            return i;
        }
        self.slots.push(Slot {
            target: target.clone(),
            values: Values::default(),
            dirty: false,
        });
        self.slots.len() - 1
    }
}

impl<T: Clone + PartialEq> AnimationEngine<T> for RefCell<Timeline<T>> {
    fn set(&self, target: &T, props: Props) {
        self.borrow_mut().set(target, props);
    }

    fn to(&self, target: &T, tween: Tween) {
        self.borrow_mut().to(target, tween);
    }

    fn sequence(&self, target: &T, steps: Vec<Tween>) {
        self.borrow_mut().sequence(target, steps);
    }

    fn kill(&self, target: &T) {
        self.borrow_mut().kill(target);
    }
}

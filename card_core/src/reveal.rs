//! The About section's scroll reveal: title words rise in one after another,
//! then the photo grid fades in, overlapping the end of the title.

use crate::config::{RevealConfig, Timing};
use crate::engine::{AnimationEngine, Props, Tween};

/// A target's hidden start values and the delayed tween that reveals it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    pub target: T,
    pub from: Props,
    pub tween: Tween,
}

/// Staggers `targets` from `from` to `to`, the first starting at `at` seconds.
pub fn stagger<T: Clone>(
    targets: &[T],
    from: Props,
    to: Props,
    timing: Timing,
    each: f32,
    at: f32,
) -> Vec<Placement<T>> {
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| Placement {
            target: target.clone(),
            from,
            tween: timing.tween(to).delay(at + each * i as f32),
        })
        .collect()
}

/// End of a staggered block starting at `at`.
fn block_end(count: usize, timing: Timing, each: f32, at: f32) -> f32 {
    match count {
        0 => at,
        n => at + each * (n - 1) as f32 + timing.duration,
    }
}

pub fn about<T: Clone>(words: &[T], cells: &[T], config: &RevealConfig) -> Vec<Placement<T>> {
    let mut placements = stagger(
        words,
        Props::new().opacity(0.0).y_percent(100.0),
        Props::new().opacity(1.0).y_percent(0.0),
        config.words,
        config.word_stagger,
        0.0,
    );
    let words_end = block_end(words.len(), config.words, config.word_stagger, 0.0);
    let cells_at = (words_end - config.cell_overlap).max(0.0);
    placements.extend(stagger(
        cells,
        Props::new().opacity(0.0),
        Props::new().opacity(1.0),
        config.cells,
        config.cell_stagger,
        cells_at,
    ));
    placements
}

/// Applies start values so nothing shows before the trigger fires.
pub fn hide<T, E: AnimationEngine<T> + ?Sized>(engine: &E, placements: &[Placement<T>]) {
    for placement in placements {
        engine.set(&placement.target, placement.from);
    }
}

pub fn play<T, E: AnimationEngine<T> + ?Sized>(engine: &E, placements: &[Placement<T>]) {
    for placement in placements {
        engine.to(&placement.target, placement.tween);
    }
}

/// Kills whatever part of the reveal is still running.
pub fn stop<T, E: AnimationEngine<T> + ?Sized>(engine: &E, placements: &[Placement<T>]) {
    for placement in placements {
        engine.kill(&placement.target);
    }
}

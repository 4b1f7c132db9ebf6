//! The animation directives behind each card input.
//!
//! These are plain functions over a card's targets; all per-card state lives
//! in [`CardController`](crate::controller::CardController).

use crate::config::{MotionConfig, Step};
use crate::controller::CardTargets;
use crate::engine::{AnimationEngine, Property, Props, Tween};
use crate::model::PointerSample;

/// Tilt for a pointer sample as `(rotate_x, rotate_y)` in degrees.
///
/// The card's top-left corner tilts to `(+max, -max)`, the center is flat.
pub fn tilt(sample: PointerSample, max_deg: f32) -> (f32, f32) {
    let rotate_y = (sample.x - 0.5) * 2.0 * max_deg;
    let rotate_x = -(sample.y - 0.5) * 2.0 * max_deg;
    (rotate_x, rotate_y)
}

pub fn rest<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig)
where
    E: AnimationEngine<T> + ?Sized,
{
    engine.set(&card.root, Props::new().perspective(m.perspective));
    engine.set(&card.image, Props::new().scale(1.0).rotate(0.0, 0.0));
    if let Some(overlay) = &card.overlay {
        engine.set(overlay, Props::new().opacity(0.0));
    }
}

pub fn enter<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig)
where
    E: AnimationEngine<T> + ?Sized,
{
    engine.to(&card.root, m.enter.tween(Props::new().y(m.lift)));
    let glow = Props::new().filter(m.hover_saturate, m.hover_contrast);
    engine.to(&card.image, m.enter.tween(glow));
}

pub fn follow<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig, sample: PointerSample)
where
    E: AnimationEngine<T> + ?Sized,
{
    let (rotate_x, rotate_y) = tilt(sample, m.max_tilt_deg);
    let props = Props::new().rotate(rotate_x, rotate_y).scale(m.hover_scale);
    engine.to(&card.image, m.follow.tween(props));
    if let Some(overlay) = &card.overlay {
        engine.to(overlay, m.follow.tween(Props::new().opacity(m.hover_overlay)));
    }
}

/// Tilt only; scale and overlay stay where the press put them.
pub fn steer<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig, sample: PointerSample)
where
    E: AnimationEngine<T> + ?Sized,
{
    let (rotate_x, rotate_y) = tilt(sample, m.max_tilt_deg);
    engine.to(&card.image, m.follow.tween(Props::new().rotate(rotate_x, rotate_y)));
}

pub fn leave<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig)
where
    E: AnimationEngine<T> + ?Sized,
{
    engine.to(&card.root, m.leave_card.tween(Props::new().y(0.0)));
    let settle = Props::new().rotate(0.0, 0.0).scale(1.0).filter(1.0, 1.0);
    engine.to(&card.image, m.leave_image.tween(settle));
    if let Some(overlay) = &card.overlay {
        engine.to(overlay, m.leave_overlay.tween(Props::new().opacity(0.0)));
    }
}

/// Click feedback: a fixed scale bounce on the image and an overlay flash.
pub fn acknowledge<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig)
where
    E: AnimationEngine<T> + ?Sized,
{
    engine.sequence(&card.image, keyframes(Property::Scale, &m.acknowledge));
    if let Some(overlay) = &card.overlay {
        engine.sequence(overlay, keyframes(Property::Opacity, &m.pulse));
    }
}

pub fn press<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig)
where
    E: AnimationEngine<T> + ?Sized,
{
    engine.to(&card.image, m.press.tween(Props::new().scale(m.press_scale)));
    if let Some(overlay) = &card.overlay {
        engine.to(overlay, m.press.tween(Props::new().opacity(m.press_overlay)));
    }
}

pub fn release<T, E>(card: &CardTargets<T>, engine: &E, m: &MotionConfig)
where
    E: AnimationEngine<T> + ?Sized,
{
    engine.to(&card.image, m.release.tween(Props::new().scale(m.release_scale)));
    if let Some(overlay) = &card.overlay {
        engine.to(overlay, m.release_overlay.tween(Props::new().opacity(0.0)));
    }
}

fn keyframes(property: Property, steps: &[Step]) -> Vec<Tween> {
    steps
        .iter()
        .map(|step| {
            Tween::new(
                Props::new().with(property, step.value),
                step.duration,
                step.ease,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_corners() {
        assert_eq!(tilt(PointerSample::new(0.0, 0.0), 7.0), (7.0, -7.0));
        assert_eq!(tilt(PointerSample::new(1.0, 1.0), 7.0), (-7.0, 7.0));
        assert_eq!(tilt(PointerSample::CENTER, 7.0), (0.0, 0.0));
    }

    #[test]
    fn test_tilt_scales_with_max() {
        let (x, y) = tilt(PointerSample::new(0.75, 0.25), 4.0);
        assert!((x - 2.0).abs() < 1e-6);
        assert!((y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_keyframes_follow_steps() {
        let frames = keyframes(Property::Scale, &MotionConfig::default().acknowledge);
        let values: Vec<_> = frames
            .iter()
            .map(|t| t.props.get(Property::Scale).unwrap())
            .collect();
        assert_eq!(values, vec![0.98, 1.06, 1.02, 1.04]);
    }
}

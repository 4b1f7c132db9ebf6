//! The animation engine contract the controller drives.

use crate::ease::Ease;

/// A numeric visual property the engine can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Vertical offset in px.
    Y,
    /// Vertical offset as a percentage of the element's own height.
    YPercent,
    /// Degrees.
    RotateX,
    /// Degrees.
    RotateY,
    Scale,
    Saturate,
    Contrast,
    Opacity,
    /// Perspective distance in px applied in front of the element's own transform.
    Perspective,
}

impl Property {
    pub const COUNT: usize = 9;

    pub const ALL: [Property; Property::COUNT] = [
        Property::Y,
        Property::YPercent,
        Property::RotateX,
        Property::RotateY,
        Property::Scale,
        Property::Saturate,
        Property::Contrast,
        Property::Opacity,
        Property::Perspective,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Value an untouched element shows for this property.
    pub const fn rest(self) -> f32 {
        match self {
            Property::Scale | Property::Saturate | Property::Contrast | Property::Opacity => 1.0,
            Property::Y
            | Property::YPercent
            | Property::RotateX
            | Property::RotateY
            | Property::Perspective => 0.0,
        }
    }

    pub const fn is_transform(self) -> bool {
        matches!(
            self,
            Property::Y
                | Property::YPercent
                | Property::RotateX
                | Property::RotateY
                | Property::Scale
                | Property::Perspective
        )
    }

    pub const fn is_filter(self) -> bool {
        matches!(self, Property::Saturate | Property::Contrast)
    }
}

/// A sparse set of property targets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Props {
    values: [Option<f32>; Property::COUNT],
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.values[property.index()] = Some(value);
        self
    }

    pub fn y(self, px: f32) -> Self {
        self.with(Property::Y, px)
    }

    pub fn y_percent(self, percent: f32) -> Self {
        self.with(Property::YPercent, percent)
    }

    pub fn rotate(self, x_deg: f32, y_deg: f32) -> Self {
        self.with(Property::RotateX, x_deg)
            .with(Property::RotateY, y_deg)
    }

    pub fn scale(self, scale: f32) -> Self {
        self.with(Property::Scale, scale)
    }

    pub fn filter(self, saturate: f32, contrast: f32) -> Self {
        self.with(Property::Saturate, saturate)
            .with(Property::Contrast, contrast)
    }

    pub fn opacity(self, opacity: f32) -> Self {
        self.with(Property::Opacity, opacity)
    }

    pub fn perspective(self, px: f32) -> Self {
        self.with(Property::Perspective, px)
    }

    #[inline]
    pub fn get(&self, property: Property) -> Option<f32> {
        self.values[property.index()]
    }

    pub fn remove(&mut self, property: Property) {
        self.values[property.index()] = None;
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn overlaps(&self, other: &Props) -> bool {
        self.iter().any(|(p, _)| other.get(p).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .iter()
            .filter_map(|&p| self.get(p).map(|v| (p, v)))
    }
}

/// One interpolation toward `props`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub props: Props,
    /// Seconds.
    pub duration: f32,
    pub ease: Ease,
    /// Seconds to wait before starting.
    pub delay: f32,
}

impl Tween {
    pub fn new(props: Props, duration: f32, ease: Ease) -> Self {
        Self {
            props,
            duration,
            ease,
            delay: 0.0,
        }
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }
}

/// The animation/timeline engine consumed by the card controller.
///
/// Methods take `&self` because one engine is shared by every card on the
/// UI thread; implementations keep their state behind interior mutability.
pub trait AnimationEngine<T> {
    /// Writes `props` immediately, without interpolation.
    fn set(&self, target: &T, props: Props);

    /// Animates toward `tween.props`.
    ///
    /// In-flight `to` tweens on the same target lose the properties this one
    /// names; their other properties keep animating.
    fn to(&self, target: &T, tween: Tween);

    /// Plays `steps` back to back.
    ///
    /// A sequence replaces any earlier sequence on the same target and is
    /// never cut short by [`AnimationEngine::to`].
    fn sequence(&self, target: &T, steps: Vec<Tween>);

    /// Drops every in-flight animation on `target`.
    fn kill(&self, target: &T);
}

//! Selectors and motion tuning, loadable from JSON.
//!
//! Every field has a default matching the shipped About page, so a host only
//! needs to pass the values it wants to change:
//!
//! ```
//! use card_core::CardsConfig;
//!
//! let config = CardsConfig::from_json(r#"{ "motion": { "max_tilt_deg": 4.0 } }"#).unwrap();
//! assert_eq!(config.motion.max_tilt_deg, 4.0);
//! assert_eq!(config.motion.hover_scale, 1.04);
//! ```

use serde::{Deserialize, Serialize};

use crate::ease::Ease;
use crate::engine::{Props, Tween};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    pub selectors: Selectors,
    pub motion: MotionConfig,
    pub reveal: RevealConfig,
}

impl CardsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CardsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selectors.validate()?;
        self.motion.validate()?;
        self.reveal.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    /// Cards within the attached container.
    pub card: String,
    /// The card's image, looked up inside each card.
    pub image: String,
    /// Optional decorative overlay inside each card.
    pub overlay: String,
    /// Title whose words are revealed on scroll.
    pub title: String,
    /// Grid cells faded in after the title.
    pub cells: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            card: ".top-grid > div, .bottom-grid > div".to_string(),
            image: "img".to_string(),
            overlay: ".noisy".to_string(),
            title: "h2".to_string(),
            cells: ".top-grid div, .bottom-grid div".to_string(),
        }
    }
}

impl Selectors {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("selectors.card", &self.card),
            ("selectors.image", &self.image),
            ("selectors.overlay", &self.overlay),
            ("selectors.title", &self.title),
            ("selectors.cells", &self.cells),
        ];
        for (field, selector) in fields {
            if selector.trim().is_empty() {
                return Err(ConfigError::invalid(field, "selector is empty"));
            }
        }
        Ok(())
    }
}

/// Duration and curve of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timing {
    /// Seconds.
    pub duration: f32,
    pub ease: Ease,
}

impl Timing {
    pub const fn new(duration: f32, ease: Ease) -> Self {
        Self { duration, ease }
    }

    pub fn tween(&self, props: Props) -> Tween {
        Tween::new(props, self.duration, self.ease)
    }
}

/// One keyframe of a fixed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub value: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Step {
    pub const fn new(value: f32, duration: f32, ease: Ease) -> Self {
        Self {
            value,
            duration,
            ease,
        }
    }
}

const POWER2_OUT: Ease = Ease::PowerOut(2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Perspective distance set on every card, px.
    pub perspective: f32,
    /// Card vertical offset while hovered, px.
    pub lift: f32,
    /// Tilt at the card edges, degrees.
    pub max_tilt_deg: f32,
    pub hover_scale: f32,
    pub hover_saturate: f32,
    pub hover_contrast: f32,
    pub hover_overlay: f32,
    pub enter: Timing,
    pub follow: Timing,
    pub leave_card: Timing,
    pub leave_image: Timing,
    pub leave_overlay: Timing,
    pub press_scale: f32,
    pub press_overlay: f32,
    pub press: Timing,
    pub release_scale: f32,
    pub release: Timing,
    pub release_overlay: Timing,
    /// Image scale keyframes played on click.
    pub acknowledge: Vec<Step>,
    /// Overlay opacity keyframes played alongside `acknowledge`.
    pub pulse: Vec<Step>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            perspective: 1000.0,
            lift: -4.0,
            max_tilt_deg: 7.0,
            hover_scale: 1.04,
            hover_saturate: 1.15,
            hover_contrast: 1.08,
            hover_overlay: 0.22,
            enter: Timing::new(0.25, POWER2_OUT),
            follow: Timing::new(0.25, POWER2_OUT),
            leave_card: Timing::new(0.3, POWER2_OUT),
            leave_image: Timing::new(0.35, Ease::PowerOut(3)),
            leave_overlay: Timing::new(0.25, POWER2_OUT),
            press_scale: 0.985,
            press_overlay: 0.18,
            press: Timing::new(0.12, POWER2_OUT),
            release_scale: 1.04,
            release: Timing::new(0.25, Ease::BackOut(2.2)),
            release_overlay: Timing::new(0.25, POWER2_OUT),
            acknowledge: vec![
                Step::new(0.98, 0.08, POWER2_OUT),
                Step::new(1.06, 0.22, Ease::BackOut(3.0)),
                Step::new(1.02, 0.18, POWER2_OUT),
                Step::new(1.04, 0.18, POWER2_OUT),
            ],
            pulse: vec![
                Step::new(0.35, 0.12, POWER2_OUT),
                Step::new(0.12, 0.25, POWER2_OUT),
                Step::new(0.0, 0.25, POWER2_OUT),
            ],
        }
    }
}

impl MotionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_tilt_deg.is_finite() && self.max_tilt_deg >= 0.0) {
            return Err(ConfigError::invalid(
                "motion.max_tilt_deg",
                format!("must be finite and non-negative, got {}", self.max_tilt_deg),
            ));
        }

        let timings = [
            ("motion.enter", self.enter),
            ("motion.follow", self.follow),
            ("motion.leave_card", self.leave_card),
            ("motion.leave_image", self.leave_image),
            ("motion.leave_overlay", self.leave_overlay),
            ("motion.press", self.press),
            ("motion.release", self.release),
            ("motion.release_overlay", self.release_overlay),
        ];
        for (field, timing) in timings {
            check_duration(field, timing.duration)?;
        }
        for step in &self.acknowledge {
            check_duration("motion.acknowledge", step.duration)?;
        }
        for step in &self.pulse {
            check_duration("motion.pulse", step.duration)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub words: Timing,
    /// Seconds between consecutive words.
    pub word_stagger: f32,
    pub cells: Timing,
    /// Seconds between consecutive cells.
    pub cell_stagger: f32,
    /// How long before the title finishes the cells start, seconds.
    pub cell_overlap: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            words: Timing::new(1.0, Ease::ExpoOut),
            word_stagger: 0.02,
            cells: Timing::new(1.0, Ease::PowerInOut(1)),
            cell_stagger: 0.04,
            cell_overlap: 0.5,
        }
    }
}

impl RevealConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_duration("reveal.words", self.words.duration)?;
        check_duration("reveal.cells", self.cells.duration)?;
        check_duration("reveal.word_stagger", self.word_stagger)?;
        check_duration("reveal.cell_stagger", self.cell_stagger)?;
        check_duration("reveal.cell_overlap", self.cell_overlap)
    }
}

fn check_duration(field: &str, seconds: f32) -> Result<(), ConfigError> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("duration must be finite and non-negative, got {seconds}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        let config = CardsConfig::from_json("{}").unwrap();
        assert_eq!(config, CardsConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = CardsConfig::from_json(
            r#"{
                "selectors": { "overlay": ".grain" },
                "motion": { "follow": { "duration": 0.1, "ease": "power3.out" } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.selectors.overlay, ".grain");
        assert_eq!(config.selectors.image, "img");
        assert_eq!(config.motion.follow, Timing::new(0.1, Ease::PowerOut(3)));
        assert_eq!(config.motion.enter, MotionConfig::default().enter);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = CardsConfig::from_json(r#"{ "motion": { "wobble": 2 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_bad_ease_rejected() {
        let err = CardsConfig::from_json(
            r#"{ "motion": { "press": { "duration": 0.1, "ease": "bounce.sideways" } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = CardsConfig::from_json(
            r#"{ "motion": { "press": { "duration": -1.0, "ease": "none" } } }"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "motion.press"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_selector_rejected() {
        let err = CardsConfig::from_json(r#"{ "selectors": { "image": " " } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { ref field, .. } if field == "selectors.image"
        ));
    }
}

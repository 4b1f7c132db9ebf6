//! Easing curves addressed by their timeline-library names
//! (`power2.out`, `back.out(3)`, `expo.out`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEaseError;

const DEFAULT_OVERSHOOT: f32 = 1.70158;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    /// `powerN.in`, N in 1..=4.
    PowerIn(u8),
    /// `powerN.out`, N in 1..=4.
    PowerOut(u8),
    /// `powerN.inOut`, N in 1..=4.
    PowerInOut(u8),
    ExpoOut,
    /// Overshoots past 1 before settling; the parameter is the overshoot strength.
    BackOut(f32),
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn(n) => t.powi(i32::from(n) + 1),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(i32::from(n) + 1),
            Ease::PowerInOut(n) => {
                let exp = i32::from(n) + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Ease::Linear => f.write_str("none"),
            Ease::PowerIn(n) => write!(f, "power{n}.in"),
            Ease::PowerOut(n) => write!(f, "power{n}.out"),
            Ease::PowerInOut(n) => write!(f, "power{n}.inOut"),
            Ease::ExpoOut => f.write_str("expo.out"),
            Ease::BackOut(s) if s == DEFAULT_OVERSHOOT => f.write_str("back.out"),
            Ease::BackOut(s) => write!(f, "back.out({s})"),
        }
    }
}

impl FromStr for Ease {
    type Err = ParseEaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "none" | "linear" => return Ok(Ease::Linear),
            "expo.out" => return Ok(Ease::ExpoOut),
            "back.out" => return Ok(Ease::BackOut(DEFAULT_OVERSHOOT)),
            _ => {}
        }

        if let Some(arg) = name
            .strip_prefix("back.out(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let strength: f32 = arg
                .trim()
                .parse()
                .map_err(|_| ParseEaseError::Parameter(name.to_string()))?;
            if !strength.is_finite() {
                return Err(ParseEaseError::Parameter(name.to_string()));
            }
            return Ok(Ease::BackOut(strength));
        }

        let Some((family, direction)) = name.split_once('.') else {
            return Err(ParseEaseError::Unknown(name.to_string()));
        };
        let power = family
            .strip_prefix("power")
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=4).contains(n))
            .ok_or_else(|| ParseEaseError::Unknown(name.to_string()))?;
        match direction {
            "in" => Ok(Ease::PowerIn(power)),
            "out" => Ok(Ease::PowerOut(power)),
            "inOut" => Ok(Ease::PowerInOut(power)),
            _ => Err(ParseEaseError::Unknown(name.to_string())),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ParseEaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

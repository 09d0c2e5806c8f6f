//! Easing table for progressive transforms
//!
//! The classic Robert Penner curves, mapping normalized progress in `[0, 1]`
//! to eased progress. Formulas keep the exact operation order of the usual
//! JavaScript definitions so results agree bit for bit in `f64`.
//!
//! Nothing here clamps `t`; values outside `[0, 1]` (or NaN) go straight
//! through the formula.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an ease name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ease '{0}' (run `bab eases` for the list)")]
pub struct ParseEaseError(pub String);

/// A named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// No easing, no acceleration
    #[default]
    Linear,
    /// Accelerating from zero velocity
    EaseInQuad,
    /// Decelerating to zero velocity
    EaseOutQuad,
    /// Acceleration until halfway, then deceleration
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
}

impl Ease {
    /// Every ease, in table order.
    pub const ALL: [Ease; 22] = [
        Ease::Linear,
        Ease::EaseInQuad,
        Ease::EaseOutQuad,
        Ease::EaseInOutQuad,
        Ease::EaseInCubic,
        Ease::EaseOutCubic,
        Ease::EaseInOutCubic,
        Ease::EaseInQuart,
        Ease::EaseOutQuart,
        Ease::EaseInOutQuart,
        Ease::EaseInQuint,
        Ease::EaseOutQuint,
        Ease::EaseInOutQuint,
        Ease::EaseInSine,
        Ease::EaseOutSine,
        Ease::EaseInOutSine,
        Ease::EaseInExpo,
        Ease::EaseOutExpo,
        Ease::EaseInOutExpo,
        Ease::EaseInCirc,
        Ease::EaseOutCirc,
        Ease::EaseInOutCirc,
    ];

    /// Evaluate the curve at `t`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Ease::Linear => t,

            Ease::EaseInQuad => t * t,
            Ease::EaseOutQuad => t * (2.0 - t),
            Ease::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }

            Ease::EaseInCubic => t * t * t,
            Ease::EaseOutCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            Ease::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }

            Ease::EaseInQuart => t * t * t * t,
            Ease::EaseOutQuart => {
                let t = t - 1.0;
                1.0 - t * t * t * t
            }
            Ease::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let t = t - 1.0;
                    1.0 - 8.0 * t * t * t * t
                }
            }

            Ease::EaseInQuint => t * t * t * t * t,
            Ease::EaseOutQuint => {
                let t = t - 1.0;
                1.0 + t * t * t * t * t
            }
            Ease::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t * t * t * t * t
                } else {
                    let t = t - 1.0;
                    1.0 + 16.0 * t * t * t * t * t
                }
            }

            Ease::EaseInSine => 1.0 - (t * (PI / 2.0)).cos(),
            Ease::EaseOutSine => (t * (PI / 2.0)).sin(),
            Ease::EaseInOutSine => -0.5 * ((PI * t).cos() - 1.0),

            // easeInExpo and easeInOutExpo start at 2^-10 and 2^-11, not 0.
            Ease::EaseInExpo => 2.0_f64.powf(10.0 * (t - 1.0)),
            Ease::EaseOutExpo => 1.0 - 2.0_f64.powf(-10.0 * t),
            Ease::EaseInOutExpo => {
                let t = t / 0.5;
                if t < 1.0 {
                    0.5 * 2.0_f64.powf(10.0 * (t - 1.0))
                } else {
                    let t = t - 1.0;
                    0.5 * (2.0 - 2.0_f64.powf(-10.0 * t))
                }
            }

            Ease::EaseInCirc => 1.0 - (1.0 - t * t).sqrt(),
            Ease::EaseOutCirc => {
                let t = t - 1.0;
                (1.0 - t * t).sqrt()
            }
            Ease::EaseInOutCirc => {
                let t = t / 0.5;
                if t < 1.0 {
                    -0.5 * ((1.0 - t * t).sqrt() - 1.0)
                } else {
                    let t = t - 2.0;
                    0.5 * ((1.0 - t * t).sqrt() + 1.0)
                }
            }
        }
    }

    /// Canonical camelCase name (`"easeInOutQuad"`).
    pub fn name(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::EaseInQuad => "easeInQuad",
            Ease::EaseOutQuad => "easeOutQuad",
            Ease::EaseInOutQuad => "easeInOutQuad",
            Ease::EaseInCubic => "easeInCubic",
            Ease::EaseOutCubic => "easeOutCubic",
            Ease::EaseInOutCubic => "easeInOutCubic",
            Ease::EaseInQuart => "easeInQuart",
            Ease::EaseOutQuart => "easeOutQuart",
            Ease::EaseInOutQuart => "easeInOutQuart",
            Ease::EaseInQuint => "easeInQuint",
            Ease::EaseOutQuint => "easeOutQuint",
            Ease::EaseInOutQuint => "easeInOutQuint",
            Ease::EaseInSine => "easeInSine",
            Ease::EaseOutSine => "easeOutSine",
            Ease::EaseInOutSine => "easeInOutSine",
            Ease::EaseInExpo => "easeInExpo",
            Ease::EaseOutExpo => "easeOutExpo",
            Ease::EaseInOutExpo => "easeInOutExpo",
            Ease::EaseInCirc => "easeInCirc",
            Ease::EaseOutCirc => "easeOutCirc",
            Ease::EaseInOutCirc => "easeInOutCirc",
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ease {
    type Err = ParseEaseError;

    /// Accepts `easeInQuad`, `ease-in-quad` and `ease_in_quad`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String =
            s.trim().chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();

        Ease::ALL
            .iter()
            .copied()
            .find(|ease| ease.name().to_lowercase() == key)
            .ok_or_else(|| ParseEaseError(s.to_string()))
    }
}

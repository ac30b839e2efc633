//! Evaluation settings.

use crate::consts::{HALF_PI, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The trigonometric mode of an evaluation. This affects the input to trigonometric functions
/// and the output from inverse trigonometric functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum TrigMode {
    /// Use radians.
    #[default]
    Radians,

    /// Use degrees.
    Degrees,
}

impl TrigMode {
    /// Converts an angle in this mode to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            TrigMode::Radians => angle,
            TrigMode::Degrees => angle * *PI / 180.0,
        }
    }

    /// Converts an angle in radians to this mode.
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            TrigMode::Radians => angle,
            TrigMode::Degrees => angle * 180.0 / *PI,
        }
    }

    /// A quarter turn, in the units of this mode.
    pub fn quarter_turn(self) -> f64 {
        match self {
            TrigMode::Radians => *HALF_PI,
            TrigMode::Degrees => 90.0,
        }
    }
}

/// Settings for evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalMode {
    /// Whether angles are in radians or degrees.
    pub trig_mode: TrigMode,

    /// Whether complex results are allowed. When `false`, any value with a nonzero imaginary
    /// part is rejected.
    pub complex_mode: bool,
}

impl Default for EvalMode {
    fn default() -> Self {
        Self { trig_mode: TrigMode::Radians, complex_mode: true }
    }
}

impl EvalMode {
    /// The default mode with degrees instead of radians.
    pub fn degrees() -> Self {
        Self { trig_mode: TrigMode::Degrees, ..Self::default() }
    }

    /// The default mode with complex results disallowed.
    pub fn real() -> Self {
        Self { complex_mode: false, ..Self::default() }
    }
}

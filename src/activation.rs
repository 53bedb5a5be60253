//! Handling of neuron activation functions.
//!
//! Layers and neurons hold an [`Activation`]. Identifiers coming from outside the crate (topology
//! descriptions, user input) are resolved with [`Activation::from_id`] or checked with
//! [`is_recognized`]. [`apply`] is the lenient form that treats an unknown identifier as the
//! identity function.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Represents which activation function to use when evaluating neurons.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Activation {
    /// Identity function. Outputs `x`.
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    Linear,
    /// Heaviside or unit step function. Outputs `1` for `x > 0`, or `0` otherwise.
    #[cfg_attr(feature = "serde", serde(rename = "step"))]
    UnitStep,
    /// Logistic function. Outputs `1 / (1 + exp(-x))`.
    #[cfg_attr(feature = "serde", serde(rename = "sigmoid"))]
    Sigmoid,
}

impl Activation {
    /// All recognized activation functions.
    pub const ALL: [Activation; 3] = [
        Activation::Linear,
        Activation::UnitStep,
        Activation::Sigmoid,
    ];

    /// Returns the `Activation` with the identifier `id`, if it is recognized.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "none" => Some(Activation::Linear),
            "step" => Some(Activation::UnitStep),
            "sigmoid" => Some(Activation::Sigmoid),
            _ => None,
        }
    }

    /// Returns the identifier of this `Activation`.
    pub fn id(&self) -> &'static str {
        match self {
            Activation::Linear => "none",
            Activation::UnitStep => "step",
            Activation::Sigmoid => "sigmoid",
        }
    }

    /// Applies the activation function to the input.
    pub fn apply<T: Float>(&self, x: T) -> T {
        match self {
            Activation::Linear => linear(x),
            Activation::UnitStep => unit_step(x),
            Activation::Sigmoid => sigmoid(x),
        }
    }
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Linear
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Activation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| ConfigError::UnknownActivation(s.to_string()))
    }
}

/// Returns whether `id` names a recognized activation function.
pub fn is_recognized(id: &str) -> bool {
    Activation::from_id(id).is_some()
}

/// Applies the activation function named `id` to `x`. Unrecognized identifiers never fail; they
/// behave as the identity function.
pub fn apply<T: Float>(id: &str, x: T) -> T {
    Activation::from_id(id).map_or(x, |activation| activation.apply(x))
}

/// Outputs `x`.
pub fn linear<T>(x: T) -> T {
    x
}

/// Heaviside/unit step function. Outputs `1` for `x > 0`, or `0` otherwise.
pub fn unit_step<T: Float>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else {
        T::zero()
    }
}

/// Logistic function. Outputs `1 / (1 + exp(-x))`.
pub fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

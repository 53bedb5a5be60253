//! Errors for construction and self-checks of neurons and layers.

use std::{error, fmt};

use crate::topology::LayerPosition;

/// The reason why a neuron, layer, or network could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An input count of zero was requested. Contains the requested count.
    InvalidInputCount(usize),
    /// A neuron count of zero was requested. Contains the requested count.
    InvalidNeuronCount(usize),
    /// The activation function identifier is not recognized. Contains the identifier.
    UnknownActivation(String),
    /// The layer kind identifier is not recognized. Contains the identifier.
    UnknownLayerKind(String),
    /// A layer description in a topology is invalid. Contains the position of the layer in the
    /// topology and the reason.
    InvalidLayer(LayerPosition, Box<ConfigError>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidInputCount(count) => {
                write!(f, "input count must be a positive integer but is {}", count)
            }
            Self::InvalidNeuronCount(count) => {
                write!(f, "neuron count must be a positive integer but is {}", count)
            }
            Self::UnknownActivation(id) => write!(f, "unknown activation function: {:?}", id),
            Self::UnknownLayerKind(id) => write!(f, "unknown layer kind: {:?}", id),
            Self::InvalidLayer(position, reason) => write!(f, "{}: {}", position, reason),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidLayer(_, reason) => Some(reason.as_ref()),
            _ => None,
        }
    }
}

/// The reason why a [`Neuron`][crate::neuron::Neuron] failed its self-check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NeuronError {
    /// The neuron has an input count of zero. Usually a neuron that was not built with
    /// [`Neuron::new`][crate::neuron::Neuron::new].
    InvalidInputCount(usize),
    /// The weight buffer has the wrong length. Contains the expected and actual lengths.
    WeightCount(usize, usize),
    /// The input buffer has the wrong length. Contains the expected and actual lengths.
    InputCount(usize, usize),
}

impl fmt::Display for NeuronError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidInputCount(count) => write!(
                f,
                "invalid neuron: input count must be a positive integer but is {}",
                count
            ),
            Self::WeightCount(expected, found) => write!(
                f,
                "invalid neuron: expected {} weights, found {}",
                expected, found
            ),
            Self::InputCount(expected, found) => write!(
                f,
                "invalid neuron: expected {} inputs, found {}",
                expected, found
            ),
        }
    }
}

impl error::Error for NeuronError {}

/// The reason why a [`Layer`][crate::layer::Layer] failed its self-check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerError {
    /// The layer has a neuron count of zero.
    InvalidNeuronCount(usize),
    /// The layer has an input count of zero.
    InvalidInputCount(usize),
    /// The number of neurons does not match the neuron count. Contains the expected and actual
    /// counts.
    NeuronCount(usize, usize),
    /// The output buffer does not have one slot per neuron. Contains the expected and actual
    /// lengths.
    OutputCount(usize, usize),
    /// The input buffer has the wrong length. Contains the expected and actual lengths.
    InputCount(usize, usize),
    /// A neuron does not take as many inputs as the layer provides. Contains the index of the
    /// neuron, the layer's input count, and the neuron's input count.
    NeuronFanIn(usize, usize, usize),
    /// A neuron failed its self-check. Contains the index of the neuron and the reason.
    Neuron(usize, NeuronError),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidNeuronCount(count) => {
                write!(f, "neuron count must be > 0 but is {}", count)
            }
            Self::InvalidInputCount(count) => {
                write!(f, "input count must be > 0 but is {}", count)
            }
            Self::NeuronCount(expected, found) => {
                write!(f, "expected {} neurons, found {}", expected, found)
            }
            Self::OutputCount(expected, found) => {
                write!(f, "expected {} outputs, found {}", expected, found)
            }
            Self::InputCount(expected, found) => {
                write!(f, "expected {} inputs, found {}", expected, found)
            }
            Self::NeuronFanIn(index, expected, found) => write!(
                f,
                "neuron {} takes {} inputs but the layer provides {}",
                index, found, expected
            ),
            Self::Neuron(index, reason) => write!(f, "neuron {}: {}", index, reason),
        }
    }
}

impl error::Error for LayerError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Neuron(_, reason) => Some(reason),
            _ => None,
        }
    }
}

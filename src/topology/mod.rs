//! Descriptions of network topologies, used to build a [`Network`][crate::Network].
//!
//! A [`Topology`] names activation functions by identifier (`"none"`, `"step"`, `"sigmoid"`), so
//! it can come from an untrusted source such as a JSON file. Identifiers and counts are checked
//! when the network is built.

#[cfg(feature = "json")]
mod error;
#[cfg(feature = "json")]
mod functions;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::ConfigError;

#[cfg(feature = "json")]
pub use error::Error;

/// The bias every neuron starts with unless a [`Topology`] overrides it.
pub const DEFAULT_INITIAL_BIAS: f64 = 0.0;

/// The position of a layer description in a [`Topology`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerPosition {
    /// The input layer.
    Input,
    /// The hidden layer with the given index.
    Hidden(usize),
    /// The output layer.
    Output,
}

impl fmt::Display for LayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input layer"),
            Self::Hidden(index) => write!(f, "hidden layer {}", index),
            Self::Output => write!(f, "output layer"),
        }
    }
}

/// Describes the input layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputSpec {
    /// The number of network inputs. The input layer has one neuron per input.
    pub num_inputs: usize,
}

impl InputSpec {
    pub fn new(num_inputs: usize) -> Self {
        Self { num_inputs }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.num_inputs < 1 {
            return Err(ConfigError::InvalidInputCount(self.num_inputs));
        }

        Ok(())
    }
}

/// Describes a hidden layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HiddenSpec {
    pub num_neurons: usize,
    /// The identifier of the activation function.
    pub activation: String,
}

impl HiddenSpec {
    pub fn new<S: Into<String>>(num_neurons: usize, activation: S) -> Self {
        Self {
            num_neurons,
            activation: activation.into(),
        }
    }

    fn resolve(&self) -> Result<Activation, ConfigError> {
        resolve(self.num_neurons, &self.activation)
    }
}

/// Describes the output layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputSpec {
    /// The number of network outputs. The output layer has one neuron per output.
    pub num_outputs: usize,
    /// The identifier of the activation function.
    pub activation: String,
}

impl OutputSpec {
    pub fn new<S: Into<String>>(num_outputs: usize, activation: S) -> Self {
        Self {
            num_outputs,
            activation: activation.into(),
        }
    }

    fn resolve(&self) -> Result<Activation, ConfigError> {
        resolve(self.num_outputs, &self.activation)
    }
}

fn resolve(num_neurons: usize, activation: &str) -> Result<Activation, ConfigError> {
    if num_neurons < 1 {
        return Err(ConfigError::InvalidNeuronCount(num_neurons));
    }

    activation.parse()
}

/// The full shape of a network: one input layer, zero or more hidden layers in order, and one
/// output layer, along with the bias that every neuron starts with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Topology {
    pub input: InputSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hidden: Vec<HiddenSpec>,
    pub output: OutputSpec,
    #[cfg_attr(feature = "serde", serde(default = "default_initial_bias"))]
    pub initial_bias: f64,
}

#[cfg(feature = "serde")]
fn default_initial_bias() -> f64 {
    DEFAULT_INITIAL_BIAS
}

/// A [`Topology`] whose counts and activation identifiers have been checked.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Resolved {
    pub num_inputs: usize,
    pub hidden: Vec<(usize, Activation)>,
    pub output: (usize, Activation),
}

impl Topology {
    /// Returns a new `Topology` using [`DEFAULT_INITIAL_BIAS`].
    pub fn new(input: InputSpec, hidden: Vec<HiddenSpec>, output: OutputSpec) -> Self {
        Self {
            input,
            hidden,
            output,
            initial_bias: DEFAULT_INITIAL_BIAS,
        }
    }

    /// Sets the bias every neuron starts with.
    pub fn with_initial_bias(mut self, initial_bias: f64) -> Self {
        self.initial_bias = initial_bias;
        self
    }

    /// Loads a topology description from a JSON string.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        functions::load_str(s)
    }

    /// Loads a topology description from a JSON file.
    #[cfg(feature = "json")]
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        functions::load_file(path)
    }

    /// Checks every layer description in order, failing on the first invalid one.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<Resolved, ConfigError> {
        self.input
            .check()
            .map_err(|e| ConfigError::InvalidLayer(LayerPosition::Input, Box::new(e)))?;

        let hidden = self
            .hidden
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.resolve()
                    .map(|activation| (spec.num_neurons, activation))
                    .map_err(|e| ConfigError::InvalidLayer(LayerPosition::Hidden(i), Box::new(e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let output = self
            .output
            .resolve()
            .map_err(|e| ConfigError::InvalidLayer(LayerPosition::Output, Box::new(e)))?;

        Ok(Resolved {
            num_inputs: self.input.num_inputs,
            hidden,
            output: (self.output.num_outputs, output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(position: LayerPosition, reason: ConfigError) -> ConfigError {
        ConfigError::InvalidLayer(position, Box::new(reason))
    }

    #[test]
    fn test_resolve() {
        let topology = Topology::new(
            InputSpec::new(3),
            vec![HiddenSpec::new(10, "sigmoid"), HiddenSpec::new(20, "step")],
            OutputSpec::new(2, "none"),
        );

        let resolved = topology.resolve().unwrap();
        assert_eq!(3, resolved.num_inputs);
        assert_eq!(
            vec![(10, Activation::Sigmoid), (20, Activation::UnitStep)],
            resolved.hidden
        );
        assert_eq!((2, Activation::Linear), resolved.output);
        assert_eq!(DEFAULT_INITIAL_BIAS, topology.initial_bias);
        assert_eq!(1.0, topology.with_initial_bias(1.0).initial_bias);
    }

    #[test]
    fn test_check_fails_fast() {
        let topology = Topology::new(InputSpec::new(0), vec![], OutputSpec::new(1, "sigmoid"));
        assert_eq!(
            Err(invalid(
                LayerPosition::Input,
                ConfigError::InvalidInputCount(0)
            )),
            topology.check()
        );

        // The first invalid hidden layer is reported even if later ones are invalid too
        let topology = Topology::new(
            InputSpec::new(1),
            vec![
                HiddenSpec::new(1, "sigmoid"),
                HiddenSpec::new(0, "sigmoid"),
                HiddenSpec::new(1, "invalid"),
            ],
            OutputSpec::new(0, "sigmoid"),
        );
        assert_eq!(
            Err(invalid(
                LayerPosition::Hidden(1),
                ConfigError::InvalidNeuronCount(0)
            )),
            topology.check()
        );

        let topology = Topology::new(
            InputSpec::new(1),
            vec![HiddenSpec::new(1, "invalid")],
            OutputSpec::new(1, "sigmoid"),
        );
        assert_eq!(
            Err(invalid(
                LayerPosition::Hidden(0),
                ConfigError::UnknownActivation("invalid".to_string())
            )),
            topology.check()
        );

        let topology = Topology::new(InputSpec::new(1), vec![], OutputSpec::new(0, "sigmoid"));
        assert_eq!(
            Err(invalid(
                LayerPosition::Output,
                ConfigError::InvalidNeuronCount(0)
            )),
            topology.check()
        );

        let topology = Topology::new(InputSpec::new(1), vec![], OutputSpec::new(1, "invalid"));
        assert_eq!(
            Err(invalid(
                LayerPosition::Output,
                ConfigError::UnknownActivation("invalid".to_string())
            )),
            topology.check()
        );
    }

    #[cfg(feature = "json")]
    fn get_file_path(file_name: &str) -> String {
        format!("{}/test_data/{}", env!("CARGO_MANIFEST_DIR"), file_name)
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_file() {
        let topology = Topology::load_file(get_file_path("topology.json")).unwrap();
        assert_eq!(
            Topology::new(
                InputSpec::new(3),
                vec![HiddenSpec::new(10, "sigmoid"), HiddenSpec::new(20, "step")],
                OutputSpec::new(2, "sigmoid"),
            ),
            topology
        );

        // Unknown identifiers load fine and are rejected when checked
        let topology = Topology::load_file(get_file_path("unknown_activation.json")).unwrap();
        assert_eq!(1.0, topology.initial_bias);
        assert_eq!(
            Err(invalid(
                LayerPosition::Hidden(0),
                ConfigError::UnknownActivation("relu".to_string())
            )),
            topology.check()
        );

        assert!(matches!(
            Topology::load_file(get_file_path("missing.json")),
            Err(Error::Io(_))
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_str() {
        let topology = Topology::from_json_str(
            r#"{"input": {"num_inputs": 1}, "output": {"num_outputs": 1, "activation": "step"}}"#,
        )
        .unwrap();
        assert!(topology.hidden.is_empty());
        assert_eq!(DEFAULT_INITIAL_BIAS, topology.initial_bias);

        assert!(matches!(
            Topology::from_json_str(r#"{"input": {"num_inputs": -1}}"#),
            Err(Error::Serde(_))
        ));
    }
}

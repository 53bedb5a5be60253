//! Layers of neurons and their kinds.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::{ConfigError, LayerError};
use crate::network::LayerId;
use crate::neuron::Neuron;

/// The position of a layer in a network's chain of layers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LayerKind {
    /// The first layer. Has no previous layer and never applies an activation function.
    Input,
    /// A layer between the input and output layers.
    Hidden,
    /// The last layer. Has no next layer, and its outputs are the network outputs.
    Output,
}

impl LayerKind {
    /// Returns the identifier of this `LayerKind`.
    pub fn id(&self) -> &'static str {
        match self {
            LayerKind::Input => "input",
            LayerKind::Hidden => "hidden",
            LayerKind::Output => "output",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(LayerKind::Input),
            "hidden" => Ok(LayerKind::Hidden),
            "output" => Ok(LayerKind::Output),
            _ => Err(ConfigError::UnknownLayerKind(s.to_string())),
        }
    }
}

/// An ordered group of neurons that all read the same inputs and share an activation function.
///
/// Layers are linked to their neighbours by [`LayerId`]s into the [`Network`][crate::Network]
/// that owns them. The links are set by the network after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    num_neurons: usize,
    num_inputs: usize,
    neurons: Vec<Neuron>,
    // Copied into every neuron before computing
    inputs: Vec<f64>,
    // One output per neuron
    outputs: Vec<f64>,
    activation: Activation,
    prev: Option<LayerId>,
    next: Option<LayerId>,
}

impl Default for Layer {
    /// Returns an empty layer that fails [`validate`][Layer::validate].
    fn default() -> Self {
        Self {
            kind: LayerKind::Hidden,
            num_neurons: 0,
            num_inputs: 0,
            neurons: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            activation: Activation::default(),
            prev: None,
            next: None,
        }
    }
}

impl Layer {
    /// Returns a new unlinked `Layer` of `num_neurons` neurons that each take `num_inputs` inputs,
    /// start with `bias`, and get their weights from `rng`.
    ///
    /// Input layers pass their inputs through unchanged, so `activation` is ignored for them and
    /// [`Activation::Linear`] is used instead.
    pub fn new<R: Rng + ?Sized>(
        kind: LayerKind,
        num_neurons: usize,
        num_inputs: usize,
        activation: Activation,
        bias: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if num_neurons < 1 {
            return Err(ConfigError::InvalidNeuronCount(num_neurons));
        }
        if num_inputs < 1 {
            return Err(ConfigError::InvalidInputCount(num_inputs));
        }

        let activation = match kind {
            LayerKind::Input => Activation::Linear,
            LayerKind::Hidden | LayerKind::Output => activation,
        };

        let neurons = (0..num_neurons)
            .map(|_| Neuron::new(num_inputs, activation, bias, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            num_neurons,
            num_inputs,
            neurons,
            inputs: vec![0.0; num_inputs],
            outputs: vec![0.0; num_neurons],
            activation,
            prev: None,
            next: None,
        })
    }

    /// Like [`Layer::new`], but takes the layer kind and activation function by identifier.
    pub fn from_ids<R: Rng + ?Sized>(
        kind: &str,
        num_neurons: usize,
        num_inputs: usize,
        activation: &str,
        bias: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        Self::new(
            kind.parse()?,
            num_neurons,
            num_inputs,
            activation.parse()?,
            bias,
            rng,
        )
    }

    /// Checks the buffer lengths of the layer and every neuron in it. The first failure is
    /// returned.
    pub fn validate(&self) -> Result<(), LayerError> {
        if self.num_neurons < 1 {
            return Err(LayerError::InvalidNeuronCount(self.num_neurons));
        }
        if self.neurons.len() != self.num_neurons {
            return Err(LayerError::NeuronCount(self.num_neurons, self.neurons.len()));
        }
        if self.outputs.len() != self.num_neurons {
            return Err(LayerError::OutputCount(self.num_neurons, self.outputs.len()));
        }
        if self.num_inputs < 1 {
            return Err(LayerError::InvalidInputCount(self.num_inputs));
        }
        if self.inputs.len() != self.num_inputs {
            return Err(LayerError::InputCount(self.num_inputs, self.inputs.len()));
        }

        for (i, neuron) in self.neurons.iter().enumerate() {
            if neuron.num_inputs() != self.num_inputs {
                return Err(LayerError::NeuronFanIn(
                    i,
                    self.num_inputs,
                    neuron.num_inputs(),
                ));
            }
            neuron
                .validate()
                .map_err(|reason| LayerError::Neuron(i, reason))?;
        }

        Ok(())
    }

    /// Computes the output of every neuron from the layer's inputs, in order.
    ///
    /// Fails without computing anything if the layer is invalid.
    pub fn compute(&mut self) -> Result<(), LayerError> {
        self.validate()?;

        let inputs = &self.inputs;
        let neurons = self.neurons.iter_mut().zip(self.outputs.iter_mut());
        for (i, (neuron, output)) in neurons.enumerate() {
            neuron.mut_inputs().copy_from_slice(inputs);
            *output = neuron
                .compute()
                .map_err(|reason| LayerError::Neuron(i, reason))?;
        }

        Ok(())
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Returns the number of neurons in this `Layer`, which is also its number of outputs.
    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    /// Returns the number of inputs this `Layer` takes.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Returns a mutable reference to the neurons of this `Layer`.
    pub fn mut_neurons(&mut self) -> &mut [Neuron] {
        &mut self.neurons
    }

    /// Returns the input buffer of this `Layer`.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Returns a mutable reference to the input buffer of this `Layer`.
    pub fn mut_inputs(&mut self) -> &mut [f64] {
        &mut self.inputs
    }

    /// Returns the outputs of the neurons from the last computation.
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Returns the activation function of this `Layer`.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Returns the previous layer in the chain, or `None` for the input layer.
    pub fn prev(&self) -> Option<LayerId> {
        self.prev
    }

    /// Returns the next layer in the chain, or `None` for the output layer.
    pub fn next(&self) -> Option<LayerId> {
        self.next
    }

    pub(crate) fn set_prev(&mut self, prev: Option<LayerId>) {
        self.prev = prev;
    }

    pub(crate) fn set_next(&mut self, next: Option<LayerId>) {
        self.next = next;
    }
}

//! A single neuron: a weighted sum of its inputs plus a bias, passed through an activation
//! function.

use rand::distributions::Standard;
use rand::Rng;

use crate::activation::Activation;
use crate::error::{ConfigError, NeuronError};

/// A neuron with one weight per input and a separate bias.
///
/// The `Default` value is an empty neuron that fails [`validate`][Self::validate]; use
/// [`Neuron::new`] or [`Neuron::from_parts`] to get a usable one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neuron {
    // The number of inputs this neuron takes
    num_inputs: usize,
    // One weight per input
    weights: Vec<f64>,
    // Scratch buffer, overwritten by the owning layer before each computation
    inputs: Vec<f64>,
    bias: f64,
    activation: Activation,
    // The weighted sum plus bias from the last computation
    output_before_activation: f64,
    output: f64,
}

impl Neuron {
    /// Returns a new `Neuron` that takes `num_inputs` inputs. Each weight is drawn uniformly from
    /// `[0, 1)` using `rng`, and the inputs start at zero.
    pub fn new<R: Rng + ?Sized>(
        num_inputs: usize,
        activation: Activation,
        bias: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if num_inputs < 1 {
            return Err(ConfigError::InvalidInputCount(num_inputs));
        }

        let weights = (0..num_inputs).map(|_| rng.sample(Standard)).collect();

        Ok(Self::with_weights(weights, bias, activation))
    }

    /// Returns a new `Neuron` with known weights, taking one input per weight.
    pub fn from_parts(
        weights: Vec<f64>,
        bias: f64,
        activation: Activation,
    ) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::InvalidInputCount(0));
        }

        Ok(Self::with_weights(weights, bias, activation))
    }

    fn with_weights(weights: Vec<f64>, bias: f64, activation: Activation) -> Self {
        let num_inputs = weights.len();

        Self {
            num_inputs,
            weights,
            inputs: vec![0.0; num_inputs],
            bias,
            activation,
            output_before_activation: 0.0,
            output: 0.0,
        }
    }

    /// Checks that the neuron takes at least one input and that its buffers have one slot per
    /// input.
    pub fn validate(&self) -> Result<(), NeuronError> {
        if self.num_inputs < 1 {
            return Err(NeuronError::InvalidInputCount(self.num_inputs));
        }
        if self.weights.len() != self.num_inputs {
            return Err(NeuronError::WeightCount(self.num_inputs, self.weights.len()));
        }
        if self.inputs.len() != self.num_inputs {
            return Err(NeuronError::InputCount(self.num_inputs, self.inputs.len()));
        }

        Ok(())
    }

    /// Computes the output of the neuron from its current inputs and returns it.
    ///
    /// Only the outputs are modified. Fails without computing anything if the neuron is invalid.
    pub fn compute(&mut self) -> Result<f64, NeuronError> {
        self.validate()?;

        let weighted_sum: f64 = self
            .inputs
            .iter()
            .zip(&self.weights)
            .map(|(input, weight)| input * weight)
            .sum();

        self.output_before_activation = self.bias + weighted_sum;
        self.output = self.activation.apply(self.output_before_activation);

        Ok(self.output)
    }

    /// Returns the number of inputs this `Neuron` takes.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Returns the weights of this `Neuron`, one per input.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns a mutable reference to the weights of this `Neuron`.
    pub fn mut_weights(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Returns the input buffer of this `Neuron`.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Returns a mutable reference to the input buffer of this `Neuron`.
    pub fn mut_inputs(&mut self) -> &mut [f64] {
        &mut self.inputs
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias;
    }

    /// Returns the activation function of this `Neuron`.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Sets the activation function of this `Neuron`.
    pub fn set_activation(&mut self, new: Activation) {
        self.activation = new;
    }

    /// Returns the weighted sum plus bias from the last computation.
    pub fn output_before_activation(&self) -> f64 {
        self.output_before_activation
    }

    /// Returns the output from the last computation.
    pub fn output(&self) -> f64 {
        self.output
    }
}

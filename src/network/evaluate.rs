//! Forward computation of networks.

use log::{trace, warn};

use super::{utils, Network, ValidationError};
use crate::layer::LayerKind;

impl Network {
    /// Runs the values in the input layer's input buffer through every layer of the network. The
    /// results are left in the output layer's output buffer (see [`outputs`][Self::outputs]).
    ///
    /// The whole chain is validated first, and nothing is computed if it is invalid.
    pub fn compute(&mut self) -> Result<(), ValidationError> {
        if let Err(e) = self.is_valid() {
            warn!("refusing to compute an invalid network: {}", e);
            return Err(e);
        }

        let max_depth = self.max_depth();
        let mut current = self.input_id();

        for depth in 0..max_depth {
            let layer = self
                .layers
                .get_mut(current.as_usize())
                .ok_or(ValidationError::DanglingLink(depth, current))?;
            layer
                .compute()
                .map_err(|reason| ValidationError::Layer(depth, current, reason))?;
            trace!(
                "computed {} layer {} at depth {}: {:?}",
                layer.kind(),
                current.as_usize(),
                depth,
                layer.outputs()
            );

            if layer.kind() == LayerKind::Output {
                return Ok(());
            }

            let next = layer.next().ok_or(ValidationError::MissingNext(depth))?;
            let (layer, next_layer) = utils::get_pair_mut(&mut self.layers, current, next)
                .ok_or(ValidationError::DanglingLink(depth, next))?;
            next_layer.mut_inputs().copy_from_slice(layer.outputs());

            current = next;
        }

        Err(ValidationError::StructuralCorruption(max_depth))
    }

    /// Copies `inputs` into the input layer, computes the network, and returns its outputs.
    ///
    /// If too many inputs are given, the extras are discarded.
    pub fn evaluate(&mut self, inputs: &[f64]) -> Result<&[f64], ValidationError> {
        let num_inputs = self.num_inputs();
        if inputs.len() < num_inputs {
            return Err(ValidationError::NotEnoughInputs(num_inputs, inputs.len()));
        }

        self.mut_inputs().copy_from_slice(&inputs[..num_inputs]);
        self.compute()?;

        Ok(self.outputs())
    }
}

//! The neural network struct.

mod error;
mod evaluate;
mod utils;

pub use error::ValidationError;

use std::ops::Index;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::Activation;
use crate::error::ConfigError;
use crate::layer::{Layer, LayerKind};
use crate::topology::{HiddenSpec, InputSpec, LayerPosition, OutputSpec, Topology};

/// The ID of a [`Layer`] in a [`Network`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

impl LayerId {
    /// Returns a new `LayerId` with the given id.
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns this `LayerId` as a `usize`.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

// NOTE: The chain is built once and its shape never changes, but the layers themselves can be
//       modified through `mut_layer`, so the chain is checked again before every computation
/// A feed-forward neural network: an input layer, any number of hidden layers, and an output
/// layer, linked into a chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    // The layers in chain order: the input layer, the hidden layers, then the output layer
    // `prev`/`next` links are IDs into this list
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a network from its layer descriptions, drawing the initial weights from `rng`.
    ///
    /// Every neuron starts with [`DEFAULT_INITIAL_BIAS`][crate::topology::DEFAULT_INITIAL_BIAS].
    /// Use [`Network::build`] to choose a different initial bias.
    pub fn new<R: Rng + ?Sized>(
        input: InputSpec,
        hidden: Vec<HiddenSpec>,
        output: OutputSpec,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        Self::build(&Topology::new(input, hidden, output), rng)
    }

    /// Builds a network with reproducible initial weights generated from `seed`.
    pub fn from_seed(topology: &Topology, seed: u64) -> Result<Self, ConfigError> {
        Self::build(topology, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a network from a [`Topology`], drawing the initial weights from `rng`.
    ///
    /// Every layer description is checked before any layer is built. The input layer has one
    /// neuron per network input, and each following layer takes one input per neuron of the layer
    /// before it.
    pub fn build<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Result<Self, ConfigError> {
        let resolved = topology.resolve()?;
        let bias = topology.initial_bias;

        let mut layers = Vec::with_capacity(resolved.hidden.len() + 2);

        let input = Layer::new(
            LayerKind::Input,
            resolved.num_inputs,
            resolved.num_inputs,
            Activation::Linear,
            bias,
            &mut *rng,
        )
        .map_err(|e| ConfigError::InvalidLayer(LayerPosition::Input, Box::new(e)))?;
        layers.push(input);

        for (i, &(num_neurons, activation)) in resolved.hidden.iter().enumerate() {
            let hidden = Layer::new(
                LayerKind::Hidden,
                num_neurons,
                last_width(&layers),
                activation,
                bias,
                &mut *rng,
            )
            .map_err(|e| ConfigError::InvalidLayer(LayerPosition::Hidden(i), Box::new(e)))?;
            push_linked(&mut layers, hidden);
        }

        let (num_outputs, activation) = resolved.output;
        let output = Layer::new(
            LayerKind::Output,
            num_outputs,
            last_width(&layers),
            activation,
            bias,
            &mut *rng,
        )
        .map_err(|e| ConfigError::InvalidLayer(LayerPosition::Output, Box::new(e)))?;
        push_linked(&mut layers, output);

        debug!(
            "built network with layer widths {:?}",
            layers.iter().map(Layer::num_neurons).collect::<Vec<_>>()
        );

        Ok(Self { layers })
    }

    /// Checks the whole chain, walking from the input layer to the output layer.
    ///
    /// At each hop the layer must pass its own [`validate`][Layer::validate], link back to the
    /// layer before it, and (unless it is the output layer) link to a next layer that takes one
    /// input per output. The output layer must be reached after exactly one hop per hidden layer,
    /// plus one.
    pub fn is_valid(&self) -> Result<(), ValidationError> {
        self.check_chain(self.max_depth())
    }

    fn check_chain(&self, max_depth: usize) -> Result<(), ValidationError> {
        let mut prev = None;
        let mut current = self.input_id();

        for depth in 0..max_depth {
            let layer = self
                .layer(current)
                .ok_or(ValidationError::DanglingLink(depth, current))?;

            layer
                .validate()
                .map_err(|reason| ValidationError::Layer(depth, current, reason))?;

            let kind = layer.kind();
            if (depth == 0) != (kind == LayerKind::Input) {
                return Err(ValidationError::UnexpectedKind(depth, kind));
            }
            if layer.prev() != prev {
                return Err(ValidationError::PrevMismatch(depth));
            }

            if kind == LayerKind::Output {
                if current != self.output_id() {
                    return Err(ValidationError::UnexpectedKind(depth, kind));
                }

                let expected_hops = self.layers.len() - 1;
                if depth != expected_hops {
                    return Err(ValidationError::ChainLength(expected_hops, depth));
                }

                return Ok(());
            }

            let next = layer.next().ok_or(ValidationError::MissingNext(depth))?;
            let next_layer = self
                .layer(next)
                .ok_or(ValidationError::DanglingLink(depth, next))?;

            if layer.outputs().len() != next_layer.num_inputs() {
                return Err(ValidationError::WidthMismatch(
                    depth,
                    layer.outputs().len(),
                    next_layer.num_inputs(),
                ));
            }

            prev = Some(current);
            current = next;
        }

        Err(ValidationError::StructuralCorruption(max_depth))
    }

    /// The most layers a walk from the input layer may visit. A valid chain visits each layer
    /// exactly once.
    fn max_depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns the number of inputs this `Network` takes.
    pub fn num_inputs(&self) -> usize {
        self.input_layer().num_inputs()
    }

    /// Returns the number of outputs this `Network` produces.
    pub fn num_outputs(&self) -> usize {
        self.output_layer().num_neurons()
    }

    /// Returns a mutable reference to the input buffer of the input layer. Values written here
    /// are used by the next call to [`compute`][Self::compute].
    pub fn mut_inputs(&mut self) -> &mut [f64] {
        let id = self.input_id();
        self.layers[id.as_usize()].mut_inputs()
    }

    /// Returns the outputs of the output layer from the last computation.
    pub fn outputs(&self) -> &[f64] {
        self.output_layer().outputs()
    }

    /// Returns the ID of the input layer.
    pub fn input_id(&self) -> LayerId {
        LayerId(0)
    }

    /// Returns the ID of the output layer.
    pub fn output_id(&self) -> LayerId {
        LayerId(self.layers.len() - 1)
    }

    /// Returns the IDs of the hidden layers in order.
    pub fn hidden_ids(&self) -> impl Iterator<Item = LayerId> {
        (1..self.layers.len() - 1).map(LayerId)
    }

    pub fn input_layer(&self) -> &Layer {
        &self[self.input_id()]
    }

    /// Returns the hidden layers in order.
    pub fn hidden_layers(&self) -> &[Layer] {
        &self.layers[1..self.layers.len() - 1]
    }

    pub fn output_layer(&self) -> &Layer {
        &self[self.output_id()]
    }

    /// Returns every layer in chain order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns a reference to the layer with the given ID if it exists.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.as_usize())
    }

    /// Returns a mutable reference to the layer with the given ID if it exists.
    ///
    /// The links between layers cannot be changed through this reference.
    pub fn mut_layer(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.as_usize())
    }
}

impl Index<LayerId> for Network {
    type Output = Layer;

    fn index(&self, id: LayerId) -> &Self::Output {
        &self.layers[id.as_usize()]
    }
}

/// Returns the number of outputs of the last layer in `layers`.
fn last_width(layers: &[Layer]) -> usize {
    layers.last().map_or(0, Layer::num_neurons)
}

/// Appends `layer` to the chain, linking it to the current last layer in both directions.
fn push_linked(layers: &mut Vec<Layer>, mut layer: Layer) {
    let id = LayerId(layers.len());

    if let Some(last) = layers.last_mut() {
        last.set_next(Some(id));
        layer.set_prev(Some(LayerId(id.as_usize() - 1)));
    }

    layers.push(layer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayerError;

    fn invalid(position: LayerPosition, reason: ConfigError) -> ConfigError {
        ConfigError::InvalidLayer(position, Box::new(reason))
    }

    fn build(input: usize, hidden: &[(usize, &str)], output: (usize, &str)) -> Network {
        try_build(input, hidden, output).unwrap()
    }

    fn try_build(
        input: usize,
        hidden: &[(usize, &str)],
        output: (usize, &str),
    ) -> Result<Network, ConfigError> {
        let topology = Topology::new(
            InputSpec::new(input),
            hidden
                .iter()
                .map(|&(n, activation)| HiddenSpec::new(n, activation))
                .collect(),
            OutputSpec::new(output.0, output.1),
        );
        Network::from_seed(&topology, 0)
    }

    // Follows `next` links from the input layer for `hops` hops
    fn walk_forward(network: &Network, hops: usize) -> &Layer {
        let mut layer = network.input_layer();
        for _ in 0..hops {
            layer = &network[layer.next().unwrap()];
        }
        layer
    }

    // Follows `prev` links from the output layer for `hops` hops
    fn walk_backward(network: &Network, hops: usize) -> &Layer {
        let mut layer = network.output_layer();
        for _ in 0..hops {
            layer = &network[layer.prev().unwrap()];
        }
        layer
    }

    #[test]
    fn test_build_invalid() {
        assert_eq!(
            Err(invalid(
                LayerPosition::Input,
                ConfigError::InvalidInputCount(0)
            )),
            try_build(0, &[], (1, "sigmoid"))
        );
        assert_eq!(
            Err(invalid(
                LayerPosition::Hidden(0),
                ConfigError::InvalidNeuronCount(0)
            )),
            try_build(1, &[(0, "sigmoid")], (1, "sigmoid"))
        );
        assert_eq!(
            Err(invalid(
                LayerPosition::Hidden(0),
                ConfigError::UnknownActivation("invalid".to_string())
            )),
            try_build(1, &[(1, "invalid")], (1, "sigmoid"))
        );
        assert_eq!(
            Err(invalid(
                LayerPosition::Output,
                ConfigError::InvalidNeuronCount(0)
            )),
            try_build(1, &[], (0, "sigmoid"))
        );
        assert_eq!(
            Err(invalid(
                LayerPosition::Output,
                ConfigError::UnknownActivation("invalid".to_string())
            )),
            try_build(1, &[], (1, "invalid"))
        );
    }

    #[test]
    fn test_build() {
        let network = build(3, &[(10, "sigmoid"), (20, "step")], (2, "sigmoid"));
        assert_eq!(Ok(()), network.is_valid());
        assert_eq!(4, network.layers().len());
        assert_eq!(3, network.num_inputs());
        assert_eq!(2, network.num_outputs());

        let input = network.input_layer();
        assert_eq!(LayerKind::Input, input.kind());
        assert_eq!(3, input.neurons().len());
        assert_eq!(3, input.inputs().len());
        assert_eq!(Activation::Linear, input.activation());

        let hidden = network.hidden_layers();
        assert_eq!(2, hidden.len());
        assert_eq!(10, hidden[0].neurons().len());
        assert_eq!(3, hidden[0].inputs().len());
        assert_eq!(Activation::Sigmoid, hidden[0].activation());
        assert_eq!(20, hidden[1].neurons().len());
        assert_eq!(10, hidden[1].inputs().len());
        assert_eq!(Activation::UnitStep, hidden[1].activation());

        let output = network.output_layer();
        assert_eq!(LayerKind::Output, output.kind());
        assert_eq!(2, output.neurons().len());
        assert_eq!(20, output.inputs().len());
        assert_eq!(Activation::Sigmoid, output.activation());

        assert_eq!(None, input.prev());
        assert_eq!(None, output.next());
        assert_eq!(LayerKind::Output, walk_forward(&network, 3).kind());
        assert_eq!(LayerKind::Input, walk_backward(&network, 3).kind());
        assert_eq!(
            vec![LayerId::new(1), LayerId::new(2)],
            network.hidden_ids().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_build_no_hidden() {
        let network = build(1, &[], (2, "sigmoid"));
        assert_eq!(Ok(()), network.is_valid());
        assert!(network.hidden_layers().is_empty());
        assert_eq!(0, network.hidden_ids().count());
        assert_eq!(1, network.output_layer().inputs().len());
        assert_eq!(LayerKind::Output, walk_forward(&network, 1).kind());
        assert_eq!(LayerKind::Input, walk_backward(&network, 1).kind());
    }

    #[test]
    fn test_build_initial_bias() {
        let topology = Topology::new(
            InputSpec::new(2),
            vec![HiddenSpec::new(3, "step")],
            OutputSpec::new(1, "none"),
        );
        let network = Network::from_seed(&topology.clone().with_initial_bias(1.0), 0).unwrap();
        assert!(network
            .layers()
            .iter()
            .flat_map(Layer::neurons)
            .all(|n| n.bias() == 1.0));

        let network = Network::from_seed(&topology, 0).unwrap();
        assert!(network
            .layers()
            .iter()
            .flat_map(Layer::neurons)
            .all(|n| n.bias() == crate::topology::DEFAULT_INITIAL_BIAS));
    }

    fn valid_network() -> Network {
        build(3, &[(10, "sigmoid"), (20, "step")], (2, "sigmoid"))
    }

    #[test]
    fn test_invalid_layer() {
        let mut network = valid_network();
        network.layers[2].mut_neurons()[4] = Default::default();
        assert_eq!(
            Err(ValidationError::Layer(
                2,
                LayerId::new(2),
                LayerError::NeuronFanIn(4, 10, 0)
            )),
            network.is_valid()
        );
    }

    #[test]
    fn test_dangling_next() {
        let mut network = valid_network();
        network.layers[1].set_next(None);
        assert_eq!(Err(ValidationError::MissingNext(1)), network.is_valid());

        let mut network = valid_network();
        network.layers[1].set_next(Some(LayerId::new(99)));
        assert_eq!(
            Err(ValidationError::DanglingLink(1, LayerId::new(99))),
            network.is_valid()
        );
        assert!(network.compute().is_err());
    }

    #[test]
    fn test_prev_mismatch() {
        let mut network = valid_network();
        network.layers[2].set_prev(None);
        assert_eq!(Err(ValidationError::PrevMismatch(2)), network.is_valid());
    }

    #[test]
    fn test_cycle() {
        // hidden 1 -> hidden 0
        let mut network = valid_network();
        network.layers[2].set_next(Some(LayerId::new(1)));
        assert_eq!(
            Err(ValidationError::WidthMismatch(2, 20, 3)),
            network.is_valid()
        );

        // A self-loop on a layer whose widths line up is caught by the back link
        let mut network = build(2, &[(2, "none"), (2, "none")], (2, "none"));
        network.layers[1].set_next(Some(LayerId::new(1)));
        assert_eq!(Err(ValidationError::PrevMismatch(2)), network.is_valid());
        assert_eq!(Err(ValidationError::PrevMismatch(2)), network.compute());

        // input -> hidden 1 -> hidden 0 -> hidden 1 -> ...
        let mut network = build(2, &[(2, "none"), (2, "none")], (2, "none"));
        network.layers[0].set_next(Some(LayerId::new(2)));
        network.layers[2].set_prev(Some(LayerId::new(0)));
        network.layers[2].set_next(Some(LayerId::new(1)));
        network.layers[1].set_prev(Some(LayerId::new(2)));
        assert_eq!(Err(ValidationError::PrevMismatch(3)), network.is_valid());
    }

    #[test]
    fn test_skipped_layer() {
        // The input layer links straight to the output layer, skipping the hidden layer
        let mut network = build(2, &[(2, "none")], (2, "none"));
        network.layers[0].set_next(Some(LayerId::new(2)));
        network.layers[2].set_prev(Some(LayerId::new(0)));
        assert_eq!(Err(ValidationError::ChainLength(2, 1)), network.is_valid());
    }

    #[test]
    fn test_structural_corruption() {
        let network = valid_network();
        assert_eq!(Ok(()), network.check_chain(4));
        assert_eq!(
            Err(ValidationError::StructuralCorruption(3)),
            network.check_chain(3)
        );
        assert_eq!(
            Err(ValidationError::StructuralCorruption(0)),
            network.check_chain(0)
        );
    }
}

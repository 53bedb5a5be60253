//! A small feed-forward neural network evaluator.
//!
//! A [`Network`] is a chain of layers: one input layer, zero or more hidden layers, and one output
//! layer. Each layer holds neurons that compute a weighted sum of the layer's inputs plus a bias,
//! then apply the layer's activation function. Weights are drawn once when the network is built
//! and are never trained.
//!
//! The chain is checked before every computation, and a broken or cyclic chain is reported as a
//! [`ValidationError`] instead of looping or panicking.
//!
//! # Examples
//!
//! ```
//! use ffnet::topology::{HiddenSpec, InputSpec, OutputSpec, Topology};
//! use ffnet::Network;
//!
//! let topology = Topology::new(
//!     InputSpec::new(3),
//!     vec![HiddenSpec::new(10, "sigmoid"), HiddenSpec::new(20, "step")],
//!     OutputSpec::new(2, "sigmoid"),
//! );
//!
//! // Seed the initial weights so the outputs are reproducible
//! let mut network = Network::from_seed(&topology, 42).unwrap();
//!
//! // Get the output of the network with the specified inputs
//! let outputs = network.evaluate(&[0.003, 0.008, 0.002]).unwrap();
//! assert_eq!(2, outputs.len());
//!
//! // Or write the inputs in place and read the outputs afterwards
//! network.mut_inputs().copy_from_slice(&[0.1, 0.2, 0.3]);
//! network.compute().unwrap();
//! assert!(network.outputs().iter().all(|&x| 0.0 < x && x < 1.0));
//! ```

// A network is not safe to compute from several threads at once because every layer's buffers are
// overwritten in place. Clone the network or put it behind a lock instead.

pub mod activation;
pub mod error;
pub mod layer;
pub mod network;
pub mod neuron;
pub mod topology;

pub use self::activation::Activation;
pub use self::error::ConfigError;
pub use self::network::{LayerId, Network, ValidationError};
pub use self::topology::Topology;

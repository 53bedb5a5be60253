//! The error type for validation and computation of networks.

use std::{error, fmt};

use super::LayerId;
use crate::error::LayerError;
use crate::layer::LayerKind;

/// The reason why a network's chain of layers is invalid.
///
/// Depths count the hops from the input layer, which is at depth zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A layer failed its self-check. Contains the depth and ID of the layer and the reason.
    Layer(usize, LayerId, LayerError),
    /// A layer's kind does not match its position in the chain. Contains the depth and kind of
    /// the layer.
    UnexpectedKind(usize, LayerKind),
    /// A layer does not link back to the layer before it. Contains the depth of the layer.
    PrevMismatch(usize),
    /// A layer before the output layer has no next layer. Contains the depth of the layer.
    MissingNext(usize),
    /// A link points to a layer that does not exist in the network. Contains the depth of the
    /// linking layer and the invalid ID.
    DanglingLink(usize, LayerId),
    /// A layer's output count differs from the next layer's input count. Contains the depth of the
    /// layer, its output count, and the next layer's input count.
    WidthMismatch(usize, usize, usize),
    /// The output layer was reached after the wrong number of hops. Contains the expected and
    /// actual number of hops.
    ChainLength(usize, usize),
    /// The output layer was not reached within the depth bound, so the chain is cyclic or
    /// unterminated. Contains the depth bound.
    StructuralCorruption(usize),
    /// Fewer inputs were given than the network takes. Contains the expected and actual counts.
    NotEnoughInputs(usize, usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Layer(depth, id, reason) => write!(
                f,
                "at depth {}, layer {} is invalid: {}",
                depth,
                id.as_usize(),
                reason
            ),
            Self::UnexpectedKind(depth, kind) => {
                write!(f, "at depth {}, unexpected {} layer", depth, kind)
            }
            Self::PrevMismatch(depth) => write!(
                f,
                "at depth {}, layer does not link back to its predecessor",
                depth
            ),
            Self::MissingNext(depth) => write!(
                f,
                "at depth {}, no next layer found before the output layer",
                depth
            ),
            Self::DanglingLink(depth, id) => write!(
                f,
                "at depth {}, link points to missing layer {}",
                depth,
                id.as_usize()
            ),
            Self::WidthMismatch(depth, outputs, next_inputs) => write!(
                f,
                "at depth {}, layer has {} outputs but the next layer takes {} inputs",
                depth, outputs, next_inputs
            ),
            Self::ChainLength(expected, found) => write!(
                f,
                "output layer reached after {} hops, expected {}",
                found, expected
            ),
            Self::StructuralCorruption(max_depth) => write!(
                f,
                "output layer not reached within {} layers, the chain is cyclic or unterminated",
                max_depth
            ),
            Self::NotEnoughInputs(expected, found) => {
                write!(f, "expected {} inputs, found {}", expected, found)
            }
        }
    }
}

impl error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Layer(_, _, reason) => Some(reason),
            _ => None,
        }
    }
}

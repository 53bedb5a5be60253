//! Utilities for networks.

use super::LayerId;
use crate::layer::Layer;

/// Returns mutable references to two distinct layers, or `None` if either ID is out of bounds or
/// both IDs refer to the same layer.
pub fn get_pair_mut(
    layers: &mut [Layer],
    a: LayerId,
    b: LayerId,
) -> Option<(&mut Layer, &mut Layer)> {
    let (a, b) = (a.as_usize(), b.as_usize());

    if a == b || a >= layers.len() || b >= layers.len() {
        return None;
    }

    if a < b {
        let (head, tail) = layers.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = layers.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}

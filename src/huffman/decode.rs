use bitvec::prelude::*;

use super::{
    HuffmanError, Symbol,
    tree::{HuffmanTree, Node},
};

/// Walks `tree` bit by bit, emitting a byte at every leaf until the end code is read.
///
/// Bits after the end code, padding included, are ignored. A single-leaf tree consumes
/// one bit per symbol.
///
/// # Errors
///
/// Returns [`HuffmanError::MissingSentinel`] if the input runs out before the end code.
pub fn decode(data: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>, HuffmanError> {
    let root = tree.root();
    let mut out = Vec::new();
    let mut cursor = root;

    for bit in data.view_bits::<Msb0>().iter().by_vals() {
        cursor = match cursor {
            Node::Internal { lighter, heavier, .. } => {
                if bit {
                    &**heavier
                } else {
                    &**lighter
                }
            }
            leaf @ Node::Leaf { .. } => leaf,
        };

        if let Node::Leaf { symbol, .. } = cursor {
            match symbol {
                Symbol::End => {
                    if_tracing! {{
                        tracing::debug!(target = "huffman", input_len = data.len(), output_len = out.len(), "end code reached");
                    }}
                    return Ok(out);
                }
                Symbol::Byte(b) => out.push(*b),
            }
            cursor = root;
        }
    }

    if_tracing! {{
        tracing::warn!(target = "huffman", input_len = data.len(), decoded = out.len(), "input exhausted before end code");
    }}
    Err(HuffmanError::MissingSentinel)
}

use core::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    compressor::{Compressor, CompressorExt, DecompressionError, Result},
    format,
};

pub mod decode;
pub mod encode;
pub mod frequency;
pub mod queue;
pub mod table;
pub mod tree;

use self::{frequency::FrequencyTable, queue::MinQueue, table::CodeTable, tree::HuffmanTree};

/// One entry of the coding alphabet: a byte value or the end-of-stream marker.
///
/// `End` sorts after every byte, so ordered collections list it last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Byte(u8),
    End,
}

impl Symbol {
    /// Number of distinct symbols: every byte plus the end marker.
    pub const ALPHABET_SIZE: usize = 257;

    /// Wire value used by the binary codebook. `End` is 256.
    pub const fn to_u16(self) -> u16 {
        match self {
            Symbol::Byte(b) => b as u16,
            Symbol::End => 256,
        }
    }

    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0..=255 => Some(Symbol::Byte(value as u8)),
            256 => Some(Symbol::End),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "{:?} (0x{:02x})", *b as char, b),
            Symbol::Byte(b) => write!(f, "0x{:02x}", b),
            Symbol::End => f.write_str("<end>"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    #[error("cannot extract a node from an empty priority queue")]
    EmptyQueue,

    #[error("cannot derive codes from an empty tree")]
    EmptyTree,

    #[error("symbol {0} has no code in the code table")]
    UnknownSymbol(Symbol),

    #[error("compressed stream ended before the end-of-stream code was decoded")]
    MissingSentinel,

    #[error("invalid code table: {0}")]
    InvalidCodebook(String),

    #[error("malformed container: {0}")]
    MalformedContainer(String),
}

/// Compresses `data` into a headerless payload and the code table needed to read it back.
///
/// # Errors
///
/// Only fails if an internal invariant is broken; a table derived from `data` always covers it.
pub fn compress(data: &[u8]) -> Result<(CodeTable, Vec<u8>), HuffmanError> {
    if_tracing! {{
        tracing::debug!(target = "huffman", input_len = data.len(), "compress start");
    }}

    let frequencies = FrequencyTable::scan(data);
    let tree = HuffmanTree::build(MinQueue::from_frequencies(&frequencies))?;
    let table = CodeTable::generate(&tree);
    let payload = encode::encode(data, &table)?;

    if_tracing! {{
        tracing::info!(
            target = "huffman",
            input_len = data.len(),
            output_len = payload.len(),
            symbols = table.len(),
            "compress complete"
        );
    }}
    Ok((table, payload))
}

/// Decompresses a payload produced by [`compress`] using its code table.
///
/// # Errors
///
/// Fails if the table cannot be turned into a decode tree, or if the payload runs out
/// before the end-of-stream code.
pub fn decompress(table: &CodeTable, data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    let tree = HuffmanTree::from_code_table(table)?;
    decompress_with_tree(&tree, data)
}

/// Decompresses a payload against a tree that is still held in memory.
pub fn decompress_with_tree(tree: &HuffmanTree, data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    if_tracing! {{
        tracing::debug!(target = "huffman", input_len = data.len(), "decompress start");
    }}

    let result = decode::decode(data, tree);

    if_tracing! {{
        match result {
            Ok(ref out) => tracing::info!(target = "huffman", input_len = data.len(), output_len = out.len(), "decompress complete"),
            Err(ref err) => tracing::warn!(target = "huffman", error = %err, "decompress failed"),
        }
    }}
    result
}

/// Huffman coding as a [`Compressor`]: output is a [`format::wrap`] container, so the
/// code table travels with the payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Vec<u8> {
        self.huffman_encode(data)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.huffman_decode(data)
            .map_err(|e| anyhow!(DecompressionError::InvalidInput(e.to_string())))
    }

    fn compressor_name(&self) -> String {
        "Huffman Coding".into()
    }
}

impl CompressorExt for HuffmanCoding {
    fn format_validity_check(&mut self, data: &[u8]) -> Result<bool> {
        Ok(format::is_container(data))
    }
}

impl HuffmanCoding {
    pub fn huffman_encode(&mut self, data: &[u8]) -> Vec<u8> {
        // the table is derived from `data` itself: every byte and the end marker have a code,
        // and no generated code can outgrow a length byte.
        compress(data)
            .and_then(|(table, payload)| format::wrap(&table, &payload))
            .unwrap_or_else(|e| panic!("huffman encoder could not encode its own input: {}", e))
    }

    pub fn huffman_decode(&mut self, data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
        let (table, payload) = format::unwrap(data)?;
        decompress(&table, payload)
    }
}

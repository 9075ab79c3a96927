//! Static Huffman coding over bytes.
//!
//! The input is scanned once to count byte frequencies plus a single
//! end-of-stream [`Symbol::End`], a prefix-free code is derived from those
//! weights, and the input is packed MSB-first into a payload that carries no
//! header. The code table travels separately, either as a side file
//! ([`format::CodebookFile`]) or inside a [`format::wrap`] container.
//!
//! ```
//! let (codes, payload) = huffpack::compress(b"aaab")?;
//! assert_eq!(payload, [0xE2]);
//! assert_eq!(huffpack::decompress(&codes, &payload)?, b"aaab");
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

pub mod compressor;
pub mod format;
pub mod huffman;

#[cfg(test)]
mod tests;

pub use compressor::{Compressor, CompressorExt, DecompressionError, RoundTripTestResult};
pub use huffman::{
    HuffmanCoding, HuffmanError, Symbol, compress, decompress, decompress_with_tree,
    frequency::FrequencyTable,
    queue::MinQueue,
    table::{Code, CodeTable},
    tree::{HuffmanTree, Node},
};

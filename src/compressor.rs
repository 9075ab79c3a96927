pub use anyhow::Result;
use thiserror::Error;

/// Raised at the [`Compressor`] boundary when a container cannot be decoded.
#[derive(Debug, Error)]
pub enum DecompressionError {
    #[error("compressed data could not be decoded: {0}")]
    InvalidInput(String),
}

/// A coder whose output carries everything needed to decode it.
///
/// For Huffman coding that means the code table travels inside the output, see
/// [`format::wrap`](crate::format::wrap).
pub trait Compressor {
    fn compress_bytes(&mut self, data: &[u8]) -> Vec<u8>;

    /// # Errors
    ///
    /// Returns [`DecompressionError::InvalidInput`] if `data` is not something
    /// [`compress_bytes`](Compressor::compress_bytes) produced.
    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Name shown in round-trip reports.
    fn compressor_name(&self) -> String;

    /// Compresses `data`, decompresses the result and records both.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let compressed = self.compress_bytes(data);
        let decompressed = self.decompress_bytes(&compressed)?;

        Ok(RoundTripTestResult {
            equal: data == decompressed.as_slice(),
            original: data,
            compressed,
            decompressed,
        })
    }
}

pub trait CompressorExt: Compressor {
    /// Looks at the framing of `data` only; `true` does not promise a successful decode.
    fn format_validity_check(&mut self, data: &[u8]) -> Result<bool>;
}

/// What one [`Compressor::test_roundtrip`] call produced.
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    pub fn get_compressed(&self) -> &[u8] {
        &self.compressed
    }

    pub fn get_decompressed(&self) -> &[u8] {
        &self.decompressed
    }

    /// Compressed size divided by original size, 0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original.is_empty() {
            return 0.0;
        }
        self.compressed.len() as f64 / self.original.len() as f64
    }
}

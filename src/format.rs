//! Persisting code tables, and the optional container that carries one in front of a payload.
//!
//! The payload itself never has a header. A code table is stored either as a JSON side file
//! ([`CodebookFile`]) or in binary inside a container:
//!
//! ```text
//! b"HUFP" | version: u8 | count: u16 LE | count x (symbol: u16 LE | len: u8 | bits) | payload
//! ```
//!
//! `bits` is the code packed MSB-first into `ceil(len / 8)` bytes. Symbol 256 is the end marker.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::huffman::{
    HuffmanError, Symbol,
    encode::into_padded_bytes,
    table::{Code, CodeTable},
};

pub const MAGIC: [u8; 4] = *b"HUFP";
pub const VERSION: u8 = 1;

/// Wraps a payload with the code table needed to decode it.
///
/// # Errors
///
/// Fails if `table` cannot be stored, see [`write_codebook`].
pub fn wrap(table: &CodeTable, payload: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    let mut out = Vec::with_capacity(MAGIC.len() + 1 + 2 + table.len() * 4 + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    write_codebook(table, &mut out)?;
    out.extend_from_slice(payload);
    Ok(out)
}

/// Splits a container into its code table and payload.
pub fn unwrap(data: &[u8]) -> Result<(CodeTable, &[u8]), HuffmanError> {
    if !is_container(data) {
        return Err(malformed("missing HUFP magic"));
    }
    let version = data[MAGIC.len()];
    if version != VERSION {
        return Err(malformed(format!("unsupported version {}", version)));
    }
    let body = &data[MAGIC.len() + 1..];
    let (table, used) = read_codebook(body)?;
    Ok((table, &body[used..]))
}

/// Lazy check: only the magic and version are looked at.
pub fn is_container(data: &[u8]) -> bool {
    data.len() > MAGIC.len() && data.starts_with(&MAGIC)
}

/// Appends the binary form of `table` to `buf`.
///
/// # Errors
///
/// Returns [`HuffmanError::InvalidCodebook`] for an empty code or one longer than
/// [`Code::MAX_LEN`]; `buf` may then hold a partial codebook.
pub fn write_codebook(table: &CodeTable, buf: &mut Vec<u8>) -> Result<(), HuffmanError> {
    // at most 257 symbols, so the count always fits
    buf.extend_from_slice(&(table.len() as u16).to_le_bytes());
    for (symbol, code) in table.iter() {
        let len = u8::try_from(code.len())
            .ok()
            .filter(|&len| len > 0)
            .ok_or_else(|| {
                HuffmanError::InvalidCodebook(format!(
                    "code for {} is {} bits, expected 1 to {}",
                    symbol,
                    code.len(),
                    Code::MAX_LEN
                ))
            })?;
        buf.extend_from_slice(&symbol.to_u16().to_le_bytes());
        buf.push(len);
        buf.extend_from_slice(&into_padded_bytes(code.bits().to_bitvec()));
    }
    Ok(())
}

/// Reads a binary code table, returning it with the number of bytes consumed.
pub fn read_codebook(data: &[u8]) -> Result<(CodeTable, usize), HuffmanError> {
    let mut reader = ByteReader { data, pos: 0 };
    let count = u16::from_le_bytes(reader.take_array("entry count")?) as usize;
    if count == 0 || count > Symbol::ALPHABET_SIZE {
        return Err(malformed(format!("invalid entry count {}", count)));
    }

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let raw = u16::from_le_bytes(reader.take_array("symbol")?);
        let symbol = Symbol::from_u16(raw).ok_or_else(|| malformed(format!("symbol {} out of range", raw)))?;
        let [len] = reader.take_array::<1>("code length")?;
        if len == 0 {
            return Err(malformed(format!("zero-length code for {}", symbol)));
        }
        let packed = reader.take(usize::from(len).div_ceil(8), "code bits")?;
        let code = Code::from_bitvec(packed.view_bits::<Msb0>()[..usize::from(len)].to_bitvec());
        entries.push((symbol, code));
    }

    let table: CodeTable = entries.into_iter().collect();
    if table.len() != count {
        return Err(malformed("duplicate symbol entries"));
    }
    Ok((table, reader.pos))
}

struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], HuffmanError> {
        let end = self.pos + n;
        if end > self.data.len() {
            return Err(malformed(format!("truncated while reading {}", what)));
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], HuffmanError> {
        let slice = self.take(N, what)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(slice);
        Ok(arr)
    }
}

fn malformed(message: impl Into<String>) -> HuffmanError {
    HuffmanError::MalformedContainer(message.into())
}

/// JSON side file holding a code table next to a raw payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodebookFile {
    /// Version of the crate that wrote the file
    pub version: String,

    pub entries: Vec<CodebookEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodebookEntry {
    pub symbol: Symbol,
    pub code: Code,
}

impl CodebookFile {
    pub fn from_table(table: &CodeTable) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            entries: table
                .iter()
                .map(|(symbol, code)| CodebookEntry {
                    symbol,
                    code: code.clone(),
                })
                .collect(),
        }
    }

    pub fn into_table(self) -> Result<CodeTable, HuffmanError> {
        let count = self.entries.len();
        let table: CodeTable = self.entries.into_iter().map(|e| (e.symbol, e.code)).collect();
        if table.len() != count {
            return Err(HuffmanError::InvalidCodebook("duplicate symbol entries".to_string()));
        }
        Ok(table)
    }
}

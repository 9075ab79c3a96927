use super::{
    HuffmanError, Symbol,
    table::{Bits, CodeTable},
};

/// Packs the codes of every byte of `data`, then the end code, MSB-first.
///
/// The result is `ceil(bits / 8)` bytes long with zero padding in the last byte.
///
/// # Errors
///
/// Returns [`HuffmanError::UnknownSymbol`] if `table` lacks a code for some byte or for the
/// end marker, which means the table was built from different input.
pub fn encode(data: &[u8], table: &CodeTable) -> Result<Vec<u8>, HuffmanError> {
    let mut stream = Bits::with_capacity(data.len() * 4);

    for &b in data {
        stream.extend_from_bitslice(table.code_for(Symbol::Byte(b))?.bits());
    }
    stream.extend_from_bitslice(table.code_for(Symbol::End)?.bits());

    if_tracing! {{
        tracing::debug!(target = "huffman", input_len = data.len(), bits = stream.len(), "payload packed");
    }}
    Ok(into_padded_bytes(stream))
}

/// Zero-fills the tail of the last byte and hands back the packed bytes.
pub(crate) fn into_padded_bytes(mut bits: Bits) -> Vec<u8> {
    bits.force_align();
    bits.resize(bits.len().next_multiple_of(8), false);
    bits.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::tree::HuffmanTree;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::generate(&HuffmanTree::from_bytes(data).unwrap())
    }

    #[test]
    fn output_length_matches_code_lengths() {
        let data = b"compressed length is the sum of code lengths";
        let table = table_for(data);
        let bits = table.encoded_bit_len(data).unwrap();
        assert_eq!(encode(data, &table).unwrap().len(), bits.div_ceil(8));
    }

    #[test]
    fn padding_bits_are_zero() {
        let table = table_for(b"aaab");
        // 7 bits used, the eighth is padding
        assert_eq!(encode(b"aaab", &table).unwrap()[0] & 1, 0);
    }

    #[test]
    fn packs_msb_first_across_bytes() {
        let mut bits = Bits::new();
        bits.extend([true; 9]);
        assert_eq!(into_padded_bytes(bits), [0xFF, 0b1000_0000]);
        assert!(into_padded_bytes(Bits::new()).is_empty());
    }

    #[test]
    fn empty_input_still_writes_end_code() {
        let table = table_for(&[]);
        assert_eq!(encode(&[], &table).unwrap(), [0]);
    }

    #[test]
    fn mismatched_table_is_an_error() {
        let table = table_for(b"abc");
        assert_eq!(
            encode(b"abd", &table).unwrap_err(),
            HuffmanError::UnknownSymbol(Symbol::Byte(b'd'))
        );
    }

    #[test]
    fn table_without_end_code_is_an_error() {
        let table = CodeTable::from_iter([(Symbol::Byte(b'a'), "0".parse().unwrap())]);
        assert_eq!(encode(b"a", &table).unwrap_err(), HuffmanError::UnknownSymbol(Symbol::End));
    }
}

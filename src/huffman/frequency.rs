use super::Symbol;

/// Occurrence counts for every byte value plus the single end-of-stream marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    bytes: [u64; 256],
    end: u64,
}

impl FrequencyTable {
    /// Counts every byte of `data`, then the end marker exactly once.
    pub fn scan(data: &[u8]) -> Self {
        let mut bytes = [0u64; 256];
        for &b in data {
            bytes[b as usize] += 1;
        }
        if_tracing! {{
            tracing::debug!(target = "huffman", input_len = data.len(), "frequency scan complete");
        }}
        Self { bytes, end: 1 }
    }

    pub fn weight(&self, symbol: Symbol) -> u64 {
        match symbol {
            Symbol::Byte(b) => self.bytes[b as usize],
            Symbol::End => self.end,
        }
    }

    /// Symbols with a non-zero weight, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        let bytes = self
            .bytes
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0)
            .map(|(b, &w)| (Symbol::Byte(b as u8), w));
        bytes.chain((self.end != 0).then_some((Symbol::End, self.end)))
    }

    /// Number of symbols with a non-zero weight.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all weights: the input length plus one for the end marker.
    pub fn total(&self) -> u64 {
        self.bytes.iter().sum::<u64>() + self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bytes_and_one_end_marker() {
        let table = FrequencyTable::scan(b"aaab");
        assert_eq!(table.weight(Symbol::Byte(b'a')), 3);
        assert_eq!(table.weight(Symbol::Byte(b'b')), 1);
        assert_eq!(table.weight(Symbol::Byte(b'c')), 0);
        assert_eq!(table.weight(Symbol::End), 1);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn zero_weights_are_skipped() {
        let table = FrequencyTable::scan(b"ba");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, [(Symbol::Byte(b'a'), 1), (Symbol::Byte(b'b'), 1), (Symbol::End, 1)]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_input_still_has_end_marker() {
        let table = FrequencyTable::scan(&[]);
        assert_eq!(table.iter().collect::<Vec<_>>(), [(Symbol::End, 1)]);
        assert!(!table.is_empty());
        assert_eq!(table.total(), 1);
    }
}

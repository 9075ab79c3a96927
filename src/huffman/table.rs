use core::{fmt, str::FromStr};
use std::collections::BTreeMap;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    HuffmanError, Symbol,
    tree::{HuffmanTree, Node},
};

/// Bits in the order they are written to a payload.
pub type Bits = BitVec<u8, Msb0>;

/// The bit path from the root to a leaf. `false` descends to the lighter child.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    bits: Bits,
}

impl Code {
    /// Longest code a persisted table may hold; the binary codebook stores lengths in one byte.
    pub const MAX_LEN: usize = u8::MAX as usize;

    pub const fn from_bitvec(bits: Bits) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.len() >= self.len() && other.bits[..self.len()] == self.bits[..]
    }
}

impl FromIterator<bool> for Code {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bitvec(iter.into_iter().collect())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > Self::MAX_LEN {
            return Err(HuffmanError::InvalidCodebook(format!(
                "code of {} bits is longer than {}",
                s.len(),
                Self::MAX_LEN
            )));
        }
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffmanError::InvalidCodebook(format!("unexpected {:?} in code {:?}", other, s))),
            })
            .collect()
    }
}

impl TryFrom<String> for Code {
    type Error = HuffmanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// Maps every symbol of a tree to its code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    /// Walks the tree depth-first, lighter child first.
    ///
    /// A tree that is a single leaf gets the 1-bit code `0`, since an empty code could not
    /// frame repeated symbols.
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code::from_bitvec(bitvec![u8, Msb0; 0]));
            }
            root => walk(root, &mut Bits::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Entries in ascending symbol order, `End` last.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Longest code in the table, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Number of payload bits `data` encodes to, end code included, padding excluded.
    pub fn encoded_bit_len(&self, data: &[u8]) -> Result<usize, HuffmanError> {
        let mut total = self.code_for(Symbol::End)?.len();
        for &b in data {
            total += self.code_for(Symbol::Byte(b))?.len();
        }
        Ok(total)
    }

    pub(crate) fn code_for(&self, symbol: Symbol) -> Result<&Code, HuffmanError> {
        self.codes.get(&symbol).ok_or(HuffmanError::UnknownSymbol(symbol))
    }

    /// True if no code is a prefix of any other.
    pub fn is_prefix_free(&self) -> bool {
        // in lexicographic order a prefix sorts directly before the codes it starts
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort_by(|a, b| a.bits.cmp(&b.bits));
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

impl FromIterator<(Symbol, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, Code)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

fn walk(node: &Node, path: &mut Bits, codes: &mut BTreeMap<Symbol, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code::from_bitvec(path.clone()));
        }
        Node::Internal { lighter, heavier, .. } => {
            path.push(false);
            walk(lighter, path, codes);
            path.pop();
            path.push(true);
            walk(heavier, path, codes);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> CodeTable {
        CodeTable::generate(&HuffmanTree::from_bytes(data).unwrap())
    }

    #[test]
    fn every_weighted_symbol_gets_a_code() {
        let data = b"so many symbols, so little time";
        let table = table_for(data);
        for &b in data {
            assert!(table.get(Symbol::Byte(b)).is_some());
        }
        assert!(table.get(Symbol::End).is_some());
        assert!(table.get(Symbol::Byte(b'z')).is_none());
    }

    #[test]
    fn codes_are_prefix_free() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat_n(b, b as usize % 7 + 1)).collect();
        let table = table_for(&data);
        assert_eq!(table.len(), 257);
        assert!(table.is_prefix_free());

        let codes: Vec<&Code> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
            }
        }
    }

    #[test]
    fn frequent_symbols_get_shorter_codes() {
        let table = table_for(b"eeeeeeeeeeeeeeeeeeeetaq");
        let e = table.get(Symbol::Byte(b'e')).unwrap().len();
        let q = table.get(Symbol::Byte(b'q')).unwrap().len();
        assert!(e < q);
        assert_eq!(e, 1);
    }

    #[test]
    fn skewed_weights_exceed_eight_bits_and_roundtrip() {
        // fibonacci weights from 2 up: every merge takes the next symbol, so the tree is a chain
        let mut data = Vec::new();
        let (mut a, mut b) = (2usize, 3usize);
        for sym in 0..22u8 {
            data.extend(std::iter::repeat_n(sym, a));
            (a, b) = (b, a + b);
        }

        let (table, payload) = crate::huffman::compress(&data).unwrap();
        assert_eq!(table.max_len(), 22);
        assert_eq!(table.get(Symbol::End).unwrap().len(), 22);
        assert_eq!(table.get(Symbol::Byte(21)).unwrap().len(), 1);
        assert!(table.is_prefix_free());
        assert_eq!(crate::huffman::decompress(&table, &payload).unwrap(), data);
    }

    #[test]
    fn single_leaf_tree_gets_one_bit() {
        let table = table_for(&[]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Symbol::End).unwrap().to_string(), "0");
    }

    #[test]
    fn code_parses_and_prints() {
        let code: Code = "0110".parse().unwrap();
        assert_eq!(code.bits().iter().by_vals().collect::<Vec<_>>(), [false, true, true, false]);
        assert_eq!(code.to_string(), "0110");
        assert!("01x".parse::<Code>().is_err());
        assert!(Code::from_iter([false, true]).is_prefix_of(&code));
        assert!(!code.is_prefix_of(&Code::from_iter([false, true])));
    }

    #[test]
    fn overlong_codes_do_not_parse() {
        assert_eq!("1".repeat(Code::MAX_LEN).parse::<Code>().unwrap().len(), Code::MAX_LEN);
        assert!(matches!(
            "0".repeat(Code::MAX_LEN + 1).parse::<Code>(),
            Err(HuffmanError::InvalidCodebook(_))
        ));
        assert!("0".repeat(2_000_000).parse::<Code>().is_err());
    }

    #[test]
    fn detects_prefix_conflicts() {
        let table = CodeTable::from_iter([
            (Symbol::Byte(0), "10".parse().unwrap()),
            (Symbol::Byte(1), "101".parse().unwrap()),
            (Symbol::End, "0".parse().unwrap()),
        ]);
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn bit_length_counts_end_code() {
        let table = table_for(b"aaab");
        assert_eq!(table.encoded_bit_len(b"aaab").unwrap(), 7);
        assert_eq!(table.encoded_bit_len(b"").unwrap(), 2);
        assert_eq!(
            table.encoded_bit_len(b"c").unwrap_err(),
            HuffmanError::UnknownSymbol(Symbol::Byte(b'c'))
        );
    }
}

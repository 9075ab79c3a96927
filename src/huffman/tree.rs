use bitvec::prelude::*;

use super::{
    HuffmanError, Symbol,
    frequency::FrequencyTable,
    queue::MinQueue,
    table::{Code, CodeTable},
};

/// A node of a Huffman tree.
///
/// Internal nodes own both children outright; there are no shared or back references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        lighter: Box<Node>,
        heavier: Box<Node>,
    },
}

impl Node {
    pub const fn leaf(symbol: Symbol, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    pub const fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Joins two nodes, `lighter` being the one extracted first.
    pub fn merge(lighter: Node, heavier: Node) -> Self {
        Node::Internal {
            weight: lighter.weight() + heavier.weight(),
            lighter: Box::new(lighter),
            heavier: Box::new(heavier),
        }
    }
}

/// An immutable Huffman tree with at least one leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Scans `data` and builds its tree, exactly as [`compress`](crate::compress) does.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HuffmanError> {
        Self::from_frequencies(&FrequencyTable::scan(data))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self, HuffmanError> {
        Self::build(MinQueue::from_frequencies(frequencies))
    }

    /// Repeatedly merges the two lightest nodes until one remains.
    ///
    /// # Errors
    ///
    /// Returns [`HuffmanError::EmptyTree`] for an empty queue.
    pub fn build(mut queue: MinQueue) -> Result<Self, HuffmanError> {
        if queue.is_empty() {
            return Err(HuffmanError::EmptyTree);
        }
        while queue.len() > 1 {
            let a = queue.extract_min()?;
            let b = queue.extract_min()?;
            queue.insert(Node::merge(a, b));
        }
        let root = queue.extract_min()?;

        if_tracing! {{
            tracing::debug!(target = "huffman", root_weight = root.weight(), "tree built");
        }}
        Ok(Self { root })
    }

    /// Rebuilds a decode tree from persisted codes.
    ///
    /// Leaves get weight 0 since codebooks do not carry weights. Codes longer than
    /// [`Code::MAX_LEN`] are rejected before any node is built.
    pub fn from_code_table(table: &CodeTable) -> Result<Self, HuffmanError> {
        if table.is_empty() {
            return Err(HuffmanError::InvalidCodebook("no codes".to_string()));
        }
        if table.get(Symbol::End).is_none() {
            return Err(HuffmanError::InvalidCodebook("no code for the end-of-stream marker".to_string()));
        }

        let mut trie = Trie::Empty;
        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(HuffmanError::InvalidCodebook(format!("empty code for {}", symbol)));
            }
            if code.len() > Code::MAX_LEN {
                return Err(HuffmanError::InvalidCodebook(format!(
                    "code for {} is {} bits, longer than {}",
                    symbol,
                    code.len(),
                    Code::MAX_LEN
                )));
            }
            trie.insert(symbol, code.bits())?;
        }

        // a lone 1-bit code is the degenerate single-leaf tree
        if table.len() == 1 {
            let (symbol, code) = table.iter().next().ok_or(HuffmanError::EmptyTree)?;
            if code.len() != 1 {
                return Err(HuffmanError::InvalidCodebook(format!(
                    "single code for {} must be 1 bit, got {}",
                    symbol,
                    code.len()
                )));
            }
            return Ok(Self {
                root: Node::leaf(symbol, 0),
            });
        }

        Ok(Self {
            root: trie.into_node(&mut Vec::new())?,
        })
    }

    pub const fn root(&self) -> &Node {
        &self.root
    }

    pub const fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { lighter, heavier, .. } => count(lighter) + count(heavier),
            }
        }
        count(&self.root)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn depth(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { lighter, heavier, .. } => 1 + depth(lighter).max(depth(heavier)),
            }
        }
        depth(&self.root)
    }
}

enum Trie {
    Empty,
    Leaf(Symbol),
    Branch(Box<Trie>, Box<Trie>),
}

impl Trie {
    fn insert(&mut self, symbol: Symbol, path: &BitSlice<u8, Msb0>) -> Result<(), HuffmanError> {
        let mut cursor = self;
        for bit in path.iter().by_vals() {
            if matches!(cursor, Trie::Empty) {
                *cursor = Trie::Branch(Box::new(Trie::Empty), Box::new(Trie::Empty));
            }
            cursor = match cursor {
                Trie::Branch(zero, one) => {
                    if bit {
                        &mut **one
                    } else {
                        &mut **zero
                    }
                }
                Trie::Leaf(other) => {
                    return Err(HuffmanError::InvalidCodebook(format!(
                        "code for {} is a prefix of the code for {}",
                        other, symbol
                    )));
                }
                Trie::Empty => unreachable!("empty positions are expanded above"),
            };
        }
        if !matches!(cursor, Trie::Empty) {
            return Err(HuffmanError::InvalidCodebook(format!(
                "code for {} collides with or prefixes another code",
                symbol
            )));
        }
        *cursor = Trie::Leaf(symbol);
        Ok(())
    }

    fn into_node(self, path: &mut Vec<bool>) -> Result<Node, HuffmanError> {
        match self {
            Trie::Leaf(symbol) => Ok(Node::leaf(symbol, 0)),
            Trie::Branch(zero, one) => {
                path.push(false);
                let lighter = zero.into_node(path)?;
                path.pop();
                path.push(true);
                let heavier = one.into_node(path)?;
                path.pop();
                Ok(Node::merge(lighter, heavier))
            }
            Trie::Empty => {
                let prefix: String = path.iter().map(|&b| if b { '1' } else { '0' }).collect();
                Err(HuffmanError::InvalidCodebook(format!(
                    "no code starts with {:?}; the code table is incomplete",
                    prefix
                )))
            }
        }
    }
}

use std::fs;

use huffpack::{FrequencyTable, HuffmanTree, format::CodebookFile, huffman::table::CodeTable};

use crate::cli::{CodesArgs, Result};

pub fn codes(args: CodesArgs) -> Result<()> {
    let input = fs::read(&args.input)?;
    let frequencies = FrequencyTable::scan(&input);
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    let table = CodeTable::generate(&tree);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&CodebookFile::from_table(&table))?);
        return Ok(());
    }

    println!(
        "{} symbols, {} total weight, tree depth {}",
        table.len(),
        tree.weight(),
        tree.depth()
    );
    for (symbol, code) in table.iter() {
        println!("{:>16}  {:>8}  {}", symbol.to_string(), frequencies.weight(symbol), code);
    }
    Ok(())
}

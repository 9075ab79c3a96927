use std::fs;

use huffpack::{decompress, format};

use crate::cli::{DecodeArgs, Result, load_codebook};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let compressed_data = fs::read(input_path)?;
    let decompressed_data = match args.codes {
        Some(ref codes_path) => {
            let table = load_codebook(codes_path)?;
            decompress(&table, &compressed_data)?
        }
        None => {
            let (table, payload) = format::unwrap(&compressed_data)?;
            decompress(&table, payload)?
        }
    };

    if_tracing! {{
        tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), decompressed_len = decompressed_data.len(), "decode finished");
    }}
    fs::write(output_path, decompressed_data)?;
    Ok(())
}

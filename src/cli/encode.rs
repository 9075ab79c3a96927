use std::fs;

use huffpack::{compress, format};

use crate::cli::{EncodeArgs, Result, default_codes_path, save_codebook};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = fs::read(input_path)?;
    let (table, payload) = compress(&input_data)?;

    if args.raw {
        let codes_path = match args.codes {
            Some(path) => path,
            None => default_codes_path(output_path)?,
        };
        fs::write(output_path, &payload)?;
        save_codebook(&table, &codes_path)?;
        if_tracing! {{
            tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), codes = %codes_path.display(), compressed_len = payload.len(), "raw encode finished");
        }}
    } else {
        let packed = format::wrap(&table, &payload)?;
        fs::write(output_path, &packed)?;
        if_tracing! {{
            tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), compressed_len = packed.len(), "encode finished");
        }}
    }
    Ok(())
}

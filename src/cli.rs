//! cli component of huffpack.
//!
//! > `huffpack enc <input> <output> [--raw] [--codes <path>]`
//!
//! by default the output is a container: the code table is embedded in front of the payload,
//! so `dec` needs nothing but the file. with `--raw` only the bare payload is written and the
//! code table goes to a json side file, either at `--codes` or at `{output stem}.codes.json`.
//!
//! > `huffpack dec <input> <output> [--codes <path>]`
//!
//! without `--codes` the input must be a container. with it, the input is a raw payload and the
//! code table is read from the given json file.
//!
//! > `huffpack test <input>`
//!
//! compresses, reports the sizes and ratio, decompresses and compares with the original.
//!
//! > `huffpack codes <input> [--json]`
//!
//! prints the code table that would be used for the input.
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use huffpack::{HuffmanError, format::CodebookFile, huffman::table::CodeTable};

pub mod codes;
pub mod decode;
pub mod encode;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Roundtrip mismatch for {}", .0.display())]
    RoundtripMismatch(PathBuf),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// CLI arguments for huffpack
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print the code table for a file
    Codes(CodesArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the output file
    pub output: PathBuf,

    /// Write the bare payload and save the code table as a JSON side file
    #[arg(long)]
    pub raw: bool,

    /// Where to save the code table with --raw (defaults to `{output stem}.codes.json`)
    #[arg(long, requires = "raw")]
    pub codes: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the compressed file
    pub input: PathBuf,

    /// Path for the decompressed file
    pub output: PathBuf,

    /// JSON code table for a raw payload; without it the input must be a container
    #[arg(long)]
    pub codes: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the original file
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Path to the file to build codes for
    pub input: PathBuf,

    /// Print the table as JSON instead of one line per symbol
    #[arg(long)]
    pub json: bool,
}

/// Path of the code table saved next to `output`: `{stem}.codes.json`.
pub fn default_codes_path(output: &Path) -> Result<PathBuf> {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CliError::InvalidPath(output.to_path_buf()))?;
    Ok(output.with_file_name(format!("{}.codes.json", stem)))
}

pub fn save_codebook(table: &CodeTable, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&CodebookFile::from_table(table))?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_codebook(path: &Path) -> Result<CodeTable> {
    let data = fs::read(path)?;
    let file: CodebookFile = serde_json::from_slice(&data)?;
    Ok(file.into_table()?)
}

extern crate clap;
#[macro_use]
extern crate huffpack;
extern crate serde_json;
extern crate thiserror;

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use crate::cli::{Cli, Command};
use clap::Parser;
use std::process;

mod cli;

fn main() {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Test(args) => cli::test::test(args),
        Command::Codes(args) => cli::codes::codes(args),
    };

    if let Err(e) = result {
        if_tracing! {{
            tracing::error!(event = "command_failed", error = %e, "command failed");
        }}
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

//! Process entry point. Only the non-interactive `-f`/`--filter` path is
//! implemented here; rendering an interactive picker is out of scope (§1
//! explicitly scopes this to the matching/selection core, not a TUI).

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use needlefind::cli::Args;
use needlefind::{NeedlefindError, Session};

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(found_matches) => {
            if found_matches {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("nlf: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(args: Args) -> Result<bool, NeedlefindError> {
    let query = args.query.clone().unwrap_or_default();
    let file = args.file.clone();
    let config = args.into_config()?;
    let pattern = config.query.parse(&query);

    let session = match file {
        Some(path) => Session::spawn(File::open(path)?, &config),
        None => Session::spawn(io::stdin(), &config),
    };

    let hits = session.filter(pattern, config.poll_timeout)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let delimiter = config.print_delimiter.byte();
    for hit in &hits {
        out.write_all(hit.as_bytes()).ok();
        out.write_all(&[delimiter]).ok();
    }
    Ok(!hits.is_empty())
}

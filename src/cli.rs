//! Command-line surface: flags map directly onto [`crate::config::Config`]
//! and [`crate::query::QueryConfig`].

use clap::Parser;

use crate::config::{Config, LineDelimiter};
use crate::field::FieldSpec;
use crate::query::{CaseMode, MatchMode, QueryConfig};

#[derive(Parser, Debug)]
#[command(name = "nlf", about = "Stream lines from stdin or a file, rank them against a query, and print the best matches")]
pub struct Args {
    /// Query to filter against. Without `-f` this is the initial query for
    /// an interactive frontend; with `-f` it runs once and prints the
    /// result to stdout.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Read lines from this file instead of stdin.
    #[arg(short, long)]
    pub file: Option<std::path::PathBuf>,

    /// Run non-interactively: read all input, rank once, print matches, exit.
    #[arg(short = 'f', long)]
    pub filter: bool,

    /// Bare query tokens run substring matching instead of fuzzy matching.
    #[arg(short = 'e', long)]
    pub exact: bool,

    /// Force case-insensitive matching (overrides smart-case).
    #[arg(short = 'i', conflicts_with = "force_case_respect")]
    pub force_case_ignore: bool,

    /// Force case-sensitive matching (overrides smart-case).
    #[arg(long = "+i", conflicts_with = "force_case_ignore")]
    pub force_case_respect: bool,

    /// Input records are delimited by the given byte instead of newline.
    #[arg(short = '0', long = "read0")]
    pub read0: bool,

    /// Output records are delimited by NUL instead of newline.
    #[arg(long)]
    pub print0: bool,

    /// Treat the first N lines as a header: always shown, never scored.
    #[arg(long, default_value_t = 0)]
    pub header_lines: u32,

    /// Field(s) the matcher scores against; see `--with-nth` for the syntax.
    #[arg(short, long)]
    pub nth: Option<String>,

    /// Field(s) to display/print, independent of which fields are matched.
    /// Comma-separated list of `N`, `N..M`, `..M`, `N..`; 1-based, negative
    /// counts from the last field.
    #[arg(long)]
    pub with_nth: Option<String>,

    /// Field delimiter for `--nth`/`--with-nth` (defaults to whitespace runs).
    #[arg(short, long)]
    pub delimiter: Option<char>,
}

impl Args {
    pub fn into_config(self) -> Result<Config, crate::error::NeedlefindError> {
        let mut config = Config::default();
        config.query = QueryConfig {
            case: if self.force_case_ignore {
                CaseMode::ForceIgnore
            } else if self.force_case_respect {
                CaseMode::ForceRespect
            } else {
                CaseMode::Smart
            },
            mode: if self.exact { MatchMode::Exact } else { MatchMode::Fuzzy },
        };
        config.read_delimiter = if self.read0 { LineDelimiter::Nul } else { LineDelimiter::Newline };
        config.print_delimiter = if self.print0 { LineDelimiter::Nul } else { LineDelimiter::Newline };
        config.header_lines = self.header_lines;
        config.field_delimiter = self.delimiter;
        if let Some(spec) = &self.nth {
            config.nth = FieldSpec::parse(spec)?;
        }
        if let Some(spec) = &self.with_nth {
            config.with_nth = FieldSpec::parse(spec)?;
        }
        Ok(config)
    }
}

//! Simple CLI that reads HTML from stdin and writes the cleaned HTML to stdout.
//!
//! Set `RUST_LOG=rs_domclean=debug` to see the per-pass summary.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rs_domclean::{clean_fragment, clean_html, CleanOptions};

/// Clean an HTML document read from stdin.
#[derive(Parser, Debug)]
#[command(name = "clean_stdin")]
#[command(about = "Remove comments/empty elements and normalize whitespace in HTML", long_about = None)]
struct Args {
    /// Remove comment nodes.
    #[arg(long)]
    remove_comments: bool,

    /// Remove whitespace-only text and attribute-less empty elements.
    #[arg(long)]
    remove_empty: bool,

    /// Collapse whitespace runs containing a newline to a newline.
    #[arg(long)]
    keep_new_lines: bool,

    /// Shorthand for --remove-comments --remove-empty.
    #[arg(long)]
    minify: bool,

    /// Treat input as a snippet and print only the cleaned body content.
    #[arg(long)]
    fragment: bool,

    /// JSON file with `CleanOptions`; flags are OR-ed on top.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn options(&self) -> rs_domclean::Result<CleanOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|err| {
                    rs_domclean::Error::Config(format!("{}: {err}", path.display()))
                })?;
                CleanOptions::from_json(&json)?
            }
            None => CleanOptions::default(),
        };

        options.remove_comments |= self.remove_comments || self.minify;
        options.remove_empty_elements |= self.remove_empty || self.minify;
        options.keep_new_lines |= self.keep_new_lines;
        Ok(options)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = match args.options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("cleaning with {options:?}");

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    let result = if args.fragment {
        clean_fragment(&html, &options)
    } else {
        clean_html(&html, &options)
    };

    match result {
        Ok(cleaned) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{cleaned}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

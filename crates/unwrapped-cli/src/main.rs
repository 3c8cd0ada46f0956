//! Unwrapped command-line sandbox
//!
//! ```text
//! unwrapped 'nil ?? 42'              # prints 42
//! unwrapped --trace '(nil ?? 2) * 3' # prints every sub-result, then 6
//! unwrapped --json 'nil!'            # one JSON document per expression
//! unwrapped                          # interactive session
//! ```

mod cli;
mod repl;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use repl::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every expression succeeded.
fn run(cli: &Cli) -> Result<bool> {
    if cli.exprs.is_empty() {
        let mut session = Session::new(cli.context(), cli.fatal_unwrap);
        return repl::run(&mut session);
    }
    batch(cli)
}

fn batch(cli: &Cli) -> Result<bool> {
    let ctx = cli.context();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let mut all_ok = true;
    for source in &cli.exprs {
        let outcome = unwrapped::run_with(source, &ctx);
        all_ok &= report::succeeded(&outcome);
        if cli.json {
            let doc = report::to_json(source, &outcome)
                .with_context(|| format!("failed to encode result of `{}`", source))?;
            writeln!(out, "{}", doc)?;
        } else {
            report::write_text(source, &outcome, &mut out, &mut err)?;
        }
    }
    out.flush()?;
    Ok(all_ok)
}

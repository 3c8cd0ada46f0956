//! Interactive session

use std::io::{self, Write};

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use unwrapped::{run_with, EvalContext, EvalError};

use crate::report;

const PROMPT: &str = "?? ";

/// REPL command metadata.
#[derive(Debug, Clone)]
pub struct ReplCommand {
    /// Command name (without leading colon)
    pub name: &'static str,

    /// Short description of what the command does
    pub description: &'static str,

    /// Detailed help text
    pub help: &'static str,
}

/// Commands understood after a leading `:`.
pub const COMMANDS: &[ReplCommand] = &[
    ReplCommand {
        name: "help",
        description: "Show help",
        help: "List the commands, or describe one with `:help <command>`",
    },
    ReplCommand {
        name: "trace",
        description: "Toggle tracing",
        help: "Print every sub-result before the value; `:trace on` and `:trace off` set it",
    },
    ReplCommand {
        name: "quit",
        description: "Leave the session",
        help: "End the session; Ctrl-D does the same",
    },
];

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
    /// A forced unwrap of nil ended the session
    Fatal,
}

/// State carried between lines.
#[derive(Debug, Clone)]
pub struct Session {
    pub ctx: EvalContext,
    pub fatal_unwrap: bool,
}

impl Session {
    pub fn new(ctx: EvalContext, fatal_unwrap: bool) -> Self {
        Self { ctx, fatal_unwrap }
    }

    /// Handle one line of input.
    pub fn handle(
        &mut self,
        line: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<Step> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Step::Continue);
        }
        if let Some(command) = line.strip_prefix(':') {
            return self.command(command.trim(), out, err);
        }

        let outcome = run_with(line, &self.ctx);
        report::write_text(line, &outcome, out, err)?;
        let fatal = report::eval_error(&outcome).is_some_and(EvalError::is_fatal_unwrap);
        if self.fatal_unwrap && fatal {
            writeln!(err, "fatal error: session ended")?;
            return Ok(Step::Fatal);
        }
        Ok(Step::Continue)
    }

    fn command(
        &mut self,
        command: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<Step> {
        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or("");
        let arg = words.next();
        match (name, arg) {
            ("quit" | "q", None) => return Ok(Step::Quit),
            ("help" | "h", None) => {
                for cmd in COMMANDS {
                    writeln!(out, ":{:<8}{}", cmd.name, cmd.description)?;
                }
            }
            ("help" | "h", Some(topic)) => match COMMANDS.iter().find(|c| c.name == topic) {
                Some(cmd) => writeln!(out, ":{}  {}", cmd.name, cmd.help)?,
                None => writeln!(err, "no such command `:{}`", topic)?,
            },
            ("trace" | "t", arg) => {
                self.ctx.trace = match arg {
                    None => !self.ctx.trace,
                    Some("on") => true,
                    Some("off") => false,
                    Some(other) => {
                        writeln!(err, "expected `on` or `off`, found `{}`", other)?;
                        return Ok(Step::Continue);
                    }
                };
                let state = if self.ctx.trace { "on" } else { "off" };
                writeln!(out, "trace {}", state)?;
            }
            _ => writeln!(err, "unknown command `:{}`; try `:help`", command)?,
        }
        Ok(Step::Continue)
    }
}

/// Run the interactive loop until the user quits.
///
/// Returns `false` when the session ended on a fatal unwrap.
pub fn run(session: &mut Session) -> Result<bool> {
    let mut editor = DefaultEditor::new()?;
    println!("unwrapped {} (type :help for commands)", unwrapped::VERSION);

    let stdout = io::stdout();
    let stderr = io::stderr();
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(true),
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        let step = session.handle(&line, &mut stdout.lock(), &mut stderr.lock())?;
        match step {
            Step::Continue => {}
            Step::Quit => return Ok(true),
            Step::Fatal => return Ok(false),
        }
    }
}

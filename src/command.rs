//! Host-binding surface: commands, the registry, and `print_rhs_t`.
//!
//! The host debugger owns process attachment, symbol resolution and
//! expression evaluation; what it owes us is the single capability of
//! [`Host::evaluate`], and what we hand back is named [`Command`]s it can
//! route operator input to. `CommandRegistry` is that routing table for
//! hosts that want it; embedders with their own command machinery can
//! drive [`PrintRhsCommand::run`] directly.
//!
//! Error discipline per invocation:
//! - no argument: print the usage hint, succeed;
//! - evaluation failure: print `Error: <message>`, succeed;
//! - field-access failure while capturing: propagate. That one means the
//!   inspected layout and this crate disagree, which the operator cannot
//!   fix by retyping the expression.

use std::io::Write;

use hashbrown::HashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::report::{render, RenderOptions};
use crate::value::Value;

/// The one capability required of a host debugger.
pub trait Host {
    type Value: Value;

    /// Evaluate an operator-supplied expression to a structured value.
    fn evaluate(&self, expr: &str) -> Result<Self::Value>;
}

/// A named operator command.
pub trait Command<H: Host> {
    fn name(&self) -> &'static str;

    /// Run against `host` with pre-split arguments, writing operator
    /// output to `out`.
    fn run(&self, host: &H, args: &[&str], out: &mut dyn Write) -> Result<()>;
}

/// Name-keyed command table with whitespace argv splitting on dispatch.
pub struct CommandRegistry<H: Host> {
    commands: HashMap<&'static str, Box<dyn Command<H>>>,
}

impl<H: Host> CommandRegistry<H> {
    pub fn new() -> Self {
        CommandRegistry {
            commands: HashMap::new(),
        }
    }

    /// Register a command under its own name. Re-registering a name
    /// replaces the previous handler, matching host debugger convention.
    pub fn register(&mut self, command: Box<dyn Command<H>>) {
        debug!(name = command.name(), "registered command");
        self.commands.insert(command.name(), command);
    }

    /// Split `line` into argv and run the named command.
    ///
    /// A blank line is a no-op; an unregistered name is
    /// [`Error::UnknownCommand`], left to the embedder to present.
    pub fn dispatch(&self, host: &H, line: &str, out: &mut dyn Write) -> Result<()> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        debug!(name, argc = args.len(), "dispatching command");
        command.run(host, &args, out)
    }
}

impl<H: Host> Default for CommandRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Usage hint printed when `print_rhs_t` gets no argument.
pub const USAGE: &str = "Usage: print_rhs_t <ck_rhs_t variable>";

/// The `print_rhs_t` command: evaluate one expression to a `ck_rhs_t`
/// handle and print its state report.
#[derive(Debug, Default)]
pub struct PrintRhsCommand {
    options: RenderOptions,
}

impl PrintRhsCommand {
    pub fn new(options: RenderOptions) -> Self {
        PrintRhsCommand { options }
    }
}

impl<H: Host> Command<H> for PrintRhsCommand {
    fn name(&self) -> &'static str {
        "print_rhs_t"
    }

    fn run(&self, host: &H, args: &[&str], out: &mut dyn Write) -> Result<()> {
        // First argument only; extras are ignored.
        let Some(expr) = args.first() else {
            writeln!(out, "{USAGE}")?;
            return Ok(());
        };

        let handle = match host.evaluate(expr) {
            Ok(v) => v,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                return Ok(());
            }
        };

        let report = render(&handle, self.options)?;
        writeln!(out, "{report}")?;
        Ok(())
    }
}

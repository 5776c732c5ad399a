//! The `context`, `context-window` and `context-help` commands.
use crate::error::CommandError;
use crate::help::HELP;
use crate::host::ContextHost;
use ctxpath_query::{Notifier, QueryOptions, query};
use std::collections::HashMap;
use std::sync::Arc;

/// What a registered command name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Evaluate a path against the application context.
    Context,
    /// Evaluate a path against the ambient object.
    ContextWindow,
    /// Emit the help document.
    ContextHelp,
}

/// A registry of command names and aliases.
pub struct CommandRegistry {
    commands: HashMap<String, CommandKind>,
}

impl CommandRegistry {
    /// Creates a new, empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a name or alias.
    pub fn register(&mut self, name: &str, kind: CommandKind) {
        self.commands.insert(name.to_lowercase(), kind);
    }

    /// Finds a command by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<CommandKind> {
        self.commands.get(&name.to_lowercase()).copied()
    }
}

impl Default for CommandRegistry {
    /// Creates a new registry populated with the context commands.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("context", CommandKind::Context);
        registry.register("context-window", CommandKind::ContextWindow);
        registry.register("context-help", CommandKind::ContextHelp);
        registry.register("context?", CommandKind::ContextHelp);
        registry
    }
}

/// One parsed command line: `/name key=value ... unnamed value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandInvocation {
    pub name: String,
    pub args: HashMap<String, String>,
    pub value: String,
}

impl CommandInvocation {
    /// Splits a command line into its name, the leading `key=value` arguments
    /// and the remaining unnamed value. Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let (name, mut rest) = split_word(line);
        if name.is_empty() {
            return None;
        }

        let mut args = HashMap::new();
        loop {
            let (word, after) = split_word(rest);
            match named_arg(word) {
                Some((key, value)) => {
                    args.insert(key.to_string(), value.to_string());
                    rest = after;
                }
                None => break,
            }
        }

        Some(Self {
            name: name.to_string(),
            args,
            value: rest.trim().to_string(),
        })
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], &input[end..]),
        None => (input, ""),
    }
}

/// `key=value`, where the key is an identifier and the value may be quoted.
fn named_arg(word: &str) -> Option<(&str, &str)> {
    let (key, value) = word.split_once('=')?;
    let is_identifier = !key.is_empty()
        && key.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !is_identifier {
        return None;
    }
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some((key, value))
}

/// The host's generic truthy-string convention: `on`, `true` and `1`.
pub fn is_true_boolean(arg: Option<&str>) -> bool {
    arg.map(|a| a.trim().to_lowercase())
        .is_some_and(|a| matches!(a.as_str(), "on" | "true" | "1"))
}

/// Dispatches context commands against a host.
pub struct ContextCommands<H: ContextHost> {
    host: H,
    notifier: Arc<dyn Notifier>,
    registry: CommandRegistry,
}

impl<H: ContextHost> ContextCommands<H> {
    pub fn new(host: H, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            host,
            notifier,
            registry: CommandRegistry::default(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Parses and runs one command line.
    pub async fn run_line(&self, line: &str) -> Result<String, CommandError> {
        let invocation = CommandInvocation::parse(line)
            .ok_or_else(|| CommandError::UnknownCommand(line.trim().to_string()))?;
        self.run(&invocation).await
    }

    /// Runs a parsed command and returns its piped output.
    ///
    /// Query failures are reported to the notifier before being returned.
    pub async fn run(&self, invocation: &CommandInvocation) -> Result<String, CommandError> {
        let kind = self
            .registry
            .get(&invocation.name)
            .ok_or_else(|| CommandError::UnknownCommand(invocation.name.clone()))?;

        let root = match kind {
            CommandKind::ContextHelp => return Ok(HELP.to_string()),
            CommandKind::Context => self.host.context(),
            CommandKind::ContextWindow => self.host.window(),
        };
        if invocation.value.is_empty() {
            return Err(CommandError::MissingPath(invocation.name.clone()));
        }

        let options = QueryOptions::new().with_invoke(is_true_boolean(invocation.arg("call")));
        log::debug!(
            "Running {:?} on '{}' (invoke: {})",
            kind,
            invocation.value,
            options.invoke
        );
        query(&root, &invocation.value, &options, self.notifier.as_ref())
            .await
            .map_err(|e| {
                self.notifier.error(&e.to_string());
                CommandError::from(e)
            })
    }
}

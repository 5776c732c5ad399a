use clap::Parser;
use ctxpath::{
    CliError, CommandError, CommandInvocation, CommandKind, CommandRegistry, ContextCommands,
    Notifier, StaticHost, Value,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Query a JSON context, or the process environment, with ctxpath expressions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file holding the application context; read from stdin when omitted
    #[arg(short, long)]
    context: Option<PathBuf>,

    /// Call the resolved value and print its result (same as `call=true`)
    #[arg(long)]
    call: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// The command line, e.g. `context characters(find name eq Alice)::avatar`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

/// Prints notifications to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

async fn load_context(path: Option<&Path>) -> Result<Value, CliError> {
    let text = match path {
        Some(path) => {
            log::info!("Loading context from {}", path.display());
            tokio::fs::read_to_string(path).await?
        }
        None => {
            log::info!("Loading context from stdin");
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Value::from(json))
}

async fn run(args: Args) -> Result<String, CliError> {
    let line = args.command.join(" ");
    let mut invocation = CommandInvocation::parse(&line)
        .ok_or_else(|| CommandError::UnknownCommand(line.clone()))?;
    if args.call {
        invocation.args.insert("call".to_string(), "true".to_string());
    }

    // Only `context` reads the context file, so help and window queries never block on stdin.
    let context = match CommandRegistry::default().get(&invocation.name) {
        Some(CommandKind::Context) => load_context(args.context.as_deref()).await?,
        _ => Value::Undefined,
    };

    let commands = ContextCommands::new(
        StaticHost::with_process_window(context),
        Arc::new(StderrNotifier),
    );
    Ok(commands.run(&invocation).await?)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("ctxpath={}", args.log_level)),
    )
    .init();

    match run(args).await {
        Ok(output) => println!("{}", output),
        // Query failures were already printed by the notifier.
        Err(CliError::Command(CommandError::Query(_))) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

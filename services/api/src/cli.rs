use crate::demo::{run_demo, run_validate, DemoArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use module_election::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Module Election Validator",
    about = "Validate elective module selections against curriculum quotas",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate a single election document against a module catalog
    Validate(ValidateArgs),
    /// Walk through full-time and part-time elections against the bundled catalog
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::demo::{run_demo, DemoArgs};
use crate::preview::{run_form_preview, PreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hireflow::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hireflow Portal",
    about = "Run and demonstrate the Hireflow recruitment portal from the command line",
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
    /// Inspect application form schemas without starting the server
    Form {
        #[command(subcommand)]
        command: FormCommand,
    },
    /// Run an end-to-end CLI demo covering posting and candidate intake
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FormCommand {
    /// Resolve a schema document and print the rendered form controls
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the in-memory store with demo postings and candidates
    #[arg(long)]
    pub(crate) seed: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Form {
            command: FormCommand::Preview(args),
        } => run_form_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::demo::{run_cohort, run_demo, run_person_report, CohortArgs, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use flock_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Flock Insights",
    about = "Score discipleship surveys and serve the congregation dashboard",
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
    /// Score a response export from the command line
    Diagnostics {
        #[command(subcommand)]
        command: DiagnosticsCommand,
    },
    /// Walk through the dashboard and a printable report using a bundled sample export
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DiagnosticsCommand {
    /// Print cohort statistics and alerts for the selected templates
    Cohort(CohortArgs),
    /// Print the individual report for one person
    Report(ReportArgs),
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
        Command::Diagnostics {
            command: DiagnosticsCommand::Cohort(args),
        } => run_cohort(args),
        Command::Diagnostics {
            command: DiagnosticsCommand::Report(args),
        } => run_person_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::demo::{run_demo, run_preview, run_reconcile, DemoArgs, PreviewArgs, ReconcileArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storefront_designer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Storefront Designer",
    about = "Run the store design service or inspect design documents from the command line",
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
    /// Work with design documents stored as JSON files
    Design {
        #[command(subcommand)]
        command: DesignCommand,
    },
    /// Walk through loading, editing, saving and previewing a sample store
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DesignCommand {
    /// Reconcile a stored design document against the current catalog
    Reconcile(ReconcileArgs),
    /// Render a design document against a store profile
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
    /// JSON file of stored designs and profiles to start from
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Design {
            command: DesignCommand::Reconcile(args),
        } => run_reconcile(args),
        Command::Design {
            command: DesignCommand::Preview(args),
        } => run_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn design_preview_parses_paths() {
        let cli = Cli::try_parse_from([
            "storefront-designer-api",
            "design",
            "preview",
            "--profile",
            "profile.json",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Design {
                command: DesignCommand::Preview(args),
            }) => {
                assert_eq!(args.profile, PathBuf::from("profile.json"));
                assert!(args.document.is_none());
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

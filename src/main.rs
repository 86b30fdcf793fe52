//! Command-line interface for the grafana-compose binary.
//!
//! The CLI compiles YAML documents into the JSON payloads expected by
//! Grafana and writes them to stdout. Diagnostics go to stderr so the output
//! can be piped directly into provisioning tooling.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Args, Parser, Subcommand};
use grafana_compose::{Error, load_alerting, load_logs_panel};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Command line interface compiling monitoring documents.
#[derive(Debug, Parser,)]
#[command(name = "grafana-compose", version, about = "Compile alerting and dashboard documents")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Build an alertmanager configuration from a YAML document.
    Alerting(CompileArgs,),
    /// Decode a logs panel document into a one-row dashboard.
    #[command(name = "logs-panel")]
    LogsPanel(CompileArgs,),
}

#[derive(Debug, Args,)]
/// Arguments shared by every compile command.
struct CompileArgs
{
    /// Path to the YAML document.
    #[arg(long = "config", value_name = "PATH", env = "GRAFANA_COMPOSE_CONFIG")]
    config: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main()
{
    init_tracing();

    if let Err(error,) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from document loading, validation and
/// serialization.
fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Alerting(args,) => {
            let manager = load_alerting(&args.config,)?;
            write_document(&mut handle, manager.payload(), args.pretty,)
        }
        Command::LogsPanel(args,) => {
            let dashboard = load_logs_panel(&args.config,)?;
            write_document(&mut handle, &dashboard, args.pretty,)
        }
    }
}

fn write_document<W: io::Write, T: Serialize,>(
    writer: &mut W,
    document: &T,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, document,)?;
    } else {
        serde_json::to_writer(writer, document,)?;
    }

    Ok((),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, io::Cursor};

    use clap::Parser;
    use grafana_compose::{Manager, contact_point, contact_points, load_alerting};
    use tempfile::tempdir;

    use super::{Cli, Command, write_document};

    #[test]
    fn alerting_subcommand_parses_config_and_pretty()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "alerting",
            "--config",
            "alerting.yaml",
            "--pretty",
        ],)
        .expect("failed to parse CLI",);

        match cli.command {
            Command::Alerting(args,) => {
                assert_eq!(args.config.to_str(), Some("alerting.yaml"));
                assert!(args.pretty);
            }
            other => panic!("unexpected command variant: {other:?}"),
        }
    }

    #[test]
    fn logs_panel_subcommand_defaults_to_compact_output()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "logs-panel",
            "--config",
            "panel.yaml",
        ],)
        .expect("failed to parse CLI",);

        match cli.command {
            Command::LogsPanel(args,) => assert!(!args.pretty),
            other => panic!("unexpected command variant: {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required()
    {
        assert!(Cli::try_parse_from([env!("CARGO_PKG_NAME")],).is_err());
    }

    #[test]
    fn compact_writer_emits_single_line()
    {
        let manager = Manager::new([contact_points([contact_point("team-a",)],)],)
            .expect("expected manager to build",);

        let mut buffer = Cursor::new(Vec::new(),);
        write_document(&mut buffer, manager.payload(), false,).expect("failed to serialize",);

        let output = String::from_utf8(buffer.into_inner(),).expect("invalid UTF-8",);
        assert_eq!(
            output,
            r#"{"template_files":{},"alertmanager_config":{"receivers":[{"name":"team-a"}],"route":{"receiver":"team-a"}}}"#
        );
    }

    #[test]
    fn pretty_writer_matches_manager_indentation()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("alerting.yaml",);
        let yaml = r"
contact_points:
  - name: team-a
routing:
  - to: team-a
    if_labels:
      - { label: owner, value: team-a }
";
        fs::write(&config_path, yaml,).expect("failed to write config",);

        let manager = load_alerting(&config_path,).expect("expected alerting document",);
        let mut buffer = Cursor::new(Vec::new(),);
        write_document(&mut buffer, manager.payload(), true,).expect("failed to serialize",);

        let expected = manager.marshal_indent_json().expect("expected indented JSON",);
        assert_eq!(buffer.into_inner(), expected);
    }
}

mod cli;
mod config;
mod report;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use dialoguer::Select;
use paramscan_core::application::PANEL_NAME;
use paramscan_core::{
    CommandResult, DialogSession, ParameterScanner, ParameterScannerApp, Ribbon, ScanCommand,
    SCAN_COMMAND_ID,
};
use paramscan_ifc::IfcDocument;
use paramscan_model::ScanMode;
use report::Report;
use std::path::PathBuf;
use terminal::{DialogExit, TerminalDialog, TerminalNotifier};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut options = config.ifc;
    if let Some(view) = cli.view {
        options.active_view = view;
    }

    let mut doc = IfcDocument::open(&cli.file, options)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;
    tracing::info!(
        elements = doc.element_count(),
        schema = doc.schema().unwrap_or("unknown"),
        "document ready"
    );

    let scanner = ParameterScanner::with_config(config.scanner);
    if cli.interactive {
        run_interactive(&mut doc, scanner)
    } else {
        run_once(&cli, &mut doc, scanner)
    }
}

/// One request, as if typed into the dialog and clicked.
fn run_once(cli: &Cli, doc: &mut IfcDocument, scanner: ParameterScanner) -> Result<()> {
    let mut notifier = TerminalNotifier::new(cli.json);
    let mut dialog = TerminalDialog::new(scanner);
    let form = dialog.form_mut();
    form.set_parameter_name(cli.name.clone().unwrap_or_default());
    form.set_parameter_value(cli.value.clone());

    let mode = if cli.isolate { ScanMode::Isolate } else { ScanMode::Select };
    let notice = match mode {
        ScanMode::Select => form.click_select(doc, &mut notifier),
        ScanMode::Isolate => form.click_isolate(doc, &mut notifier),
    };

    if cli.json {
        let query = form.query(mode);
        let report = Report::new(cli.file.display().to_string(), doc, &query, &notice);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

/// Ribbon as a menu; the scan button opens (or refocuses) the dialog.
fn run_interactive(doc: &mut IfcDocument, scanner: ParameterScanner) -> Result<()> {
    let mut notifier = TerminalNotifier::new(false);
    let mut ribbon = Ribbon::new();
    let app = ParameterScannerApp;
    app.on_startup(&mut ribbon, &asset_dir(), &mut notifier);

    let mut session: DialogSession<TerminalDialog> = DialogSession::new();
    loop {
        let mut items: Vec<String> = ribbon
            .buttons()
            .map(|button| match &button.tooltip {
                Some(tooltip) => format!("{} - {}", button.data.text.replace('\n', " "), tooltip),
                None => button.data.text.replace('\n', " "),
            })
            .collect();
        let commands: Vec<String> = ribbon
            .buttons()
            .map(|button| button.data.command_id.clone())
            .collect();
        items.push("Reset Temporary Hide/Isolate".to_string());
        items.push("Quit".to_string());

        let choice = Select::new()
            .with_prompt(PANEL_NAME)
            .items(&items)
            .default(0)
            .interact()?;

        match commands.get(choice).map(String::as_str) {
            Some(SCAN_COMMAND_ID) => {
                let result = ScanCommand.execute(
                    &mut session,
                    || Ok::<_, anyhow::Error>(TerminalDialog::new(scanner.clone())),
                    &mut notifier,
                );
                if result == CommandResult::Failed {
                    continue;
                }
                let exit = match session.dialog_mut() {
                    Some(dialog) => dialog.run(doc, &mut notifier)?,
                    None => continue,
                };
                if exit == DialogExit::Closed {
                    session.close();
                }
            }
            Some(other) => tracing::warn!(command = other, "no handler for command"),
            None if choice == commands.len() => {
                doc.clear_isolation();
                println!("Temporary isolation reset.");
            }
            None => break,
        }
    }

    app.on_shutdown();
    tracing::debug!(notices = notifier.shown(), "session ended");
    Ok(())
}

/// Directory the ribbon icon is resolved against: next to the binary.
fn asset_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

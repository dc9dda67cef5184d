//! CLI entry point for uibot
//!
//! Provides command-line interface for building widget configs,
//! checking them, simulating clicks and listing the widget catalog.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use uibot::config::{expand_path, load_widget_config, write_output, BuildOptions};
use uibot::core::UiBuilder;
use uibot::toolkit::headless::{ServerCall, UiApp};
use uibot::toolkit::{Toolkit, WidgetId};

#[derive(Parser)]
#[command(name = "uibot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Key holding each node's widget type
    #[arg(long, global = true, default_value = "type")]
    type_key: String,

    /// Type tag of the two-column composite form
    #[arg(long, global = true, default_value = "HorizontalForm")]
    form_type: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a config and print the resulting widget tree as JSON
    Build {
        /// Path to the widget config (JSON)
        config: String,

        /// Write the snapshot to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Build a config and report what it produced
    Check {
        /// Path to the widget config (JSON)
        config: String,
    },

    /// Build a config and simulate a click on an element
    Click {
        /// Path to the widget config (JSON)
        config: String,

        /// Id of the element to click
        id: String,
    },

    /// List available widget types and their properties
    Widgets,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG overrides the flag
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let options = BuildOptions {
        type_key: cli.type_key,
        form_type: cli.form_type,
    };

    match cli.command {
        Commands::Build {
            config,
            output,
            compact,
        } => build(&config, output.as_deref(), compact, options)?,
        Commands::Check { config } => check(&config, options)?,
        Commands::Click { config, id } => click(&config, &id, options)?,
        Commands::Widgets => list_widgets(),
    }

    Ok(())
}

/// Loads, builds and finalizes a config
fn build_app(config_path: &str, options: BuildOptions) -> anyhow::Result<UiApp> {
    let config = load_widget_config(config_path)
        .with_context(|| format!("Failed to load {}", config_path))?;

    let app = UiBuilder::from_config_with_options(UiApp::create_application(), &config, options)
        .and_then(UiBuilder::finalize)
        .with_context(|| format!("Failed to build {}", config_path))?;

    Ok(app)
}

/// Print or write the snapshot of a built config
fn build(
    config_path: &str,
    output: Option<&str>,
    compact: bool,
    options: BuildOptions,
) -> anyhow::Result<()> {
    let app = build_app(config_path, options)?;
    let snapshot = app.snapshot();

    let json = if compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };

    match output {
        Some(output) => {
            let path: PathBuf = expand_path(output)?;
            write_output(&path, &format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote snapshot to {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Build a config and summarise the result
fn check(config_path: &str, options: BuildOptions) -> anyhow::Result<()> {
    println!("{} Building config: {}", "→".cyan(), config_path);

    let app = build_app(config_path, options)?;

    // Root container is not a created widget
    let widgets = app.widget_count().saturating_sub(1);
    let handlers = app.handler_count();

    println!(
        "{} Built {} widget{}",
        "✓".green(),
        widgets,
        if widgets == 1 { "" } else { "s" }
    );
    println!(
        "{} Attached {} handler{}",
        "✓".green(),
        handlers,
        if handlers == 1 { "" } else { "s" }
    );
    println!("\n{} {}", "✓".green().bold(), "Config is valid!".bold());

    Ok(())
}

/// Build a config, click an element and report what changed
fn click(config_path: &str, id: &str, options: BuildOptions) -> anyhow::Result<()> {
    let mut app = build_app(config_path, options)?;
    let target = app
        .element_by_id(id)
        .with_context(|| format!("Cannot click '{}'", id))?;

    let before = flags(&app);
    let calls = app.click(target)?;
    let after = flags(&app);

    println!("{} Clicked {}", "→".cyan(), id.bold());

    let mut changes = 0;
    for (index, (old, new)) in before.iter().zip(after.iter()).enumerate() {
        let widget = WidgetId::from_index(index);
        let label = app
            .widget(widget)
            .and_then(|state| state.id())
            .map(str::to_string)
            .unwrap_or_else(|| widget.to_string());

        if old.0 != new.0 {
            println!("  {} {} visible → {}", "•".dimmed(), label.cyan(), new.0);
            changes += 1;
        }
        if old.1 != new.1 {
            println!("  {} {} enabled → {}", "•".dimmed(), label.cyan(), new.1);
            changes += 1;
        }
    }

    for call in &calls {
        print_server_call(call)?;
    }

    if changes == 0 && calls.is_empty() {
        println!("{}", "No handlers fired".yellow());
    }

    Ok(())
}

/// Visibility and enabled state of every widget, indexed by handle
fn flags(app: &UiApp) -> Vec<(bool, bool)> {
    (0..app.widget_count())
        .filter_map(|index| app.widget(WidgetId::from_index(index)))
        .map(|state| (state.is_visible(), state.is_enabled()))
        .collect()
}

fn print_server_call(call: &ServerCall) -> anyhow::Result<()> {
    println!(
        "  {} callback {} {}",
        "⇢".magenta(),
        call.callback.green().bold(),
        serde_json::to_string(&call.parameters)?
    );
    Ok(())
}

/// List catalog types, aliases and setters
fn list_widgets() {
    let app = UiApp::create_application();
    let catalog = app.catalog();

    let mut names = catalog.type_names();
    names.sort_unstable();

    println!("{}", "Widget types:\n".bold());
    for name in names {
        let Some(class) = catalog.get(name) else {
            continue;
        };
        let mut setters = class.setter_names();
        setters.sort_unstable();
        println!("{} → {}", name.cyan().bold(), setters.join(", "));
    }

    let mut aliases: Vec<_> = catalog.aliases().collect();
    if !aliases.is_empty() {
        aliases.sort_unstable();
        println!("\n{}", "Aliases:".bold());
        for (alias, target) in aliases {
            println!("{} → {}", alias.cyan(), target);
        }
    }
}

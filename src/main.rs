/// wiretap - inspect and replay wiretap configurations
///
/// Usage:
///   wiretap check <config> [--strict]
///   wiretap replay <config> <actions>

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wiretap::config::schema;
use wiretap::{Action, Config, StateView, Store, Wiretap};

#[derive(Parser)]
#[command(version, about = "Inspect and replay wiretap configurations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a configuration and print its points and trigger index
    Check {
        config: PathBuf,
        /// Reject configurations that do not match the schema
        #[arg(long)]
        strict: bool,
    },
    /// Replay a JSON array of actions through a wiretapped store
    Replay {
        config: PathBuf,
        actions: PathBuf,
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Check { config, strict } => check(&config, strict),
        Commands::Replay {
            config,
            actions,
            strict,
        } => replay(&config, &actions, strict),
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_raw_config(path: &Path, strict: bool) -> Result<Value> {
    let raw = read_json(path)?;
    if strict {
        schema::validate(&raw)?;
    }
    Ok(raw)
}

fn check(path: &Path, strict: bool) -> Result<()> {
    let raw = load_raw_config(path, strict)?;
    let tap: Wiretap = Wiretap::from_value(&raw);

    println!("✓ Configuration loaded: {}", path.display());
    println!("\nPoints defined: {}", tap.config().points.len());
    for (i, point) in tap.config().points.iter().enumerate() {
        println!("  Point {}: {:?}", i + 1, point.trigger_action.action_types());
    }

    println!("\nTrigger index: {:?}", tap.index().action_types());
    println!("Initial vars: {}", tap.vars().get());

    Ok(())
}

/// Shallow-merge an action's payload into an object state
fn merge_payload(state: &Value, action: &Action) -> Value {
    let mut next = state.as_object().cloned().unwrap_or_default();
    for (key, value) in &action.payload {
        next.insert(key.clone(), value.clone());
    }
    Value::Object(next)
}

fn replay(config_path: &Path, actions_path: &Path, strict: bool) -> Result<()> {
    let raw = load_raw_config(config_path, strict)?;
    let actions: Vec<Action> = serde_json::from_value(read_json(actions_path)?)
        .with_context(|| format!("{} is not an array of actions", actions_path.display()))?;

    let fired = Rc::new(Cell::new(0usize));
    let counter = fired.clone();

    let config = Config::from_value(&raw)
        .with_before_any_action(|ctx| {
            debug!(action_type = %ctx.action.action_type, "dispatch");
            Ok(())
        })
        .with_callback(move |data, ctx| {
            counter.set(counter.get() + 1);
            info!(
                action_type = %ctx.action.action_type,
                data = %data.map(serde_json::Value::to_string).unwrap_or_else(|| "undefined".to_string()),
                "point fired"
            );
            Ok(())
        })
        .with_after_any_action(|ctx| {
            debug!(vars = %ctx.get_vars(), "dispatch complete");
            Ok(())
        });

    let store = Store::new(Value::Object(Default::default()), merge_payload).with_middleware(Wiretap::new(config));

    for action in actions {
        store.dispatch(action)?;
    }

    println!("Replayed actions, {} point(s) fired", fired.get());
    println!("{}", serde_json::to_string_pretty(&store.state())?);

    Ok(())
}

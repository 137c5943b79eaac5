//! Configuration inspection command.
//!
//! - Show the merged configuration with the source of each value
//! - Get one value
//! - Show config file paths

use crate::cli::ConfigArgs;
use crate::config::{
    CliOverrides, ConfigLayer, ConfigPaths, default_config_layer, load_optional,
    normalize_key,
};
use crate::error::{LabError, Result};
use crate::git::GitRepo;
use crate::output::OutputContext;
use serde::Serialize;
use serde_json::json;
use std::env;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum ConfigSource {
    Default,
    LegacyUser,
    User,
    Project,
    Environment,
    Cli,
}

impl ConfigSource {
    const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::LegacyUser => "legacy user",
            Self::User => "user config",
            Self::Project => "project",
            Self::Environment => "environment",
            Self::Cli => "cli",
        }
    }
}

#[derive(Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
    source: ConfigSource,
}

struct LayerWithSource {
    source: ConfigSource,
    layer: ConfigLayer,
}

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or `--get` names a
/// key with no value.
pub fn execute(args: &ConfigArgs, overrides: &CliOverrides, ctx: &OutputContext) -> Result<()> {
    let work_tree = discover_work_tree();
    let paths = ConfigPaths::from_env(work_tree.as_deref());

    if args.path {
        return show_paths(&paths, ctx);
    }

    let layers = build_layers(&paths, ConfigLayer::from_env(), overrides)?;
    match requested_action(args) {
        ConfigAction::Get(key) => get_config_value(key, &layers, ctx),
        ConfigAction::List => show_config(&layers, ctx),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConfigAction<'a> {
    List,
    Get(&'a str),
}

/// `--list` is explicit; with no `--get` it is also the default.
fn requested_action(args: &ConfigArgs) -> ConfigAction<'_> {
    match (&args.get, args.list) {
        (Some(key), false) => ConfigAction::Get(key),
        _ => ConfigAction::List,
    }
}

fn discover_work_tree() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    let repo = GitRepo::discover(&cwd).ok()?;
    repo.work_tree().ok()
}

fn build_layers(
    paths: &ConfigPaths,
    env_layer: ConfigLayer,
    overrides: &CliOverrides,
) -> Result<Vec<LayerWithSource>> {
    Ok(vec![
        LayerWithSource {
            source: ConfigSource::Default,
            layer: default_config_layer(),
        },
        LayerWithSource {
            source: ConfigSource::LegacyUser,
            layer: load_optional(paths.legacy_user.as_deref())?,
        },
        LayerWithSource {
            source: ConfigSource::User,
            layer: load_optional(paths.user.as_deref())?,
        },
        LayerWithSource {
            source: ConfigSource::Project,
            layer: load_optional(paths.project.as_deref())?,
        },
        LayerWithSource {
            source: ConfigSource::Environment,
            layer: env_layer,
        },
        LayerWithSource {
            source: ConfigSource::Cli,
            layer: overrides.as_layer(),
        },
    ])
}

fn merged_entries(layers: &[LayerWithSource]) -> Vec<ConfigEntry> {
    let mut merged = ConfigLayer::default();
    for layer in layers {
        merged.merge_from(&layer.layer);
    }
    merged
        .values
        .into_iter()
        .map(|(key, value)| {
            let source = resolve_source(&key, layers);
            ConfigEntry { key, value, source }
        })
        .collect()
}

fn resolve_source(key: &str, layers: &[LayerWithSource]) -> ConfigSource {
    layers
        .iter()
        .rev()
        .find(|layer| layer.layer.values.contains_key(key))
        .map_or(ConfigSource::Default, |layer| layer.source)
}

fn show_config(layers: &[LayerWithSource], ctx: &OutputContext) -> Result<()> {
    let entries = merged_entries(layers);
    debug!(count = entries.len(), "Showing merged config");

    if ctx.is_json() {
        return ctx.json(&entries);
    }
    for entry in &entries {
        ctx.print(&format!(
            "{} = {}  ({})",
            entry.key,
            entry.value,
            entry.source.label()
        ));
    }
    Ok(())
}

fn get_config_value(key: &str, layers: &[LayerWithSource], ctx: &OutputContext) -> Result<()> {
    let entries = merged_entries(layers);
    let wanted = normalize_key(key);
    let entry = entries
        .iter()
        .find(|entry| entry.key == wanted)
        .ok_or_else(|| LabError::Config(format!("no value for '{key}'")))?;

    if ctx.is_json() {
        return ctx.json(entry);
    }
    ctx.print(&entry.value);
    Ok(())
}

fn show_paths(paths: &ConfigPaths, ctx: &OutputContext) -> Result<()> {
    let describe = |path: Option<&PathBuf>| {
        path.map_or_else(
            || "(none)".to_string(),
            |path| {
                let status = if path.exists() { "exists" } else { "not found" };
                format!("{} ({status})", path.display())
            },
        )
    };

    if ctx.is_json() {
        let display = |path: Option<&PathBuf>| path.map(|p| p.display().to_string());
        return ctx.json(&json!({
            "legacy_user_config": display(paths.legacy_user.as_ref()),
            "user_config": display(paths.user.as_ref()),
            "project_config": display(paths.project.as_ref()),
        }));
    }

    ctx.field("Legacy user config", &describe(paths.legacy_user.as_ref()));
    ctx.field("User config", &describe(paths.user.as_ref()));
    ctx.field("Project config", &describe(paths.project.as_ref()));
    Ok(())
}

//! Configuration management for `lab_rust`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`LAB_*`)
//! 3. Project config (`<work tree>/.lab.yaml`)
//! 4. User config (`$XDG_CONFIG_HOME/lab/config.yaml` or `~/.config/lab/config.yaml`)
//! 5. Legacy user config (`~/.lab/config.yml`)
//! 6. Defaults

use crate::editor::CommentMarker;
use crate::error::Result;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Host used when nothing else is configured.
pub const DEFAULT_HOST: &str = "gitlab.com";
/// Editor used when neither config, git nor the environment name one.
pub const FALLBACK_EDITOR: &str = "vi";

const DEFAULT_COMMENT_OPEN: &str = "<!--";
const DEFAULT_COMMENT_CLOSE: &str = "-->";
const PROJECT_CONFIG_FILENAME: &str = ".lab.yaml";

/// One layer of flattened `key -> value` configuration.
///
/// Nested YAML mappings are flattened to dotted keys (`comment.open`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: BTreeMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `LAB_*` variables in `vars`.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix("LAB_") {
                for variant in env_key_variants(stripped) {
                    layer.values.insert(variant, value.clone());
                }
            }
        }
        layer
    }

    /// First value present under any of `keys`.
    #[must_use]
    pub fn get(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.values.get(&normalize_key(key)))
            .map(String::as_str)
    }

    /// Like [`get`](Self::get), ignoring blank values.
    fn get_non_blank(&self, keys: &[&str]) -> Option<&str> {
        self.get(keys)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        if let Some(host) = &self.host {
            layer.insert("host", host.clone());
        }
        layer
    }
}

/// Where configuration files are looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    pub legacy_user: Option<PathBuf>,
    pub user: Option<PathBuf>,
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Resolve file locations from explicit home/XDG directories.
    #[must_use]
    pub fn resolve(
        home: Option<&Path>,
        xdg_config_home: Option<&Path>,
        work_tree: Option<&Path>,
    ) -> Self {
        let user_base = xdg_config_home
            .filter(|dir| dir.is_absolute())
            .map(Path::to_path_buf)
            .or_else(|| home.map(|home| home.join(".config")));
        Self {
            legacy_user: home.map(|home| home.join(".lab").join("config.yml")),
            user: user_base.map(|base| base.join("lab").join("config.yaml")),
            project: work_tree.map(|tree| tree.join(PROJECT_CONFIG_FILENAME)),
        }
    }

    /// Resolve file locations from `HOME` and `XDG_CONFIG_HOME`.
    #[must_use]
    pub fn from_env(work_tree: Option<&Path>) -> Self {
        let home = env::var_os("HOME").map(PathBuf::from);
        let xdg = env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
        Self::resolve(home.as_deref(), xdg.as_deref(), work_tree)
    }
}

/// Layer from an optional YAML path; `None` or a missing file is empty.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_optional(path: Option<&Path>) -> Result<ConfigLayer> {
    path.map_or_else(|| Ok(ConfigLayer::default()), ConfigLayer::from_yaml)
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.insert("host", DEFAULT_HOST);
    layer.insert("comment.open", DEFAULT_COMMENT_OPEN);
    layer.insert("comment.close", DEFAULT_COMMENT_CLOSE);
    layer
}

/// Load configuration from files, an environment layer and CLI overrides.
///
/// # Errors
///
/// Returns an error if any config file exists but cannot be read or parsed.
pub fn load_config_from(
    paths: &ConfigPaths,
    env_layer: ConfigLayer,
    cli: &CliOverrides,
) -> Result<ConfigLayer> {
    let legacy_user = load_optional(paths.legacy_user.as_deref())?;
    let user = load_optional(paths.user.as_deref())?;
    let project = load_optional(paths.project.as_deref())?;

    Ok(ConfigLayer::merge_layers(&[
        default_config_layer(),
        legacy_user,
        user,
        project,
        env_layer,
        cli.as_layer(),
    ]))
}

/// Load configuration with the classic precedence order.
///
/// # Errors
///
/// Returns an error if any config file exists but cannot be read or parsed.
pub fn load_config(work_tree: Option<&Path>, cli: &CliOverrides) -> Result<ConfigLayer> {
    load_config_from(
        &ConfigPaths::from_env(work_tree),
        ConfigLayer::from_env(),
        cli,
    )
}

/// Host the selector matches remotes against.
#[must_use]
pub fn known_host(layer: &ConfigLayer) -> String {
    layer
        .get_non_blank(&["host"])
        .unwrap_or(DEFAULT_HOST)
        .to_string()
}

/// Comment marker stripped from edited messages.
///
/// # Errors
///
/// Returns a config error if a configured marker is blank.
pub fn comment_marker(layer: &ConfigLayer) -> Result<CommentMarker> {
    let open = layer.get(&["comment.open"]).unwrap_or(DEFAULT_COMMENT_OPEN);
    let close = layer.get(&["comment.close"]).unwrap_or(DEFAULT_COMMENT_CLOSE);
    CommentMarker::new(open.trim(), close.trim())
}

/// Editor command: config, then git's own editor, then `VISUAL`/`EDITOR`.
#[must_use]
pub fn resolve_editor(layer: &ConfigLayer, git_editor: Option<String>) -> String {
    resolve_editor_with(layer, git_editor, |name| env::var(name).ok())
}

fn resolve_editor_with(
    layer: &ConfigLayer,
    git_editor: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    if let Some(editor) = layer.get_non_blank(&["editor"]) {
        return editor.to_string();
    }
    git_editor
        .into_iter()
        .chain(lookup("VISUAL"))
        .chain(lookup("EDITOR"))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Browser command: config, then the platform opener.
#[must_use]
pub fn resolve_browser(layer: &ConfigLayer) -> String {
    layer
        .get_non_blank(&["browser"])
        .map_or_else(|| platform_browser().to_string(), str::to_string)
}

const fn platform_browser() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "cmd /C start \"\""
    } else {
        "xdg-open"
    }
}

/// Canonical spelling of a config key.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn env_key_variants(raw: &str) -> Vec<String> {
    let raw_lower = raw.to_lowercase();
    let mut variants = vec![raw_lower.replace('_', "."), raw_lower.replace('_', "-")];
    variants.dedup();
    variants
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut flat = BTreeMap::new();
    flatten_yaml(value, "", &mut flat);

    let mut layer = ConfigLayer::default();
    for (key, value) in flat {
        layer.insert(&key, value);
    }
    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut BTreeMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}

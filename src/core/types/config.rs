use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color // None has semantic meaning (auto-detect)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StalenessConfig {
    /// Glob patterns excluded from the staleness walk, in addition to the
    /// conventional bin/obj build outputs.
    pub ignore: Option<Vec<String>>,
}

impl StalenessConfig {
    pub fn ignore(&self) -> &[String] {
        self.ignore.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    // Top-level fields
    pub dotnet: Option<String>,
    pub test_suffix: Option<String>,
    pub project_extension: Option<String>,
    pub output_dir: Option<String>,

    // Nested sections
    pub log: Option<LogConfig>,
    pub staleness: Option<StalenessConfig>,
}

impl Config {
    /// External command used for all solution, reference, and mutation-test
    /// calls. Looked up on PATH when not an absolute path.
    pub fn dotnet(&self) -> &str {
        self.dotnet.as_deref().unwrap_or("dotnet")
    }

    /// Naming convention marking a project as a test project.
    pub fn test_suffix(&self) -> &str {
        self.test_suffix.as_deref().unwrap_or(".Tests")
    }

    pub fn project_extension(&self) -> &str {
        self.project_extension.as_deref().unwrap_or("csproj")
    }

    /// Output directory the mutation-test command writes into, relative to
    /// the working directory.
    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or("StrykerOutput")
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn staleness(&self) -> StalenessConfig {
        self.staleness.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dotnet: Option<String>,
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
}

pub const CONFIG_FILENAME: &str = "muster.toml";

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        // Apply nearest config file found by walking up from cwd
        if let Some(path) = find_nearest_config_file()
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file()
        && let Some(file_cfg) = read_config_file(&path)
    {
        apply_file_config(&mut cfg, &file_cfg);
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides);

    let _ = CONFIG.set(cfg);
}

fn read_config_file(path: &Path) -> Option<Config> {
    match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<Config>(&contents).ok(),
        Err(_) => None,
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    // Merge top-level fields
    if file.dotnet.is_some() {
        cfg.dotnet = file.dotnet.clone();
    }
    if file.test_suffix.is_some() {
        cfg.test_suffix = file.test_suffix.clone();
    }
    if file.project_extension.is_some() {
        cfg.project_extension = file.project_extension.clone();
    }
    if file.output_dir.is_some() {
        cfg.output_dir = file.output_dir.clone();
    }

    // Merge log section
    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }

    // Merge staleness section
    if let Some(file_staleness) = &file.staleness {
        let mut staleness = cfg.staleness.clone().unwrap_or_default();
        if let Some(patterns) = &file_staleness.ignore {
            staleness.ignore = Some(
                staleness
                    .ignore()
                    .iter()
                    .chain(patterns.iter())
                    .cloned()
                    .collect(),
            );
        }
        cfg.staleness = Some(staleness);
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    if overrides.dotnet.is_some() {
        cfg.dotnet = overrides.dotnet.clone();
    }

    // Log overrides
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}

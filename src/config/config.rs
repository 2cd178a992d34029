use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::stamp::error::StampError;
use crate::stamp::patterns::{PatternSet, PatternSpec, GENERAL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pattern set \"{0}\" is not defined (built-in sets: general, legacy)")]
    UnknownPatternSet(String),
    #[error("pattern set \"{name}\" uses unknown base \"{base}\"")]
    UnknownBase { name: String, base: String },
    #[error("pattern set \"{name}\" is invalid: {source}")]
    InvalidPatternSet {
        name: String,
        #[source]
        source: StampError,
    },
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub pattern_set: Option<String>,
    pub pattern_sets: Option<HashMap<String, FilePatternSet>>,
}

/// A custom set declared under `[pattern_sets.<name>]`. Unset regexes fall
/// back to the base set.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FilePatternSet {
    pub base: Option<String>,
    pub kokoro_release_train: Option<String>,
    pub rapid_release_train: Option<String>,
    pub scm_branch_release_train: Option<String>,
    pub rapid_rc_number: Option<String>,
    pub extra_defaults: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub pattern_set_name: String,
    pub spec: PatternSpec,
}

impl Config {
    pub fn create(pattern_set: Option<String>) -> Result<Self, ConfigError> {
        let (_, file_cfg) = load_file_config_with_path();
        Self::from_file_config(pattern_set, &file_cfg)
    }

    /// Pattern set precedence: CLI > BUILDSTAMP_PATTERN_SET > config file > general.
    pub fn from_file_config(
        pattern_set: Option<String>,
        file_cfg: &FileConfig,
    ) -> Result<Self, ConfigError> {
        let name = pattern_set
            .or_else(|| env::var("BUILDSTAMP_PATTERN_SET").ok().filter(|s| !s.is_empty()))
            .or_else(|| file_cfg.pattern_set.clone())
            .unwrap_or_else(|| GENERAL.to_string());
        let spec = resolve_spec(&name, file_cfg)?;
        Ok(Config {
            pattern_set_name: name,
            spec,
        })
    }

    pub fn patterns(&self) -> Result<PatternSet, ConfigError> {
        self.spec
            .compile()
            .map_err(|source| ConfigError::InvalidPatternSet {
                name: self.pattern_set_name.clone(),
                source,
            })
    }
}

fn resolve_spec(name: &str, file_cfg: &FileConfig) -> Result<PatternSpec, ConfigError> {
    // Config file entries may shadow built-in names.
    let custom = file_cfg.pattern_sets.as_ref().and_then(|sets| sets.get(name));
    let Some(custom) = custom else {
        return PatternSpec::builtin(name)
            .ok_or_else(|| ConfigError::UnknownPatternSet(name.to_string()));
    };

    let base_name = custom.base.as_deref().unwrap_or(GENERAL);
    let mut spec = PatternSpec::builtin(base_name).ok_or_else(|| ConfigError::UnknownBase {
        name: name.to_string(),
        base: base_name.to_string(),
    })?;
    if let Some(re) = &custom.kokoro_release_train {
        spec.kokoro_release_train = re.clone();
    }
    if let Some(re) = &custom.rapid_release_train {
        spec.rapid_release_train = re.clone();
    }
    if let Some(re) = &custom.scm_branch_release_train {
        spec.scm_branch_release_train = re.clone();
    }
    if let Some(re) = &custom.rapid_rc_number {
        spec.rapid_rc_number = re.clone();
    }
    if let Some(extra) = &custom.extra_defaults {
        spec.defaults
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Ok(spec)
}

pub fn load_file_config_with_path() -> (PathBuf, FileConfig) {
    // Allow tests/users to override config dir via BUILDSTAMP_CONFIG_DIR; else use platform default
    let cfg_dir = if let Ok(p) = env::var("BUILDSTAMP_CONFIG_DIR") {
        PathBuf::from(p)
    } else {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    };
    let path = cfg_dir.join("buildstamp").join("config.toml");
    let cfg = match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<FileConfig>(&s).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            FileConfig::default()
        }),
        Err(_) => FileConfig::default(),
    };
    (path, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> FileConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn cli_choice_beats_file() {
        let file = parse("pattern_set = \"legacy\"\n");
        let cfg = Config::from_file_config(Some("general".into()), &file).unwrap();
        assert_eq!(cfg.pattern_set_name, "general");
        assert_eq!(cfg.spec, PatternSpec::general());
    }

    #[test]
    fn custom_set_overrides_base_and_adds_defaults() {
        let file = parse(
            r#"
[pattern_sets.mine]
base = "legacy"
kokoro_release_train = '(\d{4}\.R\d+)/release'
extra_defaults = { STABLE_BUILD_SCM_STATUS = "clean", TEAM = "kernel" }
"#,
        );
        let cfg = Config::from_file_config(Some("mine".into()), &file).unwrap();
        assert_eq!(cfg.spec.kokoro_release_train, r"(\d{4}\.R\d+)/release");
        assert_eq!(
            cfg.spec.scm_branch_release_train,
            PatternSpec::legacy().scm_branch_release_train
        );
        assert_eq!(cfg.spec.defaults["STABLE_BUILD_SCM_STATUS"], "clean");
        assert_eq!(cfg.spec.defaults["TEAM"], "kernel");
        assert!(cfg.patterns().is_ok());
    }

    #[test]
    fn unknown_names_are_errors() {
        let file = FileConfig::default();
        assert!(matches!(
            Config::from_file_config(Some("nope".into()), &file),
            Err(ConfigError::UnknownPatternSet(n)) if n == "nope"
        ));
        let file = parse("[pattern_sets.x]\nbase = \"ancient\"\n");
        assert!(matches!(
            Config::from_file_config(Some("x".into()), &file),
            Err(ConfigError::UnknownBase { .. })
        ));
    }

    #[test]
    fn bad_regex_surfaces_on_compile() {
        let file = parse("[pattern_sets.broken]\nrapid_rc_number = \"(\"\n");
        let cfg = Config::from_file_config(Some("broken".into()), &file).unwrap();
        assert!(matches!(
            cfg.patterns(),
            Err(ConfigError::InvalidPatternSet { name, .. }) if name == "broken"
        ));
    }
}

//! Rule override files
//!
//! Any rule table can be replaced from a TOML file. Tables left out of the
//! file keep their built-in contents.
//!
//! ## Resolution
//!
//! Rules are loaded with a two-layer resolution:
//! 1. An explicit path (must exist), else the default override location
//!    (~/.local/share/smsift/rules.toml) if present
//! 2. Fall back to the built-in tables

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::rules::{NamedPattern, RuleSet, RuleTables};

/// Where the effective rule set came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Contents of a rule override file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    #[serde(default)]
    pub spam_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub spam_patterns: Option<Vec<String>>,
    #[serde(default)]
    pub transaction_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub transaction_patterns: Option<Vec<String>>,
    #[serde(default)]
    pub debit_patterns: Option<Vec<NamedPattern>>,
    #[serde(default)]
    pub credit_patterns: Option<Vec<NamedPattern>>,
    #[serde(default)]
    pub merchant_patterns: Option<Vec<NamedPattern>>,
    #[serde(default)]
    pub non_merchant_words: Option<Vec<String>>,
}

impl RuleConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Overlay this config on the built-in tables
    pub fn into_tables(self) -> RuleTables {
        let mut tables = RuleTables::builtin();
        if let Some(v) = self.spam_keywords {
            tables.spam_keywords = v;
        }
        if let Some(v) = self.spam_patterns {
            tables.spam_patterns = v;
        }
        if let Some(v) = self.transaction_keywords {
            tables.transaction_keywords = v;
        }
        if let Some(v) = self.transaction_patterns {
            tables.transaction_patterns = v;
        }
        if let Some(v) = self.debit_patterns {
            tables.debit_patterns = v;
        }
        if let Some(v) = self.credit_patterns {
            tables.credit_patterns = v;
        }
        if let Some(v) = self.merchant_patterns {
            tables.merchant_patterns = v;
        }
        if let Some(v) = self.non_merchant_words {
            tables.non_merchant_words = v;
        }
        tables
    }

    pub fn compile(self) -> Result<RuleSet> {
        RuleSet::compile(&self.into_tables())
    }
}

/// A compiled rule set and where it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedRules {
    pub rules: RuleSet,
    pub source: RuleSource,
}

/// Default override path
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("smsift").join("rules.toml"))
}

/// Load rules (explicit path, then default override, then built-in)
pub fn load_rules(override_path: Option<&Path>) -> Result<LoadedRules> {
    load_rules_from(override_path, default_rules_path().as_deref())
}

/// Same as [`load_rules`] with the default override location supplied by
/// the caller
pub fn load_rules_from(
    override_path: Option<&Path>,
    default_path: Option<&Path>,
) -> Result<LoadedRules> {
    if let Some(path) = override_path {
        if !path.exists() {
            warn!("Rule file {} does not exist", path.display());
            return Err(Error::NotFound(format!(
                "rule file {}",
                path.display()
            )));
        }
        return load_file(path);
    }

    if let Some(path) = default_path {
        if path.exists() {
            return load_file(path);
        }
        debug!("No rule override at {}", path.display());
    }

    Ok(LoadedRules {
        rules: RuleSet::builtin()?,
        source: RuleSource::Builtin,
    })
}

fn load_file(path: &Path) -> Result<LoadedRules> {
    let rules = RuleConfig::from_file(path)?.compile()?;
    info!("Loaded rules from {}", path.display());
    Ok(LoadedRules {
        rules,
        source: RuleSource::File(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_builtin() {
        let config = RuleConfig::from_toml("").unwrap();
        assert_eq!(config, RuleConfig::default());
        assert_eq!(config.into_tables(), RuleTables::builtin());
    }

    #[test]
    fn test_partial_override_keeps_other_tables() {
        let config = RuleConfig::from_toml(
            r#"
spam_keywords = ["kyc expired"]

[[merchant_patterns]]
name = "at"
pattern = 'at\s+([A-Za-z ]+?)(?:\.|$)'
"#,
        )
        .unwrap();
        let tables = config.into_tables();
        assert_eq!(tables.spam_keywords, vec!["kyc expired".to_string()]);
        assert_eq!(tables.merchant_patterns.len(), 1);
        assert_eq!(tables.merchant_patterns[0].name, "at");
        assert_eq!(
            tables.transaction_keywords,
            RuleTables::builtin().transaction_keywords
        );
    }

    #[test]
    fn test_unknown_table_rejected() {
        let err = RuleConfig::from_toml("ham_keywords = [\"hi\"]").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_without_any_file_is_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rules.toml");
        let loaded = load_rules_from(None, Some(missing.as_path())).unwrap();
        assert_eq!(loaded.source, RuleSource::Builtin);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_rules_from(Some(missing.as_path()), None).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_explicit_path_wins_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let default = dir.path().join("default.toml");
        fs::write(&explicit, "spam_keywords = [\"explicit\"]").unwrap();
        fs::write(&default, "spam_keywords = [\"default\"]").unwrap();

        let loaded = load_rules_from(Some(explicit.as_path()), Some(default.as_path())).unwrap();
        assert_eq!(loaded.source, RuleSource::File(explicit.clone()));
        assert_eq!(loaded.rules.spam_keywords, vec!["explicit".to_string()]);

        let loaded = load_rules_from(None, Some(default.as_path())).unwrap();
        assert_eq!(loaded.source, RuleSource::File(default));
        assert_eq!(loaded.rules.spam_keywords, vec!["default".to_string()]);
    }

    #[test]
    fn test_bad_pattern_in_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "spam_patterns = [\"(oops\"]").unwrap();
        let err = load_rules_from(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, Error::Regex(_)));
    }
}

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::{Amount, AmountCodec},
    errors::{LedgerError, Result},
    ledger::{
        category::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES},
        CategoryCatalog,
    },
};

/// Environment variable that overrides the configuration base directory.
pub const HOME_ENV: &str = "WALLET_CORE_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Session preferences: money presentation, category lists and budget defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub grouping_separator: char,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
    /// Number of months shown in the income/expense series.
    pub history_months: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Amount>,
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            grouping_separator: ',',
            income_categories: DEFAULT_INCOME_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            expense_categories: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            history_months: 6,
            monthly_budget: None,
            seed_sample_data: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.history_months == 0 {
            return Err(LedgerError::Validation(
                "history_months must be at least 1".into(),
            ));
        }
        let separator = self.grouping_separator;
        if separator == '.' || separator == '+' || separator == '-' || separator.is_ascii_digit() {
            return Err(LedgerError::Validation(format!(
                "`{}` cannot be used as a grouping separator",
                separator
            )));
        }
        if self.currency_symbol.chars().any(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-')) {
            return Err(LedgerError::Validation(format!(
                "`{}` cannot be used as a currency symbol",
                self.currency_symbol
            )));
        }
        if let Some(limit) = self.monthly_budget {
            if !limit.is_positive() {
                return Err(LedgerError::Validation(
                    "monthly_budget must be a positive amount".into(),
                ));
            }
        }
        self.catalog().map(|_| ())
    }

    pub fn codec(&self) -> AmountCodec {
        AmountCodec::new(self.currency_symbol.clone(), self.grouping_separator)
    }

    pub fn catalog(&self) -> Result<CategoryCatalog> {
        CategoryCatalog::new(
            self.income_categories.iter().cloned(),
            self.expense_categories.iter().cloned(),
        )
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves the base directory from `WALLET_CORE_HOME`, falling back to the user config dir.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(Self::default_base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn default_base_dir() -> PathBuf {
        if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return PathBuf::from(home);
        }
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wallet_core")
    }

    /// Loads and validates the stored config, or the defaults when none exists yet.
    pub fn load(&self) -> Result<Config> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

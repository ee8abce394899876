//! Configuration management for genesis-surgeon
//!
//! Settings come from an optional TOML file with `[consolidate]`,
//! `[transplant]` and `[output]` tables. Every key is optional in the file;
//! command-line flags are overlaid on top, and the result is validated into a
//! [`ConsolidateConfig`] or [`TransplantConfig`] before any genesis file is
//! opened.

use crate::consolidate::{ConsolidationPlan, ValidatorIdentity};
use crate::error::{GenesisError, Result};
use crate::genesis::{OutputOptions, OutputTarget};
use crate::transplant::TransplantPlan;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub consolidate: ConsolidateSection,
    #[serde(default)]
    pub transplant: TransplantSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct ConsolidateSection {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub target_operator_address: Option<String>,
    pub target_consensus_pubkey: Option<String>,
    pub source_operator_address: Option<String>,
    pub prune_unused_validators: Option<bool>,
    pub genesis_time: Option<String>,
    pub chain_id: Option<String>,
}

impl ConsolidateSection {
    /// Values set in `overrides` win.
    pub fn overlay(self, overrides: ConsolidateSection) -> Self {
        ConsolidateSection {
            input: overrides.input.or(self.input),
            output: overrides.output.or(self.output),
            target_operator_address: overrides
                .target_operator_address
                .or(self.target_operator_address),
            target_consensus_pubkey: overrides
                .target_consensus_pubkey
                .or(self.target_consensus_pubkey),
            source_operator_address: overrides
                .source_operator_address
                .or(self.source_operator_address),
            prune_unused_validators: overrides
                .prune_unused_validators
                .or(self.prune_unused_validators),
            genesis_time: overrides.genesis_time.or(self.genesis_time),
            chain_id: overrides.chain_id.or(self.chain_id),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct TransplantSection {
    pub main: Option<PathBuf>,
    pub donor: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub genesis_time: Option<String>,
    pub chain_id: Option<String>,
}

impl TransplantSection {
    pub fn overlay(self, overrides: TransplantSection) -> Self {
        TransplantSection {
            main: overrides.main.or(self.main),
            donor: overrides.donor.or(self.donor),
            output: overrides.output.or(self.output),
            genesis_time: overrides.genesis_time.or(self.genesis_time),
            chain_id: overrides.chain_id.or(self.chain_id),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct OutputSection {
    pub pretty: Option<bool>,
    pub sort_keys: Option<bool>,
}

impl OutputSection {
    pub fn overlay(self, overrides: OutputSection) -> Self {
        OutputSection {
            pretty: overrides.pretty.or(self.pretty),
            sort_keys: overrides.sort_keys.or(self.sort_keys),
        }
    }

    pub fn options(self) -> OutputOptions {
        OutputOptions {
            pretty: self.pretty.unwrap_or(false),
            sort_keys: self.sort_keys.unwrap_or(false),
        }
    }
}

/// Everything a consolidation run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidateConfig {
    pub input: PathBuf,
    pub output: OutputTarget,
    pub output_options: OutputOptions,
    pub plan: ConsolidationPlan,
}

impl ConsolidateConfig {
    pub fn resolve(section: ConsolidateSection, output: OutputSection) -> Result<Self> {
        let input = require(section.input, "consolidate.input")?;
        let target = ValidatorIdentity::new(
            require(section.target_operator_address, "consolidate.target_operator_address")?,
            require(section.target_consensus_pubkey, "consolidate.target_consensus_pubkey")?,
        )?;
        let genesis_time = parse_genesis_time(&require(
            section.genesis_time,
            "consolidate.genesis_time",
        )?)?;
        let source_operator_address = section
            .source_operator_address
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ConsolidateConfig {
            input,
            output: OutputTarget::from_path(section.output),
            output_options: output.options(),
            plan: ConsolidationPlan {
                target,
                source_operator_address,
                prune_unused_validators: section
                    .prune_unused_validators
                    .unwrap_or_else(default_prune_unused),
                genesis_time,
                chain_id: section.chain_id.map(validate_chain_id).transpose()?,
            },
        })
    }
}

/// Everything a transplant run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TransplantConfig {
    pub main: PathBuf,
    pub donor: PathBuf,
    pub output: OutputTarget,
    pub output_options: OutputOptions,
    pub plan: TransplantPlan,
}

impl TransplantConfig {
    pub fn resolve(section: TransplantSection, output: OutputSection) -> Result<Self> {
        let main = require(section.main, "transplant.main")?;
        let donor = require(section.donor, "transplant.donor")?;
        if main == donor {
            return Err(GenesisError::InvalidInput(format!(
                "transplant.main and transplant.donor are the same file: {}",
                main.display()
            )));
        }

        Ok(TransplantConfig {
            main,
            donor,
            output: OutputTarget::from_path(section.output),
            output_options: output.options(),
            plan: TransplantPlan {
                genesis_time: section
                    .genesis_time
                    .as_deref()
                    .map(parse_genesis_time)
                    .transpose()?,
                chain_id: section.chain_id.map(validate_chain_id).transpose()?,
            },
        })
    }
}

/// Load a TOML configuration file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let config_str = fs::read_to_string(path).map_err(|source| GenesisError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&config_str).map_err(|e| {
        GenesisError::InvalidInput(format!("config file {}: {}", path.display(), e))
    })
}

/// Load `path` if given, otherwise start from an empty configuration.
pub fn load_config_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(p) => load_config(p),
        None => Ok(ConfigFile::default()),
    }
}

pub fn parse_genesis_time(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            GenesisError::InvalidInput(format!("genesis_time {:?} is not RFC 3339: {}", value, e))
        })
}

fn validate_chain_id(chain_id: String) -> Result<String> {
    let chain_id = chain_id.trim();
    if chain_id.is_empty() {
        return Err(GenesisError::InvalidInput("chain_id must not be empty".to_string()));
    }
    Ok(chain_id.to_string())
}

fn require<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| GenesisError::InvalidInput(format!("{} must be set", key)))
}

fn default_prune_unused() -> bool {
    true
}

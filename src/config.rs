//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first (via dotenv), so every value here can be
//! set either in the shell or in `.env`.

use crate::error::ImportError;
use crate::models::MAX_LENGTH;
use crate::processing::DEFAULT_BATCH_SIZE;
use std::str::FromStr;

pub const DEFAULT_PREFIX_LENGTH: u8 = 16;
pub const DEFAULT_LIST_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `AWS_REGION`, passed as `--region` when set.
    pub region: Option<String>,
    /// `AWS_PROFILE`, passed as `--profile` when set.
    pub profile: Option<String>,
    /// `AWS_CLI`, the aws executable.
    pub aws_cli: String,
    /// `WAF_SERVICE`, `waf-regional` or `waf`.
    pub waf_service: String,
    /// `IPSET_PREFIX_LENGTH`, target prefix of every uploaded network.
    pub prefix_len: u8,
    /// `IPSET_BATCH_SIZE`, updates per remote call.
    pub batch_size: usize,
    /// `IPSET_LIST_LIMIT`, page size when listing IP sets.
    pub list_limit: u32,
    /// `LOG4RS_CONFIG`, path of the log4rs YAML file.
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region: None,
            profile: None,
            aws_cli: "aws".to_string(),
            waf_service: "waf-regional".to_string(),
            prefix_len: DEFAULT_PREFIX_LENGTH,
            batch_size: DEFAULT_BATCH_SIZE,
            list_limit: DEFAULT_LIST_LIMIT,
            log_config: "log4rs.yml".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ImportError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ImportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let config = Config {
            region: get("AWS_REGION"),
            profile: get("AWS_PROFILE"),
            aws_cli: get("AWS_CLI").unwrap_or(defaults.aws_cli),
            waf_service: get("WAF_SERVICE").unwrap_or(defaults.waf_service),
            prefix_len: parse_var("IPSET_PREFIX_LENGTH", get("IPSET_PREFIX_LENGTH"))?
                .unwrap_or(defaults.prefix_len),
            batch_size: parse_var("IPSET_BATCH_SIZE", get("IPSET_BATCH_SIZE"))?
                .unwrap_or(defaults.batch_size),
            list_limit: parse_var("IPSET_LIST_LIMIT", get("IPSET_LIST_LIMIT"))?
                .unwrap_or(defaults.list_limit),
            log_config: get("LOG4RS_CONFIG").unwrap_or(defaults.log_config),
        };

        if config.prefix_len > MAX_LENGTH {
            return Err(ImportError::InvalidPrefix(config.prefix_len));
        }
        if config.batch_size == 0 {
            return Err(ImportError::InvalidBatchSize(config.batch_size));
        }
        if config.list_limit == 0 {
            return Err(ImportError::Config("IPSET_LIST_LIMIT must be at least 1".into()));
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>, ImportError> {
    value
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|_| ImportError::Config(format!("{key}={v} is not a valid number")))
        })
        .transpose()
}

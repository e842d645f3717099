use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Parser;
use engine::Currency;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/spendlog.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub api_key_file: String,
    pub reference_currency: String,
    /// IANA name used to decide what "today" is. Local time when unset.
    pub timezone: Option<String>,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.apilayer.com/".to_string(),
            api_key_file: "config/api_key.txt".to_string(),
            reference_currency: "USD".to_string(),
            timezone: None,
            log_file: "spendlog.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn reference_currency(&self) -> Result<Currency> {
        Currency::try_from(self.reference_currency.as_str())
            .map_err(|err| AppError::InvalidConfig(err.to_string()))
    }

    /// Returns a function giving today's date in the configured timezone.
    pub fn clock(&self) -> Result<impl Fn() -> NaiveDate + Send + 'static> {
        let tz = match self.timezone.as_deref() {
            Some(name) => Some(
                name.parse::<Tz>()
                    .map_err(|err| AppError::InvalidConfig(format!("timezone {name}: {err}")))?,
            ),
            None => None,
        };
        Ok(move || match tz {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        })
    }
}

#[derive(Debug, Parser)]
#[command(name = "spendlog", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the rate provider base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Override the file holding the rate provider API key.
    #[arg(long)]
    api_key_file: Option<String>,
    /// Override the currency the running total is expressed in.
    #[arg(long)]
    reference_currency: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPENDLOG"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_key_file) = args.api_key_file {
        settings.api_key_file = api_key_file;
    }
    if let Some(reference_currency) = args.reference_currency {
        settings.reference_currency = reference_currency;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = Some(timezone);
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_usd_reference() {
        let config = AppConfig::default();
        assert_eq!(config.reference_currency().unwrap(), Currency::Usd);
        assert_eq!(config.base_url, "https://api.apilayer.com/");
    }

    #[test]
    fn rejects_unknown_reference_currency() {
        let config = AppConfig {
            reference_currency: "EUR".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.reference_currency(),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = AppConfig {
            timezone: Some("Mars/Olympus".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(config.clock(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn clock_follows_timezone() {
        let config = AppConfig {
            timezone: Some("Asia/Dubai".to_string()),
            ..AppConfig::default()
        };
        let today = config.clock().unwrap()();
        let expected = Utc::now().with_timezone(&chrono_tz::Asia::Dubai).date_naive();
        assert!(today == expected || today.succ_opt() == Some(expected));
    }
}

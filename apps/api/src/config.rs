use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which PDF renderer to install at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfBackendKind {
    Printpdf,
    Disabled,
}

impl FromStr for PdfBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "printpdf" => Ok(PdfBackendKind::Printpdf),
            "disabled" => Ok(PdfBackendKind::Disabled),
            other => bail!("unknown PDF backend '{other}' (expected 'printpdf' or 'disabled')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_sessions: usize,
    pub export_timeout_secs: u64,
    pub pdf_backend: PdfBackendKind,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_sessions: 1000,
            export_timeout_secs: 30,
            pdf_backend: PdfBackendKind::Printpdf,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            port: parse_or("PORT", &lookup, defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            max_sessions: parse_or("MAX_SESSIONS", &lookup, defaults.max_sessions)
                .context("MAX_SESSIONS must be a positive integer")?,
            export_timeout_secs: parse_or("EXPORT_TIMEOUT_SECS", &lookup, defaults.export_timeout_secs)
                .context("EXPORT_TIMEOUT_SECS must be a whole number of seconds")?,
            pdf_backend: parse_or("PDF_BACKEND", &lookup, defaults.pdf_backend)
                .context("PDF_BACKEND is invalid")?,
        })
    }

    pub fn export_timeout(&self) -> Duration {
        Duration::from_secs(self.export_timeout_secs)
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key}='{raw}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_sessions, 1000);
        assert_eq!(config.export_timeout(), Duration::from_secs(30));
        assert_eq!(config.pdf_backend, PdfBackendKind::Printpdf);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("MAX_SESSIONS", "5"),
            ("EXPORT_TIMEOUT_SECS", "2"),
            ("PDF_BACKEND", "Disabled"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_sessions, 5);
        assert_eq!(config.export_timeout_secs, 2);
        assert_eq!(config.pdf_backend, PdfBackendKind::Disabled);
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn test_unknown_backend_fails() {
        assert!(Config::from_lookup(lookup_from(&[("PDF_BACKEND", "wkhtmltopdf")])).is_err());
    }
}

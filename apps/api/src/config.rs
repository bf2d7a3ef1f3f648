use anyhow::{Context, Result};

/// Numeric table identifiers on the backend-as-a-service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIds {
    pub profiles: u32,
    pub resumes: u32,
    pub ats_checks: u32,
    pub activity: u32,
    pub templates: u32,
}

impl Default for TableIds {
    fn default() -> Self {
        Self {
            profiles: 6624,
            resumes: 6625,
            ats_checks: 6626,
            activity: 7227,
            templates: 7746,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_api_key: String,
    pub backend_timeout_secs: u64,
    pub tables: TableIds,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = TableIds::default();

        Ok(Config {
            backend_url: require_env("BACKEND_URL")?
                .trim_end_matches('/')
                .to_string(),
            backend_api_key: require_env("BACKEND_API_KEY")?,
            backend_timeout_secs: parse_env("BACKEND_TIMEOUT_SECS", 30)?,
            tables: TableIds {
                profiles: parse_env("PROFILES_TABLE_ID", defaults.profiles)?,
                resumes: parse_env("RESUMES_TABLE_ID", defaults.resumes)?,
                ats_checks: parse_env("ATS_CHECKS_TABLE_ID", defaults.ats_checks)?,
                activity: parse_env("ACTIVITY_TABLE_ID", defaults.activity)?,
                templates: parse_env("TEMPLATES_TABLE_ID", defaults.templates)?,
            },
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_ids() {
        let tables = TableIds::default();
        assert_eq!(tables.resumes, 6625);
        assert_eq!(tables.ats_checks, 6626);
        assert_eq!(tables.templates, 7746);
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let port: u16 = parse_env("RESUME_API_TEST_UNSET_PORT", 9090).unwrap();
        assert_eq!(port, 9090);
    }
}

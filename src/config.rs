use anyhow::Context;
use std::env;

/// Longest lookback any window setting or `days` parameter may ask for.
pub const MAX_WINDOW_DAYS: i64 = 366;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    // Access tokens are issued by the identity provider; we only verify them.
    pub jwt_secret: String,
    pub jwt_audience: String,

    pub metrics_window_days: i64,
    pub entries_default_days: i64,
    pub trends_default_days: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .context("PORT must be a number")?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|v| parse_origin_list(&v))
                .unwrap_or_default(),

            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".into()),

            metrics_window_days: parse_days("METRICS_WINDOW_DAYS", 90)?,
            entries_default_days: parse_days("ENTRIES_DEFAULT_DAYS", 30)?,
            trends_default_days: parse_days("TRENDS_DEFAULT_DAYS", 90)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_days(key: &str, default: i64) -> anyhow::Result<i64> {
    let days = match env::var(key) {
        Ok(raw) => raw
            .parse::<i64>()
            .with_context(|| format!("{key} must be a number of days"))?,
        Err(_) => default,
    };
    anyhow::ensure!(
        (1..=MAX_WINDOW_DAYS).contains(&days),
        "{key} must be between 1 and {MAX_WINDOW_DAYS}"
    );
    Ok(days)
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

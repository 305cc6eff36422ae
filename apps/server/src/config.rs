use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use rust_decimal::Decimal;
use showcase_core::rebalance::{ConversionMultiplierDefaults, RebalanceConfig, ZeroAllocationPolicy};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub api_url: String,
    pub api_token: String,
    pub dsp_api_url: String,
    pub dsp_api_token: String,
    pub dsp_advertiser_id: String,
    pub rebalance: RebalanceConfig,
}

const DEFAULT_TIMEOUT_MS: &str = "30000";

fn parse_timeout_ms(raw: &str) -> anyhow::Result<Duration> {
    let ms: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid SHOWCASE_REQUEST_TIMEOUT_MS '{}'", raw))?;
    Ok(Duration::from_millis(ms))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_decimal(key: &str, default: Decimal) -> anyhow::Result<Decimal> {
    match std::env::var(key) {
        Ok(raw) => Decimal::from_str(raw.trim()).with_context(|| format!("Invalid {}", key)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("SHOWCASE_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SHOWCASE_LISTEN_ADDR")?;
        let cors_allow = env_or("SHOWCASE_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout =
            parse_timeout_ms(&env_or("SHOWCASE_REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS))?;

        let defaults = ConversionMultiplierDefaults::default();
        let zero_allocation_policy = match std::env::var("SHOWCASE_ZERO_ALLOCATION_POLICY") {
            Ok(raw) => ZeroAllocationPolicy::from_str(&raw)?,
            Err(_) => ZeroAllocationPolicy::default(),
        };
        let rebalance = RebalanceConfig {
            default_multipliers: ConversionMultiplierDefaults {
                internal: env_decimal("SHOWCASE_DEFAULT_INTERNAL_MULTIPLIER", defaults.internal)?,
                external: env_decimal("SHOWCASE_DEFAULT_EXTERNAL_MULTIPLIER", defaults.external)?,
            },
            zero_allocation_policy,
        };
        rebalance.validate()?;

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout,
            api_url: env_or("SHOWCASE_API_URL", "http://localhost:4000"),
            api_token: env_or("SHOWCASE_API_TOKEN", ""),
            dsp_api_url: env_or("SHOWCASE_DSP_API_URL", "http://localhost:4100"),
            dsp_api_token: env_or("SHOWCASE_DSP_API_TOKEN", ""),
            dsp_advertiser_id: env_or("SHOWCASE_DSP_ADVERTISER_ID", ""),
            rebalance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_parses_milliseconds() {
        assert_eq!(
            parse_timeout_ms(DEFAULT_TIMEOUT_MS).unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(parse_timeout_ms(" 1500 ").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_malformed_timeout_fails() {
        for raw in ["30s", "", "-1"] {
            let err = parse_timeout_ms(raw).unwrap_err();
            assert!(err.to_string().contains("SHOWCASE_REQUEST_TIMEOUT_MS"));
        }
    }
}

use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::geo::{ServiceDefaults, SpeedUnit};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// 进程级配置，启动时读取，之后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub default_max_speed: f64,
    pub default_unit: SpeedUnit,
    pub redis_url: Option<String>,
    pub seed_demo_session: bool,
    pub request_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置，未设置的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_max_speed: f64 = parse_or(&lookup, "DEFAULT_MAX_SPEED", 880.0)?;
        if !default_max_speed.is_finite() || default_max_speed < 0.0 {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_MAX_SPEED",
                value: default_max_speed.to_string(),
            });
        }

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT", 15)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT",
                value: request_timeout_secs.to_string(),
            });
        }

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            default_max_speed,
            default_unit: parse_or(&lookup, "DEFAULT_SPEED_UNIT", SpeedUnit::KilometersPerHour)?,
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            seed_demo_session: parse_or(&lookup, "SEED_DEMO_SESSION", true)?,
            request_timeout_secs,
            shutdown_timeout_secs: parse_or(&lookup, "SHUTDOWN_TIMEOUT", 20)?,
        })
    }

    pub fn service_defaults(&self) -> ServiceDefaults {
        ServiceDefaults {
            unit: self.default_unit,
            max_speed: self.default_max_speed,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        let ip = self.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        });
        SocketAddr::new(ip, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

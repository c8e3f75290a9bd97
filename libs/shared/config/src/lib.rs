use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub server_port: u16,
    pub default_avg_service_time: u32,
    pub default_buffer_time: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            server_port: 3000,
            default_avg_service_time: 10,
            default_buffer_time: 0,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            data_dir: env::var("QUEUE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("QUEUE_DATA_DIR not set, using {}", defaults.data_dir.display());
                    defaults.data_dir.clone()
                }),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            default_avg_service_time: parse_var(
                "DEFAULT_AVG_SERVICE_TIME",
                defaults.default_avg_service_time,
            ),
            default_buffer_time: parse_var("DEFAULT_BUFFER_TIME", defaults.default_buffer_time),
        };

        if config.default_avg_service_time == 0 {
            warn!("DEFAULT_AVG_SERVICE_TIME must be positive, falling back to 10");
            return Self {
                default_avg_service_time: 10,
                ..config
            };
        }

        config
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}

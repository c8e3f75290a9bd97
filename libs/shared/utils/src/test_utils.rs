use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub data_dir: PathBuf,
    pub default_avg_service_time: u32,
    pub default_buffer_time: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            data_dir: unique_data_dir(),
            default_avg_service_time: 10,
            default_buffer_time: 0,
        }
    }
}

impl TestConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            data_dir: self.data_dir.clone(),
            server_port: 0,
            default_avg_service_time: self.default_avg_service_time,
            default_buffer_time: self.default_buffer_time,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// A data directory path that no other test shares. The directory is not created.
pub fn unique_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("queue-clinic-test-{}", Uuid::new_v4().simple()))
}

/// Patient names in booking order, `Patient 1`, `Patient 2`, ...
pub fn patient_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Patient {}", i)).collect()
}

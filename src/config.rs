use std::time::Duration;

use serde::Deserialize;

use crate::{
    error::{Result, SignalError},
    registry::BatchPolicy,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Upper bound for one host-bridge round trip.
    pub host_timeout_ms: u64,
    /// Policy for the batch declaration performed by `Core::init`.
    pub batch_policy: BatchPolicy,
}

pub const CORE_DEFAULT_HOST_TIMEOUT_MS: u64 = 5_000;

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            host_timeout_ms: CORE_DEFAULT_HOST_TIMEOUT_MS,
            batch_policy: BatchPolicy::Strict,
        }
    }
}

impl CoreConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: CoreConfig =
            serde_json::from_str(s).map_err(|e| SignalError::Config(e.to_string()))?;
        if cfg.host_timeout_ms == 0 {
            return Err(SignalError::Config("host_timeout_ms must be greater than 0".into()));
        }
        Ok(cfg)
    }

    pub fn host_timeout(&self) -> Duration {
        Duration::from_millis(self.host_timeout_ms)
    }
}
// 配置仅在构造 Core 时提供一次；运行期不支持修改。

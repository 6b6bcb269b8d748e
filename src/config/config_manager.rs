// ==========================================
// 备件健康与损耗计算引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、保存
// 顺序: 环境变量指定路径 → 用户配置目录 → 内置默认值
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::domain::types::OverridePolicy;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 配置相关环境变量
pub mod config_keys {
    pub const CONFIG_PATH: &str = "SPAREPART_HEALTH_CONFIG";
    pub const OVERRIDE_POLICY: &str = "SPAREPART_HEALTH_OVERRIDE_POLICY";
    pub const LOCALE: &str = "SPAREPART_HEALTH_LOCALE";
    /// 日志格式 ("json" 为结构化输出, 其余为文本)
    pub const LOG_FORMAT: &str = "SPAREPART_HEALTH_LOG_FORMAT";
}

/// 支持的语言
const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: path={path}, {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: path={path}, {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值无效 (key={key}): {message}")]
    InvalidValue { key: String, message: String },
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: EngineConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 使用内置默认值
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            source: ConfigSource::Defaults,
        }
    }

    /// 按默认顺序加载配置并应用环境变量覆写
    pub fn load() -> Result<Self, ConfigError> {
        let mut manager = match Self::resolve_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            Some(path) => {
                info!(path = %path.display(), "配置文件不存在, 使用内置默认值");
                Self::with_defaults()
            }
            None => Self::with_defaults(),
        };

        manager.apply_overrides_from(|key| std::env::var(key).ok())?;
        Ok(manager)
    }

    /// 从指定 JSON 文件加载
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: EngineConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let manager = Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        };
        manager.validate()?;

        info!(path = %path.display(), "配置加载完成");
        Ok(manager)
    }

    /// 保存到指定 JSON 文件 (自动创建父目录)
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let raw = serde_json::to_string_pretty(&self.config).map_err(|source| {
            ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }
        })?;

        std::fs::write(path, raw).map_err(io_err)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 默认配置文件路径
    ///
    /// # 返回
    /// - 用户配置目录/sparepart-health/config.json
    /// - 无法获取配置目录时为 None
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sparepart-health").join("config.json"))
    }

    /// 配置文件路径 (环境变量优先)
    fn resolve_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(config_keys::CONFIG_PATH) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        Self::default_config_path()
    }

    /// 应用外部覆写 (通常为环境变量)
    ///
    /// # 参数
    /// - `lookup`: 按键取值的函数
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(config_keys::OVERRIDE_POLICY) {
            let policy = raw
                .parse::<OverridePolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: config_keys::OVERRIDE_POLICY.to_string(),
                    message,
                })?;
            self.config.override_policy = policy;
        }

        if let Some(raw) = lookup(config_keys::LOCALE) {
            self.config.locale = raw.trim().to_string();
        }

        self.validate()
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.config.production_decimals > 6 {
            return Err(ConfigError::InvalidValue {
                key: "production_decimals".to_string(),
                message: format!("取值 {} 超出范围 [0, 6]", self.config.production_decimals),
            });
        }

        if !SUPPORTED_LOCALES.contains(&self.config.locale.as_str()) {
            warn!(locale = %self.config.locale, "不支持的语言, 显示时回落到 en");
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let manager = ConfigManager::with_defaults();
        assert_eq!(manager.config().override_policy, OverridePolicy::ZeroMeansUnset);
        assert_eq!(manager.config().production_decimals, 2);
        assert_eq!(manager.source(), &ConfigSource::Defaults);
    }

    #[test]
    fn test_apply_overrides() {
        let mut manager = ConfigManager::with_defaults();
        let env: HashMap<&str, &str> = [
            (config_keys::OVERRIDE_POLICY, "explicit_zero"),
            (config_keys::LOCALE, "zh-CN"),
        ]
        .into_iter()
        .collect();

        manager
            .apply_overrides_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(manager.config().override_policy, OverridePolicy::ExplicitZero);
        assert_eq!(manager.config().locale, "zh-CN");
    }

    #[test]
    fn test_apply_invalid_policy() {
        let mut manager = ConfigManager::with_defaults();
        let result = manager.apply_overrides_from(|key| {
            (key == config_keys::OVERRIDE_POLICY).then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_rejects_excessive_decimals() {
        let mut manager = ConfigManager::with_defaults();
        manager.config_mut().production_decimals = 12;
        assert!(manager.validate().is_err());
    }
}

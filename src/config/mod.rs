// ==========================================
// 备件健康与损耗计算引擎 - 配置层
// ==========================================
// 职责: 引擎配置管理, 支持文件 + 环境变量覆写
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigSource};
pub use engine_config::EngineConfig;

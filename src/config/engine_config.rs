use crate::domain::types::OverridePolicy;
use crate::engine::production::DEFAULT_PRODUCTION_DECIMALS;
use serde::{Deserialize, Serialize};

/// 引擎配置（持久化对象）
///
/// 存储位置：JSON 文件（默认 `<config_dir>/sparepart-health/config.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 覆写值为 0 时是否生效
    #[serde(default)]
    pub override_policy: OverridePolicy,

    /// 产量保留小数位
    #[serde(default = "default_production_decimals")]
    pub production_decimals: u32,

    /// 显示语言（"en" 或 "zh-CN"）
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_production_decimals() -> u32 {
    DEFAULT_PRODUCTION_DECIMALS
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            override_policy: OverridePolicy::default(),
            production_decimals: default_production_decimals(),
            locale: default_locale(),
        }
    }
}

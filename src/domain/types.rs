// ==========================================
// 备件健康与损耗计算引擎 - 领域类型定义
// ==========================================
// 健康状态 / 磨损状态 / 覆写策略 / 字段来源
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 健康状态 (Health Status)
// ==========================================
// 红线: 等级制 (三态), 由累计运行小时与额定寿命比较得出
// 顺序: Healthy < Monitor < Attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,   // 正常
    Monitor,   // 警告 (恰好到达寿命)
    Attention, // 严重 (超出寿命)
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl HealthStatus {
    /// 从字符串解析状态 (未知值视为 HEALTHY)
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "MONITOR" | "WARNING" => HealthStatus::Monitor,
            "ATTENTION" | "CRITICAL" => HealthStatus::Attention,
            _ => HealthStatus::Healthy,
        }
    }

    /// 转换为存储/接口使用的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Monitor => "MONITOR",
            HealthStatus::Attention => "ATTENTION",
        }
    }

    /// 国际化显示标签
    pub fn label(&self) -> String {
        match self {
            HealthStatus::Healthy => crate::i18n::t("health.status.healthy"),
            HealthStatus::Monitor => crate::i18n::t("health.status.monitor"),
            HealthStatus::Attention => crate::i18n::t("health.status.attention"),
        }
    }
}

// ==========================================
// 磨损状态 (Wear State)
// ==========================================
// 用于功率消耗百分比的两种工况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WearState {
    Healthy, // 新件/健康工况
    Wornout, // 磨损工况
}

impl fmt::Display for WearState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WearState::Healthy => write!(f, "healthy"),
            WearState::Wornout => write!(f, "wornout"),
        }
    }
}

// ==========================================
// 覆写策略 (Override Policy)
// ==========================================
// 决定 "已提供但为 0" 的覆写值是否生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverridePolicy {
    /// 0 与未设置等价, 回落到目录默认值 (历史数据口径)
    ZeroMeansUnset,
    /// 已提供即生效, 允许显式记录 0
    ExplicitZero,
}

impl Default for OverridePolicy {
    fn default() -> Self {
        OverridePolicy::ZeroMeansUnset
    }
}

impl std::str::FromStr for OverridePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero_means_unset" | "zero-means-unset" => Ok(OverridePolicy::ZeroMeansUnset),
            "explicit_zero" | "explicit-zero" => Ok(OverridePolicy::ExplicitZero),
            other => Err(format!("未知覆写策略: {}", other)),
        }
    }
}

// ==========================================
// 字段来源 (Field Source)
// ==========================================
// 可解释性: 有效参数的每个字段来自哪里
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldSource {
    Catalog,  // 目录默认值
    Override, // 现场覆写值
    Default,  // 两者均缺失, 取零值
}

impl Default for FieldSource {
    fn default() -> Self {
        FieldSource::Default
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSource::Catalog => write!(f, "CATALOG"),
            FieldSource::Override => write!(f, "OVERRIDE"),
            FieldSource::Default => write!(f, "DEFAULT"),
        }
    }
}

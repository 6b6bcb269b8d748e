// ==========================================
// 备件健康与损耗计算引擎 - 带单位数值
// ==========================================
// 红线: 所有数值必须携带单位, 计算中不允许隐式混用单位
// 小时与天之间只做显式换算, 其余单位不可互换
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 标准单位字符串
pub mod units {
    pub const HOURS: &str = "hours";
    pub const DAYS: &str = "days";
    pub const KW: &str = "kW";
    pub const KWH: &str = "kWh";
    pub const TPD: &str = "TPD";
    pub const PERCENT: &str = "%";
}

// ==========================================
// UnitKind - 单位归类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Hours,
    Days,
    Kw,
    Kwh,
    Tpd,
    Percent,
    Unknown,
}

impl UnitKind {
    /// 解析单位字符串 (大小写与常见缩写不敏感)
    pub fn parse(unit: &str) -> Self {
        match unit.trim().to_lowercase().as_str() {
            "hours" | "hour" | "hrs" | "hr" | "h" => UnitKind::Hours,
            "days" | "day" | "d" => UnitKind::Days,
            "kw" => UnitKind::Kw,
            "kwh" => UnitKind::Kwh,
            "tpd" | "t/d" => UnitKind::Tpd,
            "%" | "percent" | "pct" => UnitKind::Percent,
            _ => UnitKind::Unknown,
        }
    }
}

// ==========================================
// Quantity - 数值 + 单位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn hours(value: f64) -> Self {
        Self::new(value, units::HOURS)
    }

    pub fn kw(value: f64) -> Self {
        Self::new(value, units::KW)
    }

    pub fn kwh(value: f64) -> Self {
        Self::new(value, units::KWH)
    }

    pub fn tpd(value: f64) -> Self {
        Self::new(value, units::TPD)
    }

    /// 零值 (缺失字段的默认值)
    pub fn zero(unit: impl Into<String>) -> Self {
        Self::new(0.0, unit)
    }

    pub fn kind(&self) -> UnitKind {
        UnitKind::parse(&self.unit)
    }

    /// 换算为小时
    ///
    /// # 返回
    /// - 小时: 原值
    /// - 天: value * 24
    /// - 其他单位: None (不可换算)
    pub fn to_hours(&self) -> Option<f64> {
        match self.kind() {
            UnitKind::Hours => Some(self.value),
            UnitKind::Days => Some(self.value * 24.0),
            _ => None,
        }
    }

    /// 按目标单位取值, 单位不一致时返回 None
    pub fn value_in(&self, kind: UnitKind) -> Option<f64> {
        if kind == UnitKind::Hours {
            return self.to_hours();
        }
        if self.kind() == kind && kind != UnitKind::Unknown {
            Some(self.value)
        } else {
            None
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 的 Display 对整数值不输出小数部分 (400.0 -> "400")
        write!(f, "{} {}", self.value, self.unit)
    }
}

// ==========================================
// Percentage - 百分比
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Percentage {
    pub percent: f64,
}

impl Percentage {
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }
}

/// 四舍五入到指定小数位
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() || value.fract() == 0.0 {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

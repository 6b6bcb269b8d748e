// ==========================================
// 备件健康与损耗计算引擎 - 备件目录领域模型
// ==========================================
// 职责: 备件类型的集中维护参考数据 (寿命/纤维损耗阶梯/成本/功率)
// 红线: 纤维损耗区间在构建目录时校验, 计算器假设输入合法
// ==========================================

use crate::domain::quantity::{units, Percentage, Quantity, UnitKind};
use crate::domain::types::WearState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// FiberLossRange - 纤维损耗阶梯区间
// ==========================================
// 区间语义: [min, max), max = None 表示 "min 以上"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberLossRange {
    pub min: f64,         // 起始运行小时 (含)
    pub max: Option<f64>, // 结束运行小时 (不含), None 为无上界
    pub loss_percent: f64,
}

impl FiberLossRange {
    pub fn new(min: f64, max: Option<f64>, loss_percent: f64) -> Self {
        Self {
            min,
            max,
            loss_percent,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// 判断运行小时是否落在区间内
    pub fn contains(&self, hours: f64) -> bool {
        hours >= self.min && self.max.map_or(true, |max| hours < max)
    }
}

// ==========================================
// CostRate - 单价
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostRate {
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub per_unit: String,
}

impl CostRate {
    pub fn new(amount: f64, currency: impl Into<String>, per_unit: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            per_unit: per_unit.into(),
        }
    }

    /// 是否 "有意义地设置" (amount > 0)
    pub fn is_set(&self) -> bool {
        self.amount > 0.0
    }
}

// ==========================================
// StatePair - 健康/磨损两种工况的成对数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatePair<T> {
    pub healthy: T,
    pub wornout: T,
}

impl<T> StatePair<T> {
    pub fn new(healthy: T, wornout: T) -> Self {
        Self { healthy, wornout }
    }

    pub fn get(&self, state: WearState) -> &T {
        match state {
            WearState::Healthy => &self.healthy,
            WearState::Wornout => &self.wornout,
        }
    }
}

fn default_life_time() -> Quantity {
    Quantity::zero(units::HOURS)
}

fn default_power_consumption() -> StatePair<Quantity> {
    StatePair::new(Quantity::zero(units::KWH), Quantity::zero(units::KWH))
}

// ==========================================
// CatalogEntry - 备件目录条目
// ==========================================
// 缺失字段反序列化为带单位的零值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub spare_part_type: String,

    #[serde(default = "default_life_time")]
    pub life_time: Quantity,

    #[serde(default)]
    pub fiber_loss_ranges: Vec<FiberLossRange>,

    #[serde(default)]
    pub fiber_cost: CostRate,

    #[serde(default)]
    pub actual_motor_power_consumption: StatePair<Percentage>,

    #[serde(default = "default_power_consumption")]
    pub power_consumption: StatePair<Quantity>,

    #[serde(default)]
    pub power_cost: CostRate,
}

impl CatalogEntry {
    /// 创建仅含类型名与寿命的目录条目, 其余字段为零值
    pub fn new(spare_part_type: impl Into<String>, life_time_hours: f64) -> Self {
        Self {
            spare_part_type: spare_part_type.into(),
            life_time: Quantity::hours(life_time_hours),
            fiber_loss_ranges: Vec::new(),
            fiber_cost: CostRate::default(),
            actual_motor_power_consumption: StatePair::default(),
            power_consumption: default_power_consumption(),
            power_cost: CostRate::default(),
        }
    }

    /// 校验后返回自身 (目录构建边界)
    pub fn validated(self) -> Result<Self, CatalogError> {
        self.validate()?;
        Ok(self)
    }

    /// 校验目录条目
    ///
    /// # 规则
    /// - life_time 单位必须可换算为小时
    /// - 区间 max > min
    /// - 区间 min 严格递增, 且相邻区间首尾相接 (无重叠/无缺口)
    /// - 仅最后一个区间可无上界
    /// - loss_percent 非负
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.life_time.to_hours().is_none() {
            return Err(CatalogError::UnitMismatch {
                field: "life_time".to_string(),
                unit: self.life_time.unit.clone(),
                expected: units::HOURS.to_string(),
            });
        }

        for (field, quantity) in [
            ("power_consumption.healthy", &self.power_consumption.healthy),
            ("power_consumption.wornout", &self.power_consumption.wornout),
        ] {
            if quantity.kind() != UnitKind::Kwh {
                return Err(CatalogError::UnitMismatch {
                    field: field.to_string(),
                    unit: quantity.unit.clone(),
                    expected: units::KWH.to_string(),
                });
            }
        }

        validate_fiber_loss_ranges(&self.fiber_loss_ranges)
    }
}

/// 校验纤维损耗阶梯
pub fn validate_fiber_loss_ranges(ranges: &[FiberLossRange]) -> Result<(), CatalogError> {
    let last_index = ranges.len().saturating_sub(1);

    for (index, range) in ranges.iter().enumerate() {
        if range.loss_percent < 0.0 {
            return Err(CatalogError::NegativeLossPercent {
                index,
                loss_percent: range.loss_percent,
            });
        }

        if range.is_unbounded() && index != last_index {
            return Err(CatalogError::UnboundedRangeNotLast { index });
        }
        if let Some(max) = range.max {
            if max <= range.min {
                return Err(CatalogError::InvalidRangeBounds {
                    index,
                    min: range.min,
                    max,
                });
            }
        }

        if index == 0 {
            continue;
        }

        let previous = &ranges[index - 1];
        if range.min <= previous.min {
            return Err(CatalogError::RangesNotAscending {
                index,
                min: range.min,
                previous_min: previous.min,
            });
        }
        if let Some(previous_max) = previous.max {
            if previous_max != range.min {
                return Err(CatalogError::RangesNotContiguous {
                    index,
                    previous_max,
                    min: range.min,
                });
            }
        }
    }

    Ok(())
}

// ==========================================
// CatalogError - 目录数据完整性错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("纤维损耗区间未升序: index={index}, min={min}, 前一区间 min={previous_min}")]
    RangesNotAscending {
        index: usize,
        min: f64,
        previous_min: f64,
    },

    #[error("纤维损耗区间不连续: index={index}, 前一区间 max={previous_max}, min={min}")]
    RangesNotContiguous {
        index: usize,
        previous_max: f64,
        min: f64,
    },

    #[error("纤维损耗区间边界无效: index={index}, min={min}, max={max}")]
    InvalidRangeBounds { index: usize, min: f64, max: f64 },

    #[error("无上界的纤维损耗区间必须位于最后: index={index}")]
    UnboundedRangeNotLast { index: usize },

    #[error("纤维损耗百分比为负: index={index}, loss_percent={loss_percent}")]
    NegativeLossPercent { index: usize, loss_percent: f64 },

    #[error("单位不匹配 (field={field}): unit={unit}, 期望 {expected}")]
    UnitMismatch {
        field: String,
        unit: String,
        expected: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_ranges() -> Vec<FiberLossRange> {
        vec![
            FiberLossRange::new(0.0, Some(240.0), 0.15),
            FiberLossRange::new(240.0, Some(480.0), 0.25),
            FiberLossRange::new(480.0, Some(720.0), 0.40),
            FiberLossRange::new(720.0, None, 0.50),
        ]
    }

    #[test]
    fn test_range_contains_half_open() {
        let range = FiberLossRange::new(240.0, Some(480.0), 0.25);
        assert!(range.contains(240.0));
        assert!(range.contains(479.9));
        assert!(!range.contains(480.0));
        assert!(FiberLossRange::new(720.0, None, 0.5).contains(1e9));
    }

    #[test]
    fn test_validate_accepts_standard_ranges() {
        assert!(validate_fiber_loss_ranges(&standard_ranges()).is_ok());
        assert!(validate_fiber_loss_ranges(&[]).is_ok());
    }

    #[test]
    fn test_validate_rejects_unordered() {
        let ranges = vec![
            FiberLossRange::new(0.0, Some(240.0), 0.15),
            FiberLossRange::new(240.0, Some(480.0), 0.25),
            FiberLossRange::new(100.0, None, 0.40),
        ];
        let err = validate_fiber_loss_ranges(&ranges).unwrap_err();
        assert!(matches!(err, CatalogError::RangesNotAscending { index: 2, .. }));
    }

    #[test]
    fn test_validate_rejects_gap() {
        let ranges = vec![
            FiberLossRange::new(0.0, Some(240.0), 0.15),
            FiberLossRange::new(300.0, None, 0.25),
        ];
        assert!(matches!(
            validate_fiber_loss_ranges(&ranges),
            Err(CatalogError::RangesNotContiguous { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inner_unbounded() {
        let ranges = vec![
            FiberLossRange::new(0.0, None, 0.15),
            FiberLossRange::new(240.0, None, 0.25),
        ];
        assert_eq!(
            validate_fiber_loss_ranges(&ranges),
            Err(CatalogError::UnboundedRangeNotLast { index: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let ranges = vec![FiberLossRange::new(240.0, Some(100.0), 0.15)];
        assert!(matches!(
            validate_fiber_loss_ranges(&ranges),
            Err(CatalogError::InvalidRangeBounds { index: 0, .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_non_hour_lifetime() {
        let mut catalog = CatalogEntry::new("rotor", 3600.0);
        catalog.life_time = Quantity::kw(3600.0);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_catalog_deserialize_missing_fields_default_to_zero() {
        let catalog: CatalogEntry =
            serde_json::from_str(r#"{ "spare_part_type": "rotor" }"#).unwrap();
        assert_eq!(catalog.life_time, Quantity::hours(0.0));
        assert_eq!(catalog.power_consumption.healthy, Quantity::kwh(0.0));
        assert!(catalog.fiber_loss_ranges.is_empty());
        assert!(!catalog.fiber_cost.is_set());
        assert!(catalog.validate().is_ok());
    }
}

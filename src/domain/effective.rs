// ==========================================
// 备件健康与损耗计算引擎 - 有效参数
// ==========================================
// 目录默认值与现场覆写合并后的完整参数集
// 临时对象: 每次请求重新计算, 引擎不持久化
// ==========================================

use crate::domain::catalog::{CostRate, FiberLossRange, StatePair};
use crate::domain::overrides::{FiberLossValue, PartialStatePair, SparePartOverride};
use crate::domain::quantity::{Percentage, Quantity};
use crate::domain::types::FieldSource;
use serde::{Deserialize, Serialize};

/// 各字段的取值来源
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterSources {
    pub life_time: FieldSource,
    pub total_running_hours: FieldSource,
    pub daily_running_hours: FieldSource,
    pub fiber_loss_ranges: FieldSource,
    pub fiber_cost: FieldSource,
    pub power_cost: FieldSource,
    pub healthy_consumption: FieldSource,
    pub wornout_consumption: FieldSource,
    pub installed_motor_power: FieldSource,
    pub total_fiber_loss: FieldSource,
}

// ==========================================
// EffectiveParameters - 有效参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveParameters {
    pub spare_part_type: String,

    // ===== 寿命与运行计数 (统一为小时) =====
    pub life_time: Quantity,
    pub total_running_hours: Quantity,
    pub daily_running_hours: Quantity,

    // ===== 损耗参数 =====
    pub fiber_loss_ranges: Vec<FiberLossRange>,
    pub fiber_cost: CostRate,
    pub actual_motor_power_consumption: StatePair<Percentage>,
    pub power_consumption: StatePair<Quantity>, // 目录参考值
    pub power_cost: CostRate,
    pub installed_motor_power: Quantity,

    // ===== 透传的记录值 =====
    pub total_production: Option<Quantity>,
    pub total_fiber_loss: Quantity, // 权威值, 不由阶梯费率反推

    // ===== 可解释性 =====
    pub sources: ParameterSources,
    pub notes: Vec<String>,
}

impl EffectiveParameters {
    /// 将有效参数重新解释为一条 "全部字段已设置" 的覆写记录
    pub fn to_override(&self) -> SparePartOverride {
        SparePartOverride {
            lifetime_of_rotor: Some(self.life_time.clone()),
            total_running_hours: Some(self.total_running_hours.clone()),
            daily_running_hours: Some(self.daily_running_hours.clone()),
            fiber_loss_ranges: Some(
                self.fiber_loss_ranges
                    .iter()
                    .map(|r| FiberLossValue {
                        value: r.loss_percent,
                    })
                    .collect(),
            ),
            fiber_cost: Some(self.fiber_cost.clone()),
            power_cost: Some(self.power_cost.clone()),
            actual_motor_power_consumption: Some(PartialStatePair {
                healthy: Some(self.actual_motor_power_consumption.healthy),
                wornout: Some(self.actual_motor_power_consumption.wornout),
            }),
            installed_motor_power: Some(self.installed_motor_power.clone()),
            total_production: self.total_production.clone(),
            total_fiber_loss: Some(self.total_fiber_loss.clone()),
            updated_at: None,
        }
    }

    /// 比较参数值是否一致 (忽略来源与备注)
    pub fn same_values(&self, other: &EffectiveParameters) -> bool {
        self.spare_part_type == other.spare_part_type
            && self.life_time == other.life_time
            && self.total_running_hours == other.total_running_hours
            && self.daily_running_hours == other.daily_running_hours
            && self.fiber_loss_ranges == other.fiber_loss_ranges
            && self.fiber_cost == other.fiber_cost
            && self.actual_motor_power_consumption == other.actual_motor_power_consumption
            && self.power_consumption == other.power_consumption
            && self.power_cost == other.power_cost
            && self.installed_motor_power == other.installed_motor_power
            && self.total_production == other.total_production
            && self.total_fiber_loss == other.total_fiber_loss
    }
}

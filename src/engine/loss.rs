// ==========================================
// 备件健康与损耗计算引擎 - 损耗计算引擎
// ==========================================
// 职责: 功率消耗 (健康/磨损) + 纤维损耗阶梯费率 + 成本
// 输入: 有效参数
// 输出: LossResult
// 红线: 纤维损耗总量为外部记录的权威值, 只透传不反推
// ==========================================

use crate::domain::catalog::{CostRate, FiberLossRange};
use crate::domain::effective::EffectiveParameters;
use crate::domain::quantity::{units, Quantity};
use crate::domain::types::WearState;
use serde::{Deserialize, Serialize};

// ==========================================
// 结果类型
// ==========================================

/// 功率损耗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLoss {
    pub healthy_consumption: Quantity, // kWh
    pub wornout_consumption: Quantity, // kWh
    pub excess_consumption: Quantity,  // 磨损相对健康的额外消耗 kWh
    pub power_cost: CostRate,          // 有效单价, 原样输出
}

impl PowerLoss {
    pub fn consumption(&self, state: WearState) -> &Quantity {
        match state {
            WearState::Healthy => &self.healthy_consumption,
            WearState::Wornout => &self.wornout_consumption,
        }
    }
}

/// 纤维损耗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiberLoss {
    pub bucket_index: Option<usize>,            // 当前所处阶梯
    pub current_range: Option<FiberLossRange>,  // 当前阶梯区间
    pub loss_percent: f64,                      // 当前阶梯费率
    pub total_fiber_loss: Quantity,             // 权威总量 (透传)
    pub fiber_cost: CostRate,                   // 有效单价, 原样输出
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossResult {
    pub power: PowerLoss,
    pub fiber: FiberLoss,
}

/// 金额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub amount: f64,
    pub currency: String,
}

/// 功率成本合计 (仅在调用方显式请求时计算)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerCostTotals {
    pub healthy: MonetaryAmount,
    pub wornout: MonetaryAmount,
    pub excess: MonetaryAmount,
}

// ==========================================
// LossCalculator - 损耗计算引擎
// ==========================================
pub struct LossCalculator {}

impl LossCalculator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算损耗
    pub fn compute_losses(&self, effective: &EffectiveParameters) -> LossResult {
        LossResult {
            power: self.compute_power_loss(effective),
            fiber: self.compute_fiber_loss(effective),
        }
    }

    /// 功率损耗
    ///
    /// consumption[state] = 装机功率 kW * 功率消耗百分比[state] / 100, 与运行小时无关
    pub fn compute_power_loss(&self, effective: &EffectiveParameters) -> PowerLoss {
        let installed_kw = effective.installed_motor_power.value;
        let consumption = |state: WearState| {
            let percent = effective.actual_motor_power_consumption.get(state).percent;
            self.power_consumption(installed_kw, percent)
        };
        let healthy = consumption(WearState::Healthy);
        let wornout = consumption(WearState::Wornout);

        PowerLoss {
            healthy_consumption: Quantity::kwh(healthy),
            wornout_consumption: Quantity::kwh(wornout),
            excess_consumption: Quantity::kwh(wornout - healthy),
            power_cost: effective.power_cost.clone(),
        }
    }

    /// 纤维损耗 (阶梯费率 + 透传总量)
    pub fn compute_fiber_loss(&self, effective: &EffectiveParameters) -> FiberLoss {
        let (bucket_index, loss_percent) = self.lookup_fiber_loss(
            &effective.fiber_loss_ranges,
            effective.total_running_hours.value,
        );

        FiberLoss {
            bucket_index,
            current_range: bucket_index.map(|i| effective.fiber_loss_ranges[i].clone()),
            loss_percent,
            total_fiber_loss: effective.total_fiber_loss.clone(),
            fiber_cost: effective.fiber_cost.clone(),
        }
    }

    // ==========================================
    // 计算辅助方法
    // ==========================================

    /// 单工况功率消耗 kWh
    pub fn power_consumption(&self, installed_kw: f64, percent: f64) -> f64 {
        installed_kw * percent / 100.0
    }

    /// 查找运行小时所在的纤维损耗阶梯
    ///
    /// # 返回
    /// (阶梯下标, 费率)
    ///
    /// # 规则
    /// - 命中 [min, max) 的区间 → 该区间费率
    /// - 低于最低区间 min 或无区间 → (None, 0)
    /// - 高于所有有界区间且无无界区间 → 最后一个区间费率
    ///
    /// # 说明
    /// 假设区间已在目录构建时校验
    pub fn lookup_fiber_loss(
        &self,
        ranges: &[FiberLossRange],
        hours: f64,
    ) -> (Option<usize>, f64) {
        if let Some(index) = ranges.iter().position(|r| r.contains(hours)) {
            return (Some(index), ranges[index].loss_percent);
        }

        match ranges.last() {
            Some(last) if hours >= last.min => (Some(ranges.len() - 1), last.loss_percent),
            _ => (None, 0.0),
        }
    }

    /// 功率成本合计 (显式请求)
    ///
    /// total = consumption[state] * power_cost.amount
    pub fn total_power_cost(&self, power: &PowerLoss) -> PowerCostTotals {
        let rate = &power.power_cost;
        let amount = |q: &Quantity| MonetaryAmount {
            amount: q.value * rate.amount,
            currency: rate.currency.clone(),
        };

        PowerCostTotals {
            healthy: amount(&power.healthy_consumption),
            wornout: amount(&power.wornout_consumption),
            excess: amount(&power.excess_consumption),
        }
    }

    /// 纤维损耗成本 (显式请求)
    ///
    /// total = total_fiber_loss * fiber_cost.amount
    pub fn total_fiber_cost(&self, fiber: &FiberLoss) -> MonetaryAmount {
        MonetaryAmount {
            amount: fiber.total_fiber_loss.value * fiber.fiber_cost.amount,
            currency: fiber.fiber_cost.currency.clone(),
        }
    }

    /// 按阶梯费率估算的损耗量 (仅供展示/趋势, 不替代权威总量)
    pub fn estimate_fiber_loss_from_rate(
        &self,
        production: &Quantity,
        fiber: &FiberLoss,
    ) -> Quantity {
        let unit = if production.unit.is_empty() {
            units::TPD.to_string()
        } else {
            production.unit.clone()
        };
        Quantity::new(production.value * fiber.loss_percent / 100.0, unit)
    }
}

impl Default for LossCalculator {
    fn default() -> Self {
        Self::new()
    }
}

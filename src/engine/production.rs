// ==========================================
// 备件健康与损耗计算引擎 - 产量估算引擎
// ==========================================
// 职责: 额定日产能按实际日运行小时折算
// 公式: total_production = capacity / 24 * daily_running_hours
// 输出: 非整数保留两位小数, 整数原样输出
// ==========================================

use crate::domain::quantity::{round_to, units, Quantity};
use tracing::warn;

/// 额定产能对应的小时数
const RATED_HOURS_PER_DAY: f64 = 24.0;

/// 默认保留小数位
pub const DEFAULT_PRODUCTION_DECIMALS: u32 = 2;

pub struct ProductionEstimator {
    decimals: u32,
}

impl ProductionEstimator {
    pub fn new() -> Self {
        Self::with_decimals(DEFAULT_PRODUCTION_DECIMALS)
    }

    pub fn with_decimals(decimals: u32) -> Self {
        Self { decimals }
    }

    /// 估算总产量
    ///
    /// # 参数
    /// - `capacity`: 额定 24 小时产能 (TPD)
    /// - `daily_running_hours`: 日运行小时
    ///
    /// # 返回
    /// 与产能同单位的产量; 产能或日运行小时为 0 时为 0
    ///
    /// # 说明
    /// 日运行小时单位不是小时/天时按 0 处理并记录告警, 不做隐式换算
    pub fn estimate_production(
        &self,
        capacity: &Quantity,
        daily_running_hours: &Quantity,
    ) -> Quantity {
        let hours = match daily_running_hours.to_hours() {
            Some(h) => h,
            None => {
                warn!(unit = %daily_running_hours.unit, "日运行小时单位无法换算, 按 0 计算");
                0.0
            }
        };

        let unit = if capacity.unit.trim().is_empty() {
            units::TPD.to_string()
        } else {
            capacity.unit.clone()
        };

        Quantity::new(self.estimate(capacity.value, hours), unit)
    }

    /// 估算总产量 (裸数值)
    pub fn estimate(&self, capacity_value: f64, daily_running_hours: f64) -> f64 {
        let raw = capacity_value / RATED_HOURS_PER_DAY * daily_running_hours;
        round_to(raw, self.decimals)
    }
}

impl Default for ProductionEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_day_equals_capacity() {
        let estimator = ProductionEstimator::new();
        let result = estimator.estimate_production(&Quantity::tpd(800.0), &Quantity::hours(24.0));
        assert_eq!(result, Quantity::tpd(800.0));
    }

    #[test]
    fn test_half_day() {
        let estimator = ProductionEstimator::new();
        assert_eq!(estimator.estimate(800.0, 12.0), 400.0);
    }

    #[test]
    fn test_non_integral_rounds_to_two_decimals() {
        let estimator = ProductionEstimator::new();
        // 100 / 24 * 7 = 29.1666...
        assert_eq!(estimator.estimate(100.0, 7.0), 29.17);
    }

    #[test]
    fn test_zero_inputs_yield_zero() {
        let estimator = ProductionEstimator::new();
        assert_eq!(estimator.estimate(0.0, 12.0), 0.0);
        assert_eq!(estimator.estimate(800.0, 0.0), 0.0);
    }

    #[test]
    fn test_out_of_domain_hours_propagate() {
        let estimator = ProductionEstimator::new();
        // 日运行小时 > 24 不截断
        assert_eq!(estimator.estimate(800.0, 30.0), 1000.0);
    }

    #[test]
    fn test_incompatible_daily_unit_yields_zero() {
        let estimator = ProductionEstimator::new();
        let result = estimator.estimate_production(&Quantity::tpd(800.0), &Quantity::kw(12.0));
        assert_eq!(result.value, 0.0);
    }
}

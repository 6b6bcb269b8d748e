// ==========================================
// ProductionEstimator 集成测试
// ==========================================
// 测试目标: 验证按日运行小时折算的产量估算
// ==========================================

use sparepart_health::domain::{units, Quantity};
use sparepart_health::ProductionEstimator;

#[test]
fn test_full_day_production() {
    let estimator = ProductionEstimator::new();

    let result = estimator.estimate_production(&Quantity::tpd(800.0), &Quantity::hours(24.0));

    assert_eq!(result, Quantity::tpd(800.0));
}

#[test]
fn test_half_day_production() {
    let estimator = ProductionEstimator::new();

    let result = estimator.estimate_production(&Quantity::tpd(800.0), &Quantity::hours(12.0));

    assert_eq!(result, Quantity::tpd(400.0));
}

#[test]
fn test_zero_inputs() {
    let estimator = ProductionEstimator::new();

    assert_eq!(estimator.estimate(0.0, 12.0), 0.0);
    assert_eq!(estimator.estimate(800.0, 0.0), 0.0);
}

#[test]
fn test_rounding() {
    let estimator = ProductionEstimator::new();

    // 1000 / 24 * 7 = 291.666...
    assert_eq!(estimator.estimate(1000.0, 7.0), 291.67);
    assert_eq!(ProductionEstimator::with_decimals(0).estimate(1000.0, 7.0), 292.0);
}

#[test]
fn test_output_keeps_capacity_unit() {
    let estimator = ProductionEstimator::new();

    let result =
        estimator.estimate_production(&Quantity::new(240.0, "kg/day"), &Quantity::hours(6.0));

    assert_eq!(result.unit, "kg/day");
    assert_eq!(result.value, 60.0);
}

#[test]
fn test_unconvertible_daily_hours_yield_zero() {
    let estimator = ProductionEstimator::new();

    let result =
        estimator.estimate_production(&Quantity::tpd(800.0), &Quantity::new(12.0, units::KW));

    assert_eq!(result.value, 0.0);
}

// ==========================================
// 备件健康与损耗计算引擎 - 覆写修改校验器
// ==========================================
// 职责: 写入前拒绝越界输入 (引擎本身不截断, 由调用方校验)
// 规则:
// - 小时/功率/单价/记录值不得为负
// - 日运行小时 ∈ [0, 24]
// - 功率消耗百分比 ∈ [0, 100]
// - 单位必须可换算为字段单位
// - 纤维损耗覆写值个数不得超过目录区间数
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::catalog::{CatalogEntry, CostRate};
use crate::domain::overrides::OverridePatch;
use crate::domain::quantity::{Quantity, UnitKind};
use serde_json::json;

const MAX_DAILY_RUNNING_HOURS: f64 = 24.0;

/// 覆写修改校验器 (无状态)
pub struct OverrideValidator {}

impl OverrideValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验一批修改
    ///
    /// # 返回
    /// - Ok(()): 全部通过
    /// - Err(ApiError::OverrideValidationError): 至少一项违规, 附全部违规详情
    pub fn validate_patches(
        &self,
        patches: &[OverridePatch],
        catalog: &CatalogEntry,
    ) -> ApiResult<()> {
        let violations: Vec<ValidationViolation> = patches
            .iter()
            .flat_map(|patch| self.check_patch(patch, catalog))
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        Err(ApiError::OverrideValidationError {
            reason: format!("{} 项修改未通过校验", violations.len()),
            violations,
        })
    }

    /// 校验单项修改, 返回违规列表
    pub fn check_patch(
        &self,
        patch: &OverridePatch,
        catalog: &CatalogEntry,
    ) -> Vec<ValidationViolation> {
        let mut violations = Vec::new();

        match patch {
            OverridePatch::LifetimeOfRotor(q) => {
                self.check_quantity("lifetime_of_rotor", q, UnitKind::Hours, &mut violations)
            }
            OverridePatch::TotalRunningHours(q) => {
                self.check_quantity("total_running_hours", q, UnitKind::Hours, &mut violations)
            }
            OverridePatch::DailyRunningHours(q) => {
                self.check_quantity("daily_running_hours", q, UnitKind::Hours, &mut violations);
                if let Some(hours) = q.to_hours() {
                    if hours > MAX_DAILY_RUNNING_HOURS {
                        violations.push(violation(
                            "OUT_OF_RANGE",
                            "daily_running_hours",
                            format!("日运行小时 {} 超过 {}", hours, MAX_DAILY_RUNNING_HOURS),
                        ));
                    }
                }
            }
            OverridePatch::InstalledMotorPower(q) => {
                self.check_quantity("installed_motor_power", q, UnitKind::Kw, &mut violations)
            }
            OverridePatch::TotalProduction(q) => {
                self.check_non_negative("total_production", q.value, &mut violations)
            }
            OverridePatch::TotalFiberLoss(q) => {
                self.check_non_negative("total_fiber_loss", q.value, &mut violations)
            }
            OverridePatch::FiberCost(cost) => self.check_cost("fiber_cost", cost, &mut violations),
            OverridePatch::PowerCost(cost) => self.check_cost("power_cost", cost, &mut violations),
            OverridePatch::HealthyConsumptionPercent(p) => {
                self.check_percent("actual_motor_power_consumption.healthy", *p, &mut violations)
            }
            OverridePatch::WornoutConsumptionPercent(p) => {
                self.check_percent("actual_motor_power_consumption.wornout", *p, &mut violations)
            }
            OverridePatch::FiberLossValues(values) => {
                if values.len() > catalog.fiber_loss_ranges.len() {
                    violations.push(ValidationViolation {
                        violation_type: "LENGTH_MISMATCH".to_string(),
                        field: "fiber_loss_ranges".to_string(),
                        reason: "纤维损耗覆写值个数超过目录区间数".to_string(),
                        details: Some(json!({
                            "override_len": values.len(),
                            "catalog_len": catalog.fiber_loss_ranges.len(),
                        })),
                    });
                }
                for (index, value) in values.iter().enumerate() {
                    self.check_non_negative(
                        &format!("fiber_loss_ranges[{}]", index),
                        *value,
                        &mut violations,
                    );
                }
            }
            OverridePatch::FiberLossValue { index, value } => {
                if *index >= catalog.fiber_loss_ranges.len() {
                    violations.push(violation(
                        "LENGTH_MISMATCH",
                        "fiber_loss_ranges",
                        format!(
                            "位置 {} 超出目录区间数 {}",
                            index,
                            catalog.fiber_loss_ranges.len()
                        ),
                    ));
                }
                self.check_non_negative(
                    &format!("fiber_loss_ranges[{}]", index),
                    *value,
                    &mut violations,
                );
            }
            OverridePatch::Clear(_) => {}
        }

        violations
    }

    fn check_quantity(
        &self,
        field: &str,
        q: &Quantity,
        kind: UnitKind,
        violations: &mut Vec<ValidationViolation>,
    ) {
        match q.value_in(kind) {
            Some(value) => self.check_non_negative(field, value, violations),
            None => violations.push(ValidationViolation {
                violation_type: "UNIT_MISMATCH".to_string(),
                field: field.to_string(),
                reason: format!("单位 {} 无法换算", q.unit),
                details: Some(json!({ "unit": q.unit, "expected": format!("{:?}", kind) })),
            }),
        }
    }

    fn check_non_negative(
        &self,
        field: &str,
        value: f64,
        violations: &mut Vec<ValidationViolation>,
    ) {
        if !(value >= 0.0) {
            violations.push(violation(
                "NEGATIVE_VALUE",
                field,
                format!("取值 {} 不得为负", value),
            ));
        }
    }

    fn check_percent(&self, field: &str, percent: f64, violations: &mut Vec<ValidationViolation>) {
        if !(0.0..=100.0).contains(&percent) {
            violations.push(violation(
                "OUT_OF_RANGE",
                field,
                format!("百分比 {} 超出 [0, 100]", percent),
            ));
        }
    }

    fn check_cost(&self, field: &str, cost: &CostRate, violations: &mut Vec<ValidationViolation>) {
        self.check_non_negative(field, cost.amount, violations);
    }
}

impl Default for OverrideValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn violation(violation_type: &str, field: &str, reason: String) -> ValidationViolation {
    ValidationViolation {
        violation_type: violation_type.to_string(),
        field: field.to_string(),
        reason,
        details: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::FiberLossRange;
    use crate::domain::overrides::OverrideField;
    use crate::domain::quantity::units;

    fn create_test_catalog() -> CatalogEntry {
        let mut catalog = CatalogEntry::new("rotor", 3600.0);
        catalog.fiber_loss_ranges = vec![
            FiberLossRange::new(0.0, Some(240.0), 0.15),
            FiberLossRange::new(240.0, None, 0.25),
        ];
        catalog
    }

    #[test]
    fn test_daily_hours_above_24_rejected() {
        let validator = OverrideValidator::new();
        let violations = validator.check_patch(
            &OverridePatch::DailyRunningHours(Quantity::hours(25.0)),
            &create_test_catalog(),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, "OUT_OF_RANGE");
    }

    #[test]
    fn test_daily_hours_in_days_converted_before_check() {
        let validator = OverrideValidator::new();
        let violations = validator.check_patch(
            &OverridePatch::DailyRunningHours(Quantity::new(2.0, units::DAYS)),
            &create_test_catalog(),
        );
        // 2 天 = 48 小时
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_negative_and_unit_mismatch() {
        let validator = OverrideValidator::new();
        let catalog = create_test_catalog();

        let negative = validator.check_patch(
            &OverridePatch::TotalRunningHours(Quantity::hours(-1.0)),
            &catalog,
        );
        assert_eq!(negative[0].violation_type, "NEGATIVE_VALUE");

        let mismatch = validator.check_patch(
            &OverridePatch::InstalledMotorPower(Quantity::hours(500.0)),
            &catalog,
        );
        assert_eq!(mismatch[0].violation_type, "UNIT_MISMATCH");
    }

    #[test]
    fn test_fiber_values_length_checked() {
        let validator = OverrideValidator::new();
        let catalog = create_test_catalog();

        let violations = validator.check_patch(
            &OverridePatch::FiberLossValues(vec![0.1, 0.2, 0.3]),
            &catalog,
        );
        assert_eq!(violations[0].violation_type, "LENGTH_MISMATCH");

        let violations = validator.check_patch(
            &OverridePatch::FiberLossValue { index: 5, value: 0.1 },
            &catalog,
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_validate_patches_collects_all() {
        let validator = OverrideValidator::new();
        let patches = vec![
            OverridePatch::HealthyConsumptionPercent(120.0),
            OverridePatch::WornoutConsumptionPercent(90.0),
            OverridePatch::PowerCost(CostRate::new(-0.1, "USD", "kWh")),
            OverridePatch::Clear(OverrideField::FiberCost),
        ];

        match validator.validate_patches(&patches, &create_test_catalog()) {
            Err(ApiError::OverrideValidationError { violations, .. }) => {
                assert_eq!(violations.len(), 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

// ==========================================
// 备件健康与损耗计算引擎 - 参数解析引擎
// ==========================================
// 职责: 目录默认值 + 现场覆写 → 有效参数
// 红线: 解析永不失败, 缺失字段取带单位的零值
// ==========================================
// 规则 (逐字段):
// - 数值: 覆写存在且 "有意义地设置" 时生效 (默认策略: value > 0)
// - 单价: 覆写对象存在且 amount 有意义时整体替换
// - 纤维损耗: 覆写数组非空时按位置替换 loss_percent, 保留目录 min/max
// - 单位: 小时/天显式换算, 不可换算的覆写值忽略并记录备注
// ==========================================

use crate::domain::catalog::{CatalogEntry, CostRate, FiberLossRange, StatePair};
use crate::domain::effective::{EffectiveParameters, ParameterSources};
use crate::domain::overrides::{FiberLossValue, SparePartOverride};
use crate::domain::quantity::{units, Percentage, Quantity, UnitKind};
use crate::domain::types::{FieldSource, OverridePolicy};
use tracing::{debug, instrument, warn};

// ==========================================
// ResolutionEngine - 参数解析引擎
// ==========================================
/// 无状态引擎, 仅持有覆写策略
#[derive(Debug, Clone, Copy)]
pub struct ResolutionEngine {
    policy: OverridePolicy,
}

impl ResolutionEngine {
    pub fn new() -> Self {
        Self::with_policy(OverridePolicy::default())
    }

    pub fn with_policy(policy: OverridePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverridePolicy {
        self.policy
    }

    /// 判断覆写数值是否视为已设置
    ///
    /// - ZeroMeansUnset: value > 0
    /// - ExplicitZero: 只要提供即生效
    pub fn is_meaningful(&self, value: f64) -> bool {
        match self.policy {
            OverridePolicy::ZeroMeansUnset => value > 0.0,
            OverridePolicy::ExplicitZero => true,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 合并目录条目与覆写记录
    ///
    /// # 参数
    /// - `catalog`: 目录条目
    /// - `ov`: 覆写记录 (可无)
    ///
    /// # 返回
    /// 完整的有效参数, 附带字段来源与备注
    #[instrument(
        skip_all,
        fields(spare_part_type = %catalog.spare_part_type, has_override = ov.is_some())
    )]
    pub fn resolve(
        &self,
        catalog: &CatalogEntry,
        ov: Option<&SparePartOverride>,
    ) -> EffectiveParameters {
        let mut notes = Vec::new();
        let mut sources = ParameterSources::default();

        // 1. 寿命与运行计数
        let (life_time, source) = self.resolve_quantity(
            "life_time",
            UnitKind::Hours,
            units::HOURS,
            Some(&catalog.life_time),
            ov.and_then(|o| o.lifetime_of_rotor.as_ref()),
            &mut notes,
        );
        sources.life_time = source;

        let (total_running_hours, source) = self.resolve_quantity(
            "total_running_hours",
            UnitKind::Hours,
            units::HOURS,
            None,
            ov.and_then(|o| o.total_running_hours.as_ref()),
            &mut notes,
        );
        sources.total_running_hours = source;

        let (daily_running_hours, source) = self.resolve_quantity(
            "daily_running_hours",
            UnitKind::Hours,
            units::HOURS,
            None,
            ov.and_then(|o| o.daily_running_hours.as_ref()),
            &mut notes,
        );
        sources.daily_running_hours = source;

        // 2. 纤维损耗阶梯
        let (fiber_loss_ranges, source) = self.resolve_fiber_loss_ranges(
            &catalog.fiber_loss_ranges,
            ov.and_then(|o| o.fiber_loss_ranges.as_deref()),
            &mut notes,
        );
        sources.fiber_loss_ranges = source;

        // 3. 单价
        let (fiber_cost, source) =
            self.resolve_cost(&catalog.fiber_cost, ov.and_then(|o| o.fiber_cost.as_ref()));
        sources.fiber_cost = source;

        let (power_cost, source) =
            self.resolve_cost(&catalog.power_cost, ov.and_then(|o| o.power_cost.as_ref()));
        sources.power_cost = source;

        // 4. 功率消耗百分比 (健康/磨损分别覆写)
        let ov_consumption = ov.and_then(|o| o.actual_motor_power_consumption.as_ref());
        let (healthy, source) = self.resolve_percent(
            catalog.actual_motor_power_consumption.healthy,
            ov_consumption.and_then(|p| p.healthy),
        );
        sources.healthy_consumption = source;

        let (wornout, source) = self.resolve_percent(
            catalog.actual_motor_power_consumption.wornout,
            ov_consumption.and_then(|p| p.wornout),
        );
        sources.wornout_consumption = source;

        // 5. 装机功率 (仅现场数据)
        let (installed_motor_power, source) = self.resolve_quantity(
            "installed_motor_power",
            UnitKind::Kw,
            units::KW,
            None,
            ov.and_then(|o| o.installed_motor_power.as_ref()),
            &mut notes,
        );
        sources.installed_motor_power = source;

        // 6. 透传记录值
        let total_fiber_loss = match ov.and_then(|o| o.total_fiber_loss.as_ref()) {
            Some(q) if self.is_meaningful(q.value) => {
                sources.total_fiber_loss = FieldSource::Override;
                q.clone()
            }
            _ => Quantity::zero(units::TPD),
        };

        let total_production = ov
            .and_then(|o| o.total_production.as_ref())
            .filter(|q| self.is_meaningful(q.value))
            .cloned();

        if !notes.is_empty() {
            debug!(notes = ?notes, "参数解析产生备注");
        }

        EffectiveParameters {
            spare_part_type: catalog.spare_part_type.clone(),
            life_time,
            total_running_hours,
            daily_running_hours,
            fiber_loss_ranges,
            fiber_cost,
            actual_motor_power_consumption: StatePair::new(healthy, wornout),
            power_consumption: catalog.power_consumption.clone(),
            power_cost,
            installed_motor_power,
            total_production,
            total_fiber_loss,
            sources,
            notes,
        }
    }

    // ==========================================
    // 字段解析辅助方法
    // ==========================================

    /// 解析带单位数值字段
    ///
    /// # 顺序
    /// 1. 覆写值可换算为目标单位且有意义 → OVERRIDE
    /// 2. 目录值可换算为目标单位 → CATALOG (零值记为 DEFAULT)
    /// 3. 否则 → 目标单位的零值 (DEFAULT)
    fn resolve_quantity(
        &self,
        field: &str,
        kind: UnitKind,
        unit: &str,
        catalog: Option<&Quantity>,
        ov: Option<&Quantity>,
        notes: &mut Vec<String>,
    ) -> (Quantity, FieldSource) {
        if let Some(q) = ov {
            match q.value_in(kind) {
                Some(value) if self.is_meaningful(value) => {
                    if q.kind() != kind {
                        notes.push(format!(
                            "{}: 覆写值 {} 已换算为 {} {}",
                            field, q, value, unit
                        ));
                    }
                    return (Quantity::new(value, unit), FieldSource::Override);
                }
                Some(_) => {
                    debug!(field, value = q.value, "覆写值未设置, 回落目录值");
                }
                None => {
                    warn!(field, unit = %q.unit, expected = unit, "覆写值单位不匹配, 已忽略");
                    notes.push(format!(
                        "{}: 覆写单位 {} 无法换算为 {}, 已忽略",
                        field, q.unit, unit
                    ));
                }
            }
        }

        if let Some(q) = catalog {
            match q.value_in(kind) {
                Some(value) => {
                    let source = if value != 0.0 {
                        FieldSource::Catalog
                    } else {
                        FieldSource::Default
                    };
                    return (Quantity::new(value, unit), source);
                }
                None => {
                    warn!(field, unit = %q.unit, expected = unit, "目录值单位不匹配, 取零值");
                    notes.push(format!(
                        "{}: 目录单位 {} 无法换算为 {}, 取零值",
                        field, q.unit, unit
                    ));
                }
            }
        }

        (Quantity::zero(unit), FieldSource::Default)
    }

    /// 解析单价 (整体替换)
    fn resolve_cost(&self, catalog: &CostRate, ov: Option<&CostRate>) -> (CostRate, FieldSource) {
        if let Some(cost) = ov {
            if self.is_meaningful(cost.amount) {
                return (cost.clone(), FieldSource::Override);
            }
        }

        let source = if catalog.is_set() {
            FieldSource::Catalog
        } else {
            FieldSource::Default
        };
        (catalog.clone(), source)
    }

    /// 解析功率消耗百分比
    fn resolve_percent(
        &self,
        catalog: Percentage,
        ov: Option<Percentage>,
    ) -> (Percentage, FieldSource) {
        match ov {
            Some(p) if self.is_meaningful(p.percent) => (p, FieldSource::Override),
            _ if catalog.percent != 0.0 => (catalog, FieldSource::Catalog),
            _ => (catalog, FieldSource::Default),
        }
    }

    /// 解析纤维损耗阶梯
    ///
    /// 覆写数组非空时按位置替换 loss_percent; 目录区间数决定结果长度,
    /// 缺位保留目录值, 多余覆写值忽略
    fn resolve_fiber_loss_ranges(
        &self,
        catalog: &[FiberLossRange],
        ov: Option<&[FiberLossValue]>,
        notes: &mut Vec<String>,
    ) -> (Vec<FiberLossRange>, FieldSource) {
        let catalog_source = if catalog.is_empty() {
            FieldSource::Default
        } else {
            FieldSource::Catalog
        };

        let values = match ov {
            Some(values) if !values.is_empty() => values,
            _ => return (catalog.to_vec(), catalog_source),
        };

        if catalog.is_empty() {
            notes.push(format!(
                "fiber_loss_ranges: 目录无区间定义, 忽略 {} 个覆写值",
                values.len()
            ));
            return (Vec::new(), FieldSource::Default);
        }

        if values.len() != catalog.len() {
            notes.push(format!(
                "fiber_loss_ranges: 覆写值 {} 个, 目录区间 {} 个, 按位置对齐",
                values.len(),
                catalog.len()
            ));
        }

        let ranges = catalog
            .iter()
            .enumerate()
            .map(|(index, range)| {
                let mut range = range.clone();
                if let Some(v) = values.get(index) {
                    range.loss_percent = v.value;
                }
                range
            })
            .collect();

        (ranges, FieldSource::Override)
    }
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 备件健康与损耗计算引擎 - 现场覆写领域模型
// ==========================================
// 职责: (客户, 机台, 备件) 维度的覆写值与运行计数
// 红线: 字段缺失即 "删除" 语义, 缺失字段回落到目录默认值
// ==========================================

use crate::domain::catalog::{CostRate, FiberLossRange};
use crate::domain::quantity::{Percentage, Quantity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// InstallationKey - 安装位主键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstallationKey {
    pub client_id: String,
    pub machine_id: String,
    pub spare_part_id: String, // 同时是目录条目的备件类型
}

impl InstallationKey {
    pub fn new(
        client_id: impl Into<String>,
        machine_id: impl Into<String>,
        spare_part_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            machine_id: machine_id.into(),
            spare_part_id: spare_part_id.into(),
        }
    }
}

impl fmt::Display for InstallationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.client_id, self.machine_id, self.spare_part_id
        )
    }
}

/// 纤维损耗覆写值 (与目录区间按位置对齐)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiberLossValue {
    pub value: f64,
}

/// 可部分覆写的健康/磨损成对数据
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialStatePair<T> {
    #[serde(default)]
    pub healthy: Option<T>,
    #[serde(default)]
    pub wornout: Option<T>,
}

// ==========================================
// SparePartOverride - 现场覆写记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SparePartOverride {
    // ===== 寿命与运行计数 =====
    pub lifetime_of_rotor: Option<Quantity>,
    pub total_running_hours: Option<Quantity>, // 上次复位以来累计运行
    pub daily_running_hours: Option<Quantity>, // 取值域 [0, 24]

    // ===== 损耗参数 =====
    pub fiber_loss_ranges: Option<Vec<FiberLossValue>>,
    pub fiber_cost: Option<CostRate>,
    pub power_cost: Option<CostRate>,
    pub actual_motor_power_consumption: Option<PartialStatePair<Percentage>>,
    pub installed_motor_power: Option<Quantity>,

    // ===== 缓存结果 (可能过期, 不作为新计算依据) =====
    pub total_production: Option<Quantity>,
    pub total_fiber_loss: Option<Quantity>,

    // ===== 审计 =====
    pub updated_at: Option<DateTime<Utc>>,
}

// ==========================================
// OverrideField - 可清除的字段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideField {
    LifetimeOfRotor,
    TotalRunningHours,
    DailyRunningHours,
    FiberLossRanges,
    FiberCost,
    PowerCost,
    HealthyConsumption,
    WornoutConsumption,
    InstalledMotorPower,
    TotalProduction,
    TotalFiberLoss,
}

// ==========================================
// OverridePatch - 类型化字段修改
// ==========================================
// 每个字段一个变体, 取代按点分路径字符串修改嵌套字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum OverridePatch {
    LifetimeOfRotor(Quantity),
    TotalRunningHours(Quantity),
    DailyRunningHours(Quantity),
    FiberLossValues(Vec<f64>),
    FiberLossValue { index: usize, value: f64 },
    FiberCost(CostRate),
    PowerCost(CostRate),
    HealthyConsumptionPercent(f64),
    WornoutConsumptionPercent(f64),
    InstalledMotorPower(Quantity),
    TotalProduction(Quantity),
    TotalFiberLoss(Quantity),
    Clear(OverrideField),
}

impl SparePartOverride {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 类型化 setter
    // ==========================================

    pub fn set_lifetime_of_rotor(&mut self, lifetime: Quantity) {
        self.lifetime_of_rotor = Some(lifetime);
    }

    pub fn set_total_running_hours(&mut self, hours: Quantity) {
        self.total_running_hours = Some(hours);
    }

    pub fn set_daily_running_hours(&mut self, hours: Quantity) {
        self.daily_running_hours = Some(hours);
    }

    /// 整体替换纤维损耗覆写值
    pub fn set_fiber_loss_values(&mut self, values: Vec<f64>) {
        self.fiber_loss_ranges = Some(
            values
                .into_iter()
                .map(|value| FiberLossValue { value })
                .collect(),
        );
    }

    /// 用目录费率补齐纤维损耗覆写数组
    ///
    /// 已有位置保持不变, 缺失位置取对应目录区间的 loss_percent
    pub fn seed_fiber_loss_values(&mut self, catalog_ranges: &[FiberLossRange]) {
        let values = self.fiber_loss_ranges.get_or_insert_with(Vec::new);
        let start = values.len();
        values.extend(
            catalog_ranges
                .iter()
                .skip(start)
                .map(|range| FiberLossValue {
                    value: range.loss_percent,
                }),
        );
    }

    /// 修改单个位置的纤维损耗覆写值
    ///
    /// 位置超出当前长度时, 中间位置补 0 (0 在解析时视为按位置生效的值);
    /// 需要保留目录费率时先调用 `seed_fiber_loss_values`
    pub fn set_fiber_loss_value(&mut self, index: usize, value: f64) {
        let values = self.fiber_loss_ranges.get_or_insert_with(Vec::new);
        if values.len() <= index {
            values.resize(index + 1, FiberLossValue { value: 0.0 });
        }
        values[index] = FiberLossValue { value };
    }

    pub fn set_fiber_cost(&mut self, cost: CostRate) {
        self.fiber_cost = Some(cost);
    }

    pub fn set_power_cost(&mut self, cost: CostRate) {
        self.power_cost = Some(cost);
    }

    pub fn set_healthy_consumption_percent(&mut self, percent: f64) {
        self.actual_motor_power_consumption
            .get_or_insert_with(PartialStatePair::default)
            .healthy = Some(Percentage::new(percent));
    }

    pub fn set_wornout_consumption_percent(&mut self, percent: f64) {
        self.actual_motor_power_consumption
            .get_or_insert_with(PartialStatePair::default)
            .wornout = Some(Percentage::new(percent));
    }

    pub fn set_installed_motor_power(&mut self, power: Quantity) {
        self.installed_motor_power = Some(power);
    }

    pub fn set_total_production(&mut self, production: Quantity) {
        self.total_production = Some(production);
    }

    pub fn set_total_fiber_loss(&mut self, loss: Quantity) {
        self.total_fiber_loss = Some(loss);
    }

    /// 清除字段 (回落到目录默认值)
    pub fn clear(&mut self, field: OverrideField) {
        match field {
            OverrideField::LifetimeOfRotor => self.lifetime_of_rotor = None,
            OverrideField::TotalRunningHours => self.total_running_hours = None,
            OverrideField::DailyRunningHours => self.daily_running_hours = None,
            OverrideField::FiberLossRanges => self.fiber_loss_ranges = None,
            OverrideField::FiberCost => self.fiber_cost = None,
            OverrideField::PowerCost => self.power_cost = None,
            OverrideField::HealthyConsumption => {
                if let Some(pair) = self.actual_motor_power_consumption.as_mut() {
                    pair.healthy = None;
                }
            }
            OverrideField::WornoutConsumption => {
                if let Some(pair) = self.actual_motor_power_consumption.as_mut() {
                    pair.wornout = None;
                }
            }
            OverrideField::InstalledMotorPower => self.installed_motor_power = None,
            OverrideField::TotalProduction => self.total_production = None,
            OverrideField::TotalFiberLoss => self.total_fiber_loss = None,
        }
    }

    /// 应用类型化修改
    pub fn apply(&mut self, patch: OverridePatch) {
        match patch {
            OverridePatch::LifetimeOfRotor(q) => self.set_lifetime_of_rotor(q),
            OverridePatch::TotalRunningHours(q) => self.set_total_running_hours(q),
            OverridePatch::DailyRunningHours(q) => self.set_daily_running_hours(q),
            OverridePatch::FiberLossValues(values) => self.set_fiber_loss_values(values),
            OverridePatch::FiberLossValue { index, value } => {
                self.set_fiber_loss_value(index, value)
            }
            OverridePatch::FiberCost(cost) => self.set_fiber_cost(cost),
            OverridePatch::PowerCost(cost) => self.set_power_cost(cost),
            OverridePatch::HealthyConsumptionPercent(p) => self.set_healthy_consumption_percent(p),
            OverridePatch::WornoutConsumptionPercent(p) => self.set_wornout_consumption_percent(p),
            OverridePatch::InstalledMotorPower(q) => self.set_installed_motor_power(q),
            OverridePatch::TotalProduction(q) => self.set_total_production(q),
            OverridePatch::TotalFiberLoss(q) => self.set_total_fiber_loss(q),
            OverridePatch::Clear(field) => self.clear(field),
        }
    }

    /// 读取纤维损耗覆写值 (按位置)
    pub fn fiber_loss_value_at(&self, index: usize) -> Option<f64> {
        self.fiber_loss_ranges
            .as_ref()
            .and_then(|values| values.get(index))
            .map(|v| v.value)
    }
}

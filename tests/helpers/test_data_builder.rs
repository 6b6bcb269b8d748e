// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use sparepart_health::domain::{
    CatalogEntry, CostRate, FiberLossRange, InstallationKey, Percentage, Quantity,
    SparePartOverride, StatePair,
};

// ==========================================
// CatalogEntry 构建器
// ==========================================

pub struct CatalogBuilder {
    entry: CatalogEntry,
}

impl CatalogBuilder {
    pub fn new(spare_part_type: &str) -> Self {
        Self {
            entry: CatalogEntry::new(spare_part_type, 0.0),
        }
    }

    pub fn life_hours(mut self, hours: f64) -> Self {
        self.entry.life_time = Quantity::hours(hours);
        self
    }

    pub fn life_time(mut self, life_time: Quantity) -> Self {
        self.entry.life_time = life_time;
        self
    }

    /// 追加阶梯 [min, max)
    pub fn fiber_range(mut self, min: f64, max: Option<f64>, loss_percent: f64) -> Self {
        self.entry
            .fiber_loss_ranges
            .push(FiberLossRange::new(min, max, loss_percent));
        self
    }

    pub fn fiber_cost(mut self, amount: f64) -> Self {
        self.entry.fiber_cost = CostRate::new(amount, "USD", "ton");
        self
    }

    pub fn power_cost(mut self, amount: f64) -> Self {
        self.entry.power_cost = CostRate::new(amount, "USD", "kWh");
        self
    }

    pub fn consumption_percent(mut self, healthy: f64, wornout: f64) -> Self {
        self.entry.actual_motor_power_consumption =
            StatePair::new(Percentage::new(healthy), Percentage::new(wornout));
        self
    }

    pub fn build(self) -> CatalogEntry {
        self.entry
    }
}

/// 标准转子目录: 寿命 3600h, 四级纤维损耗阶梯, 功率 80% / 90%
pub fn standard_rotor_catalog() -> CatalogEntry {
    CatalogBuilder::new("rotor")
        .life_hours(3600.0)
        .fiber_range(0.0, Some(240.0), 0.15)
        .fiber_range(240.0, Some(480.0), 0.25)
        .fiber_range(480.0, Some(720.0), 0.40)
        .fiber_range(720.0, None, 0.50)
        .fiber_cost(1200.0)
        .power_cost(0.12)
        .consumption_percent(80.0, 90.0)
        .build()
}

// ==========================================
// SparePartOverride 构建器
// ==========================================

#[derive(Default)]
pub struct OverrideBuilder {
    record: SparePartOverride,
}

impl OverrideBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifetime_hours(mut self, hours: f64) -> Self {
        self.record.set_lifetime_of_rotor(Quantity::hours(hours));
        self
    }

    pub fn lifetime(mut self, lifetime: Quantity) -> Self {
        self.record.set_lifetime_of_rotor(lifetime);
        self
    }

    pub fn total_running_hours(mut self, hours: f64) -> Self {
        self.record.set_total_running_hours(Quantity::hours(hours));
        self
    }

    pub fn daily_running_hours(mut self, hours: f64) -> Self {
        self.record.set_daily_running_hours(Quantity::hours(hours));
        self
    }

    pub fn installed_kw(mut self, kw: f64) -> Self {
        self.record.set_installed_motor_power(Quantity::kw(kw));
        self
    }

    pub fn fiber_loss_values(mut self, values: Vec<f64>) -> Self {
        self.record.set_fiber_loss_values(values);
        self
    }

    pub fn healthy_percent(mut self, percent: f64) -> Self {
        self.record.set_healthy_consumption_percent(percent);
        self
    }

    pub fn wornout_percent(mut self, percent: f64) -> Self {
        self.record.set_wornout_consumption_percent(percent);
        self
    }

    pub fn total_fiber_loss(mut self, tpd: f64) -> Self {
        self.record.set_total_fiber_loss(Quantity::tpd(tpd));
        self
    }

    pub fn fiber_cost(mut self, amount: f64) -> Self {
        self.record.set_fiber_cost(CostRate::new(amount, "USD", "ton"));
        self
    }

    pub fn build(self) -> SparePartOverride {
        self.record
    }
}

pub fn installation_key(client: &str, machine: &str, spare_part: &str) -> InstallationKey {
    InstallationKey::new(client, machine, spare_part)
}

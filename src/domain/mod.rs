// ==========================================
// 备件健康与损耗计算引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、数据完整性校验
// 红线: 不含存储访问逻辑, 不含引擎计算逻辑
// ==========================================

pub mod catalog;
pub mod effective;
pub mod overrides;
pub mod quantity;
pub mod types;

// 重导出核心类型
pub use catalog::{CatalogEntry, CatalogError, CostRate, FiberLossRange, StatePair};
pub use effective::{EffectiveParameters, ParameterSources};
pub use overrides::{
    FiberLossValue, InstallationKey, OverrideField, OverridePatch, PartialStatePair,
    SparePartOverride,
};
pub use quantity::{units, Percentage, Quantity, UnitKind};
pub use types::{FieldSource, HealthStatus, OverridePolicy, WearState};

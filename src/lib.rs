// ==========================================
// 备件健康与损耗计算引擎 - 核心库
// ==========================================
// 系统定位: 设备监控看板的计算核心 (纯函数引擎 + 调用方接口)
// 输入: 备件目录 + 现场覆写
// 输出: 健康分级 + 纤维/功率损耗 + 产量估算
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 外部协作方接口层 - 目录/覆写存储
pub mod store;

// 配置层 - 引擎配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 调用方接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FieldSource, HealthStatus, OverridePolicy, WearState};

// 领域实体
pub use domain::{
    CatalogEntry, CatalogError, CostRate, EffectiveParameters, FiberLossRange, InstallationKey,
    OverridePatch, Percentage, Quantity, SparePartOverride,
};

// 引擎
pub use engine::{
    HealthAssessment, HealthClassifier, LossCalculator, LossResult, ProductionEstimator,
    ResolutionEngine, SparePartEvaluator, SparePartReport,
};

// API
pub use api::{ApiError, ApiResult, SparePartHealthApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "备件健康与损耗计算引擎";

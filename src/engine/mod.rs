// ==========================================
// 备件健康与损耗计算引擎 - 引擎层
// ==========================================
// 职责: 实现领域规则, 不做任何 I/O
// 红线: 引擎无状态、同步、纯函数; 所有分级必须输出 reason
// ==========================================

pub mod evaluator;
pub mod health;
pub mod loss;
pub mod production;
pub mod resolution;

// 重导出核心引擎
pub use evaluator::{SparePartEvaluator, SparePartReport};
pub use health::{HealthAssessment, HealthClassifier};
pub use loss::{
    FiberLoss, LossCalculator, LossResult, MonetaryAmount, PowerCostTotals, PowerLoss,
};
pub use production::{ProductionEstimator, DEFAULT_PRODUCTION_DECIMALS};
pub use resolution::ResolutionEngine;

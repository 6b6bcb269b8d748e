// ==========================================
// 备件健康与损耗计算引擎 - API 层
// ==========================================
// 职责: 面向请求处理代码的业务接口 (取快照/校验/回写)
// ==========================================

pub mod error;
pub mod health_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use health_api::{InstallationReport, SparePartHealthApi};
pub use validator::OverrideValidator;

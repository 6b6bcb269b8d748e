// ==========================================
// 备件健康与损耗计算引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 将存储/目录错误转换为调用方可读的错误消息
// ==========================================

use crate::store::error::StoreError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("目录数据无效: {0}")]
    InvalidCatalog(String),

    /// 覆写修改校验失败（带详细原因）
    #[error("覆写校验失败: {reason}")]
    OverrideValidationError {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 StoreError 转换
// ==========================================
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            StoreError::InvalidCatalog {
                spare_part_type,
                source,
            } => ApiError::InvalidCatalog(format!("{}: {}", spare_part_type, source)),
            StoreError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 违规类型（NEGATIVE_VALUE / OUT_OF_RANGE / UNIT_MISMATCH / LENGTH_MISMATCH）
    pub violation_type: String,
    /// 字段名
    pub field: String,
    /// 违规原因
    pub reason: String,
    /// 额外信息（可选）
    pub details: Option<serde_json::Value>,
}

// ==========================================
// 备件健康与损耗计算引擎 - 外部存储错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::catalog::CatalogError;
use thiserror::Error;

/// 外部存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 查询错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 数据完整性错误 =====
    #[error("目录数据无效 (spare_part_type={spare_part_type}): {source}")]
    InvalidCatalog {
        spare_part_type: String,
        #[source]
        source: CatalogError,
    },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;

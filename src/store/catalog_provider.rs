// ==========================================
// 备件健康与损耗计算引擎 - 备件目录提供方
// ==========================================
// 职责: 定义目录读取接口 + 内存实现
// 红线: 目录在进入系统时校验纤维损耗阶梯, 引擎不再重复校验
// ==========================================

use crate::domain::catalog::CatalogEntry;
use crate::store::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

// ==========================================
// CatalogProvider Trait
// ==========================================
// 实现者: 后端目录服务适配器 / InMemoryCatalogProvider
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// 按备件类型读取目录条目
    ///
    /// # 返回
    /// - Ok(CatalogEntry): 完整物化的目录条目
    /// - Err(StoreError::NotFound): 类型不存在
    async fn get_catalog_entry(&self, spare_part_type: &str) -> StoreResult<CatalogEntry>;

    /// 列出全部备件类型
    async fn list_spare_part_types(&self) -> StoreResult<Vec<String>>;
}

// ==========================================
// InMemoryCatalogProvider - 内存目录
// ==========================================
#[derive(Default)]
pub struct InMemoryCatalogProvider {
    entries: RwLock<HashMap<String, CatalogEntry>>,
}

impl InMemoryCatalogProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入目录条目 (校验后写入)
    pub async fn insert(&self, entry: CatalogEntry) -> StoreResult<()> {
        if let Err(source) = entry.validate() {
            return Err(StoreError::InvalidCatalog {
                spare_part_type: entry.spare_part_type,
                source,
            });
        }

        debug!(spare_part_type = %entry.spare_part_type, "写入目录条目");
        self.entries
            .write()
            .await
            .insert(entry.spare_part_type.clone(), entry);
        Ok(())
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalogProvider {
    async fn get_catalog_entry(&self, spare_part_type: &str) -> StoreResult<CatalogEntry> {
        self.entries
            .read()
            .await
            .get(spare_part_type)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "CatalogEntry".to_string(),
                id: spare_part_type.to_string(),
            })
    }

    async fn list_spare_part_types(&self) -> StoreResult<Vec<String>> {
        let mut types: Vec<String> = self.entries.read().await.keys().cloned().collect();
        types.sort();
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::FiberLossRange;

    #[tokio::test]
    async fn test_insert_and_get() {
        let provider = InMemoryCatalogProvider::new();
        provider.insert(CatalogEntry::new("rotor", 3600.0)).await.unwrap();

        let entry = provider.get_catalog_entry("rotor").await.unwrap();
        assert_eq!(entry.life_time.value, 3600.0);
        assert_eq!(provider.list_spare_part_types().await.unwrap(), vec!["rotor"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_malformed_ranges() {
        let provider = InMemoryCatalogProvider::new();
        let mut entry = CatalogEntry::new("rotor", 3600.0);
        entry.fiber_loss_ranges = vec![
            FiberLossRange::new(0.0, Some(240.0), 0.15),
            FiberLossRange::new(120.0, None, 0.25),
        ];

        let result = provider.insert(entry).await;
        assert!(matches!(result, Err(StoreError::InvalidCatalog { .. })));
    }

    #[tokio::test]
    async fn test_missing_entry() {
        let provider = InMemoryCatalogProvider::new();
        let result = provider.get_catalog_entry("stator").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }
}

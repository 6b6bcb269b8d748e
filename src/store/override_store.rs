// ==========================================
// 备件健康与损耗计算引擎 - 现场覆写存储
// ==========================================
// 职责: 定义覆写记录读写接口 + 内存实现
// 红线: 读取必须返回自洽快照 (不可读到写入中途的记录)
// ==========================================

use crate::domain::overrides::{InstallationKey, SparePartOverride};
use crate::store::error::StoreResult;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

/// 原子修改闭包, 在存储的写临界区内执行
pub type OverrideUpdate = Box<dyn FnOnce(&mut SparePartOverride) + Send>;

// ==========================================
// OverrideStore Trait
// ==========================================
// 实现者: 后端存储适配器 / InMemoryOverrideStore
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// 读取安装位的覆写记录快照
    ///
    /// # 返回
    /// - Ok(Some): 已存在覆写
    /// - Ok(None): 尚未编辑过 (全部回落目录值)
    async fn get_override(&self, key: &InstallationKey) -> StoreResult<Option<SparePartOverride>>;

    /// 列出客户下的全部安装位覆写 (按主键排序)
    async fn list_overrides_for_client(
        &self,
        client_id: &str,
    ) -> StoreResult<Vec<(InstallationKey, SparePartOverride)>>;

    /// 保存覆写记录 (整条替换)
    async fn save_override(&self, key: &InstallationKey, record: SparePartOverride)
        -> StoreResult<()>;

    /// 原子读-改-写 (记录不存在时从空记录开始)
    ///
    /// 实现必须保证同一主键的并发修改互不覆盖
    ///
    /// # 返回
    /// 修改后的记录
    async fn update_override(
        &self,
        key: &InstallationKey,
        update: OverrideUpdate,
    ) -> StoreResult<SparePartOverride>;
}

// ==========================================
// InMemoryOverrideStore - 内存覆写存储
// ==========================================
#[derive(Default)]
pub struct InMemoryOverrideStore {
    records: RwLock<BTreeMap<InstallationKey, SparePartOverride>>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl OverrideStore for InMemoryOverrideStore {
    async fn get_override(&self, key: &InstallationKey) -> StoreResult<Option<SparePartOverride>> {
        // 读锁内克隆, 保证快照自洽
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn list_overrides_for_client(
        &self,
        client_id: &str,
    ) -> StoreResult<Vec<(InstallationKey, SparePartOverride)>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.client_id == client_id)
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect())
    }

    async fn save_override(
        &self,
        key: &InstallationKey,
        record: SparePartOverride,
    ) -> StoreResult<()> {
        debug!(key = %key, "保存覆写记录");
        self.records.write().await.insert(key.clone(), record);
        Ok(())
    }

    async fn update_override(
        &self,
        key: &InstallationKey,
        update: OverrideUpdate,
    ) -> StoreResult<SparePartOverride> {
        // 整个读-改-写在同一写锁内完成
        let mut records = self.records.write().await;
        let record = records.entry(key.clone()).or_default();
        update(record);
        debug!(key = %key, "覆写记录已原子更新");
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quantity::Quantity;

    #[tokio::test]
    async fn test_save_and_list_by_client() {
        let store = InMemoryOverrideStore::new();
        let mut record = SparePartOverride::new();
        record.set_total_running_hours(Quantity::hours(100.0));

        store
            .save_override(&InstallationKey::new("C01", "M01", "rotor"), record.clone())
            .await
            .unwrap();
        store
            .save_override(&InstallationKey::new("C02", "M01", "rotor"), record.clone())
            .await
            .unwrap();

        let listed = store.list_overrides_for_client("C01").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1, record);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_creates_and_merges() {
        let store = InMemoryOverrideStore::new();
        let key = InstallationKey::new("C01", "M01", "rotor");

        store
            .update_override(
                &key,
                Box::new(|r: &mut SparePartOverride| {
                    r.set_total_running_hours(Quantity::hours(100.0))
                }),
            )
            .await
            .unwrap();
        let updated = store
            .update_override(
                &key,
                Box::new(|r: &mut SparePartOverride| {
                    r.set_daily_running_hours(Quantity::hours(8.0))
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated.total_running_hours, Some(Quantity::hours(100.0)));
        assert_eq!(updated.daily_running_hours, Some(Quantity::hours(8.0)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = InMemoryOverrideStore::new();
        let key = InstallationKey::new("C01", "M01", "rotor");
        assert!(store.get_override(&key).await.unwrap().is_none());
    }
}

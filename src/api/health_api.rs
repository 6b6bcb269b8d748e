// ==========================================
// 备件健康与损耗计算引擎 - 备件健康 API
// ==========================================
// 职责: 调用方入口, 取快照 → 调用引擎 → (可选) 回写缓存结果
// 红线: 引擎本身不写存储, 回写仅在本层通过存储接口完成
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::OverrideValidator;
use crate::domain::overrides::{InstallationKey, OverridePatch, SparePartOverride};
use crate::domain::quantity::Quantity;
use crate::engine::{SparePartEvaluator, SparePartReport};
use crate::store::{CatalogProvider, OverrideStore};
use chrono::Utc;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 带主键的安装位报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationReport {
    pub key: InstallationKey,
    pub report: SparePartReport,
}

// ==========================================
// SparePartHealthApi - 备件健康 API
// ==========================================
pub struct SparePartHealthApi {
    catalog: Arc<dyn CatalogProvider>,
    store: Arc<dyn OverrideStore>,
    evaluator: Arc<SparePartEvaluator>,
    validator: OverrideValidator,
}

impl SparePartHealthApi {
    /// 创建新的 SparePartHealthApi 实例
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        store: Arc<dyn OverrideStore>,
        evaluator: Arc<SparePartEvaluator>,
    ) -> Self {
        Self {
            catalog,
            store,
            evaluator,
            validator: OverrideValidator::new(),
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 计算单个安装位的报告
    ///
    /// # 参数
    /// - key: 安装位主键
    /// - capacity: 机台额定日产能 (可选, 提供时估算产量)
    ///
    /// # 返回
    /// - Ok(SparePartReport): 计算结果
    /// - Err(ApiError::NotFound): 目录条目不存在
    #[instrument(skip(self, key, capacity), fields(key = %key))]
    pub async fn get_installation_report(
        &self,
        key: &InstallationKey,
        capacity: Option<&Quantity>,
    ) -> ApiResult<SparePartReport> {
        let catalog = self.catalog.get_catalog_entry(&key.spare_part_id).await?;
        let record = self.store.get_override(key).await?;

        Ok(self.evaluator.evaluate(&catalog, record.as_ref(), capacity))
    }

    /// 计算客户下全部已编辑安装位的报告 (并发)
    #[instrument(skip(self))]
    pub async fn list_client_reports(&self, client_id: &str) -> ApiResult<Vec<InstallationReport>> {
        let records = self.store.list_overrides_for_client(client_id).await?;
        info!(count = records.len(), "批量计算客户安装位报告");

        let tasks = records.into_iter().map(|(key, record)| async move {
            let catalog = self.catalog.get_catalog_entry(&key.spare_part_id).await?;
            let report = self.evaluator.evaluate(&catalog, Some(&record), None);
            Ok::<_, ApiError>(InstallationReport { key, report })
        });

        try_join_all(tasks).await
    }

    // ==========================================
    // 修改接口
    // ==========================================

    /// 应用类型化修改并保存
    ///
    /// # 流程
    /// 1. 读取目录 (校验纤维损耗位置需要目录区间数)
    /// 2. 校验全部修改, 任一违规则整体拒绝
    /// 3. 在存储的原子更新内逐项应用 (首次编辑时新建), 记录修改时间
    ///
    /// # 说明
    /// 单位置纤维损耗修改前, 缺失位置先用目录费率补齐, 未编辑的区间保持目录值
    #[instrument(skip(self, key, patches), fields(key = %key, patch_count = patches.len()))]
    pub async fn apply_patches(
        &self,
        key: &InstallationKey,
        patches: Vec<OverridePatch>,
    ) -> ApiResult<SparePartOverride> {
        if patches.is_empty() {
            return Err(ApiError::InvalidInput("修改列表为空".to_string()));
        }

        let catalog = self.catalog.get_catalog_entry(&key.spare_part_id).await?;

        if let Err(err) = self.validator.validate_patches(&patches, &catalog) {
            warn!(error = %err, "覆写修改被拒绝");
            return Err(err);
        }

        let catalog_ranges = catalog.fiber_loss_ranges;
        let record = self
            .store
            .update_override(
                key,
                Box::new(move |record: &mut SparePartOverride| {
                    for patch in patches {
                        if matches!(patch, OverridePatch::FiberLossValue { .. }) {
                            record.seed_fiber_loss_values(&catalog_ranges);
                        }
                        record.apply(patch);
                    }
                    record.updated_at = Some(Utc::now());
                }),
            )
            .await?;

        info!("覆写修改已保存");
        Ok(record)
    }

    /// 重新估算产量并回写缓存值
    ///
    /// # 说明
    /// - 仅回写 total_production, 基于原子更新时的最新记录计算
    /// - total_fiber_loss 为外部权威值, 不由阶梯费率反推回写
    #[instrument(skip(self, key, capacity), fields(key = %key))]
    pub async fn refresh_cached_totals(
        &self,
        key: &InstallationKey,
        capacity: &Quantity,
    ) -> ApiResult<SparePartReport> {
        if !(capacity.value >= 0.0) {
            return Err(ApiError::InvalidInput(format!("产能不得为负: {}", capacity)));
        }

        let catalog = self.catalog.get_catalog_entry(&key.spare_part_id).await?;

        let evaluator = Arc::clone(&self.evaluator);
        let snapshot_catalog = catalog.clone();
        let snapshot_capacity = capacity.clone();
        let record = self
            .store
            .update_override(
                key,
                Box::new(move |record: &mut SparePartOverride| {
                    let report = evaluator.evaluate(
                        &snapshot_catalog,
                        Some(&*record),
                        Some(&snapshot_capacity),
                    );
                    if let Some(production) = report.production {
                        record.set_total_production(production);
                    }
                    record.updated_at = Some(Utc::now());
                }),
            )
            .await?;

        let report = self.evaluator.evaluate(&catalog, Some(&record), Some(capacity));

        info!(production = ?report.production, "缓存产量已回写");
        Ok(report)
    }
}

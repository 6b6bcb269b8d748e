// ==========================================
// 备件健康与损耗计算引擎 - 引擎编排器
// ==========================================
// 用途: 协调参数解析 → 健康分级 → 损耗计算 → 产量估算
// 各步骤均为纯函数, 编排器不持有可变状态
// ==========================================

use crate::config::EngineConfig;
use crate::domain::catalog::CatalogEntry;
use crate::domain::effective::EffectiveParameters;
use crate::domain::overrides::SparePartOverride;
use crate::domain::quantity::Quantity;
use crate::engine::health::{HealthAssessment, HealthClassifier};
use crate::engine::loss::{LossCalculator, LossResult};
use crate::engine::production::ProductionEstimator;
use crate::engine::resolution::ResolutionEngine;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

// ==========================================
// SparePartReport - 单个安装位的计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparePartReport {
    pub effective: EffectiveParameters,
    pub health: HealthAssessment,
    pub losses: LossResult,
    pub production: Option<Quantity>,  // 提供产能时才计算
    pub remaining_days: Option<f64>,   // 日运行小时 > 0 时才计算
}

// ==========================================
// SparePartEvaluator - 引擎编排器
// ==========================================
pub struct SparePartEvaluator {
    resolution: ResolutionEngine,
    classifier: HealthClassifier,
    losses: LossCalculator,
    production: ProductionEstimator,
}

impl SparePartEvaluator {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// 按配置创建编排器
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            resolution: ResolutionEngine::with_policy(config.override_policy),
            classifier: HealthClassifier::new(),
            losses: LossCalculator::new(),
            production: ProductionEstimator::with_decimals(config.production_decimals),
        }
    }

    pub fn resolution(&self) -> &ResolutionEngine {
        &self.resolution
    }

    pub fn classifier(&self) -> &HealthClassifier {
        &self.classifier
    }

    pub fn loss_calculator(&self) -> &LossCalculator {
        &self.losses
    }

    pub fn production_estimator(&self) -> &ProductionEstimator {
        &self.production
    }

    /// 执行完整计算
    ///
    /// # 参数
    /// - `catalog`: 目录条目
    /// - `ov`: 覆写记录 (可无)
    /// - `capacity`: 机台额定日产能 (可无, 无则不估算产量)
    #[instrument(skip_all, fields(spare_part_type = %catalog.spare_part_type))]
    pub fn evaluate(
        &self,
        catalog: &CatalogEntry,
        ov: Option<&SparePartOverride>,
        capacity: Option<&Quantity>,
    ) -> SparePartReport {
        // 1. 参数解析
        let effective = self.resolution.resolve(catalog, ov);

        // 2. 健康分级 / 损耗计算 (相互独立)
        let health = self.classifier.classify_effective(&effective);
        let losses = self.losses.compute_losses(&effective);

        // 3. 产量估算 (仅依赖产能与日运行小时)
        let production = capacity.map(|c| {
            self.production
                .estimate_production(c, &effective.daily_running_hours)
        });

        let remaining_days = self.classifier.remaining_days(
            effective.total_running_hours.value,
            effective.life_time.value,
            effective.daily_running_hours.value,
        );

        debug!(
            status = %health.status,
            health_percentage = health.health_percentage,
            fiber_loss_percent = losses.fiber.loss_percent,
            "备件评估完成"
        );

        SparePartReport {
            effective,
            health,
            losses,
            production,
            remaining_days,
        }
    }
}

impl Default for SparePartEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

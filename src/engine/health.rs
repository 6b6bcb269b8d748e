// ==========================================
// 备件健康与损耗计算引擎 - 健康分级引擎
// ==========================================
// 职责: 累计运行小时 vs 额定寿命 → 健康状态 + 健康百分比
// 输入: 累计运行小时 + 寿命小时
// 输出: 健康状态 + 健康百分比 + 超寿命小时 + 原因
// ==========================================
// 规则 (顺序执行):
// 1) 寿命缺失/为 0 → HEALTHY, 100%
// 2) 运行 > 寿命 → ATTENTION
// 3) 运行 = 寿命 → MONITOR
// 4) 否则 → HEALTHY
// ==========================================

use crate::domain::effective::EffectiveParameters;
use crate::domain::quantity::Quantity;
use crate::domain::types::HealthStatus;
use serde::{Deserialize, Serialize};
use serde_json::json;

// ==========================================
// HealthAssessment - 健康评估结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub status: HealthStatus,
    pub health_percentage: u8,    // [0, 100]
    pub exceeded_life: Quantity,  // 超寿命小时, 恒 >= 0
    pub remaining_life: Quantity, // 剩余寿命小时, 恒 >= 0
    pub reason: String,           // JSON 原因说明
}

// ==========================================
// HealthClassifier - 健康分级引擎
// ==========================================
/// 无状态引擎, 不持有任何依赖
pub struct HealthClassifier {}

impl HealthClassifier {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 健康分级
    ///
    /// # 参数
    /// - `total_running_hours`: 累计运行小时
    /// - `lifetime_hours`: 额定寿命小时
    ///
    /// # 说明
    /// 负数运行小时不在此校验, 按算术结果传播
    pub fn classify(&self, total_running_hours: f64, lifetime_hours: f64) -> HealthAssessment {
        let status = self.determine_status(total_running_hours, lifetime_hours);
        let health_percentage = self.health_percentage(total_running_hours, lifetime_hours);
        let exceeded = self.exceeded_life(total_running_hours, lifetime_hours);
        let remaining = self.remaining_life(total_running_hours, lifetime_hours);

        let reason = self.generate_reason(
            status,
            total_running_hours,
            lifetime_hours,
            health_percentage,
            exceeded,
        );

        HealthAssessment {
            status,
            health_percentage,
            exceeded_life: Quantity::hours(exceeded),
            remaining_life: Quantity::hours(remaining),
            reason,
        }
    }

    /// 基于有效参数分级 (有效参数已统一为小时)
    pub fn classify_effective(&self, effective: &EffectiveParameters) -> HealthAssessment {
        self.classify(effective.total_running_hours.value, effective.life_time.value)
    }

    // ==========================================
    // 分级辅助方法
    // ==========================================

    /// 判定健康状态
    pub fn determine_status(&self, total_running_hours: f64, lifetime_hours: f64) -> HealthStatus {
        // 寿命缺失时无法比较, 默认正常
        if lifetime_hours <= 0.0 {
            return HealthStatus::Healthy;
        }

        if total_running_hours > lifetime_hours {
            HealthStatus::Attention
        } else if total_running_hours == lifetime_hours {
            HealthStatus::Monitor
        } else {
            HealthStatus::Healthy
        }
    }

    /// 计算健康百分比
    ///
    /// round(clamp((寿命 - 运行) / 寿命 * 100, 0, 100)); 寿命 <= 0 时为 100
    pub fn health_percentage(&self, total_running_hours: f64, lifetime_hours: f64) -> u8 {
        if lifetime_hours <= 0.0 {
            return 100;
        }

        let raw = (lifetime_hours - total_running_hours) / lifetime_hours * 100.0;
        // NaN 经 as 转换为 0
        raw.clamp(0.0, 100.0).round() as u8
    }

    /// 计算超寿命小时 (最小为 0)
    pub fn exceeded_life(&self, total_running_hours: f64, lifetime_hours: f64) -> f64 {
        (total_running_hours - lifetime_hours).max(0.0)
    }

    /// 计算剩余寿命小时 (最小为 0)
    pub fn remaining_life(&self, total_running_hours: f64, lifetime_hours: f64) -> f64 {
        (lifetime_hours - total_running_hours).max(0.0)
    }

    /// 按日运行小时估算剩余天数
    ///
    /// 寿命缺失 (<= 0) 或日运行小时 <= 0 时无法估算
    pub fn remaining_days(
        &self,
        total_running_hours: f64,
        lifetime_hours: f64,
        daily_running_hours: f64,
    ) -> Option<f64> {
        if lifetime_hours <= 0.0 || daily_running_hours <= 0.0 {
            return None;
        }
        Some(self.remaining_life(total_running_hours, lifetime_hours) / daily_running_hours)
    }

    // ==========================================
    // 可解释性方法
    // ==========================================

    fn generate_reason(
        &self,
        status: HealthStatus,
        total_running_hours: f64,
        lifetime_hours: f64,
        health_percentage: u8,
        exceeded_life: f64,
    ) -> String {
        let rule = if lifetime_hours <= 0.0 {
            "LIFETIME_MISSING"
        } else {
            match status {
                HealthStatus::Attention => "RUNNING_EXCEEDS_LIFETIME",
                HealthStatus::Monitor => "RUNNING_EQUALS_LIFETIME",
                HealthStatus::Healthy => "RUNNING_WITHIN_LIFETIME",
            }
        };

        json!({
            "status": status.to_db_str(),
            "rule": rule,
            "total_running_hours": total_running_hours,
            "lifetime_hours": lifetime_hours,
            "health_percentage": health_percentage,
            "exceeded_life_hours": exceeded_life,
        })
        .to_string()
    }
}

impl Default for HealthClassifier {
    fn default() -> Self {
        Self::new()
    }
}

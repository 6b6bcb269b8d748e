// ==========================================
// 备件健康与损耗计算引擎 - 命令行入口
// ==========================================
// 用法:
//   sparepart-health <input.json>
//
// 输入 JSON: { "catalog": {...}, "override": {...}, "capacity": {...} }
// "override" 与 "capacity" 可省略; 报告以 JSON 输出到 stdout, 日志输出到 stderr
// SPAREPART_HEALTH_LOG_FORMAT=json 时日志为结构化 JSON
// ==========================================

use anyhow::Context;
use serde::Deserialize;
use sparepart_health::config::{config_keys, ConfigManager};
use sparepart_health::i18n;
use sparepart_health::logging;
use sparepart_health::{CatalogEntry, Quantity, SparePartEvaluator, SparePartOverride};

#[derive(Debug, Deserialize)]
struct EvaluationInput {
    catalog: CatalogEntry,
    #[serde(default, rename = "override")]
    override_record: Option<SparePartOverride>,
    #[serde(default)]
    capacity: Option<Quantity>,
}

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    match std::env::var(config_keys::LOG_FORMAT) {
        Ok(format) if format.eq_ignore_ascii_case("json") => logging::init_json(),
        _ => logging::init(),
    }

    let input_path = std::env::args()
        .nth(1)
        .context("用法: sparepart-health <input.json>")?;

    tracing::info!("{} v{}", sparepart_health::APP_NAME, sparepart_health::VERSION);

    // 加载配置
    let config = ConfigManager::load().context("加载配置失败")?;
    i18n::set_locale(&config.config().locale);

    // 读取输入
    let raw = std::fs::read_to_string(&input_path)
        .with_context(|| format!("读取输入文件失败: {}", input_path))?;
    let input: EvaluationInput = serde_json::from_str(&raw)
        .with_context(|| format!("解析输入文件失败: {}", input_path))?;

    // 目录在进入系统时校验
    let catalog = input.catalog.validated().context("目录数据无效")?;

    // 计算
    let evaluator = SparePartEvaluator::from_config(config.config());
    let report = evaluator.evaluate(
        &catalog,
        input.override_record.as_ref(),
        input.capacity.as_ref(),
    );

    let status_label = report.health.status.label();
    let percentage = report.health.health_percentage.to_string();
    let summary = i18n::t_with_args(
        "report.summary",
        &[
            ("part", catalog.spare_part_type.as_str()),
            ("status", status_label.as_str()),
            ("percentage", percentage.as_str()),
        ],
    );
    tracing::info!("{}", summary);

    if let Some(production) = &report.production {
        let value = production.to_string();
        tracing::info!("{}", i18n::t_with_args("report.production", &[("value", value.as_str())]));
    }

    if let Some(days) = report.remaining_days {
        let days = format!("{:.1}", days);
        let message = i18n::t_with_args("report.remaining_days", &[("days", days.as_str())]);
        tracing::info!("{}", message);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

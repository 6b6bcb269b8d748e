// ==========================================
// HealthClassifier 集成测试
// ==========================================
// 测试目标: 验证健康分级、健康百分比、超寿/剩余寿命
// 覆盖范围: 边界值、零寿命、属性扫描
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use sparepart_health::{HealthClassifier, HealthStatus, ResolutionEngine};

// ==========================================
// 典型场景
// ==========================================

#[test]
fn test_running_exceeds_lifetime() {
    let classifier = HealthClassifier::new();

    let result = classifier.classify(5040.0, 3600.0);

    assert_eq!(result.status, HealthStatus::Attention);
    assert_eq!(result.health_percentage, 0);
    assert_eq!(result.exceeded_life.value, 1440.0);
    assert_eq!(result.remaining_life.value, 0.0);
    assert!(result.reason.contains("RUNNING_EXCEEDS_LIFETIME"));
}

#[test]
fn test_running_equals_lifetime() {
    let classifier = HealthClassifier::new();

    let result = classifier.classify(3600.0, 3600.0);

    assert_eq!(result.status, HealthStatus::Monitor);
    assert_eq!(result.health_percentage, 0);
    assert_eq!(result.exceeded_life.value, 0.0);
    assert_eq!(result.remaining_life.value, 0.0);
}

#[test]
fn test_running_within_lifetime() {
    let classifier = HealthClassifier::new();

    let result = classifier.classify(900.0, 3600.0);

    assert_eq!(result.status, HealthStatus::Healthy);
    assert_eq!(result.health_percentage, 75);
    assert_eq!(result.remaining_life.value, 2700.0);
}

#[test]
fn test_zero_lifetime_is_healthy() {
    let classifier = HealthClassifier::new();

    let result = classifier.classify(1000.0, 0.0);

    assert_eq!(result.status, HealthStatus::Healthy);
    assert_eq!(result.health_percentage, 100);
    assert_eq!(result.exceeded_life.value, 1000.0);
    assert!(result.reason.contains("LIFETIME_MISSING"));
}

#[test]
fn test_reason_is_valid_json() {
    let classifier = HealthClassifier::new();

    let result = classifier.classify(5040.0, 3600.0);
    let reason: serde_json::Value =
        serde_json::from_str(&result.reason).expect("reason 应为合法 JSON");

    assert!(reason.get("rule").is_some());
}

#[test]
fn test_remaining_days() {
    let classifier = HealthClassifier::new();

    assert_eq!(classifier.remaining_days(1200.0, 3600.0, 24.0), Some(100.0));
    assert_eq!(classifier.remaining_days(1200.0, 3600.0, 0.0), None);
}

#[test]
fn test_remaining_days_unknown_without_lifetime() {
    let classifier = HealthClassifier::new();

    // 寿命缺失时状态为 Healthy, 剩余天数无法估算 (不能报 0 天)
    let result = classifier.classify(120.0, 0.0);
    assert_eq!(result.status, HealthStatus::Healthy);
    assert_eq!(classifier.remaining_days(120.0, 0.0, 12.0), None);
}

// ==========================================
// 属性扫描
// ==========================================

#[test]
fn test_properties_over_grid() {
    let classifier = HealthClassifier::new();
    let lifetimes = [0.0, 1.0, 240.0, 3600.0, 8760.0];
    let runnings = [0.0, 0.5, 120.0, 240.0, 3599.0, 3600.0, 3601.0, 10000.0];

    for &lifetime in &lifetimes {
        for &running in &runnings {
            let result = classifier.classify(running, lifetime);

            assert!(result.health_percentage <= 100);
            assert!(result.exceeded_life.value >= 0.0);
            assert!(result.remaining_life.value >= 0.0);

            if lifetime > 0.0 {
                let expected = if running > lifetime {
                    HealthStatus::Attention
                } else if running == lifetime {
                    HealthStatus::Monitor
                } else {
                    HealthStatus::Healthy
                };
                assert_eq!(result.status, expected, "running={} lifetime={}", running, lifetime);
                assert_eq!(
                    result.exceeded_life.value,
                    (running - lifetime).max(0.0),
                    "running={} lifetime={}",
                    running,
                    lifetime
                );
            } else {
                assert_eq!(result.status, HealthStatus::Healthy);
                assert_eq!(result.health_percentage, 100);
            }
        }
    }
}

#[test]
fn test_health_percentage_monotonic_in_running_hours() {
    let classifier = HealthClassifier::new();
    let mut previous = u8::MAX;

    for step in 0..=50 {
        let running = step as f64 * 100.0;
        let pct = classifier.health_percentage(running, 3600.0);
        assert!(pct <= previous, "running={} 时健康百分比上升", running);
        previous = pct;
    }
}

// ==========================================
// 与参数解析联动
// ==========================================

#[test]
fn test_classify_effective_uses_override_lifetime() {
    let engine = ResolutionEngine::new();
    let classifier = HealthClassifier::new();
    let catalog = standard_rotor_catalog();
    let ov = OverrideBuilder::new()
        .lifetime_hours(5040.0)
        .total_running_hours(3600.0)
        .build();

    let eff = engine.resolve(&catalog, Some(&ov));
    let result = classifier.classify_effective(&eff);

    assert_eq!(result.status, HealthStatus::Healthy);
    assert_eq!(result.remaining_life.value, 1440.0);
}

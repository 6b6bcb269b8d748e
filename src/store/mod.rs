// ==========================================
// 备件健康与损耗计算引擎 - 外部协作方接口层
// ==========================================
// 职责: 目录提供方与覆写存储的接口 (trait) 及内存实现
// 红线: 引擎不直接访问存储, 由调用方取快照后传入
// ==========================================

pub mod catalog_provider;
pub mod error;
pub mod override_store;

pub use catalog_provider::{CatalogProvider, InMemoryCatalogProvider};
pub use error::{StoreError, StoreResult};
pub use override_store::{InMemoryOverrideStore, OverrideStore, OverrideUpdate};

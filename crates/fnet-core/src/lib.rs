//! # Facility Network Core
//!
//! 設施網路核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod facility;
pub mod location;
pub mod network;
pub mod plan;
pub mod registry;

// Re-export 主要類型
pub use config::NetworkConfig;
pub use demand::DemandPoint;
pub use facility::{Facility, FacilityKind};
pub use location::Location;
pub use network::Network;
pub use plan::{Allocation, EntryOutcome, ExecutionReport, Route, RoutePlan};
pub use registry::{Keyed, Registry};

use rust_decimal::Decimal;

/// 設施網路錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("找不到地點: {0}")]
    LocationNotFound(String),

    #[error("找不到設施: {0}")]
    FacilityNotFound(String),

    #[error("重複的識別碼: {0}")]
    DuplicateId(String),

    #[error("無效的產能 {capacity}（設施 {facility_id}）：必須大於 0")]
    InvalidCapacity { facility_id: String, capacity: Decimal },

    #[error("無效的使用量 {utilization}（設施 {facility_id}）：不可為負")]
    InvalidUtilization {
        facility_id: String,
        utilization: Decimal,
    },

    #[error("無效的需求量 {volume}（需求點 {demand_id}）：必須大於 0")]
    InvalidDemandVolume { demand_id: String, volume: Decimal },

    #[error("無效的已滿足數量 {fulfilled}（需求點 {demand_id}）：不可為負")]
    InvalidFulfilledVolume {
        demand_id: String,
        fulfilled: Decimal,
    },

    #[error("無效的成本指數 {cost_index}（地點 {location_id}）：不可為負")]
    InvalidCostIndex {
        location_id: String,
        cost_index: Decimal,
    },

    #[error("無效的座標（地點 {0}）：必須為有限數值")]
    InvalidCoordinates(String),

    #[error("成本計算溢位: {0}")]
    CostOverflow(String),

    #[error("未知的設施類型: {0}")]
    UnknownFacilityKind(String),

    #[error("配置解析錯誤: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

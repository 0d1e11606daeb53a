//! # Facility Network Calculation Engine
//!
//! 成本模型、貪婪分配、選址建議與使用率分析

pub mod allocation;
pub mod cost;
pub mod siting;
pub mod utilization;

// Re-export 主要類型
pub use allocation::{GreedyAllocation, GreedyAllocator};
pub use cost::CostModel;
pub use siting::{CostBreakdown, FacilityRecommendation, ProductionCost, SitingAdvisor, StorageCost};
pub use utilization::{UtilizationAdvisory, UtilizationAnalyzer, UtilizationFlag};

//! # Facility Network Optimizer
//!
//! 設施網路供需分配引擎：貪婪分配、選址建議、線性規劃路線優化與使用率分析。

pub mod engine;
pub mod suggestion;

pub use engine::{DemandEvaluation, FacilityAdded, SupplyChainEngine};
pub use suggestion::OptimizationSuggestion;

pub use fnet_calc::{
    CostBreakdown, CostModel, FacilityRecommendation, GreedyAllocation, ProductionCost,
    StorageCost, UtilizationAdvisory, UtilizationFlag,
};
pub use fnet_core::{
    Allocation, DemandPoint, EntryOutcome, ExecutionReport, Facility, FacilityKind, Location,
    Network, NetworkConfig, NetworkError, Result, Route, RoutePlan,
};
pub use fnet_optimizer::RouteOptimization;

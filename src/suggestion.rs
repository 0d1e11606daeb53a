//! 既有資產優化建議

use fnet_calc::{UtilizationAdvisory, UtilizationFlag};
use fnet_core::{Route, RoutePlan};
use rust_decimal::Decimal;
use serde::Serialize;

/// 優化建議（外部介面以 `type` 欄位區分）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizationSuggestion {
    /// 使用率偏低
    Underutilized {
        facility_id: String,
        current_utilization: String,
        recommendation: String,
    },
    /// 接近滿載
    NearCapacity {
        facility_id: String,
        current_utilization: String,
        recommendation: String,
    },
    /// 全網路路線優化
    RouteOptimization {
        total_cost: Decimal,
        optimized_routes: Vec<Route>,
        recommendation: String,
    },
}

impl OptimizationSuggestion {
    /// 路線優化建議（無路線時不產生）
    pub fn from_route_plan(plan: RoutePlan) -> Option<Self> {
        if plan.is_empty() {
            return None;
        }
        Some(OptimizationSuggestion::RouteOptimization {
            total_cost: plan.total_cost,
            optimized_routes: plan.routes,
            recommendation: "建議採用優化後的路線以降低運輸成本".to_string(),
        })
    }

    /// 相關設施ID（路線優化為 None）
    pub fn facility_id(&self) -> Option<&str> {
        match self {
            OptimizationSuggestion::Underutilized { facility_id, .. }
            | OptimizationSuggestion::NearCapacity { facility_id, .. } => Some(facility_id),
            OptimizationSuggestion::RouteOptimization { .. } => None,
        }
    }
}

impl From<UtilizationAdvisory> for OptimizationSuggestion {
    fn from(advisory: UtilizationAdvisory) -> Self {
        let UtilizationAdvisory {
            flag,
            facility_id,
            current_utilization,
            recommendation,
            ..
        } = advisory;

        match flag {
            UtilizationFlag::Underutilized => OptimizationSuggestion::Underutilized {
                facility_id,
                current_utilization,
                recommendation,
            },
            UtilizationFlag::NearCapacity => OptimizationSuggestion::NearCapacity {
                facility_id,
                current_utilization,
                recommendation,
            },
        }
    }
}

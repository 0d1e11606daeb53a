//! 供應鏈引擎
//!
//! 網路狀態以單一讀寫鎖保護：查詢操作共用讀鎖，變更操作取得寫鎖。
//! 線性規劃在讀鎖內建立快照，釋放鎖之後才求解。

use std::sync::Arc;

use fnet_calc::{
    CostModel, FacilityRecommendation, GreedyAllocator, SitingAdvisor, UtilizationAnalyzer,
};
use fnet_core::{
    Allocation, DemandPoint, EntryOutcome, ExecutionReport, Facility, FacilityKind, Location,
    Network, NetworkConfig, NetworkError, Result,
};
use fnet_optimizer::{RouteOptimization, RouteOptimizer, TransportProblem};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::OptimizationSuggestion;

/// 新需求評估結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandEvaluation {
    /// 現有設施能否完全滿足
    pub can_fulfill: bool,

    /// 貪婪分配計劃
    pub fulfillment_plan: Vec<Allocation>,

    /// 計劃總成本
    pub total_cost: Decimal,

    /// 未滿足數量
    pub unfulfilled_volume: Decimal,

    /// 新設施建議（僅在無法完全滿足時產生）
    pub recommendations: Vec<FacilityRecommendation>,

    /// 全網路優化建議
    pub optimization_suggestions: Vec<OptimizationSuggestion>,
}

/// 新增設施結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityAdded {
    pub facility_id: String,
    pub message: String,
}

/// 供應鏈引擎（clone 後共用同一網路狀態）
#[derive(Debug, Clone)]
pub struct SupplyChainEngine {
    network: Arc<RwLock<Network>>,
    config: NetworkConfig,
    cost_model: CostModel,
    optimizer: RouteOptimizer,
}

impl SupplyChainEngine {
    /// 以空網路創建引擎
    pub fn new(config: NetworkConfig) -> Self {
        Self::with_network(Network::new(), config)
    }

    /// 以既有網路創建引擎
    pub fn with_network(network: Network, config: NetworkConfig) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
            cost_model: CostModel::from_config(&config),
            optimizer: RouteOptimizer::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// 網路目前狀態的複本
    pub fn snapshot(&self) -> Network {
        self.network.read().clone()
    }

    /// 登錄地點
    pub fn add_location(&self, location: Location) -> Result<()> {
        self.network.write().add_location(location)
    }

    /// 登錄既有設施
    pub fn add_facility(&self, facility: Facility) -> Result<()> {
        self.network.write().add_facility(facility)
    }

    /// 登錄需求點
    pub fn add_demand_point(&self, demand: DemandPoint) -> Result<()> {
        self.network.write().add_demand_point(demand)
    }

    /// 評估新需求能否由現有設施滿足（不修改網路）
    pub fn evaluate_new_demand(&self, demand: &DemandPoint) -> Result<DemandEvaluation> {
        tracing::info!(
            "評估新需求 {}：地點 {}，數量 {}",
            demand.id,
            demand.location_id,
            demand.demand_volume
        );

        let (allocation, recommendations, mut suggestions, problem) = {
            let network = self.network.read();

            let allocation = GreedyAllocator::allocate(&network, &self.cost_model, demand)?;

            let recommendations = if allocation.can_fulfill() {
                Vec::new()
            } else {
                let destination = network.require_location(&demand.location_id)?;
                SitingAdvisor::suggest(
                    &network,
                    &self.cost_model,
                    destination,
                    allocation.unfulfilled_volume,
                    self.config.max_recommendations,
                )?
            };

            let suggestions = Self::utilization_suggestions(&network);
            let problem = self.optimizer.snapshot(&network);

            (allocation, recommendations, suggestions, problem)
        };

        suggestions.extend(self.solve_routes(problem));

        tracing::info!(
            "需求 {} 評估完成：可滿足 {}，未滿足 {}，總成本 {}",
            demand.id,
            allocation.can_fulfill(),
            allocation.unfulfilled_volume,
            allocation.total_cost
        );

        Ok(DemandEvaluation {
            can_fulfill: allocation.can_fulfill(),
            fulfillment_plan: allocation.plan,
            total_cost: allocation.total_cost,
            unfulfilled_volume: allocation.unfulfilled_volume,
            recommendations,
            optimization_suggestions: suggestions,
        })
    }

    /// 為指定需求量建議新設施地點
    pub fn suggest_new_facilities(
        &self,
        demand: &DemandPoint,
        required_volume: Decimal,
    ) -> Result<Vec<FacilityRecommendation>> {
        demand.validate()?;
        if required_volume <= Decimal::ZERO {
            return Err(NetworkError::InvalidDemandVolume {
                demand_id: demand.id.clone(),
                volume: required_volume,
            });
        }

        let network = self.network.read();
        let destination = network.require_location(&demand.location_id)?;

        SitingAdvisor::suggest(
            &network,
            &self.cost_model,
            destination,
            required_volume,
            self.config.max_recommendations,
        )
    }

    /// 既有資產優化建議（使用率 + 路線優化）
    pub fn optimize_existing_assets(&self) -> Vec<OptimizationSuggestion> {
        let (mut suggestions, problem) = {
            let network = self.network.read();
            (
                Self::utilization_suggestions(&network),
                self.optimizer.snapshot(&network),
            )
        };

        suggestions.extend(self.solve_routes(problem));
        suggestions
    }

    /// 全網路路線優化
    pub fn optimize_supply_routes(&self) -> RouteOptimization {
        let problem = self.optimizer.snapshot(&self.network.read());
        match problem {
            Ok(problem) => self.optimizer.solve(problem),
            Err(e) => RouteOptimization::SolverError(e.to_string()),
        }
    }

    /// 依建議新增設施
    ///
    /// 設施ID由類型、地點與目前設施數量組成。網路不支援刪除設施，
    /// 因此不會重複；若日後支援刪除，需改用其他編號方式。
    pub fn add_new_facility(
        &self,
        kind: FacilityKind,
        location_id: &str,
        capacity: Decimal,
    ) -> Result<FacilityAdded> {
        let mut network = self.network.write();

        let location = network.require_location(location_id)?;
        let location_name = location.name.clone();
        let operating_cost = capacity
            .checked_mul(kind.unit_operating_cost())
            .and_then(|cost| cost.checked_mul(location.cost_index))
            .ok_or_else(|| NetworkError::CostOverflow(format!("設施營運成本（地點 {location_id}）")))?;

        let facility_id = format!("{}_{}_{}", kind, location_id, network.facilities().len());
        let facility = Facility::new(&facility_id, location_id, kind, capacity)
            .with_operating_cost(operating_cost);
        network.add_facility(facility)?;

        tracing::info!(
            "新增設施 {}：{} 於 {}，產能 {}",
            facility_id,
            kind,
            location_name,
            capacity
        );

        Ok(FacilityAdded {
            message: format!(
                "已於 {} 新增{}設施，產能 {}",
                location_name,
                match kind {
                    FacilityKind::Production => "生產",
                    FacilityKind::Storage => "倉儲",
                },
                capacity
            ),
            facility_id,
        })
    }

    /// 執行分配計劃
    ///
    /// 依序套用每筆分配；設施不存在或超過可用產能的項目不套用，
    /// 但不影響其他項目。整份計劃在同一寫鎖內完成。
    pub fn execute_fulfillment_plan(&self, plan: &[Allocation]) -> ExecutionReport {
        let mut network = self.network.write();
        let mut report = ExecutionReport::new();

        for allocation in plan {
            let outcome = Self::apply_allocation(&mut network, allocation);
            if !outcome.is_applied() {
                tracing::warn!("分配項目未套用: {:?}", outcome);
            }
            report.push(outcome);
        }

        tracing::info!(
            "分配計劃執行完成：{} / {} 筆已套用",
            report.applied_count(),
            plan.len()
        );

        report
    }

    fn apply_allocation(network: &mut Network, allocation: &Allocation) -> EntryOutcome {
        let facility_id = allocation.facility_id.clone();
        let volume = allocation.volume;

        let Some(facility) = network.facility_mut(&allocation.facility_id) else {
            return EntryOutcome::SkippedMissingFacility { facility_id };
        };

        if volume <= Decimal::ZERO {
            return EntryOutcome::RejectedInvalidVolume {
                facility_id,
                volume,
            };
        }

        let available = facility.available_capacity();
        if volume > available {
            return EntryOutcome::RejectedCapacityExceeded {
                facility_id,
                requested: volume,
                available,
            };
        }

        facility.current_utilization += volume;

        if let Some(demand) = network.demand_point_mut(&allocation.demand_id) {
            demand.fulfilled_volume = demand.fulfilled_volume.saturating_add(volume);
        }

        EntryOutcome::Applied {
            facility_id,
            volume,
        }
    }

    fn utilization_suggestions(network: &Network) -> Vec<OptimizationSuggestion> {
        UtilizationAnalyzer::analyze(network)
            .into_iter()
            .map(OptimizationSuggestion::from)
            .collect()
    }

    /// 在鎖外求解；失敗、不可行或逾時都不產生建議
    fn solve_routes(&self, problem: Result<TransportProblem>) -> Option<OptimizationSuggestion> {
        let result = match problem {
            Ok(problem) => self.optimizer.solve(problem),
            Err(e) => RouteOptimization::SolverError(e.to_string()),
        };

        match result {
            RouteOptimization::Optimized(plan) => OptimizationSuggestion::from_route_plan(plan),
            RouteOptimization::Infeasible => {
                tracing::debug!("路線優化不可行，略過建議");
                None
            }
            RouteOptimization::SolverError(reason) => {
                tracing::warn!("路線優化失敗，略過建議: {}", reason);
                None
            }
            RouteOptimization::TimedOut(timeout) => {
                tracing::warn!("路線優化逾時（{:?}），略過建議", timeout);
                None
            }
        }
    }
}

impl Default for SupplyChainEngine {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn engine() -> SupplyChainEngine {
        let engine = SupplyChainEngine::default();
        engine
            .add_location(Location::new("loc1", "Mumbai", 19.076, 72.877, Decimal::new(12, 1)))
            .unwrap();
        engine
            .add_location(Location::new("loc2", "Pune", 18.520, 73.856, Decimal::new(9, 1)))
            .unwrap();
        engine
            .add_facility(
                Facility::new("prod1", "loc1", FacilityKind::Production, Decimal::from(100))
                    .with_utilization(Decimal::from(60)),
            )
            .unwrap();
        engine
    }

    #[rstest]
    #[case(FacilityKind::Production, "production_loc2_1", 9000)]
    #[case(FacilityKind::Storage, "storage_loc2_1", 3600)]
    fn test_add_new_facility_id_and_cost(
        #[case] kind: FacilityKind,
        #[case] expected_id: &str,
        #[case] expected_operating_cost: i64,
    ) {
        let engine = engine();

        let added = engine
            .add_new_facility(kind, "loc2", Decimal::from(200))
            .unwrap();

        assert_eq!(added.facility_id, expected_id);
        let network = engine.snapshot();
        let facility = network.facility(expected_id).unwrap();
        // 200 × 每單位營運成本 × 0.9
        assert_eq!(facility.operating_cost, Decimal::from(expected_operating_cost));
        assert_eq!(facility.current_utilization, Decimal::ZERO);
        assert_eq!(facility.kind, kind);
    }

    #[test]
    fn test_add_new_facility_cost_overflow() {
        let engine = engine();

        let err = engine
            .add_new_facility(FacilityKind::Production, "loc2", Decimal::MAX)
            .unwrap_err();

        assert!(matches!(err, NetworkError::CostOverflow(_)));
        assert_eq!(engine.snapshot().facilities().len(), 1);
    }

    #[test]
    fn test_add_new_facility_rejects_bad_capacity() {
        let engine = engine();

        let err = engine
            .add_new_facility(FacilityKind::Production, "loc2", Decimal::ZERO)
            .unwrap_err();

        assert!(matches!(err, NetworkError::InvalidCapacity { .. }));
        assert_eq!(engine.snapshot().facilities().len(), 1);
    }

    #[test]
    fn test_apply_rejects_over_capacity() {
        let engine = engine();

        let report = engine.execute_fulfillment_plan(&[
            Allocation::new("prod1", "d1", Decimal::from(30), Decimal::ONE),
            Allocation::new("prod1", "d1", Decimal::from(20), Decimal::ONE),
        ]);

        assert!(report.outcomes[0].is_applied());
        assert_eq!(
            report.outcomes[1],
            EntryOutcome::RejectedCapacityExceeded {
                facility_id: "prod1".to_string(),
                requested: Decimal::from(20),
                available: Decimal::from(10),
            }
        );
        let network = engine.snapshot();
        assert_eq!(
            network.facility("prod1").unwrap().current_utilization,
            Decimal::from(90)
        );
    }

    #[test]
    fn test_apply_rejects_non_positive_volume() {
        let engine = engine();

        let report = engine.execute_fulfillment_plan(&[Allocation::new(
            "prod1",
            "d1",
            Decimal::from(-5),
            Decimal::ZERO,
        )]);

        assert!(matches!(
            report.outcomes[0],
            EntryOutcome::RejectedInvalidVolume { .. }
        ));
        assert_eq!(
            engine.snapshot().facility("prod1").unwrap().current_utilization,
            Decimal::from(60)
        );
    }

    #[test]
    fn test_apply_advances_registered_demand() {
        let engine = engine();
        engine
            .add_demand_point(DemandPoint::new("loc2", Decimal::from(25)).with_id("d1"))
            .unwrap();

        let report = engine.execute_fulfillment_plan(&[Allocation::new(
            "prod1",
            "d1",
            Decimal::from(15),
            Decimal::ONE,
        )]);

        assert!(report.is_clean());
        let network = engine.snapshot();
        assert_eq!(
            network.demand_point("d1").unwrap().unfulfilled_demand(),
            Decimal::from(10)
        );
    }

    #[test]
    fn test_suggest_rejects_non_positive_volume() {
        let engine = engine();
        let demand = DemandPoint::new("loc2", Decimal::from(10));

        assert!(matches!(
            engine.suggest_new_facilities(&demand, Decimal::ZERO),
            Err(NetworkError::InvalidDemandVolume { .. })
        ));
    }
}

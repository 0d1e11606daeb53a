//! 貪婪需求分配
//!
//! 依每單位成本由低至高，從現有設施分配產能給新需求。
//! 只計算，不修改網路狀態。

use fnet_core::{Allocation, DemandPoint, Network};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cost::{checked_product, checked_sum, CostModel};

/// 貪婪分配結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyAllocation {
    /// 分配計劃（依成本由低至高）
    pub plan: Vec<Allocation>,

    /// 計劃總成本
    pub total_cost: Decimal,

    /// 未滿足數量
    pub unfulfilled_volume: Decimal,
}

impl GreedyAllocation {
    /// 是否可完全滿足
    pub fn can_fulfill(&self) -> bool {
        self.unfulfilled_volume <= Decimal::ZERO
    }

    /// 已分配數量
    pub fn allocated_volume(&self) -> Decimal {
        self.plan.iter().map(|a| a.volume).sum()
    }
}

/// 候選供應來源
#[derive(Debug, Clone)]
struct SupplyCandidate<'a> {
    facility_id: &'a str,
    available: Decimal,
    cost_per_unit: Decimal,
}

/// 貪婪分配計算器
pub struct GreedyAllocator;

impl GreedyAllocator {
    /// 評估新需求能否由現有設施滿足
    pub fn allocate(
        network: &Network,
        cost_model: &CostModel,
        demand: &DemandPoint,
    ) -> fnet_core::Result<GreedyAllocation> {
        demand.validate()?;
        let destination = network.require_location(&demand.location_id)?;

        // Step 1: 收集有可用產能的設施
        let mut candidates = Vec::new();
        for facility in network.facilities() {
            let available = facility.available_capacity();
            let allocable = available.min(demand.demand_volume);
            if allocable <= Decimal::ZERO {
                continue;
            }

            let origin = network.location_of(facility)?;
            candidates.push(SupplyCandidate {
                facility_id: &facility.id,
                available,
                cost_per_unit: cost_model.unit_cost(origin, destination)?,
            });
        }

        tracing::debug!(
            "需求 {} 候選設施: {} 個",
            demand.id,
            candidates.len()
        );

        // Step 2: 依每單位成本排序（穩定排序，相同成本保留登錄順序）
        candidates.sort_by(|a, b| a.cost_per_unit.cmp(&b.cost_per_unit));

        // Step 3: 由低成本開始分配
        let mut plan = Vec::new();
        let mut total_cost = Decimal::ZERO;
        let mut remaining = demand.demand_volume;

        for candidate in candidates {
            if remaining <= Decimal::ZERO {
                break;
            }

            let volume = candidate.available.min(remaining);
            let cost = checked_product(candidate.cost_per_unit, volume, "分配成本")?;

            tracing::debug!(
                "分配: {} → {} (數量: {}, 成本: {})",
                candidate.facility_id,
                demand.id,
                volume,
                cost
            );

            plan.push(Allocation::new(candidate.facility_id, &demand.id, volume, cost));
            total_cost = checked_sum(total_cost, cost, "分配總成本")?;
            remaining -= volume;
        }

        Ok(GreedyAllocation {
            plan,
            total_cost,
            unfulfilled_volume: remaining.max(Decimal::ZERO),
        })
    }
}

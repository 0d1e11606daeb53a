//! 運輸問題線性規劃
//!
//! 決策變數：每組 (設施, 需求點) 的非負流量
//! 目標：最小化 Σ 流量 × 每單位運輸成本
//! 約束：
//!   - 設施流出總量 ≤ 可用產能
//!   - 需求點流入總量 = 未滿足需求（等式，總產能不足時不可行）

use std::time::Duration;

use fnet_calc::CostModel;
use fnet_core::{Network, Route, RoutePlan};
use good_lp::solvers::clarabel::clarabel;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use rayon::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::RouteOptimization;

/// 報告流量的小數位數
const VOLUME_DECIMALS: u32 = 6;

/// 求解器達到時間上限時回報的原因（對應 Clarabel `MaxTime`）
const TIME_LIMIT_REASON: &str = "Time limit reached";

/// 運輸問題快照（擁有全部資料，可脫離網路鎖求解）
#[derive(Debug, Clone)]
pub struct TransportProblem {
    /// (設施ID, 可用產能)
    supplies: Vec<(String, Decimal)>,

    /// (需求點ID, 未滿足需求)
    demands: Vec<(String, Decimal)>,

    /// 每單位成本矩陣 [設施][需求點]
    unit_costs: Vec<Vec<Decimal>>,

    /// 低於此值的流量視為數值雜訊
    flow_noise_threshold: f64,

    /// 求解器內部時間上限（None 表示不限）
    time_limit: Option<Duration>,
}

impl TransportProblem {
    /// 從網路目前狀態建立問題
    pub fn from_network(
        network: &Network,
        cost_model: &CostModel,
        flow_noise_threshold: f64,
    ) -> fnet_core::Result<Self> {
        let facilities = network.facilities().as_slice();
        let demand_points = network.demand_points().as_slice();

        let supplies = facilities
            .iter()
            .map(|f| (f.id.clone(), f.available_capacity()))
            .collect();
        let demands = demand_points
            .iter()
            .map(|d| (d.id.clone(), d.unfulfilled_demand()))
            .collect();

        let unit_costs = facilities
            .par_iter()
            .map(|facility| {
                let origin = network.location_of(facility)?;
                demand_points
                    .iter()
                    .map(|demand| {
                        let destination = network.require_location(&demand.location_id)?;
                        cost_model.unit_cost(origin, destination)
                    })
                    .collect::<fnet_core::Result<Vec<_>>>()
            })
            .collect::<fnet_core::Result<Vec<_>>>()?;

        Ok(Self {
            supplies,
            demands,
            unit_costs,
            flow_noise_threshold,
            time_limit: None,
        })
    }

    /// 建構器模式：設置求解器時間上限
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// 供應端或需求端為空時無需求解
    pub fn is_empty(&self) -> bool {
        self.supplies.is_empty() || self.demands.is_empty()
    }

    pub fn supply_count(&self) -> usize {
        self.supplies.len()
    }

    pub fn demand_count(&self) -> usize {
        self.demands.len()
    }

    /// 求解（阻塞，CPU 密集）
    pub fn solve(&self) -> RouteOptimization {
        if self.is_empty() {
            return RouteOptimization::Optimized(RoutePlan::empty());
        }

        let costs: Vec<Vec<f64>> = self
            .unit_costs
            .iter()
            .map(|row| row.iter().map(|c| c.to_f64().unwrap_or(0.0)).collect())
            .collect();

        let mut vars = variables!();
        let mut flows: Vec<Vec<Variable>> = Vec::with_capacity(self.supplies.len());
        for _ in &self.supplies {
            let mut row = Vec::with_capacity(self.demands.len());
            for _ in &self.demands {
                row.push(vars.add(variable().min(0.0)));
            }
            flows.push(row);
        }

        let objective = flows
            .iter()
            .zip(&costs)
            .flat_map(|(row, cost_row)| row.iter().zip(cost_row))
            .fold(Expression::from(0.0), |acc, (&flow, &cost)| acc + cost * flow);

        let mut problem = vars.minimise(objective).using(clarabel);
        if let Some(limit) = self.time_limit {
            problem.settings().time_limit(limit.as_secs_f64());
        }

        // 供應約束
        for (row, (_, available)) in flows.iter().zip(&self.supplies) {
            let outflow = row
                .iter()
                .fold(Expression::from(0.0), |acc, &flow| acc + flow);
            let available = available.to_f64().unwrap_or(0.0);
            problem = problem.with(constraint!(outflow <= available));
        }

        // 需求約束（等式）
        for (j, (_, unfulfilled)) in self.demands.iter().enumerate() {
            let inflow = flows
                .iter()
                .fold(Expression::from(0.0), |acc, row| acc + row[j]);
            let unfulfilled = unfulfilled.to_f64().unwrap_or(0.0);
            problem = problem.with(constraint!(inflow == unfulfilled));
        }

        let solution = match problem.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => {
                tracing::warn!(
                    "運輸問題不可行：設施 {} 個，需求點 {} 個",
                    self.supplies.len(),
                    self.demands.len()
                );
                return RouteOptimization::Infeasible;
            }
            Err(ResolutionError::Other(reason)) if reason == TIME_LIMIT_REASON => {
                let limit = self.time_limit.unwrap_or_default();
                tracing::warn!("線性規劃達到時間上限（{:?}），停止求解", limit);
                return RouteOptimization::TimedOut(limit);
            }
            Err(e) => {
                tracing::warn!("線性規劃求解失敗: {}", e);
                return RouteOptimization::SolverError(e.to_string());
            }
        };

        let mut routes = Vec::new();
        let mut objective_value = 0.0;

        for (i, (facility_id, _)) in self.supplies.iter().enumerate() {
            for (j, (demand_id, _)) in self.demands.iter().enumerate() {
                let flow = solution.value(flows[i][j]);
                objective_value += flow * costs[i][j];

                if flow <= self.flow_noise_threshold {
                    continue;
                }

                let volume = Decimal::from_f64(flow)
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(VOLUME_DECIMALS);
                let Some(cost) = self.unit_costs[i][j].checked_mul(volume) else {
                    tracing::warn!("路線成本溢位: {} → {}", facility_id, demand_id);
                    return RouteOptimization::SolverError(format!(
                        "路線成本溢位: {facility_id} → {demand_id}"
                    ));
                };
                routes.push(Route {
                    from: facility_id.clone(),
                    to: demand_id.clone(),
                    volume,
                    cost,
                });
            }
        }

        let total_cost = Decimal::from_f64(objective_value)
            .unwrap_or(Decimal::ZERO)
            .round_dp(VOLUME_DECIMALS);

        tracing::debug!("運輸問題求解完成：路線 {} 條，總成本 {}", routes.len(), total_cost);

        RouteOptimization::Optimized(RoutePlan { routes, total_cost })
    }
}

//! # Facility Network Optimizer
//!
//! 全網路運輸路線優化（線性規劃）

pub mod transport;

// Re-export 主要類型
pub use transport::TransportProblem;

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use fnet_calc::CostModel;
use fnet_core::{Network, NetworkConfig, Route, RoutePlan};
use serde::Serialize;

/// 求解器自行停止後的等待寬限（含建模與結果轉換）
const SOLVE_GRACE: Duration = Duration::from_millis(500);

/// 路線優化結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RouteOptimization {
    /// 求得最佳解
    Optimized(RoutePlan),
    /// 問題不可行（總產能不足以滿足需求）
    Infeasible,
    /// 求解器錯誤
    SolverError(String),
    /// 求解逾時
    TimedOut(Duration),
}

impl RouteOptimization {
    pub fn is_optimized(&self) -> bool {
        matches!(self, RouteOptimization::Optimized(_))
    }

    /// 最佳解的運輸計劃
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteOptimization::Optimized(plan) => Some(plan),
            _ => None,
        }
    }

    /// 路線（無解時為空）
    pub fn routes(&self) -> &[Route] {
        self.plan().map(|p| p.routes.as_slice()).unwrap_or(&[])
    }

    /// 轉為運輸計劃（無解時為空計劃）
    pub fn into_plan(self) -> RoutePlan {
        match self {
            RouteOptimization::Optimized(plan) => plan,
            _ => RoutePlan::empty(),
        }
    }
}

/// 路線優化器
#[derive(Debug, Clone)]
pub struct RouteOptimizer {
    cost_model: CostModel,
    flow_noise_threshold: f64,
    solve_timeout: Duration,
}

impl RouteOptimizer {
    /// 創建新的路線優化器
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            cost_model: CostModel::from_config(config),
            flow_noise_threshold: config.flow_noise_threshold,
            solve_timeout: config.solve_timeout(),
        }
    }

    /// 對網路目前狀態建立問題快照（帶求解器時間上限）
    pub fn snapshot(&self, network: &Network) -> fnet_core::Result<TransportProblem> {
        Ok(
            TransportProblem::from_network(network, &self.cost_model, self.flow_noise_threshold)?
                .with_time_limit(self.solve_timeout),
        )
    }

    /// 建立快照並求解
    pub fn optimize(&self, network: &Network) -> RouteOptimization {
        match self.snapshot(network) {
            Ok(problem) => self.solve(problem),
            Err(e) => RouteOptimization::SolverError(e.to_string()),
        }
    }

    /// 在工作執行緒上求解
    ///
    /// 求解器本身在時間上限到達時停止並回報 `TimedOut`；
    /// 若執行緒在上限加寬限後仍未回應，呼叫端不再等待。
    pub fn solve(&self, problem: TransportProblem) -> RouteOptimization {
        if problem.is_empty() {
            tracing::debug!("無供應設施或無需求點，略過求解");
            return RouteOptimization::Optimized(RoutePlan::empty());
        }

        tracing::info!(
            "開始路線優化：設施 {} 個，需求點 {} 個",
            problem.supply_count(),
            problem.demand_count()
        );

        let problem = match problem.time_limit() {
            Some(_) => problem,
            None => problem.with_time_limit(self.solve_timeout),
        };

        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("fnet-lp-solve".to_string())
            .spawn(move || {
                // 接收端可能已因逾時關閉
                let _ = tx.send(problem.solve());
            });

        if let Err(e) = spawned {
            tracing::warn!("無法啟動求解執行緒: {}", e);
            return RouteOptimization::SolverError(e.to_string());
        }

        match rx.recv_timeout(self.solve_timeout.saturating_add(SOLVE_GRACE)) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("路線優化逾時（{:?}）", self.solve_timeout);
                RouteOptimization::TimedOut(self.solve_timeout)
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("求解執行緒異常終止");
                RouteOptimization::SolverError("求解執行緒異常終止".to_string())
            }
        }
    }
}

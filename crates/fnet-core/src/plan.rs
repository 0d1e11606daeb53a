//! 分配計劃、運輸路線與執行結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單筆分配（設施 → 需求點）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// 供應設施ID
    pub facility_id: String,

    /// 需求點ID
    pub demand_id: String,

    /// 分配數量
    pub volume: Decimal,

    /// 運輸成本
    pub cost: Decimal,
}

impl Allocation {
    pub fn new(
        facility_id: impl Into<String>,
        demand_id: impl Into<String>,
        volume: Decimal,
        cost: Decimal,
    ) -> Self {
        Self {
            facility_id: facility_id.into(),
            demand_id: demand_id.into(),
            volume,
            cost,
        }
    }
}

/// 優化後的運輸路線
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// 來源設施ID
    pub from: String,

    /// 目的需求點ID
    pub to: String,

    /// 流量
    pub volume: Decimal,

    /// 路線成本
    pub cost: Decimal,
}

/// 全網路運輸計劃
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// 路線（已剔除數值雜訊）
    pub routes: Vec<Route>,

    /// 目標函數值（總運輸成本）
    pub total_cost: Decimal,
}

impl RoutePlan {
    /// 創建空的運輸計劃
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// 所有路線流量總和
    pub fn total_volume(&self) -> Decimal {
        self.routes.iter().map(|r| r.volume).sum()
    }
}

/// 單筆分配的執行結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// 已套用
    Applied {
        facility_id: String,
        volume: Decimal,
    },
    /// 設施不存在，略過
    SkippedMissingFacility { facility_id: String },
    /// 超過可用產能，拒絕
    RejectedCapacityExceeded {
        facility_id: String,
        requested: Decimal,
        available: Decimal,
    },
    /// 數量非正值，拒絕
    RejectedInvalidVolume {
        facility_id: String,
        volume: Decimal,
    },
}

impl EntryOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EntryOutcome::Applied { .. })
    }
}

/// 計劃執行報告（順序與輸入計劃一致）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl ExecutionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: EntryOutcome) {
        self.outcomes.push(outcome);
    }

    /// 已套用筆數
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    /// 未套用的項目（索引, 結果）
    pub fn failures(&self) -> Vec<(usize, &EntryOutcome)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_applied())
            .collect()
    }

    /// 是否全部套用
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(EntryOutcome::is_applied)
    }
}

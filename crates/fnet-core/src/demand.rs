//! 需求點模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Keyed, NetworkError, Result};

/// 需求點
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    /// 需求ID
    pub id: String,

    /// 所在地點ID
    pub location_id: String,

    /// 需求量
    pub demand_volume: Decimal,

    /// 優先級（越高越重要，目前分配邏輯未使用）
    pub priority: u32,

    /// 已滿足數量
    pub fulfilled_volume: Decimal,
}

impl DemandPoint {
    /// 創建新的需求點（自動產生ID）
    pub fn new(location_id: impl Into<String>, demand_volume: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            location_id: location_id.into(),
            demand_volume,
            priority: 1,
            fulfilled_volume: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// 建構器模式：設置優先級
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// 建構器模式：設置已滿足數量
    pub fn with_fulfilled_volume(mut self, fulfilled_volume: Decimal) -> Self {
        self.fulfilled_volume = fulfilled_volume;
        self
    }

    /// 未滿足需求 = max(0, 需求量 - 已滿足)
    pub fn unfulfilled_demand(&self) -> Decimal {
        (self.demand_volume - self.fulfilled_volume).max(Decimal::ZERO)
    }

    /// 驗證需求量
    pub fn validate(&self) -> Result<()> {
        if self.demand_volume <= Decimal::ZERO {
            return Err(NetworkError::InvalidDemandVolume {
                demand_id: self.id.clone(),
                volume: self.demand_volume,
            });
        }
        if self.fulfilled_volume < Decimal::ZERO {
            return Err(NetworkError::InvalidFulfilledVolume {
                demand_id: self.id.clone(),
                fulfilled: self.fulfilled_volume,
            });
        }
        Ok(())
    }
}

impl Keyed for DemandPoint {
    fn key(&self) -> &str {
        &self.id
    }
}

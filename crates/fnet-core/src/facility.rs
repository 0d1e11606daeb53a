//! 設施模型

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Keyed, NetworkError, Result};

/// 設施類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    /// 生產
    Production,
    /// 倉儲
    Storage,
}

impl FacilityKind {
    /// 外部介面使用的字串
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityKind::Production => "production",
            FacilityKind::Storage => "storage",
        }
    }

    /// 建置基礎成本（乘以成本指數）
    pub fn setup_cost_base(&self) -> Decimal {
        match self {
            FacilityKind::Production => Decimal::from(10_000),
            FacilityKind::Storage => Decimal::from(5_000),
        }
    }

    /// 每單位營運成本（乘以成本指數）
    pub fn unit_operating_cost(&self) -> Decimal {
        match self {
            FacilityKind::Production => Decimal::from(50),
            FacilityKind::Storage => Decimal::from(20),
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacilityKind {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(FacilityKind::Production),
            "storage" => Ok(FacilityKind::Storage),
            _ => Err(NetworkError::UnknownFacilityKind(s.to_string())),
        }
    }
}

/// 設施（具產能的網路節點）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// 設施ID
    pub id: String,

    /// 所在地點ID
    pub location_id: String,

    /// 設施類型
    pub kind: FacilityKind,

    /// 產能
    pub capacity: Decimal,

    /// 目前使用量
    pub current_utilization: Decimal,

    /// 名目營運成本
    pub operating_cost: Decimal,
}

impl Facility {
    /// 創建新的設施（使用量為 0）
    pub fn new(
        id: impl Into<String>,
        location_id: impl Into<String>,
        kind: FacilityKind,
        capacity: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            location_id: location_id.into(),
            kind,
            capacity,
            current_utilization: Decimal::ZERO,
            operating_cost: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置初始使用量
    pub fn with_utilization(mut self, utilization: Decimal) -> Self {
        self.current_utilization = utilization;
        self
    }

    /// 建構器模式：設置營運成本
    pub fn with_operating_cost(mut self, operating_cost: Decimal) -> Self {
        self.operating_cost = operating_cost;
        self
    }

    /// 可用產能 = max(0, 產能 - 使用量)
    pub fn available_capacity(&self) -> Decimal {
        (self.capacity - self.current_utilization).max(Decimal::ZERO)
    }

    /// 使用率（產能為 0 時回傳 0，溢位時取上限）
    pub fn utilization_rate(&self) -> Decimal {
        if self.capacity > Decimal::ZERO {
            self.current_utilization
                .checked_div(self.capacity)
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        }
    }

    /// 檢查是否為生產設施
    pub fn is_production(&self) -> bool {
        self.kind == FacilityKind::Production
    }

    /// 驗證產能與使用量
    pub fn validate(&self) -> Result<()> {
        if self.capacity <= Decimal::ZERO {
            return Err(NetworkError::InvalidCapacity {
                facility_id: self.id.clone(),
                capacity: self.capacity,
            });
        }
        if self.current_utilization < Decimal::ZERO {
            return Err(NetworkError::InvalidUtilization {
                facility_id: self.id.clone(),
                utilization: self.current_utilization,
            });
        }
        Ok(())
    }
}

impl Keyed for Facility {
    fn key(&self) -> &str {
        &self.id
    }
}

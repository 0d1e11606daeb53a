//! 地點模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Keyed, NetworkError, Result};

/// 地理地點（建立後不可變）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// 地點ID
    pub id: String,

    /// 顯示名稱
    pub name: String,

    /// 緯度
    pub latitude: f64,

    /// 經度
    pub longitude: f64,

    /// 相對成本指數（土地/人力/電力），無單位乘數
    pub cost_index: Decimal,
}

impl Location {
    /// 創建新的地點
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        cost_index: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            cost_index,
        }
    }

    /// 驗證座標（有限數值）與成本指數
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(NetworkError::InvalidCoordinates(self.id.clone()));
        }
        if self.cost_index < Decimal::ZERO {
            return Err(NetworkError::InvalidCostIndex {
                location_id: self.id.clone(),
                cost_index: self.cost_index,
            });
        }
        Ok(())
    }
}

impl Keyed for Location {
    fn key(&self) -> &str {
        &self.id
    }
}

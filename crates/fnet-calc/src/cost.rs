//! 運輸成本模型
//!
//! 距離採平面歐氏距離，直接把 (緯度, 經度) 當平面座標使用，
//! 結果不是公里。

use fnet_core::{Location, NetworkConfig, NetworkError, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// 運輸成本計算器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// 每單位每距離單位的運輸費率
    rate: Decimal,
}

impl CostModel {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.transport_rate)
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// 平面距離
    pub fn distance(a: &Location, b: &Location) -> f64 {
        (a.latitude - b.latitude).hypot(a.longitude - b.longitude)
    }

    /// 每單位運輸成本 = 距離 × 費率 × (起點成本指數 + 終點成本指數) / 2
    pub fn unit_cost(&self, origin: &Location, destination: &Location) -> Result<Decimal> {
        let distance = Decimal::from_f64(Self::distance(origin, destination))
            .ok_or_else(|| overflow(format!("距離 {} → {}", origin.id, destination.id)))?;

        origin
            .cost_index
            .checked_add(destination.cost_index)
            .and_then(|sum| distance.checked_mul(self.rate)?.checked_mul(sum))
            .map(|cost| cost / Decimal::TWO)
            .ok_or_else(|| overflow(format!("每單位成本 {} → {}", origin.id, destination.id)))
    }

    /// 運輸成本。volume 為負值時結果無意義，由呼叫端保證
    pub fn transportation_cost(
        &self,
        origin: &Location,
        destination: &Location,
        volume: Decimal,
    ) -> Result<Decimal> {
        checked_product(self.unit_cost(origin, destination)?, volume, "運輸成本")
    }
}

/// 相乘，溢位時回傳錯誤
pub fn checked_product(a: Decimal, b: Decimal, context: &str) -> Result<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| overflow(format!("{context} ({a} × {b})")))
}

/// 相加，溢位時回傳錯誤
pub fn checked_sum(a: Decimal, b: Decimal, context: &str) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| overflow(format!("{context} ({a} + {b})")))
}

fn overflow(context: String) -> NetworkError {
    NetworkError::CostOverflow(context)
}

impl Default for CostModel {
    fn default() -> Self {
        Self::from_config(&NetworkConfig::default())
    }
}

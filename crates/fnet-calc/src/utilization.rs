//! 設施使用率分析

use fnet_core::{Facility, Network};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 低於此使用率視為閒置
pub const UNDERUTILIZED_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// 高於此使用率視為接近滿載
pub const NEAR_CAPACITY_THRESHOLD: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// 使用率標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationFlag {
    /// 使用率偏低
    Underutilized,
    /// 接近滿載
    NearCapacity,
}

/// 使用率建議
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationAdvisory {
    pub flag: UtilizationFlag,
    pub facility_id: String,
    pub utilization_rate: Decimal,
    /// 百分比文字（例如 "40.0%"）
    pub current_utilization: String,
    pub recommendation: String,
}

/// 使用率分析器
pub struct UtilizationAnalyzer;

impl UtilizationAnalyzer {
    /// 分析全部設施，依登錄順序回傳建議
    pub fn analyze(network: &Network) -> Vec<UtilizationAdvisory> {
        network
            .facilities()
            .iter()
            .filter_map(Self::classify)
            .collect()
    }

    /// 判斷單一設施
    pub fn classify(facility: &Facility) -> Option<UtilizationAdvisory> {
        let rate = facility.utilization_rate();

        let (flag, recommendation) = if rate < UNDERUTILIZED_THRESHOLD {
            (
                UtilizationFlag::Underutilized,
                "建議整併營運或尋找新的需求來源",
            )
        } else if rate > NEAR_CAPACITY_THRESHOLD {
            (
                UtilizationFlag::NearCapacity,
                "建議擴充產能或在附近增設設施",
            )
        } else {
            return None;
        };

        Some(UtilizationAdvisory {
            flag,
            facility_id: facility.id.clone(),
            utilization_rate: rate,
            current_utilization: format_percentage(rate),
            recommendation: recommendation.to_string(),
        })
    }
}

fn format_percentage(rate: Decimal) -> String {
    // Decimal 的精度格式化會截斷，先四捨五入
    format!("{:.1}%", rate.saturating_mul(Decimal::ONE_HUNDRED).round_dp(1))
}

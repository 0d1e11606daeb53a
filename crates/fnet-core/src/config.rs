//! 網路優化配置模型

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 網路優化參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// 每單位每距離單位的運輸費率
    pub transport_rate: Decimal,

    /// 新設施建議數量上限
    pub max_recommendations: usize,

    /// 低於此流量的路線視為數值雜訊
    pub flow_noise_threshold: f64,

    /// 線性規劃求解逾時（毫秒）
    pub solve_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            transport_rate: Decimal::new(1, 1),
            max_recommendations: 5,
            flow_noise_threshold: 0.01,
            solve_timeout_ms: 5_000,
        }
    }
}

impl NetworkConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 字串載入（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置運輸費率
    pub fn with_transport_rate(mut self, rate: Decimal) -> Self {
        self.transport_rate = rate;
        self
    }

    /// 建構器模式：設置建議數量上限
    pub fn with_max_recommendations(mut self, limit: usize) -> Self {
        self.max_recommendations = limit;
        self
    }

    /// 建構器模式：設置流量雜訊門檻
    pub fn with_flow_noise_threshold(mut self, threshold: f64) -> Self {
        self.flow_noise_threshold = threshold;
        self
    }

    /// 建構器模式：設置求解逾時
    pub fn with_solve_timeout(mut self, timeout: Duration) -> Self {
        self.solve_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// 求解逾時
    pub fn solve_timeout(&self) -> Duration {
        Duration::from_millis(self.solve_timeout_ms)
    }
}

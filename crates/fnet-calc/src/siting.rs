//! 新設施選址建議

use fnet_core::{Facility, FacilityKind, Location, Network, Result};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cost::{checked_product, checked_sum, CostModel};

/// 生產設施成本明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCost {
    pub setup: Decimal,
    pub operating: Decimal,
    pub transport: Decimal,
    pub total: Decimal,
}

/// 倉儲設施成本明細（含生產端補貨成本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageCost {
    pub setup: Decimal,
    pub operating: Decimal,
    pub transport: Decimal,
    pub supply: Decimal,
    pub total: Decimal,
}

/// 成本明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub production: ProductionCost,
    pub storage: StorageCost,
}

/// 新設施建議
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecommendation {
    pub location_id: String,
    pub location_name: String,
    pub cost_index: Decimal,
    pub production_facility_cost: Decimal,
    pub storage_facility_cost: Decimal,
    pub recommended_type: FacilityKind,
    pub cost_breakdown: CostBreakdown,
}

impl FacilityRecommendation {
    /// 建議類型的總成本
    pub fn best_cost(&self) -> Decimal {
        self.production_facility_cost.min(self.storage_facility_cost)
    }
}

/// 選址建議計算器
pub struct SitingAdvisor;

impl SitingAdvisor {
    /// 為未滿足的需求量建議新設施地點
    ///
    /// 只考慮尚無設施的地點，依較低的總成本排序，回傳前 `limit` 筆。
    /// 成本相同時保留地點登錄順序。
    pub fn suggest(
        network: &Network,
        cost_model: &CostModel,
        destination: &Location,
        required_volume: Decimal,
        limit: usize,
    ) -> Result<Vec<FacilityRecommendation>> {
        let mut suggestions = network
            .locations()
            .as_slice()
            .par_iter()
            .filter(|location| !network.hosts_facility(&location.id))
            .map(|location| {
                Self::evaluate_location(network, cost_model, location, destination, required_volume)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("選址候選地點: {} 個", suggestions.len());

        suggestions.sort_by(|a, b| a.best_cost().cmp(&b.best_cost()));
        suggestions.truncate(limit);
        Ok(suggestions)
    }

    /// 最近的生產設施（平面距離）
    pub fn nearest_production<'a>(network: &'a Network, location: &Location) -> Option<&'a Facility> {
        let mut nearest: Option<(&Facility, f64)> = None;

        for facility in network.facilities().iter().filter(|f| f.is_production()) {
            let Some(origin) = network.location(&facility.location_id) else {
                continue;
            };
            let distance = CostModel::distance(origin, location);
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((facility, distance));
            }
        }

        nearest.map(|(facility, _)| facility)
    }

    /// 計算單一地點的生產/倉儲候選成本
    fn evaluate_location(
        network: &Network,
        cost_model: &CostModel,
        location: &Location,
        destination: &Location,
        required_volume: Decimal,
    ) -> Result<FacilityRecommendation> {
        let transport = cost_model.transportation_cost(location, destination, required_volume)?;

        let production = {
            let (setup, operating) =
                Self::fixed_costs(FacilityKind::Production, location, required_volume)?;
            let total = [operating, transport]
                .into_iter()
                .try_fold(setup, |acc, cost| checked_sum(acc, cost, "生產設施成本"))?;
            ProductionCost {
                setup,
                operating,
                transport,
                total,
            }
        };

        let storage = {
            let (setup, operating) =
                Self::fixed_costs(FacilityKind::Storage, location, required_volume)?;
            // 尚無生產設施時補貨成本為 0
            let supply = match Self::nearest_production(network, location)
                .and_then(|facility| network.location(&facility.location_id))
            {
                Some(origin) => cost_model.transportation_cost(origin, location, required_volume)?,
                None => Decimal::ZERO,
            };
            let total = [operating, transport, supply]
                .into_iter()
                .try_fold(setup, |acc, cost| checked_sum(acc, cost, "倉儲設施成本"))?;
            StorageCost {
                setup,
                operating,
                transport,
                supply,
                total,
            }
        };

        let recommended_type = if production.total < storage.total {
            FacilityKind::Production
        } else {
            FacilityKind::Storage
        };

        Ok(FacilityRecommendation {
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            cost_index: location.cost_index,
            production_facility_cost: production.total,
            storage_facility_cost: storage.total,
            recommended_type,
            cost_breakdown: CostBreakdown {
                production,
                storage,
            },
        })
    }

    /// 建置成本與營運成本（皆乘以成本指數）
    fn fixed_costs(
        kind: FacilityKind,
        location: &Location,
        required_volume: Decimal,
    ) -> Result<(Decimal, Decimal)> {
        let setup = checked_product(kind.setup_cost_base(), location.cost_index, "建置成本")?;
        let operating = checked_product(
            checked_product(kind.unit_operating_cost(), required_volume, "營運成本")?,
            location.cost_index,
            "營運成本",
        )?;
        Ok((setup, operating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Network {
        let mut network = Network::new();
        network
            .add_location(Location::new("demand", "Demand", 0.0, 0.0, Decimal::ONE))
            .unwrap();
        network
            .add_location(Location::new("near", "Near", 0.0, 1.0, Decimal::ONE))
            .unwrap();
        network
            .add_location(Location::new("cheap", "Cheap", 0.0, 2.0, Decimal::new(5, 1)))
            .unwrap();
        network
    }

    #[test]
    fn test_storage_without_production_has_no_supply_cost() {
        let network = network();
        let destination = network.location("demand").unwrap().clone();

        let suggestions = SitingAdvisor::suggest(
            &network,
            &CostModel::default(),
            &destination,
            Decimal::from(10),
            5,
        )
        .unwrap();

        assert_eq!(suggestions.len(), 3);
        // cheap: 生產 5000 + 250 + 1.5；倉儲 2500 + 100 + 1.5
        let cheap = &suggestions[0];
        assert_eq!(cheap.location_id, "cheap");
        assert_eq!(cheap.cost_breakdown.storage.supply, Decimal::ZERO);
        assert_eq!(cheap.cost_breakdown.production.transport, Decimal::new(15, 1));
        assert_eq!(cheap.storage_facility_cost, Decimal::new(26015, 1));
        assert_eq!(cheap.production_facility_cost, Decimal::new(52515, 1));
        assert_eq!(cheap.recommended_type, FacilityKind::Storage);
    }

    #[test]
    fn test_locations_with_facilities_excluded() {
        let mut network = network();
        network
            .add_facility(Facility::new("p1", "near", FacilityKind::Production, Decimal::from(50)))
            .unwrap();
        let destination = network.location("demand").unwrap().clone();

        let suggestions = SitingAdvisor::suggest(
            &network,
            &CostModel::default(),
            &destination,
            Decimal::from(10),
            5,
        )
        .unwrap();

        assert!(suggestions.iter().all(|s| s.location_id != "near"));
        // 倉儲補貨成本來自 near 的生產設施
        let cheap = suggestions.iter().find(|s| s.location_id == "cheap").unwrap();
        // 距離 1 × 0.1 × (1 + 0.5) / 2 × 10 = 0.75
        assert_eq!(cheap.cost_breakdown.storage.supply, Decimal::new(75, 2));
    }

    #[test]
    fn test_limit_applied() {
        let network = network();
        let destination = network.location("demand").unwrap().clone();

        let suggestions = SitingAdvisor::suggest(
            &network,
            &CostModel::default(),
            &destination,
            Decimal::from(10),
            1,
        )
        .unwrap();

        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn test_nearest_production() {
        let mut network = network();
        assert!(SitingAdvisor::nearest_production(&network, network.location("demand").unwrap()).is_none());

        network
            .add_facility(Facility::new("s1", "near", FacilityKind::Storage, Decimal::from(50)))
            .unwrap();
        network
            .add_facility(Facility::new("p1", "cheap", FacilityKind::Production, Decimal::from(50)))
            .unwrap();

        let nearest =
            SitingAdvisor::nearest_production(&network, network.location("demand").unwrap()).unwrap();
        assert_eq!(nearest.id, "p1");
    }

    #[test]
    fn test_cost_overflow_is_error() {
        let network = network();
        let destination = network.location("demand").unwrap().clone();

        let result = SitingAdvisor::suggest(
            &network,
            &CostModel::default(),
            &destination,
            Decimal::MAX,
            5,
        );

        assert!(matches!(result, Err(fnet_core::NetworkError::CostOverflow(_))));
    }
}

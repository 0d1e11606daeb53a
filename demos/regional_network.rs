//! 區域設施網路示例
//!
//! 執行：RUST_LOG=fnet=debug cargo run --example regional_network

use fnet::{DemandPoint, Facility, FacilityKind, Location, NetworkConfig, SupplyChainEngine};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 設施網路優化示例 ===\n");

    let engine = SupplyChainEngine::new(NetworkConfig::default());

    // 地點與成本指數
    let locations = [
        ("loc1", "Mumbai", 19.076, 72.877, Decimal::new(12, 1)),
        ("loc2", "Pune", 18.520, 73.856, Decimal::new(9, 1)),
        ("loc3", "Nashik", 20.011, 73.790, Decimal::new(8, 1)),
        ("loc4", "Nagpur", 21.145, 79.088, Decimal::new(10, 1)),
        ("loc5", "Kolhapur", 16.705, 74.243, Decimal::new(85, 2)),
    ];
    for (id, name, lat, lon, cost_index) in locations {
        engine.add_location(Location::new(id, name, lat, lon, cost_index))?;
    }

    // 既有設施
    engine.add_facility(
        Facility::new("prod1", "loc1", FacilityKind::Production, Decimal::from(1000))
            .with_utilization(Decimal::from(600)),
    )?;
    engine.add_facility(
        Facility::new("storage1", "loc2", FacilityKind::Storage, Decimal::from(500))
            .with_utilization(Decimal::from(200)),
    )?;

    // 超過現有可用產能的新需求
    let demand = DemandPoint::new("loc4", Decimal::from(900)).with_id("demand1");
    println!(
        "新需求: 地點 {}, 數量 {}\n",
        demand.location_id, demand.demand_volume
    );

    let evaluation = engine.evaluate_new_demand(&demand)?;
    println!("評估結果:");
    println!("{}\n", serde_json::to_string_pretty(&evaluation)?);

    if let Some(best) = evaluation.recommendations.first() {
        println!(
            "採用建議: {} ({}), 產能 {}",
            best.location_name, best.recommended_type, evaluation.unfulfilled_volume
        );
        let added = engine.add_new_facility(
            best.recommended_type,
            &best.location_id,
            evaluation.unfulfilled_volume,
        )?;
        println!("{}\n", added.message);

        let reevaluation = engine.evaluate_new_demand(&demand)?;
        println!(
            "重新評估: 可滿足 {}, 總成本 {}",
            reevaluation.can_fulfill, reevaluation.total_cost
        );

        let report = engine.execute_fulfillment_plan(&reevaluation.fulfillment_plan);
        println!(
            "執行分配計劃: {} / {} 筆已套用",
            report.applied_count(),
            report.outcomes.len()
        );
    }

    println!("\n既有資產優化建議:");
    println!(
        "{}",
        serde_json::to_string_pretty(&engine.optimize_existing_assets())?
    );

    Ok(())
}

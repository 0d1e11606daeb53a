//! 網路聚合（地點、設施、需求三個登錄表）

use serde::{Deserialize, Serialize};

use crate::{DemandPoint, Facility, Location, NetworkError, Registry, Result};

/// 設施網路
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    locations: Registry<Location>,
    facilities: Registry<Facility>,
    demand_points: Registry<DemandPoint>,
}

impl Network {
    /// 創建空網路
    pub fn new() -> Self {
        Self::default()
    }

    /// 登錄地點
    pub fn add_location(&mut self, location: Location) -> Result<()> {
        location.validate()?;
        self.locations.insert(location)
    }

    /// 登錄設施（地點必須已存在）
    pub fn add_facility(&mut self, facility: Facility) -> Result<()> {
        facility.validate()?;
        self.require_location(&facility.location_id)?;
        self.facilities.insert(facility)
    }

    /// 登錄需求點（地點必須已存在）
    pub fn add_demand_point(&mut self, demand: DemandPoint) -> Result<()> {
        demand.validate()?;
        self.require_location(&demand.location_id)?;
        self.demand_points.insert(demand)
    }

    pub fn locations(&self) -> &Registry<Location> {
        &self.locations
    }

    pub fn facilities(&self) -> &Registry<Facility> {
        &self.facilities
    }

    pub fn demand_points(&self) -> &Registry<DemandPoint> {
        &self.demand_points
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn facility(&self, id: &str) -> Option<&Facility> {
        self.facilities.get(id)
    }

    pub fn facility_mut(&mut self, id: &str) -> Option<&mut Facility> {
        self.facilities.get_mut(id)
    }

    pub fn demand_point(&self, id: &str) -> Option<&DemandPoint> {
        self.demand_points.get(id)
    }

    pub fn demand_point_mut(&mut self, id: &str) -> Option<&mut DemandPoint> {
        self.demand_points.get_mut(id)
    }

    /// 查詢地點，不存在時回傳錯誤
    pub fn require_location(&self, id: &str) -> Result<&Location> {
        self.locations
            .get(id)
            .ok_or_else(|| NetworkError::LocationNotFound(id.to_string()))
    }

    /// 設施所在地點
    pub fn location_of(&self, facility: &Facility) -> Result<&Location> {
        self.require_location(&facility.location_id)
    }

    /// 地點上是否已有設施
    pub fn hosts_facility(&self, location_id: &str) -> bool {
        self.facilities
            .iter()
            .any(|f| f.location_id == location_id)
    }
}

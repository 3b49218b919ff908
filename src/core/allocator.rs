use crate::config::toml_config::AllocatorConfig;
use crate::domain::model::{
    AllocationResult, BuildableEnvelope, LotFootprint, Policy, RoomCategory, RoomKind,
    RoomRecord, RoomRequest, Setback, ZoneBudget,
};
use crate::utils::error::{FloorPlanError, Result};

/// 私密區與社交區的成對類別, 服務區只有單一類別
const PRIVATE_PAIR: (RoomCategory, RoomCategory) = (RoomCategory::Bedrooms, RoomCategory::Bathrooms);
const SOCIAL_PAIR: (RoomCategory, RoomCategory) = (RoomCategory::LivingRoom, RoomCategory::Kitchen);

#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn allocate(
        &self,
        footprint: &LotFootprint,
        rooms: &RoomRequest,
        policy: Policy,
    ) -> Result<AllocationResult> {
        self.config.validate_config()?;
        validate_footprint(footprint)?;

        let total = rooms.total();
        if total > self.config.max_total_rooms {
            return Err(FloorPlanError::invalid_request(format!(
                "Requested {} rooms, the limit is {}",
                total, self.config.max_total_rooms
            )));
        }

        tracing::debug!(
            "Allocating {}x{} lot with {} rooms using {:?}",
            footprint.width,
            footprint.length,
            total,
            policy
        );

        match policy {
            Policy::Proportional => self.allocate_proportional(footprint, rooms),
            Policy::Zoned => self.allocate_zoned(footprint, rooms, false),
            Policy::Optimized => self.allocate_zoned(footprint, rooms, true),
        }
    }

    fn allocate_proportional(
        &self,
        footprint: &LotFootprint,
        rooms: &RoomRequest,
    ) -> Result<AllocationResult> {
        let total = rooms.total();
        if total == 0 {
            return Err(FloorPlanError::invalid_request("No rooms were specified"));
        }

        let area_per_room = footprint.area() / total as f64;
        let mut records = Vec::new();
        for category in RoomCategory::ALL {
            push_rooms(&mut records, category, rooms.count(category), area_per_room);
        }

        // 平均分配不套用退縮, 回傳整塊土地
        Ok(AllocationResult {
            rooms: records,
            available_width: footprint.width,
            available_length: footprint.length,
            setbacks: Setback::none(),
        })
    }

    fn allocate_zoned(
        &self,
        footprint: &LotFootprint,
        rooms: &RoomRequest,
        strict_pairs: bool,
    ) -> Result<AllocationResult> {
        let setback = self.config.setback;
        let envelope = BuildableEnvelope::from_footprint(footprint, &setback);
        if envelope.available_width <= 0.0 || envelope.available_length <= 0.0 {
            return Err(FloorPlanError::invalid_request(format!(
                "Lot of {}x{} m leaves no buildable area after setbacks ({}x{} m)",
                footprint.width,
                footprint.length,
                envelope.available_width,
                envelope.available_length
            )));
        }

        let usable_area = envelope.area();
        let light_area = self.config.light_reserve(envelope.available_width);
        let leisure_area = usable_area * self.config.leisure_fraction;
        let remaining = usable_area - light_area - leisure_area;
        // 有要求房間時, 保留區之後必須還有面積可分
        if remaining < 0.0 || (rooms.total() > 0 && remaining <= 0.0) {
            return Err(FloorPlanError::invalid_request(format!(
                "Buildable area of {:.2} m² cannot hold the {:.2} m² light and {:.2} m² leisure reserves",
                usable_area, light_area, leisure_area
            )));
        }

        let zones = self.config.zones;
        let budget = ZoneBudget {
            private: remaining * zones.private,
            social: remaining * zones.social,
            service: remaining * zones.service,
        };
        tracing::debug!(
            "Zone budget: private {:.2} m², social {:.2} m², service {:.2} m² (total {:.2} m²)",
            budget.private,
            budget.social,
            budget.service,
            budget.total()
        );

        let mut records = Vec::new();
        if light_area > 0.0 {
            records.push(RoomRecord {
                kind: RoomKind::Light,
                area: light_area,
            });
        }
        if leisure_area > 0.0 {
            records.push(RoomRecord {
                kind: RoomKind::Leisure,
                area: leisure_area,
            });
        }

        push_pair(&mut records, rooms, PRIVATE_PAIR, budget.private, strict_pairs);
        push_pair(&mut records, rooms, SOCIAL_PAIR, budget.social, strict_pairs);

        let service_count = rooms.count(RoomCategory::ServiceArea);
        if service_count > 0 && budget.service <= 0.0 {
            tracing::warn!("⚠️ Service zone has no budget, skipping serviceArea");
        } else if service_count > 0 {
            push_rooms(
                &mut records,
                RoomCategory::ServiceArea,
                service_count,
                budget.service / f64::from(service_count),
            );
        } else {
            tracing::debug!("Service zone left unused ({:.2} m²)", budget.service);
        }

        // 休閒區放在後方, 佔用可建築長度
        let leisure_depth = leisure_area / envelope.available_width;

        Ok(AllocationResult {
            rooms: records,
            available_width: envelope.available_width,
            available_length: envelope.available_length - leisure_depth,
            setbacks: setback,
        })
    }
}

pub fn allocate(
    footprint: &LotFootprint,
    rooms: &RoomRequest,
    policy: Policy,
    config: &AllocatorConfig,
) -> Result<AllocationResult> {
    Allocator::new(config.clone()).allocate(footprint, rooms, policy)
}

fn validate_footprint(footprint: &LotFootprint) -> Result<()> {
    for (name, value) in [("width", footprint.width), ("length", footprint.length)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(FloorPlanError::invalid_request(format!(
                "Lot {} must be a positive number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

fn push_rooms(records: &mut Vec<RoomRecord>, category: RoomCategory, count: u32, area: f64) {
    records.extend((0..count).map(|_| RoomRecord {
        kind: RoomKind::Room(category),
        area,
    }));
}

/// 同區兩類都有要求時共用每間面積; 只有一類時寬鬆模式由該類吸收整區, 嚴格模式略過
fn push_pair(
    records: &mut Vec<RoomRecord>,
    rooms: &RoomRequest,
    (first, second): (RoomCategory, RoomCategory),
    budget: f64,
    strict: bool,
) {
    let first_count = rooms.count(first);
    let second_count = rooms.count(second);

    if budget <= 0.0 && (first_count > 0 || second_count > 0) {
        tracing::warn!(
            "⚠️ Zone for {} and {} has no budget, skipping the pair",
            first.label(),
            second.label()
        );
        return;
    }

    match (first_count > 0, second_count > 0) {
        (true, true) => {
            let area = budget / (f64::from(first_count) + f64::from(second_count));
            push_rooms(records, first, first_count, area);
            push_rooms(records, second, second_count, area);
        }
        (false, false) => {
            tracing::debug!(
                "No {} or {} requested, {:.2} m² left unused",
                first.label(),
                second.label(),
                budget
            );
        }
        _ if strict => {
            tracing::warn!(
                "⚠️ {} and {} must be requested together, skipping the pair",
                first.label(),
                second.label()
            );
        }
        (true, false) => push_rooms(records, first, first_count, budget / f64::from(first_count)),
        (false, true) => {
            push_rooms(records, second, second_count, budget / f64::from(second_count))
        }
    }
}

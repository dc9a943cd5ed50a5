//! Plan generation pipeline.
//!
//! `generate` runs the full sequence: room program, zone strips,
//! per-strip packing, adjacency and plumbing hill-climbs, door
//! planning, swing clearance resolution, wall generation, and finally
//! validation metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connectivity::reachable_rooms;
use crate::doors::{check_swing_clearances, plan_doors};
use crate::optimize::{cluster_plumbing, improve_adjacency};
use crate::packing::{pack_center_zone, pack_private_wing, squarified_treemap};
use crate::plan::{FloorPlan, PlacedRoom, RoomSpec, ZoneKind};
use crate::program::build_program;
use crate::validate::build_metadata;
use crate::walls::generate_walls;
use crate::zones::allocate_zones;

/// User override for one room's size. Area wins when both forms could
/// apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomOverride {
    Area { area: f32 },
    Dimensions { width: f32, depth: f32 },
}

/// Everything needed to generate a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRequest {
    pub building_length: f32,
    pub building_width: f32,
    pub num_bedrooms: u32,
    pub num_bathrooms: u32,
    pub open_concept: bool,
    pub has_pantry: bool,
    pub has_laundry: bool,
    pub has_mudroom: bool,
    pub has_dining: bool,
    pub room_overrides: BTreeMap<String, RoomOverride>,
}

impl Default for LayoutRequest {
    fn default() -> Self {
        LayoutRequest {
            building_length: 60.0,
            building_width: 40.0,
            num_bedrooms: 3,
            num_bathrooms: 2,
            open_concept: true,
            has_pantry: true,
            has_laundry: true,
            has_mudroom: true,
            has_dining: false,
            room_overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("building dimensions must be positive and finite, got {length}x{width}")]
    InvalidDimensions { length: f32, width: f32 },
    #[error("override for {room} must use positive finite values")]
    InvalidOverride { room: String },
}

fn check_request(request: &LayoutRequest) -> Result<(), LayoutError> {
    let (l, w) = (request.building_length, request.building_width);
    if !l.is_finite() || !w.is_finite() || l <= 0.0 || w <= 0.0 {
        return Err(LayoutError::InvalidDimensions { length: l, width: w });
    }
    for (room, ov) in &request.room_overrides {
        let ok = match *ov {
            RoomOverride::Area { area } => area.is_finite() && area > 0.0,
            RoomOverride::Dimensions { width, depth } => {
                width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0
            }
        };
        if !ok {
            return Err(LayoutError::InvalidOverride { room: room.clone() });
        }
    }
    Ok(())
}

fn pack_strip(zone: ZoneKind, bbox: crate::geometry::Rect, specs: &[RoomSpec]) -> Vec<PlacedRoom> {
    let zone_specs: Vec<&RoomSpec> = specs.iter().filter(|s| s.zone == zone).collect();
    if zone_specs.is_empty() {
        return Vec::new();
    }
    match zone {
        ZoneKind::Center => pack_center_zone(&zone_specs, bbox),
        ZoneKind::PrivateMaster | ZoneKind::PrivateSecondary => pack_private_wing(&zone_specs, bbox),
        _ => squarified_treemap(&zone_specs, bbox),
    }
}

/// Generate a complete floor plan.
pub fn generate(request: &LayoutRequest) -> Result<FloorPlan, LayoutError> {
    check_request(request)?;

    let mut specs = build_program(request);
    log::debug!("room program: {} rooms", specs.len());

    let zone_plan = allocate_zones(&mut specs, request.building_length, request.building_width);
    let hallways = zone_plan.hallways;
    log::debug!(
        "zone strips: {} strips, {} hallways",
        zone_plan.strips.len(),
        hallways.len()
    );

    let mut rooms: Vec<PlacedRoom> = Vec::new();
    for (zone, bbox) in &zone_plan.strips {
        rooms.extend(pack_strip(*zone, *bbox, &specs));
    }
    log::debug!("packed {} rooms", rooms.len());

    improve_adjacency(&mut rooms);
    cluster_plumbing(&mut rooms);

    // Advisory pre-door reachability check. The door planner has its
    // own repair pass; this only surfaces layouts that start out bad.
    let reachable = reachable_rooms(&rooms, &hallways);
    for room in &rooms {
        if !reachable.contains(&room.name) {
            log::warn!("{} cannot reach circulation before door planning", room.name);
        }
    }

    let door_plan = plan_doors(&rooms, &hallways);
    let mut doors = door_plan.doors;
    check_swing_clearances(&mut doors, &rooms, &hallways);
    log::debug!(
        "placed {} doors ({} connectivity fallbacks)",
        doors.len(),
        door_plan.fallback_doors
    );

    let walls = generate_walls(
        &rooms,
        &hallways,
        &doors,
        request.building_length,
        request.building_width,
        request.open_concept,
    );

    let metadata = build_metadata(
        &rooms,
        &hallways,
        &doors,
        request.building_length,
        request.building_width,
        door_plan.fallback_doors,
    );

    Ok(FloorPlan {
        building_length: request.building_length,
        building_width: request.building_width,
        rooms,
        hallways,
        doors,
        walls,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_generates_eleven_rooms() {
        let plan = generate(&LayoutRequest::default()).unwrap();
        assert_eq!(plan.rooms.len(), 11);
        assert!(plan.hallways.len() >= 2);
    }

    #[test]
    fn zero_dimensions_rejected() {
        let mut req = LayoutRequest::default();
        req.building_length = 0.0;
        assert!(matches!(
            generate(&req),
            Err(LayoutError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn nan_dimensions_rejected() {
        let mut req = LayoutRequest::default();
        req.building_width = f32::NAN;
        assert!(generate(&req).is_err());
    }

    #[test]
    fn negative_override_rejected() {
        let mut req = LayoutRequest::default();
        req.room_overrides
            .insert("Kitchen".to_string(), RoomOverride::Area { area: -10.0 });
        match generate(&req) {
            Err(LayoutError::InvalidOverride { room }) => assert_eq!(room, "Kitchen"),
            other => panic!("expected InvalidOverride, got {other:?}"),
        }
    }

    #[test]
    fn request_round_trips_through_json() {
        let mut req = LayoutRequest::default();
        req.room_overrides.insert(
            "Kitchen".to_string(),
            RoomOverride::Dimensions { width: 14.0, depth: 16.0 },
        );
        let json = serde_json::to_string(&req).unwrap();
        let back: LayoutRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_bedrooms, 3);
        assert_eq!(
            back.room_overrides.get("Kitchen"),
            Some(&RoomOverride::Dimensions { width: 14.0, depth: 16.0 })
        );
    }

    #[test]
    fn override_defaults_fill_missing_fields() {
        let req: LayoutRequest = serde_json::from_str(
            r#"{"building_length": 50.0, "building_width": 40.0, "num_bedrooms": 2}"#,
        )
        .unwrap();
        assert_eq!(req.building_length, 50.0);
        assert_eq!(req.num_bedrooms, 2);
        assert_eq!(req.num_bathrooms, 2);
        assert!(req.open_concept);
    }
}

//! Plan validation and metadata assembly.
//!
//! Computes bounds and overlap warnings, zone percentages, plumbing
//! and connectivity figures, and the quality report attached to every
//! generated plan. Validation never rejects a plan; problems surface
//! as warnings so callers can decide what to do with them.

use std::collections::BTreeMap;

use crate::connectivity::reachable_rooms;
use crate::geometry::round1;
use crate::optimize::plumbing_score;
use crate::plan::{
    DoorPlacement, HallwaySegment, PlacedRoom, PlanMetadata, QualityIssue, QualityReport,
    QualityStatus,
};

fn round_to(value: f32, places: i32) -> f32 {
    let factor = 10f32.powi(places);
    (value * factor).round() / factor
}

/// Build validation metadata for a finished layout.
pub fn build_metadata(
    rooms: &[PlacedRoom],
    hallways: &[HallwaySegment],
    doors: &[DoorPlacement],
    building_length: f32,
    building_width: f32,
    fallback_doors: usize,
) -> PlanMetadata {
    let mut warnings: Vec<String> = Vec::new();
    let mut overlaps: Vec<(String, String)> = Vec::new();
    let mut out_of_bounds: Vec<String> = Vec::new();

    let footprint = building_length * building_width;

    for r in rooms {
        if r.rect.x < -0.5 || r.rect.y < -0.5 {
            out_of_bounds.push(r.name.clone());
            warnings.push(format!("{} has negative coordinates", r.name));
        }
        if r.rect.right() > building_length + 0.5 {
            out_of_bounds.push(r.name.clone());
            warnings.push(format!("{} exceeds building length", r.name));
        }
        if r.rect.top() > building_width + 0.5 {
            out_of_bounds.push(r.name.clone());
            warnings.push(format!("{} exceeds building width", r.name));
        }
    }

    // Overlap means interpenetration beyond the half-foot wall
    // tolerance, not mere touching.
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if a.rect.x < b.rect.right() - 0.5
                && a.rect.right() > b.rect.x + 0.5
                && a.rect.y < b.rect.top() - 0.5
                && a.rect.top() > b.rect.y + 0.5
            {
                overlaps.push((a.name.clone(), b.name.clone()));
                warnings.push(format!("Overlap: {} and {}", a.name, b.name));
            }
        }
    }

    let mut zone_areas: BTreeMap<String, f32> = BTreeMap::new();
    for r in rooms {
        *zone_areas.entry(r.zone.as_str().to_string()).or_insert(0.0) += r.area();
    }
    let hall_area: f32 = hallways.iter().map(|h| h.rect.width * h.rect.depth).sum();
    let room_area: f32 = rooms.iter().map(|r| r.area()).sum();
    zone_areas.insert("circulation".to_string(), hall_area);

    let zone_percentages: BTreeMap<String, f32> = zone_areas
        .into_iter()
        .map(|(k, v)| (k, if footprint > 0.0 { v / footprint * 100.0 } else { 0.0 }))
        .collect();

    let plumbing = plumbing_score(rooms);

    let wet: Vec<&PlacedRoom> = rooms.iter().filter(|r| r.is_wet).collect();
    let mut wet_radius = 0.0f32;
    if wet.len() >= 2 {
        let n = wet.len() as f32;
        let cx: f32 = wet.iter().map(|r| r.rect.center().0).sum::<f32>() / n;
        let cy: f32 = wet.iter().map(|r| r.rect.center().1).sum::<f32>() / n;
        for r in &wet {
            let (rx, ry) = r.rect.center();
            wet_radius = wet_radius.max((rx - cx).hypot(ry - cy));
        }
    }

    let connected = reachable_rooms(rooms, hallways);
    let unreachable: Vec<String> = rooms
        .iter()
        .filter(|r| !connected.contains(&r.name))
        .map(|r| r.name.clone())
        .collect();
    if !unreachable.is_empty() {
        warnings.push(format!("Unreachable rooms: {unreachable:?}"));
    }

    let room_count = rooms.len();
    let door_count = doors.len();
    let doors_per_room = if room_count > 0 {
        door_count as f32 / room_count as f32
    } else {
        0.0
    };
    let circulation_total = room_area + hall_area;
    let hallway_ratio = if circulation_total > 0.0 {
        hall_area / circulation_total
    } else {
        0.0
    };

    let mut issues: Vec<QualityIssue> = Vec::new();
    if doors_per_room > 1.2 {
        issues.push(QualityIssue::HighDoorDensity);
    }
    if hallway_ratio > 0.20 {
        issues.push(QualityIssue::HighCirculationRatio);
    }
    if !unreachable.is_empty() {
        issues.push(QualityIssue::UnreachableRooms);
    }
    if fallback_doors > 2 {
        issues.push(QualityIssue::ManyConnectivityFallbackDoors);
    }

    let status = if issues.is_empty() {
        QualityStatus::Good
    } else {
        QualityStatus::Warning
    };

    PlanMetadata {
        zone_percentages,
        overlapping_rooms: overlaps,
        out_of_bounds_rooms: out_of_bounds,
        warnings,
        room_count,
        hallway_count: hallways.len(),
        total_room_area: room_area,
        total_hallway_area: hall_area,
        building_footprint: footprint,
        fill_ratio: if footprint > 0.0 { (room_area + hall_area) / footprint } else { 0.0 },
        plumbing_score: round1(plumbing),
        wet_room_cluster_radius: round1(wet_radius),
        connected_rooms: connected.len(),
        unreachable_rooms: unreachable,
        quality: QualityReport {
            status,
            issues,
            door_count,
            doors_per_room: round_to(doors_per_room, 2),
            hallway_ratio: round_to(hallway_ratio, 3),
            connectivity_fallback_doors: fallback_doors,
        },
    }
}

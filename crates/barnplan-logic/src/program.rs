//! Room program builder.
//!
//! Expands a bedroom/bathroom/options request into the list of
//! [`RoomSpec`]s the packers consume: standard room templates, user
//! dimension overrides, then a global scale toward the target fill
//! ratio with per-kind area caps.

use crate::constants::TARGET_FILL;
use crate::engine::{LayoutRequest, RoomOverride};
use crate::plan::{FixtureKind, RoomKind, RoomSpec, ZoneKind};

fn template(
    name: &str,
    kind: RoomKind,
    zone: ZoneKind,
    min_area: f32,
    target_area: f32,
    min_width: f32,
    max_aspect_ratio: f32,
    is_wet: bool,
    fixture: Option<FixtureKind>,
    required: &[&str],
    prohibited: &[&str],
) -> RoomSpec {
    RoomSpec {
        name: name.to_string(),
        kind,
        zone,
        min_area,
        target_area,
        min_width,
        max_aspect_ratio,
        is_wet,
        fixture,
        adjacency_required: required.iter().map(|s| s.to_string()).collect(),
        adjacency_prohibited: prohibited.iter().map(|s| s.to_string()).collect(),
    }
}

fn great_room() -> RoomSpec {
    // 20x20 target
    template(
        "Great_Room",
        RoomKind::GreatRoom,
        ZoneKind::Public,
        300.0,
        400.0,
        16.0,
        1.5,
        false,
        None,
        &["Kitchen"],
        &[],
    )
}

fn dining_room() -> RoomSpec {
    // 12x14 target
    template(
        "Dining_Room",
        RoomKind::DiningRoom,
        ZoneKind::Public,
        100.0,
        168.0,
        10.0,
        1.5,
        false,
        None,
        &["Kitchen", "Great_Room"],
        &[],
    )
}

fn kitchen() -> RoomSpec {
    // 12x15 target
    template(
        "Kitchen",
        RoomKind::Kitchen,
        ZoneKind::Service,
        120.0,
        180.0,
        10.0,
        1.5,
        true,
        Some(FixtureKind::KitchenL),
        &["Great_Room"],
        &[],
    )
}

fn master_bedroom() -> RoomSpec {
    // 14x16 target
    template(
        "Master_Bedroom",
        RoomKind::Bedroom,
        ZoneKind::PrivateMaster,
        168.0,
        224.0,
        12.0,
        1.5,
        false,
        None,
        &["Master_Bathroom"],
        &["Kitchen"],
    )
}

fn master_bathroom() -> RoomSpec {
    // 8x10 target
    template(
        "Master_Bathroom",
        RoomKind::Bathroom,
        ZoneKind::PrivateMaster,
        60.0,
        80.0,
        7.0,
        1.5,
        true,
        Some(FixtureKind::BathroomTub),
        &["Master_Bedroom"],
        &["Kitchen"],
    )
}

fn master_closet() -> RoomSpec {
    // 6x8 target
    template(
        "Master_WIC",
        RoomKind::Closet,
        ZoneKind::PrivateMaster,
        36.0,
        48.0,
        6.0,
        1.5,
        false,
        None,
        &["Master_Bedroom"],
        &[],
    )
}

fn secondary_bedroom(n: u32) -> RoomSpec {
    // 12x12 target
    template(
        &format!("Bedroom_{n}"),
        RoomKind::Bedroom,
        ZoneKind::PrivateSecondary,
        120.0,
        144.0,
        10.0,
        1.4,
        false,
        None,
        &[],
        &["Kitchen"],
    )
}

fn secondary_bathroom(n: u32) -> RoomSpec {
    // 6x8 target
    template(
        &format!("Bathroom_{n}"),
        RoomKind::Bathroom,
        ZoneKind::PrivateSecondary,
        40.0,
        48.0,
        5.0,
        1.8,
        true,
        Some(FixtureKind::BathroomShower),
        &[],
        &["Kitchen"],
    )
}

fn pantry() -> RoomSpec {
    // 4x6 target
    template(
        "Pantry",
        RoomKind::Pantry,
        ZoneKind::Service,
        20.0,
        24.0,
        4.0,
        2.0,
        false,
        None,
        &["Kitchen"],
        &[],
    )
}

fn laundry() -> RoomSpec {
    // 6x8 target
    template(
        "Laundry",
        RoomKind::Laundry,
        ZoneKind::Service,
        42.0,
        48.0,
        6.0,
        1.5,
        true,
        None,
        &[],
        &[],
    )
}

fn mudroom() -> RoomSpec {
    // 6x8 target
    template(
        "Mudroom",
        RoomKind::Mudroom,
        ZoneKind::Service,
        42.0,
        48.0,
        6.0,
        1.5,
        false,
        None,
        &[],
        &[],
    )
}

/// Per-kind area cap applied after global scaling. Prevents rooms from
/// ballooning on large footprints (an uncapped master bedroom can reach
/// 360+ sq ft on an 80x60 shell).
fn area_cap(kind: RoomKind) -> Option<f32> {
    match kind {
        RoomKind::Bedroom => Some(250.0),
        RoomKind::Bathroom => Some(120.0),
        RoomKind::Closet => Some(80.0),
        RoomKind::Kitchen => Some(260.0),
        RoomKind::DiningRoom => Some(220.0),
        RoomKind::Laundry => Some(80.0),
        RoomKind::Mudroom => Some(80.0),
        RoomKind::Pantry => Some(40.0),
        RoomKind::GreatRoom | RoomKind::Hallway => None,
    }
}

/// Expand a layout request into room specifications.
///
/// Zero-bedroom/zero-bathroom requests degrade silently: the master
/// suite is simply not emitted and the plan proceeds with whatever
/// rooms remain.
pub fn build_program(request: &LayoutRequest) -> Vec<RoomSpec> {
    let mut specs: Vec<RoomSpec> = Vec::new();

    specs.push(great_room());
    if request.has_dining {
        specs.push(dining_room());
    }
    specs.push(kitchen());

    // Master suite counts as bedroom 1 / bathroom 1.
    if request.num_bedrooms >= 1 {
        specs.push(master_bedroom());
        specs.push(master_closet());
    }
    if request.num_bathrooms >= 1 {
        specs.push(master_bathroom());
    }

    for n in 2..=request.num_bedrooms {
        specs.push(secondary_bedroom(n));
    }
    for n in 2..=request.num_bathrooms {
        specs.push(secondary_bathroom(n));
    }

    if request.has_pantry {
        specs.push(pantry());
    }
    if request.has_laundry {
        specs.push(laundry());
    }
    if request.has_mudroom {
        specs.push(mudroom());
    }

    // Dimension overrides replace targets before global scaling.
    // Unrecognized room names are ignored.
    for spec in &mut specs {
        if let Some(ov) = request.room_overrides.get(&spec.name) {
            match *ov {
                RoomOverride::Area { area } => {
                    spec.target_area = area;
                    spec.min_area = area * 0.8;
                }
                RoomOverride::Dimensions { width, depth } => {
                    spec.target_area = width * depth;
                    spec.min_area = spec.target_area * 0.8;
                    spec.min_width = spec.min_width.max(width * 0.8);
                }
            }
        }
    }

    // Scale targets so the program fills ~88% of the footprint, leaving
    // room for hallways and wall thickness.
    let footprint = request.building_length * request.building_width;
    let total_target: f32 = specs.iter().map(|s| s.target_area).sum();
    if total_target > 0.0 {
        let scale = ((footprint * TARGET_FILL) / total_target).clamp(0.7, 1.3);

        for spec in &mut specs {
            if request.room_overrides.contains_key(&spec.name) {
                // User-overridden rooms scale down only, never up.
                if scale < 1.0 {
                    spec.target_area *= scale;
                    spec.min_area *= scale.max(0.8);
                }
            } else {
                spec.target_area *= scale;
                spec.min_area *= scale.max(0.8);
                if let Some(cap) = area_cap(spec.kind) {
                    spec.target_area = spec.target_area.min(cap);
                }
            }
        }
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn request(length: f32, width: f32, beds: u32, baths: u32) -> LayoutRequest {
        LayoutRequest {
            building_length: length,
            building_width: width,
            num_bedrooms: beds,
            num_bathrooms: baths,
            ..LayoutRequest::default()
        }
    }

    #[test]
    fn standard_program_room_names() {
        let specs = build_program(&request(60.0, 40.0, 3, 2));
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        for expected in [
            "Great_Room",
            "Kitchen",
            "Master_Bedroom",
            "Master_Bathroom",
            "Master_WIC",
            "Bedroom_2",
            "Bedroom_3",
            "Bathroom_2",
            "Pantry",
            "Laundry",
            "Mudroom",
        ] {
            assert!(names.contains(&expected), "missing {expected}: {names:?}");
        }
        assert_eq!(specs.len(), 11);
    }

    #[test]
    fn minimal_program() {
        let mut req = request(30.0, 24.0, 1, 1);
        req.has_pantry = false;
        req.has_laundry = false;
        req.has_mudroom = false;
        let specs = build_program(&req);
        assert_eq!(specs.len(), 5, "great room, kitchen, master suite");
    }

    #[test]
    fn zero_bedrooms_omits_master_suite() {
        let specs = build_program(&request(40.0, 30.0, 0, 0));
        assert!(!specs.iter().any(|s| s.name.starts_with("Master")));
        assert!(!specs.iter().any(|s| s.kind == RoomKind::Bedroom));
    }

    #[test]
    fn dining_room_included_on_request() {
        let mut req = request(60.0, 40.0, 3, 2);
        req.has_dining = true;
        let specs = build_program(&req);
        assert_eq!(specs.len(), 12);
        assert!(specs.iter().any(|s| s.kind == RoomKind::DiningRoom));
    }

    #[test]
    fn large_footprint_respects_area_caps() {
        let specs = build_program(&request(80.0, 60.0, 3, 2));
        let master = specs.iter().find(|s| s.name == "Master_Bedroom").unwrap();
        assert!(
            master.target_area <= 250.0 + 0.01,
            "master target {} exceeds cap",
            master.target_area
        );
        let pantry = specs.iter().find(|s| s.name == "Pantry").unwrap();
        assert!(pantry.target_area <= 40.0 + 0.01);
    }

    #[test]
    fn overrides_shift_targets() {
        let mut req = request(60.0, 40.0, 3, 2);
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Kitchen".to_string(),
            RoomOverride::Dimensions { width: 14.0, depth: 16.0 },
        );
        overrides.insert("Master_Bedroom".to_string(), RoomOverride::Area { area: 200.0 });
        req.room_overrides = overrides;
        let specs = build_program(&req);

        let kit = specs.iter().find(|s| s.name == "Kitchen").unwrap();
        let master = specs.iter().find(|s| s.name == "Master_Bedroom").unwrap();
        // Overridden targets are near the requested values, shifted only
        // by the global scale (which never inflates them).
        assert!(
            kit.target_area > 160.0 && kit.target_area < 300.0,
            "kitchen target {}",
            kit.target_area
        );
        assert!(
            master.target_area > 140.0 && master.target_area <= 260.0,
            "master target {}",
            master.target_area
        );
    }

    #[test]
    fn unknown_override_names_ignored() {
        let mut req = request(60.0, 40.0, 3, 2);
        req.room_overrides
            .insert("Observatory".to_string(), RoomOverride::Area { area: 500.0 });
        let specs = build_program(&req);
        assert_eq!(specs.len(), 11);
    }

    #[test]
    fn secondary_rooms_numbered_from_two() {
        let specs = build_program(&request(60.0, 40.0, 4, 3));
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Bedroom_2"));
        assert!(names.contains(&"Bedroom_3"));
        assert!(names.contains(&"Bedroom_4"));
        assert!(names.contains(&"Bathroom_2"));
        assert!(names.contains(&"Bathroom_3"));
        assert!(!names.contains(&"Bedroom_1"), "master is bedroom 1");
    }

    #[test]
    fn wet_rooms_flagged() {
        let specs = build_program(&request(60.0, 40.0, 3, 2));
        let wet: Vec<&str> = specs.iter().filter(|s| s.is_wet).map(|s| s.name.as_str()).collect();
        assert!(wet.contains(&"Kitchen"));
        assert!(wet.contains(&"Master_Bathroom"));
        assert!(wet.contains(&"Bathroom_2"));
        assert!(wet.contains(&"Laundry"));
        assert!(!wet.contains(&"Mudroom"));
    }
}

//! Room packing within zone strips.
//!
//! Three packers share this module: a squarified treemap for generic
//! strips, a two-row center-zone packer that keeps the great room,
//! dining room, and kitchen in open-concept flow, and a private-wing
//! packer that fronts the bedrooms and tucks baths and closets behind.

use crate::constants::{CEILING_HEIGHT, MAX_ASPECT};
use crate::geometry::{round2, Rect};
use crate::plan::{PlacedRoom, RoomKind, RoomSpec};

fn placed(spec: &RoomSpec, x: f32, y: f32, width: f32, depth: f32) -> PlacedRoom {
    PlacedRoom {
        name: spec.name.clone(),
        kind: spec.kind,
        zone: spec.zone,
        rect: Rect::new(round2(x), round2(y), round2(width), round2(depth)),
        height: CEILING_HEIGHT,
        is_wet: spec.is_wet,
        fixture: spec.fixture,
    }
}

/// Worst aspect ratio if `areas` were laid out as one row along `side`.
fn worst_ratio(areas: &[f32], side: f32) -> f32 {
    let total: f32 = areas.iter().sum();
    if total == 0.0 || side == 0.0 {
        return f32::INFINITY;
    }
    let thickness = total / side;
    let mut worst = 0.0_f32;
    for &area in areas {
        let item_len = if thickness > 0.0 { area / thickness } else { 0.0 };
        if item_len == 0.0 || thickness == 0.0 {
            continue;
        }
        worst = worst.max((item_len / thickness).max(thickness / item_len));
    }
    worst
}

fn treemap_recurse(items: &[(&RoomSpec, f32)], x: f32, y: f32, w: f32, d: f32, out: &mut Vec<PlacedRoom>) {
    if items.is_empty() {
        return;
    }
    if items.len() == 1 {
        out.push(placed(items[0].0, x, y, w, d));
        return;
    }
    if w <= 0.0 || d <= 0.0 {
        return;
    }

    // Lay each row along the shorter side.
    let along_x = d <= w;
    let shorter = w.min(d);

    // Greedy row building: grow the row while the worst aspect ratio
    // does not get worse.
    let mut row_end = 1;
    let mut row_areas: Vec<f32> = vec![items[0].1];
    let mut best_worst = worst_ratio(&row_areas, shorter);
    while row_end < items.len() {
        row_areas.push(items[row_end].1);
        let new_worst = worst_ratio(&row_areas, shorter);
        if new_worst <= best_worst {
            best_worst = new_worst;
            row_end += 1;
        } else {
            row_areas.pop();
            break;
        }
    }

    let (row, rest) = items.split_at(row_end);
    let row_area: f32 = row.iter().map(|(_, a)| a).sum();

    if along_x {
        // Row spans full width, variable depth.
        let row_d = if w > 0.0 { row_area / w } else { d };
        let mut rx = x;
        for &(spec, area) in row {
            let room_w = if row_d > 0.0 { area / row_d } else { w };
            out.push(placed(spec, rx, y, room_w, row_d));
            rx += room_w;
        }
        treemap_recurse(rest, x, y + row_d, w, d - row_d, out);
    } else {
        // Row spans full depth, variable width.
        let row_w = if d > 0.0 { row_area / d } else { w };
        let mut ry = y;
        for &(spec, area) in row {
            let room_d = if row_w > 0.0 { area / row_w } else { d };
            out.push(placed(spec, x, ry, row_w, room_d));
            ry += room_d;
        }
        treemap_recurse(rest, x + row_w, y, w - row_w, d, out);
    }
}

/// Resize rooms that came out of the treemap with extreme proportions.
/// Targets a 2:1 shape at constant area; the freed space is absorbed by
/// hallway slack rather than redistributed.
fn clamp_aspect_ratios(rooms: &mut [PlacedRoom], bbox: Rect) {
    for room in rooms {
        let (w, d) = (room.rect.width, room.rect.depth);
        if w <= 0.0 || d <= 0.0 {
            continue;
        }
        if (w / d).max(d / w) <= MAX_ASPECT {
            continue;
        }
        let area = w * d;
        let target_ratio = 2.0;
        let (mut new_w, mut new_d);
        if w > d {
            new_d = (area / target_ratio).sqrt();
            new_w = area / new_d;
        } else {
            new_w = (area / target_ratio).sqrt();
            new_d = area / new_w;
        }
        new_w = new_w.min(bbox.width - (room.rect.x - bbox.x));
        new_d = new_d.min(bbox.depth - (room.rect.y - bbox.y));
        room.rect.width = round2(new_w.max(5.0));
        room.rect.depth = round2(new_d.max(5.0));
    }
}

/// Pack rooms into `bbox` with the squarified treemap algorithm, then
/// clamp extreme aspect ratios.
pub fn squarified_treemap(rooms: &[&RoomSpec], bbox: Rect) -> Vec<PlacedRoom> {
    let total_bbox_area = bbox.width * bbox.depth;
    let total_room_area: f32 = rooms.iter().map(|r| r.target_area).sum();
    if total_room_area <= 0.0 || total_bbox_area <= 0.0 {
        return Vec::new();
    }
    let scale = total_bbox_area / total_room_area;

    let mut sorted: Vec<&RoomSpec> = rooms.to_vec();
    sorted.sort_by(|a, b| b.target_area.total_cmp(&a.target_area));
    let items: Vec<(&RoomSpec, f32)> = sorted.iter().map(|r| (*r, r.target_area * scale)).collect();

    let mut out = Vec::new();
    treemap_recurse(&items, bbox.x, bbox.y, bbox.width, bbox.depth, &mut out);
    clamp_aspect_ratios(&mut out, bbox);
    out
}

fn back_strip(small: &mut Vec<&RoomSpec>, x: f32, y: f32, w: f32, depth: f32, out: &mut Vec<PlacedRoom>) {
    small.sort_by(|a, b| b.target_area.total_cmp(&a.target_area));
    let total: f32 = small.iter().map(|r| r.target_area).sum();
    let mut cursor = x;
    let count = small.len();
    for (i, spec) in small.iter().enumerate() {
        let frac = if total > 0.0 { spec.target_area / total } else { 1.0 / count as f32 };
        let mut room_w = round2(w * frac);
        if i == count - 1 {
            room_w = round2((x + w) - cursor);
        }
        out.push(placed(spec, cursor, y, room_w, depth));
        cursor += room_w;
    }
}

/// Pack the center zone (public + service rooms).
///
/// Great room, dining room, and kitchen form the main rows; pantry,
/// laundry, and mudroom get a service strip along the back wall.
pub fn pack_center_zone(rooms: &[&RoomSpec], bbox: Rect) -> Vec<PlacedRoom> {
    let (x, y, w, d) = (bbox.x, bbox.y, bbox.width, bbox.depth);
    let mut out = Vec::new();

    let mut large: Vec<&RoomSpec> = Vec::new();
    let mut small: Vec<&RoomSpec> = Vec::new();
    for &r in rooms {
        if matches!(r.kind, RoomKind::GreatRoom | RoomKind::Kitchen | RoomKind::DiningRoom) {
            large.push(r);
        } else {
            small.push(r);
        }
    }

    if large.is_empty() {
        return squarified_treemap(rooms, bbox);
    }

    // Service rooms get a strip along the back (Y-max side).
    let small_total: f32 = small.iter().map(|r| r.target_area).sum();
    let service_strip_d = if small_total > 0.0 && !small.is_empty() {
        (small_total / w).max(6.0).min(d * 0.3)
    } else {
        0.0
    };
    let main_d = d - service_strip_d;

    let gr = large.iter().copied().find(|r| r.kind == RoomKind::GreatRoom);
    let dr = large.iter().copied().find(|r| r.kind == RoomKind::DiningRoom);
    let kit = large.iter().copied().find(|r| r.kind == RoomKind::Kitchen);

    match (large.len(), gr, dr, kit) {
        (3, Some(gr), Some(dr), Some(kit)) => {
            // Two rows: great room spans the front, dining + kitchen
            // share the back row. Open flow runs great -> dining -> kitchen.
            let back_area = dr.target_area + kit.target_area;
            let total_area = gr.target_area + back_area;
            let front_frac = gr.target_area / total_area;

            let mut front_d = (main_d * front_frac).max(12.0).min(main_d * 0.6);
            let mut back_d = main_d - front_d;
            if back_d < 10.0 {
                front_d = main_d - 10.0;
                back_d = 10.0;
            }

            out.push(placed(gr, x, y, w, front_d));

            let dr_frac = if back_area > 0.0 { dr.target_area / back_area } else { 0.5 };
            let mut dr_w = round2(w * dr_frac);
            let mut kit_w = round2(w - dr_w);
            if dr_w < 10.0 {
                dr_w = 10.0_f32.min(w * 0.45);
                kit_w = round2(w - dr_w);
            }
            if kit_w < 10.0 {
                kit_w = 10.0_f32.min(w * 0.45);
                dr_w = round2(w - kit_w);
            }

            let back_y = y + front_d;
            out.push(placed(dr, x, back_y, dr_w, back_d));
            out.push(placed(kit, x + dr_w, back_y, kit_w, back_d));
        }
        (n, Some(gr), _, Some(kit)) if n >= 2 => {
            let total_area = gr.target_area + kit.target_area;
            let gr_frac = gr.target_area / total_area;
            let gr_w_try = w * gr_frac;
            let kit_w_try = w - gr_w_try;
            let kit_ratio = if kit_w_try > 0.0 { main_d / kit_w_try } else { 999.0 };

            if kit_ratio <= MAX_ASPECT && kit_w_try >= 10.0 {
                // Side by side, both full depth.
                let gr_w = round2(gr_w_try);
                let kit_w = round2(w - gr_w);
                out.push(placed(gr, x, y, gr_w, main_d));
                out.push(placed(kit, x + gr_w, y, kit_w, main_d));
            } else {
                // Stack: great room in front, kitchen behind. Narrow the
                // kitchen when a full-width run would be too stretched.
                let kit_d = (kit.target_area / w.max(f32::EPSILON)).max(10.0).min(main_d * 0.45);
                let mut kit_w_vert = w;
                let kit_ratio_vert = if kit_d > 0.0 { kit_w_vert / kit_d } else { 999.0 };
                if kit_ratio_vert > 2.0 && w > 20.0 {
                    kit_w_vert = (kit_d * 2.0).max(14.0).min(w);
                }
                let gr_d = round2(main_d - kit_d);
                out.push(placed(gr, x, y, w, gr_d));
                out.push(placed(kit, x, y + gr_d, kit_w_vert, kit_d));
            }
        }
        (1, _, _, _) => {
            out.push(placed(large[0], x, y, w, main_d));
        }
        _ => {}
    }

    if !small.is_empty() && service_strip_d > 0.0 {
        back_strip(&mut small, x, y + main_d, w, service_strip_d, &mut out);
    }

    out
}

/// Pack a private wing (bedrooms, bathrooms, closets).
///
/// The master wing places the bedroom across the front and the bath
/// and closet behind it; secondary wings put bedrooms in the front row
/// and the remaining small rooms in a back row.
pub fn pack_private_wing(rooms: &[&RoomSpec], bbox: Rect) -> Vec<PlacedRoom> {
    let (x, y, w, d) = (bbox.x, bbox.y, bbox.width, bbox.depth);
    let mut out = Vec::new();

    if rooms.is_empty() {
        return out;
    }

    if let Some(master) = rooms.iter().copied().find(|r| r.name == "Master_Bedroom") {
        let mut rear: Vec<&RoomSpec> = rooms.iter().copied().filter(|r| r.name != "Master_Bedroom").collect();
        let mut master_d = if rear.is_empty() { d } else { (d * 0.62).max(12.0).min(d - 6.0) };
        master_d = master_d.min(d).max(8.0);
        let rear_d = (d - master_d).max(0.0);

        out.push(placed(master, x, y, w, master_d));

        if !rear.is_empty() && rear_d >= 4.0 {
            back_strip(&mut rear, x, y + master_d, w, rear_d, &mut out);
        }
        return out;
    }

    let mut large: Vec<&RoomSpec> = rooms.iter().copied().filter(|r| r.kind == RoomKind::Bedroom).collect();
    let mut small: Vec<&RoomSpec> = rooms.iter().copied().filter(|r| r.kind != RoomKind::Bedroom).collect();

    if large.is_empty() {
        return squarified_treemap(rooms, bbox);
    }

    let large_area: f32 = large.iter().map(|r| r.target_area).sum();
    let small_area: f32 = small.iter().map(|r| r.target_area).sum();
    let total_area = large_area + small_area;

    let large_d = if total_area > 0.0 && !small.is_empty() {
        // Bedrooms take their proportional depth, at least 55% and at
        // most 80% of the wing.
        (d * (large_area / total_area)).max(d * 0.55).min(d * 0.8)
    } else {
        d
    };
    let small_d = d - large_d;

    back_strip(&mut large, x, y, w, large_d, &mut out);

    if !small.is_empty() && small_d > 3.0 {
        back_strip(&mut small, x, y + large_d, w, small_d, &mut out);
    } else if !small.is_empty() {
        // Back strip too shallow for real rooms.
        return squarified_treemap(rooms, bbox);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LayoutRequest;
    use crate::program::build_program;
    use crate::plan::ZoneKind;

    fn specs_for(zone: ZoneKind) -> Vec<RoomSpec> {
        let mut specs = build_program(&LayoutRequest::default());
        crate::zones::allocate_zones(&mut specs, 60.0, 40.0);
        specs.into_iter().filter(|s| s.zone == zone).collect()
    }

    fn refs(specs: &[RoomSpec]) -> Vec<&RoomSpec> {
        specs.iter().collect()
    }

    #[test]
    fn treemap_fills_bbox_area() {
        let specs = specs_for(ZoneKind::Center);
        let bbox = Rect::new(0.0, 0.0, 26.0, 40.0);
        let rooms = squarified_treemap(&refs(&specs), bbox);
        assert_eq!(rooms.len(), specs.len());
        let total: f32 = rooms.iter().map(|r| r.area()).sum();
        // Aspect clamping can shed area but never adds any.
        assert!(total <= 26.0 * 40.0 + 1.0, "packed {total} into 1040");
        assert!(total > 26.0 * 40.0 * 0.5, "packed only {total}");
    }

    #[test]
    fn treemap_rooms_stay_near_bbox() {
        let specs = specs_for(ZoneKind::Center);
        let bbox = Rect::new(10.0, 0.0, 26.0, 40.0);
        // The aspect clamp clips to the bbox first, then applies the
        // 5 ft dimension floor, so narrow trailing rooms can extend
        // past the zone edge by up to the floor.
        for room in squarified_treemap(&refs(&specs), bbox) {
            assert!(room.rect.x >= bbox.x - 0.01, "{} left of bbox", room.name);
            assert!(room.rect.y >= bbox.y - 0.01, "{} below bbox", room.name);
            assert!(room.rect.right() <= bbox.right() + 5.0, "{} past right edge", room.name);
            assert!(room.rect.top() <= bbox.top() + 5.0, "{} past top edge", room.name);
        }
    }

    #[test]
    fn aspect_clamp_floor_can_pass_zone_edge() {
        // A sliver room clipped against the right edge gets widened
        // back to the 5 ft floor, landing past the bbox boundary.
        let mut rooms = vec![PlacedRoom {
            name: "Pantry".to_string(),
            kind: RoomKind::Pantry,
            zone: ZoneKind::Center,
            rect: Rect::new(24.0, 0.0, 2.0, 12.0),
            height: crate::constants::CEILING_HEIGHT,
            is_wet: false,
            fixture: None,
        }];
        let bbox = Rect::new(0.0, 0.0, 26.0, 40.0);
        clamp_aspect_ratios(&mut rooms, bbox);
        assert!((rooms[0].rect.width - 5.0).abs() < 0.01, "width floored to 5, got {}", rooms[0].rect.width);
        assert!(rooms[0].rect.right() > bbox.right(), "floored room extends past the zone edge");
    }

    #[test]
    fn treemap_empty_input() {
        assert!(squarified_treemap(&[], Rect::new(0.0, 0.0, 20.0, 20.0)).is_empty());
    }

    #[test]
    fn worst_ratio_degenerate_inputs() {
        assert_eq!(worst_ratio(&[], 10.0), f32::INFINITY);
        assert_eq!(worst_ratio(&[100.0], 0.0), f32::INFINITY);
        let square = worst_ratio(&[100.0], 10.0);
        assert!((square - 1.0).abs() < 0.001, "10x10 room should be square");
    }

    #[test]
    fn center_zone_great_room_spans_front() {
        let specs = specs_for(ZoneKind::Center);
        let bbox = Rect::new(18.0, 0.0, 26.0, 40.0);
        let rooms = pack_center_zone(&refs(&specs), bbox);
        let gr = rooms.iter().find(|r| r.kind == RoomKind::GreatRoom).unwrap();
        assert_eq!(gr.rect.y, 0.0, "great room sits on the front wall");
        assert!((gr.rect.width - 26.0).abs() < 0.01, "great room spans strip width");
    }

    #[test]
    fn center_zone_kitchen_next_to_great_room() {
        let specs = specs_for(ZoneKind::Center);
        let bbox = Rect::new(18.0, 0.0, 26.0, 40.0);
        let rooms = pack_center_zone(&refs(&specs), bbox);
        let gr = rooms.iter().find(|r| r.kind == RoomKind::GreatRoom).unwrap();
        let kit = rooms.iter().find(|r| r.kind == RoomKind::Kitchen).unwrap();
        let shared = crate::geometry::shared_wall_length(&gr.rect, &kit.rect);
        assert!(shared >= 3.0, "kitchen should adjoin the great room, shared {shared}");
    }

    #[test]
    fn center_zone_service_strip_on_back_wall() {
        let specs = specs_for(ZoneKind::Center);
        let bbox = Rect::new(18.0, 0.0, 26.0, 40.0);
        let rooms = pack_center_zone(&refs(&specs), bbox);
        for kind in [RoomKind::Pantry, RoomKind::Laundry, RoomKind::Mudroom] {
            let room = rooms.iter().find(|r| r.kind == kind).unwrap();
            assert!(
                room.rect.top() > 40.0 - 13.0,
                "{} should sit in the back strip, top {}",
                room.name,
                room.rect.top()
            );
        }
    }

    #[test]
    fn master_wing_bedroom_fronts_the_strip() {
        let specs = specs_for(ZoneKind::PrivateMaster);
        let bbox = Rect::new(0.0, 0.0, 16.0, 40.0);
        let rooms = pack_private_wing(&refs(&specs), bbox);
        let master = rooms.iter().find(|r| r.name == "Master_Bedroom").unwrap();
        assert_eq!(master.rect.y, 0.0);
        assert!((master.rect.width - 16.0).abs() < 0.01);

        let bath = rooms.iter().find(|r| r.name == "Master_Bathroom").unwrap();
        let shared = crate::geometry::shared_wall_length(&master.rect, &bath.rect);
        assert!(shared >= 3.0, "master bath behind the bedroom, shared {shared}");
    }

    #[test]
    fn secondary_wing_bedrooms_front_small_rooms_back() {
        let specs = specs_for(ZoneKind::PrivateSecondary);
        let bbox = Rect::new(44.0, 0.0, 16.0, 40.0);
        let rooms = pack_private_wing(&refs(&specs), bbox);
        let beds: Vec<&PlacedRoom> = rooms.iter().filter(|r| r.kind == RoomKind::Bedroom).collect();
        let baths: Vec<&PlacedRoom> = rooms.iter().filter(|r| r.kind == RoomKind::Bathroom).collect();
        assert!(!beds.is_empty() && !baths.is_empty());
        for bed in &beds {
            assert_eq!(bed.rect.y, 0.0, "{} in the front row", bed.name);
        }
        for bath in &baths {
            assert!(bath.rect.y > 0.0, "{} behind the bedrooms", bath.name);
        }
    }

    #[test]
    fn no_overlaps_within_a_packed_strip() {
        let specs = specs_for(ZoneKind::Center);
        let bbox = Rect::new(18.0, 0.0, 26.0, 40.0);
        let rooms = pack_center_zone(&refs(&specs), bbox);
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                assert!(
                    !crate::geometry::rects_overlap(&rooms[i].rect, &rooms[j].rect, 0.5),
                    "{} overlaps {}",
                    rooms[i].name,
                    rooms[j].name
                );
            }
        }
    }
}

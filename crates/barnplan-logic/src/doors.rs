//! Door planning.
//!
//! Candidate doors are enumerated on every qualifying shared wall,
//! ranked by priority, then selected in four passes: mandatory pairs,
//! hallway access for enclosed rooms, high-value optional doors under
//! per-room caps, and finally bridge doors that repair connectivity.
//! A last sweep resolves swing-arc collisions by flipping swings.

use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::{find_shared_segment, round2, Axis, SharedSegment};
use crate::plan::{
    hallway_pseudo_rooms, DoorPlacement, HallwaySegment, PlacedRoom, RoomKind, SwingDirection,
};

/// Whether a door should connect these two rooms.
pub fn should_have_door(a: &PlacedRoom, b: &PlacedRoom) -> bool {
    let kinds = (a.kind, b.kind);
    let has_kind = |k: RoomKind| kinds.0 == k || kinds.1 == k;
    let has_name = |n: &str| a.name == n || b.name == n;

    // Hallway-to-room doors are the primary circulation edges.
    if has_kind(RoomKind::Hallway) {
        return true;
    }
    if has_name("Master_Bedroom") && has_name("Master_Bathroom") {
        return true;
    }
    if has_name("Master_Bedroom") && has_name("Master_WIC") {
        return true;
    }
    if has_kind(RoomKind::Kitchen) && has_kind(RoomKind::Pantry) {
        return true;
    }
    // Open-concept rooms flow into each other without doors; the wall
    // generator removes the wall entirely.
    if a.kind.is_open_flow() && b.kind.is_open_flow() {
        return false;
    }
    // Bedroom-to-bedroom doors are fallback circulation links.
    if kinds.0 == RoomKind::Bedroom && kinds.1 == RoomKind::Bedroom {
        return true;
    }
    if has_kind(RoomKind::Bedroom) && (has_kind(RoomKind::Kitchen) || has_kind(RoomKind::DiningRoom)) {
        return false;
    }
    if has_kind(RoomKind::Kitchen) && (has_kind(RoomKind::Laundry) || has_kind(RoomKind::Mudroom)) {
        return true;
    }
    false
}

/// Standard clear door width in feet for a room kind (IRC R311).
fn base_door_width(kind: RoomKind) -> f32 {
    match kind {
        RoomKind::Bedroom | RoomKind::Bathroom | RoomKind::Laundry => 2.67,
        RoomKind::Closet | RoomKind::Pantry => 2.33,
        RoomKind::Mudroom | RoomKind::GreatRoom | RoomKind::Kitchen | RoomKind::DiningRoom => 3.0,
        RoomKind::Hallway => 2.67,
    }
}

fn door_width_for(a: &PlacedRoom, b: &PlacedRoom) -> f32 {
    if a.kind == RoomKind::Hallway {
        return base_door_width(b.kind);
    }
    if b.kind == RoomKind::Hallway {
        return base_door_width(a.kind);
    }
    if a.kind == RoomKind::Closet
        || b.kind == RoomKind::Closet
        || a.kind == RoomKind::Pantry
        || b.kind == RoomKind::Pantry
    {
        return 2.33;
    }
    if a.name == "Master_Bedroom" || b.name == "Master_Bedroom" {
        return 2.67;
    }
    2.67
}

fn door_priority(a: &PlacedRoom, b: &PlacedRoom) -> i32 {
    let has_kind = |k: RoomKind| a.kind == k || b.kind == k;
    let names_are = |x: &str, y: &str| {
        (a.name == x && b.name == y) || (a.name == y && b.name == x)
    };

    if names_are("Master_Bedroom", "Master_Bathroom") || names_are("Master_Bedroom", "Master_WIC") {
        return 120;
    }
    if has_kind(RoomKind::Kitchen) && has_kind(RoomKind::Pantry) {
        return 110;
    }
    if has_kind(RoomKind::Hallway) {
        if has_kind(RoomKind::Bedroom) || has_kind(RoomKind::Bathroom) {
            return 95;
        }
        if has_kind(RoomKind::Laundry)
            || has_kind(RoomKind::Mudroom)
            || has_kind(RoomKind::Pantry)
            || has_kind(RoomKind::Closet)
        {
            return 85;
        }
        return 70;
    }
    match crate::adjacency::relation_between(&a.name, a.kind, &b.name, b.kind) {
        Some(crate::adjacency::Relation::Mandatory) => return 100,
        Some(crate::adjacency::Relation::Strong) => return 80,
        _ => {}
    }
    if a.kind == RoomKind::Bedroom && b.kind == RoomKind::Bedroom {
        return 55;
    }
    60
}

fn room_max_doors(room: &PlacedRoom) -> usize {
    if room.name == "Master_Bedroom" {
        return 2;
    }
    match room.kind {
        RoomKind::GreatRoom | RoomKind::Kitchen | RoomKind::DiningRoom | RoomKind::Mudroom => 2,
        _ => 1,
    }
}

fn needs_hall_access(room: &PlacedRoom) -> bool {
    if room.name == "Master_Bathroom" || room.name == "Master_WIC" {
        return false;
    }
    matches!(
        room.kind,
        RoomKind::Bedroom | RoomKind::Bathroom | RoomKind::Laundry | RoomKind::Mudroom | RoomKind::Pantry
    )
}

struct Candidate {
    priority: i32,
    seg_len: f32,
    door: DoorPlacement,
    a_name: String,
    b_name: String,
}

impl Candidate {
    fn pair_key(&self) -> (String, String) {
        pair_key(&self.a_name, &self.b_name)
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn make_candidate(a: &PlacedRoom, b: &PlacedRoom, seg: &SharedSegment) -> Option<Candidate> {
    let seg_len = seg.length();
    if seg_len < 3.0 {
        return None;
    }
    if !should_have_door(a, b) {
        return None;
    }

    let mut width = door_width_for(a, b);
    if width > seg_len - 1.0 {
        width = width.min(seg_len - 0.5);
        if width < 2.0 {
            return None;
        }
    }

    // Center the door on the shared run.
    let inset = 0.5_f32.max((seg_len - width) / 2.0);
    let (dx, dy) = match seg.axis {
        Axis::X => (seg.x1 + inset, seg.y1),
        Axis::Y => (seg.x1, seg.y1 + inset),
    };

    let swing = if a.kind == RoomKind::Hallway || b.kind == RoomKind::Hallway {
        SwingDirection::Inward
    } else if a.area() <= b.area() {
        SwingDirection::Inward
    } else {
        SwingDirection::Outward
    };

    Some(Candidate {
        priority: door_priority(a, b),
        seg_len,
        door: DoorPlacement {
            name: format!("Door_{}_to_{}", a.name, b.name),
            room_a: a.name.clone(),
            room_b: b.name.clone(),
            x: round2(dx),
            y: round2(dy),
            width: round2(width),
            axis: seg.axis,
            swing,
            swing_clear: true,
        },
        a_name: a.name.clone(),
        b_name: b.name.clone(),
    })
}

/// Output of door selection: the doors plus how many were added purely
/// to repair connectivity.
pub struct DoorPlan {
    pub doors: Vec<DoorPlacement>,
    pub fallback_doors: usize,
}

struct Selection {
    doors: Vec<DoorPlacement>,
    selected: BTreeSet<(String, String)>,
    counts: BTreeMap<String, usize>,
    fallback_doors: usize,
}

impl Selection {
    fn new() -> Self {
        Selection {
            doors: Vec::new(),
            selected: BTreeSet::new(),
            counts: BTreeMap::new(),
            fallback_doors: 0,
        }
    }

    fn bump(&mut self, name: &str, hallway_names: &BTreeSet<String>) {
        if !hallway_names.contains(name) {
            *self.counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    fn can_add(
        &self,
        cand: &Candidate,
        hallway_names: &BTreeSet<String>,
        max_doors: &BTreeMap<String, usize>,
    ) -> bool {
        for name in [&cand.a_name, &cand.b_name] {
            if hallway_names.contains(name.as_str()) {
                continue;
            }
            let cap = max_doors.get(name.as_str()).copied().unwrap_or(1);
            if self.counts.get(name.as_str()).copied().unwrap_or(0) >= cap {
                return false;
            }
        }
        true
    }

    fn add(&mut self, cand: &Candidate, hallway_names: &BTreeSet<String>) {
        self.doors.push(cand.door.clone());
        self.selected.insert(cand.pair_key());
        let (a, b) = (cand.a_name.clone(), cand.b_name.clone());
        self.bump(&a, hallway_names);
        self.bump(&b, hallway_names);
    }
}

/// Select doors on shared walls.
pub fn plan_doors(rooms: &[PlacedRoom], hallways: &[HallwaySegment]) -> DoorPlan {
    let mut all_rects: Vec<PlacedRoom> = rooms.to_vec();
    all_rects.extend(hallway_pseudo_rooms(hallways));

    let mut candidates: Vec<Candidate> = Vec::new();
    for i in 0..all_rects.len() {
        for j in (i + 1)..all_rects.len() {
            let (a, b) = (&all_rects[i], &all_rects[j]);
            if let Some(seg) = find_shared_segment(&a.rect, &b.rect) {
                if let Some(cand) = make_candidate(a, b, &seg) {
                    candidates.push(cand);
                }
            }
        }
    }

    // Highest priority first, longest wall first, then name for a
    // stable total order.
    candidates.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.seg_len.total_cmp(&a.seg_len))
            .then_with(|| a.door.name.cmp(&b.door.name))
    });

    let hallway_names: BTreeSet<String> =
        (0..hallways.len()).map(|i| format!("Hallway_{i}")).collect();
    let max_doors: BTreeMap<String, usize> =
        rooms.iter().map(|r| (r.name.clone(), room_max_doors(r))).collect();

    let mut sel = Selection::new();

    // Pass 1: mandatory connections, exempt from per-room caps.
    for cand in &candidates {
        if cand.priority < 100 || sel.selected.contains(&cand.pair_key()) {
            continue;
        }
        sel.add(cand, &hallway_names);
    }

    // Pass 2: enclosed rooms get a hallway door if one is available.
    for room in rooms {
        if !needs_hall_access(room) {
            continue;
        }
        let already = sel.doors.iter().any(|d| {
            (d.room_a == room.name && hallway_names.contains(&d.room_b))
                || (d.room_b == room.name && hallway_names.contains(&d.room_a))
        });
        if already {
            continue;
        }
        let hall_cand = candidates.iter().find(|c| {
            !sel.selected.contains(&c.pair_key())
                && ((c.a_name == room.name && hallway_names.contains(&c.b_name))
                    || (c.b_name == room.name && hallway_names.contains(&c.a_name)))
        });
        if let Some(cand) = hall_cand {
            if cand.priority >= 60 && sel.can_add(cand, &hallway_names, &max_doors) {
                sel.add(cand, &hallway_names);
            }
        }
    }

    // Pass 3: high-value optional doors under per-room caps.
    for cand in &candidates {
        if sel.selected.contains(&cand.pair_key()) || cand.priority < 70 {
            continue;
        }
        if !sel.can_add(cand, &hallway_names, &max_doors) {
            continue;
        }
        sel.add(cand, &hallway_names);
    }

    // Pass 4: bridge doors until every room reaches circulation or no
    // usable candidate remains.
    let room_names: BTreeSet<String> = rooms.iter().map(|r| r.name.clone()).collect();
    loop {
        let mut connected: BTreeSet<String> = BTreeSet::new();
        for d in &sel.doors {
            if hallway_names.contains(&d.room_a) && room_names.contains(&d.room_b) {
                connected.insert(d.room_b.clone());
            }
            if hallway_names.contains(&d.room_b) && room_names.contains(&d.room_a) {
                connected.insert(d.room_a.clone());
            }
        }
        let mut grew = true;
        while grew {
            grew = false;
            for d in &sel.doors {
                if connected.contains(&d.room_a)
                    && room_names.contains(&d.room_b)
                    && !connected.contains(&d.room_b)
                {
                    connected.insert(d.room_b.clone());
                    grew = true;
                }
                if connected.contains(&d.room_b)
                    && room_names.contains(&d.room_a)
                    && !connected.contains(&d.room_a)
                {
                    connected.insert(d.room_a.clone());
                    grew = true;
                }
            }
        }

        let disconnected: BTreeSet<&String> =
            room_names.iter().filter(|n| !connected.contains(*n)).collect();
        if disconnected.is_empty() {
            break;
        }

        let bridge = candidates.iter().find(|c| {
            if sel.selected.contains(&c.pair_key()) {
                return false;
            }
            if !sel.can_add(c, &hallway_names, &max_doors) {
                return false;
            }
            let a_in = connected.contains(&c.a_name);
            let b_in = connected.contains(&c.b_name);
            let a_out = disconnected.contains(&c.a_name);
            let b_out = disconnected.contains(&c.b_name);
            (a_in && b_out) || (b_in && a_out)
        });

        match bridge {
            Some(cand) => {
                sel.add(cand, &hallway_names);
                sel.fallback_doors += 1;
            }
            None => break,
        }
    }

    DoorPlan {
        doors: sel.doors,
        fallback_doors: sel.fallback_doors,
    }
}

/// Bounding box of a quarter-circle swing arc hinged at the door
/// position, radius equal to the door width.
fn swing_arc(door: &DoorPlacement) -> (f32, f32, f32, f32) {
    let r = door.width;
    match door.axis {
        Axis::Y => match door.swing {
            SwingDirection::Inward => (door.x - r, door.y, door.x, door.y + r),
            SwingDirection::Outward => (door.x, door.y, door.x + r, door.y + r),
        },
        Axis::X => match door.swing {
            SwingDirection::Inward => (door.x, door.y - r, door.x + r, door.y),
            SwingDirection::Outward => (door.x, door.y, door.x + r, door.y + r),
        },
    }
}

fn arcs_overlap(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 < b.2 && a.2 > b.0 && a.1 < b.3 && a.3 > b.1
}

fn room_area_by_name(name: &str, rooms: &[PlacedRoom], hallways: &[HallwaySegment]) -> f32 {
    if let Some(r) = rooms.iter().find(|r| r.name == name) {
        return r.area();
    }
    for (i, h) in hallways.iter().enumerate() {
        if format!("Hallway_{i}") == name {
            return h.rect.width * h.rect.depth;
        }
    }
    0.0
}

/// Resolve colliding swing arcs by flipping the later door toward the
/// larger room; doors still colliding after the flip are flagged.
pub fn check_swing_clearances(
    doors: &mut [DoorPlacement],
    rooms: &[PlacedRoom],
    hallways: &[HallwaySegment],
) {
    for i in 0..doors.len() {
        let arc_a = swing_arc(&doors[i]);
        for j in (i + 1)..doors.len() {
            let arc_b = swing_arc(&doors[j]);
            if arcs_overlap(arc_a, arc_b) {
                let area_a = room_area_by_name(&doors[j].room_a, rooms, hallways);
                let area_b = room_area_by_name(&doors[j].room_b, rooms, hallways);
                doors[j].swing = if area_a >= area_b {
                    SwingDirection::Outward
                } else {
                    SwingDirection::Inward
                };
                if arcs_overlap(arc_a, swing_arc(&doors[j])) {
                    doors[j].swing_clear = false;
                }
            }
        }
    }
}

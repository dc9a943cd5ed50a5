//! Interior wall segment generation.
//!
//! Walks every pair of rooms (hallways included as pseudo-rooms),
//! emits a wall along each shared edge, skips exterior edges and
//! open-concept gaps, and splits walls around door openings.

use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::{find_shared_segment, is_exterior_edge, round1, round2, Axis};
use crate::plan::{hallway_pseudo_rooms, DoorPlacement, HallwaySegment, PlacedRoom, WallSegment};

fn split_wall_for_door(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    axis: Axis,
    door: &DoorPlacement,
    wall_idx: usize,
) -> Vec<WallSegment> {
    let mut segs = Vec::new();
    let dw = door.width;

    match axis {
        Axis::Y => {
            let dy = door.y;
            if dy - y1 > 0.5 {
                segs.push(WallSegment {
                    name: format!("IWall_{wall_idx}"),
                    start_x: round2(x1),
                    start_y: round2(y1),
                    end_x: round2(x1),
                    end_y: round2(dy),
                });
            }
            let after_y = dy + dw;
            if y2 - after_y > 0.5 {
                segs.push(WallSegment {
                    name: format!("IWall_{}", wall_idx + 1),
                    start_x: round2(x1),
                    start_y: round2(after_y),
                    end_x: round2(x1),
                    end_y: round2(y2),
                });
            }
        }
        Axis::X => {
            let dx = door.x;
            if dx - x1 > 0.5 {
                segs.push(WallSegment {
                    name: format!("IWall_{wall_idx}"),
                    start_x: round2(x1),
                    start_y: round2(y1),
                    end_x: round2(dx),
                    end_y: round2(y1),
                });
            }
            let after_x = dx + dw;
            if x2 - after_x > 0.5 {
                segs.push(WallSegment {
                    name: format!("IWall_{}", wall_idx + 1),
                    start_x: round2(after_x),
                    start_y: round2(y1),
                    end_x: round2(x2),
                    end_y: round2(y1),
                });
            }
        }
    }

    segs
}

fn edge_key(x1: f32, y1: f32, x2: f32, y2: f32) -> (i32, i32, i32, i32) {
    let q = |v: f32| (round1(v) * 10.0).round() as i32;
    (q(x1.min(x2)), q(y1.min(y2)), q(x1.max(x2)), q(y1.max(y2)))
}

/// Generate interior walls for the plan.
pub fn generate_walls(
    rooms: &[PlacedRoom],
    hallways: &[HallwaySegment],
    doors: &[DoorPlacement],
    building_length: f32,
    building_width: f32,
    open_concept: bool,
) -> Vec<WallSegment> {
    let mut walls = Vec::new();
    let mut wall_idx = 0usize;

    let mut all_rects: Vec<PlacedRoom> = rooms.to_vec();
    all_rects.extend(hallway_pseudo_rooms(hallways));

    // Later doors win when a pair somehow has two.
    let mut door_pairs: BTreeMap<(String, String), &DoorPlacement> = BTreeMap::new();
    for door in doors {
        let key = if door.room_a <= door.room_b {
            (door.room_a.clone(), door.room_b.clone())
        } else {
            (door.room_b.clone(), door.room_a.clone())
        };
        door_pairs.insert(key, door);
    }

    let mut seen_edges: BTreeSet<(i32, i32, i32, i32)> = BTreeSet::new();

    for i in 0..all_rects.len() {
        for j in (i + 1)..all_rects.len() {
            let (ra, rb) = (&all_rects[i], &all_rects[j]);
            let Some(seg) = find_shared_segment(&ra.rect, &rb.rect) else {
                continue;
            };

            if is_exterior_edge(seg.x1, seg.y1, seg.x2, seg.y2, building_length, building_width) {
                continue;
            }
            if open_concept && ra.kind.is_open_flow() && rb.kind.is_open_flow() {
                continue;
            }

            let key = edge_key(seg.x1, seg.y1, seg.x2, seg.y2);
            if !seen_edges.insert(key) {
                continue;
            }

            let pair = if ra.name <= rb.name {
                (ra.name.clone(), rb.name.clone())
            } else {
                (rb.name.clone(), ra.name.clone())
            };

            match door_pairs.get(&pair) {
                None => {
                    walls.push(WallSegment {
                        name: format!("IWall_{wall_idx}"),
                        start_x: round2(seg.x1),
                        start_y: round2(seg.y1),
                        end_x: round2(seg.x2),
                        end_y: round2(seg.y2),
                    });
                    wall_idx += 1;
                }
                Some(door) => {
                    let segs =
                        split_wall_for_door(seg.x1, seg.y1, seg.x2, seg.y2, seg.axis, door, wall_idx);
                    wall_idx += segs.len();
                    walls.extend(segs);
                }
            }
        }
    }

    walls
}

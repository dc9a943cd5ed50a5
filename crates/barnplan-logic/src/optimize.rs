//! Layout refinement by hill-climbing room swaps.
//!
//! Two passes run after packing: an adjacency pass that rewards
//! mandatory pairs sharing a wall and punishes prohibited contact, and
//! a plumbing pass that pulls wet rooms toward a common stack.
//! Both swap whole rects between similarly sized same-zone rooms and
//! revert any swap that does not raise the score.

use crate::constants::{ADJACENCY_SWAP_CAP, PLUMBING_SWAP_CAP};
use crate::adjacency::{relation_between, Relation};
use crate::geometry::shared_wall_length;
use crate::plan::{PlacedRoom, RoomKind};

fn swap_rects(rooms: &mut [PlacedRoom], i: usize, j: usize) {
    let tmp = rooms[i].rect;
    rooms[i].rect = rooms[j].rect;
    rooms[j].rect = tmp;
}

/// Adjacency quality of the whole layout. Higher is better.
pub fn adjacency_score(rooms: &[PlacedRoom]) -> f32 {
    let mut score = 0.0;
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            let shared = shared_wall_length(&a.rect, &b.rect);
            match relation_between(&a.name, a.kind, &b.name, b.kind) {
                Some(Relation::Mandatory) => score += if shared >= 3.0 { 10.0 } else { -20.0 },
                Some(Relation::Strong) => score += if shared >= 3.0 { 3.0 } else { 0.0 },
                Some(Relation::Prohibited) => score += if shared >= 1.0 { -50.0 } else { 0.0 },
                None => {}
            }
            if a.is_wet && b.is_wet && shared >= 1.0 {
                score += 2.0;
            }
        }
    }
    score
}

/// Hill-climb room swaps until the adjacency score stops improving.
pub fn improve_adjacency(rooms: &mut [PlacedRoom]) {
    let mut best_score = adjacency_score(rooms);

    for _ in 0..ADJACENCY_SWAP_CAP {
        let mut improved = false;
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if rooms[i].zone != rooms[j].zone {
                    continue;
                }
                let area_a = rooms[i].area();
                let area_b = rooms[j].area();
                if area_a == 0.0 || area_b == 0.0 {
                    continue;
                }
                // Swapping very different footprints would distort both.
                if area_a.max(area_b) / area_a.min(area_b) > 2.0 {
                    continue;
                }

                swap_rects(rooms, i, j);
                let new_score = adjacency_score(rooms);
                if new_score > best_score {
                    best_score = new_score;
                    improved = true;
                } else {
                    swap_rects(rooms, i, j);
                }
            }
        }
        if !improved {
            break;
        }
    }
}

/// Plumbing efficiency of the layout. Higher means shorter runs:
/// wet rooms near their shared centroid, back-to-back bathrooms, and
/// the kitchen close to a bathroom wet wall.
pub fn plumbing_score(rooms: &[PlacedRoom]) -> f32 {
    let wet: Vec<&PlacedRoom> = rooms.iter().filter(|r| r.is_wet).collect();
    if wet.len() < 2 {
        return 0.0;
    }

    let n = wet.len() as f32;
    let cx: f32 = wet.iter().map(|r| r.rect.center().0).sum::<f32>() / n;
    let cy: f32 = wet.iter().map(|r| r.rect.center().1).sum::<f32>() / n;

    let mut score = 0.0;

    // -5 per 50ft of Manhattan distance from the centroid.
    for r in &wet {
        let (rcx, rcy) = r.rect.center();
        let dist = (rcx - cx).abs() + (rcy - cy).abs();
        score -= dist / 50.0 * 5.0;
    }

    let bathrooms: Vec<&&PlacedRoom> = wet.iter().filter(|r| r.kind == RoomKind::Bathroom).collect();
    for (i, ba) in bathrooms.iter().enumerate() {
        for bb in &bathrooms[i + 1..] {
            let shared = shared_wall_length(&ba.rect, &bb.rect);
            if shared >= 5.0 {
                score += 5.0;
            } else if shared >= 3.0 {
                score += 3.0;
            }
        }
    }

    for kit in wet.iter().filter(|r| r.kind == RoomKind::Kitchen) {
        let (kx, ky) = kit.rect.center();
        for ba in &bathrooms {
            let (bx, by) = ba.rect.center();
            let manhattan = (kx - bx).abs() + (ky - by).abs();
            if manhattan <= 10.0 {
                score += 3.0;
            } else if manhattan <= 15.0 {
                score += 1.0;
            }
        }
    }

    for (i, wa) in wet.iter().enumerate() {
        for wb in &wet[i + 1..] {
            if shared_wall_length(&wa.rect, &wb.rect) >= 3.0 {
                score += 2.0;
            }
        }
    }

    score
}

/// Hill-climb wet-room swaps toward a tighter plumbing cluster.
pub fn cluster_plumbing(rooms: &mut [PlacedRoom]) {
    if rooms.iter().filter(|r| r.is_wet).count() < 2 {
        return;
    }
    let mut best_score = plumbing_score(rooms);

    for _ in 0..PLUMBING_SWAP_CAP {
        let mut improved = false;
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if !(rooms[i].is_wet && rooms[j].is_wet) {
                    continue;
                }
                if rooms[i].zone != rooms[j].zone {
                    continue;
                }
                let area_a = rooms[i].area();
                let area_b = rooms[j].area();
                if area_a == 0.0 || area_b == 0.0 {
                    continue;
                }
                if area_a.max(area_b) / area_a.min(area_b) > 2.5 {
                    continue;
                }

                swap_rects(rooms, i, j);
                let new_score = plumbing_score(rooms);
                if new_score > best_score {
                    best_score = new_score;
                    improved = true;
                } else {
                    swap_rects(rooms, i, j);
                }
            }
        }
        if !improved {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CEILING_HEIGHT;
    use crate::geometry::Rect;
    use crate::plan::ZoneKind;

    fn room(name: &str, kind: RoomKind, zone: ZoneKind, rect: Rect, is_wet: bool) -> PlacedRoom {
        PlacedRoom {
            name: name.to_string(),
            kind,
            zone,
            rect,
            height: CEILING_HEIGHT,
            is_wet,
            fixture: None,
        }
    }

    #[test]
    fn adjacent_mandatory_pair_scores_positive() {
        let rooms = vec![
            room("Great_Room", RoomKind::GreatRoom, ZoneKind::Center, Rect::new(0.0, 0.0, 20.0, 20.0), false),
            room("Kitchen", RoomKind::Kitchen, ZoneKind::Center, Rect::new(20.0, 0.0, 12.0, 15.0), true),
        ];
        assert!(adjacency_score(&rooms) >= 10.0);
    }

    #[test]
    fn separated_mandatory_pair_scores_negative() {
        let rooms = vec![
            room("Great_Room", RoomKind::GreatRoom, ZoneKind::Center, Rect::new(0.0, 0.0, 20.0, 20.0), false),
            room("Kitchen", RoomKind::Kitchen, ZoneKind::Center, Rect::new(40.0, 0.0, 12.0, 15.0), true),
        ];
        assert!(adjacency_score(&rooms) <= -20.0);
    }

    #[test]
    fn prohibited_contact_penalized() {
        let rooms = vec![
            room("Bedroom_2", RoomKind::Bedroom, ZoneKind::Center, Rect::new(0.0, 0.0, 12.0, 12.0), false),
            room("Kitchen", RoomKind::Kitchen, ZoneKind::Center, Rect::new(12.0, 0.0, 12.0, 15.0), true),
        ];
        assert!(adjacency_score(&rooms) < 0.0, "bedroom against kitchen should cost points");
    }

    #[test]
    fn improve_adjacency_reunites_kitchen_and_great_room() {
        // Kitchen stranded at the far end; pantry sits next to the
        // great room. Swapping them fixes both mandatory relations.
        let mut rooms = vec![
            room("Great_Room", RoomKind::GreatRoom, ZoneKind::Center, Rect::new(0.0, 0.0, 14.0, 20.0), false),
            room("Pantry", RoomKind::Pantry, ZoneKind::Center, Rect::new(14.0, 0.0, 12.0, 14.0), false),
            room("Kitchen", RoomKind::Kitchen, ZoneKind::Center, Rect::new(14.0, 14.0, 12.0, 14.0), true),
        ];
        let before = adjacency_score(&rooms);
        improve_adjacency(&mut rooms);
        let after = adjacency_score(&rooms);
        assert!(after >= before, "hill climb never lowers the score");
        let gr = rooms.iter().find(|r| r.name == "Great_Room").unwrap();
        let kit = rooms.iter().find(|r| r.name == "Kitchen").unwrap();
        assert!(
            shared_wall_length(&gr.rect, &kit.rect) >= 3.0,
            "kitchen should end up against the great room"
        );
    }

    #[test]
    fn improve_adjacency_skips_cross_zone_swaps() {
        let mut rooms = vec![
            room("Great_Room", RoomKind::GreatRoom, ZoneKind::Center, Rect::new(0.0, 0.0, 14.0, 20.0), false),
            room("Bedroom_2", RoomKind::Bedroom, ZoneKind::PrivateSecondary, Rect::new(30.0, 0.0, 14.0, 18.0), false),
        ];
        let before = (rooms[0].rect, rooms[1].rect);
        improve_adjacency(&mut rooms);
        assert_eq!(rooms[0].rect.x, before.0.x);
        assert_eq!(rooms[1].rect.x, before.1.x);
    }

    #[test]
    fn plumbing_score_zero_below_two_wet_rooms() {
        let rooms = vec![
            room("Kitchen", RoomKind::Kitchen, ZoneKind::Center, Rect::new(0.0, 0.0, 12.0, 15.0), true),
        ];
        assert_eq!(plumbing_score(&rooms), 0.0);
    }

    #[test]
    fn back_to_back_bathrooms_beat_separated_ones() {
        let together = vec![
            room("Bathroom_2", RoomKind::Bathroom, ZoneKind::PrivateSecondary, Rect::new(0.0, 0.0, 6.0, 8.0), true),
            room("Bathroom_3", RoomKind::Bathroom, ZoneKind::PrivateSecondary, Rect::new(6.0, 0.0, 6.0, 8.0), true),
        ];
        let apart = vec![
            room("Bathroom_2", RoomKind::Bathroom, ZoneKind::PrivateSecondary, Rect::new(0.0, 0.0, 6.0, 8.0), true),
            room("Bathroom_3", RoomKind::Bathroom, ZoneKind::PrivateSecondary, Rect::new(30.0, 0.0, 6.0, 8.0), true),
        ];
        assert!(plumbing_score(&together) > plumbing_score(&apart));
    }

    #[test]
    fn cluster_plumbing_only_moves_wet_rooms() {
        let mut rooms = vec![
            room("Kitchen", RoomKind::Kitchen, ZoneKind::Center, Rect::new(0.0, 0.0, 12.0, 14.0), true),
            room("Great_Room", RoomKind::GreatRoom, ZoneKind::Center, Rect::new(12.0, 0.0, 18.0, 20.0), false),
            room("Laundry", RoomKind::Laundry, ZoneKind::Center, Rect::new(30.0, 0.0, 8.0, 10.0), true),
        ];
        let gr_before = rooms[1].rect;
        cluster_plumbing(&mut rooms);
        assert_eq!(rooms[1].rect.x, gr_before.x, "dry rooms never move");
        assert_eq!(rooms[1].rect.width, gr_before.width);
    }
}

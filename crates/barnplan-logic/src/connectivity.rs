//! Room reachability analysis.
//!
//! Flood-fill from the hallways: a room is reachable if it shares at
//! least a foot of wall with a hallway, or with an already reachable
//! room it would get a door to. Unreachable rooms are reported, not
//! fixed here; the door planner has its own connectivity repair pass.

use std::collections::BTreeSet;

use crate::doors::should_have_door;
use crate::geometry::shared_wall_length;
use crate::plan::{hallway_pseudo_rooms, HallwaySegment, PlacedRoom};

/// Names of all rooms that can reach main circulation.
pub fn reachable_rooms(rooms: &[PlacedRoom], hallways: &[HallwaySegment]) -> BTreeSet<String> {
    let mut connected: BTreeSet<String> = BTreeSet::new();
    if hallways.is_empty() {
        return connected;
    }

    let hall_rects = hallway_pseudo_rooms(hallways);

    // Seed: rooms directly touching a hallway.
    for room in rooms {
        if hall_rects.iter().any(|h| shared_wall_length(&room.rect, &h.rect) >= 1.0) {
            connected.insert(room.name.clone());
        }
    }

    // Grow through rooms that would get a connecting door.
    let mut changed = true;
    while changed {
        changed = false;
        for room in rooms {
            if connected.contains(&room.name) {
                continue;
            }
            for other in rooms {
                if !connected.contains(&other.name) {
                    continue;
                }
                if shared_wall_length(&room.rect, &other.rect) >= 1.0
                    && should_have_door(room, other)
                {
                    connected.insert(room.name.clone());
                    changed = true;
                    break;
                }
            }
        }
    }

    connected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CEILING_HEIGHT;
    use crate::geometry::Rect;
    use crate::plan::{Orientation, RoomKind, ZoneKind};

    fn room(name: &str, kind: RoomKind, rect: Rect) -> PlacedRoom {
        PlacedRoom {
            name: name.to_string(),
            kind,
            zone: ZoneKind::Center,
            rect,
            height: CEILING_HEIGHT,
            is_wet: false,
            fixture: None,
        }
    }

    fn hallway(x: f32, depth: f32) -> HallwaySegment {
        HallwaySegment {
            rect: Rect::new(x, 0.0, 3.5, depth),
            orientation: Orientation::Vertical,
        }
    }

    #[test]
    fn no_hallways_means_nothing_reachable() {
        let rooms = vec![room("Great_Room", RoomKind::GreatRoom, Rect::new(0.0, 0.0, 20.0, 20.0))];
        assert!(reachable_rooms(&rooms, &[]).is_empty());
    }

    #[test]
    fn room_against_hallway_is_reachable() {
        let rooms = vec![room("Bedroom_2", RoomKind::Bedroom, Rect::new(0.0, 0.0, 12.0, 12.0))];
        let halls = vec![hallway(12.0, 12.0)];
        let reachable = reachable_rooms(&rooms, &halls);
        assert!(reachable.contains("Bedroom_2"));
    }

    #[test]
    fn reachability_spreads_through_door_pairs() {
        // Master_Bathroom touches no hallway but connects through the
        // master bedroom, which does.
        let rooms = vec![
            room("Master_Bedroom", RoomKind::Bedroom, Rect::new(0.0, 0.0, 14.0, 16.0)),
            room("Master_Bathroom", RoomKind::Bathroom, Rect::new(0.0, 16.0, 8.0, 10.0)),
        ];
        let halls = vec![hallway(14.0, 16.0)];
        let reachable = reachable_rooms(&rooms, &halls);
        assert!(reachable.contains("Master_Bedroom"));
        assert!(reachable.contains("Master_Bathroom"));
    }

    #[test]
    fn isolated_room_stays_unreachable() {
        let rooms = vec![
            room("Bedroom_2", RoomKind::Bedroom, Rect::new(0.0, 0.0, 12.0, 12.0)),
            room("Bedroom_3", RoomKind::Bedroom, Rect::new(40.0, 40.0, 12.0, 12.0)),
        ];
        let halls = vec![hallway(12.0, 12.0)];
        let reachable = reachable_rooms(&rooms, &halls);
        assert!(reachable.contains("Bedroom_2"));
        assert!(!reachable.contains("Bedroom_3"));
    }

    #[test]
    fn open_flow_neighbors_do_not_propagate() {
        // Great room and dining room share space, not a door, so a
        // dining room with no other connection is unreachable.
        let rooms = vec![
            room("Great_Room", RoomKind::GreatRoom, Rect::new(0.0, 0.0, 20.0, 20.0)),
            room("Dining_Room", RoomKind::DiningRoom, Rect::new(0.0, 20.0, 12.0, 12.0)),
        ];
        let halls = vec![hallway(20.0, 20.0)];
        let reachable = reachable_rooms(&rooms, &halls);
        assert!(reachable.contains("Great_Room"));
        assert!(!reachable.contains("Dining_Room"));
    }
}

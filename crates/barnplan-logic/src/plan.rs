//! Floor plan data model.
//!
//! Everything here maps directly to the downstream builder contract:
//! each [`PlacedRoom`] becomes a room-creation call, each [`WallSegment`]
//! a partition-wall call, and [`DoorPlacement`] records where walls are
//! cut. [`FloorPlan`] is the sole output of the engine; its metadata
//! carries every validation finding instead of raising errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::CEILING_HEIGHT;
use crate::geometry::{Axis, Rect};

/// Closed set of room types the engine can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Bedroom,
    Bathroom,
    Closet,
    GreatRoom,
    Kitchen,
    DiningRoom,
    Laundry,
    Mudroom,
    Pantry,
    Hallway,
}

impl RoomKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomKind::Bedroom => "bedroom",
            RoomKind::Bathroom => "bathroom",
            RoomKind::Closet => "closet",
            RoomKind::GreatRoom => "great_room",
            RoomKind::Kitchen => "kitchen",
            RoomKind::DiningRoom => "dining_room",
            RoomKind::Laundry => "laundry",
            RoomKind::Mudroom => "mudroom",
            RoomKind::Pantry => "pantry",
            RoomKind::Hallway => "hallway",
        }
    }

    /// Open-flow public rooms get no dividing wall or door between them.
    pub fn is_open_flow(self) -> bool {
        matches!(self, RoomKind::GreatRoom | RoomKind::Kitchen | RoomKind::DiningRoom)
    }
}

/// Planning zone a room belongs to.
///
/// Programs are written in terms of public/service/private zones; the
/// zone allocator merges public and service into a single center strip
/// before packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Public,
    Service,
    PrivateMaster,
    PrivateSecondary,
    Center,
    Circulation,
}

impl ZoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Public => "public",
            ZoneKind::Service => "service",
            ZoneKind::PrivateMaster => "private_master",
            ZoneKind::PrivateSecondary => "private_secondary",
            ZoneKind::Center => "center",
            ZoneKind::Circulation => "circulation",
        }
    }
}

/// Fixture package a wet room carries into the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    KitchenL,
    BathroomTub,
    BathroomShower,
}

/// A room the program requests, before placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub kind: RoomKind,
    pub zone: ZoneKind,
    /// Smallest acceptable area in square feet.
    pub min_area: f32,
    /// Area the packer aims for in square feet.
    pub target_area: f32,
    pub min_width: f32,
    pub max_aspect_ratio: f32,
    pub is_wet: bool,
    pub fixture: Option<FixtureKind>,
    /// Names of rooms this one must share a wall with.
    pub adjacency_required: Vec<String>,
    /// Names of rooms this one must not touch.
    pub adjacency_prohibited: Vec<String>,
}

/// A room with final coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub name: String,
    pub kind: RoomKind,
    pub zone: ZoneKind,
    pub rect: Rect,
    /// Ceiling height in feet.
    pub height: f32,
    pub is_wet: bool,
    pub fixture: Option<FixtureKind>,
}

impl PlacedRoom {
    pub fn area(&self) -> f32 {
        self.rect.area()
    }
}

/// Orientation of a hallway strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A circulation corridor separating zone strips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallwaySegment {
    pub rect: Rect,
    pub orientation: Orientation,
}

/// Which way a door leaf swings relative to the wall it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    /// Into the smaller adjoining room (never into a hallway).
    Inward,
    Outward,
}

/// An opening between two rooms or a room and a hallway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorPlacement {
    pub name: String,
    pub room_a: String,
    pub room_b: String,
    pub x: f32,
    pub y: f32,
    /// Clear opening width in feet.
    pub width: f32,
    pub axis: Axis,
    pub swing: SwingDirection,
    /// False when the swing arc could not be de-conflicted.
    pub swing_clear: bool,
}

/// A straight interior partition run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub name: String,
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

/// Overall plan health as judged by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    Good,
    Warning,
}

/// Specific findings that downgrade a plan to `warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityIssue {
    HighDoorDensity,
    HighCirculationRatio,
    UnreachableRooms,
    ManyConnectivityFallbackDoors,
}

/// Livability metrics and their pass/fail summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub status: QualityStatus,
    pub issues: Vec<QualityIssue>,
    pub door_count: usize,
    pub doors_per_room: f32,
    pub hallway_ratio: f32,
    pub connectivity_fallback_doors: usize,
}

/// Validation findings and derived metrics for a generated plan.
///
/// The engine never rejects a degenerate layout; everything a caller
/// might retry on is recorded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub zone_percentages: BTreeMap<String, f32>,
    pub overlapping_rooms: Vec<(String, String)>,
    pub out_of_bounds_rooms: Vec<String>,
    pub warnings: Vec<String>,
    pub room_count: usize,
    pub hallway_count: usize,
    pub total_room_area: f32,
    pub total_hallway_area: f32,
    pub building_footprint: f32,
    pub fill_ratio: f32,
    pub plumbing_score: f32,
    pub wet_room_cluster_radius: f32,
    pub connected_rooms: usize,
    pub unreachable_rooms: Vec<String>,
    pub quality: QualityReport,
}

/// Complete layout result — the sole output of [`crate::engine::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// Building length in feet (X axis).
    pub building_length: f32,
    /// Building width in feet (Y axis).
    pub building_width: f32,
    pub rooms: Vec<PlacedRoom>,
    pub hallways: Vec<HallwaySegment>,
    pub doors: Vec<DoorPlacement>,
    pub walls: Vec<WallSegment>,
    pub metadata: PlanMetadata,
}

/// Hallways participate in door planning, wall generation, and
/// connectivity as pseudo-rooms named `Hallway_{i}`.
pub fn hallway_pseudo_rooms(hallways: &[HallwaySegment]) -> Vec<PlacedRoom> {
    hallways
        .iter()
        .enumerate()
        .map(|(i, h)| PlacedRoom {
            name: format!("Hallway_{i}"),
            kind: RoomKind::Hallway,
            zone: ZoneKind::Circulation,
            rect: h.rect,
            height: CEILING_HEIGHT,
            is_wet: false,
            fixture: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_kind_strings() {
        assert_eq!(RoomKind::GreatRoom.as_str(), "great_room");
        assert_eq!(RoomKind::DiningRoom.as_str(), "dining_room");
        assert_eq!(RoomKind::Mudroom.as_str(), "mudroom");
    }

    #[test]
    fn open_flow_membership() {
        assert!(RoomKind::GreatRoom.is_open_flow());
        assert!(RoomKind::Kitchen.is_open_flow());
        assert!(RoomKind::DiningRoom.is_open_flow());
        assert!(!RoomKind::Bedroom.is_open_flow());
        assert!(!RoomKind::Pantry.is_open_flow());
    }

    #[test]
    fn hallway_pseudo_room_naming() {
        let halls = vec![
            HallwaySegment {
                rect: Rect::new(14.0, 0.0, 3.5, 40.0),
                orientation: Orientation::Vertical,
            },
            HallwaySegment {
                rect: Rect::new(40.0, 0.0, 3.5, 40.0),
                orientation: Orientation::Vertical,
            },
        ];
        let rooms = hallway_pseudo_rooms(&halls);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, "Hallway_0");
        assert_eq!(rooms[1].name, "Hallway_1");
        assert_eq!(rooms[0].kind, RoomKind::Hallway);
        assert_eq!(rooms[0].zone, ZoneKind::Circulation);
    }
}

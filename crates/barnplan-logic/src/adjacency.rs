//! Room adjacency rules.
//!
//! Relations are keyed by a canonically ordered pair — specific room
//! names first, then room kinds — so the lookup is a single match
//! instead of a scan over an unordered rule table.

use crate::plan::RoomKind;

/// Strength of an adjacency relationship between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Must share a wall of at least 3 ft.
    Mandatory,
    /// Rewarded when satisfied, not penalized otherwise.
    Strong,
    /// Any contact is penalized.
    Prohibited,
}

/// Look up the relation between two rooms, by name first (more
/// specific), then by kind. Returns `None` for unrelated pairs.
pub fn relation_between(
    a_name: &str,
    a_kind: RoomKind,
    b_name: &str,
    b_kind: RoomKind,
) -> Option<Relation> {
    let (n1, n2) = if a_name <= b_name { (a_name, b_name) } else { (b_name, a_name) };
    match (n1, n2) {
        ("Great_Room", "Kitchen")
        | ("Kitchen", "Pantry")
        | ("Master_Bathroom", "Master_Bedroom")
        | ("Dining_Room", "Kitchen")
        | ("Dining_Room", "Great_Room") => return Some(Relation::Mandatory),
        ("Kitchen", "Laundry") | ("Kitchen", "Mudroom") | ("Laundry", "Mudroom") => {
            return Some(Relation::Strong)
        }
        _ => {}
    }

    use RoomKind::*;
    let (k1, k2) = if a_kind <= b_kind { (a_kind, b_kind) } else { (b_kind, a_kind) };
    match (k1, k2) {
        (Bedroom, Kitchen) | (Bathroom, Kitchen) | (Bedroom, DiningRoom) => {
            Some(Relation::Prohibited)
        }
        _ => None,
    }
}

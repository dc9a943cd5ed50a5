//! Axis-aligned rectangle primitives shared by every layout phase.
//!
//! Pure functions over plain value types — no layout state. All
//! coordinates are in feet with the origin at the building's front-left
//! corner, X along the building length and Y along the width.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SHARED_RUN, WALL_TOLERANCE};

/// Axis a wall or door opening runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// An axis-aligned rectangle in plan coordinates (feet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub depth: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, depth: f32) -> Self {
        Self { x, y, width, depth }
    }

    pub fn area(&self) -> f32 {
        self.width * self.depth
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the back edge.
    pub fn top(&self) -> f32 {
        self.y + self.depth
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.depth / 2.0)
    }

    /// Larger of width:depth and depth:width.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width <= 0.0 || self.depth <= 0.0 {
            return f32::INFINITY;
        }
        (self.width / self.depth).max(self.depth / self.width)
    }
}

/// Round to 2 decimals (hundredths of a foot).
pub fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Round to 1 decimal (tenths of a foot).
pub fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

/// Length of the wall shared between two axis-aligned rectangles.
///
/// Two rectangles share a wall when one's edge coincides with the
/// other's opposite edge within [`WALL_TOLERANCE`]; the returned value
/// is the overlap of the touching edges, or 0 when they do not touch.
pub fn shared_wall_length(a: &Rect, b: &Rect) -> f32 {
    // Vertical shared wall: a-right against b-left, or b-right against a-left.
    if (a.right() - b.x).abs() < WALL_TOLERANCE || (b.right() - a.x).abs() < WALL_TOLERANCE {
        let oy1 = a.y.max(b.y);
        let oy2 = a.top().min(b.top());
        return (oy2 - oy1).max(0.0);
    }

    // Horizontal shared wall: a-back against b-front, or b-back against a-front.
    if (a.top() - b.y).abs() < WALL_TOLERANCE || (b.top() - a.y).abs() < WALL_TOLERANCE {
        let ox1 = a.x.max(b.x);
        let ox2 = a.right().min(b.right());
        return (ox2 - ox1).max(0.0);
    }

    0.0
}

/// A straight shared boundary between two rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub axis: Axis,
}

impl SharedSegment {
    pub fn length(&self) -> f32 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// Find the shared wall segment between two rectangles, if it is at
/// least [`MIN_SHARED_RUN`] long.
pub fn find_shared_segment(a: &Rect, b: &Rect) -> Option<SharedSegment> {
    // a-right touching b-left
    if (a.right() - b.x).abs() < WALL_TOLERANCE {
        let oy1 = a.y.max(b.y);
        let oy2 = a.top().min(b.top());
        if oy2 - oy1 >= MIN_SHARED_RUN {
            let x = a.right();
            return Some(SharedSegment { x1: x, y1: oy1, x2: x, y2: oy2, axis: Axis::Y });
        }
    }

    // b-right touching a-left
    if (b.right() - a.x).abs() < WALL_TOLERANCE {
        let oy1 = a.y.max(b.y);
        let oy2 = a.top().min(b.top());
        if oy2 - oy1 >= MIN_SHARED_RUN {
            let x = a.x;
            return Some(SharedSegment { x1: x, y1: oy1, x2: x, y2: oy2, axis: Axis::Y });
        }
    }

    // a-back touching b-front
    if (a.top() - b.y).abs() < WALL_TOLERANCE {
        let ox1 = a.x.max(b.x);
        let ox2 = a.right().min(b.right());
        if ox2 - ox1 >= MIN_SHARED_RUN {
            let y = a.top();
            return Some(SharedSegment { x1: ox1, y1: y, x2: ox2, y2: y, axis: Axis::X });
        }
    }

    // b-back touching a-front
    if (b.top() - a.y).abs() < WALL_TOLERANCE {
        let ox1 = a.x.max(b.x);
        let ox2 = a.right().min(b.right());
        if ox2 - ox1 >= MIN_SHARED_RUN {
            let y = a.y;
            return Some(SharedSegment { x1: ox1, y1: y, x2: ox2, y2: y, axis: Axis::X });
        }
    }

    None
}

/// Whether a wall segment lies on the building's exterior boundary.
pub fn is_exterior_edge(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    building_length: f32,
    building_width: f32,
) -> bool {
    let tol = WALL_TOLERANCE;
    // Left wall (x ≈ 0)
    if x1.abs() < tol && x2.abs() < tol {
        return true;
    }
    // Right wall (x ≈ building_length)
    if (x1 - building_length).abs() < tol && (x2 - building_length).abs() < tol {
        return true;
    }
    // Front wall (y ≈ 0)
    if y1.abs() < tol && y2.abs() < tol {
        return true;
    }
    // Back wall (y ≈ building_width)
    if (y1 - building_width).abs() < tol && (y2 - building_width).abs() < tol {
        return true;
    }
    false
}

/// AABB intersection test with the interiors shrunk by `tol` on each side.
pub fn rects_overlap(a: &Rect, b: &Rect, tol: f32) -> bool {
    a.x < b.right() - tol
        && a.right() > b.x + tol
        && a.y < b.top() - tol
        && a.top() > b.y + tol
}

//! Shared layout constants.
//!
//! Dimensions are in feet throughout the crate. These values encode the
//! fixed architectural assumptions of the engine: corridor width, ceiling
//! height, geometric tolerances, and the hill-climb iteration caps.

/// Width of every circulation hallway strip.
pub const HALLWAY_WIDTH: f32 = 3.5;

/// Ceiling height applied to every placed room.
pub const CEILING_HEIGHT: f32 = 9.0;

/// Tolerance for treating two wall coordinates as touching.
pub const WALL_TOLERANCE: f32 = 0.5;

/// Minimum shared-wall run that can carry a door or wall segment.
pub const MIN_SHARED_RUN: f32 = 3.0;

/// Fraction of the footprint the room program targets; the remainder is
/// left for hallways and wall thickness.
pub const TARGET_FILL: f32 = 0.88;

/// Aspect ratio beyond which treemap output is reshaped toward 2:1.
pub const MAX_ASPECT: f32 = 2.5;

/// Full-pass cap for the adjacency hill-climb.
pub const ADJACENCY_SWAP_CAP: usize = 100;

/// Full-pass cap for the plumbing-clustering hill-climb.
pub const PLUMBING_SWAP_CAP: usize = 60;

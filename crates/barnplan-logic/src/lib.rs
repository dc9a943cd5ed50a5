//! Pure floor plan layout engine for BarnPlan.
//!
//! This crate turns a room program (bedrooms, bathrooms, options) and
//! a rectangular building shell into a complete residential floor plan:
//! rooms, hallways, doors, and interior walls, plus validation
//! metadata. Functions take plain data and return results; there is no
//! CAD, rendering, or I/O dependency, so the engine runs the same from
//! a CLI tool, a server, or tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Mandatory/strong/prohibited room adjacency rules |
//! | [`connectivity`] | Flood-fill reachability from hallways |
//! | [`constants`] | Shared dimensions and iteration caps |
//! | [`doors`] | Four-pass door selection and swing clearance |
//! | [`engine`] | `generate`: the full layout pipeline |
//! | [`geometry`] | Rect primitives, shared walls, exterior edges |
//! | [`optimize`] | Adjacency and plumbing hill-climbs |
//! | [`packing`] | Squarified treemap and zone-specific packers |
//! | [`plan`] | Output data model (rooms, doors, walls, metadata) |
//! | [`program`] | Room templates, overrides, and target scaling |
//! | [`validate`] | Overlap/bounds checks and the quality report |
//! | [`walls`] | Interior wall segments split around doors |
//! | [`zones`] | Split-bedroom zone strips and hallway placement |

pub mod adjacency;
pub mod connectivity;
pub mod constants;
pub mod doors;
pub mod engine;
pub mod geometry;
pub mod optimize;
pub mod packing;
pub mod plan;
pub mod program;
pub mod validate;
pub mod walls;
pub mod zones;

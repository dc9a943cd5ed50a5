//! Zone strip allocation.
//!
//! Splits the building into vertical strips along the X axis using the
//! split-bedroom pattern:
//!
//! ```text
//! [Master wing | Hall | Public+Service center | Hall | Secondary wing]
//! ```
//!
//! Strip widths come from summed zone target areas divided by building
//! width, clamped to minimums so wings stay usable, then normalized to
//! the length left over after hallways.

use crate::constants::HALLWAY_WIDTH;
use crate::geometry::{round1, round2, Rect};
use crate::plan::{HallwaySegment, Orientation, RoomSpec, ZoneKind};

/// Result of strip allocation: zone bounding boxes left to right, plus
/// the vertical hallways separating the wings from the center.
pub struct ZonePlan {
    pub strips: Vec<(ZoneKind, Rect)>,
    pub hallways: Vec<HallwaySegment>,
}

/// Split the building into zone strips.
///
/// Public and Service rooms pack together in the center strip; their
/// specs are retagged to [`ZoneKind::Center`] so the packers see one
/// combined zone.
pub fn allocate_zones(specs: &mut [RoomSpec], length: f32, width: f32) -> ZonePlan {
    let mut master_area = 0.0;
    let mut secondary_area = 0.0;
    let mut center_area = 0.0;
    for spec in specs.iter() {
        match spec.zone {
            ZoneKind::PrivateMaster => master_area += spec.target_area,
            ZoneKind::PrivateSecondary => secondary_area += spec.target_area,
            ZoneKind::Public | ZoneKind::Service | ZoneKind::Center => {
                center_area += spec.target_area
            }
            ZoneKind::Circulation => {}
        }
    }

    let has_master = master_area > 0.0;
    let has_secondary = secondary_area > 0.0;

    let num_halls = u32::from(has_master) + u32::from(has_secondary);
    let mut usable_length = length - num_halls as f32 * HALLWAY_WIDTH;
    // Tiny shells: size the strips as if only one hallway existed so
    // the center zone stays usable.
    if usable_length < 20.0 {
        usable_length = length - HALLWAY_WIDTH;
    }

    let master_ideal = if has_master { master_area / width } else { 0.0 };
    let secondary_ideal = if has_secondary { secondary_area / width } else { 0.0 };
    let center_ideal = center_area / width;

    // Narrow buildings shrink the wing minimums so the wings do not
    // steal length from the center zone.
    let (min_wing, min_center) = if width < 36.0 {
        (12.0_f32.max(length * 0.15), 16.0_f32.max(length * 0.25))
    } else {
        (14.0_f32.max(length * 0.2), 16.0_f32.max(length * 0.3))
    };

    let mut master_width = if has_master { master_ideal.max(min_wing) } else { 0.0 };
    let mut secondary_width = if has_secondary { secondary_ideal.max(min_wing) } else { 0.0 };
    let mut center_width = center_ideal.max(min_center);

    let total_raw = master_width + secondary_width + center_width;
    if total_raw > 0.0 {
        let scale = usable_length / total_raw;
        master_width = round1(master_width * scale);
        secondary_width = round1(secondary_width * scale);
        center_width = round1(usable_length - master_width - secondary_width);
    }

    let mut strips = Vec::new();
    let mut hallways = Vec::new();
    let mut x_cursor = 0.0_f32;

    if has_master {
        strips.push((ZoneKind::PrivateMaster, Rect::new(x_cursor, 0.0, master_width, width)));
        x_cursor += master_width;
        hallways.push(HallwaySegment {
            rect: Rect::new(round2(x_cursor), 0.0, HALLWAY_WIDTH, width),
            orientation: Orientation::Vertical,
        });
        x_cursor += HALLWAY_WIDTH;
    }

    strips.push((ZoneKind::Center, Rect::new(x_cursor, 0.0, center_width, width)));
    x_cursor += center_width;

    if has_secondary {
        hallways.push(HallwaySegment {
            rect: Rect::new(round2(x_cursor), 0.0, HALLWAY_WIDTH, width),
            orientation: Orientation::Vertical,
        });
        x_cursor += HALLWAY_WIDTH;
        strips.push((ZoneKind::PrivateSecondary, Rect::new(x_cursor, 0.0, secondary_width, width)));
    }

    for spec in specs.iter_mut() {
        if matches!(spec.zone, ZoneKind::Public | ZoneKind::Service) {
            spec.zone = ZoneKind::Center;
        }
    }

    ZonePlan { strips, hallways }
}

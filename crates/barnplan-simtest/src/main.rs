//! BarnPlan Headless Layout Harness
//!
//! Sweeps the layout engine across shell sizes and room programs and
//! validates the output plans. Runs entirely in-process — no CAD, no
//! rendering, no I/O beyond stdout.
//!
//! Usage:
//!   cargo run -p barnplan-simtest
//!   cargo run -p barnplan-simtest -- --verbose

use barnplan_logic::engine::{generate, LayoutRequest, RoomOverride};
use barnplan_logic::geometry::shared_wall_length;
use barnplan_logic::plan::{FloorPlan, QualityStatus, RoomKind};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== BarnPlan Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Shell size sweep
    results.extend(validate_shell_sweep(verbose));

    // 2. Room program sweep
    results.extend(validate_program_sweep(verbose));

    // 3. Adjacency and plumbing quality
    results.extend(validate_quality(verbose));

    // 4. Doors and connectivity
    results.extend(validate_doors(verbose));

    // 5. Overrides and serialization
    results.extend(validate_overrides(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn request(length: f32, width: f32, beds: u32, baths: u32) -> LayoutRequest {
    LayoutRequest {
        building_length: length,
        building_width: width,
        num_bedrooms: beds,
        num_bathrooms: baths,
        ..LayoutRequest::default()
    }
}

fn plan_or_fail(req: &LayoutRequest, results: &mut Vec<TestResult>, label: &str) -> Option<FloorPlan> {
    match generate(req) {
        Ok(plan) => Some(plan),
        Err(e) => {
            results.push(TestResult {
                name: format!("{label}_generates"),
                passed: false,
                detail: format!("generation failed: {e}"),
            });
            None
        }
    }
}

// ── 1. Shell size sweep ─────────────────────────────────────────────────

fn validate_shell_sweep(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shell Size Sweep ---");
    let mut results = Vec::new();

    let shells: &[(f32, f32)] = &[
        (30.0, 24.0),
        (40.0, 30.0),
        (50.0, 26.0),
        (50.0, 40.0),
        (60.0, 28.0),
        (60.0, 40.0),
        (60.0, 50.0),
        (74.0, 33.0),
        (80.0, 30.0),
        (80.0, 60.0),
    ];

    for &(l, w) in shells {
        let label = format!("shell_{l}x{w}");
        let Some(plan) = plan_or_fail(&request(l, w, 3, 2), &mut results, &label) else {
            continue;
        };

        results.push(TestResult {
            name: format!("{label}_no_overlaps"),
            passed: plan.metadata.overlapping_rooms.is_empty(),
            detail: if plan.metadata.overlapping_rooms.is_empty() {
                format!("{} rooms placed cleanly", plan.rooms.len())
            } else {
                format!("overlaps: {:?}", plan.metadata.overlapping_rooms)
            },
        });

        results.push(TestResult {
            name: format!("{label}_in_bounds"),
            passed: plan.metadata.out_of_bounds_rooms.is_empty(),
            detail: if plan.metadata.out_of_bounds_rooms.is_empty() {
                "all rooms inside the shell".into()
            } else {
                format!("out of bounds: {:?}", plan.metadata.out_of_bounds_rooms)
            },
        });

        // Tight shells tile the footprint exactly; allow float noise
        // past 1.0.
        let fill = plan.metadata.fill_ratio;
        results.push(TestResult {
            name: format!("{label}_fill_ratio"),
            passed: fill >= 0.6 && fill <= 1.0 + 1e-3,
            detail: format!("fill ratio {fill:.2}"),
        });
    }

    results
}

// ── 2. Room program sweep ───────────────────────────────────────────────

fn validate_program_sweep(_verbose: bool) -> Vec<TestResult> {
    println!("--- Room Program Sweep ---");
    let mut results = Vec::new();

    for (beds, baths) in [(1u32, 1u32), (2, 1), (3, 2), (4, 3), (5, 3)] {
        let label = format!("program_{beds}bed_{baths}bath");
        let Some(plan) = plan_or_fail(&request(70.0, 45.0, beds, baths), &mut results, &label)
        else {
            continue;
        };

        let bed_count = plan.rooms.iter().filter(|r| r.kind == RoomKind::Bedroom).count() as u32;
        let bath_count = plan.rooms.iter().filter(|r| r.kind == RoomKind::Bathroom).count() as u32;
        results.push(TestResult {
            name: format!("{label}_counts"),
            passed: bed_count == beds && bath_count == baths,
            detail: format!("{bed_count} bedrooms, {bath_count} bathrooms"),
        });
    }

    // Dining room option
    let mut req = request(60.0, 40.0, 3, 2);
    req.has_dining = true;
    if let Some(plan) = plan_or_fail(&req, &mut results, "program_dining") {
        let has_dining = plan.rooms.iter().any(|r| r.kind == RoomKind::DiningRoom);
        results.push(TestResult {
            name: "program_dining_room_present".into(),
            passed: has_dining && plan.rooms.len() == 12,
            detail: format!("{} rooms, dining: {has_dining}", plan.rooms.len()),
        });
    }

    results
}

// ── 3. Adjacency and plumbing quality ───────────────────────────────────

fn validate_quality(_verbose: bool) -> Vec<TestResult> {
    println!("--- Layout Quality ---");
    let mut results = Vec::new();

    let Some(plan) = plan_or_fail(&request(60.0, 40.0, 3, 2), &mut results, "quality") else {
        return results;
    };

    let gr = plan.rooms.iter().find(|r| r.kind == RoomKind::GreatRoom);
    let kit = plan.rooms.iter().find(|r| r.kind == RoomKind::Kitchen);
    if let (Some(gr), Some(kit)) = (gr, kit) {
        let shared = shared_wall_length(&gr.rect, &kit.rect);
        results.push(TestResult {
            name: "quality_kitchen_great_room_adjacent".into(),
            passed: shared >= 3.0,
            detail: format!("{shared:.1}ft of shared wall"),
        });
    }

    let radius = plan.metadata.wet_room_cluster_radius;
    results.push(TestResult {
        name: "quality_wet_cluster".into(),
        passed: radius < 30.0,
        detail: format!("wet room cluster radius {radius:.1}ft"),
    });

    results.push(TestResult {
        name: "quality_status".into(),
        passed: plan.metadata.quality.status == QualityStatus::Good
            || plan.metadata.quality.issues.len() <= 1,
        detail: format!(
            "status {:?}, issues {:?}",
            plan.metadata.quality.status, plan.metadata.quality.issues
        ),
    });

    results
}

// ── 4. Doors and connectivity ───────────────────────────────────────────

fn validate_doors(_verbose: bool) -> Vec<TestResult> {
    println!("--- Doors & Connectivity ---");
    let mut results = Vec::new();

    let Some(plan) = plan_or_fail(&request(60.0, 40.0, 3, 2), &mut results, "doors") else {
        return results;
    };

    results.push(TestResult {
        name: "doors_minimum_count".into(),
        passed: plan.doors.len() >= 5,
        detail: format!("{} doors placed", plan.doors.len()),
    });

    let bad_width: Vec<&str> = plan
        .doors
        .iter()
        .filter(|d| d.width < 2.32 || d.width > 3.01)
        .map(|d| d.name.as_str())
        .collect();
    results.push(TestResult {
        name: "doors_code_widths".into(),
        passed: bad_width.is_empty(),
        detail: if bad_width.is_empty() {
            "all widths within 28\"-36\"".into()
        } else {
            format!("bad widths: {}", bad_width.join(", "))
        },
    });

    results.push(TestResult {
        name: "doors_full_connectivity".into(),
        passed: plan.metadata.connected_rooms == plan.rooms.len(),
        detail: format!(
            "{}/{} rooms reach circulation",
            plan.metadata.connected_rooms,
            plan.rooms.len()
        ),
    });

    results.push(TestResult {
        name: "doors_walls_generated".into(),
        passed: plan.walls.len() >= 3,
        detail: format!("{} interior wall segments", plan.walls.len()),
    });

    results
}

// ── 5. Overrides and serialization ──────────────────────────────────────

fn validate_overrides(_verbose: bool) -> Vec<TestResult> {
    println!("--- Overrides & Serialization ---");
    let mut results = Vec::new();

    let mut req = request(60.0, 40.0, 3, 2);
    req.room_overrides.insert(
        "Master_Bedroom".to_string(),
        RoomOverride::Dimensions { width: 14.0, depth: 16.0 },
    );
    req.room_overrides
        .insert("Kitchen".to_string(), RoomOverride::Area { area: 200.0 });

    if let Some(plan) = plan_or_fail(&req, &mut results, "overrides") {
        results.push(TestResult {
            name: "overrides_plan_stays_valid".into(),
            passed: plan.metadata.overlapping_rooms.is_empty()
                && plan.metadata.out_of_bounds_rooms.is_empty(),
            detail: format!(
                "{} overlaps, {} out of bounds",
                plan.metadata.overlapping_rooms.len(),
                plan.metadata.out_of_bounds_rooms.len()
            ),
        });

        match serde_json::to_string(&plan) {
            Ok(json) => {
                let round_trip: Result<FloorPlan, _> = serde_json::from_str(&json);
                results.push(TestResult {
                    name: "overrides_json_round_trip".into(),
                    passed: round_trip.is_ok(),
                    detail: format!("{} bytes of JSON", json.len()),
                });
            }
            Err(e) => results.push(TestResult {
                name: "overrides_json_round_trip".into(),
                passed: false,
                detail: format!("serialize error: {e}"),
            }),
        }
    }

    let mut bad = request(0.0, 40.0, 3, 2);
    bad.building_length = 0.0;
    results.push(TestResult {
        name: "overrides_invalid_request_rejected".into(),
        passed: generate(&bad).is_err(),
        detail: "zero-length shell must be refused".into(),
    });

    results
}

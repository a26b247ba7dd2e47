#![allow(missing_docs)]

use flocking::simulation::boid::{Boid, DesiredVector};
use flocking::simulation::classifier::{Classification, Neighbor, ThreatContact, Threats, classify_brute};
use flocking::simulation::forces::{alignment_force, blend, cohesion_force, threat_force};
use flocking::simulation::params::{CategoryMap, HeatmapParams, Params};
use flocking::simulation::rng::create_rng;
use flocking::simulation::steering::shortest_turn;
use ndarray::Array1;
use std::f32::consts::{PI, TAU};

fn create_test_params() -> Params {
    Params {
        seed: 7,
        agent_count: 10,
        max_x: 800.0,
        max_y: 600.0,
        vision_angle_deg: 180.0,
        speed: 1.0,
        turning_rate: 0.1,
        random_move_chance: 0.0,
        return_margin: 0.0,
        cooldown_rate: 0.25,
        radius: CategoryMap {
            cohesion: 500.0,
            alignment: 60.0,
            separation: 50.0,
            predator: 400.0,
            obstacle: 0.0,
        },
        weight: CategoryMap {
            cohesion: 10.0,
            alignment: 0.0,
            separation: 0.0,
            predator: 10.0,
            obstacle: 0.0,
        },
        heatmap: HeatmapParams {
            enabled: false,
            cell_size: 10.0,
            increase_per_visit: 1.0,
            attenuation_rate: 1.0,
        },
        idle_rotation_epsilon: 0.01,
        panic_scale: 2.0,
        panic_steepness: 0.05,
        panic_center_fraction: 0.7,
    }
}

fn make_boid(id: usize, x: f32, y: f32, rotation: f32) -> Boid {
    Boid {
        id,
        pos: Array1::from_vec(vec![x, y]),
        rotation,
        desired: DesiredVector {
            rotation,
            magnitude: 1.0,
        },
        tint: None,
    }
}

fn neighbor(x: f32, y: f32, rotation: f32, magnitude: f32) -> Neighbor {
    Neighbor {
        x,
        y,
        rotation,
        magnitude,
    }
}

#[test]
fn test_single_category_blend_reduces_to_identity() {
    let params = create_test_params();
    let boid = make_boid(0, 400.0, 300.0, 0.0);
    let mut rng = create_rng(1);

    let classification = Classification {
        cohesion: vec![neighbor(500.0, 300.0, 0.0, 1.0), neighbor(500.0, 400.0, 0.0, 1.0)],
        ..Classification::default()
    };

    let expected = cohesion_force(&boid, &classification.cohesion, &params);
    let blended = blend(&boid, &classification, &params, &mut rng);

    assert!((blended.rotation - expected.rotation).abs() < 1e-5);
    assert!((blended.magnitude - expected.magnitude).abs() < 1e-5);
}

#[test]
fn test_zero_total_weight_falls_back_to_previous() {
    let mut params = create_test_params();
    params.weight.cohesion = 0.0;

    let mut boid = make_boid(0, 400.0, 300.0, 0.0);
    boid.desired = DesiredVector {
        rotation: 1.25,
        magnitude: 1.5,
    };
    let mut rng = create_rng(1);

    let classification = Classification {
        cohesion: vec![neighbor(500.0, 300.0, 0.0, 1.0)],
        ..Classification::default()
    };

    let blended = blend(&boid, &classification, &params, &mut rng);
    assert_eq!(blended, boid.desired);
}

#[test]
fn test_idle_magnitude_cools_monotonically_toward_one() {
    let params = create_test_params();
    let mut boid = make_boid(0, 400.0, 300.0, 0.0);
    boid.desired.magnitude = 3.0;
    let mut rng = create_rng(1);

    let empty = Classification::default();
    let mut previous = boid.desired.magnitude;

    for _ in 0..12 {
        boid.desired = blend(&boid, &empty, &params, &mut rng);
        assert!(boid.desired.magnitude <= previous);
        assert!(boid.desired.magnitude >= 1.0);
        previous = boid.desired.magnitude;
    }
    assert!((boid.desired.magnitude - 1.0).abs() < 1e-6);

    // From below, the magnitude climbs back toward 1 as well.
    boid.desired.magnitude = 0.2;
    boid.desired = blend(&boid, &empty, &params, &mut rng);
    assert!((boid.desired.magnitude - 0.45).abs() < 1e-6);
}

#[test]
fn test_separation_symmetry_pushes_both_agents_apart() {
    let mut params = create_test_params();
    params.weight = CategoryMap {
        cohesion: 0.0,
        alignment: 0.0,
        separation: 1.0,
        predator: 0.0,
        obstacle: 0.0,
    };

    // Facing each other, well inside the separation radius.
    let a = make_boid(0, 400.0, 300.0, 0.0);
    let b = make_boid(1, 400.0, 320.0, PI);
    let snapshot = vec![a.clone(), b.clone()];
    let threats = Threats::default();

    let mut rng = create_rng(1);

    let class_a = classify_brute(&a, &snapshot, &threats, &params);
    assert_eq!(class_a.separation.len(), 1);
    let desired_a = blend(&a, &class_a, &params, &mut rng);
    // Away from b means turning a half circle from a's current heading.
    assert!((shortest_turn(a.rotation, desired_a.rotation).abs() - PI).abs() < 1e-4);
    assert!((desired_a.rotation - PI).abs() < 1e-4);

    let class_b = classify_brute(&b, &snapshot, &threats, &params);
    assert_eq!(class_b.separation.len(), 1);
    let desired_b = blend(&b, &class_b, &params, &mut rng);
    assert!((shortest_turn(b.rotation, desired_b.rotation).abs() - PI).abs() < 1e-4);
    assert!(desired_b.rotation < 1e-4 || desired_b.rotation > TAU - 1e-4);

    // Urgency floor on separation.
    assert!(desired_a.magnitude >= 1.5);
    assert!(desired_b.magnitude >= 1.5);
}

#[test]
fn test_alignment_adopts_average_heading_and_speed() {
    let neighbors = vec![neighbor(0.0, 0.0, 0.2, 1.0), neighbor(1.0, 1.0, 0.4, 2.0)];
    let force = alignment_force(&neighbors);
    assert!((force.rotation - 0.3).abs() < 1e-6);
    assert!((force.magnitude - 1.5).abs() < 1e-6);
}

#[test]
fn test_cohesion_magnitude_floors_at_current() {
    let params = create_test_params();
    let mut boid = make_boid(0, 400.0, 300.0, 0.0);
    boid.desired.magnitude = 2.5;

    // Centroid 10 units away: normalized closing speed is tiny, so the
    // current magnitude wins the floor.
    let force = cohesion_force(&boid, &[neighbor(400.0, 310.0, 0.0, 1.0)], &params);
    assert!((force.magnitude - 2.5).abs() < 1e-6);

    // Far centroid scales the magnitude up instead.
    boid.desired.magnitude = 1.0;
    let force = cohesion_force(&boid, &[neighbor(400.0, 700.0, 0.0, 1.0)], &params);
    assert!(force.magnitude > 1.5);
}

#[test]
fn test_predator_urgency_rises_as_threat_closes() {
    let params = create_test_params();
    let radius = params.radius.predator;

    let far = threat_force(
        &ThreatContact {
            dx: 0.0,
            dy: 390.0,
            distance: 390.0,
        },
        radius,
        &params,
    );
    let near = threat_force(
        &ThreatContact {
            dx: 0.0,
            dy: 100.0,
            distance: 100.0,
        },
        radius,
        &params,
    );

    // Rim of the radius: close to baseline. Deep inside: close to full panic.
    assert!((far.magnitude - 1.0).abs() < 0.05);
    assert!((near.magnitude - (params.panic_scale + 1.0)).abs() < 0.05);
    assert!(near.magnitude > far.magnitude);

    // Predator straight ahead (+Y): flee heading is a half turn away.
    assert!((near.rotation - PI).abs() < 1e-4);
}

#[test]
fn test_return_band_retargets_interior() {
    let mut params = create_test_params();
    params.return_margin = 50.0;

    // Idle agent stuck hard against the left edge.
    let boid = make_boid(0, 5.0, 300.0, 0.0);
    let mut rng = create_rng(1);

    let desired = blend(&boid, &Classification::default(), &params, &mut rng);
    // Interior targets all lie to the right, which with this convention means
    // a heading in (pi, 2pi).
    assert!(desired.rotation > PI && desired.rotation < TAU);
}

#[test]
fn test_random_perturbation_nudges_heading() {
    let mut params = create_test_params();
    params.random_move_chance = 100.0;
    params.cooldown_rate = 0.0;

    let mut boid = make_boid(0, 400.0, 300.0, PI);
    boid.desired.magnitude = 1.0;
    let mut rng = create_rng(1);

    let desired = blend(&boid, &Classification::default(), &params, &mut rng);
    let delta = shortest_turn(boid.desired.rotation, desired.rotation).abs();
    assert!((delta - PI / 20.0).abs() < 1e-5);
}

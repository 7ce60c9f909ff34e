//! Integration tests for elastica-solver.

use elastica_material::StrainMode;
use elastica_math::DVec3;
use elastica_mesh::generators::{bar, single_tet};
use elastica_solver::assembly::{assemble_jacobians, DofMap};
use elastica_solver::config::{IntegratorKind, LinearSolverKind, SolverConfig};
use elastica_solver::energy::{elastic_energy, kinetic_energy};
use elastica_solver::forces::compute_forces;
use elastica_solver::interaction::ray_triangle;
use elastica_solver::stress::update_stress;
use elastica_solver::{
    create_integrator, ExplicitEuler, ImplicitEuler, Integrator, Interaction, MidpointEuler,
    MouseSpring, SimulationState,
};
use elastica_types::ParticleRef;

fn quiet() -> SolverConfig {
    SolverConfig::default().without_gravity()
}

/// Anchor at the origin followed by `n` unit-spaced particles along +X.
fn chain(n: usize, stiffness: f64, damping: f64) -> SimulationState {
    let mut state = SimulationState::new();
    let mut prev = state.add_anchor(DVec3::ZERO);
    for i in 1..=n {
        let p = state.add_particle(DVec3::new(i as f64, 0.0, 0.0), DVec3::ZERO, 1.0);
        state.add_spring(p, prev, stiffness, damping);
        prev = p;
    }
    state
}

/// `n` unit-spaced particles along +X with no anchor.
fn free_chain(n: usize, stiffness: f64, damping: f64) -> SimulationState {
    let mut state = SimulationState::new();
    let mut prev = state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0);
    for i in 1..n {
        let p = state.add_particle(DVec3::new(i as f64, 0.0, 0.0), DVec3::ZERO, 1.0);
        state.add_spring(p, prev, stiffness, damping);
        prev = p;
    }
    state
}

fn tet_state() -> SimulationState {
    SimulationState::from_tet_mesh(&single_tet(DVec3::ZERO), 1.0, 100.0, 0.0, |_, _| false)
        .unwrap()
}

fn max_force(state: &SimulationState) -> f64 {
    state
        .particles
        .iter()
        .map(|p| p.force.length())
        .fold(0.0, f64::max)
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_default_is_valid() {
    let config = SolverConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.integrator, IntegratorKind::Implicit);
    assert_eq!(config.strain_mode, StrainMode::Corotational);
}

#[test]
fn config_rejects_bad_poisson() {
    let config = SolverConfig {
        poisson: 0.5,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_toml_roundtrip() {
    let config = SolverConfig::high_quality();
    let text = toml::to_string(&config).unwrap();
    let back: SolverConfig = toml::from_str(&text).unwrap();
    assert_eq!(config, back);
}

#[test]
fn config_toml_partial_uses_defaults() {
    let config: SolverConfig = toml::from_str("integrator = \"midpoint\"\nsolve_with_guess = false").unwrap();
    assert_eq!(config.integrator, IntegratorKind::Midpoint);
    assert!(!config.solve_with_guess);
    assert_eq!(config.max_iterations, SolverConfig::default().max_iterations);
}

// ─── Store Tests ──────────────────────────────────────────────

#[test]
fn add_spring_uses_current_distance() {
    let mut state = SimulationState::new();
    let a = state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0);
    let b = state.add_anchor(DVec3::new(3.0, 4.0, 0.0));
    let s = state.add_spring(a, b, 10.0, 1.0);
    assert!((state.springs[s].rest_length - 5.0).abs() < 1e-12);
    assert_eq!(b, ParticleRef::Anchor(0));
}

#[test]
fn set_spring_properties_updates_all() {
    let mut state = chain(3, 10.0, 1.0);
    state.set_spring_properties(42.0, 0.5);
    assert!(state
        .springs
        .iter()
        .all(|s| s.stiffness == 42.0 && s.damping == 0.5));
}

#[test]
fn from_tet_mesh_anchors_and_boundary() {
    let mesh = bar(2, 1, 1, 1.0, DVec3::ZERO);
    let state =
        SimulationState::from_tet_mesh(&mesh, 1.0, 100.0, 1.0, |_, p| p.x == 0.0).unwrap();
    assert_eq!(state.anchors.len(), 4);
    assert_eq!(state.particles.len(), 8);
    assert_eq!(state.tets.len(), 12);
    assert_eq!(state.faces.len(), 20);
    assert_eq!(state.boundary().point_count(), 12);
    assert_eq!(state.boundary().face_count(), 20);
}

#[test]
fn set_surface_rejects_out_of_range() {
    let mut state = tet_state();
    let faces = vec![[
        ParticleRef::Dynamic(0),
        ParticleRef::Dynamic(1),
        ParticleRef::Dynamic(9),
    ]];
    assert!(state.set_surface(faces, vec![0]).is_err());
}

#[test]
fn degenerate_tet_is_flagged() {
    let mut state = SimulationState::new();
    let v = [
        state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0),
        state.add_particle(DVec3::X, DVec3::ZERO, 1.0),
        state.add_particle(DVec3::Y, DVec3::ZERO, 1.0),
        state.add_particle(DVec3::new(1.0, 1.0, 0.0), DVec3::ZERO, 1.0),
    ];
    let t = state.add_tet(v, 100.0, 1.0);
    assert!(state.tets[t].degenerate);

    state.particles[3].position.z = 0.5;
    compute_forces(&mut state, &quiet());
    assert_eq!(max_force(&state), 0.0);
}

// ─── Force Tests ──────────────────────────────────────────────

#[test]
fn spring_at_rest_has_no_force() {
    let mut state = chain(3, 100.0, 10.0);
    compute_forces(&mut state, &quiet());
    assert!(max_force(&state) < 1e-12);
}

#[test]
fn stretched_spring_pulls_back() {
    let mut state = chain(1, 100.0, 0.0);
    state.particles[0].position.x = 1.5;
    compute_forces(&mut state, &quiet());
    assert!((state.particles[0].force.x + 50.0).abs() < 1e-9);
}

#[test]
fn coincident_particles_stay_finite() {
    let mut state = SimulationState::new();
    let a = state.add_particle(DVec3::ONE, DVec3::ZERO, 1.0);
    let b = state.add_particle(DVec3::ONE, DVec3::ZERO, 1.0);
    state.add_spring_with_rest(a, b, 100.0, 10.0, 1.0);

    compute_forces(&mut state, &quiet());
    assert!(state.particles.iter().all(|p| p.force.is_finite()));

    let mut integrator = ImplicitEuler::new();
    integrator.step(&mut state, &quiet(), 0.01).unwrap();
    assert!(state.is_finite());
}

#[test]
fn gravity_scales_with_mass() {
    let mut state = SimulationState::new();
    state.add_particle(DVec3::ZERO, DVec3::ZERO, 0.5);
    state.add_particle(DVec3::X, DVec3::ZERO, 0.0);
    compute_forces(&mut state, &SolverConfig::default());
    assert!((state.particles[0].force.y + 2.0 * 9.8).abs() < 1e-12);
    assert_eq!(state.particles[1].force, DVec3::ZERO);
}

#[test]
fn tet_at_rest_has_no_force() {
    let mut state = tet_state();
    compute_forces(&mut state, &quiet());
    assert!(max_force(&state) < 1e-12);
}

#[test]
fn tet_forces_sum_to_zero() {
    let mut state = tet_state();
    state.particles[1].position = DVec3::new(1.3, 0.1, -0.2);
    state.particles[3].position = DVec3::new(0.1, 0.0, 0.8);
    compute_forces(&mut state, &quiet());
    let total: DVec3 = state.particles.iter().map(|p| p.force).sum();
    assert!(total.length() < 1e-9, "net force {total}");
}

#[test]
fn stretched_tet_resists() {
    for mode in [StrainMode::Linear, StrainMode::Corotational] {
        let mut state = tet_state();
        state.particles[1].position.x = 1.2;
        let config = SolverConfig {
            strain_mode: mode,
            ..quiet()
        };
        compute_forces(&mut state, &config);
        assert!(state.particles[1].force.x < 0.0, "{mode:?}");
    }
}

#[test]
fn rigid_rotation_only_loads_linear_mode() {
    let rotate = |p: DVec3| DVec3::new(-p.y, p.x, p.z);

    let mut state = tet_state();
    for p in &mut state.particles {
        p.position = rotate(p.position);
    }
    let corotational = SolverConfig {
        strain_mode: StrainMode::Corotational,
        ..quiet()
    };
    compute_forces(&mut state, &corotational);
    assert!(max_force(&state) < 1e-9);

    let linear = SolverConfig {
        strain_mode: StrainMode::Linear,
        ..quiet()
    };
    compute_forces(&mut state, &linear);
    assert!(max_force(&state) > 1.0);
}

// ─── Jacobian Tests ───────────────────────────────────────────

#[test]
fn spring_jacobian_matches_finite_difference() {
    let mut state = SimulationState::new();
    let a = state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0);
    let b = state.add_particle(DVec3::new(1.5, 0.5, 0.2), DVec3::ZERO, 1.0);
    state.add_spring_with_rest(a, b, 100.0, 0.0, 1.0);
    let config = quiet();

    let dofs = DofMap::build(&state);
    let dfdx = assemble_jacobians(&state, &dofs, &config).dfdx.to_csr();

    let eps = 1e-6;
    for col_particle in 0..2 {
        for axis in 0..3 {
            let mut plus = state.clone();
            let mut minus = state.clone();
            plus.particles[col_particle].position[axis] += eps;
            minus.particles[col_particle].position[axis] -= eps;
            compute_forces(&mut plus, &config);
            compute_forces(&mut minus, &config);
            for row_particle in 0..2 {
                let diff = (plus.particles[row_particle].force - minus.particles[row_particle].force)
                    / (2.0 * eps);
                for r in 0..3 {
                    let analytic = dfdx.get(row_particle * 3 + r, col_particle * 3 + axis);
                    assert!(
                        (analytic - diff[r]).abs() < 1e-4,
                        "({row_particle},{r}) vs ({col_particle},{axis}): {analytic} != {}",
                        diff[r]
                    );
                }
            }
        }
    }
}

#[test]
fn linear_tet_jacobian_matches_finite_difference() {
    let mut state = tet_state();
    state.particles[2].position = DVec3::new(0.1, 1.1, 0.05);
    let config = SolverConfig {
        strain_mode: StrainMode::Linear,
        ..quiet()
    };

    let dofs = DofMap::build(&state);
    let dfdx = assemble_jacobians(&state, &dofs, &config).dfdx.to_csr();

    let mut base = state.clone();
    compute_forces(&mut base, &config);
    let eps = 1e-4;
    for col_particle in 0..4 {
        for axis in 0..3 {
            let mut moved = state.clone();
            moved.particles[col_particle].position[axis] += eps;
            compute_forces(&mut moved, &config);
            for row_particle in 0..4 {
                let diff = (moved.particles[row_particle].force - base.particles[row_particle].force) / eps;
                for r in 0..3 {
                    let analytic = dfdx.get(row_particle * 3 + r, col_particle * 3 + axis);
                    assert!((analytic - diff[r]).abs() < 1e-6);
                }
            }
        }
    }
}

#[test]
fn anchors_have_no_unknowns() {
    let state = chain(4, 100.0, 10.0);
    let dofs = DofMap::build(&state);
    assert_eq!(dofs.len(), 4);
    assert_eq!(dofs.slot(ParticleRef::Anchor(0)), None);
    assert_eq!(dofs.slot(ParticleRef::Dynamic(2)), Some(2));
}

// ─── Integrator Tests ─────────────────────────────────────────

#[test]
fn rest_spring_stays_still() {
    let mut state = chain(2, 100.0, 10.0);
    let before: Vec<DVec3> = state.particles.iter().map(|p| p.position).collect();
    let mut integrator = ImplicitEuler::new();
    for _ in 0..5 {
        integrator.step(&mut state, &quiet(), 0.01).unwrap();
    }
    for (p, b) in state.particles.iter().zip(before) {
        assert!((p.position - b).length() < 1e-12);
    }
}

#[test]
fn displaced_chain_recoils_and_loses_energy() {
    let mut state = chain(10, 100.0, 10.0);
    state.particles[9].position.x += 0.1;
    let config = quiet();
    let before = kinetic_energy(&state) + elastic_energy(&state, &config);

    let mut integrator = ImplicitEuler::new();
    let result = integrator.step(&mut state, &config, 0.01).unwrap();
    let after = kinetic_energy(&state) + elastic_energy(&state, &config);

    assert!(result.converged);
    assert!(state.particles[9].velocity.x < 0.0);
    assert!(after <= before + 1e-12, "energy grew: {before} -> {after}");
}

#[test]
fn displaced_free_chain_recoils_without_energy_gain() {
    let mut state = free_chain(10, 100.0, 10.0);
    assert_eq!(state.particles.len(), 10);
    assert!(state.anchors.is_empty());
    state.particles[9].position.x += 0.1;
    let config = quiet();
    let initial_potential = elastic_energy(&state, &config);
    assert!((initial_potential - 0.5 * 100.0 * 0.01).abs() < 1e-12);

    let result = ImplicitEuler::new().step(&mut state, &config, 0.01).unwrap();
    let after = kinetic_energy(&state) + elastic_energy(&state, &config);

    assert!(result.converged);
    assert!(state.particles[9].velocity.x < 0.0);
    assert!(
        after <= initial_potential + 1e-12,
        "energy grew: {initial_potential} -> {after}"
    );
}

#[test]
fn formulations_agree() {
    let run = |solve_with_guess: bool| {
        let mut state = chain(10, 100.0, 10.0);
        state.particles[9].position += DVec3::new(0.1, 0.05, 0.0);
        let config = SolverConfig {
            solve_with_guess,
            ..SolverConfig::default()
        };
        let mut integrator = ImplicitEuler::new();
        for _ in 0..3 {
            integrator.step(&mut state, &config, 0.01).unwrap();
        }
        state
    };
    let a = run(true);
    let b = run(false);
    for (p, q) in a.particles.iter().zip(&b.particles) {
        assert!((p.position - q.position).length() < 1e-6);
        assert!((p.velocity - q.velocity).length() < 1e-6);
    }
}

#[test]
fn cholesky_matches_conjugate_gradient() {
    let run = |linear_solver: LinearSolverKind| {
        let mut state = chain(6, 100.0, 10.0);
        state.particles[5].position.x += 0.2;
        let config = SolverConfig {
            linear_solver,
            ..quiet()
        };
        ImplicitEuler::new().step(&mut state, &config, 0.01).unwrap();
        state
    };
    let cg = run(LinearSolverKind::ConjugateGradient);
    let chol = run(LinearSolverKind::Cholesky);
    for (p, q) in cg.particles.iter().zip(&chol.particles) {
        assert!((p.position - q.position).length() < 1e-8);
    }
}

#[test]
fn implicit_step_conserves_momentum() {
    let mut state = SimulationState::new();
    let a = state.add_particle(DVec3::ZERO, DVec3::new(0.3, 0.1, 0.0), 1.0);
    let b = state.add_particle(DVec3::new(1.2, 0.3, 0.0), DVec3::new(-0.3, -0.1, 0.0), 1.0);
    state.add_spring_with_rest(a, b, 100.0, 5.0, 1.0);

    let mut integrator = ImplicitEuler::new();
    for _ in 0..10 {
        integrator.step(&mut state, &quiet(), 0.01).unwrap();
    }
    assert!(state.momentum().length() < 1e-7);
}

#[test]
fn anchors_and_pinned_particles_do_not_move() {
    let mut state = chain(3, 100.0, 10.0);
    state.particles[1].inv_mass = 0.0;
    let mut integrator = ImplicitEuler::new();
    for _ in 0..5 {
        integrator.step(&mut state, &SolverConfig::default(), 0.01).unwrap();
    }
    assert_eq!(state.anchors[0].position, DVec3::ZERO);
    assert_eq!(state.particles[1].position, DVec3::new(2.0, 0.0, 0.0));
    assert!(state.particles[2].position.y < 0.0);
    assert!(state.is_finite());
}

#[test]
fn anchored_bar_sags_under_gravity() {
    let mesh = bar(3, 1, 1, 1.0, DVec3::ZERO);
    let mut state =
        SimulationState::from_tet_mesh(&mesh, 1.0, 100.0, 1.0, |_, p| p.x == 0.0).unwrap();
    let mean_y = |s: &SimulationState| {
        s.particles.iter().map(|p| p.position.y).sum::<f64>() / s.particles.len() as f64
    };
    let before = mean_y(&state);
    ImplicitEuler::new()
        .step(&mut state, &SolverConfig::default(), 0.01)
        .unwrap();
    assert!(mean_y(&state) < before);
    assert!(state.is_finite());
}

#[test]
fn explicit_free_fall() {
    let mut state = SimulationState::new();
    state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0);
    ExplicitEuler::new()
        .step(&mut state, &SolverConfig::default(), 0.01)
        .unwrap();
    let p = &state.particles[0];
    assert!((p.velocity.y + 0.098).abs() < 1e-12);
    assert!((p.position.y + 0.00098).abs() < 1e-12);
}

#[test]
fn midpoint_free_fall() {
    let mut state = SimulationState::new();
    state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0);
    MidpointEuler::new()
        .step(&mut state, &SolverConfig::default(), 0.01)
        .unwrap();
    let p = &state.particles[0];
    assert!((p.velocity.y + 0.098).abs() < 1e-12);
    // Position advances with the end-of-step velocity.
    assert!((p.position.y + 0.00098).abs() < 1e-12);
    assert_eq!(p.previous_position, DVec3::ZERO);
}

#[test]
fn integrator_factory_names() {
    assert_eq!(create_integrator(IntegratorKind::Implicit).name(), "implicit_euler");
    assert_eq!(create_integrator(IntegratorKind::Explicit).name(), "explicit_euler");
    assert_eq!(create_integrator(IntegratorKind::Midpoint).name(), "midpoint");
}

// ─── Stress Tests ─────────────────────────────────────────────

#[test]
fn stress_averages_onto_vertices() {
    let mut state = tet_state();
    state.particles[1].position.x = 1.2;
    let states = update_stress(&mut state, &quiet());
    assert_eq!(states.len(), 1);
    assert!(states[0].norm > 0.0);
    assert_eq!(state.tets[0].stress_norm, states[0].norm);
    for p in &state.particles {
        assert_eq!(p.stress_count, 1);
        assert!((p.average_stress() - states[0].norm).abs() < 1e-12);
    }
}

#[test]
fn stress_is_zero_at_rest() {
    let mut state = tet_state();
    let states = update_stress(&mut state, &quiet());
    assert!(states[0].norm < 1e-12);
}

// ─── Interaction Tests ────────────────────────────────────────

#[test]
fn ray_triangle_hit_and_miss() {
    let tri = [DVec3::ZERO, DVec3::X, DVec3::Y];
    let hit = ray_triangle(DVec3::new(0.2, 0.2, 1.0), -DVec3::Z, tri).unwrap();
    assert!((hit.0 - 1.0).abs() < 1e-12);
    assert!((hit.1 - 0.2).abs() < 1e-12);
    assert!((hit.2 - 0.2).abs() < 1e-12);
    assert!(ray_triangle(DVec3::new(2.0, 2.0, 1.0), -DVec3::Z, tri).is_none());
    assert!(ray_triangle(DVec3::new(0.2, 0.2, 1.0), DVec3::Z, tri).is_none());
}

#[test]
fn pick_selects_nearest_corner() {
    let state = tet_state();
    let mut interaction = Interaction::new();
    let picked = interaction.pick(&state, DVec3::new(0.2, 0.2, 5.0), -DVec3::Z);
    assert_eq!(picked, Some(ParticleRef::Dynamic(3)));
    assert_eq!(interaction.target(), Some(DVec3::Z));

    assert_eq!(interaction.pick(&state, DVec3::splat(5.0), DVec3::Z), None);
    assert_eq!(interaction.picked(), None);
}

#[test]
fn drag_pulls_toward_ray() {
    let mut state = tet_state();
    let config = quiet();
    let mut interaction = Interaction::new();
    interaction.pick(&state, DVec3::new(0.2, 0.2, 5.0), -DVec3::Z);
    interaction.drag(&state, DVec3::new(1.0, 0.0, 1.0), -DVec3::Z);
    assert_eq!(interaction.target(), Some(DVec3::new(1.0, 0.0, 1.0)));

    interaction.apply(&mut state, &config, 0.01);
    assert!(state.particles[3].velocity.x > 0.0);

    interaction.release();
    let v = state.particles[3].velocity;
    interaction.apply(&mut state, &config, 0.01);
    assert_eq!(state.particles[3].velocity, v);
}

#[test]
fn mouse_spring_follows_handle() {
    let mut state = SimulationState::new();
    let p = state.add_particle(DVec3::X, DVec3::ZERO, 1.0);
    let mut mouse = MouseSpring::new();
    let handle = mouse.attach(&mut state, p, 0.0, 50.0, 5.0);
    assert_eq!(state.position(handle), DVec3::X);

    mouse.set_position(&mut state, DVec3::new(2.0, 0.0, 0.0));
    compute_forces(&mut state, &quiet());
    assert!(state.particles[0].force.x > 0.0);

    mouse.set_enabled(&mut state, false, 50.0, 5.0);
    compute_forces(&mut state, &quiet());
    assert_eq!(state.particles[0].force, DVec3::ZERO);
}

#[test]
fn mouse_handle_starts_at_given_point() {
    let mut state = SimulationState::new();
    let a = state.add_particle(DVec3::X, DVec3::ZERO, 1.0);
    let b = state.add_particle(DVec3::Y, DVec3::ZERO, 1.0);
    let mut mouse = MouseSpring::starting_at(DVec3::new(0.5, 0.5, 0.0));
    let handle = mouse.attach(&mut state, a, 6.0, 50.0, 5.0);
    assert_eq!(state.position(handle), DVec3::new(0.5, 0.5, 0.0));

    // Later attachments share the handle.
    assert_eq!(mouse.attach(&mut state, b, 6.0, 50.0, 5.0), handle);
    assert_eq!(state.anchors.len(), 1);
    assert_eq!(mouse.springs().len(), 2);
    assert_eq!(state.springs[mouse.springs()[0]].rest_length, 6.0);
}

//! CLI command implementations.

use std::path::Path;

use elastica_mesh::io::try_load_json;
use elastica_render::{JsonFrameExporter, Renderer};
use elastica_scene::{Scene, Simulation, SimulationConfig};
use elastica_telemetry::TracingSink;
use tracing::info;

/// Run a scene headless and print a summary.
pub fn simulate(
    scene_name: &str,
    frames: u64,
    config_path: Option<&str>,
    export_path: Option<&str>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Elastica Simulation");
    println!("═══════════════════");
    println!();

    let config = match config_path {
        Some(path) => {
            println!("Config:    {path}");
            SimulationConfig::load(Path::new(path))?
        }
        None => SimulationConfig::default(),
    };

    let scene = Scene::from_name(scene_name)?;
    let mut sim = Simulation::new(config)?;
    sim.bus_mut().add_sink(Box::new(TracingSink::new()));
    if !verbose {
        sim.bus_mut().mute("frame_begin");
        sim.bus_mut().mute("frame_end");
    }
    sim.load_scene(&scene)?;

    let state = sim.state();
    println!("Scene:     {}", sim.scene_name());
    println!(
        "System:    {} particles, {} anchors, {} springs, {} tets",
        state.particles.len(),
        state.anchors.len(),
        state.springs.len(),
        state.tets.len(),
    );
    println!(
        "Solver:    {:?} / {:?}, dt = {}",
        sim.config().solver.integrator,
        sim.config().solver.linear_solver,
        sim.config().dt,
    );
    println!("Frames:    {frames}");
    println!();

    let mut exporter = export_path.map(JsonFrameExporter::new);
    if let Some(exporter) = exporter.as_mut() {
        exporter.init(sim.state())?;
    }

    let mut unconverged = 0u64;
    let mut unresolved = 0u64;
    let mut last = None;
    for _ in 0..frames {
        let report = sim.step_frame()?;
        if !report.step.converged {
            unconverged += 1;
        }
        if !report.collision.resolved {
            unresolved += 1;
        }
        if verbose {
            println!(
                "frame {:>5}  t={:.3}  iters={:>4}  res={:.2e}  contacts={}  E={:.4e}",
                report.frame,
                report.sim_time,
                report.step.iterations,
                report.step.final_residual,
                report.collision.vertex_face_contacts,
                report.energy.total(),
            );
        }
        if let Some(exporter) = exporter.as_mut() {
            exporter.submit_frame(&sim.render_frame())?;
        }
        last = Some(report);
    }

    if let Some(exporter) = exporter.as_mut() {
        exporter.finalize()?;
    }
    sim.bus_mut().finalize();
    info!(frames, unconverged, unresolved, "Run complete");

    let profile = sim.profile();
    println!("Wall time:     {:.3}s", profile.frame_time);
    println!("Avg frame:     {:.3}ms", profile.average_frame_time() * 1000.0);
    println!("  assembly:    {:.3}s", profile.assembly_time);
    println!("  solve:       {:.3}s", profile.solve_time);
    println!("  collision:   {:.3}s", profile.collision_time);
    println!("Unconverged:   {unconverged}");
    println!("Unresolved:    {unresolved}");
    if let Some(report) = last {
        println!("Final energy:  {:.6e}", report.energy.total());
    }
    let camera = sim.camera();
    println!(
        "Bounds:        center ({:.3}, {:.3}, {:.3}), extent {:.3}",
        camera.center.x, camera.center.y, camera.center.z, camera.extent,
    );
    let delivered: Vec<String> = sim
        .bus()
        .delivered()
        .iter()
        .map(|(kind, count)| format!("{kind}={count}"))
        .collect();
    println!("Events:        {}", delivered.join(" "));
    if let Some(path) = export_path {
        println!("Frames written to: {path}");
    }
    if !sim.state().is_finite() {
        return Err("simulation diverged".into());
    }

    Ok(())
}

/// List the built-in scenes.
pub fn scenes() -> Result<(), Box<dyn std::error::Error>> {
    let config = SimulationConfig::default();
    println!("Built-in scenes:");
    for name in Scene::NAMES {
        let setup = Scene::from_name(name)?.build(&config)?;
        println!(
            "  {name:<14} {:>4} particles  {:>4} springs  {:>4} tets",
            setup.state.particles.len(),
            setup.state.springs.len(),
            setup.state.tets.len(),
        );
    }
    println!();
    println!("Any path ending in .json loads a tetrahedral mesh.");
    Ok(())
}

/// Validate a config or mesh file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Elastica Validator");
    println!("──────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match SimulationConfig::load(Path::new(path)) {
            Ok(_) => println!("✅ Config is valid."),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        match try_load_json(Path::new(path)) {
            Ok(mesh) => println!(
                "✅ Mesh is valid ({} points, {} tets, {} faces).",
                mesh.points.len(),
                mesh.tet_count(),
                mesh.face_count(),
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh).");
    }

    Ok(())
}

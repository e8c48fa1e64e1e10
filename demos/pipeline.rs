//! Minimal frame-pipeline demo for the stagegraph scheduler.
//!
//! Run with `RUST_LOG=debug cargo run --example pipeline` to see the
//! bake diagnostics.

use stagegraph::{DependencyBuilder, Scheduler, System};

// Resource classes the demo units conflict over.
struct Input;
struct Positions;
struct Velocities;

struct PollInput;
impl System for PollInput {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.writes::<Input>();
    }
    fn update(&mut self, _delta_time: f32) {
        log::info!("polling input");
    }
}

struct ApplyControls;
impl System for ApplyControls {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.reads::<Input>();
        deps.writes::<Velocities>();
    }
    fn update(&mut self, _delta_time: f32) {
        log::info!("applying controls");
    }
}

struct Integrate;
impl System for Integrate {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.reads::<Velocities>();
        deps.writes::<Positions>();
    }
    fn update(&mut self, delta_time: f32) {
        log::info!("integrating positions over {delta_time}s");
    }
}

struct RenderScene;
impl System for RenderScene {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.reads::<Positions>();
    }
    fn update(&mut self, _delta_time: f32) {
        log::info!("rendering");
    }
}

struct PlayAudio;
impl System for PlayAudio {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.reads::<Positions>();
    }
    fn update(&mut self, _delta_time: f32) {
        log::info!("mixing audio");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut scheduler = Scheduler::new();
    scheduler.register(PollInput)?;
    scheduler.register(ApplyControls)?;
    scheduler.register(Integrate)?;
    scheduler.register(RenderScene)?;
    scheduler.register(PlayAudio)?;
    scheduler.bake()?;

    // RenderScene and PlayAudio only read Positions, so they share the
    // final stage.
    for (i, stage) in scheduler.execution_stages().iter().enumerate() {
        println!("stage {i}: {}", stage.join(", "));
    }

    for _ in 0..3 {
        scheduler.execute(1.0 / 60.0)?;
    }
    scheduler.shutdown()?;
    Ok(())
}

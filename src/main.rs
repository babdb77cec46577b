//! Ridgeline entry point
//!
//! Native builds run the simulation headless with a simple autopilot and
//! log how each run ends. Usage: `ridgeline [seed] [ticks]`.

use ridgeline::Tuning;
use ridgeline::consts::SIM_DT;
use ridgeline::input::{CommandQueue, InputEvent};
use ridgeline::sim::{GameEvent, GamePhase, GameSession, SimulationClock};

/// How far ahead (world units) the autopilot looks for rocks
const LOOKAHEAD: f32 = 60.0;

/// Press the action control when a rock is coming up, release it right after
fn autopilot(session: &GameSession, held: &mut bool, queue: &mut CommandQueue) {
    if *held {
        queue.push_event(InputEvent::ActionReleased, session.phase);
        *held = false;
        return;
    }
    if session.phase == GamePhase::GameOver {
        queue.push_event(InputEvent::RestartPressed, session.phase);
        return;
    }

    let player = &session.player;
    if !player.on_ground {
        return;
    }
    let front = player.footprint().right();
    let rock_ahead = session.terrain.obstacles().iter().any(|o| {
        let gap = o.footprint.left() - front;
        (0.0..LOOKAHEAD).contains(&gap)
    });
    if rock_ahead {
        queue.push_event(InputEvent::ActionPressed, session.phase);
        *held = true;
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Ridgeline (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let budget = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60);

    let tuning = match std::env::var("RIDGELINE_TUNING") {
        Ok(path) => Tuning::load(path),
        Err(_) => Tuning::default(),
    };

    let mut session = GameSession::new(seed, &tuning);
    let mut clock = SimulationClock::default();
    let mut queue = CommandQueue::new();
    let mut held = false;

    let mut runs = 1u32;
    let mut best = 0.0f32;
    let mut jumps = 0u32;

    while clock.ticks() < budget {
        autopilot(&session, &mut held, &mut queue);
        for event in clock.run_frame(&mut session, &mut queue, SIM_DT) {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::GameOver { distance } => {
                    best = best.max(distance);
                    println!("run {runs}: {distance:.0} units ({jumps} jumps)");
                    jumps = 0;
                }
                GameEvent::Restarted { .. } => runs += 1,
                _ => {}
            }
        }
    }

    if session.phase == GamePhase::Playing {
        let distance = session.player.distance();
        best = best.max(distance);
        println!("run {runs}: {distance:.0} units so far ({jumps} jumps)");
    }
    println!(
        "{} ticks, {} runs, best distance {:.0}",
        clock.ticks(),
        runs,
        best
    );
}

//! Engine loop thread: ticks one `SimulationEngine` at the base rate and
//! fans tick reports out to subscribers.
//!
//! The engine is created inside the thread so it never crosses threads.
//! Commands arrive over an `mpsc` channel and are applied between ticks,
//! so a command always sees a fully completed tick.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use skyguard_core::constants::BASE_TICK_SECS;
use skyguard_core::events::TickReport;
use skyguard_core::state::WorldState;
use skyguard_sim::{EngineConfig, SimulationEngine};

use crate::state::{EngineHandle, HostCommand, HostError};

/// Wall-clock duration of one base tick at real-time pacing.
pub const TICK_DURATION: Duration = Duration::from_millis((BASE_TICK_SECS * 1000.0) as u64);

/// Validate `config`, spawn an engine on a named thread and return its
/// handle.
pub fn spawn_engine_loop(
    config: EngineConfig,
    tick_interval: Duration,
) -> Result<EngineHandle, HostError> {
    config.validate()?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>();
    let latest_state = Arc::new(Mutex::new(None));
    let name = config.name.clone();

    let shared = Arc::clone(&latest_state);
    let thread = std::thread::Builder::new()
        .name(format!("skyguard-{name}"))
        .spawn(move || run_engine_loop(config, tick_interval, cmd_rx, &shared))
        .map_err(HostError::Spawn)?;

    Ok(EngineHandle::new(name, cmd_tx, latest_state, thread))
}

/// The loop. Runs until Shutdown or until every handle is gone.
fn run_engine_loop(
    config: EngineConfig,
    tick_interval: Duration,
    cmd_rx: mpsc::Receiver<HostCommand>,
    latest_state: &Mutex<Option<WorldState>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut subscribers: Vec<mpsc::Sender<TickReport>> = Vec::new();
    let mut next_tick_time = Instant::now();
    info!(engine = %engine.config().name, ?tick_interval, "engine loop started");

    store(latest_state, engine.current_state());

    loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(HostCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(engine = %engine.config().name, "engine loop stopped");
                    return;
                }
                Ok(command) => {
                    if apply(&mut engine, command, &mut subscribers) {
                        store(latest_state, engine.current_state());
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (the engine ignores it unless running)
        let report = engine.tick();

        // 3. Publish
        if report.changed() {
            publish(&mut subscribers, &report);
            store(latest_state, engine.current_state());
        }

        // 4. Sleep until the next tick
        next_tick_time += tick_interval;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_interval * 2 {
            // Too far behind; reset instead of bursting to catch up
            next_tick_time = now;
        }
    }
}

/// Apply one command. Returns whether the shared state should be refreshed.
fn apply(
    engine: &mut SimulationEngine,
    command: HostCommand,
    subscribers: &mut Vec<mpsc::Sender<TickReport>>,
) -> bool {
    match command {
        HostCommand::Engine(command, reply) => {
            let _ = reply.send(engine.handle_command(command));
            true
        }
        HostCommand::IngestFeed(records, reply) => {
            let _ = reply.send(engine.ingest_feed(&records));
            true
        }
        HostCommand::Query(reply) => {
            let _ = reply.send(engine.current_state());
            false
        }
        HostCommand::Subscribe(tx) => {
            subscribers.push(tx);
            debug!(engine = %engine.config().name, subscribers = subscribers.len(), "subscriber added");
            false
        }
        HostCommand::Shutdown => false,
    }
}

/// Send a report to every subscriber, dropping the ones that hung up.
fn publish(subscribers: &mut Vec<mpsc::Sender<TickReport>>, report: &TickReport) {
    subscribers.retain(|tx| tx.send(report.clone()).is_ok());
}

fn store(latest_state: &Mutex<Option<WorldState>>, state: WorldState) {
    if let Ok(mut lock) = latest_state.lock() {
        *lock = Some(state);
    }
}

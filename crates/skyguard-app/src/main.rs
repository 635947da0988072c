use std::process::ExitCode;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use skyguard_app::config::HostConfig;
use skyguard_app::game_loop::spawn_engine_loop;
use skyguard_app::observability::init_tracing;
use skyguard_app::state::{EngineHandle, HostError};
use skyguard_core::enums::Recommendation;
use skyguard_core::events::EngineEvent;
use skyguard_sim::EngineConfig;

/// Interval between status lines.
const STATUS_EVERY: Duration = Duration::from_secs(5);

fn main() -> ExitCode {
    let config = HostConfig::from_env();
    init_tracing(config.log_json);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "host failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &HostConfig) -> Result<(), HostError> {
    let authoritative = spawn_engine_loop(config.authoritative_engine()?, config.tick_interval)?;
    let local = spawn_engine_loop(EngineConfig::client_local(), config.tick_interval)?;
    info!(
        engines = ?[authoritative.name(), local.name()],
        tick_interval = ?config.tick_interval,
        run_duration = ?config.run_duration,
        "host started"
    );

    let reports = authoritative.subscribe()?;
    authoritative.start()?;
    local.start()?;

    let started = Instant::now();
    let mut last_status = Instant::now();
    loop {
        if config.run_duration.is_some_and(|d| started.elapsed() >= d) {
            break;
        }

        match reports.recv_timeout(config.tick_interval * 10) {
            Ok(report) => {
                for event in &report.events {
                    if let EngineEvent::AlertsRaised(alerts) = event {
                        for alert in alerts {
                            info!(
                                engine = authoritative.name(),
                                category = ?alert.category,
                                priority = ?alert.priority,
                                "{}",
                                alert.message
                            );
                        }
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Err(HostError::Disconnected),
        }

        if last_status.elapsed() >= STATUS_EVERY {
            last_status = Instant::now();
            log_status(&authoritative);
            log_status(&local);
            engage_top_recommendation(&local);
        }
    }

    log_status(&authoritative);
    log_status(&local);
    authoritative.shutdown();
    local.shutdown();
    info!("host stopped");
    Ok(())
}

fn log_status(handle: &EngineHandle) {
    let Some(state) = handle.latest_state() else {
        return;
    };
    info!(
        engine = handle.name(),
        tick = state.time.tick,
        aircraft = state.status.aircraft_count,
        hostile = state.status.hostile_count,
        suspect = state.status.suspect_count,
        threat = ?state.status.threat_level,
        readiness = state.status.readiness,
        queued = state.engagement_queue.len(),
        "status"
    );
}

/// Operator stand-in: fire at the head of the queue when it says ENGAGE.
fn engage_top_recommendation(handle: &EngineHandle) {
    let Some(state) = handle.latest_state() else {
        return;
    };
    let Some(top) = state
        .engagement_queue
        .first()
        .filter(|c| c.recommendation == Recommendation::Engage)
    else {
        return;
    };
    match handle.launch_at(top.aircraft_id) {
        Ok(missile_id) => info!(engine = handle.name(), missile_id, target = %top.callsign, "manual launch"),
        Err(e) => warn!(engine = handle.name(), error = %e, "manual launch refused"),
    }
}

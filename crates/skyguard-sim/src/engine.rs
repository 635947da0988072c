//! Simulation engine: the tick orchestrator.
//!
//! `SimulationEngine` owns the hecs ECS world and every piece of mutable
//! simulation state. It is the single writer: commands and ticks both take
//! `&mut self`. Completely headless, enabling deterministic testing.
//!
//! Per base tick, in order:
//! 1. world update (movement, population, classification, engagement queue)
//! 2. alert generation
//! 3. missile kinematics and cleanup
//! 4. autonomous engagement
//!
//! A snapshot is pushed to history at the end of every tick that ran a
//! world update.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use skyguard_core::commands::{CommandOutcome, EngineCommand};
use skyguard_core::components::{Aircraft, Explosion};
use skyguard_core::constants::{ALERT_LOG_CAPACITY, BASE_TICK_SECS, WORLD_UPDATE_SECS};
use skyguard_core::enums::{AlertCategory, AlertPriority, RestockPolicy, RunState};
use skyguard_core::error::{CommandError, CommandResult, ConfigError};
use skyguard_core::events::{Alert, EngineEvent, TickReport};
use skyguard_core::ring::RingBuffer;
use skyguard_core::state::{EngagementCandidate, SystemStatus, WorldState};
use skyguard_core::types::{AircraftId, MissileId, SimTime};
use skyguard_threat_ai::anomaly::AnomalyDetector;

use crate::config::EngineConfig;
use crate::engagement;
use crate::feed::FeedRecord;
use crate::history::{History, IdCounters, WorldSnapshot};
use crate::schedule::Cadences;
use crate::systems;
use crate::systems::alerts::AlertDraft;
use crate::systems::missile_kinematics::MissileOutcome;
use crate::world_setup;

/// Changes accumulated since the last `TickReport`.
#[derive(Debug, Default)]
struct PendingEvents {
    aircraft: bool,
    missiles: bool,
    status: bool,
    alerts: Vec<Alert>,
    explosions: Vec<Explosion>,
    /// Something observable changed; bump the revision.
    dirty: bool,
}

impl PendingEvents {
    fn aircraft(&mut self) {
        self.aircraft = true;
        self.status = true;
        self.dirty = true;
    }

    fn missiles(&mut self) {
        self.missiles = true;
        self.dirty = true;
    }

    fn status(&mut self) {
        self.status = true;
        self.dirty = true;
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: EngineConfig,
    world: World,
    time: SimTime,
    run_state: RunState,
    rng: ChaCha8Rng,
    ids: IdCounters,
    cadences: Cadences,
    detector: AnomalyDetector,
    /// Heading of each aircraft at the previous classification pass.
    last_headings: BTreeMap<AircraftId, f64>,
    engagement_queue: Vec<EngagementCandidate>,
    alerts: RingBuffer<Alert>,
    history: History,
    available_interceptors: u32,
    uptime_secs: f64,
    revision: u64,
    /// Distance behind the newest snapshot while rewinding.
    rewind_steps: Option<usize>,
    despawn_buffer: Vec<Entity>,
    pending: PendingEvents,
}

impl SimulationEngine {
    /// Validate `config`, then build the engine. Use for configs that came
    /// from outside the program.
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create an engine with its initial population. The engine starts
    /// stopped. `config` is assumed valid; see `EngineConfig::validate`.
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        let mut ids = IdCounters::default();
        world_setup::populate(&mut world, &mut rng, &mut ids, &config);
        let cadences = Cadences::starting_at(0, &config, &mut rng);
        let available_interceptors = config.initial_interceptors.min(config.max_interceptors);

        info!(
            engine = %config.name,
            seed = config.seed,
            aircraft = config.initial_aircraft,
            interceptors = available_interceptors,
            "engine created"
        );

        Self {
            config,
            world,
            time: SimTime::default(),
            run_state: RunState::Stopped,
            rng,
            ids,
            cadences,
            detector: AnomalyDetector::new(),
            last_headings: BTreeMap::new(),
            engagement_queue: Vec::new(),
            alerts: RingBuffer::new(ALERT_LOG_CAPACITY),
            history: History::default(),
            available_interceptors,
            uptime_secs: 0.0,
            revision: 0,
            rewind_steps: None,
            despawn_buffer: Vec::new(),
            pending: PendingEvents::default(),
        }
    }

    // --- Commands ---

    /// Apply one command and report the outcome.
    pub fn handle_command(&mut self, command: EngineCommand) -> CommandResult<CommandOutcome> {
        let result = match command {
            EngineCommand::Start => {
                self.start();
                Ok(CommandOutcome::Ack)
            }
            EngineCommand::Stop => {
                self.stop();
                Ok(CommandOutcome::Ack)
            }
            EngineCommand::Pause => self.pause().map(|()| CommandOutcome::Ack),
            EngineCommand::Resume => self.resume().map(|()| CommandOutcome::Ack),
            EngineCommand::Rewind { steps } => self
                .rewind(steps)
                .map(|tick| CommandOutcome::Rewound { tick }),
            EngineCommand::LaunchAt { target_id } => self
                .launch_at(target_id)
                .map(|missile_id| CommandOutcome::Launched { missile_id }),
        };
        if let Err(error) = &result {
            warn!(engine = %self.config.name, %error, "command rejected");
        }
        result
    }

    /// Begin or continue running. Starting from stopped resets activity
    /// cadences and discards explosions; history is kept but not replayed.
    pub fn start(&mut self) {
        match self.run_state {
            RunState::Running => {}
            RunState::Paused | RunState::Rewinding => {
                self.commit_rewind();
                self.run_state = RunState::Running;
                self.pending.status();
            }
            RunState::Stopped => {
                systems::cleanup::clear_explosions(&mut self.world, &mut self.despawn_buffer);
                self.cadences = Cadences::starting_at(self.time.tick, &self.config, &mut self.rng);
                self.run_state = RunState::Running;
                self.pending.status();
                info!(engine = %self.config.name, tick = self.time.tick, "engine started");
            }
        }
        self.commit();
    }

    /// Halt every activity. State stays queryable.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Stopped {
            return;
        }
        self.commit_rewind();
        self.run_state = RunState::Stopped;
        self.pending.status();
        self.commit();
        info!(engine = %self.config.name, tick = self.time.tick, "engine stopped");
    }

    /// Freeze all activities. Idempotent while paused or rewinding.
    pub fn pause(&mut self) -> CommandResult<()> {
        match self.run_state {
            RunState::Stopped => Err(CommandError::Halted),
            RunState::Paused | RunState::Rewinding => Ok(()),
            RunState::Running => {
                self.run_state = RunState::Paused;
                self.pending.status();
                self.commit();
                debug!(engine = %self.config.name, tick = self.time.tick, "paused");
                Ok(())
            }
        }
    }

    /// Leave pause or rewind. Resuming from a rewound point discards the
    /// snapshots newer than it.
    pub fn resume(&mut self) -> CommandResult<()> {
        match self.run_state {
            RunState::Stopped => Err(CommandError::Halted),
            RunState::Running => Ok(()),
            RunState::Paused | RunState::Rewinding => {
                self.commit_rewind();
                self.run_state = RunState::Running;
                self.pending.status();
                self.commit();
                debug!(engine = %self.config.name, tick = self.time.tick, "resumed");
                Ok(())
            }
        }
    }

    /// Replace live state with the snapshot `steps` entries behind the
    /// newest. The engine stays paused until `resume`. Returns the tick of
    /// the restored snapshot.
    pub fn rewind(&mut self, steps: usize) -> CommandResult<u64> {
        if self.run_state == RunState::Stopped {
            return Err(CommandError::Halted);
        }
        let snapshot = self
            .history
            .get(steps)
            .cloned()
            .ok_or(CommandError::HistoryUnavailable(steps))?;
        let tick = snapshot.time.tick;

        self.restore(snapshot);
        self.run_state = RunState::Rewinding;
        self.rewind_steps = Some(steps);
        // Events raised after the snapshot describe a timeline that no longer exists.
        self.pending = PendingEvents::default();
        self.pending.aircraft();
        self.pending.missiles();
        self.commit();

        info!(engine = %self.config.name, steps, tick, "rewound");
        Ok(tick)
    }

    /// Fire one interceptor at a live aircraft.
    pub fn launch_at(&mut self, target_id: AircraftId) -> CommandResult<MissileId> {
        if !matches!(self.run_state, RunState::Running | RunState::Paused) {
            return Err(CommandError::Halted);
        }
        let missile_id = self.fire(target_id)?;
        self.commit();
        Ok(missile_id)
    }

    /// Add aircraft from an external feed. Records without a usable
    /// position are skipped. Returns the ids assigned, in record order.
    pub fn ingest_feed(&mut self, records: &[FeedRecord]) -> CommandResult<Vec<AircraftId>> {
        if !matches!(self.run_state, RunState::Running | RunState::Paused) {
            return Err(CommandError::Halted);
        }
        let mut added = Vec::with_capacity(records.len());
        for record in records.iter().filter(|r| r.is_plottable()) {
            let aircraft = record.to_aircraft(self.ids.next_aircraft());
            added.push(aircraft.id);
            self.world.spawn((aircraft,));
        }
        let skipped = records.len() - added.len();
        if skipped > 0 {
            warn!(engine = %self.config.name, skipped, "feed records without a usable position");
        }
        if !added.is_empty() {
            self.pending.aircraft();
            self.commit();
        }
        debug!(engine = %self.config.name, added = added.len(), "feed ingested");
        Ok(added)
    }

    // --- Queries ---

    /// The complete inspectable state. Pure: calling it twice without a
    /// tick in between returns identical values.
    pub fn current_state(&self) -> WorldState {
        let aircraft = systems::snapshot::aircraft(&self.world);
        let status = self.status_for(&aircraft);
        WorldState {
            time: self.time,
            run_state: self.run_state,
            revision: self.revision,
            aircraft,
            missiles: systems::snapshot::missiles(&self.world),
            alerts: self.alerts.to_vec(),
            explosions: systems::snapshot::explosions(&self.world),
            engagement_queue: self.engagement_queue.clone(),
            status,
            history_len: self.history.len(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn available_interceptors(&self) -> u32 {
        self.available_interceptors
    }

    pub fn engagement_queue(&self) -> &[EngagementCandidate] {
        &self.engagement_queue
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn detector(&self) -> &AnomalyDetector {
        &self.detector
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- Tick ---

    /// Advance the simulation by one base tick, unless halted, and report
    /// what changed since the previous report.
    pub fn tick(&mut self) -> TickReport {
        if self.run_state.is_live() {
            self.run_activities();
        }
        self.report()
    }

    fn run_activities(&mut self) {
        let now = self.time.tick;

        let world_due = self.cadences.world.is_due(now);
        if world_due {
            self.update_world();
            self.cadences.world.reschedule(now, &mut self.rng);
        }

        if self.cadences.alerts.is_due(now) {
            if let Some(draft) = systems::alerts::run(&self.world, &mut self.rng, &self.config) {
                self.raise_alert(draft);
            }
            self.cadences.alerts.reschedule(now, &mut self.rng);
        }

        self.update_missiles();

        if self.cadences.engagement.is_due(now) {
            self.autonomous_engagement();
            self.cadences.engagement.reschedule(now, &mut self.rng);
        }

        self.time.advance();
        self.uptime_secs += BASE_TICK_SECS;

        if world_due {
            self.history.push(self.capture());
        }
        self.commit();
    }

    fn update_world(&mut self) {
        systems::movement::run(&mut self.world, &mut self.rng, WORLD_UPDATE_SECS);

        let change = systems::population::run(
            &mut self.world,
            &mut self.rng,
            &mut self.ids,
            &self.config,
            &mut self.despawn_buffer,
        );
        for aircraft_id in &change.spawned {
            debug!(engine = %self.config.name, aircraft_id, "aircraft spawned");
        }
        for aircraft_id in change.removed() {
            debug!(engine = %self.config.name, aircraft_id, "aircraft retired");
        }

        systems::classification::run(
            &mut self.world,
            &mut self.rng,
            &mut self.detector,
            &mut self.last_headings,
            &self.config.defended_center,
        );

        let mut query = self.world.query::<&Aircraft>();
        self.engagement_queue = engagement::build_queue(
            query.iter().map(|(_, aircraft)| aircraft),
            &self.config.defended_center,
            self.config.missile_speed_kmh,
        );
        drop(query);

        self.pending.aircraft();
    }

    fn update_missiles(&mut self) {
        let now_secs = self.time.elapsed_secs;
        let report = systems::missile_kinematics::run(&mut self.world, now_secs, BASE_TICK_SECS);
        if report.touched > 0 {
            self.pending.missiles();
        }

        for outcome in report.outcomes {
            match outcome {
                MissileOutcome::Impacted {
                    missile_id,
                    designation,
                    target_id,
                    callsign,
                    at,
                } => {
                    let explosion = Explosion {
                        id: self.ids.next_explosion(),
                        position: at,
                        timestamp: now_secs,
                        callsign: callsign.clone(),
                    };
                    self.world.spawn((explosion.clone(),));
                    self.pending.explosions.push(explosion);

                    self.detector.forget(target_id);
                    self.last_headings.remove(&target_id);
                    self.engagement_queue.retain(|c| c.aircraft_id != target_id);
                    self.restock();
                    self.pending.aircraft();

                    self.raise_alert(
                        AlertDraft::new(
                            AlertCategory::Threat,
                            AlertPriority::High,
                            format!("{callsign} destroyed by {designation} #{missile_id}"),
                        )
                        .at(at),
                    );
                    info!(
                        engine = %self.config.name,
                        missile_id,
                        aircraft_id = target_id,
                        %callsign,
                        "intercept"
                    );
                }
                MissileOutcome::Lost {
                    missile_id,
                    target_id,
                } => {
                    self.raise_alert(AlertDraft::new(
                        AlertCategory::Info,
                        AlertPriority::Low,
                        format!("Interceptor #{missile_id} lost track of target {target_id}"),
                    ));
                    debug!(engine = %self.config.name, missile_id, aircraft_id = target_id, "missile lost");
                }
                MissileOutcome::Expired {
                    missile_id,
                    target_id,
                } => {
                    self.raise_alert(AlertDraft::new(
                        AlertCategory::Info,
                        AlertPriority::Low,
                        format!("Interceptor #{missile_id} self-destructed pursuing target {target_id}"),
                    ));
                    debug!(engine = %self.config.name, missile_id, aircraft_id = target_id, "missile expired");
                }
            }
        }

        let cleaned =
            systems::cleanup::run(&mut self.world, now_secs, &mut self.despawn_buffer);
        if cleaned.missiles > 0 {
            self.pending.missiles();
        }
        if cleaned.explosions > 0 {
            self.pending.dirty = true;
        }
    }

    fn autonomous_engagement(&mut self) {
        if self.available_interceptors == 0 {
            debug!(engine = %self.config.name, "autonomous engagement skipped: magazine empty");
            return;
        }
        let Some(target_id) =
            systems::fire_control::autonomous_target(&self.world, &self.engagement_queue)
        else {
            return;
        };
        if !self
            .rng
            .gen_bool(self.config.launch_probability.clamp(0.0, 1.0))
        {
            return;
        }
        match self.fire(target_id) {
            Ok(missile_id) => {
                debug!(engine = %self.config.name, missile_id, aircraft_id = target_id, "autonomous launch")
            }
            Err(error) => {
                debug!(engine = %self.config.name, %error, "autonomous launch skipped")
            }
        }
    }

    // --- Internals ---

    fn fire(&mut self, target_id: AircraftId) -> CommandResult<MissileId> {
        let missile = systems::fire_control::launch(
            &mut self.world,
            &mut self.ids,
            &mut self.available_interceptors,
            &self.config,
            target_id,
            self.time.elapsed_secs,
        )?;
        self.pending.missiles();
        self.pending.status();

        self.raise_alert(
            AlertDraft::new(
                AlertCategory::System,
                AlertPriority::Medium,
                format!(
                    "{} #{} launched at target {}",
                    missile.designation, missile.id, target_id
                ),
            )
            .at(missile.start_position),
        );
        info!(
            engine = %self.config.name,
            missile_id = missile.id,
            aircraft_id = target_id,
            remaining = self.available_interceptors,
            "interceptor launched"
        );
        Ok(missile.id)
    }

    fn restock(&mut self) {
        if self.config.restock_policy == RestockPolicy::RestockOnKill
            && self.available_interceptors < self.config.max_interceptors
        {
            self.available_interceptors += 1;
            self.pending.status();
        }
    }

    fn raise_alert(&mut self, draft: AlertDraft) {
        let alert = Alert {
            id: self.ids.next_alert(),
            timestamp: self.time.elapsed_secs,
            category: draft.category,
            priority: draft.priority,
            message: draft.message,
            position: draft.position,
        };
        self.alerts.push(alert.clone());
        self.pending.alerts.push(alert);
        self.pending.dirty = true;
    }

    fn status_for(&self, aircraft: &[Aircraft]) -> SystemStatus {
        systems::snapshot::system_status(
            aircraft,
            self.uptime_secs,
            self.available_interceptors,
            self.config.max_interceptors,
        )
    }

    /// Bump the revision if anything changed since the last bump.
    fn commit(&mut self) {
        if self.pending.dirty {
            self.revision += 1;
            self.pending.dirty = false;
        }
    }

    /// Leaving rewind branches history at the restored point.
    fn commit_rewind(&mut self) {
        if let Some(steps) = self.rewind_steps.take() {
            self.history.discard_newer_than(steps);
        }
    }

    fn report(&mut self) -> TickReport {
        let pending = std::mem::take(&mut self.pending);
        let mut events = Vec::new();

        let aircraft = if pending.aircraft || pending.status {
            systems::snapshot::aircraft(&self.world)
        } else {
            Vec::new()
        };
        let status = pending.status.then(|| self.status_for(&aircraft));
        if pending.aircraft {
            events.push(EngineEvent::AircraftUpdated(aircraft));
        }
        if !pending.alerts.is_empty() {
            events.push(EngineEvent::AlertsRaised(pending.alerts));
        }
        if pending.missiles {
            events.push(EngineEvent::MissilesUpdated(systems::snapshot::missiles(
                &self.world,
            )));
        }
        if !pending.explosions.is_empty() {
            events.push(EngineEvent::Explosions(pending.explosions));
        }
        if let Some(status) = status {
            events.push(EngineEvent::StatusChanged(status));
        }

        TickReport {
            time: self.time,
            revision: self.revision,
            events,
        }
    }

    fn capture(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.time,
            uptime_secs: self.uptime_secs,
            aircraft: systems::snapshot::aircraft(&self.world),
            missiles: systems::snapshot::missiles(&self.world),
            alerts: self.alerts.to_vec(),
            explosions: systems::snapshot::explosions(&self.world),
            engagement_queue: self.engagement_queue.clone(),
            available_interceptors: self.available_interceptors,
            predictions: self.detector.predictions().clone(),
            last_headings: self.last_headings.clone(),
            ids: self.ids,
            rng: self.rng.clone(),
            cadences: self.cadences,
        }
    }

    fn restore(&mut self, snapshot: WorldSnapshot) {
        self.world.clear();
        for aircraft in snapshot.aircraft {
            self.world.spawn((aircraft,));
        }
        for missile in snapshot.missiles {
            self.world.spawn((missile,));
        }
        for explosion in snapshot.explosions {
            self.world.spawn((explosion,));
        }

        self.alerts.clear();
        for alert in snapshot.alerts {
            self.alerts.push(alert);
        }

        self.time = snapshot.time;
        self.uptime_secs = snapshot.uptime_secs;
        self.engagement_queue = snapshot.engagement_queue;
        self.available_interceptors = snapshot.available_interceptors;
        self.detector.replace(snapshot.predictions);
        self.last_headings = snapshot.last_headings;
        self.ids = snapshot.ids;
        self.rng = snapshot.rng;
        self.cadences = snapshot.cadences;
    }

    // --- Test helpers ---

    /// Insert an aircraft with a fresh id. Returns the id assigned.
    #[cfg(test)]
    pub fn insert_aircraft(&mut self, mut aircraft: Aircraft) -> AircraftId {
        aircraft.id = self.ids.next_aircraft();
        let id = aircraft.id;
        self.world.spawn((aircraft,));
        id
    }

    /// Remove an aircraft by id, as if it left the airspace.
    #[cfg(test)]
    pub fn remove_aircraft(&mut self, id: AircraftId) -> bool {
        let entity = self
            .world
            .query::<&Aircraft>()
            .iter()
            .find(|(_, aircraft)| aircraft.id == id)
            .map(|(entity, _)| entity);
        match entity {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Remove every aircraft.
    #[cfg(test)]
    pub fn clear_aircraft(&mut self) {
        let ids: Vec<AircraftId> = systems::snapshot::aircraft(&self.world)
            .iter()
            .map(|a| a.id)
            .collect();
        for id in ids {
            self.remove_aircraft(id);
        }
    }
}

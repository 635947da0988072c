//! Host-side state shared between callers and an engine's loop thread.
//!
//! Callers never touch the engine directly. Every request travels over an
//! `mpsc` channel as a `HostCommand` carrying its own reply channel, which
//! keeps the `EngineHandle` API synchronous while the engine stays the
//! single writer on its thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::warn;

use skyguard_core::commands::{CommandOutcome, EngineCommand};
use skyguard_core::error::{CommandError, CommandResult, ConfigError};
use skyguard_core::events::TickReport;
use skyguard_core::state::WorldState;
use skyguard_core::types::{AircraftId, MissileId};
use skyguard_sim::feed::FeedRecord;

/// Requests sent to an engine loop thread.
#[derive(Debug)]
pub enum HostCommand {
    /// Apply an engine command and send back its outcome.
    Engine(EngineCommand, mpsc::Sender<CommandResult<CommandOutcome>>),
    /// Add aircraft from an external feed.
    IngestFeed(Vec<FeedRecord>, mpsc::Sender<CommandResult<Vec<AircraftId>>>),
    /// Read the complete state.
    Query(mpsc::Sender<WorldState>),
    /// Receive every tick report that carries events.
    Subscribe(mpsc::Sender<TickReport>),
    /// Shut down the loop thread gracefully.
    Shutdown,
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("engine thread disconnected")]
    Disconnected,

    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to read engine config: {0}")]
    ConfigIo(#[source] std::io::Error),

    #[error("invalid engine config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("rejected engine config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("unexpected reply to {0}")]
    UnexpectedOutcome(&'static str),
}

/// Synchronous handle to one engine running on its own thread.
pub struct EngineHandle {
    name: String,
    command_tx: mpsc::Sender<HostCommand>,
    /// Latest state, updated by the loop thread whenever something changed.
    latest_state: Arc<Mutex<Option<WorldState>>>,
    thread: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub(crate) fn new(
        name: String,
        command_tx: mpsc::Sender<HostCommand>,
        latest_state: Arc<Mutex<Option<WorldState>>>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            name,
            command_tx,
            latest_state,
            thread: Some(thread),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply one command and wait for its outcome.
    pub fn command(&self, command: EngineCommand) -> Result<CommandOutcome, HostError> {
        let outcome = self.request(|reply| HostCommand::Engine(command, reply))?;
        Ok(outcome?)
    }

    pub fn start(&self) -> Result<(), HostError> {
        self.command(EngineCommand::Start).map(|_| ())
    }

    pub fn stop(&self) -> Result<(), HostError> {
        self.command(EngineCommand::Stop).map(|_| ())
    }

    pub fn pause(&self) -> Result<(), HostError> {
        self.command(EngineCommand::Pause).map(|_| ())
    }

    pub fn resume(&self) -> Result<(), HostError> {
        self.command(EngineCommand::Resume).map(|_| ())
    }

    /// Returns the tick of the restored snapshot.
    pub fn rewind(&self, steps: usize) -> Result<u64, HostError> {
        match self.command(EngineCommand::Rewind { steps })? {
            CommandOutcome::Rewound { tick } => Ok(tick),
            _ => Err(HostError::UnexpectedOutcome("rewind")),
        }
    }

    pub fn launch_at(&self, target_id: AircraftId) -> Result<MissileId, HostError> {
        match self.command(EngineCommand::LaunchAt { target_id })? {
            CommandOutcome::Launched { missile_id } => Ok(missile_id),
            _ => Err(HostError::UnexpectedOutcome("launch")),
        }
    }

    pub fn ingest_feed(&self, records: Vec<FeedRecord>) -> Result<Vec<AircraftId>, HostError> {
        let ids = self.request(|reply| HostCommand::IngestFeed(records, reply))?;
        Ok(ids?)
    }

    /// Fresh state straight from the engine thread.
    pub fn current_state(&self) -> Result<WorldState, HostError> {
        self.request(HostCommand::Query)
    }

    /// Last state the loop published, without a round trip. `None` until
    /// the loop has published once.
    pub fn latest_state(&self) -> Option<WorldState> {
        self.latest_state.lock().ok().and_then(|lock| lock.clone())
    }

    /// Receive tick reports from now on. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Result<mpsc::Receiver<TickReport>, HostError> {
        let (tx, rx) = mpsc::channel();
        self.command_tx
            .send(HostCommand::Subscribe(tx))
            .map_err(|_| HostError::Disconnected)?;
        Ok(rx)
    }

    /// Stop the loop thread and wait for it to exit.
    pub fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        let _ = self.command_tx.send(HostCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(engine = %self.name, "engine thread panicked");
            }
        }
    }

    fn request<T>(
        &self,
        make: impl FnOnce(mpsc::Sender<T>) -> HostCommand,
    ) -> Result<T, HostError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.command_tx
            .send(make(reply_tx))
            .map_err(|_| HostError::Disconnected)?;
        reply_rx.recv().map_err(|_| HostError::Disconnected)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<HostCommand>();
        let (reply_tx, _reply_rx) = mpsc::channel();

        tx.send(HostCommand::Engine(EngineCommand::Start, reply_tx))
            .unwrap();
        tx.send(HostCommand::Shutdown).unwrap();

        let commands: Vec<HostCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            HostCommand::Engine(EngineCommand::Start, _)
        ));
        assert!(matches!(commands[1], HostCommand::Shutdown));
    }

    #[test]
    fn test_host_error_wraps_command_error() {
        let error: HostError = CommandError::NoInterceptorsRemaining.into();
        assert_eq!(error.to_string(), "no interceptors remaining");
        assert_eq!(
            HostError::Disconnected.to_string(),
            "engine thread disconnected"
        );
    }
}

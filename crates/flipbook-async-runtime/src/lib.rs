//! Event loop around [`FlipbookEngine`].
//!
//! Collaborators send [`ViewerCommand`]s; a single task applies them in
//! arrival order, fires debounce deadlines, and publishes [`Effect`]s.

mod worker;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

// Re-export types from the engine crate
pub use flipbook_core::{Effect, EngineOptions, EngineSnapshot, Event, FlipbookEngine};
pub use worker::engine_task;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Engine task has stopped")]
    ChannelClosed,
    #[error("Engine dropped the snapshot request")]
    SnapshotDropped,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Commands sent from collaborators to the engine task
#[derive(Debug)]
pub enum ViewerCommand {
    Apply(Event),
    Snapshot {
        reply: oneshot::Sender<EngineSnapshot>,
    },
}

/// Handle to a running engine task
pub struct EngineHandle {
    command_tx: mpsc::UnboundedSender<ViewerCommand>,
    /// Effects published by the engine, in order
    pub updates: mpsc::UnboundedReceiver<Effect>,
    task: JoinHandle<()>,
}

impl EngineHandle {
    /// Queue an event for the engine
    pub fn send(&self, event: Event) -> Result<()> {
        self.command_tx
            .send(ViewerCommand::Apply(event))
            .map_err(|_| RuntimeError::ChannelClosed)
    }

    /// State after every command queued before this call has been applied
    pub async fn snapshot(&self) -> Result<EngineSnapshot> {
        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(ViewerCommand::Snapshot { reply })
            .map_err(|_| RuntimeError::ChannelClosed)?;
        response.await.map_err(|_| RuntimeError::SnapshotDropped)
    }

    /// A sender collaborators can clone
    pub fn commands(&self) -> mpsc::UnboundedSender<ViewerCommand> {
        self.command_tx.clone()
    }

    /// Close the command channel and wait for the task to finish
    pub async fn shutdown(self) {
        let EngineHandle {
            command_tx, task, ..
        } = self;
        drop(command_tx);
        if let Err(e) = task.await {
            log::warn!("Engine task ended abnormally: {}", e);
        }
    }
}

/// Spawn the engine task on the current tokio runtime
pub fn spawn_engine(options: EngineOptions) -> EngineHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, update_rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(engine_task(options, command_rx, update_tx));

    EngineHandle {
        command_tx,
        updates: update_rx,
        task,
    }
}

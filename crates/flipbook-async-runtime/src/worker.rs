use crate::ViewerCommand;
use flipbook_core::{Effect, EngineOptions, Event, FlipbookEngine};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Far enough out that an idle timer never fires
const IDLE_TIMEOUT: Duration = Duration::from_secs(86_400);

/// Async task that owns the engine, applies commands and sends effects
pub async fn engine_task(
    options: EngineOptions,
    mut command_rx: mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: mpsc::UnboundedSender<Effect>,
) {
    let mut engine = FlipbookEngine::new(options);

    loop {
        let deadline = engine.next_deadline().map(Instant::from_std);
        let timer = sleep_until(deadline.unwrap_or_else(|| Instant::now() + IDLE_TIMEOUT));

        tokio::select! {
            cmd = command_rx.recv() => {
                let Some(cmd) = cmd else {
                    log::debug!("Command channel closed, stopping engine task");
                    break;
                };
                process_command(cmd, &mut engine, &mut command_rx, &update_tx);
            }
            _ = timer, if deadline.is_some() => {
                let effects = engine.tick(now());
                publish(effects, &update_tx);
            }
        }
    }
}

fn now() -> std::time::Instant {
    Instant::now().into_std()
}

fn publish(effects: Vec<Effect>, update_tx: &mpsc::UnboundedSender<Effect>) {
    for effect in effects {
        if update_tx.send(effect).is_err() {
            log::debug!("Update receiver dropped, discarding effect");
            return;
        }
    }
}

fn process_command(
    cmd: ViewerCommand,
    engine: &mut FlipbookEngine,
    command_rx: &mut mpsc::UnboundedReceiver<ViewerCommand>,
    update_tx: &mpsc::UnboundedSender<Effect>,
) {
    let mut next = Some(cmd);

    while let Some(cmd) = next.take() {
        match cmd {
            ViewerCommand::Apply(Event::Zoomed { mut scale }) => {
                // Collapse a burst of queued zoom frames into the latest one
                while let Ok(queued) = command_rx.try_recv() {
                    if let ViewerCommand::Apply(Event::Zoomed { scale: newer }) = queued {
                        log::trace!("Discarding queued zoom frame {}, using newer", scale);
                        scale = newer;
                    } else {
                        // Process after the zoom, preserving order
                        next = Some(queued);
                        break;
                    }
                }
                publish(engine.apply(Event::Zoomed { scale }, now()), update_tx);
            }
            ViewerCommand::Apply(event) => {
                publish(engine.apply(event, now()), update_tx);
            }
            ViewerCommand::Snapshot { reply } => {
                if reply.send(engine.snapshot()).is_err() {
                    log::debug!("Snapshot requester went away");
                }
            }
        }
    }
}

use std::{sync::Mutex, time::Duration};

use tokio::{task::JoinHandle, time};
use tracing::{debug, error, info};

use crate::{
    configuration::{AppState, State},
    push,
    types::NotificationPayload,
};

/// Cancellable reminder schedule tied to subscription state.
///
/// The task is started when the registry gains its first subscription and
/// stopped when the last one is removed; while running it dispatches the
/// configured reminder payload at every interval tick, skipping ticks
/// where the registry is empty.
#[derive(Debug, Default)]
pub struct Reminder {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Reminder {
    pub fn new() -> Reminder {
        Reminder::default()
    }

    /// Spawns the interval task. A no-op while a task is already running.
    pub fn start(&self, state: AppState<State>) {
        let mut handle = match self.handle.lock() {
            Ok(handle) => handle,
            Err(_) => return,
        };

        if handle.is_some() {
            return;
        }

        info!(
            "starting reminder task, interval {}s",
            state.config.reminder_interval
        );
        *handle = Some(tokio::spawn(reminder_task(state)));
    }

    /// Aborts the running task, if any.
    pub fn stop(&self) {
        if let Ok(mut handle) = self.handle.lock() {
            if let Some(task) = handle.take() {
                task.abort();
                info!("stopped reminder task");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .map(|handle| handle.is_some())
            .unwrap_or(false)
    }
}

async fn reminder_task(state: AppState<State>) {
    let mut interval =
        time::interval(Duration::from_secs(state.config.reminder_interval));
    // The first tick completes immediately; reminders start one full
    // interval after the task is spawned.
    interval.tick().await;

    loop {
        interval.tick().await;

        if state.registry.is_empty() {
            continue;
        }

        let payload = NotificationPayload {
            title: state.config.reminder_title.to_owned(),
            body: state.config.reminder_body.to_owned(),
            icon: state.config.default_icon.to_owned(),
        };

        match push::dispatch(state.clone(), payload).await {
            Ok(results) => {
                debug!("reminder dispatched to {} subscriptions", results.len())
            }
            Err(e) => error!("reminder dispatch failed: {}", e),
        }
    }
}

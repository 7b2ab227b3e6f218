//! The coordinator task: debounce timer, in-flight guard, and state
//! bookkeeping.
//!
//! This module is internal -- users interact with it indirectly through
//! [`AutosaveHandle`](crate::AutosaveHandle).

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use futures::future::OptionFuture;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, sleep_until};

use crate::config::{ErrorHook, SuccessHook};
use crate::error::{AutosaveError, Result};
use crate::saveable::Saveable;
use crate::saver::Saver;
use crate::state::SaveState;

/// Messages from handles to the coordinator task.
pub(crate) enum Command<C> {
    Update(C),
    SaveNow(oneshot::Sender<Result<()>>),
    SetEnabled(bool),
}

enum Event<C> {
    Shutdown,
    HandleDropped,
    Closed,
    Cmd(Command<C>),
    Resolved(std::result::Result<Result<()>, JoinError>),
    Fire,
}

/// Owns every piece of mutable coordinator state. Runs as a single task,
/// so no locking is needed beyond the one-save-in-flight guard.
pub(crate) struct Worker<C: Saveable, S: Saver<C>> {
    rx: mpsc::Receiver<Command<C>>,
    shutdown_rx: oneshot::Receiver<()>,
    saver: Arc<S>,
    state_tx: watch::Sender<SaveState>,
    delay: Duration,
    enabled: bool,
    on_success: Option<SuccessHook<C>>,
    on_error: Option<ErrorHook>,

    /// Most recent content value observed.
    latest: C,
    state: SaveState,
    /// When the quiet-period countdown fires, if armed.
    deadline: Option<Instant>,
    /// The outstanding save task, at most one at a time.
    in_flight: Option<JoinHandle<Result<()>>>,
    /// The value handed to the in-flight save; compared against `latest`
    /// when the save resolves to detect edits that arrived mid-save.
    snapshot: Option<C>,
    /// Repliers waiting on the in-flight save.
    replies: Vec<oneshot::Sender<Result<()>>>,
    /// Manual-save requests that arrived while a save was in flight.
    queued: Vec<oneshot::Sender<Result<()>>>,
}

impl<C: Saveable, S: Saver<C>> Worker<C, S> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        rx: mpsc::Receiver<Command<C>>,
        shutdown_rx: oneshot::Receiver<()>,
        saver: S,
        state_tx: watch::Sender<SaveState>,
        initial: C,
        delay: Duration,
        enabled: bool,
        on_success: Option<SuccessHook<C>>,
        on_error: Option<ErrorHook>,
    ) -> Self {
        Self {
            rx,
            shutdown_rx,
            saver: Arc::new(saver),
            state_tx,
            delay,
            enabled,
            on_success,
            on_error,
            latest: initial,
            state: SaveState::default(),
            deadline: None,
            in_flight: None,
            snapshot: None,
            replies: Vec::new(),
            queued: Vec::new(),
        }
    }

    pub(crate) async fn run(mut self) {
        // A dropped primary handle closes the shutdown oneshot without a
        // signal; that alone does not end the session while senders are
        // still alive, so the branch is disarmed after it resolves.
        let mut shutdown_armed = true;

        loop {
            let armed = self.deadline.is_some();
            let saving = self.in_flight.is_some();

            let event = tokio::select! {
                biased;

                res = &mut self.shutdown_rx, if shutdown_armed => match res {
                    Ok(()) => Event::Shutdown,
                    Err(_) => Event::HandleDropped,
                },

                Some(join) = OptionFuture::from(self.in_flight.as_mut()), if saving => {
                    Event::Resolved(join)
                }

                msg = self.rx.recv() => match msg {
                    Some(cmd) => Event::Cmd(cmd),
                    None => Event::Closed,
                },

                _ = sleep_until(self.deadline.unwrap_or_else(Instant::now)), if armed => {
                    Event::Fire
                }
            };

            match event {
                Event::Shutdown => {
                    tracing::info!("Shutdown signal received");
                    self.teardown().await;
                    return;
                }
                Event::HandleDropped => {
                    shutdown_armed = false;
                    tracing::trace!("Primary handle dropped, remaining senders keep the session alive");
                }
                Event::Closed => {
                    tracing::debug!("All handles dropped, coordinator stopping");
                    self.teardown().await;
                    return;
                }
                Event::Resolved(join) => {
                    self.in_flight = None;
                    let result = flatten(join);
                    let succeeded = result.is_ok();
                    let changed = self.changed_since_snapshot();
                    self.settle(result, changed);
                    self.reschedule(succeeded, changed);
                }
                Event::Cmd(Command::Update(content)) => self.observe(content),
                Event::Cmd(Command::SaveNow(reply)) => {
                    if self.in_flight.is_some() {
                        // Queue, not drop: re-evaluated once the in-flight
                        // save resolves.
                        self.queued.push(reply);
                    } else {
                        self.begin_save(vec![reply]);
                    }
                }
                Event::Cmd(Command::SetEnabled(enabled)) => self.set_enabled(enabled),
                Event::Fire => self.begin_save(Vec::new()),
            }
        }
    }

    /// A content change: mark unsaved, clear any stale error, and restart
    /// the countdown. Identical values are not a change.
    fn observe(&mut self, content: C) {
        if content == self.latest {
            return;
        }
        self.latest = content;
        self.state.has_unsaved_changes = true;
        self.state.save_error = None;
        self.publish();
        if self.enabled && self.in_flight.is_none() {
            self.deadline = Some(Instant::now() + self.delay);
        }
        tracing::trace!("Content change observed");
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.deadline = None;
        } else if self.state.has_unsaved_changes && self.in_flight.is_none() {
            self.deadline = Some(Instant::now() + self.delay);
        }
    }

    /// Spawn a save of the latest value as its own task so edits keep
    /// being observed while it runs.
    fn begin_save(&mut self, replies: Vec<oneshot::Sender<Result<()>>>) {
        self.deadline = None;
        self.state.is_saving = true;
        self.publish();
        self.replies = replies;
        self.snapshot = Some(self.latest.clone());

        let saver = Arc::clone(&self.saver);
        let content = self.latest.clone();
        self.in_flight = Some(tokio::spawn(async move { saver.save(&content).await }));
        tracing::debug!("Save started");
    }

    /// Bookkeeping, callbacks, and replies for a resolved save.
    fn settle(&mut self, result: Result<()>, changed_during: bool) {
        let snapshot = self.snapshot.take();
        self.state.is_saving = false;
        match &result {
            Ok(()) => {
                self.state.has_unsaved_changes = changed_during;
                self.state.last_saved = Some(SystemTime::now());
                self.state.save_error = None;
                self.state.retry_count = 0;
                tracing::debug!("Save succeeded");
                if let (Some(hook), Some(content)) = (&self.on_success, &snapshot) {
                    hook(content);
                }
            }
            Err(e) => {
                // has_unsaved_changes is left as-is: the content is still
                // unsaved.
                self.state.save_error = Some(e.to_string());
                self.state.retry_count += 1;
                tracing::warn!("Save attempt failed: {e}");
                if let Some(hook) = &self.on_error {
                    hook(e);
                }
            }
        }
        self.publish();
        for tx in self.replies.drain(..) {
            let _ = tx.send(result.clone());
        }
    }

    /// Post-resolve scheduling: queued manual saves take priority; a
    /// change that arrived mid-save re-arms the countdown. A bare failure
    /// never reschedules itself -- retry policy belongs to the caller.
    ///
    /// A queued manual save is acknowledged without a new attempt only
    /// when the resolved save succeeded and nothing is left unsaved;
    /// otherwise it re-fires and carries the repliers with it.
    fn reschedule(&mut self, succeeded: bool, changed_during: bool) {
        if !self.queued.is_empty() {
            if self.state.has_unsaved_changes || !succeeded {
                let replies = std::mem::take(&mut self.queued);
                self.begin_save(replies);
            } else {
                for tx in self.queued.drain(..) {
                    let _ = tx.send(Ok(()));
                }
            }
        } else if changed_during && self.enabled {
            self.deadline = Some(Instant::now() + self.delay);
        }
    }

    /// Cancel the pending countdown, let an in-flight save finish on its
    /// own, and fail anyone still queued behind it.
    async fn teardown(&mut self) {
        self.deadline = None;
        if let Some(handle) = self.in_flight.take() {
            let result = flatten(handle.await);
            let changed = self.changed_since_snapshot();
            self.settle(result, changed);
        }
        for tx in self.queued.drain(..) {
            let _ = tx.send(Err(AutosaveError::ChannelClosed));
        }
        tracing::info!("Coordinator shut down");
    }

    fn changed_since_snapshot(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| *s != self.latest)
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}

/// A panicking saver counts as a failed attempt; the coordinator keeps
/// running either way.
fn flatten(join: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    match join {
        Ok(result) => result,
        Err(e) => Err(AutosaveError::SaveFailed(format!(
            "save task panicked: {e}"
        ))),
    }
}

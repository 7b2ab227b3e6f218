//! Handles for pushing edits to the coordinator and controlling its
//! lifecycle.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::error::{AutosaveError, Result};
use crate::saveable::Saveable;
use crate::state::SaveState;
use crate::worker::Command;

/// Primary handle returned by
/// [`AutosaveBuilder::build`](crate::AutosaveBuilder::build).
///
/// Owns the shutdown signal and the coordinator task join handle. Use
/// [`update`](Self::update) to report edits, [`save_now`](Self::save_now)
/// to bypass the quiet-period countdown, [`state`](Self::state) /
/// [`subscribe`](Self::subscribe) to observe status, and
/// [`shutdown`](Self::shutdown) to end the editing session.
///
/// For pushing edits from multiple tasks, obtain a lightweight
/// [`AutosaveSender`] via [`sender`](Self::sender).
pub struct AutosaveHandle<C: Saveable> {
    sender: mpsc::Sender<Command<C>>,
    state_rx: watch::Receiver<SaveState>,
    shutdown: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl<C: Saveable> AutosaveHandle<C> {
    pub(crate) fn new(
        sender: mpsc::Sender<Command<C>>,
        state_rx: watch::Receiver<SaveState>,
        shutdown: oneshot::Sender<()>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            sender,
            state_rx,
            shutdown: Some(shutdown),
            worker: Some(worker),
        }
    }

    /// Report the current content value after an edit.
    ///
    /// This is a non-blocking operation that places the value into the
    /// internal channel. Values identical to the latest one the
    /// coordinator has seen are ignored on the other side; a genuine
    /// change marks the content unsaved and restarts the quiet-period
    /// countdown. Returns [`AutosaveError::ChannelClosed`] if the channel
    /// is full or the coordinator has stopped.
    pub fn update(&self, content: C) -> Result<()> {
        self.sender
            .try_send(Command::Update(content))
            .map_err(|_| AutosaveError::ChannelClosed)
    }

    /// Report an edit, logging the error via `tracing` on failure instead
    /// of returning it.
    pub fn update_or_log(&self, content: C) {
        if let Err(e) = self.update(content) {
            tracing::error!("Failed to queue content update: {e}");
        }
    }

    /// Save the current content immediately, bypassing the countdown and
    /// the enabled flag.
    ///
    /// If a save is already in flight the request is queued behind it,
    /// never dropped: once the in-flight save resolves, a follow-up save
    /// fires only if the content is still unsaved, otherwise this resolves
    /// `Ok(())` right away.
    pub async fn save_now(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(Command::SaveNow(reply_tx))
            .await
            .map_err(|_| AutosaveError::ChannelClosed)?;
        reply_rx.await.map_err(|_| AutosaveError::ChannelClosed)?
    }

    /// Suspend or resume automatic saving.
    ///
    /// Disabling cancels any pending countdown; edits are still tracked
    /// and [`save_now`](Self::save_now) still works. Re-enabling with
    /// unsaved changes starts a fresh countdown.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.sender
            .try_send(Command::SetEnabled(enabled))
            .map_err(|_| AutosaveError::ChannelClosed)
    }

    /// Snapshot of the coordinator's current [`SaveState`].
    pub fn state(&self) -> SaveState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to [`SaveState`] transitions.
    ///
    /// The returned `watch` receiver yields a fresh snapshot on every
    /// transition; use it to drive a status indicator.
    pub fn subscribe(&self) -> watch::Receiver<SaveState> {
        self.state_rx.clone()
    }

    /// Create a lightweight, cloneable [`AutosaveSender`] that shares the
    /// same underlying channel.
    pub fn sender(&self) -> AutosaveSender<C> {
        AutosaveSender {
            sender: self.sender.clone(),
        }
    }

    /// End the editing session.
    ///
    /// Cancels any pending countdown -- it can never fire afterwards --
    /// and waits for an in-flight save to finish on its own before the
    /// coordinator exits. No final save is performed; callers wanting a
    /// last flush should call [`save_now`](Self::save_now) first.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.worker.take() {
            let _ = handle.await;
        }
    }
}

/// Lightweight, cloneable sender for reporting edits from multiple tasks.
///
/// Obtained via [`AutosaveHandle::sender`]. Does **not** own the shutdown
/// signal or the coordinator join handle; note that the coordinator keeps
/// running until the [`AutosaveHandle`] and every sender are dropped (or
/// [`AutosaveHandle::shutdown`] is called).
pub struct AutosaveSender<C: Saveable> {
    sender: mpsc::Sender<Command<C>>,
}

impl<C: Saveable> Clone for AutosaveSender<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C: Saveable> AutosaveSender<C> {
    /// Report the current content value after an edit.
    pub fn update(&self, content: C) -> Result<()> {
        self.sender
            .try_send(Command::Update(content))
            .map_err(|_| AutosaveError::ChannelClosed)
    }

    /// Report an edit, logging errors instead of returning them.
    pub fn update_or_log(&self, content: C) {
        if let Err(e) = self.update(content) {
            tracing::error!("Failed to queue content update: {e}");
        }
    }
}

//! Builder for configuring and launching a save coordinator.

use std::time::Duration;

use crate::error::AutosaveError;
use crate::handle::AutosaveHandle;
use crate::saveable::Saveable;
use crate::saver::Saver;
use crate::state::SaveState;
use crate::worker::Worker;

/// Callback fired after each successful save, with the content that was
/// saved.
pub type SuccessHook<C> = Box<dyn Fn(&C) + Send + 'static>;

/// Callback fired after each failed save attempt.
pub type ErrorHook = Box<dyn Fn(&AutosaveError) + Send + 'static>;

/// Builder for configuring and starting an [`AutosaveHandle`].
///
/// Provides a fluent API for setting the quiet-period delay, whether
/// automatic saving starts enabled, success/failure callbacks, and the
/// command channel capacity.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use autosave::{AutosaveBuilder, AutosaveError, SaverFn};
///
/// #[derive(Clone, PartialEq)]
/// struct Draft {
///     body: String,
/// }
///
/// # async fn example() {
/// let saver = SaverFn::new(|draft: Draft| async move {
///     // push `draft` to the backend ...
///     let _ = draft;
///     Ok::<(), AutosaveError>(())
/// });
///
/// let handle = AutosaveBuilder::new(Draft { body: String::new() }, saver)
///     .delay(Duration::from_secs(2))
///     .on_success(|d: &Draft| println!("saved {} bytes", d.body.len()))
///     .build();
/// # handle.shutdown().await;
/// # }
/// ```
pub struct AutosaveBuilder<C: Saveable, S: Saver<C>> {
    content: C,
    saver: S,
    delay: Duration,
    enabled: bool,
    channel_buffer: usize,
    on_success: Option<SuccessHook<C>>,
    on_error: Option<ErrorHook>,
}

impl<C: Saveable, S: Saver<C>> AutosaveBuilder<C, S> {
    /// Create a new builder from the content value at session start and
    /// the sink that persists it.
    ///
    /// The initial value is the clean baseline: it counts as saved for
    /// change detection, and
    /// [`last_saved`](crate::SaveState::last_saved) starts absent.
    ///
    /// Defaults: delay 2 s, automatic saving enabled, channel buffer 256,
    /// no callbacks.
    pub fn new(content: C, saver: S) -> Self {
        Self {
            content,
            saver,
            delay: Duration::from_secs(2),
            enabled: true,
            channel_buffer: 256,
            on_success: None,
            on_error: None,
        }
    }

    /// Quiet period that must elapse after the last edit before an
    /// automatic save fires. Each new edit restarts it.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Whether automatic saving starts enabled.
    ///
    /// When disabled, edits are still tracked but no countdown runs;
    /// [`save_now`](AutosaveHandle::save_now) always works. Can be
    /// toggled later via [`AutosaveHandle::set_enabled`].
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Capacity of the internal command channel between handles and the
    /// coordinator.
    pub fn channel_buffer(mut self, size: usize) -> Self {
        self.channel_buffer = size;
        self
    }

    /// Callback fired after each successful save, with the saved content.
    pub fn on_success(mut self, hook: impl Fn(&C) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Callback fired after each failed save attempt.
    pub fn on_error(mut self, hook: impl Fn(&AutosaveError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Consume the builder, spawn the coordinator task, and return the
    /// [`AutosaveHandle`] used to push edits and control the lifecycle.
    pub fn build(self) -> AutosaveHandle<C> {
        let (tx, rx) = tokio::sync::mpsc::channel(self.channel_buffer);
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let (state_tx, state_rx) = tokio::sync::watch::channel(SaveState::default());

        let worker = Worker::new(
            rx,
            shutdown_rx,
            self.saver,
            state_tx,
            self.content,
            self.delay,
            self.enabled,
            self.on_success,
            self.on_error,
        );
        let worker_handle = tokio::spawn(worker.run());

        AutosaveHandle::new(tx, state_rx, shutdown_tx, worker_handle)
    }
}

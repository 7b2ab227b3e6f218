//! The save seam: where content goes when a save fires.
//!
//! The crate ships with one built-in sink:
//!
//! - [`JsonFileSaver`] -- serializes content as JSON to a local file
//!   (requires the `json` feature).
//!
//! Implement the [`Saver`] trait for your own endpoint, or wrap an async
//! closure with [`SaverFn`].

#[cfg(feature = "json")]
mod json;

#[cfg(feature = "json")]
pub use json::JsonFileSaver;

use crate::error::Result;
use crate::saveable::Saveable;

use std::future::Future;

/// Trait for sinks that persist content on behalf of the coordinator.
///
/// This is the coordinator's only external interface: a function from a
/// content value to an async success/failure outcome. Returning `Err` is
/// the failure path -- the coordinator records it in
/// [`SaveState::save_error`](crate::SaveState::save_error) and keeps
/// running; it never escalates a failed save.
///
/// Implementations must be `Send + Sync + 'static` so saves can run as
/// their own task while the coordinator keeps observing edits.
///
/// # Implementing a custom sink
///
/// ```rust,no_run
/// use autosave::{Result, Saver};
///
/// struct DraftEndpoint {
///     url: String,
/// }
///
/// impl Saver<String> for DraftEndpoint {
///     async fn save(&self, content: &String) -> Result<()> {
///         // PUT the content somewhere ...
///         Ok(())
///     }
/// }
/// ```
pub trait Saver<C: Saveable>: Send + Sync + 'static {
    /// Persist `content`, resolving `Ok(())` on success.
    ///
    /// Called at most once at a time per coordinator instance. The
    /// coordinator does not cancel this future once started; it is allowed
    /// to take as long as it needs.
    fn save(&self, content: &C) -> impl Future<Output = Result<()>> + Send;
}

/// Adapter that turns an async closure into a [`Saver`].
///
/// The closure receives an owned clone of the content, which keeps the
/// returned future free of borrows.
///
/// # Example
///
/// ```rust,no_run
/// use autosave::{AutosaveError, SaverFn};
///
/// let saver = SaverFn::new(|content: String| async move {
///     if content.is_empty() {
///         return Err(AutosaveError::SaveFailed("empty draft".into()));
///     }
///     Ok(())
/// });
/// # let _ = saver;
/// ```
pub struct SaverFn<F> {
    f: F,
}

impl<F> SaverFn<F> {
    /// Wrap an `Fn(C) -> Future<Output = Result<()>>` closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<C, F, Fut> Saver<C> for SaverFn<F>
where
    C: Saveable,
    F: Fn(C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send,
{
    fn save(&self, content: &C) -> impl Future<Output = Result<()>> + Send {
        (self.f)(content.clone())
    }
}

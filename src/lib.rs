//! # autosave
//!
//! A debounced, async save coordinator: rapid successive edits to a
//! content value collapse into at most one save per quiet period, the
//! last edit always wins, and the caller gets observable status for UI
//! feedback.
//!
//! ## Overview
//!
//! `autosave` runs a coordinator task bound to one editing session. The
//! caller reports edits via [`AutosaveHandle::update`]; after a
//! configurable quiet period with no further edits, the coordinator
//! invokes a caller-supplied [`Saver`] with the latest value. At most one
//! save is ever in flight -- an edit arriving mid-save is never lost, it
//! re-arms the countdown once the save resolves. A manual
//! [`save_now`](AutosaveHandle::save_now) escape hatch bypasses the
//! countdown entirely.
//!
//! Save status ([`SaveState`]: saving, unsaved changes, last saved time,
//! last error, consecutive-failure count) is published through a `watch`
//! channel for rendering indicators like "Saving…" or "Save failed". A
//! failed save is never fatal: it is recorded and the coordinator keeps
//! accepting edits. No automatic retry is scheduled; `retry_count` exists
//! so callers can layer their own policy on top.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use autosave::{AutosaveBuilder, Result, Saver};
//!
//! #[derive(Clone, PartialEq)]
//! struct Draft {
//!     title: String,
//!     body: String,
//! }
//!
//! struct DraftEndpoint;
//!
//! impl Saver<Draft> for DraftEndpoint {
//!     async fn save(&self, draft: &Draft) -> Result<()> {
//!         // PUT to the backend, write to disk, ...
//!         # let _ = draft;
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() {
//! let handle = AutosaveBuilder::new(
//!     Draft { title: "untitled".into(), body: String::new() },
//!     DraftEndpoint,
//! )
//! .delay(Duration::from_secs(2))
//! .build();
//!
//! // Each edit restarts the quiet-period countdown; a burst of edits
//! // collapses into a single save of the final value.
//! handle.update(Draft { title: "untitled".into(), body: "first line".into() }).unwrap();
//!
//! // Flush immediately, bypassing the countdown:
//! handle.save_now().await.unwrap();
//!
//! // On session end; cancels any pending countdown without saving:
//! handle.shutdown().await;
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `json` | **yes** | Enables [`JsonFileSaver`] and the `serde` / `serde_json` dependencies. |

pub mod config;
pub mod error;
pub mod handle;
pub mod saveable;
pub mod saver;
pub mod state;
mod worker;

pub use config::{AutosaveBuilder, ErrorHook, SuccessHook};
pub use error::{AutosaveError, Result};
pub use handle::{AutosaveHandle, AutosaveSender};
pub use saveable::Saveable;
#[cfg(feature = "json")]
pub use saver::JsonFileSaver;
pub use saver::{Saver, SaverFn};
pub use state::{SavePhase, SaveState};

//! Error types for the `autosave` crate.

/// All errors that can occur during autosave operations.
///
/// The enum is `Clone` because a single save outcome may have to answer
/// several queued [`save_now`](crate::AutosaveHandle::save_now) callers.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AutosaveError {
    /// A save attempt failed. Carries the message reported by the
    /// [`Saver`](crate::Saver), or a description of the panic if the save
    /// task panicked.
    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// The internal channel to the coordinator worker is closed or full.
    #[error("Channel closed or full")]
    ChannelClosed,
}

/// A type alias for `Result<T, AutosaveError>`.
pub type Result<T> = std::result::Result<T, AutosaveError>;

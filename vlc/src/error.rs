// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for libvlc operations.
//!
//! libvlc reports failure through null handles and `-1` status codes, with
//! the diagnostic text kept in a thread-local slot read by `libvlc_errmsg`.
//! This module turns those conventions into a single Rust error enum.

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when using the libvlc bindings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `libvlc_new` returned a null instance. Carries libvlc's diagnostic text.
    #[error("Failed to create libvlc instance: {0}")]
    InstanceCreation(String),

    /// A required native entry point could not be bound.
    #[error("Resolving native function: {0}")]
    Resolve(#[from] vlc_sys::ResolveError),

    /// Failed to open the libvlc shared library.
    #[error("Loading library: {0}")]
    LibLoading(#[from] libloading::Error),

    /// A native call reported failure. Carries libvlc's diagnostic text.
    #[error("libvlc error: {0}")]
    Native(String),

    /// The instance has already been disposed.
    #[error("Instance has been disposed")]
    Disposed,

    /// A user callback panicked while libvlc was dispatching to it.
    ///
    /// `callback` names the event kind or `"exit handler"`.
    #[error("Callback {callback} panicked: {message}")]
    CallbackPanicked { callback: String, message: String },

    /// Failed to convert a Rust string to a C-compatible null-terminated string.
    #[error("Null string: {0}")]
    NulString(#[from] std::ffi::NulError),

    /// Failed to parse JSON returned by libvlc or read from a config file.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generic error for Rust-level failures not directly mapped to libvlc errors.
    #[error("Other error: {0}")]
    Other(String),
}

impl From<vlc_sys::LoadError> for Error {
    fn from(value: vlc_sys::LoadError) -> Self {
        match value {
            vlc_sys::LoadError::Library(err) => Error::LibLoading(err),
            vlc_sys::LoadError::Resolve(err) => Error::Resolve(err),
        }
    }
}

impl Error {
    /// Converts a libvlc `0` / `-1` status code into a [`Result`].
    ///
    /// On failure the diagnostic text is fetched from `libvlc_errmsg` on the
    /// calling thread, so this must run right after the failing call, and the
    /// slot must have been cleared before it.
    pub(crate) fn from_status(api: &crate::VlcApi, status: std::os::raw::c_int) -> Result<()> {
        if status == 0 {
            Ok(())
        } else {
            Err(Error::Native(api.last_error_or("operation failed")))
        }
    }
}

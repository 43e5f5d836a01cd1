// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Loading the libvlc function table.
//!
//! The native library is loaded once per process. [`load_api`] and
//! [`install_api`] write the process-wide table exactly once and hand out
//! shared [`VlcApiHandle`]s afterwards; [`load_api_from`] builds a private
//! table that never touches the global.

use std::{
    ffi::OsStr,
    ops::Deref,
    sync::{Arc, OnceLock},
};

use vlc_sys::{LibVlc, SymbolSource};

use crate::{Result, marshal};

/// Shared handle to a resolved libvlc function table.
pub type VlcApiHandle = Arc<VlcApi>;

static LOADED_API: OnceLock<VlcApiHandle> = OnceLock::new();

/// A resolved libvlc function table.
///
/// Dereferences to [`vlc_sys::LibVlc`] for raw calls.
pub struct VlcApi {
    table: LibVlc,
}

impl Deref for VlcApi {
    type Target = LibVlc;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

impl VlcApi {
    /// libvlc version string, e.g. `"3.0.20 Vetinari"`.
    pub fn version(&self) -> Option<String> {
        unsafe { marshal::from_native(self.get_version()) }
    }

    /// Compiler used to build libvlc.
    pub fn compiler(&self) -> Option<String> {
        unsafe { marshal::from_native(self.get_compiler()) }
    }

    /// Source revision libvlc was built from.
    pub fn changeset(&self) -> Option<String> {
        unsafe { marshal::from_native(self.get_changeset()) }
    }

    /// The last error libvlc recorded on the calling thread, if any.
    pub fn last_error(&self) -> Option<String> {
        unsafe { marshal::from_native(self.errmsg()) }
    }

    /// Clears the calling thread's libvlc error.
    pub fn clear_error(&self) {
        unsafe { self.clearerr() }
    }

    /// The calling thread's error, or `fallback` when libvlc recorded none.
    /// libvlc never clears the slot on success; callers clear it first.
    pub(crate) fn last_error_or(&self, fallback: &str) -> String {
        self.last_error()
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn init_global(load: impl FnOnce() -> Result<VlcApi>) -> Result<VlcApiHandle> {
    if let Some(api) = LOADED_API.get() {
        tracing::debug!("libvlc already loaded, reusing process-wide function table");
        return Ok(api.clone());
    }
    let api = Arc::new(load()?);
    let installed = LOADED_API.get_or_init(|| api);
    tracing::debug!(
        "libvlc function table ready ({} entry points)",
        vlc_sys::DESCRIPTORS.len()
    );
    Ok(installed.clone())
}

/// Loads libvlc from `path` into the process-wide function table.
///
/// Idempotent: once a table is installed, later calls return it and `path`
/// is ignored.
///
/// # Errors
///
/// - [`crate::Error::LibLoading`] if the shared library cannot be opened
/// - [`crate::Error::Resolve`] if a declared entry point is missing
///
/// # Examples
///
/// ```no_run
/// use vlc::{config::get_libvlc_path, load_api};
///
/// # fn main() -> Result<(), vlc::Error> {
/// let api = load_api(get_libvlc_path())?;
/// println!("libvlc {}", api.version().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub fn load_api<P: AsRef<OsStr>>(path: P) -> Result<VlcApiHandle> {
    init_global(|| {
        tracing::debug!("Loading libvlc from {:?}", path.as_ref());
        let table = unsafe { LibVlc::new(path.as_ref())? };
        Ok(VlcApi { table })
    })
}

/// Installs a table resolved from `source` as the process-wide one.
///
/// Same idempotence as [`load_api`]. Useful when the host application has
/// already loaded libvlc itself.
///
/// # Safety
///
/// Every address `source` returns must have the signature of its descriptor
/// and stay valid for the rest of the process.
pub unsafe fn install_api<S: SymbolSource + ?Sized>(source: &S) -> Result<VlcApiHandle> {
    init_global(|| {
        let table = unsafe { LibVlc::load_from(source)? };
        Ok(VlcApi { table })
    })
}

/// Resolves a private table from `source`, leaving the process-wide one untouched.
///
/// # Safety
///
/// Every address `source` returns must have the signature of its descriptor
/// and stay valid for as long as the returned handle is alive.
pub unsafe fn load_api_from<S: SymbolSource + ?Sized>(source: &S) -> Result<VlcApiHandle> {
    let table = unsafe { LibVlc::load_from(source)? };
    Ok(Arc::new(VlcApi { table }))
}

/// The process-wide table, if one has been loaded.
pub fn loaded_api() -> Option<VlcApiHandle> {
    LOADED_API.get().cloned()
}

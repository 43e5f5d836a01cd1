// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Symbol lookup against a loaded library.
//!
//! Every native entry point the bindings use is described by a [`Descriptor`].
//! Resolution goes through a [`SymbolSource`], which is implemented for
//! [`libloading::Library`] and for plain symbol maps so that an in-process
//! table of `extern "C"` functions can stand in for the real library.

use std::{borrow::Borrow, collections::HashMap, ffi::c_void, hash::Hash};

/// Calling metadata for one native entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Name of the binding on [`crate::LibVlc`].
    pub name: &'static str,
    /// Exported symbol name in the native library.
    pub symbol: &'static str,
    /// Rust rendering of the C signature, used in diagnostics.
    pub signature: &'static str,
}

/// Errors raised while binding native entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The library does not export the requested symbol.
    #[error("Function not found: {symbol}")]
    FunctionNotFound { symbol: String },

    /// No descriptor exists for the symbol, so its signature is unknown.
    #[error("Descriptor missing for symbol: {symbol}")]
    DescriptorMissing { symbol: String },
}

/// A loaded library that can be asked for symbol addresses.
pub trait SymbolSource {
    /// Returns the address of `symbol`, or `None` when it is not exported.
    fn lookup(&self, symbol: &str) -> Option<*const c_void>;
}

impl SymbolSource for libloading::Library {
    fn lookup(&self, symbol: &str) -> Option<*const c_void> {
        // Only the address is read here; the typed fn pointer is built by the
        // caller from the matching descriptor.
        let function = unsafe { self.get::<unsafe extern "C" fn()>(symbol.as_bytes()) }.ok()?;
        Some(*function as *const c_void)
    }
}

impl<K> SymbolSource for HashMap<K, *const c_void>
where
    K: Borrow<str> + Hash + Eq,
{
    fn lookup(&self, symbol: &str) -> Option<*const c_void> {
        self.get(symbol).copied()
    }
}

impl<S: SymbolSource + ?Sized> SymbolSource for &S {
    fn lookup(&self, symbol: &str) -> Option<*const c_void> {
        (**self).lookup(symbol)
    }
}

/// Finds the descriptor for a native symbol name.
pub fn find_descriptor(symbol: &str) -> Option<&'static Descriptor> {
    crate::DESCRIPTORS.iter().find(|d| d.symbol == symbol)
}

/// Resolves one declared symbol against `source`.
///
/// # Errors
///
/// - [`ResolveError::DescriptorMissing`] if `symbol` is not one of [`crate::DESCRIPTORS`]
/// - [`ResolveError::FunctionNotFound`] if the source does not export it
pub fn resolve_symbol<S: SymbolSource + ?Sized>(
    source: &S,
    symbol: &str,
) -> Result<*const c_void, ResolveError> {
    let descriptor = find_descriptor(symbol).ok_or_else(|| ResolveError::DescriptorMissing {
        symbol: symbol.to_string(),
    })?;
    source
        .lookup(descriptor.symbol)
        .filter(|address| !address.is_null())
        .ok_or_else(|| ResolveError::FunctionNotFound {
            symbol: descriptor.symbol.to_string(),
        })
}

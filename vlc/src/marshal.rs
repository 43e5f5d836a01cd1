// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! String marshaling between Rust and libvlc.
//!
//! libvlc takes UTF-8, NUL-terminated strings. A [`CString`] built right
//! before a call keeps its buffer at a fixed address until it is dropped, so
//! the helpers here scope every buffer to exactly one native call.

use std::{
    ffi::{CStr, CString},
    os::raw::{c_char, c_int},
};

use crate::{Result, VlcApi};

/// Encodes `value` as a NUL-terminated UTF-8 buffer.
///
/// # Errors
///
/// Returns [`crate::Error::NulString`] if `value` contains an interior NUL.
pub fn to_native(value: &str) -> Result<CString> {
    Ok(CString::new(value)?)
}

/// Decodes a NUL-terminated string owned by libvlc.
///
/// Returns `None` for a null pointer. Invalid UTF-8 is replaced rather than
/// rejected, since libvlc passes through whatever the input media carries.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated buffer valid for the
/// duration of the call.
pub unsafe fn from_native(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

/// Copies a string allocated by libvlc and frees the original with `libvlc_free`.
///
/// # Safety
///
/// `ptr` must be null or a heap string whose ownership libvlc handed to the caller.
pub(crate) unsafe fn take_native_string(api: &VlcApi, ptr: *mut c_char) -> Option<String> {
    let value = unsafe { from_native(ptr) };
    if !ptr.is_null() {
        unsafe { api.free(ptr.cast()) };
    }
    value
}

/// Pins `value` for the duration of `call`.
///
/// The buffer is released when `call` returns, whatever it returned.
pub fn with_native_str<R>(value: &str, call: impl FnOnce(*const c_char) -> R) -> Result<R> {
    let pinned = to_native(value)?;
    Ok(call(pinned.as_ptr()))
}

/// Like [`with_native_str`], passing a null pointer for `None`.
pub fn with_optional_native_str<R>(
    value: Option<&str>,
    call: impl FnOnce(*const c_char) -> R,
) -> Result<R> {
    match value {
        Some(value) => with_native_str(value, call),
        None => Ok(call(std::ptr::null())),
    }
}

/// Pins every value before `call` and releases them all after it.
///
/// Encoding happens up front, so an interior NUL in any value fails the
/// whole call before anything reaches libvlc.
pub fn with_native_strs<R>(values: &[&str], call: impl FnOnce(&[*const c_char]) -> R) -> Result<R> {
    let pinned = values
        .iter()
        .map(|value| to_native(value))
        .collect::<Result<Vec<_>>>()?;
    let pointers: Vec<*const c_char> = pinned.iter().map(|value| value.as_ptr()).collect();
    Ok(call(&pointers))
}

/// An `argc`/`argv` pair for calls taking a C argument vector.
pub struct ArgVector {
    // Owns the buffers `pointers` refers into.
    _strings: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl ArgVector {
    /// Encodes every argument.
    pub fn new<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let strings = args
            .iter()
            .map(|arg| to_native(arg.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let pointers = strings.iter().map(|arg| arg.as_ptr()).collect();
        Ok(Self {
            _strings: strings,
            pointers,
        })
    }

    /// Number of arguments, as libvlc expects it.
    pub fn argc(&self) -> c_int {
        self.pointers.len() as c_int
    }

    /// Pointer to the first argument, or null for an empty vector.
    pub fn argv(&self) -> *const *const c_char {
        if self.pointers.is_empty() {
            std::ptr::null()
        } else {
            self.pointers.as_ptr()
        }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// `true` when there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }
}

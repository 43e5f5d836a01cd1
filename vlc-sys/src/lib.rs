// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! # vlc-sys: Raw FFI bindings to libvlc
//!
//! This crate provides low-level, unsafe Rust bindings to the libvlc C API.
//! The library is loaded at runtime with `libloading`; every entry point is
//! declared once as a [`Descriptor`] and resolved into the [`LibVlc`] table.
//!
//! ## Overview
//!
//! `vlc-sys` exposes:
//! - Opaque handle types (`libvlc_instance_t`, `libvlc_media_t`, ...)
//! - `#[repr(C)]` structures shared with the library (events, module lists)
//! - Event type constants and callback signatures
//! - The [`LibVlc`] function table and its resolver ([`SymbolSource`])
//!
//! ## Usage
//!
//! **Most users should NOT use this crate directly.** Use the safe `vlc`
//! wrapper crate instead, which provides RAII handles, `Result`-based error
//! handling and the event bridge.
//!
//! ## Safety
//!
//! All calls through [`LibVlc`] are `unsafe` and require the caller to uphold
//! libvlc's invariants:
//! - Handles must not be used after their final release
//! - String arguments must be NUL-terminated UTF-8 that outlives the call
//! - Callback user data must stay valid until the callback is detached

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::too_many_arguments)]

mod functions;
mod resolve;

use std::os::raw::{c_char, c_int, c_void};

pub use functions::{DESCRIPTORS, LibVlc, LoadError};
pub use resolve::{Descriptor, ResolveError, SymbolSource, find_descriptor, resolve_symbol};

/// Opaque libvlc runtime instance.
#[repr(C)]
pub struct libvlc_instance_t {
    _private: [u8; 0],
}

/// Opaque event manager owned by a libvlc object.
#[repr(C)]
pub struct libvlc_event_manager_t {
    _private: [u8; 0],
}

/// Opaque media descriptor.
#[repr(C)]
pub struct libvlc_media_t {
    _private: [u8; 0],
}

/// Opaque media player.
#[repr(C)]
pub struct libvlc_media_player_t {
    _private: [u8; 0],
}

pub type libvlc_event_type_t = c_int;

/// Event callback: `void (*)(const libvlc_event_t *, void *)`.
pub type libvlc_callback_t =
    Option<unsafe extern "C" fn(p_event: *const libvlc_event_t, p_data: *mut c_void)>;

/// Exit handler: `void (*)(void *)`.
pub type libvlc_exit_handler_t = Option<unsafe extern "C" fn(opaque: *mut c_void)>;

pub const libvlc_VlmMediaAdded: libvlc_event_type_t = 0x600;
pub const libvlc_VlmMediaRemoved: libvlc_event_type_t = 0x601;
pub const libvlc_VlmMediaChanged: libvlc_event_type_t = 0x602;
pub const libvlc_VlmMediaInstanceStarted: libvlc_event_type_t = 0x603;
pub const libvlc_VlmMediaInstanceStopped: libvlc_event_type_t = 0x604;
pub const libvlc_VlmMediaInstanceStatusInit: libvlc_event_type_t = 0x605;
pub const libvlc_VlmMediaInstanceStatusOpening: libvlc_event_type_t = 0x606;
pub const libvlc_VlmMediaInstanceStatusPlaying: libvlc_event_type_t = 0x607;
pub const libvlc_VlmMediaInstanceStatusPause: libvlc_event_type_t = 0x608;
pub const libvlc_VlmMediaInstanceStatusEnd: libvlc_event_type_t = 0x609;
pub const libvlc_VlmMediaInstanceStatusError: libvlc_event_type_t = 0x60A;

/// Payload of the VLM event family.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct libvlc_event_vlm_media_t {
    pub psz_media_name: *const c_char,
    pub psz_instance_name: *const c_char,
}

impl Default for libvlc_event_vlm_media_t {
    fn default() -> Self {
        Self {
            psz_media_name: std::ptr::null(),
            psz_instance_name: std::ptr::null(),
        }
    }
}

/// Event payload union. Only the VLM member is read by these bindings; the
/// reserved member keeps the union at least as large as the native one.
#[repr(C)]
#[derive(Copy, Clone)]
pub union libvlc_event_u {
    pub vlm_media_event: libvlc_event_vlm_media_t,
    pub _reserved: [u64; 4],
}

/// An event delivered to a [`libvlc_callback_t`].
#[repr(C)]
#[derive(Copy, Clone)]
pub struct libvlc_event_t {
    pub type_: libvlc_event_type_t,
    pub p_obj: *mut c_void,
    pub u: libvlc_event_u,
}

/// Node of the linked list returned by the filter list getters.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct libvlc_module_description_t {
    pub psz_name: *mut c_char,
    pub psz_shortname: *mut c_char,
    pub psz_longname: *mut c_char,
    pub psz_help: *mut c_char,
    pub p_next: *mut libvlc_module_description_t,
}

impl Default for libvlc_module_description_t {
    fn default() -> Self {
        Self {
            psz_name: std::ptr::null_mut(),
            psz_shortname: std::ptr::null_mut(),
            psz_longname: std::ptr::null_mut(),
            psz_help: std::ptr::null_mut(),
            p_next: std::ptr::null_mut(),
        }
    }
}

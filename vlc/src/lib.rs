// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! # vlc - safe bindings over libvlc
//!
//! Safe, idiomatic Rust bindings for the libvlc C API. The native library
//! does all the media work; this crate owns handles, marshals strings and
//! bridges libvlc's callbacks to Rust closures.
//!
//! ## Overview
//!
//! libvlc is loaded at runtime. Its entry points are resolved once per
//! process into a shared function table ([`load_api`]), which every wrapper
//! object holds on to through a [`VlcApiHandle`].
//!
//! ### Key Concepts
//!
//! - **Instance**: one libvlc runtime ([`VlcInstance`]), created from
//!   command-line style arguments and disposed explicitly
//! - **Media**: something to play ([`Media`]), from a path, location,
//!   file descriptor or as an empty node
//! - **Media player**: plays one media at a time ([`MediaPlayer`])
//! - **VLM**: server-side broadcast and VOD management ([`Vlm`]), reporting
//!   its state changes as [`VlmEvent`]s
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ VlcApiHandle│  (process-wide function table)
//! └──────┬──────┘
//!        │
//! ┌──────┴──────┐
//! │ VlcInstance │──► event bridge (11 pinned VLM callbacks)
//! └──────┬──────┘
//!        ├─► Media ──► MediaPlayer
//!        └─► Vlm   (broadcast / VOD)
//! ```
//!
//! ## Examples
//!
//! ```no_run
//! use vlc::{load_api, VlcInstance, VlmEventKind, BroadcastConfig};
//!
//! # fn main() -> Result<(), vlc::Error> {
//! let api = load_api(vlc::config::get_libvlc_path())?;
//! let mut instance = VlcInstance::with_defaults(api)?;
//!
//! instance.subscribe(VlmEventKind::StatusPlaying, |event| {
//!     println!("{:?} is playing", event.media_name);
//! })?;
//!
//! let vlm = instance.vlm()?;
//! vlm.add_broadcast(
//!     "channel1",
//!     &BroadcastConfig {
//!         input: "file:///srv/media/loop.mkv".into(),
//!         output: "#std{access=http,mux=ts,dst=:8080}".into(),
//!         enabled: true,
//!         looping: true,
//!         ..Default::default()
//!     },
//! )?;
//! vlm.play_media("channel1")?;
//!
//! instance.dispose();
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - [`VlcInstance`] is `Send + Sync`; [`VlcInstance::dispose`] needs
//!   `&mut self`, so it cannot overlap with other calls on the same instance
//! - Event handlers run on libvlc's own threads and must be `Send + Sync`
//! - The first [`load_api`] call initializes the process-wide table; later
//!   calls reuse it

mod api;
mod error;
mod event;
mod instance;
mod media;
mod module;
mod vlm;

pub mod config;
pub mod marshal;

pub use api::{VlcApi, VlcApiHandle, install_api, load_api, load_api_from, loaded_api};
pub use error::{Error, Result};
pub use event::{SubscriptionId, VlmEvent, VlmEventKind};
pub use instance::{DEFAULT_ARGS, InstanceRef, InstanceState, VlcInstance};
pub use media::{Media, player::MediaPlayer};
pub use module::ModuleDescription;
pub use vlm::{BroadcastConfig, VodConfig, Vlm};
pub use vlc_sys::SymbolSource;

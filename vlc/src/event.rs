// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! VLM event kinds and the events delivered to subscribers.
//!
//! Every [`crate::VlcInstance`] registers one native callback per
//! [`VlmEventKind`] when it is created ([`bridge`]). Rust code subscribes to
//! kinds with [`crate::VlcInstance::subscribe`] and receives [`VlmEvent`]s on
//! whichever thread libvlc dispatches from.

pub(crate) mod bridge;

use vlc_sys::libvlc_event_type_t;

/// The VLM lifecycle events libvlc reports for broadcast and VOD media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VlmEventKind {
    MediaAdded,
    MediaRemoved,
    MediaChanged,
    MediaInstanceStarted,
    MediaInstanceStopped,
    StatusInit,
    StatusOpening,
    StatusPlaying,
    StatusPause,
    StatusEnd,
    StatusError,
}

impl VlmEventKind {
    /// Every kind, in native value order.
    pub const ALL: [VlmEventKind; 11] = [
        VlmEventKind::MediaAdded,
        VlmEventKind::MediaRemoved,
        VlmEventKind::MediaChanged,
        VlmEventKind::MediaInstanceStarted,
        VlmEventKind::MediaInstanceStopped,
        VlmEventKind::StatusInit,
        VlmEventKind::StatusOpening,
        VlmEventKind::StatusPlaying,
        VlmEventKind::StatusPause,
        VlmEventKind::StatusEnd,
        VlmEventKind::StatusError,
    ];

    /// The native `libvlc_event_e` value.
    pub fn raw(self) -> libvlc_event_type_t {
        match self {
            VlmEventKind::MediaAdded => vlc_sys::libvlc_VlmMediaAdded,
            VlmEventKind::MediaRemoved => vlc_sys::libvlc_VlmMediaRemoved,
            VlmEventKind::MediaChanged => vlc_sys::libvlc_VlmMediaChanged,
            VlmEventKind::MediaInstanceStarted => vlc_sys::libvlc_VlmMediaInstanceStarted,
            VlmEventKind::MediaInstanceStopped => vlc_sys::libvlc_VlmMediaInstanceStopped,
            VlmEventKind::StatusInit => vlc_sys::libvlc_VlmMediaInstanceStatusInit,
            VlmEventKind::StatusOpening => vlc_sys::libvlc_VlmMediaInstanceStatusOpening,
            VlmEventKind::StatusPlaying => vlc_sys::libvlc_VlmMediaInstanceStatusPlaying,
            VlmEventKind::StatusPause => vlc_sys::libvlc_VlmMediaInstanceStatusPause,
            VlmEventKind::StatusEnd => vlc_sys::libvlc_VlmMediaInstanceStatusEnd,
            VlmEventKind::StatusError => vlc_sys::libvlc_VlmMediaInstanceStatusError,
        }
    }

    /// Maps a native event type back to a kind, if it is a VLM event.
    pub fn from_raw(raw: libvlc_event_type_t) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.raw() == raw)
    }
}

/// A VLM event as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlmEvent {
    pub kind: VlmEventKind,
    /// Name of the VLM media the event concerns.
    pub media_name: Option<String>,
    /// Name of the media instance, for instance-level events.
    pub instance_name: Option<String>,
}

/// Identifies one subscription made with [`crate::VlcInstance::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

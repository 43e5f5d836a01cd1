// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Media descriptors and the media player.
//!
//! Both are thin RAII wrappers: they forward to libvlc and release their
//! native reference on drop. Neither keeps the creating [`crate::VlcInstance`]
//! wrapper alive; libvlc tracks the instance internally.

pub mod player;

use vlc_sys::libvlc_media_t;

use crate::{Error, Result, VlcApiHandle, marshal};

/// A media descriptor (file, stream location, descriptor or node).
pub struct Media {
    api: VlcApiHandle,
    media: *mut libvlc_media_t,
}

// Safety: libvlc media objects are reference counted and lock internally.
unsafe impl Send for Media {}
unsafe impl Sync for Media {}

impl Media {
    /// Wraps a media reference owned by the caller.
    pub(crate) fn from_raw(api: VlcApiHandle, media: *mut libvlc_media_t) -> Result<Self> {
        if media.is_null() {
            return Err(Error::Native(api.last_error_or("failed to create media")));
        }
        Ok(Self { api, media })
    }

    /// The native media handle.
    pub fn as_raw(&self) -> *mut libvlc_media_t {
        self.media
    }

    pub(crate) fn api_handle(&self) -> &VlcApiHandle {
        &self.api
    }

    /// The media resource locator, e.g. `file:///tmp/a.mkv`.
    pub fn mrl(&self) -> Option<String> {
        unsafe { marshal::take_native_string(&self.api, self.api.media_get_mrl(self.media)) }
    }

    /// Creates an independent copy of this media.
    pub fn duplicate(&self) -> Result<Media> {
        self.api.clear_error();
        let copy = unsafe { self.api.media_duplicate(self.media) };
        Media::from_raw(self.api.clone(), copy)
    }
}

impl Clone for Media {
    /// Shares the same native media, taking another reference.
    fn clone(&self) -> Self {
        unsafe { self.api.media_retain(self.media) };
        Self {
            api: self.api.clone(),
            media: self.media,
        }
    }
}

impl Drop for Media {
    fn drop(&mut self) {
        unsafe { self.api.media_release(self.media) };
    }
}

impl std::fmt::Debug for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Media").field("media", &self.media).finish()
    }
}

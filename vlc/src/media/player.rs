// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

use vlc_sys::libvlc_media_player_t;

use crate::{Error, Media, Result, VlcApiHandle};

/// A media player.
pub struct MediaPlayer {
    api: VlcApiHandle,
    player: *mut libvlc_media_player_t,
}

// Safety: libvlc players lock internally; the handle may move between threads.
unsafe impl Send for MediaPlayer {}

impl MediaPlayer {
    pub(crate) fn from_raw(api: VlcApiHandle, player: *mut libvlc_media_player_t) -> Result<Self> {
        if player.is_null() {
            return Err(Error::Native(
                api.last_error_or("failed to create media player"),
            ));
        }
        Ok(Self { api, player })
    }

    /// Creates a player with `media` already set.
    pub fn from_media(media: &Media) -> Result<Self> {
        let api = media.api_handle().clone();
        api.clear_error();
        let player = unsafe { api.media_player_new_from_media(media.as_raw()) };
        Self::from_raw(api, player)
    }

    /// The native player handle.
    pub fn as_raw(&self) -> *mut libvlc_media_player_t {
        self.player
    }

    /// Replaces the media to play. The player takes its own reference.
    pub fn set_media(&self, media: &Media) {
        unsafe { self.api.media_player_set_media(self.player, media.as_raw()) }
    }

    /// Detaches the current media.
    pub fn clear_media(&self) {
        unsafe {
            self.api
                .media_player_set_media(self.player, std::ptr::null_mut())
        }
    }

    /// The media currently set, if any.
    pub fn media(&self) -> Option<Media> {
        let media = unsafe { self.api.media_player_get_media(self.player) };
        if media.is_null() {
            None
        } else {
            Media::from_raw(self.api.clone(), media).ok()
        }
    }

    /// Starts playback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Native`] if libvlc cannot start playing.
    pub fn play(&self) -> Result<()> {
        self.api.clear_error();
        let status = unsafe { self.api.media_player_play(self.player) };
        Error::from_status(&self.api, status)
    }

    /// Toggles pause. No effect if there is no media.
    pub fn pause(&self) {
        unsafe { self.api.media_player_pause(self.player) }
    }

    /// Stops playback. No effect if nothing is playing.
    pub fn stop(&self) {
        unsafe { self.api.media_player_stop(self.player) }
    }

    /// `true` while the player is playing.
    pub fn is_playing(&self) -> bool {
        unsafe { self.api.media_player_is_playing(self.player) != 0 }
    }
}

impl Drop for MediaPlayer {
    fn drop(&mut self) {
        unsafe { self.api.media_player_release(self.player) };
    }
}

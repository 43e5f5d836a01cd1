// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! VLM: broadcast and video-on-demand media management.
//!
//! [`Vlm`] borrows its [`crate::VlcInstance`], so the instance cannot be
//! disposed while a VLM call is in flight. State changes are reported through
//! the instance's VLM event subscriptions.

use std::os::raw::c_int;

use serde::{Deserialize, Serialize};
use vlc_sys::libvlc_instance_t;

use crate::{
    Error, Result, VlcApi,
    marshal::{self, ArgVector},
};

/// Parameters of a broadcast media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Input MRL.
    pub input: String,
    /// Stream output chain, e.g. `#std{access=http,mux=ts,dst=:8080}`.
    pub output: String,
    /// Additional media options.
    pub options: Vec<String>,
    pub enabled: bool,
    /// Restart from the beginning when the input ends.
    pub looping: bool,
}

/// Parameters of a video-on-demand media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VodConfig {
    /// Input MRL.
    pub input: String,
    /// Additional media options.
    pub options: Vec<String>,
    pub enabled: bool,
    /// Muxer; libvlc picks one when `None`.
    pub mux: Option<String>,
}

/// VLM interface of one instance, see [`crate::VlcInstance::vlm`].
pub struct Vlm<'a> {
    api: &'a VlcApi,
    instance: *mut libvlc_instance_t,
}

impl<'a> Vlm<'a> {
    pub(crate) fn new(api: &'a VlcApi, instance: *mut libvlc_instance_t) -> Self {
        Self { api, instance }
    }

    fn check(&self, status: c_int) -> Result<()> {
        Error::from_status(self.api, status)
    }

    /// Runs `call` with the media name pinned and maps its status.
    fn with_name(&self, name: &str, call: impl FnOnce(*const std::os::raw::c_char) -> c_int) -> Result<()> {
        self.api.clear_error();
        let status = marshal::with_native_str(name, call)?;
        self.check(status)
    }

    /// Adds a broadcast media.
    pub fn add_broadcast(&self, name: &str, config: &BroadcastConfig) -> Result<()> {
        let options = ArgVector::new(config.options.as_slice())?;
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, config.input.as_str(), config.output.as_str()], |args| unsafe {
            self.api.vlm_add_broadcast(
                self.instance,
                args[0],
                args[1],
                args[2],
                options.argc(),
                options.argv(),
                c_int::from(config.enabled),
                c_int::from(config.looping),
            )
        })?;
        self.check(status)
    }

    /// Adds a video-on-demand media.
    pub fn add_vod(&self, name: &str, config: &VodConfig) -> Result<()> {
        let options = ArgVector::new(config.options.as_slice())?;
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, config.input.as_str()], |args| {
            marshal::with_optional_native_str(config.mux.as_deref(), |mux| unsafe {
                self.api.vlm_add_vod(
                    self.instance,
                    args[0],
                    args[1],
                    options.argc(),
                    options.argv(),
                    c_int::from(config.enabled),
                    mux,
                )
            })
        })??;
        self.check(status)
    }

    /// Replaces input, output, options and flags of an existing broadcast media.
    pub fn change_media(&self, name: &str, config: &BroadcastConfig) -> Result<()> {
        let options = ArgVector::new(config.options.as_slice())?;
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, config.input.as_str(), config.output.as_str()], |args| unsafe {
            self.api.vlm_change_media(
                self.instance,
                args[0],
                args[1],
                args[2],
                options.argc(),
                options.argv(),
                c_int::from(config.enabled),
                c_int::from(config.looping),
            )
        })?;
        self.check(status)
    }

    /// Removes a media, stopping it first if it is running.
    pub fn del_media(&self, name: &str) -> Result<()> {
        self.with_name(name, |name| unsafe { self.api.vlm_del_media(self.instance, name) })
    }

    /// Enables or disables a media. Disabled media cannot be played.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        self.with_name(name, |name| unsafe {
            self.api
                .vlm_set_enabled(self.instance, name, c_int::from(enabled))
        })
    }

    /// Sets whether a broadcast restarts once its inputs are exhausted.
    pub fn set_loop(&self, name: &str, looping: bool) -> Result<()> {
        self.with_name(name, |name| unsafe {
            self.api
                .vlm_set_loop(self.instance, name, c_int::from(looping))
        })
    }

    /// Sets the stream output chain of a broadcast.
    pub fn set_output(&self, name: &str, output: &str) -> Result<()> {
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, output], |args| unsafe {
            self.api.vlm_set_output(self.instance, args[0], args[1])
        })?;
        self.check(status)
    }

    /// Replaces every input of the media with `input`.
    pub fn set_input(&self, name: &str, input: &str) -> Result<()> {
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, input], |args| unsafe {
            self.api.vlm_set_input(self.instance, args[0], args[1])
        })?;
        self.check(status)
    }

    /// Appends `input` to the media's input list.
    pub fn add_input(&self, name: &str, input: &str) -> Result<()> {
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, input], |args| unsafe {
            self.api.vlm_add_input(self.instance, args[0], args[1])
        })?;
        self.check(status)
    }

    /// Sets the muxer of a VOD media.
    pub fn set_mux(&self, name: &str, mux: &str) -> Result<()> {
        self.api.clear_error();
        let status = marshal::with_native_strs(&[name, mux], |args| unsafe {
            self.api.vlm_set_mux(self.instance, args[0], args[1])
        })?;
        self.check(status)
    }

    /// Starts a media.
    pub fn play_media(&self, name: &str) -> Result<()> {
        self.with_name(name, |name| unsafe { self.api.vlm_play_media(self.instance, name) })
    }

    /// Stops a media.
    pub fn stop_media(&self, name: &str) -> Result<()> {
        self.with_name(name, |name| unsafe { self.api.vlm_stop_media(self.instance, name) })
    }

    /// Pauses a running media.
    pub fn pause_media(&self, name: &str) -> Result<()> {
        self.with_name(name, |name| unsafe { self.api.vlm_pause_media(self.instance, name) })
    }

    /// Seeks to `percentage` (0.0 to 100.0) of the media.
    pub fn seek_media(&self, name: &str, percentage: f32) -> Result<()> {
        self.with_name(name, |name| unsafe {
            self.api.vlm_seek_media(self.instance, name, percentage)
        })
    }

    /// Describes a media (or all media for an empty name) as libvlc's JSON text.
    pub fn show_media(&self, name: &str) -> Result<String> {
        self.api.clear_error();
        let text = marshal::with_native_str(name, |name| unsafe {
            let text = self.api.vlm_show_media(self.instance, name);
            marshal::take_native_string(self.api, text.cast_mut())
        })?;
        text.ok_or_else(|| Error::Native(self.api.last_error_or("no such VLM media")))
    }

    /// Like [`Self::show_media`], parsed.
    pub fn show_media_json(&self, name: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.show_media(name)?)?)
    }

    /// Position (0.0 to 1.0) of media instance `instance`.
    pub fn media_instance_position(&self, name: &str, instance: i32) -> Result<f32> {
        self.api.clear_error();
        let position = marshal::with_native_str(name, |name| unsafe {
            self.api
                .vlm_get_media_instance_position(self.instance, name, instance)
        })?;
        if position < 0.0 {
            Err(Error::Native(self.api.last_error_or("no such media instance")))
        } else {
            Ok(position)
        }
    }

    /// Current time of media instance `instance`.
    pub fn media_instance_time(&self, name: &str, instance: i32) -> Result<i32> {
        self.instance_query(name, instance, |api, vlm, name, instance| unsafe {
            api.vlm_get_media_instance_time(vlm, name, instance)
        })
    }

    /// Length of media instance `instance`.
    pub fn media_instance_length(&self, name: &str, instance: i32) -> Result<i32> {
        self.instance_query(name, instance, |api, vlm, name, instance| unsafe {
            api.vlm_get_media_instance_length(vlm, name, instance)
        })
    }

    /// Playback rate of media instance `instance`.
    pub fn media_instance_rate(&self, name: &str, instance: i32) -> Result<i32> {
        self.instance_query(name, instance, |api, vlm, name, instance| unsafe {
            api.vlm_get_media_instance_rate(vlm, name, instance)
        })
    }

    fn instance_query(
        &self,
        name: &str,
        instance: i32,
        query: impl FnOnce(&VlcApi, *mut libvlc_instance_t, *const std::os::raw::c_char, c_int) -> c_int,
    ) -> Result<i32> {
        self.api.clear_error();
        let value = marshal::with_native_str(name, |name| query(self.api, self.instance, name, instance))?;
        if value < 0 {
            Err(Error::Native(self.api.last_error_or("no such media instance")))
        } else {
            Ok(value)
        }
    }
}

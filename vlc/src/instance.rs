// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! libvlc instance management.
//!
//! This module provides [`VlcInstance`], the owner of one native
//! `libvlc_instance_t`. It creates the instance, wires the VLM event
//! callbacks, hands out child objects and releases everything on disposal.

use std::ptr;

use vlc_sys::{libvlc_event_manager_t, libvlc_instance_t};

use crate::{
    Error, Media, MediaPlayer, ModuleDescription, Result, SubscriptionId, VlcApiHandle, Vlm,
    VlmEvent, VlmEventKind,
    config::InstanceConfig,
    event::bridge::{EventBridge, PinnedExitHandler},
    marshal::{self, ArgVector},
    module::take_module_list,
};

/// Arguments used by [`VlcInstance::with_defaults`].
pub const DEFAULT_ARGS: &[&str] = &["-I", "dummy", "--ignore-config", "--no-video-title-show"];

/// Lifecycle state of a [`VlcInstance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// The native instance is alive and its callbacks are attached.
    Active,
    /// The native instance has been released. Terminal.
    Disposed,
}

/// Owner of a native libvlc instance.
///
/// Construction takes one native reference and attaches a callback for each
/// [`VlmEventKind`]; [`Self::dispose`] (or drop) gives both back. Children
/// such as [`Media`] do not keep the instance wrapper alive; use
/// [`Self::retain`] when something else must outlive it.
///
/// # Examples
///
/// ```no_run
/// use vlc::{load_api, VlcInstance, VlmEventKind};
///
/// # fn main() -> Result<(), vlc::Error> {
/// let api = load_api(vlc::config::get_libvlc_path())?;
/// let mut instance = VlcInstance::new(api, &["-I", "dummy"])?;
/// instance.subscribe(VlmEventKind::MediaAdded, |event| {
///     println!("added {:?}", event.media_name);
/// })?;
/// instance.add_interface(Some("dummy"))?;
/// instance.dispose();
/// # Ok(())
/// # }
/// ```
pub struct VlcInstance {
    api: VlcApiHandle,
    instance: *mut libvlc_instance_t,
    event_manager: *mut libvlc_event_manager_t,
    events: EventBridge,
    exit_handler: Option<PinnedExitHandler>,
}

// Safety: libvlc instances are thread-safe. Disposal needs `&mut self`, so
// it cannot race with calls made through shared references.
unsafe impl Send for VlcInstance {}
unsafe impl Sync for VlcInstance {}

impl VlcInstance {
    /// Creates a libvlc instance from command-line style arguments.
    ///
    /// # Errors
    ///
    /// - [`Error::InstanceCreation`] if libvlc rejects the arguments; the
    ///   message is libvlc's own diagnostic
    /// - [`Error::NulString`] if an argument contains a NUL byte
    /// - [`Error::Native`] if the VLM event callbacks cannot be attached
    pub fn new<S: AsRef<str>>(api: VlcApiHandle, args: &[S]) -> Result<Self> {
        let argv = ArgVector::new(args)?;
        // libvlc_new often fails without a message; never report an older one.
        api.clear_error();
        let instance = unsafe { api.instance_new(argv.argc(), argv.argv()) };
        drop(argv);
        if instance.is_null() {
            return Err(Error::InstanceCreation(
                api.last_error_or("libvlc_new returned no instance"),
            ));
        }
        tracing::debug!("Created libvlc instance {:p}", instance);

        let mut this = Self {
            api,
            instance,
            event_manager: ptr::null_mut(),
            events: EventBridge::new(),
            exit_handler: None,
        };
        this.api.clear_error();
        this.event_manager = unsafe { this.api.vlm_get_event_manager(instance) };
        if this.event_manager.is_null() {
            let err = Error::Native(this.api.last_error_or("no VLM event manager"));
            this.dispose();
            return Err(err);
        }
        if let Err(err) = this.events.attach_all(&this.api, this.event_manager) {
            this.dispose();
            return Err(err);
        }
        Ok(this)
    }

    /// Creates an instance with [`DEFAULT_ARGS`].
    pub fn with_defaults(api: VlcApiHandle) -> Result<Self> {
        Self::new(api, DEFAULT_ARGS)
    }

    /// Creates an instance and applies the rest of `config` to it.
    ///
    /// User agent and application id are set first, then every configured
    /// interface is added in order.
    pub fn from_config(api: VlcApiHandle, config: &InstanceConfig) -> Result<Self> {
        let instance = Self::new(api, config.args().as_slice())?;
        if let Some(user_agent) = &config.user_agent {
            instance.set_user_agent(&user_agent.name, &user_agent.http)?;
        }
        if let Some(app_id) = &config.app_id {
            instance.set_app_id(&app_id.id, &app_id.version, &app_id.icon)?;
        }
        for interface in &config.interfaces {
            instance.add_interface(Some(interface))?;
        }
        Ok(instance)
    }

    pub(crate) fn handle(&self) -> Result<*mut libvlc_instance_t> {
        if self.instance.is_null() {
            Err(Error::Disposed)
        } else {
            Ok(self.instance)
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InstanceState {
        if self.instance.is_null() {
            InstanceState::Disposed
        } else {
            InstanceState::Active
        }
    }

    /// `true` until [`Self::dispose`] has run.
    pub fn is_active(&self) -> bool {
        self.state() == InstanceState::Active
    }

    /// The native handle, or null once disposed.
    pub fn as_raw(&self) -> *mut libvlc_instance_t {
        self.instance
    }

    /// Number of native callback contexts this instance keeps pinned.
    pub fn pinned_callbacks(&self) -> usize {
        self.events.pinned_count()
    }

    /// Takes one extra native reference, released when the guard is dropped.
    ///
    /// The wrapper's own state is unaffected: disposing it still releases
    /// only the reference taken at construction.
    pub fn retain(&self) -> Result<InstanceRef> {
        let instance = self.handle()?;
        unsafe { self.api.instance_retain(instance) };
        Ok(InstanceRef {
            api: self.api.clone(),
            instance,
        })
    }

    /// Subscribes `handler` to one VLM event kind.
    ///
    /// Handlers run on libvlc's thread. A panicking handler does not unwind
    /// into libvlc; it is reported by [`Self::take_callback_error`].
    pub fn subscribe<F>(&self, kind: VlmEventKind, handler: F) -> Result<SubscriptionId>
    where
        F: Fn(&VlmEvent) + Send + Sync + 'static,
    {
        self.handle()?;
        Ok(self.events.table().subscribe(kind, std::sync::Arc::new(handler)))
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.table().unsubscribe(id)
    }

    /// Returns the first callback panic not yet reported, if any.
    pub fn take_callback_error(&self) -> Option<Error> {
        self.events.table().take_failure()
    }

    /// Starts an interface module, or the default one for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Native`] if the interface cannot be started.
    pub fn add_interface(&self, name: Option<&str>) -> Result<()> {
        let instance = self.handle()?;
        self.api.clear_error();
        let status = marshal::with_optional_native_str(name, |name| unsafe {
            self.api.add_intf(instance, name)
        })?;
        Error::from_status(&self.api, status)
    }

    /// Registers a handler libvlc calls when it wants the application to exit.
    ///
    /// A previous handler is released once libvlc points at the new one.
    /// libvlc swaps in its own handler while [`Self::wait`] blocks, so this
    /// one does not run during a wait; it is installed again when the wait
    /// returns.
    pub fn set_exit_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let instance = self.handle()?;
        let pinned = PinnedExitHandler::new(Box::new(handler), self.events.table().clone());
        unsafe {
            self.api
                .set_exit_handler(instance, pinned.callback(), pinned.opaque())
        };
        self.exit_handler = Some(pinned);
        Ok(())
    }

    /// Blocks until libvlc signals exit.
    ///
    /// libvlc leaves no exit handler installed after waiting. A handler set
    /// through [`Self::set_exit_handler`] is put back before this returns.
    ///
    /// # Errors
    ///
    /// Returns a pending [`Error::CallbackPanicked`] once the wait is over.
    pub fn wait(&self) -> Result<()> {
        let instance = self.handle()?;
        unsafe { self.api.wait(instance) };
        if let Some(pinned) = &self.exit_handler {
            unsafe {
                self.api
                    .set_exit_handler(instance, pinned.callback(), pinned.opaque())
            };
        }
        match self.take_callback_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Sets the application name and HTTP user agent libvlc reports.
    pub fn set_user_agent(&self, name: &str, http: &str) -> Result<()> {
        let instance = self.handle()?;
        marshal::with_native_strs(&[name, http], |args| unsafe {
            self.api.set_user_agent(instance, args[0], args[1])
        })
    }

    /// Sets the application id, version and icon name libvlc reports.
    pub fn set_app_id(&self, id: &str, version: &str, icon: &str) -> Result<()> {
        let instance = self.handle()?;
        marshal::with_native_strs(&[id, version, icon], |args| unsafe {
            self.api.set_app_id(instance, args[0], args[1], args[2])
        })
    }

    /// Lists the available audio filter modules.
    pub fn audio_filters(&self) -> Result<Vec<ModuleDescription>> {
        let instance = self.handle()?;
        Ok(unsafe { take_module_list(&self.api, self.api.audio_filter_list_get(instance)) })
    }

    /// Lists the available video filter modules.
    pub fn video_filters(&self) -> Result<Vec<ModuleDescription>> {
        let instance = self.handle()?;
        Ok(unsafe { take_module_list(&self.api, self.api.video_filter_list_get(instance)) })
    }

    /// Creates a media from a local filesystem path.
    pub fn media_from_path(&self, path: &str) -> Result<Media> {
        let instance = self.handle()?;
        self.api.clear_error();
        let media = marshal::with_native_str(path, |path| unsafe {
            self.api.media_new_path(instance, path)
        })?;
        Media::from_raw(self.api.clone(), media)
    }

    /// Creates a media from a location (MRL) such as `http://...` or `file:///...`.
    pub fn media_from_location(&self, mrl: &str) -> Result<Media> {
        let instance = self.handle()?;
        self.api.clear_error();
        let media = marshal::with_native_str(mrl, |mrl| unsafe {
            self.api.media_new_location(instance, mrl)
        })?;
        Media::from_raw(self.api.clone(), media)
    }

    /// Creates a media reading from an open file descriptor.
    ///
    /// libvlc does not take ownership of `fd`; it must stay open while the
    /// media is in use.
    pub fn media_from_fd(&self, fd: std::os::raw::c_int) -> Result<Media> {
        let instance = self.handle()?;
        self.api.clear_error();
        let media = unsafe { self.api.media_new_fd(instance, fd) };
        Media::from_raw(self.api.clone(), media)
    }

    /// Creates an empty media node, used as a playlist-like container.
    pub fn media_as_node(&self, name: &str) -> Result<Media> {
        let instance = self.handle()?;
        self.api.clear_error();
        let media = marshal::with_native_str(name, |name| unsafe {
            self.api.media_new_as_node(instance, name)
        })?;
        Media::from_raw(self.api.clone(), media)
    }

    /// Creates an empty media player.
    pub fn media_player(&self) -> Result<MediaPlayer> {
        let instance = self.handle()?;
        self.api.clear_error();
        let player = unsafe { self.api.media_player_new(instance) };
        MediaPlayer::from_raw(self.api.clone(), player)
    }

    /// Returns the VLM (broadcast / VOD) interface of this instance.
    pub fn vlm(&self) -> Result<Vlm<'_>> {
        Ok(Vlm::new(&self.api, self.handle()?))
    }

    /// Releases the VLM and everything it manages.
    ///
    /// The VLM event callbacks are detached first; no VLM events are
    /// delivered after this returns, even if the VLM is used again.
    pub fn release_vlm(&mut self) -> Result<()> {
        let instance = self.handle()?;
        if !self.event_manager.is_null() {
            unsafe { self.events.detach_all(&self.api, self.event_manager) };
            self.event_manager = ptr::null_mut();
        }
        unsafe { self.api.vlm_release(instance) };
        tracing::debug!("Released VLM of libvlc instance {:p}", instance);
        Ok(())
    }

    /// Releases the native instance and every callback it pinned.
    ///
    /// Callbacks are detached while the handle is still valid, then the
    /// reference taken at construction is released, then the pinned contexts
    /// are freed. Calling this again is a no-op.
    pub fn dispose(&mut self) {
        if self.instance.is_null() {
            return;
        }
        let instance = std::mem::replace(&mut self.instance, ptr::null_mut());
        unsafe {
            if !self.event_manager.is_null() {
                self.events.detach_all(&self.api, self.event_manager);
            }
            if self.exit_handler.is_some() {
                self.api.set_exit_handler(instance, None, ptr::null_mut());
            }
            self.api.instance_release(instance);
        }
        self.event_manager = ptr::null_mut();
        let freed = self.events.release_pins();
        self.exit_handler = None;
        tracing::debug!(
            "Disposed libvlc instance {:p}, freed {} callback pin(s)",
            instance,
            freed
        );
    }
}

impl Drop for VlcInstance {
    fn drop(&mut self) {
        if !self.instance.is_null() {
            tracing::warn!("libvlc instance dropped without dispose(), releasing it now");
            self.dispose();
        }
        if let Some(err) = self.take_callback_error() {
            tracing::error!("Unreported callback failure at drop: {}", err);
        }
    }
}

/// An extra native reference to a libvlc instance, taken by [`VlcInstance::retain`].
pub struct InstanceRef {
    api: VlcApiHandle,
    instance: *mut libvlc_instance_t,
}

unsafe impl Send for InstanceRef {}
unsafe impl Sync for InstanceRef {}

impl InstanceRef {
    /// The native handle this reference keeps alive.
    pub fn as_raw(&self) -> *mut libvlc_instance_t {
        self.instance
    }
}

impl Drop for InstanceRef {
    fn drop(&mut self) {
        unsafe { self.api.instance_release(self.instance) };
    }
}

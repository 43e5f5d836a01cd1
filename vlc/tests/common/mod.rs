// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! An in-process stand-in for libvlc shared by the integration tests.
//!
//! Every declared entry point is implemented as an `extern "C"` function and
//! handed to the bindings through a symbol map, exactly as a loaded library
//! would be. Native objects are leaked boxes carrying their own state, so
//! tests running in parallel never share anything but the module list
//! counter. Leaking keeps handles inspectable after their final release.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashMap},
    ffi::{CStr, CString, c_void},
    os::raw::{c_char, c_int},
    ptr,
    sync::{
        Condvar, Mutex, MutexGuard, Once,
        atomic::{AtomicBool, AtomicI32, AtomicIsize, AtomicUsize, Ordering},
    },
};

use vlc::{Media, MediaPlayer, VlcApiHandle, VlcInstance};
use vlc_sys::{
    libvlc_callback_t, libvlc_event_manager_t, libvlc_event_t, libvlc_event_type_t,
    libvlc_event_u, libvlc_event_vlm_media_t, libvlc_exit_handler_t, libvlc_instance_t,
    libvlc_media_player_t, libvlc_media_t, libvlc_module_description_t,
};

/// An argument `libvlc_new` rejects.
pub const REJECTED_ARG: &str = "--mock-invalid-option";
/// The diagnostic reported for [`REJECTED_ARG`].
pub const REJECTED_MESSAGE: &str = "mock: unknown option '--mock-invalid-option'";
/// `--mock-fail-attach-after=N` makes the (N+1)th `libvlc_event_attach` fail.
pub const FAIL_ATTACH_PREFIX: &str = "--mock-fail-attach-after=";
/// An interface `libvlc_add_intf` refuses to start.
pub const BROKEN_INTERFACE: &str = "mock-broken";

/// Module lists handed out and not yet released, across all tests.
pub static MODULE_LISTS_LIVE: AtomicIsize = AtomicIsize::new(0);

static LOG_ONCE: Once = Once::new();

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
    static LAST_CREATED: Cell<usize> = const { Cell::new(0) };
}

fn set_error(message: &str) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = CString::new(message).ok());
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

unsafe fn text(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

unsafe fn texts(count: c_int, ptrs: *const *const c_char) -> Vec<String> {
    (0..count.max(0) as usize)
        .filter_map(|index| unsafe { text(*ptrs.add(index)) })
        .collect()
}

#[derive(Clone, Copy)]
struct Registration {
    event_type: libvlc_event_type_t,
    callback: libvlc_callback_t,
    data: usize,
}

/// State of one VLM media in the mock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockVlmMedia {
    pub vod: bool,
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub options: Vec<String>,
    pub enabled: bool,
    pub looping: bool,
    pub mux: Option<String>,
    pub playing: bool,
    pub paused: bool,
    pub position: f32,
}

/// State of one mock `libvlc_instance_t`.
#[derive(Default)]
pub struct MockInstance {
    pub args: Vec<String>,
    pub refs: AtomicI32,
    pub release_calls: AtomicUsize,
    pub attach_calls: AtomicUsize,
    pub detach_calls: AtomicUsize,
    fail_attach_after: Option<usize>,
    callbacks: Mutex<Vec<Registration>>,
    pub interfaces: Mutex<Vec<Option<String>>>,
    pub user_agent: Mutex<Option<(String, String)>>,
    pub app_id: Mutex<Option<(String, String, String)>>,
    exit_handler: Mutex<Option<(libvlc_exit_handler_t, usize)>>,
    exited: Mutex<bool>,
    exit_signal: Condvar,
    pub vlm: Mutex<BTreeMap<String, MockVlmMedia>>,
    pub vlm_released: AtomicBool,
}

impl MockInstance {
    /// Callbacks currently attached to the VLM event manager.
    pub fn registered_callbacks(&self) -> usize {
        lock(&self.callbacks).len()
    }

    pub fn has_exit_handler(&self) -> bool {
        matches!(*lock(&self.exit_handler), Some((Some(_), _)))
    }

    /// Delivers an event to every callback attached for `event_type`.
    pub fn emit(
        &self,
        event_type: libvlc_event_type_t,
        media_name: Option<&str>,
        instance_name: Option<&str>,
    ) {
        let media_name = media_name.map(|name| CString::new(name).unwrap());
        let instance_name = instance_name.map(|name| CString::new(name).unwrap());
        let event = libvlc_event_t {
            type_: event_type,
            p_obj: self as *const MockInstance as *mut c_void,
            u: libvlc_event_u {
                vlm_media_event: libvlc_event_vlm_media_t {
                    psz_media_name: media_name.as_ref().map_or(ptr::null(), |name| name.as_ptr()),
                    psz_instance_name: instance_name
                        .as_ref()
                        .map_or(ptr::null(), |name| name.as_ptr()),
                },
            },
        };
        let targets: Vec<Registration> = lock(&self.callbacks)
            .iter()
            .filter(|registration| registration.event_type == event_type)
            .copied()
            .collect();
        for registration in targets {
            if let Some(callback) = registration.callback {
                unsafe { callback(&event, registration.data as *mut c_void) };
            }
        }
    }

    /// Runs the exit handler, then wakes every `libvlc_wait` caller.
    pub fn signal_exit(&self) {
        let handler = *lock(&self.exit_handler);
        if let Some((Some(callback), opaque)) = handler {
            unsafe { callback(opaque as *mut c_void) };
        }
        *lock(&self.exited) = true;
        self.exit_signal.notify_all();
    }

    fn update_vlm(&self, name: *const c_char, update: impl FnOnce(&mut MockVlmMedia)) -> c_int {
        let Some(name) = (unsafe { text(name) }) else {
            set_error("mock: missing media name");
            return -1;
        };
        {
            let mut vlm = lock(&self.vlm);
            let Some(media) = vlm.get_mut(&name) else {
                set_error(&format!("mock: media {name} not found"));
                return -1;
            };
            update(media);
        }
        self.emit(vlc_sys::libvlc_VlmMediaChanged, Some(&name), None);
        0
    }
}

/// State of one mock `libvlc_media_t`.
pub struct MockMedia {
    pub mrl: String,
    pub refs: AtomicI32,
}

/// State of one mock `libvlc_media_player_t`.
#[derive(Default)]
pub struct MockPlayer {
    pub refs: AtomicI32,
    media: Mutex<usize>,
    pub playing: AtomicBool,
}

fn mock_instance_ref<'a>(p_instance: *mut libvlc_instance_t) -> &'a MockInstance {
    unsafe { &*(p_instance as *const MockInstance) }
}

fn mock_media_ref<'a>(p_md: *mut libvlc_media_t) -> &'a MockMedia {
    unsafe { &*(p_md as *const MockMedia) }
}

fn mock_player_ref<'a>(p_mi: *mut libvlc_media_player_t) -> &'a MockPlayer {
    unsafe { &*(p_mi as *const MockPlayer) }
}

/// The mock state behind an active instance.
pub fn mock_instance(instance: &VlcInstance) -> &'static MockInstance {
    assert!(!instance.as_raw().is_null(), "instance already disposed");
    mock_instance_ref(instance.as_raw())
}

/// The instance most recently created on the calling thread, even if its
/// wrapper never made it out of construction.
pub fn last_created() -> &'static MockInstance {
    let instance = LAST_CREATED.with(Cell::get);
    assert_ne!(instance, 0, "no mock instance created on this thread");
    mock_instance_ref(instance as *mut libvlc_instance_t)
}

pub fn mock_media(media: &Media) -> &'static MockMedia {
    mock_media_ref(media.as_raw())
}

pub fn mock_player(player: &MediaPlayer) -> &'static MockPlayer {
    mock_player_ref(player.as_raw())
}

fn new_media(mrl: String) -> *mut libvlc_media_t {
    let media = Box::leak(Box::new(MockMedia {
        mrl,
        refs: AtomicI32::new(1),
    }));
    media as *mut MockMedia as *mut libvlc_media_t
}

fn new_player(media: *mut libvlc_media_t) -> *mut libvlc_media_player_t {
    let player = Box::leak(Box::new(MockPlayer {
        refs: AtomicI32::new(1),
        ..Default::default()
    }));
    if !media.is_null() {
        mock_media_ref(media).refs.fetch_add(1, Ordering::SeqCst);
        *lock(&player.media) = media as usize;
    }
    player as *mut MockPlayer as *mut libvlc_media_player_t
}

fn module_list(entries: &[(&str, &str, &str, &str)]) -> *mut libvlc_module_description_t {
    let mut head = ptr::null_mut();
    for (name, shortname, longname, help) in entries.iter().rev() {
        let node = Box::new(libvlc_module_description_t {
            psz_name: CString::new(*name).unwrap().into_raw(),
            psz_shortname: CString::new(*shortname).unwrap().into_raw(),
            psz_longname: CString::new(*longname).unwrap().into_raw(),
            psz_help: if help.is_empty() {
                ptr::null_mut()
            } else {
                CString::new(*help).unwrap().into_raw()
            },
            p_next: head,
        });
        head = Box::into_raw(node);
    }
    MODULE_LISTS_LIVE.fetch_add(1, Ordering::SeqCst);
    head
}

// Core instance lifecycle.

unsafe extern "C" fn mock_new(argc: c_int, argv: *const *const c_char) -> *mut libvlc_instance_t {
    let args = unsafe { texts(argc, argv) };
    if args.iter().any(|arg| arg == REJECTED_ARG) {
        set_error(REJECTED_MESSAGE);
        return ptr::null_mut();
    }
    let fail_attach_after = args
        .iter()
        .find_map(|arg| arg.strip_prefix(FAIL_ATTACH_PREFIX))
        .and_then(|count| count.parse().ok());
    let instance = Box::leak(Box::new(MockInstance {
        args,
        fail_attach_after,
        refs: AtomicI32::new(1),
        ..Default::default()
    }));
    LAST_CREATED.with(|last| last.set(instance as *mut MockInstance as usize));
    instance as *mut MockInstance as *mut libvlc_instance_t
}

unsafe extern "C" fn mock_release(p_instance: *mut libvlc_instance_t) {
    let instance = mock_instance_ref(p_instance);
    instance.release_calls.fetch_add(1, Ordering::SeqCst);
    instance.refs.fetch_sub(1, Ordering::SeqCst);
}

unsafe extern "C" fn mock_retain(p_instance: *mut libvlc_instance_t) {
    mock_instance_ref(p_instance)
        .refs
        .fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn mock_add_intf(p_instance: *mut libvlc_instance_t, name: *const c_char) -> c_int {
    let name = unsafe { text(name) };
    if name.as_deref() == Some(BROKEN_INTERFACE) {
        set_error("mock: interface mock-broken failed to start");
        return -1;
    }
    lock(&mock_instance_ref(p_instance).interfaces).push(name);
    0
}

unsafe extern "C" fn mock_set_exit_handler(
    p_instance: *mut libvlc_instance_t,
    cb: libvlc_exit_handler_t,
    opaque: *mut c_void,
) {
    *lock(&mock_instance_ref(p_instance).exit_handler) = Some((cb, opaque as usize));
}

// libvlc 3 waits through its own exit handler and leaves none installed.
unsafe extern "C" fn mock_wait(p_instance: *mut libvlc_instance_t) {
    let instance = mock_instance_ref(p_instance);
    let mut exited = lock(&instance.exited);
    while !*exited {
        exited = instance.exit_signal.wait(exited).unwrap();
    }
    drop(exited);
    *lock(&instance.exit_handler) = None;
}

unsafe extern "C" fn mock_set_user_agent(
    p_instance: *mut libvlc_instance_t,
    name: *const c_char,
    http: *const c_char,
) {
    let value = unsafe { (text(name).unwrap_or_default(), text(http).unwrap_or_default()) };
    *lock(&mock_instance_ref(p_instance).user_agent) = Some(value);
}

unsafe extern "C" fn mock_set_app_id(
    p_instance: *mut libvlc_instance_t,
    id: *const c_char,
    version: *const c_char,
    icon: *const c_char,
) {
    let value = unsafe {
        (
            text(id).unwrap_or_default(),
            text(version).unwrap_or_default(),
            text(icon).unwrap_or_default(),
        )
    };
    *lock(&mock_instance_ref(p_instance).app_id) = Some(value);
}

unsafe extern "C" fn mock_audio_filter_list_get(
    _p_instance: *mut libvlc_instance_t,
) -> *mut libvlc_module_description_t {
    module_list(&[
        ("equalizer", "Equalizer", "Equalizer with 10 bands", "Graphic equalizer"),
        ("normvol", "Volume normalizer", "Volume normalizer", ""),
    ])
}

unsafe extern "C" fn mock_video_filter_list_get(
    _p_instance: *mut libvlc_instance_t,
) -> *mut libvlc_module_description_t {
    module_list(&[("invert", "Color inversion", "Invert video filter", "")])
}

unsafe extern "C" fn mock_module_description_list_release(p_list: *mut libvlc_module_description_t) {
    let mut node = p_list;
    while !node.is_null() {
        let current = unsafe { Box::from_raw(node) };
        for text in [
            current.psz_name,
            current.psz_shortname,
            current.psz_longname,
            current.psz_help,
        ] {
            if !text.is_null() {
                drop(unsafe { CString::from_raw(text) });
            }
        }
        node = current.p_next;
    }
    MODULE_LISTS_LIVE.fetch_sub(1, Ordering::SeqCst);
}

// Library-wide diagnostics and memory.

unsafe extern "C" fn mock_errmsg() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    })
}

unsafe extern "C" fn mock_clearerr() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

unsafe extern "C" fn mock_free(ptr: *mut c_void) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr.cast()) });
    }
}

unsafe extern "C" fn mock_get_version() -> *const c_char {
    c"3.0.21 Mock".as_ptr()
}

unsafe extern "C" fn mock_get_compiler() -> *const c_char {
    c"rustc".as_ptr()
}

unsafe extern "C" fn mock_get_changeset() -> *const c_char {
    c"mock-changeset".as_ptr()
}

// Events.

unsafe extern "C" fn mock_event_attach(
    p_event_manager: *mut libvlc_event_manager_t,
    i_event_type: libvlc_event_type_t,
    f_callback: libvlc_callback_t,
    user_data: *mut c_void,
) -> c_int {
    let instance = mock_instance_ref(p_event_manager.cast());
    let attempt = instance.attach_calls.fetch_add(1, Ordering::SeqCst);
    if instance
        .fail_attach_after
        .is_some_and(|limit| attempt >= limit)
    {
        set_error("mock: event manager refused the callback");
        return -1;
    }
    lock(&instance.callbacks).push(Registration {
        event_type: i_event_type,
        callback: f_callback,
        data: user_data as usize,
    });
    0
}

unsafe extern "C" fn mock_event_detach(
    p_event_manager: *mut libvlc_event_manager_t,
    i_event_type: libvlc_event_type_t,
    _f_callback: libvlc_callback_t,
    user_data: *mut c_void,
) {
    let instance = mock_instance_ref(p_event_manager.cast());
    instance.detach_calls.fetch_add(1, Ordering::SeqCst);
    lock(&instance.callbacks).retain(|registration| {
        registration.event_type != i_event_type || registration.data != user_data as usize
    });
}

// Media.

unsafe extern "C" fn mock_media_new_path(
    _p_instance: *mut libvlc_instance_t,
    path: *const c_char,
) -> *mut libvlc_media_t {
    match unsafe { text(path) } {
        Some(path) if !path.is_empty() => new_media(format!("file://{path}")),
        _ => {
            set_error("mock: empty path");
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn mock_media_new_location(
    _p_instance: *mut libvlc_instance_t,
    psz_mrl: *const c_char,
) -> *mut libvlc_media_t {
    match unsafe { text(psz_mrl) } {
        Some(mrl) if mrl.contains("://") => new_media(mrl),
        _ => {
            set_error("mock: not a location");
            ptr::null_mut()
        }
    }
}

unsafe extern "C" fn mock_media_new_fd(_p_instance: *mut libvlc_instance_t, fd: c_int) -> *mut libvlc_media_t {
    if fd < 0 {
        set_error("mock: invalid file descriptor");
        return ptr::null_mut();
    }
    new_media(format!("fd://{fd}"))
}

unsafe extern "C" fn mock_media_new_as_node(
    _p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
) -> *mut libvlc_media_t {
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    new_media(format!("vlc://nop#{name}"))
}

unsafe extern "C" fn mock_media_retain(p_md: *mut libvlc_media_t) {
    mock_media_ref(p_md).refs.fetch_add(1, Ordering::SeqCst);
}

unsafe extern "C" fn mock_media_release(p_md: *mut libvlc_media_t) {
    mock_media_ref(p_md).refs.fetch_sub(1, Ordering::SeqCst);
}

unsafe extern "C" fn mock_media_get_mrl(p_md: *mut libvlc_media_t) -> *mut c_char {
    CString::new(mock_media_ref(p_md).mrl.clone())
        .unwrap()
        .into_raw()
}

unsafe extern "C" fn mock_media_duplicate(p_md: *mut libvlc_media_t) -> *mut libvlc_media_t {
    new_media(mock_media_ref(p_md).mrl.clone())
}

// Media player.

unsafe extern "C" fn mock_media_player_new(_p_instance: *mut libvlc_instance_t) -> *mut libvlc_media_player_t {
    new_player(ptr::null_mut())
}

unsafe extern "C" fn mock_media_player_new_from_media(p_md: *mut libvlc_media_t) -> *mut libvlc_media_player_t {
    new_player(p_md)
}

unsafe extern "C" fn mock_media_player_release(p_mi: *mut libvlc_media_player_t) {
    let player = mock_player_ref(p_mi);
    if player.refs.fetch_sub(1, Ordering::SeqCst) == 1 {
        let media = std::mem::take(&mut *lock(&player.media));
        if media != 0 {
            mock_media_ref(media as *mut libvlc_media_t)
                .refs
                .fetch_sub(1, Ordering::SeqCst);
        }
    }
}

unsafe extern "C" fn mock_media_player_set_media(p_mi: *mut libvlc_media_player_t, p_md: *mut libvlc_media_t) {
    let player = mock_player_ref(p_mi);
    if !p_md.is_null() {
        mock_media_ref(p_md).refs.fetch_add(1, Ordering::SeqCst);
    }
    let previous = std::mem::replace(&mut *lock(&player.media), p_md as usize);
    if previous != 0 {
        mock_media_ref(previous as *mut libvlc_media_t)
            .refs
            .fetch_sub(1, Ordering::SeqCst);
    }
}

unsafe extern "C" fn mock_media_player_get_media(p_mi: *mut libvlc_media_player_t) -> *mut libvlc_media_t {
    let media = *lock(&mock_player_ref(p_mi).media) as *mut libvlc_media_t;
    if !media.is_null() {
        mock_media_ref(media).refs.fetch_add(1, Ordering::SeqCst);
    }
    media
}

unsafe extern "C" fn mock_media_player_play(p_mi: *mut libvlc_media_player_t) -> c_int {
    let player = mock_player_ref(p_mi);
    if *lock(&player.media) == 0 {
        set_error("mock: no media to play");
        return -1;
    }
    player.playing.store(true, Ordering::SeqCst);
    0
}

unsafe extern "C" fn mock_media_player_pause(p_mi: *mut libvlc_media_player_t) {
    mock_player_ref(p_mi).playing.store(false, Ordering::SeqCst);
}

unsafe extern "C" fn mock_media_player_stop(p_mi: *mut libvlc_media_player_t) {
    mock_player_ref(p_mi).playing.store(false, Ordering::SeqCst);
}

unsafe extern "C" fn mock_media_player_is_playing(p_mi: *mut libvlc_media_player_t) -> c_int {
    c_int::from(mock_player_ref(p_mi).playing.load(Ordering::SeqCst))
}

// VLM.

unsafe extern "C" fn mock_vlm_release(p_instance: *mut libvlc_instance_t) {
    let instance = mock_instance_ref(p_instance);
    instance.vlm_released.store(true, Ordering::SeqCst);
    lock(&instance.vlm).clear();
}

fn add_vlm_media(instance: &MockInstance, name: Option<String>, media: MockVlmMedia) -> c_int {
    let Some(name) = name else {
        set_error("mock: missing media name");
        return -1;
    };
    {
        let mut vlm = lock(&instance.vlm);
        if vlm.contains_key(&name) {
            set_error(&format!("mock: media {name} already exists"));
            return -1;
        }
        vlm.insert(name.clone(), media);
    }
    instance.emit(vlc_sys::libvlc_VlmMediaAdded, Some(&name), None);
    0
}

unsafe extern "C" fn mock_vlm_add_broadcast(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_input: *const c_char,
    psz_output: *const c_char,
    i_options: c_int,
    ppsz_options: *const *const c_char,
    b_enabled: c_int,
    b_loop: c_int,
) -> c_int {
    let media = MockVlmMedia {
        inputs: unsafe { text(psz_input) }.into_iter().collect(),
        output: unsafe { text(psz_output) },
        options: unsafe { texts(i_options, ppsz_options) },
        enabled: b_enabled != 0,
        looping: b_loop != 0,
        ..Default::default()
    };
    add_vlm_media(mock_instance_ref(p_instance), unsafe { text(psz_name) }, media)
}

unsafe extern "C" fn mock_vlm_add_vod(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_input: *const c_char,
    i_options: c_int,
    ppsz_options: *const *const c_char,
    b_enabled: c_int,
    psz_mux: *const c_char,
) -> c_int {
    let media = MockVlmMedia {
        vod: true,
        inputs: unsafe { text(psz_input) }.into_iter().collect(),
        options: unsafe { texts(i_options, ppsz_options) },
        enabled: b_enabled != 0,
        mux: unsafe { text(psz_mux) },
        ..Default::default()
    };
    add_vlm_media(mock_instance_ref(p_instance), unsafe { text(psz_name) }, media)
}

unsafe extern "C" fn mock_vlm_del_media(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int {
    let instance = mock_instance_ref(p_instance);
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    if lock(&instance.vlm).remove(&name).is_none() {
        set_error(&format!("mock: media {name} not found"));
        return -1;
    }
    instance.emit(vlc_sys::libvlc_VlmMediaRemoved, Some(&name), None);
    0
}

unsafe extern "C" fn mock_vlm_set_enabled(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    b_enabled: c_int,
) -> c_int {
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.enabled = b_enabled != 0)
}

unsafe extern "C" fn mock_vlm_set_output(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_output: *const c_char,
) -> c_int {
    let output = unsafe { text(psz_output) };
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.output = output)
}

unsafe extern "C" fn mock_vlm_set_input(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_input: *const c_char,
) -> c_int {
    let input = unsafe { text(psz_input) };
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.inputs = input.into_iter().collect())
}

unsafe extern "C" fn mock_vlm_add_input(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_input: *const c_char,
) -> c_int {
    let input = unsafe { text(psz_input) };
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.inputs.extend(input))
}

unsafe extern "C" fn mock_vlm_set_loop(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    b_loop: c_int,
) -> c_int {
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.looping = b_loop != 0)
}

unsafe extern "C" fn mock_vlm_set_mux(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_mux: *const c_char,
) -> c_int {
    let mux = unsafe { text(psz_mux) };
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.mux = mux)
}

unsafe extern "C" fn mock_vlm_change_media(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    psz_input: *const c_char,
    psz_output: *const c_char,
    i_options: c_int,
    ppsz_options: *const *const c_char,
    b_enabled: c_int,
    b_loop: c_int,
) -> c_int {
    let inputs: Vec<String> = unsafe { text(psz_input) }.into_iter().collect();
    let output = unsafe { text(psz_output) };
    let options = unsafe { texts(i_options, ppsz_options) };
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| {
        media.inputs = inputs;
        media.output = output;
        media.options = options;
        media.enabled = b_enabled != 0;
        media.looping = b_loop != 0;
    })
}

unsafe extern "C" fn mock_vlm_play_media(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int {
    let instance = mock_instance_ref(p_instance);
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    {
        let mut vlm = lock(&instance.vlm);
        let Some(media) = vlm.get_mut(&name) else {
            set_error(&format!("mock: media {name} not found"));
            return -1;
        };
        media.playing = true;
        media.paused = false;
    }
    instance.emit(vlc_sys::libvlc_VlmMediaInstanceStarted, Some(&name), Some("default"));
    instance.emit(vlc_sys::libvlc_VlmMediaInstanceStatusPlaying, Some(&name), Some("default"));
    0
}

unsafe extern "C" fn mock_vlm_stop_media(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int {
    let instance = mock_instance_ref(p_instance);
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    {
        let mut vlm = lock(&instance.vlm);
        let Some(media) = vlm.get_mut(&name) else {
            set_error(&format!("mock: media {name} not found"));
            return -1;
        };
        media.playing = false;
        media.position = 0.0;
    }
    instance.emit(vlc_sys::libvlc_VlmMediaInstanceStatusEnd, Some(&name), Some("default"));
    instance.emit(vlc_sys::libvlc_VlmMediaInstanceStopped, Some(&name), Some("default"));
    0
}

unsafe extern "C" fn mock_vlm_pause_media(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int {
    let instance = mock_instance_ref(p_instance);
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    {
        let mut vlm = lock(&instance.vlm);
        let Some(media) = vlm.get_mut(&name).filter(|media| media.playing) else {
            set_error(&format!("mock: media {name} is not playing"));
            return -1;
        };
        media.paused = true;
    }
    instance.emit(vlc_sys::libvlc_VlmMediaInstanceStatusPause, Some(&name), Some("default"));
    0
}

unsafe extern "C" fn mock_vlm_seek_media(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    f_percentage: f32,
) -> c_int {
    mock_instance_ref(p_instance).update_vlm(psz_name, |media| media.position = f_percentage / 100.0)
}

unsafe extern "C" fn mock_vlm_show_media(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> *const c_char {
    let instance = mock_instance_ref(p_instance);
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    let vlm = lock(&instance.vlm);
    let describe = |name: &str, media: &MockVlmMedia| {
        serde_json::json!({
            "name": name,
            "type": if media.vod { "vod" } else { "broadcast" },
            "enabled": if media.enabled { "yes" } else { "no" },
            "loop": if media.looping { "yes" } else { "no" },
            "inputs": media.inputs,
            "output": media.output.clone().unwrap_or_default(),
            "options": media.options,
            "instances": if media.playing {
                serde_json::json!([{ "name": "default", "state": if media.paused { "paused" } else { "playing" } }])
            } else {
                serde_json::json!([])
            },
        })
    };
    let value = if name.is_empty() {
        let all: serde_json::Map<String, serde_json::Value> = vlm
            .iter()
            .map(|(name, media)| (name.clone(), describe(name, media)))
            .collect();
        serde_json::json!({ "media": all })
    } else {
        match vlm.get(&name) {
            Some(media) => serde_json::json!({ "media": describe(&name, media) }),
            None => {
                set_error(&format!("mock: media {name} not found"));
                return ptr::null();
            }
        }
    };
    CString::new(value.to_string()).unwrap().into_raw()
}

fn playing_media<T>(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    query: impl FnOnce(&MockVlmMedia) -> T,
    missing: T,
) -> T {
    let instance = mock_instance_ref(p_instance);
    let name = unsafe { text(psz_name) }.unwrap_or_default();
    match lock(&instance.vlm).get(&name).filter(|media| media.playing) {
        Some(media) => query(media),
        None => {
            set_error(&format!("mock: media {name} has no running instance"));
            missing
        }
    }
}

unsafe extern "C" fn mock_vlm_get_media_instance_position(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    _i_instance: c_int,
) -> f32 {
    playing_media(p_instance, psz_name, |media| media.position, -1.0)
}

unsafe extern "C" fn mock_vlm_get_media_instance_time(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    _i_instance: c_int,
) -> c_int {
    playing_media(p_instance, psz_name, |media| (media.position * 60_000.0) as c_int, -1)
}

unsafe extern "C" fn mock_vlm_get_media_instance_length(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    _i_instance: c_int,
) -> c_int {
    playing_media(p_instance, psz_name, |_| 60_000, -1)
}

unsafe extern "C" fn mock_vlm_get_media_instance_rate(
    p_instance: *mut libvlc_instance_t,
    psz_name: *const c_char,
    _i_instance: c_int,
) -> c_int {
    playing_media(p_instance, psz_name, |_| 1000, -1)
}

unsafe extern "C" fn mock_vlm_get_event_manager(p_instance: *mut libvlc_instance_t) -> *mut libvlc_event_manager_t {
    // The mock instance doubles as its own VLM event manager.
    p_instance.cast()
}

/// Every mock entry point, keyed by the symbol libvlc exports it under.
pub fn mock_symbols() -> HashMap<&'static str, *const c_void> {
    HashMap::from_iter([
        ("libvlc_new", mock_new as *const c_void),
        ("libvlc_release", mock_release as *const c_void),
        ("libvlc_retain", mock_retain as *const c_void),
        ("libvlc_add_intf", mock_add_intf as *const c_void),
        ("libvlc_set_exit_handler", mock_set_exit_handler as *const c_void),
        ("libvlc_wait", mock_wait as *const c_void),
        ("libvlc_set_user_agent", mock_set_user_agent as *const c_void),
        ("libvlc_set_app_id", mock_set_app_id as *const c_void),
        ("libvlc_audio_filter_list_get", mock_audio_filter_list_get as *const c_void),
        ("libvlc_video_filter_list_get", mock_video_filter_list_get as *const c_void),
        ("libvlc_module_description_list_release", mock_module_description_list_release as *const c_void),
        ("libvlc_errmsg", mock_errmsg as *const c_void),
        ("libvlc_clearerr", mock_clearerr as *const c_void),
        ("libvlc_free", mock_free as *const c_void),
        ("libvlc_get_version", mock_get_version as *const c_void),
        ("libvlc_get_compiler", mock_get_compiler as *const c_void),
        ("libvlc_get_changeset", mock_get_changeset as *const c_void),
        ("libvlc_event_attach", mock_event_attach as *const c_void),
        ("libvlc_event_detach", mock_event_detach as *const c_void),
        ("libvlc_media_new_path", mock_media_new_path as *const c_void),
        ("libvlc_media_new_location", mock_media_new_location as *const c_void),
        ("libvlc_media_new_fd", mock_media_new_fd as *const c_void),
        ("libvlc_media_new_as_node", mock_media_new_as_node as *const c_void),
        ("libvlc_media_retain", mock_media_retain as *const c_void),
        ("libvlc_media_release", mock_media_release as *const c_void),
        ("libvlc_media_get_mrl", mock_media_get_mrl as *const c_void),
        ("libvlc_media_duplicate", mock_media_duplicate as *const c_void),
        ("libvlc_media_player_new", mock_media_player_new as *const c_void),
        ("libvlc_media_player_new_from_media", mock_media_player_new_from_media as *const c_void),
        ("libvlc_media_player_release", mock_media_player_release as *const c_void),
        ("libvlc_media_player_set_media", mock_media_player_set_media as *const c_void),
        ("libvlc_media_player_get_media", mock_media_player_get_media as *const c_void),
        ("libvlc_media_player_play", mock_media_player_play as *const c_void),
        ("libvlc_media_player_pause", mock_media_player_pause as *const c_void),
        ("libvlc_media_player_stop", mock_media_player_stop as *const c_void),
        ("libvlc_media_player_is_playing", mock_media_player_is_playing as *const c_void),
        ("libvlc_vlm_release", mock_vlm_release as *const c_void),
        ("libvlc_vlm_add_broadcast", mock_vlm_add_broadcast as *const c_void),
        ("libvlc_vlm_add_vod", mock_vlm_add_vod as *const c_void),
        ("libvlc_vlm_del_media", mock_vlm_del_media as *const c_void),
        ("libvlc_vlm_set_enabled", mock_vlm_set_enabled as *const c_void),
        ("libvlc_vlm_set_output", mock_vlm_set_output as *const c_void),
        ("libvlc_vlm_set_input", mock_vlm_set_input as *const c_void),
        ("libvlc_vlm_add_input", mock_vlm_add_input as *const c_void),
        ("libvlc_vlm_set_loop", mock_vlm_set_loop as *const c_void),
        ("libvlc_vlm_set_mux", mock_vlm_set_mux as *const c_void),
        ("libvlc_vlm_change_media", mock_vlm_change_media as *const c_void),
        ("libvlc_vlm_play_media", mock_vlm_play_media as *const c_void),
        ("libvlc_vlm_stop_media", mock_vlm_stop_media as *const c_void),
        ("libvlc_vlm_pause_media", mock_vlm_pause_media as *const c_void),
        ("libvlc_vlm_seek_media", mock_vlm_seek_media as *const c_void),
        ("libvlc_vlm_show_media", mock_vlm_show_media as *const c_void),
        ("libvlc_vlm_get_media_instance_position", mock_vlm_get_media_instance_position as *const c_void),
        ("libvlc_vlm_get_media_instance_time", mock_vlm_get_media_instance_time as *const c_void),
        ("libvlc_vlm_get_media_instance_length", mock_vlm_get_media_instance_length as *const c_void),
        ("libvlc_vlm_get_media_instance_rate", mock_vlm_get_media_instance_rate as *const c_void),
        ("libvlc_vlm_get_event_manager", mock_vlm_get_event_manager as *const c_void),
    ])
}

/// Initializes logging once (respects `RUST_LOG`).
pub fn setup_logging() {
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_test_writer()
            .init();
    });
}

/// A function table bound to the mock, private to the calling test.
pub fn mock_api() -> VlcApiHandle {
    setup_logging();
    unsafe { vlc::load_api_from(&mock_symbols()) }.unwrap()
}

/// Like [`mock_api`], with one entry point swapped for `address`.
pub fn mock_api_replacing(symbol: &'static str, address: *const c_void) -> VlcApiHandle {
    setup_logging();
    let mut symbols = mock_symbols();
    symbols.insert(symbol, address);
    unsafe { vlc::load_api_from(&symbols) }.unwrap()
}

/// A `libvlc_new` that fails without recording a diagnostic, as libvlc does
/// for most startup failures.
pub unsafe extern "C" fn silent_failing_new(
    _argc: c_int,
    _argv: *const *const c_char,
) -> *mut libvlc_instance_t {
    ptr::null_mut()
}

/// A VLM call on a media name that fails without recording a diagnostic.
pub unsafe extern "C" fn silent_failing_vlm_call(
    _p_instance: *mut libvlc_instance_t,
    _psz_name: *const c_char,
) -> c_int {
    -1
}

/// Leaves `message` in the calling thread's libvlc error slot.
pub fn leave_stale_error(message: &str) {
    set_error(message);
}

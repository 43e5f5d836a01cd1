// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! The libvlc function table.
//!
//! Each entry below is a descriptor: binding name, exported symbol and C
//! signature. The macro turns the list into [`DESCRIPTORS`], the [`LibVlc`]
//! table of resolved fn pointers, and one forwarding method per entry.

use std::{
    ffi::{OsStr, c_void},
    os::raw::{c_char, c_int},
};

use crate::{
    Descriptor, ResolveError, SymbolSource, libvlc_callback_t, libvlc_event_manager_t,
    libvlc_event_type_t, libvlc_exit_handler_t, libvlc_instance_t, libvlc_media_player_t,
    libvlc_media_t, libvlc_module_description_t, resolve_symbol,
};

macro_rules! native_functions {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident = $symbol:literal ( $($arg:ident : $argty:ty),* $(,)? ) $(-> $ret:ty)?;
        )*
    ) => {
        /// Descriptors for every entry point in [`LibVlc`], in declaration order.
        pub const DESCRIPTORS: &[Descriptor] = &[
            $(
                Descriptor {
                    name: stringify!($name),
                    symbol: $symbol,
                    signature: stringify!(fn($($argty),*) $(-> $ret)?),
                },
            )*
        ];

        /// Resolved libvlc entry points.
        ///
        /// When built by [`LibVlc::new`] the table owns the shared library, so the
        /// pointers stay valid for as long as the table is alive.
        pub struct LibVlc {
            library: Option<libloading::Library>,
            $( $name: unsafe extern "C" fn($($argty),*) $(-> $ret)?, )*
        }

        impl LibVlc {
            /// Resolves every descriptor against `source`.
            ///
            /// # Safety
            ///
            /// Each address `source` returns must be a function with the signature
            /// recorded in its descriptor, and must stay valid for the lifetime of
            /// the returned table.
            pub unsafe fn load_from<S: SymbolSource + ?Sized>(source: &S) -> Result<Self, ResolveError> {
                Ok(Self {
                    library: None,
                    $(
                        $name: {
                            let address = resolve_symbol(source, $symbol)?;
                            unsafe {
                                std::mem::transmute::<*const c_void, unsafe extern "C" fn($($argty),*) $(-> $ret)?>(address)
                            }
                        },
                    )*
                })
            }

            $(
                $(#[$meta])*
                #[doc = concat!("Calls `", $symbol, "`.")]
                ///
                /// # Safety
                ///
                /// Arguments must satisfy the libvlc contract for this entry point.
                #[inline]
                pub unsafe fn $name(&self, $($arg: $argty),*) $(-> $ret)? {
                    unsafe { (self.$name)($($arg),*) }
                }
            )*
        }
    };
}

impl LibVlc {
    /// Opens the shared library at `path` and resolves every entry point.
    ///
    /// # Safety
    ///
    /// Loading a library runs its initialisers; `path` must name a libvlc
    /// build exporting the declared signatures.
    pub unsafe fn new<P: AsRef<OsStr>>(path: P) -> Result<Self, LoadError> {
        let library = unsafe { libloading::Library::new(path)? };
        let mut table = unsafe { Self::load_from(&library)? };
        table.library = Some(library);
        Ok(table)
    }

    /// Returns `true` if this table keeps a shared library loaded.
    pub fn owns_library(&self) -> bool {
        self.library.is_some()
    }
}

/// Failure to open or bind the shared library.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Library(#[from] libloading::Error),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

native_functions! {
    // Core instance lifecycle.
    fn instance_new = "libvlc_new"(argc: c_int, argv: *const *const c_char) -> *mut libvlc_instance_t;
    fn instance_release = "libvlc_release"(p_instance: *mut libvlc_instance_t);
    fn instance_retain = "libvlc_retain"(p_instance: *mut libvlc_instance_t);
    fn add_intf = "libvlc_add_intf"(p_instance: *mut libvlc_instance_t, name: *const c_char) -> c_int;
    fn set_exit_handler = "libvlc_set_exit_handler"(
        p_instance: *mut libvlc_instance_t,
        cb: libvlc_exit_handler_t,
        opaque: *mut c_void,
    );
    fn wait = "libvlc_wait"(p_instance: *mut libvlc_instance_t);
    fn set_user_agent = "libvlc_set_user_agent"(
        p_instance: *mut libvlc_instance_t,
        name: *const c_char,
        http: *const c_char,
    );
    fn set_app_id = "libvlc_set_app_id"(
        p_instance: *mut libvlc_instance_t,
        id: *const c_char,
        version: *const c_char,
        icon: *const c_char,
    );
    fn audio_filter_list_get = "libvlc_audio_filter_list_get"(
        p_instance: *mut libvlc_instance_t,
    ) -> *mut libvlc_module_description_t;
    fn video_filter_list_get = "libvlc_video_filter_list_get"(
        p_instance: *mut libvlc_instance_t,
    ) -> *mut libvlc_module_description_t;
    fn module_description_list_release = "libvlc_module_description_list_release"(
        p_list: *mut libvlc_module_description_t,
    );

    // Library-wide diagnostics and memory.
    fn errmsg = "libvlc_errmsg"() -> *const c_char;
    fn clearerr = "libvlc_clearerr"();
    fn free = "libvlc_free"(ptr: *mut c_void);
    fn get_version = "libvlc_get_version"() -> *const c_char;
    fn get_compiler = "libvlc_get_compiler"() -> *const c_char;
    fn get_changeset = "libvlc_get_changeset"() -> *const c_char;

    // Events.
    fn event_attach = "libvlc_event_attach"(
        p_event_manager: *mut libvlc_event_manager_t,
        i_event_type: libvlc_event_type_t,
        f_callback: libvlc_callback_t,
        user_data: *mut c_void,
    ) -> c_int;
    fn event_detach = "libvlc_event_detach"(
        p_event_manager: *mut libvlc_event_manager_t,
        i_event_type: libvlc_event_type_t,
        f_callback: libvlc_callback_t,
        user_data: *mut c_void,
    );

    // Media.
    fn media_new_path = "libvlc_media_new_path"(
        p_instance: *mut libvlc_instance_t,
        path: *const c_char,
    ) -> *mut libvlc_media_t;
    fn media_new_location = "libvlc_media_new_location"(
        p_instance: *mut libvlc_instance_t,
        psz_mrl: *const c_char,
    ) -> *mut libvlc_media_t;
    fn media_new_fd = "libvlc_media_new_fd"(p_instance: *mut libvlc_instance_t, fd: c_int) -> *mut libvlc_media_t;
    fn media_new_as_node = "libvlc_media_new_as_node"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
    ) -> *mut libvlc_media_t;
    fn media_retain = "libvlc_media_retain"(p_md: *mut libvlc_media_t);
    fn media_release = "libvlc_media_release"(p_md: *mut libvlc_media_t);
    fn media_get_mrl = "libvlc_media_get_mrl"(p_md: *mut libvlc_media_t) -> *mut c_char;
    fn media_duplicate = "libvlc_media_duplicate"(p_md: *mut libvlc_media_t) -> *mut libvlc_media_t;

    // Media player.
    fn media_player_new = "libvlc_media_player_new"(p_instance: *mut libvlc_instance_t) -> *mut libvlc_media_player_t;
    fn media_player_new_from_media = "libvlc_media_player_new_from_media"(
        p_md: *mut libvlc_media_t,
    ) -> *mut libvlc_media_player_t;
    fn media_player_release = "libvlc_media_player_release"(p_mi: *mut libvlc_media_player_t);
    fn media_player_set_media = "libvlc_media_player_set_media"(
        p_mi: *mut libvlc_media_player_t,
        p_md: *mut libvlc_media_t,
    );
    fn media_player_get_media = "libvlc_media_player_get_media"(p_mi: *mut libvlc_media_player_t) -> *mut libvlc_media_t;
    fn media_player_play = "libvlc_media_player_play"(p_mi: *mut libvlc_media_player_t) -> c_int;
    fn media_player_pause = "libvlc_media_player_pause"(p_mi: *mut libvlc_media_player_t);
    fn media_player_stop = "libvlc_media_player_stop"(p_mi: *mut libvlc_media_player_t);
    fn media_player_is_playing = "libvlc_media_player_is_playing"(p_mi: *mut libvlc_media_player_t) -> c_int;

    // VLM (broadcast / video on demand).
    fn vlm_release = "libvlc_vlm_release"(p_instance: *mut libvlc_instance_t);
    fn vlm_add_broadcast = "libvlc_vlm_add_broadcast"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_input: *const c_char,
        psz_output: *const c_char,
        i_options: c_int,
        ppsz_options: *const *const c_char,
        b_enabled: c_int,
        b_loop: c_int,
    ) -> c_int;
    fn vlm_add_vod = "libvlc_vlm_add_vod"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_input: *const c_char,
        i_options: c_int,
        ppsz_options: *const *const c_char,
        b_enabled: c_int,
        psz_mux: *const c_char,
    ) -> c_int;
    fn vlm_del_media = "libvlc_vlm_del_media"(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int;
    fn vlm_set_enabled = "libvlc_vlm_set_enabled"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        b_enabled: c_int,
    ) -> c_int;
    fn vlm_set_output = "libvlc_vlm_set_output"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_output: *const c_char,
    ) -> c_int;
    fn vlm_set_input = "libvlc_vlm_set_input"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_input: *const c_char,
    ) -> c_int;
    fn vlm_add_input = "libvlc_vlm_add_input"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_input: *const c_char,
    ) -> c_int;
    fn vlm_set_loop = "libvlc_vlm_set_loop"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        b_loop: c_int,
    ) -> c_int;
    fn vlm_set_mux = "libvlc_vlm_set_mux"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_mux: *const c_char,
    ) -> c_int;
    fn vlm_change_media = "libvlc_vlm_change_media"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        psz_input: *const c_char,
        psz_output: *const c_char,
        i_options: c_int,
        ppsz_options: *const *const c_char,
        b_enabled: c_int,
        b_loop: c_int,
    ) -> c_int;
    fn vlm_play_media = "libvlc_vlm_play_media"(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int;
    fn vlm_stop_media = "libvlc_vlm_stop_media"(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int;
    fn vlm_pause_media = "libvlc_vlm_pause_media"(p_instance: *mut libvlc_instance_t, psz_name: *const c_char) -> c_int;
    fn vlm_seek_media = "libvlc_vlm_seek_media"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        f_percentage: f32,
    ) -> c_int;
    fn vlm_show_media = "libvlc_vlm_show_media"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
    ) -> *const c_char;
    fn vlm_get_media_instance_position = "libvlc_vlm_get_media_instance_position"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        i_instance: c_int,
    ) -> f32;
    fn vlm_get_media_instance_time = "libvlc_vlm_get_media_instance_time"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        i_instance: c_int,
    ) -> c_int;
    fn vlm_get_media_instance_length = "libvlc_vlm_get_media_instance_length"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        i_instance: c_int,
    ) -> c_int;
    fn vlm_get_media_instance_rate = "libvlc_vlm_get_media_instance_rate"(
        p_instance: *mut libvlc_instance_t,
        psz_name: *const c_char,
        i_instance: c_int,
    ) -> c_int;
    fn vlm_get_event_manager = "libvlc_vlm_get_event_manager"(
        p_instance: *mut libvlc_instance_t,
    ) -> *mut libvlc_event_manager_t;
}

// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Descriptions of libvlc modules, as returned by the filter listings.

use vlc_sys::libvlc_module_description_t;

use crate::{VlcApi, marshal};

/// One audio or video filter module available to an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDescription {
    pub name: String,
    pub shortname: Option<String>,
    pub longname: Option<String>,
    pub help: Option<String>,
}

/// Copies a native module list and releases it.
///
/// # Safety
///
/// `list` must be null or the head of a list returned by one of libvlc's
/// filter list getters, not yet released.
pub(crate) unsafe fn take_module_list(
    api: &VlcApi,
    list: *mut libvlc_module_description_t,
) -> Vec<ModuleDescription> {
    let mut modules = Vec::new();
    let mut node = list;
    while !node.is_null() {
        let current = unsafe { &*node };
        modules.push(ModuleDescription {
            name: unsafe { marshal::from_native(current.psz_name) }.unwrap_or_default(),
            shortname: unsafe { marshal::from_native(current.psz_shortname) },
            longname: unsafe { marshal::from_native(current.psz_longname) },
            help: unsafe { marshal::from_native(current.psz_help) },
        });
        node = current.p_next;
    }
    if !list.is_null() {
        unsafe { api.module_description_list_release(list) };
    }
    modules
}

// SPDX-FileCopyrightText: 2026 Contributors to the vlc-rs project.
// SPDX-License-Identifier: Apache-2.0

//! Native callback registration for VLM events and the exit handler.
//!
//! libvlc keeps a raw `user_data` pointer for every attached callback, so
//! the context behind it must not move or be freed while the native side can
//! still call it. Contexts are leaked boxes tracked in [`EventBridge`]; they
//! are detached while the instance is alive and only freed after the
//! instance has been released.

use std::{
    any::Any,
    ffi::c_void,
    panic::{AssertUnwindSafe, catch_unwind},
    ptr::NonNull,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use vlc_sys::{libvlc_event_manager_t, libvlc_event_t};

use crate::{Error, Result, SubscriptionId, VlcApi, VlmEvent, VlmEventKind, marshal};

type Handler = Arc<dyn Fn(&VlmEvent) + Send + Sync>;
type ExitFn = Box<dyn Fn() + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// User subscriptions plus the first callback failure not yet reported.
#[derive(Default)]
pub(crate) struct HandlerTable {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(SubscriptionId, VlmEventKind, Handler)>>,
    failure: Mutex<Option<Error>>,
}

impl HandlerTable {
    pub(crate) fn subscribe(&self, kind: VlmEventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.handlers).push((id, kind, handler));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = lock(&self.handlers);
        let before = handlers.len();
        handlers.retain(|(existing, _, _)| *existing != id);
        handlers.len() != before
    }

    pub(crate) fn take_failure(&self) -> Option<Error> {
        lock(&self.failure).take()
    }

    fn record_failure(&self, callback: String, payload: Box<dyn Any + Send>) {
        let message = panic_message(payload.as_ref());
        tracing::error!("Callback {} panicked: {}", callback, message);
        let mut failure = lock(&self.failure);
        if failure.is_none() {
            *failure = Some(Error::CallbackPanicked { callback, message });
        }
    }

    fn dispatch(&self, event: &VlmEvent) {
        // Handlers run without the lock held so they may (un)subscribe.
        let handlers: Vec<Handler> = lock(&self.handlers)
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        tracing::trace!("Dispatching {:?} to {} handler(s)", event.kind, handlers.len());
        for handler in handlers {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| handler(event))) {
                self.record_failure(format!("{:?}", event.kind), payload);
            }
        }
    }
}

struct CallbackContext {
    kind: VlmEventKind,
    table: Arc<HandlerTable>,
}

struct PinnedCallback {
    kind: VlmEventKind,
    context: NonNull<CallbackContext>,
    attached: bool,
}

unsafe extern "C" fn dispatch_event(event: *const libvlc_event_t, data: *mut c_void) {
    if event.is_null() || data.is_null() {
        return;
    }
    let context = unsafe { &*(data as *const CallbackContext) };
    let event = unsafe { &*event };
    let payload = unsafe { event.u.vlm_media_event };
    let event = VlmEvent {
        kind: VlmEventKind::from_raw(event.type_).unwrap_or(context.kind),
        media_name: unsafe { marshal::from_native(payload.psz_media_name) },
        instance_name: unsafe { marshal::from_native(payload.psz_instance_name) },
    };
    context.table.dispatch(&event);
}

/// Registry of the native callbacks one instance has pinned.
pub(crate) struct EventBridge {
    table: Arc<HandlerTable>,
    pinned: Vec<PinnedCallback>,
}

// The raw contexts are only touched by the owning instance, which serializes
// attach/detach/release through `&mut self`.
unsafe impl Send for EventBridge {}
unsafe impl Sync for EventBridge {}

impl EventBridge {
    pub(crate) fn new() -> Self {
        Self {
            table: Arc::new(HandlerTable::default()),
            pinned: Vec::with_capacity(VlmEventKind::ALL.len()),
        }
    }

    pub(crate) fn table(&self) -> &Arc<HandlerTable> {
        &self.table
    }

    /// Number of callback contexts currently pinned.
    pub(crate) fn pinned_count(&self) -> usize {
        self.pinned.len()
    }

    /// Pins a context for every VLM event kind and attaches the dispatcher.
    ///
    /// On error, the contexts pinned so far stay in the registry and must be
    /// detached and released by the caller.
    pub(crate) fn attach_all(
        &mut self,
        api: &VlcApi,
        manager: *mut libvlc_event_manager_t,
    ) -> Result<()> {
        for kind in VlmEventKind::ALL {
            let context = Box::new(CallbackContext {
                kind,
                table: self.table.clone(),
            });
            let context = NonNull::from(Box::leak(context));
            self.pinned.push(PinnedCallback {
                kind,
                context,
                attached: false,
            });
            api.clear_error();
            let status = unsafe {
                api.event_attach(
                    manager,
                    kind.raw(),
                    Some(dispatch_event),
                    context.as_ptr().cast(),
                )
            };
            if status != 0 {
                return Err(Error::Native(
                    api.last_error_or(&format!("failed to attach {kind:?} callback")),
                ));
            }
            if let Some(pinned) = self.pinned.last_mut() {
                pinned.attached = true;
            }
        }
        tracing::debug!("Attached {} VLM event callbacks", self.pinned.len());
        Ok(())
    }

    /// Detaches every attached callback. Contexts stay pinned.
    ///
    /// # Safety
    ///
    /// `manager` must be the event manager passed to [`Self::attach_all`] and
    /// still be alive.
    pub(crate) unsafe fn detach_all(&mut self, api: &VlcApi, manager: *mut libvlc_event_manager_t) {
        for pinned in self.pinned.iter_mut().filter(|pinned| pinned.attached) {
            unsafe {
                api.event_detach(
                    manager,
                    pinned.kind.raw(),
                    Some(dispatch_event),
                    pinned.context.as_ptr().cast(),
                )
            };
            pinned.attached = false;
        }
    }

    /// Frees every detached context and returns how many were freed.
    pub(crate) fn release_pins(&mut self) -> usize {
        let mut freed = 0;
        self.pinned.retain(|pinned| {
            if pinned.attached {
                return true;
            }
            drop(unsafe { Box::from_raw(pinned.context.as_ptr()) });
            freed += 1;
            false
        });
        freed
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        self.release_pins();
        if !self.pinned.is_empty() {
            // Still reachable from libvlc; leaking is the only safe option.
            tracing::error!(
                "Leaking {} VLM callback context(s) that were never detached",
                self.pinned.len()
            );
        }
    }
}

/// An exit handler pinned for as long as libvlc may call it.
pub(crate) struct PinnedExitHandler {
    context: NonNull<ExitContext>,
}

struct ExitContext {
    handler: ExitFn,
    table: Arc<HandlerTable>,
}

unsafe impl Send for PinnedExitHandler {}
unsafe impl Sync for PinnedExitHandler {}

impl PinnedExitHandler {
    pub(crate) fn new(handler: ExitFn, table: Arc<HandlerTable>) -> Self {
        let context = Box::leak(Box::new(ExitContext { handler, table }));
        Self {
            context: NonNull::from(context),
        }
    }

    pub(crate) fn callback(&self) -> vlc_sys::libvlc_exit_handler_t {
        Some(dispatch_exit)
    }

    pub(crate) fn opaque(&self) -> *mut c_void {
        self.context.as_ptr().cast()
    }
}

impl Drop for PinnedExitHandler {
    fn drop(&mut self) {
        drop(unsafe { Box::from_raw(self.context.as_ptr()) });
    }
}

unsafe extern "C" fn dispatch_exit(opaque: *mut c_void) {
    if opaque.is_null() {
        return;
    }
    let context = unsafe { &*(opaque as *const ExitContext) };
    tracing::debug!("libvlc requested exit");
    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (context.handler)())) {
        context
            .table
            .record_failure("exit handler".to_string(), payload);
    }
}

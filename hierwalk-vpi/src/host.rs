// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use crate::ffi;
use hierwalk::{HierarchyHost, SimControl};
use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

/// Handle to a simulator object, e.g., a module instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VpiHandle(NonNull<std::ffi::c_void>);

impl VpiHandle {
    fn new(raw: ffi::vpiHandle) -> Option<Self> {
        NonNull::new(raw).map(Self)
    }

    fn raw(self) -> ffi::vpiHandle {
        self.0.as_ptr()
    }
}

/// Access to the simulator from inside a VPI callback.
pub struct Vpi {
    // handles are only valid on the simulator thread during the current callback
    _callback: PhantomData<*const ()>,
}

impl Vpi {
    /// # Safety
    /// Must only be used from within a callback that the simulator invoked, and must not
    /// outlive it.
    pub unsafe fn new() -> Self {
        Vpi {
            _callback: PhantomData,
        }
    }

    fn iterate(&self, tpe: ffi::PLI_INT32, reference: ffi::vpiHandle) -> VpiIter<'_> {
        let iter = unsafe { ffi::vpi_iterate(tpe, reference) };
        VpiIter {
            iter: VpiHandle::new(iter),
            _vpi: PhantomData,
        }
    }

    fn get_str(&self, property: ffi::PLI_INT32, object: VpiHandle) -> Cow<'_, str> {
        // the simulator reuses the buffer on the next call, so we need to copy
        let value = unsafe { ffi::vpi_get_str(property, object.raw()) };
        if value.is_null() {
            Cow::Borrowed("")
        } else {
            let value = unsafe { CStr::from_ptr(value) };
            Cow::Owned(value.to_string_lossy().into_owned())
        }
    }
}

/// Scans a VPI iterator. The simulator frees the iterator once `vpi_scan` returns null;
/// iterators that are dropped before that are released explicitly.
pub struct VpiIter<'a> {
    iter: Option<VpiHandle>,
    _vpi: PhantomData<&'a Vpi>,
}

impl Iterator for VpiIter<'_> {
    type Item = VpiHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let iter = self.iter?;
        let next = VpiHandle::new(unsafe { ffi::vpi_scan(iter.raw()) });
        if next.is_none() {
            self.iter = None;
        }
        next
    }
}

impl Drop for VpiIter<'_> {
    fn drop(&mut self) {
        if let Some(iter) = self.iter.take() {
            unsafe { ffi::vpi_free_object(iter.raw()) };
        }
    }
}

impl HierarchyHost for Vpi {
    type Node = VpiHandle;
    type Children<'a> = VpiIter<'a>;

    fn top_level(&self) -> Option<Self::Children<'_>> {
        let iter = self.iterate(ffi::vpiModule, ptr::null_mut());
        // VPI cannot distinguish a design without modules from a failure
        iter.iter.is_some().then_some(iter)
    }

    fn children(&self, node: VpiHandle) -> Self::Children<'_> {
        self.iterate(ffi::vpiModule, node.raw())
    }

    fn def_name(&self, node: VpiHandle) -> Cow<'_, str> {
        self.get_str(ffi::vpiDefName, node)
    }

    fn full_name(&self, node: VpiHandle) -> Cow<'_, str> {
        self.get_str(ffi::vpiFullName, node)
    }

    fn time_unit(&self, node: VpiHandle) -> i32 {
        unsafe { ffi::vpi_get(ffi::vpiTimeUnit, node.raw()) }
    }

    fn time_precision(&self, node: VpiHandle) -> i32 {
        unsafe { ffi::vpi_get(ffi::vpiTimePrecision, node.raw()) }
    }
}

impl SimControl for Vpi {
    fn print(&self, msg: &str) {
        print(msg)
    }

    fn call_has_arguments(&self) -> Option<bool> {
        let call = VpiHandle::new(unsafe { ffi::vpi_handle(ffi::vpiSysTfCall, ptr::null_mut()) })?;
        let mut arguments = self.iterate(ffi::vpiArgument, call.raw());
        // dropping the iterator releases it
        Some(arguments.iter.is_some() && arguments.next().is_some())
    }

    fn finish(&self) {
        unsafe { ffi::vpi_control(ffi::vpiFinish, 0 as ffi::PLI_INT32) };
    }
}

/// Prints to the simulator console. Interior NUL bytes are dropped.
pub(crate) fn print(msg: &str) {
    let msg = CString::new(msg.replace('\0', "")).unwrap_or_default();
    unsafe { ffi::vpi_printf(c"%s".as_ptr(), msg.as_ptr()) };
}

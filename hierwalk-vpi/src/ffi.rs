// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// The subset of IEEE 1364 `vpi_user.h` that we need. The symbols are provided by the
// simulator that loads the plugin.

#![allow(non_camel_case_types, non_upper_case_globals)]

use std::os::raw::{c_char, c_int, c_void};

pub type PLI_INT32 = c_int;
pub type PLI_BYTE8 = c_char;
pub type vpiHandle = *mut c_void;

// object types
pub const vpiModule: PLI_INT32 = 32;
pub const vpiSysTfCall: PLI_INT32 = 85;
pub const vpiArgument: PLI_INT32 = 89;

// properties
pub const vpiFullName: PLI_INT32 = 3;
pub const vpiDefName: PLI_INT32 = 9;
pub const vpiTimeUnit: PLI_INT32 = 11;
pub const vpiTimePrecision: PLI_INT32 = 12;

// system task / function types
pub const vpiSysTask: PLI_INT32 = 1;

// vpi_control operations
pub const vpiFinish: PLI_INT32 = 67;

// callback reasons
pub const cbStartOfSimulation: PLI_INT32 = 11;

#[repr(C)]
pub struct t_vpi_systf_data {
    pub type_: PLI_INT32,
    pub sysfunctype: PLI_INT32,
    pub tfname: *const PLI_BYTE8,
    pub calltf: Option<unsafe extern "C" fn(*mut PLI_BYTE8) -> PLI_INT32>,
    pub compiletf: Option<unsafe extern "C" fn(*mut PLI_BYTE8) -> PLI_INT32>,
    pub sizetf: Option<unsafe extern "C" fn(*mut PLI_BYTE8) -> PLI_INT32>,
    pub user_data: *mut PLI_BYTE8,
}

#[repr(C)]
pub struct t_cb_data {
    pub reason: PLI_INT32,
    pub cb_rtn: Option<unsafe extern "C" fn(*mut t_cb_data) -> PLI_INT32>,
    pub obj: vpiHandle,
    pub time: *mut c_void,
    pub value: *mut c_void,
    pub index: PLI_INT32,
    pub user_data: *mut PLI_BYTE8,
}

extern "C" {
    pub fn vpi_register_systf(data: *mut t_vpi_systf_data) -> vpiHandle;
    pub fn vpi_register_cb(data: *mut t_cb_data) -> vpiHandle;
    pub fn vpi_handle(tpe: PLI_INT32, reference: vpiHandle) -> vpiHandle;
    pub fn vpi_iterate(tpe: PLI_INT32, reference: vpiHandle) -> vpiHandle;
    pub fn vpi_scan(iterator: vpiHandle) -> vpiHandle;
    pub fn vpi_free_object(object: vpiHandle) -> PLI_INT32;
    pub fn vpi_get(property: PLI_INT32, object: vpiHandle) -> PLI_INT32;
    pub fn vpi_get_str(property: PLI_INT32, object: vpiHandle) -> *mut PLI_BYTE8;
    pub fn vpi_printf(format: *const PLI_BYTE8, ...) -> PLI_INT32;
    pub fn vpi_control(operation: PLI_INT32, ...) -> PLI_INT32;
}

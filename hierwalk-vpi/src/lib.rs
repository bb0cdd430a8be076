// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Connects the hierwalk system tasks to a simulator through the Verilog Procedural Interface.

mod ffi;
mod host;
mod logger;

use ffi::{PLI_BYTE8, PLI_INT32};
use hierwalk::{Status, SystemTask};
use std::ffi::CString;

pub use hierwalk;
pub use host::{Vpi, VpiHandle, VpiIter};
pub use logger::LOG_ENV;

/// Signature of the entries in `vlog_startup_routines`.
pub type StartupRoutine = Option<extern "C" fn()>;

/// Registers `task` and its start-of-simulation banner with the simulator.
/// Call this from a startup routine.
pub fn register(task: &'static SystemTask) {
    logger::init();
    log::debug!("registering {}", task.name);
    let user_data = task as *const SystemTask as *mut PLI_BYTE8;

    // the simulator may keep the name around for the rest of the run
    let name = match CString::new(task.name) {
        Ok(name) => name.into_raw(),
        Err(e) => {
            log::error!("invalid task name {:?}: {e}", task.name);
            return;
        }
    };
    let mut tf_data = ffi::t_vpi_systf_data {
        type_: ffi::vpiSysTask,
        sysfunctype: 0,
        tfname: name,
        calltf: Some(calltf),
        compiletf: Some(compiletf),
        sizetf: None,
        user_data,
    };
    unsafe { ffi::vpi_register_systf(&mut tf_data) };

    let mut cb_data = ffi::t_cb_data {
        reason: ffi::cbStartOfSimulation,
        cb_rtn: Some(start_of_simulation),
        obj: std::ptr::null_mut(),
        time: std::ptr::null_mut(),
        value: std::ptr::null_mut(),
        index: 0,
        user_data,
    };
    unsafe { ffi::vpi_register_cb(&mut cb_data) };
}

/// # Safety
/// `user_data` must be null or the pointer handed to the simulator in `register`.
unsafe fn task_from_user_data<'a>(user_data: *mut PLI_BYTE8) -> Option<&'a SystemTask> {
    (user_data as *const SystemTask).as_ref()
}

unsafe extern "C" fn compiletf(user_data: *mut PLI_BYTE8) -> PLI_INT32 {
    let Some(task) = task_from_user_data(user_data) else {
        return Status::SystfCall.into();
    };
    let vpi = Vpi::new();
    task.check_usage(&vpi).into()
}

unsafe extern "C" fn calltf(user_data: *mut PLI_BYTE8) -> PLI_INT32 {
    let Some(task) = task_from_user_data(user_data) else {
        return Status::SystfCall.into();
    };
    let vpi = Vpi::new();
    task.call(&vpi, &vpi, &task.default_options()).into()
}

unsafe extern "C" fn start_of_simulation(cb_data: *mut ffi::t_cb_data) -> PLI_INT32 {
    let Some(cb_data) = cb_data.as_ref() else {
        return Status::Success.into();
    };
    if let Some(task) = task_from_user_data(cb_data.user_data) {
        let vpi = Vpi::new();
        task.start_of_simulation(&vpi);
    }
    Status::Success.into()
}

/// Defines the `vlog_startup_routines` table that simulators look up after loading a VPI
/// library. Each task is registered by its own startup routine.
///
/// ```ignore
/// hierwalk_vpi::vpi_startup_routines!(hierwalk::SystemTask::HIERARCHY);
/// ```
#[macro_export]
macro_rules! vpi_startup_routines {
    ($task:expr) => {
        static TASK: $crate::hierwalk::SystemTask = $task;

        extern "C" fn register_task() {
            $crate::register(&TASK);
        }

        #[no_mangle]
        #[allow(non_upper_case_globals)]
        pub static vlog_startup_routines: [$crate::StartupRoutine; 2] =
            [Some(register_task), None];
    };
}

// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// `$afPrTs`: writes the time unit and precision of every module instance to
// `output_tscale_info.csv`.

hierwalk_vpi::vpi_startup_routines!(hierwalk::SystemTask::TIMESCALE);

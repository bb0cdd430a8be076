// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// `$afPrHier`: writes the definition name and full path of every module instance to
// `output_hier_info.csv`.

hierwalk_vpi::vpi_startup_routines!(hierwalk::SystemTask::HIERARCHY);

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Export Processing
//!
//! The per-run export context. The external model walker drives one
//! [`ExportRun`] per document export: it builds the storey order once,
//! accumulates grid reference lines while scanning the model, exports grids
//! per level at the end of the walk, and asks for per-storey range splits
//! for elements that need them.
//!
//! All mutable per-run caches live on the run object; nothing is process
//! global, and a run can be [`ExportRun::reset`] for reuse.

pub mod run;

pub use run::{Error, ExportRun, GridExportSummary, Result};

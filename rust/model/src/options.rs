// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export option flags consumed by the core.

use serde::{Deserialize, Serialize};

/// Per-run export options.
///
/// Only the flags the core actually consumes live here; everything else
/// (units, property sets, UI choices) stays with the host-facing shell.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Treat every level as a building storey, regardless of the raw flag.
    pub export_all_levels: bool,
    /// Split walls and columns into per-storey segments.
    pub wall_and_column_splitting: bool,
}

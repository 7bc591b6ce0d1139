// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Export Spatial
//!
//! The level partitioner: turns the host document's unordered reference
//! planes into canonical, elevation-ordered storeys, merges coincident
//! levels, computes per-storey heights, and splits element vertical spans
//! into non-overlapping per-storey ranges.
//!
//! Everything here is pure computation over a per-run [`StoreyOrder`]; the
//! emission of `IfcBuildingStorey` entities happens one layer up in
//! `ifc-export-processing`.

pub mod ranges;
pub mod storey;

pub use ranges::{split_into_level_ranges, LevelRange};
pub use storey::{Storey, StoreyOrder};

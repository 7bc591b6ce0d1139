// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Export Grids
//!
//! The grid classifier: partitions a level's reference curves into direction
//! and center buckets, then classifies them into radial, rectangular and
//! triangular grid systems through three fixed-order passes. Each pass
//! consumes its lines; a line usable by an earlier pass never reaches a
//! later one.
//!
//! Bucket maps keep strict insertion order (list-of-pairs, never a hash
//! map): "first orthogonal pair wins" and the triple grouping of the
//! triangular pass are behavioral contracts, and their outcome must be
//! reproducible for identical input order.

pub mod buckets;
pub mod emit;
pub mod passes;
pub mod system;

pub use buckets::{classify, CenterMap, DirectionMap};
pub use emit::{emit_grid_system, Error, Result};
pub use passes::{classify_level, radial_pass, rectangular_pass, triangular_pass, PassOutcome};
pub use system::{AxisLines, GridKind, GridSystem};

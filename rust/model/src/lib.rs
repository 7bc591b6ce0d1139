// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Export Model
//!
//! Shared leaf types for the IFC export core: opaque ids, the 2D reference
//! curve sum type, raw host-model records (levels, grid lines), export
//! options, IFC GlobalId generation and the abstract [`EntitySink`] through
//! which all IFC entity creation flows.
//!
//! This crate owns no algorithms. The level partitioner lives in
//! `ifc-export-spatial`, the grid classifier in `ifc-export-grids`, and the
//! per-run orchestration in `ifc-export-processing`.

pub mod curve;
pub mod error;
pub mod guid;
pub mod ids;
pub mod level;
pub mod line;
pub mod options;
pub mod sink;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use curve::{
    directions_antiparallel, directions_orthogonal, line_passes_through, points_almost_equal,
    vectors_almost_equal, RefCurve, ELEVATION_EPS, LEVEL_EXTENSION, VECTOR_EPS,
};
pub use error::SinkError;
pub use guid::new_global_id;
pub use ids::{ElementId, EntityHandle, GridLineId, LevelId};
pub use level::{RawLevel, VerticalSpan};
pub use line::{CurveStyle, GridLine, RawGridLine};
pub use options::ExportOptions;
pub use sink::{
    AxisRequest, CompositionType, EntitySink, GridRequest, RecordingSink, StoreyRequest,
    StyledCurve,
};

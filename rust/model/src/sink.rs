// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The abstract emission sink.
//!
//! All IFC entity creation goes through [`EntitySink`]; the core never owns a
//! wire format. Production sinks wrap the host plugin's STEP writer.
//! [`RecordingSink`] is an in-memory implementation for tests and dry runs.

use crate::curve::RefCurve;
use crate::error::SinkError;
use crate::ids::EntityHandle;
use crate::line::CurveStyle;

/// IFC spatial composition tag for storeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionType {
    Complex,
    #[default]
    Element,
    Partial,
}

impl CompositionType {
    /// IFC enumeration literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionType::Complex => "COMPLEX",
            CompositionType::Element => "ELEMENT",
            CompositionType::Partial => "PARTIAL",
        }
    }
}

/// Request for one `IfcBuildingStorey`.
///
/// The parent placement (the building the storey aggregates into) is owned
/// by the sink: it derives the storey's local placement from `elevation`
/// under whatever building entity the host document established.
#[derive(Debug, Clone)]
pub struct StoreyRequest {
    pub global_id: String,
    pub name: String,
    pub long_name: Option<String>,
    pub description: Option<String>,
    /// Project-relative elevation, also the storey placement height.
    pub elevation: f64,
    pub composition: CompositionType,
}

/// Request for one grid axis (`IfcGridAxis`): an axis curve plus the
/// `SameSense` flag relative to the axis set's first curve.
#[derive(Debug, Clone)]
pub struct AxisRequest {
    pub tag: String,
    pub curve: RefCurve,
    pub same_sense: bool,
}

/// One curve of the grid's combined shape representation, with its
/// presentation style.
#[derive(Debug, Clone)]
pub struct StyledCurve {
    pub curve: RefCurve,
    pub style: Option<CurveStyle>,
}

/// Request for one composite `IfcGrid` referencing previously created axes.
#[derive(Debug, Clone)]
pub struct GridRequest {
    pub global_id: String,
    pub name: String,
    /// Placement copied from the owning storey.
    pub placement: EntityHandle,
    pub axes_u: Vec<EntityHandle>,
    pub axes_v: Vec<EntityHandle>,
    pub axes_w: Vec<EntityHandle>,
    /// Combined curve-set representation bundling every axis curve.
    pub curve_set: Vec<StyledCurve>,
}

/// Abstract entity-creation sink.
///
/// Non-reentrant; must be driven from a single thread within one export run.
pub trait EntitySink {
    fn create_storey(&mut self, request: StoreyRequest) -> Result<EntityHandle, SinkError>;
    fn create_grid_axis(&mut self, request: AxisRequest) -> Result<EntityHandle, SinkError>;
    fn create_grid(&mut self, request: GridRequest) -> Result<EntityHandle, SinkError>;
}

/// In-memory sink that records every request and hands out sequential
/// handles. Lets the whole pipeline run headless in tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    next_handle: u32,
    pub storeys: Vec<StoreyRequest>,
    pub axes: Vec<AxisRequest>,
    pub grids: Vec<GridRequest>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> EntityHandle {
        self.next_handle += 1;
        EntityHandle(self.next_handle)
    }
}

impl EntitySink for RecordingSink {
    fn create_storey(&mut self, request: StoreyRequest) -> Result<EntityHandle, SinkError> {
        self.storeys.push(request);
        Ok(self.next())
    }

    fn create_grid_axis(&mut self, request: AxisRequest) -> Result<EntityHandle, SinkError> {
        self.axes.push(request);
        Ok(self.next())
    }

    fn create_grid(&mut self, request: GridRequest) -> Result<EntityHandle, SinkError> {
        self.grids.push(request);
        Ok(self.next())
    }
}

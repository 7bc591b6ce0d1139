// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Emission of one classified grid system through the entity sink.

use ifc_export_model::{
    new_global_id, AxisRequest, EntityHandle, EntitySink, GridLine, GridRequest, RefCurve,
    SinkError, StyledCurve,
};

use crate::system::GridSystem;

/// Result type for grid emission.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while emitting a grid system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("emission sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Creates the axes of one axis set and collects their styled curves.
///
/// `same_sense` is judged against the first line of the set: a line pointing
/// the same way as the first gets `true`, an antiparallel one `false`. Arcs
/// always emit `true`.
fn emit_axis_set(
    sink: &mut dyn EntitySink,
    lines: &[GridLine],
    prefix: &str,
    curve_set: &mut Vec<StyledCurve>,
) -> Result<Vec<EntityHandle>> {
    let reference = lines.first().and_then(|line| match &line.curve {
        RefCurve::Line { direction, .. } => Some(*direction),
        RefCurve::Arc { .. } => None,
    });

    let mut handles = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let same_sense = match (&line.curve, &reference) {
            (RefCurve::Line { direction, .. }, Some(first)) => direction.dot(first) >= 0.0,
            _ => true,
        };
        let tag = line
            .name_override
            .clone()
            .unwrap_or_else(|| format!("{}{}", prefix, index + 1));

        let handle = sink.create_grid_axis(AxisRequest {
            tag,
            curve: line.curve.clone(),
            same_sense,
        })?;
        handles.push(handle);
        curve_set.push(StyledCurve {
            curve: line.curve.clone(),
            style: line.style,
        });
    }
    Ok(handles)
}

/// Emits one composite grid entity for `system`, placed at the owning
/// storey's placement.
///
/// Returns `Ok(None)` without touching the sink further when no grid line
/// ends up represented (silent no-op). Sink failures bubble up so the caller
/// can abort this one system and continue with the rest of the level.
pub fn emit_grid_system(
    sink: &mut dyn EntitySink,
    system: &GridSystem,
    placement: EntityHandle,
) -> Result<Option<EntityHandle>> {
    let mut curve_set = Vec::with_capacity(system.line_count());
    let axes_u = emit_axis_set(sink, &system.axes_u, "U", &mut curve_set)?;
    let axes_v = emit_axis_set(sink, &system.axes_v, "V", &mut curve_set)?;
    let axes_w = emit_axis_set(sink, &system.axes_w, "W", &mut curve_set)?;

    if axes_u.is_empty() && axes_v.is_empty() && axes_w.is_empty() {
        return Ok(None);
    }

    let handle = sink.create_grid(GridRequest {
        global_id: new_global_id(),
        name: system.name().unwrap_or("Grid").to_string(),
        placement,
        axes_u,
        axes_v,
        axes_w,
        curve_set,
    })?;
    Ok(Some(handle))
}

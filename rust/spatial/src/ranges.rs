// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splitting element vertical spans into per-storey ranges.
//!
//! Used to cut a column / wall / duct into per-floor segments. The walk is
//! ascending over the canonical storey order; emitted ranges are pairwise
//! non-overlapping, sorted ascending, and their union is a subset of the
//! element's span.

use ifc_export_model::{LevelId, VerticalSpan, ELEVATION_EPS};

use crate::storey::StoreyOrder;

/// One per-storey sub-range of an element's vertical span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRange {
    pub level: LevelId,
    pub start: f64,
    pub end: f64,
}

/// Splits `span` into per-storey ranges against `order`.
///
/// Returns an empty list when splitting is disabled, the span is degenerate,
/// or no storey is reachable. `extension` is the vertical matching tolerance
/// ([`ifc_export_model::LEVEL_EXTENSION`] in production).
pub fn split_into_level_ranges(
    span: VerticalSpan,
    order: &StoreyOrder,
    splitting_enabled: bool,
    extension: f64,
) -> Vec<LevelRange> {
    if !splitting_enabled || span.is_degenerate() {
        return Vec::new();
    }

    // Start from the canonical storey the explicit base level resolves to;
    // everything below its elevation merges into the first emitted range.
    let start_index = span
        .base_level
        .and_then(|id| order.index_for(id))
        .unwrap_or(0);

    let mut ranges: Vec<LevelRange> = Vec::new();
    let mut prev_end: Option<f64> = None;

    for index in start_index..order.len() {
        let Some(storey) = order.get(index) else { break };
        let elevation = storey.elevation;
        let height = order.distance_to_next(index, None);

        // Element does not reach this storey with tolerance. Before the
        // first emission that just advances the walk; afterwards it ends it.
        if span.z_max < elevation + extension {
            if ranges.is_empty() {
                continue;
            }
            break;
        }

        let starts_below = !ranges.is_empty() && span.z_min < elevation - extension;
        let ends_above = height != 0.0 && span.z_max > elevation + height + extension;

        let mut start = if starts_below { elevation } else { span.z_min };
        let end = if ends_above { elevation + height } else { span.z_max };

        // Clip against the previous range so ranges stay strictly
        // non-overlapping and monotonically increasing.
        if let Some(prev) = prev_end {
            if start < prev {
                start = prev;
            }
        }
        if end - start <= ELEVATION_EPS {
            // Inverted or empty after clipping (the element starts above
            // this storey's top, or the previous range already covers it):
            // drop it and keep walking.
            if ends_above {
                continue;
            }
            break;
        }

        ranges.push(LevelRange {
            level: storey.id,
            start,
            end,
        });
        prev_end = Some(end);

        if !ends_above {
            // This storey holds the element's top: last range
            break;
        }
    }

    ranges
}

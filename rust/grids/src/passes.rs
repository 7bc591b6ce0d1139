// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The three classification passes.
//!
//! Fixed order: radial, then rectangular, then triangular. A line usable by
//! an earlier pass is always consumed there, even if it could also serve a
//! later pass. Each pass returns the systems it formed plus the remainder
//! map built by set-difference; nothing is removed mid-iteration.

use ifc_export_model::{directions_orthogonal, line_passes_through, GridLine, RefCurve};

use crate::buckets::{classify, CenterMap, DirectionMap};
use crate::system::{AxisLines, GridKind, GridSystem};

/// Result of classifying one level's grid lines.
#[derive(Debug, Default)]
pub struct PassOutcome {
    pub systems: Vec<GridSystem>,
    /// Arcs around a center no line passes through (orphans, dropped).
    pub dropped_arcs: usize,
    /// Leftover lines no pass could place (orphans, dropped).
    pub dropped_lines: usize,
}

/// Radial pass: one system per arc center, consuming every line whose
/// infinite extension passes through that center.
///
/// Centers with no qualifying line are skipped and their arcs dropped (a
/// documented edge case, not an error).
pub fn radial_pass(
    centers: CenterMap,
    lines: DirectionMap,
) -> (Vec<GridSystem>, DirectionMap, usize) {
    let mut systems = Vec::new();
    let mut remaining = lines;
    let mut dropped_arcs = 0;

    for (center, arcs) in centers.into_entries() {
        let picks = remaining.find_lines(|line| match &line.curve {
            RefCurve::Line { origin, direction } => {
                line_passes_through(origin, direction, &center)
            }
            RefCurve::Arc { .. } => false,
        });
        if picks.is_empty() {
            dropped_arcs += arcs.len();
            continue;
        }

        let (spokes, rest) = remaining.take_lines(&picks);
        remaining = rest;
        systems.push(GridSystem::new(
            GridKind::Radial,
            AxisLines::from_vec(arcs),
            AxisLines::from_vec(spokes),
            AxisLines::new(),
        ));
    }

    (systems, remaining, dropped_arcs)
}

/// Bucket positions forming one logical axis for `direction`: its own
/// bucket plus the antiparallel bucket, if any (duplex grid lines merge
/// into one axis set).
fn parallel_positions(map: &DirectionMap, direction: &nalgebra::Vector2<f64>) -> Vec<usize> {
    let mut positions = Vec::with_capacity(2);
    if let Some(p) = map.position(direction) {
        positions.push(p);
    }
    if let Some(p) = map.antiparallel_position(direction) {
        positions.push(p);
    }
    positions
}

/// Rectangular pass: repeatedly finds the first orthogonal direction pair
/// in key iteration order and emits one system from their duplex-merged
/// buckets, until no orthogonal pair remains.
pub fn rectangular_pass(lines: DirectionMap) -> (Vec<GridSystem>, DirectionMap) {
    let mut systems = Vec::new();
    let mut remaining = lines;

    loop {
        // Recompute the key list from the current remainder each iteration
        let keys = remaining.keys();
        let pair = keys.iter().enumerate().find_map(|(i, u)| {
            keys[i + 1..]
                .iter()
                .find(|v| directions_orthogonal(u, v))
                .map(|v| (*u, *v))
        });
        let Some((u, v)) = pair else { break };

        let positions_u = parallel_positions(&remaining, &u);
        let positions_v = parallel_positions(&remaining, &v);
        let split = positions_u.len();

        let mut consumed = positions_u;
        consumed.extend(positions_v);
        let (mut buckets, rest) = remaining.take_buckets(&consumed);
        remaining = rest;

        let axes_v: Vec<GridLine> = buckets.drain(split..).flatten().collect();
        let axes_u: Vec<GridLine> = buckets.into_iter().flatten().collect();
        systems.push(GridSystem::new(
            GridKind::Rectangular,
            AxisLines::from_vec(axes_u),
            AxisLines::from_vec(axes_v),
            AxisLines::new(),
        ));
    }

    (systems, remaining)
}

/// Triangular pass: remaining direction keys taken three at a time, in
/// order. A group with a single direction is an orphan grid (only a U axis)
/// and is dropped.
pub fn triangular_pass(lines: DirectionMap) -> (Vec<GridSystem>, usize) {
    let mut systems = Vec::new();
    let mut dropped_lines = 0;

    let mut entries = lines.into_entries().into_iter();
    loop {
        let Some((_, axes_u)) = entries.next() else { break };
        match entries.next() {
            None => {
                // Orphan grid, only has U: not exported
                dropped_lines += axes_u.len();
            }
            Some((_, axes_v)) => {
                let axes_w = entries.next().map(|(_, lines)| lines).unwrap_or_default();
                systems.push(GridSystem::new(
                    GridKind::Triangular,
                    AxisLines::from_vec(axes_u),
                    AxisLines::from_vec(axes_v),
                    AxisLines::from_vec(axes_w),
                ));
            }
        }
    }

    (systems, dropped_lines)
}

/// Classifies one level's accumulated grid lines through all three passes.
pub fn classify_level(lines: Vec<GridLine>) -> PassOutcome {
    let (directions, centers) = classify(lines);

    let (mut systems, remaining, dropped_arcs) = radial_pass(centers, directions);
    let (rectangular, remaining) = rectangular_pass(remaining);
    systems.extend(rectangular);
    let (triangular, dropped_lines) = triangular_pass(remaining);
    systems.extend(triangular);

    PassOutcome {
        systems,
        dropped_arcs,
        dropped_lines,
    }
}

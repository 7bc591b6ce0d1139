// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The export run context.

use rustc_hash::FxHashMap;
use serde::Serialize;

use ifc_export_grids::{classify_level, emit_grid_system};
use ifc_export_model::{
    new_global_id, CompositionType, EntityHandle, EntitySink, ExportOptions, GridLine, LevelId,
    RawGridLine, RawLevel, SinkError, StoreyRequest, VerticalSpan, LEVEL_EXTENSION,
};
use ifc_export_spatial::{split_into_level_ranges, LevelRange, StoreyOrder};

/// Result type for run-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an export run.
///
/// Only storey emission failures are fatal here; individual grid-system
/// failures are absorbed (warned and counted) per the recovery contract.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Counters reported by [`ExportRun::export_grids`].
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct GridExportSummary {
    pub levels_processed: usize,
    pub systems_emitted: usize,
    /// Systems whose emission the sink rejected (skipped, run continued).
    pub systems_aborted: usize,
    pub arcs_dropped: usize,
    pub lines_dropped: usize,
}

/// One export run over one document.
///
/// Owns the emission sink and every per-run cache. Single-threaded by
/// construction: the sink is non-reentrant and all methods take `&mut self`.
pub struct ExportRun<S> {
    sink: S,
    options: ExportOptions,
    storeys: StoreyOrder,
    /// Grid lines accumulated during the model walk, grouped by canonical
    /// storey in first-seen order.
    pending: Vec<(LevelId, Vec<GridLine>)>,
    pending_index: FxHashMap<LevelId, usize>,
    orphan_lines: usize,
}

impl<S: EntitySink> ExportRun<S> {
    pub fn new(sink: S, options: ExportOptions) -> Self {
        Self {
            sink,
            options,
            storeys: StoreyOrder::default(),
            pending: Vec::new(),
            pending_index: FxHashMap::default(),
            orphan_lines: 0,
        }
    }

    /// Builds the canonical storey order for this run. Clears any state
    /// left from a previous run first.
    pub fn begin(&mut self, levels: &[RawLevel]) {
        self.reset();
        self.storeys = StoreyOrder::build(levels, &self.options);
        tracing::info!(
            raw_levels = levels.len(),
            canonical_storeys = self.storeys.len(),
            "built storey order"
        );
    }

    /// Clears all per-run caches. Called by [`Self::begin`]; also available
    /// for explicit end-of-run cleanup.
    pub fn reset(&mut self) {
        self.storeys = StoreyOrder::default();
        self.pending.clear();
        self.pending_index.clear();
        self.orphan_lines = 0;
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn storeys(&self) -> &StoreyOrder {
        &self.storeys
    }

    /// Consumes the run, returning the sink (useful for inspecting a
    /// recording sink after a dry run).
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handle of the canonical storey entity for `level`, creating it on
    /// first use. At most one entity is ever created per elevation group.
    pub fn storey_handle(&mut self, level: LevelId) -> Result<Option<EntityHandle>> {
        let Some(index) = self.storeys.index_for(level) else {
            return Ok(None);
        };
        let Some(storey) = self.storeys.get(index) else {
            return Ok(None);
        };
        if let Some(handle) = storey.handle {
            return Ok(Some(handle));
        }

        let request = StoreyRequest {
            global_id: new_global_id(),
            name: storey.name.clone(),
            long_name: storey.long_name.clone(),
            description: None,
            elevation: storey.elevation,
            composition: CompositionType::Element,
        };
        let handle = self.sink.create_storey(request)?;
        self.storeys.set_handle(index, handle);
        tracing::debug!(level = %level, handle = %handle, "created storey entity");
        Ok(Some(handle))
    }

    /// Accumulates one grid reference line, assigning it to a storey by
    /// vertical-extent overlap. Orphan lines (no storey catalog at all) are
    /// dropped deterministically.
    pub fn add_grid_line(&mut self, raw: RawGridLine) -> bool {
        let Some(level) = self
            .storeys
            .assign_by_span(raw.span.z_min, raw.span.z_max)
        else {
            tracing::debug!(line = %raw.id, "dropping grid line: no storey catalog");
            self.orphan_lines += 1;
            return false;
        };
        let line = raw.assign(level);
        match self.pending_index.get(&level) {
            Some(&slot) => self.pending[slot].1.push(line),
            None => {
                self.pending_index.insert(level, self.pending.len());
                self.pending.push((level, vec![line]));
            }
        }
        true
    }

    /// Classifies and emits all accumulated grid lines, level by level, then
    /// clears the accumulator.
    ///
    /// Pass order per level is fixed: radial, rectangular, triangular. A
    /// sink failure aborts only the affected grid system; storey creation
    /// failures abort the run.
    pub fn export_grids(&mut self) -> Result<GridExportSummary> {
        let mut summary = GridExportSummary::default();

        let pending = std::mem::take(&mut self.pending);
        self.pending_index.clear();

        for (level, lines) in pending {
            summary.levels_processed += 1;
            let line_count = lines.len();
            let outcome = classify_level(lines);
            summary.arcs_dropped += outcome.dropped_arcs;
            summary.lines_dropped += outcome.dropped_lines;
            tracing::debug!(
                level = %level,
                lines = line_count,
                systems = outcome.systems.len(),
                "classified grid level"
            );

            let Some(placement) = self.storey_handle(level)? else {
                // Cannot happen for lines assigned from the catalog, but a
                // stale accumulator must not panic the run
                summary.systems_aborted += outcome.systems.len();
                continue;
            };

            for system in &outcome.systems {
                match emit_grid_system(&mut self.sink, system, placement) {
                    Ok(Some(_)) => summary.systems_emitted += 1,
                    Ok(None) => {}
                    Err(error) => {
                        summary.systems_aborted += 1;
                        tracing::warn!(
                            level = %level,
                            kind = ?system.kind,
                            %error,
                            "grid system emission aborted"
                        );
                    }
                }
            }
        }

        summary.lines_dropped += self.orphan_lines;
        self.orphan_lines = 0;
        tracing::info!(
            levels = summary.levels_processed,
            emitted = summary.systems_emitted,
            aborted = summary.systems_aborted,
            "grid export complete"
        );
        Ok(summary)
    }

    /// Splits an element's vertical span into per-storey ranges, honoring
    /// the wall-and-column splitting option.
    pub fn split_element(&self, span: VerticalSpan) -> Vec<LevelRange> {
        split_into_level_ranges(
            span,
            &self.storeys,
            self.options.wall_and_column_splitting,
            LEVEL_EXTENSION,
        )
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical storey ordering.
//!
//! Levels are sorted ascending by elevation (stable id tie-break), levels
//! within [`ELEVATION_EPS`] of each other collapse into one canonical storey
//! (the first encountered wins, later ones register a backreference), and
//! non-storey reference planes below the lowest real storey attach to the
//! first real storey once it is known.

use rustc_hash::FxHashMap;

use ifc_export_model::{
    EntityHandle, ExportOptions, LevelId, RawLevel, ELEVATION_EPS,
};

/// A canonical, elevation-ordered level record. Only levels qualifying as
/// building storeys become canonical; merged and non-storey levels resolve
/// to one of these through the lookup.
#[derive(Debug, Clone)]
pub struct Storey {
    /// Id of the source level that became canonical for this elevation group.
    pub id: LevelId,
    pub elevation: f64,
    /// Distance to the next distinct-elevation building storey above;
    /// 0.0 for the topmost storey.
    pub height_to_next: f64,
    /// The storey `height_to_next` is measured against.
    pub next_storey: Option<LevelId>,
    /// The level's own "up to level" parameter, if set.
    pub up_to_level: Option<LevelId>,
    pub name: String,
    pub long_name: Option<String>,
    /// Handle of the emitted `IfcBuildingStorey`, set lazily at most once.
    pub handle: Option<EntityHandle>,
}

/// The per-run storey catalog: canonical storeys in ascending elevation
/// order plus a raw-id → canonical lookup covering merged and deferred
/// levels.
#[derive(Debug, Default)]
pub struct StoreyOrder {
    storeys: Vec<Storey>,
    lookup: FxHashMap<LevelId, usize>,
}

impl StoreyOrder {
    /// Builds the canonical storey order from the raw level list.
    ///
    /// Empty input yields an empty order, not an error. Levels without a
    /// storey flag default to storeys; `export_all_levels` forces every
    /// level to be treated as a storey.
    pub fn build(levels: &[RawLevel], options: &ExportOptions) -> Self {
        let mut order = StoreyOrder::default();

        // Sort ascending by elevation; ties broken by stable id comparison
        // so distinct ids never compare equal during the sort.
        let mut sorted: Vec<&RawLevel> = levels.iter().collect();
        sorted.sort_by(|a, b| {
            a.elevation
                .partial_cmp(&b.elevation)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        // Non-storey levels seen before any canonical storey exists
        let mut deferred: Vec<LevelId> = Vec::new();

        for level in sorted {
            let is_storey =
                options.export_all_levels || level.is_building_storey.unwrap_or(true);

            if !is_storey {
                match order.storeys.last() {
                    // Reference plane above a known storey: register against
                    // the storey at or below it.
                    Some(_) => {
                        order.lookup.insert(level.id, order.storeys.len() - 1);
                    }
                    None => deferred.push(level.id),
                }
                continue;
            }

            // Coincident with the previous canonical storey: merge.
            if let Some(last) = order.storeys.last() {
                if (level.elevation - last.elevation).abs() < ELEVATION_EPS {
                    order.lookup.insert(level.id, order.storeys.len() - 1);
                    continue;
                }
            }

            let index = order.storeys.len();
            order.storeys.push(Storey {
                id: level.id,
                elevation: level.elevation,
                height_to_next: 0.0,
                next_storey: None,
                up_to_level: level.up_to_level,
                name: level
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Level {}", level.elevation)),
                long_name: level.long_name.clone(),
                handle: None,
            });
            order.lookup.insert(level.id, index);

            // The first canonical storey adopts everything deferred below it
            if index == 0 {
                for id in deferred.drain(..) {
                    order.lookup.insert(id, 0);
                }
            }
        }
        // Deferred levels with no canonical storey at all stay orphaned
        // (dropped deterministically).

        order.compute_heights();
        order
    }

    /// Height to the next distinct-elevation building storey, per storey.
    fn compute_heights(&mut self) {
        for i in 0..self.storeys.len() {
            let elevation = self.storeys[i].elevation;
            let next = self.storeys[i + 1..]
                .iter()
                .find(|s| s.elevation - elevation > ELEVATION_EPS)
                .map(|s| (s.elevation, s.id));
            if let Some((next_elevation, next_id)) = next {
                self.storeys[i].height_to_next = next_elevation - elevation;
                self.storeys[i].next_storey = Some(next_id);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.storeys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.storeys.len()
    }

    /// Canonical storeys in ascending elevation order.
    pub fn iter(&self) -> impl Iterator<Item = &Storey> {
        self.storeys.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Storey> {
        self.storeys.get(index)
    }

    /// Canonical index for a raw level id (covers merged and deferred ids).
    pub fn index_for(&self, id: LevelId) -> Option<usize> {
        self.lookup.get(&id).copied()
    }

    /// Canonical storey for a raw level id.
    pub fn storey_for(&self, id: LevelId) -> Option<&Storey> {
        self.index_for(id).and_then(|i| self.storeys.get(i))
    }

    /// Records the emitted entity handle on a canonical storey.
    pub fn set_handle(&mut self, index: usize, handle: EntityHandle) {
        if let Some(storey) = self.storeys.get_mut(index) {
            storey.handle = Some(handle);
        }
    }

    /// Effective height of the storey at `index`.
    ///
    /// An "up to level" override (the caller's, falling back to the level's
    /// own parameter) wins when it resolves to a canonical storey strictly
    /// above; otherwise the cached `height_to_next`. Never negative.
    pub fn distance_to_next(&self, index: usize, explicit_override: Option<LevelId>) -> f64 {
        let Some(storey) = self.storeys.get(index) else {
            return 0.0;
        };
        let override_id = explicit_override.or(storey.up_to_level);
        if let Some(target) = override_id.and_then(|id| self.storey_for(id)) {
            let delta = target.elevation - storey.elevation;
            if delta > ELEVATION_EPS {
                return delta;
            }
        }
        storey.height_to_next.max(0.0)
    }

    /// Assigns a vertical span to the storey owning the largest overlap with
    /// its `[elevation, elevation + height)` range.
    ///
    /// Spans below the lowest storey map to the lowest storey; spans above
    /// the topmost storey map to the topmost (its owned range is open-ended).
    pub fn assign_by_span(&self, z_min: f64, z_max: f64) -> Option<LevelId> {
        if self.storeys.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, storey) in self.storeys.iter().enumerate() {
            let lo = if i == 0 { f64::NEG_INFINITY } else { storey.elevation };
            let hi = if storey.height_to_next > 0.0 {
                storey.elevation + storey.height_to_next
            } else {
                f64::INFINITY
            };
            let overlap = z_max.min(hi) - z_min.max(lo);
            if overlap > 0.0 && best.map_or(true, |(_, b)| overlap > b) {
                best = Some((i, overlap));
            }
        }

        let index = best.map(|(i, _)| i).unwrap_or_else(|| {
            // Degenerate span: nearest storey at or below z_min
            self.storeys
                .iter()
                .rposition(|s| s.elevation <= z_min + ELEVATION_EPS)
                .unwrap_or(0)
        });
        Some(self.storeys[index].id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn build(levels: &[RawLevel]) -> StoreyOrder {
        StoreyOrder::build(levels, &ExportOptions::default())
    }

    #[test]
    fn empty_input_gives_empty_order() {
        let order = build(&[]);
        assert!(order.is_empty());
    }

    #[test]
    fn storeys_sorted_ascending_with_distinct_groups() {
        let levels = [
            RawLevel::new(LevelId(3), 6.0),
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 3.0),
        ];
        let order = build(&levels);
        let elevations: Vec<f64> = order.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn coincident_levels_collapse_to_first_canonical() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 0.0),
            RawLevel::new(LevelId(3), 4.0),
        ];
        let order = build(&levels);
        assert_eq!(order.len(), 2);
        // Tie broken by id: level 1 becomes canonical
        assert_eq!(order.get(0).unwrap().id, LevelId(1));
        assert_eq!(order.index_for(LevelId(2)), Some(0));
    }

    #[test]
    fn near_equal_elevations_merge_within_epsilon() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 0.5e-6),
            RawLevel::new(LevelId(3), 3.0),
        ];
        let order = build(&levels);
        assert_eq!(order.len(), 2);
        assert_relative_eq!(order.get(0).unwrap().height_to_next, 3.0);
    }

    #[test]
    fn build_is_idempotent_on_coordinates_and_order() {
        let levels = [
            RawLevel::new(LevelId(5), 9.0),
            RawLevel::new(LevelId(4), 9.0),
            RawLevel::new(LevelId(1), -2.5),
            RawLevel::new(LevelId(2), 3.0),
        ];
        let a = build(&levels);
        let b = build(&levels);
        let coords = |o: &StoreyOrder| -> Vec<(f64, LevelId)> {
            o.iter().map(|s| (s.elevation, s.id)).collect()
        };
        assert_eq!(coords(&a), coords(&b));
    }

    #[test]
    fn heights_skip_coincident_and_stop_at_top() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 3.0),
            RawLevel::new(LevelId(3), 7.5),
        ];
        let order = build(&levels);
        assert_relative_eq!(order.get(0).unwrap().height_to_next, 3.0);
        assert_eq!(order.get(0).unwrap().next_storey, Some(LevelId(2)));
        assert_relative_eq!(order.get(1).unwrap().height_to_next, 4.5);
        assert_relative_eq!(order.get(2).unwrap().height_to_next, 0.0);
        assert_eq!(order.get(2).unwrap().next_storey, None);
    }

    #[test]
    fn non_storey_below_lowest_attaches_to_first_canonical() {
        let levels = [
            RawLevel::new(LevelId(1), -1.0).with_storey_flag(false),
            RawLevel::new(LevelId(2), 0.0),
            RawLevel::new(LevelId(3), 3.0),
        ];
        let order = build(&levels);
        assert_eq!(order.len(), 2);
        assert_eq!(order.index_for(LevelId(1)), Some(0));
        assert_eq!(order.storey_for(LevelId(1)).unwrap().id, LevelId(2));
    }

    #[test]
    fn non_storey_above_registers_against_storey_below() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 1.5).with_storey_flag(false),
            RawLevel::new(LevelId(3), 3.0),
        ];
        let order = build(&levels);
        assert_eq!(order.len(), 2);
        assert_eq!(order.storey_for(LevelId(2)).unwrap().id, LevelId(1));
        // Heights ignore the reference plane entirely
        assert_relative_eq!(order.get(0).unwrap().height_to_next, 3.0);
    }

    #[test]
    fn all_non_storey_input_yields_empty_order() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0).with_storey_flag(false),
            RawLevel::new(LevelId(2), 3.0).with_storey_flag(false),
        ];
        let order = build(&levels);
        assert!(order.is_empty());
        assert_eq!(order.index_for(LevelId(1)), None);
    }

    #[test]
    fn export_all_levels_overrides_storey_flag() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0).with_storey_flag(false),
            RawLevel::new(LevelId(2), 3.0).with_storey_flag(false),
        ];
        let options = ExportOptions {
            export_all_levels: true,
            ..Default::default()
        };
        let order = StoreyOrder::build(&levels, &options);
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn distance_to_next_prefers_valid_override() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 3.0),
            RawLevel::new(LevelId(3), 9.0),
        ];
        let order = build(&levels);
        // Override to the storey two up
        assert_relative_eq!(order.distance_to_next(0, Some(LevelId(3))), 9.0);
        // Override below falls back to the cached height
        assert_relative_eq!(order.distance_to_next(1, Some(LevelId(1))), 6.0);
        // No override: cached height
        assert_relative_eq!(order.distance_to_next(0, None), 3.0);
        // Topmost: zero, never negative
        assert_relative_eq!(order.distance_to_next(2, Some(LevelId(1))), 0.0);
    }

    #[test]
    fn level_parameter_overrides_height_when_no_explicit_override() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0).with_up_to_level(LevelId(3)),
            RawLevel::new(LevelId(2), 3.0),
            RawLevel::new(LevelId(3), 9.0),
        ];
        let order = build(&levels);
        assert_relative_eq!(order.distance_to_next(0, None), 9.0);
        // An explicit override still wins over the level parameter
        assert_relative_eq!(order.distance_to_next(0, Some(LevelId(2))), 3.0);
    }

    #[test]
    fn assign_by_span_picks_largest_overlap() {
        let levels = [
            RawLevel::new(LevelId(1), 0.0),
            RawLevel::new(LevelId(2), 3.0),
            RawLevel::new(LevelId(3), 6.0),
        ];
        let order = build(&levels);
        // Mostly inside storey 2
        assert_eq!(order.assign_by_span(2.5, 5.5), Some(LevelId(2)));
        // Below the lowest storey
        assert_eq!(order.assign_by_span(-5.0, -1.0), Some(LevelId(1)));
        // Above the topmost storey
        assert_eq!(order.assign_by_span(10.0, 12.0), Some(LevelId(3)));
    }

    #[test]
    fn assign_by_span_on_empty_order() {
        assert_eq!(build(&[]).assign_by_span(0.0, 1.0), None);
    }
}

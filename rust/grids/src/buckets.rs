// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Insertion-ordered classification buckets.
//!
//! Lines bucket by direction (tolerance-based equality; antiparallel
//! directions are distinct keys), arcs by center point. Both maps are
//! list-of-pairs: key iteration order is the insertion order of the first
//! line that created each bucket, which downstream passes rely on.
//!
//! Buckets are never mutated while a pass iterates them; passes take what
//! they consume and get a freshly built remainder back (copy-on-pass).

use nalgebra::{Point2, Vector2};

use ifc_export_model::{
    directions_antiparallel, points_almost_equal, vectors_almost_equal, GridLine, RefCurve,
};

/// Line buckets keyed by direction vector, in insertion order.
#[derive(Debug, Default)]
pub struct DirectionMap {
    entries: Vec<(Vector2<f64>, Vec<GridLine>)>,
}

impl DirectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direction keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total lines across all buckets.
    pub fn line_count(&self) -> usize {
        self.entries.iter().map(|(_, lines)| lines.len()).sum()
    }

    /// Direction keys in insertion order.
    pub fn keys(&self) -> Vec<Vector2<f64>> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    /// Lines of the bucket at `position`.
    pub fn lines_at(&self, position: usize) -> &[GridLine] {
        &self.entries[position].1
    }

    /// Bucket position whose key equals `direction` within tolerance.
    pub fn position(&self, direction: &Vector2<f64>) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| vectors_almost_equal(key, direction))
    }

    /// Bucket position whose key is antiparallel to `direction`.
    pub fn antiparallel_position(&self, direction: &Vector2<f64>) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| directions_antiparallel(key, direction))
    }

    /// Inserts a line into the bucket matching `direction`, creating the
    /// bucket at the end of the key order if none matches.
    pub fn insert(&mut self, direction: Vector2<f64>, line: GridLine) {
        match self.position(&direction) {
            Some(position) => self.entries[position].1.push(line),
            None => self.entries.push((direction, vec![line])),
        }
    }

    /// `(bucket, line)` index pairs of every line satisfying `predicate`,
    /// in map iteration order.
    pub fn find_lines(&self, mut predicate: impl FnMut(&GridLine) -> bool) -> Vec<(usize, usize)> {
        let mut picks = Vec::new();
        for (bucket, (_, lines)) in self.entries.iter().enumerate() {
            for (index, line) in lines.iter().enumerate() {
                if predicate(line) {
                    picks.push((bucket, index));
                }
            }
        }
        picks
    }

    /// Consumes whole buckets at `positions`, returning their line lists in
    /// the order the positions were given, plus the remainder map.
    pub fn take_buckets(self, positions: &[usize]) -> (Vec<Vec<GridLine>>, DirectionMap) {
        let mut slots: Vec<Option<(Vector2<f64>, Vec<GridLine>)>> =
            self.entries.into_iter().map(Some).collect();
        let taken = positions
            .iter()
            .filter_map(|&p| slots.get_mut(p).and_then(Option::take))
            .map(|(_, lines)| lines)
            .collect();
        let remaining = DirectionMap {
            entries: slots.into_iter().flatten().collect(),
        };
        (taken, remaining)
    }

    /// Consumes individual lines identified by `(bucket, line)` pairs,
    /// returning them in pair order plus the remainder map. Buckets emptied
    /// by the removal disappear from the key order.
    pub fn take_lines(self, picks: &[(usize, usize)]) -> (Vec<GridLine>, DirectionMap) {
        let mut slots: Vec<(Vector2<f64>, Vec<Option<GridLine>>)> = self
            .entries
            .into_iter()
            .map(|(key, lines)| (key, lines.into_iter().map(Some).collect()))
            .collect();
        let taken = picks
            .iter()
            .filter_map(|&(bucket, index)| {
                slots
                    .get_mut(bucket)
                    .and_then(|(_, lines)| lines.get_mut(index))
                    .and_then(Option::take)
            })
            .collect();
        let remaining = DirectionMap {
            entries: slots
                .into_iter()
                .filter_map(|(key, lines)| {
                    let lines: Vec<GridLine> = lines.into_iter().flatten().collect();
                    (!lines.is_empty()).then_some((key, lines))
                })
                .collect(),
        };
        (taken, remaining)
    }

    /// Consumes the map, yielding `(key, lines)` pairs in insertion order.
    pub fn into_entries(self) -> Vec<(Vector2<f64>, Vec<GridLine>)> {
        self.entries
    }
}

/// Arc buckets keyed by center point, in insertion order.
#[derive(Debug, Default)]
pub struct CenterMap {
    entries: Vec<(Point2<f64>, Vec<GridLine>)>,
}

impl CenterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Inserts an arc into the bucket matching `center`.
    pub fn insert(&mut self, center: Point2<f64>, arc: GridLine) {
        match self
            .entries
            .iter()
            .position(|(key, _)| points_almost_equal(key, &center))
        {
            Some(position) => self.entries[position].1.push(arc),
            None => self.entries.push((center, vec![arc])),
        }
    }

    /// Consumes the map, yielding `(center, arcs)` pairs in insertion order.
    pub fn into_entries(self) -> Vec<(Point2<f64>, Vec<GridLine>)> {
        self.entries
    }
}

/// Partitions a level's grid lines into direction and center buckets.
pub fn classify(lines: Vec<GridLine>) -> (DirectionMap, CenterMap) {
    let mut directions = DirectionMap::new();
    let mut centers = CenterMap::new();
    for line in lines {
        match line.curve {
            RefCurve::Line { direction, .. } => directions.insert(direction, line),
            RefCurve::Arc { center, .. } => centers.insert(center, line),
        }
    }
    (directions, centers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_export_model::{GridLineId, LevelId};

    fn line(id: i64, dx: f64, dy: f64) -> GridLine {
        GridLine {
            id: GridLineId(id),
            curve: RefCurve::line(Point2::new(0.0, 0.0), Vector2::new(dx, dy)),
            level: LevelId(1),
            name_override: None,
            style: None,
        }
    }

    fn arc(id: i64, cx: f64, cy: f64, radius: f64) -> GridLine {
        GridLine {
            id: GridLineId(id),
            curve: RefCurve::arc(Point2::new(cx, cy), radius),
            level: LevelId(1),
            name_override: None,
            style: None,
        }
    }

    #[test]
    fn classify_buckets_by_direction_and_center() {
        let (directions, centers) = classify(vec![
            line(1, 1.0, 0.0),
            line(2, 0.0, 1.0),
            line(3, 1.0, 0.0),
            arc(4, 0.0, 0.0, 5.0),
            arc(5, 0.0, 0.0, 8.0),
        ]);
        assert_eq!(directions.len(), 2);
        assert_eq!(directions.lines_at(0).len(), 2);
        assert_eq!(directions.lines_at(1).len(), 1);
        assert_eq!(centers.len(), 1);
    }

    #[test]
    fn antiparallel_directions_stay_distinct() {
        let (directions, _) = classify(vec![line(1, 1.0, 0.0), line(2, -1.0, 0.0)]);
        assert_eq!(directions.len(), 2);
        let keys = directions.keys();
        assert_eq!(directions.antiparallel_position(&keys[0]), Some(1));
    }

    #[test]
    fn key_order_is_insertion_order() {
        let (directions, _) =
            classify(vec![line(1, 0.0, 1.0), line(2, 1.0, 0.0), line(3, 0.0, 1.0)]);
        let keys = directions.keys();
        assert!(vectors_almost_equal(&keys[0], &Vector2::new(0.0, 1.0)));
        assert!(vectors_almost_equal(&keys[1], &Vector2::new(1.0, 0.0)));
    }

    #[test]
    fn take_buckets_preserves_requested_order_and_remainder() {
        let (directions, _) = classify(vec![
            line(1, 1.0, 0.0),
            line(2, 0.0, 1.0),
            line(3, -1.0, 0.0),
        ]);
        let (taken, remaining) = directions.take_buckets(&[2, 0]);
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0][0].id, GridLineId(3));
        assert_eq!(taken[1][0].id, GridLineId(1));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.lines_at(0)[0].id, GridLineId(2));
    }

    #[test]
    fn take_lines_drops_emptied_buckets() {
        let (directions, _) = classify(vec![line(1, 1.0, 0.0), line(2, 0.0, 1.0)]);
        let picks = directions.find_lines(|l| l.id == GridLineId(1));
        let (taken, remaining) = directions.take_lines(&picks);
        assert_eq!(taken.len(), 1);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.line_count(), 1);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classified grid systems.

use smallvec::SmallVec;

use ifc_export_model::{GridLine, LevelId};

/// Lines of one axis set. Most grids have a handful of lines per axis.
pub type AxisLines = SmallVec<[GridLine; 4]>;

/// Classification of a grid system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    /// Arcs around a shared center plus lines radiating through it.
    Radial,
    /// Two mutually orthogonal line directions (duplex-merged).
    Rectangular,
    /// Three non-orthogonal directions taken pairwise.
    Triangular,
}

/// One composite grid entity: up to three axis sets on one storey.
///
/// A grid line belongs to at most one system; the classification passes
/// consume lines as they match them.
#[derive(Debug, Clone)]
pub struct GridSystem {
    pub kind: GridKind,
    pub level: LevelId,
    pub axes_u: AxisLines,
    pub axes_v: AxisLines,
    pub axes_w: AxisLines,
}

impl GridSystem {
    /// Builds a system, deriving the level from the first line present.
    pub fn new(kind: GridKind, axes_u: AxisLines, axes_v: AxisLines, axes_w: AxisLines) -> Self {
        let level = axes_u
            .first()
            .or_else(|| axes_v.first())
            .or_else(|| axes_w.first())
            .map(|line| line.level)
            .unwrap_or(LevelId(0));
        Self {
            kind,
            level,
            axes_u,
            axes_v,
            axes_w,
        }
    }

    /// Total number of grid lines across all axis sets.
    pub fn line_count(&self) -> usize {
        self.axes_u.len() + self.axes_v.len() + self.axes_w.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }

    /// Display name: the first name override found scanning U, then V,
    /// then W.
    pub fn name(&self) -> Option<&str> {
        self.axes_u
            .iter()
            .chain(self.axes_v.iter())
            .chain(self.axes_w.iter())
            .find_map(|line| line.name_override.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_export_model::{GridLineId, Point2, RefCurve, Vector2};

    fn named(id: i64, name: Option<&str>) -> GridLine {
        GridLine {
            id: GridLineId(id),
            curve: RefCurve::line(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0)),
            level: LevelId(7),
            name_override: name.map(str::to_string),
            style: None,
        }
    }

    #[test]
    fn name_scans_u_then_v_then_w() {
        let system = GridSystem::new(
            GridKind::Rectangular,
            AxisLines::from_vec(vec![named(1, None)]),
            AxisLines::from_vec(vec![named(2, Some("B")), named(3, Some("C"))]),
            AxisLines::new(),
        );
        assert_eq!(system.name(), Some("B"));
        assert_eq!(system.level, LevelId(7));
        assert_eq!(system.line_count(), 3);
    }

    #[test]
    fn unnamed_system_has_no_name() {
        let system = GridSystem::new(
            GridKind::Rectangular,
            AxisLines::from_vec(vec![named(1, None)]),
            AxisLines::new(),
            AxisLines::new(),
        );
        assert_eq!(system.name(), None);
    }
}

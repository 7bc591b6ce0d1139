// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid reference lines: raw host records and level-assigned lines.

use crate::curve::RefCurve;
use crate::ids::{GridLineId, LevelId};
use crate::level::VerticalSpan;

/// Presentation style carried from the grid line's type: an RGB color and a
/// line weight, forwarded verbatim into the curve-set representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    pub rgb: [u8; 3],
    pub weight: f64,
}

/// A grid reference line as scanned from the host model, before level
/// assignment. The vertical span drives assignment by extent overlap, never
/// single-point containment.
#[derive(Debug, Clone)]
pub struct RawGridLine {
    pub id: GridLineId,
    pub curve: RefCurve,
    pub span: VerticalSpan,
    pub name_override: Option<String>,
    pub style: Option<CurveStyle>,
}

impl RawGridLine {
    pub fn new(id: GridLineId, curve: RefCurve, span: VerticalSpan) -> Self {
        Self {
            id,
            curve,
            span,
            name_override: None,
            style: None,
        }
    }

    /// Sets the display-name override.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_override = Some(name.into());
        self
    }

    /// Sets the presentation style.
    pub fn with_style(mut self, style: CurveStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Binds this raw line to its canonical storey.
    pub fn assign(self, level: LevelId) -> GridLine {
        GridLine {
            id: self.id,
            curve: self.curve,
            level,
            name_override: self.name_override,
            style: self.style,
        }
    }
}

/// A grid reference line bound to a canonical storey, the classification
/// unit of the grid exporter.
#[derive(Debug, Clone)]
pub struct GridLine {
    pub id: GridLineId,
    pub curve: RefCurve,
    pub level: LevelId,
    pub name_override: Option<String>,
    pub style: Option<CurveStyle>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Vector2};

    #[test]
    fn assign_preserves_payload() {
        let raw = RawGridLine::new(
            GridLineId(3),
            RefCurve::line(Point2::new(0.0, 0.0), Vector2::new(0.0, 1.0)),
            VerticalSpan::new(0.0, 3.0),
        )
        .with_name("A");
        let line = raw.assign(LevelId(1));
        assert_eq!(line.level, LevelId(1));
        assert_eq!(line.name_override.as_deref(), Some("A"));
        assert!(line.curve.is_line());
    }
}

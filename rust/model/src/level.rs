// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw level records and element vertical spans, as handed over by the host
//! model walker.

use crate::ids::LevelId;

/// A horizontal reference plane in the host document.
///
/// `is_building_storey` is the host's raw flag; `None` means the host did not
/// expose one, which defaults to "is a storey" downstream.
#[derive(Debug, Clone)]
pub struct RawLevel {
    pub id: LevelId,
    /// Project-relative elevation.
    pub elevation: f64,
    pub is_building_storey: Option<bool>,
    /// Explicit "up to level" override from the level's parameters.
    pub up_to_level: Option<LevelId>,
    pub name: Option<String>,
    pub long_name: Option<String>,
}

impl RawLevel {
    /// Minimal constructor for a storey-flagged level.
    pub fn new(id: LevelId, elevation: f64) -> Self {
        Self {
            id,
            elevation,
            is_building_storey: None,
            up_to_level: None,
            name: None,
            long_name: None,
        }
    }

    /// Sets the raw building-storey flag.
    pub fn with_storey_flag(mut self, flag: bool) -> Self {
        self.is_building_storey = Some(flag);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the "up to level" parameter.
    pub fn with_up_to_level(mut self, level: LevelId) -> Self {
        self.up_to_level = Some(level);
        self
    }
}

/// The vertical bounding span of an element, used for per-storey splitting
/// and for level assignment by extent overlap.
#[derive(Debug, Clone, Copy)]
pub struct VerticalSpan {
    pub z_min: f64,
    pub z_max: f64,
    /// Explicit base-level override from the element's parameters.
    pub base_level: Option<LevelId>,
}

impl VerticalSpan {
    /// Span without a base-level override.
    pub fn new(z_min: f64, z_max: f64) -> Self {
        Self {
            z_min,
            z_max,
            base_level: None,
        }
    }

    /// Span with an explicit base level.
    pub fn with_base_level(mut self, level: LevelId) -> Self {
        self.base_level = Some(level);
        self
    }

    /// `true` if the span has no positive extent.
    pub fn is_degenerate(&self) -> bool {
        self.z_max <= self.z_min
    }
}

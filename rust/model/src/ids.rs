// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed identifiers for host-model objects and emitted entities.
//!
//! Host ids are opaque: the export core never interprets their value beyond
//! equality and the stable ordering used for sort tie-breaks. Entity handles
//! are whatever the emission sink hands back (STEP instance numbers in
//! practice).

use serde::{Deserialize, Serialize};

macro_rules! host_id {
    ($(#[$doc:meta] $name:ident;)+) => {
        $(
            #[$doc]
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            pub struct $name(pub i64);

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "#{}", self.0)
                }
            }
        )+
    };
}

host_id! {
    /// Id of a horizontal reference plane (level) in the host model.
    LevelId;
    /// Id of a grid reference line in the host model.
    GridLineId;
    /// Id of an arbitrary building element in the host model.
    ElementId;
}

/// Handle to an entity created through the emission sink.
///
/// Handles are opaque to the core; they are only stored and passed back into
/// later sink calls (e.g. a storey placement referenced by a grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

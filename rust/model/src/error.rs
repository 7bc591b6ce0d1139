// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors surfaced by the emission sink.

/// Errors reported by an [`crate::EntitySink`] implementation.
///
/// The sink is a black box (in production, the STEP writer of the host
/// plugin); the core only distinguishes "the sink rejected this request"
/// from "the sink returned no usable handle".
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink refused to create the requested entity.
    #[error("emission sink rejected {entity}: {reason}")]
    Rejected {
        entity: &'static str,
        reason: String,
    },

    /// The sink reported success but produced no usable handle.
    #[error("emission sink produced no usable handle for {0}")]
    NoHandle(&'static str),
}

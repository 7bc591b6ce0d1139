// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC GlobalId generation.
//!
//! IFC compresses a 128-bit UUID into 22 characters over a custom base-64
//! alphabet: the first character carries the top 2 bits, the remaining 21
//! characters carry 6 bits each.

use uuid::Uuid;

const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Generates a fresh random IFC GlobalId (22 characters).
pub fn new_global_id() -> String {
    compress(Uuid::new_v4().as_u128())
}

/// Compresses a 128-bit value into the 22-character IFC encoding.
pub fn compress(value: u128) -> String {
    let mut out = [0u8; 22];
    let mut rest = value;
    // Fill from the least significant 6-bit group backwards; the leading
    // character ends up with the remaining 2 bits.
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(rest & 0x3f) as usize];
        rest >>= 6;
    }
    debug_assert_eq!(rest, 0);
    // The alphabet is pure ASCII
    String::from_utf8_lossy(&out).into_owned()
}

//! Key exchange.

use super::GUID;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha1::{Digest, Sha1};

/// Derive `sec-websocket-accept` from `sec-websocket-key`.
///
/// The key is not validated, any byte string is accepted.
#[inline]
pub fn derive_accept_key(sec_key: &[u8]) -> [u8; 28] {
    let mut sha1 = Sha1::default();
    sha1.update(sec_key);
    sha1.update(GUID);
    let input = sha1.finalize();
    let mut output = [0_u8; 28];
    // base64 of a 20 bytes digest is always 28 bytes
    let _ = STANDARD.encode_slice(input, &mut output);
    output
}

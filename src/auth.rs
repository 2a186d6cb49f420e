use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const KEY: &[u8] = b"shopping-list/admin-password";

/// Exact equality of `candidate` and `secret`, in constant time.
///
/// Both strings are tagged under the same key; `verify_slice` compares the
/// tags without early exit, so timing does not depend on the common prefix.
pub fn password_matches(candidate: &str, secret: &str) -> bool {
    let (Some(mut mac), Some(expected)) = (keyed(), tag(secret)) else {
        return false;
    };
    mac.update(candidate.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

fn keyed() -> Option<HmacSha256> {
    HmacSha256::new_from_slice(KEY).ok()
}

fn tag(message: &str) -> Option<Vec<u8>> {
    let mut mac = keyed()?;
    mac.update(message.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}

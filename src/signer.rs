//! OVH request signatures.

use sha1::{Digest, Sha1};

/// Prefix marking the signature scheme version.
const SIGNATURE_PREFIX: &str = "$1$";

/// Compute the `X-Ovh-Signature` value for one request.
///
/// `method`, `url` and `body` must be exactly what goes on the wire; `body`
/// is the empty string for requests without payload.
pub fn sign(
    application_secret: &str,
    consumer_key: &str,
    method: &str,
    url: &str,
    body: &str,
    timestamp: i64,
) -> String {
    let mut hasher = Sha1::new();
    hasher.update(
        format!(
            "{}+{}+{}+{}+{}+{}",
            application_secret, consumer_key, method, url, body, timestamp
        )
        .as_bytes(),
    );

    format!("{}{}", SIGNATURE_PREFIX, hex::encode(hasher.finalize()))
}

/// Current Unix time in seconds. Read once per outgoing request.
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

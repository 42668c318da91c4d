//! HMAC-SHA256 webhook signatures (`X-Hub-Signature-256`).

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Hex length of a SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

fn mac_for(secret: &str) -> Option<HmacSha256> {
    if secret.is_empty() {
        return None;
    }
    HmacSha256::new_from_slice(secret.as_bytes()).ok()
}

/// Computes the header value GitHub would send for `body`.
///
/// Returns `None` for an empty secret, which can never verify.
pub fn sign(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = mac_for(secret)?;
    mac.update(body);
    Some(format!(
        "{SIGNATURE_PREFIX}{}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks `header` against the HMAC of `body` keyed with `secret`.
///
/// Only the canonical lowercase form produced by GitHub is accepted. The
/// digest comparison is constant-time.
pub fn verify_signature(secret: &str, body: &[u8], header: Option<&str>) -> bool {
    let Some(header) = header else {
        return false;
    };
    let Some(digest_hex) = header.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    if digest_hex.len() != DIGEST_HEX_LEN
        || !digest_hex
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return false;
    }
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };
    let Some(mut mac) = mac_for(secret) else {
        return false;
    };

    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "It's a Secret to Everybody";
    const BODY: &[u8] = b"Hello, World!";

    #[test]
    fn matches_github_reference_vector() {
        // Example from GitHub's "Validating webhook deliveries" docs.
        assert_eq!(
            sign(SECRET, BODY).unwrap(),
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
        );
    }

    #[test]
    fn signed_body_verifies() {
        let sig = sign(SECRET, BODY).unwrap();
        assert!(verify_signature(SECRET, BODY, Some(&sig)));
    }

    #[test]
    fn any_single_byte_change_in_signature_fails() {
        let sig = sign(SECRET, BODY).unwrap();
        for i in 0..sig.len() {
            let mut bytes = sig.clone().into_bytes();
            bytes[i] = if bytes[i] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(bytes).unwrap();
            assert!(
                !verify_signature(SECRET, BODY, Some(&mutated)),
                "mutation at {i} verified"
            );
        }
    }

    #[test]
    fn uppercase_digest_is_not_canonical() {
        let sig = sign(SECRET, BODY).unwrap();
        let upper = format!(
            "{SIGNATURE_PREFIX}{}",
            sig[SIGNATURE_PREFIX.len()..].to_uppercase()
        );
        assert!(!verify_signature(SECRET, BODY, Some(&upper)));
    }

    #[test]
    fn any_single_byte_change_in_body_fails() {
        let sig = sign(SECRET, BODY).unwrap();
        for i in 0..BODY.len() {
            let mut body = BODY.to_vec();
            body[i] ^= 0x01;
            assert!(!verify_signature(SECRET, &body, Some(&sig)));
        }
    }

    #[test]
    fn absent_or_empty_header_fails() {
        assert!(!verify_signature(SECRET, BODY, None));
        assert!(!verify_signature(SECRET, BODY, Some("")));
        assert!(!verify_signature(SECRET, BODY, Some(SIGNATURE_PREFIX)));
        assert!(!verify_signature("", BODY, None));
    }

    #[test]
    fn empty_secret_never_verifies() {
        assert_eq!(sign("", BODY), None);
        let sig_with_other = sign("x", BODY).unwrap();
        assert!(!verify_signature("", BODY, Some(&sig_with_other)));
    }

    #[test]
    fn wrong_secret_fails() {
        let sig = sign("other", BODY).unwrap();
        assert!(!verify_signature(SECRET, BODY, Some(&sig)));
    }
}

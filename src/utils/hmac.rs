//! HMAC-SHA256 signing and verification utilities.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `message` under `secret`
pub fn sign_hex(secret: &str, message: &str) -> Result<String, String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| format!("Invalid secret key: {e}"))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a lowercase hex signature against `message`.
///
/// Only the exact lowercase hex encoding is accepted, so the outcome matches
/// a byte-for-byte comparison with [`sign_hex`]; the digest comparison
/// itself runs in constant time.
pub fn verify_hex(secret: &str, message: &str, signature: &str) -> Result<bool, String> {
    let is_lower_hex = signature
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !is_lower_hex {
        return Ok(false);
    }

    let Ok(signature_bytes) = hex::decode(signature) else {
        return Ok(false);
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| format!("Invalid secret key: {e}"))?;
    mac.update(message.as_bytes());

    Ok(mac.verify_slice(&signature_bytes).is_ok())
}

/// Message signed by the payment gateway for a completed checkout
pub fn payment_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Signature the gateway is expected to send for `order_id`/`payment_id`
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> Result<String, String> {
    sign_hex(secret, &payment_message(order_id, payment_id))
}

/// Verify a gateway payment signature
pub fn verify_payment_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<bool, String> {
    verify_hex(secret, &payment_message(order_id, payment_id), signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret";

    #[test]
    fn test_known_vector() {
        // echo -n "order_1|pay_1" | openssl dgst -sha256 -hmac test_secret
        let signature = payment_signature(SECRET, "order_1", "pay_1").unwrap();
        assert_eq!(
            signature,
            "444ab3353f39d9a6cd042ce01e598f3a2819f46159b58f0ff40d4eed15d8e158"
        );
    }

    #[test]
    fn test_signature_is_deterministic_and_accepted() {
        let pairs = [
            ("order_LkQ9", "pay_29QQoUBi66xm2f"),
            ("order_1", "pay_1"),
            ("", ""),
            ("order|with|pipes", "pay_ü"),
        ];
        for (order_id, payment_id) in pairs {
            let first = payment_signature(SECRET, order_id, payment_id).unwrap();
            let second = payment_signature(SECRET, order_id, payment_id).unwrap();
            assert_eq!(first, second);
            assert!(verify_payment_signature(SECRET, order_id, payment_id, &first).unwrap());
        }
    }

    #[test]
    fn test_every_single_character_mutation_is_rejected() {
        let signature = payment_signature(SECRET, "order_abc", "pay_xyz").unwrap();
        for (index, original) in signature.char_indices() {
            let replacement = if original == '0' { '1' } else { '0' };
            let mut tampered = signature.clone();
            tampered.replace_range(index..index + 1, &replacement.to_string());
            assert!(
                !verify_payment_signature(SECRET, "order_abc", "pay_xyz", &tampered).unwrap(),
                "mutation at {index} was accepted"
            );
        }
    }

    #[test]
    fn test_uppercase_or_truncated_signature_is_rejected() {
        let signature = payment_signature(SECRET, "order_abc", "pay_xyz").unwrap();
        assert_eq!(
            signature,
            "a734976b4a9aa4403181acd25d87b09ad8cb31f7d73be91e2bb9eb5c517ca319"
        );
        assert!(
            !verify_payment_signature(SECRET, "order_abc", "pay_xyz", &signature.to_uppercase())
                .unwrap()
        );
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_xyz", &signature[..62]).unwrap());
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_xyz", "not-hex").unwrap());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signature = payment_signature("other_secret", "order_abc", "pay_xyz").unwrap();
        assert!(!verify_payment_signature(SECRET, "order_abc", "pay_xyz", &signature).unwrap());
    }
}

//! Opaque token and signature minting.
//!
//! Neither value is verified anywhere; they are receipts, not sessions.
//! The neural token is `base64(id:unix:nonce)`, the contact signature
//! `NS_XXXXXXXX`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use rand::Rng;

use dem_claire_core::UserId;

/// Bytes of randomness in a neural token nonce.
const TOKEN_NONCE_BYTES: usize = 16;

/// Hex characters in a contact signature.
const SIGNATURE_LENGTH: usize = 8;

/// Mint an opaque login token for a user.
#[must_use]
pub fn mint_neural_token(user_id: UserId) -> String {
    let nonce: [u8; TOKEN_NONCE_BYTES] = rand::rng().random();
    let nonce_hex: String = nonce.iter().map(|b| format!("{b:02x}")).collect();

    let raw = format!("{}:{}:{}", user_id.as_i64(), Utc::now().timestamp(), nonce_hex);
    STANDARD.encode(raw)
}

/// Generate an `NS_`-prefixed uppercase hex receipt for a contact message.
#[must_use]
pub fn neural_signature() -> String {
    let mut rng = rand::rng();
    let hex: String = (0..SIGNATURE_LENGTH)
        .map(|_| {
            let nibble: u8 = rng.random_range(0..16);
            char::from_digit(u32::from(nibble), 16)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();

    format!("NS_{hex}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_decodes_to_id_time_nonce() {
        let token = mint_neural_token(UserId::new(42));
        let decoded = STANDARD.decode(&token).unwrap();
        let decoded = String::from_utf8(decoded).unwrap();

        let parts: Vec<&str> = decoded.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first().copied().unwrap(), "42");
        assert_eq!(parts.get(2).unwrap().len(), TOKEN_NONCE_BYTES * 2);
    }

    #[test]
    fn tokens_are_unique() {
        let a = mint_neural_token(UserId::new(1));
        let b = mint_neural_token(UserId::new(1));
        assert_ne!(a, b);
    }

    #[test]
    fn signature_shape() {
        let sig = neural_signature();
        assert_eq!(sig.len(), 3 + SIGNATURE_LENGTH);
        assert!(sig.starts_with("NS_"));
        let hex = sig.trim_start_matches("NS_");
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}

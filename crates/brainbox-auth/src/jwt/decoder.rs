//! Payload extraction without signature verification.
//!
//! The backend verified the signature when it issued the token. The client
//! only reads claims to drive UI decisions and to know when to refresh, so
//! it never holds the signing key. Never use these claims to
//! grant anything the backend would not grant on its own.

use jsonwebtoken::dangerous::insecure_decode;
use serde::de::DeserializeOwned;

use crate::error::SessionError;

/// Decode the claims of a JWT into `T` without checking its signature.
///
/// The token must still be well formed: exactly three segments, a readable
/// header and a payload that deserializes into `T`.
pub fn decode_unverified<T: DeserializeOwned>(token: &str) -> Result<T, SessionError> {
    insecure_decode::<T>(token)
        .map(|data| data.claims)
        .map_err(|e| SessionError::MalformedToken(format!("invalid token: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::{AccessClaims, ExpiryClaims};
    use brainbox_entity::user::Role;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn sign(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_claims_of_signed_token() {
        let token = sign(&serde_json::json!({
            "token_type": "access",
            "user_id": 42,
            "user_role": "Moderator",
            "exp": 1_900_000_000i64,
            "jti": "abc"
        }));

        let claims: AccessClaims = decode_unverified(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.user_role, Some(Role::Moderator));
        assert_eq!(claims.exp, 1_900_000_000);
    }

    #[test]
    fn test_refresh_token_only_needs_exp() {
        let token = sign(&serde_json::json!({"token_type": "refresh", "exp": 5}));
        let claims: ExpiryClaims = decode_unverified(&token).unwrap();
        assert_eq!(claims.exp, 5);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            decode_unverified::<ExpiryClaims>("not-a-token"),
            Err(SessionError::MalformedToken(_))
        ));
        assert!(matches!(
            decode_unverified::<ExpiryClaims>("a.!!!.c"),
            Err(SessionError::MalformedToken(_))
        ));

        let no_exp = sign(&serde_json::json!({"user_id": 1}));
        assert!(decode_unverified::<ExpiryClaims>(&no_exp).is_err());
    }

    #[test]
    fn test_rejects_extra_segments() {
        let token = sign(&serde_json::json!({"exp": 4_102_444_800i64}));
        let mut parts = token.split('.');
        let (header, payload) = (parts.next().unwrap(), parts.next().unwrap());

        for forged in [
            format!("{header}.{payload}.sig.extra"),
            format!("{header}.{payload}.sig.extra.junk"),
        ] {
            assert!(matches!(
                decode_unverified::<ExpiryClaims>(&forged),
                Err(SessionError::MalformedToken(_))
            ));
        }
        assert!(decode_unverified::<ExpiryClaims>(&token).is_ok());
    }

    #[test]
    fn test_unknown_role_is_malformed() {
        let token = sign(&serde_json::json!({"user_id": 1, "user_role": "root", "exp": 5}));
        assert!(decode_unverified::<AccessClaims>(&token).is_err());
    }
}

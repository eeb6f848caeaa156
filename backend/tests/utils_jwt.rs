use vibeseat_backend::types::UserId;
use vibeseat_backend::utils::jwt::{
    create_access_token, create_refresh_token, decode_refresh_token, verify_access_token,
    verify_refresh_secret,
};

#[test]
fn jwt_round_trip_preserves_claims() {
    let token = create_access_token(
        "2f1f9df0-3f3c-4b13-9c27-5f1d54b6a0a1".into(),
        "alice".into(),
        "admin".into(),
        "secret",
        1,
    )
    .expect("create token");
    let claims = verify_access_token(&token, "secret").expect("verify token");
    assert_eq!(claims.sub, "2f1f9df0-3f3c-4b13-9c27-5f1d54b6a0a1");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, "admin");
    assert!(claims.exp > claims.iat);
    assert!(!claims.jti.is_empty());
}

#[test]
fn jwt_rejects_wrong_secret() {
    let token = create_access_token("id".into(), "bob".into(), "user".into(), "secret", 1)
        .expect("create token");
    assert!(verify_access_token(&token, "other-secret").is_err());
}

#[test]
fn jwt_rejects_garbage_token() {
    assert!(verify_access_token("not.a.jwt", "secret").is_err());
}

#[test]
fn refresh_token_encoding_round_trips() {
    let user_id = UserId::new();
    let data = create_refresh_token(user_id, 7).expect("create refresh token");

    let encoded = data.encoded();
    let (id, secret) = decode_refresh_token(&encoded).expect("decode");
    assert_eq!(id, data.id);
    assert_eq!(data.user_id, user_id);
    assert!(verify_refresh_secret(&secret, &data.token_hash).unwrap());
}

#[test]
fn refresh_token_secret_is_not_stored_verbatim() {
    let data = create_refresh_token(UserId::new(), 7).expect("create refresh token");
    assert_ne!(data.secret, data.token_hash);
    assert!(data.token_hash.starts_with("$argon2"));
}

#[test]
fn refresh_token_decode_rejects_malformed_input() {
    assert!(decode_refresh_token("").is_err());
    assert!(decode_refresh_token("just-one-part").is_err());
    assert!(decode_refresh_token("not-a-uuid.secret").is_err());
    let id = UserId::new();
    assert!(decode_refresh_token(&format!("{id}.")).is_err());
}

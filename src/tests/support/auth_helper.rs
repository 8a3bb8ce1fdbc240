use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;

pub fn jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        issuer: "blog-cms-test".to_string(),
        secret_key: "test_secret_key_for_testing_purposes_only".to_string(),
        access_token_expiry: 3600,
    })
}

pub fn token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(jwt_service())
}

/// `Authorization` header value for a fresh access token.
pub fn bearer(user_id: Uuid, verified: bool) -> String {
    let token = jwt_service()
        .generate_access_token(user_id, verified)
        .expect("test token should encode");
    format!("Bearer {token}")
}

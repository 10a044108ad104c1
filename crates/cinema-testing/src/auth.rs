//! Token helpers for router tests.
//!
//! Tests build the service with [`TestAuth::signer`] and attach
//! [`TestAuth::bearer`] headers, so every request goes through real JWT
//! validation without a login round trip.

use http::{HeaderName, HeaderValue, header::AUTHORIZATION};

use cinema_auth_types::token::{JwtSigner, TokenSigner};
use cinema_domain::role::Role;

pub const TEST_SECRET: &str = "cinema-test-secret";

/// Test identity issuer bound to [`TEST_SECRET`].
pub struct TestAuth {
    signer: JwtSigner,
}

impl Default for TestAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAuth {
    pub fn new() -> Self {
        Self {
            signer: JwtSigner::new(TEST_SECRET, 3600),
        }
    }

    /// Signer to install in the app state under test.
    pub fn signer(&self) -> JwtSigner {
        self.signer.clone()
    }

    pub fn token(&self, email: &str, role: Role) -> String {
        self.signer
            .issue(email, role)
            .expect("test token must sign")
    }

    /// `Authorization: Bearer <token>` header pair for the given role.
    pub fn bearer(&self, role: Role) -> (HeaderName, HeaderValue) {
        let email = match role {
            Role::Admin => "admin@cinema.test",
            Role::User => "user@cinema.test",
        };
        let value = format!("Bearer {}", self.token(email, role));
        (
            AUTHORIZATION,
            HeaderValue::from_str(&value).expect("token is valid header text"),
        )
    }

    /// A token signed with a different secret.
    pub fn forged_bearer(&self, role: Role) -> (HeaderName, HeaderValue) {
        let forged = JwtSigner::new("not-the-test-secret", 3600)
            .issue("mallory@cinema.test", role)
            .expect("forged token must sign");
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {forged}")).expect("valid header text"),
        )
    }
}

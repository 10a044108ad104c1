use cinema_auth_types::token::TokenSigner;
use cinema_domain::role::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::CatalogServiceError;
use crate::infra::password::{hash_password, verify_password};

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<U: UserRepository, T: TokenSigner> {
    pub users: U,
    pub tokens: T,
}

impl<U: UserRepository, T: TokenSigner> AuthenticateUseCase<U, T> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, email: &str, password: &str) -> Result<String, CatalogServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(CatalogServiceError::InvalidCredentials)?;
        let matches = verify_password(password, &user.password_hash)
            .map_err(|e| anyhow::anyhow!("verify password hash for {email}: {e}"))?;
        if !matches {
            tracing::debug!(email, "password mismatch");
            return Err(CatalogServiceError::InvalidCredentials);
        }
        let token = self.tokens.issue(&user.email, user.role)?;
        tracing::info!(email, role = %user.role, "token issued");
        Ok(token)
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<User, CatalogServiceError> {
        let password_hash =
            hash_password(password).map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
        let user = User {
            email: email.to_owned(),
            password_hash,
            role,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

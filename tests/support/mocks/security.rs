// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use civiccare::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use civiccare::domain::user::{Role, User, UserId};

/* -------------------------------- PasswordHasher -------------------------------- */

/// Reversible "hash" that still rejects wrong passwords.
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid username, password, or role"))
        }
    }
}

/* -------------------------------- TokenManager -------------------------------- */

/// Tokens are `test::<id>::<role>::<username>`; capabilities come from the role.
#[derive(Clone, Debug, Default)]
pub struct TestTokenManager;

fn encode(id: UserId, role: Role, username: &str) -> String {
    format!("test::{id}::{role}::{username}")
}

#[async_trait]
impl TokenManager for TestTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: encode(subject.user_id, subject.role, &subject.username),
            issued_at,
            expires_at: issued_at + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let invalid = || ApplicationError::unauthorized("invalid token");
        let mut parts = token.strip_prefix("test::").ok_or_else(invalid)?.splitn(3, "::");
        let id = parts
            .next()
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or_else(invalid)?;
        let role: Role = parts
            .next()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(invalid)?;
        let username = parts.next().ok_or_else(invalid)?;

        let issued_at = super::time::fixed_now();
        Ok(AuthenticatedUser {
            id: UserId::new(id).map_err(|_| invalid())?,
            username: username.to_string(),
            role,
            capabilities: role.default_capabilities(),
            issued_at,
            expires_at: issued_at + Duration::hours(1),
        })
    }
}

/// Bearer token that [`TestTokenManager`] accepts for `user`.
pub fn token_for(user: &User) -> String {
    encode(user.id, user.role, user.username.as_str())
}

/// What the extractor would produce for `user`.
pub fn actor_for(user: &User) -> AuthenticatedUser {
    let issued_at = super::time::fixed_now();
    AuthenticatedUser {
        id: user.id,
        username: user.username.to_string(),
        role: user.role,
        capabilities: user.role.default_capabilities(),
        issued_at,
        expires_at: issued_at + Duration::hours(1),
    }
}

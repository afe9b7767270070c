//! Identity service
//!
//! Issues collision-free pseudonymous accounts: generate a candidate,
//! check storage for a collision, retry until one sticks. The unique
//! constraint on usernames backs the existence check, so a candidate
//! that races another registration is simply retried.

use confess_common::{generate_pseudonym, hash_password};
use confess_core::{DomainError, User};
use tracing::{info, instrument};

use crate::dto::{RegisterRequest, RegisterResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Bound on generate-and-check rounds before giving up
const MAX_GENERATION_ATTEMPTS: usize = 32;

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register an anonymous account under a fresh pseudonym
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        let password_hash = match request.password.as_deref() {
            Some(password) => Some(
                hash_password(password)
                    .map_err(|e| ServiceError::internal(format!("password hashing: {e}")))?,
            ),
            None => None,
        };

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = generate_pseudonym();

            if self.ctx.user_repo().username_exists(&candidate).await? {
                continue;
            }

            let user = User::new(self.ctx.generate_id(), candidate);

            match self
                .ctx
                .user_repo()
                .create(&user, password_hash.as_deref())
                .await
            {
                Ok(()) => {
                    info!(user_id = %user.id, username = %user.username, "Anonymous user registered");
                    return Ok(RegisterResponse {
                        user_id: user.id,
                        username: user.username,
                    });
                }
                // Raced another registration onto the same pseudonym;
                // draw a new candidate.
                Err(DomainError::UsernameTaken) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::internal(
            "exhausted pseudonym generation attempts",
        ))
    }
}

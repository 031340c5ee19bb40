//! Auth endpoints: login and signup.

use async_trait::async_trait;
use validator::Validate;

use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::traits::auth::AuthBackend;
use studyhub_core::types::Identity;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::OutcomeResponse;
use crate::http::ApiClient;

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, username: &str, password: &str) -> AppResult<Identity> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        // Rejections come back as 4xx with an `{error}` body, so decode the
        // outcome envelope regardless of status.
        let outcome: OutcomeResponse =
            self.post_json_any_status("/auth/login", &request).await?;

        if !outcome.success {
            return Err(AppError::authentication(
                outcome.error.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        Identity::new(username)
    }

    async fn signup(&self, username: &str, password: &str) -> AppResult<()> {
        let request = SignupRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let outcome: OutcomeResponse =
            self.post_json_any_status("/auth/signup", &request).await?;

        if !outcome.success {
            return Err(AppError::authentication(
                outcome.error.unwrap_or_else(|| "Signup failed".to_string()),
            ));
        }

        Ok(())
    }
}

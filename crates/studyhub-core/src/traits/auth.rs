//! Authentication backend trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Identity;

/// Remote account operations. Rejections surface as
/// [`ErrorKind::Authentication`](crate::error::ErrorKind) and are shown to
/// the user inline; no loop state is affected since identity was never
/// established.
#[async_trait]
pub trait AuthBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Verify credentials; returns the established identity on success.
    async fn login(&self, username: &str, password: &str) -> AppResult<Identity>;

    /// Create an account. The caller logs in separately afterwards.
    async fn signup(&self, username: &str, password: &str) -> AppResult<()>;
}

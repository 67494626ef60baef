//! Auth endpoints: login and profile hydration.

use secrecy::SecretString;
use tracing::instrument;

use kiosk_core::{Credentials, Token, User};

use super::{ApiClient, ApiError, bearer};

impl ApiClient {
    /// Exchange credentials for an access token (`POST /auth/login`).
    ///
    /// # Errors
    ///
    /// `ApiError::Status` with 401 on bad credentials.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Token, ApiError> {
        let url = self.endpoint("auth/login")?;
        self.send(self.http().post(url).json(credentials)).await
    }

    /// Fetch the profile behind a token (`GET /auth/me`).
    ///
    /// # Errors
    ///
    /// `ApiError::Status` with 401 on an invalid or expired token.
    #[instrument(skip(self, token))]
    pub async fn me(&self, token: &SecretString) -> Result<User, ApiError> {
        let url = self.endpoint("auth/me")?;
        self.send(bearer(self.http().get(url), token)).await
    }
}

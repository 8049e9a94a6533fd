use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::forms::auth::LoginFormPayload;
use crate::models::config::AdminConfig;

use super::{ServiceError, ServiceResult};

/// Verifies admin credentials against the configured username and Argon2
/// password hash.
#[derive(Clone, Debug)]
pub struct AdminAuthenticator {
    username: String,
    password_hash: String,
}

impl AdminAuthenticator {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(&config.username, &config.password_hash)
    }

    /// Returns the identity to log in on success.
    pub fn verify(&self, credentials: &LoginFormPayload) -> ServiceResult<String> {
        let hash = PasswordHash::new(&self.password_hash).map_err(|e| {
            log::error!("Configured admin password hash is not a valid PHC string: {e}");
            ServiceError::Internal
        })?;

        let password_ok = Argon2::default()
            .verify_password(credentials.password.as_bytes(), &hash)
            .is_ok();

        if password_ok && credentials.username == self.username {
            Ok(self.username.clone())
        } else {
            log::warn!("Rejected admin login for '{}'", credentials.username);
            Err(ServiceError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::{PasswordHasher, SaltString};

    use super::*;

    fn authenticator() -> AdminAuthenticator {
        let salt = SaltString::from_b64("c29tZXNhbHQ").unwrap();
        let hash = Argon2::default()
            .hash_password(b"hunter22", &salt)
            .unwrap()
            .to_string();
        AdminAuthenticator::new("admin", hash)
    }

    fn login(username: &str, password: &str) -> LoginFormPayload {
        LoginFormPayload {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_configured_credentials() {
        assert_eq!(
            authenticator().verify(&login("admin", "hunter22")),
            Ok("admin".to_string())
        );
    }

    #[test]
    fn rejects_wrong_password_or_username() {
        let auth = authenticator();
        assert_eq!(
            auth.verify(&login("admin", "hunter2")),
            Err(ServiceError::Unauthorized)
        );
        assert_eq!(
            auth.verify(&login("root", "hunter22")),
            Err(ServiceError::Unauthorized)
        );
    }

    #[test]
    fn malformed_hash_is_internal() {
        let auth = AdminAuthenticator::new("admin", "plaintext");
        assert_eq!(
            auth.verify(&login("admin", "plaintext")),
            Err(ServiceError::Internal)
        );
    }
}

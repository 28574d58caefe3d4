// Authentication configuration: signing secret sourcing and token lifetime

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Default access token lifetime: 15 minutes
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 900;

/// Configuration for token signing and verification
///
/// The secret is held in memory for the lifetime of the process. Two
/// sourcing modes exist:
/// - `from_env`: loads `JWT_SECRET`, so tokens stay valid across restarts
/// - `ephemeral`: generates a fresh random secret, invalidating every
///   previously issued token on restart
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    token_ttl_secs: i64,
}

impl AuthConfig {
    /// Create a config with an explicit secret and the default 15 minute TTL
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Load the signing secret from the `JWT_SECRET` environment variable
    ///
    /// Falls back to an ephemeral secret when the variable is unset, which
    /// means issued tokens will not survive a process restart.
    pub fn from_env() -> Self {
        match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => Self::new(secret),
            _ => {
                tracing::warn!(
                    "JWT_SECRET not set; using an ephemeral signing secret. \
                     Issued tokens will be invalidated on restart."
                );
                Self::ephemeral()
            }
        }
    }

    /// Create a config with a freshly generated random secret
    pub fn ephemeral() -> Self {
        let secret: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        Self::new(secret)
    }

    /// Override the token TTL (used by tests)
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.token_ttl_secs = ttl_secs;
        self
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

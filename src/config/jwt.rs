use anyhow::Result;
use std::env;

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HS256 secret with the identity provider.
    pub secret: String,
    /// Lifetime of tokens minted locally (tests, dev tooling). Seconds.
    pub access_token_expiry: u64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;

        let access_token_expiry = env::var("JWT_ACCESS_EXPIRATION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        Self::new(secret, access_token_expiry)
    }

    pub fn new(secret: impl Into<String>, access_token_expiry: u64) -> Result<Self> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters",
                MIN_SECRET_LEN
            ));
        }
        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

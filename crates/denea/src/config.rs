//! Denea ERP connection settings loaded from environment variables.

/// Credentials and tuning for the Denea API.
///
/// Missing credentials are tolerated at startup (a warning is logged);
/// the client fails with [`DeneaError::Unconfigured`](crate::DeneaError)
/// when a call is actually attempted.
#[derive(Debug, Clone)]
pub struct DeneaConfig {
    /// Base URL of the Denea API (e.g. `https://erp.example.com/api`).
    pub api_url: Option<String>,
    /// Bearer token for the Denea API.
    pub api_key: Option<String>,
    /// Shared secret for inbound webhook signatures.
    pub webhook_secret: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl DeneaConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `DENEA_API_URL`        | unset (warns)    |
    /// | `DENEA_API_KEY`        | unset (warns)    |
    /// | `DENEA_WEBHOOK_SECRET` | unset (warns)    |
    /// | `DENEA_TIMEOUT_SECS`   | `30`             |
    pub fn from_env() -> Self {
        let api_url = non_empty_var("DENEA_API_URL");
        let api_key = non_empty_var("DENEA_API_KEY");
        let webhook_secret = non_empty_var("DENEA_WEBHOOK_SECRET");

        let timeout_secs: u64 = std::env::var("DENEA_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("DENEA_TIMEOUT_SECS must be a valid u64");

        if api_url.is_none() || api_key.is_none() {
            tracing::warn!("Denea API credentials not configured, API sync will fail at call time");
        }
        if webhook_secret.is_none() {
            tracing::warn!("DENEA_WEBHOOK_SECRET not configured, inbound webhooks will be rejected");
        }

        Self {
            api_url,
            api_key,
            webhook_secret,
            timeout_secs,
        }
    }

    /// An unconfigured instance for tests and offline tooling.
    pub fn unconfigured() -> Self {
        Self {
            api_url: None,
            api_key: None,
            webhook_secret: None,
            timeout_secs: 30,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

//! Cromos admin API connection settings loaded from environment variables.

/// Default currency for price updates.
const DEFAULT_CURRENCY: &str = "EUR";

/// Default stock location for inventory updates.
const DEFAULT_LOCATION_ID: &str = "default_location";

/// Connection settings and validated defaults for the Cromos admin API.
///
/// `currency` and `location_id` are explicit configuration fields rather
/// than literals scattered through call sites; both carry validated
/// defaults.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the Cromos backend (default: `http://localhost:9000`).
    pub api_url: String,
    /// Admin API bearer token. Absence warns at startup and fails at
    /// call time.
    pub api_key: Option<String>,
    /// ISO 4217 currency code for price updates (default: `EUR`).
    pub currency: String,
    /// Stock location targeted by inventory sets (default:
    /// `default_location`).
    pub location_id: String,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                  |
    /// |-----------------------|--------------------------|
    /// | `CROMOS_API_URL`      | `http://localhost:9000`  |
    /// | `CROMOS_API_KEY`      | unset (warns)            |
    /// | `CROMOS_CURRENCY`     | `EUR`                    |
    /// | `CROMOS_LOCATION_ID`  | `default_location`       |
    /// | `CROMOS_TIMEOUT_SECS` | `30`                     |
    pub fn from_env() -> Self {
        let api_url = std::env::var("CROMOS_API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "http://localhost:9000".to_string());

        let api_key = std::env::var("CROMOS_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if api_key.is_none() {
            tracing::warn!("CROMOS_API_KEY not configured, store updates will fail at call time");
        }

        let currency = validate_currency(
            &std::env::var("CROMOS_CURRENCY").unwrap_or_else(|_| DEFAULT_CURRENCY.into()),
        );

        let location_id = std::env::var("CROMOS_LOCATION_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION_ID.to_string());

        let timeout_secs: u64 = std::env::var("CROMOS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("CROMOS_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            api_key,
            currency,
            location_id,
            timeout_secs,
        }
    }

    /// A localhost configuration without credentials, for tests.
    pub fn unconfigured() -> Self {
        Self {
            api_url: "http://localhost:9000".to_string(),
            api_key: None,
            currency: DEFAULT_CURRENCY.to_string(),
            location_id: DEFAULT_LOCATION_ID.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Validate a currency code: three ASCII letters, uppercased. Anything
/// else falls back to the default with a warning.
fn validate_currency(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        trimmed.to_ascii_uppercase()
    } else {
        tracing::warn!(
            currency = %trimmed,
            "Invalid currency code, falling back to {DEFAULT_CURRENCY}"
        );
        DEFAULT_CURRENCY.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_currency_is_uppercased() {
        assert_eq!(validate_currency("usd"), "USD");
        assert_eq!(validate_currency(" EUR "), "EUR");
    }

    #[test]
    fn invalid_currency_falls_back_to_default() {
        assert_eq!(validate_currency(""), "EUR");
        assert_eq!(validate_currency("EURO"), "EUR");
        assert_eq!(validate_currency("E1R"), "EUR");
    }
}

use crate::core::currency::Currency;
use crate::core::error::RateError;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Body shape shared by the latest-rates endpoints: `{"rates": {"USD": 0.0067}}`.
///
/// Rates are kept as raw JSON values so a non-numeric entry counts as a
/// missing rate instead of failing the whole body.
#[derive(Debug, Deserialize)]
pub(crate) struct RatesResponse {
    pub result: Option<String>,
    pub success: Option<bool>,
    pub rates: Option<HashMap<String, serde_json::Value>>,
}

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("yenconv/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Performs the GET and extracts the `to` rate from a rates body.
pub(crate) async fn fetch_rate(
    client: &reqwest::Client,
    url: &str,
    from: Currency,
    to: Currency,
) -> Result<f64, RateError> {
    debug!("Requesting exchange rates from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| RateError::Network {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(RateError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let text = response.text().await.map_err(|source| RateError::Network {
        url: url.to_string(),
        source,
    })?;

    let data: RatesResponse = serde_json::from_str(&text).map_err(|e| RateError::Malformed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    extract_rate(data, url, from, to)
}

pub(crate) fn extract_rate(
    data: RatesResponse,
    url: &str,
    from: Currency,
    to: Currency,
) -> Result<f64, RateError> {
    if data.result.as_deref().is_some_and(|r| r != "success") || data.success == Some(false) {
        return Err(RateError::Malformed {
            url: url.to_string(),
            reason: "provider reported an unsuccessful result".to_string(),
        });
    }

    let rates = data.rates.ok_or_else(|| RateError::Malformed {
        url: url.to_string(),
        reason: "missing rates".to_string(),
    })?;

    rates
        .get(to.code())
        .and_then(serde_json::Value::as_f64)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or(RateError::MissingRate { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> RatesResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_rate() {
        let data = parse(r#"{"result": "success", "rates": {"USD": 0.0067, "JPY": 1}}"#);
        let rate = extract_rate(data, "http://test", Currency::Jpy, Currency::Usd).unwrap();
        assert_eq!(rate, 0.0067);
    }

    #[test]
    fn test_extract_rate_rejects_bad_values() {
        for body in [
            r#"{"rates": {"EUR": 0.9}}"#,
            r#"{"rates": {"USD": 0}}"#,
            r#"{"rates": {"USD": -1.5}}"#,
            r#"{"rates": {"USD": "0.0067"}}"#,
            r#"{"rates": {"USD": null}}"#,
        ] {
            let result = extract_rate(parse(body), "http://test", Currency::Jpy, Currency::Usd);
            assert!(
                matches!(result, Err(RateError::MissingRate { .. })),
                "expected missing rate for {body}"
            );
        }
    }

    #[test]
    fn test_extract_rate_rejects_unsuccessful_body() {
        for body in [
            r#"{"result": "error", "rates": {"USD": 0.0067}}"#,
            r#"{"success": false}"#,
            r#"{"result": "success"}"#,
        ] {
            let result = extract_rate(parse(body), "http://test", Currency::Jpy, Currency::Usd);
            assert!(matches!(result, Err(RateError::Malformed { .. })));
        }
    }
}

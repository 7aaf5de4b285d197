use super::util::{build_client, fetch_rate};
use crate::core::currency::{Currency, CurrencyRateProvider};
use crate::core::error::RateError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// Backup source: `GET {base_url}/latest?base={FROM}`.
pub struct ExchangeRateHostProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateHostProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Ok(ExchangeRateHostProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateHostProvider {
    #[instrument(name = "ExchangeRateHostRate", skip(self))]
    async fn get_rate(&self, from: Currency, to: Currency) -> Result<f64, RateError> {
        let url = format!("{}/latest?base={}", self.base_url, from.code());
        fetch_rate(&self.client, &url, from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", base))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{"success": true, "base": "JPY", "rates": {"USD": 0.0068}}"#;
        let mock_server = create_mock_server("JPY", mock_response).await;

        let provider = ExchangeRateHostProvider::new(&mock_server.uri(), None).unwrap();
        let rate = provider.get_rate(Currency::Jpy, Currency::Usd).await.unwrap();
        assert_eq!(rate, 0.0068);
    }

    #[tokio::test]
    async fn test_missing_target_rate() {
        let mock_response = r#"{"success": true, "base": "USD", "rates": {"EUR": 0.92}}"#;
        let mock_server = create_mock_server("USD", mock_response).await;

        let provider = ExchangeRateHostProvider::new(&mock_server.uri(), None).unwrap();
        let result = provider.get_rate(Currency::Usd, Currency::Jpy).await;
        let err = result.unwrap_err();
        assert!(matches!(err, RateError::MissingRate { .. }));
        assert_eq!(err.to_string(), "Rate for JPY not found in USD response");
    }

    #[tokio::test]
    async fn test_unsuccessful_body() {
        let mock_response = r#"{"success": false, "error": {"code": 101}}"#;
        let mock_server = create_mock_server("JPY", mock_response).await;

        let provider = ExchangeRateHostProvider::new(&mock_server.uri(), None).unwrap();
        let result = provider.get_rate(Currency::Jpy, Currency::Usd).await;
        assert!(matches!(result, Err(RateError::Malformed { .. })));
    }
}

use super::util::{build_client, fetch_rate};
use crate::core::currency::{Currency, CurrencyRateProvider};
use crate::core::error::RateError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// Primary source: `GET {base_url}/v6/latest/{FROM}`.
pub struct OpenErApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Ok(OpenErApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl CurrencyRateProvider for OpenErApiProvider {
    #[instrument(name = "OpenErApiRate", skip(self))]
    async fn get_rate(&self, from: Currency, to: Currency) -> Result<f64, RateError> {
        let url = format!("{}/v6/latest/{}", self.base_url, from.code());
        fetch_rate(&self.client, &url, from, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v6/latest/{base}")))
            .respond_with(template)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_response = r#"{
            "result": "success",
            "base_code": "JPY",
            "time_last_update_unix": 1741910401,
            "rates": {"JPY": 1, "USD": 0.0067, "EUR": 0.0062}
        }"#;
        let mock_server =
            create_mock_server("JPY", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri(), None).unwrap();
        let rate = provider
            .get_rate(Currency::Jpy, Currency::Usd)
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, 0.0067);
    }

    #[tokio::test]
    async fn test_queries_source_currency_endpoint() {
        let mock_response = r#"{"result": "success", "rates": {"USD": 1, "JPY": 149.25}}"#;
        let mock_server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&format!("{}/", mock_server.uri()), None).unwrap();
        let rate = provider.get_rate(Currency::Usd, Currency::Jpy).await.unwrap();
        assert_eq!(rate, 149.25);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("JPY", ResponseTemplate::new(500)).await;

        let provider = OpenErApiProvider::new(&mock_server.uri(), None).unwrap();
        let result = provider.get_rate(Currency::Jpy, Currency::Usd).await;
        let err = result.unwrap_err();
        assert!(matches!(err, RateError::Status { .. }));
        assert!(err.to_string().starts_with("HTTP error: 500 Internal Server Error"));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server =
            create_mock_server("JPY", ResponseTemplate::new(200).set_body_string("<html>"))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri(), None).unwrap();
        let result = provider.get_rate(Currency::Jpy, Currency::Usd).await;
        assert!(matches!(result, Err(RateError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_error_result_in_body() {
        let mock_response = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let mock_server =
            create_mock_server("JPY", ResponseTemplate::new(200).set_body_string(mock_response))
                .await;

        let provider = OpenErApiProvider::new(&mock_server.uri(), None).unwrap();
        let result = provider.get_rate(Currency::Jpy, Currency::Usd).await;
        assert!(matches!(result, Err(RateError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let provider = OpenErApiProvider::new("http://127.0.0.1:1", None).unwrap();
        let result = provider.get_rate(Currency::Jpy, Currency::Usd).await;
        assert!(matches!(result, Err(RateError::Network { .. })));
    }
}

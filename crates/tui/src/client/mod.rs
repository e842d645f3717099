use std::collections::BTreeSet;

use api_types::rates::{
    API_KEY_HEADER, CONVERT_PATH, CURRENCY_LIST_PATH, ConvertQuery, ConvertResponse, CurrencyList,
    ErrorBody,
};
use engine::{Amount, ConversionError, Currency, RateProvider};
use reqwest::{Response, Url};

use crate::{
    credentials::ApiKey,
    error::{AppError, Result},
};

/// HTTP client of the exchange rate provider.
#[derive(Debug, Clone)]
pub struct RateClient {
    base_url: Url,
    http: reqwest::Client,
    api_key: ApiKey,
}

impl RateClient {
    pub fn new(base_url: &str, api_key: ApiKey) -> Result<Self> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|err| AppError::InvalidConfig(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ConversionError> {
        self.base_url
            .join(path)
            .map_err(|err| ConversionError::InvalidResponse(format!("invalid endpoint: {err}")))
    }

    /// Currency codes the provider supports.
    pub async fn currencies(&self) -> std::result::Result<BTreeSet<String>, ConversionError> {
        let endpoint = self.endpoint(CURRENCY_LIST_PATH)?;
        tracing::debug!(%endpoint, "listing supported currencies");

        let res = self
            .http
            .get(endpoint)
            .header(API_KEY_HEADER, self.api_key.expose())
            .send()
            .await
            .map_err(transport)?;
        let res = ensure_success(res).await?;

        let list = res.json::<CurrencyList>().await.map_err(invalid_body)?;
        if !list.success {
            return Err(ConversionError::InvalidResponse(
                "currency list reported failure".to_string(),
            ));
        }
        Ok(list.currencies.into_keys().collect())
    }

    /// Converts `amount` from `from` into `to` with a single request.
    pub async fn convert(
        &self,
        amount: Amount,
        from: Currency,
        to: Currency,
    ) -> std::result::Result<Amount, ConversionError> {
        let endpoint = self.endpoint(CONVERT_PATH)?;
        let query = ConvertQuery {
            to: to.code().to_string(),
            from: from.code().to_string(),
            amount: amount.value(),
        };
        tracing::debug!(%endpoint, from = %from, to = %to, "converting amount");

        let res = self
            .http
            .get(endpoint)
            .header(API_KEY_HEADER, self.api_key.expose())
            .query(&query)
            .send()
            .await
            .map_err(transport)?;
        let status = res.status().as_u16();
        let res = ensure_success(res).await?;

        let body = res.json::<ConvertResponse>().await.map_err(invalid_body)?;
        if body.success == Some(false) {
            let message = body
                .error
                .as_ref()
                .and_then(|err| err.describe())
                .unwrap_or_else(|| "provider reported failure".to_string());
            tracing::warn!(status, %message, "conversion rejected by provider");
            return Err(ConversionError::Status { status, message });
        }

        body.result.map(Amount::new).ok_or_else(|| {
            ConversionError::InvalidResponse("missing result field".to_string())
        })
    }
}

impl RateProvider for RateClient {
    async fn convert(
        &self,
        amount: Amount,
        from: Currency,
        to: Currency,
    ) -> std::result::Result<Amount, ConversionError> {
        RateClient::convert(self, amount, from, to).await
    }
}

async fn ensure_success(res: Response) -> std::result::Result<Response, ConversionError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.describe())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "unknown error".to_string());
    tracing::warn!(status = status.as_u16(), %message, "rate provider request failed");

    Err(ConversionError::Status {
        status: status.as_u16(),
        message,
    })
}

fn transport(err: reqwest::Error) -> ConversionError {
    tracing::warn!("rate provider unreachable: {err}");
    ConversionError::Transport(err.to_string())
}

fn invalid_body(err: reqwest::Error) -> ConversionError {
    ConversionError::InvalidResponse(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
    };
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    const KEY: &str = "test-key";

    async fn list(headers: HeaderMap) -> impl IntoResponse {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some(KEY) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "No API key found in request"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "currencies": {"AED": "UAE Dirham", "SAR": "Saudi Riyal", "USD": "United States Dollar"}
            })),
        )
    }

    async fn convert(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some(KEY) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid authentication credentials"})),
            )
                .into_response();
        }
        let from = params.get("from").map(String::as_str).unwrap_or("");
        let to = params.get("to").map(String::as_str).unwrap_or("");
        let amount = params.get("amount").map(String::as_str).unwrap_or("");

        match (from, to, amount) {
            ("AED", "USD", "100") => Json(json!({
                "success": true,
                "query": {"from": "AED", "to": "USD", "amount": 100},
                "info": {"timestamp": 1719500000, "rate": 0.272294},
                "date": "2024-06-27",
                "result": 27.2294
            }))
            .into_response(),
            ("SAR", "USD", "403") => (
                StatusCode::FORBIDDEN,
                Json(json!({"message": "You cannot consume this service"})),
            )
                .into_response(),
            ("SAR", "USD", "1") => Json(json!({
                "success": false,
                "error": {"code": 105, "type": "function_access_restricted", "info": "Access Restricted"}
            }))
            .into_response(),
            ("SAR", "USD", "2") => (StatusCode::OK, "not json").into_response(),
            ("SAR", "USD", "3") => Json(json!({"success": true})).into_response(),
            _ => (StatusCode::BAD_REQUEST, "unexpected query").into_response(),
        }
    }

    async fn spawn_provider() -> String {
        let app = Router::new()
            .route("/currency_data/list", get(list))
            .route("/fixer/convert", get(convert));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn amount(value: i64) -> Amount {
        Amount::new(Decimal::new(value, 0))
    }

    #[tokio::test]
    async fn converts_with_result_field() {
        let client = RateClient::new(&spawn_provider().await, ApiKey::from(KEY)).unwrap();

        let converted = client
            .convert(amount(100), Currency::Aed, Currency::Usd)
            .await
            .unwrap();

        assert_eq!(converted.value(), Decimal::new(272_294, 4));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let client = RateClient::new(&spawn_provider().await, ApiKey::from(KEY)).unwrap();

        let err = client
            .convert(amount(403), Currency::Sar, Currency::Usd)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ConversionError::Status {
                status: 403,
                message: "You cannot consume this service".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn missing_key_header_is_rejected() {
        let client = RateClient::new(&spawn_provider().await, ApiKey::from("wrong")).unwrap();

        let err = client
            .convert(amount(100), Currency::Aed, Currency::Usd)
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn provider_failure_body_is_reported() {
        let client = RateClient::new(&spawn_provider().await, ApiKey::from(KEY)).unwrap();

        let err = client
            .convert(amount(1), Currency::Sar, Currency::Usd)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ConversionError::Status {
                status: 200,
                message: "Access Restricted".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_bodies_are_invalid_responses() {
        let client = RateClient::new(&spawn_provider().await, ApiKey::from(KEY)).unwrap();

        for value in [2, 3] {
            let err = client
                .convert(amount(value), Currency::Sar, Currency::Usd)
                .await
                .unwrap_err();
            assert!(
                matches!(err, ConversionError::InvalidResponse(_)),
                "amount {value}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = RateClient::new(&format!("http://{addr}"), ApiKey::from(KEY)).unwrap();

        let err = client
            .convert(amount(100), Currency::Aed, Currency::Usd)
            .await
            .unwrap_err();

        assert!(matches!(err, ConversionError::Transport(_)));
    }

    #[tokio::test]
    async fn lists_supported_currencies() {
        let client = RateClient::new(&spawn_provider().await, ApiKey::from(KEY)).unwrap();

        let currencies = client.currencies().await.unwrap();

        assert!(currencies.contains("AED"));
        assert!(currencies.contains("SAR"));
        assert!(currencies.contains("USD"));
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_path() {
        let client = RateClient::new("http://localhost:9000/rates", ApiKey::from(KEY)).unwrap();
        assert_eq!(
            client.endpoint(CONVERT_PATH).unwrap().as_str(),
            "http://localhost:9000/rates/fixer/convert"
        );
    }
}

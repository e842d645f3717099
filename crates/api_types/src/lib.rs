use serde::{Deserialize, Serialize};

pub mod rates {
    //! Payloads of the exchange rate provider (apilayer).
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use super::*;

    /// Header carrying the API key on every request.
    pub const API_KEY_HEADER: &str = "apikey";

    /// `GET currency_data/list`
    pub const CURRENCY_LIST_PATH: &str = "currency_data/list";

    /// `GET fixer/convert`
    pub const CONVERT_PATH: &str = "fixer/convert";

    /// Supported currencies, keyed by code.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyList {
        #[serde(default = "default_success")]
        pub success: bool,
        #[serde(default)]
        pub currencies: BTreeMap<String, String>,
    }

    /// Query string of a conversion request.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ConvertQuery {
        pub to: String,
        pub from: String,
        pub amount: Decimal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ConvertResponse {
        pub success: Option<bool>,
        pub query: Option<ConvertQuery>,
        pub info: Option<RateInfo>,
        pub date: Option<String>,
        /// Converted amount, present on success.
        ///
        /// JSON numbers go through `f64`, so only about 15 significant digits survive decoding.
        pub result: Option<Decimal>,
        pub error: Option<ProviderError>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RateInfo {
        pub timestamp: Option<i64>,
        pub rate: Option<Decimal>,
    }

    /// Failure details reported inside a response body.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProviderError {
        pub code: Option<Code>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub info: Option<String>,
    }

    impl ProviderError {
        /// Human readable description, falling back to the error type.
        pub fn describe(&self) -> Option<String> {
            self.info.clone().or_else(|| self.kind.clone())
        }
    }

    /// Body of a non-2xx response.
    ///
    /// The gateway answers `{"message": "..."}`; upstream errors use `{"error": {...}}`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub message: Option<String>,
        pub error: Option<ProviderError>,
    }

    impl ErrorBody {
        pub fn describe(&self) -> Option<String> {
            self.message
                .clone()
                .or_else(|| self.error.as_ref().and_then(ProviderError::describe))
        }
    }

    fn default_success() -> bool {
        true
    }

    /// Error codes come back either as numbers or as strings.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum Code {
        Number(i64),
        Text(String),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::rates::*;

    #[test]
    fn decodes_successful_conversion() {
        let body = r#"{
            "success": true,
            "query": {"from": "AED", "to": "USD", "amount": 100},
            "info": {"timestamp": 1719500000, "rate": 0.272294},
            "date": "2024-06-27",
            "result": 27.2294
        }"#;

        let response: ConvertResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.success, Some(true));
        assert_eq!(response.result, Some(Decimal::new(272_294, 4)));
        assert_eq!(response.query.unwrap().from, "AED");
        assert!(response.error.is_none());
    }

    #[test]
    fn results_within_double_precision_decode_exactly() {
        let body = r#"{"success": true, "result": 12345.6789012345}"#;

        let response: ConvertResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            response.result,
            Some(Decimal::new(123_456_789_012_345, 10))
        );
    }

    #[test]
    fn decodes_provider_failure() {
        let body = r#"{
            "success": false,
            "error": {"code": 402, "type": "invalid_from_currency", "info": "You have entered an invalid \"from\" property."}
        }"#;

        let response: ConvertResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.success, Some(false));
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, Some(Code::Number(402)));
        assert_eq!(
            error.describe().as_deref(),
            Some("You have entered an invalid \"from\" property.")
        );
    }

    #[test]
    fn decodes_currency_list() {
        let body = r#"{"success": true, "currencies": {"AED": "UAE Dirham", "USD": "United States Dollar"}}"#;

        let list: CurrencyList = serde_json::from_str(body).unwrap();

        assert!(list.success);
        assert_eq!(list.currencies.keys().collect::<Vec<_>>(), ["AED", "USD"]);
    }

    #[test]
    fn error_body_prefers_gateway_message() {
        let gateway: ErrorBody =
            serde_json::from_str(r#"{"message": "Invalid authentication credentials"}"#).unwrap();
        let upstream: ErrorBody =
            serde_json::from_str(r#"{"error": {"code": "404_not_found", "type": "not_found"}}"#)
                .unwrap();

        assert_eq!(
            gateway.describe().as_deref(),
            Some("Invalid authentication credentials")
        );
        assert_eq!(upstream.describe().as_deref(), Some("not_found"));
    }
}

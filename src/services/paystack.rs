// src/services/paystack.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum PaystackError {
    #[error("Payment gateway not configured")]
    NotConfigured,

    #[error("Gateway request failed: {0}")]
    RequestFailed(String),

    #[error("Gateway rejected the request: {0}")]
    GatewayRejected(String),

    #[error("Invalid gateway response: {0}")]
    InvalidResponse(String),
}

/// Envelope every Paystack response uses
#[derive(Debug, Deserialize)]
struct PaystackEnvelope<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

/// Result of a transaction initialization
#[derive(Debug, Clone, Deserialize)]
pub struct PaystackAuthorization {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Result of a transaction verification
#[derive(Debug, Clone, Deserialize)]
pub struct PaystackVerification {
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub paid_at: Option<String>,
}

#[derive(Debug, Serialize)]
struct InitializeRequest<'a> {
    email: &'a str,
    /// Integer minor units (kobo); the gateway takes no decimals
    amount: i64,
    currency: &'a str,
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
}

#[derive(Debug)]
pub struct PaystackService {
    secret_key: Option<String>,
    base_url: String,
    client: Client,
}

impl PaystackService {
    pub fn new(secret_key: Option<String>, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            secret_key,
            base_url,
            client,
        }
    }

    fn secret_key(&self) -> Result<&str, PaystackError> {
        self.secret_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PaystackError::NotConfigured)
    }

    /// Initialize a transaction and get the checkout authorization URL
    pub async fn initialize_transaction(
        &self,
        email: &str,
        amount: i64,
        currency: &str,
        reference: &str,
        callback_url: Option<&str>,
    ) -> Result<PaystackAuthorization, PaystackError> {
        let secret_key = self.secret_key()?;

        let request = InitializeRequest {
            email,
            amount,
            currency,
            reference,
            callback_url,
        };

        debug!(
            reference = %reference,
            amount = amount,
            currency = %currency,
            "Initializing gateway transaction"
        );

        let response = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(secret_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting payment gateway");
                PaystackError::RequestFailed(e.to_string())
            })?;

        let envelope = self
            .read_envelope::<PaystackAuthorization>(response)
            .await?;

        info!(
            reference = %envelope.reference,
            "Gateway transaction initialized"
        );
        Ok(envelope)
    }

    /// Verify a transaction by its reference
    pub async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<PaystackVerification, PaystackError> {
        let secret_key = self.secret_key()?;

        debug!(reference = %reference, "Verifying gateway transaction");

        let response = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(secret_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP error contacting payment gateway");
                PaystackError::RequestFailed(e.to_string())
            })?;

        let verification = self
            .read_envelope::<PaystackVerification>(response)
            .await?;

        info!(
            reference = %reference,
            status = %verification.status,
            "Gateway verification completed"
        );
        Ok(verification)
    }

    /// Unwrap the `{status, message, data}` envelope, surfacing the gateway
    /// message on failure
    async fn read_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, PaystackError> {
        let http_status = response.status();

        let envelope = response
            .json::<PaystackEnvelope<T>>()
            .await
            .map_err(|e| {
                error!(error = %e, http_status = %http_status, "Failed to parse gateway response");
                PaystackError::InvalidResponse(e.to_string())
            })?;

        if !http_status.is_success() || !envelope.status {
            warn!(
                http_status = %http_status,
                message = %envelope.message,
                "Gateway rejected request"
            );
            return Err(PaystackError::GatewayRejected(envelope.message));
        }

        envelope
            .data
            .ok_or_else(|| PaystackError::InvalidResponse("missing data field".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_service_refuses_calls() {
        let service = PaystackService::new(None, "https://api.paystack.co".to_string());
        assert!(matches!(
            service.secret_key(),
            Err(PaystackError::NotConfigured)
        ));

        let service = PaystackService::new(Some("".to_string()), "https://api.paystack.co".to_string());
        assert!(matches!(
            service.secret_key(),
            Err(PaystackError::NotConfigured)
        ));
    }

    #[test]
    fn test_initialize_request_serialization_skips_absent_callback() {
        let request = InitializeRequest {
            email: "ada@example.com",
            amount: 50_000,
            currency: "NGN",
            reference: "T_ABC123",
            callback_url: None,
        };
        let json = serde_json::to_value(&request).expect("Serialization failed");
        assert_eq!(json["amount"], 50_000);
        assert!(json.get("callback_url").is_none());
    }

    #[test]
    fn test_envelope_parses_gateway_shapes() {
        let body = r#"{
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc",
                "access_code": "abc",
                "reference": "T_ABC123"
            }
        }"#;
        let envelope: PaystackEnvelope<PaystackAuthorization> =
            serde_json::from_str(body).expect("Parse failed");
        assert!(envelope.status);
        let data = envelope.data.expect("data missing");
        assert_eq!(data.reference, "T_ABC123");

        let body = r#"{"status": false, "message": "Invalid key"}"#;
        let envelope: PaystackEnvelope<PaystackAuthorization> =
            serde_json::from_str(body).expect("Parse failed");
        assert!(!envelope.status);
        assert!(envelope.data.is_none());
    }
}

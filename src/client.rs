//! Caller-facing operations of the ICUTech service.
//!
//! Each call builds the envelope, relays it and interprets the reply.
//! Relay exhaustion is the only error; everything the upstream says is a
//! [`RemoteResult`].

use crate::error::RelayError;
use crate::http::Exchange;
use crate::proxy::ProxyRelay;
use crate::soap::{OperationRequest, RemoteResult, parse_response};

pub const LOGIN_OPERATION: &str = "Login";
pub const REGISTER_OPERATION: &str = "RegisterNewCustomer";

/// Password given to generated test accounts.
pub const TEST_ACCOUNT_PASSWORD: &str = "Test123!";

/// Registration record for `RegisterNewCustomer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub country_id: u32,
    /// Affiliate id (`aID` on the wire)
    pub affiliate_id: u32,
    pub signup_ip: String,
}

impl NewCustomer {
    /// A throwaway account whose email is made unique by `stamp_millis`.
    pub fn test_account(stamp_millis: u128) -> Self {
        Self {
            email: format!("test{stamp_millis}@test.com"),
            password: TEST_ACCOUNT_PASSWORD.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            mobile: "+1234567890".to_string(),
            country_id: 1,
            affiliate_id: 0,
            signup_ip: "127.0.0.1".to_string(),
        }
    }

    pub fn to_request(&self) -> OperationRequest {
        OperationRequest::new(REGISTER_OPERATION)
            .field("Email", self.email.as_str())
            .field("Password", self.password.as_str())
            .field("FirstName", self.first_name.as_str())
            .field("LastName", self.last_name.as_str())
            .field("Mobile", self.mobile.as_str())
            .field("CountryID", self.country_id.to_string())
            .field("aID", self.affiliate_id.to_string())
            .field("SignupIP", self.signup_ip.as_str())
    }
}

/// Client for the ICUTech SOAP service.
pub struct IcuTechClient<E> {
    relay: ProxyRelay<E>,
}

impl<E: Exchange> IcuTechClient<E> {
    pub fn new(relay: ProxyRelay<E>) -> Self {
        Self { relay }
    }

    pub fn relay(&self) -> &ProxyRelay<E> {
        &self.relay
    }

    /// Performs an arbitrary operation.
    pub async fn call(&self, request: &OperationRequest) -> Result<RemoteResult, RelayError> {
        let envelope = request.to_envelope(self.relay.namespace());
        let reply = self.relay.send(&envelope, &request.operation).await?;
        let result = parse_response(&reply);

        tracing::debug!(
            operation = %request.operation,
            success = result.is_success(),
            "Operation completed"
        );

        Ok(result)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<RemoteResult, RelayError> {
        let request = OperationRequest::new(LOGIN_OPERATION)
            .field("UserName", username)
            .field("Password", password);
        self.call(&request).await
    }

    pub async fn register_account(
        &self,
        customer: &NewCustomer,
    ) -> Result<RemoteResult, RelayError> {
        self.call(&customer.to_request()).await
    }
}

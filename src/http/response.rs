use bytes::Bytes;

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundResponse {
    /// Numeric HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Bytes,
}

impl InboundResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx class.
    ///
    /// ```
    /// # use soap_relay::http::response::InboundResponse;
    /// assert!(InboundResponse::new(204, "").is_success());
    /// assert!(!InboundResponse::new(302, "").is_success());
    /// ```
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

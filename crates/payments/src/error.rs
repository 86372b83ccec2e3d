/// Error type for payment gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The amount was zero or negative.
    #[error("Payment amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// The HTTP request to the gateway failed (network, DNS, timeout).
    #[error("Payment gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status.
    #[error("Payment gateway returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// No intent with the given id exists.
    #[error("Payment intent {0} not found")]
    IntentNotFound(String),
}

/// Payment settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Stripe secret key. `None` selects the mock gateway.
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    /// ISO currency code for new intents (default: `usd`).
    pub currency: String,
}

impl PaymentConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                  |
    /// |---------------------|--------------------------|
    /// | `STRIPE_SECRET_KEY` | unset (mock gateway)     |
    /// | `STRIPE_API_BASE`   | `https://api.stripe.com` |
    /// | `PAYMENT_CURRENCY`  | `usd`                    |
    pub fn from_env() -> Self {
        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let stripe_api_base = std::env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".into());
        let currency = std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".into());

        Self {
            stripe_secret_key,
            stripe_api_base,
            currency,
        }
    }

    /// Mock-gateway configuration for tests and local development.
    pub fn mock() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_api_base: "https://api.stripe.com".into(),
            currency: "usd".into(),
        }
    }
}

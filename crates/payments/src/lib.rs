//! Payment gateway abstraction.
//!
//! Handlers talk to a [`PaymentGateway`] trait object. Production uses
//! [`StripeGateway`]; development and tests use [`MockGateway`], selected by
//! [`build_gateway`] when no Stripe key is configured.

pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod stripe;

use std::sync::Arc;

pub use config::PaymentConfig;
pub use error::PaymentError;
pub use gateway::{IntentStatus, PaymentGateway, PaymentIntent};
pub use mock::MockGateway;
pub use stripe::StripeGateway;

/// Pick the gateway implementation for the given configuration.
pub fn build_gateway(config: &PaymentConfig) -> Result<Arc<dyn PaymentGateway>, PaymentError> {
    match &config.stripe_secret_key {
        Some(key) => {
            tracing::info!(api_base = %config.stripe_api_base, "Using Stripe payment gateway");
            Ok(Arc::new(StripeGateway::new(
                key.clone(),
                config.stripe_api_base.clone(),
                config.currency.clone(),
            )?))
        }
        None => {
            tracing::warn!("STRIPE_SECRET_KEY not set, using mock payment gateway");
            Ok(Arc::new(MockGateway::new(config.currency.clone())))
        }
    }
}

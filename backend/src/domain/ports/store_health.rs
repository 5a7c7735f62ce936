//! Driven port used by the liveness endpoint to reach the backing store.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failure reported by a store health check.
    pub enum StoreHealthError {
        /// The store did not answer the ping.
        Unreachable { message: String } => "store unreachable: {message}",
    }
}

/// Port for checking that the backing store answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Issue one round trip against the store.
    async fn ping(&self) -> Result<(), StoreHealthError>;
}

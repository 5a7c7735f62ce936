//! PostgreSQL reachability check backing the liveness endpoint.

use async_trait::async_trait;
use diesel::sql_query;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreHealth, StoreHealthError};

use super::diesel_helpers::{
    Bounded, bounded, map_diesel_error_message, map_pool_error_message, timeout_message,
};
use super::pool::DbPool;

/// Pings the database with `SELECT 1`.
#[derive(Clone)]
pub struct DieselStoreHealth {
    pool: DbPool,
}

impl DieselStoreHealth {
    /// Create a health check over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for DieselStoreHealth {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        let limit = self.pool.query_timeout();
        let ping = async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(|err| StoreHealthError::unreachable(map_pool_error_message(err)))?;
            sql_query("SELECT 1")
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(|err| {
                    StoreHealthError::unreachable(map_diesel_error_message(&err, "store ping"))
                })
        };

        match bounded(limit, ping).await {
            Bounded::Finished(result) => result,
            Bounded::TimedOut(limit) => Err(StoreHealthError::unreachable(timeout_message(
                limit,
                "store ping",
            ))),
        }
    }
}

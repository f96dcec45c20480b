//! Request-scoped unit of work
//!
//! A [`DbSession`] is handed to each request. The transaction behind it is
//! opened on first use, so requests that never touch storage never borrow a
//! pooled connection. Work is only persisted by [`DbSession::commit`]; a
//! session dropped with an open transaction rolls it back, whichever way the
//! request ended.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::debug;

pub struct DbSession {
    connection: Arc<DatabaseConnection>,
    transaction: Option<DatabaseTransaction>,
}

impl DbSession {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self {
            connection,
            transaction: None,
        }
    }

    /// Borrow the session transaction, beginning it if this is the first use
    pub async fn transaction(&mut self) -> Result<&DatabaseTransaction, DbErr> {
        let txn = match self.transaction.take() {
            Some(txn) => txn,
            None => {
                debug!("Beginning request transaction");
                self.connection.begin().await?
            }
        };
        let txn: &DatabaseTransaction = self.transaction.insert(txn);
        Ok(txn)
    }

    /// Commit pending work. A session that never began a transaction commits trivially.
    pub async fn commit(&mut self) -> Result<(), DbErr> {
        if let Some(txn) = self.transaction.take() {
            txn.commit().await?;
            debug!("Committed request transaction");
        }
        Ok(())
    }

    /// Discard pending work
    pub async fn rollback(&mut self) -> Result<(), DbErr> {
        if let Some(txn) = self.transaction.take() {
            txn.rollback().await?;
            debug!("Rolled back request transaction");
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.transaction.is_some()
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            // DatabaseTransaction rolls itself back on drop
            debug!("Request session released with uncommitted work, rolling back");
        }
    }
}

impl std::fmt::Debug for DbSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSession")
            .field("open", &self.is_open())
            .finish()
    }
}

//! Transaction management.
//!
//! Every mutation runs inside a `BEGIN IMMEDIATE` transaction so the write
//! lock is held from the first read (conflict check, number generation)
//! through the final write.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Starts an IMMEDIATE transaction, taking the write lock up front.
    ///
    /// Dropping the returned transaction without committing rolls back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock past
    /// the busy timeout, or a database error otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// let tx = db.begin_transaction().unwrap();
    /// let rooms = Database::list_rooms(&tx).unwrap();
    /// tx.commit().unwrap();
    /// # let _ = rooms;
    /// ```
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let timeout = self.config().busy_timeout_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::from_busy(e, timeout))
    }

    /// Runs `f` inside an IMMEDIATE transaction and commits if it succeeds.
    ///
    /// Any error from `f` rolls the whole transaction back.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, a lock timeout, or a commit failure.
    pub fn with_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let timeout = self.config().busy_timeout_secs();
        let tx = self.begin_transaction()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit().map_err(|e| Error::from_busy(e, timeout))?;
                Ok(value)
            }
            Err(e) => {
                log::debug!("rolling back: {e}");
                // Drop would roll back too; doing it here surfaces failures.
                if let Err(rollback) = tx.rollback() {
                    log::warn!("rollback failed: {rollback}");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::database::DatabaseConfig;
    use std::time::Duration;
    use tempfile::tempdir;

    fn guest_count(db: &Database) -> i64 {
        db.connection()
            .query_row("SELECT COUNT(*) FROM guests", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_with_transaction_commits() {
        let mut db = create_test_database();
        db.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO guests (full_name, contact_number) VALUES ('A', '1')",
                [],
            )?;
            Ok(())
        })
        .unwrap();
        assert_eq!(guest_count(&db), 1);
    }

    #[test]
    fn test_with_transaction_rolls_back_on_error() {
        let mut db = create_test_database();
        let result: Result<()> = db.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO guests (full_name, contact_number) VALUES ('A', '1')",
                [],
            )?;
            Err(Error::conflict("boom"))
        });
        assert!(result.unwrap_err().is_conflict());
        assert_eq!(guest_count(&db), 0);
    }

    #[test]
    fn test_second_writer_times_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.db");
        let mut holder = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut waiter = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let _held = holder.begin_transaction().unwrap();
        let err = waiter.begin_transaction().unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }
}

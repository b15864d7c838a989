use rusqlite::{Connection, OptionalExtension, Result, params};

/// Named JSON documents, one row per record key
pub struct RecordsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> RecordsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        RecordsRepository { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM records WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Replaces the whole record in one transaction
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        tx.commit()
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::init_connection;

    fn create_test_db() -> Connection {
        init_connection(":memory:").expect("Failed to create test database")
    }

    #[test]
    fn test_get_missing_record() {
        let conn = create_test_db();
        let repo = RecordsRepository::new(&conn);
        assert_eq!(repo.get("childProfiles").unwrap(), None);
    }

    #[test]
    fn test_put_then_get() {
        let conn = create_test_db();
        let repo = RecordsRepository::new(&conn);
        repo.put("childProfiles", "[]").unwrap();
        assert_eq!(repo.get("childProfiles").unwrap().as_deref(), Some("[]"));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_put_overwrites_whole_record() {
        let conn = create_test_db();
        let repo = RecordsRepository::new(&conn);
        repo.put("currentUser", r#"{"a":1}"#).unwrap();
        repo.put("currentUser", "null").unwrap();

        assert_eq!(repo.get("currentUser").unwrap().as_deref(), Some("null"));
        assert_eq!(repo.count().unwrap(), 1);
    }
}

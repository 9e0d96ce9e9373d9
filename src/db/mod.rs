mod error;

pub use error::DbError;

use crate::models::{Candidate, CandidateId, Tally};
use log::{debug, info};
use sqlx::any::AnyRow;
use sqlx::{AnyConnection, Connection, Row};

pub struct Database {
    url: String,
}

impl Database {
    // No connection is opened here; every operation connects on its own
    pub fn new(url: impl Into<String>) -> Self {
        sqlx::any::install_default_drivers();
        Self { url: url.into() }
    }

    async fn connect(&self) -> Result<AnyConnection, DbError> {
        AnyConnection::connect(&self.url).await.map_err(DbError::Connect)
    }

    // Create both tables if they are missing
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        let mut conn = self.connect().await?;
        let is_mysql = conn.backend_name().eq_ignore_ascii_case("mysql");

        let (candidates_ddl, votes_ddl) = if is_mysql {
            (
                r#"
                CREATE TABLE IF NOT EXISTS candidates (
                    id INT AUTO_INCREMENT PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,
                    party VARCHAR(255) NOT NULL
                ) ENGINE=InnoDB
                "#,
                r#"
                CREATE TABLE IF NOT EXISTS votes (
                    id INT AUTO_INCREMENT PRIMARY KEY,
                    candidate_id INT NOT NULL,
                    FOREIGN KEY (candidate_id) REFERENCES candidates(id)
                ) ENGINE=InnoDB
                "#,
            )
        } else {
            (
                r#"
                CREATE TABLE IF NOT EXISTS candidates (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    party TEXT NOT NULL
                )
                "#,
                r#"
                CREATE TABLE IF NOT EXISTS votes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    candidate_id INTEGER NOT NULL,
                    FOREIGN KEY (candidate_id) REFERENCES candidates(id)
                )
                "#,
            )
        };

        sqlx::query(candidates_ddl).execute(&mut conn).await?;
        sqlx::query(votes_ddl).execute(&mut conn).await?;
        conn.close().await?;

        let backend = if is_mysql { "mysql" } else { "sqlite" };
        info!("Database schema ready ({})", backend);
        Ok(())
    }

    // Insert a new candidate; both fields are trimmed first
    pub async fn add_candidate(&self, name: &str, party: &str) -> Result<(), DbError> {
        let name = name.trim();
        let party = party.trim();
        if name.is_empty() {
            return Err(DbError::InvalidInput("candidate name must not be empty"));
        }
        if party.is_empty() {
            return Err(DbError::InvalidInput("candidate party must not be empty"));
        }

        let mut conn = self.connect().await?;
        sqlx::query("INSERT INTO candidates (name, party) VALUES (?, ?)")
            .bind(name)
            .bind(party)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        info!("Added candidate {} ({})", name, party);
        Ok(())
    }

    // All candidates, oldest first
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, DbError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query("SELECT id, name, party FROM candidates ORDER BY id")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        let candidates = rows
            .iter()
            .map(|row| -> Result<Candidate, sqlx::Error> {
                Ok(Candidate {
                    id: row.try_get::<i64, _>("id")?,
                    name: text_column(row, "name")?,
                    party: text_column(row, "party")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        debug!("Loaded {} candidate(s)", candidates.len());
        Ok(candidates)
    }

    /// Removes a candidate together with every vote cast for it.
    ///
    /// Both deletes share one connection and commit together. Returns the
    /// number of candidate rows removed; an unknown id removes nothing and is
    /// not an error.
    pub async fn delete_candidate(&self, candidate_id: CandidateId) -> Result<u64, DbError> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;

        let votes = sqlx::query("DELETE FROM votes WHERE candidate_id = ?")
            .bind(candidate_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM candidates WHERE id = ?")
            .bind(candidate_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        conn.close().await?;

        info!(
            "Deleted candidate {} ({} row(s), {} vote(s))",
            candidate_id, removed, votes
        );
        Ok(removed)
    }

    // Record one vote; fails on an unknown candidate via the foreign key
    pub async fn cast_vote(&self, candidate_id: CandidateId) -> Result<(), DbError> {
        let mut conn = self.connect().await?;
        sqlx::query("INSERT INTO votes (candidate_id) VALUES (?)")
            .bind(candidate_id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        info!("Recorded vote for candidate {}", candidate_id);
        Ok(())
    }

    // Vote counts per candidate in id order, zero-vote candidates included
    pub async fn view_results(&self) -> Result<Vec<Tally>, DbError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT c.name, c.party, COUNT(v.id) AS votes
            FROM candidates c
            LEFT JOIN votes v ON c.id = v.candidate_id
            GROUP BY c.id, c.name, c.party
            ORDER BY c.id
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        let results = rows
            .iter()
            .map(|row| -> Result<Tally, sqlx::Error> {
                Ok(Tally {
                    name: text_column(row, "name")?,
                    party: text_column(row, "party")?,
                    votes: row.try_get::<i64, _>("votes")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(results)
    }
}

// MySQL reports TEXT columns as blobs, so accept raw UTF-8 bytes as well
fn text_column(row: &AnyRow, column: &str) -> Result<String, sqlx::Error> {
    match row.try_get::<String, _>(column) {
        Ok(text) => Ok(text),
        Err(text_err) => {
            let Ok(bytes) = row.try_get::<Vec<u8>, _>(column) else {
                return Err(text_err);
            };
            String::from_utf8(bytes).map_err(|e| sqlx::Error::ColumnDecode {
                index: format!("{:?}", column),
                source: Box::new(e),
            })
        }
    }
}

//! Postgres-backed document store
//!
//! Users, cards and consultations map onto three tables keyed by username.
//! The schema is created lazily, once per process.

use crate::error::AdvisoryError;
use crate::models::{
    ConsultationRecord, CreditCard, FinancialSnapshot, NewCard, NewConsultation, Transaction, User,
};
use crate::store::DocumentStore;
use crate::Result;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
      username TEXT PRIMARY KEY,
      password_hash TEXT NOT NULL,
      created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cards (
      card_id UUID PRIMARY KEY,
      username TEXT NOT NULL REFERENCES users (username),
      name TEXT NOT NULL,
      card_limit BIGINT NOT NULL,
      features TEXT NOT NULL,
      transactions JSONB NOT NULL,
      current_spend BIGINT NOT NULL,
      added_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_cards_username
    ON cards (username, added_at);
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS consultations (
      consultation_id UUID PRIMARY KEY,
      username TEXT NOT NULL REFERENCES users (username),
      query TEXT NOT NULL,
      snapshot JSONB,
      response TEXT NOT NULL,
      created_at TIMESTAMPTZ NOT NULL
    );
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_consultations_username_time
    ON consultations (username, created_at DESC);
    "#,
];

fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> AdvisoryError {
    move |e| AdvisoryError::DatabaseError(format!("Failed to {}: {}", action, e))
}

pub struct PgDocumentStore {
    pool: PgPool,
    schema_ready: Arc<OnceCell<()>>,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Build a pool that connects on first use.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)
            .map_err(db_error("configure postgres pool"))?;
        Ok(Self::new(pool))
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                for statement in SCHEMA {
                    sqlx::query(statement).execute(&self.pool).await?;
                }
                info!("Document store schema ready");
                Ok::<(), sqlx::Error>(())
            })
            .await
            .map_err(db_error("initialize document store schema"))?;

        Ok(())
    }

    fn user_from_row(row: &PgRow) -> Result<User> {
        Ok(User {
            username: row.try_get("username").map_err(db_error("decode user"))?,
            password_hash: row.try_get("password_hash").map_err(db_error("decode user"))?,
            created_at: row.try_get("created_at").map_err(db_error("decode user"))?,
        })
    }

    fn card_from_row(row: &PgRow) -> Result<CreditCard> {
        let transactions: Json<Vec<Transaction>> =
            row.try_get("transactions").map_err(db_error("decode card"))?;

        Ok(CreditCard {
            id: row.try_get("card_id").map_err(db_error("decode card"))?,
            name: row.try_get("name").map_err(db_error("decode card"))?,
            limit: row.try_get("card_limit").map_err(db_error("decode card"))?,
            features: row.try_get("features").map_err(db_error("decode card"))?,
            transactions: transactions.0,
            current_spend: row.try_get("current_spend").map_err(db_error("decode card"))?,
            added_at: row.try_get("added_at").map_err(db_error("decode card"))?,
        })
    }

    fn consultation_from_row(row: &PgRow) -> Result<ConsultationRecord> {
        let snapshot: Option<Json<FinancialSnapshot>> =
            row.try_get("snapshot").map_err(db_error("decode consultation"))?;

        Ok(ConsultationRecord {
            id: row.try_get("consultation_id").map_err(db_error("decode consultation"))?,
            query: row.try_get("query").map_err(db_error("decode consultation"))?,
            snapshot: snapshot.map(|s| s.0),
            response: row.try_get("response").map_err(db_error("decode consultation"))?,
            timestamp: row.try_get("created_at").map_err(db_error("decode consultation"))?,
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgDocumentStore {

    async fn get_user(&self, username: &str) -> Result<Option<User>> {
        self.ensure_schema().await?;

        let row = sqlx::query(
            r#"
            SELECT username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("load user"))?;

        row.as_ref().map(Self::user_from_row).transpose()
    }

    async fn user_exists(&self, username: &str) -> Result<bool> {
        self.ensure_schema().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("check user"))?;

        Ok(exists)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        self.ensure_schema().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("create user"))?;

        match row {
            Some(row) => Self::user_from_row(&row),
            None => Err(AdvisoryError::AlreadyExists(username.to_string())),
        }
    }

    async fn insert_card(&self, username: &str, card: NewCard) -> Result<CreditCard> {
        self.ensure_schema().await?;

        let card_id = Uuid::new_v4();

        let row = sqlx::query(
            r#"
            INSERT INTO cards
              (card_id, username, name, card_limit, features, transactions, current_spend)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE EXISTS (SELECT 1 FROM users WHERE username = $2)
            RETURNING card_id, name, card_limit, features, transactions, current_spend, added_at
            "#,
        )
        .bind(card_id)
        .bind(username)
        .bind(&card.name)
        .bind(card.limit)
        .bind(&card.features)
        .bind(Json(&card.transactions))
        .bind(card.current_spend)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("insert card"))?;

        let row = row.ok_or_else(|| AdvisoryError::UserNotFound(username.to_string()))?;
        debug!(username = %username, card_id = %card_id, "card row inserted");
        Self::card_from_row(&row)
    }

    async fn list_cards(&self, username: &str) -> Result<Vec<CreditCard>> {
        self.ensure_schema().await?;

        let rows = sqlx::query(
            r#"
            SELECT card_id, name, card_limit, features, transactions, current_spend, added_at
            FROM cards
            WHERE username = $1
            ORDER BY added_at ASC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list cards"))?;

        rows.iter().map(Self::card_from_row).collect()
    }

    async fn append_history(&self, username: &str, entry: NewConsultation) -> Result<ConsultationRecord> {
        self.ensure_schema().await?;

        // Timestamps stay strictly increasing per user even when NOW() repeats.
        let row = sqlx::query(
            r#"
            INSERT INTO consultations
              (consultation_id, username, query, snapshot, response, created_at)
            SELECT $1, $2, $3, $4, $5,
              GREATEST(
                NOW(),
                (SELECT MAX(created_at) + INTERVAL '1 microsecond'
                 FROM consultations WHERE username = $2)
              )
            WHERE EXISTS (SELECT 1 FROM users WHERE username = $2)
            RETURNING consultation_id, query, snapshot, response, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&entry.query)
        .bind(entry.snapshot.as_ref().map(Json))
        .bind(&entry.response)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("append consultation"))?;

        let row = row.ok_or_else(|| AdvisoryError::UserNotFound(username.to_string()))?;
        Self::consultation_from_row(&row)
    }

    async fn list_history(&self, username: &str) -> Result<Vec<ConsultationRecord>> {
        self.ensure_schema().await?;

        let rows = sqlx::query(
            r#"
            SELECT consultation_id, query, snapshot, response, created_at
            FROM consultations
            WHERE username = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list consultations"))?;

        rows.iter().map(Self::consultation_from_row).collect()
    }
}

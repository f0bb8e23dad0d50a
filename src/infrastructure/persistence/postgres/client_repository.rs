use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::invoicing::{
  Client, ClientName, errors::InvoicingError, ports::ClientRepository,
};

#[derive(Debug, FromRow)]
struct ClientRow {
  id: i64,
  name: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
  type Error = InvoicingError;

  fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
    let name = ClientName::new(row.name)?;

    Ok(Client {
      id: row.id,
      name,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresClientRepository {
  pool: PgPool,
}

impl PostgresClientRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
  async fn resolve(&self, name: &ClientName) -> Result<i64, InvoicingError> {
    let existing: Option<(i64,)> =
      sqlx::query_as("SELECT id FROM clients WHERE lower(name) = lower($1)")
        .bind(name.value())
        .fetch_optional(&self.pool)
        .await?;

    if let Some((id,)) = existing {
      return Ok(id);
    }

    // The unique index on lower(name) arbitrates concurrent first-sight
    // inserts; a losing insert returns no row and we take the winner.
    let inserted: Option<(i64,)> = sqlx::query_as(
      r#"
            INSERT INTO clients (name)
            VALUES ($1)
            ON CONFLICT (lower(name)) DO NOTHING
            RETURNING id
            "#,
    )
    .bind(name.value())
    .fetch_optional(&self.pool)
    .await?;

    if let Some((id,)) = inserted {
      return Ok(id);
    }

    let winner: Option<(i64,)> =
      sqlx::query_as("SELECT id FROM clients WHERE lower(name) = lower($1)")
        .bind(name.value())
        .fetch_optional(&self.pool)
        .await?;

    winner
      .map(|(id,)| id)
      .ok_or_else(|| InvoicingError::ResolveConflict(name.value().to_string()))
  }

  async fn list(&self) -> Result<Vec<Client>, InvoicingError> {
    let rows = sqlx::query_as::<_, ClientRow>(
      r#"
            SELECT id, name, created_at
            FROM clients
            ORDER BY name
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

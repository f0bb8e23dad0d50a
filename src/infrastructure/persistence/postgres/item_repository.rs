use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::domain::invoicing::{
  GstRate, Item, ItemName, errors::InvoicingError, ports::ItemRepository,
};

#[derive(Debug, FromRow)]
struct ItemRow {
  id: i64,
  name: String,
  gst_percentage: Decimal,
  created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
  type Error = InvoicingError;

  fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
    let name = ItemName::new(row.name)?;
    let gst_percentage = GstRate::new(row.gst_percentage)?;

    Ok(Item {
      id: row.id,
      name,
      gst_percentage,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresItemRepository {
  pool: PgPool,
}

impl PostgresItemRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
  async fn resolve(&self, name: &ItemName, gst_percentage: GstRate) -> Result<i64, InvoicingError> {
    // An existing item keeps the rate captured at first creation; the
    // supplied rate is only used when the row is new.
    let existing: Option<(i64,)> =
      sqlx::query_as("SELECT id FROM items WHERE lower(name) = lower($1)")
        .bind(name.value())
        .fetch_optional(&self.pool)
        .await?;

    if let Some((id,)) = existing {
      return Ok(id);
    }

    let inserted: Option<(i64,)> = sqlx::query_as(
      r#"
            INSERT INTO items (name, gst_percentage)
            VALUES ($1, $2)
            ON CONFLICT (lower(name)) DO NOTHING
            RETURNING id
            "#,
    )
    .bind(name.value())
    .bind(gst_percentage.value())
    .fetch_optional(&self.pool)
    .await?;

    if let Some((id,)) = inserted {
      return Ok(id);
    }

    let winner: Option<(i64,)> =
      sqlx::query_as("SELECT id FROM items WHERE lower(name) = lower($1)")
        .bind(name.value())
        .fetch_optional(&self.pool)
        .await?;

    winner
      .map(|(id,)| id)
      .ok_or_else(|| InvoicingError::ResolveConflict(name.value().to_string()))
  }

  async fn list(&self) -> Result<Vec<Item>, InvoicingError> {
    let rows = sqlx::query_as::<_, ItemRow>(
      r#"
            SELECT id, name, gst_percentage, created_at
            FROM items
            ORDER BY name
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

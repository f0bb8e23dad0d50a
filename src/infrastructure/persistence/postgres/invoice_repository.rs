use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use crate::domain::invoicing::{
  Amount, GstRate, Invoice, InvoiceLineItem, InvoiceNumber, InvoiceStatus, Quantity,
  errors::InvoicingError,
  ports::{
    CreatedInvoice, DashboardStats, InvoiceDetails, InvoiceListEntry, InvoiceRepository,
    LineItemDetails, NewInvoice,
  },
};

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: i64,
  invoice_number: String,
  client_id: i64,
  invoice_date: NaiveDate,
  subtotal: Decimal,
  total_gst: Decimal,
  grand_total: Decimal,
  status: String,
  created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoicingError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    let invoice_number = InvoiceNumber::new(row.invoice_number)?;
    let status = InvoiceStatus::from_str(&row.status)?;

    Ok(Invoice {
      id: row.id,
      invoice_number,
      client_id: row.client_id,
      invoice_date: row.invoice_date,
      subtotal: Amount::new(row.subtotal)?,
      total_gst: Amount::new(row.total_gst)?,
      grand_total: Amount::new(row.grand_total)?,
      status,
      created_at: row.created_at,
    })
  }
}

#[derive(Debug, FromRow)]
struct InvoiceListRow {
  id: i64,
  invoice_number: String,
  client_id: i64,
  client_name: String,
  invoice_date: NaiveDate,
  subtotal: Decimal,
  total_gst: Decimal,
  grand_total: Decimal,
  status: String,
  items_total: Decimal,
  created_at: DateTime<Utc>,
}

impl TryFrom<InvoiceListRow> for InvoiceListEntry {
  type Error = InvoicingError;

  fn try_from(row: InvoiceListRow) -> Result<Self, Self::Error> {
    let invoice = Invoice {
      id: row.id,
      invoice_number: InvoiceNumber::new(row.invoice_number)?,
      client_id: row.client_id,
      invoice_date: row.invoice_date,
      subtotal: Amount::new(row.subtotal)?,
      total_gst: Amount::new(row.total_gst)?,
      grand_total: Amount::new(row.grand_total)?,
      status: InvoiceStatus::from_str(&row.status)?,
      created_at: row.created_at,
    };

    Ok(InvoiceListEntry {
      invoice,
      client_name: row.client_name,
      items_total: row.items_total,
    })
  }
}

#[derive(Debug, FromRow)]
struct LineItemDetailRow {
  id: i64,
  invoice_id: i64,
  item_id: i64,
  item_name: String,
  quantity: Decimal,
  unit_price: Decimal,
  gst_percentage: Decimal,
  current_gst_percentage: Decimal,
  item_total: Decimal,
}

impl TryFrom<LineItemDetailRow> for LineItemDetails {
  type Error = InvoicingError;

  fn try_from(row: LineItemDetailRow) -> Result<Self, Self::Error> {
    let line = InvoiceLineItem {
      id: row.id,
      invoice_id: row.invoice_id,
      item_id: row.item_id,
      quantity: Quantity::new(row.quantity)?,
      unit_price: Amount::new(row.unit_price)?,
      gst_percentage: GstRate::new(row.gst_percentage)?,
      item_total: Amount::new(row.item_total)?,
    };

    Ok(LineItemDetails {
      line,
      item_name: row.item_name,
      current_gst_percentage: GstRate::new(row.current_gst_percentage)?,
    })
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
  statement_timeout_ms: u64,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool, statement_timeout_ms: u64) -> Self {
    Self {
      pool,
      statement_timeout_ms,
    }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, new_invoice: NewInvoice) -> Result<CreatedInvoice, InvoicingError> {
    let mut tx = self.pool.begin().await?;

    // Bound the whole unit so a storage stall cannot pin a worker.
    sqlx::query(&format!(
      "SET LOCAL statement_timeout = {}",
      self.statement_timeout_ms
    ))
    .execute(&mut *tx)
    .await?;

    // The counter row lock serializes concurrent writers, so numbers are
    // allocated strictly in commit order and roll back with the invoice.
    let (sequence,): (i64,) =
      sqlx::query_as("UPDATE invoice_number_seq SET value = value + 1 RETURNING value")
        .fetch_one(&mut *tx)
        .await?;

    let invoice_number = InvoiceNumber::from_sequence(sequence);

    let (invoice_id,): (i64,) = sqlx::query_as(
      r#"
            INSERT INTO invoices (
                invoice_number, client_id, invoice_date,
                subtotal, total_gst, grand_total, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING id
            "#,
    )
    .bind(invoice_number.value())
    .bind(new_invoice.client_id)
    .bind(new_invoice.invoice_date)
    .bind(new_invoice.totals.subtotal.value())
    .bind(new_invoice.totals.total_gst.value())
    .bind(new_invoice.totals.grand_total.value())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
      if let sqlx::Error::Database(db_err) = &e {
        // Unique-constraint backstop; the counter should make this
        // unreachable.
        if db_err.code().as_deref() == Some("23505") {
          return InvoicingError::InvoiceNumberConflict(invoice_number.value().to_string());
        }
      }
      InvoicingError::Database(e)
    })?;

    for line in &new_invoice.line_items {
      sqlx::query(
        r#"
                INSERT INTO invoice_items (
                    invoice_id, item_id, quantity, unit_price, gst_percentage, item_total
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
      )
      .bind(invoice_id)
      .bind(line.item_id)
      .bind(line.quantity.value())
      .bind(line.unit_price.value())
      .bind(line.gst_percentage.value())
      .bind(line.item_total.value())
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;

    Ok(CreatedInvoice {
      id: invoice_id,
      invoice_number,
      client_id: new_invoice.client_id,
      subtotal: new_invoice.totals.subtotal,
      total_gst: new_invoice.totals.total_gst,
      grand_total: new_invoice.totals.grand_total,
    })
  }

  async fn list_recent(&self, limit: i64) -> Result<Vec<InvoiceListEntry>, InvoicingError> {
    let rows = sqlx::query_as::<_, InvoiceListRow>(
      r#"
            SELECT i.id, i.invoice_number, i.client_id, c.name AS client_name,
                   i.invoice_date, i.subtotal, i.total_gst, i.grand_total, i.status,
                   COALESCE(SUM(ii.item_total), 0) AS items_total,
                   i.created_at
            FROM invoices i
            JOIN clients c ON c.id = i.client_id
            LEFT JOIN invoice_items ii ON ii.invoice_id = i.id
            GROUP BY i.id, c.name
            ORDER BY i.created_at DESC, i.id DESC
            LIMIT $1
            "#,
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }

  async fn find_with_items(&self, id: i64) -> Result<Option<InvoiceDetails>, InvoicingError> {
    let header = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, invoice_number, client_id, invoice_date,
                   subtotal, total_gst, grand_total, status, created_at
            FROM invoices
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    let Some(header) = header else {
      return Ok(None);
    };

    let (client_name,): (String,) = sqlx::query_as("SELECT name FROM clients WHERE id = $1")
      .bind(header.client_id)
      .fetch_one(&self.pool)
      .await?;

    let line_rows = sqlx::query_as::<_, LineItemDetailRow>(
      r#"
            SELECT ii.id, ii.invoice_id, ii.item_id, it.name AS item_name,
                   ii.quantity, ii.unit_price, ii.gst_percentage,
                   it.gst_percentage AS current_gst_percentage, ii.item_total
            FROM invoice_items ii
            JOIN items it ON it.id = ii.item_id
            WHERE ii.invoice_id = $1
            ORDER BY ii.id
            "#,
    )
    .bind(id)
    .fetch_all(&self.pool)
    .await?;

    let line_items = line_rows
      .into_iter()
      .map(|r| r.try_into())
      .collect::<Result<Vec<_>, InvoicingError>>()?;

    Ok(Some(InvoiceDetails {
      invoice: header.try_into()?,
      client_name,
      line_items,
    }))
  }

  async fn dashboard_stats(&self) -> Result<DashboardStats, InvoicingError> {
    let (total_invoices, total_revenue, pending_amount): (i64, Decimal, Decimal) = sqlx::query_as(
      r#"
            SELECT COUNT(*),
                   COALESCE(SUM(grand_total), 0),
                   COALESCE(SUM(grand_total) FILTER (WHERE status = 'pending'), 0)
            FROM invoices
            "#,
    )
    .fetch_one(&self.pool)
    .await?;

    Ok(DashboardStats {
      total_invoices,
      total_revenue,
      pending_amount,
    })
  }
}

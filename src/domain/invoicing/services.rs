use chrono::Utc;
use std::sync::Arc;

use super::entities::{Client, InvoiceTotals, Item, LineItemInput};
use super::errors::InvoicingError;
use super::ports::{
  ClientRepository, CreatedInvoice, DashboardStats, InvoiceDetails, InvoiceListEntry,
  InvoiceRepository, ItemRepository, NewInvoice, NewLineItem,
};
use super::value_objects::ClientName;

/// The listing is bounded to the most recent invoices.
pub const RECENT_INVOICE_LIMIT: i64 = 10;

pub struct InvoicingService {
  client_repo: Arc<dyn ClientRepository>,
  item_repo: Arc<dyn ItemRepository>,
  invoice_repo: Arc<dyn InvoiceRepository>,
}

impl InvoicingService {
  pub fn new(
    client_repo: Arc<dyn ClientRepository>,
    item_repo: Arc<dyn ItemRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
  ) -> Self {
    Self {
      client_repo,
      item_repo,
      invoice_repo,
    }
  }

  /// Creates an invoice for the named client.
  ///
  /// Client and item records are resolved (created on first sight) before
  /// the write; the header and all line items are then persisted as one
  /// atomic unit with a freshly allocated invoice number. Totals are sums
  /// of the supplied per-line figures, never recomputed from quantity and
  /// unit price.
  pub async fn create_invoice(
    &self,
    client_name: ClientName,
    line_items: Vec<LineItemInput>,
  ) -> Result<CreatedInvoice, InvoicingError> {
    if line_items.is_empty() {
      return Err(InvoicingError::NoLineItems);
    }

    let client_id = self.client_repo.resolve(&client_name).await?;

    let totals = InvoiceTotals::calculate(&line_items);

    let mut resolved_lines = Vec::with_capacity(line_items.len());
    for line in &line_items {
      let item_id = self
        .item_repo
        .resolve(&line.name, line.gst_percentage)
        .await?;
      resolved_lines.push(NewLineItem {
        item_id,
        quantity: line.quantity,
        unit_price: line.unit_price,
        gst_percentage: line.gst_percentage,
        item_total: line.item_total,
      });
    }

    let created = self
      .invoice_repo
      .create(NewInvoice {
        client_id,
        invoice_date: Utc::now().date_naive(),
        totals,
        line_items: resolved_lines,
      })
      .await?;

    tracing::info!(
      invoice_id = created.id,
      invoice_number = %created.invoice_number,
      client_id,
      "Invoice created"
    );

    Ok(created)
  }

  /// Recent invoices, newest first, at most ten.
  pub async fn list_invoices(&self) -> Result<Vec<InvoiceListEntry>, InvoicingError> {
    self.invoice_repo.list_recent(RECENT_INVOICE_LIMIT).await
  }

  /// Full invoice with nested line items; None when the id is unknown.
  pub async fn get_invoice(&self, id: i64) -> Result<Option<InvoiceDetails>, InvoicingError> {
    self.invoice_repo.find_with_items(id).await
  }

  pub async fn list_clients(&self) -> Result<Vec<Client>, InvoicingError> {
    self.client_repo.list().await
  }

  pub async fn list_items(&self) -> Result<Vec<Item>, InvoicingError> {
    self.item_repo.list().await
  }

  pub async fn dashboard_stats(&self) -> Result<DashboardStats, InvoicingError> {
    self.invoice_repo.dashboard_stats().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoicing::entities::Invoice;
  use crate::domain::invoicing::value_objects::{
    Amount, GstRate, InvoiceNumber, InvoiceStatus, ItemName, Quantity,
  };
  use async_trait::async_trait;
  use chrono::Utc;
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;
  use std::sync::Mutex;

  #[derive(Default)]
  struct InMemoryClientRepository {
    clients: Mutex<Vec<Client>>,
  }

  #[async_trait]
  impl ClientRepository for InMemoryClientRepository {
    async fn resolve(&self, name: &ClientName) -> Result<i64, InvoicingError> {
      let mut clients = self.clients.lock().unwrap();
      if let Some(existing) = clients
        .iter()
        .find(|c| c.name.comparison_key() == name.comparison_key())
      {
        return Ok(existing.id);
      }
      let id = clients.len() as i64 + 1;
      clients.push(Client {
        id,
        name: name.clone(),
        created_at: Utc::now(),
      });
      Ok(id)
    }

    async fn list(&self) -> Result<Vec<Client>, InvoicingError> {
      let mut clients = self.clients.lock().unwrap().clone();
      clients.sort_by(|a, b| a.name.value().cmp(b.name.value()));
      Ok(clients)
    }
  }

  #[derive(Default)]
  struct InMemoryItemRepository {
    items: Mutex<Vec<Item>>,
  }

  #[async_trait]
  impl ItemRepository for InMemoryItemRepository {
    async fn resolve(
      &self,
      name: &ItemName,
      gst_percentage: GstRate,
    ) -> Result<i64, InvoicingError> {
      let mut items = self.items.lock().unwrap();
      if let Some(existing) = items
        .iter()
        .find(|i| i.name.comparison_key() == name.comparison_key())
      {
        // Existing items keep the rate captured at first creation.
        return Ok(existing.id);
      }
      let id = items.len() as i64 + 1;
      items.push(Item {
        id,
        name: name.clone(),
        gst_percentage,
        created_at: Utc::now(),
      });
      Ok(id)
    }

    async fn list(&self) -> Result<Vec<Item>, InvoicingError> {
      let mut items = self.items.lock().unwrap().clone();
      items.sort_by(|a, b| a.name.value().cmp(b.name.value()));
      Ok(items)
    }
  }

  #[derive(Default)]
  struct InMemoryInvoiceRepository {
    invoices: Mutex<Vec<InvoiceListEntry>>,
  }

  #[async_trait]
  impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn create(&self, new_invoice: NewInvoice) -> Result<CreatedInvoice, InvoicingError> {
      let mut invoices = self.invoices.lock().unwrap();
      let id = invoices.len() as i64 + 1;
      let invoice_number = InvoiceNumber::from_sequence(id);
      let items_total = new_invoice
        .line_items
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc + l.item_total.value());

      invoices.push(InvoiceListEntry {
        invoice: Invoice {
          id,
          invoice_number: invoice_number.clone(),
          client_id: new_invoice.client_id,
          invoice_date: new_invoice.invoice_date,
          subtotal: new_invoice.totals.subtotal,
          total_gst: new_invoice.totals.total_gst,
          grand_total: new_invoice.totals.grand_total,
          status: InvoiceStatus::Pending,
          created_at: Utc::now(),
        },
        client_name: String::new(),
        items_total,
      });

      Ok(CreatedInvoice {
        id,
        invoice_number,
        client_id: new_invoice.client_id,
        subtotal: new_invoice.totals.subtotal,
        total_gst: new_invoice.totals.total_gst,
        grand_total: new_invoice.totals.grand_total,
      })
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<InvoiceListEntry>, InvoicingError> {
      let invoices = self.invoices.lock().unwrap();
      Ok(
        invoices
          .iter()
          .rev()
          .take(limit as usize)
          .cloned()
          .collect(),
      )
    }

    async fn find_with_items(&self, id: i64) -> Result<Option<InvoiceDetails>, InvoicingError> {
      let invoices = self.invoices.lock().unwrap();
      Ok(
        invoices
          .iter()
          .find(|entry| entry.invoice.id == id)
          .map(|entry| InvoiceDetails {
            invoice: entry.invoice.clone(),
            client_name: entry.client_name.clone(),
            line_items: Vec::new(),
          }),
      )
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, InvoicingError> {
      let invoices = self.invoices.lock().unwrap();
      let total_revenue = invoices
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc + e.invoice.grand_total.value());
      let pending_amount = invoices
        .iter()
        .filter(|e| e.invoice.status == InvoiceStatus::Pending)
        .fold(Decimal::ZERO, |acc, e| acc + e.invoice.grand_total.value());
      Ok(DashboardStats {
        total_invoices: invoices.len() as i64,
        total_revenue,
        pending_amount,
      })
    }
  }

  fn service() -> InvoicingService {
    InvoicingService::new(
      Arc::new(InMemoryClientRepository::default()),
      Arc::new(InMemoryItemRepository::default()),
      Arc::new(InMemoryInvoiceRepository::default()),
    )
  }

  fn widget_line() -> LineItemInput {
    LineItemInput {
      name: ItemName::new("Widget".to_string()).unwrap(),
      quantity: Quantity::new(dec!(2)).unwrap(),
      unit_price: Amount::new(dec!(10.0)).unwrap(),
      gst_percentage: GstRate::new(dec!(5)).unwrap(),
      item_total: Amount::new(dec!(20.0)).unwrap(),
      gst_amount: Amount::new(dec!(1.0)).unwrap(),
    }
  }

  #[tokio::test]
  async fn test_create_invoice_rejects_empty_line_items() {
    let service = service();
    let result = service
      .create_invoice(ClientName::new("Globex".to_string()).unwrap(), vec![])
      .await;
    assert!(matches!(result, Err(InvoicingError::NoLineItems)));
  }

  #[tokio::test]
  async fn test_create_invoice_globex_scenario() {
    let service = service();
    let created = service
      .create_invoice(
        ClientName::new("Globex".to_string()).unwrap(),
        vec![widget_line()],
      )
      .await
      .unwrap();

    assert_eq!(created.invoice_number.value(), "INV-0001");
    assert_eq!(created.subtotal.value(), dec!(20.0));
    assert_eq!(created.total_gst.value(), dec!(1.0));
    assert_eq!(created.grand_total.value(), dec!(21.0));
  }

  #[tokio::test]
  async fn test_invoice_numbers_strictly_increase() {
    let service = service();
    let first = service
      .create_invoice(
        ClientName::new("Globex".to_string()).unwrap(),
        vec![widget_line()],
      )
      .await
      .unwrap();
    let second = service
      .create_invoice(
        ClientName::new("Globex".to_string()).unwrap(),
        vec![widget_line()],
      )
      .await
      .unwrap();

    assert_eq!(first.invoice_number.value(), "INV-0001");
    assert_eq!(second.invoice_number.value(), "INV-0002");
  }

  #[tokio::test]
  async fn test_same_client_different_casing_resolves_once() {
    let service = service();
    let mut ids = Vec::new();
    for name in ["Acme", "ACME", "acme"] {
      let created = service
        .create_invoice(
          ClientName::new(name.to_string()).unwrap(),
          vec![widget_line()],
        )
        .await
        .unwrap();
      ids.push(created.client_id);
    }
    assert!(ids.iter().all(|&id| id == ids[0]));
    assert_eq!(service.list_clients().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_item_rate_kept_from_first_creation() {
    let service = service();
    let mut first_line = widget_line();
    first_line.gst_percentage = GstRate::new(dec!(5)).unwrap();
    service
      .create_invoice(
        ClientName::new("Globex".to_string()).unwrap(),
        vec![first_line],
      )
      .await
      .unwrap();

    let mut drifted = widget_line();
    drifted.gst_percentage = GstRate::new(dec!(12)).unwrap();
    service
      .create_invoice(
        ClientName::new("Globex".to_string()).unwrap(),
        vec![drifted],
      )
      .await
      .unwrap();

    let items = service.list_items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].gst_percentage.value(), dec!(5));
  }

  #[tokio::test]
  async fn test_get_invoice_unknown_id_is_none() {
    let service = service();
    assert!(service.get_invoice(999).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_list_invoices_bounded_to_ten_newest_first() {
    let service = service();
    for _ in 0..12 {
      service
        .create_invoice(
          ClientName::new("Globex".to_string()).unwrap(),
          vec![widget_line()],
        )
        .await
        .unwrap();
    }

    let listed = service.list_invoices().await.unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0].invoice.invoice_number.value(), "INV-0012");
    assert_eq!(listed[9].invoice.invoice_number.value(), "INV-0003");
  }

  #[tokio::test]
  async fn test_dashboard_stats_empty_store() {
    let service = service();
    let stats = service.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_invoices, 0);
    assert_eq!(stats.total_revenue, dec!(0));
    assert_eq!(stats.pending_amount, dec!(0));
  }

  #[tokio::test]
  async fn test_dashboard_stats_counts_pending() {
    let service = service();
    service
      .create_invoice(
        ClientName::new("Globex".to_string()).unwrap(),
        vec![widget_line()],
      )
      .await
      .unwrap();

    let stats = service.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_invoices, 1);
    assert_eq!(stats.total_revenue, dec!(21.0));
    assert_eq!(stats.pending_amount, dec!(21.0));
  }
}

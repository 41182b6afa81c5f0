use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::transport::types::{
    BillDto, DeleteAck, InvoiceDeleteDto, LoginRequest, SaveBillDto,
};

/// Transport collaborator for the billing backend.
///
/// Everything the console persists goes through this trait; the core never
/// talks HTTP directly, which keeps the reconciliation logic testable
/// against an in-memory implementation.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Fetches every stored bill with its invoice attachments.
    async fn list_bills(&self) -> Result<Vec<BillDto>, TransportError>;

    /// Creates or updates a bill and returns the authoritative stored
    /// record, including server-assigned invoice ids.
    async fn save_bill(&self, bill: &SaveBillDto) -> Result<BillDto, TransportError>;

    /// Deletes a bill together with the submitted invoice attachments.
    async fn delete_bill(&self, bill: &SaveBillDto) -> Result<(), TransportError>;

    /// Deletes a single stored invoice. The ack carries the backend's
    /// confirmation sentinel; a rejection must not remove anything locally.
    async fn delete_invoice(
        &self,
        invoice: &InvoiceDeleteDto,
    ) -> Result<DeleteAck, TransportError>;

    /// Deletes a batch of stored invoices in one call.
    async fn delete_all_invoices(
        &self,
        invoices: &[InvoiceDeleteDto],
    ) -> Result<DeleteAck, TransportError>;

    /// Authenticates and returns the backend's raw integer reply.
    async fn login(&self, credentials: &LoginRequest) -> Result<i64, TransportError>;
}

/// `BillingApi` implementation over REST/JSON with reqwest.
pub struct HttpBillingApi {
    client: Client,
    config: ApiConfig,
}

impl HttpBillingApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn check_status(
        operation: &'static str,
        response: &reqwest::Response,
    ) -> Result<(), TransportError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            error!("{} returned status {}", operation, status);
            Err(TransportError::Status {
                operation,
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl BillingApi for HttpBillingApi {
    async fn list_bills(&self) -> Result<Vec<BillDto>, TransportError> {
        let response = self.client.get(self.config.bills_url()).send().await?;
        Self::check_status("list_bills", &response)?;
        let bills = response.json::<Vec<BillDto>>().await?;
        info!("fetched {} bills", bills.len());
        Ok(bills)
    }

    async fn save_bill(&self, bill: &SaveBillDto) -> Result<BillDto, TransportError> {
        info!(
            "saving bill {} with {} invoice(s)",
            bill.bill_no,
            bill.invoice.len()
        );
        let response = self
            .client
            .post(self.config.save_bill_url())
            .json(bill)
            .send()
            .await?;
        Self::check_status("save_bill", &response)?;
        Ok(response.json::<BillDto>().await?)
    }

    async fn delete_bill(&self, bill: &SaveBillDto) -> Result<(), TransportError> {
        info!("deleting bill {}", bill.bill_no);
        let response = self
            .client
            .delete(self.config.delete_bill_url())
            .json(bill)
            .send()
            .await?;
        Self::check_status("delete_bill", &response)
    }

    async fn delete_invoice(
        &self,
        invoice: &InvoiceDeleteDto,
    ) -> Result<DeleteAck, TransportError> {
        let response = self
            .client
            .delete(self.config.delete_invoice_url())
            .json(invoice)
            .send()
            .await?;
        Self::check_status("delete_invoice", &response)?;
        let body = response.text().await?;
        Ok(DeleteAck::from_body(&body))
    }

    async fn delete_all_invoices(
        &self,
        invoices: &[InvoiceDeleteDto],
    ) -> Result<DeleteAck, TransportError> {
        info!("deleting {} invoices in one batch", invoices.len());
        let response = self
            .client
            .delete(self.config.delete_all_invoices_url())
            .json(&invoices)
            .send()
            .await?;
        Self::check_status("delete_all_invoices", &response)?;
        let body = response.text().await?;
        Ok(DeleteAck::from_body(&body))
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<i64, TransportError> {
        let response = self
            .client
            .post(self.config.login_url())
            .json(credentials)
            .send()
            .await?;
        Self::check_status("login", &response)?;
        Ok(response.json::<i64>().await?)
    }
}

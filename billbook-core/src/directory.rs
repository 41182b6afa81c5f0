use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::BillingError;
use crate::filter::{self, DateRange};
use crate::models::bill::Bill;
use crate::reconcile::merge::merge_save_response;
use crate::transport::client::BillingApi;
use crate::transport::types::{BillDto, BillRef, SaveBillDto, SaveInvoiceDto};

/// The client-side bill list backing the console's main table.
pub struct BillDirectory {
    api: Arc<dyn BillingApi>,
    bills: Vec<Bill>,
}

impl BillDirectory {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self {
            api,
            bills: Vec::new(),
        }
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn find(&self, bill_no: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.bill_no == bill_no)
    }

    /// Reloads the list from the backend, replacing local state.
    pub async fn refresh(&mut self) -> Result<usize, BillingError> {
        let dtos = self.api.list_bills().await?;
        self.bills = dtos.iter().map(Bill::from_wire).collect();
        info!("loaded {} bills", self.bills.len());
        Ok(self.bills.len())
    }

    /// Bills whose date falls inside the inclusive range.
    pub fn filtered(&self, range: &DateRange) -> Vec<&Bill> {
        filter::filter_by_date(&self.bills, range)
    }

    /// Sum of the parseable bill amounts.
    pub fn total_amount(&self) -> Decimal {
        filter::total_amount(&self.bills)
    }

    /// Folds a save response into the list, keyed by `bill_no`.
    pub fn absorb_save(&mut self, server: &BillDto) -> Bill {
        merge_save_response(&mut self.bills, server)
    }

    /// Deletes a bill and every invoice attachment it carries.
    ///
    /// The local row is removed only after the backend accepts; an
    /// unknown `bill_no` is a no-op returning false.
    pub async fn delete(&mut self, bill_no: &str) -> Result<bool, BillingError> {
        let Some(bill) = self.find(bill_no) else {
            return Ok(false);
        };

        let payload = delete_payload(bill);
        self.api.delete_bill(&payload).await?;
        self.bills.retain(|b| b.bill_no != bill_no);
        info!("deleted bill {}", bill_no);
        Ok(true)
    }
}

/// Delete payload carrying the bill plus every currently known invoice
/// attachment, so the backend removes the stored documents with the row.
fn delete_payload(bill: &Bill) -> SaveBillDto {
    let invoice = bill
        .attachments
        .iter()
        .map(|attachment| SaveInvoiceDto {
            invoice_id: attachment.server_id(),
            bill: BillRef {
                bill_no: bill.bill_no.clone(),
            },
            invoice_name: attachment.display_name.clone(),
            invoice_file_name: attachment.source_file_name.clone(),
            invoice_file_type: attachment.extension(),
            invoice_file: attachment.encoded_body(),
            invoice_type: attachment.kind.wire_code().to_string(),
        })
        .collect();

    SaveBillDto {
        bill_no: bill.bill_no.clone(),
        bill_date: bill.date.clone(),
        party_name: bill.party_name.clone(),
        invoice,
        tax: bill.tax.clone(),
        amount: bill.amount.clone(),
    }
}

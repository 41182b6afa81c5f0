use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::transport::client::BillingApi;
use crate::transport::types::{
    BillDto, DeleteAck, InvoiceDeleteDto, InvoiceDto, LoginRequest, SaveBillDto,
};

/// In-memory `BillingApi` for state-transition tests.
///
/// Records every call, keeps a per-bill invoice store so save responses
/// return the full authoritative invoice list, and can be scripted to
/// reject (non-success sentinel) or fail (transport error) per operation.
#[derive(Default)]
pub struct MockBillingApi {
    pub calls: Mutex<Vec<String>>,
    pub bills: Mutex<Vec<BillDto>>,
    stored: Mutex<HashMap<String, Vec<InvoiceDto>>>,
    reject: Mutex<HashSet<&'static str>>,
    fail: Mutex<HashSet<&'static str>>,
    login_reply: Mutex<i64>,
    next_invoice_id: AtomicI64,
}

impl MockBillingApi {
    pub fn new() -> Self {
        Self {
            next_invoice_id: AtomicI64::new(101),
            login_reply: Mutex::new(1),
            ..Self::default()
        }
    }

    /// Makes `operation` answer with the rejection sentinel.
    pub fn reject_op(&self, operation: &'static str) {
        self.reject.lock().unwrap().insert(operation);
    }

    /// Makes `operation` fail with a transport error.
    pub fn fail_op(&self, operation: &'static str) {
        self.fail.lock().unwrap().insert(operation);
    }

    pub fn set_login_reply(&self, code: i64) {
        *self.login_reply.lock().unwrap() = code;
    }

    /// Seeds the stored invoice list for a bill.
    pub fn seed_invoices(&self, bill_no: &str, invoices: Vec<InvoiceDto>) {
        self.stored
            .lock()
            .unwrap()
            .insert(bill_no.to_string(), invoices);
    }

    pub fn seed_bill(&self, bill: BillDto) {
        self.bills.lock().unwrap().push(bill);
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: &'static str) -> Result<(), TransportError> {
        if self.fail.lock().unwrap().contains(operation) {
            return Err(TransportError::Status {
                operation,
                status: 500,
            });
        }
        Ok(())
    }

    fn rejected(&self, operation: &'static str) -> bool {
        self.reject.lock().unwrap().contains(operation)
    }
}

#[async_trait]
impl BillingApi for MockBillingApi {
    async fn list_bills(&self) -> Result<Vec<BillDto>, TransportError> {
        self.record("list_bills".to_string());
        self.check("list_bills")?;
        Ok(self.bills.lock().unwrap().clone())
    }

    async fn save_bill(&self, bill: &SaveBillDto) -> Result<BillDto, TransportError> {
        self.record(format!("save_bill:{}", bill.bill_no));
        self.check("save_bill")?;

        let mut stored = self.stored.lock().unwrap();
        let invoices = stored.entry(bill.bill_no.clone()).or_default();
        for item in &bill.invoice {
            invoices.push(InvoiceDto {
                invoice_id: Some(self.next_invoice_id.fetch_add(1, Ordering::SeqCst)),
                invoice_name: item.invoice_name.clone(),
                invoice_file_name: item.invoice_file_name.clone(),
                invoice_file_type: item.invoice_file_type.clone(),
                invoice_file: item.invoice_file.clone(),
                invoice_type: Some(item.invoice_type.clone()),
            });
        }

        Ok(BillDto {
            bill_no: bill.bill_no.clone(),
            bill_date: Some(bill.bill_date.clone()),
            date: None,
            party_name: bill.party_name.clone(),
            tax: bill.tax.clone(),
            amount: bill.amount.clone(),
            invoice: invoices.clone(),
        })
    }

    async fn delete_bill(&self, bill: &SaveBillDto) -> Result<(), TransportError> {
        self.record(format!("delete_bill:{}", bill.bill_no));
        self.check("delete_bill")?;
        self.stored.lock().unwrap().remove(&bill.bill_no);
        self.bills
            .lock()
            .unwrap()
            .retain(|b| b.bill_no != bill.bill_no);
        Ok(())
    }

    async fn delete_invoice(
        &self,
        invoice: &InvoiceDeleteDto,
    ) -> Result<DeleteAck, TransportError> {
        self.record(format!("delete_invoice:{}", invoice.invoice_id));
        self.check("delete_invoice")?;
        if self.rejected("delete_invoice") {
            return Ok(DeleteAck::Rejected("0".to_string()));
        }
        for invoices in self.stored.lock().unwrap().values_mut() {
            invoices.retain(|inv| inv.invoice_id != Some(invoice.invoice_id));
        }
        Ok(DeleteAck::Confirmed)
    }

    async fn delete_all_invoices(
        &self,
        invoices: &[InvoiceDeleteDto],
    ) -> Result<DeleteAck, TransportError> {
        let ids: Vec<i64> = invoices.iter().map(|inv| inv.invoice_id).collect();
        self.record(format!("delete_all_invoices:{:?}", ids));
        self.check("delete_all_invoices")?;
        if self.rejected("delete_all_invoices") {
            return Ok(DeleteAck::Rejected("0".to_string()));
        }
        for stored in self.stored.lock().unwrap().values_mut() {
            stored.retain(|inv| match inv.invoice_id {
                Some(id) => !ids.contains(&id),
                None => true,
            });
        }
        Ok(DeleteAck::Confirmed)
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<i64, TransportError> {
        self.record(format!("login:{}", credentials.user_name));
        self.check("login")?;
        Ok(*self.login_reply.lock().unwrap())
    }
}

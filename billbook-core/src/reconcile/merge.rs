use tracing::info;

use crate::models::bill::Bill;
use crate::transport::types::BillDto;

/// Folds a save response back into the client-side bill list.
///
/// The server response is canonical: scalar fields are taken from it and
/// the attachment set is rebuilt from its invoice list, every entry
/// Persisted under its server-assigned id (this is the only path on
/// which a pending entry becomes persisted). The row is matched by
/// `bill_no`, updated in place when it exists and appended otherwise, so
/// applying the same response twice yields identical state.
pub fn merge_save_response(bills: &mut Vec<Bill>, server: &BillDto) -> Bill {
    let merged = Bill::from_wire(server);
    match bills.iter().position(|b| b.bill_no == merged.bill_no) {
        Some(index) => {
            info!("merged save response into existing bill {}", merged.bill_no);
            bills[index] = merged.clone();
        }
        None => {
            info!("appended new bill {} from save response", merged.bill_no);
            bills.push(merged.clone());
        }
    }
    merged
}

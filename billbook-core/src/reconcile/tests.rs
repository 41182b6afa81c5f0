#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::directory::BillDirectory;
    use crate::error::{BillingError, EditStateError};
    use crate::models::attachment::InvoiceKind;
    use crate::models::bill::Bill;
    use crate::reconcile::editor::BillEditor;
    use crate::reconcile::state::EditState;
    use crate::transport::mock::MockBillingApi;
    use crate::transport::types::{BillDto, InvoiceDto};

    fn stored_invoice(id: i64, file_name: &str) -> InvoiceDto {
        InvoiceDto {
            invoice_id: Some(id),
            invoice_name: file_name.to_string(),
            invoice_file_name: file_name.to_string(),
            invoice_file_type: ".pdf".to_string(),
            invoice_file: "JVBERi0xLjQ=".to_string(),
            invoice_type: Some("S".to_string()),
        }
    }

    fn bill_dto(bill_no: &str, invoices: Vec<InvoiceDto>) -> BillDto {
        BillDto {
            bill_no: bill_no.to_string(),
            bill_date: Some("2024-01-01".to_string()),
            date: None,
            party_name: "Acme".to_string(),
            tax: "10".to_string(),
            amount: "100".to_string(),
            invoice: invoices,
        }
    }

    fn fill_draft(editor: &mut BillEditor, bill_no: &str) {
        let draft = editor.draft_mut();
        draft.bill_no = bill_no.to_string();
        draft.party_name = "Acme".to_string();
        draft.date = "2024-01-01".to_string();
        draft.tax = "10".to_string();
        draft.amount = "100".to_string();
    }

    /// A new bill with one locally selected file goes through the full
    /// save flow: the pending entry is submitted, the response re-enters
    /// the directory as a persisted attachment, and the surface closes.
    #[tokio::test]
    async fn test_save_new_bill_persists_pending_attachment() {
        let api = Arc::new(MockBillingApi::new());
        let mut directory = BillDirectory::new(api.clone());
        let mut editor = BillEditor::open_new(api.clone());

        fill_draft(&mut editor, "B1");
        editor
            .add_attachment("", "invoice.pdf", InvoiceKind::Sales, b"%PDF-1.4".to_vec())
            .unwrap();

        let merged = editor.save(&mut directory).await.unwrap();
        assert_eq!(editor.state(), EditState::Idle);
        assert_eq!(merged.bill_no, "B1");
        assert_eq!(merged.attachments.len(), 1);

        let stored = merged.attachments.get(0).unwrap();
        assert!(stored.is_persisted());
        assert_eq!(stored.server_id(), Some(101));
        assert_eq!(stored.source_file_name, "invoice.pdf");

        assert_eq!(directory.bills().len(), 1);
        assert_eq!(api.recorded_calls(), vec!["save_bill:B1"]);
    }

    /// Applying the same save response twice must not duplicate rows or
    /// attachments.
    #[tokio::test]
    async fn test_absorbing_same_response_twice_is_idempotent() {
        let api = Arc::new(MockBillingApi::new());
        let mut directory = BillDirectory::new(api.clone());

        let response = bill_dto("B1", vec![stored_invoice(7, "a.pdf")]);
        directory.absorb_save(&response);
        let once: Vec<Bill> = directory.bills().to_vec();

        directory.absorb_save(&response);
        assert_eq!(directory.bills(), &once[..]);
    }

    /// A draft with an empty amount aborts locally: the error names the
    /// field, nothing goes over the wire and the surface stays open.
    #[tokio::test]
    async fn test_validation_failure_makes_no_transport_call() {
        let api = Arc::new(MockBillingApi::new());
        let mut directory = BillDirectory::new(api.clone());
        let mut editor = BillEditor::open_new(api.clone());

        fill_draft(&mut editor, "B1");
        editor.draft_mut().amount = String::new();

        let err = editor.save(&mut directory).await.unwrap_err();
        match err {
            BillingError::Validation(validation) => assert!(validation.names("amount")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(editor.state(), EditState::Editing);
        assert!(api.recorded_calls().is_empty());
        assert!(directory.bills().is_empty());
    }

    /// Save is only invokable from an open surface.
    #[tokio::test]
    async fn test_save_after_close_is_rejected() {
        let api = Arc::new(MockBillingApi::new());
        let mut directory = BillDirectory::new(api.clone());
        let mut editor = BillEditor::open_new(api.clone());
        fill_draft(&mut editor, "B1");
        editor.close();

        let err = editor.save(&mut directory).await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::State(EditStateError::NotEditing)
        ));
        assert!(api.recorded_calls().is_empty());
    }

    /// Replacing a stored file queues its old server id; the save flow
    /// flushes that deletion before submitting the replacement.
    #[tokio::test]
    async fn test_replaced_file_is_deleted_then_resubmitted() {
        let api = Arc::new(MockBillingApi::new());
        api.seed_invoices("B1", vec![stored_invoice(7, "old.pdf")]);

        let bill = Bill::from_wire(&bill_dto("B1", vec![stored_invoice(7, "old.pdf")]));
        let mut directory = BillDirectory::new(api.clone());
        directory.absorb_save(&bill_dto("B1", vec![stored_invoice(7, "old.pdf")]));

        let mut editor = BillEditor::open(api.clone(), &bill);
        editor
            .replace_attachment_file(0, b"%PDF-1.5".to_vec(), "new.pdf")
            .unwrap();

        let merged = editor.save(&mut directory).await.unwrap();
        assert_eq!(
            api.recorded_calls(),
            vec!["delete_all_invoices:[7]", "save_bill:B1"]
        );
        assert_eq!(merged.attachments.len(), 1);
        let stored = merged.attachments.get(0).unwrap();
        assert_eq!(stored.source_file_name, "new.pdf");
        assert_eq!(stored.server_id(), Some(101));
        assert!(merged.attachments.pending_delete_ids().is_empty());
    }

    /// A rejected queued deletion aborts the whole save before the bill
    /// payload is sent; local state stays put for a manual retry.
    #[tokio::test]
    async fn test_rejected_queued_delete_aborts_save() {
        let api = Arc::new(MockBillingApi::new());
        api.reject_op("delete_all_invoices");
        api.seed_invoices("B1", vec![stored_invoice(7, "old.pdf")]);

        let bill = Bill::from_wire(&bill_dto("B1", vec![stored_invoice(7, "old.pdf")]));
        let mut directory = BillDirectory::new(api.clone());
        let mut editor = BillEditor::open(api.clone(), &bill);
        editor
            .replace_attachment_file(0, b"%PDF-1.5".to_vec(), "new.pdf")
            .unwrap();

        assert!(editor.save(&mut directory).await.is_err());
        assert_eq!(editor.state(), EditState::Editing);
        assert_eq!(editor.attachments().pending_delete_ids(), vec![7]);
        assert!(directory.bills().is_empty());
        assert_eq!(api.recorded_calls(), vec!["delete_all_invoices:[7]"]);
    }

    /// A failed transport save returns the surface to Editing with the
    /// draft and attachments intact for a manual retry.
    #[tokio::test]
    async fn test_failed_save_returns_to_editing() {
        let api = Arc::new(MockBillingApi::new());
        api.fail_op("save_bill");
        let mut directory = BillDirectory::new(api.clone());
        let mut editor = BillEditor::open_new(api.clone());

        fill_draft(&mut editor, "B1");
        editor
            .add_attachment("", "invoice.pdf", InvoiceKind::Sales, b"%PDF-1.4".to_vec())
            .unwrap();

        assert!(editor.save(&mut directory).await.is_err());
        assert_eq!(editor.state(), EditState::Editing);
        assert_eq!(editor.attachments().len(), 1);
        assert!(editor.attachments().get(0).unwrap().is_pending());
        assert!(directory.bills().is_empty());
    }

    /// Closing the surface discards unsaved local state.
    #[tokio::test]
    async fn test_close_discards_unsaved_attachments() {
        let api = Arc::new(MockBillingApi::new());
        let mut editor = BillEditor::open_new(api.clone());
        fill_draft(&mut editor, "B1");
        editor
            .add_attachment("", "invoice.pdf", InvoiceKind::Sales, b"%PDF-1.4".to_vec())
            .unwrap();

        editor.close();
        assert_eq!(editor.state(), EditState::Idle);
        assert!(editor.attachments().is_empty());
        assert!(api.recorded_calls().is_empty());

        let err = editor.remove_all_attachments().await.unwrap_err();
        assert!(matches!(
            err,
            BillingError::State(EditStateError::NotEditing)
        ));
    }
}

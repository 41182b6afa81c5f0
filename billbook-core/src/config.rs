use dotenv::dotenv;

/// Backend endpoint configuration.
///
/// Paths are configuration, not contract: defaults match the known
/// backend deployment and every one can be overridden.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the billing backend, e.g. `http://10.55.2.48:8081`.
    pub base_url: String,
    pub bills_path: String,
    pub save_bill_path: String,
    pub delete_bill_path: String,
    pub delete_invoice_path: String,
    pub delete_all_invoices_path: String,
    pub login_path: String,
}

impl ApiConfig {
    /// Configuration with default route names for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bills_path: "/Bills".to_string(),
            save_bill_path: "/addBill".to_string(),
            delete_bill_path: "/deleteBill".to_string(),
            delete_invoice_path: "/deleteinvoice".to_string(),
            delete_all_invoices_path: "/deleteallinvoice".to_string(),
            login_path: "/Login".to_string(),
        }
    }

    /// Loads configuration from the environment.
    ///
    /// `BILLBOOK_API_URL` is required; a `.env` file is honored when
    /// present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let base_url = std::env::var("BILLBOOK_API_URL")
            .map_err(|_| anyhow::anyhow!("BILLBOOK_API_URL is not set"))?;

        Ok(Self::new(base_url))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn bills_url(&self) -> String {
        self.endpoint(&self.bills_path)
    }

    pub fn save_bill_url(&self) -> String {
        self.endpoint(&self.save_bill_path)
    }

    pub fn delete_bill_url(&self) -> String {
        self.endpoint(&self.delete_bill_path)
    }

    pub fn delete_invoice_url(&self) -> String {
        self.endpoint(&self.delete_invoice_path)
    }

    pub fn delete_all_invoices_url(&self) -> String {
        self.endpoint(&self.delete_all_invoices_path)
    }

    pub fn login_url(&self) -> String {
        self.endpoint(&self.login_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ApiConfig::new("http://localhost:8081/");
        assert_eq!(config.bills_url(), "http://localhost:8081/Bills");
        assert_eq!(config.login_url(), "http://localhost:8081/Login");
    }

    #[test]
    fn test_default_routes() {
        let config = ApiConfig::new("http://localhost:8081");
        assert_eq!(config.save_bill_url(), "http://localhost:8081/addBill");
        assert_eq!(
            config.delete_all_invoices_url(),
            "http://localhost:8081/deleteallinvoice"
        );
    }
}

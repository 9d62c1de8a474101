use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY: &str = "US";

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

/// Billing context submitted alongside a card.
///
/// `customer_id` is optional on input; the tokenizer assigns one when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub customer_id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub billing_address: BillingAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_defaults() {
        let json = r#"{
            "email": "jane@example.com",
            "billing_address": {
                "street": "1 Main St", "city": "Springfield", "state": "IL", "zip_code": "62701"
            }
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.customer_id, None);
        assert_eq!(customer.phone, None);
        assert_eq!(customer.billing_address.country, "US");
    }
}

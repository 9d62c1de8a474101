//! The six engine operations as named, schema-described tools.

use crate::application::engine::PaymentEngine;
use crate::domain::card::CardDetails;
use crate::domain::customer::{BillingAddress, Customer, DEFAULT_COUNTRY};
use crate::domain::token::TokenId;
use crate::domain::transaction::{PaymentRequest, TransactionId};
use crate::error::PaymentError;
use crate::interfaces::dto::{
    CustomerTransactions, PaymentResponse, TokenizeRequest, TokenizeResponse,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

pub const TOKENIZE_PAYMENT_CARD: &str = "tokenize_payment_card";
pub const PROCESS_PAYMENT: &str = "process_payment";
pub const GET_TRANSACTION: &str = "get_transaction";
pub const GET_CUSTOMER_TRANSACTIONS: &str = "get_customer_transactions";
pub const REFUND_TRANSACTION: &str = "refund_transaction";
pub const GET_TOKEN_INFO: &str = "get_token_info";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Engine(#[from] PaymentError),
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: TOKENIZE_PAYMENT_CARD,
            description: "Tokenize a payment card for future transactions. Returns a token that expires in 24 hours.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "card_number": { "type": "string", "description": "Card number (13-19 digits, spaces and dashes allowed)" },
                    "card_holder": { "type": "string", "description": "Cardholder name" },
                    "expiry_month": { "type": "integer", "description": "Expiry month (1-12)" },
                    "expiry_year": { "type": "integer", "description": "Expiry year (e.g. 2030)" },
                    "cvv": { "type": "string", "description": "Card CVV (3-4 digits)" },
                    "customer_id": { "type": "string", "description": "Optional customer ID; generated when absent" },
                    "customer_email": { "type": "string", "description": "Customer email address" },
                    "customer_phone": { "type": "string", "description": "Optional customer phone number" },
                    "billing_street": { "type": "string", "description": "Billing street address" },
                    "billing_city": { "type": "string", "description": "Billing city" },
                    "billing_state": { "type": "string", "description": "Billing state" },
                    "billing_zip": { "type": "string", "description": "Billing ZIP code" },
                    "billing_country": { "type": "string", "description": "Billing country (default: US)" }
                },
                "required": [
                    "card_number", "card_holder", "expiry_month", "expiry_year", "cvv",
                    "customer_email", "billing_street", "billing_city", "billing_state", "billing_zip"
                ]
            }),
        },
        ToolDefinition {
            name: PROCESS_PAYMENT,
            description: "Process a payment using a tokenized card. Special test amounts: 0.01 (insufficient funds), 0.02 (card declined), 0.03 (pending), 10000+ (manual review).",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "token": { "type": "string", "description": "Payment token from tokenization" },
                    "amount": { "type": "number", "description": "Payment amount (must be positive)" },
                    "currency": { "type": "string", "description": "Currency code (default: USD)" },
                    "customer_id": { "type": "string", "description": "Customer identifier" },
                    "description": { "type": "string", "description": "Optional payment description" }
                },
                "required": ["token", "amount", "customer_id"]
            }),
        },
        ToolDefinition {
            name: GET_TRANSACTION,
            description: "Retrieve details of a specific transaction by its ID.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "transaction_id": { "type": "string", "description": "Transaction ID to retrieve" }
                },
                "required": ["transaction_id"]
            }),
        },
        ToolDefinition {
            name: GET_CUSTOMER_TRANSACTIONS,
            description: "Get all transactions for a specific customer, oldest first.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "customer_id": { "type": "string", "description": "Customer ID to query transactions for" }
                },
                "required": ["customer_id"]
            }),
        },
        ToolDefinition {
            name: REFUND_TRANSACTION,
            description: "Refund a successful transaction. Only successful transactions can be refunded, and only once.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "transaction_id": { "type": "string", "description": "Transaction ID to refund" }
                },
                "required": ["transaction_id"]
            }),
        },
        ToolDefinition {
            name: GET_TOKEN_INFO,
            description: "Get information about a payment token, including its validity and expiration.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "token": { "type": "string", "description": "Payment token to query" }
                },
                "required": ["token"]
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct TokenizeCardArgs {
    card_number: String,
    card_holder: String,
    expiry_month: u32,
    expiry_year: i32,
    cvv: String,
    #[serde(default)]
    customer_id: Option<String>,
    customer_email: String,
    #[serde(default)]
    customer_phone: Option<String>,
    billing_street: String,
    billing_city: String,
    billing_state: String,
    billing_zip: String,
    #[serde(default)]
    billing_country: Option<String>,
}

impl TokenizeCardArgs {
    fn into_parts(self) -> (CardDetails, Customer) {
        let card = CardDetails {
            card_number: self.card_number,
            card_holder: self.card_holder,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            cvv: self.cvv,
        };
        let customer = Customer {
            customer_id: self.customer_id,
            email: self.customer_email,
            phone: self.customer_phone,
            billing_address: BillingAddress {
                street: self.billing_street,
                city: self.billing_city,
                state: self.billing_state,
                zip_code: self.billing_zip,
                country: self
                    .billing_country
                    .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            },
        };
        (card, customer)
    }
}

/// `tokenize_payment_card` takes either flat fields or `{card, customer}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenizeArgs {
    Nested(TokenizeRequest),
    Flat(TokenizeCardArgs),
}

impl TokenizeArgs {
    fn into_parts(self) -> (CardDetails, Customer) {
        match self {
            Self::Nested(request) => (request.card, request.customer),
            Self::Flat(args) => args.into_parts(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TransactionIdArgs {
    transaction_id: TransactionId,
}

#[derive(Debug, Deserialize)]
struct CustomerIdArgs {
    customer_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenArgs {
    token: TokenId,
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, PaymentError> {
    Ok(serde_json::from_value(arguments)?)
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, PaymentError> {
    serde_json::to_value(value).map_err(|e| PaymentError::InternalError(Box::new(e)))
}

/// Runs tool `name` against `engine` and returns its JSON result.
pub async fn call(engine: &PaymentEngine, name: &str, arguments: Value) -> Result<Value, ToolError> {
    let result = match name {
        TOKENIZE_PAYMENT_CARD => {
            let (card, customer) = parse_args::<TokenizeArgs>(arguments)?.into_parts();
            let record = engine.tokenize(card, customer).await?;
            to_value(&TokenizeResponse::from(&record))?
        }
        PROCESS_PAYMENT => {
            let request: PaymentRequest = parse_args(arguments)?;
            let tx = engine.process_payment(request).await?;
            to_value(&PaymentResponse::from(&tx))?
        }
        GET_TRANSACTION => {
            let args: TransactionIdArgs = parse_args(arguments)?;
            to_value(&engine.get_transaction(&args.transaction_id).await?)?
        }
        GET_CUSTOMER_TRANSACTIONS => {
            let args: CustomerIdArgs = parse_args(arguments)?;
            let transactions = engine.get_customer_transactions(&args.customer_id).await?;
            to_value(&CustomerTransactions::new(args.customer_id, transactions))?
        }
        REFUND_TRANSACTION => {
            let args: TransactionIdArgs = parse_args(arguments)?;
            to_value(&engine.refund_transaction(&args.transaction_id).await?)?
        }
        GET_TOKEN_INFO => {
            let args: TokenArgs = parse_args(arguments)?;
            to_value(&engine.get_token_info(&args.token).await?)?
        }
        other => return Err(ToolError::UnknownTool(other.to_string())),
    };
    Ok(result)
}

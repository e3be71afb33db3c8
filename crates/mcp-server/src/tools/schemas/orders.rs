use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sp_api_protocol::ExactJson;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersRequest {
    /// Marketplaces to search (required unless nextToken is set)
    #[schemars(description = "Marketplace IDs to search, e.g. ATVPDKIKX0DER. Required unless nextToken is provided.")]
    pub marketplace_ids: Option<Vec<String>>,

    #[schemars(description = "Orders created after this ISO 8601 date-time")]
    pub created_after: Option<String>,

    #[schemars(description = "Orders created before this ISO 8601 date-time")]
    pub created_before: Option<String>,

    #[schemars(description = "Orders last updated after this ISO 8601 date-time")]
    pub last_updated_after: Option<String>,

    #[schemars(description = "Orders last updated before this ISO 8601 date-time")]
    pub last_updated_before: Option<String>,

    #[schemars(description = "Order status filter, e.g. Pending, Unshipped, Shipped, Canceled")]
    pub order_statuses: Option<Vec<String>>,

    #[schemars(description = "Fulfillment channel filter: AFN or MFN")]
    pub fulfillment_channels: Option<Vec<String>>,

    #[schemars(description = "Payment method filter: COD, CVS, Other")]
    pub payment_methods: Option<Vec<String>>,

    #[schemars(description = "Buyer email address")]
    pub buyer_email: Option<String>,

    #[schemars(description = "Seller-defined order identifier")]
    pub seller_order_id: Option<String>,

    /// Values outside 1-100 are ignored
    #[schemars(description = "Page size between 1 and 100; other values are ignored")]
    pub max_results_per_page: Option<i64>,

    #[schemars(description = "Easy Ship shipment status filter")]
    pub easy_ship_shipment_statuses: Option<Vec<String>>,

    #[schemars(description = "Specific Amazon order IDs (up to 50)")]
    pub amazon_order_ids: Option<Vec<String>>,

    /// Continuation token; excludes every other filter
    #[schemars(description = "Token from a previous response. When set, omit all other filters.")]
    pub next_token: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[schemars(description = "Amazon order ID, e.g. 902-3159896-1390916")]
    pub amazon_order_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemsRequest {
    #[schemars(description = "Amazon order ID, e.g. 902-3159896-1390916")]
    pub amazon_order_id: Option<String>,

    #[schemars(description = "Token from a previous response to fetch the next page")]
    pub next_token: Option<String>,

    /// Walk every page instead of returning one
    #[schemars(description = "Fetch every page and return all items at once. Cannot be combined with nextToken.")]
    pub fetch_all: Option<bool>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersResult {
    pub orders: Vec<ExactJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_before: Option<String>,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotal {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetOrderResult {
    pub amazon_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_total: Option<OrderTotal>,
    pub item_count: usize,
    pub order: ExactJson,
    pub order_items: Vec<ExactJson>,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddressResult {
    pub amazon_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Value>,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderBuyerInfoResult {
    pub amazon_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_info: Option<ExactJson>,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemsResult {
    pub amazon_order_id: String,
    pub items: Vec<ExactJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub retrieved_at: String,
}

/// Same shape as [`OrderItemsResult`], items carry buyer customization data.
#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemsBuyerInfoResult {
    pub amazon_order_id: String,
    pub items: Vec<ExactJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub retrieved_at: String,
}

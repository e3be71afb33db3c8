use rmcp::schemars;
use serde::{Deserialize, Serialize};
use sp_api_protocol::ExactJson;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummariesRequest {
    #[schemars(description = "Granularity type, currently always 'Marketplace'")]
    pub granularity_type: Option<String>,

    #[schemars(description = "Granularity ID, the marketplace ID for Marketplace granularity")]
    pub granularity_id: Option<String>,

    #[schemars(description = "Marketplace IDs the summaries apply to")]
    pub marketplace_ids: Option<Vec<String>>,

    #[schemars(description = "Only summaries changed after this ISO 8601 date-time")]
    pub start_date_time: Option<String>,

    #[schemars(description = "Seller SKUs to include (up to 50)")]
    pub seller_skus: Option<Vec<String>>,

    #[schemars(description = "Token from a previous response to fetch the next page")]
    pub next_token: Option<String>,

    #[schemars(description = "Include inventory details (fulfillable, inbound, reserved quantities)")]
    pub details: Option<bool>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummariesResult {
    /// As reported by the upstream payload; absent when it sent none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity_id: Option<String>,
    pub inventory_summaries: Vec<ExactJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub retrieved_at: String,
}

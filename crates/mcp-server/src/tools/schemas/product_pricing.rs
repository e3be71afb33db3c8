use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
pub enum ItemCondition {
    New,
    Used,
    Collectible,
    Refurbished,
    Club,
}

impl ItemCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Used => "Used",
            Self::Collectible => "Collectible",
            Self::Refurbished => "Refurbished",
            Self::Club => "Club",
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[schemars(description = "Marketplace ID, e.g. ATVPDKIKX0DER")]
    pub marketplace_id: Option<String>,

    #[schemars(description = "Identifier kind: 'Asin' or 'Sku'")]
    pub item_type: Option<String>,

    #[schemars(description = "ASINs to price (required when itemType is Asin, max 20)")]
    pub asins: Option<Vec<String>>,

    #[schemars(description = "Seller SKUs to price (required when itemType is Sku, max 20)")]
    pub skus: Option<Vec<String>>,

    #[schemars(description = "Filter offers by item condition")]
    pub item_condition: Option<ItemCondition>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitivePricingRequest {
    #[schemars(description = "Marketplace ID, e.g. ATVPDKIKX0DER")]
    pub marketplace_id: Option<String>,

    #[schemars(description = "Identifier kind: 'Asin' or 'Sku'")]
    pub item_type: Option<String>,

    #[schemars(description = "ASINs to price (required when itemType is Asin, max 20)")]
    pub asins: Option<Vec<String>>,

    #[schemars(description = "Seller SKUs to price (required when itemType is Sku, max 20)")]
    pub skus: Option<Vec<String>>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub operation: String,
    pub marketplace_id: String,
    pub item_type: String,
    pub item_count: usize,
    pub price_points: Vec<Value>,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitivePricingResult {
    pub operation: String,
    pub marketplace_id: String,
    pub item_type: String,
    pub item_count: usize,
    pub competitive_items: Vec<Value>,
    pub retrieved_at: String,
}

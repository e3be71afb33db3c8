use serde_json::Value;
use sp_api_client::{Engine, Operation};
use sp_api_protocol::ExactJson;

use super::outcome::{Summarize, ToolFailure};
use super::schemas::product_pricing::{
    CompetitivePricingRequest, CompetitivePricingResult, ItemCondition, PricingRequest,
    PricingResult,
};
use super::util::{required, retrieved_at, trimmed_list};

pub(crate) const GET_PRICING: &str = "productPricing.getPricing";
pub(crate) const GET_COMPETITIVE_PRICING: &str = "productPricing.getCompetitivePricing";

const MAX_IDENTIFIERS: usize = 20;

/// Object keys that may hold the item list when the payload is not a bare array.
const ITEM_KEYS: [&str; 3] = ["offers", "pricing", "competitivePricing"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemType {
    Asin,
    Sku,
}

impl ItemType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asin => "Asin",
            Self::Sku => "Sku",
        }
    }
}

#[derive(Debug)]
struct PricingQuery {
    marketplace_id: String,
    item_type: ItemType,
    identifiers: Vec<String>,
}

impl PricingQuery {
    fn operation(
        &self,
        tool: &'static str,
        path: &str,
        condition: Option<ItemCondition>,
    ) -> Operation {
        let list_key = match self.item_type {
            ItemType::Asin => "Asins",
            ItemType::Sku => "Skus",
        };
        Operation::get(tool, ["products", "pricing", "v0", path])
            .param("MarketplaceId", self.marketplace_id.as_str())
            .param("ItemType", self.item_type.as_str())
            .param_list(list_key, &self.identifiers)
            .param_opt("ItemCondition", condition.map(ItemCondition::as_str))
    }
}

fn pricing_query(
    marketplace_id: Option<&str>,
    item_type: Option<&str>,
    asins: Option<&[String]>,
    skus: Option<&[String]>,
) -> Result<PricingQuery, String> {
    let marketplace_id = required(marketplace_id, "marketplaceId")?;
    let item_type = match required(item_type, "itemType")?.as_str() {
        "Asin" => ItemType::Asin,
        "Sku" => ItemType::Sku,
        _ => return Err("itemType must be 'Asin' or 'Sku'".to_string()),
    };

    let asins = trimmed_list(asins);
    let skus = trimmed_list(skus);
    match item_type {
        ItemType::Asin if asins.is_empty() => {
            return Err("asins list is required when itemType is 'Asin'".to_string())
        }
        ItemType::Sku if skus.is_empty() => {
            return Err("skus list is required when itemType is 'Sku'".to_string())
        }
        _ => {}
    }
    if asins.len() > MAX_IDENTIFIERS {
        return Err(format!("maximum {MAX_IDENTIFIERS} ASINs allowed"));
    }
    if skus.len() > MAX_IDENTIFIERS {
        return Err(format!("maximum {MAX_IDENTIFIERS} SKUs allowed"));
    }

    Ok(PricingQuery {
        marketplace_id,
        item_type,
        identifiers: match item_type {
            ItemType::Asin => asins,
            ItemType::Sku => skus,
        },
    })
}

/// Flatten a pricing payload into its item list.
fn pricing_items(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ITEM_KEYS {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return items;
                    }
                }
            }
            vec![Value::Object(map)]
        }
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

pub(crate) async fn get_pricing(
    engine: &Engine,
    request: PricingRequest,
) -> Result<PricingResult, ToolFailure> {
    engine.ensure_ready()?;
    let query = pricing_query(
        request.marketplace_id.as_deref(),
        request.item_type.as_deref(),
        request.asins.as_deref(),
        request.skus.as_deref(),
    )?;
    let op = query.operation(GET_PRICING, "price", request.item_condition);

    let payload = engine.fetch::<ExactJson>(&op).await?.payload;
    let price_points = pricing_items(payload.into_value());
    Ok(PricingResult {
        operation: "GetPricing".to_string(),
        marketplace_id: query.marketplace_id,
        item_type: query.item_type.as_str().to_string(),
        item_count: price_points.len(),
        price_points,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for PricingResult {
    fn summary(&self) -> String {
        format!("Product pricing retrieved for {} items", self.item_count)
    }
}

pub(crate) async fn get_competitive_pricing(
    engine: &Engine,
    request: CompetitivePricingRequest,
) -> Result<CompetitivePricingResult, ToolFailure> {
    engine.ensure_ready()?;
    let query = pricing_query(
        request.marketplace_id.as_deref(),
        request.item_type.as_deref(),
        request.asins.as_deref(),
        request.skus.as_deref(),
    )?;
    let op = query.operation(GET_COMPETITIVE_PRICING, "competitivePrice", None);

    let payload = engine.fetch::<ExactJson>(&op).await?.payload;
    let competitive_items = pricing_items(payload.into_value());
    Ok(CompetitivePricingResult {
        operation: "GetCompetitivePricing".to_string(),
        marketplace_id: query.marketplace_id,
        item_type: query.item_type.as_str().to_string(),
        item_count: competitive_items.len(),
        competitive_items,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for CompetitivePricingResult {
    fn summary(&self) -> String {
        format!("Competitive pricing retrieved for {} items", self.item_count)
    }
}

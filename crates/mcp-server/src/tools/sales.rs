use sp_api_client::{Engine, Operation};

use super::outcome::{Summarize, ToolFailure};
use super::schemas::sales::{OrderMetricsInterval, OrderMetricsRequest, OrderMetricsResult};
use super::util::{required, retrieved_at, trimmed, trimmed_list};

pub(crate) const GET_ORDER_METRICS: &str = "sales.getOrderMetrics";

/// Validated arguments, echoed back in the result.
#[derive(Debug)]
struct MetricsQuery {
    marketplace_ids: Vec<String>,
    interval: String,
    granularity: String,
    granularity_time_zone: Option<String>,
    buyer_type: Option<String>,
    fulfillment_network: Option<String>,
    first_day_of_week: Option<String>,
    asin: Option<String>,
    sku: Option<String>,
}

fn metrics_query(request: &OrderMetricsRequest) -> Result<MetricsQuery, String> {
    let marketplace_ids = trimmed_list(request.marketplace_ids.as_deref());
    if marketplace_ids.is_empty() {
        return Err("marketplaceIds is required".to_string());
    }
    let interval = required(request.interval.as_deref(), "interval")?;
    let granularity = request
        .granularity
        .ok_or_else(|| "granularity is required".to_string())?;

    let asin = trimmed(request.asin.as_deref());
    let sku = trimmed(request.sku.as_deref());
    if asin.is_some() && sku.is_some() {
        return Err("provide either asin or sku, not both".to_string());
    }

    let granularity_time_zone = trimmed(request.granularity_time_zone.as_deref());
    if granularity.needs_time_zone() && granularity_time_zone.is_none() {
        return Err(
            "granularityTimeZone is required when granularity is Day or greater".to_string(),
        );
    }

    Ok(MetricsQuery {
        marketplace_ids,
        interval,
        granularity: granularity.as_str().to_string(),
        granularity_time_zone,
        buyer_type: request.buyer_type.map(|v| v.as_str().to_string()),
        fulfillment_network: trimmed(request.fulfillment_network.as_deref()),
        first_day_of_week: request.first_day_of_week.map(|v| v.as_str().to_string()),
        asin,
        sku,
    })
}

fn metrics_operation(query: &MetricsQuery) -> Operation {
    Operation::get(GET_ORDER_METRICS, ["sales", "v1", "orderMetrics"])
        .param_list("marketplaceIds", &query.marketplace_ids)
        .param("interval", query.interval.as_str())
        .param("granularity", query.granularity.as_str())
        .param_opt("granularityTimeZone", query.granularity_time_zone.clone())
        .param_opt("buyerType", query.buyer_type.clone())
        .param_opt("fulfillmentNetwork", query.fulfillment_network.clone())
        .param_opt("firstDayOfWeek", query.first_day_of_week.clone())
        .param_opt("asin", query.asin.clone())
        .param_opt("sku", query.sku.clone())
}

pub(crate) async fn get_order_metrics(
    engine: &Engine,
    request: OrderMetricsRequest,
) -> Result<OrderMetricsResult, ToolFailure> {
    engine.ensure_ready()?;
    let query = metrics_query(&request)?;
    let op = metrics_operation(&query);

    let metrics = engine
        .fetch::<Vec<OrderMetricsInterval>>(&op)
        .await?
        .payload;
    Ok(OrderMetricsResult {
        marketplace_ids: query.marketplace_ids,
        interval: query.interval,
        granularity: query.granularity,
        granularity_time_zone: query.granularity_time_zone,
        buyer_type: query.buyer_type,
        fulfillment_network: query.fulfillment_network,
        first_day_of_week: query.first_day_of_week,
        asin: query.asin,
        sku: query.sku,
        metrics,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for OrderMetricsResult {
    fn summary(&self) -> String {
        let mut summary = format!(
            "Retrieved {} {} interval(s) for {}",
            self.metrics.len(),
            self.granularity.to_lowercase(),
            self.marketplace_ids.join(", ")
        );
        if !self.interval.is_empty() {
            summary.push_str(&format!(" within {}", self.interval));
        }
        if let Some(buyer_type) = self.buyer_type.as_deref() {
            summary.push_str(&format!(" (buyer type: {buyer_type})"));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn request(value: Value) -> OrderMetricsRequest {
        serde_json::from_value(value).expect("request")
    }

    fn rejection(value: Value) -> String {
        metrics_query(&request(value)).expect_err("invalid")
    }

    #[test]
    fn validation_runs_in_declared_order() {
        assert_eq!(rejection(json!({})), "marketplaceIds is required");
        assert_eq!(
            rejection(json!({"marketplaceIds": ["ATVPDKIKX0DER"]})),
            "interval is required"
        );
        assert_eq!(
            rejection(json!({"marketplaceIds": ["ATVPDKIKX0DER"], "interval": "x--y"})),
            "granularity is required"
        );
        assert_eq!(
            rejection(json!({
                "marketplaceIds": ["ATVPDKIKX0DER"],
                "interval": "x--y",
                "granularity": "Day",
                "asin": "B000",
                "sku": "SKU-1"
            })),
            "provide either asin or sku, not both"
        );
        assert_eq!(
            rejection(json!({
                "marketplaceIds": ["ATVPDKIKX0DER"],
                "interval": "x--y",
                "granularity": "Week"
            })),
            "granularityTimeZone is required when granularity is Day or greater"
        );
    }

    #[test]
    fn hour_and_total_do_not_need_a_time_zone() {
        for granularity in ["Hour", "Total"] {
            let query = metrics_query(&request(json!({
                "marketplaceIds": [" ATVPDKIKX0DER "],
                "interval": "2024-01-01T00:00:00Z--2024-01-02T00:00:00Z",
                "granularity": granularity,
                "buyerType": "B2B"
            })))
            .expect("valid");
            let op = metrics_operation(&query);
            assert_eq!(op.query_value("marketplaceIds"), Some("ATVPDKIKX0DER"));
            assert_eq!(op.query_value("granularity"), Some(granularity));
            assert_eq!(op.query_value("granularityTimeZone"), None);
            assert_eq!(op.query_value("buyerType"), Some("B2B"));
        }
    }

    #[test]
    fn summary_lists_marketplaces_and_context() {
        let result = OrderMetricsResult {
            marketplace_ids: vec!["ATVPDKIKX0DER".to_string(), "A2EUQ1WTGCTBG2".to_string()],
            interval: "a--b".to_string(),
            granularity: "Day".to_string(),
            granularity_time_zone: Some("US/Pacific".to_string()),
            buyer_type: Some("B2C".to_string()),
            fulfillment_network: None,
            first_day_of_week: None,
            asin: None,
            sku: None,
            metrics: vec![OrderMetricsInterval::default(); 3],
            retrieved_at: String::new(),
        };
        assert_eq!(
            result.summary(),
            "Retrieved 3 day interval(s) for ATVPDKIKX0DER, A2EUQ1WTGCTBG2 within a--b (buyer type: B2C)"
        );
    }
}

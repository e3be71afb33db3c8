use serde::Deserialize;
use sp_api_client::{Engine, Fetched, Operation};
use sp_api_protocol::ExactJson;

use super::outcome::{with_more, Summarize, ToolFailure};
use super::schemas::fba_inventory::{InventorySummariesRequest, InventorySummariesResult};
use super::util::{required, retrieved_at, rfc3339, trimmed, trimmed_list};

pub(crate) const GET_INVENTORY_SUMMARIES: &str = "fbaInventory.getInventorySummaries";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummariesPayload {
    #[serde(default)]
    granularity: Granularity,
    #[serde(default)]
    inventory_summaries: Vec<ExactJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Granularity {
    granularity_type: Option<String>,
    granularity_id: Option<String>,
}

pub(crate) fn summaries_operation(request: &InventorySummariesRequest) -> Result<Operation, String> {
    let granularity_type = required(request.granularity_type.as_deref(), "granularityType")?;
    let start_date_time = rfc3339(request.start_date_time.as_deref(), "startDateTime")?;

    Ok(
        Operation::get(GET_INVENTORY_SUMMARIES, ["fba", "inventory", "v1", "summaries"])
            .param_opt("details", request.details.map(|d| d.to_string()))
            .param("granularityType", granularity_type)
            .param_opt("granularityId", trimmed(request.granularity_id.as_deref()))
            .param_opt("startDateTime", start_date_time)
            .param_list(
                "sellerSkus",
                &trimmed_list(request.seller_skus.as_deref()),
            )
            .param_opt("nextToken", trimmed(request.next_token.as_deref()))
            .param_list(
                "marketplaceIds",
                &trimmed_list(request.marketplace_ids.as_deref()),
            ),
    )
}

pub(crate) async fn get_inventory_summaries(
    engine: &Engine,
    request: InventorySummariesRequest,
) -> Result<InventorySummariesResult, ToolFailure> {
    engine.ensure_ready()?;
    let op = summaries_operation(&request)?;

    let Fetched {
        payload,
        next_token,
    } = engine.fetch::<SummariesPayload>(&op).await?;
    Ok(InventorySummariesResult {
        granularity_type: trimmed(payload.granularity.granularity_type.as_deref()),
        granularity_id: trimmed(payload.granularity.granularity_id.as_deref()),
        inventory_summaries: payload.inventory_summaries,
        next_token,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for InventorySummariesResult {
    fn summary(&self) -> String {
        let mut summary = with_more(
            format!(
                "Retrieved {} inventory summaries",
                self.inventory_summaries.len()
            ),
            self.next_token.as_deref(),
        );
        if let Some(granularity) = self.granularity_type.as_deref() {
            summary.push_str(&format!(" (granularity: {granularity})"));
        }
        summary
    }
}

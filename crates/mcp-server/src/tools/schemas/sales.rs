use rmcp::schemars;
use serde::{Deserialize, Serialize};
use sp_api_protocol::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Year,
    Total,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::Total => "Total",
        }
    }

    /// Day and coarser buckets need a time zone to be well defined.
    pub fn needs_time_zone(self) -> bool {
        !matches!(self, Self::Hour | Self::Total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum BuyerType {
    B2B,
    B2C,
    All,
}

impl BuyerType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::B2B => "B2B",
            Self::B2C => "B2C",
            Self::All => "All",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum FirstDayOfWeek {
    Monday,
    Sunday,
}

impl FirstDayOfWeek {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Sunday => "Sunday",
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetricsRequest {
    #[schemars(description = "Marketplace IDs to aggregate, e.g. ATVPDKIKX0DER")]
    pub marketplace_ids: Option<Vec<String>>,

    /// `start--end` ISO 8601 interval
    #[schemars(description = "ISO 8601 interval 'start--end', e.g. 2024-01-01T00:00:00-08:00--2024-01-08T00:00:00-08:00")]
    pub interval: Option<String>,

    #[schemars(description = "Bucket size for the metrics")]
    pub granularity: Option<Granularity>,

    #[schemars(description = "IANA time zone, required unless granularity is Hour or Total")]
    pub granularity_time_zone: Option<String>,

    #[schemars(description = "Restrict to business or consumer buyers")]
    pub buyer_type: Option<BuyerType>,

    #[schemars(description = "Fulfillment network filter: MFN or AFN")]
    pub fulfillment_network: Option<String>,

    #[schemars(description = "First day of the week for Week granularity")]
    pub first_day_of_week: Option<FirstDayOfWeek>,

    #[schemars(description = "Restrict to one ASIN (not together with sku)")]
    pub asin: Option<String>,

    #[schemars(description = "Restrict to one seller SKU (not together with asin)")]
    pub sku: Option<String>,
}

/// One interval bucket as returned upstream, amounts kept exact.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetricsInterval {
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub unit_count: i64,
    #[serde(default)]
    pub order_item_count: i64,
    #[serde(default)]
    pub order_count: i64,
    #[serde(default)]
    pub average_unit_price: Money,
    #[serde(default)]
    pub total_sales: Money,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetricsResult {
    pub marketplace_ids: Vec<String>,
    pub interval: String,
    pub granularity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_day_of_week: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub metrics: Vec<OrderMetricsInterval>,
    pub retrieved_at: String,
}

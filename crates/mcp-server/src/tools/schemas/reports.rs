use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReportsRequest {
    #[schemars(description = "Report types to include, e.g. GET_FLAT_FILE_OPEN_LISTINGS_DATA")]
    pub report_types: Option<Vec<String>>,

    #[schemars(description = "Processing statuses: CANCELLED, DONE, FATAL, IN_PROGRESS, IN_QUEUE")]
    pub processing_statuses: Option<Vec<String>>,

    #[schemars(description = "Marketplace IDs the reports apply to")]
    pub marketplace_ids: Option<Vec<String>>,

    /// Values outside 1-100 are ignored
    #[schemars(description = "Page size between 1 and 100; other values are ignored")]
    pub page_size: Option<i64>,

    #[schemars(description = "Only reports created at or after this ISO 8601 date-time")]
    pub created_since: Option<String>,

    #[schemars(description = "Only reports created before this ISO 8601 date-time")]
    pub created_until: Option<String>,

    #[schemars(description = "Token from a previous response. When set, omit all other filters.")]
    pub next_token: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[schemars(description = "Report type to create, e.g. GET_MERCHANT_LISTINGS_ALL_DATA")]
    pub report_type: Option<String>,

    #[schemars(description = "Marketplace IDs the report covers")]
    pub marketplace_ids: Option<Vec<String>>,

    #[schemars(description = "Start of the reporting window (ISO 8601)")]
    pub data_start_time: Option<String>,

    #[schemars(description = "End of the reporting window (ISO 8601)")]
    pub data_end_time: Option<String>,

    #[schemars(description = "Report-type specific options as string key/value pairs")]
    pub report_options: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReportRequest {
    #[schemars(description = "Report ID returned by reports.createReport")]
    pub report_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReportDocumentRequest {
    #[schemars(description = "Report document ID from a DONE report")]
    pub report_document_id: Option<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReportsResult {
    pub reports: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub report_type: String,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReportResult {
    pub report_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_document_id: Option<String>,
    pub report: Value,
    pub retrieved_at: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetReportDocumentResult {
    pub report_document_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_details: Option<Value>,
    pub retrieved_at: String,
}

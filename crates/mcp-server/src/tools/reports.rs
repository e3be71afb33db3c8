//! Reports API 2020-09-04: list, create, poll and download.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use sp_api_client::{CallFailure, Engine, Fetched, Operation};
use sp_api_protocol::continuation;

use super::outcome::{with_more, Summarize, ToolFailure};
use super::schemas::reports::{
    CreateReportRequest, CreateReportResult, GetReportDocumentRequest, GetReportDocumentResult,
    GetReportRequest, GetReportResult, GetReportsRequest, GetReportsResult,
};
use super::util::{required, retrieved_at, rfc3339, rfc3339_lenient, trimmed, trimmed_list, within};

pub(crate) const GET_REPORTS: &str = "reports.getReports";
pub(crate) const CREATE_REPORT: &str = "reports.createReport";
pub(crate) const GET_REPORT: &str = "reports.getReport";
pub(crate) const GET_REPORT_DOCUMENT: &str = "reports.getReportDocument";

const API_ROOT: [&str; 2] = ["reports", "2020-09-04"];
const PAGE_SIZE: (i64, i64) = (1, 100);

/// `getReports` payloads come either as the bare list or wrapped with a token.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReportsPayload {
    List(Vec<Value>),
    Page {
        #[serde(default)]
        reports: Vec<Value>,
        #[serde(default, rename = "nextToken")]
        next_token: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedReport {
    #[serde(default)]
    report_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportHeader {
    #[serde(default)]
    report_id: String,
    report_type: Option<String>,
    processing_status: Option<String>,
    created_time: Option<String>,
    processing_start_time: Option<String>,
    processing_end_time: Option<String>,
    report_document_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportDocument {
    #[serde(default)]
    report_document_id: String,
    #[serde(default)]
    url: String,
    compression_algorithm: Option<String>,
    encryption_details: Option<Value>,
}

fn path(tail: &[&str]) -> Vec<String> {
    API_ROOT
        .iter()
        .chain(tail.iter())
        .map(ToString::to_string)
        .collect()
}

fn has_report_filters(request: &GetReportsRequest) -> bool {
    [
        &request.report_types,
        &request.processing_statuses,
        &request.marketplace_ids,
    ]
    .iter()
    .any(|values| !trimmed_list(values.as_deref()).is_empty())
        || trimmed(request.created_since.as_deref()).is_some()
        || trimmed(request.created_until.as_deref()).is_some()
        || request.page_size.is_some()
}

pub(crate) fn get_reports_operation(request: &GetReportsRequest) -> Result<Operation, String> {
    if let Some(token) = trimmed(request.next_token.as_deref()) {
        if has_report_filters(request) {
            return Err("when nextToken is provided, omit additional filters".to_string());
        }
        return Ok(Operation::get(GET_REPORTS, path(&["reports"])).param("nextToken", token));
    }

    let (min, max) = PAGE_SIZE;
    Ok(Operation::get(GET_REPORTS, path(&["reports"]))
        .param_list(
            "reportTypes",
            &trimmed_list(request.report_types.as_deref()),
        )
        .param_list(
            "processingStatuses",
            &trimmed_list(request.processing_statuses.as_deref()),
        )
        .param_list(
            "marketplaceIds",
            &trimmed_list(request.marketplace_ids.as_deref()),
        )
        .param_opt(
            "pageSize",
            within(request.page_size, min, max).map(|n| n.to_string()),
        )
        .param_opt(
            "createdSince",
            rfc3339_lenient(request.created_since.as_deref()),
        )
        .param_opt(
            "createdUntil",
            rfc3339_lenient(request.created_until.as_deref()),
        ))
}

pub(crate) async fn get_reports(
    engine: &Engine,
    request: GetReportsRequest,
) -> Result<GetReportsResult, ToolFailure> {
    engine.ensure_ready()?;
    let op = get_reports_operation(&request)?;

    let Fetched {
        payload,
        next_token,
    } = engine.fetch::<ReportsPayload>(&op).await?;
    let (reports, next_token) = match payload {
        ReportsPayload::List(reports) => (reports, next_token),
        ReportsPayload::Page {
            reports,
            next_token: page_token,
        } => (reports, continuation(page_token).or(next_token)),
    };
    Ok(GetReportsResult {
        reports,
        next_token,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for GetReportsResult {
    fn summary(&self) -> String {
        with_more(
            format!("Retrieved {} reports", self.reports.len()),
            self.next_token.as_deref(),
        )
    }
}

pub(crate) fn create_report_operation(request: &CreateReportRequest) -> Result<Operation, String> {
    let report_type = required(request.report_type.as_deref(), "reportType")?;
    let marketplace_ids = trimmed_list(request.marketplace_ids.as_deref());
    if marketplace_ids.is_empty() {
        return Err("marketplaceIds is required".to_string());
    }
    let data_start_time = rfc3339(request.data_start_time.as_deref(), "dataStartTime")?;
    let data_end_time = rfc3339(request.data_end_time.as_deref(), "dataEndTime")?;

    let mut body = Map::new();
    body.insert("reportType".to_string(), json!(report_type));
    body.insert("marketplaceIds".to_string(), json!(marketplace_ids));
    if let Some(start) = data_start_time {
        body.insert("dataStartTime".to_string(), json!(start));
    }
    if let Some(end) = data_end_time {
        body.insert("dataEndTime".to_string(), json!(end));
    }
    if let Some(options) = request.report_options.as_ref().filter(|o| !o.is_empty()) {
        body.insert("reportOptions".to_string(), json!(options));
    }

    Ok(Operation::post(
        CREATE_REPORT,
        path(&["reports"]),
        Value::Object(body),
    ))
}

pub(crate) async fn create_report(
    engine: &Engine,
    request: CreateReportRequest,
) -> Result<CreateReportResult, ToolFailure> {
    engine.ensure_ready()?;
    let op = create_report_operation(&request)?;
    let report_type = op
        .body
        .as_ref()
        .and_then(|body| body.get("reportType"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let created = engine.fetch::<CreatedReport>(&op).await?.payload;
    Ok(CreateReportResult {
        report_id: trimmed(Some(created.report_id.as_str())),
        report_type,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for CreateReportResult {
    fn summary(&self) -> String {
        match self.report_id.as_deref() {
            Some(report_id) => format!(
                "Created {} report with ID {report_id}",
                self.report_type
            ),
            None => format!("Created {} report (ID unknown)", self.report_type),
        }
    }
}

pub(crate) async fn get_report(
    engine: &Engine,
    request: GetReportRequest,
) -> Result<GetReportResult, ToolFailure> {
    engine.ensure_ready()?;
    let report_id = required(request.report_id.as_deref(), "reportId")?;

    let op = Operation::get(GET_REPORT, path(&["reports", report_id.as_str()]));
    let report = engine.fetch::<Value>(&op).await?.payload;
    let header = ReportHeader::deserialize(&report)
        .map_err(|err| CallFailure::decode(GET_REPORT, err.into()))?;

    Ok(GetReportResult {
        report_id: trimmed(Some(header.report_id.as_str())).unwrap_or(report_id),
        report_type: trimmed(header.report_type.as_deref()),
        processing_status: trimmed(header.processing_status.as_deref()),
        created_time: trimmed(header.created_time.as_deref()),
        processing_start_time: trimmed(header.processing_start_time.as_deref()),
        processing_end_time: trimmed(header.processing_end_time.as_deref()),
        report_document_id: trimmed(header.report_document_id.as_deref()),
        report,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for GetReportResult {
    fn summary(&self) -> String {
        let mut summary = format!("Report {}", self.report_id);
        if let Some(report_type) = self.report_type.as_deref() {
            summary.push_str(&format!(" ({report_type})"));
        }
        if let Some(status) = self.processing_status.as_deref() {
            summary.push_str(&format!(" - Status: {status}"));
        }
        summary
    }
}

pub(crate) async fn get_report_document(
    engine: &Engine,
    request: GetReportDocumentRequest,
) -> Result<GetReportDocumentResult, ToolFailure> {
    engine.ensure_ready()?;
    let document_id = required(request.report_document_id.as_deref(), "reportDocumentId")?;

    let op = Operation::get(GET_REPORT_DOCUMENT, path(&["documents", document_id.as_str()]));
    let document = engine.fetch::<ReportDocument>(&op).await?.payload;
    Ok(GetReportDocumentResult {
        report_document_id: trimmed(Some(document.report_document_id.as_str()))
            .unwrap_or(document_id),
        url: document.url.trim().to_string(),
        compression_algorithm: trimmed(document.compression_algorithm.as_deref()),
        encryption_details: document.encryption_details.filter(|v| !v.is_null()),
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for GetReportDocumentResult {
    fn summary(&self) -> String {
        format!(
            "Retrieved download URL for report document {}",
            self.report_document_id
        )
    }
}

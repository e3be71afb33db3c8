//! Markdown documentation resources, one per Selling Partner API category.
//!
//! Each entry is served at `amazon-sp-api://<category>` as `text/markdown`. The bodies are
//! orientation notes until they are replaced with links to Amazon's reference material.

use rmcp::model::{AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents};
use rmcp::ErrorData as McpError;

pub(crate) const URI_SCHEME: &str = "amazon-sp-api://";
pub(crate) const MARKDOWN: &str = "text/markdown";

#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentationEntry {
    pub category: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub notes: &'static [&'static str],
}

pub(crate) const DOCUMENTATION: &[DocumentationEntry] = &[
    DocumentationEntry {
        category: "overview",
        title: "Selling Partner API Overview",
        summary: "Orientation material for the Selling Partner API and how this MCP server organizes functionality.",
        notes: &[
            "Link to the official SP-API developer documentation landing page.",
            "Describe how SP-API authorization, throttling, and marketplace routing impact every tool.",
            "Clarify environment variables and deployment recommendations for the MCP server.",
        ],
    },
    DocumentationEntry {
        category: "authentication",
        title: "Authentication",
        summary: "Guidance for Login with Amazon (LWA) and role-based authorization required by SP-API.",
        notes: &[
            "Outline the LWA authorization code flow and exchange for refresh tokens.",
            "Document role-based permissions, IAM policy requirements, and AWS STS integration.",
            "Highlight token rotation schedules and secure storage strategies.",
        ],
    },
    DocumentationEntry {
        category: "catalog",
        title: "Catalog",
        summary: "Documentation for querying Amazon's product catalog and normalizing item attributes.",
        notes: &[
            "List supported catalog endpoints and how to select versions (e.g. 2022-04-01).",
            "Explain model coverage for ASINs, seller SKUs, and keyword search.",
            "Call out pagination, locale, and attribute expansion patterns.",
        ],
    },
    DocumentationEntry {
        category: "orders",
        title: "Orders",
        summary: "Process order retrieval, acknowledgements, and fulfillment workflows.",
        notes: &[
            "Cover the Orders API v0/v2 capabilities and when to use each version.",
            "Detail order item pagination, buyer info access, and fulfillment channel nuances.",
            "Describe how to integrate shipment confirmations and refunds with order updates.",
        ],
    },
    DocumentationEntry {
        category: "inventory",
        title: "Inventory",
        summary: "Centralize inventory availability, inbound shipments, and restock metrics.",
        notes: &[
            "Document FBA Inventory APIs and MFN inventory sources supported by the server.",
            "Explain how marketplaces and warehouses affect quantity calculations.",
            "Call out long-term storage fees and restock limit insights.",
        ],
    },
    DocumentationEntry {
        category: "reports",
        title: "Reports",
        summary: "Generate, monitor, and download asynchronous reports.",
        notes: &[
            "List the most common report types and prerequisites for requesting them.",
            "Explain document encryption, compression, and signed URL handling.",
            "Track polling cadence, retry logic, and rate limit strategies for report generation.",
        ],
    },
    DocumentationEntry {
        category: "feeds",
        title: "Feeds",
        summary: "Submit, monitor, and validate feeds for catalog and fulfillment updates.",
        notes: &[
            "Enumerate supported feed types and corresponding content schemas.",
            "Describe staging files to S3 or other storage before invoking the Feeds API.",
            "Detail feed document encryption and result inspection after processing.",
        ],
    },
    DocumentationEntry {
        category: "finance",
        title: "Finance",
        summary: "Work with financial event groups, settlements, and chargebacks.",
        notes: &[
            "Map Finances API resources to accounting events and ledger entries.",
            "Explain pagination through financial event groups and reconciliation practices.",
            "Highlight tax, fee, and refund event coverage per marketplace.",
        ],
    },
    DocumentationEntry {
        category: "notifications",
        title: "Notifications",
        summary: "Manage notification subscriptions and destinations.",
        notes: &[
            "Document destination creation, encryption keys, and SQS/SNS webhook patterns.",
            "Clarify notification type availability and throttling behaviour.",
            "Provide testing approaches for validating notifications end-to-end.",
        ],
    },
    DocumentationEntry {
        category: "productPricing",
        title: "Product Pricing",
        summary: "Access competitive pricing, fee previews, and offer details.",
        notes: &[
            "List pricing endpoints and required scopes for each marketplace.",
            "Explain batch request limits and caching strategies for price intelligence.",
            "Discuss how to merge pricing with catalog attributes for decisioning.",
        ],
    },
    DocumentationEntry {
        category: "listings",
        title: "Listings",
        summary: "Create and manage offer details, compliance data, and images.",
        notes: &[
            "Summarise Listings Items API patch semantics and conflict handling.",
            "Highlight hazard, compliance, and image validation requirements.",
            "Outline error handling and retries when updating offers at scale.",
        ],
    },
    DocumentationEntry {
        category: "fba",
        title: "Fulfillment by Amazon",
        summary: "Operate inbound shipments, inventory placement, and customer fulfillment via FBA.",
        notes: &[
            "Describe creating inbound shipment plans, labels, and routing workflows.",
            "Explain Small and Light / Amazon Warehousing & Distribution considerations.",
            "Cover reconciliation of received inventory and discrepancy reports.",
        ],
    },
];

impl DocumentationEntry {
    pub(crate) fn uri(&self) -> String {
        format!("{URI_SCHEME}{}", self.category)
    }

    fn resource(&self) -> Resource {
        let mut raw = RawResource::new(self.uri(), self.title);
        raw.description = Some(self.summary.to_string());
        raw.mime_type = Some(MARKDOWN.to_string());
        raw.no_annotation()
    }

    pub(crate) fn body(&self) -> String {
        let mut body = format!(
            "# {}\n\n{}\n\n## Implementation Notes\n",
            self.title, self.summary
        );
        for note in self.notes {
            body.push_str(&format!("- {note}\n"));
        }
        body.push_str("\n## Status\n");
        body.push_str(
            "This resource is a placeholder. Replace it with live links to Amazon documentation or generated knowledge base content as the MCP server matures.\n",
        );
        body
    }
}

pub(crate) fn documentation_resources() -> Vec<Resource> {
    DOCUMENTATION.iter().map(DocumentationEntry::resource).collect()
}

pub(crate) fn read_documentation(uri: &str) -> Result<ReadResourceResult, McpError> {
    let entry = DOCUMENTATION
        .iter()
        .find(|entry| entry.uri() == uri)
        .ok_or_else(|| {
            McpError::resource_not_found(
                format!("unknown resource: {uri}"),
                Some(serde_json::json!({ "uri": uri })),
            )
        })?;

    let mut contents = ResourceContents::text(entry.body(), uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(MARKDOWN.to_string());
    }
    Ok(ReadResourceResult {
        contents: vec![contents],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rmcp::model::ErrorCode;
    use std::collections::HashSet;

    #[test]
    fn one_markdown_resource_per_category() {
        let resources = documentation_resources();
        assert_eq!(resources.len(), 12);

        let uris: HashSet<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris.len(), 12);
        assert!(uris.contains("amazon-sp-api://productPricing"));
        assert!(resources
            .iter()
            .all(|r| r.mime_type.as_deref() == Some(MARKDOWN)));
    }

    #[test]
    fn body_lists_notes_and_status() {
        let reports = DOCUMENTATION
            .iter()
            .find(|entry| entry.category == "reports")
            .expect("reports entry");
        let body = reports.body();
        assert!(body.starts_with(
            "# Reports\n\nGenerate, monitor, and download asynchronous reports.\n\n## Implementation Notes\n- "
        ));
        assert!(body.contains("- Explain document encryption, compression, and signed URL handling.\n"));
        assert!(body.contains("\n## Status\nThis resource is a placeholder."));
    }

    #[test]
    fn unknown_uri_is_resource_not_found() {
        let err = read_documentation("amazon-sp-api://nope").expect_err("unknown");
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert_eq!(err.message, "unknown resource: amazon-sp-api://nope");
    }
}

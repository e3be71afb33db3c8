use rmcp::model::JsonObject;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ToolDescriptor {
    pub(crate) name: &'static str,
    pub(crate) summary: &'static str,
}

/// Implemented tools, in the order they are advertised in the server instructions.
pub(crate) const TOOL_CATALOG: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "orders.listOrders",
        summary: "Page through orders by marketplace and time window.",
    },
    ToolDescriptor {
        name: "orders.getOrder",
        summary: "One order plus every line item.",
    },
    ToolDescriptor {
        name: "orders.getOrderAddress",
        summary: "Shipping address of an order.",
    },
    ToolDescriptor {
        name: "orders.getOrderBuyerInfo",
        summary: "Buyer information of an order.",
    },
    ToolDescriptor {
        name: "orders.getOrderItems",
        summary: "Line items of an order (one page or all).",
    },
    ToolDescriptor {
        name: "orders.getOrderItemsBuyerInfo",
        summary: "Buyer customization data per line item.",
    },
    ToolDescriptor {
        name: "sales.getOrderMetrics",
        summary: "Aggregated sales metrics per interval.",
    },
    ToolDescriptor {
        name: "fbaInventory.getInventorySummaries",
        summary: "FBA inventory summaries per SKU.",
    },
    ToolDescriptor {
        name: "productPricing.getPricing",
        summary: "Seller pricing for up to 20 ASINs or SKUs.",
    },
    ToolDescriptor {
        name: "productPricing.getCompetitivePricing",
        summary: "Competitive pricing for up to 20 ASINs or SKUs.",
    },
    ToolDescriptor {
        name: "reports.getReports",
        summary: "List reports by type, status and creation time.",
    },
    ToolDescriptor {
        name: "reports.createReport",
        summary: "Request a new report.",
    },
    ToolDescriptor {
        name: "reports.getReport",
        summary: "Processing status of one report.",
    },
    ToolDescriptor {
        name: "reports.getReportDocument",
        summary: "Download URL of a finished report document.",
    },
];

#[derive(Clone, Copy, Debug)]
pub(crate) struct PlaceholderArg {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) required: bool,
    pub(crate) choices: &'static [&'static str],
}

const fn arg(name: &'static str, description: &'static str) -> PlaceholderArg {
    PlaceholderArg {
        name,
        description,
        required: false,
        choices: &[],
    }
}

const fn required_arg(name: &'static str, description: &'static str) -> PlaceholderArg {
    PlaceholderArg {
        required: true,
        ..arg(name, description)
    }
}

/// A tool that is advertised but not implemented yet; calling it explains what it will do.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Placeholder {
    pub(crate) name: &'static str,
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) guidance: &'static str,
    pub(crate) args: &'static [PlaceholderArg],
}

pub(crate) const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder {
        name: "auth.beginAuthorization",
        title: "Authentication",
        description: "Initiate Login with Amazon workflow for the Selling Partner API.",
        guidance: "Provide Login with Amazon authorization URLs and exchange refresh tokens using the Tokens API when implementing this tool.",
        args: &[arg(
            "marketplaceId",
            "Optional marketplace to scope the authorization.",
        )],
    },
    Placeholder {
        name: "catalog.lookupItem",
        title: "Catalog",
        description: "Retrieve catalog metadata for a specific identifier or keyword.",
        guidance: "Call the Catalog Items API (2022-04-01) to return attributes, dimensions, and relationships for the requested identifier.",
        args: &[
            required_arg("identifier", "ASIN, seller SKU, or keyword to search for."),
            PlaceholderArg {
                choices: &["ASIN", "SKU", "Keyword"],
                ..arg(
                    "identifierType",
                    "Controls how the identifier value is interpreted.",
                )
            },
        ],
    },
    Placeholder {
        name: "feeds.submitFeed",
        title: "Feed Submission",
        description: "Upload and submit a processing feed to Amazon.",
        guidance: "Use the Feeds API createFeed operation with the appropriate content type and optional encryption metadata.",
        args: &[required_arg(
            "feedType",
            "Feed type identifier, e.g. POST_PRODUCT_DATA.",
        )],
    },
    Placeholder {
        name: "finance.listFinancialEvents",
        title: "Financial Data",
        description: "List financial events related to orders, refunds, and shipments.",
        guidance: "Invoke the Finances API to page through financial events and reconcile transactions.",
        args: &[arg(
            "amazonOrderId",
            "Optional Amazon order identifier to filter results.",
        )],
    },
    Placeholder {
        name: "notifications.subscribe",
        title: "Notification Management",
        description: "Register a subscription for an SP-API notification type.",
        guidance: "Implement this tool using the Notifications API to create or update subscriptions tied to your destination resources.",
        args: &[required_arg(
            "notificationType",
            "Notification type to subscribe to, e.g. ANY_OFFER_CHANGED.",
        )],
    },
    Placeholder {
        name: "listings.updateListing",
        title: "Listings",
        description: "Create or update a listing for a given SKU.",
        guidance: "Tie into the Listings Items API to patch attributes, images, and compliance details for existing offers.",
        args: &[
            required_arg("sku", "Seller SKU whose listing should be updated."),
            required_arg("marketplaceId", "Marketplace identifier for the listing."),
        ],
    },
    Placeholder {
        name: "fba.createInboundShipmentPlan",
        title: "FBA Operations",
        description: "Plan inbound shipments to Amazon fulfillment centers.",
        guidance: "Coordinate with the FBA Inbound Eligibility and Inbound Shipment APIs to generate labels and routing information.",
        args: &[required_arg(
            "shipFromAddressId",
            "Identifier for the ship-from address resource.",
        )],
    },
];

pub(crate) fn placeholder(name: &str) -> Option<&'static Placeholder> {
    PLACEHOLDERS.iter().find(|p| p.name == name)
}

impl Placeholder {
    pub(crate) fn input_schema(&self) -> JsonObject {
        let mut properties = Map::new();
        for arg in self.args {
            let mut property = json!({ "type": "string", "description": arg.description });
            if !arg.choices.is_empty() {
                property["enum"] = json!(arg.choices);
            }
            properties.insert(arg.name.to_string(), property);
        }
        let required: Vec<&str> = self
            .args
            .iter()
            .filter(|arg| arg.required)
            .map(|arg| arg.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }

    /// Text returned when the placeholder is called.
    pub(crate) fn response(&self, args: Option<&JsonObject>) -> String {
        let mut text = format!(
            "{} is a placeholder for future {} capabilities. {}",
            self.name, self.title, self.guidance
        );
        if let Some(args) = args.filter(|args| !args.is_empty()) {
            let pretty = serde_json::to_string_pretty(args).unwrap_or_default();
            text.push_str("\n\nReceived arguments:\n");
            text.push_str(&pretty);
        }
        text
    }
}

pub(crate) fn tool_instructions() -> String {
    let mut lines = vec![
        "Selling Partner API tools for orders, sales, FBA inventory, pricing and reports.".to_string(),
        "Every tool returns a one-line summary plus structured content; pass nextToken back to continue a listing.".to_string(),
        "Tools:".to_string(),
    ];
    for tool in TOOL_CATALOG {
        lines.push(format!("- {}: {}", tool.name, tool.summary));
    }
    lines.push(format!(
        "Planned (placeholders): {}",
        PLACEHOLDERS
            .iter()
            .map(|p| p.name)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    lines.join("\n")
}

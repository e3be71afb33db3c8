use super::super::*;
use super::error::respond;
use crate::tools::schemas::fba_inventory::InventorySummariesRequest;
use crate::tools::schemas::orders::{ListOrdersRequest, OrderItemsRequest, OrderRequest};
use crate::tools::schemas::product_pricing::{CompetitivePricingRequest, PricingRequest};
use crate::tools::schemas::reports::{
    CreateReportRequest, GetReportDocumentRequest, GetReportRequest, GetReportsRequest,
};
use crate::tools::schemas::sales::OrderMetricsRequest;
use crate::tools::{fba_inventory, orders, product_pricing, reports, sales};

use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_router};

pub(super) fn build_tool_router_with_param_hints(
) -> super::super::tool_router_hints::ToolRouterWithParamHints<SellingPartnerService> {
    super::super::tool_router_hints::ToolRouterWithParamHints::new(
        SellingPartnerService::tool_router(),
    )
}

#[tool_router]
impl SellingPartnerService {
    #[tool(
        name = "orders.listOrders",
        description = "List orders for one or more marketplaces, filtered by creation or update time, status, fulfillment channel and more. Pass nextToken alone to fetch the next page."
    )]
    pub async fn list_orders(
        &self,
        Parameters(request): Parameters<ListOrdersRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            orders::LIST_ORDERS,
            orders::list_orders(&self.engine, request).await,
        )
    }

    #[tool(
        name = "orders.getOrder",
        description = "Fetch one order by Amazon order ID together with all of its line items."
    )]
    pub async fn get_order(
        &self,
        Parameters(request): Parameters<OrderRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(orders::GET_ORDER, orders::get_order(&self.engine, request).await)
    }

    #[tool(
        name = "orders.getOrderAddress",
        description = "Get the shipping address of an order."
    )]
    pub async fn get_order_address(
        &self,
        Parameters(request): Parameters<OrderRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            orders::GET_ORDER_ADDRESS,
            orders::get_order_address(&self.engine, request).await,
        )
    }

    #[tool(
        name = "orders.getOrderBuyerInfo",
        description = "Get buyer information (name, email, tax details) for an order."
    )]
    pub async fn get_order_buyer_info(
        &self,
        Parameters(request): Parameters<OrderRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            orders::GET_ORDER_BUYER_INFO,
            orders::get_order_buyer_info(&self.engine, request).await,
        )
    }

    #[tool(
        name = "orders.getOrderItems",
        description = "List the line items of an order. Use nextToken for the next page, or fetchAll to walk every page."
    )]
    pub async fn get_order_items(
        &self,
        Parameters(request): Parameters<OrderItemsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            orders::GET_ORDER_ITEMS,
            orders::get_order_items(&self.engine, request).await,
        )
    }

    #[tool(
        name = "orders.getOrderItemsBuyerInfo",
        description = "List buyer customization and gift details for the line items of an order."
    )]
    pub async fn get_order_items_buyer_info(
        &self,
        Parameters(request): Parameters<OrderItemsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            orders::GET_ORDER_ITEMS_BUYER_INFO,
            orders::get_order_items_buyer_info(&self.engine, request).await,
        )
    }

    #[tool(
        name = "sales.getOrderMetrics",
        description = "Aggregated order metrics (units, orders, average price, total sales) per interval for the given marketplaces."
    )]
    pub async fn get_order_metrics(
        &self,
        Parameters(request): Parameters<OrderMetricsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            sales::GET_ORDER_METRICS,
            sales::get_order_metrics(&self.engine, request).await,
        )
    }

    #[tool(
        name = "fbaInventory.getInventorySummaries",
        description = "FBA inventory summaries per seller SKU, by marketplace granularity, optionally with quantity details."
    )]
    pub async fn get_inventory_summaries(
        &self,
        Parameters(request): Parameters<InventorySummariesRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            fba_inventory::GET_INVENTORY_SUMMARIES,
            fba_inventory::get_inventory_summaries(&self.engine, request).await,
        )
    }

    #[tool(
        name = "productPricing.getPricing",
        description = "Seller pricing for up to 20 ASINs or SKUs in one marketplace."
    )]
    pub async fn get_pricing(
        &self,
        Parameters(request): Parameters<PricingRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            product_pricing::GET_PRICING,
            product_pricing::get_pricing(&self.engine, request).await,
        )
    }

    #[tool(
        name = "productPricing.getCompetitivePricing",
        description = "Competitive pricing for up to 20 ASINs or SKUs in one marketplace."
    )]
    pub async fn get_competitive_pricing(
        &self,
        Parameters(request): Parameters<CompetitivePricingRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            product_pricing::GET_COMPETITIVE_PRICING,
            product_pricing::get_competitive_pricing(&self.engine, request).await,
        )
    }

    #[tool(
        name = "reports.getReports",
        description = "List reports filtered by type, processing status, marketplace and creation time. Pass nextToken alone to fetch the next page."
    )]
    pub async fn get_reports(
        &self,
        Parameters(request): Parameters<GetReportsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            reports::GET_REPORTS,
            reports::get_reports(&self.engine, request).await,
        )
    }

    #[tool(
        name = "reports.createReport",
        description = "Request a new report of the given type for one or more marketplaces."
    )]
    pub async fn create_report(
        &self,
        Parameters(request): Parameters<CreateReportRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            reports::CREATE_REPORT,
            reports::create_report(&self.engine, request).await,
        )
    }

    #[tool(
        name = "reports.getReport",
        description = "Get the processing status of a report and, once done, its document ID."
    )]
    pub async fn get_report(
        &self,
        Parameters(request): Parameters<GetReportRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            reports::GET_REPORT,
            reports::get_report(&self.engine, request).await,
        )
    }

    #[tool(
        name = "reports.getReportDocument",
        description = "Get the download URL and compression of a finished report document."
    )]
    pub async fn get_report_document(
        &self,
        Parameters(request): Parameters<GetReportDocumentRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            reports::GET_REPORT_DOCUMENT,
            reports::get_report_document(&self.engine, request).await,
        )
    }
}

//! Orders API v0: listing, single-order lookup with every line item, address and buyer info.
//!
//! Orders payloads are PascalCase on the wire; results are projected to camelCase.

use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use sp_api_client::{CallFailure, Engine, Fetched, Operation};
use sp_api_protocol::{continuation, walk_pages, DecimalString, ExactJson, Page};

use super::outcome::{with_more, Summarize, ToolFailure};
use super::schemas::orders::{
    GetOrderResult, ListOrdersRequest, ListOrdersResult, OrderAddressResult, OrderBuyerInfoResult,
    OrderItemsBuyerInfoResult, OrderItemsRequest, OrderItemsResult, OrderRequest, OrderTotal,
};
use super::util::{required, retrieved_at, trimmed, trimmed_list, within};

pub(crate) const LIST_ORDERS: &str = "orders.listOrders";
pub(crate) const GET_ORDER: &str = "orders.getOrder";
pub(crate) const GET_ORDER_ADDRESS: &str = "orders.getOrderAddress";
pub(crate) const GET_ORDER_BUYER_INFO: &str = "orders.getOrderBuyerInfo";
pub(crate) const GET_ORDER_ITEMS: &str = "orders.getOrderItems";
pub(crate) const GET_ORDER_ITEMS_BUYER_INFO: &str = "orders.getOrderItemsBuyerInfo";

const MAX_RESULTS_PER_PAGE: (i64, i64) = (1, 100);

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrdersPage {
    #[serde(default)]
    orders: Vec<ExactJson>,
    next_token: Option<String>,
    created_before: Option<String>,
    last_updated_before: Option<String>,
}

/// The handful of order fields the summary and flat result need.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrderHeader {
    #[serde(default)]
    amazon_order_id: String,
    order_status: Option<String>,
    purchase_date: Option<String>,
    last_update_date: Option<String>,
    order_total: Option<OrderMoney>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrderMoney {
    #[serde(default)]
    currency_code: Option<String>,
    #[serde(default)]
    amount: DecimalString,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrderAddressPayload {
    #[serde(default)]
    amazon_order_id: String,
    shipping_address: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OrderItemsPage {
    #[serde(default)]
    amazon_order_id: String,
    #[serde(default)]
    order_items: Vec<ExactJson>,
    next_token: Option<String>,
}

fn order_path(order_id: &str) -> Vec<String> {
    vec![
        "orders".to_string(),
        "v0".to_string(),
        "orders".to_string(),
        order_id.to_string(),
    ]
}

fn order_subpath(order_id: &str, tail: &[&str]) -> Vec<String> {
    let mut segments = order_path(order_id);
    segments.extend(tail.iter().map(ToString::to_string));
    segments
}

fn has_list_filters(request: &ListOrdersRequest) -> bool {
    let lists = [
        &request.marketplace_ids,
        &request.order_statuses,
        &request.fulfillment_channels,
        &request.payment_methods,
        &request.easy_ship_shipment_statuses,
        &request.amazon_order_ids,
    ];
    let texts = [
        &request.created_after,
        &request.created_before,
        &request.last_updated_after,
        &request.last_updated_before,
        &request.buyer_email,
        &request.seller_order_id,
    ];
    lists
        .iter()
        .any(|values| !trimmed_list(values.as_deref()).is_empty())
        || texts.iter().any(|value| trimmed(value.as_deref()).is_some())
        || request.max_results_per_page.is_some()
}

pub(crate) fn list_orders_operation(request: &ListOrdersRequest) -> Result<Operation, String> {
    let path = ["orders", "v0", "orders"];

    if let Some(token) = trimmed(request.next_token.as_deref()) {
        if has_list_filters(request) {
            return Err("when nextToken is provided, omit additional filters".to_string());
        }
        return Ok(Operation::get(LIST_ORDERS, path).param("NextToken", token));
    }

    let marketplace_ids = trimmed_list(request.marketplace_ids.as_deref());
    if marketplace_ids.is_empty() {
        return Err("marketplaceIds is required unless nextToken is provided".to_string());
    }

    let (min, max) = MAX_RESULTS_PER_PAGE;
    Ok(Operation::get(LIST_ORDERS, path)
        .param_list("MarketplaceIds", &marketplace_ids)
        .param_opt("CreatedAfter", trimmed(request.created_after.as_deref()))
        .param_opt("CreatedBefore", trimmed(request.created_before.as_deref()))
        .param_opt(
            "LastUpdatedAfter",
            trimmed(request.last_updated_after.as_deref()),
        )
        .param_opt(
            "LastUpdatedBefore",
            trimmed(request.last_updated_before.as_deref()),
        )
        .param_list(
            "OrderStatuses",
            &trimmed_list(request.order_statuses.as_deref()),
        )
        .param_list(
            "FulfillmentChannels",
            &trimmed_list(request.fulfillment_channels.as_deref()),
        )
        .param_list(
            "PaymentMethods",
            &trimmed_list(request.payment_methods.as_deref()),
        )
        .param_opt("BuyerEmail", trimmed(request.buyer_email.as_deref()))
        .param_opt("SellerOrderId", trimmed(request.seller_order_id.as_deref()))
        .param_opt(
            "MaxResultsPerPage",
            within(request.max_results_per_page, min, max).map(|n| n.to_string()),
        )
        .param_list(
            "EasyShipShipmentStatuses",
            &trimmed_list(request.easy_ship_shipment_statuses.as_deref()),
        )
        .param_list(
            "AmazonOrderIds",
            &trimmed_list(request.amazon_order_ids.as_deref()),
        ))
}

pub(crate) async fn list_orders(
    engine: &Engine,
    request: ListOrdersRequest,
) -> Result<ListOrdersResult, ToolFailure> {
    engine.ensure_ready()?;
    let op = list_orders_operation(&request)?;

    let Fetched {
        payload,
        next_token,
    } = engine.fetch::<OrdersPage>(&op).await?;
    Ok(ListOrdersResult {
        orders: payload.orders,
        next_token: continuation(payload.next_token).or(next_token),
        created_before: trimmed(payload.created_before.as_deref()),
        last_updated_before: trimmed(payload.last_updated_before.as_deref()),
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for ListOrdersResult {
    fn summary(&self) -> String {
        with_more(
            format!("Retrieved {} orders", self.orders.len()),
            self.next_token.as_deref(),
        )
    }
}

fn items_operation(
    tool: &'static str,
    order_id: &str,
    buyer_info: bool,
    token: Option<String>,
) -> Operation {
    let tail: &[&str] = if buyer_info {
        &["orderItems", "buyerInfo"]
    } else {
        &["orderItems"]
    };
    Operation::get(tool, order_subpath(order_id, tail)).param_opt("NextToken", token)
}

async fn fetch_item_page(engine: &Engine, op: &Operation) -> Result<OrderItemsPage, CallFailure> {
    let Fetched {
        mut payload,
        next_token,
    } = engine.fetch::<OrderItemsPage>(op).await?;
    payload.next_token = continuation(payload.next_token.take()).or(next_token);
    Ok(payload)
}

/// Every item of an order, page after page. Any failing page fails the whole walk.
async fn all_order_items(
    engine: &Engine,
    tool: &'static str,
    order_id: &str,
    buyer_info: bool,
) -> Result<Vec<ExactJson>, CallFailure> {
    walk_pages(|token| {
        let op = items_operation(tool, order_id, buyer_info, token);
        async move {
            let page = fetch_item_page(engine, &op).await?;
            Ok::<_, CallFailure>(Page::new(page.order_items, page.next_token))
        }
    })
    .await
}

pub(crate) async fn get_order(
    engine: &Engine,
    request: OrderRequest,
) -> Result<GetOrderResult, ToolFailure> {
    engine.ensure_ready()?;
    let order_id = required(request.amazon_order_id.as_deref(), "amazonOrderId")?;

    let op = Operation::get(GET_ORDER, order_path(&order_id));
    let raw = engine.fetch::<Box<RawValue>>(&op).await?.payload;
    let header: OrderHeader = serde_json::from_str(raw.get())
        .map_err(|err| CallFailure::decode(GET_ORDER, err.into()))?;
    let order: ExactJson = serde_json::from_str(raw.get())
        .map_err(|err| CallFailure::decode(GET_ORDER, err.into()))?;

    let order_items = all_order_items(engine, GET_ORDER_ITEMS, &order_id, false).await?;

    let order_total = header.order_total.and_then(|money| {
        let currency_code = trimmed(money.currency_code.as_deref()).unwrap_or_default();
        if money.amount.is_empty() && currency_code.is_empty() {
            None
        } else {
            Some(OrderTotal {
                amount: money.amount.to_string(),
                currency_code,
            })
        }
    });

    Ok(GetOrderResult {
        amazon_order_id: trimmed(Some(header.amazon_order_id.as_str())).unwrap_or(order_id),
        order_status: trimmed(header.order_status.as_deref()),
        purchase_date: trimmed(header.purchase_date.as_deref()),
        last_update_date: trimmed(header.last_update_date.as_deref()),
        order_total,
        item_count: order_items.len(),
        order,
        order_items,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for GetOrderResult {
    fn summary(&self) -> String {
        let mut summary = format!(
            "Fetched Amazon order {} with {} items",
            self.amazon_order_id, self.item_count
        );
        if let Some(status) = self.order_status.as_deref() {
            summary.push_str(&format!(" (status: {status})"));
        }
        if let Some(total) = self.order_total.as_ref() {
            let text = format!("{} {}", total.amount, total.currency_code);
            summary.push_str(&format!(", total {}", text.trim()));
        }
        if let Some(date) = self.purchase_date.as_deref() {
            summary.push_str(&format!(", purchased {date}"));
        }
        summary
    }
}

pub(crate) async fn get_order_address(
    engine: &Engine,
    request: OrderRequest,
) -> Result<OrderAddressResult, ToolFailure> {
    engine.ensure_ready()?;
    let order_id = required(request.amazon_order_id.as_deref(), "amazonOrderId")?;

    let op = Operation::get(GET_ORDER_ADDRESS, order_subpath(&order_id, &["address"]));
    let payload = engine.fetch::<OrderAddressPayload>(&op).await?.payload;
    Ok(OrderAddressResult {
        amazon_order_id: trimmed(Some(payload.amazon_order_id.as_str())).unwrap_or(order_id),
        shipping_address: payload.shipping_address.filter(|value| !value.is_null()),
        retrieved_at: retrieved_at(),
    })
}

fn text_field<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a str> {
    value
        .and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

impl Summarize for OrderAddressResult {
    fn summary(&self) -> String {
        let mut summary = format!("Retrieved shipping address for order {}", self.amazon_order_id);
        if let Some(name) = text_field(self.shipping_address.as_ref(), "Name") {
            summary.push_str(&format!(" ({name})"));
        }
        summary
    }
}

pub(crate) async fn get_order_buyer_info(
    engine: &Engine,
    request: OrderRequest,
) -> Result<OrderBuyerInfoResult, ToolFailure> {
    engine.ensure_ready()?;
    let order_id = required(request.amazon_order_id.as_deref(), "amazonOrderId")?;

    let op = Operation::get(GET_ORDER_BUYER_INFO, order_subpath(&order_id, &["buyerInfo"]));
    let payload = engine.fetch::<ExactJson>(&op).await?.payload;
    let amazon_order_id = text_field(Some(payload.as_value()), "AmazonOrderId")
        .map(ToString::to_string)
        .unwrap_or(order_id);
    Ok(OrderBuyerInfoResult {
        amazon_order_id,
        buyer_info: Some(payload).filter(|value| !value.is_null()),
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for OrderBuyerInfoResult {
    fn summary(&self) -> String {
        let mut summary = format!("Retrieved buyer info for order {}", self.amazon_order_id);
        let info = self.buyer_info.as_ref().map(ExactJson::as_value);
        if let Some(name) = text_field(info, "BuyerName") {
            summary.push_str(&format!(" ({name})"));
        }
        summary
    }
}

/// Resolved arguments of the two order-items tools.
struct ItemsQuery {
    order_id: String,
    next_token: Option<String>,
    fetch_all: bool,
}

fn items_query(request: &OrderItemsRequest) -> Result<ItemsQuery, String> {
    let order_id = required(request.amazon_order_id.as_deref(), "amazonOrderId")?;
    let next_token = trimmed(request.next_token.as_deref());
    let fetch_all = request.fetch_all.unwrap_or(false);
    if fetch_all && next_token.is_some() {
        return Err("fetchAll cannot be combined with nextToken".to_string());
    }
    Ok(ItemsQuery {
        order_id,
        next_token,
        fetch_all,
    })
}

/// One page, or every page when `fetchAll` is set. Returns `(orderId, items, nextToken)`.
async fn order_items(
    engine: &Engine,
    tool: &'static str,
    request: &OrderItemsRequest,
    buyer_info: bool,
) -> Result<(String, Vec<ExactJson>, Option<String>), ToolFailure> {
    engine.ensure_ready()?;
    let query = items_query(request)?;

    if query.fetch_all {
        let items = all_order_items(engine, tool, &query.order_id, buyer_info).await?;
        return Ok((query.order_id, items, None));
    }

    let op = items_operation(tool, &query.order_id, buyer_info, query.next_token);
    let page = fetch_item_page(engine, &op).await?;
    let order_id = trimmed(Some(page.amazon_order_id.as_str())).unwrap_or(query.order_id);
    Ok((order_id, page.order_items, page.next_token))
}

pub(crate) async fn get_order_items(
    engine: &Engine,
    request: OrderItemsRequest,
) -> Result<OrderItemsResult, ToolFailure> {
    let (amazon_order_id, items, next_token) =
        order_items(engine, GET_ORDER_ITEMS, &request, false).await?;
    Ok(OrderItemsResult {
        amazon_order_id,
        items,
        next_token,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for OrderItemsResult {
    fn summary(&self) -> String {
        with_more(
            format!(
                "Retrieved {} items for order {}",
                self.items.len(),
                self.amazon_order_id
            ),
            self.next_token.as_deref(),
        )
    }
}

pub(crate) async fn get_order_items_buyer_info(
    engine: &Engine,
    request: OrderItemsRequest,
) -> Result<OrderItemsBuyerInfoResult, ToolFailure> {
    let (amazon_order_id, items, next_token) =
        order_items(engine, GET_ORDER_ITEMS_BUYER_INFO, &request, true).await?;
    Ok(OrderItemsBuyerInfoResult {
        amazon_order_id,
        items,
        next_token,
        retrieved_at: retrieved_at(),
    })
}

impl Summarize for OrderItemsBuyerInfoResult {
    fn summary(&self) -> String {
        with_more(
            format!(
                "Retrieved buyer info for {} items on order {}",
                self.items.len(),
                self.amazon_order_id
            ),
            self.next_token.as_deref(),
        )
    }
}

// Tool router and the helpers that render tool outcomes.

pub(super) mod error;
mod tool_router;

pub(super) fn build_tool_router_with_param_hints(
) -> super::tool_router_hints::ToolRouterWithParamHints<super::SellingPartnerService> {
    tool_router::build_tool_router_with_param_hints()
}

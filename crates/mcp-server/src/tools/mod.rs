//! Selling Partner API tool surface.
//!
//! Schemas, dispatch and per-resource implementations live in separate submodules; every resource
//! module validates its arguments, runs the engine and projects the payload into its result type.

pub(crate) mod catalog;
mod dispatch;
mod fba_inventory;
mod orders;
mod outcome;
mod product_pricing;
mod reports;
mod sales;
mod schemas;
mod util;

pub use dispatch::{SellingPartnerService, ServerIdentity};

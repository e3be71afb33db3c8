//! Tool argument and result shapes.

pub(crate) mod fba_inventory;
pub(crate) mod orders;
pub(crate) mod product_pricing;
pub(crate) mod reports;
pub(crate) mod sales;

mod service;
mod view;

// Public API of the catalog subsystem.
pub use crate::error::CatalogError;
pub use service::{CatalogService, find_group, items_in_group};
pub use view::{
    GroupCard, ItemCard, ItemDetail, SUMMARY_MAX_CHARS, clip, map_group_card, map_item_card,
    map_item_detail,
};

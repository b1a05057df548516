use std::fmt;
use std::sync::Arc;

use career_core::fields::item;
use career_core::model::{Group, Record};
use career_core::normalize::normalize;
use storage::{TableRef, TableSource};
use tracing::{debug, info};

use super::view::{ItemCard, ItemDetail, map_item_card, map_item_detail};
use crate::cache::LoadOnce;
use crate::error::CatalogError;

/// Groups and items of the catalog, each fetched once and then shared.
pub struct CatalogService {
    source: Arc<dyn TableSource>,
    groups_table: TableRef,
    items_table: TableRef,
    groups: LoadOnce<Vec<Group>>,
    items: LoadOnce<Vec<Record>>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        source: Arc<dyn TableSource>,
        groups_table: TableRef,
        items_table: TableRef,
    ) -> Self {
        Self {
            source,
            groups_table,
            items_table,
            groups: LoadOnce::new(),
            items: LoadOnce::new(),
        }
    }

    /// All groups, in sheet order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Source` if the sheet cannot be fetched. Failures
    /// are not cached.
    pub async fn load_groups(&self) -> Result<Arc<Vec<Group>>, CatalogError> {
        if let Some(groups) = self.groups.get() {
            debug!(table = %self.groups_table, "groups cache hit");
            return Ok(groups);
        }
        self.groups
            .get_or_try_load(|| async {
                let raw = self.source.fetch(&self.groups_table).await?;
                let groups: Vec<Group> = normalize(&raw).iter().map(Group::from_record).collect();
                info!(table = %self.groups_table, count = groups.len(), "groups loaded");
                Ok::<_, CatalogError>(groups)
            })
            .await
    }

    /// All items as normalized records, in sheet order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Source` if the sheet cannot be fetched. Failures
    /// are not cached.
    pub async fn load_items(&self) -> Result<Arc<Vec<Record>>, CatalogError> {
        if let Some(items) = self.items.get() {
            debug!(table = %self.items_table, "items cache hit");
            return Ok(items);
        }
        self.items
            .get_or_try_load(|| async {
                let raw = self.source.fetch(&self.items_table).await?;
                let items = normalize(&raw);
                info!(table = %self.items_table, count = items.len(), "items loaded");
                Ok::<_, CatalogError>(items)
            })
            .await
    }

    /// Items linked to `group_id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if items cannot be loaded.
    pub async fn items_in_group(&self, group_id: &str) -> Result<Vec<Record>, CatalogError> {
        let items = self.load_items().await?;
        Ok(items_in_group(&items, group_id).cloned().collect())
    }

    /// Item by its id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if items cannot be loaded.
    pub async fn find_item(&self, item_id: &str) -> Result<Option<Record>, CatalogError> {
        let item_id = item_id.trim();
        let items = self.load_items().await?;
        Ok(items
            .iter()
            .find(|record| item::ID.resolve(record) == Some(item_id))
            .cloned())
    }

    /// Group an item points at. `None` for unlinked or dangling items.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if groups cannot be loaded.
    pub async fn group_for_item(&self, record: &Record) -> Result<Option<Group>, CatalogError> {
        let Some(group_id) = item::GROUP_ID.resolve(record) else {
            return Ok(None);
        };
        let groups = self.load_groups().await?;
        Ok(find_group(&groups, group_id).cloned())
    }

    /// Cards for the items of one group.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if items cannot be loaded.
    pub async fn item_cards(&self, group_id: &str) -> Result<Vec<ItemCard>, CatalogError> {
        let items = self.load_items().await?;
        Ok(items_in_group(&items, group_id).map(map_item_card).collect())
    }

    /// Detail view of one item, with its group resolved.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if items or groups cannot be loaded.
    pub async fn item_detail(&self, item_id: &str) -> Result<Option<ItemDetail>, CatalogError> {
        let Some(record) = self.find_item(item_id).await? else {
            return Ok(None);
        };
        let group = self.group_for_item(&record).await?;
        Ok(Some(map_item_detail(&record, group.as_ref())))
    }

    /// Drop both caches so the next access refetches.
    pub fn reset(&self) {
        self.groups.reset();
        self.items.reset();
    }
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("groups_table", &self.groups_table)
            .field("items_table", &self.items_table)
            .field("groups", &self.groups)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

/// Items whose group id equals `group_id` (trimmed, exact).
pub fn items_in_group<'a>(
    items: &'a [Record],
    group_id: &str,
) -> impl Iterator<Item = &'a Record> + use<'a> {
    let group_id = group_id.trim().to_owned();
    items
        .iter()
        .filter(move |record| item::GROUP_ID.resolve(record) == Some(group_id.as_str()))
}

#[must_use]
pub fn find_group<'a>(groups: &'a [Group], group_id: &str) -> Option<&'a Group> {
    let group_id = group_id.trim();
    if group_id.is_empty() {
        return None;
    }
    groups.iter().find(|group| group.id() == group_id)
}

use crate::domain::model::{ContentGroup, ContentItem, GroupId, ItemId, RequestContext};
use crate::domain::ports::ContentService;
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory content store for tests and the demo binary. Groups are
/// kept per item in creation order; item bytes live in a separate blob
/// map keyed by content-item id.
#[derive(Default)]
pub struct InMemoryContentService {
    groups: Mutex<HashMap<ItemId, Vec<ContentGroup>>>,
    blobs: Mutex<HashMap<ItemId, Vec<u8>>>,
}

impl InMemoryContentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a stored content item as its group's primary. Enforces the
    /// membership invariant via `ContentGroup::set_primary`.
    pub async fn set_primary(&self, group: GroupId, item: ItemId) -> Result<()> {
        let mut groups = self.groups.lock().await;
        for item_groups in groups.values_mut() {
            if let Some(found) = item_groups.iter_mut().find(|g| g.id == group) {
                return found.set_primary(item);
            }
        }
        Err(UploadError::storage(format!("unknown group {}", group)))
    }

    pub async fn stored_bytes(&self, item: ItemId) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(&item).cloned()
    }
}

#[async_trait]
impl ContentService for InMemoryContentService {
    async fn groups_by_name(
        &self,
        _ctx: &RequestContext,
        item: ItemId,
        name: &str,
    ) -> Result<Vec<ContentGroup>> {
        let groups = self.groups.lock().await;
        Ok(groups
            .get(&item)
            .map(|item_groups| {
                item_groups
                    .iter()
                    .filter(|g| g.name == name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_group_with_item(
        &self,
        _ctx: &RequestContext,
        item: ItemId,
        name: &str,
        data: Vec<u8>,
    ) -> Result<ContentItem> {
        let content_item = ContentItem::new(data.len() as u64);
        let mut group = ContentGroup::new(name);
        group.items.push(content_item.clone());

        self.blobs.lock().await.insert(content_item.id, data);
        self.groups.lock().await.entry(item).or_default().push(group);

        Ok(content_item)
    }

    async fn append_item(
        &self,
        _ctx: &RequestContext,
        group: GroupId,
        data: Vec<u8>,
    ) -> Result<ContentItem> {
        let mut groups = self.groups.lock().await;
        let target = groups
            .values_mut()
            .flat_map(|item_groups| item_groups.iter_mut())
            .find(|g| g.id == group)
            .ok_or_else(|| UploadError::storage(format!("unknown group {}", group)))?;

        let content_item = ContentItem::new(data.len() as u64);
        target.items.push(content_item.clone());
        drop(groups);

        self.blobs.lock().await.insert(content_item.id, data);

        Ok(content_item)
    }

    async fn save_content_item(&self, _ctx: &RequestContext, item: &ContentItem) -> Result<()> {
        let mut groups = self.groups.lock().await;
        let stored = groups
            .values_mut()
            .flat_map(|item_groups| item_groups.iter_mut())
            .flat_map(|g| g.items.iter_mut())
            .find(|stored| stored.id == item.id)
            .ok_or_else(|| UploadError::storage(format!("unknown content item {}", item.id)))?;

        *stored = item.clone();
        Ok(())
    }

    async fn save_item(&self, _ctx: &RequestContext, item: ItemId) -> Result<()> {
        let groups = self.groups.lock().await;
        if groups.contains_key(&item) {
            Ok(())
        } else {
            Err(UploadError::storage(format!("unknown item {}", item)))
        }
    }
}

//! Built-in entity data mappers.

use global_search_shared::{EntityRecord, IndexItemType, SearchIndexItem};

use crate::mappers::EntityDataMapper;

/// Mapper for the Product entity.
///
/// Pulls the customer-facing fields out of the row: name as title, slug as
/// subtitle, description, and the featured asset as thumbnail. Channel and
/// enablement flags travel along in the metadata map.
#[derive(Debug, Default)]
pub struct ProductMapper;

impl ProductMapper {
    pub fn new() -> Self {
        Self
    }
}

impl EntityDataMapper for ProductMapper {
    fn map(&self, record: &EntityRecord) -> SearchIndexItem {
        let title = record
            .string_field("name")
            .map(str::to_string)
            .unwrap_or_else(|| record.id.clone());

        let mut item = SearchIndexItem::for_entity(
            record.entity_name.clone(),
            record.id.clone(),
            title,
            IndexItemType::Entity,
            record.updated_at,
        );
        item.subtitle = record.string_field("slug").map(str::to_string);
        item.description = record.string_field("description").map(str::to_string);
        item.thumbnail_url = record.string_field("featured_asset_url").map(str::to_string);

        for key in ["enabled", "channel_code"] {
            if let Some(value) = record.fields.get(key) {
                item.metadata.insert(key.to_string(), value.clone());
            }
        }

        item
    }
}

/// Generic fallback mapper.
///
/// Extracts only the stable entity key and the last-modified timestamp, so
/// unknown entity types are still indexable. The id doubles as the title to
/// keep the item well-formed.
#[derive(Debug, Default)]
pub struct GenericMapper;

impl GenericMapper {
    pub fn new() -> Self {
        Self
    }
}

impl EntityDataMapper for GenericMapper {
    fn map(&self, record: &EntityRecord) -> SearchIndexItem {
        SearchIndexItem::for_entity(
            record.entity_name.clone(),
            record.id.clone(),
            record.id.clone(),
            IndexItemType::Entity,
            record.updated_at,
        )
    }
}

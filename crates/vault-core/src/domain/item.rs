//! Item Entity
//!
//! A saved content entry: link, photo, video, file or article.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Identifier assigned by the backing store
pub type ItemId = String;

/// Content type of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Links,
    Photos,
    Videos,
    Files,
    Articles,
    /// Legacy name for links, still found in older collections
    Bookmarks,
}

impl ItemType {
    /// Types offered when creating content (the legacy alias is not)
    pub const SELECTABLE: [ItemType; 5] = [
        ItemType::Links,
        ItemType::Photos,
        ItemType::Videos,
        ItemType::Files,
        ItemType::Articles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Links => "links",
            ItemType::Photos => "photos",
            ItemType::Videos => "videos",
            ItemType::Files => "files",
            ItemType::Articles => "articles",
            ItemType::Bookmarks => "bookmarks",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "links" => Some(ItemType::Links),
            "photos" => Some(ItemType::Photos),
            "videos" => Some(ItemType::Videos),
            "files" => Some(ItemType::Files),
            "articles" => Some(ItemType::Articles),
            "bookmarks" => Some(ItemType::Bookmarks),
            _ => None,
        }
    }

    /// Folds the legacy alias into its current type
    pub fn canonical(self) -> Self {
        match self {
            ItemType::Bookmarks => ItemType::Links,
            other => other,
        }
    }

    /// Singular label used on badges and in the type selector
    pub fn label(&self) -> &'static str {
        match self.canonical() {
            ItemType::Links => "Link",
            ItemType::Photos => "Photo",
            ItemType::Videos => "Video",
            ItemType::Files => "File",
            _ => "Article",
        }
    }

    /// Font Awesome icon class
    pub fn icon(&self) -> &'static str {
        match self.canonical() {
            ItemType::Links => "fa-link",
            ItemType::Photos => "fa-image",
            ItemType::Videos => "fa-video",
            ItemType::Files => "fa-file",
            _ => "fa-newspaper",
        }
    }

    /// Articles and files carry their payload elsewhere, everything else needs a URL
    pub fn requires_url(&self) -> bool {
        !matches!(self, ItemType::Articles | ItemType::Files)
    }
}

/// Metadata of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub url: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_type: String,
}

/// A saved content entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Build an item from its editable fields, as a backing store does on insert
    pub fn from_fields(id: ItemId, fields: ItemFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            item_type: fields.item_type,
            title: fields.title,
            url: fields.url,
            description: fields.description,
            content: fields.content,
            tags: fields.tags,
            file_data: fields.file_data,
            storage_path: fields.storage_path,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Full overwrite of the editable fields
    pub fn apply_fields(&mut self, fields: ItemFields, now: DateTime<Utc>) {
        self.item_type = fields.item_type;
        self.title = fields.title;
        self.url = fields.url;
        self.description = fields.description;
        self.content = fields.content;
        self.tags = fields.tags;
        self.file_data = fields.file_data;
        self.storage_path = fields.storage_path;
        self.updated_at = Some(now);
    }

    pub fn fields(&self) -> ItemFields {
        ItemFields {
            item_type: self.item_type,
            title: self.title.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            file_data: self.file_data.clone(),
            storage_path: self.storage_path.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Where a click should take the reader: the link itself or the uploaded file
    pub fn target_url(&self) -> Option<&str> {
        if !self.url.is_empty() {
            return Some(&self.url);
        }
        self.file_data.as_ref().map(|f| f.url.as_str()).filter(|u| !u.is_empty())
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Editable fields of an item, written by the add/edit form
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub url: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub file_data: Option<FileData>,
    pub storage_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::find_by_id;

    #[test]
    fn test_item_type_serialization() {
        assert_eq!(ItemType::Photos.as_str(), "photos");
        assert_eq!(ItemType::from_str("bookmarks"), Some(ItemType::Bookmarks));
        assert_eq!(ItemType::from_str("notes"), None);
        assert_eq!(ItemType::Bookmarks.canonical(), ItemType::Links);
        assert_eq!(ItemType::Bookmarks.label(), "Link");
    }

    #[test]
    fn test_find_by_id() {
        let items: Vec<Item> = serde_json::from_str(
            r#"[{"id":"a","type":"links","title":"A"},{"id":"b","type":"articles","title":"B"}]"#,
        )
        .unwrap();
        assert_eq!(find_by_id(&items, &"b".to_string()).map(|i| i.title.as_str()), Some("B"));
        assert!(find_by_id(&items, &"c".to_string()).is_none());
    }

    #[test]
    fn test_deserialize_local_record() {
        let json = r#"{
            "id": "local_1700000000000",
            "type": "articles",
            "title": "My Post",
            "url": "",
            "description": "",
            "content": "<p>Hi</p>",
            "createdAt": "2024-01-02T03:04:05.678Z"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::Articles);
        assert!(item.tags.is_empty());
        assert!(item.storage_path.is_none());
        assert!(item.created_at.is_some());
        assert!(item.updated_at.is_none());
    }

    #[test]
    fn test_target_url_prefers_link_then_file() {
        let mut item = Item::from_fields("a".into(), ItemFields::default(), Utc::now());
        assert_eq!(item.target_url(), None);

        item.file_data = Some(FileData {
            url: "https://files.example/report.pdf".into(),
            file_name: "report.pdf".into(),
            file_size: 10,
            file_type: "application/pdf".into(),
        });
        assert_eq!(item.target_url(), Some("https://files.example/report.pdf"));

        item.url = "https://example.com".into();
        assert_eq!(item.target_url(), Some("https://example.com"));
    }

    #[test]
    fn test_apply_fields_refreshes_updated_at() {
        let created = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2024-02-01T00:00:00Z").unwrap().with_timezone(&Utc);
        let mut item = Item::from_fields("a".into(), ItemFields { title: "Old".into(), ..Default::default() }, created);

        item.apply_fields(ItemFields { title: "New".into(), ..Default::default() }, later);
        assert_eq!(item.title, "New");
        assert_eq!(item.created_at, Some(created));
        assert_eq!(item.updated_at, Some(later));
    }
}

//! Add/Edit form
//!
//! Open/closed state machine, the pending draft, required-field checks and
//! conversion of a draft (plus an optional upload) into persisted fields.

use crate::domain::{FileData, Item, ItemFields, ItemId, ItemType, ValidationError};
use crate::filter::Tab;
use crate::upload::UploadedFile;

/// What a submit does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(FormMode),
}

impl FormState {
    pub fn open_add() -> Self {
        FormState::Open(FormMode::Add)
    }

    pub fn open_edit(id: ItemId) -> Self {
        FormState::Open(FormMode::Edit(id))
    }

    /// Cancel, backdrop click and successful submit all close the form
    pub fn close() -> Self {
        FormState::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open(_))
    }

    pub fn mode(&self) -> Option<&FormMode> {
        match self {
            FormState::Open(mode) => Some(mode),
            FormState::Closed => None,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            FormState::Open(FormMode::Edit(id)) => Some(id),
            _ => None,
        }
    }
}

/// Where the item's payload comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentSource {
    #[default]
    Url,
    File,
    Editor,
}

impl ContentSource {
    /// Sources the form offers for a type; the first is the default
    pub fn options_for(item_type: ItemType) -> &'static [ContentSource] {
        match item_type.canonical() {
            ItemType::Links => &[ContentSource::Url],
            ItemType::Photos | ItemType::Videos => &[ContentSource::Url, ContentSource::File],
            ItemType::Files => &[ContentSource::File],
            _ => &[ContentSource::Editor],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentSource::Url => "URL",
            ContentSource::File => "File",
            ContentSource::Editor => "Editor",
        }
    }
}

/// Pending values of the open form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub item_type: ItemType,
    pub source: ContentSource,
    pub title: String,
    pub url: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Upload carried over from the item being edited
    pub existing_file: Option<(FileData, Option<String>)>,
}

impl ItemDraft {
    /// Fresh draft for add-mode, typed after the active tab
    pub fn for_tab(tab: Tab) -> Self {
        let mut draft = Self::default();
        draft.set_type(tab.item_type().unwrap_or(ItemType::Links));
        draft
    }

    /// Pre-filled draft for edit-mode
    pub fn from_item(item: &Item) -> Self {
        let item_type = item.item_type.canonical();
        let existing_file = item.file_data.clone().map(|f| (f, item.storage_path.clone()));
        let source = if existing_file.is_some() && ContentSource::options_for(item_type).contains(&ContentSource::File) {
            ContentSource::File
        } else {
            ContentSource::options_for(item_type)[0]
        };
        Self {
            item_type,
            source,
            title: item.title.clone(),
            url: if source == ContentSource::File { String::new() } else { item.url.clone() },
            description: item.description.clone(),
            content: item.content.clone(),
            tags: item.tags.clone(),
            existing_file,
        }
    }

    /// Take the editor's current markup while the editor is the active source
    pub fn capture_editor(&mut self, html: Option<String>) {
        if self.source == ContentSource::Editor {
            if let Some(html) = html {
                self.content = html;
            }
        }
    }

    /// Switch type, resetting the source when the new type does not offer it
    pub fn set_type(&mut self, item_type: ItemType) {
        self.item_type = item_type;
        let options = ContentSource::options_for(item_type);
        if !options.contains(&self.source) {
            self.source = options[0];
        }
    }

    pub fn needs_upload(&self) -> bool {
        self.source == ContentSource::File
    }

    /// Required-field checks, run before any upload starts
    pub fn validate(&self, file_selected: bool) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        match self.source {
            ContentSource::Url if self.url.trim().is_empty() => Err(ValidationError::MissingUrl),
            ContentSource::File if !file_selected && self.existing_file.is_none() => Err(ValidationError::MissingFile),
            _ => Ok(()),
        }
    }

    /// Fields to persist. A fresh upload replaces any carried-over file.
    pub fn into_fields(self, upload: Option<UploadedFile>) -> ItemFields {
        let item_type = self.item_type;
        let file = match (self.source, upload) {
            (ContentSource::File, Some(uploaded)) => Some(uploaded.into_parts()),
            (ContentSource::File, None) => self.existing_file,
            _ => None,
        };

        let url = match (item_type.canonical(), &file) {
            (ItemType::Articles | ItemType::Files, _) => String::new(),
            // inlined uploads keep their data URL in fileData only
            (_, Some((data, Some(_)))) => data.url.clone(),
            (_, Some((_, None))) => String::new(),
            _ => self.url.trim().to_string(),
        };

        let (file_data, storage_path) = match file {
            Some((data, path)) => (Some(data), path),
            None => (None, None),
        };

        ItemFields {
            item_type,
            title: self.title.trim().to_string(),
            url,
            description: self.description.trim().to_string(),
            content: if item_type == ItemType::Articles { self.content } else { String::new() },
            tags: self.tags,
            file_data,
            storage_path,
        }
    }

    /// Add one tag unless an equal one (ignoring case) is already present
    pub fn add_tag(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.tags.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            return false;
        }
        self.tags.push(name.to_string());
        true
    }

    pub fn add_tags(&mut self, input: &str) {
        for name in parse_tags(input) {
            self.add_tag(&name);
        }
    }

    pub fn remove_tag(&mut self, name: &str) {
        self.tags.retain(|t| t != name);
    }
}

/// Comma or semicolon separated names; trimmed, first spelling wins
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in input.split([',', ';']) {
        let name = part.trim();
        if !name.is_empty() && !tags.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            tags.push(name.to_string());
        }
    }
    tags
}

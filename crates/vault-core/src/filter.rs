//! Filter/Tag Engine
//!
//! Visible set = items of the active tab, narrowed by the optional tag filter.

use std::collections::BTreeSet;

use crate::domain::{Item, ItemType};

/// Top-level type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    All,
    #[default]
    Links,
    Photos,
    Videos,
    Files,
    Articles,
}

impl Tab {
    pub const ALL_TABS: [Tab; 6] = [Tab::All, Tab::Links, Tab::Photos, Tab::Videos, Tab::Files, Tab::Articles];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Links => "links",
            Tab::Photos => "photos",
            Tab::Videos => "videos",
            Tab::Files => "files",
            Tab::Articles => "articles",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Tab::ALL_TABS.iter().copied().find(|t| t.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Links => "Links",
            Tab::Photos => "Photos",
            Tab::Videos => "Videos",
            Tab::Files => "Files",
            Tab::Articles => "Articles",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.item_type() {
            Some(t) => t.icon(),
            None => "fa-border-all",
        }
    }

    /// Type a new item defaults to when created from this tab
    pub fn item_type(&self) -> Option<ItemType> {
        match self {
            Tab::All => None,
            Tab::Links => Some(ItemType::Links),
            Tab::Photos => Some(ItemType::Photos),
            Tab::Videos => Some(ItemType::Videos),
            Tab::Files => Some(ItemType::Files),
            Tab::Articles => Some(ItemType::Articles),
        }
    }

    /// The links tab also shows legacy bookmarks
    pub fn matches(&self, item_type: ItemType) -> bool {
        match self.item_type() {
            None => true,
            Some(t) => t == item_type.canonical(),
        }
    }
}

pub fn by_tab<'a>(items: &'a [Item], tab: Tab) -> impl Iterator<Item = &'a Item> + 'a {
    items.iter().filter(move |item| tab.matches(item.item_type))
}

/// Items shown in the grid, in store order
pub fn visible_items(items: &[Item], tab: Tab, tag: Option<&str>) -> Vec<Item> {
    by_tab(items, tab)
        .filter(|item| tag.map_or(true, |t| item.has_tag(t)))
        .cloned()
        .collect()
}

/// Alphabetical union of the tags in the active tab
pub fn tag_options(items: &[Item], tab: Tab) -> Vec<String> {
    by_tab(items, tab)
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Single-select toggle: picking the active tag clears the filter
pub fn toggle_tag(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

/// Drop a tag filter that no longer matches anything in the active tab
pub fn reconcile_tag(items: &[Item], tab: Tab, current: Option<&str>) -> Option<String> {
    let tag = current?;
    by_tab(items, tab)
        .any(|item| item.has_tag(tag))
        .then(|| tag.to_string())
}

/// Every tag in the vault, for form suggestions
pub fn all_tags(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemFields;
    use chrono::Utc;

    fn make_item(id: &str, item_type: ItemType, tags: &[&str]) -> Item {
        Item::from_fields(
            id.to_string(),
            ItemFields {
                item_type,
                title: format!("Item {}", id),
                url: "https://example.com".into(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            make_item("1", ItemType::Links, &["work"]),
            make_item("2", ItemType::Bookmarks, &["work", "rust"]),
            make_item("3", ItemType::Photos, &["work", "cats"]),
            make_item("4", ItemType::Links, &[]),
            make_item("5", ItemType::Files, &["tax"]),
            make_item("6", ItemType::Articles, &["rust"]),
        ]
    }

    #[test]
    fn test_links_tab_folds_bookmarks() {
        let items = sample();
        assert_eq!(ids(&visible_items(&items, Tab::Links, None)), vec!["1", "2", "4"]);
        assert_eq!(ids(&visible_items(&items, Tab::Files, None)), vec!["5"]);
        assert_eq!(visible_items(&items, Tab::All, None).len(), items.len());
    }

    #[test]
    fn test_tag_and_tab_filters_commute() {
        let items = sample();
        for tab in Tab::ALL_TABS {
            for tag in ["work", "rust", "cats", "tax", "missing"] {
                let tab_then_tag = visible_items(&items, tab, Some(tag));
                let tagged: Vec<Item> = items.iter().filter(|i| i.has_tag(tag)).cloned().collect();
                let tag_then_tab = visible_items(&tagged, tab, None);
                assert_eq!(tab_then_tag, tag_then_tab, "tab={:?} tag={}", tab, tag);
            }
        }
    }

    #[test]
    fn test_tag_options_follow_active_tab() {
        let items = sample();
        assert_eq!(tag_options(&items, Tab::Links), vec!["rust", "work"]);
        assert_eq!(tag_options(&items, Tab::Photos), vec!["cats", "work"]);
        assert_eq!(tag_options(&items, Tab::All), vec!["cats", "rust", "tax", "work"]);
        assert!(tag_options(&[make_item("x", ItemType::Videos, &[])], Tab::Videos).is_empty());
    }

    #[test]
    fn test_toggle_twice_clears_filter() {
        let first = toggle_tag(None, "work");
        assert_eq!(first.as_deref(), Some("work"));
        assert_eq!(toggle_tag(first.as_deref(), "work"), None);
        assert_eq!(toggle_tag(Some("work"), "rust").as_deref(), Some("rust"));
    }

    #[test]
    fn test_work_tag_on_links_tab() {
        let items = vec![
            make_item("a", ItemType::Links, &["work"]),
            make_item("b", ItemType::Links, &[]),
            make_item("c", ItemType::Links, &["work"]),
            make_item("d", ItemType::Links, &[]),
            make_item("e", ItemType::Links, &["work"]),
        ];
        assert_eq!(ids(&visible_items(&items, Tab::Links, Some("work"))), vec!["a", "c", "e"]);
    }

    #[test]
    fn test_stale_tag_filter_is_dropped() {
        let mut items = vec![
            make_item("a", ItemType::Links, &["work"]),
            make_item("b", ItemType::Links, &[]),
            make_item("c", ItemType::Photos, &["cats"]),
        ];
        assert_eq!(reconcile_tag(&items, Tab::Links, Some("work")).as_deref(), Some("work"));
        assert_eq!(reconcile_tag(&items, Tab::Links, Some("cats")), None);
        assert_eq!(reconcile_tag(&items, Tab::Links, None), None);

        // last "work" item removed: the tab must not stay empty behind a hidden filter
        items.remove(0);
        assert!(tag_options(&items, Tab::Links).is_empty());
        let tag = reconcile_tag(&items, Tab::Links, Some("work"));
        assert_eq!(tag, None);
        assert_eq!(visible_items(&items, Tab::Links, tag.as_deref()).len(), 1);
    }

    #[test]
    fn test_tab_round_trips_through_str() {
        for tab in Tab::ALL_TABS {
            assert_eq!(Tab::from_str(tab.as_str()), Some(tab));
        }
        assert_eq!(Tab::from_str("bookmarks"), None);
    }
}

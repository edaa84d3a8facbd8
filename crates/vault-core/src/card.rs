//! Card view-model
//!
//! Everything a card needs, derived from an Item. The UI renders these
//! values through escaping templates; nothing here produces markup.

use std::sync::OnceLock;

use chrono::{DateTime, Local, TimeZone};
use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::domain::{Item, ItemId, ItemType};

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static YOUTUBE_RE: OnceLock<Regex> = OnceLock::new();
static VIMEO_RE: OnceLock<Regex> = OnceLock::new();
static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn entity_re() -> &'static Regex {
    ENTITY_RE.get_or_init(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid entity regex"))
}

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"))
}

fn youtube_re() -> &'static Regex {
    YOUTUBE_RE.get_or_init(|| {
        Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
            .expect("valid youtube regex")
    })
}

fn vimeo_re() -> &'static Regex {
    VIMEO_RE.get_or_init(|| Regex::new(r"vimeo\.com/(\d+)").expect("valid vimeo regex"))
}

/// Card size by type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Single line: icon, title, domain or file name
    Compact,
    /// Preview area with a type badge
    Preview,
}

impl CardLayout {
    pub fn for_type(item_type: ItemType) -> Self {
        match item_type.canonical() {
            ItemType::Links | ItemType::Files => CardLayout::Compact,
            _ => CardLayout::Preview,
        }
    }
}

/// What a click on a card does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Admin options menu: edit, view, delete
    ShowOptions(ItemId),
    /// In-page article reader
    OpenReader(ItemId),
    /// In-page player for a recognized video host
    OpenPlayer { embed_url: String },
    /// New browsing context
    OpenExternal(String),
    None,
}

impl CardAction {
    pub fn for_item(item: &Item, is_admin: bool) -> Self {
        if is_admin {
            return CardAction::ShowOptions(item.id.clone());
        }
        Self::view(item)
    }

    /// The non-admin action, also offered as "view" in the options menu
    pub fn view(item: &Item) -> Self {
        match item.item_type.canonical() {
            ItemType::Articles => CardAction::OpenReader(item.id.clone()),
            ItemType::Videos => match embed_url(&item.url) {
                Some(embed_url) => CardAction::OpenPlayer { embed_url },
                None => Self::external(item),
            },
            _ => Self::external(item),
        }
    }

    fn external(item: &Item) -> Self {
        item.target_url()
            .map(|url| CardAction::OpenExternal(url.to_string()))
            .unwrap_or(CardAction::None)
    }
}

/// Display values for one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: ItemId,
    pub item_type: ItemType,
    pub layout: CardLayout,
    pub type_label: &'static str,
    pub icon: &'static str,
    pub title: String,
    /// Domain for links, file name for uploads
    pub subtitle: Option<String>,
    pub favicon: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub size_label: Option<String>,
    pub date_label: Option<String>,
    pub tags: Vec<String>,
}

impl CardView {
    pub fn build(item: &Item, excerpt_len: usize) -> Self {
        let item_type = item.item_type.canonical();
        let file_name = item
            .file_data
            .as_ref()
            .map(|f| f.file_name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| item.storage_path.as_deref().map(file_name_from_path));

        let (subtitle, favicon) = match item_type {
            ItemType::Files => (file_name, None),
            _ if !item.url.is_empty() && !item.url.starts_with("data:") => {
                let domain = domain_of(&item.url);
                let favicon = favicon_url(&item.url);
                (Some(domain), favicon)
            }
            _ => (file_name, None),
        };

        let excerpt = match item_type {
            ItemType::Articles => Some(excerpt(&item.content, excerpt_len)).filter(|e| !e.is_empty()),
            _ => None,
        };

        let thumbnail = match item_type {
            ItemType::Photos => item.target_url().map(str::to_string),
            _ => None,
        };

        Self {
            id: item.id.clone(),
            item_type,
            layout: CardLayout::for_type(item_type),
            type_label: item_type.label(),
            icon: item_type.icon(),
            title: item.title.clone(),
            subtitle,
            favicon,
            description: Some(item.description.trim().to_string()).filter(|d| !d.is_empty()),
            excerpt,
            thumbnail,
            size_label: item.file_data.as_ref().filter(|f| f.file_size > 0).map(|f| format_size(f.file_size)),
            date_label: item.created_at.map(|dt| format_date(&dt.with_timezone(&Local))),
            tags: item.tags.clone(),
        }
    }
}

/// Host without a leading `www.`; the raw string when it does not parse
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// The site's own favicon for http(s) links
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?;
    Some(format!("{}://{}/favicon.ico", parsed.scheme(), host))
}

/// YouTube and Vimeo links as embeddable player URLs
pub fn embed_url(url: &str) -> Option<String> {
    if let Some(caps) = youtube_re().captures(url) {
        return Some(format!("https://www.youtube.com/embed/{}", &caps[1]));
    }
    if let Some(caps) = vimeo_re().captures(url) {
        return Some(format!("https://player.vimeo.com/video/{}", &caps[1]));
    }
    None
}

/// Plain-text preview of an HTML body
pub fn excerpt(html: &str, max_chars: usize) -> String {
    let text = tag_re().replace_all(html, " ");
    let text = decode_entities(&text);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Named and numeric character references; unknown ones stay as written
fn decode_entities(text: &str) -> String {
    entity_re()
        .replace_all(text, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = match body {
                "nbsp" => Some(' '),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => body
                    .strip_prefix("#x")
                    .or_else(|| body.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| body.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Last path segment, percent-decoded, without the upload timestamp prefix
pub fn file_name_from_path(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let decoded = percent_decode_str(segment).decode_utf8_lossy().to_string();
    match decoded.split_once('_') {
        Some((prefix, rest)) if !rest.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) => rest.to_string(),
        _ => decoded,
    }
}

/// e.g. "18 October 2026"
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%-d %B %Y").to_string()
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let b = bytes as f64;
    if b >= GB {
        format!("{:.1} GB", b / GB)
    } else if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.0} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileData, ItemFields};
    use chrono::Utc;

    fn make_item(item_type: ItemType, url: &str) -> Item {
        Item::from_fields(
            "id1".into(),
            ItemFields { item_type, title: "Title".into(), url: url.into(), ..Default::default() },
            Utc::now(),
        )
    }

    #[test]
    fn test_domain_strips_www_and_falls_back() {
        assert_eq!(domain_of("https://www.example.com/path?q=1"), "example.com");
        assert_eq!(domain_of("http://sub.example.org"), "sub.example.org");
        assert_eq!(domain_of("not a url"), "not a url");
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(
            embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(embed_url("https://vimeo.com/76979871").as_deref(), Some("https://player.vimeo.com/video/76979871"));
        assert_eq!(embed_url("https://example.com/clip.mp4"), None);
    }

    #[test]
    fn test_excerpt_strips_markup() {
        assert_eq!(excerpt("<p>Hi</p>", 150), "Hi");
        assert_eq!(excerpt("<h1>A&amp;B</h1>\n<p>one&nbsp;two</p>", 150), "A&B one two");
        assert_eq!(excerpt("<p>abcdefghij</p>", 4), "abcd…");
    }

    #[test]
    fn test_excerpt_decodes_numeric_entities() {
        assert_eq!(excerpt("<p>It&#8217;s &#x201C;done&#x201D;</p>", 150), "It\u{2019}s \u{201C}done\u{201D}");
        assert_eq!(excerpt("<p>&#39;a&#39; &amp;lt; b</p>", 150), "'a' &lt; b");
        assert_eq!(excerpt("<p>&bogus; &#xD800;</p>", 150), "&bogus; &#xD800;");
    }

    #[test]
    fn test_layout_by_type() {
        assert_eq!(CardLayout::for_type(ItemType::Bookmarks), CardLayout::Compact);
        assert_eq!(CardLayout::for_type(ItemType::Files), CardLayout::Compact);
        assert_eq!(CardLayout::for_type(ItemType::Photos), CardLayout::Preview);
        assert_eq!(CardLayout::for_type(ItemType::Articles), CardLayout::Preview);
    }

    #[test]
    fn test_click_actions() {
        let link = make_item(ItemType::Links, "https://example.com");
        assert_eq!(CardAction::for_item(&link, true), CardAction::ShowOptions("id1".into()));
        assert_eq!(CardAction::for_item(&link, false), CardAction::OpenExternal("https://example.com".into()));

        let article = make_item(ItemType::Articles, "");
        assert_eq!(CardAction::for_item(&article, false), CardAction::OpenReader("id1".into()));

        let video = make_item(ItemType::Videos, "https://youtu.be/dQw4w9WgXcQ");
        assert!(matches!(CardAction::for_item(&video, false), CardAction::OpenPlayer { .. }));

        let clip = make_item(ItemType::Videos, "https://cdn.example.com/clip.mp4");
        assert_eq!(CardAction::for_item(&clip, false), CardAction::OpenExternal("https://cdn.example.com/clip.mp4".into()));
    }

    #[test]
    fn test_file_card_shows_file_name() {
        let mut file = make_item(ItemType::Files, "");
        file.storage_path = Some("uploads/1700000000000_annual%20report.pdf".into());
        file.file_data = Some(FileData {
            url: "https://storage.example/o/x".into(),
            file_name: String::new(),
            file_size: 2048,
            file_type: "application/pdf".into(),
        });
        let view = CardView::build(&file, 150);
        assert_eq!(view.layout, CardLayout::Compact);
        assert_eq!(view.subtitle.as_deref(), Some("annual report.pdf"));
        assert_eq!(view.size_label.as_deref(), Some("2 KB"));
        assert_eq!(CardAction::for_item(&file, false), CardAction::OpenExternal("https://storage.example/o/x".into()));
    }

    #[test]
    fn test_article_card_has_excerpt_and_no_domain() {
        let mut article = make_item(ItemType::Articles, "");
        article.content = "<p>Hi</p>".into();
        let view = CardView::build(&article, 150);
        assert_eq!(view.excerpt.as_deref(), Some("Hi"));
        assert_eq!(view.subtitle, None);
        assert_eq!(view.type_label, "Article");
    }

    #[test]
    fn test_format_helpers() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(format_date(&dt), "18 October 2026");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}

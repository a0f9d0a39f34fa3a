use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

/// A CDN-served rendering of a source image at one size.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageFormat {
    pub width: u32,
    pub height: u32,
    pub mime: String,
    pub size: f64,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageFormats {
    #[serde(default)]
    pub thumbnail: Option<ImageFormat>,
    #[serde(default)]
    pub small: Option<ImageFormat>,
    #[serde(default)]
    pub medium: Option<ImageFormat>,
    #[serde(default)]
    pub large: Option<ImageFormat>,
}

/// One entry of a post's media sequence, as delivered by the CMS.
#[derive(Debug, Clone, Deserialize)]
pub struct PostImage {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "alternativeText", default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub formats: Option<ImageFormats>,
    pub url: String,
}

/// Relation envelope the CMS wraps single related entities in.
#[derive(Debug, Clone, Deserialize)]
pub struct Relation<T> {
    #[serde(default = "Option::default")]
    pub data: Option<Entity<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entity<T> {
    pub attributes: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListRelation<T> {
    #[serde(default, deserialize_with = "null_to_empty")]
    pub data: Vec<Entity<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorAttributes {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryAttributes {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagAttributes {
    pub name: String,
    pub slug: String,
}

/// Wire shape of one post record. Everything except `id` is optional here;
/// required-field enforcement happens in [`BlogPost::from_raw`] so a bad
/// record is dropped instead of failing the whole collection.
#[derive(Debug, Deserialize)]
pub struct RawPost {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub publisheddate: Option<String>,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub featuredimage: Vec<PostImage>,
    #[serde(default)]
    pub author: Option<Relation<AuthorAttributes>>,
    // Some upstream records deliver this relation under a misspelled key.
    #[serde(default, alias = "catagory")]
    pub category: Option<Relation<CategoryAttributes>>,
    #[serde(default)]
    pub tags: Option<ListRelation<TagAttributes>>,
}

/// Normalized post entity used everywhere past the CMS boundary.
#[derive(Debug, Clone)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    /// CMS-managed publication timestamp (RFC 3339).
    pub published_at: Option<String>,
    /// Editorial override date, preferred for display when present.
    pub publisheddate: Option<String>,
    pub author: Option<String>,
    pub category: Option<CategoryAttributes>,
    pub tags: Vec<TagAttributes>,
    pub images: Vec<PostImage>,
}

impl BlogPost {
    /// Normalizes a raw record. `None` means the record lacks a usable
    /// title, slug, or content and must be discarded.
    pub fn from_raw(raw: RawPost) -> Option<Self> {
        let title = non_empty(raw.title)?;
        let slug = non_empty(raw.slug)?;
        let content = non_empty(raw.content)?;

        Some(Self {
            id: raw.id,
            title,
            slug,
            content,
            published_at: raw.published_at,
            publisheddate: raw.publisheddate,
            author: raw.author.and_then(|r| r.data).map(|e| e.attributes.name),
            category: raw.category.and_then(|r| r.data).map(|e| e.attributes),
            tags: raw
                .tags
                .map(|r| r.data.into_iter().map(|e| e.attributes).collect())
                .unwrap_or_default(),
            images: raw.featuredimage,
        })
    }

    /// Human-readable publication date, editorial date winning over the CMS
    /// timestamp. `None` when neither is present or parseable.
    pub fn display_date(&self) -> Option<String> {
        let raw = self
            .publisheddate
            .as_deref()
            .or(self.published_at.as_deref())?;
        let date = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()?;
        Some(date.format("%B %-d, %Y").to_string())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// The CMS sends `null`, not an absent key, for empty media and list fields;
// `#[serde(default)]` alone only covers the absent case.
fn null_to_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

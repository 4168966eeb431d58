//! Catalog response documents
//!
//! Only the fields the harvester reads are modelled; metadata records are
//! persisted from the raw body, never re-serialized from these types.

use crate::identifier::IndustryIdentifier;
use serde::Deserialize;

/// Body of a `volumes` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Volume {
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeInfo {
    #[serde(rename = "industryIdentifiers", default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,

    #[serde(rename = "imageLinks", default)]
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageLinks {
    #[serde(rename = "smallThumbnail", default)]
    pub small_thumbnail: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl VolumesResponse {
    /// Every identifier of every volume, in response order
    pub fn identifiers(&self) -> Vec<IndustryIdentifier> {
        self.items
            .iter()
            .flat_map(|item| item.volume_info.industry_identifiers.iter().cloned())
            .collect()
    }

    /// Thumbnail of the first volume, preferring the larger image
    pub fn thumbnail(&self) -> Option<String> {
        let links = self.items.first()?.volume_info.image_links.as_ref()?;
        let usable = |link: &Option<String>| {
            link.as_ref()
                .map(|url| url.trim())
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        };
        usable(&links.thumbnail).or_else(|| usable(&links.small_thumbnail))
    }
}

/// Result of fetching one ISBN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedVolume {
    /// True if the catalog returned at least one volume
    pub found: bool,

    /// Response body exactly as received
    pub raw_body: String,

    /// Cover image reference, if the first volume has one
    pub thumbnail_url: Option<String>,
}

impl FetchedVolume {
    /// Builds a fetch result from a raw response body
    pub fn from_body(raw_body: String) -> Result<Self, serde_json::Error> {
        let parsed: VolumesResponse = serde_json::from_str(&raw_body)?;
        Ok(Self {
            found: !parsed.items.is_empty(),
            thumbnail_url: parsed.thumbnail(),
            raw_body,
        })
    }
}

//! Search result types and the provider's wire shapes

use serde::{Deserialize, Serialize};

/// A track record, flattened from the provider's nested payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Artist names in the provider's credit order.
    pub artists: Vec<String>,
    /// Largest album artwork image, when the album carries any.
    pub album_artwork_url: Option<String>,
}

/// Wire shape of `GET /search?type=track`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub tracks: TrackPage,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumRef {
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageRef {
    pub url: String,
}

impl From<TrackItem> for Track {
    fn from(item: TrackItem) -> Self {
        Track {
            id: item.id,
            name: item.name,
            artists: item.artists.into_iter().map(|a| a.name).collect(),
            // The provider orders images largest-first.
            album_artwork_url: item
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
        }
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::ItunesError;
use crate::query::QueryParams;
use itunes_config::SearchDefaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

macro_rules! string_filter {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_filter!(
    /// Two-letter store country code (e.g., "US", "GB").
    Country
);
string_filter!(
    /// Store language (e.g., "en_us", "ja_jp").
    Language
);
string_filter!(
    /// Media type to search in (e.g., "music", "movie", "podcast").
    Media
);
string_filter!(
    /// Attribute the term is matched against (e.g., "artistTerm", "songTerm").
    Attribute
);

/// Kind of item a search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "movieArtist")]
    MovieArtist,
    #[serde(rename = "podcast")]
    Podcast,
    #[serde(rename = "podcastAuthor")]
    PodcastAuthor,
    #[serde(rename = "music")]
    Music,
    #[serde(rename = "musicVideo")]
    MusicVideo,
    #[serde(rename = "musicArtist")]
    MusicArtist,
    #[serde(rename = "audiobook")]
    Audiobook,
    #[serde(rename = "audiobookAuthor")]
    AudiobookAuthor,
    #[serde(rename = "shortFilm")]
    ShortFilm,
    #[serde(rename = "shortFilmArtist")]
    ShortFilmArtist,
    #[serde(rename = "tvShow")]
    TvShow,
    #[serde(rename = "tvEpisode")]
    TvEpisode,
    #[serde(rename = "tvSeason")]
    TvSeason,
    #[serde(rename = "software")]
    Software,
    #[serde(rename = "iPadSoftware")]
    IPadSoftware,
    #[serde(rename = "macSoftware")]
    MacSoftware,
    #[serde(rename = "ebook")]
    Ebook,
    #[serde(rename = "all")]
    All,
    #[serde(rename = "allTrack")]
    AllTrack,
}

impl Entity {
    pub const ALL: [Entity; 20] = [
        Entity::Movie,
        Entity::MovieArtist,
        Entity::Podcast,
        Entity::PodcastAuthor,
        Entity::Music,
        Entity::MusicVideo,
        Entity::MusicArtist,
        Entity::Audiobook,
        Entity::AudiobookAuthor,
        Entity::ShortFilm,
        Entity::ShortFilmArtist,
        Entity::TvShow,
        Entity::TvEpisode,
        Entity::TvSeason,
        Entity::Software,
        Entity::IPadSoftware,
        Entity::MacSoftware,
        Entity::Ebook,
        Entity::All,
        Entity::AllTrack,
    ];

    /// Value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Movie => "movie",
            Entity::MovieArtist => "movieArtist",
            Entity::Podcast => "podcast",
            Entity::PodcastAuthor => "podcastAuthor",
            Entity::Music => "music",
            Entity::MusicVideo => "musicVideo",
            Entity::MusicArtist => "musicArtist",
            Entity::Audiobook => "audiobook",
            Entity::AudiobookAuthor => "audiobookAuthor",
            Entity::ShortFilm => "shortFilm",
            Entity::ShortFilmArtist => "shortFilmArtist",
            Entity::TvShow => "tvShow",
            Entity::TvEpisode => "tvEpisode",
            Entity::TvSeason => "tvSeason",
            Entity::Software => "software",
            Entity::IPadSoftware => "iPadSoftware",
            Entity::MacSoftware => "macSoftware",
            Entity::Ebook => "ebook",
            Entity::All => "all",
            Entity::AllTrack => "allTrack",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = ItunesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ItunesError::InvalidRequest(format!("unknown entity: {s}")))
    }
}

/// Search request.
///
/// When `id` is set the request is a lookup and every other field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub term: String,
    pub country: Option<Country>,
    pub media: Option<Media>,
    pub entity: Option<Entity>,
    pub attribute: Option<Attribute>,
    #[serde(rename = "lang")]
    pub language: Option<Language>,
    /// Maximum number of results (the service caps this at 200).
    pub limit: Option<u32>,
    pub version: Option<String>,
    /// Sent as `Yes` / `No`, the values the service documents for `explicit`,
    /// rather than `true` / `false`.
    #[serde(rename = "explicit")]
    pub explicit_content: Option<bool>,
    pub id: Option<String>,
}

impl Search {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    /// A request that resolves through the lookup endpoint.
    pub fn lookup(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn country(mut self, country: impl Into<Country>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn media(mut self, media: impl Into<Media>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn language(mut self, language: impl Into<Language>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn explicit_content(mut self, allowed: bool) -> Self {
        self.explicit_content = Some(allowed);
        self
    }

    /// Fill filters left unset from configured defaults.
    pub fn with_defaults(mut self, defaults: &SearchDefaults) -> Self {
        if self.country.is_none() {
            self.country = defaults.country.clone().map(Country::from);
        }
        if self.language.is_none() {
            self.language = defaults.lang.clone().map(Language::from);
        }
        if self.limit.is_none() {
            self.limit = defaults.limit;
        }
        self
    }

    /// Trimmed identifier, if one is present.
    pub fn lookup_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Query parameters for the search endpoint. `id` is never included.
    #[instrument(target = "itunes", level = "debug", skip(self), fields(term = %self.term))]
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_scalar("term", Some(&self.term))
            .push_scalar("country", self.country.as_ref())
            .push_scalar("media", self.media.as_ref())
            .push_scalar("entity", self.entity)
            .push_scalar("attribute", self.attribute.as_ref())
            .push_scalar("lang", self.language.as_ref())
            .push_scalar("limit", self.limit.filter(|l| *l > 0))
            .push_scalar("version", self.version.as_ref())
            .push_scalar(
                "explicit",
                self.explicit_content
                    .map(|allowed| if allowed { "Yes" } else { "No" }),
            );
        params
    }
}

/// Decoded response of the search and lookup endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub result_count: u64,
    #[serde(default)]
    pub results: Vec<SearchResultItem>,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResultItem> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a SearchResultItem;
    type IntoIter = std::slice::Iter<'a, SearchResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// One catalog entry. Fields absent from the response keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResultItem {
    /// Item kind (e.g., "song", "feature-movie", "podcast").
    pub kind: String,
    pub track_id: u64,
    pub collection_id: u64,
    pub artist_name: String,
    pub track_price: f64,
    pub country: String,
    pub currency: String,
    pub collection_name: String,
    pub primary_genre_name: String,
    pub track_name: String,
    pub track_censored_name: String,
    pub track_number: u32,
    pub track_time_millis: u64,
    pub track_view_url: String,
    pub collection_price: f64,
    pub collection_view_url: String,
    pub artist_view_url: String,
    pub preview_url: String,
    #[serde(rename = "isStreamable")]
    pub streamable: bool,
    pub artwork_url100: String,
    pub artwork_url60: String,
    pub artwork_url30: String,
}

impl SearchResultItem {
    /// First non-empty store page URL: track, then collection, then artist.
    pub fn view_url(&self) -> Option<&str> {
        [
            &self.track_view_url,
            &self.collection_view_url,
            &self.artist_view_url,
        ]
        .into_iter()
        .map(String::as_str)
        .find(|url| !url.is_empty())
    }
}

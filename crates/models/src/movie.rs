use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A movie record as found in TMDB-style listings.
///
/// Optional fields tolerate both `null` and absence on input. Serializing
/// writes every field, with `null` for an unset one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub adult: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub video: bool,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

fn null_as_false<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(de)?.unwrap_or(false))
}

impl Record for Movie {
    type Key = i64;
    const ENTITY: &'static str = "movie";

    fn key(&self) -> &i64 {
        &self.id
    }

    fn key_matches(&self, key: &i64) -> bool {
        self.id == *key
    }
}

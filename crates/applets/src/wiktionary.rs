//! Wiktionary definitions as JSON
//!
//! Uses the REST definition endpoint, which groups usages by language code:
//! `{ "en": [ { "partOfSpeech", "language", "definitions": [...] } ], ... }`.
//! Definitions arrive as HTML snippets and are reduced to plain text.

use std::collections::BTreeMap;

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppletResult;
use crate::fetch::Curl;
use crate::html;

pub const DEFAULT_ENDPOINT: &str = "https://en.wiktionary.org/api/rest_v1/page/definition";

/// Everything but unreserved characters is escaped in the title segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct WiktionaryConfig {
    pub endpoint: String,
}

impl Default for WiktionaryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// One part-of-speech section for a language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub language: String,
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub examples: Vec<String>,
}

/// Sections as served by the REST endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    definitions: Vec<RawDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(default)]
    definition: String,
    #[serde(default)]
    examples: Vec<String>,
}

/// Request URL for `word`; spaces become underscores as in page titles
pub fn definition_url(endpoint: &str, word: &str) -> String {
    let title = word.trim().replace(' ', "_");
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        utf8_percent_encode(&title, PATH_SEGMENT)
    )
}

/// Keep the sections for `language`, matched case-insensitively against
/// either the language code key or the section's language name.
///
/// Top-level values that are not section lists (error bodies, for example)
/// are ignored, so an unknown word yields no entries.
pub fn select_entries(body: &str, language: &str) -> AppletResult<Vec<Entry>> {
    let sections: BTreeMap<String, Value> = serde_json::from_str(body)?;
    let mut entries = Vec::new();

    for (code, value) in sections {
        if !value.is_array() {
            continue;
        }

        let raw: Vec<RawEntry> = serde_json::from_value(value)?;
        for section in raw {
            if !code.eq_ignore_ascii_case(language)
                && !section.language.eq_ignore_ascii_case(language)
            {
                continue;
            }

            let definitions = section
                .definitions
                .into_iter()
                .map(|d| Definition {
                    text: html::strip_tags(&d.definition).trim().to_string(),
                    examples: d
                        .examples
                        .iter()
                        .map(|e| html::strip_tags(e).trim().to_string())
                        .collect(),
                })
                .filter(|d| !d.text.is_empty())
                .collect();

            entries.push(Entry {
                language: section.language,
                part_of_speech: section.part_of_speech,
                definitions,
            });
        }
    }

    Ok(entries)
}

/// Fetch and filter the definitions of `word` in `language`
pub fn fetch(
    word: &str,
    language: &str,
    config: &WiktionaryConfig,
    curl: &Curl,
) -> AppletResult<Vec<Entry>> {
    let url = definition_url(&config.endpoint, word);
    debug!("fetching {}", url);

    let body = curl.run(&["--silent".to_string(), "--location".to_string(), url])?;
    select_entries(&body, language)
}

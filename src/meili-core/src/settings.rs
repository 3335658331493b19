use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings of an index. On update only the fields that are `Some` are sent,
/// the others keep their current value on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<HashMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typo_tolerance: Option<TypoTolerance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faceting: Option<Faceting>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranking_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranking_rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_distinct_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.distinct_attribute = Some(attribute.into());
        self
    }

    pub fn with_searchable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_displayed_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.displayed_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_synonyms(mut self, synonyms: HashMap<String, Vec<String>>) -> Self {
        self.synonyms = Some(synonyms);
        self
    }

    pub fn with_filterable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sortable_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_typo_tolerance(mut self, typo_tolerance: TypoTolerance) -> Self {
        self.typo_tolerance = Some(typo_tolerance);
        self
    }

    pub fn with_pagination(mut self, max_total_hits: usize) -> Self {
        self.pagination = Some(PaginationSetting { max_total_hits });
        self
    }

    pub fn with_faceting(mut self, max_values_per_facet: usize) -> Self {
        self.faceting = Some(Faceting {
            max_values_per_facet,
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypoTolerance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_typos: Option<MinWordSizeForTypos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_on_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_on_attributes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MinWordSizeForTypos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_typo: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_typos: Option<u8>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSetting {
    pub max_total_hits: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Faceting {
    pub max_values_per_facet: usize,
}

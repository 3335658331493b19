//! Index settings, as a whole and one setting at a time.
//!
//! List-valued and scalar settings are replaced with PUT; object-valued
//! ones (typo tolerance, pagination, faceting) are merged with PATCH.

use meili_core::{Faceting, PaginationSetting, Settings, TaskInfo, TypoTolerance};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::Result;
use crate::indexes::{Index, IndexScoped};
use crate::request::Request;
use crate::transport::HttpMethod;

impl Index {
    async fn get_setting<T: DeserializeOwned>(&self, path: &str, function: &'static str) -> Result<T> {
        self.client()
            .execute(
                Request::get(self.endpoint(&format!("/settings{path}")))
                    .accept(&[200])
                    .named("Settings", function)
                    .build()?,
            )
            .await
    }

    async fn update_setting<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        value: &B,
        function: &'static str,
    ) -> Result<TaskInfo> {
        self.client()
            .execute(
                Request::builder(method, self.endpoint(&format!("/settings{path}")))
                    .accept(&[202])
                    .named("Settings", function)
                    .json(value)
                    .build()?,
            )
            .await
    }

    async fn reset_setting(&self, path: &str, function: &'static str) -> Result<TaskInfo> {
        self.client()
            .execute(
                Request::delete(self.endpoint(&format!("/settings{path}")))
                    .accept(&[202])
                    .named("Settings", function)
                    .build()?,
            )
            .await
    }

    pub async fn get_settings(&self) -> Result<Settings> {
        self.get_setting("", "get_settings").await
    }

    /// Only the fields set on `settings` are changed
    pub async fn update_settings(&self, settings: &Settings) -> Result<TaskInfo> {
        self.update_setting(HttpMethod::Patch, "", settings, "update_settings")
            .await
    }

    pub async fn reset_settings(&self) -> Result<TaskInfo> {
        self.reset_setting("", "reset_settings").await
    }

    pub async fn get_ranking_rules(&self) -> Result<Vec<String>> {
        self.get_setting("/ranking-rules", "get_ranking_rules").await
    }

    pub async fn update_ranking_rules(&self, rules: &[&str]) -> Result<TaskInfo> {
        self.update_setting(HttpMethod::Put, "/ranking-rules", rules, "update_ranking_rules")
            .await
    }

    pub async fn reset_ranking_rules(&self) -> Result<TaskInfo> {
        self.reset_setting("/ranking-rules", "reset_ranking_rules")
            .await
    }

    pub async fn get_distinct_attribute(&self) -> Result<Option<String>> {
        self.get_setting("/distinct-attribute", "get_distinct_attribute")
            .await
    }

    pub async fn update_distinct_attribute(&self, attribute: &str) -> Result<TaskInfo> {
        self.update_setting(
            HttpMethod::Put,
            "/distinct-attribute",
            attribute,
            "update_distinct_attribute",
        )
        .await
    }

    pub async fn reset_distinct_attribute(&self) -> Result<TaskInfo> {
        self.reset_setting("/distinct-attribute", "reset_distinct_attribute")
            .await
    }

    pub async fn get_searchable_attributes(&self) -> Result<Vec<String>> {
        self.get_setting("/searchable-attributes", "get_searchable_attributes")
            .await
    }

    pub async fn update_searchable_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        self.update_setting(
            HttpMethod::Put,
            "/searchable-attributes",
            attributes,
            "update_searchable_attributes",
        )
        .await
    }

    pub async fn reset_searchable_attributes(&self) -> Result<TaskInfo> {
        self.reset_setting("/searchable-attributes", "reset_searchable_attributes")
            .await
    }

    pub async fn get_displayed_attributes(&self) -> Result<Vec<String>> {
        self.get_setting("/displayed-attributes", "get_displayed_attributes")
            .await
    }

    pub async fn update_displayed_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        self.update_setting(
            HttpMethod::Put,
            "/displayed-attributes",
            attributes,
            "update_displayed_attributes",
        )
        .await
    }

    pub async fn reset_displayed_attributes(&self) -> Result<TaskInfo> {
        self.reset_setting("/displayed-attributes", "reset_displayed_attributes")
            .await
    }

    pub async fn get_stop_words(&self) -> Result<Vec<String>> {
        self.get_setting("/stop-words", "get_stop_words").await
    }

    pub async fn update_stop_words(&self, words: &[&str]) -> Result<TaskInfo> {
        self.update_setting(HttpMethod::Put, "/stop-words", words, "update_stop_words")
            .await
    }

    pub async fn reset_stop_words(&self) -> Result<TaskInfo> {
        self.reset_setting("/stop-words", "reset_stop_words").await
    }

    pub async fn get_synonyms(&self) -> Result<HashMap<String, Vec<String>>> {
        self.get_setting("/synonyms", "get_synonyms").await
    }

    pub async fn update_synonyms(&self, synonyms: &HashMap<String, Vec<String>>) -> Result<TaskInfo> {
        self.update_setting(HttpMethod::Put, "/synonyms", synonyms, "update_synonyms")
            .await
    }

    pub async fn reset_synonyms(&self) -> Result<TaskInfo> {
        self.reset_setting("/synonyms", "reset_synonyms").await
    }

    pub async fn get_filterable_attributes(&self) -> Result<Vec<String>> {
        self.get_setting("/filterable-attributes", "get_filterable_attributes")
            .await
    }

    pub async fn update_filterable_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        self.update_setting(
            HttpMethod::Put,
            "/filterable-attributes",
            attributes,
            "update_filterable_attributes",
        )
        .await
    }

    pub async fn reset_filterable_attributes(&self) -> Result<TaskInfo> {
        self.reset_setting("/filterable-attributes", "reset_filterable_attributes")
            .await
    }

    pub async fn get_sortable_attributes(&self) -> Result<Vec<String>> {
        self.get_setting("/sortable-attributes", "get_sortable_attributes")
            .await
    }

    pub async fn update_sortable_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        self.update_setting(
            HttpMethod::Put,
            "/sortable-attributes",
            attributes,
            "update_sortable_attributes",
        )
        .await
    }

    pub async fn reset_sortable_attributes(&self) -> Result<TaskInfo> {
        self.reset_setting("/sortable-attributes", "reset_sortable_attributes")
            .await
    }

    pub async fn get_typo_tolerance(&self) -> Result<TypoTolerance> {
        self.get_setting("/typo-tolerance", "get_typo_tolerance").await
    }

    pub async fn update_typo_tolerance(&self, typo_tolerance: &TypoTolerance) -> Result<TaskInfo> {
        self.update_setting(
            HttpMethod::Patch,
            "/typo-tolerance",
            typo_tolerance,
            "update_typo_tolerance",
        )
        .await
    }

    pub async fn reset_typo_tolerance(&self) -> Result<TaskInfo> {
        self.reset_setting("/typo-tolerance", "reset_typo_tolerance")
            .await
    }

    pub async fn get_pagination(&self) -> Result<PaginationSetting> {
        self.get_setting("/pagination", "get_pagination").await
    }

    pub async fn update_pagination(&self, pagination: &PaginationSetting) -> Result<TaskInfo> {
        self.update_setting(HttpMethod::Patch, "/pagination", pagination, "update_pagination")
            .await
    }

    pub async fn reset_pagination(&self) -> Result<TaskInfo> {
        self.reset_setting("/pagination", "reset_pagination").await
    }

    pub async fn get_faceting(&self) -> Result<Faceting> {
        self.get_setting("/faceting", "get_faceting").await
    }

    pub async fn update_faceting(&self, faceting: &Faceting) -> Result<TaskInfo> {
        self.update_setting(HttpMethod::Patch, "/faceting", faceting, "update_faceting")
            .await
    }

    pub async fn reset_faceting(&self) -> Result<TaskInfo> {
        self.reset_setting("/faceting", "reset_faceting").await
    }
}

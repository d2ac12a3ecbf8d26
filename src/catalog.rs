use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::PersistenceError;
use crate::model::ApiResourcePath;

/// Stored resource paths and contexts, keyed by numeric API id.
pub trait StoreApiRepository {
    fn find_resource_paths(&self, api_id: i64) -> Result<Vec<ApiResourcePath>, PersistenceError>;
    fn find_api_context(&self, api_id: i64) -> Result<String, PersistenceError>;
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogEntry {
    pub(crate) id: i64,
    pub(crate) context: String,
    #[serde(default)]
    pub(crate) resource_paths: Vec<CatalogResourcePath>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogResourcePath {
    pub(crate) resource_path: String,
    pub(crate) http_verb: String,
}

/// Repository backed by a YAML file of the form
///
/// ```yaml
/// apis:
///   - id: 7
///     context: /payment/v1
///     resource_paths:
///       - resource_path: /charge
///         http_verb: post
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileApiCatalog {
    #[serde(default)]
    apis: Vec<CatalogEntry>,
}

impl FileApiCatalog {
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            PersistenceError::with_source(format!("read catalog {}", path.display()), err)
        })?;
        serde_yaml::from_str(&raw).map_err(|err| {
            PersistenceError::with_source(format!("parse catalog {}", path.display()), err)
        })
    }

    #[cfg(test)]
    pub(crate) fn from_entries(apis: Vec<CatalogEntry>) -> Self {
        Self { apis }
    }

    fn entry(&self, api_id: i64) -> Result<&CatalogEntry, PersistenceError> {
        self.apis
            .iter()
            .find(|api| api.id == api_id)
            .ok_or_else(|| PersistenceError::new(format!("api {api_id} not found")))
    }
}

impl StoreApiRepository for FileApiCatalog {
    fn find_resource_paths(&self, api_id: i64) -> Result<Vec<ApiResourcePath>, PersistenceError> {
        let entry = self.entry(api_id)?;
        Ok(entry
            .resource_paths
            .iter()
            .map(|p| ApiResourcePath::new(p.resource_path.clone(), p.http_verb.clone()))
            .collect())
    }

    fn find_api_context(&self, api_id: i64) -> Result<String, PersistenceError> {
        Ok(self.entry(api_id)?.context.clone())
    }
}

use tracing::debug;

use crate::catalog::StoreApiRepository;
use crate::config::ApiManagerConfig;
use crate::definition::extract_resource_paths;
use crate::endpoints::build_endpoint_urls;
use crate::error::Result;
use crate::http::{HttpClient, store_api_url};
use crate::model::{ENDPOINT_URLS_KEY, EndpointUrl, ResultEnvelope};

/// Looks up published API definitions in the store and derives resource
/// paths and gateway endpoint URLs from them.
///
/// Holds no mutable state; every fetch opens and drops its own HTTP client.
pub struct StoreApiService<C> {
    config: C,
}

impl<C: ApiManagerConfig> StoreApiService<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// Returns the raw store response for `api_id`. The HTTP status is not
    /// inspected; an error page comes back as-is.
    pub fn fetch_definition_json(&self, api_id: &str) -> Result<String> {
        let url = store_api_url(self.config.store_url(), api_id);
        let client = HttpClient::new(self.config.request_timeout());
        Ok(client.get(&url)?.body)
    }

    pub fn get_resource_paths_by_uuid(&self, api_uuid: &str) -> Result<ResultEnvelope> {
        let raw = self.fetch_definition_json(api_uuid)?;
        let entries = extract_resource_paths(&raw)?;
        Ok(ResultEnvelope::success(entries))
    }

    pub fn endpoint_urls(&self, api_context: &str) -> Result<Vec<EndpointUrl>> {
        build_endpoint_urls(api_context, self.config.gateway_environments())
    }

    pub fn get_resource_paths_by_id<R>(&self, repository: &R, api_id: i64) -> Result<ResultEnvelope>
    where
        R: StoreApiRepository + ?Sized,
    {
        let resource_paths = repository.find_resource_paths(api_id)?;
        let api_context = repository.find_api_context(api_id)?;
        debug!(api_id, %api_context, resource_paths = resource_paths.len(), "loaded stored api");

        let endpoint_urls = self.endpoint_urls(&api_context)?;
        Ok(ResultEnvelope::success(resource_paths)
            .with_additional_property(ENDPOINT_URLS_KEY, serde_json::to_value(endpoint_urls)?))
    }
}

use std::collections::BTreeMap;

use crate::error::{Result, StoreApiError};
use crate::model::{EndpointUrl, GatewayEnvironment};

/// Builds one HTTP/HTTPS URL pair per gateway environment by appending
/// `api_context` to each base, in the order the environments are given.
pub fn build_endpoint_urls(
    api_context: &str,
    environments: &[GatewayEnvironment],
) -> Result<Vec<EndpointUrl>> {
    environments
        .iter()
        .map(|environment| endpoint_url(api_context, environment))
        .collect()
}

fn endpoint_url(api_context: &str, environment: &GatewayEnvironment) -> Result<EndpointUrl> {
    let (http_base, https_base) = split_gateway_endpoint(environment)?;

    let mut environment_urls = BTreeMap::new();
    environment_urls.insert("http".to_string(), format!("{http_base}{api_context}"));
    environment_urls.insert("https".to_string(), format!("{https_base}{api_context}"));

    Ok(EndpointUrl {
        environment_name: environment.name.clone(),
        environment_type: environment.env_type.clone(),
        environment_urls,
    })
}

// Trailing empty segments do not count, so "http://gw," has a single base.
fn split_gateway_endpoint(environment: &GatewayEnvironment) -> Result<(&str, &str)> {
    let mut segments: Vec<&str> = environment.api_gateway_endpoint.split(',').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    match segments.as_slice() {
        [http, https, ..] => Ok((*http, *https)),
        _ => Err(StoreApiError::MalformedEnvironmentConfig {
            environment: environment.name.clone(),
            endpoint: environment.api_gateway_endpoint.clone(),
        }),
    }
}

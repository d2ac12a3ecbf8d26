use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, StoreApiError};
use crate::model::ApiResourcePath;

/// Flattens the `paths` of the definition embedded in a store envelope into
/// `(resource path, verb)` pairs, in document order.
///
/// The envelope carries the definition as JSON text in its `apiDefinition`
/// field, so decoding happens in two passes.
pub fn extract_resource_paths(envelope_json: &str) -> Result<Vec<ApiResourcePath>> {
    let api_definition = decode_envelope(envelope_json)?;
    let definition = decode_definition(&api_definition)?;

    let paths = definition
        .get("paths")
        .ok_or_else(|| malformed("api definition missing paths"))?
        .as_object()
        .ok_or_else(|| malformed("paths must be an object"))?;

    let entries = flatten_paths(paths)?;
    debug!(paths = paths.len(), entries = entries.len(), "extracted resource paths");
    Ok(entries)
}

fn decode_envelope(envelope_json: &str) -> Result<String> {
    let envelope: Value = serde_json::from_str(envelope_json)
        .map_err(|err| malformed(format!("envelope is not valid json: {err}")))?;
    let envelope = envelope
        .as_object()
        .ok_or_else(|| malformed("envelope must be a json object"))?;

    envelope
        .get("apiDefinition")
        .ok_or_else(|| malformed("envelope missing apiDefinition"))?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| malformed("apiDefinition must be a string"))
}

fn decode_definition(api_definition: &str) -> Result<Map<String, Value>> {
    let definition: Value = serde_json::from_str(api_definition)
        .map_err(|err| malformed(format!("apiDefinition is not valid json: {err}")))?;
    match definition {
        Value::Object(map) => Ok(map),
        _ => Err(malformed("apiDefinition must be a json object")),
    }
}

fn flatten_paths(paths: &Map<String, Value>) -> Result<Vec<ApiResourcePath>> {
    let mut out = Vec::new();
    for (path, path_item) in paths {
        let verbs = path_item
            .as_object()
            .ok_or_else(|| malformed(format!("path item {path} must be an object")))?;
        for verb in verbs.keys() {
            out.push(ApiResourcePath::new(path.clone(), verb.clone()));
        }
    }
    Ok(out)
}

fn malformed(reason: impl Into<String>) -> StoreApiError {
    StoreApiError::MalformedDefinition(reason.into())
}

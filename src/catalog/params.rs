//! Parameter extraction from templated endpoint paths

use crate::constants::API_KEY_SENTINEL;
use crate::models::{ParamType, Parameter};
use crate::request::query::{parse_template, split_template};

/// Semantic type and help text for well-known query keys
const KNOWN_PARAMS: &[(&str, ParamType, &str)] = &[
    ("apikey", ParamType::String, "Your API key for authentication"),
    ("url", ParamType::String, "URL of the content to download/process"),
    ("question", ParamType::String, "Question or message to ask the AI"),
    ("query", ParamType::String, "Search query or keywords"),
    ("prompt", ParamType::String, "Text description for image generation"),
    ("format", ParamType::String, "Output format (mp4, mp3, jpg, png)"),
    ("quality", ParamType::String, "Video quality (360p, 720p, 1080p)"),
    ("size", ParamType::String, "Image dimensions (512x512, 1024x1024)"),
    ("limit", ParamType::Number, "Number of results to return"),
];

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == API_KEY_SENTINEL
}

/// Builds the parameter description for a query key
pub fn describe(name: &str) -> Parameter {
    let (param_type, description) = KNOWN_PARAMS
        .iter()
        .find(|(key, _, _)| *key == name)
        .map(|(_, ty, desc)| (*ty, desc.to_string()))
        .unwrap_or((ParamType::String, name.to_string()));

    Parameter {
        name: name.to_string(),
        required: true,
        param_type,
        description,
    }
}

/// Returns one parameter per query key whose value is empty or the API-key
/// sentinel, in template order.
///
/// Only the query portion is inspected. A malformed query yields no
/// parameters.
pub fn extract_parameters(path: &str) -> Vec<Parameter> {
    let (_, query) = split_template(path);
    if query.is_empty() {
        return Vec::new();
    }

    let pairs = match parse_template(path) {
        Ok((_, pairs)) => pairs,
        Err(e) => {
            tracing::warn!(path, error = %e, "Ignoring malformed query template");
            return Vec::new();
        }
    };

    let mut params: Vec<Parameter> = Vec::new();
    for (key, value) in pairs {
        if is_placeholder(&value) && !params.iter().any(|p| p.name == key) {
            params.push(describe(&key));
        }
    }
    params
}

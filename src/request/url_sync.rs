//! Request form and live request-URL synchronization

use url::form_urlencoded;

use crate::catalog::params::extract_parameters;
use crate::models::{Endpoint, Parameter};
use crate::request::query::{parse_template, serialize_query, set_pair, split_template, QueryPairs};

/// One editable input of an endpoint form
#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub param: Parameter,
    pub value: String,
}

impl FormField {
    pub fn is_missing(&self) -> bool {
        self.param.required && self.value.trim().is_empty()
    }
}

/// Outcome of one synchronization pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncResult {
    pub url: String,
    pub has_errors: bool,
    /// Names of required fields that are currently empty, in form order
    pub missing: Vec<String>,
}

/// Base URL and template query, captured once from the displayed URL
#[derive(Clone, Debug, PartialEq)]
struct CapturedTemplate {
    base_url: String,
    default_query: QueryPairs,
}

impl CapturedTemplate {
    fn capture(display_url: &str) -> Self {
        let display_url = display_url.trim();
        let (base_url, query) = split_template(display_url);
        let default_query = parse_template(display_url).map(|(_, pairs)| pairs).unwrap_or_else(|e| {
            tracing::warn!(url = display_url, error = %e, "Lenient parse of template query");
            form_urlencoded::parse(query.as_bytes()).into_owned().collect()
        });
        CapturedTemplate {
            base_url: base_url.to_string(),
            default_query,
        }
    }
}

/// Form state of a single endpoint: its inputs and the URL they produce.
///
/// The template is captured on the first synchronization and never re-read
/// from the displayed URL afterwards, so substituted values cannot leak back
/// into the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestForm {
    display_url: String,
    template: Option<CapturedTemplate>,
    fields: Vec<FormField>,
}

impl RequestForm {
    /// Creates the form for `endpoint` resolved against `origin`
    pub fn new(origin: &str, endpoint: &Endpoint) -> Self {
        let fields = extract_parameters(&endpoint.path)
            .into_iter()
            .map(|param| FormField {
                param,
                value: String::new(),
            })
            .collect();

        RequestForm {
            display_url: format!("{}{}", origin.trim_end_matches('/'), endpoint.path),
            template: None,
            fields,
        }
    }

    /// Currently displayed request URL
    pub fn url(&self) -> &str {
        &self.display_url
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    /// Sets a field value by parameter name; returns false if there is no such field
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.param.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Recomputes and republishes the request URL from the current inputs.
    ///
    /// Starts from the template query, overlays every field's trimmed value
    /// (empty values included) and serializes with form encoding. Keys keep
    /// template order; keys absent from the template follow in form order.
    pub fn synchronize(&mut self) -> SyncResult {
        let display_url = &self.display_url;
        let template = self
            .template
            .get_or_insert_with(|| CapturedTemplate::capture(display_url));

        let mut query = template.default_query.clone();
        let mut missing = Vec::new();
        for field in &self.fields {
            if field.is_missing() {
                missing.push(field.param.name.clone());
            }
            set_pair(&mut query, &field.param.name, field.value.trim());
        }

        let serialized = serialize_query(&query);
        let url = if serialized.is_empty() {
            template.base_url.clone()
        } else {
            format!("{}?{}", template.base_url, serialized)
        };

        self.display_url = url.clone();
        SyncResult {
            url,
            has_errors: !missing.is_empty(),
            missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:3000";

    #[test]
    fn test_substitutes_and_keeps_prefilled() {
        let endpoint = Endpoint::new("x", "GET", "/api/x?apikey=&limit=10");
        let mut form = RequestForm::new(ORIGIN, &endpoint);
        assert!(form.set_value("apikey", "abc"));

        let result = form.synchronize();
        assert_eq!(result.url, "http://localhost:3000/api/x?apikey=abc&limit=10");
        assert!(!result.has_errors);
        assert_eq!(form.url(), result.url);
    }

    #[test]
    fn test_idempotent() {
        let endpoint = Endpoint::new("x", "GET", "/api/x?apikey=&q=");
        let mut form = RequestForm::new(ORIGIN, &endpoint);
        form.set_value("q", "hello world");
        let first = form.synchronize();
        let second = form.synchronize();
        assert_eq!(first, second);
        assert_eq!(first.url, "http://localhost:3000/api/x?apikey=&q=hello+world");
    }

    #[test]
    fn test_reports_missing_required_fields() {
        let endpoint = Endpoint::new("x", "GET", "/downloader/tiktok?url=&apikey=YOUR_API_KEY");
        let mut form = RequestForm::new(ORIGIN, &endpoint);
        form.set_value("url", "   ");

        let result = form.synchronize();
        assert!(result.has_errors);
        assert_eq!(result.missing, vec!["url".to_string(), "apikey".to_string()]);
        assert_eq!(result.url, "http://localhost:3000/downloader/tiktok?url=&apikey=");
    }

    #[test]
    fn test_template_captured_once() {
        let endpoint = Endpoint::new("x", "GET", "/api/x?apikey=");
        let mut form = RequestForm::new(ORIGIN, &endpoint);

        form.set_value("apikey", "first");
        assert_eq!(form.synchronize().url, "http://localhost:3000/api/x?apikey=first");

        form.set_value("apikey", "second");
        let result = form.synchronize();
        assert_eq!(result.url, "http://localhost:3000/api/x?apikey=second");
    }

    #[test]
    fn test_values_are_trimmed_and_encoded() {
        let endpoint = Endpoint::new("x", "GET", "/dl?url=");
        let mut form = RequestForm::new("http://h/", &endpoint);
        form.set_value("url", "  https://v.io/a?b=1  ");
        let result = form.synchronize();
        assert_eq!(result.url, "http://h/dl?url=https%3A%2F%2Fv.io%2Fa%3Fb%3D1");
    }

    #[test]
    fn test_no_query_means_no_question_mark() {
        let endpoint = Endpoint::new("quote", "GET", "/random/quote");
        let mut form = RequestForm::new(ORIGIN, &endpoint);
        assert!(form.fields().is_empty());
        let result = form.synchronize();
        assert_eq!(result.url, "http://localhost:3000/random/quote");
        assert!(!result.has_errors);
    }
}

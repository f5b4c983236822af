use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_API_CREATOR, DEFAULT_API_DESCRIPTION, DEFAULT_API_NAME};

/// Treats an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reads a list entry by entry, skipping entries that are null or malformed
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut list = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        if entry.is_null() {
            tracing::warn!(position, "Skipping null settings entry");
            continue;
        }
        match serde_json::from_value(entry) {
            Ok(item) => list.push(item),
            Err(e) => tracing::warn!(position, error = %e, "Skipping malformed settings entry"),
        }
    }
    Ok(list)
}

/// Stable identity of a category, assigned from its position in the loaded catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub usize);

/// Stable identity of an endpoint, assigned at load time.
///
/// Filtering and reordering the displayed view never changes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointId {
    pub category: usize,
    pub index: usize,
}

/// Readiness badge of an endpoint, classified from its free-text status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointStatus {
    Ready,
    Update,
    Error,
}

impl EndpointStatus {
    pub fn classify(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("update") {
            EndpointStatus::Update
        } else if lower.contains("error") {
            EndpointStatus::Error
        } else {
            EndpointStatus::Ready
        }
    }
}

/// One documented API operation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(skip)]
    pub id: EndpointId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,
    /// Templated path, may embed a literal query string with placeholder values
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desc: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, method: impl Into<String>, path: impl Into<String>) -> Self {
        Endpoint {
            name: name.into(),
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn display_method(&self) -> String {
        if self.method.trim().is_empty() {
            "GET".to_string()
        } else {
            self.method.trim().to_uppercase()
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed Endpoint"
        } else {
            &self.name
        }
    }

    pub fn display_desc(&self) -> &str {
        if self.desc.is_empty() {
            "No description"
        } else {
            &self.desc
        }
    }

    pub fn display_status(&self) -> &str {
        if self.status.is_empty() {
            "ready"
        } else {
            &self.status
        }
    }

    pub fn status_kind(&self) -> EndpointStatus {
        EndpointStatus::classify(self.display_status())
    }

    /// Path without its query string
    pub fn route(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(route, _)| route)
    }
}

/// A named group of endpoints
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip)]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<Endpoint>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<Endpoint>) -> Self {
        Category {
            id: CategoryId::default(),
            name: name.into(),
            items,
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed Category"
        } else {
            &self.name
        }
    }
}

/// Assigns stable ids from positions in a freshly loaded category list
pub fn assign_ids(categories: &mut [Category]) {
    for (cat_index, category) in categories.iter_mut().enumerate() {
        category.id = CategoryId(cat_index);
        for (index, endpoint) in category.items.iter_mut().enumerate() {
            endpoint.id = EndpointId {
                category: cat_index,
                index,
            };
        }
    }
}

/// The settings document describing the whole API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub link_telegram: Option<String>,
    #[serde(default)]
    pub link_whatsapp: Option<String>,
    #[serde(default)]
    pub link_youtube: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Vec<Category>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            name: DEFAULT_API_NAME.to_string(),
            creator: DEFAULT_API_CREATOR.to_string(),
            description: DEFAULT_API_DESCRIPTION.to_string(),
            link_telegram: None,
            link_whatsapp: None,
            link_youtube: None,
            categories: Vec::new(),
        }
    }
}

impl Settings {
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            DEFAULT_API_NAME
        } else {
            &self.name
        }
    }

    pub fn subtitle(&self) -> &str {
        if self.description.is_empty() {
            DEFAULT_API_DESCRIPTION
        } else {
            &self.description
        }
    }

    pub fn footer(&self, year: i32) -> String {
        let creator = if self.creator.is_empty() {
            DEFAULT_API_CREATOR
        } else {
            &self.creator
        };
        format!("© {} {} • {}", year, creator, self.title())
    }

    /// Contact links as `(label, target)`, absent links shown as `#`
    pub fn links(&self) -> [(&'static str, &str); 3] {
        [
            ("Telegram", link_or_hash(&self.link_telegram)),
            ("WhatsApp", link_or_hash(&self.link_whatsapp)),
            ("YouTube", link_or_hash(&self.link_youtube)),
        ]
    }
}

fn link_or_hash(link: &Option<String>) -> &str {
    link.as_deref().filter(|l| !l.is_empty()).unwrap_or("#")
}

/// Semantic type of a user-supplied parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
        }
    }
}

/// A placeholder in an endpoint's query string that needs user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub required: bool,
    pub param_type: ParamType,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(EndpointStatus::classify("Ready"), EndpointStatus::Ready);
        assert_eq!(EndpointStatus::classify("needs UPDATE"), EndpointStatus::Update);
        assert_eq!(EndpointStatus::classify("error 500"), EndpointStatus::Error);
        assert_eq!(EndpointStatus::classify("beta"), EndpointStatus::Ready);
    }

    #[test]
    fn test_settings_tolerates_nulls_and_missing_fields() {
        let json = r#"{
            "name": "Demo",
            "categories": [
                { "name": "Tools", "items": null },
                { "items": [ { "name": "Ping", "path": "/ping", "method": null } ] }
            ]
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.title(), "Demo");
        assert_eq!(settings.creator, "");
        assert!(settings.categories[0].items.is_empty());
        let ping = &settings.categories[1].items[0];
        assert_eq!(ping.display_method(), "GET");
        assert_eq!(ping.display_status(), "ready");
        assert_eq!(settings.categories[1].display_name(), "Unnamed Category");
    }

    #[test]
    fn test_settings_skips_malformed_entries() {
        let json = r#"{
            "name": "Demo",
            "categories": [
                null,
                "not a category",
                { "name": "Net", "items": [
                    null,
                    { "name": "Ping", "path": "/ping" },
                    { "name": "Bad", "status": 1 },
                    { "name": ["x"], "path": "/x" }
                ] }
            ]
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.title(), "Demo");
        assert_eq!(settings.categories.len(), 1);
        let net = &settings.categories[0];
        assert_eq!(net.name, "Net");
        let names: Vec<_> = net.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ping"]);
    }

    #[test]
    fn test_footer_and_links() {
        let settings = Settings {
            name: "Demo".into(),
            creator: "Ada".into(),
            link_youtube: Some("https://youtube.example".into()),
            ..Settings::default()
        };
        assert_eq!(settings.footer(2026), "© 2026 Ada • Demo");
        let links = settings.links();
        assert_eq!(links[0], ("Telegram", "#"));
        assert_eq!(links[2], ("YouTube", "https://youtube.example"));
    }

    #[test]
    fn test_assign_ids_and_route() {
        let mut categories = vec![
            Category::new("A", vec![Endpoint::new("a", "GET", "/a?x=")]),
            Category::new(
                "B",
                vec![
                    Endpoint::new("b1", "GET", "/b1"),
                    Endpoint::new("b2", "post", "/b2"),
                ],
            ),
        ];
        assign_ids(&mut categories);
        assert_eq!(categories[1].id, CategoryId(1));
        assert_eq!(categories[1].items[1].id, EndpointId { category: 1, index: 1 });
        assert_eq!(categories[0].items[0].route(), "/a");
        assert_eq!(categories[1].items[1].display_method(), "POST");
    }
}

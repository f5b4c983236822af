//! Expansion state and the view tree handed to the terminal renderer

use std::collections::HashMap;

use crate::models::{Category, CategoryId, EndpointId, EndpointStatus};

/// Expand/collapse flags keyed by stable id.
///
/// Categories default to expanded, endpoint bodies to collapsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpansionState {
    categories: HashMap<CategoryId, bool>,
    endpoints: HashMap<EndpointId, bool>,
}

impl ExpansionState {
    pub fn is_category_expanded(&self, id: CategoryId) -> bool {
        self.categories.get(&id).copied().unwrap_or(true)
    }

    pub fn is_endpoint_expanded(&self, id: EndpointId) -> bool {
        self.endpoints.get(&id).copied().unwrap_or(false)
    }

    pub fn toggle_category(&mut self, id: CategoryId) {
        let expanded = self.is_category_expanded(id);
        self.categories.insert(id, !expanded);
    }

    pub fn toggle_endpoint(&mut self, id: EndpointId) {
        let expanded = self.is_endpoint_expanded(id);
        self.endpoints.insert(id, !expanded);
    }

    /// Forces every node of `categories` open or shut
    pub fn set_all(&mut self, categories: &[Category], expanded: bool) {
        for category in categories {
            self.categories.insert(category.id, expanded);
            for endpoint in &category.items {
                self.endpoints.insert(endpoint.id, expanded);
            }
        }
    }

    pub fn reset(&mut self) {
        self.categories.clear();
        self.endpoints.clear();
    }
}

/// One visible row of the catalog tree
#[derive(Clone, Debug, PartialEq)]
pub enum ViewRow {
    Category {
        id: CategoryId,
        name: String,
        count: usize,
        expanded: bool,
    },
    Endpoint {
        id: EndpointId,
        method: String,
        route: String,
        name: String,
        status: String,
        status_kind: EndpointStatus,
        expanded: bool,
    },
}

impl ViewRow {
    pub fn endpoint_id(&self) -> Option<EndpointId> {
        match self {
            ViewRow::Endpoint { id, .. } => Some(*id),
            ViewRow::Category { .. } => None,
        }
    }
}

/// Flattens categories into visible rows; endpoints of collapsed categories
/// are omitted. Pure: no I/O and no mutation.
pub fn build_view(categories: &[Category], expansion: &ExpansionState) -> Vec<ViewRow> {
    let mut rows = Vec::new();

    for category in categories {
        let expanded = expansion.is_category_expanded(category.id);
        rows.push(ViewRow::Category {
            id: category.id,
            name: category.display_name().to_string(),
            count: category.items.len(),
            expanded,
        });

        if !expanded {
            continue;
        }

        for endpoint in &category.items {
            rows.push(ViewRow::Endpoint {
                id: endpoint.id,
                method: endpoint.display_method(),
                route: endpoint.route().to_string(),
                name: endpoint.display_name().to_string(),
                status: endpoint.display_status().to_string(),
                status_kind: endpoint.status_kind(),
                expanded: expansion.is_endpoint_expanded(endpoint.id),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{assign_ids, Endpoint};

    fn sample() -> Vec<Category> {
        let mut categories = vec![
            Category::new(
                "Tools",
                vec![
                    Endpoint::new("Ping", "get", "/ping?x="),
                    Endpoint::new("Echo", "POST", "/echo"),
                ],
            ),
            Category::new("Search", vec![Endpoint::new("Find", "", "/find?q=")]),
        ];
        assign_ids(&mut categories);
        categories
    }

    #[test]
    fn test_defaults_categories_open_endpoints_closed() {
        let categories = sample();
        let rows = build_view(&categories, &ExpansionState::default());
        assert_eq!(rows.len(), 5);
        assert!(matches!(rows[0], ViewRow::Category { expanded: true, count: 2, .. }));
        match &rows[1] {
            ViewRow::Endpoint { method, route, expanded, .. } => {
                assert_eq!(method, "GET");
                assert_eq!(route, "/ping");
                assert!(!expanded);
            }
            other => panic!("unexpected row {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_category_hides_endpoints() {
        let categories = sample();
        let mut expansion = ExpansionState::default();
        expansion.toggle_category(categories[0].id);
        let rows = build_view(&categories, &expansion);
        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0], ViewRow::Category { expanded: false, .. }));
    }

    #[test]
    fn test_set_all_and_reset() {
        let categories = sample();
        let mut expansion = ExpansionState::default();
        expansion.set_all(&categories, true);
        assert!(expansion.is_endpoint_expanded(categories[1].items[0].id));

        expansion.set_all(&categories, false);
        assert!(!expansion.is_category_expanded(categories[1].id));

        expansion.reset();
        assert_eq!(expansion, ExpansionState::default());
    }
}

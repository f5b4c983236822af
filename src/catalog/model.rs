//! Catalog model - the loaded categories and the currently displayed view

use crate::catalog::filter::filter_catalog;
use crate::catalog::view::{build_view, ExpansionState, ViewRow};
use crate::models::{assign_ids, Category, Endpoint, EndpointId};

/// Owns the immutable original catalog and the displayed, possibly filtered, copy
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    original: Vec<Category>,
    displayed: Vec<Category>,
    expansion: ExpansionState,
}

impl Catalog {
    /// Takes ownership of freshly loaded categories and assigns their ids.
    ///
    /// Categories without any endpoint are not shown.
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.retain(|category| {
            if category.items.is_empty() {
                tracing::debug!(category = category.display_name(), "Skipping category without endpoints");
            }
            !category.items.is_empty()
        });
        assign_ids(&mut categories);
        Catalog {
            displayed: categories.clone(),
            original: categories,
            expansion: ExpansionState::default(),
        }
    }

    pub fn original(&self) -> &[Category] {
        &self.original
    }

    pub fn displayed(&self) -> &[Category] {
        &self.displayed
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut ExpansionState {
        &mut self.expansion
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn endpoint_count(&self) -> usize {
        self.original.iter().map(|c| c.items.len()).sum()
    }

    /// Replaces the displayed view and resets every expansion flag
    pub fn set_displayed(&mut self, categories: Vec<Category>) {
        self.displayed = categories;
        self.expansion.reset();
    }

    /// Recomputes the displayed view from `query`
    pub fn search(&mut self, query: &str) {
        let filtered = filter_catalog(&self.original, query);
        self.set_displayed(filtered);
    }

    pub fn expand_all(&mut self) {
        self.expansion.set_all(&self.displayed, true);
    }

    pub fn collapse_all(&mut self) {
        self.expansion.set_all(&self.displayed, false);
    }

    /// Looks an endpoint up in the original catalog
    pub fn endpoint(&self, id: EndpointId) -> Option<&Endpoint> {
        self.original
            .get(id.category)
            .and_then(|category| category.items.get(id.index))
    }

    /// Visible rows of the displayed view
    pub fn rows(&self) -> Vec<ViewRow> {
        build_view(&self.displayed, &self.expansion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Category::new(
                "Downloader",
                vec![
                    Endpoint::new("TikTok", "GET", "/downloader/tiktok?url=&apikey=YOUR_API_KEY"),
                    Endpoint::new("YouTube", "GET", "/downloader/yt?url="),
                ],
            ),
            Category::new("Random", vec![Endpoint::new("Quote", "GET", "/random/quote")]),
        ])
    }

    #[test]
    fn test_search_then_clear_restores_original() {
        let mut catalog = catalog();
        catalog.search("quote");
        assert_eq!(catalog.displayed().len(), 1);
        assert_eq!(catalog.original().len(), 2);

        catalog.search("");
        assert_eq!(catalog.displayed(), catalog.original());
    }

    #[test]
    fn test_set_displayed_resets_expansion() {
        let mut catalog = catalog();
        let tiktok = catalog.displayed()[0].items[0].id;
        catalog.expansion_mut().toggle_endpoint(tiktok);
        assert!(catalog.expansion().is_endpoint_expanded(tiktok));

        catalog.search("tiktok");
        assert!(!catalog.expansion().is_endpoint_expanded(tiktok));
    }

    #[test]
    fn test_endpoint_lookup_survives_filtering() {
        let mut catalog = catalog();
        catalog.search("random");
        let id = catalog.displayed()[0].items[0].id;
        assert_eq!(catalog.endpoint(id).map(|e| e.name.as_str()), Some("Quote"));
        assert_eq!(catalog.endpoint_count(), 3);
    }

    #[test]
    fn test_categories_without_endpoints_are_dropped() {
        let catalog = Catalog::new(vec![
            Category::new("Empty", Vec::new()),
            Category::new("Random", vec![Endpoint::new("Quote", "GET", "/random/quote")]),
        ]);
        assert_eq!(catalog.original().len(), 1);
        assert_eq!(catalog.displayed()[0].name, "Random");
        assert_eq!(catalog.displayed()[0].items[0].id, EndpointId { category: 0, index: 0 });
        // One category row plus its endpoint
        assert_eq!(catalog.rows().len(), 2);

        assert!(Catalog::new(vec![Category::new("Empty", Vec::new())]).is_empty());
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut catalog = catalog();
        catalog.expand_all();
        assert!(catalog
            .rows()
            .iter()
            .all(|row| !matches!(row, ViewRow::Endpoint { expanded: false, .. })));

        catalog.collapse_all();
        assert_eq!(catalog.rows().len(), 2);
    }
}

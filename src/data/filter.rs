use super::model::Element;

/// Filter value meaning "no constraint on this field".
pub const ALL: &str = "all";

// ---------------------------------------------------------------------------
// Filter predicate: search term + category + phase
// ---------------------------------------------------------------------------

/// The three independent user criteria.
///
/// `category` and `phase` hold either [`ALL`] or an exact (case-sensitive)
/// value. An empty `search` matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub phase: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_string(),
            phase: ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn new(search: &str, category: &str, phase: &str) -> Self {
        Self {
            search: search.to_string(),
            category: category.to_string(),
            phase: phase.to_string(),
        }
    }

    /// Clear all three criteria back to `""` / `"all"` / `"all"`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether every criterion is at its default (nothing is dimmed).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `element` satisfies all three criteria.
    pub fn matches(&self, element: &Element) -> bool {
        self.matches_search(element) && self.matches_category(element) && self.matches_phase(element)
    }

    fn matches_search(&self, element: &Element) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        element.name.to_lowercase().contains(&needle)
            || element.symbol.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, element: &Element) -> bool {
        self.category == ALL || self.category == element.category
    }

    fn matches_phase(&self, element: &Element) -> bool {
        self.phase == ALL || self.phase == element.phase
    }
}

// ---------------------------------------------------------------------------
// Classification: annotate, never remove
// ---------------------------------------------------------------------------

/// A transient view of one element with its match flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classified<'a> {
    pub element: &'a Element,
    pub highlighted: bool,
}

/// Annotate every element with whether it matches `filters`.
///
/// The output has exactly one entry per input element, in input order.
/// Non-matching elements are kept (and dimmed by the UI) so grid positions
/// stay stable while the criteria change.
pub fn classify<'a>(elements: &'a [Element], filters: &FilterState) -> Vec<Classified<'a>> {
    elements
        .iter()
        .map(|element| Classified {
            element,
            highlighted: filters.matches(element),
        })
        .collect()
}

/// Index-aligned match flags, as cached by the UI state.
pub fn highlight_mask(elements: &[Element], filters: &FilterState) -> Vec<bool> {
    classify(elements, filters)
        .into_iter()
        .map(|c| c.highlighted)
        .collect()
}

/// Number of elements matching `filters`.
pub fn match_count(elements: &[Element], filters: &FilterState) -> usize {
    elements.iter().filter(|el| filters.matches(el)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::element;

    fn sample() -> Vec<Element> {
        vec![
            element(26, "Fe", "Iron", "transition metal", "Solid"),
            element(79, "Au", "Gold", "transition metal", "Solid"),
            element(2, "He", "Helium", "noble gas", "Gas"),
            element(35, "Br", "Bromine", "diatomic nonmetal", "Liquid"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_on_name_and_symbol() {
        let els = sample();
        let f = FilterState::new("AU", ALL, ALL);
        assert!(f.matches(&els[1]));
        assert!(!f.matches(&els[0]));

        let f = FilterState::new("fe", ALL, ALL);
        assert!(f.matches(&els[0]));
    }

    #[test]
    fn category_and_phase_use_exact_equality() {
        let els = sample();
        let f = FilterState::new("", "Transition Metal", ALL);
        assert!(!f.matches(&els[0]));

        let f = FilterState::new("", "transition metal", "solid");
        assert!(!f.matches(&els[0]));

        let f = FilterState::new("", "transition metal", "Solid");
        assert!(f.matches(&els[0]));
    }

    #[test]
    fn clauses_are_combined_with_and() {
        let els = sample();
        let f = FilterState::new("go", "transition metal", "Solid");
        let mask = highlight_mask(&els, &f);
        assert_eq!(mask, vec![false, true, false, false]);
        assert_eq!(match_count(&els, &f), 1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut f = FilterState::new("go", "transition metal", "Solid");
        assert!(!f.is_default());
        f.reset();
        assert!(f.is_default());
        assert_eq!(f.category, ALL);
        assert_eq!(f.search, "");
    }

    #[test]
    fn unknown_filter_values_match_nothing() {
        let els = sample();
        let f = FilterState::new("", "not a category", ALL);
        assert_eq!(match_count(&els, &f), 0);
        assert_eq!(classify(&els, &f).len(), els.len());
    }
}

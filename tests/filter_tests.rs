use periodic_explorer::data::filter::{ALL, FilterState, classify, highlight_mask, match_count};
use periodic_explorer::data::loader::{DataSource, load};
use periodic_explorer::data::model::{Element, ElementDataset};

fn bundled() -> ElementDataset {
    load(&DataSource::Bundled, std::time::Duration::from_secs(1)).expect("bundled table loads")
}

fn numbers(elements: &[Element], filters: &FilterState) -> Vec<u32> {
    classify(elements, filters)
        .into_iter()
        .filter(|c| c.highlighted)
        .map(|c| c.element.number)
        .collect()
}

#[test]
fn test_defaults_match_everything() {
    let ds = bundled();
    let classified = classify(ds.elements(), &FilterState::default());
    assert_eq!(classified.len(), ds.len());
    assert!(classified.iter().all(|c| c.highlighted));
}

#[test]
fn test_search_matches_name_or_symbol_case_insensitively() {
    let ds = bundled();
    let filters = FilterState::new("au", ALL, ALL);
    for c in classify(ds.elements(), &filters) {
        let expected = c.element.name.to_lowercase().contains("au")
            || c.element.symbol.to_lowercase().contains("au");
        assert_eq!(c.highlighted, expected, "{}", c.element.name);
    }
    let hits = numbers(ds.elements(), &filters);
    assert!(hits.contains(&79));
    assert!(!hits.contains(&26));
}

#[test]
fn test_uppercase_search_term() {
    let ds = bundled();
    assert_eq!(
        numbers(ds.elements(), &FilterState::new("IRON", ALL, ALL)),
        vec![26]
    );
}

#[test]
fn test_category_must_match_exactly() {
    let ds = bundled();
    let exact = FilterState::new("", "noble gas", ALL);
    assert_eq!(numbers(ds.elements(), &exact), vec![2, 10, 18, 36, 54, 86]);

    let wrong_case = FilterState::new("", "Noble Gas", ALL);
    assert_eq!(match_count(ds.elements(), &wrong_case), 0);
}

#[test]
fn test_phase_filter() {
    let ds = bundled();
    let liquids = FilterState::new("", ALL, "Liquid");
    assert_eq!(numbers(ds.elements(), &liquids), vec![35, 80]);
}

#[test]
fn test_classify_never_drops_or_reorders() {
    let ds = bundled();
    let filters = FilterState::new("n", "transition metal", "Solid");
    let first = classify(ds.elements(), &filters);
    let second = classify(ds.elements(), &filters);
    assert_eq!(first, second);
    assert_eq!(first.len(), ds.len());
    for (c, el) in first.iter().zip(ds.iter()) {
        assert_eq!(c.element.number, el.number);
    }
}

#[test]
fn test_reset_equals_default_classification() {
    let ds = bundled();
    let mut filters = FilterState::new("go", "transition metal", "Solid");
    assert_eq!(numbers(ds.elements(), &filters), vec![79]);

    filters.reset();
    assert_eq!(
        highlight_mask(ds.elements(), &filters),
        highlight_mask(ds.elements(), &FilterState::default())
    );
}

#[test]
fn test_unknown_filter_value_matches_nothing() {
    let ds = bundled();
    let filters = FilterState::new("", ALL, "Plasma");
    assert_eq!(match_count(ds.elements(), &filters), 0);
    assert_eq!(classify(ds.elements(), &filters).len(), ds.len());
}

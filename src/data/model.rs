use std::collections::BTreeSet;

use super::filter::ALL;

// ---------------------------------------------------------------------------
// Element – one entry of the periodic table
// ---------------------------------------------------------------------------

/// A normalized chemical element record.
///
/// Records are immutable once loaded. Highlighting is never stored here; it is
/// computed per filter pass (see [`crate::data::filter::classify`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Atomic number, the stable identity key.
    pub number: u32,
    pub symbol: String,
    pub name: String,
    /// Free-form category, e.g. `"noble gas"` or `"transition metal"`.
    pub category: String,
    /// `"Gas"`, `"Liquid"` or `"Solid"` in well-formed data.
    pub phase: String,
    /// Standard atomic weight; `None` when missing or unparseable.
    pub atomic_mass: Option<f64>,
    /// 1-based column in the 18-column grid.
    pub xpos: u8,
    /// 1-based row in the 10-row grid (rows 9 and 10 hold the f-block).
    pub ypos: u8,
    pub summary: Option<String>,
    /// Melting point in Kelvin.
    pub melt: Option<f64>,
    /// Boiling point in Kelvin.
    pub boil: Option<f64>,
    pub electron_configuration: Option<String>,
    pub electron_configuration_semantic: Option<String>,
}

impl Element {
    /// Mass with three decimals, or `N/A`.
    pub fn mass_label(&self) -> String {
        match self.atomic_mass {
            Some(m) => format!("{m:.3}"),
            None => "N/A".to_string(),
        }
    }

    pub fn melt_label(&self) -> String {
        kelvin_label(self.melt)
    }

    pub fn boil_label(&self) -> String {
        kelvin_label(self.boil)
    }

    /// Full electron configuration, falling back to the shorthand form.
    pub fn configuration_label(&self) -> &str {
        self.electron_configuration
            .as_deref()
            .or(self.electron_configuration_semantic.as_deref())
            .unwrap_or("N/A")
    }
}

fn kelvin_label(value: Option<f64>) -> String {
    match value {
        Some(k) if k != 0.0 => format!("{k}K"),
        _ => "N/A".to_string(),
    }
}

// ---------------------------------------------------------------------------
// ElementDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded element table with pre-computed filter choices.
#[derive(Debug, Clone)]
pub struct ElementDataset {
    elements: Vec<Element>,
    /// `"all"` followed by the sorted distinct categories.
    pub categories: Vec<String>,
    /// `"all"` followed by the sorted distinct phases.
    pub phases: Vec<String>,
}

impl Default for ElementDataset {
    fn default() -> Self {
        Self::from_elements(Vec::new())
    }
}

impl ElementDataset {
    /// Build the dataset and derive the category / phase choices.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let (categories, phases) = filter_choices(&elements);
        ElementDataset {
            elements,
            categories,
            phases,
        }
    }

    /// Elements in source order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn find_by_number(&self, number: u32) -> Option<&Element> {
        self.elements.iter().find(|el| el.number == number)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Distinct non-empty categories and phases, each sorted and prefixed with
/// the `"all"` sentinel.
pub fn filter_choices(elements: &[Element]) -> (Vec<String>, Vec<String>) {
    let categories: BTreeSet<&str> = elements
        .iter()
        .map(|el| el.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    let phases: BTreeSet<&str> = elements
        .iter()
        .map(|el| el.phase.as_str())
        .filter(|p| !p.is_empty())
        .collect();

    (with_sentinel(categories), with_sentinel(phases))
}

fn with_sentinel(values: BTreeSet<&str>) -> Vec<String> {
    std::iter::once(ALL)
        .chain(values)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn element(number: u32, symbol: &str, name: &str, category: &str, phase: &str) -> Element {
    Element {
        number,
        symbol: symbol.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        phase: phase.to_string(),
        atomic_mass: None,
        xpos: 1,
        ypos: 1,
        summary: None,
        melt: None,
        boil: None,
        electron_configuration: None,
        electron_configuration_semantic: None,
    }
}

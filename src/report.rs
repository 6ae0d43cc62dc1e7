use crate::color::{ColorMap, ColorStrategy};
use crate::data::model::{CaseFolding, DatasetCollection};

// ---------------------------------------------------------------------------
// Report – everything a renderer needs
// ---------------------------------------------------------------------------

/// Loaded datasets plus the colour assignment for their labels.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub collection: DatasetCollection,
    pub color_map: ColorMap,
    /// How labels were folded on load; decides how they are displayed.
    pub case: CaseFolding,
}

impl Report {
    pub fn new(
        title: impl Into<String>,
        collection: DatasetCollection,
        strategy: ColorStrategy,
        case: CaseFolding,
    ) -> Self {
        let color_map = ColorMap::new(collection.labels(), strategy);
        Report {
            title: title.into(),
            collection,
            color_map,
            case,
        }
    }

    /// Label as it should appear on the page.
    ///
    /// Lowercased labels get each word capitalised again; preserved labels are
    /// shown as written.
    pub fn display_label(&self, label: &str) -> String {
        match self.case {
            CaseFolding::Lowercase => title_case(label),
            CaseFolding::Preserve => label.to_string(),
        }
    }
}

/// Uppercase the first character of every word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}

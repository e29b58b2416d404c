// Filter engine: an explicit, immutable predicate set applied to the
// normalized dataset. The pipeline stays a pure function of
// (dataset, predicate set); the interactive menu just builds new `FilterSet`
// values and re-runs it.
use crate::types::Record;

/// User-selected constraints. `None` on a single-valued dimension is the
/// "all" sentinel and disables that predicate. An empty `categories` list
/// means no category filter is applied (the multi-select pages default to
/// every category, so "nothing selected" and "everything selected" are
/// deliberately equivalent here).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub transport_mode: Option<String>,
    pub carrier: Option<String>,
    pub categories: Vec<String>,
}

impl FilterSet {
    pub fn is_unfiltered(&self) -> bool {
        self.transport_mode.is_none() && self.carrier.is_none() && self.categories.is_empty()
    }

    /// AND across dimensions, OR within the category list.
    pub fn matches(&self, r: &Record) -> bool {
        if let Some(mode) = &self.transport_mode {
            if r.transport_mode != *mode {
                return false;
            }
        }
        if let Some(carrier) = &self.carrier {
            if r.carrier != *carrier {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.iter().any(|c| *c == r.category) {
            return false;
        }
        true
    }
}

/// Rows satisfying every active predicate, in original order. Zero rows is a
/// legitimate result, not an error.
pub fn apply(data: &[Record], filters: &FilterSet) -> Vec<Record> {
    data.iter().filter(|r| filters.matches(r)).cloned().collect()
}

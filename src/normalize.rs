// Categorical code -> display label mapping.
//
// The source file carries English category codes ("skincare", "Road",
// "Carrier A"); the dashboard vocabulary is Portuguese. The lookup tables are
// static configuration, not logic: values with no entry pass through
// unchanged, which also makes normalization idempotent: an already-labelled
// dataset maps onto itself.
use crate::types::Record;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static CATEGORY_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("skincare", "Linha para Peles"),
        ("haircare", "Linha para Cabelos"),
        ("cosmetics", "Linha para Cosméticos"),
    ])
});

static SEGMENT_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Female", "Feminino"),
        ("Male", "Masculino"),
        ("Non-Binary", "Não-Binário"),
        ("Unknown", "Desconhecido"),
    ])
});

static TRANSPORT_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Road", "Rodoviário"),
        ("Air", "Aéreo"),
        ("Sea", "Marítimo"),
        ("Rail", "Ferroviário"),
    ])
});

static CARRIER_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Carrier A", "Transportadora A"),
        ("Carrier B", "Transportadora B"),
        ("Carrier C", "Transportadora C"),
    ])
});

fn translate(table: &HashMap<&'static str, &'static str>, value: &str) -> String {
    match table.get(value) {
        Some(label) => (*label).to_string(),
        None => value.to_string(),
    }
}

pub fn category_label(value: &str) -> String {
    translate(&CATEGORY_LABELS, value)
}

pub fn segment_label(value: &str) -> String {
    translate(&SEGMENT_LABELS, value)
}

pub fn transport_label(value: &str) -> String {
    translate(&TRANSPORT_LABELS, value)
}

pub fn carrier_label(value: &str) -> String {
    translate(&CARRIER_LABELS, value)
}

/// Apply the display-label tables to every categorical column, leaving the
/// numeric fields untouched. Produces a new collection; the input is never
/// mutated in place.
pub fn normalize(data: &[Record]) -> Vec<Record> {
    data.iter()
        .map(|r| Record {
            category: category_label(&r.category),
            segment: segment_label(&r.segment),
            transport_mode: transport_label(&r.transport_mode),
            carrier: carrier_label(&r.carrier),
            ..r.clone()
        })
        .collect()
}

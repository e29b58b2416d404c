// Derived-metrics calculator: row derivations, scalar KPIs, and the
// group-by reductions the report tables are built from. Every division has a
// local zero-denominator guard; an empty input degrades to zeros instead of
// raising.
use crate::types::{DerivedRecord, Kpis, Record};
use crate::util::mean;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Ratio with the division-by-zero guard used everywhere in this module.
fn pct(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

/// Compute the per-row derived fields. Each output depends only on its own
/// record's inputs.
pub fn derive(rec: &Record) -> DerivedRecord {
    let profit = rec.revenue - rec.total_cost;
    DerivedRecord {
        profit,
        margin_pct: pct(profit, rec.revenue),
        defect_loss: rec.revenue * rec.defect_rate / 100.0,
        logistics_pct: pct(rec.shipping_cost, rec.revenue),
        rec: rec.clone(),
    }
}

pub fn derive_all(data: &[Record]) -> Vec<DerivedRecord> {
    data.iter().map(derive).collect()
}

/// Scalar KPIs over the filtered, derived dataset.
///
/// The margin is weighted: aggregate profit over aggregate revenue, not the
/// mean of per-row margins. Rows with near-zero revenue would otherwise
/// dominate the average.
pub fn kpis(rows: &[DerivedRecord]) -> Kpis {
    let total_revenue: f64 = rows.iter().map(|r| r.rec.revenue).sum();
    let total_units_sold: f64 = rows.iter().map(|r| r.rec.units_sold).sum();
    let total_cost: f64 = rows.iter().map(|r| r.rec.total_cost).sum();
    let total_profit: f64 = rows.iter().map(|r| r.profit).sum();
    let total_shipping: f64 = rows.iter().map(|r| r.rec.shipping_cost).sum();
    let total_defect_loss: f64 = rows.iter().map(|r| r.defect_loss).sum();
    let defect_rates: Vec<f64> = rows.iter().map(|r| r.rec.defect_rate).collect();

    Kpis {
        total_revenue,
        total_units_sold,
        total_cost,
        weighted_margin_pct: pct(total_profit, total_revenue),
        mean_defect_rate: mean(&defect_rates),
        total_defect_loss,
        logistics_cost_pct: pct(total_shipping, total_revenue),
    }
}

/// One group of a grouped reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub value: f64,
    pub count: usize,
}

fn group_values<K, V>(rows: &[DerivedRecord], key: K, value: V) -> HashMap<String, Vec<f64>>
where
    K: Fn(&DerivedRecord) -> &str,
    V: Fn(&DerivedRecord) -> f64,
{
    let mut map: HashMap<String, Vec<f64>> = HashMap::new();
    for r in rows {
        map.entry(key(r).to_string()).or_default().push(value(r));
    }
    map
}

// Group order is not meaningful to the aggregation itself, but the report
// tables should be deterministic: descending by value, ties by key.
fn sorted(mut groups: Vec<Group>) -> Vec<Group> {
    groups.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
    groups
}

/// Sum `value` per distinct `key`. The group sums partition the total over
/// the input rows.
pub fn sum_by<K, V>(rows: &[DerivedRecord], key: K, value: V) -> Vec<Group>
where
    K: Fn(&DerivedRecord) -> &str,
    V: Fn(&DerivedRecord) -> f64,
{
    sorted(
        group_values(rows, key, value)
            .into_iter()
            .map(|(key, vals)| Group {
                key,
                value: vals.iter().sum(),
                count: vals.len(),
            })
            .collect(),
    )
}

/// Arithmetic mean of `value` per distinct `key`.
pub fn mean_by<K, V>(rows: &[DerivedRecord], key: K, value: V) -> Vec<Group>
where
    K: Fn(&DerivedRecord) -> &str,
    V: Fn(&DerivedRecord) -> f64,
{
    sorted(
        group_values(rows, key, value)
            .into_iter()
            .map(|(key, vals)| Group {
                count: vals.len(),
                value: mean(&vals),
                key,
            })
            .collect(),
    )
}

/// The `min(n, len)` rows with the largest `rank` value, descending. The
/// sort is stable, so ties keep their original row order.
pub fn top_n_by<F>(rows: &[DerivedRecord], n: usize, rank: F) -> Vec<DerivedRecord>
where
    F: Fn(&DerivedRecord) -> f64,
{
    let mut ranked: Vec<DerivedRecord> = rows.to_vec();
    ranked.sort_by(|a, b| rank(b).partial_cmp(&rank(a)).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str, category: &str, revenue: f64, total_cost: f64, defect: f64) -> Record {
        Record {
            sku: sku.into(),
            category: category.into(),
            location: "Bangalore".into(),
            transport_mode: "Rodoviário".into(),
            carrier: "Transportadora A".into(),
            segment: "Masculino".into(),
            production_volume: 100.0,
            units_sold: 10.0,
            shipping_cost: 3.0,
            manufacturing_cost: total_cost / 2.0,
            total_cost,
            revenue,
            defect_rate: defect,
        }
    }

    #[test]
    fn profit_is_revenue_minus_cost_per_row() {
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 5.0),
            record("S2", "B", 200.0, 150.0, 10.0),
        ]);
        for r in &rows {
            assert_eq!(r.profit, r.rec.revenue - r.rec.total_cost);
        }
        assert_eq!(rows[0].profit, 40.0);
        assert_eq!(rows[1].profit, 50.0);
    }

    #[test]
    fn zero_revenue_row_has_zero_ratios() {
        let r = derive(&record("S1", "A", 0.0, 20.0, 4.0));
        assert_eq!(r.margin_pct, 0.0);
        assert_eq!(r.logistics_pct, 0.0);
        assert_eq!(r.defect_loss, 0.0);
    }

    #[test]
    fn kpis_over_zero_revenue_set_have_zero_ratios() {
        let rows = derive_all(&[
            record("S1", "A", 0.0, 20.0, 4.0),
            record("S2", "B", 0.0, 10.0, 2.0),
        ]);
        let k = kpis(&rows);
        assert_eq!(k.total_revenue, 0.0);
        assert_eq!(k.weighted_margin_pct, 0.0);
        assert_eq!(k.logistics_cost_pct, 0.0);
    }

    #[test]
    fn kpis_over_empty_set_are_all_zero() {
        let k = kpis(&[]);
        assert_eq!(
            k,
            Kpis {
                total_revenue: 0.0,
                total_units_sold: 0.0,
                total_cost: 0.0,
                weighted_margin_pct: 0.0,
                mean_defect_rate: 0.0,
                total_defect_loss: 0.0,
                logistics_cost_pct: 0.0,
            }
        );
    }

    #[test]
    fn weighted_margin_is_not_mean_of_row_margins() {
        // Row margins are 40% and 25%; the weighted margin leans on the
        // larger-revenue row: (40 + 50) / 300 = 30%.
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 0.0),
            record("S2", "B", 200.0, 150.0, 0.0),
        ]);
        let k = kpis(&rows);
        assert!((k.weighted_margin_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn group_sums_partition_the_total() {
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 5.0),
            record("S2", "B", 200.0, 150.0, 10.0),
            record("S3", "A", 50.0, 20.0, 0.0),
        ]);
        let groups = sum_by(&rows, |r| r.rec.category.as_str(), |r| r.rec.revenue);
        let grouped_total: f64 = groups.iter().map(|g| g.value).sum();
        let total: f64 = rows.iter().map(|r| r.rec.revenue).sum();
        assert_eq!(grouped_total, total);
        assert_eq!(groups.len(), 2);
        // Deterministic order: descending by value.
        assert_eq!(groups[0].key, "B");
        assert_eq!(groups[1].key, "A");
        assert_eq!(groups[1].count, 2);
    }

    #[test]
    fn mean_by_averages_within_each_group() {
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 2.0),
            record("S2", "A", 100.0, 60.0, 4.0),
            record("S3", "B", 100.0, 60.0, 9.0),
        ]);
        let groups = mean_by(&rows, |r| r.rec.category.as_str(), |r| r.rec.defect_rate);
        assert_eq!(groups[0].key, "B");
        assert_eq!(groups[0].value, 9.0);
        assert_eq!(groups[1].key, "A");
        assert_eq!(groups[1].value, 3.0);
    }

    #[test]
    fn top_n_is_descending_stable_and_bounded() {
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 0.0), // profit 40
            record("S2", "B", 300.0, 200.0, 0.0), // profit 100
            record("S3", "A", 150.0, 110.0, 0.0), // profit 40, ties S1
        ]);
        let top = top_n_by(&rows, 2, |r| r.profit);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rec.sku, "S2");
        // Tie between S1 and S3 keeps original row order.
        assert_eq!(top[1].rec.sku, "S1");

        let all = top_n_by(&rows, 10, |r| r.profit);
        assert_eq!(all.len(), rows.len());
        assert!(top_n_by(&[], 5, |r| r.profit).is_empty());
    }
}

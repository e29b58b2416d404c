// Report builders: the per-page groupings over one shared filter-and-derive
// pipeline. Each function takes the derived rows and produces display-ready
// table rows; the menu decides which tables make up which report.
use crate::metrics::{mean_by, sum_by, top_n_by, Group};
use crate::types::{
    CarrierRow, CategorySalesRow, DefectCategoryRow, DefectLocationRow, DerivedRecord,
    DetailRow, LocationCostRow, LocationShippingRow, SegmentSalesRow, TopDefectRow,
    TopProductRow, TransportModeRow,
};
use crate::util::{format_brl, format_int};
use std::collections::HashMap;

fn lookup(groups: &[Group]) -> HashMap<&str, f64> {
    groups.iter().map(|g| (g.key.as_str(), g.value)).collect()
}

/// Revenue and units sold per product category, revenue-descending.
pub fn category_sales(rows: &[DerivedRecord]) -> Vec<CategorySalesRow> {
    let revenue = sum_by(rows, |r| r.rec.category.as_str(), |r| r.rec.revenue);
    let units = sum_by(rows, |r| r.rec.category.as_str(), |r| r.rec.units_sold);
    let units = lookup(&units);
    revenue
        .into_iter()
        .map(|g| CategorySalesRow {
            units_sold: format_int(units.get(g.key.as_str()).copied().unwrap_or(0.0) as i64),
            revenue: format_brl(g.value, 2),
            category: g.key,
        })
        .collect()
}

/// Units sold and revenue per customer segment, units-descending.
pub fn segment_sales(rows: &[DerivedRecord]) -> Vec<SegmentSalesRow> {
    let units = sum_by(rows, |r| r.rec.segment.as_str(), |r| r.rec.units_sold);
    let revenue = sum_by(rows, |r| r.rec.segment.as_str(), |r| r.rec.revenue);
    let revenue = lookup(&revenue);
    units
        .into_iter()
        .map(|g| SegmentSalesRow {
            revenue: format_brl(revenue.get(g.key.as_str()).copied().unwrap_or(0.0), 2),
            units_sold: format_int(g.value as i64),
            segment: g.key,
        })
        .collect()
}

/// Total cost and units sold per location, cost-descending.
pub fn location_costs(rows: &[DerivedRecord]) -> Vec<LocationCostRow> {
    let cost = sum_by(rows, |r| r.rec.location.as_str(), |r| r.rec.total_cost);
    let units = sum_by(rows, |r| r.rec.location.as_str(), |r| r.rec.units_sold);
    let units = lookup(&units);
    cost.into_iter()
        .map(|g| LocationCostRow {
            units_sold: format_int(units.get(g.key.as_str()).copied().unwrap_or(0.0) as i64),
            total_cost: format_brl(g.value, 2),
            location: g.key,
        })
        .collect()
}

/// Top `n` products by profit.
pub fn top_products(rows: &[DerivedRecord], n: usize) -> Vec<TopProductRow> {
    top_n_by(rows, n, |r| r.profit)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| TopProductRow {
            rank: idx + 1,
            sku: r.rec.sku.clone(),
            category: r.rec.category.clone(),
            profit: format_brl(r.profit, 2),
            margin: format!("{:.1}%", r.margin_pct),
        })
        .collect()
}

/// Mean defect rate and total defect loss per category.
pub fn defects_by_category(rows: &[DerivedRecord]) -> Vec<DefectCategoryRow> {
    let rate = mean_by(rows, |r| r.rec.category.as_str(), |r| r.rec.defect_rate);
    let loss = sum_by(rows, |r| r.rec.category.as_str(), |r| r.defect_loss);
    let loss = lookup(&loss);
    rate.into_iter()
        .map(|g| DefectCategoryRow {
            defect_loss: format_brl(loss.get(g.key.as_str()).copied().unwrap_or(0.0), 2),
            mean_defect_rate: format!("{:.2}%", g.value),
            category: g.key,
        })
        .collect()
}

/// Mean defect rate and total defect loss per location.
pub fn defects_by_location(rows: &[DerivedRecord]) -> Vec<DefectLocationRow> {
    let rate = mean_by(rows, |r| r.rec.location.as_str(), |r| r.rec.defect_rate);
    let loss = sum_by(rows, |r| r.rec.location.as_str(), |r| r.defect_loss);
    let loss = lookup(&loss);
    rate.into_iter()
        .map(|g| DefectLocationRow {
            defect_loss: format_brl(loss.get(g.key.as_str()).copied().unwrap_or(0.0), 2),
            mean_defect_rate: format!("{:.2}%", g.value),
            location: g.key,
        })
        .collect()
}

/// Top `n` products by defect rate.
pub fn top_defect_products(rows: &[DerivedRecord], n: usize) -> Vec<TopDefectRow> {
    top_n_by(rows, n, |r| r.rec.defect_rate)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| TopDefectRow {
            rank: idx + 1,
            sku: r.rec.sku.clone(),
            category: r.rec.category.clone(),
            defect_rate: format!("{:.2}%", r.rec.defect_rate),
            defect_loss: format_brl(r.defect_loss, 2),
        })
        .collect()
}

/// Order volume and shipping costs per carrier, volume-descending.
pub fn carrier_summary(rows: &[DerivedRecord]) -> Vec<CarrierRow> {
    let volume = sum_by(rows, |r| r.rec.carrier.as_str(), |r| r.rec.production_volume);
    let total = sum_by(rows, |r| r.rec.carrier.as_str(), |r| r.rec.shipping_cost);
    let avg = mean_by(rows, |r| r.rec.carrier.as_str(), |r| r.rec.shipping_cost);
    let total = lookup(&total);
    let avg = lookup(&avg);
    volume
        .into_iter()
        .map(|g| CarrierRow {
            order_volume: format_int(g.value as i64),
            mean_shipping_cost: format_brl(avg.get(g.key.as_str()).copied().unwrap_or(0.0), 2),
            total_shipping_cost: format_brl(total.get(g.key.as_str()).copied().unwrap_or(0.0), 2),
            carrier: g.key,
        })
        .collect()
}

/// Mean of the per-carrier mean shipping costs. This intentionally averages
/// the carrier means rather than all rows, so a high-volume carrier does not
/// drown out the others.
pub fn mean_carrier_shipping_cost(rows: &[DerivedRecord]) -> f64 {
    let per_carrier = mean_by(rows, |r| r.rec.carrier.as_str(), |r| r.rec.shipping_cost);
    crate::util::mean(&per_carrier.iter().map(|g| g.value).collect::<Vec<_>>())
}

/// Mean total cost per transport mode.
pub fn transport_mode_costs(rows: &[DerivedRecord]) -> Vec<TransportModeRow> {
    mean_by(rows, |r| r.rec.transport_mode.as_str(), |r| r.rec.total_cost)
        .into_iter()
        .map(|g| TransportModeRow {
            mean_total_cost: format_brl(g.value, 2),
            transport_mode: g.key,
        })
        .collect()
}

/// Total shipping cost per location.
pub fn location_shipping(rows: &[DerivedRecord]) -> Vec<LocationShippingRow> {
    sum_by(rows, |r| r.rec.location.as_str(), |r| r.rec.shipping_cost)
        .into_iter()
        .map(|g| LocationShippingRow {
            shipping_cost: format_brl(g.value, 2),
            location: g.key,
        })
        .collect()
}

/// Detail-table preview rows, in filtered order.
pub fn detail_rows(rows: &[DerivedRecord]) -> Vec<DetailRow> {
    rows.iter()
        .map(|r| DetailRow {
            sku: r.rec.sku.clone(),
            category: r.rec.category.clone(),
            units_sold: format_int(r.rec.units_sold as i64),
            revenue: format_brl(r.rec.revenue, 2),
            total_cost: format_brl(r.rec.total_cost, 2),
            margin: format!("{:.1}%", r.margin_pct),
            profit: format_brl(r.profit, 2),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_all;
    use crate::types::Record;

    fn record(sku: &str, category: &str, revenue: f64, cost: f64, defect: f64) -> Record {
        Record {
            sku: sku.into(),
            category: category.into(),
            location: "Mumbai".into(),
            transport_mode: "Rodoviário".into(),
            carrier: "Transportadora A".into(),
            segment: "Feminino".into(),
            production_volume: 500.0,
            units_sold: 20.0,
            shipping_cost: 8.0,
            manufacturing_cost: cost / 2.0,
            total_cost: cost,
            revenue,
            defect_rate: defect,
        }
    }

    #[test]
    fn category_sales_joins_revenue_and_units() {
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 0.0),
            record("S2", "A", 50.0, 10.0, 0.0),
            record("S3", "B", 400.0, 100.0, 0.0),
        ]);
        let table = category_sales(&rows);
        assert_eq!(table[0].category, "B");
        assert_eq!(table[0].revenue, "400,00");
        assert_eq!(table[1].category, "A");
        assert_eq!(table[1].revenue, "150,00");
        assert_eq!(table[1].units_sold, "40");
    }

    #[test]
    fn top_products_ranks_by_profit() {
        let rows = derive_all(&[
            record("S1", "A", 100.0, 60.0, 0.0),
            record("S2", "B", 500.0, 100.0, 0.0),
        ]);
        let table = top_products(&rows, 5);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[0].sku, "S2");
        assert_eq!(table[0].profit, "400,00");
    }

    #[test]
    fn all_tables_handle_an_empty_result() {
        let rows = derive_all(&[]);
        assert!(category_sales(&rows).is_empty());
        assert!(segment_sales(&rows).is_empty());
        assert!(location_costs(&rows).is_empty());
        assert!(top_products(&rows, 15).is_empty());
        assert!(defects_by_category(&rows).is_empty());
        assert!(defects_by_location(&rows).is_empty());
        assert!(top_defect_products(&rows, 10).is_empty());
        assert!(carrier_summary(&rows).is_empty());
        assert!(transport_mode_costs(&rows).is_empty());
        assert!(location_shipping(&rows).is_empty());
        assert!(detail_rows(&rows).is_empty());
        assert_eq!(mean_carrier_shipping_cost(&rows), 0.0);
    }
}

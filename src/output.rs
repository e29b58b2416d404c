// Export boundary: console previews, CSV/XLSX/JSON writers. No business
// logic here; everything receives already-derived rows.
use crate::types::DerivedRecord;
use crate::util::format_decimal;
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::error::Error;
use tabled::{settings::Style, Table, Tabled};

/// Canonical column order of the detail export, shared by the CSV and XLSX
/// writers.
const DETAIL_COLUMNS: [&str; 16] = [
    "Produto_SKU",
    "Categoria",
    "Localizacao",
    "Modos_Transporte",
    "Transportadora",
    "Demografia_Cliente",
    "Volume_Pedidos",
    "Quantidade_Vendida",
    "Custos_Envio",
    "Custos_Manufatura",
    "Custos_Totais",
    "Receita_Gerada",
    "Taxa_Defeitos",
    "Lucro",
    "Margem",
    "Prejuizo_Defeitos",
];

fn detail_fields(r: &DerivedRecord) -> [String; 16] {
    [
        r.rec.sku.clone(),
        r.rec.category.clone(),
        r.rec.location.clone(),
        r.rec.transport_mode.clone(),
        r.rec.carrier.clone(),
        r.rec.segment.clone(),
        format_decimal(r.rec.production_volume, 0),
        format_decimal(r.rec.units_sold, 0),
        format_decimal(r.rec.shipping_cost, 2),
        format_decimal(r.rec.manufacturing_cost, 2),
        format_decimal(r.rec.total_cost, 2),
        format_decimal(r.rec.revenue, 2),
        format_decimal(r.rec.defect_rate, 2),
        format_decimal(r.profit, 2),
        format_decimal(r.margin_pct, 2),
        format_decimal(r.defect_loss, 2),
    ]
}

/// Write a grouped report table as a plain comma-separated CSV.
pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the filtered/derived detail table using the observed export
/// convention: semicolon separator, comma decimal mark.
pub fn write_detail_csv(path: &str, rows: &[DerivedRecord]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    wtr.write_record(DETAIL_COLUMNS)?;
    for r in rows {
        wtr.write_record(detail_fields(r))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the detail table as a single-sheet workbook: header row, one row
/// per record, numeric cells kept numeric.
pub fn write_detail_xlsx(path: &str, rows: &[DerivedRecord]) -> Result<(), Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Dados_Detalhados")?;

    for (col, name) in DETAIL_COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (idx, r) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &r.rec.sku)?;
        sheet.write_string(row, 1, &r.rec.category)?;
        sheet.write_string(row, 2, &r.rec.location)?;
        sheet.write_string(row, 3, &r.rec.transport_mode)?;
        sheet.write_string(row, 4, &r.rec.carrier)?;
        sheet.write_string(row, 5, &r.rec.segment)?;
        sheet.write_number(row, 6, r.rec.production_volume)?;
        sheet.write_number(row, 7, r.rec.units_sold)?;
        sheet.write_number(row, 8, r.rec.shipping_cost)?;
        sheet.write_number(row, 9, r.rec.manufacturing_cost)?;
        sheet.write_number(row, 10, r.rec.total_cost)?;
        sheet.write_number(row, 11, r.rec.revenue)?;
        sheet.write_number(row, 12, r.rec.defect_rate)?;
        sheet.write_number(row, 13, r.profit)?;
        sheet.write_number(row, 14, r.margin_pct)?;
        sheet.write_number(row, 15, r.defect_loss)?;
    }

    workbook.save(path)?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print the first `max_rows` rows of a table in markdown style.
pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use crate::types::Record;

    fn derived() -> DerivedRecord {
        derive(&Record {
            sku: "SKU1".into(),
            category: "Linha para Peles".into(),
            location: "Mumbai".into(),
            transport_mode: "Rodoviário".into(),
            carrier: "Transportadora A".into(),
            segment: "Feminino".into(),
            production_volume: 500.0,
            units_sold: 20.0,
            shipping_cost: 8.0,
            manufacturing_cost: 30.0,
            total_cost: 60.0,
            revenue: 100.0,
            defect_rate: 5.0,
        })
    }

    #[test]
    fn detail_csv_uses_semicolons_and_comma_decimals() {
        let path = std::env::temp_dir().join("supply_insights_detail.csv");
        write_detail_csv(path.to_str().unwrap(), &[derived()]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Produto_SKU;Categoria;"));
        let row = lines.next().unwrap();
        assert!(row.contains("SKU1"));
        assert!(row.contains("100,00"));
        assert!(row.contains("40,00")); // profit
        assert!(row.contains("5,00")); // defect loss
    }

    #[test]
    fn detail_xlsx_saves_a_workbook() {
        let path = std::env::temp_dir().join("supply_insights_detail.xlsx");
        write_detail_xlsx(path.to_str().unwrap(), &[derived()]).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn detail_field_order_matches_the_header() {
        let fields = detail_fields(&derived());
        assert_eq!(fields.len(), DETAIL_COLUMNS.len());
        assert_eq!(fields[0], "SKU1");
        assert_eq!(fields[11], "100,00"); // Receita_Gerada
        assert_eq!(fields[13], "40,00"); // Lucro
    }
}

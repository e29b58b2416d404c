use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One row of `supply_chain_data.csv` as it appears on disk, before any
/// normalization. Every field is optional text; parsing into typed values is
/// the loader's job. Column renaming (source English header -> canonical
/// field) happens here, via serde.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    #[serde(rename = "Product type")]
    pub product_type: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Transportation modes")]
    pub transportation_modes: Option<String>,
    #[serde(rename = "Shipping carriers")]
    pub shipping_carriers: Option<String>,
    #[serde(rename = "Customer demographics")]
    pub customer_demographics: Option<String>,
    #[serde(rename = "Production volumes")]
    pub production_volumes: Option<String>,
    #[serde(rename = "Number of products sold")]
    pub number_of_products_sold: Option<String>,
    #[serde(rename = "Shipping costs")]
    pub shipping_costs: Option<String>,
    #[serde(rename = "Manufacturing costs")]
    pub manufacturing_costs: Option<String>,
    #[serde(rename = "Costs")]
    pub costs: Option<String>,
    #[serde(rename = "Revenue generated")]
    pub revenue_generated: Option<String>,
    #[serde(rename = "Defect rates")]
    pub defect_rates: Option<String>,
}

/// A typed, normalized record: canonical vocabulary, display labels applied,
/// numeric fields parsed. The loaded dataset is an immutable `Vec<Record>`;
/// filtering and derivation always produce new collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub sku: String,
    pub category: String,
    pub location: String,
    pub transport_mode: String,
    pub carrier: String,
    pub segment: String,
    pub production_volume: f64,
    pub units_sold: f64,
    pub shipping_cost: f64,
    pub manufacturing_cost: f64,
    pub total_cost: f64,
    pub revenue: f64,
    pub defect_rate: f64,
}

/// A `Record` augmented with the computed fields. Every derived value is a
/// pure function of the record's own inputs; nothing here depends on other
/// rows.
#[derive(Debug, Clone)]
pub struct DerivedRecord {
    pub rec: Record,
    /// revenue - total cost
    pub profit: f64,
    /// profit / revenue * 100, 0 when revenue is 0
    pub margin_pct: f64,
    /// revenue * defect rate / 100
    pub defect_loss: f64,
    /// shipping cost / revenue * 100, 0 when revenue is 0
    pub logistics_pct: f64,
}

/// Scalar KPIs over a filtered dataset. Serialized to `kpis.json` alongside
/// the report files.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_units_sold: f64,
    pub total_cost: f64,
    /// Aggregate profit / aggregate revenue * 100, not the mean of per-row
    /// margins, which would be skewed by rows with tiny revenue.
    pub weighted_margin_pct: f64,
    pub mean_defect_rate: f64,
    pub total_defect_loss: f64,
    /// Aggregate shipping cost / aggregate revenue * 100.
    pub logistics_cost_pct: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CategorySalesRow {
    #[serde(rename = "Categoria")]
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Receita_Gerada")]
    #[tabled(rename = "Receita_Gerada")]
    pub revenue: String,
    #[serde(rename = "Quantidade_Vendida")]
    #[tabled(rename = "Quantidade_Vendida")]
    pub units_sold: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SegmentSalesRow {
    #[serde(rename = "Demografia_Cliente")]
    #[tabled(rename = "Demografia_Cliente")]
    pub segment: String,
    #[serde(rename = "Quantidade_Vendida")]
    #[tabled(rename = "Quantidade_Vendida")]
    pub units_sold: String,
    #[serde(rename = "Receita_Gerada")]
    #[tabled(rename = "Receita_Gerada")]
    pub revenue: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct LocationCostRow {
    #[serde(rename = "Localizacao")]
    #[tabled(rename = "Localizacao")]
    pub location: String,
    #[serde(rename = "Custos_Totais")]
    #[tabled(rename = "Custos_Totais")]
    pub total_cost: String,
    #[serde(rename = "Quantidade_Vendida")]
    #[tabled(rename = "Quantidade_Vendida")]
    pub units_sold: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TopProductRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Produto_SKU")]
    #[tabled(rename = "Produto_SKU")]
    pub sku: String,
    #[serde(rename = "Categoria")]
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Lucro")]
    #[tabled(rename = "Lucro")]
    pub profit: String,
    #[serde(rename = "Margem")]
    #[tabled(rename = "Margem")]
    pub margin: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DefectCategoryRow {
    #[serde(rename = "Categoria")]
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Taxa_Defeitos")]
    #[tabled(rename = "Taxa_Defeitos")]
    pub mean_defect_rate: String,
    #[serde(rename = "Prejuizo_Defeitos")]
    #[tabled(rename = "Prejuizo_Defeitos")]
    pub defect_loss: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DefectLocationRow {
    #[serde(rename = "Localizacao")]
    #[tabled(rename = "Localizacao")]
    pub location: String,
    #[serde(rename = "Taxa_Defeitos")]
    #[tabled(rename = "Taxa_Defeitos")]
    pub mean_defect_rate: String,
    #[serde(rename = "Prejuizo_Defeitos")]
    #[tabled(rename = "Prejuizo_Defeitos")]
    pub defect_loss: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TopDefectRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Produto_SKU")]
    #[tabled(rename = "Produto_SKU")]
    pub sku: String,
    #[serde(rename = "Categoria")]
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Taxa_Defeitos")]
    #[tabled(rename = "Taxa_Defeitos")]
    pub defect_rate: String,
    #[serde(rename = "Prejuizo_Defeitos")]
    #[tabled(rename = "Prejuizo_Defeitos")]
    pub defect_loss: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CarrierRow {
    #[serde(rename = "Transportadora")]
    #[tabled(rename = "Transportadora")]
    pub carrier: String,
    #[serde(rename = "Volume_Pedidos")]
    #[tabled(rename = "Volume_Pedidos")]
    pub order_volume: String,
    #[serde(rename = "Custo_Medio_Envio")]
    #[tabled(rename = "Custo_Medio_Envio")]
    pub mean_shipping_cost: String,
    #[serde(rename = "Custos_Envio")]
    #[tabled(rename = "Custos_Envio")]
    pub total_shipping_cost: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct TransportModeRow {
    #[serde(rename = "Modos_Transporte")]
    #[tabled(rename = "Modos_Transporte")]
    pub transport_mode: String,
    #[serde(rename = "Custo_Medio_Total")]
    #[tabled(rename = "Custo_Medio_Total")]
    pub mean_total_cost: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct LocationShippingRow {
    #[serde(rename = "Localizacao")]
    #[tabled(rename = "Localizacao")]
    pub location: String,
    #[serde(rename = "Custos_Envio")]
    #[tabled(rename = "Custos_Envio")]
    pub shipping_cost: String,
}

/// Console preview of the detail table. The full detail export (all
/// canonical columns, raw values) goes through `output::write_detail_csv`
/// and `output::write_detail_xlsx` instead.
#[derive(Debug, Tabled, Clone)]
pub struct DetailRow {
    #[tabled(rename = "Produto_SKU")]
    pub sku: String,
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[tabled(rename = "Quantidade_Vendida")]
    pub units_sold: String,
    #[tabled(rename = "Receita_Gerada")]
    pub revenue: String,
    #[tabled(rename = "Custos_Totais")]
    pub total_cost: String,
    #[tabled(rename = "Margem")]
    pub margin: String,
    #[tabled(rename = "Lucro")]
    pub profit: String,
}

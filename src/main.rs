// Entry point and high-level CLI flow.
//
// The binary drives one pipeline (load, normalize, filter, derive) and
// renders three reports from it:
// - Option [1] loads the supply-chain CSV (memoized for the session).
// - Option [2] edits the filter selection (transport mode, carrier,
//   categories).
// - Options [3]-[5] generate the overview, quality, and carrier reports:
//   KPI lines and table previews on the console, full tables and the detail
//   export written to files.
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use supply_insights::filter::{self, FilterSet};
use supply_insights::loader::{self, LoadError};
use supply_insights::types::DerivedRecord;
use supply_insights::{metrics, normalize, output, reports, util};

const DEFAULT_DATA_PATH: &str = "supply_chain_data.csv";

// The dataset itself is memoized inside the loader; the only mutable session
// state is the current filter selection.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        filters: FilterSet::default(),
    })
});

struct AppState {
    filters: FilterSet,
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    prompt("Enter choice: ")
}

/// Handle option [1]: load (or re-use) the dataset and print diagnostics.
fn handle_load(path: &str) {
    match loader::dataset(path) {
        Ok((_, report)) => {
            println!(
                "Dataset ready: {} rows loaded, {} kept.",
                util::format_int(report.total_rows as i64),
                util::format_int(report.kept_rows as i64)
            );
            if report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse/validation errors.",
                    util::format_int(report.parse_errors as i64)
                );
            }
            println!();
        }
        Err(e) => {
            eprintln!("{}\n", e);
        }
    }
}

/// Handle option [2]: rebuild the filter set from user input.
///
/// Blank answers select the "all" sentinel. English source codes are
/// accepted and mapped through the same label tables as the data, so
/// "Road" and "Rodoviário" select the same rows.
fn handle_filters() {
    let transport = prompt("Transport mode (blank = all): ");
    let carrier = prompt("Carrier (blank = all): ");
    let categories = prompt("Categories, comma-separated (blank = all): ");

    let filters = FilterSet {
        transport_mode: match transport.as_str() {
            "" => None,
            t => Some(normalize::transport_label(t)),
        },
        carrier: match carrier.as_str() {
            "" => None,
            c => Some(normalize::carrier_label(c)),
        },
        categories: categories
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize::category_label)
            .collect(),
    };

    if filters.is_unfiltered() {
        println!("Filters cleared.\n");
    } else {
        println!("Filters set: {:?}\n", filters);
    }
    let mut state = APP_STATE.lock().unwrap();
    state.filters = filters;
}

/// Run the shared pipeline: cached dataset -> current filters -> derived
/// rows. Loader failures short-circuit; an empty filter result does not.
fn filtered_derived(path: &str) -> Result<Vec<DerivedRecord>, LoadError> {
    let (data, _) = loader::dataset(path)?;
    let filters = {
        let state = APP_STATE.lock().unwrap();
        state.filters.clone()
    };
    let subset = filter::apply(data, &filters);
    Ok(metrics::derive_all(&subset))
}

fn export_csv<T: serde::Serialize>(path: &str, rows: &[T]) {
    if let Err(e) = output::write_csv(path, rows) {
        eprintln!("Write error: {}", e);
    }
}

fn export_detail(rows: &[DerivedRecord]) {
    if let Err(e) = output::write_detail_csv("dados_detalhados.csv", rows) {
        eprintln!("Write error: {}", e);
    }
    if let Err(e) = output::write_detail_xlsx("dados_detalhados.xlsx", rows) {
        eprintln!("Write error: {}", e);
    }
    println!("(Detail table exported to dados_detalhados.csv / dados_detalhados.xlsx)\n");
}

/// Handle option [3]: sales overview.
fn handle_overview(path: &str) {
    let rows = match filtered_derived(path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("{}\n", e);
            return;
        }
    };
    let kpis = metrics::kpis(&rows);

    println!("Overview: Sales and Revenue\n");
    println!("Faturamento Total: R$ {}", util::format_brl(kpis.total_revenue, 2));
    println!(
        "Total de Vendas:   {}",
        util::format_int(kpis.total_units_sold as i64)
    );
    println!("Custo Total:       R$ {}", util::format_brl(kpis.total_cost, 2));
    println!("Margem Média:      {:.2}%\n", kpis.weighted_margin_pct);

    let categories = reports::category_sales(&rows);
    export_csv("receita_por_categoria.csv", &categories);
    println!("Receita por Categoria");
    output::preview_table_rows(&categories, 5);

    let segments = reports::segment_sales(&rows);
    export_csv("vendas_por_cliente.csv", &segments);
    println!("Vendas por Tipo de Cliente");
    output::preview_table_rows(&segments, 5);

    let locations = reports::location_costs(&rows);
    export_csv("custos_por_localizacao.csv", &locations);
    println!("Custo Total por Localização");
    output::preview_table_rows(&locations, 5);

    let top = reports::top_products(&rows, 15);
    export_csv("top_produtos.csv", &top);
    println!("Top 15 Produtos com Maior Lucro");
    output::preview_table_rows(&top, 5);

    println!("Dados Detalhados");
    output::preview_table_rows(&reports::detail_rows(&rows), 3);
    export_detail(&rows);

    if let Err(e) = output::write_json("kpis.json", &kpis) {
        eprintln!("Write error: {}", e);
    }
    println!("(KPIs exported to kpis.json)\n");
}

/// Handle option [4]: quality and defects.
fn handle_quality(path: &str) {
    let rows = match filtered_derived(path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("{}\n", e);
            return;
        }
    };
    let kpis = metrics::kpis(&rows);

    println!("Quality: Defect Analysis\n");
    println!("Taxa Média de Defeitos: {:.2}%", kpis.mean_defect_rate);
    println!(
        "Prejuízo Total:         R$ {}\n",
        util::format_brl(kpis.total_defect_loss, 2)
    );

    let categories = reports::defects_by_category(&rows);
    export_csv("defeitos_por_categoria.csv", &categories);
    println!("Taxa Média de Defeitos por Categoria");
    output::preview_table_rows(&categories, 5);

    let locations = reports::defects_by_location(&rows);
    export_csv("defeitos_por_localizacao.csv", &locations);
    println!("Taxa Média de Defeitos por Localização");
    output::preview_table_rows(&locations, 5);

    let top = reports::top_defect_products(&rows, 10);
    export_csv("top_defeitos.csv", &top);
    println!("Top 10 Produtos com Maior Taxa de Defeitos");
    output::preview_table_rows(&top, 5);

    export_detail(&rows);
}

/// Handle option [5]: carriers and logistics.
fn handle_carriers(path: &str) {
    let rows = match filtered_derived(path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("{}\n", e);
            return;
        }
    };
    let kpis = metrics::kpis(&rows);
    let total_volume: f64 = rows.iter().map(|r| r.rec.production_volume).sum();

    println!("Carriers: Logistics Costs\n");
    println!(
        "Volume Total de Pedidos:  {}",
        util::format_int(total_volume as i64)
    );
    println!("Custo Logístico Total:    R$ {}", util::format_brl(kpis.total_cost, 2));
    println!("% Logístico sobre Receita: {:.2}%", kpis.logistics_cost_pct);
    println!(
        "Custo Médio de Envio:     R$ {}\n",
        util::format_brl(reports::mean_carrier_shipping_cost(&rows), 2)
    );

    let carriers = reports::carrier_summary(&rows);
    export_csv("transportadoras.csv", &carriers);
    println!("Volume e Custos por Transportadora");
    output::preview_table_rows(&carriers, 5);

    let modes = reports::transport_mode_costs(&rows);
    export_csv("custos_por_modalidade.csv", &modes);
    println!("Custo Médio Total por Modalidade de Transporte");
    output::preview_table_rows(&modes, 5);

    let shipping = reports::location_shipping(&rows);
    export_csv("envio_por_localizacao.csv", &shipping);
    println!("Custo de Envio por Cidade");
    output::preview_table_rows(&shipping, 5);

    export_detail(&rows);
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    loop {
        println!("Supply Chain Insights");
        println!("[1] Load the dataset");
        println!("[2] Edit filters");
        println!("[3] Overview report");
        println!("[4] Quality report");
        println!("[5] Carrier report");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => handle_load(&path),
            "2" => handle_filters(),
            "3" => {
                println!();
                handle_overview(&path);
            }
            "4" => {
                println!();
                handle_quality(&path);
            }
            "5" => {
                println!();
                handle_carriers(&path);
            }
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 0-5.\n");
            }
        }
    }
}

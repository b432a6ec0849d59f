/// Remote Source Example
///
/// This example demonstrates:
/// - Loading a dataset over HTTP with a payload transform
/// - Error handling: a failed load keeps the previous dataset in place
/// - The data-loaded and error callbacks
///
/// Pass an endpoint returning a JSON array (or an envelope with a `data`
/// array) as the first argument; defaults to a public placeholder API.

use datagrid::{ColumnDescriptor, DataGrid, DataSource, GridConfig, SearchField};

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://jsonplaceholder.typicode.com/users".to_string());

    println!("=== DataGrid Remote Source Example ===\n");
    println!("1. Fetching {} ...", url);

    let config = GridConfig::new(vec![
        ColumnDescriptor::new("Name", "name"),
        ColumnDescriptor::new("Email", "email"),
    ])
    .with_search_fields(vec![SearchField::key("name")])
    .with_page_size(5);

    // Unwrap an envelope when present; plain arrays pass through.
    let source = DataSource::remote_with(url, |raw| match raw.get("data") {
        Some(data) => Ok(data.clone()),
        None => Ok(raw),
    });

    let mut grid = DataGrid::new(config, source)
        .on_data_loaded(|records| println!("   loaded {} records", records.len()))
        .on_error(|error| println!("   load failed: {}", error));

    match grid.load() {
        Ok(_) => {
            println!("\n2. First page:");
            for record in grid.page_records() {
                let cells: Vec<String> = grid
                    .row_cells(record)
                    .iter()
                    .map(|cell| datagrid::display_text(&cell.value))
                    .collect();
                println!("   {}", cells.join(" | "));
            }
            let info = grid.page_info();
            println!(
                "   -- showing {}-{} of {}",
                info.start(),
                info.end(),
                info.total
            );
        }
        Err(_) => {
            // The error is retained for display; the dataset (empty here)
            // was not touched. A retry is just another load().
            println!("\n2. Grid error state: {:?}", grid.error());
        }
    }
}

/// Basic Grid Example
///
/// This example demonstrates:
/// - Declaring columns, search fields, and filters as configuration
/// - Creating a grid over a static dataset
/// - Searching, filtering, sorting, and paging

use datagrid::{
    ColumnDescriptor, DataGrid, DataSource, FilterConfig, GridConfig, Record, SearchField,
    SortDirection,
};
use serde_json::json;

fn staff() -> Vec<Record> {
    [
        json!({"first": "Amadou", "last": "Diallo", "dept": "Info", "exp": 3}),
        json!({"first": "Fatou", "last": "Ndiaye", "dept": "Info", "exp": 7}),
        json!({"first": "Eve", "last": "Sarr", "dept": "Math", "exp": 1}),
        json!({"first": "Omar", "last": "Sy", "dept": "Physics", "exp": 12}),
        json!({"first": "Awa", "last": "Ba", "dept": "Math", "exp": 5}),
    ]
    .into_iter()
    .map(|value| value.as_object().unwrap().clone())
    .collect()
}

fn print_page(grid: &DataGrid) {
    let info = grid.page_info();
    for record in grid.page_records() {
        let cells: Vec<String> = grid
            .row_cells(record)
            .iter()
            .map(|cell| datagrid::display_text(&cell.value))
            .collect();
        println!("   {}", cells.join(" | "));
    }
    println!(
        "   -- showing {}-{} of {} (page {}/{})\n",
        info.start(),
        info.end(),
        info.total,
        info.page,
        info.page_count()
    );
}

fn main() {
    println!("=== DataGrid Basic Example ===\n");

    // 1. Declare the grid configuration
    println!("1. Building configuration...");
    let config = GridConfig::new(vec![
        ColumnDescriptor::composite("Name", ["first", "last"]),
        ColumnDescriptor::new("Department", "dept"),
        ColumnDescriptor::new("Experience", "exp"),
    ])
    .with_search_fields(vec![SearchField::keys(["first", "last"])])
    .with_filters(vec![FilterConfig::dynamic("dept", "Department")])
    .with_page_size(3);
    println!("   3 columns, composite name search, dynamic dept filter\n");

    // 2. Create the grid over static data
    println!("2. Creating grid over {} records...", staff().len());
    let mut grid = DataGrid::new(config, DataSource::from_records(staff()));
    print_page(&grid);

    // 3. Search
    println!("3. Searching for \"a\"...");
    grid.set_search("a");
    print_page(&grid);

    // 4. Filter
    println!("4. Filtering dept = Math...");
    grid.set_search("");
    grid.set_filter("dept", "Math");
    print_page(&grid);

    // 5. Sort
    println!("5. Sorting by experience, descending...");
    grid.set_filter("dept", "");
    grid.set_sort("exp", SortDirection::Descending);
    print_page(&grid);

    // 6. Page
    println!("6. Second page...");
    grid.set_page(2);
    print_page(&grid);

    // 7. Filter options
    println!("7. Department filter options:");
    for option in grid.filter_options("dept") {
        println!("   [{}] {}", option.value, option.label);
    }
}

/// Query Pipeline Example
///
/// This example demonstrates the pure pipeline functions underneath the
/// grid facade: filter -> sort -> page over an index mapping, plus the
/// shared value-resolution rule used by search, sort, and display.

use datagrid::{
    filter_indices, page_slice, sort_indices, ColumnDescriptor, Record, SearchField,
    SortDirection,
};
use serde_json::json;
use std::collections::HashMap;

fn dataset() -> Vec<Record> {
    (0..25)
        .map(|i| {
            let value = json!({
                "id": i,
                "first": format!("Student{}", i),
                "last": format!("Family{}", i % 5),
                "grade": ([12.5, 15.0, 9.75, 18.25, 11.0][i % 5]),
                "level": (["primary", "secondary"][i % 2]),
            });
            value.as_object().unwrap().clone()
        })
        .collect()
}

fn main() {
    println!("=== DataGrid Query Pipeline Example ===\n");

    let records = dataset();
    let columns = vec![
        ColumnDescriptor::composite("Name", ["first", "last"]),
        ColumnDescriptor::new("Grade", "grade"),
    ];
    let fields = vec![SearchField::keys(["first", "last"])];

    // 1. Filter: search + exact-match filter, ANDed
    println!("1. Filtering (search \"family2\", level = secondary)...");
    let mut active = HashMap::new();
    active.insert("level".to_string(), "secondary".to_string());
    let filtered = filter_indices(&records, "family2", &active, &fields);
    println!("   {} of {} records match\n", filtered.len(), records.len());

    // 2. Sort: stable, null-last, through the column configuration
    println!("2. Sorting by grade, descending...");
    let sorted = sort_indices(
        &records,
        &columns,
        "grade",
        Some(SortDirection::Descending),
        filtered,
    );
    for &index in &sorted {
        let record = &records[index];
        println!(
            "   {} -> {}",
            columns[0].resolve_text(record),
            columns[1].resolve_text(record)
        );
    }
    println!();

    // 3. Page: clipped 1-based slices
    println!("3. Paging (size 2)...");
    let mut page = 1;
    loop {
        let slice = page_slice(&sorted, page, 2);
        if slice.is_empty() {
            break;
        }
        let names: Vec<String> = slice
            .iter()
            .map(|&index| columns[0].resolve_text(&records[index]))
            .collect();
        println!("   page {}: {}", page, names.join(", "));
        page += 1;
    }
}

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use glee_model::{
    FieldDescriptor, ImportProfile, ImportSummary, Truncated, VALIDATION_PREVIEW_LIMIT,
};
use glee_validate::ValidationOutcome;

pub fn print_profiles(profiles: &[ImportProfile]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Description"),
        header_cell("Fields"),
        header_cell("Natural key"),
    ]);
    apply_table_style(&mut table);
    for profile in profiles {
        let fields = profile
            .fields
            .iter()
            .map(|field| {
                if field.required {
                    format!("{}*", field.label)
                } else {
                    field.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&profile.name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(&profile.description),
            Cell::new(fields),
            Cell::new(&profile.natural_key),
        ]);
    }
    println!("{table}");
    println!("* required");
}

pub fn print_mapping(fields: &[FieldDescriptor], unmapped: &[&str]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Column"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for field in fields {
        let column = match (&field.source_column, field.required) {
            (Some(column), _) if field.manual => Cell::new(format!("{column} (manual)")),
            (Some(column), _) => Cell::new(column),
            (None, true) => Cell::new("missing")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            (None, false) => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&field.target),
            Cell::new(&field.label),
            dim_cell(field.kind.as_str()),
            if field.required {
                Cell::new("yes")
            } else {
                dim_cell("no")
            },
            column,
        ]);
    }
    println!("{table}");
    if !unmapped.is_empty() {
        println!("Unmapped columns: {}", unmapped.join(", "));
    }
}

pub fn print_validation(outcome: &ValidationOutcome, show_errors: bool) {
    println!(
        "Validation: {} valid, {} invalid",
        outcome.valid.len(),
        outcome.invalid.len()
    );
    if show_errors {
        print_truncated(&outcome.error_preview(VALIDATION_PREVIEW_LIMIT));
    }
}

pub fn print_import_summary(summary: &ImportSummary, skipped_invalid: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Imported"),
        header_cell("Duplicates"),
        header_cell("Failed"),
        header_cell("Skipped invalid"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(summary.total).add_attribute(Attribute::Bold),
        count_cell(summary.successful, Color::Green),
        count_cell(summary.duplicates, Color::Yellow),
        count_cell(summary.failed, Color::Red),
        count_cell(skipped_invalid, Color::Yellow),
    ]);
    println!("{table}");
    if !summary.errors.is_empty() {
        eprintln!("Errors:");
        print_truncated(&summary.displayed_errors());
    }
}

fn print_truncated<T: AsRef<str>>(lines: &Truncated<T>) {
    for line in &lines.shown {
        eprintln!("- {}", line.as_ref());
    }
    if let Some(more) = lines.more_label() {
        eprintln!("  {more}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use autofill_core::JobItem;
use autofill_model::ValidationResult;

use autofill_cli::types::{BatchResult, ValidationRun};

pub fn print_batch_summary(result: &BatchResult) {
    let report = &result.report;
    println!("Input: {}", result.input.display());
    println!("Worker: {} (max attempts {})", result.worker, result.max_attempts);
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Count")]);
    apply_table_style(&mut table, 80);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Records read"), Cell::new(result.record_count)]);
    table.add_row(vec![
        Cell::new("Rejected by validation"),
        count_cell(report.validation_errors.len(), Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Enqueued"), Cell::new(report.enqueued)]);
    table.add_row(vec![
        Cell::new("Succeeded"),
        Cell::new(report.success_count).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Retry events"),
        count_cell(report.retry_count, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Failed")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.failed_jobs.len(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_failed_jobs(&report.failed_jobs);
    print_validation_issues(&report.validation_errors);
}

pub fn print_validation_summary(run: &ValidationRun) {
    println!("Input: {}", run.input.display());
    println!(
        "Records: {}  invalid: {}  warnings: {}",
        run.results.len(),
        run.invalid_count(),
        run.warning_count()
    );
    print_validation_issues(&run.results);
}

fn print_failed_jobs(jobs: &[JobItem]) {
    if jobs.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Kind"),
        header_cell("Attempts"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 2, CellAlignment::Right);
    for job in jobs {
        let (kind, detail) = match job.fatal_reason() {
            Some(reason) => (Cell::new("FATAL").fg(Color::Red), reason.to_string()),
            None => (
                Cell::new("DEAD LETTER").fg(Color::Yellow),
                job.error_messages()
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "-".to_string()),
            ),
        };
        table.add_row(vec![
            Cell::new(job.case_id()).add_attribute(Attribute::Bold),
            kind,
            Cell::new(format!("{}/{}", job.attempts(), job.max_attempts())),
            Cell::new(detail),
        ]);
    }
    println!();
    println!("Failed jobs:");
    println!("{table}");
}

fn print_validation_issues(results: &[ValidationResult]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Severity"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 1, CellAlignment::Center);
    let mut rows = 0usize;
    for result in results {
        let case = if result.case_id().is_empty() {
            "-"
        } else {
            result.case_id()
        };
        for error in result.errors() {
            table.add_row(vec![
                Cell::new(case),
                Cell::new("ERROR").fg(Color::Red),
                Cell::new(error),
            ]);
            rows += 1;
        }
        for warning in result.warnings() {
            table.add_row(vec![
                Cell::new(case),
                Cell::new("WARN").fg(Color::Yellow),
                Cell::new(warning),
            ]);
            rows += 1;
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
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
        Cell::new(count).fg(Color::DarkGrey)
    }
}

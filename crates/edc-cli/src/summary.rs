//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use edc_model::{
    DeathReport, ItemId, OffStudyRecord, VocabularyKind, VocabularyList, VocabularyRegistry,
    YesNo,
};
use edc_validate::NON_FIELD_ERRORS;

use crate::outcome::ValidationOutcome;

pub fn print_outcome(outcome: &ValidationOutcome) {
    let subject = outcome.subject.as_deref().unwrap_or("-");
    if outcome.valid {
        println!("Submission for {subject} is valid.");
        return;
    }
    println!(
        "Submission for {subject} has {} error(s):",
        outcome.errors.len()
    );
    println!("{}", errors_table(outcome));
}

/// One row per message; form-level messages first.
pub fn errors_table(outcome: &ValidationOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Message")]);
    apply_issue_table_style(&mut table);

    let (form_level, field_level): (Vec<_>, Vec<_>) = outcome
        .errors
        .iter()
        .partition(|(field, _)| *field == NON_FIELD_ERRORS);
    for (field, message) in form_level.into_iter().chain(field_level) {
        table.add_row(vec![field_cell(field), Cell::new(message)]);
    }
    table
}

pub fn report_table(
    report: &DeathReport,
    off_study: Option<&OffStudyRecord>,
    vocabularies: &VocabularyRegistry,
) -> Table {
    let data = &report.data;
    let item = |kind, id| item_label(vocabularies, kind, id);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_summary_table_style(&mut table);

    let mut rows: Vec<(&str, Cell)> = vec![
        ("Subject", Cell::new(data.registered_subject.as_str())),
        (
            "Report date/time",
            Cell::new(data.report_datetime.format("%Y-%m-%d %H:%M UTC")),
        ),
        ("Death date", Cell::new(data.death_date)),
        (
            "Illness duration (days)",
            Cell::new(data.illness_duration),
        ),
        ("Autopsy", yes_no_cell(data.perform_autopsy)),
        ("Cause", Cell::new(item(VocabularyKind::Cause, data.cause))),
        ("Cause (other)", optional_cell(data.cause_other.as_deref())),
        (
            "Cause category",
            Cell::new(item(VocabularyKind::CauseCategory, data.cause_category)),
        ),
        (
            "Cause category (other)",
            optional_cell(data.cause_category_other.as_deref()),
        ),
        (
            "Medical responsibility",
            Cell::new(item(
                VocabularyKind::MedicalResponsibility,
                data.medical_responsibility,
            )),
        ),
        (
            "Diagnosis code",
            Cell::new(item(VocabularyKind::DiagnosisCode, data.diagnosis_code)),
        ),
        ("Hospitalized", yes_no_cell(data.participant_hospitalized)),
        (
            "Reason hospitalized",
            match data.reason_hospitalized {
                Some(id) => Cell::new(item(VocabularyKind::ReasonHospitalized, id)),
                None => dim_cell("-"),
            },
        ),
        (
            "Days hospitalized",
            match data.days_hospitalized {
                Some(days) => Cell::new(days),
                None => dim_cell("-"),
            },
        ),
        ("Comment", optional_cell(data.comment.as_deref())),
    ];
    if let Some(record) = off_study {
        rows.push((
            "Off study",
            Cell::new(format!("{} ({})", record.offstudy_date, record.reason)),
        ));
    }
    rows.push((
        "Last modified",
        dim_cell(format!(
            "{} by {}",
            report.audit.modified.format("%Y-%m-%d %H:%M UTC"),
            report.audit.user_modified
        )),
    ));

    for (label, value) in rows {
        table.add_row(vec![label_cell(label), value]);
    }
    table
}

pub fn vocabulary_table(list: &VocabularyList) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Short name"),
        header_cell("Order"),
    ]);
    apply_table_style(&mut table);
    for item in list.items() {
        let name = if item.is_other() {
            Cell::new(&item.name).fg(Color::Yellow)
        } else {
            Cell::new(&item.name)
        };
        table.add_row(vec![
            Cell::new(item.id),
            name,
            dim_cell(&item.short_name),
            Cell::new(item.display_index),
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table
}

fn item_label(vocabularies: &VocabularyRegistry, kind: VocabularyKind, id: ItemId) -> String {
    match vocabularies.resolve(kind, id) {
        Some(item) => item.name.clone(),
        None => format!("#{id} (not in current list)"),
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
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

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn field_cell(field: &str) -> Cell {
    if field == NON_FIELD_ERRORS {
        Cell::new("(form)")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(field).fg(Color::Yellow)
    }
}

fn yes_no_cell(value: YesNo) -> Cell {
    Cell::new(value.as_str())
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) if !text.trim().is_empty() => Cell::new(text),
        _ => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

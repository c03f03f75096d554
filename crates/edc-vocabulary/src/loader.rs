//! Vocabulary list loaders.
//!
//! Vocabulary files are CSV with the columns
//! `id,name[,short_name][,display_index][,field_name][,version]`.
//! A missing `display_index` places the item by file order.

use std::io::Read;
use std::path::Path;

use edc_model::{ListItem, ModelError, VocabularyKind, VocabularyList, VocabularyRegistry};
use tracing::{debug, info};

use crate::csv_utils::{CsvRow, read_csv_rows};
use crate::error::VocabularyError;

/// Environment variable for overriding the vocabulary directory.
pub const VOCABULARY_ENV_VAR: &str = "EDC_VOCABULARY_DIR";

fn embedded_csv(kind: VocabularyKind) -> &'static str {
    match kind {
        VocabularyKind::Cause => include_str!("../data/cause.csv"),
        VocabularyKind::CauseCategory => include_str!("../data/cause_category.csv"),
        VocabularyKind::DiagnosisCode => include_str!("../data/diagnosis_code.csv"),
        VocabularyKind::MedicalResponsibility => {
            include_str!("../data/medical_responsibility.csv")
        }
        VocabularyKind::ReasonHospitalized => include_str!("../data/reason_hospitalized.csv"),
    }
}

/// Load the embedded default lists for every vocabulary kind.
pub fn load_default_registry() -> Result<VocabularyRegistry, VocabularyError> {
    let mut registry = VocabularyRegistry::new();
    for kind in VocabularyKind::ALL {
        let source_name = format!("<embedded>/{kind}.csv");
        let list = parse_vocabulary_csv(embedded_csv(kind).as_bytes(), kind, &source_name)?;
        registry.add_list(list);
    }
    Ok(registry)
}

/// Load `<kind>.csv` for every kind from `dir`.
///
/// Kinds without a file in `dir` fall back to the embedded default list.
pub fn load_registry_dir(dir: &Path) -> Result<VocabularyRegistry, VocabularyError> {
    let mut registry = load_default_registry()?;
    for kind in VocabularyKind::ALL {
        let path = dir.join(format!("{kind}.csv"));
        if !path.is_file() {
            debug!(kind = %kind, dir = %dir.display(), "using embedded vocabulary");
            continue;
        }
        let list = load_vocabulary_csv(&path, kind)?;
        info!(kind = %kind, items = list.len(), path = %path.display(), "loaded vocabulary");
        registry.add_list(list);
    }
    Ok(registry)
}

/// Load a single vocabulary list from a CSV file.
pub fn load_vocabulary_csv(
    path: &Path,
    kind: VocabularyKind,
) -> Result<VocabularyList, VocabularyError> {
    let file = std::fs::File::open(path).map_err(|error| VocabularyError::io(path, error))?;
    parse_vocabulary_csv(file, kind, &path.display().to_string())
}

/// Parse a vocabulary list from CSV.
pub fn parse_vocabulary_csv<R: Read>(
    reader: R,
    kind: VocabularyKind,
    source_name: &str,
) -> Result<VocabularyList, VocabularyError> {
    let rows = read_csv_rows(reader, source_name)?;
    let mut list = VocabularyList::new(kind);

    for (position, row) in rows.iter().enumerate() {
        if row.get_field("id").is_empty() && row.get_field("name").is_empty() {
            continue;
        }
        let item = parse_item(row, position, source_name)?;
        list.add_item(item).map_err(|error| match error {
            ModelError::DuplicateItem { kind, id } => VocabularyError::DuplicateItem {
                source_name: source_name.to_string(),
                kind,
                id,
            },
            other => VocabularyError::InvalidRow {
                source_name: source_name.to_string(),
                line: row.line,
                message: other.to_string(),
            },
        })?;
    }

    debug!(kind = %kind, items = list.len(), source = source_name, "parsed vocabulary");
    Ok(list)
}

fn parse_item(
    row: &CsvRow,
    position: usize,
    source_name: &str,
) -> Result<ListItem, VocabularyError> {
    let invalid = |message: String| VocabularyError::InvalidRow {
        source_name: source_name.to_string(),
        line: row.line,
        message,
    };

    let id_raw = row.get_field("id");
    let id: u32 = id_raw
        .parse()
        .map_err(|_| invalid(format!("invalid id {id_raw:?}")))?;

    let name = row.get_field("name");
    if name.is_empty() {
        return Err(invalid("missing name".to_string()));
    }

    let display_index = match row.get_optional("display_index") {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid(format!("invalid display_index {raw:?}")))?,
        None => i32::try_from(position).unwrap_or(i32::MAX),
    };

    let mut item = ListItem::new(id, name, display_index);
    if let Some(short_name) = row.get_optional("short_name") {
        item.short_name = short_name;
    }
    item.field_name = row.get_optional("field_name");
    if let Some(version) = row.get_optional("version") {
        item.version = version;
    }
    Ok(item)
}

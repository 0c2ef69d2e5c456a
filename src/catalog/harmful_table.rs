//! Optional harmful-ingredient table loaded from a spreadsheet
//!
//! The table is a two-column workbook (ingredient, effect) maintained outside
//! the codebase. Absence of the file is not an error: the safety classifier
//! then works from condition-based rules only.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, warn};

/// One (ingredient, effect) row from the harmful-ingredient table
#[derive(Debug, Clone, PartialEq)]
pub struct HarmfulRow {
    /// Ingredient name as listed in the table
    pub ingredient: String,
    /// Effect text; empty when the table left the cell blank
    pub effect: String,
}

/// In-memory harmful-ingredient table
#[derive(Debug, Clone, Default)]
pub struct HarmfulTable {
    rows: Vec<HarmfulRow>,
}

impl HarmfulTable {
    /// An empty table (no generic-harmful findings will be produced)
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// Builds a table from pre-parsed rows; used by tests and callers that
    /// source the data elsewhere
    pub fn from_rows(rows: Vec<HarmfulRow>) -> Self {
        Self { rows }
    }

    /// Loads the table from a workbook on disk
    ///
    /// The first sheet is read; the header row is skipped; rows with an
    /// empty ingredient cell are dropped. Any failure (missing file,
    /// unreadable workbook) logs a warning and yields an empty table.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "Harmful-ingredient table not present, skipping");
            return Self::empty();
        }

        let mut workbook = match open_workbook_auto(path) {
            Ok(wb) => wb,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open harmful-ingredient table");
                return Self::empty();
            }
        };

        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => {
                warn!(path = %path.display(), error = %e, "Failed to read harmful-ingredient sheet");
                return Self::empty();
            }
            None => {
                warn!(path = %path.display(), "Harmful-ingredient table has no sheets");
                return Self::empty();
            }
        };

        let mut rows = Vec::new();
        for row in range.rows().skip(1) {
            let Some(ingredient) = row.first().and_then(cell_to_string) else {
                continue;
            };
            let effect = row.get(1).and_then(cell_to_string).unwrap_or_default();
            rows.push(HarmfulRow { ingredient, effect });
        }

        debug!(
            path = %path.display(),
            rows = rows.len(),
            "Loaded harmful-ingredient table"
        );

        Self { rows }
    }

    pub fn rows(&self) -> &[HarmfulRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_yields_empty_table() {
        let table = HarmfulTable::load(&PathBuf::from("/nonexistent/harmful.xlsx"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_unreadable_file_yields_empty_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        std::fs::write(&path, "plain text, not xlsx").unwrap();

        let table = HarmfulTable::load(&path);
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_rows() {
        let table = HarmfulTable::from_rows(vec![HarmfulRow {
            ingredient: "Aspartame".to_string(),
            effect: "Artificial sweetener linked to headaches".to_string(),
        }]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].ingredient, "Aspartame");
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(
            cell_to_string(&Data::String("  Aspartame ".to_string())),
            Some("Aspartame".to_string())
        );
        assert_eq!(cell_to_string(&Data::String("   ".to_string())), None);
        assert_eq!(cell_to_string(&Data::Empty), None);
    }
}

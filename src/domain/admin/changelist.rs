//! Change list - the admin's tabular listing of records

use serde::Serialize;

use super::registration::{AdminQueryError, ModelAdmin};
use crate::domain::kat::{Kat, KatField, KatId};

/// One row of the change list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeListRow {
    pub id: KatId,
    /// Textual representation of the record
    pub display: String,
    /// Cell values, one per displayed column
    pub cells: Vec<String>,
}

impl ChangeListRow {
    /// Row rendered as `cell | cell`
    pub fn to_line(&self) -> String {
        self.cells.join(" | ")
    }
}

/// A filter control shown beside the change list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFilter {
    pub field: String,
    pub choices: Vec<i32>,
    pub selected: Option<i32>,
}

/// A rendered page of the change list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeList {
    pub columns: Vec<String>,
    pub rows: Vec<ChangeListRow>,
    pub filters: Vec<ListFilter>,
    pub search: Option<String>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl ModelAdmin {
    /// Build a change list row for a kat using the displayed columns
    pub fn row(&self, kat: &Kat) -> Result<ChangeListRow, AdminQueryError> {
        let cells = self
            .list_display
            .iter()
            .map(|column| {
                KatField::from_name(column)
                    .map(|field| field.text_value(kat))
                    .ok_or_else(|| AdminQueryError::UnknownField(column.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChangeListRow {
            id: kat.id(),
            display: kat.to_string(),
            cells,
        })
    }

    /// Column headers of the change list
    pub fn columns(&self) -> Vec<String> {
        self.list_display.iter().map(|c| c.to_string()).collect()
    }
}

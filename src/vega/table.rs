use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// Display format applied to number columns without an explicit one.
pub const DEFAULT_NUMBER_FORMAT: &str = "{:,}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Text,
    Timestamp,
}

/// Cell values of one column. `None` (and NaN for numbers) is a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Number(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
}

impl ColumnValues {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Number(values) => values.len(),
            Self::Text(values) => values.len(),
            Self::Timestamp(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Number(_) => ColumnType::Number,
            Self::Text(_) => ColumnType::Text,
            Self::Timestamp(_) => ColumnType::Timestamp,
        }
    }

    #[must_use]
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Self::Number(values) => !matches!(values.get(row), Some(Some(v)) if !v.is_nan()),
            Self::Text(values) => !matches!(values.get(row), Some(Some(_))),
            Self::Timestamp(values) => !matches!(values.get(row), Some(Some(_))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
    /// Python-style format string, e.g. `{:,.2f}`. Only numbers use it.
    pub format: String,
}

impl Column {
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.values.column_type()
    }
}

/// Column-oriented table with equal-length, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: Column) -> BridgeResult<()> {
        if self.columns.contains_key(&column.name) {
            return Err(BridgeError::InvalidData(format!(
                "duplicate column `{}`",
                column.name
            )));
        }
        let len = column.values.len();
        if !self.columns.is_empty() && len != self.row_count {
            return Err(BridgeError::InvalidData(format!(
                "column `{}` has {len} rows, table has {}",
                column.name, self.row_count
            )));
        }
        self.row_count = len;
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    pub fn with_number(self, name: &str, values: Vec<Option<f64>>) -> BridgeResult<Self> {
        self.with_number_format(name, values, DEFAULT_NUMBER_FORMAT)
    }

    pub fn with_number_format(
        mut self,
        name: &str,
        values: Vec<Option<f64>>,
        format: &str,
    ) -> BridgeResult<Self> {
        self.push(Column {
            name: name.to_owned(),
            values: ColumnValues::Number(values),
            format: format.to_owned(),
        })?;
        Ok(self)
    }

    pub fn with_text(mut self, name: &str, values: Vec<Option<String>>) -> BridgeResult<Self> {
        self.push(Column {
            name: name.to_owned(),
            values: ColumnValues::Text(values),
            format: String::new(),
        })?;
        Ok(self)
    }

    pub fn with_timestamp(
        mut self,
        name: &str,
        values: Vec<Option<NaiveDateTime>>,
    ) -> BridgeResult<Self> {
        self.push(Column {
            name: name.to_owned(),
            values: ColumnValues::Timestamp(values),
            format: String::new(),
        })?;
        Ok(self)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

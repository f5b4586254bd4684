use std::collections::BTreeMap;
use std::fmt;

/// Columns of the read submission spreadsheet, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TsvColumn {
    Study,
    Sample,
    DesignDescription,
    LibraryConstructionProtocol,
    LibraryName,
    LibraryStrategy,
    LibrarySource,
    LibrarySelection,
    LibraryLayout,
    InsertSize,
    InstrumentModel,
    ForwardFileName,
    ForwardFileMd5,
    ReverseFileName,
    ReverseFileMd5,
}

impl TsvColumn {
    pub const ALL: &'static [TsvColumn] = &[
        TsvColumn::Study,
        TsvColumn::Sample,
        TsvColumn::DesignDescription,
        TsvColumn::LibraryConstructionProtocol,
        TsvColumn::LibraryName,
        TsvColumn::LibraryStrategy,
        TsvColumn::LibrarySource,
        TsvColumn::LibrarySelection,
        TsvColumn::LibraryLayout,
        TsvColumn::InsertSize,
        TsvColumn::InstrumentModel,
        TsvColumn::ForwardFileName,
        TsvColumn::ForwardFileMd5,
        TsvColumn::ReverseFileName,
        TsvColumn::ReverseFileMd5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TsvColumn::Study => "study",
            TsvColumn::Sample => "sample",
            TsvColumn::DesignDescription => "design_description",
            TsvColumn::LibraryConstructionProtocol => "library_construction_protocol",
            TsvColumn::LibraryName => "library_name",
            TsvColumn::LibraryStrategy => "library_strategy",
            TsvColumn::LibrarySource => "library_source",
            TsvColumn::LibrarySelection => "library_selection",
            TsvColumn::LibraryLayout => "library_layout",
            TsvColumn::InsertSize => "insert_size",
            TsvColumn::InstrumentModel => "instrument_model",
            TsvColumn::ForwardFileName => "forward_file_name",
            TsvColumn::ForwardFileMd5 => "forward_file_md5",
            TsvColumn::ReverseFileName => "reverse_file_name",
            TsvColumn::ReverseFileMd5 => "reverse_file_md5",
        }
    }
}

impl fmt::Display for TsvColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the read submission spreadsheet.
///
/// The file type is carried alongside the columns; it ends up on the first
/// line of the file rather than in a column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsvRow {
    values: BTreeMap<TsvColumn, String>,
    file_type: Option<String>,
}

impl TsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: TsvColumn, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: TsvColumn, value: impl Into<String>) {
        self.values.insert(column, value.into());
    }

    pub fn get(&self, column: TsvColumn) -> Option<&str> {
        self.values.get(&column).map(String::as_str)
    }

    pub fn contains(&self, column: TsvColumn) -> bool {
        self.values.contains_key(&column)
    }

    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    pub fn set_file_type(&mut self, file_type: impl Into<String>) {
        self.file_type = Some(file_type.into());
    }

    /// Copy every value of `other` into this row, overwriting on conflict.
    /// The first file type seen is kept.
    pub fn merge(&mut self, other: &TsvRow) {
        for (column, value) in &other.values {
            self.values.insert(*column, value.clone());
        }
        if self.file_type.is_none() {
            self.file_type.clone_from(&other.file_type);
        }
    }

    #[must_use]
    pub fn merged(mut self, other: &TsvRow) -> Self {
        self.merge(other);
        self
    }

    /// Values in column order, empty where unset.
    pub fn to_record(&self) -> Vec<&str> {
        TsvColumn::ALL
            .iter()
            .map(|column| self.get(*column).unwrap_or_default())
            .collect()
    }
}

/// Merge every row of `left` with every row of `right`.
pub(crate) fn cross(left: &[TsvRow], right: &[TsvRow]) -> Vec<TsvRow> {
    left.iter()
        .flat_map(|l| right.iter().map(move |r| l.clone().merged(r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_follows_column_order() {
        let row = TsvRow::new()
            .with(TsvColumn::InstrumentModel, "Illumina MiSeq")
            .with(TsvColumn::Study, "AB-1234");
        let record = row.to_record();
        assert_eq!(record.len(), TsvColumn::ALL.len());
        assert_eq!(record[0], "AB-1234");
        assert_eq!(record[10], "Illumina MiSeq");
        assert_eq!(record[1], "");
    }

    #[test]
    fn test_cross_merges_every_pair() {
        let left = [TsvRow::new().with(TsvColumn::Study, "P")];
        let right = [
            TsvRow::new().with(TsvColumn::Sample, "S1"),
            TsvRow::new().with(TsvColumn::Sample, "S2"),
        ];
        let rows = cross(&left, &right);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get(TsvColumn::Study), Some("P"));
        assert_eq!(rows[1].get(TsvColumn::Sample), Some("S2"));
    }
}

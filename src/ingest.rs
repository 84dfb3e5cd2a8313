use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::BorrowEvent;

/// One row of a reader's borrowing log.
///
/// Only `borrow_date` takes part in attendance analysis; the remaining
/// columns are carried for the report title and are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct BorrowRow {
    #[serde(default)]
    pub reader_name: Option<String>,
    #[serde(default)]
    pub book_title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    pub borrow_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
}

pub fn read_borrow_csv(path: &Path) -> anyhow::Result<Vec<BorrowRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let rows =
        read_borrow_rows(file).with_context(|| format!("failed to read {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "loaded borrowing log");
    Ok(rows)
}

pub fn read_borrow_rows<R: Read>(source: R) -> anyhow::Result<Vec<BorrowRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<BorrowRow>().enumerate() {
        let row = result.with_context(|| format!("malformed data row {}", index + 1))?;
        rows.push(row);
    }

    debug!(rows = rows.len(), "parsed borrow rows");
    Ok(rows)
}

/// Borrow events for the analyzer, numbered by 1-based data row.
pub fn to_events(rows: &[BorrowRow]) -> Vec<BorrowEvent> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| BorrowEvent::new(index + 1, row.borrow_date.clone()))
        .collect()
}

/// The most frequent non-empty reader name; ties go to the smaller name.
pub fn primary_reader_name(rows: &[BorrowRow]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in rows.iter().filter_map(|row| row.reader_name.as_deref()) {
        if !name.is_empty() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LOG: &str = "\
reader_name,book_title,author,category,price,borrow_date,return_date
Avery Lee,The Hobbit,Tolkien,EFI,12.50,2024-01-02,2024-01-09
Avery Lee,Matilda,Dahl,EFI,8.00,2024/01/09,
Jules Moreno,Zoo,Anon,CPB,,2024-01-16,2024-01-20
";

    #[test]
    fn reads_rows_with_optional_columns() {
        let rows = read_borrow_rows(LOG.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].book_title.as_deref(), Some("The Hobbit"));
        assert_eq!(rows[1].borrow_date, "2024/01/09");
        assert!(rows[1].return_date.is_none());
    }

    #[test]
    fn only_borrow_date_column_is_required() {
        let rows = read_borrow_rows("borrow_date,reader_name\n2024-03-01,\n,Avery\n".as_bytes())
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].reader_name.is_none());
        assert_eq!(rows[1].borrow_date, "");

        assert!(read_borrow_rows("reader_name\nAvery\n".as_bytes()).is_err());
    }

    #[test]
    fn events_keep_row_numbers() {
        let rows = read_borrow_rows(LOG.as_bytes()).unwrap();
        let events = to_events(&rows);
        assert_eq!(events[0], BorrowEvent::new(1, "2024-01-02"));
        assert_eq!(events[2], BorrowEvent::new(3, "2024-01-16"));
    }

    #[test]
    fn primary_reader_is_most_frequent() {
        let rows = read_borrow_rows(LOG.as_bytes()).unwrap();
        assert_eq!(primary_reader_name(&rows).as_deref(), Some("Avery Lee"));

        let tied = "reader_name,borrow_date\nZed,2024-01-01\nAmy,2024-01-02\n";
        let tied = read_borrow_rows(tied.as_bytes()).unwrap();
        assert_eq!(primary_reader_name(&tied).as_deref(), Some("Amy"));

        let anonymous = read_borrow_rows("borrow_date\n2024-01-01\n".as_bytes()).unwrap();
        assert_eq!(primary_reader_name(&anonymous), None);
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        let rows = read_borrow_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_borrow_csv(Path::new("/nonexistent/borrows.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/borrows.csv"));
    }
}

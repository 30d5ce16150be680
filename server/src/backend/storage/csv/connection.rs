use anyhow::{Context, Result};
use csv::{ByteRecord, ReaderBuilder, Writer, WriterBuilder};
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// CsvConnection owns the data directory and the CSV files inside it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// Serializes read-modify-write cycles on the CSV files
    write_lock: Arc<Mutex<()>>,
}

/// Raw rows of a file that could not be turned into records, together
/// with the header they were read under. They are written back verbatim
/// whenever the file is rewritten.
#[derive(Debug, Clone, Default)]
pub struct UnreadableRows {
    headers: Option<ByteRecord>,
    rows: Vec<ByteRecord>,
}

impl UnreadableRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Content of one CSV file
#[derive(Debug, Clone)]
pub struct CsvTable<T> {
    pub records: Vec<T>,
    pub unreadable: UnreadableRows,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of a CSV file inside the data directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Hold the returned guard for the whole read-modify-write cycle
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read a CSV file, converting each row `R` into a record `T`.
    ///
    /// A missing file reads as empty. Rows that fail to deserialize or to
    /// convert are logged and kept aside in [`CsvTable::unreadable`].
    pub fn read_table<R, T>(&self, file_name: &str) -> Result<CsvTable<T>>
    where
        R: DeserializeOwned,
        T: TryFrom<R, Error = anyhow::Error>,
    {
        let path = self.file_path(file_name);
        if !path.exists() {
            debug!("{} does not exist yet, returning no rows", path.display());
            return Ok(CsvTable {
                records: Vec::new(),
                unreadable: UnreadableRows::default(),
            });
        }

        let file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));
        let headers = reader
            .byte_headers()
            .with_context(|| format!("Failed to read the header of {}", path.display()))?
            .clone();

        let mut records = Vec::new();
        let mut unreadable = Vec::new();
        for (index, result) in reader.byte_records().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let line = index + 2;
            let raw = result.with_context(|| format!("Failed to read line {} of {}", line, file_name))?;

            let parsed = raw
                .deserialize::<R>(Some(&headers))
                .map_err(anyhow::Error::from)
                .and_then(T::try_from);
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Unreadable row {} in {} left as is: {:#}", line, file_name, e);
                    unreadable.push(raw);
                }
            }
        }

        Ok(CsvTable {
            records,
            unreadable: UnreadableRows {
                headers: Some(headers),
                rows: unreadable,
            },
        })
    }

    /// Replace the content of a CSV file atomically (temp file + rename).
    /// `unreadable` rows from the previous read are appended untouched.
    pub fn write_table<R: Serialize>(
        &self,
        file_name: &str,
        rows: &[R],
        unreadable: &UnreadableRows,
    ) -> Result<()> {
        let path = self.file_path(file_name);
        let temp_path = path.with_extension("csv.tmp");

        {
            let mut writer = if unreadable.is_empty() {
                Writer::from_path(&temp_path)
            } else {
                WriterBuilder::new()
                    .has_headers(false)
                    .flexible(true)
                    .from_path(&temp_path)
            }
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;

            if let (false, Some(headers)) = (unreadable.is_empty(), unreadable.headers.as_ref()) {
                writer.write_byte_record(headers)?;
            }
            for row in rows {
                writer.serialize(row)?;
            }
            for raw in &unreadable.rows {
                writer.write_byte_record(raw)?;
            }
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!(
            "Wrote {} rows to {} ({} kept unread)",
            rows.len(),
            file_name,
            unreadable.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        weight: f64,
        note: Option<String>,
    }

    /// Record type of the test table; negative weights do not convert
    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        weight: f64,
        note: Option<String>,
    }

    impl TryFrom<Row> for Item {
        type Error = anyhow::Error;

        fn try_from(row: Row) -> Result<Self> {
            if row.weight < 0.0 {
                anyhow::bail!("negative weight");
            }
            Ok(Item { id: row.id, weight: row.weight, note: row.note })
        }
    }

    fn to_rows(items: &[Item]) -> Vec<Row> {
        items
            .iter()
            .map(|i| Row { id: i.id.clone(), weight: i.weight, note: i.note.clone() })
            .collect()
    }

    fn setup() -> (TempDir, CsvConnection) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (temp_dir, connection)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("farm").join("data");

        let connection = CsvConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let (_temp_dir, connection) = setup();

        let table = connection.read_table::<Row, Item>("nothing.csv").unwrap();
        assert!(table.records.is_empty());
        assert!(table.unreadable.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let (_temp_dir, connection) = setup();
        let rows = vec![
            Row { id: "a".to_string(), weight: 1.5, note: Some("vaccinated, healthy".to_string()) },
            Row { id: "b".to_string(), weight: 80.0, note: None },
        ];

        connection.write_table("rows.csv", &rows, &UnreadableRows::default()).unwrap();
        let table = connection.read_table::<Row, Item>("rows.csv").unwrap();

        assert_eq!(to_rows(&table.records), rows);
        assert!(!connection.file_path("rows.csv.tmp").exists());
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let (_temp_dir, connection) = setup();
        fs::write(
            connection.file_path("rows.csv"),
            "id,weight,note\na,1.5,\nb,not-a-number,\nc,3.0,ok\nd,-2.0,\ne\n",
        )
        .unwrap();

        let table = connection.read_table::<Row, Item>("rows.csv").unwrap();

        let ids: Vec<&str> = table.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(table.records[0].note, None);
        assert_eq!(table.unreadable.len(), 3);
    }

    #[test]
    fn test_rewrite_keeps_unreadable_rows() {
        let (_temp_dir, connection) = setup();
        let path = connection.file_path("rows.csv");
        fs::write(&path, "id,weight,note\na,1.5,\nb,lourd,à revoir\n").unwrap();

        let mut table = connection.read_table::<Row, Item>("rows.csv").unwrap();
        table.records.push(Item { id: "c".to_string(), weight: 2.0, note: None });
        connection
            .write_table("rows.csv", &to_rows(&table.records), &table.unreadable)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("id,weight,note\n"));
        assert!(content.contains("b,lourd,à revoir"));

        let reread = connection.read_table::<Row, Item>("rows.csv").unwrap();
        let ids: Vec<&str> = reread.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(reread.unreadable.len(), 1);
    }

    #[test]
    fn test_rewrite_with_only_unreadable_rows() {
        let (_temp_dir, connection) = setup();
        let path = connection.file_path("rows.csv");
        fs::write(&path, "id,weight,note\nx,??,\n").unwrap();

        let table = connection.read_table::<Row, Item>("rows.csv").unwrap();
        assert!(table.records.is_empty());
        connection.write_table::<Row>("rows.csv", &[], &table.unreadable).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "id,weight,note\nx,??,\n");
    }
}

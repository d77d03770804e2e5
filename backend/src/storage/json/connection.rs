use anyhow::Result;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// JsonConnection manages file paths and read/write access for the
/// JSON-encoded stores.
///
/// Each persisted key lives in its own file under the base directory.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

/// File name for the booking list store
pub const BOOKINGS_FILE: &str = "bookings.json";
/// File name for the booked-slot key set store
pub const BOOKED_SLOTS_FILE: &str = "booked_slots.json";
/// File name for the guestbook message store
pub const GUESTBOOK_FILE: &str = "guestbook_messages.json";
/// File name for the event RSVP list store
pub const RSVPS_FILE: &str = "event_rsvps.json";
/// File name for this session's own RSVP
pub const MY_RSVP_FILE: &str = "my_rsvp.json";

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Create a new JSON connection in the default data directory,
    /// ~/Documents/Booking Tracker
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Booking Tracker");

        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.clone()
    }

    /// Get the full path for a store file
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.join(file_name)
    }

    /// Read a JSON array store.
    ///
    /// A missing file or corrupt JSON reads as an empty list so one bad
    /// store never takes the whole system down; corruption is logged.
    pub fn read_list<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let file_path = self.file_path(file_name);

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&file_path)?;
        let reader = BufReader::new(file);

        match serde_json::from_reader(reader) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(
                    "Corrupt JSON in {}, falling back to empty list: {}",
                    file_path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Write a JSON array store atomically (temp file + rename)
    pub fn write_list<T: Serialize>(&self, file_name: &str, items: &[T]) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, items)?;
        }

        // Atomic move from temp to final file
        fs::rename(&temp_path, &file_path)?;

        Ok(())
    }

    /// Read a single optional JSON record. Missing or corrupt files read
    /// as `None`, with corruption logged.
    pub fn read_record<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let file_path = self.file_path(file_name);

        if !file_path.exists() {
            return Ok(None);
        }

        let file = std::fs::File::open(&file_path)?;
        let reader = BufReader::new(file);

        match serde_json::from_reader(reader) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(
                    "Corrupt JSON in {}, ignoring stored record: {}",
                    file_path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Write a single JSON record atomically
    pub fn write_record<T: Serialize>(&self, file_name: &str, record: &T) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, record)?;
        }

        fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let connection = JsonConnection::new(dir.path()).unwrap();

        let items: Vec<String> = connection.read_list(BOOKINGS_FILE).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_corrupt_json_reads_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let connection = JsonConnection::new(dir.path()).unwrap();

        fs::write(connection.file_path(BOOKED_SLOTS_FILE), "{not valid json").unwrap();

        let items: Vec<String> = connection.read_list(BOOKED_SLOTS_FILE).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let connection = JsonConnection::new(dir.path()).unwrap();

        let keys = vec!["2025-01-07-10:00".to_string(), "2025-01-08-09:00".to_string()];
        connection.write_list(BOOKED_SLOTS_FILE, &keys).unwrap();

        let back: Vec<String> = connection.read_list(BOOKED_SLOTS_FILE).unwrap();
        assert_eq!(back, keys);

        // No temp file left behind
        assert!(!connection.file_path(BOOKED_SLOTS_FILE).with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_record_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let connection = JsonConnection::new(dir.path()).unwrap();

        let record: Option<String> = connection.read_record(MY_RSVP_FILE).unwrap();
        assert!(record.is_none());
    }
}

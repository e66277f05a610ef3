use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::Error;

/// Deserialize every well-formed row of a CSV file. Malformed rows are skipped and counted.
pub fn deserialize_csv_file<T>(path: &Path) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(deserialize_csv_reader(file, &path.display().to_string()))
}

pub fn deserialize_csv_reader<T, R>(reader: R, source: &str) -> Vec<T>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut skipped = 0usize;
    let records = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .filter_map(|row| match row {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Malformed row in {source}: {e}");
                skipped += 1;
                None
            }
        })
        .collect::<Vec<T>>();
    if skipped > 0 {
        warn!("Skipped {skipped} malformed rows in {source}");
    }
    records
}

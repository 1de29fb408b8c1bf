// File: src/persistence.rs
use crate::error::PersistenceError;
use crate::topics::TopicMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the whole topic map, replacing the previous file in one rename.
pub fn save_to_disk(topics: &TopicMap, path: &Path) -> Result<(), PersistenceError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, topics)?;
        writer.flush()?;
    }
    temp_file.as_file().sync_all()?;

    temp_file.persist(path)?;
    Ok(())
}

/// Reads the topic map. A missing file is an empty library, not an error.
pub fn load_from_disk(path: &Path) -> Result<TopicMap, PersistenceError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TopicMap::new()),
        Err(e) => return Err(e.into()),
    };
    let reader = BufReader::new(file);
    let topics: TopicMap = serde_json::from_reader(reader)?;
    Ok(topics)
}

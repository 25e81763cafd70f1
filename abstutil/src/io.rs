use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

/// Writes pretty-printed JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, to_json(obj)?)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let contents = fs_err::read_to_string(path)?;
    let obj = serde_json::from_str(&contents).with_context(|| format!("parsing {}", path))?;
    Ok(obj)
}

/// Like `read_json`, but a missing file isn't an error.
pub fn maybe_read_json<T: DeserializeOwned>(path: &str) -> Result<Option<T>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn json_round_trip_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/data.json");
        let path = path.to_str().unwrap();

        let mut obj = BTreeMap::new();
        obj.insert("a".to_string(), 1);
        obj.insert("b".to_string(), 2);
        write_json(path, &obj).unwrap();

        let back: BTreeMap<String, usize> = read_json(path).unwrap();
        assert_eq!(obj, back);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let path = path.to_str().unwrap();
        assert!(read_json::<Vec<usize>>(path).is_err());
        assert!(maybe_read_json::<Vec<usize>>(path).unwrap().is_none());
    }

    #[test]
    fn bad_json_mentions_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let path = path.to_str().unwrap();
        fs_err::write(path, "{ not json").unwrap();
        let err = read_json::<Vec<usize>>(path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.json"));
    }
}

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

const FIELDS: [&str; 3] = ["Text", "Dir", "Image"];

/// The fields of a region descriptor that segmentation needs. Any other
/// fields in the file are ignored.
///
/// Field names match ASCII case-insensitively (`TEXT`, `dIr`); when several
/// spellings of one field appear, the exact `Text`/`Dir`/`Image` spelling
/// wins. All three fields are required: a descriptor missing one is rejected
/// rather than read as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Region {
    /// Full transcription, one ground-truth line per text line.
    pub text: String,
    /// Output directory for snippets and ground-truth files.
    pub dir: PathBuf,
    /// Source page image.
    pub image: PathBuf,
}

impl Region {
    /// Reads a JSON region descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let descriptor = |source| Error::Descriptor {
            path: path.to_path_buf(),
            source,
        };
        let value: Value =
            serde_json::from_reader(BufReader::new(file)).map_err(descriptor)?;
        Self::from_value(value).map_err(descriptor)
    }

    /// Builds a region from parsed JSON, folding field-name case first.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(fold_field_names(value))
    }

    /// Ground-truth lines in order. A trailing newline does not produce an
    /// extra empty line, and `\r\n` endings are accepted.
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}

fn fold_field_names(value: Value) -> Value {
    let Value::Object(map) = value else {
        return value;
    };
    let mut folded = Map::with_capacity(map.len());
    for (key, v) in map {
        match FIELDS.iter().find(|name| name.eq_ignore_ascii_case(&key)) {
            Some(&name) if key == name || !folded.contains_key(name) => {
                folded.insert(name.to_string(), v);
            }
            Some(_) => {}
            None => {
                folded.insert(key, v);
            }
        }
    }
    Value::Object(folded)
}

/// Counts `.png` files anywhere below `dir`.
///
/// A missing or unreadable directory counts as holding no images.
pub fn count_png_files(dir: &Path) -> usize {
    walk_png(dir).unwrap_or(0)
}

fn walk_png(dir: &Path) -> std::io::Result<usize> {
    let mut n = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            n += walk_png(&entry.path())?;
        } else if entry.file_name().to_string_lossy().ends_with(".png") {
            n += 1;
        }
    }
    Ok(n)
}

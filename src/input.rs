use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a document submission from disk. Files ending in `.gz` are
/// decompressed first.
pub fn read_submission<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut text = String::new();
    if path.extension().map_or(false, |ext| ext == "gz") {
        GzDecoder::new(BufReader::new(file))
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to decompress {}", path.display()))?;
    } else {
        BufReader::new(file)
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }

    Ok(text)
}

/// Read a stopword list, one word per line. Blank lines and lines starting
/// with `#` are skipped; words are lowercased.
pub fn read_stopwords<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = read_submission(path)?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}

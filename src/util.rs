use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Writes through a sibling temp file and renames it over `path` once complete.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let staging_path = staging_path_for(path);
    let file = File::create(&staging_path)
        .with_context(|| format!("failed to create {}", staging_path.display()))?;
    let mut writer = BufWriter::new(file);

    let written = write(&mut writer).and_then(|()| {
        writer
            .flush()
            .with_context(|| format!("failed to flush {}", staging_path.display()))
    });
    drop(writer);
    if let Err(err) = written {
        let _ = fs::remove_file(&staging_path);
        return Err(err);
    }

    fs::rename(&staging_path, path).with_context(|| {
        format!(
            "failed to move {} into place at {}",
            staging_path.display(),
            path.display()
        )
    })
}

fn staging_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_atomically(path, |file| {
        serde_json::to_writer_pretty(&mut *file, value)
            .with_context(|| format!("failed to serialize json: {}", path.display()))?;
        file.write_all(b"\n")
            .with_context(|| format!("failed to finalize json file: {}", path.display()))
    })
}

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Unpack `archive` into `dest`. Entries that would land outside `dest`
/// are skipped. Returns the number of files written.
pub fn extract_jar(archive: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("read {} as a zip archive", archive.display()))?;
    std::fs::create_dir_all(dest).with_context(|| format!("create {}", dest.display()))?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .with_context(|| format!("entry {i} of {}", archive.display()))?;
        let Some(rel) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
            tracing::warn!(
                archive = %archive.display(),
                entry = entry.name(),
                "skipping entry outside the output directory"
            );
            continue;
        };
        let target: PathBuf = dest.join(rel);

        if entry.is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("create {}", target.display()))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let mut out =
            File::create(&target).with_context(|| format!("create {}", target.display()))?;
        std::io::copy(&mut entry, &mut out)
            .with_context(|| format!("write {}", target.display()))?;
        written += 1;
    }

    tracing::debug!(archive = %archive.display(), files = written, "archive extracted");
    Ok(written)
}

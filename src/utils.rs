use anyhow::Result;
use fs_err::File;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Creates a progress bar for monitoring function progress.
pub fn progress_bar_for_count(count: usize) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {human_pos}/{human_len} ({per_sec}, {eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(count as u64).with_style(style)
}

/// Writes `data` to `<output_directory>/<file_name>.json`, returning the path.
pub fn write_json_file<T: Serialize>(
    file_name: &str,
    output_directory: &Path,
    data: T,
) -> Result<PathBuf> {
    fs_err::create_dir_all(output_directory)?;
    let path = output_directory.join(format!("{file_name}.json"));
    tracing::info!(path = %path.display(), "writing json");
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &data)?;
    writer.flush()?;
    Ok(path)
}

use crate::enricher::DuplicateKeyPolicy;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(
    output_dir: Option<String>,
    duplicate_keys: Option<DuplicateKeyPolicy>,
    preview_rows: Option<usize>,
) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = output_dir {
        settings.output_dir = shellexpand_path(&dir);
    }
    if let Some(policy) = duplicate_keys {
        settings.duplicate_keys = policy;
    }
    if let Some(rows) = preview_rows {
        settings.preview_rows = rows;
    }

    let path = save_settings(&settings)?;
    std::fs::create_dir_all(&settings.output_dir)?;

    println!("Settings written to {}", path.display());
    println!("Output dir:      {}", settings.output_dir);
    println!("Duplicate keys:  {}", settings.duplicate_keys.key());
    println!("Preview rows:    {}", settings.preview_rows);
    Ok(())
}

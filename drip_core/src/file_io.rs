//! # File I/O
//!
//! Reading parameter and settings files, and writing exported documents.
//!
//! - **Atomic writes**: Write to .tmp, sync, verify, rename, so a crash never
//!   leaves a half-written drawing under the final name
//! - **JSON inputs**: Parameters use the camelCase wire names; settings use
//!   [`DesignSettings`] with every field optional

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{DesignError, DesignResult};
use crate::export::ExportDocument;
use crate::params::IrrigationParams;
use crate::settings::DesignSettings;

/// Write an exported document into `dir` with atomic write semantics.
///
/// The write process:
/// 1. Create `dir` if it does not exist
/// 2. Write to a temporary file (`<name>.tmp`)
/// 3. Sync to disk and check the written length
/// 4. Rename over the final name
///
/// Returns the final path.
///
/// # Example
///
/// ```rust,no_run
/// use drip_core::calculations::calculate_system;
/// use drip_core::export::{export, ExportFormat};
/// use drip_core::file_io::write_export;
/// use drip_core::params::default_params;
/// use std::path::Path;
///
/// let params = default_params();
/// let doc = export(&params, &calculate_system(&params), ExportFormat::Svg);
/// let path = write_export(&doc, Path::new("out"), doc.file_name())?;
/// println!("wrote {}", path.display());
/// # Ok::<(), drip_core::errors::DesignError>(())
/// ```
pub fn write_export(doc: &ExportDocument, dir: &Path, file_name: &str) -> DesignResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        DesignError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;

    let path = dir.join(file_name);
    let tmp_path = dir.join(format!("{}.tmp", file_name));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        DesignError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(doc.content.as_bytes()).map_err(|e| {
        DesignError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        DesignError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file
        .metadata()
        .map_err(|e| DesignError::file_error("stat temp file", tmp_path.display().to_string(), e.to_string()))?
        .len();
    if written != doc.content.len() as u64 {
        let _ = fs::remove_file(&tmp_path);
        return Err(DesignError::file_error(
            "verify temp file",
            tmp_path.display().to_string(),
            format!("expected {} bytes, found {}", doc.content.len(), written),
        ));
    }
    drop(tmp_file);

    fs::rename(&tmp_path, &path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        DesignError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::info!("wrote {} ({} bytes)", path.display(), written);
    Ok(path)
}

fn read_to_string(path: &Path) -> DesignResult<String> {
    let mut file = File::open(path)
        .map_err(|e| DesignError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| DesignError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Load a parameter set from a JSON file.
///
/// The file must carry all nine fields under their wire names
/// (`plotLength`, `plotWidth`, ...). Values are not range-checked here; call
/// [`IrrigationParams::validate`] for that.
pub fn load_params(path: &Path) -> DesignResult<IrrigationParams> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| DesignError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Load settings, or the defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> DesignResult<DesignSettings> {
    let Some(path) = path else {
        return Ok(DesignSettings::default());
    };
    let contents = read_to_string(path)?;
    let settings: DesignSettings = serde_json::from_str(&contents).map_err(|e| DesignError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;
    settings.validate()?;
    log::debug!("loaded settings from {}", path.display());
    Ok(settings)
}

use crate::adapters::storage::LocalStorage;
use crate::config::cli::Command;
use crate::core::arkitektonika::Arkitektonika;
use crate::utils::error::{ArkitektonikaError, Result};
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Run one CLI command, writing its human-readable result to `out`.
///
/// Returns `Ok(false)` when the command completed but the answer is
/// negative (an incompatible instance); the binary exits with 1 then.
pub async fn run<W: Write>(
    arkitektonika: &Arkitektonika,
    command: Command,
    out: &mut W,
) -> Result<bool> {
    match command {
        Command::Compat => {
            let compatible = arkitektonika.is_compatible().await?;
            tracing::info!("Compatibility check finished: {}", compatible);
            if compatible {
                emit(out, format!("compatible (API {})", arkitektonika.api_version()))?;
            } else {
                emit(out, "incompatible")?;
            }
            Ok(compatible)
        }
        Command::Upload { file } => {
            let (storage, name) = split_path(&file)?;
            let keys = arkitektonika.upload_from(&storage, &name).await?;
            tracing::info!("Uploaded {}", file.display());
            emit(out, format!("access key:   {}", keys.access_key))?;
            emit(out, format!("deletion key: {}", keys.deletion_key))?;
            Ok(true)
        }
        Command::Status { key } => {
            let status = arkitektonika.check_status(&key).await?;
            emit(out, status)?;
            Ok(true)
        }
        Command::Download { key, output } => {
            let output = match output {
                Some(output) => output,
                None => default_output_path(&key)?,
            };
            let (storage, name) = split_path(&output)?;
            let schematic = arkitektonika.download_to(&key, &storage, &name).await?;
            tracing::info!("Saved {} bytes to {}", schematic.len(), output.display());
            emit(out, output.display())?;
            Ok(true)
        }
        Command::Delete { key } => {
            arkitektonika.delete(&key).await?;
            tracing::info!("Deleted schematic");
            emit(out, "deleted")?;
            Ok(true)
        }
    }
}

fn emit<W: Write>(out: &mut W, line: impl Display) -> Result<()> {
    writeln!(out, "{}", line).map_err(|e| ArkitektonikaError::io("<stdout>", e))
}

/// `<key>.schem` in the current directory. Only the last component of the
/// key is used, so a key like `../x` cannot escape the directory.
pub fn default_output_path(key: &str) -> Result<PathBuf> {
    let name = Path::new(key)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ArkitektonikaError::Validation {
            message: format!("Cannot derive a file name from key '{}', use --output", key),
        })?;
    Ok(PathBuf::from(format!("{}.schem", name)))
}

/// Split a file path into a storage rooted at its parent and the file name.
pub fn split_path(path: &Path) -> Result<(LocalStorage, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArkitektonikaError::Validation {
            message: format!("Not a file path: {}", path.display()),
        })?
        .to_string();
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((LocalStorage::new(parent), name))
}

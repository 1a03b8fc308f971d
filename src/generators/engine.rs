//! Typst rendering engine.
//!
//! Handles the low-level details of writing Typst source to temporary
//! files, staging referenced assets next to it, invoking the compiler,
//! and reading the output PDF back.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;
use tempfile::TempDir;

use super::GeneratorError;

/// Stateless engine for rendering Typst source to PDF bytes.
pub struct TypstRenderEngine;

impl TypstRenderEngine {
    /// Render a Typst source string to PDF.
    ///
    /// # Arguments
    /// * `template_filename` - Name for the source file inside the
    ///   compilation directory (e.g., "termo_responsabilidade.typ").
    /// * `typst_source` - The complete, rendered Typst source code string.
    /// * `assets` - Files copied next to the source so that relative
    ///   `image(...)` references resolve (e.g., an institution logo).
    pub fn render(
        template_filename: &str,
        typst_source: &str,
        assets: &[&Path],
    ) -> Result<Vec<u8>, GeneratorError> {
        // Create temp directory for compilation context
        let temp_dir = tempdir().map_err(GeneratorError::TempDir)?;
        let typ_path = temp_dir.path().join(template_filename);

        // Write the source to the temp file
        fs::write(&typ_path, typst_source).map_err(GeneratorError::WriteTypst)?;

        for asset in assets {
            let destino = asset
                .file_name()
                .map(|nome| temp_dir.path().join(nome))
                .ok_or_else(|| GeneratorError::StageAsset {
                    asset: asset.display().to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "asset path has no file name",
                    ),
                })?;
            fs::copy(asset, &destino).map_err(|source| GeneratorError::StageAsset {
                asset: asset.display().to_string(),
                source,
            })?;
        }

        let output_filename = format!("{}.pdf", template_filename.trim_end_matches(".typ"));
        compile_typst_to_pdf(&temp_dir, template_filename, &output_filename)
    }
}

/// Compile a Typst source file to PDF.
fn compile_typst_to_pdf(
    temp_dir: &TempDir,
    typ_filename: &str,
    output_filename: &str,
) -> Result<Vec<u8>, GeneratorError> {
    let typ_path = temp_dir.path().join(typ_filename);
    let output_path = temp_dir.path().join(output_filename);

    log::debug!("compiling {} -> {}", typ_filename, output_filename);

    let status = Command::new("typst")
        .arg("compile")
        .arg(&typ_path)
        .arg(&output_path)
        .current_dir(temp_dir.path())
        .status()
        .map_err(GeneratorError::TypstIo)?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(GeneratorError::TypstExit(code));
    }

    fs::read(&output_path).map_err(GeneratorError::ReadPdf)
}

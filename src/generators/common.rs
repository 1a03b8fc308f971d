//! Common utilities for document generation.
//!
//! Shared helpers for date formatting, CPF normalization, Typst escaping,
//! filename derivation and logo asset lookup.

use chrono::{Datelike, Local};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Format the current date spelled out in Portuguese
/// (e.g., "12 de março de 2026").
pub fn format_data_extenso() -> String {
    let hoje = Local::now().date_naive();
    let meses = [
        "janeiro",
        "fevereiro",
        "março",
        "abril",
        "maio",
        "junho",
        "julho",
        "agosto",
        "setembro",
        "outubro",
        "novembro",
        "dezembro",
    ];

    let dia = hoje.day();
    let mes = meses[(hoje.month0() as usize).min(meses.len() - 1)];
    let ano = hoje.year();

    format!("{dia} de {mes} de {ano}")
}

/// Normalize a CPF into the display form XXX.XXX.XXX-XX.
///
/// Separator characters (periods, hyphens, spaces) are stripped first;
/// anything that does not come out as exactly 11 digits is returned
/// cleaned but otherwise untouched.
pub fn format_cpf(cpf: &str) -> String {
    let limpo: String = cpf
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect();

    if limpo.len() == 11 && limpo.chars().all(|c| c.is_ascii_digit()) {
        format!(
            "{}.{}.{}-{}",
            &limpo[..3],
            &limpo[3..6],
            &limpo[6..9],
            &limpo[9..]
        )
    } else {
        limpo
    }
}

/// Escape special characters for Typst string literals.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

/// Derive the archive entry name for a student's termo.
///
/// Deterministic: `{NOME with spaces as underscores}_{SIGLA}_termo.pdf`,
/// sanitized against path metacharacters.
pub fn derive_filename(nome: &str, sigla: &str) -> String {
    let base = format!("{}_{}_termo.pdf", nome.trim().replace(' ', "_"), sigla);
    sanitize_filename::sanitize(base)
}

/// Get the static assets directory path.
pub fn get_static_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Probe a logo asset under the static directory.
///
/// Returns the full path only when the file exists and its magic bytes
/// look like a supported image (PNG or JPEG). Absence or an unreadable or
/// malformed file is not an error; the caller substitutes the institution
/// name instead.
pub fn resolve_logo(relative: &str) -> Option<PathBuf> {
    let path = get_static_dir().join(relative);
    let mut header = [0u8; 4];
    let mut file = File::open(&path).ok()?;
    file.read_exact(&mut header).ok()?;

    let imagem = header.starts_with(&[0x89, 0x50, 0x4E, 0x47])
        || header.starts_with(&[0xFF, 0xD8, 0xFF]);
    imagem.then_some(path)
}

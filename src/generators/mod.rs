//! Generators module - business logic for creating PDF documents from Typst templates.
//!
//! The one document type produced here is the termo de responsabilidade de
//! entrega de documentos, issued per student record and branded for the
//! student's institution.

pub mod common;
pub mod engine;
pub mod termo;
pub mod traits;
pub mod validation;

pub use engine::TypstRenderEngine;
pub use termo::{TermoGenerator, TermoRequest};
pub use traits::{Generator, Validator};

use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("IES '{0}' não é válida. Use: UNIANDRADE, UNIB ou UNISMG")]
    IesDesconhecida(String),
    #[error("failed to load Typst template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteTypst(#[source] std::io::Error),
    #[error("failed to stage asset '{asset}': {source}")]
    StageAsset {
        asset: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    TypstExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub data_emissao: String,
}

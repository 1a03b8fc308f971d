//! Batch processing: one spreadsheet in, one ZIP archive plus summary out.
//!
//! Records are processed strictly in input order inside a fault-isolated
//! loop; one bad record never aborts the batch, and the archive only ever
//! receives fully rendered documents.

use std::fmt;
use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::dataset::Dataset;
use crate::generators::traits::{Generator, Validator};
use crate::generators::TermoRequest;

/// Whole-run failures. Per-record failures never surface here; they are
/// collected in [`BatchSummary::erros`].
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("colunas faltando na planilha: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("failed to write archive entry: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to finalize archive: {0}")]
    Io(#[from] std::io::Error),
}

/// One failed record, tagged with its 1-based row index and best-effort
/// student name.
#[derive(Debug)]
pub struct BatchEntryError {
    pub linha: usize,
    pub nome: Option<String>,
    pub mensagem: String,
}

impl fmt::Display for BatchEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Erro na linha {} ({}): {}",
            self.linha,
            self.nome.as_deref().unwrap_or("Nome não encontrado"),
            self.mensagem
        )
    }
}

/// Outcome of one processed record, for progress reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Document rendered and added to the archive under this entry name.
    Gerado(String),
    /// Record failed; the matching entry is collected in the summary.
    Falha(String),
}

/// Progress hook: (records processed so far, total records, outcome).
///
/// Called once per record so a front end can render progress without the
/// core depending on any UI technology.
pub type ProgressHook<'a> = &'a mut dyn FnMut(usize, usize, RecordOutcome);

/// Result of one batch run.
#[derive(Debug)]
pub struct BatchSummary {
    /// The finalized ZIP archive bytes.
    pub zip: Vec<u8>,
    pub sucessos: usize,
    /// Per-record errors, in input order.
    pub erros: Vec<BatchEntryError>,
}

/// Generate one termo per record and bundle them into a ZIP archive.
///
/// The effective IES for each record is the row's IES value when the table
/// has the column, otherwise `ies_padrao`. A record's document is fully
/// rendered before the archive writer is touched, so failures stay
/// isolated to their own row.
pub fn gerar_zip_termos<G>(
    generator: &G,
    dataset: &Dataset,
    ies_padrao: &str,
    mut progress: Option<ProgressHook<'_>>,
) -> Result<BatchSummary, BatchError>
where
    G: Generator<TermoRequest>,
{
    let faltando = dataset.missing_columns();
    if !faltando.is_empty() {
        return Err(BatchError::MissingColumns(faltando));
    }

    let total = dataset.rows.len();
    log::debug!("processando {} registro(s)", total);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut sucessos = 0usize;
    let mut erros: Vec<BatchEntryError> = Vec::new();

    for (index, row) in dataset.rows.iter().enumerate() {
        let nome = row.get("NOME").map(String::as_str).map(str::trim);
        let nome = nome.filter(|n| !n.is_empty()).map(str::to_string);

        let request = TermoRequest::from_row(row, ies_padrao);
        let resultado = match request.validate() {
            Ok(()) => generator.generate(request).map_err(|e| e.to_string()),
            Err(mensagem) => Err(mensagem),
        };

        match resultado {
            Ok(documento) => {
                zip.start_file(documento.filename.clone(), opts)?;
                zip.write_all(&documento.pdf)?;
                sucessos += 1;
                if let Some(hook) = progress.as_mut() {
                    hook(
                        index + 1,
                        total,
                        RecordOutcome::Gerado(documento.filename.clone()),
                    );
                }
            }
            Err(mensagem) => {
                let erro = BatchEntryError {
                    linha: index + 1,
                    nome,
                    mensagem,
                };
                if let Some(hook) = progress.as_mut() {
                    hook(index + 1, total, RecordOutcome::Falha(erro.to_string()));
                }
                erros.push(erro);
            }
        }
    }

    let cursor = zip.finish()?;
    log::debug!("lote concluído: {} sucesso(s), {} erro(s)", sucessos, erros.len());

    Ok(BatchSummary {
        zip: cursor.into_inner(),
        sucessos,
        erros,
    })
}

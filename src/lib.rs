//! Geração em lote de termos de responsabilidade em PDF.
//!
//! One spreadsheet of student records in, one ZIP archive of per-student
//! PDF statements plus a run summary out. Each record is rendered through
//! the Typst CLI from the wording template kept under `static/`, branded
//! for the institution (IES) the record belongs to.

pub mod batch;
pub mod dataset;
pub mod generators;
pub mod ies;

pub use crate::batch::{gerar_zip_termos, BatchEntryError, BatchError, BatchSummary, RecordOutcome};
pub use crate::dataset::{Dataset, DatasetError};
pub use crate::generators::{GeneratedDocument, GeneratorError, TermoGenerator, TermoRequest};

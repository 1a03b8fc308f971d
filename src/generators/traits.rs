//! Traits shared by the document-generation pipeline.

use super::{GeneratedDocument, GeneratorError};

/// Trait for validating request objects before any rendering work.
pub trait Validator {
    /// Validate the state of the object.
    fn validate(&self) -> Result<(), String>;
}

/// Trait for document generators.
///
/// The batch packager is generic over this, so callers and tests can
/// substitute a renderer that does not shell out to the Typst CLI.
pub trait Generator<Req> {
    /// Generate a document from the request.
    fn generate(&self, request: Req) -> Result<GeneratedDocument, GeneratorError>;
}

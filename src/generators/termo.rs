//! Generator for the Termo de Responsabilidade de Entrega de Documentos.
//!
//! One statement per student record: the student declares having handed in
//! the enrollment paperwork and takes responsibility for presenting the
//! remaining high-school certificates before classes start.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::ies::{map_codigo_ies, resolve_ies, IesInfo};

use super::common::{
    derive_filename, escape_typst_string, format_cpf, format_data_extenso, get_static_dir,
    resolve_logo,
};
use super::engine::TypstRenderEngine;
use super::traits::{Generator, Validator};
use super::{GeneratedDocument, GeneratorError};

const TEMPLATE_FILE: &str = "termo_responsabilidade.typ";

/// One student record, already keyed to its effective institution.
#[derive(Debug, Deserialize, Default)]
pub struct TermoRequest {
    pub nome: String,
    pub cpf: String,
    pub rua: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub curso: String,
    /// Canonical IES sigla (already code-mapped).
    pub ies: String,
    /// Issue date spelled out; defaults to today.
    #[serde(default)]
    pub data: Option<String>,
}

impl TermoRequest {
    /// Build a request from one canonical-header spreadsheet row.
    ///
    /// `ies_padrao` is used when the row has no IES cell. Cell values are
    /// taken as-is; validation decides whether they are usable.
    pub fn from_row(row: &HashMap<String, String>, ies_padrao: &str) -> Self {
        let campo = |nome: &str| row.get(nome).cloned().unwrap_or_default();
        let ies = match row.get(crate::dataset::IES_COLUMN) {
            Some(valor) => map_codigo_ies(valor),
            None => map_codigo_ies(ies_padrao),
        };

        Self {
            nome: campo("NOME"),
            cpf: campo("CPF"),
            rua: campo("RUA"),
            bairro: campo("BAIRRO"),
            cidade: campo("CIDADE"),
            uf: campo("UF"),
            curso: campo("CURSO"),
            ies,
            data: None,
        }
    }
}

impl Validator for TermoRequest {
    /// Validate all input data and return descriptive errors if invalid.
    fn validate(&self) -> Result<(), String> {
        use super::validation::*;

        let mut errors = ValidationErrors::new();

        validate_required(&self.nome, "NOME", "Nome do Aluno", &mut errors);
        validate_required(&self.cpf, "CPF", "CPF", &mut errors);
        validate_required(&self.rua, "RUA", "Rua", &mut errors);
        validate_required(&self.bairro, "BAIRRO", "Bairro", &mut errors);
        validate_required(&self.cidade, "CIDADE", "Cidade", &mut errors);
        validate_required(&self.uf, "UF", "UF", &mut errors);
        validate_required(&self.curso, "CURSO", "Curso", &mut errors);
        validate_ies(&self.ies, "IES", &mut errors);

        errors.into_result()
    }
}

/// Generator for the termo de responsabilidade.
pub struct TermoGenerator {
    template: String,
}

impl TermoGenerator {
    /// Create a new generator instance.
    pub fn new() -> Result<Self, GeneratorError> {
        let template_path = get_static_dir().join(TEMPLATE_FILE);
        let template = fs::read_to_string(&template_path).map_err(GeneratorError::TemplateIo)?;
        Ok(Self { template })
    }

    fn render_template(
        &self,
        request: &TermoRequest,
        ies: &IesInfo,
        logo: Option<&Path>,
        data: &str,
    ) -> String {
        let logo_nome = logo
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("");

        format!(
            r#"#let termo(
  aluno: (
    nome: "{}",
    cpf: "{}",
    rua: "{}",
    bairro: "{}",
    cidade: "{}",
    uf: "{}",
    curso: "{}",
  ),
  ies: (
    nome_completo: "{}",
    sigla: "{}",
    artigo_masculino: {},
  ),
  meta: (
    logo: "{}",
    data: "{}",
  ),
) = {{
{}

#termo()
"#,
            escape_typst_string(&request.nome),
            escape_typst_string(&format_cpf(&request.cpf)),
            escape_typst_string(&request.rua),
            escape_typst_string(&request.bairro),
            escape_typst_string(&request.cidade),
            escape_typst_string(&request.uf),
            escape_typst_string(&request.curso),
            escape_typst_string(ies.nome_completo),
            escape_typst_string(ies.sigla),
            if ies.artigo_masculino { "true" } else { "false" },
            escape_typst_string(logo_nome),
            escape_typst_string(data),
            self.extract_function_body(),
        )
    }

    /// Extract the function body from the template (everything between the
    /// signature's closing brace and the trailing call).
    fn extract_function_body(&self) -> String {
        if let Some(start) = self.template.find(") = {") {
            let body_start = start + 5;
            if let Some(end) = self.template.rfind("#termo()") {
                return self.template[body_start..end].to_string();
            }
        }
        self.template.clone()
    }
}

impl Generator<TermoRequest> for TermoGenerator {
    /// Generate the document from the request data.
    fn generate(&self, request: TermoRequest) -> Result<GeneratedDocument, GeneratorError> {
        // Resolved before any rendering work begins.
        let ies = resolve_ies(request.ies.trim())
            .ok_or_else(|| GeneratorError::IesDesconhecida(request.ies.clone()))?;

        let data_emissao = request.data.clone().unwrap_or_else(format_data_extenso);
        let logo = resolve_logo(ies.logo);
        let typst_source = self.render_template(&request, ies, logo.as_deref(), &data_emissao);

        let assets: Vec<&Path> = logo.as_deref().into_iter().collect();
        let pdf = TypstRenderEngine::render(TEMPLATE_FILE, &typst_source, &assets)?;

        Ok(GeneratedDocument {
            filename: derive_filename(&request.nome, ies.sigla),
            pdf,
            data_emissao,
        })
    }
}

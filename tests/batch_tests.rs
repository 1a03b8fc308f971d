use std::io::Cursor;

use gerador_termos::batch::{gerar_zip_termos, BatchError, RecordOutcome};
use gerador_termos::dataset::Dataset;
use gerador_termos::generators::common::derive_filename;
use gerador_termos::generators::{GeneratedDocument, Generator, GeneratorError, TermoRequest};
use gerador_termos::ies::resolve_ies;
use zip::ZipArchive;

/// Renders a tiny placeholder instead of shelling out to the Typst CLI,
/// keeping filename derivation and IES resolution identical to the real
/// generator.
struct StubGenerator;

impl Generator<TermoRequest> for StubGenerator {
    fn generate(&self, request: TermoRequest) -> Result<GeneratedDocument, GeneratorError> {
        let ies = resolve_ies(request.ies.trim())
            .ok_or_else(|| GeneratorError::IesDesconhecida(request.ies.clone()))?;

        Ok(GeneratedDocument {
            filename: derive_filename(&request.nome, ies.sigla),
            pdf: format!("%PDF-stub {}", request.nome).into_bytes(),
            data_emissao: "1 de janeiro de 2026".to_string(),
        })
    }
}

fn dataset(csv: &str) -> Dataset {
    Dataset::from_reader(csv.as_bytes()).unwrap()
}

fn nomes_no_zip(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_lote_com_coluna_ies() {
    let csv = "NOME,CPF,RUA,BAIRRO,CIDADE,UF,CURSO,IES\n\
               João da Silva,12345678901,Rua das Flores 123,Centro,São Paulo,SP,Engenharia Civil,1\n\
               Maria Santos,98765432100,Av. Brasil 456,Jardins,Curitiba,PR,Administração,unib\n";

    let resumo = gerar_zip_termos(&StubGenerator, &dataset(csv), "UNISMG", None).unwrap();

    assert_eq!(resumo.sucessos, 2);
    assert!(resumo.erros.is_empty());

    let nomes = nomes_no_zip(&resumo.zip);
    assert_eq!(nomes.len(), 2);
    assert!(nomes.contains(&"João_da_Silva_UNIANDRADE_termo.pdf".to_string()));
    assert!(nomes.contains(&"Maria_Santos_UNIB_termo.pdf".to_string()));
}

#[test]
fn test_lote_usa_ies_padrao_sem_coluna() {
    let csv = "NOME,CPF,RUA,BAIRRO,CIDADE,UF,CURSO\n\
               João da Silva,12345678901,Rua das Flores 123,Centro,São Paulo,SP,Engenharia Civil\n";

    let resumo = gerar_zip_termos(&StubGenerator, &dataset(csv), "301", None).unwrap();

    assert_eq!(resumo.sucessos, 1);
    assert_eq!(nomes_no_zip(&resumo.zip), vec!["João_da_Silva_UNIB_termo.pdf"]);
}

#[test]
fn test_registro_invalido_nao_aborta_o_lote() {
    // linha 2 tem IES fora do conjunto; linha 3 não tem nome
    let csv = "NOME,CPF,RUA,BAIRRO,CIDADE,UF,CURSO,IES\n\
               João da Silva,12345678901,Rua A,Centro,São Paulo,SP,Direito,UNIANDRADE\n\
               Maria Santos,98765432100,Rua B,Centro,Curitiba,PR,Administração,XYZ\n\
               ,11122233344,Rua C,Centro,Recife,PE,Medicina,UNIB\n\
               Ana Lima,55566677788,Rua D,Centro,Salvador,BA,Engenharia,UNISMG\n";

    let resumo = gerar_zip_termos(&StubGenerator, &dataset(csv), "UNIB", None).unwrap();

    assert_eq!(resumo.sucessos, 2);
    assert_eq!(resumo.erros.len(), 2);
    assert_eq!(nomes_no_zip(&resumo.zip).len(), 2);

    let linhas: Vec<usize> = resumo.erros.iter().map(|e| e.linha).collect();
    assert_eq!(linhas, vec![2, 3]);

    assert_eq!(resumo.erros[0].nome.as_deref(), Some("Maria Santos"));
    assert!(resumo.erros[0].mensagem.contains("IES 'XYZ' não é válida"));
    assert!(resumo.erros[0]
        .to_string()
        .starts_with("Erro na linha 2 (Maria Santos):"));

    assert_eq!(resumo.erros[1].nome, None);
    assert!(resumo.erros[1]
        .to_string()
        .contains("Nome não encontrado"));
}

#[test]
fn test_colunas_faltando_aborta_antes_de_gerar() {
    let csv = "NOME,RUA,BAIRRO,CIDADE,CURSO\nJoão,Rua A,Centro,São Paulo,Direito\n";

    match gerar_zip_termos(&StubGenerator, &dataset(csv), "UNIB", None) {
        Err(BatchError::MissingColumns(colunas)) => {
            assert_eq!(colunas, vec!["CPF", "UF"]);
        }
        outro => panic!("esperava MissingColumns, obteve {:?}", outro.map(|r| r.sucessos)),
    }
}

#[test]
fn test_mensagem_de_colunas_faltando() {
    let erro = BatchError::MissingColumns(vec!["CPF".to_string(), "UF".to_string()]);
    assert_eq!(erro.to_string(), "colunas faltando na planilha: CPF, UF");
}

#[test]
fn test_progress_hook_por_registro() {
    let csv = "NOME,CPF,RUA,BAIRRO,CIDADE,UF,CURSO,IES\n\
               João da Silva,12345678901,Rua A,Centro,São Paulo,SP,Direito,UNIANDRADE\n\
               Maria Santos,98765432100,Rua B,Centro,Curitiba,PR,Administração,XYZ\n";

    let mut eventos: Vec<(usize, usize, bool)> = Vec::new();
    let mut hook = |atual: usize, total: usize, outcome: RecordOutcome| {
        eventos.push((atual, total, matches!(outcome, RecordOutcome::Gerado(_))));
    };

    gerar_zip_termos(&StubGenerator, &dataset(csv), "UNIB", Some(&mut hook)).unwrap();

    assert_eq!(eventos, vec![(1, 2, true), (2, 2, false)]);
}

#[test]
fn test_nomes_de_arquivo_deterministicos() {
    let csv = "NOME,CPF,RUA,BAIRRO,CIDADE,UF,CURSO\n\
               João da Silva,12345678901,Rua A,Centro,São Paulo,SP,Direito\n";

    let primeiro = gerar_zip_termos(&StubGenerator, &dataset(csv), "UNIANDRADE", None).unwrap();
    let segundo = gerar_zip_termos(&StubGenerator, &dataset(csv), "UNIANDRADE", None).unwrap();

    assert_eq!(nomes_no_zip(&primeiro.zip), nomes_no_zip(&segundo.zip));
}

#[test]
fn test_lote_vazio_gera_zip_vazio() {
    let csv = "NOME,CPF,RUA,BAIRRO,CIDADE,UF,CURSO\n";

    let resumo = gerar_zip_termos(&StubGenerator, &dataset(csv), "UNIB", None).unwrap();

    assert_eq!(resumo.sucessos, 0);
    assert!(resumo.erros.is_empty());
    assert!(nomes_no_zip(&resumo.zip).is_empty());
}

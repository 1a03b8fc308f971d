use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gerador_termos::batch::{gerar_zip_termos, RecordOutcome};
use gerador_termos::dataset::Dataset;
use gerador_termos::generators::TermoGenerator;
use gerador_termos::ies::{map_codigo_ies, resolve_ies};

/// Gera termos de responsabilidade em PDF a partir de uma planilha e
/// empacota tudo em um único arquivo ZIP.
#[derive(Parser, Debug)]
#[command(name = "gerar-termos", version, about)]
struct Cli {
    /// Planilha CSV com as colunas NOME, CPF, RUA, BAIRRO, CIDADE, UF,
    /// CURSO e, opcionalmente, IES
    #[arg(long)]
    planilha: PathBuf,

    /// IES padrão quando a planilha não tem coluna IES (sigla ou código
    /// numérico: 1, 201 ou 301)
    #[arg(long)]
    ies: String,

    /// Arquivo ZIP de saída (padrão: termos_{timestamp}.zip)
    #[arg(long)]
    saida: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let ies_padrao = map_codigo_ies(&cli.ies);
    if resolve_ies(&ies_padrao).is_none() {
        anyhow::bail!(
            "IES '{}' não é válida. Use: UNIANDRADE, UNIB ou UNISMG",
            cli.ies
        );
    }

    let dataset = Dataset::from_csv_path(&cli.planilha)
        .with_context(|| format!("não foi possível ler {}", cli.planilha.display()))?;
    log::info!(
        "{} aluno(s) encontrado(s) em {}",
        dataset.rows.len(),
        cli.planilha.display()
    );
    if dataset.has_ies_column() {
        log::info!("planilha contém coluna IES; usando IES individual por aluno");
    } else {
        log::info!("planilha sem coluna IES; usando IES padrão {}", ies_padrao);
    }

    let generator = TermoGenerator::new()?;

    let mut progress = |atual: usize, total: usize, outcome: RecordOutcome| match outcome {
        RecordOutcome::Gerado(arquivo) => log::info!("[{atual}/{total}] ✓ {arquivo}"),
        RecordOutcome::Falha(erro) => log::warn!("[{atual}/{total}] ✗ {erro}"),
    };

    let resumo = gerar_zip_termos(&generator, &dataset, &ies_padrao, Some(&mut progress))?;

    let saida = cli.saida.unwrap_or_else(|| {
        PathBuf::from(format!(
            "termos_{}.zip",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    fs::write(&saida, &resumo.zip)
        .with_context(|| format!("não foi possível gravar {}", saida.display()))?;

    log::info!(
        "total: {} | sucesso: {} | erros: {}",
        dataset.rows.len(),
        resumo.sucessos,
        resumo.erros.len()
    );
    for erro in &resumo.erros {
        log::warn!("{erro}");
    }
    log::info!("arquivo gerado: {}", saida.display());

    Ok(())
}

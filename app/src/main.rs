use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::process::ExitCode;
use std::time::Duration;

use consulta_cnpj::config::{BASE_URL_PADRAO, RELAY_PADRAO};
use consulta_cnpj::terminal::PaginaTerminal;
use consulta_cnpj::{
    mascara, ui, ClienteReceitaWs, ConfigConsulta, Controlador, Desfecho, EstadoPagina, Pagina,
    TabelaMensagens,
};

#[derive(Parser)]
#[command(name = "consulta-cnpj")]
#[command(about = "Consulta dados cadastrais de um CNPJ na ReceitaWS", long_about = None)]
struct Cli {
    /// Modo silencioso (menos saída)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Modo verboso (mais detalhes e logs de diagnóstico)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    consulta: OpcoesConsulta,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OpcoesConsulta {
    /// Proxy anti-CORS colocado na frente do serviço
    #[arg(long, global = true, default_value = RELAY_PADRAO)]
    relay: String,

    /// Consulta o serviço diretamente, sem relay
    #[arg(long, global = true)]
    sem_relay: bool,

    /// URL base do serviço de consulta
    #[arg(long, global = true, default_value = BASE_URL_PADRAO)]
    base_url: String,

    /// Tempo máximo da consulta em segundos (padrão: sem limite)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Conjunto de mensagens para erros HTTP
    #[arg(long, global = true, value_enum, default_value_t = Mensagens::Detalhada)]
    mensagens: Mensagens,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mensagens {
    /// Uma mensagem por status HTTP conhecido
    Detalhada,
    /// "Erro na consulta: Erro HTTP: <código>" para qualquer status
    Generica,
}

#[derive(Subcommand)]
enum Commands {
    /// Consulta um CNPJ e mostra os dados da empresa
    Consultar {
        /// CNPJ, com ou sem pontuação
        cnpj: String,
        /// Imprime o registro em JSON em vez do painel formatado
        #[arg(long)]
        json: bool,
    },
    /// Formulário interativo: um CNPJ por linha, vazio ou "sair" encerra
    Interativo,
    /// Aplica a máscara de CNPJ a um valor e imprime o resultado
    Formatar {
        valor: String,
    },
}

impl OpcoesConsulta {
    fn config(&self) -> ConfigConsulta {
        ConfigConsulta {
            relay: (!self.sem_relay).then(|| self.relay.clone()),
            base_url: self.base_url.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            ..ConfigConsulta::default()
        }
    }

    fn tabela(&self) -> TabelaMensagens {
        match self.mensagens {
            Mensagens::Detalhada => TabelaMensagens::detalhada(),
            Mensagens::Generica => TabelaMensagens::generica(),
        }
    }

    fn controlador(&self) -> Result<Controlador<ClienteReceitaWs>> {
        let cliente = ClienteReceitaWs::new(self.config())?;
        ui::print_verbose(&format!(
            "Relay: {}",
            cliente.config().relay.as_deref().unwrap_or("nenhum")
        ));
        Ok(Controlador::new(cliente, self.tabela()))
    }
}

fn init_logger(quiet: bool, verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();

    // RUST_LOG, quando definido, tem precedência; sem ele o diagnóstico só
    // aparece com --verbose para não duplicar as mensagens do painel.
    if std::env::var_os("RUST_LOG").is_none() {
        let level = if verbose && !quiet {
            LevelFilter::Debug
        } else {
            LevelFilter::Off
        };
        builder.filter_level(level);
    }
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);

    let _ = builder.try_init();
}

/// Simula o usuário: digita o valor no campo e submete o formulário.
async fn preencher_e_submeter<P: Pagina>(
    controlador: &Controlador<ClienteReceitaWs>,
    pagina: &mut P,
    valor: &str,
) -> Desfecho {
    pagina.escrever_campo(valor.to_string());
    mascara::ao_digitar(pagina);
    controlador.submeter(pagina).await
}

async fn consultar(opcoes: &OpcoesConsulta, cnpj: &str, json: bool) -> Result<ExitCode> {
    let controlador = opcoes.controlador()?;

    let desfecho = if json {
        let mut pagina = EstadoPagina::default();
        let desfecho = preencher_e_submeter(&controlador, &mut pagina, cnpj).await;
        match &desfecho {
            Desfecho::Sucesso(empresa) => {
                let saida = serde_json::to_string_pretty(empresa)
                    .context("Falha ao serializar resposta")?;
                println!("{}", saida);
            }
            Desfecho::Falha { mensagem, .. } => ui::print_error(mensagem),
            Desfecho::Ignorada => {}
        }
        desfecho
    } else {
        let mut pagina = PaginaTerminal::new();
        preencher_e_submeter(&controlador, &mut pagina, cnpj).await
    };

    Ok(if desfecho.is_sucesso() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn interativo(opcoes: &OpcoesConsulta) -> Result<ExitCode> {
    let controlador = opcoes.controlador()?;
    let mut pagina = PaginaTerminal::new();

    ui::print_header("🔎 Consulta de CNPJ");
    ui::print_info("Digite um CNPJ por linha. Linha vazia ou \"sair\" encerra.");

    let mut consultas = 0usize;
    while let Some(linha) = ui::ask_line("CNPJ:").context("Falha ao ler entrada do terminal")? {
        let linha = linha.trim();
        if linha.is_empty() || linha.eq_ignore_ascii_case("sair") {
            break;
        }
        preencher_e_submeter(&controlador, &mut pagina, linha).await;
        consultas += 1;
    }

    ui::print_success(&format!("{} consulta(s) realizada(s)", consultas));
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    ui::init(cli.quiet, cli.verbose);
    init_logger(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Consultar { cnpj, json } => consultar(&cli.consulta, &cnpj, json).await,
        Commands::Interativo => interativo(&cli.consulta).await,
        Commands::Formatar { valor } => {
            println!("{}", mascara::aplicar_mascara(&valor));
            Ok(ExitCode::SUCCESS)
        }
    }
}

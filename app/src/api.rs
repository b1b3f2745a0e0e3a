use anyhow::Context;
use log::debug;
use reqwest::header::ACCEPT;
use std::future::Future;

use crate::config::ConfigConsulta;
use crate::erros::{ErroConsulta, MENSAGEM_ERRO_APLICACAO_PADRAO};
use crate::models::{Cnpj, Empresa, RespostaReceita};
use crate::utils;

/// Serviço externo de consulta de CNPJ.
pub trait ServicoConsulta {
    fn consultar(
        &self,
        cnpj: &Cnpj,
    ) -> impl Future<Output = Result<Empresa, ErroConsulta>> + Send;
}

pub struct ClienteReceitaWs {
    client: reqwest::Client,
    config: ConfigConsulta,
}

impl ClienteReceitaWs {
    pub fn new(config: ConfigConsulta) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Falha ao criar cliente HTTP")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ConfigConsulta {
        &self.config
    }
}

impl ServicoConsulta for ClienteReceitaWs {
    async fn consultar(&self, cnpj: &Cnpj) -> Result<Empresa, ErroConsulta> {
        let url = self.config.url_consulta(cnpj);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} respondeu {}", url, status);
            return Err(ErroConsulta::StatusHttp {
                codigo: status.as_u16(),
            });
        }

        let corpo: RespostaReceita = response.json().await?;
        if corpo.is_erro() {
            let mensagem = utils::preenchido(corpo.message.as_deref())
                .unwrap_or(MENSAGEM_ERRO_APLICACAO_PADRAO)
                .to_string();
            return Err(ErroConsulta::Aplicacao(mensagem));
        }

        Ok(corpo.empresa)
    }
}

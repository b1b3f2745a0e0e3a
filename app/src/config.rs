use std::time::Duration;

use crate::models::Cnpj;

pub const RELAY_PADRAO: &str = "https://cors-anywhere.herokuapp.com";
pub const BASE_URL_PADRAO: &str = "https://receitaws.com.br/v1/cnpj";
pub const USER_AGENT_PADRAO: &str = concat!("consulta-cnpj/", env!("CARGO_PKG_VERSION"));

/// Onde e como consultar. O relay é um proxy anti-CORS que recebe a URL
/// completa do serviço no próprio caminho.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigConsulta {
    pub relay: Option<String>,
    pub base_url: String,
    /// `None` = sem limite de tempo.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ConfigConsulta {
    fn default() -> Self {
        Self {
            relay: Some(RELAY_PADRAO.to_string()),
            base_url: BASE_URL_PADRAO.to_string(),
            timeout: None,
            user_agent: USER_AGENT_PADRAO.to_string(),
        }
    }
}

impl ConfigConsulta {
    /// Chamada direta ao serviço em `base_url`, sem relay.
    pub fn direta(base_url: impl Into<String>) -> Self {
        Self {
            relay: None,
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn url_consulta(&self, cnpj: &Cnpj) -> String {
        let base = self.base_url.trim_end_matches('/');
        match &self.relay {
            Some(relay) => format!("{}/{}/{}", relay.trim_end_matches('/'), base, cnpj.digitos()),
            None => format!("{}/{}", base, cnpj.digitos()),
        }
    }
}

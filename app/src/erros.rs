use std::collections::HashMap;
use thiserror::Error;

pub const MENSAGEM_CNPJ_INVALIDO: &str =
    "CNPJ inválido. Por favor, insira um CNPJ válido com 14 dígitos.";
pub const MENSAGEM_ERRO_APLICACAO_PADRAO: &str = "Erro ao consultar CNPJ";
pub const PREFIXO_ERRO_TRANSPORTE: &str = "Erro na consulta";

/// Falhas de uma consulta, do campo do formulário até o corpo da resposta.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErroConsulta {
    /// O campo não tem exatamente 14 dígitos. Nunca chega à rede.
    #[error("CNPJ com {digitos} dígito(s), esperado 14")]
    CnpjInvalido { digitos: usize },

    /// Resposta HTTP fora da faixa 2xx.
    #[error("serviço respondeu HTTP {codigo}")]
    StatusHttp { codigo: u16 },

    /// HTTP 2xx com `status: "ERROR"` no corpo.
    #[error("serviço sinalizou erro: {0}")]
    Aplicacao(String),

    /// Falha de rede, timeout ou corpo que não é JSON válido.
    #[error("falha de transporte: {0}")]
    Transporte(String),
}

impl From<reqwest::Error> for ErroConsulta {
    fn from(e: reqwest::Error) -> Self {
        ErroConsulta::Transporte(e.to_string())
    }
}

/// Tabela status HTTP -> mensagem exibida ao usuário.
///
/// Códigos fora da tabela usam `modelo_padrao`, onde `{codigo}` é
/// substituído pelo status recebido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabelaMensagens {
    mensagens: HashMap<u16, String>,
    modelo_padrao: String,
}

impl TabelaMensagens {
    pub fn new(modelo_padrao: impl Into<String>) -> Self {
        Self {
            mensagens: HashMap::new(),
            modelo_padrao: modelo_padrao.into(),
        }
    }

    pub fn com(mut self, codigo: u16, mensagem: impl Into<String>) -> Self {
        self.mensagens.insert(codigo, mensagem.into());
        self
    }

    /// Uma mensagem por status conhecido.
    pub fn detalhada() -> Self {
        Self::new("Erro inesperado ({codigo}). Tente novamente mais tarde.")
            .com(400, "Solicitação inválida. Verifique o CNPJ informado.")
            .com(403, "Acesso negado. O serviço pode estar bloqueado.")
            .com(404, "CNPJ não encontrado. Verifique se o número está correto.")
            .com(
                429,
                "Muitas requisições em um curto período. Tente novamente mais tarde.",
            )
            .com(500, "Erro interno do servidor. Tente novamente mais tarde.")
    }

    /// Mesma mensagem para qualquer status, com o prefixo das falhas de
    /// consulta: `Erro na consulta: Erro HTTP: <código>`.
    pub fn generica() -> Self {
        Self::new(format!("{}: Erro HTTP: {{codigo}}", PREFIXO_ERRO_TRANSPORTE))
    }

    pub fn mensagem_status(&self, codigo: u16) -> String {
        match self.mensagens.get(&codigo) {
            Some(mensagem) => mensagem.clone(),
            None => self.modelo_padrao.replace("{codigo}", &codigo.to_string()),
        }
    }

    /// Texto final do painel de erro para qualquer falha.
    pub fn mensagem(&self, erro: &ErroConsulta) -> String {
        match erro {
            ErroConsulta::CnpjInvalido { .. } => MENSAGEM_CNPJ_INVALIDO.to_string(),
            ErroConsulta::StatusHttp { codigo } => self.mensagem_status(*codigo),
            ErroConsulta::Aplicacao(mensagem) => mensagem.clone(),
            ErroConsulta::Transporte(causa) => format!("{}: {}", PREFIXO_ERRO_TRANSPORTE, causa),
        }
    }
}

impl Default for TabelaMensagens {
    fn default() -> Self {
        Self::detalhada()
    }
}

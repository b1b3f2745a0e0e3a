use serde::{Deserialize, Serialize};
use std::fmt;

use crate::erros::ErroConsulta;
use crate::mascara;
use crate::utils;

pub const TAMANHO_CNPJ: usize = 14;

/// CNPJ já validado: sempre 14 dígitos ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cnpj(String);

impl Cnpj {
    /// Aceita o valor cru do campo (com ou sem pontuação).
    pub fn parse(valor: &str) -> Result<Self, ErroConsulta> {
        let digitos = utils::somente_digitos(valor);
        if digitos.len() != TAMANHO_CNPJ {
            return Err(ErroConsulta::CnpjInvalido { digitos: digitos.len() });
        }
        Ok(Cnpj(digitos))
    }

    pub fn digitos(&self) -> &str {
        &self.0
    }

    pub fn formatado(&self) -> String {
        mascara::aplicar_mascara(&self.0)
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatado())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Atividade {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Registro devolvido pela ReceitaWS. Todos os campos são opcionais.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empresa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasia: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situacao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atividade_principal: Option<Vec<Atividade>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logradouro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
}

impl Empresa {
    pub fn atividade_principal_texto(&self) -> Option<&str> {
        self.atividade_principal
            .as_ref()
            .and_then(|atividades| atividades.first())
            .and_then(|a| a.text.as_deref())
    }
}

/// Corpo completo da resposta: o registro mais o par `status`/`message`
/// que o serviço usa para sinalizar erro com HTTP 200.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespostaReceita {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub empresa: Empresa,
}

impl RespostaReceita {
    pub fn is_erro(&self) -> bool {
        self.status.as_deref() == Some("ERROR")
    }
}

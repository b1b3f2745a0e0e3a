use regex::Regex;
use std::sync::LazyLock;

pub const NAO_INFORMADO: &str = "Não informado";

static NAO_DIGITO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("regex literal válida"));

/// Remove tudo o que não for dígito ASCII.
pub fn somente_digitos(valor: &str) -> String {
    NAO_DIGITO.replace_all(valor, "").into_owned()
}

/// Campo ausente ou vazio conta como não informado, como no formulário web.
pub fn preenchido(valor: Option<&str>) -> Option<&str> {
    valor.filter(|v| !v.is_empty())
}

pub fn valor_ou_padrao(valor: Option<&str>) -> String {
    preenchido(valor).unwrap_or(NAO_INFORMADO).to_string()
}

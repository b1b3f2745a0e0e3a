use regex::Regex;
use std::sync::LazyLock;

use crate::models::TAMANHO_CNPJ;
use crate::pagina::Pagina;
use crate::utils;

// Cada passo só casa quando há dígitos suficientes depois do ponto de inserção,
// então entradas parciais recebem máscara parcial.
static PASSOS: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (regex_literal(r"^([0-9]{2})([0-9])"), "${1}.${2}"),
        (regex_literal(r"^([0-9]{2})\.([0-9]{3})([0-9])"), "${1}.${2}.${3}"),
        (regex_literal(r"\.([0-9]{3})([0-9])"), ".${1}/${2}"),
        (regex_literal(r"([0-9]{4})([0-9])"), "${1}-${2}"),
    ]
});

fn regex_literal(padrao: &str) -> Regex {
    Regex::new(padrao).expect("regex literal válida")
}

/// Aplica a máscara `NN.NNN.NNN/NNNN-NN` sobre os dígitos de `valor`.
///
/// Com mais de 14 dígitos o valor volta intacto, sem máscara e sem corte.
pub fn aplicar_mascara(valor: &str) -> String {
    let digitos = utils::somente_digitos(valor);
    if digitos.len() > TAMANHO_CNPJ {
        return valor.to_string();
    }

    PASSOS
        .iter()
        .fold(digitos, |atual, (regex, substituicao)| {
            regex.replace(&atual, *substituicao).into_owned()
        })
}

/// Handler do evento de digitação: reescreve o campo com a máscara.
pub fn ao_digitar<P: Pagina>(pagina: &mut P) {
    let atual = pagina.ler_campo();
    let formatado = aplicar_mascara(&atual);
    if formatado != atual {
        pagina.escrever_campo(formatado);
    }
}

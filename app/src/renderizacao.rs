use crate::models::Empresa;
use crate::pagina::{LinhaInfo, Pagina, Painel};
use crate::utils::{self, NAO_INFORMADO};

pub const ROTULO_RAZAO_SOCIAL: &str = "Razão Social";
pub const ROTULO_CNPJ: &str = "CNPJ";
pub const ROTULO_NOME_FANTASIA: &str = "Nome Fantasia";
pub const ROTULO_SITUACAO: &str = "Situação";
pub const ROTULO_ATIVIDADE: &str = "Atividade Principal";
pub const ROTULO_ENDERECO: &str = "Endereço";

/// Linhas do painel de resultado, na ordem de exibição.
pub fn linhas_empresa(empresa: &Empresa) -> Vec<LinhaInfo> {
    vec![
        LinhaInfo::new(ROTULO_RAZAO_SOCIAL, utils::valor_ou_padrao(empresa.nome.as_deref())),
        LinhaInfo::new(ROTULO_CNPJ, utils::valor_ou_padrao(empresa.cnpj.as_deref())),
        LinhaInfo::new(
            ROTULO_NOME_FANTASIA,
            utils::valor_ou_padrao(empresa.fantasia.as_deref()),
        ),
        LinhaInfo::new(ROTULO_SITUACAO, utils::valor_ou_padrao(empresa.situacao.as_deref())),
        LinhaInfo::new(
            ROTULO_ATIVIDADE,
            utils::valor_ou_padrao(empresa.atividade_principal_texto()),
        ),
        LinhaInfo::new(ROTULO_ENDERECO, endereco(empresa)),
    ]
}

/// Bloco de endereço em três linhas:
/// `logradouro, número [- complemento]`, `bairro - município / UF`, `CEP: ...`.
pub fn endereco(empresa: &Empresa) -> String {
    let mut primeira = format!("{}, {}", campo(&empresa.logradouro), campo(&empresa.numero));
    if let Some(complemento) = utils::preenchido(empresa.complemento.as_deref()) {
        primeira.push_str(" - ");
        primeira.push_str(complemento);
    }

    let segunda = format!(
        "{} - {} / {}",
        campo(&empresa.bairro),
        campo(&empresa.municipio),
        campo(&empresa.uf)
    );

    let cep = utils::preenchido(empresa.cep.as_deref()).unwrap_or(NAO_INFORMADO);

    format!("{}\n{}\nCEP: {}", primeira, segunda, cep)
}

fn campo(valor: &Option<String>) -> &str {
    utils::preenchido(valor.as_deref()).unwrap_or("")
}

pub fn mostrar_resultado<P: Pagina>(pagina: &mut P, empresa: &Empresa) {
    pagina.definir_resultado(linhas_empresa(empresa));
    pagina.definir_visibilidade(Painel::Resultado, true);
    pagina.definir_visibilidade(Painel::Erro, false);
}

pub fn mostrar_erro<P: Pagina>(pagina: &mut P, mensagem: &str) {
    pagina.definir_erro(mensagem);
    pagina.definir_visibilidade(Painel::Erro, true);
    pagina.definir_visibilidade(Painel::Resultado, false);
}

/// Só mexe em visibilidade; o conteúdo anterior dos painéis fica guardado.
pub fn mostrar_carregando<P: Pagina>(pagina: &mut P) {
    pagina.definir_ocupado(true);
    pagina.definir_visibilidade(Painel::Erro, false);
    pagina.definir_visibilidade(Painel::Resultado, false);
}

//! Abstração da página do formulário.
//!
//! O controlador só enxerga estas capacidades: ler e escrever o campo,
//! trocar a visibilidade e o conteúdo dos painéis e marcar o formulário
//! como ocupado. `EstadoPagina` é a implementação em memória, usada nos
//! testes e como estado interno da página de terminal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Painel {
    Resultado,
    Erro,
}

/// Uma linha rotulada do painel de resultado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinhaInfo {
    pub rotulo: String,
    pub valor: String,
}

impl LinhaInfo {
    pub fn new(rotulo: impl Into<String>, valor: impl Into<String>) -> Self {
        Self {
            rotulo: rotulo.into(),
            valor: valor.into(),
        }
    }
}

/// Estado visível do formulário, derivado das flags da página.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstadoUi {
    Ocioso,
    Carregando,
    Resultado,
    Erro(String),
}

pub trait Pagina {
    fn ler_campo(&self) -> String;
    fn escrever_campo(&mut self, valor: String);
    fn definir_visibilidade(&mut self, painel: Painel, visivel: bool);
    fn definir_resultado(&mut self, linhas: Vec<LinhaInfo>);
    fn definir_erro(&mut self, mensagem: &str);
    fn definir_ocupado(&mut self, ocupado: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstadoPagina {
    pub campo: String,
    pub linhas_resultado: Vec<LinhaInfo>,
    pub mensagem_erro: String,
    pub resultado_visivel: bool,
    pub erro_visivel: bool,
    pub ocupado: bool,
}

impl EstadoPagina {
    pub fn com_campo(valor: impl Into<String>) -> Self {
        Self {
            campo: valor.into(),
            ..Self::default()
        }
    }

    pub fn estado(&self) -> EstadoUi {
        if self.ocupado {
            EstadoUi::Carregando
        } else if self.erro_visivel {
            EstadoUi::Erro(self.mensagem_erro.clone())
        } else if self.resultado_visivel {
            EstadoUi::Resultado
        } else {
            EstadoUi::Ocioso
        }
    }

    pub fn visivel(&self, painel: Painel) -> bool {
        match painel {
            Painel::Resultado => self.resultado_visivel,
            Painel::Erro => self.erro_visivel,
        }
    }

    pub fn valor(&self, rotulo: &str) -> Option<&str> {
        self.linhas_resultado
            .iter()
            .find(|linha| linha.rotulo == rotulo)
            .map(|linha| linha.valor.as_str())
    }
}

impl Pagina for EstadoPagina {
    fn ler_campo(&self) -> String {
        self.campo.clone()
    }

    fn escrever_campo(&mut self, valor: String) {
        self.campo = valor;
    }

    fn definir_visibilidade(&mut self, painel: Painel, visivel: bool) {
        match painel {
            Painel::Resultado => self.resultado_visivel = visivel,
            Painel::Erro => self.erro_visivel = visivel,
        }
    }

    fn definir_resultado(&mut self, linhas: Vec<LinhaInfo>) {
        self.linhas_resultado = linhas;
    }

    fn definir_erro(&mut self, mensagem: &str) {
        self.mensagem_erro = mensagem.to_string();
    }

    fn definir_ocupado(&mut self, ocupado: bool) {
        self.ocupado = ocupado;
    }
}

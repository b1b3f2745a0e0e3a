use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::pagina::{EstadoPagina, LinhaInfo, Pagina, Painel};
use crate::ui;

/// Página que desenha os painéis no terminal. O estado fica num
/// `EstadoPagina`; cada painel é impresso quando é marcado visível e o
/// indicador de ocupado vira um spinner.
pub struct PaginaTerminal {
    estado: EstadoPagina,
    spinner: Option<ProgressBar>,
}

impl PaginaTerminal {
    pub fn new() -> Self {
        Self {
            estado: EstadoPagina::default(),
            spinner: None,
        }
    }

    pub fn estado(&self) -> &EstadoPagina {
        &self.estado
    }

    fn iniciar_spinner(&mut self) {
        let pb = if ui::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Consultando {}...", self.estado.campo));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    fn desenhar(&self, painel: Painel) {
        match painel {
            Painel::Resultado => {
                ui::print_header("🏢 Dados da Empresa");
                ui::print_linhas(&self.estado.linhas_resultado);
                ui::print_separator();
            }
            Painel::Erro => ui::print_error(&self.estado.mensagem_erro),
        }
    }
}

impl Default for PaginaTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagina for PaginaTerminal {
    fn ler_campo(&self) -> String {
        self.estado.ler_campo()
    }

    fn escrever_campo(&mut self, valor: String) {
        ui::print_verbose(&format!("Campo: {}", valor));
        self.estado.escrever_campo(valor);
    }

    fn definir_visibilidade(&mut self, painel: Painel, visivel: bool) {
        self.estado.definir_visibilidade(painel, visivel);
        if !visivel {
            return;
        }
        match &self.spinner {
            Some(pb) => pb.suspend(|| self.desenhar(painel)),
            None => self.desenhar(painel),
        }
    }

    fn definir_resultado(&mut self, linhas: Vec<LinhaInfo>) {
        self.estado.definir_resultado(linhas);
    }

    fn definir_erro(&mut self, mensagem: &str) {
        self.estado.definir_erro(mensagem);
    }

    fn definir_ocupado(&mut self, ocupado: bool) {
        if ocupado && self.spinner.is_none() {
            self.iniciar_spinner();
        } else if !ocupado {
            if let Some(pb) = self.spinner.take() {
                pb.finish_and_clear();
            }
        }
        self.estado.definir_ocupado(ocupado);
    }
}

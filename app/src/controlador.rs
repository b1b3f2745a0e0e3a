use log::{debug, error, info, warn};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::ServicoConsulta;
use crate::erros::{ErroConsulta, TabelaMensagens};
use crate::models::{Cnpj, Empresa};
use crate::pagina::Pagina;
use crate::renderizacao;

/// Como terminou uma submissão.
#[derive(Debug, Clone, PartialEq)]
pub enum Desfecho {
    Sucesso(Empresa),
    Falha { erro: ErroConsulta, mensagem: String },
    /// Já havia uma consulta em andamento; nada foi feito.
    Ignorada,
}

impl Desfecho {
    pub fn is_sucesso(&self) -> bool {
        matches!(self, Desfecho::Sucesso(_))
    }
}

/// Controlador do formulário: valida, consulta e renderiza.
pub struct Controlador<S> {
    servico: S,
    mensagens: TabelaMensagens,
    em_andamento: AtomicBool,
}

impl<S: ServicoConsulta> Controlador<S> {
    pub fn new(servico: S, mensagens: TabelaMensagens) -> Self {
        Self {
            servico,
            mensagens,
            em_andamento: AtomicBool::new(false),
        }
    }

    pub fn servico(&self) -> &S {
        &self.servico
    }

    pub fn em_andamento(&self) -> bool {
        self.em_andamento.load(Ordering::SeqCst)
    }

    /// Trata a submissão do formulário. Nunca propaga erro: toda falha vira
    /// mensagem no painel de erro, e o indicador de ocupado sempre termina
    /// desligado.
    pub async fn submeter<P: Pagina>(&self, pagina: &mut P) -> Desfecho {
        let Some(_trava) = TravaConsulta::adquirir(&self.em_andamento) else {
            warn!("Consulta já em andamento, submissão ignorada");
            return Desfecho::Ignorada;
        };

        let cnpj = match Cnpj::parse(&pagina.ler_campo()) {
            Ok(cnpj) => cnpj,
            Err(erro) => {
                debug!("Validação falhou: {}", erro);
                return self.falhar(pagina, erro);
            }
        };

        let mut pagina = PaginaOcupada::entrar(pagina);
        info!("Consultando CNPJ {}", cnpj);

        match self.servico.consultar(&cnpj).await {
            Ok(empresa) => {
                renderizacao::mostrar_resultado(&mut *pagina, &empresa);
                Desfecho::Sucesso(empresa)
            }
            Err(erro) => {
                error!("Erro na consulta de {}: {}", cnpj, erro);
                self.falhar(&mut *pagina, erro)
            }
        }
    }

    fn falhar<P: Pagina>(&self, pagina: &mut P, erro: ErroConsulta) -> Desfecho {
        let mensagem = self.mensagens.mensagem(&erro);
        renderizacao::mostrar_erro(pagina, &mensagem);
        Desfecho::Falha { erro, mensagem }
    }
}

/// Marca uma consulta em andamento enquanto viva.
struct TravaConsulta<'a>(&'a AtomicBool);

impl<'a> TravaConsulta<'a> {
    fn adquirir(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| TravaConsulta(flag))
    }
}

impl Drop for TravaConsulta<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Entra no estado de carregamento e desliga o indicador de ocupado no drop,
/// inclusive se o future da consulta for abandonado no meio.
struct PaginaOcupada<'a, P: Pagina>(&'a mut P);

impl<'a, P: Pagina> PaginaOcupada<'a, P> {
    fn entrar(pagina: &'a mut P) -> Self {
        renderizacao::mostrar_carregando(pagina);
        PaginaOcupada(pagina)
    }
}

impl<P: Pagina> Deref for PaginaOcupada<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        &*self.0
    }
}

impl<P: Pagina> DerefMut for PaginaOcupada<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut *self.0
    }
}

impl<P: Pagina> Drop for PaginaOcupada<'_, P> {
    fn drop(&mut self) {
        self.0.definir_ocupado(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erros::MENSAGEM_CNPJ_INVALIDO;
    use crate::pagina::{EstadoPagina, EstadoUi};
    use crate::pagina::{LinhaInfo, Painel};
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Página compartilhada com o serviço falso, para inspecionar o
    /// formulário enquanto a consulta ainda não respondeu.
    #[derive(Clone, Default)]
    struct PaginaCompartilhada(Arc<Mutex<EstadoPagina>>);

    impl PaginaCompartilhada {
        fn com_campo(valor: &str) -> Self {
            Self(Arc::new(Mutex::new(EstadoPagina::com_campo(valor))))
        }

        fn foto(&self) -> EstadoPagina {
            self.0.lock().unwrap().clone()
        }
    }

    impl Pagina for PaginaCompartilhada {
        fn ler_campo(&self) -> String {
            self.0.lock().unwrap().ler_campo()
        }

        fn escrever_campo(&mut self, valor: String) {
            self.0.lock().unwrap().escrever_campo(valor);
        }

        fn definir_visibilidade(&mut self, painel: Painel, visivel: bool) {
            self.0.lock().unwrap().definir_visibilidade(painel, visivel);
        }

        fn definir_resultado(&mut self, linhas: Vec<LinhaInfo>) {
            self.0.lock().unwrap().definir_resultado(linhas);
        }

        fn definir_erro(&mut self, mensagem: &str) {
            self.0.lock().unwrap().definir_erro(mensagem);
        }

        fn definir_ocupado(&mut self, ocupado: bool) {
            self.0.lock().unwrap().definir_ocupado(ocupado);
        }
    }

    struct ServicoFalso {
        resposta: Result<Empresa, ErroConsulta>,
        chamadas: AtomicUsize,
        liberar: Option<Arc<Notify>>,
        observar: Option<PaginaCompartilhada>,
        durante_consulta: Mutex<Option<EstadoPagina>>,
    }

    impl ServicoFalso {
        fn respondendo(resposta: Result<Empresa, ErroConsulta>) -> Self {
            Self {
                resposta,
                chamadas: AtomicUsize::new(0),
                liberar: None,
                observar: None,
                durante_consulta: Mutex::new(None),
            }
        }

        fn chamadas(&self) -> usize {
            self.chamadas.load(Ordering::SeqCst)
        }

        fn durante_consulta(&self) -> Option<EstadoPagina> {
            self.durante_consulta.lock().unwrap().clone()
        }
    }

    impl ServicoConsulta for ServicoFalso {
        async fn consultar(&self, _cnpj: &Cnpj) -> Result<Empresa, ErroConsulta> {
            self.chamadas.fetch_add(1, Ordering::SeqCst);
            if let Some(pagina) = &self.observar {
                let foto = pagina.foto();
                *self.durante_consulta.lock().unwrap() = Some(foto);
            }
            if let Some(liberar) = &self.liberar {
                liberar.notified().await;
            }
            self.resposta.clone()
        }
    }

    fn acme() -> Empresa {
        Empresa {
            nome: Some("ACME LTDA".to_string()),
            cnpj: Some("11.222.333/0001-81".to_string()),
            ..Empresa::default()
        }
    }

    fn um_painel_visivel(pagina: &EstadoPagina) -> bool {
        pagina.resultado_visivel != pagina.erro_visivel
    }

    #[tokio::test]
    async fn test_cnpj_curto_nao_chama_servico() {
        let controlador = Controlador::new(
            ServicoFalso::respondendo(Ok(acme())),
            TabelaMensagens::default(),
        );

        for valor in ["", "1122233300018", "11.222.333/0001-819", "abc"] {
            let mut pagina = EstadoPagina::com_campo(valor);
            let desfecho = controlador.submeter(&mut pagina).await;

            assert!(matches!(
                desfecho,
                Desfecho::Falha {
                    erro: ErroConsulta::CnpjInvalido { .. },
                    ..
                }
            ));
            assert_eq!(
                pagina.estado(),
                EstadoUi::Erro(MENSAGEM_CNPJ_INVALIDO.to_string())
            );
            assert!(!pagina.ocupado);
        }
        assert_eq!(controlador.servico().chamadas(), 0);
    }

    #[tokio::test]
    async fn test_sucesso_mostra_resultado() {
        let controlador = Controlador::new(
            ServicoFalso::respondendo(Ok(acme())),
            TabelaMensagens::default(),
        );
        let mut pagina = EstadoPagina::com_campo("11.222.333/0001-81");
        pagina.definir_erro("erro antigo");
        pagina.erro_visivel = true;

        let desfecho = controlador.submeter(&mut pagina).await;

        assert_eq!(desfecho, Desfecho::Sucesso(acme()));
        assert_eq!(pagina.estado(), EstadoUi::Resultado);
        assert!(um_painel_visivel(&pagina));
        assert_eq!(pagina.valor("Razão Social"), Some("ACME LTDA"));
        assert_eq!(pagina.valor("Situação"), Some("Não informado"));
        assert_eq!(controlador.servico().chamadas(), 1);
        assert!(!controlador.em_andamento());
    }

    #[tokio::test]
    async fn test_status_http_usa_tabela_injetada() {
        let controlador = Controlador::new(
            ServicoFalso::respondendo(Err(ErroConsulta::StatusHttp { codigo: 404 })),
            TabelaMensagens::generica(),
        );
        let mut pagina = EstadoPagina::com_campo("11222333000181");

        controlador.submeter(&mut pagina).await;

        assert_eq!(
            pagina.estado(),
            EstadoUi::Erro("Erro na consulta: Erro HTTP: 404".to_string())
        );
        assert!(um_painel_visivel(&pagina));
    }

    #[tokio::test]
    async fn test_erro_de_transporte_recebe_prefixo() {
        let controlador = Controlador::new(
            ServicoFalso::respondendo(Err(ErroConsulta::Transporte("connection refused".into()))),
            TabelaMensagens::default(),
        );
        let mut pagina = EstadoPagina::com_campo("11222333000181");
        mostrar_resultado_antigo(&mut pagina);

        let desfecho = controlador.submeter(&mut pagina).await;

        match desfecho {
            Desfecho::Falha { mensagem, .. } => {
                assert_eq!(mensagem, "Erro na consulta: connection refused")
            }
            other => panic!("esperava falha, veio {:?}", other),
        }
        assert!(!pagina.ocupado);
        assert!(pagina.erro_visivel && !pagina.resultado_visivel);
    }

    #[tokio::test]
    async fn test_formulario_fica_carregando_durante_a_consulta() {
        let pagina = PaginaCompartilhada::com_campo("11222333000181");
        let servico = ServicoFalso {
            observar: Some(pagina.clone()),
            ..ServicoFalso::respondendo(Ok(acme()))
        };
        let controlador = Controlador::new(servico, TabelaMensagens::default());

        // resultado e erro antigos na tela antes da nova submissão
        let mut formulario = pagina.clone();
        renderizacao::mostrar_resultado(&mut formulario, &acme());
        formulario.definir_erro("erro antigo");
        formulario.definir_visibilidade(Painel::Erro, true);

        controlador.submeter(&mut formulario).await;

        let durante = controlador
            .servico()
            .durante_consulta()
            .expect("serviço não foi chamado");
        assert_eq!(durante.estado(), EstadoUi::Carregando);
        assert!(durante.ocupado);
        assert!(!durante.visivel(Painel::Resultado));
        assert!(!durante.visivel(Painel::Erro));
        // só a visibilidade muda, o conteúdo fica guardado
        assert_eq!(durante.mensagem_erro, "erro antigo");
        assert_eq!(durante.linhas_resultado.len(), 6);

        let depois = pagina.foto();
        assert_eq!(depois.estado(), EstadoUi::Resultado);
        assert!(!depois.ocupado);
    }

    fn mostrar_resultado_antigo(pagina: &mut EstadoPagina) {
        renderizacao::mostrar_resultado(pagina, &acme());
    }

    #[tokio::test]
    async fn test_segunda_submissao_em_andamento_e_ignorada() {
        let liberar = Arc::new(Notify::new());
        let servico = ServicoFalso {
            liberar: Some(Arc::clone(&liberar)),
            ..ServicoFalso::respondendo(Ok(acme()))
        };
        let controlador = Controlador::new(servico, TabelaMensagens::default());

        let mut primeira = EstadoPagina::com_campo("11222333000181");
        let mut segunda = EstadoPagina::com_campo("11222333000181");

        let (d1, d2, _) = tokio::join!(
            controlador.submeter(&mut primeira),
            controlador.submeter(&mut segunda),
            async { liberar.notify_one() },
        );

        assert!(d1.is_sucesso());
        assert_eq!(d2, Desfecho::Ignorada);
        assert_eq!(segunda, EstadoPagina::com_campo("11222333000181"));
        assert_eq!(controlador.servico().chamadas(), 1);
        assert!(!controlador.em_andamento());
    }

    #[tokio::test]
    async fn test_future_abandonado_libera_ocupado_e_trava() {
        let liberar = Arc::new(Notify::new());
        let servico = ServicoFalso {
            liberar: Some(liberar),
            ..ServicoFalso::respondendo(Ok(acme()))
        };
        let controlador = Controlador::new(servico, TabelaMensagens::default());
        let mut pagina = EstadoPagina::com_campo("11222333000181");

        let resultado = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            controlador.submeter(&mut pagina),
        )
        .await;

        assert!(resultado.is_err());
        assert!(!pagina.ocupado);
        assert!(!controlador.em_andamento());
    }
}

//! Consulta de CNPJ na ReceitaWS.
//!
//! O formulário é modelado pela trait [`pagina::Pagina`]: a máscara
//! ([`mascara`]) reescreve o campo a cada digitação e o
//! [`controlador::Controlador`] valida, consulta o [`api::ServicoConsulta`]
//! e desenha o resultado ou o erro.

pub mod api;
pub mod config;
pub mod controlador;
pub mod erros;
pub mod mascara;
pub mod models;
pub mod pagina;
pub mod renderizacao;
pub mod terminal;
pub mod ui;
pub mod utils;

pub use api::{ClienteReceitaWs, ServicoConsulta};
pub use config::ConfigConsulta;
pub use controlador::{Controlador, Desfecho};
pub use erros::{ErroConsulta, TabelaMensagens};
pub use models::{Cnpj, Empresa};
pub use pagina::{EstadoPagina, EstadoUi, Pagina, Painel};

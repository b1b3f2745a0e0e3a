use colored::*;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::pagina::LinhaInfo;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn init(quiet: bool, verbose: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue(), message);
    }
}

pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), message.green());
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_header(message: &str) {
    if !is_quiet() {
        println!("\n{}", message.bold().cyan());
        println!("{}", "─".repeat(message.chars().count()).cyan());
    }
}

pub fn print_verbose(message: &str) {
    if is_verbose() && !is_quiet() {
        println!("  {}", message.dimmed());
    }
}

pub fn print_separator() {
    if !is_quiet() {
        println!("{}", "=".repeat(60).dimmed());
    }
}

/// Painel de resultado: rótulo em negrito, valores multilinha alinhados.
/// Sai mesmo em modo silencioso, é o próprio resultado da consulta.
pub fn print_linhas(linhas: &[LinhaInfo]) {
    let largura = linhas
        .iter()
        .map(|linha| linha.rotulo.chars().count())
        .max()
        .unwrap_or(0);

    for linha in linhas {
        let mut valores = linha.valor.lines();
        let primeira = valores.next().unwrap_or("");
        let preenchimento = largura - linha.rotulo.chars().count();
        println!(
            "  {}{}  {}",
            linha.rotulo.bold(),
            " ".repeat(preenchimento),
            primeira
        );
        for resto in valores {
            println!("  {}  {}", " ".repeat(largura), resto);
        }
    }
}

/// Lê uma linha do terminal. `None` no fim da entrada.
pub fn ask_line(prompt: &str) -> io::Result<Option<String>> {
    if !is_quiet() {
        print!("{} ", prompt.bold());
        io::stdout().flush()?;
    }

    let mut input = String::new();
    let lidos = io::stdin().lock().read_line(&mut input)?;
    if lidos == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}

//! Line-based front end: renders sessions, reports and the chat to any writer
//! and reads choices from any reader

use crate::chat;
use crate::date_provider::DateProvider;
use crate::game::choice::ChoiceSession;
use crate::game::memory::{MemorySession, PAIRS};
use crate::game::sequence::{ERROR_BUDGET, SEQUENCE_SHAPES, SequenceSession};
use crate::game::{GameResult, GameSession, GameType, Outcome, Session, SessionState, performance_message};
use crate::play_service::PlaySession;
use crate::profile::ChildProfile;
use crate::report::{self, Report};
use crate::time_format::{format_date_br, format_seconds, format_time_ago};
use chrono::{DateTime, Utc};
use colored::Colorize;
use log::debug;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const MEMORY_COLUMNS: usize = 4;

pub struct Terminal<R, W> {
    input: R,
    output: W,
    clock: Arc<dyn DateProvider>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, clock: Arc<dyn DateProvider>) -> Self {
        Terminal {
            input,
            output,
            clock,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Blocks until the session's pending transition is due
    fn wait_until(&self, deadline: DateTime<Utc>) {
        let remaining = deadline - self.clock.get_current_time();
        if let Ok(remaining) = remaining.to_std() {
            std::thread::sleep(remaining);
        }
    }

    /// Runs a started session to its end; `None` if the player quit
    ///
    /// Pending transitions are waited out in real time, so callers driving a
    /// frozen clock must use immediate delays.
    pub fn play(&mut self, play: &mut PlaySession) -> io::Result<Option<GameResult>> {
        writeln!(
            self.output,
            "{}",
            format!("{} com {}", play.session.game_type(), play.profile_name).bold()
        )?;
        writeln!(self.output, "Digite o número da opção, ou 'q' para sair.")?;

        loop {
            if let Some(result) = play.session.tick() {
                self.render_finished(&result)?;
                return Ok(Some(result));
            }
            if play.session.state().is_terminal() {
                return Ok(None);
            }
            render_session(&mut self.output, &play.session)?;

            if let Some(deadline) = play.session.next_deadline() {
                let wake = match &play.session {
                    Session::Sequence(s) => s
                        .next_highlight_change()
                        .map_or(deadline, |step| step.min(deadline)),
                    _ => deadline,
                };
                self.output.flush()?;
                self.wait_until(wake);
                continue;
            }

            let Some(line) = self.read_line()? else {
                play.session.abandon();
                return Ok(None);
            };
            match line.as_str() {
                "" => continue,
                "q" | "sair" => {
                    play.session.abandon();
                    writeln!(self.output, "Jogo encerrado sem salvar.")?;
                    return Ok(None);
                }
                _ => {}
            }
            let Some(index) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                writeln!(self.output, "Digite um número da lista.")?;
                continue;
            };
            match play.session.select(index) {
                Ok(Outcome::Ignored) => debug!("selection {} ignored", index + 1),
                Ok(_) => {}
                Err(e) => writeln!(self.output, "{}", e.to_string().yellow())?,
            }
        }
    }

    fn render_finished(&mut self, result: &GameResult) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "🎉 Jogo concluído!".bold())?;
        writeln!(self.output, "{}", performance_message(result.score, result.errors))?;
        writeln!(
            self.output,
            "Pontos: {} | Erros: {} | Tempo: {}",
            result.score,
            result.errors,
            format_seconds(result.time_spent)
        )?;
        for reaction in &result.details.reactions {
            writeln!(self.output, "• {}", reaction)?;
        }
        Ok(())
    }

    /// Luna answers until the reader runs dry or the user says "sair"
    pub fn chat(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "Luna - Assistente IA".bold())?;
        writeln!(self.output, "{}", chat::GREETING)?;
        while let Some(line) = self.read_line()? {
            if line.eq_ignore_ascii_case("sair") {
                break;
            }
            if let Some(answer) = chat::reply(&line) {
                writeln!(self.output, "\n{}\n", answer)?;
            }
        }
        Ok(())
    }
}

pub fn render_session<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    match session {
        Session::Choice(s) => render_choice(out, s),
        Session::Sequence(s) => render_sequence(out, s),
        Session::Memory(s) => render_memory(out, s),
    }
}

fn render_choice<W: Write>(out: &mut W, session: &ChoiceSession) -> io::Result<()> {
    let game = session.game();
    writeln!(out)?;
    writeln!(
        out,
        "Rodada {}/{} | Pontos: {} | Erros: {}",
        session.round_number(),
        game.rounds,
        session.score(),
        session.errors()
    )?;
    if let Some(target) = session.target_stimulus() {
        writeln!(out, "{} {}", game.prompt, target.cue.bold())?;
    }
    for (i, candidate) in session.candidate_stimuli().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, candidate.name)?;
    }
    match (session.state(), session.feedback()) {
        (SessionState::Correct, Some(text)) => writeln!(out, "{}", text.green())?,
        (_, Some(text)) => writeln!(out, "{}", text.red())?,
        _ => {}
    }
    Ok(())
}

fn render_sequence<W: Write>(out: &mut W, session: &SequenceSession) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Nível {} | Pontos: {} | Erros: {}/{}",
        session.level(),
        session.score(),
        session.errors(),
        ERROR_BUDGET
    )?;
    match session.state() {
        // one shape at a time, never the whole pattern
        SessionState::Presenting => match session.highlighted() {
            Some(shape) => {
                let step = session.highlight_step().unwrap_or(0) + 1;
                writeln!(
                    out,
                    "Observe a sequência ({}/{}): {}",
                    step,
                    session.sequence().len(),
                    SEQUENCE_SHAPES[shape].bold()
                )?;
            }
            None => writeln!(out, "Observe a sequência...")?,
        },
        SessionState::Incorrect => writeln!(out, "{}", "Ops! Sequência errada. 🤔".red())?,
        SessionState::Correct => writeln!(out, "{}", "Sequência completa! 🌟".green())?,
        _ => {
            let (entered, total) = session.progress();
            writeln!(out, "Clique nas formas na ordem correta ({}/{})", entered, total)?;
            for (i, shape) in SEQUENCE_SHAPES.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, shape)?;
            }
        }
    }
    Ok(())
}

fn render_memory<W: Write>(out: &mut W, session: &MemorySession) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Pares: {}/{} | Tentativas: {} | Erros: {}",
        session.matches(),
        PAIRS,
        session.attempts(),
        session.errors()
    )?;
    for (row_index, cards) in session.cards().chunks(MEMORY_COLUMNS).enumerate() {
        let cells: Vec<String> = cards
            .iter()
            .enumerate()
            .map(|(col, card)| {
                let position = row_index * MEMORY_COLUMNS + col + 1;
                if card.matched || card.face_up {
                    format!("[{:^4}]", card.symbol_text())
                } else {
                    format!("[{:^4}]", position)
                }
            })
            .collect();
        writeln!(out, "  {}", cells.join(" "))?;
    }
    match session.last_pair_matched() {
        Some(true) if session.state() == SessionState::InRound => writeln!(out, "{}", "Par encontrado! ✨".green())?,
        Some(false) => writeln!(out, "{}", "Não é par, tente de novo.".red())?,
        _ => {}
    }
    Ok(())
}

/// First-run notice: educational observations only, never a diagnosis
pub fn render_disclaimer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "🧩 Aviso Importante".yellow().bold())?;
    writeln!(out, "{}", "📚 Plataforma Educativa - Não é Diagnóstico Médico".bold())?;
    writeln!(
        out,
        "O MindKids é uma plataforma educativa premium que utiliza jogos interativos para auxiliar pais e educadores na observação do desenvolvimento infantil."
    )?;
    writeln!(
        out,
        "⚠️ Esta plataforma NÃO fornece diagnósticos médicos de autismo ou qualquer outra condição."
    )?;
    writeln!(
        out,
        "Os relatórios gerados servem apenas como observações educativas sobre padrões de comportamento e desenvolvimento cognitivo durante as atividades lúdicas."
    )?;
    writeln!(
        out,
        "🩺 Para diagnósticos profissionais, sempre consulte pediatras, psicólogos ou especialistas em desenvolvimento infantil."
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn render_pricing<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "🚀 Acesso Premium MindKids".bold())?;
    writeln!(out, "{}", "R$ 19,90".green().bold())?;
    writeln!(out, "Pagamento único • Acesso vitalício")?;
    writeln!(out, "💰 Sem mensalidades • Sem taxas extras")?;
    for feature in [
        "6 Jogos Especializados",
        "Luna - Assistente IA",
        "Relatórios Detalhados",
        "Múltiplos perfis de crianças",
    ] {
        writeln!(out, "  ✓ {}", feature)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn render_catalogue<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "Jogos disponíveis".bold())?;
    for (i, game) in GameType::ALL.iter().enumerate() {
        let entry = game.catalogue_entry();
        writeln!(
            out,
            "{}. {} [{}] ({})",
            i + 1,
            entry.title,
            entry.difficulty.label(),
            game.slug()
        )?;
        writeln!(out, "   {}", entry.description)?;
    }
    Ok(())
}

pub fn render_profiles<W: Write>(out: &mut W, profiles: &[ChildProfile], now: DateTime<Utc>) -> io::Result<()> {
    if profiles.is_empty() {
        writeln!(out, "Nenhum perfil criado ainda.")?;
        return Ok(());
    }
    for profile in profiles {
        let last = profile
            .game_results
            .last()
            .map(|r| format!(", último jogo {}", format_time_ago(r.date, now)))
            .unwrap_or_default();
        writeln!(
            out,
            "({}) {} - {} jogos realizados{}",
            profile.initial(),
            profile.name.bold(),
            profile.game_results.len(),
            last
        )?;
    }
    Ok(())
}

pub fn render_report<W: Write>(out: &mut W, profile: &ChildProfile, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", format!("Relatório de {}", profile.name).bold())?;
    writeln!(out, "{}", "Relatórios Educativos - Não são Diagnósticos Médicos".yellow())?;
    if report.total_games == 0 {
        writeln!(out, "Nenhum Jogo Realizado")?;
        return Ok(());
    }
    writeln!(out, "Total de Jogos: {}", report.total_games)?;
    writeln!(out, "Pontuação Média: {}", report.average_score)?;
    writeln!(out, "Total de Erros: {}", report.total_errors)?;
    writeln!(out, "Tempo Médio: {}s", report.average_time_spent)?;
    writeln!(out, "Tempo Total: {}", format_seconds(report.total_time_spent))?;

    writeln!(out, "\n{}", "Desempenho por Jogo".bold())?;
    for stats in &report.per_game_type {
        writeln!(
            out,
            "  {}: {} jogos, média {} pts",
            stats.game_type, stats.count, stats.average_score
        )?;
    }

    let sections = [
        ("Pontos Fortes", &report.observations.strengths),
        ("Áreas para Desenvolvimento", &report.observations.development_areas),
        ("Recomendações", &report.observations.recommendations),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        writeln!(out, "\n{}", title.bold())?;
        for item in items {
            writeln!(out, "  • {}", item)?;
        }
    }

    writeln!(out, "\n{}", "Jogos Recentes".bold())?;
    for result in report::recent_results(&profile.game_results, 5) {
        writeln!(
            out,
            "  {} - {}: {} pontos, {} erros",
            format_date_br(result.date),
            result.game_type,
            result.score,
            result.errors
        )?;
    }
    Ok(())
}

//! Printable HTML version of a profile's report

use crate::game::GameType;
use crate::profile::ChildProfile;
use crate::report::{self, Report};
use crate::time_format::format_date_br;
use chrono::{DateTime, Utc};
use log::info;
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
.header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #3B82F6; padding-bottom: 20px; }
.section { margin-bottom: 30px; }
.stats-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 20px; }
.stat-card { background: #f3f4f6; padding: 15px; border-radius: 8px; }
.disclaimer { background: #fef3c7; border: 1px solid #f59e0b; padding: 15px; border-radius: 8px; margin-top: 30px; }
.warning { color: #92400e; font-weight: bold; }
h1 { color: #3B82F6; }
h2 { color: #374151; border-bottom: 1px solid #e5e7eb; padding-bottom: 10px; }
.observations { background: #eff6ff; padding: 15px; border-radius: 8px; border-left: 4px solid #3B82F6; }";

pub const PRINT_RECOMMENDATIONS: [&str; 4] = [
    "Continue praticando regularmente para melhores resultados",
    "Varie os tipos de jogos para desenvolvimento abrangente",
    "Celebre os progressos, por menores que sejam",
    "Consulte profissionais especializados para avaliação completa",
];

const DISCLAIMER: &str = r#"<div class="disclaimer">
<h3 class="warning">⚠️ IMPORTANTE - APENAS FINS EDUCATIVOS</h3>
<p><strong>Este relatório é baseado em jogos educativos e NÃO constitui diagnóstico médico.</strong></p>
<p>Os dados apresentados servem apenas como observações sobre o desenvolvimento de habilidades cognitivas básicas através de atividades lúdicas.</p>
<p>Para avaliação profissional e diagnósticos, consulte sempre pediatras, psicólogos ou outros profissionais de saúde especializados.</p>
<p><strong>MindKids é uma ferramenta educativa complementar, não substitui acompanhamento profissional.</strong></p>
</div>"#;

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Skills a child has exercised, one line per game family actually played
pub fn developed_skills(report: &Report) -> Vec<&'static str> {
    let mut skills = Vec::new();
    if report.stats_for(GameType::Memory).is_some() {
        skills.push("<strong>Memória Visual:</strong> Trabalhada através do Jogo da Memória");
    }
    if report.stats_for(GameType::Sequence).is_some() {
        skills.push("<strong>Memória Sequencial:</strong> Desenvolvida no Jogo de Sequências");
    }
    if report.stats_for(GameType::Color).is_some() {
        skills.push("<strong>Reconhecimento de Cores:</strong> Praticado no Jogo das Cores");
    }
    skills
}

pub fn attention_points(report: &Report) -> Vec<&'static str> {
    let mut points = Vec::new();
    if report.average_score < 50 {
        points.push("Pontuação abaixo da média - considere mais prática");
    }
    if report.total_errors as usize > report.total_games * 2 {
        points.push("Muitos erros - pode indicar necessidade de mais tempo ou explicações");
    }
    if report.average_time_spent > 60 {
        points.push("Tempo elevado para completar jogos - normal para aprendizado");
    }
    points
}

fn list(html: &mut String, items: &[&str]) {
    html.push_str("<ul>\n");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", item);
    }
    html.push_str("</ul>\n");
}

fn stat_card(html: &mut String, title: &str, value: &str, color: &str) {
    let _ = writeln!(
        html,
        "<div class=\"stat-card\"><h3>{}</h3><p style=\"font-size: 24px; margin: 0; color: {};\">{}</p></div>",
        title, color, value
    );
}

/// Renders the printable report, or `None` when the child has not played yet
pub fn render_html(profile: &ChildProfile, now: DateTime<Utc>) -> Option<String> {
    if profile.game_results.is_empty() {
        return None;
    }
    let report = Report::from_results(&profile.game_results);
    let name = escape_html(&profile.name);
    let today = format_date_br(now);

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Relatório MindKids - {}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n",
        name, STYLE
    );

    let _ = write!(
        html,
        "<div class=\"header\">\n<h1>🧠 MindKids - Relatório de Desenvolvimento</h1>\n\
<p><strong>Criança:</strong> {}</p>\n\
<p><strong>Data do Relatório:</strong> {}</p>\n\
<p><strong>Período:</strong> {} até {}</p>\n</div>\n",
        name,
        today,
        format_date_br(profile.created_at),
        today
    );

    html.push_str("<div class=\"section\">\n<h2>📊 Estatísticas Gerais</h2>\n<div class=\"stats-grid\">\n");
    stat_card(&mut html, "Total de Jogos", &report.total_games.to_string(), "#3B82F6");
    stat_card(&mut html, "Pontuação Média", &format!("{} pontos", report.average_score), "#10B981");
    stat_card(&mut html, "Total de Erros", &report.total_errors.to_string(), "#EF4444");
    stat_card(&mut html, "Tempo Médio", &format!("{} segundos", report.average_time_spent), "#8B5CF6");
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"section\">\n<h2>🎮 Desempenho por Jogo</h2>\n<div class=\"stats-grid\">\n");
    for stats in &report.per_game_type {
        let _ = writeln!(
            html,
            "<div class=\"stat-card\"><h3>{}</h3><p>Jogos realizados: {}</p><p>Média: {} pontos</p></div>",
            stats.game_type, stats.count, stats.average_score
        );
    }
    html.push_str("</div>\n</div>\n");

    html.push_str("<div class=\"section\">\n<h2>🔍 Observações Educativas</h2>\n<div class=\"observations\">\n");
    html.push_str("<h3>Habilidades Desenvolvidas:</h3>\n");
    list(&mut html, &developed_skills(&report));
    html.push_str("<h3>Pontos de Atenção:</h3>\n");
    list(&mut html, &attention_points(&report));
    html.push_str("<h3>Recomendações:</h3>\n");
    list(&mut html, &PRINT_RECOMMENDATIONS);
    html.push_str("</div>\n</div>\n");

    html.push_str(DISCLAIMER);
    html.push_str("\n</body>\n</html>\n");
    Some(html)
}

/// Writes the printable report to `path`; returns whether a file was written
pub fn export_to_file(profile: &ChildProfile, now: DateTime<Utc>, path: &Path) -> std::io::Result<bool> {
    let Some(html) = render_html(profile, now) else {
        return Ok(false);
    };
    std::fs::write(path, html)?;
    info!(
        "Exported report for '{}' ({} games) to {}",
        profile.name,
        report::total_games(&profile.game_results),
        path.display()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap()
    }

    fn profile_with(results: Vec<(GameType, u32, u32, u32)>) -> ChildProfile {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let mut profile = ChildProfile::new("Ana <Clara>", created);
        for (game_type, score, errors, time) in results {
            profile
                .game_results
                .push(GameResult::new(game_type, score, errors, time, now(), score / 10, vec![]));
        }
        profile
    }

    #[test]
    fn test_no_results_no_report() {
        assert!(render_html(&profile_with(vec![]), now()).is_none());
    }

    #[test]
    fn test_header_and_escaping() {
        let html = render_html(&profile_with(vec![(GameType::Color, 100, 0, 20)]), now()).unwrap();
        assert!(html.contains("<title>Relatório MindKids - Ana &lt;Clara&gt;</title>"));
        assert!(html.contains("<p><strong>Período:</strong> 01/06/2025 até 20/06/2025</p>"));
        assert!(html.contains("NÃO constitui diagnóstico médico."));
    }

    #[test]
    fn test_skills_follow_games_played() {
        let report = Report::from_results(
            &profile_with(vec![(GameType::Sequence, 60, 1, 40), (GameType::Sound, 90, 0, 20)])
                .game_results,
        );
        insta::assert_snapshot!(
            developed_skills(&report).join(" | "),
            @"<strong>Memória Sequencial:</strong> Desenvolvida no Jogo de Sequências"
        );
    }

    #[test]
    fn test_attention_points() {
        let struggling = Report::from_results(
            &profile_with(vec![(GameType::Memory, 30, 7, 90), (GameType::Number, 40, 2, 65)])
                .game_results,
        );
        assert_eq!(
            attention_points(&struggling),
            vec![
                "Pontuação abaixo da média - considere mais prática",
                "Muitos erros - pode indicar necessidade de mais tempo ou explicações",
                "Tempo elevado para completar jogos - normal para aprendizado",
            ]
        );

        let fine = Report::from_results(&profile_with(vec![(GameType::Shape, 120, 0, 30)]).game_results);
        assert!(attention_points(&fine).is_empty());
    }

    #[test]
    fn test_every_played_game_gets_a_card() {
        let html = render_html(
            &profile_with(vec![
                (GameType::Number, 90, 1, 30),
                (GameType::Shape, 120, 0, 40),
                (GameType::Number, 70, 3, 35),
            ]),
            now(),
        )
        .unwrap();
        assert!(html.contains("<h3>Jogo dos Números</h3><p>Jogos realizados: 2</p><p>Média: 80 pontos</p>"));
        assert!(html.contains("<h3>Jogo das Formas</h3><p>Jogos realizados: 1</p>"));
        assert!(!html.contains("Jogo da Memória</h3>"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("mindkids-export-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("relatorio.html");

        assert!(!export_to_file(&profile_with(vec![]), now(), &path).unwrap());
        assert!(!path.exists());

        assert!(export_to_file(&profile_with(vec![(GameType::Memory, 100, 0, 25)]), now(), &path).unwrap());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

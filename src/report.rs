//! Statistics and written observations derived from a profile's results
//!
//! Everything here is a pure function of the result list. Averages are
//! rounded to the nearest whole number and are 0 for an empty list.

use crate::game::{GameResult, GameType};

/// Score at or above which a strength is noted
const STRONG_SCORE: u32 = 70;
/// Score below which a development area is noted
const WEAK_SCORE: u32 = 50;
const QUICK_SECONDS: u32 = 30;
const SLOW_SECONDS: u32 = 60;

pub const RECOMMENDATIONS: [&str; 4] = [
    "Continue praticando regularmente",
    "Varie os tipos de atividades",
    "Celebre cada progresso",
    "Para avaliação completa, consulte profissionais especializados",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTypeStats {
    pub game_type: GameType,
    pub count: usize,
    pub average_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observations {
    pub strengths: Vec<&'static str>,
    pub development_areas: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
}

impl Observations {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.development_areas.is_empty()
            && self.recommendations.is_empty()
    }
}

/// Everything the report screen shows for one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total_games: usize,
    pub average_score: u32,
    pub total_errors: u32,
    pub average_time_spent: u32,
    pub total_time_spent: u32,
    pub per_game_type: Vec<GameTypeStats>,
    pub observations: Observations,
}

impl Report {
    pub fn from_results(results: &[GameResult]) -> Self {
        Report {
            total_games: total_games(results),
            average_score: average_score(results),
            total_errors: total_errors(results),
            average_time_spent: average_time_spent(results),
            total_time_spent: total_time_spent(results),
            per_game_type: per_game_type_stats(results),
            observations: observations(results),
        }
    }

    pub fn stats_for(&self, game_type: GameType) -> Option<&GameTypeStats> {
        self.per_game_type.iter().find(|s| s.game_type == game_type)
    }
}

fn rounded_mean(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

pub fn total_games(results: &[GameResult]) -> usize {
    results.len()
}

pub fn average_score(results: &[GameResult]) -> u32 {
    rounded_mean(results.iter().map(|r| r.score))
}

pub fn total_errors(results: &[GameResult]) -> u32 {
    results.iter().map(|r| r.errors).sum()
}

pub fn average_time_spent(results: &[GameResult]) -> u32 {
    rounded_mean(results.iter().map(|r| r.time_spent))
}

pub fn total_time_spent(results: &[GameResult]) -> u32 {
    results.iter().map(|r| r.time_spent).sum()
}

/// Mean score for one game, 0 if it was never played
pub fn average_score_for(results: &[GameResult], game_type: GameType) -> u32 {
    rounded_mean(
        results
            .iter()
            .filter(|r| r.game_type == game_type)
            .map(|r| r.score),
    )
}

pub fn count_for(results: &[GameResult], game_type: GameType) -> usize {
    results.iter().filter(|r| r.game_type == game_type).count()
}

/// One entry per game played, in order of first appearance
pub fn per_game_type_stats(results: &[GameResult]) -> Vec<GameTypeStats> {
    let mut seen: Vec<GameType> = Vec::new();
    for result in results {
        if !seen.contains(&result.game_type) {
            seen.push(result.game_type);
        }
    }
    seen.into_iter()
        .map(|game_type| GameTypeStats {
            game_type,
            count: count_for(results, game_type),
            average_score: average_score_for(results, game_type),
        })
        .collect()
}

/// The last `n` results, newest first
pub fn recent_results(results: &[GameResult], n: usize) -> Vec<&GameResult> {
    results.iter().rev().take(n).collect()
}

pub fn observations(results: &[GameResult]) -> Observations {
    if results.is_empty() {
        return Observations::default();
    }
    let average = average_score(results);
    let errors = total_errors(results) as usize;
    let time = average_time_spent(results);
    let memory = average_score_for(results, GameType::Memory);
    let pattern = average_score_for(results, GameType::Sequence);
    let color = average_score_for(results, GameType::Color);

    let mut strengths = Vec::new();
    if average >= STRONG_SCORE {
        strengths.push("Boa performance geral nos jogos");
    }
    if memory >= STRONG_SCORE {
        strengths.push("Excelente memória visual");
    }
    if pattern >= STRONG_SCORE {
        strengths.push("Boa capacidade de reconhecimento de padrões");
    }
    if color >= STRONG_SCORE {
        strengths.push("Ótimo reconhecimento de cores");
    }
    if time <= QUICK_SECONDS {
        strengths.push("Resposta rápida aos estímulos");
    }

    let mut development_areas = Vec::new();
    if average < WEAK_SCORE {
        development_areas.push("Pontuação pode melhorar com mais prática");
    }
    if errors > results.len() * 2 {
        development_areas.push("Reduzir erros com mais atenção");
    }
    if time > SLOW_SECONDS {
        development_areas.push("Pode trabalhar a velocidade de resposta");
    }
    // unplayed games average 0, so these fire until the game is tried
    if memory < WEAK_SCORE {
        development_areas.push("Treinar mais a memória visual");
    }
    if pattern < WEAK_SCORE {
        development_areas.push("Desenvolver reconhecimento de sequências");
    }

    Observations {
        strengths,
        development_areas,
        recommendations: RECOMMENDATIONS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(game_type: GameType, score: u32, errors: u32, time_spent: u32) -> GameResult {
        GameResult::new(game_type, score, errors, time_spent, Utc::now(), score / 10, vec![])
    }

    #[test]
    fn test_empty_results() {
        let report = Report::from_results(&[]);
        assert_eq!(report.total_games, 0);
        assert_eq!(report.average_score, 0);
        assert_eq!(report.average_time_spent, 0);
        assert_eq!(report.total_errors, 0);
        assert!(report.per_game_type.is_empty());
        assert!(report.observations.is_empty());
    }

    #[test]
    fn test_average_of_ten_and_twenty() {
        let results = vec![
            result(GameType::Color, 10, 0, 10),
            result(GameType::Color, 20, 0, 20),
        ];
        assert_eq!(average_score(&results), 15);
        assert_eq!(average_time_spent(&results), 15);
    }

    #[test]
    fn test_averages_round_half_up() {
        let results = vec![
            result(GameType::Number, 10, 0, 1),
            result(GameType::Number, 11, 0, 2),
        ];
        assert_eq!(average_score(&results), 11);
        assert_eq!(average_time_spent(&results), 2);
    }

    #[test]
    fn test_per_game_type_counts_and_order() {
        let results = vec![
            result(GameType::Sound, 100, 0, 30),
            result(GameType::Memory, 70, 3, 50),
            result(GameType::Sound, 80, 2, 30),
            result(GameType::Shape, 120, 0, 40),
            result(GameType::Memory, 90, 1, 45),
        ];
        let stats = per_game_type_stats(&results);
        let order: Vec<_> = stats.iter().map(|s| s.game_type).collect();
        assert_eq!(order, vec![GameType::Sound, GameType::Memory, GameType::Shape]);
        for s in &stats {
            let expected = results.iter().filter(|r| r.game_type == s.game_type).count();
            assert_eq!(s.count, expected);
        }
        assert_eq!(stats[0].average_score, 90);
        assert_eq!(stats[1].average_score, 80);
        assert_eq!(total_time_spent(&results), 195);
        assert_eq!(total_errors(&results), 6);
    }

    #[test]
    fn test_strong_profile_observations() {
        let results = vec![
            result(GameType::Memory, 100, 0, 20),
            result(GameType::Sequence, 150, 0, 25),
            result(GameType::Color, 100, 0, 15),
        ];
        let obs = observations(&results);
        assert_eq!(
            obs.strengths,
            vec![
                "Boa performance geral nos jogos",
                "Excelente memória visual",
                "Boa capacidade de reconhecimento de padrões",
                "Ótimo reconhecimento de cores",
                "Resposta rápida aos estímulos",
            ]
        );
        assert!(obs.development_areas.is_empty());
        assert_eq!(obs.recommendations, RECOMMENDATIONS.to_vec());
    }

    #[test]
    fn test_unplayed_games_count_as_zero() {
        let results = vec![result(GameType::Color, 100, 0, 45)];
        let obs = observations(&results);
        assert_eq!(
            obs.strengths,
            vec!["Boa performance geral nos jogos", "Ótimo reconhecimento de cores"]
        );
        assert_eq!(
            obs.development_areas,
            vec![
                "Treinar mais a memória visual",
                "Desenvolver reconhecimento de sequências",
            ]
        );
    }

    #[test]
    fn test_struggling_profile_observations() {
        let results = vec![
            result(GameType::Memory, 30, 7, 90),
            result(GameType::Sequence, 10, 3, 70),
        ];
        let obs = observations(&results);
        assert!(obs.strengths.is_empty());
        assert_eq!(
            obs.development_areas,
            vec![
                "Pontuação pode melhorar com mais prática",
                "Reduzir erros com mais atenção",
                "Pode trabalhar a velocidade de resposta",
                "Treinar mais a memória visual",
                "Desenvolver reconhecimento de sequências",
            ]
        );
    }

    #[test]
    fn test_recent_results_newest_first() {
        let results: Vec<_> = (1..=7)
            .map(|i| result(GameType::Number, i * 10, 0, i))
            .collect();
        let recent = recent_results(&results, 5);
        let scores: Vec<_> = recent.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![70, 60, 50, 40, 30]);
    }
}

//! Text rendering for each view of the terminal client.

use std::fmt::Write;

use trivia_rpg::game::{AnswerOutcome, GameSession, Leaderboard};

pub const MENU: &str = "\
=== TRIVIA RPG ===
  [1] Start game
  [2] About
  [3] Leaderboard
  [q] Quit";

pub const ABOUT: &str = "\
=== ABOUT ===
Answer video game trivia to survive. Every right answer adds to your score,
every wrong one costs health. When your health runs out the run is over and
your score goes on the leaderboard.

  [b] Back";

pub const LOADING: &str = "Loading questions...";

/// Menu choice typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    About,
    Leaderboard,
    Quit,
}

pub fn parse_menu(input: &str) -> Option<MenuChoice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "s" | "start" => Some(MenuChoice::Start),
        "2" | "a" | "about" => Some(MenuChoice::About),
        "3" | "l" | "leaderboard" => Some(MenuChoice::Leaderboard),
        "q" | "quit" | "exit" => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Map a 1-based answer number to an index into `len` answers.
pub fn parse_answer(input: &str, len: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

pub fn leaderboard(board: &Leaderboard) -> String {
    let mut out = String::from("=== LEADERBOARD ===\n");
    if board.scores().is_empty() {
        out.push_str("  No runs recorded yet.\n");
    }
    for (rank, score) in board.scores().iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {score}", rank + 1);
    }
    out
}

/// Status line plus the current question and its numbered answers.
pub fn question(session: &GameSession) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "HP {}/{}  |  Score {}  |  Question {}/{}",
        session.health(),
        session.rules().max_health,
        session.score(),
        session.current_index() + 1,
        session.batch_len(),
    );

    if let Some(question) = session.current_question() {
        let _ = writeln!(out);
        if let Some(category) = &question.category {
            let _ = writeln!(out, "[{category}]");
        }
        let _ = writeln!(out, "{}", question.prompt);
        for (i, answer) in question.answers.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {answer}", i + 1);
        }
        let _ = write!(out, "  [m] Give up and return to menu");
    }
    out
}

pub fn feedback(outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        "Correct!".to_owned()
    } else {
        format!("Wrong! The answer was: {}", outcome.correct_answer)
    }
}

pub fn fetch_error(message: &str) -> String {
    format!("Could not load questions: {message}\n  [r] Retry\n  [m] Menu")
}

/// `final_score` (already saved as the newest entry) beats every earlier run.
pub fn is_new_best(final_score: u32, board: &Leaderboard) -> bool {
    let previous_best = board.scores().iter().skip(1).copied().max();
    final_score > 0 && previous_best.is_none_or(|best| final_score > best)
}

pub fn game_over(final_score: u32, board: &Leaderboard) -> String {
    let mut out = format!("=== GAME OVER ===\nFinal score: {final_score}\n");
    if is_new_best(final_score, board) {
        out.push_str("New best score!\n");
    }
    out.push('\n');
    out.push_str(&leaderboard(board));
    out.push_str("\n  [r] Restart\n  [m] Menu");
    out
}

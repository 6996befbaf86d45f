//! Single-player session: health, score, question batches and the screen flow.

use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    batch::{Batch, PreparedQuestion},
    leaderboard::Leaderboard,
    rules::GameRules,
    state_machine::{InvalidTransition, View, ViewEvent, ViewStateMachine},
};
use crate::dao::{models::TriviaQuestion, trivia_source::TriviaResult};

/// Handle for one batch request.
///
/// The caller performs the request for [`FetchTicket::amount`] questions and
/// hands the result back through [`GameSession::complete_fetch`] together with
/// the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    request: u64,
    amount: u32,
}

impl FetchTicket {
    /// Number of questions to request.
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Session generation the request belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Progress of the batch fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing in flight.
    Idle,
    /// Waiting for the batch described by the ticket.
    Loading(FetchTicket),
    /// The last fetch failed; [`GameSession::retry_fetch`] issues a new one.
    Failed { message: String },
}

/// Result of handing a fetch result back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new batch is installed and play can continue.
    Loaded { questions: usize },
    /// The session now shows a retry-capable error.
    Failed { message: String },
    /// The ticket no longer matches the session; the result was dropped.
    Stale,
}

/// What the caller has to do after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Show the next question of the current batch.
    NextQuestion,
    /// The batch is used up; fetch another one with this ticket.
    FetchBatch(FetchTicket),
    /// Health ran out; the score has been recorded.
    GameOver { final_score: u32 },
}

/// Result of [`GameSession::handle_answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Decoded correct answer of the question just played.
    pub correct_answer: String,
    pub health: i32,
    pub score: u32,
    pub next: NextStep,
}

/// Operations rejected by the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error("no run in progress (current view: {0:?})")]
    NotPlaying(View),
    #[error("a question batch is still loading")]
    Loading,
    #[error("no question is available")]
    NoQuestion,
    #[error("there is no failed fetch to retry")]
    NothingToRetry,
}

/// In-memory state of one player's game.
#[derive(Debug)]
pub struct GameSession {
    rules: GameRules,
    machine: ViewStateMachine,
    health: i32,
    score: u32,
    batch: Option<Batch>,
    fetch: FetchStatus,
    next_request: u64,
    leaderboard: Leaderboard,
    rng: StdRng,
}

impl GameSession {
    /// Create a session on the menu, shuffling answers with an OS-seeded generator.
    pub fn new(rules: GameRules, leaderboard: Leaderboard) -> Self {
        Self::with_rng(rules, leaderboard, StdRng::from_os_rng())
    }

    /// Create a session with an explicit random generator.
    pub fn with_rng(rules: GameRules, leaderboard: Leaderboard, rng: StdRng) -> Self {
        Self {
            rules,
            machine: ViewStateMachine::new(),
            health: rules.max_health,
            score: 0,
            batch: None,
            fetch: FetchStatus::Idle,
            next_request: 0,
            leaderboard,
            rng,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn view(&self) -> View {
        self.machine.view()
    }

    pub fn generation(&self) -> u64 {
        self.machine.generation()
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn fetch_status(&self) -> &FetchStatus {
        &self.fetch
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchStatus::Loading(_))
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Question awaiting an answer, if a batch is loaded and not exhausted.
    pub fn current_question(&self) -> Option<&PreparedQuestion> {
        self.batch.as_ref().and_then(Batch::current)
    }

    /// Index of the current question inside its batch.
    pub fn current_index(&self) -> usize {
        self.batch.as_ref().map_or(0, Batch::index)
    }

    /// Size of the loaded batch (0 when none).
    pub fn batch_len(&self) -> usize {
        self.batch.as_ref().map_or(0, Batch::len)
    }

    pub fn open_about(&mut self) -> Result<View, SessionError> {
        Ok(self.machine.apply(ViewEvent::OpenAbout)?)
    }

    pub fn close_about(&mut self) -> Result<View, SessionError> {
        Ok(self.machine.apply(ViewEvent::CloseAbout)?)
    }

    /// Start a run from the menu and request its first batch.
    pub fn start_game(&mut self) -> Result<FetchTicket, SessionError> {
        self.machine.apply(ViewEvent::StartGame)?;
        Ok(self.begin_run())
    }

    /// Start a new run from the game-over screen.
    pub fn restart(&mut self) -> Result<FetchTicket, SessionError> {
        self.machine.apply(ViewEvent::Restart)?;
        Ok(self.begin_run())
    }

    /// Abandon the current run or leave the game-over screen.
    ///
    /// Fetches still in flight become stale.
    pub fn back_to_menu(&mut self) -> Result<View, SessionError> {
        let view = self.machine.apply(ViewEvent::BackToMenu)?;
        self.batch = None;
        self.fetch = FetchStatus::Idle;
        Ok(view)
    }

    /// Issue a new ticket after a failed fetch.
    pub fn retry_fetch(&mut self) -> Result<FetchTicket, SessionError> {
        self.ensure_playing()?;
        match self.fetch {
            FetchStatus::Failed { .. } => Ok(self.fetch_batch()),
            FetchStatus::Loading(_) => Err(SessionError::Loading),
            FetchStatus::Idle => Err(SessionError::NothingToRetry),
        }
    }

    /// Hand the result of the request described by `ticket` back to the session.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: TriviaResult<Vec<TriviaQuestion>>,
    ) -> FetchOutcome {
        let pending = matches!(&self.fetch, FetchStatus::Loading(expected) if *expected == ticket);
        if !pending
            || ticket.generation != self.machine.generation()
            || self.view() != View::Game
        {
            debug!(
                ticket_generation = ticket.generation,
                generation = self.machine.generation(),
                "discarding stale batch"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(questions) => match Batch::prepare(questions, &mut self.rng) {
                Some(batch) => {
                    let questions = batch.len();
                    self.batch = Some(batch);
                    self.fetch = FetchStatus::Idle;
                    debug!(questions, "batch loaded");
                    FetchOutcome::Loaded { questions }
                }
                None => self.fail_fetch("the trivia service returned no questions".into()),
            },
            Err(err) => self.fail_fetch(err.to_string()),
        }
    }

    /// Check `choice` against the current question and apply the consequences.
    pub fn handle_answer(&mut self, choice: &str) -> Result<AnswerOutcome, SessionError> {
        self.ensure_playing()?;
        if self.is_loading() {
            return Err(SessionError::Loading);
        }

        let (correct, correct_answer) = {
            let question = self.current_question().ok_or(SessionError::NoQuestion)?;
            (question.is_correct(choice), question.correct_answer.clone())
        };

        if correct {
            self.score = self.score.saturating_add(self.rules.score_per_correct);
        } else {
            self.health = (self.health - self.rules.damage_per_wrong).max(0);
            if self.health <= 0 {
                let final_score = self.finish_run()?;
                return Ok(AnswerOutcome {
                    correct,
                    correct_answer,
                    health: self.health,
                    score: self.score,
                    next: NextStep::GameOver { final_score },
                });
            }
        }

        let exhausted = self.batch.as_mut().is_none_or(Batch::advance);
        let next = if exhausted {
            self.machine.apply(ViewEvent::BatchExhausted)?;
            NextStep::FetchBatch(self.fetch_batch())
        } else {
            NextStep::NextQuestion
        };

        Ok(AnswerOutcome {
            correct,
            correct_answer,
            health: self.health,
            score: self.score,
            next,
        })
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        match self.view() {
            View::Game => Ok(()),
            other => Err(SessionError::NotPlaying(other)),
        }
    }

    fn begin_run(&mut self) -> FetchTicket {
        self.health = self.rules.max_health;
        self.score = 0;
        self.batch = None;
        info!(generation = self.machine.generation(), "run started");
        self.fetch_batch()
    }

    fn fetch_batch(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            generation: self.machine.generation(),
            request: self.next_request,
            amount: self.rules.batch_size,
        };
        self.next_request += 1;
        self.fetch = FetchStatus::Loading(ticket);
        ticket
    }

    fn fail_fetch(&mut self, message: String) -> FetchOutcome {
        warn!(error = %message, "failed to load question batch");
        self.fetch = FetchStatus::Failed {
            message: message.clone(),
        };
        FetchOutcome::Failed { message }
    }

    fn finish_run(&mut self) -> Result<u32, SessionError> {
        self.machine.apply(ViewEvent::Defeated)?;
        self.batch = None;
        self.fetch = FetchStatus::Idle;

        let final_score = self.score;
        if let Err(err) = self.leaderboard.save(final_score) {
            warn!(error = %err, final_score, "failed to persist leaderboard");
        }
        info!(final_score, "run finished");
        Ok(final_score)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::{dao::trivia_source::TriviaSourceError, game::local_storage::MemoryStorage};

    fn session(rules: GameRules) -> GameSession {
        let leaderboard = Leaderboard::load(Box::new(MemoryStorage::new()));
        GameSession::with_rng(rules, leaderboard, StdRng::seed_from_u64(11))
    }

    fn paris() -> TriviaQuestion {
        TriviaQuestion::new(
            "What is the capital of France?",
            "Paris",
            ["Lyon", "Nice", "Lille"],
        )
    }

    fn batch_of(n: usize) -> Vec<TriviaQuestion> {
        (0..n).map(|_| paris()).collect()
    }

    fn started(rules: GameRules, questions: Vec<TriviaQuestion>) -> GameSession {
        let mut session = session(rules);
        let ticket = session.start_game().unwrap();
        assert_eq!(
            session.complete_fetch(ticket, Ok(questions.clone())),
            FetchOutcome::Loaded {
                questions: questions.len()
            }
        );
        session
    }

    #[test]
    fn starts_on_menu_with_full_health() {
        let session = session(GameRules::hearts());
        assert_eq!(session.view(), View::Menu);
        assert_eq!(session.health(), 5);
        assert_eq!(session.score(), 0);
        assert!(!session.is_loading());
    }

    #[test]
    fn start_game_requests_a_batch_of_configured_size() {
        let mut session = session(GameRules::hearts());
        let ticket = session.start_game().unwrap();

        assert_eq!(session.view(), View::Game);
        assert_eq!(ticket.amount(), 5);
        assert!(session.is_loading());
        assert_eq!(session.current_question(), None);
    }

    #[test]
    fn wrong_answer_costs_health_and_keeps_playing() {
        let mut session = started(GameRules::hearts(), batch_of(1));

        let outcome = session.handle_answer("Lyon").unwrap();

        assert!(!outcome.correct);
        assert_eq!(outcome.correct_answer, "Paris");
        assert_eq!(session.health(), 4);
        assert_eq!(session.score(), 0);
        assert_eq!(session.view(), View::Game);
        assert!(matches!(outcome.next, NextStep::FetchBatch(_)));
    }

    #[test]
    fn correct_answer_scores_without_touching_health() {
        let mut session = started(GameRules::hearts(), batch_of(3));

        let outcome = session.handle_answer("Paris").unwrap();

        assert!(outcome.correct);
        assert_eq!(session.score(), 100);
        assert_eq!(session.health(), 5);
        assert_eq!(outcome.next, NextStep::NextQuestion);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn single_hp_wrong_answer_ends_the_run_and_records_score() {
        let mut session = started(GameRules::sudden_death(), batch_of(3));
        session.handle_answer("Paris").unwrap();
        session.handle_answer("Paris").unwrap();

        let outcome = session.handle_answer("Nice").unwrap();

        assert_eq!(outcome.next, NextStep::GameOver { final_score: 200 });
        assert_eq!(session.view(), View::GameOver);
        assert_eq!(session.health(), 0);
        assert_eq!(session.leaderboard().scores()[0], 200);
        assert_eq!(session.current_question(), None);
    }

    #[test]
    fn answering_is_rejected_outside_a_run() {
        let mut session = session(GameRules::classic());
        assert_eq!(
            session.handle_answer("Paris"),
            Err(SessionError::NotPlaying(View::Menu))
        );
    }

    #[test]
    fn answering_while_loading_is_rejected() {
        let mut session = session(GameRules::classic());
        session.start_game().unwrap();
        assert_eq!(session.handle_answer("Paris"), Err(SessionError::Loading));
    }

    #[test]
    fn exhausting_a_batch_issues_a_new_ticket() {
        let mut session = started(GameRules::hearts(), batch_of(2));
        session.handle_answer("Paris").unwrap();

        let outcome = session.handle_answer("Paris").unwrap();
        let NextStep::FetchBatch(ticket) = outcome.next else {
            panic!("expected a fetch, got {:?}", outcome.next);
        };
        assert!(session.is_loading());
        assert_eq!(session.current_index(), 2);

        assert_eq!(
            session.complete_fetch(ticket, Ok(batch_of(4))),
            FetchOutcome::Loaded { questions: 4 }
        );
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.batch_len(), 4);
        assert_eq!(session.score(), 200);
    }

    #[test]
    fn failed_fetch_is_retry_capable() {
        let mut session = session(GameRules::classic());
        let ticket = session.start_game().unwrap();

        let outcome = session.complete_fetch(
            ticket,
            Err(TriviaSourceError::upstream(503, "Upstream error: 503 Service Unavailable")),
        );

        assert_eq!(
            outcome,
            FetchOutcome::Failed {
                message: "Upstream error: 503 Service Unavailable".into()
            }
        );
        assert!(matches!(session.fetch_status(), FetchStatus::Failed { .. }));

        let retry = session.retry_fetch().unwrap();
        assert_ne!(retry, ticket);
        assert_eq!(
            session.complete_fetch(retry, Ok(batch_of(2))),
            FetchOutcome::Loaded { questions: 2 }
        );
    }

    #[test]
    fn empty_batch_counts_as_a_failure() {
        let mut session = session(GameRules::classic());
        let ticket = session.start_game().unwrap();

        assert!(matches!(
            session.complete_fetch(ticket, Ok(Vec::new())),
            FetchOutcome::Failed { .. }
        ));
        assert_eq!(session.retry_fetch().map(|t| t.amount()), Ok(10));
    }

    #[test]
    fn retry_without_failure_is_rejected() {
        let mut session = started(GameRules::classic(), batch_of(2));
        assert_eq!(session.retry_fetch(), Err(SessionError::NothingToRetry));
    }

    #[test]
    fn late_response_from_an_abandoned_run_is_discarded() {
        let mut session = session(GameRules::classic());
        let first = session.start_game().unwrap();
        session.back_to_menu().unwrap();
        let second = session.start_game().unwrap();

        assert_eq!(
            session.complete_fetch(first, Ok(batch_of(3))),
            FetchOutcome::Stale
        );
        assert!(session.is_loading());
        assert_eq!(
            session.complete_fetch(second, Ok(batch_of(1))),
            FetchOutcome::Loaded { questions: 1 }
        );
        assert_eq!(session.batch_len(), 1);
    }

    #[test]
    fn response_arriving_on_menu_is_discarded() {
        let mut session = session(GameRules::classic());
        let ticket = session.start_game().unwrap();
        session.back_to_menu().unwrap();

        assert_eq!(
            session.complete_fetch(ticket, Ok(batch_of(3))),
            FetchOutcome::Stale
        );
        assert_eq!(session.view(), View::Menu);
    }

    #[test]
    fn restart_resets_health_and_score() {
        let mut session = started(GameRules::hearts(), batch_of(10));
        session.handle_answer("Paris").unwrap();
        for _ in 0..5 {
            session.handle_answer("Lille").unwrap();
        }
        assert_eq!(session.view(), View::GameOver);

        let ticket = session.restart().unwrap();

        assert_eq!(session.view(), View::Game);
        assert_eq!(session.health(), 5);
        assert_eq!(session.score(), 0);
        assert_eq!(ticket.generation(), session.generation());
        assert_eq!(session.leaderboard().scores(), &[100]);
    }

    #[test]
    fn restart_is_only_valid_after_game_over() {
        let mut session = started(GameRules::hearts(), batch_of(2));
        assert!(matches!(
            session.restart(),
            Err(SessionError::InvalidTransition(_))
        ));
    }

    #[test]
    fn about_page_round_trip() {
        let mut session = session(GameRules::classic());
        assert_eq!(session.open_about(), Ok(View::About));
        assert!(session.start_game().is_err());
        assert_eq!(session.close_about(), Ok(View::Menu));
    }

    #[test]
    fn damage_larger_than_health_clamps_to_zero() {
        let rules = GameRules {
            max_health: 15,
            damage_per_wrong: 10,
            ..GameRules::classic()
        };
        let mut session = started(rules, batch_of(5));
        session.handle_answer("Lyon").unwrap();
        let outcome = session.handle_answer("Lyon").unwrap();

        assert_eq!(outcome.health, 0);
        assert_eq!(session.view(), View::GameOver);
    }

    #[test]
    fn score_never_drops_and_health_never_rises() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let mut session = started(GameRules::hearts(), batch_of(3));
            let (mut health, mut score) = (session.health(), session.score());

            for _ in 0..40 {
                if session.view() != View::Game {
                    break;
                }
                let pending = match session.fetch_status() {
                    FetchStatus::Loading(ticket) => Some(*ticket),
                    _ => None,
                };
                if let Some(ticket) = pending {
                    session.complete_fetch(ticket, Ok(batch_of(3)));
                }
                let choice = if rng.random_bool(0.5) { "Paris" } else { "Lyon" };
                let outcome = session.handle_answer(choice).unwrap();

                assert!(outcome.score >= score);
                assert!(outcome.health <= health);
                if outcome.correct {
                    assert_eq!(outcome.health, health);
                } else {
                    assert!(outcome.health < health);
                }
                assert_eq!(
                    session.view() == View::GameOver,
                    outcome.health <= 0,
                    "game over must coincide with health reaching zero"
                );
                health = outcome.health;
                score = outcome.score;
            }
        }
    }
}

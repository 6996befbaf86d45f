//! Terminal client for Trivia-RPG. Questions come through the proxy server.

mod screens;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trivia_rpg::{
    config::AppConfig,
    dao::trivia_source::{ProxyQuestionSource, QuestionSource, api_base_url},
    game::{FetchStatus, FetchTicket, GameSession, Leaderboard, LocalStorage, NextStep, View},
};

use screens::MenuChoice;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let source = ProxyQuestionSource::new(api_base_url()).context("building proxy client")?;
    let leaderboard = Leaderboard::load(Box::new(LocalStorage::open_default()));

    let mut client = Client {
        session: GameSession::new(config.rules, leaderboard),
        source: Arc::new(source),
        input: BufReader::new(tokio::io::stdin()).lines(),
    };
    client.run().await
}

struct Client {
    session: GameSession,
    source: Arc<dyn QuestionSource>,
    input: Lines<BufReader<Stdin>>,
}

impl Client {
    async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let keep_going = match self.session.view() {
                View::Menu => self.menu().await?,
                View::About => self.about().await?,
                View::Game => self.game().await?,
                View::GameOver => self.game_over().await?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    /// Next trimmed input line; `None` once stdin is closed.
    async fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let line = self.input.next_line().await.context("reading stdin")?;
        Ok(line.map(|line| line.trim().to_owned()))
    }

    async fn menu(&mut self) -> anyhow::Result<bool> {
        println!("\n{}", screens::MENU);
        let Some(line) = self.read_line().await? else {
            return Ok(false);
        };

        match screens::parse_menu(&line) {
            Some(MenuChoice::Start) => {
                self.session.start_game()?;
            }
            Some(MenuChoice::About) => {
                self.session.open_about()?;
            }
            Some(MenuChoice::Leaderboard) => {
                println!("\n{}", screens::leaderboard(self.session.leaderboard()));
            }
            Some(MenuChoice::Quit) => return Ok(false),
            None => println!("Unknown option `{line}`."),
        }
        Ok(true)
    }

    async fn about(&mut self) -> anyhow::Result<bool> {
        println!("\n{}", screens::ABOUT);
        if self.read_line().await?.is_none() {
            return Ok(false);
        }
        self.session.close_about()?;
        Ok(true)
    }

    async fn game(&mut self) -> anyhow::Result<bool> {
        match self.session.fetch_status().clone() {
            FetchStatus::Loading(ticket) => {
                self.load(ticket).await;
                Ok(true)
            }
            FetchStatus::Failed { message } => self.fetch_failed(&message).await,
            FetchStatus::Idle => self.ask().await,
        }
    }

    async fn load(&mut self, ticket: FetchTicket) {
        println!("\n{}", screens::LOADING);
        let result = self.source.fetch_questions(ticket.amount()).await;
        self.session.complete_fetch(ticket, result);
    }

    async fn fetch_failed(&mut self, message: &str) -> anyhow::Result<bool> {
        println!("\n{}", screens::fetch_error(message));
        let Some(line) = self.read_line().await? else {
            return Ok(false);
        };

        match line.to_ascii_lowercase().as_str() {
            "r" | "retry" => {
                self.session.retry_fetch()?;
            }
            "m" | "menu" => {
                self.session.back_to_menu()?;
            }
            _ => println!("Type `r` to retry or `m` for the menu."),
        }
        Ok(true)
    }

    async fn ask(&mut self) -> anyhow::Result<bool> {
        let answers = match self.session.current_question() {
            Some(question) => question.answers.clone(),
            None => {
                // Idle with nothing to ask: the batch is gone, go back to the menu.
                self.session.back_to_menu()?;
                return Ok(true);
            }
        };

        println!("\n{}", screens::question(&self.session));
        let Some(line) = self.read_line().await? else {
            return Ok(false);
        };

        if line.eq_ignore_ascii_case("m") {
            self.session.back_to_menu()?;
            return Ok(true);
        }

        let Some(index) = screens::parse_answer(&line, answers.len()) else {
            println!("Pick an answer between 1 and {}.", answers.len());
            return Ok(true);
        };

        let outcome = self.session.handle_answer(&answers[index])?;
        println!("{}", screens::feedback(&outcome));
        if let NextStep::GameOver { final_score } = outcome.next {
            tracing::info!(final_score, "run finished");
        }
        Ok(true)
    }

    async fn game_over(&mut self) -> anyhow::Result<bool> {
        println!(
            "\n{}",
            screens::game_over(self.session.score(), self.session.leaderboard())
        );
        let Some(line) = self.read_line().await? else {
            return Ok(false);
        };

        match line.to_ascii_lowercase().as_str() {
            "r" | "restart" => {
                self.session.restart()?;
            }
            "m" | "menu" => {
                self.session.back_to_menu()?;
            }
            _ => println!("Type `r` to restart or `m` for the menu."),
        }
        Ok(true)
    }
}

/// Log to stderr, quiet by default so the game screen stays readable.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! Question batches prepared for display.

use rand::{Rng, seq::SliceRandom};

use crate::dao::models::TriviaQuestion;

/// Decode HTML entities (`&quot;`, `&#039;`, `&eacute;`, ...) found in upstream text.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// A question with decoded text and its answers already in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuestion {
    pub prompt: String,
    pub correct_answer: String,
    /// Correct and incorrect answers combined, shuffled once.
    pub answers: Vec<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl PreparedQuestion {
    /// Decode `question` and shuffle its answers with `rng`.
    pub fn prepare<R: Rng + ?Sized>(question: TriviaQuestion, rng: &mut R) -> Self {
        let correct_answer = decode_entities(&question.correct_answer);
        let mut answers = Vec::with_capacity(question.incorrect_answers.len() + 1);
        answers.push(correct_answer.clone());
        answers.extend(question.incorrect_answers.iter().map(|a| decode_entities(a)));
        answers.shuffle(rng);

        Self {
            prompt: decode_entities(&question.question),
            correct_answer,
            answers,
            category: question.category.as_deref().map(decode_entities),
            difficulty: question.difficulty,
        }
    }

    /// Exact string comparison against the decoded correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}

/// Ordered set of questions fetched in one request, with a cursor on the current one.
#[derive(Debug, Clone)]
pub struct Batch {
    questions: Vec<PreparedQuestion>,
    cursor: usize,
}

impl Batch {
    /// Prepare every question; returns `None` for an empty batch.
    pub fn prepare<R: Rng + ?Sized>(questions: Vec<TriviaQuestion>, rng: &mut R) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }

        let questions = questions
            .into_iter()
            .map(|q| PreparedQuestion::prepare(q, &mut *rng))
            .collect();

        Some(Self {
            questions,
            cursor: 0,
        })
    }

    /// The question on screen, or `None` once every question was answered.
    pub fn current(&self) -> Option<&PreparedQuestion> {
        self.questions.get(self.cursor)
    }

    /// Index of the current question, in `0..=len`.
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Move to the next question; returns `true` when the batch is now exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.questions.len() {
            self.cursor += 1;
        }
        self.is_exhausted()
    }
}

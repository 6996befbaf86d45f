use thiserror::Error;

/// Screens a session can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Title screen; the initial view.
    Menu,
    /// Static "how to play" page reachable from the menu.
    About,
    /// A run is in progress.
    Game,
    /// Health reached zero; the final score is on screen.
    GameOver,
}

/// Events that can be applied to the view state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Open the about page from the menu.
    OpenAbout,
    /// Return from the about page to the menu.
    CloseAbout,
    /// Begin a fresh run from the menu.
    StartGame,
    /// Begin a fresh run from the game-over screen.
    Restart,
    /// Every question of the current batch was answered; another batch is needed.
    BatchExhausted,
    /// Health dropped to zero or below.
    Defeated,
    /// Leave a run (or the game-over screen) for the menu.
    BackToMenu,
}

impl ViewEvent {
    /// Whether applying this event invalidates fetches issued before it.
    fn starts_new_generation(self) -> bool {
        matches!(
            self,
            ViewEvent::StartGame | ViewEvent::Restart | ViewEvent::BackToMenu
        )
    }
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The view the state machine was in when the invalid event was received.
    pub from: View,
    /// The event that cannot be applied from this view.
    pub event: ViewEvent,
}

/// State machine for the screen flow of a single player.
///
/// The generation counter increases every time a run starts or is abandoned;
/// batch fetches are tagged with it so late responses can be recognised.
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    view: View,
    generation: u64,
}

impl Default for ViewStateMachine {
    fn default() -> Self {
        Self {
            view: View::Menu,
            generation: 0,
        }
    }
}

impl ViewStateMachine {
    /// Create a new state machine on the menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply `event`, returning the new view.
    pub fn apply(&mut self, event: ViewEvent) -> Result<View, InvalidTransition> {
        let next = self.compute_transition(event)?;
        if event.starts_new_generation() {
            self.generation += 1;
        }
        self.view = next;
        Ok(next)
    }

    fn compute_transition(&self, event: ViewEvent) -> Result<View, InvalidTransition> {
        let next = match (self.view, event) {
            (View::Menu, ViewEvent::OpenAbout) => View::About,
            (View::About, ViewEvent::CloseAbout) => View::Menu,
            (View::Menu, ViewEvent::StartGame) => View::Game,
            (View::GameOver, ViewEvent::Restart) => View::Game,
            (View::Game, ViewEvent::BatchExhausted) => View::Game,
            (View::Game, ViewEvent::Defeated) => View::GameOver,
            (View::Game | View::GameOver, ViewEvent::BackToMenu) => View::Menu,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}

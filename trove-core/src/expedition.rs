//! The expedition driver.
//!
//! Runs the fixed plan one step at a time: awaits the story operation,
//! records the result into history when the step persists, saves the whole
//! session record, and accumulates the waypoint for the map display. The
//! first failure stops the run; nothing already applied is rolled back.

use crate::map::{MapError, TreasureMap};
use crate::path::Waypoint;
use crate::plan::{expedition_plan, Landmark, Step, StepAction, PLAN_LEN};
use crate::state::SessionState;
use crate::store::{StateStore, StoreError};
use thiserror::Error;

/// Shown once every step has succeeded. Never persisted to history.
pub const VICTORY_MESSAGE: &str =
    "The treasure hunt is complete. Congratulations, you are a legendary explorer!";

/// Shown after a failed run.
pub const CONSOLATION_MESSAGE: &str =
    "The hunt was hard, but courage and wisdom will lead you to new adventures.";

/// Errors from expedition operations.
#[derive(Debug, Error)]
pub enum ExpeditionError {
    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("please enter a valid player name")]
    InvalidName,

    #[error("an expedition is already underway")]
    AlreadyRunning,
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

/// Result of advancing the expedition by one step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Story text produced by the step.
    pub message: String,
    /// Where the hunter moved.
    pub waypoint: Waypoint,
    /// Landmark revealed at the waypoint, if any.
    pub landmark: Option<Landmark>,
    /// 0-based index of the step within the plan.
    pub index: usize,
    /// Whether the result was appended to persisted history.
    pub recorded: bool,
}

/// The narrative driver.
///
/// Owns the session state for the duration of a session and coordinates
/// story operations, persistence, and waypoint accumulation. There is
/// exactly one mutator: a run in progress rejects a second trigger with
/// [`ExpeditionError::AlreadyRunning`].
pub struct Expedition<M> {
    map: M,
    store: StateStore,
    state: SessionState,
    run_state: RunState,
    step_index: usize,
    waypoints: Vec<Waypoint>,
    carry: String,
    keys: Vec<String>,
}

impl<M: TreasureMap> Expedition<M> {
    /// Create a driver, restoring any previously saved session state.
    pub async fn new(map: M, store: StateStore) -> Result<Self, ExpeditionError> {
        let state = store.load().await?;
        if !state.history.is_empty() {
            tracing::debug!(entries = state.history.len(), "restored saved session");
        }

        Ok(Self {
            map,
            store,
            state,
            run_state: RunState::Idle,
            step_index: 0,
            waypoints: Vec::new(),
            carry: String::new(),
            keys: Vec::new(),
        })
    }

    /// Validate and record the player name, persisting the session.
    ///
    /// An empty or whitespace-only name is rejected without touching state
    /// or the store. Returns the welcome message on success.
    pub async fn login(&mut self, name: &str) -> Result<String, ExpeditionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpeditionError::InvalidName);
        }

        self.state.player_name = name.to_string();
        self.store.save(&self.state).await?;
        tracing::debug!(player = name, "player logged in");

        Ok(format!("Welcome, {name}! Ready to start the adventure?"))
    }

    /// Arm a new run.
    ///
    /// Rejected while a run is active. Starting over a Completed or Failed
    /// run begins a fresh sequence; history keeps growing, waypoints start
    /// empty.
    pub fn begin(&mut self) -> Result<(), ExpeditionError> {
        if self.run_state == RunState::Running {
            return Err(ExpeditionError::AlreadyRunning);
        }

        self.run_state = RunState::Running;
        self.step_index = 0;
        self.waypoints.clear();
        self.carry.clear();
        self.keys.clear();
        tracing::debug!("expedition started");
        Ok(())
    }

    /// Execute the next step of the plan.
    ///
    /// Returns `Ok(Some(outcome))` per completed step, `Ok(None)` once the
    /// plan is exhausted (transitioning to Completed), and the failing
    /// error after transitioning to Failed. Not running means nothing to
    /// do.
    pub async fn advance(&mut self) -> Result<Option<StepOutcome>, ExpeditionError> {
        if self.run_state != RunState::Running {
            return Ok(None);
        }

        let plan = expedition_plan();
        let Some(step) = plan.get(self.step_index).copied() else {
            self.run_state = RunState::Completed;
            tracing::debug!("expedition completed");
            return Ok(None);
        };

        match self.run_step(&step).await {
            Ok(outcome) => {
                self.step_index += 1;
                Ok(Some(outcome))
            }
            Err(e) => {
                self.run_state = RunState::Failed;
                tracing::warn!(step = self.step_index, "expedition failed: {e}");
                Err(e)
            }
        }
    }

    async fn run_step(&mut self, step: &Step) -> Result<StepOutcome, ExpeditionError> {
        let message = match step.action {
            StepAction::InitialClue => self.map.initial_clue().await?,
            StepAction::DecodeScript => self.map.decode_script(&self.carry).await?,
            StepAction::SearchLocation => self.map.search_location(&self.carry).await?,
            StepAction::SolvePuzzle => self.map.solve_puzzle(&self.carry).await?,
            StepAction::FindKey(place) => {
                let key = self.map.find_key(place).await?;
                self.keys.push(key.clone());
                key
            }
            StepAction::CombineKeys => {
                let keys: &[String; 3] = self
                    .keys
                    .as_slice()
                    .try_into()
                    .map_err(|_| MapError::Failed("the three keys are not all in hand".to_string()))?;
                self.map.combine_keys(keys).await?
            }
            StepAction::OpenContainer => self.map.open_container().await?,
        };

        self.carry = message.clone();

        if step.record {
            self.state.history.push(message.clone());
            self.store.save(&self.state).await?;
        }

        self.waypoints.push(step.waypoint);

        Ok(StepOutcome {
            message,
            waypoint: step.waypoint,
            landmark: step.landmark,
            index: self.step_index,
            recorded: step.record,
        })
    }

    /// Wipe the persisted record, reset in-memory history, and discard the
    /// current run's waypoints.
    pub async fn clear(&mut self) -> Result<(), ExpeditionError> {
        self.store.clear().await?;
        self.state.history.clear();
        self.waypoints.clear();
        self.run_state = RunState::Idle;
        self.step_index = 0;
        self.carry.clear();
        self.keys.clear();
        tracing::debug!("session reset");
        Ok(())
    }

    /// Current run lifecycle state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// The session state owned by this driver.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The player name, empty before login.
    pub fn player_name(&self) -> &str {
        &self.state.player_name
    }

    /// Persisted narrative history, oldest first.
    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    /// Waypoints visited during the current run, in order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Steps remaining in the current run, [`PLAN_LEN`] when idle.
    pub fn steps_remaining(&self) -> usize {
        PLAN_LEN.saturating_sub(self.step_index)
    }
}

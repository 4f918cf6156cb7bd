//! Background worker owning the expedition.
//!
//! The TUI never touches the driver directly: requests go down one mpsc
//! channel, per-step updates come back up another. The worker processes
//! requests strictly in order, so a run in progress finishes (or fails)
//! before the next request is looked at.

use tokio::sync::mpsc;
use trove_core::{Expedition, StepOutcome, TreasureMap, CONSOLATION_MESSAGE, VICTORY_MESSAGE};

/// Requests from the UI to the worker.
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    /// Submit the player name.
    Login(String),
    /// Trigger a run.
    Start,
    /// Wipe the save and reset progress.
    Clear,
}

/// Updates from the worker to the UI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    /// Startup snapshot of previously persisted history.
    Restored { history: Vec<String> },
    /// Login accepted; the session is saved.
    LoggedIn { name: String, welcome: String },
    /// Login rejected; nothing was saved.
    LoginFailed { message: String },
    /// One step of the run finished.
    Step(StepOutcome),
    /// All nine steps succeeded.
    RunFinished { message: String },
    /// A step failed and the run stopped.
    RunFailed { error: String, consolation: String },
    /// The save was wiped and progress reset.
    Cleared,
    /// A request could not be honored.
    Rejected { message: String },
}

/// Run the worker until the request channel closes.
pub async fn run_worker<M: TreasureMap>(
    mut expedition: Expedition<M>,
    mut requests: mpsc::Receiver<WorkerRequest>,
    responses: mpsc::Sender<WorkerResponse>,
) {
    let restored = WorkerResponse::Restored {
        history: expedition.history().to_vec(),
    };
    if responses.send(restored).await.is_err() {
        return;
    }

    while let Some(request) = requests.recv().await {
        let closed = match request {
            WorkerRequest::Login(name) => handle_login(&mut expedition, &name, &responses).await,
            WorkerRequest::Start => handle_start(&mut expedition, &responses).await,
            WorkerRequest::Clear => handle_clear(&mut expedition, &responses).await,
        };
        if closed {
            return;
        }
    }
}

async fn handle_login<M: TreasureMap>(
    expedition: &mut Expedition<M>,
    name: &str,
    responses: &mpsc::Sender<WorkerResponse>,
) -> bool {
    let response = match expedition.login(name).await {
        Ok(welcome) => WorkerResponse::LoggedIn {
            name: expedition.player_name().to_string(),
            welcome,
        },
        Err(e) => WorkerResponse::LoginFailed {
            message: e.to_string(),
        },
    };
    responses.send(response).await.is_err()
}

async fn handle_start<M: TreasureMap>(
    expedition: &mut Expedition<M>,
    responses: &mpsc::Sender<WorkerResponse>,
) -> bool {
    if let Err(e) = expedition.begin() {
        let rejected = WorkerResponse::Rejected {
            message: e.to_string(),
        };
        return responses.send(rejected).await.is_err();
    }

    loop {
        let response = match expedition.advance().await {
            Ok(Some(outcome)) => WorkerResponse::Step(outcome),
            Ok(None) => WorkerResponse::RunFinished {
                message: VICTORY_MESSAGE.to_string(),
            },
            Err(e) => WorkerResponse::RunFailed {
                error: e.to_string(),
                consolation: CONSOLATION_MESSAGE.to_string(),
            },
        };

        let done = !matches!(response, WorkerResponse::Step(_));
        if responses.send(response).await.is_err() {
            return true;
        }
        if done {
            return false;
        }
    }
}

async fn handle_clear<M: TreasureMap>(
    expedition: &mut Expedition<M>,
    responses: &mpsc::Sender<WorkerResponse>,
) -> bool {
    let response = match expedition.clear().await {
        Ok(()) => WorkerResponse::Cleared,
        Err(e) => WorkerResponse::Rejected {
            message: e.to_string(),
        },
    };
    responses.send(response).await.is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use trove_core::testing::MockMap;
    use trove_core::{StateStore, PLAN_LEN};

    async fn spawn_worker(
        map: MockMap,
        dir: &TempDir,
    ) -> (mpsc::Sender<WorkerRequest>, mpsc::Receiver<WorkerResponse>) {
        let store = StateStore::new(dir.path());
        let expedition = Expedition::new(map, store).await.expect("create");
        let (request_tx, request_rx) = mpsc::channel(8);
        let (response_tx, response_rx) = mpsc::channel(64);
        tokio::spawn(run_worker(expedition, request_rx, response_tx));
        (request_tx, response_rx)
    }

    #[tokio::test]
    async fn test_full_run_streams_nine_steps_then_victory() {
        let dir = TempDir::new().expect("temp dir");
        let (tx, mut rx) = spawn_worker(MockMap::new(), &dir).await;

        assert!(matches!(
            rx.recv().await.unwrap(),
            WorkerResponse::Restored { .. }
        ));

        tx.send(WorkerRequest::Login("Mara".to_string()))
            .await
            .unwrap();
        assert!(matches!(
            rx.recv().await.unwrap(),
            WorkerResponse::LoggedIn { .. }
        ));

        tx.send(WorkerRequest::Start).await.unwrap();
        let mut steps = 0;
        loop {
            match rx.recv().await.unwrap() {
                WorkerResponse::Step(_) => steps += 1,
                WorkerResponse::RunFinished { message } => {
                    assert_eq!(message, VICTORY_MESSAGE);
                    break;
                }
                other => panic!("unexpected response: {other:?}"),
            }
        }
        assert_eq!(steps, PLAN_LEN);
    }

    #[tokio::test]
    async fn test_failed_run_reports_error_then_consolation() {
        let dir = TempDir::new().expect("temp dir");
        // The fifth operation is the first find-key.
        let (tx, mut rx) = spawn_worker(MockMap::failing_at(4), &dir).await;
        rx.recv().await.unwrap();

        tx.send(WorkerRequest::Start).await.unwrap();
        let mut steps = 0;
        loop {
            match rx.recv().await.unwrap() {
                WorkerResponse::Step(_) => steps += 1,
                WorkerResponse::RunFailed { consolation, .. } => {
                    assert_eq!(consolation, CONSOLATION_MESSAGE);
                    break;
                }
                other => panic!("unexpected response: {other:?}"),
            }
        }
        assert_eq!(steps, 4);
    }

    #[tokio::test]
    async fn test_blank_login_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let (tx, mut rx) = spawn_worker(MockMap::new(), &dir).await;
        rx.recv().await.unwrap();

        tx.send(WorkerRequest::Login("   ".to_string()))
            .await
            .unwrap();
        assert!(matches!(
            rx.recv().await.unwrap(),
            WorkerResponse::LoginFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_clear_responds_cleared() {
        let dir = TempDir::new().expect("temp dir");
        let (tx, mut rx) = spawn_worker(MockMap::new(), &dir).await;
        rx.recv().await.unwrap();

        tx.send(WorkerRequest::Clear).await.unwrap();
        assert!(matches!(rx.recv().await.unwrap(), WorkerResponse::Cleared));
    }
}

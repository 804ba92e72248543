use std::io;
use std::sync::mpsc;
use std::thread;

use engine_logging::engine_debug;

use crate::config::SessionConfig;
use crate::error::ClientError;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::session::MiiverseSession;
use crate::types::{ActivityResponse, PostResponse};

pub type RequestId = u64;

enum SessionCommand {
    Post { request_id: RequestId, id: String },
    Activity { request_id: RequestId },
    SignOut { request_id: RequestId },
}

#[derive(Debug)]
pub enum SessionEvent {
    PostLoaded {
        request_id: RequestId,
        result: Result<PostResponse, ClientError>,
    },
    ActivityLoaded {
        request_id: RequestId,
        result: Result<ActivityResponse, ClientError>,
    },
    SignedOut {
        request_id: RequestId,
        result: Result<(), ClientError>,
    },
}

/// Runs a session on a worker thread for hosts without an async runtime.
///
/// Commands are processed in the order they were sent. Dropping the handle
/// closes the command channel, which closes the session and ends the worker.
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
    event_rx: mpsc::Receiver<SessionEvent>,
}

impl SessionHandle {
    pub fn new(config: SessionConfig) -> io::Result<Self> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone());
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher<F>(config: SessionConfig, fetcher: F) -> io::Result<Self>
    where
        F: Fetcher + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let session = MiiverseSession::with_fetcher(config, fetcher);

        thread::Builder::new()
            .name("miiverse-session".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event = runtime.block_on(handle_command(&session, command));
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                session.close();
                engine_debug!("session worker stopped");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn request_post(&self, request_id: RequestId, id: impl Into<String>) {
        let _ = self.cmd_tx.send(SessionCommand::Post {
            request_id,
            id: id.into(),
        });
    }

    pub fn request_activity(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(SessionCommand::Activity { request_id });
    }

    pub fn sign_out(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(SessionCommand::SignOut { request_id });
    }

    pub fn try_recv(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<SessionEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command<F: Fetcher>(
    session: &MiiverseSession<F>,
    command: SessionCommand,
) -> SessionEvent {
    match command {
        SessionCommand::Post { request_id, id } => SessionEvent::PostLoaded {
            request_id,
            result: session.get_post(&id).await,
        },
        SessionCommand::Activity { request_id } => SessionEvent::ActivityLoaded {
            request_id,
            result: session.get_activity().await,
        },
        SessionCommand::SignOut { request_id } => SessionEvent::SignedOut {
            request_id,
            result: session.sign_out().await,
        },
    }
}

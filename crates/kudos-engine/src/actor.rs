// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-owner engine task and its cloneable handle.
//!
//! The [`Engine`] lives inside one tokio task that processes requests one at
//! a time, write-through included. Handlers talk to it through
//! [`EngineHandle`]: each request carries a `oneshot` sender for its reply.
//! The task exits once every handle has been dropped.

use kudos_core::{Applied, EarnSignal, KudosError, PictureEntry, PointsRecord};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::engine::Engine;

/// Bound on queued requests before senders wait.
const REQUEST_QUEUE_DEPTH: usize = 256;

type Reply<T> = oneshot::Sender<T>;

/// A request to the engine task.
enum Request {
    Earn {
        user_id: String,
        signal: EarnSignal,
        reply: Reply<Applied<i64>>,
    },
    Balance {
        user_id: String,
        reply: Reply<Result<i64, KudosError>>,
    },
    Transfer {
        from: String,
        to: String,
        amount: i64,
        reply: Reply<Result<Applied<()>, KudosError>>,
    },
    Standings {
        reply: Reply<Vec<PointsRecord>>,
    },
    Submit {
        media_url: String,
        caption: String,
        reply: Reply<Result<Applied<PictureEntry>, KudosError>>,
    },
    FindByCaption {
        caption: String,
        reply: Reply<Result<Applied<PictureEntry>, KudosError>>,
    },
    SelectLeastShown {
        reply: Reply<Result<Applied<PictureEntry>, KudosError>>,
    },
    NextRotation {
        reply: Reply<Result<PictureEntry, KudosError>>,
    },
    ListCaptions {
        reply: Reply<Vec<String>>,
    },
    TopByAppearances {
        n: usize,
        reply: Reply<Vec<PictureEntry>>,
    },
}

/// Cloneable handle to the engine task.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<Request>,
}

/// Spawns the engine task and returns a handle to it.
pub fn spawn(engine: Engine) -> (EngineHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
    let task = tokio::spawn(run(engine, rx));
    (EngineHandle { tx }, task)
}

async fn run(mut engine: Engine, mut rx: mpsc::Receiver<Request>) {
    while let Some(request) = rx.recv().await {
        // A dropped reply receiver only means the caller stopped waiting.
        match request {
            Request::Earn {
                user_id,
                signal,
                reply,
            } => {
                let _ = reply.send(engine.earn(&user_id, signal).await);
            }
            Request::Balance { user_id, reply } => {
                let _ = reply.send(engine.balance(&user_id));
            }
            Request::Transfer {
                from,
                to,
                amount,
                reply,
            } => {
                let _ = reply.send(engine.transfer(&from, &to, amount).await);
            }
            Request::Standings { reply } => {
                let _ = reply.send(engine.standings());
            }
            Request::Submit {
                media_url,
                caption,
                reply,
            } => {
                let _ = reply.send(engine.submit(&media_url, &caption).await);
            }
            Request::FindByCaption { caption, reply } => {
                let _ = reply.send(engine.find_by_caption(&caption).await);
            }
            Request::SelectLeastShown { reply } => {
                let _ = reply.send(engine.select_least_shown().await);
            }
            Request::NextRotation { reply } => {
                let _ = reply.send(engine.next_rotation());
            }
            Request::ListCaptions { reply } => {
                let _ = reply.send(engine.list_captions_sorted());
            }
            Request::TopByAppearances { n, reply } => {
                let _ = reply.send(engine.top_by_appearances(n));
            }
        }
    }
    debug!("all engine handles dropped, engine task stopping");
}

fn stopped() -> KudosError {
    KudosError::Internal("engine task stopped".to_string())
}

impl EngineHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> Request,
    ) -> Result<T, KudosError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(build(reply)).await.map_err(|_| {
            warn!("engine request dropped: task is gone");
            stopped()
        })?;
        rx.await.map_err(|_| stopped())
    }

    /// Awards points for `signal`. Returns the new balance.
    pub async fn earn(&self, user_id: &str, signal: EarnSignal) -> Result<Applied<i64>, KudosError> {
        let user_id = user_id.to_string();
        self.request(|reply| Request::Earn {
            user_id,
            signal,
            reply,
        })
        .await
    }

    pub async fn balance(&self, user_id: &str) -> Result<i64, KudosError> {
        let user_id = user_id.to_string();
        self.request(|reply| Request::Balance { user_id, reply })
            .await?
    }

    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<Applied<()>, KudosError> {
        let (from, to) = (from.to_string(), to.to_string());
        self.request(|reply| Request::Transfer {
            from,
            to,
            amount,
            reply,
        })
        .await?
    }

    /// Every balance, highest first.
    pub async fn standings(&self) -> Result<Vec<PointsRecord>, KudosError> {
        self.request(|reply| Request::Standings { reply }).await
    }

    pub async fn submit(
        &self,
        media_url: &str,
        caption: &str,
    ) -> Result<Applied<PictureEntry>, KudosError> {
        let (media_url, caption) = (media_url.to_string(), caption.to_string());
        self.request(|reply| Request::Submit {
            media_url,
            caption,
            reply,
        })
        .await?
    }

    pub async fn find_by_caption(&self, caption: &str) -> Result<Applied<PictureEntry>, KudosError> {
        let caption = caption.to_string();
        self.request(|reply| Request::FindByCaption { caption, reply })
            .await?
    }

    pub async fn select_least_shown(&self) -> Result<Applied<PictureEntry>, KudosError> {
        self.request(|reply| Request::SelectLeastShown { reply })
            .await?
    }

    pub async fn next_rotation(&self) -> Result<PictureEntry, KudosError> {
        self.request(|reply| Request::NextRotation { reply }).await?
    }

    pub async fn list_captions_sorted(&self) -> Result<Vec<String>, KudosError> {
        self.request(|reply| Request::ListCaptions { reply }).await
    }

    pub async fn top_by_appearances(&self, n: usize) -> Result<Vec<PictureEntry>, KudosError> {
        self.request(|reply| Request::TopByAppearances { n, reply })
            .await
    }
}

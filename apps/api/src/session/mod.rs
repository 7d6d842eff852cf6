//! In-memory editing sessions. Each session exclusively owns one `Document`.
//!
//! Nothing is persisted: ending a session (or stopping the process) destroys
//! the document. All mutations run inside a single lock scope.

pub mod handlers;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Document;

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub document: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Opens a session around a fresh blank document.
    pub async fn create(&self) -> Result<Session, AppError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::SessionLimit(self.max_sessions));
        }

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            document: Document::new(),
            created_at: now,
            updated_at: now,
        };
        sessions.insert(session.id, session.clone());

        info!("Opened session {} ({} active)", session.id, sessions.len());
        Ok(session)
    }

    /// Returns a copy of the session for read-only work (preview, export).
    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Applies `edit` to the session's document and returns its result together
    /// with the updated session.
    pub async fn edit<R>(
        &self,
        id: Uuid,
        edit: impl FnOnce(&mut Document) -> R,
    ) -> Result<(R, Session), AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;

        let outcome = edit(&mut session.document);
        session.updated_at = Utc::now();

        debug!("Edited document in session {id}");
        Ok((outcome, session.clone()))
    }

    pub async fn end(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(&id).ok_or_else(|| not_found(id))?;
        info!("Closed session {id} ({} active)", sessions.len());
        Ok(())
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

//! Editing session over one store's design document.
//!
//! Phases run `Loading -> Ready <-> Saving -> Ready`. Load failures fall back to
//! a reconciled default document and leave a notice; save failures keep the
//! session dirty and leave a notice. Nothing here retries on its own.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::document::{DesignDocument, GlobalStyle, SectionStyleOverride};
use super::ordering::{self, Direction, EditError};
use super::profile::StoreProfile;
use super::reconcile::reconcile;
use super::render::{render, ContentBlock};
use super::store::{DesignStore, StoreError, StoreId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Loading,
    Ready,
    Saving,
}

/// Non-fatal condition the editor should surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionNotice {
    LoadFallback { reason: String },
    /// The stored design loaded, but parts of it were unreadable and reset.
    LoadRepaired { reason: String },
    SaveFailed { reason: String },
}

impl SessionNotice {
    pub fn message(&self) -> String {
        match self {
            Self::LoadFallback { reason } => {
                format!("保存済みのデザインを読み込めなかったため初期設定を表示しています ({reason})")
            }
            Self::LoadRepaired { reason } => {
                format!("保存済みのデザインの一部を読み込めなかったため初期設定に戻しました ({reason})")
            }
            Self::SaveFailed { reason } => format!("デザインの保存に失敗しました: {reason}"),
        }
    }
}

/// A single user edit. Applying one never mutates the previous document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DesignEdit {
    SetVisibility {
        section_id: String,
        visible: bool,
    },
    Move {
        section_id: String,
        direction: Direction,
    },
    Reorder {
        section_id: String,
        destination: usize,
    },
    UpdateSectionStyle {
        section_id: String,
        style: SectionStyleOverride,
    },
    UpdateGlobalStyle {
        global: GlobalStyle,
    },
}

impl DesignEdit {
    pub fn apply(&self, document: &DesignDocument) -> Result<DesignDocument, EditError> {
        match self {
            Self::SetVisibility {
                section_id,
                visible,
            } => ordering::set_visibility(document, section_id, *visible),
            Self::Move {
                section_id,
                direction,
            } => ordering::move_section(document, section_id, *direction),
            Self::Reorder {
                section_id,
                destination,
            } => ordering::reorder(document, section_id, *destination),
            Self::UpdateSectionStyle { section_id, style } => {
                ordering::update_section_style(document, section_id, style.clone())
            }
            Self::UpdateGlobalStyle { global } => {
                Ok(ordering::update_global_style(document, global.clone()))
            }
        }
    }
}

/// Snapshot handed to the persistence layer while a save is in flight.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    sequence: u64,
    revision: u64,
    document: DesignDocument,
}

impl SaveTicket {
    /// Position of this save among every save the session has started.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn document(&self) -> &DesignDocument {
        &self.document
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("design session is still loading")]
    NotReady,
    #[error("a save is already in flight")]
    SaveInFlight,
    #[error("save ticket does not match the save in flight")]
    UnknownTicket,
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("saving the design failed: {0}")]
    Save(#[from] StoreError),
}

#[derive(Debug)]
pub struct DesignSession {
    store_id: StoreId,
    phase: SessionPhase,
    document: DesignDocument,
    dirty: bool,
    revision: u64,
    saves_started: u64,
    in_flight: Option<u64>,
    notices: Vec<SessionNotice>,
}

impl DesignSession {
    /// A session waiting for its document; edits are rejected until
    /// [`DesignSession::finish_load`] runs.
    pub fn new(store_id: StoreId) -> Self {
        Self {
            store_id,
            phase: SessionPhase::Loading,
            document: reconcile(None),
            dirty: false,
            revision: 0,
            saves_started: 0,
            in_flight: None,
            notices: Vec::new(),
        }
    }

    /// Loads and reconciles the stored document in one step.
    pub fn load<S>(store_id: StoreId, store: &S) -> Self
    where
        S: DesignStore + ?Sized,
    {
        let outcome = store.load(&store_id);
        let mut session = Self::new(store_id);
        session.finish_load(outcome);
        session
    }

    pub fn finish_load(&mut self, outcome: Result<Option<Value>, StoreError>) {
        let stored = match outcome {
            Ok(Some(payload)) => match DesignDocument::decode(&payload) {
                Ok((document, report)) => {
                    if !report.is_clean() {
                        let reason = report.summary();
                        warn!(store_id = %self.store_id, %reason, "stored design partially unreadable");
                        self.notices.push(SessionNotice::LoadRepaired { reason });
                    }
                    document
                }
                Err(err) => {
                    warn!(store_id = %self.store_id, error = %err, "stored design is malformed; using defaults");
                    self.notices.push(SessionNotice::LoadFallback {
                        reason: err.to_string(),
                    });
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(store_id = %self.store_id, error = %err, "failed to load design; using defaults");
                self.notices.push(SessionNotice::LoadFallback {
                    reason: err.to_string(),
                });
                None
            }
        };

        self.document = reconcile(stored);
        self.phase = SessionPhase::Ready;
        self.dirty = false;
        debug!(store_id = %self.store_id, sections = self.document.sections.len(), "design session ready");
    }

    /// Applies an edit. Edits that leave the document unchanged (a move past
    /// the end of the list, for example) do not dirty the session.
    pub fn apply(&mut self, edit: DesignEdit) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Loading {
            return Err(SessionError::NotReady);
        }

        let edited = edit.apply(&self.document)?;
        if edited != self.document {
            self.document = edited;
            self.revision += 1;
            self.dirty = true;
        }
        Ok(())
    }

    /// Reconciles the working document and hands a snapshot to the caller to
    /// persist. Only one save may be in flight at a time.
    pub fn begin_save(&mut self) -> Result<SaveTicket, SessionError> {
        match self.phase {
            SessionPhase::Loading => return Err(SessionError::NotReady),
            SessionPhase::Saving => return Err(SessionError::SaveInFlight),
            SessionPhase::Ready => {}
        }

        self.document = reconcile(Some(self.document.clone()));
        self.phase = SessionPhase::Saving;
        self.saves_started += 1;
        self.in_flight = Some(self.saves_started);

        Ok(SaveTicket {
            sequence: self.saves_started,
            revision: self.revision,
            document: self.document.clone(),
        })
    }

    /// Records the outcome of a save started with [`DesignSession::begin_save`].
    /// Success clears the dirty flag only when nothing was edited while the
    /// save was in flight.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        outcome: Result<(), StoreError>,
    ) -> Result<(), SessionError> {
        if self.in_flight != Some(ticket.sequence) {
            return Err(SessionError::UnknownTicket);
        }
        self.in_flight = None;
        self.phase = SessionPhase::Ready;

        match outcome {
            Ok(()) => {
                if self.revision == ticket.revision {
                    self.dirty = false;
                }
                info!(
                    store_id = %self.store_id,
                    sequence = ticket.sequence,
                    revision = ticket.revision,
                    "design saved"
                );
                Ok(())
            }
            Err(err) => {
                warn!(store_id = %self.store_id, error = %err, "design save failed");
                self.notices.push(SessionNotice::SaveFailed {
                    reason: err.to_string(),
                });
                Err(SessionError::Save(err))
            }
        }
    }

    /// Synchronous save through a store.
    pub fn save<S>(&mut self, store: &S) -> Result<(), SessionError>
    where
        S: DesignStore + ?Sized,
    {
        let ticket = self.begin_save()?;
        let outcome = store.save(&self.store_id, ticket.document());
        self.complete_save(ticket, outcome)
    }

    pub fn preview(&self, profile: &StoreProfile) -> Vec<ContentBlock> {
        render(&self.document, profile)
    }

    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn document(&self) -> &DesignDocument {
        &self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn notices(&self) -> &[SessionNotice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }
}

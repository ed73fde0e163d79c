//! Store page composition: the catalog of section kinds, reconciliation of
//! stored design documents, ordering and style edits, the render dispatcher
//! and the editing session that ties them together.

pub mod catalog;
pub mod document;
pub mod ordering;
pub mod profile;
pub mod reconcile;
pub mod render;
pub mod router;
pub mod service;
pub mod session;
pub mod store;
pub mod style;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogEntry, SectionKind, HEADER_ID};
pub use document::{
    DecodeReport, DesignDocument, DocumentError, GlobalStyle, Section, SectionStyleOverride,
};
pub use ordering::{Direction, EditError};
pub use profile::StoreProfile;
pub use reconcile::reconcile;
pub use render::{render, BlockContent, ContentBlock};
pub use router::design_router;
pub use service::{DesignService, DesignServiceError, LoadedDesign};
pub use session::{DesignEdit, DesignSession, SaveTicket, SessionError, SessionNotice, SessionPhase};
pub use store::{DesignStore, ProfileSource, ProfileSourceError, StoreError, StoreId};
pub use style::{resolve, ResolvedStyle};

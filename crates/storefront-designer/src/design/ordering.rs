//! Edit operations over a design document. Every operation takes the current
//! document by reference and returns the edited copy; the input is never
//! mutated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::HEADER_ID;
use super::document::{DesignDocument, GlobalStyle, SectionStyleOverride};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("section {0} does not exist in the document")]
    UnknownSection(String),
    #[error("the header section is pinned and cannot be moved or hidden")]
    Pinned,
}

/// Swaps a section with its neighbour one step up or down. Moving past either
/// end of the sequence leaves the document unchanged.
pub fn move_section(
    document: &DesignDocument,
    id: &str,
    direction: Direction,
) -> Result<DesignDocument, EditError> {
    let mut sequence = orderable_sequence(document);
    let position = position_of(&sequence, id)?;

    let neighbour = match direction {
        Direction::Up => position.checked_sub(1),
        Direction::Down => Some(position + 1).filter(|next| *next < sequence.len()),
    };

    if let Some(neighbour) = neighbour {
        sequence.swap(position, neighbour);
    }

    Ok(with_sequence(document, &sequence))
}

/// Drag-and-drop relocation: pulls the section out of the sequence and
/// reinserts it at the zero-based `destination`, clamped to the last slot.
pub fn reorder(
    document: &DesignDocument,
    id: &str,
    destination: usize,
) -> Result<DesignDocument, EditError> {
    let mut sequence = orderable_sequence(document);
    let position = position_of(&sequence, id)?;

    let moved = sequence.remove(position);
    let destination = destination.min(sequence.len());
    sequence.insert(destination, moved);

    Ok(with_sequence(document, &sequence))
}

pub fn set_visibility(
    document: &DesignDocument,
    id: &str,
    visible: bool,
) -> Result<DesignDocument, EditError> {
    if id == HEADER_ID {
        return if visible {
            Ok(document.clone())
        } else {
            Err(EditError::Pinned)
        };
    }

    let mut edited = document.clone();
    let section = edited
        .sections
        .iter_mut()
        .find(|section| section.id == id)
        .ok_or_else(|| EditError::UnknownSection(id.to_string()))?;
    section.visible = visible;
    Ok(edited)
}

/// Replaces a section's style override wholesale. The header may be restyled.
pub fn update_section_style(
    document: &DesignDocument,
    id: &str,
    style: SectionStyleOverride,
) -> Result<DesignDocument, EditError> {
    let mut edited = document.clone();
    let section = edited
        .sections
        .iter_mut()
        .find(|section| section.id == id)
        .ok_or_else(|| EditError::UnknownSection(id.to_string()))?;
    section.settings = style;
    Ok(edited)
}

pub fn update_global_style(document: &DesignDocument, global: GlobalStyle) -> DesignDocument {
    DesignDocument {
        global_settings: global,
        sections: document.sections.clone(),
    }
}

fn orderable_sequence(document: &DesignDocument) -> Vec<String> {
    document
        .orderable()
        .into_iter()
        .map(|section| section.id.clone())
        .collect()
}

fn position_of(sequence: &[String], id: &str) -> Result<usize, EditError> {
    if id == HEADER_ID {
        return Err(EditError::Pinned);
    }
    sequence
        .iter()
        .position(|candidate| candidate == id)
        .ok_or_else(|| EditError::UnknownSection(id.to_string()))
}

fn with_sequence(document: &DesignDocument, sequence: &[String]) -> DesignDocument {
    let orders: HashMap<&str, u32> = sequence
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index as u32 + 1))
        .collect();

    let mut edited = document.clone();
    for section in &mut edited.sections {
        if section.is_header() {
            section.order = 0;
        } else if let Some(order) = orders.get(section.id.as_str()) {
            section.order = *order;
        }
    }
    edited
}

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::catalog::{Catalog, HEADER_ID};
use super::document::{DesignDocument, Section};

/// Brings a stored (possibly partial, legacy or absent) document in line with
/// the standard catalog. Total and idempotent.
pub fn reconcile(document: Option<DesignDocument>) -> DesignDocument {
    reconcile_with(Catalog::standard(), document)
}

/// Reconciles against an explicit catalog.
///
/// The output always holds exactly one visible `header` at order 0, one section
/// for every required id with orders `1..=N` in catalog order, and any
/// forward-compatible unknown ids appended after them.
pub fn reconcile_with(catalog: &Catalog, document: Option<DesignDocument>) -> DesignDocument {
    let DesignDocument {
        global_settings,
        mut sections,
    } = document.unwrap_or_default();

    sections.sort_by_key(|section| section.order);

    let mut header: Option<Section> = None;
    let mut known: HashMap<String, Section> = HashMap::new();
    let mut aliased: Vec<(&'static str, Section)> = Vec::new();
    let mut unknown: Vec<Section> = Vec::new();
    let mut unknown_ids: HashSet<String> = HashSet::new();

    for section in sections {
        if section.id == HEADER_ID {
            if header.is_none() {
                header = Some(section);
            } else {
                debug!("dropping duplicate header section");
            }
        } else if catalog.is_retired(&section.id) {
            debug!(section_id = %section.id, "dropping retired section");
        } else if catalog.is_required(&section.id) {
            if known.contains_key(&section.id) {
                debug!(section_id = %section.id, "dropping duplicate section");
            } else {
                known.insert(section.id.clone(), section);
            }
        } else if let Some(target) = catalog.alias_target(&section.id) {
            aliased.push((target, section));
        } else if unknown_ids.insert(section.id.clone()) {
            unknown.push(section);
        } else {
            debug!(section_id = %section.id, "dropping duplicate unknown section");
        }
    }

    for (target, mut section) in aliased {
        if known.contains_key(target) {
            debug!(
                legacy_id = %section.id,
                section_id = target,
                "dropping legacy section superseded by its current id"
            );
            continue;
        }
        debug!(legacy_id = %section.id, section_id = target, "migrating legacy section id");
        section.id = target.to_string();
        known.insert(target.to_string(), section);
    }

    let mut header = header.unwrap_or_else(|| {
        debug!("synthesizing missing header section");
        synthesize(catalog, HEADER_ID, 0)
    });
    header.order = 0;
    header.visible = true;
    backfill_title(catalog, &mut header);

    let mut reconciled = Vec::with_capacity(known.len() + unknown.len() + 1);
    reconciled.push(header);

    let mut next_order = 1;
    for id in catalog.required_ids().filter(|id| *id != HEADER_ID) {
        let mut section = match known.remove(id) {
            Some(section) => section,
            None => {
                debug!(section_id = id, "backfilling missing section");
                synthesize(catalog, id, next_order)
            }
        };
        section.order = next_order;
        backfill_title(catalog, &mut section);
        reconciled.push(section);
        next_order += 1;
    }

    for mut section in unknown {
        section.order = next_order;
        reconciled.push(section);
        next_order += 1;
    }

    DesignDocument {
        global_settings,
        sections: reconciled,
    }
}

fn synthesize(catalog: &Catalog, id: &str, order: u32) -> Section {
    match catalog.defaults_for(id) {
        Some(entry) => Section::from_entry(entry, order),
        None => Section {
            id: id.to_string(),
            title: String::new(),
            order,
            visible: true,
            settings: Default::default(),
        },
    }
}

fn backfill_title(catalog: &Catalog, section: &mut Section) {
    if section.title.trim().is_empty() {
        if let Some(entry) = catalog.defaults_for(&section.id) {
            section.title = entry.default_title.to_string();
        }
    }
}

use crate::infra::{read_json, InMemoryDesignStore, InMemoryProfileSource};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use storefront_designer::design::{
    reconcile, render, BlockContent, ContentBlock, DesignDocument, DesignEdit, DesignService,
    DesignSession, DesignStore, Direction, GlobalStyle, ProfileSource, SectionStyleOverride,
    StoreId, StoreProfile,
};
use storefront_designer::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ReconcileArgs {
    /// Stored design document (JSON). Omit to print the default document.
    #[arg(long)]
    pub(crate) document: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Design document (JSON). Reconciled before rendering; omit for defaults.
    #[arg(long)]
    pub(crate) document: Option<PathBuf>,
    /// Store profile record (JSON)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Print the rendered blocks as JSON instead of a text outline
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Store id used for the sample design
    #[arg(long, default_value = "demo-store")]
    pub(crate) store_id: String,
    /// Print the saved document after the walkthrough
    #[arg(long)]
    pub(crate) show_document: bool,
}

pub(crate) fn run_reconcile(args: ReconcileArgs) -> Result<(), AppError> {
    let document = load_document(args.document)?;
    let reconciled = reconcile(document);
    println!("{}", serde_json::to_string_pretty(&reconciled)?);
    Ok(())
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let document = reconcile(load_document(args.document)?);
    let profile = StoreProfile::from_value(&read_json(&args.profile)?);
    let blocks = render(&document, &profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        for (position, block) in blocks.iter().enumerate() {
            println!("{:>2}. {}", position, describe_block(block));
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store_id = StoreId(args.store_id);
    let store = InMemoryDesignStore::default();
    let profiles = InMemoryProfileSource::default();
    store.seed(store_id.clone(), sample_legacy_design());
    profiles.seed(store_id.clone(), sample_profile());

    walkthrough(
        store_id,
        Arc::new(store),
        Arc::new(profiles),
        args.show_document,
    )
}

/// Load, edit, save, restyle and preview one store. Save failures end the
/// walkthrough with the underlying error.
fn walkthrough<S, P>(
    store_id: StoreId,
    store: Arc<S>,
    profiles: Arc<P>,
    show_document: bool,
) -> Result<(), AppError>
where
    S: DesignStore + 'static,
    P: ProfileSource + 'static,
{
    println!("Store design walkthrough for {}", store_id);

    let mut session = DesignSession::load(store_id.clone(), store.as_ref());
    let document = session.document();
    println!(
        "- Loaded legacy design: {} sections after reconciliation (header pinned, {} orderable)",
        document.sections.len(),
        document.orderable().len()
    );
    for notice in session.take_notices() {
        println!("  Notice: {}", notice.message());
    }

    let edits = vec![
        DesignEdit::SetVisibility {
            section_id: "gallery".to_string(),
            visible: false,
        },
        DesignEdit::Move {
            section_id: "salary".to_string(),
            direction: Direction::Up,
        },
        DesignEdit::Reorder {
            section_id: "contact".to_string(),
            destination: 0,
        },
        DesignEdit::UpdateSectionStyle {
            section_id: "catchphrase".to_string(),
            style: SectionStyleOverride {
                background_color: Some("#fff4f8".to_string()),
                font_size: Some(22),
                ..SectionStyleOverride::default()
            },
        },
    ];
    for edit in edits {
        let label = describe_edit(&edit);
        match session.apply(edit) {
            Ok(()) => println!("- Applied {label}"),
            Err(err) => println!("  Edit rejected ({label}): {err}"),
        }
    }
    if let Err(err) = session.apply(DesignEdit::SetVisibility {
        section_id: "header".to_string(),
        visible: false,
    }) {
        println!("  Hiding the header is refused: {err}");
    }
    println!("  Unsaved changes: {}", session.is_dirty());

    if let Err(err) = session.save(store.as_ref()) {
        for notice in session.take_notices() {
            println!("  Notice: {}", notice.message());
        }
        return Err(err.into());
    }
    println!("- Saved design (unsaved changes: {})", session.is_dirty());

    let service = DesignService::new(store, profiles);
    let loaded = service.load(&store_id);
    let themed = DesignDocument {
        global_settings: GlobalStyle {
            accent_color: "#be123c".to_string(),
            ..loaded.document.global_settings.clone()
        },
        ..loaded.document
    };
    let saved = service.save(&store_id, themed)?;
    println!(
        "- Saved page accent colour {} through the service",
        saved.global_settings.accent_color
    );

    println!("\nPreview of the stored design:");
    for (position, block) in service.preview_stored(&store_id).iter().enumerate() {
        println!("{:>2}. {}", position, describe_block(block));
    }

    if show_document {
        println!("\n{}", serde_json::to_string_pretty(&saved)?);
    }

    Ok(())
}

fn load_document(path: Option<PathBuf>) -> Result<Option<DesignDocument>, AppError> {
    match path {
        Some(path) => Ok(DesignDocument::from_value(&read_json(&path)?)?),
        None => Ok(None),
    }
}

fn describe_edit(edit: &DesignEdit) -> String {
    match edit {
        DesignEdit::SetVisibility {
            section_id,
            visible,
        } => format!("visibility {section_id} -> {visible}"),
        DesignEdit::Move {
            section_id,
            direction,
        } => format!("move {section_id} {direction:?}"),
        DesignEdit::Reorder {
            section_id,
            destination,
        } => format!("reorder {section_id} -> slot {destination}"),
        DesignEdit::UpdateSectionStyle { section_id, .. } => format!("restyle {section_id}"),
        DesignEdit::UpdateGlobalStyle { .. } => "restyle page".to_string(),
    }
}

/// One-line outline of a rendered block for terminal output.
pub(crate) fn describe_block(block: &ContentBlock) -> String {
    let heading = block.title.as_deref().unwrap_or(&block.section_id);
    let detail = match &block.content {
        BlockContent::Header(header) => header.store_name.clone(),
        BlockContent::MainVisual(visual) => visual.headline.clone(),
        BlockContent::Catchphrase(catchphrase) => {
            catchphrase.headline.clone().unwrap_or_default()
        }
        BlockContent::Gallery(gallery) => format!("{} images", gallery.images.len()),
        BlockContent::Benefits(list) | BlockContent::Security(list) => list.items.join(" / "),
        BlockContent::Salary(salary) => salary
            .lines
            .iter()
            .map(|line| match &line.hourly_display {
                Some(hourly) => format!("{} {} ({hourly})", line.label, line.display),
                None => format!("{} {}", line.label, line.display),
            })
            .collect::<Vec<_>>()
            .join(" / "),
        BlockContent::Schedule(schedule) => {
            let days = if schedule.every_day {
                "毎日".to_string()
            } else {
                schedule.days.join("・")
            };
            match &schedule.business_hours {
                Some(hours) => format!("{days} {hours}"),
                None => days,
            }
        }
        BlockContent::SpecialOffers(offers) => format!("{} offers", offers.offers.len()),
        BlockContent::Access(access) => access.address.clone().unwrap_or_default(),
        BlockContent::Contact(contact) => contact
            .phones
            .iter()
            .chain(&contact.emails)
            .map(|entry| entry.value.clone())
            .collect::<Vec<_>>()
            .join(" / "),
        BlockContent::SocialLinks(social) => social
            .links
            .iter()
            .map(|link| link.platform.clone())
            .collect::<Vec<_>>()
            .join(", "),
        BlockContent::Requirements(requirements) => requirements.age_label.clone(),
        BlockContent::Blog(blog) => format!("{} posts", blog.posts.len()),
        BlockContent::Footer(footer) => footer.copyright.clone(),
        BlockContent::Unsupported { .. } => "(not supported by this renderer)".to_string(),
    };
    format!("[{}] {heading}: {detail}", block.section_id)
}

fn sample_legacy_design() -> Value {
    json!({
        "globalSettings": { "mainColor": "#e11d48", "hideSectionTitles": "false" },
        "sections": [
            { "id": "header", "title": "", "order": 3, "visible": false },
            { "id": "hero", "title": "", "order": 1 },
            { "id": "introduction", "title": "お店について", "order": 2 },
            { "id": "ranking", "title": "人気ランキング", "order": 4 },
            { "id": "salary", "title": "給与", "order": 5 },
            { "id": "salary", "title": "給与(重複)", "order": 6 }
        ]
    })
}

fn sample_profile() -> Value {
    json!({
        "store_name": "Club Aurora",
        "area": "渋谷",
        "catchphrase": "未経験でも安心して始められるお店です",
        "benefits": "日払いOK,送迎あり,衣装貸出",
        "salary_guarantees": "[{\"label\":\"日給保証\",\"amount\":\"30000\",\"hours\":6},{\"label\":\"体験入店\",\"amount\":0}]",
        "days_available": ["月", "火", "水"],
        "business_hours": "10時〜22時",
        "address": "東京都渋谷区道玄坂1-2-3",
        "contact_phone": "03-0000-0000",
        "emails": ["recruit@aurora.example"],
        "sns_links": { "instagram": "https://instagram.com/aurora" },
        "recent_posts": [
            { "title": "新人入店", "body": "<p>今週から新しい仲間が加わりました</p>", "published_at": "2025-09-24" }
        ]
    })
}

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::document::SectionStyleOverride;

/// Reserved id of the pinned section that always renders first.
pub const HEADER_ID: &str = "header";

/// Every content kind the renderer knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    MainVisual,
    Catchphrase,
    Gallery,
    Benefits,
    Salary,
    Schedule,
    SpecialOffers,
    Access,
    Contact,
    SocialLinks,
    Security,
    Requirements,
    Blog,
    Footer,
}

impl SectionKind {
    pub const fn ordered() -> [Self; 15] {
        [
            Self::Header,
            Self::MainVisual,
            Self::Catchphrase,
            Self::Gallery,
            Self::Benefits,
            Self::Salary,
            Self::Schedule,
            Self::SpecialOffers,
            Self::Access,
            Self::Contact,
            Self::SocialLinks,
            Self::Security,
            Self::Requirements,
            Self::Blog,
            Self::Footer,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Header => HEADER_ID,
            Self::MainVisual => "main_visual",
            Self::Catchphrase => "catchphrase",
            Self::Gallery => "gallery",
            Self::Benefits => "benefits",
            Self::Salary => "salary",
            Self::Schedule => "schedule",
            Self::SpecialOffers => "special_offers",
            Self::Access => "access",
            Self::Contact => "contact",
            Self::SocialLinks => "sns",
            Self::Security => "security",
            Self::Requirements => "requirements",
            Self::Blog => "blog",
            Self::Footer => "footer",
        }
    }

    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Header => "ヘッダー",
            Self::MainVisual => "メインビジュアル",
            Self::Catchphrase => "キャッチコピー",
            Self::Gallery => "フォトギャラリー",
            Self::Benefits => "待遇・福利厚生",
            Self::Salary => "給与",
            Self::Schedule => "勤務時間",
            Self::SpecialOffers => "キャンペーン",
            Self::Access => "アクセス",
            Self::Contact => "お問い合わせ",
            Self::SocialLinks => "SNS",
            Self::Security => "安心・安全への取り組み",
            Self::Requirements => "応募資格",
            Self::Blog => "ブログ",
            Self::Footer => "フッター",
        }
    }

    /// The header is the only section pinned in place.
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Header)
    }
}

/// Static description of one supported section kind.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub kind: SectionKind,
    pub id: &'static str,
    pub default_title: &'static str,
    pub default_style: SectionStyleOverride,
    pub fixed: bool,
}

/// Versioned table of the section kinds the product currently supports.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    retired: Vec<&'static str>,
    aliases: Vec<(&'static str, SectionKind)>,
}

impl Catalog {
    /// The catalog shipped with the current release.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| Catalog {
            entries: standard_entries(),
            retired: vec!["ranking", "staff_voice", "interview", "news"],
            aliases: legacy_aliases(),
        })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Ids in the order a freshly created document lists them.
    pub fn required_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    pub fn is_required(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn is_retired(&self, id: &str) -> bool {
        self.retired.iter().any(|retired| *retired == id)
    }

    pub fn defaults_for(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Canonical id a legacy alias was renamed to, if `id` is an alias.
    pub fn alias_target(&self, id: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == id)
            .map(|(_, kind)| kind.id())
    }

    /// Resolves a stored id, legacy aliases included, to the content kind it renders.
    pub fn kind_for(&self, id: &str) -> Option<SectionKind> {
        if let Some(entry) = self.defaults_for(id) {
            return Some(entry.kind);
        }
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == id)
            .map(|(_, kind)| *kind)
    }
}

fn standard_entries() -> Vec<CatalogEntry> {
    SectionKind::ordered()
        .into_iter()
        .map(|kind| CatalogEntry {
            kind,
            id: kind.id(),
            default_title: kind.default_title(),
            default_style: default_style_for(kind),
            fixed: kind.is_fixed(),
        })
        .collect()
}

fn default_style_for(kind: SectionKind) -> SectionStyleOverride {
    match kind {
        SectionKind::MainVisual => SectionStyleOverride {
            padding: Some(0),
            ..SectionStyleOverride::default()
        },
        SectionKind::Catchphrase => SectionStyleOverride {
            font_size: Some(20),
            ..SectionStyleOverride::default()
        },
        SectionKind::Footer => SectionStyleOverride {
            background_color: Some("#222222".to_string()),
            text_color: Some("#ffffff".to_string()),
            ..SectionStyleOverride::default()
        },
        _ => SectionStyleOverride::default(),
    }
}

fn legacy_aliases() -> Vec<(&'static str, SectionKind)> {
    vec![
        ("introduction", SectionKind::Catchphrase),
        ("hero", SectionKind::MainVisual),
        ("photos", SectionKind::Gallery),
        ("welfare", SectionKind::Benefits),
        ("wage", SectionKind::Salary),
        ("hours", SectionKind::Schedule),
        ("campaign", SectionKind::SpecialOffers),
        ("map", SectionKind::Access),
        ("social", SectionKind::SocialLinks),
        ("privacy", SectionKind::Security),
        ("qualifications", SectionKind::Requirements),
        ("blog_list", SectionKind::Blog),
    ]
}

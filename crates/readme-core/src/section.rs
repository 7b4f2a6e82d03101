use crate::badge::ReconciledBadges;
use crate::config::{Mode, Options};

// ---------------------------------------------------------------------------
// Marker text
//
// Other tools scan for these literals; they must survive regeneration verbatim.
// ---------------------------------------------------------------------------

pub const BADGES_START: &str = r#"<p align="center">"#;
pub const BADGES_END: &str = "</p>";

pub const CONTRIBUTORS_LIST_START: &str =
    "<!-- ALL-CONTRIBUTORS-LIST:START - Do not remove or modify this section -->";
pub const CONTRIBUTORS_LIST_END: &str = "<!-- ALL-CONTRIBUTORS-LIST:END -->";

pub const USAGE_HEADING: &str = "## Usage";
pub const CONTRIBUTORS_HEADING: &str = "## Contributors";

pub const NOTICE_COMMENT: &str =
    "<!-- You can remove this notice if you don't want it 🙂 no worries! -->";
pub const NOTICE_LINE: &str = "> 💙 This package was templated with [`create-typescript-app`](https://github.com/JoshuaKGoldberg/create-typescript-app).";

// ---------------------------------------------------------------------------
// SectionKind / Markers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub begin: &'static str,
    pub end: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Badges,
    Usage,
    Contributors,
    Footer,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Badges => "badges",
            SectionKind::Usage => "usage",
            SectionKind::Contributors => "contributors",
            SectionKind::Footer => "footer",
        }
    }

    /// Literal begin/end pair for marker-delimited sections; `None` for
    /// sections located by structural position.
    pub fn markers(self) -> Option<Markers> {
        match self {
            SectionKind::Badges => Some(Markers {
                begin: BADGES_START,
                end: BADGES_END,
            }),
            SectionKind::Contributors => Some(Markers {
                begin: CONTRIBUTORS_LIST_START,
                end: CONTRIBUTORS_LIST_END,
            }),
            SectionKind::Header | SectionKind::Usage | SectionKind::Footer => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedSection {
    pub kind: SectionKind,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Title and description each collapse to a single line, which is the shape
/// the merger recognizes as a header on the next run.
pub fn header(options: &Options) -> String {
    format!(
        "<h1 align=\"center\">{}</h1>\n\n<p align=\"center\">{}</p>",
        single_line(&options.title),
        single_line(&options.description)
    )
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One snippet line per row, each tab-indented, inside the badge markers.
pub fn badge_block(badges: &[String]) -> String {
    let mut out = String::from(BADGES_START);
    for snippet in badges {
        for line in snippet.lines() {
            out.push_str("\n\t");
            out.push_str(line);
        }
    }
    out.push('\n');
    out.push_str(BADGES_END);
    out
}

pub fn usage(options: &Options) -> String {
    let repo = &options.repository;
    format!(
        "{USAGE_HEADING}\n\n\
         ```shell\n\
         npm i {repo}\n\
         ```\n\
         ```ts\n\
         import {{ greet }} from \"{repo}\";\n\
         \n\
         greet(\"Hello, world! 💖\");\n\
         ```"
    )
}

pub fn contributors() -> String {
    [
        CONTRIBUTORS_HEADING,
        "<!-- spellchecker: disable -->",
        CONTRIBUTORS_LIST_START,
        "<!-- prettier-ignore-start -->",
        "<!-- markdownlint-disable -->",
        "<table>",
        "<!-- (this will be filled in by all-contributors) -->",
        "</table>",
        "<!-- markdownlint-restore -->",
        "<!-- prettier-ignore-end -->",
        CONTRIBUTORS_LIST_END,
        "<!-- spellchecker: enable -->",
    ]
    .join("\n")
}

pub fn footer() -> String {
    format!("{NOTICE_COMMENT}\n\n{NOTICE_LINE}")
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build every managed section enabled for this run, in document order.
pub fn assemble(options: &Options, badges: &ReconciledBadges) -> Vec<ManagedSection> {
    let mut sections = vec![
        ManagedSection {
            kind: SectionKind::Header,
            text: header(options),
        },
        ManagedSection {
            kind: SectionKind::Badges,
            text: badge_block(&badges.snippets),
        },
    ];
    if options.mode == Mode::Create {
        sections.push(ManagedSection {
            kind: SectionKind::Usage,
            text: usage(options),
        });
    }
    if options.contributors_enabled() {
        sections.push(ManagedSection {
            kind: SectionKind::Contributors,
            text: contributors(),
        });
    }
    sections.push(ManagedSection {
        kind: SectionKind::Footer,
        text: footer(),
    });
    sections
}

/// Join sections with one blank line between them and a trailing newline.
pub fn render_document(sections: &[ManagedSection]) -> String {
    let mut out = sections
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

use crate::config::Options;
use crate::error::{ReadmeError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// BadgeDefinition
// ---------------------------------------------------------------------------

/// One canonical badge. Fn pointers keep the catalog a static table.
pub struct BadgeDefinition {
    pub id: &'static str,
    pub applies_when: fn(&Options) -> bool,
    /// Recognizes an existing snippet as this badge regardless of its rendered value.
    pub matches: fn(&str) -> bool,
    pub render: fn(&Options) -> String,
}

// ---------------------------------------------------------------------------
// Classified
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified<'a> {
    Known(&'static str),
    Unknown(&'a str),
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub struct Catalog {
    badges: Vec<BadgeDefinition>,
}

impl Catalog {
    pub fn new(badges: Vec<BadgeDefinition>) -> Self {
        Self { badges }
    }

    pub fn badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// Definitions whose condition holds for `options`, in display order.
    pub fn applicable<'c>(
        &'c self,
        options: &'c Options,
    ) -> impl Iterator<Item = &'c BadgeDefinition> + 'c {
        self.badges.iter().filter(|b| (b.applies_when)(options))
    }

    /// Classify one snippet against the applicable definitions.
    ///
    /// A properly authored catalog (see [`Catalog::check`]) never has two
    /// definitions claiming the same snippet; if it does, catalog order wins.
    pub fn classify<'s>(&self, options: &Options, snippet: &'s str) -> Classified<'s> {
        match self.applicable(options).find(|b| (b.matches)(snippet)) {
            Some(badge) => Classified::Known(badge.id),
            None => Classified::Unknown(snippet),
        }
    }

    /// Startup authoring check: ids are unique, every definition recognizes
    /// its own render, and no render is claimed by a second definition.
    ///
    /// Every definition is rendered, applicable or not, so a collision that
    /// only shows up under another configuration is still caught.
    pub fn check(&self, options: &Options) -> Result<()> {
        let mut seen = HashSet::new();
        for badge in &self.badges {
            if !seen.insert(badge.id) {
                return Err(ReadmeError::DuplicateBadgeId(badge.id.to_string()));
            }
        }

        for badge in &self.badges {
            let rendered = (badge.render)(options);
            if !(badge.matches)(&rendered) {
                return Err(ReadmeError::UnrecognizedRender(badge.id.to_string()));
            }
            if let Some(other) = self
                .badges
                .iter()
                .find(|o| o.id != badge.id && (o.matches)(&rendered))
            {
                return Err(ReadmeError::CatalogCollision {
                    rendered_by: badge.id.to_string(),
                    matched_by: other.id.to_string(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledBadges {
    /// Final snippets in emission order: canonical badges first, then unknowns.
    pub snippets: Vec<String>,
    /// Ids of canonical badges that replaced a snippet found in the prior document.
    pub refreshed: Vec<&'static str>,
    /// Number of unknown snippets carried over verbatim.
    pub unknown_kept: usize,
}

/// Merge `existing` snippets with the catalog.
///
/// 1. Every applicable definition is rendered, in catalog order. The
///    canonical render always replaces a stale existing value.
/// 2. Snippets no applicable definition claims follow in their original
///    order, de-duplicated by exact text. Single-line comments are exempt
///    since each wrapper pair needs both of its lines.
pub fn reconcile(catalog: &Catalog, options: &Options, existing: &[String]) -> ReconciledBadges {
    let mut matched: HashSet<&'static str> = HashSet::new();
    let mut unknown: Vec<&str> = Vec::new();

    for snippet in existing {
        match catalog.classify(options, snippet) {
            Classified::Known(id) => {
                tracing::debug!(badge = id, "existing snippet matches catalog badge");
                matched.insert(id);
            }
            Classified::Unknown(text) => {
                if unknown.contains(&text) && !is_wrapper_comment(text) {
                    tracing::debug!(snippet = text, "dropping duplicate unknown snippet");
                } else {
                    unknown.push(text);
                }
            }
        }
    }

    let mut result = ReconciledBadges::default();
    for badge in catalog.applicable(options) {
        result.snippets.push((badge.render)(options));
        if matched.contains(badge.id) {
            result.refreshed.push(badge.id);
        }
    }
    result.unknown_kept = unknown.len();
    result
        .snippets
        .extend(unknown.into_iter().map(str::to_string));
    result
}

fn is_wrapper_comment(snippet: &str) -> bool {
    !snippet.contains('\n') && snippet.starts_with("<!--") && snippet.ends_with("-->")
}

// ---------------------------------------------------------------------------
// Fingerprint helpers
// ---------------------------------------------------------------------------

static ALT_RE: OnceLock<Regex> = OnceLock::new();
static HREF_RE: OnceLock<Regex> = OnceLock::new();
static SRC_RE: OnceLock<Regex> = OnceLock::new();

fn alt_re() -> &'static Regex {
    ALT_RE.get_or_init(|| Regex::new(r#"\balt\s*=\s*"([^"]*)""#).unwrap())
}

fn href_re() -> &'static Regex {
    HREF_RE.get_or_init(|| Regex::new(r#"\bhref\s*=\s*"([^"]*)""#).unwrap())
}

fn src_re() -> &'static Regex {
    SRC_RE.get_or_init(|| Regex::new(r#"\bsrc\s*=\s*"([^"]*)""#).unwrap())
}

/// Every `alt="..."` value in the snippet.
pub fn alt_texts(snippet: &str) -> impl Iterator<Item = &str> {
    alt_re()
        .captures_iter(snippet)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// Every `href="..."` target in the snippet.
pub fn link_targets(snippet: &str) -> impl Iterator<Item = &str> {
    href_re()
        .captures_iter(snippet)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// Every `src="..."` value in the snippet.
pub fn image_sources(snippet: &str) -> impl Iterator<Item = &str> {
    src_re()
        .captures_iter(snippet)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

pub fn has_alt_prefix(snippet: &str, prefix: &str) -> bool {
    alt_texts(snippet).any(|alt| alt.starts_with(prefix))
}

pub fn has_link_prefix(snippet: &str, prefix: &str) -> bool {
    link_targets(snippet).any(|href| href.starts_with(prefix))
}

pub fn has_image_prefix(snippet: &str, prefix: &str) -> bool {
    image_sources(snippet).any(|src| src.starts_with(prefix))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    fn opts() -> Options {
        Options::new("Test Title", "Test description", "test-owner", "test-repository")
    }

    fn render(catalog: &Catalog, id: &str, options: &Options) -> String {
        (catalog.get(id).unwrap().render)(options)
    }

    #[test]
    fn fingerprint_helpers_extract_attributes() {
        let s = r#"<a href="https://x.io/a" target="_blank"><img alt="Hello: World" src="https://img/x.svg" /></a>"#;
        assert_eq!(alt_texts(s).collect::<Vec<_>>(), vec!["Hello: World"]);
        assert_eq!(link_targets(s).collect::<Vec<_>>(), vec!["https://x.io/a"]);
        assert!(has_alt_prefix(s, "Hello:"));
        assert!(has_link_prefix(s, "https://x.io/"));
        assert!(has_image_prefix(s, "https://img/"));
        assert!(!has_alt_prefix("plain text", "Hello"));
    }

    #[test]
    fn default_catalog_passes_check() {
        let catalog = default_catalog();
        catalog.check(&opts()).unwrap();

        let mut funded = opts();
        funded.funding = Some("TestFunding".to_string());
        catalog.check(&funded).unwrap();
    }

    #[test]
    fn check_rejects_duplicate_ids() {
        let catalog = Catalog::new(vec![
            BadgeDefinition {
                id: "dup",
                applies_when: |_| true,
                matches: |s| s == "a",
                render: |_| "a".to_string(),
            },
            BadgeDefinition {
                id: "dup",
                applies_when: |_| true,
                matches: |s| s == "b",
                render: |_| "b".to_string(),
            },
        ]);
        let err = catalog.check(&opts()).unwrap_err();
        assert!(matches!(err, ReadmeError::DuplicateBadgeId(id) if id == "dup"));
    }

    #[test]
    fn check_rejects_colliding_fingerprints() {
        let catalog = Catalog::new(vec![
            BadgeDefinition {
                id: "first",
                applies_when: |_| true,
                matches: |s| s.contains("shared"),
                render: |_| "shared-first".to_string(),
            },
            BadgeDefinition {
                id: "second",
                applies_when: |_| false,
                matches: |s| s.contains("shared"),
                render: |_| "shared-second".to_string(),
            },
        ]);
        let err = catalog.check(&opts()).unwrap_err();
        assert!(matches!(
            err,
            ReadmeError::CatalogCollision { rendered_by, matched_by }
                if rendered_by == "first" && matched_by == "second"
        ));
    }

    #[test]
    fn check_rejects_unrecognized_render() {
        let catalog = Catalog::new(vec![BadgeDefinition {
            id: "blind",
            applies_when: |_| true,
            matches: |_| false,
            render: |_| "<img />".to_string(),
        }]);
        let err = catalog.check(&opts()).unwrap_err();
        assert!(matches!(err, ReadmeError::UnrecognizedRender(id) if id == "blind"));
    }

    #[test]
    fn classify_known_and_unknown() {
        let catalog = default_catalog();
        let options = opts();
        assert_eq!(
            catalog.classify(&options, r#"<img alt="TypeScript: Strict" src="invalid svg" />"#),
            Classified::Known("typescript_strict")
        );
        let unknown = r#"<img alt="Unknown Badge" src="unknown.svg" />"#;
        assert_eq!(catalog.classify(&options, unknown), Classified::Unknown(unknown));
    }

    #[test]
    fn classify_ignores_inapplicable_definitions() {
        let catalog = default_catalog();
        let mut funded = opts();
        funded.funding = Some("TestFunding".to_string());
        let sponsor = render(&catalog, "sponsor", &funded);

        // Without funding the sponsor definition does not apply.
        let options = opts();
        assert_eq!(
            catalog.classify(&options, &sponsor),
            Classified::Unknown(sponsor.as_str())
        );
        assert_eq!(catalog.classify(&funded, &sponsor), Classified::Known("sponsor"));
    }

    #[test]
    fn reconcile_empty_renders_every_applicable_badge() {
        let catalog = default_catalog();
        let options = opts();
        let result = reconcile(&catalog, &options, &[]);
        let expected: Vec<String> = catalog
            .applicable(&options)
            .map(|b| (b.render)(&options))
            .collect();
        assert_eq!(result.snippets, expected);
        assert!(result.refreshed.is_empty());
        assert_eq!(result.unknown_kept, 0);
    }

    #[test]
    fn reconcile_replaces_stale_known_badge_in_place() {
        let catalog = default_catalog();
        let options = opts();
        let stale = r#"<img alt="npm package version" src="https://img.shields.io/npm/v/test-repository/0.0.1" />"#;
        let result = reconcile(&catalog, &options, &[stale.to_string()]);

        assert!(!result.snippets.iter().any(|s| s == stale));
        assert_eq!(result.refreshed, vec!["npm_version"]);
        assert_eq!(
            result.snippets.last().unwrap(),
            &render(&catalog, "npm_version", &options)
        );
    }

    #[test]
    fn reconcile_appends_unknown_after_canonical() {
        let catalog = default_catalog();
        let options = opts();
        let unknown = r#"<img alt="Unknown Badge" src="unknown.svg" />"#.to_string();
        let result = reconcile(&catalog, &options, &[unknown.clone()]);
        let canonical = catalog.applicable(&options).count();
        assert_eq!(result.snippets.len(), canonical + 1);
        assert_eq!(result.snippets[canonical], unknown);
        assert_eq!(result.unknown_kept, 1);
    }

    #[test]
    fn reconcile_keeps_unknown_relative_order_and_dedupes() {
        let catalog = default_catalog();
        let options = opts();
        let existing = vec![
            "<img alt=\"B\" />".to_string(),
            r#"<img alt="Style: Prettier" src="old.svg" />"#.to_string(),
            "<img alt=\"A\" />".to_string(),
            "<img alt=\"B\" />".to_string(),
        ];
        let result = reconcile(&catalog, &options, &existing);
        let tail: Vec<&str> = result
            .snippets
            .iter()
            .rev()
            .take(2)
            .rev()
            .map(String::as_str)
            .collect();
        assert_eq!(tail, vec!["<img alt=\"B\" />", "<img alt=\"A\" />"]);
        assert_eq!(result.unknown_kept, 2);
        let unique: HashSet<&String> = result.snippets.iter().collect();
        assert_eq!(unique.len(), result.snippets.len());
    }

    #[test]
    fn reconcile_keeps_every_wrapper_comment() {
        let catalog = default_catalog();
        let options = opts();
        let existing: Vec<String> = [
            "<!-- prettier-ignore-start -->",
            "<img alt=\"A\" />",
            "<!-- prettier-ignore-end -->",
            "<!-- prettier-ignore-start -->",
            "<img alt=\"B\" />",
            "<!-- prettier-ignore-end -->",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let result = reconcile(&catalog, &options, &existing);
        assert_eq!(result.unknown_kept, 6);
        assert!(result.snippets.ends_with(&existing));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let catalog = default_catalog();
        let mut options = opts();
        options.funding = Some("TestFunding".to_string());
        let existing = vec![
            "<img alt=\"Unknown Badge\" src=\"unknown.svg\" />".to_string(),
            r#"<img alt="License: Apache" src="x" />"#.to_string(),
        ];
        let once = reconcile(&catalog, &options, &existing);
        let twice = reconcile(&catalog, &options, &once.snippets);
        assert_eq!(once.snippets, twice.snippets);
    }

    #[test]
    fn reconcile_drops_excluded_badges_from_canonical_set() {
        let catalog = default_catalog();
        let mut options = opts();
        options.exclude_all_contributors = true;
        options.exclude_tests = true;
        let result = reconcile(&catalog, &options, &[]);
        assert!(!result.snippets.iter().any(|s| s.contains("All Contributors")));
        assert!(!result.snippets.iter().any(|s| s.contains("codecov.io")));
    }
}

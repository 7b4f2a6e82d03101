use crate::badge::{has_alt_prefix, has_image_prefix, has_link_prefix, BadgeDefinition, Catalog};
use crate::config::{Access, Options};

/// Accent color shared by every shields.io badge.
pub const BADGE_COLOR: &str = "21bb42";

pub const ALL_CONTRIBUTORS_BADGE_START: &str =
    "<!-- ALL-CONTRIBUTORS-BADGE:START - Do not remove or modify this section -->";
pub const ALL_CONTRIBUTORS_BADGE_END: &str = "<!-- ALL-CONTRIBUTORS-BADGE:END -->";
pub const PRETTIER_IGNORE_START: &str = "<!-- prettier-ignore-start -->";
pub const PRETTIER_IGNORE_END: &str = "<!-- prettier-ignore-end -->";

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

fn is_all_contributors(s: &str) -> bool {
    s.contains("<!-- ALL-CONTRIBUTORS-BADGE:START") || has_alt_prefix(s, "All Contributors")
}

fn is_codecov(s: &str) -> bool {
    has_alt_prefix(s, "Codecov")
        || has_link_prefix(s, "https://codecov.io/")
        || has_image_prefix(s, "https://codecov.io/")
}

fn is_code_of_conduct(s: &str) -> bool {
    has_alt_prefix(s, "Contributor Covenant")
        || link_ends_with(s, "/.github/CODE_OF_CONDUCT.md")
}

fn is_license(s: &str) -> bool {
    has_alt_prefix(s, "License:")
        || has_image_prefix(s, "https://img.shields.io/github/license/")
}

fn is_sponsor(s: &str) -> bool {
    has_alt_prefix(s, "Sponsor:") || has_link_prefix(s, "https://github.com/sponsors/")
}

fn is_style_prettier(s: &str) -> bool {
    has_alt_prefix(s, "Style: Prettier")
}

fn is_typescript_strict(s: &str) -> bool {
    has_alt_prefix(s, "TypeScript: Strict")
}

fn is_npm_version(s: &str) -> bool {
    has_alt_prefix(s, "npm package version")
        || has_image_prefix(s, "https://img.shields.io/npm/v/")
}

fn link_ends_with(s: &str, suffix: &str) -> bool {
    crate::badge::link_targets(s).any(|href| href.ends_with(suffix))
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

fn render_all_contributors(_: &Options) -> String {
    let link = format!(
        r##"<a href="#contributors" target="_blank"><img alt="All Contributors: 2" src="https://img.shields.io/badge/all_contributors-17-{BADGE_COLOR}.svg" /></a>"##
    );
    [
        PRETTIER_IGNORE_START,
        ALL_CONTRIBUTORS_BADGE_START,
        link.as_str(),
        ALL_CONTRIBUTORS_BADGE_END,
        PRETTIER_IGNORE_END,
    ]
    .join("\n")
}

fn render_codecov(o: &Options) -> String {
    let (owner, repo) = (&o.owner, &o.repository);
    format!(
        r#"<a href="https://codecov.io/gh/{owner}/{repo}" target="_blank"><img alt="Codecov Test Coverage" src="https://codecov.io/gh/{owner}/{repo}/branch/main/graph/badge.svg"/></a>"#
    )
}

fn render_code_of_conduct(o: &Options) -> String {
    let (owner, repo) = (&o.owner, &o.repository);
    format!(
        r#"<a href="https://github.com/{owner}/{repo}/blob/main/.github/CODE_OF_CONDUCT.md" target="_blank"><img alt="Contributor Covenant" src="https://img.shields.io/badge/code_of_conduct-enforced-{BADGE_COLOR}" /></a>"#
    )
}

fn render_license(o: &Options) -> String {
    let (owner, repo, license) = (&o.owner, &o.repository, &o.license);
    format!(
        r#"<a href="https://github.com/{owner}/{repo}/blob/main/LICENSE.md" target="_blank"><img alt="License: {license}" src="https://img.shields.io/github/license/{owner}/{repo}?color={BADGE_COLOR}"></a>"#
    )
}

fn render_sponsor(o: &Options) -> String {
    let funding = o.funding.as_deref().unwrap_or(&o.owner);
    format!(
        r#"<a href="https://github.com/sponsors/{funding}" target="_blank"><img alt="Sponsor: On GitHub" src="https://img.shields.io/badge/sponsor-on_github-{BADGE_COLOR}.svg" /></a>"#
    )
}

fn render_style_prettier(_: &Options) -> String {
    format!(
        r#"<img alt="Style: Prettier" src="https://img.shields.io/badge/style-prettier-{BADGE_COLOR}.svg" />"#
    )
}

fn render_typescript_strict(_: &Options) -> String {
    format!(
        r#"<img alt="TypeScript: Strict" src="https://img.shields.io/badge/typescript-strict-{BADGE_COLOR}.svg" />"#
    )
}

fn render_npm_version(o: &Options) -> String {
    let repo = &o.repository;
    format!(
        r#"<img alt="npm package version" src="https://img.shields.io/npm/v/{repo}?color={BADGE_COLOR}" />"#
    )
}

// ---------------------------------------------------------------------------
// Default catalog
// ---------------------------------------------------------------------------

/// The canonical badge table, in display order.
pub fn default_catalog() -> Catalog {
    Catalog::new(vec![
        BadgeDefinition {
            id: "all_contributors",
            applies_when: |o| o.contributors_enabled(),
            matches: is_all_contributors,
            render: render_all_contributors,
        },
        BadgeDefinition {
            id: "codecov",
            applies_when: |o| !o.exclude_tests,
            matches: is_codecov,
            render: render_codecov,
        },
        BadgeDefinition {
            id: "code_of_conduct",
            applies_when: |_| true,
            matches: is_code_of_conduct,
            render: render_code_of_conduct,
        },
        BadgeDefinition {
            id: "license",
            applies_when: |_| true,
            matches: is_license,
            render: render_license,
        },
        BadgeDefinition {
            id: "sponsor",
            applies_when: |o| o.funding.is_some(),
            matches: is_sponsor,
            render: render_sponsor,
        },
        BadgeDefinition {
            id: "style_prettier",
            applies_when: |_| true,
            matches: is_style_prettier,
            render: render_style_prettier,
        },
        BadgeDefinition {
            id: "typescript_strict",
            applies_when: |_| true,
            matches: is_typescript_strict,
            render: render_typescript_strict,
        },
        BadgeDefinition {
            id: "npm_version",
            applies_when: |o| o.access == Access::Public && !o.exclude_release,
            matches: is_npm_version,
            render: render_npm_version,
        },
    ])
}

// src/links/mod.rs
//! Project link-list reconciliation
//!
//! Projects carry a generalized links list alongside the legacy githubUrl /
//! demoUrl scalars. Records written before the list existed only have the
//! scalars; both representations must stay coherent on every read and write.

use serde::{Deserialize, Serialize};

/// Fixed vocabulary of link types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Github,
    Demo,
    Youtube,
    Figma,
    Documentation,
    Video,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub url: String,
    pub visible: bool,
}

/// The reconciled fields that go into a single project write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledLinks {
    pub links: Vec<Link>,
    pub github_url: String,
    pub demo_url: String,
}

/// Build the editable links list from a stored record.
///
/// A present list is used verbatim. Otherwise the legacy scalars are
/// synthesized into entries, github first, then demo, skipping empties.
pub fn reconcile_on_load(
    links: Option<Vec<Link>>,
    github_url: Option<&str>,
    demo_url: Option<&str>,
) -> Vec<Link> {
    if let Some(links) = links {
        return links;
    }

    let mut synthesized = Vec::new();
    if let Some(url) = github_url.filter(|u| !u.trim().is_empty()) {
        synthesized.push(Link {
            link_type: LinkType::Github,
            url: url.to_string(),
            visible: true,
        });
    }
    if let Some(url) = demo_url.filter(|u| !u.trim().is_empty()) {
        synthesized.push(Link {
            link_type: LinkType::Demo,
            url: url.to_string(),
            visible: true,
        });
    }
    synthesized
}

/// Prepare the edited links list for persistence.
///
/// Entries with blank urls are dropped; the legacy scalars are derived from
/// the first valid github/demo entry (later duplicates survive only inside
/// the list). All three outputs belong to the same document write.
pub fn reconcile_on_save(links: Vec<Link>) -> ReconciledLinks {
    let valid: Vec<Link> = links
        .into_iter()
        .filter(|l| !l.url.trim().is_empty())
        .collect();

    let github_url = valid
        .iter()
        .find(|l| l.link_type == LinkType::Github)
        .map(|l| l.url.clone())
        .unwrap_or_default();

    let demo_url = valid
        .iter()
        .find(|l| l.link_type == LinkType::Demo)
        .map(|l| l.url.clone())
        .unwrap_or_default();

    ReconciledLinks {
        links: valid,
        github_url,
        demo_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(link_type: LinkType, url: &str, visible: bool) -> Link {
        Link {
            link_type,
            url: url.to_string(),
            visible,
        }
    }

    #[test]
    fn test_load_uses_stored_list_verbatim() {
        let stored = vec![link(LinkType::Figma, "https://figma.com/f", false)];
        let loaded = reconcile_on_load(
            Some(stored.clone()),
            Some("https://github.com/x"),
            Some("https://demo.x"),
        );
        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_load_synthesizes_from_legacy_scalars() {
        let loaded = reconcile_on_load(None, Some("https://github.com/x"), Some("https://demo.x"));
        assert_eq!(
            loaded,
            vec![
                link(LinkType::Github, "https://github.com/x", true),
                link(LinkType::Demo, "https://demo.x", true),
            ]
        );
    }

    #[test]
    fn test_load_skips_empty_scalars() {
        let loaded = reconcile_on_load(None, Some("https://github.com/x"), Some(""));
        assert_eq!(loaded, vec![link(LinkType::Github, "https://github.com/x", true)]);

        assert!(reconcile_on_load(None, None, None).is_empty());
        assert!(reconcile_on_load(None, Some("  "), Some("")).is_empty());
    }

    #[test]
    fn test_save_prunes_blank_urls() {
        let reconciled = reconcile_on_save(vec![
            link(LinkType::Demo, "", true),
            link(LinkType::Other, "https://x.io", false),
        ]);
        assert_eq!(reconciled.links, vec![link(LinkType::Other, "https://x.io", false)]);
        assert_eq!(reconciled.github_url, "");
        assert_eq!(reconciled.demo_url, "");
    }

    #[test]
    fn test_save_derives_scalars_from_first_valid_entries() {
        let reconciled = reconcile_on_save(vec![
            link(LinkType::Github, "", true),
            link(LinkType::Github, "https://github.com/first", true),
            link(LinkType::Github, "https://github.com/second", true),
            link(LinkType::Demo, "https://demo.x", false),
        ]);
        assert_eq!(reconciled.github_url, "https://github.com/first");
        assert_eq!(reconciled.demo_url, "https://demo.x");
        // Duplicates are preserved inside the list
        assert_eq!(reconciled.links.len(), 3);
    }

    #[test]
    fn test_legacy_round_trip_is_loss_free() {
        // Legacy record: github scalar only, no stored list
        let loaded = reconcile_on_load(None, Some("https://github.com/x"), Some(""));
        let saved = reconcile_on_save(loaded);

        assert_eq!(
            saved.links,
            vec![link(LinkType::Github, "https://github.com/x", true)]
        );
        assert_eq!(saved.github_url, "https://github.com/x");
        assert_eq!(saved.demo_url, "");
    }

    #[test]
    fn test_link_type_wire_names() {
        let l = link(LinkType::Documentation, "https://docs.x", true);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["type"], "documentation");
        assert_eq!(json["visible"], true);

        let parsed: Link = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, l);
    }
}

//! Link extraction and filtering
//!
//! Hub pages list their outbound links as plain page titles. These are turned
//! into [`Link`] records and optionally narrowed down by a keyword.

/// Where a linked page lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A page in the hub's own project
    Internal,
    /// A page in another project (`/project/page`)
    CrossProject,
}

/// A page to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub name: String,
    pub project: Option<String>,
}

impl Link {
    /// A link to a page in the hub's project
    pub fn internal(name: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Internal,
            name: name.into(),
            project: None,
        }
    }

    /// A link to a page in another project
    pub fn cross_project(project: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::CrossProject,
            name: name.into(),
            project: Some(project.into()),
        }
    }

    /// Project to fetch this page from
    pub fn target_project<'a>(&'a self, hub_project: &'a str) -> &'a str {
        match (self.kind, self.project.as_deref()) {
            (LinkKind::CrossProject, Some(project)) => project,
            _ => hub_project,
        }
    }

    /// Page title in the form the service expects in URLs
    pub fn page_name(&self) -> String {
        normalize_page_name(&self.name)
    }
}

/// Converts the hub page's link titles into links, preserving order
///
/// The page API reports same-project links only, so every link is internal.
pub fn extract_links(raw_links: &[String]) -> Vec<Link> {
    raw_links.iter().map(|name| Link::internal(name.as_str())).collect()
}

/// Keeps links whose name or project contains `keyword`
///
/// Matching ignores case and treats full-width parentheses as their
/// half-width forms. `None` or an empty keyword keeps everything. Order is
/// preserved and duplicates are kept.
pub fn filter_links(links: Vec<Link>, keyword: Option<&str>) -> Vec<Link> {
    let keyword = match keyword {
        Some(k) if !k.is_empty() => normalize_for_match(k),
        _ => return links,
    };

    links
        .into_iter()
        .filter(|link| {
            normalize_for_match(&link.name).contains(&keyword)
                || link
                    .project
                    .as_deref()
                    .is_some_and(|p| normalize_for_match(p).contains(&keyword))
        })
        .collect()
}

/// Replaces full-width parentheses with half-width ones
pub fn normalize_brackets(text: &str) -> String {
    text.replace('（', "(").replace('）', ")")
}

/// Page names in service URLs use underscores instead of spaces
pub fn normalize_page_name(name: &str) -> String {
    name.replace(' ', "_")
}

fn normalize_for_match(text: &str) -> String {
    normalize_brackets(text).to_lowercase()
}

// src/model.rs
// =============================================================================
// The data a crawl produces.
//
// Website mode produces a CrawlResult: URL -> PageRecord, in discovery order.
// Repository mode produces a RepoTree: name -> Node, mirroring the remote
// directory layout.
//
// Both serialize to plain JSON objects. We keep the entries in a Vec and write
// a small Serialize impl so the JSON keys come out in the order we found them
// (a HashMap would shuffle them).
// =============================================================================

use serde::ser::{Serialize, SerializeMap, Serializer};

// One successfully fetched web page
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PageRecord {
    pub title: String,
    pub text: String,
    pub url: String,
    pub links: Vec<String>,
}

/// Pages collected by a website crawl, keyed by absolute URL.
///
/// The website traversal is the only writer and it checks its visited set
/// before every insert, so a URL never appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    pages: Vec<PageRecord>,
}

impl CrawlResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, page: PageRecord) {
        debug_assert!(!self.contains(&page.url), "duplicate page {}", page.url);
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|page| page.url == url)
    }

    /// Pages in the order they were fetched.
    pub fn pages(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.url.as_str())
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pages.len()))?;
        for page in &self.pages {
            map.serialize_entry(&page.url, page)?;
        }
        map.end()
    }
}

// An entry in a repository tree
//
// JSON shape:
//   {"type": "file"}                      content skipped or not valid UTF-8
//   {"type": "file", "content": "..."}    text file
//   {"type": "dir", "content": {...}}     directory with at least one entry
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Dir {
        content: RepoTree,
    },
}

impl Node {
    pub fn file(content: Option<String>) -> Self {
        Node::File { content }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir { .. })
    }

    /// Text of a file node, if it was downloaded.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::File { content } => content.as_deref(),
            Node::Dir { .. } => None,
        }
    }

    /// Children of a directory node.
    pub fn children(&self) -> Option<&RepoTree> {
        match self {
            Node::Dir { content } => Some(content),
            Node::File { .. } => None,
        }
    }
}

/// One directory level of a repository, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoTree {
    entries: Vec<(String, Node)>,
}

impl RepoTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        // The listing API never repeats a name within a directory, but if it
        // did the later entry wins, like a map would.
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = node;
        } else {
            self.entries.push((name, node));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of file nodes in this tree and every subtree.
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                Node::File { .. } => 1,
                Node::Dir { content } => content.file_count(),
            })
            .sum()
    }
}

impl Serialize for RepoTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, node) in &self.entries {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

/// What a crawl returns: the shape depends on which traversal ran.
///
/// Serialized untagged, so callers see the bare mapping.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Website(CrawlResult),
    Repository(RepoTree),
}

impl Snapshot {
    /// Number of top-level entries (pages, or root directory entries).
    pub fn len(&self) -> usize {
        match self {
            Snapshot::Website(pages) => pages.len(),
            Snapshot::Repository(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_website(&self) -> Option<&CrawlResult> {
        match self {
            Snapshot::Website(pages) => Some(pages),
            Snapshot::Repository(_) => None,
        }
    }

    pub fn as_repository(&self) -> Option<&RepoTree> {
        match self {
            Snapshot::Repository(tree) => Some(tree),
            Snapshot::Website(_) => None,
        }
    }
}

use std::collections::BTreeMap;

/// Position of an entry in [`super::SearchIndex`]'s entry table.
pub type EntryId = u32;

/// A node of the prefix tree.
///
/// Each node holds every entry whose normalized display name passes through
/// it, so the entries of a prefix are read straight off the node that the
/// prefix ends on.
#[derive(Debug, Default, Clone)]
pub struct IndexNode {
    children: BTreeMap<char, IndexNode>,
    entries: Vec<EntryId>,
}

impl IndexNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, c: char) -> Option<&IndexNode> {
        self.children.get(&c)
    }

    pub fn children(&self) -> impl Iterator<Item = (char, &IndexNode)> {
        self.children.iter().map(|(c, node)| (*c, node))
    }

    /// Entries attached to this node, in rank order once the index is built.
    pub fn entries(&self) -> &[EntryId] {
        &self.entries
    }

    /// Follow `path` from this node. `None` if any step is missing.
    pub fn descend<I>(&self, path: I) -> Option<&IndexNode>
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = self;
        for c in path {
            node = node.child(c)?;
        }
        Some(node)
    }

    /// Insert `id` on every node along `path`, creating nodes as needed.
    /// The node the path starts from (the root) is left untouched.
    pub(super) fn insert_path<I>(&mut self, path: I, id: EntryId)
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = self;
        for c in path {
            node = node.children.entry(c).or_default();
            node.entries.push(id);
        }
    }

    /// Reorder every entry list by `rank`. Iterative, names can be long.
    pub(super) fn sort_entries_by_rank(&mut self, rank: &[u32]) {
        let mut stack: Vec<&mut IndexNode> = vec![self];
        while let Some(node) = stack.pop() {
            node.entries.sort_unstable_by_key(|id| rank[*id as usize]);
            stack.extend(node.children.values_mut());
        }
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&IndexNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }
}

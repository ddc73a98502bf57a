//! Cursor-based tree traversal.
//!
//! A `TreeWalker` holds only the root it was created over and the next node
//! it will yield. It owns nothing and never mutates the tree; live views
//! layer caching and filtering on top of it.

use crate::arena::{Arena, NodeId};

/// How a walker moves through the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Pre-order over the whole subtree, root included.
    Full,
    /// Pre-order over descendants only.
    ExcludeSelf,
    /// Direct children only; never descends.
    Children,
}

/// A resumable cursor over a fixed root.
///
/// Two fresh walkers over an unmodified tree yield identical sequences.
/// `reset` re-seeds without reallocating; `cloned_from_start` produces an
/// independent cursor so a forced full scan doesn't disturb an in-flight
/// position.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: NodeId,
    mode: WalkMode,
    next: Option<NodeId>,
    pub(crate) reset_count: u32,
}

impl TreeWalker {
    pub fn new(root: NodeId, mode: WalkMode, arena: &Arena) -> Self {
        Self {
            root,
            mode,
            next: Self::seed(root, mode, arena),
            reset_count: 0,
        }
    }

    fn seed(root: NodeId, mode: WalkMode, arena: &Arena) -> Option<NodeId> {
        match mode {
            WalkMode::Full => Some(root),
            WalkMode::ExcludeSelf | WalkMode::Children => arena.first_child(root),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    /// Return the cursor node and advance. `None` once exhausted.
    pub fn next(&mut self, arena: &Arena) -> Option<NodeId> {
        let current = self.next?;
        self.next = match self.mode {
            WalkMode::Children => arena.next_sibling(current),
            WalkMode::Full | WalkMode::ExcludeSelf => self.advance_preorder(current, arena),
        };
        Some(current)
    }

    /// Pre-order step: descend, else next sibling, else climb toward the
    /// root looking for an ancestor with a next sibling. The root is the
    /// traversal boundary — its siblings are never visited.
    fn advance_preorder(&self, current: NodeId, arena: &Arena) -> Option<NodeId> {
        if let Some(child) = arena.first_child(current) {
            return Some(child);
        }
        let mut node = current;
        loop {
            if node == self.root {
                return None;
            }
            if let Some(sibling) = arena.next_sibling(node) {
                return Some(sibling);
            }
            node = arena.parent(node)?;
        }
    }

    /// Re-seed the cursor to its start position.
    pub fn reset(&mut self, arena: &Arena) {
        self.next = Self::seed(self.root, self.mode, arena);
        self.reset_count += 1;
    }

    /// An independent cursor over the same root, at the start position.
    pub fn cloned_from_start(&self, arena: &Arena) -> TreeWalker {
        TreeWalker::new(self.root, self.mode, arena)
    }

    /// Whether `node` falls within this walker's traversal range.
    ///
    /// Walks *up* from `node` (O(depth)); `Children` mode scans the root's
    /// child list instead. In `ExcludeSelf` mode the root itself is not
    /// contained.
    pub fn contains(&self, arena: &Arena, node: NodeId) -> bool {
        match self.mode {
            WalkMode::Children => arena.children(self.root).any(|c| c == node),
            WalkMode::Full => node == self.root || arena.ancestors(node).any(|a| a == self.root),
            WalkMode::ExcludeSelf => {
                node != self.root && arena.ancestors(node).any(|a| a == self.root)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeKind;
    use crate::element::ElementData;
    use crate::tag::Namespace;

    fn element(arena: &mut Arena, name: &str) -> NodeId {
        arena.alloc(NodeKind::Element(ElementData::new(Namespace::Html, name)))
    }

    /// div > (span > em, p), b
    fn fixture(arena: &mut Arena) -> (NodeId, [NodeId; 4]) {
        let root = element(arena, "div");
        let span = element(arena, "span");
        let em = element(arena, "em");
        let p = element(arena, "p");
        let b = element(arena, "b");
        arena.append(root, span);
        arena.append(span, em);
        arena.append(span, p);
        arena.append(root, b);
        (root, [span, em, p, b])
    }

    fn collect(walker: &mut TreeWalker, arena: &Arena) -> Vec<NodeId> {
        let mut out = Vec::new();
        while let Some(id) = walker.next(arena) {
            out.push(id);
        }
        out
    }

    #[test]
    fn test_full_preorder() {
        let mut arena = Arena::new();
        let (root, [span, em, p, b]) = fixture(&mut arena);
        let mut walker = TreeWalker::new(root, WalkMode::Full, &arena);
        assert_eq!(collect(&mut walker, &arena), vec![root, span, em, p, b]);
    }

    #[test]
    fn test_exclude_self_preorder() {
        let mut arena = Arena::new();
        let (root, [span, em, p, b]) = fixture(&mut arena);
        let mut walker = TreeWalker::new(root, WalkMode::ExcludeSelf, &arena);
        assert_eq!(collect(&mut walker, &arena), vec![span, em, p, b]);
    }

    #[test]
    fn test_children_mode_never_descends() {
        let mut arena = Arena::new();
        let (root, [span, _, _, b]) = fixture(&mut arena);
        let mut walker = TreeWalker::new(root, WalkMode::Children, &arena);
        assert_eq!(collect(&mut walker, &arena), vec![span, b]);
    }

    #[test]
    fn test_root_siblings_not_visited() {
        let mut arena = Arena::new();
        let parent = element(&mut arena, "body");
        let (root, _) = fixture(&mut arena);
        let after = element(&mut arena, "footer");
        arena.append(parent, root);
        arena.append(parent, after);

        let mut walker = TreeWalker::new(root, WalkMode::Full, &arena);
        let visited = collect(&mut walker, &arena);
        assert!(!visited.contains(&after));
        assert!(!visited.contains(&parent));
    }

    #[test]
    fn test_empty_tree() {
        let mut arena = Arena::new();
        let lone = element(&mut arena, "div");

        let mut full = TreeWalker::new(lone, WalkMode::Full, &arena);
        assert_eq!(collect(&mut full, &arena), vec![lone]);

        let mut desc = TreeWalker::new(lone, WalkMode::ExcludeSelf, &arena);
        assert_eq!(collect(&mut desc, &arena), Vec::<NodeId>::new());

        let mut kids = TreeWalker::new(lone, WalkMode::Children, &arena);
        assert_eq!(collect(&mut kids, &arena), Vec::<NodeId>::new());
    }

    #[test]
    fn test_reset_replays_sequence() {
        let mut arena = Arena::new();
        let (root, _) = fixture(&mut arena);
        let mut walker = TreeWalker::new(root, WalkMode::ExcludeSelf, &arena);
        let first = collect(&mut walker, &arena);
        walker.reset(&arena);
        assert_eq!(collect(&mut walker, &arena), first);
    }

    #[test]
    fn test_clone_is_independent_of_advanced_original() {
        let mut arena = Arena::new();
        let (root, _) = fixture(&mut arena);
        let mut original = TreeWalker::new(root, WalkMode::ExcludeSelf, &arena);
        let reference = collect(&mut original.clone(), &arena);

        original.next(&arena);
        original.next(&arena);
        let mut cloned = original.cloned_from_start(&arena);
        assert_eq!(collect(&mut cloned, &arena), reference);

        // the original's own position is untouched by the clone
        let rest = collect(&mut original, &arena);
        assert_eq!(rest, reference[2..]);
    }

    #[test]
    fn test_contains() {
        let mut arena = Arena::new();
        let (root, [span, em, _, b]) = fixture(&mut arena);
        let outside = element(&mut arena, "div");

        let full = TreeWalker::new(root, WalkMode::Full, &arena);
        assert!(full.contains(&arena, root));
        assert!(full.contains(&arena, em));
        assert!(!full.contains(&arena, outside));

        let desc = TreeWalker::new(root, WalkMode::ExcludeSelf, &arena);
        assert!(!desc.contains(&arena, root));
        assert!(desc.contains(&arena, em));

        let kids = TreeWalker::new(root, WalkMode::Children, &arena);
        assert!(kids.contains(&arena, span));
        assert!(kids.contains(&arena, b));
        assert!(!kids.contains(&arena, em));
        assert!(!kids.contains(&arena, root));
    }
}

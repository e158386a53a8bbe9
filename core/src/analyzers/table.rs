use log::{debug, warn};

use super::err::ScopeError;
use super::output::ScopeNode;

/// Position inside one scope: which child scope comes next, and whether a
/// `yield` has been seen in this scope so far.
#[derive(Debug, Clone, Copy)]
struct ScopeRecord<'s> {
    cursor: usize,
    is_generator: bool,
    scope: &'s ScopeNode,
}

/// Stack-discipline cursor over an externally supplied scope tree.
///
/// Lowering calls `enter_scope` each time it descends into a function,
/// lambda or comprehension body and `exit_scope` when it leaves; the tracker
/// binds each descent to the next unconsumed child of the current scope.
pub struct ScopeTracker<'s> {
    current: ScopeRecord<'s>,
    records: Vec<ScopeRecord<'s>>,
}

impl<'s> ScopeTracker<'s> {
    pub fn new(root: &'s ScopeNode) -> Self {
        ScopeTracker {
            current: ScopeRecord {
                cursor: 0,
                is_generator: false,
                scope: root,
            },
            records: Vec::new(),
        }
    }

    /// ------- Scope Helpers -------

    pub fn enter_scope(&mut self) -> Result<(), ScopeError> {
        let parent = self.current;
        let child = parent.scope.children.get(parent.cursor).ok_or_else(|| {
            ScopeError::with(
                parent.scope.name.clone(),
                parent.cursor,
                parent.scope.children.len(),
            )
        })?;
        self.records.push(parent);
        self.current = ScopeRecord {
            cursor: 0,
            is_generator: false,
            scope: child,
        };
        debug!(
            "enter scope '{}' ({:?}) at depth {}",
            child.name,
            child.kind,
            self.records.len()
        );
        Ok(())
    }

    /// Leaves the current scope, resuming the parent one child further on.
    pub fn exit_scope(&mut self) {
        match self.records.pop() {
            Some(parent) => {
                debug!("exit scope '{}'", self.current.scope.name);
                self.current = parent;
                self.current.cursor += 1;
            }
            None => warn!("exit_scope called at the root scope; ignored"),
        }
    }

    pub fn depth(&self) -> usize {
        self.records.len()
    }

    /// Index of the child scope the next `enter_scope` binds to.
    pub fn cursor(&self) -> usize {
        self.current.cursor
    }

    pub fn current_scope(&self) -> &'s ScopeNode {
        self.current.scope
    }

    /// Child scopes of the current scope not yet entered.
    pub fn remaining_children(&self) -> usize {
        self.current
            .scope
            .children
            .len()
            .saturating_sub(self.current.cursor)
    }

    /// ------- Generator Helpers -------

    pub fn mark_generator(&mut self) {
        self.current.is_generator = true;
    }

    pub fn is_generator(&self) -> bool {
        self.current.is_generator
    }

    /// ------- Symbol Helpers -------

    pub fn locals(&self) -> &'s [String] {
        &self.current.scope.locals
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.current.scope.is_global(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ScopeKind;

    fn tree() -> ScopeNode {
        ScopeNode::module("m")
            .with_child(
                ScopeNode::function("f")
                    .with_locals(&["x"])
                    .with_child(ScopeNode::lambda()),
            )
            .with_child(ScopeNode::function("g").with_globals(&["c"]))
    }

    #[test]
    fn enter_binds_children_in_order() {
        let root = tree();
        let mut tracker = ScopeTracker::new(&root);

        tracker.enter_scope().unwrap();
        assert_eq!(tracker.current_scope().name, "f");
        assert_eq!(tracker.locals(), ["x".to_string()]);

        tracker.enter_scope().unwrap();
        assert_eq!(tracker.current_scope().kind, ScopeKind::Lambda);
        tracker.exit_scope();
        tracker.exit_scope();

        assert_eq!(tracker.cursor(), 1);
        tracker.enter_scope().unwrap();
        assert_eq!(tracker.current_scope().name, "g");
        assert!(tracker.is_global("c"));
        assert!(!tracker.is_global("x"));
        tracker.exit_scope();

        assert_eq!(tracker.depth(), 0);
        assert_eq!(tracker.remaining_children(), 0);
    }

    #[test]
    fn generator_flag_is_per_scope() {
        let root = tree();
        let mut tracker = ScopeTracker::new(&root);

        tracker.enter_scope().unwrap();
        tracker.mark_generator();
        tracker.enter_scope().unwrap();
        assert!(!tracker.is_generator());
        tracker.exit_scope();
        assert!(tracker.is_generator());
        tracker.exit_scope();
        assert!(!tracker.is_generator());
    }

    #[test]
    fn entering_past_the_last_child_fails() {
        let root = ScopeNode::module("m");
        let mut tracker = ScopeTracker::new(&root);
        let err = tracker.enter_scope().unwrap_err();
        assert_eq!(err.requested(), 0);
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn exit_at_root_is_ignored() {
        let root = tree();
        let mut tracker = ScopeTracker::new(&root);
        tracker.exit_scope();
        assert_eq!(tracker.cursor(), 0);
        assert_eq!(tracker.depth(), 0);
    }
}

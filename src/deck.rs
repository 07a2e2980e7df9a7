use std::collections::HashSet;

/// Minimal capability the deck needs from a card: a stable unique id.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Like,
    Pass,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Like => "like",
            Decision::Pass => "pass",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    pub id: String,
    pub decision: Decision,
}

/// Walks an externally supplied queue of candidates, one like/pass decision
/// per step, with single-step undo and per-card expanded display state.
///
/// The deck never reorders or refetches the queue and never errors: calls
/// that make no sense in the current state (undo with nothing to undo,
/// like/pass past the end) are absorbed as no-ops so UI controls can be
/// wired to it without guards.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeDeck<T: Identified> {
    queue: Vec<T>,
    cursor: usize,
    history: Vec<DecisionRecord>,
    expanded: HashSet<String>,
}

impl<T: Identified> SwipeDeck<T> {
    pub fn new(queue: Vec<T>) -> Self {
        Self {
            queue,
            cursor: 0,
            history: Vec::new(),
            expanded: HashSet::new(),
        }
    }

    /// The candidate awaiting a decision, if any.
    pub fn current(&self) -> Option<&T> {
        self.queue.get(self.cursor)
    }

    /// The candidate behind the current one, for the card-stack preview.
    pub fn peek_next(&self) -> Option<&T> {
        self.queue.get(self.cursor + 1)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn like(&mut self) {
        self.advance(Decision::Like);
    }

    pub fn pass(&mut self) {
        self.advance(Decision::Pass);
    }

    /// Reverses the most recent decision. Expansion state cleared by that
    /// decision is not restored. No-op when nothing has been decided.
    pub fn undo(&mut self) {
        if self.history.pop().is_some() {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Flips expanded display state for any id, queued or not.
    pub fn toggle_expand(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_owned());
        }
    }

    fn advance(&mut self, decision: Decision) {
        let Some(card) = self.queue.get(self.cursor) else {
            return;
        };
        let id = card.id().to_owned();
        self.expanded.remove(&id);
        self.history.push(DecisionRecord { id, decision });
        self.cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Card(&'static str);

    impl Identified for Card {
        fn id(&self) -> &str {
            self.0
        }
    }

    fn deck(ids: &[&'static str]) -> SwipeDeck<Card> {
        SwipeDeck::new(ids.iter().copied().map(Card).collect())
    }

    fn assert_invariants(deck: &SwipeDeck<Card>) {
        assert_eq!(deck.history().len(), deck.cursor());
        assert!(deck.cursor() <= deck.len());
    }

    #[test]
    fn like_records_decision_and_advances() {
        let mut deck = deck(&["a", "b", "c"]);
        assert_eq!(deck.current().unwrap().id(), "a");
        assert_eq!(deck.peek_next().unwrap().id(), "b");

        deck.like();

        assert_eq!(deck.cursor(), 1);
        assert_eq!(
            deck.history(),
            &[DecisionRecord {
                id: "a".into(),
                decision: Decision::Like,
            }]
        );
        assert_eq!(deck.current().unwrap().id(), "b");
        assert_invariants(&deck);
    }

    #[test]
    fn undo_reverses_the_last_decision() {
        let mut deck = deck(&["a", "b", "c"]);
        deck.like();
        deck.undo();

        assert_eq!(deck.cursor(), 0);
        assert!(deck.history().is_empty());
        assert_eq!(deck.current().unwrap().id(), "a");
        assert_invariants(&deck);
    }

    #[test]
    fn advancing_clears_expanded_state_for_the_consumed_card() {
        let mut deck = deck(&["x"]);
        deck.toggle_expand("x");
        assert!(deck.is_expanded("x"));

        deck.pass();

        assert_eq!(deck.cursor(), 1);
        assert_eq!(deck.history()[0].decision, Decision::Pass);
        assert!(!deck.is_expanded("x"));
        assert!(deck.current().is_none());
        assert_invariants(&deck);
    }

    #[test]
    fn empty_queue_absorbs_everything() {
        let mut deck = deck(&[]);
        assert!(deck.current().is_none());
        assert!(deck.peek_next().is_none());

        deck.like();
        deck.pass();
        deck.undo();

        assert_eq!(deck.cursor(), 0);
        assert!(deck.history().is_empty());
        assert!(!deck.is_expanded("anything"));
        assert_invariants(&deck);
    }

    #[test]
    fn like_past_exhaustion_is_a_no_op() {
        let mut deck = deck(&["a", "b"]);
        deck.like();
        deck.like();
        assert!(deck.is_exhausted());

        deck.like();

        assert_eq!(deck.cursor(), 2);
        assert_eq!(deck.history().len(), 2);
        assert_invariants(&deck);
    }

    #[test]
    fn undo_with_empty_history_is_a_no_op() {
        let mut deck = deck(&["a"]);
        deck.toggle_expand("a");
        let before = deck.clone();

        deck.undo();

        assert_eq!(deck, before);
    }

    #[test]
    fn full_walk_then_full_rewind_returns_to_start() {
        let mut deck = deck(&["a", "b", "c", "d"]);
        for _ in 0..4 {
            deck.like();
            assert_invariants(&deck);
        }
        assert!(deck.is_exhausted());

        for _ in 0..4 {
            deck.undo();
            assert_invariants(&deck);
        }

        assert_eq!(deck.cursor(), 0);
        assert!(deck.history().is_empty());
        assert_eq!(deck.current().unwrap().id(), "a");
        assert!(!deck.is_expanded("a"));
    }

    #[test]
    fn toggle_expand_twice_restores_membership() {
        let mut deck = deck(&["a", "b"]);
        deck.toggle_expand("b");
        deck.toggle_expand("b");
        assert!(!deck.is_expanded("b"));

        // Also from the expanded side.
        deck.toggle_expand("a");
        assert!(deck.is_expanded("a"));
        deck.toggle_expand("a");
        deck.toggle_expand("a");
        assert!(deck.is_expanded("a"));
    }

    #[test]
    fn toggle_expand_accepts_ids_outside_the_queue() {
        let mut deck = deck(&["a"]);
        deck.toggle_expand("ghost");
        assert!(deck.is_expanded("ghost"));
        // Advancing only clears the consumed card's id.
        deck.like();
        assert!(deck.is_expanded("ghost"));
    }

    #[test]
    fn undo_does_not_restore_expansion() {
        let mut deck = deck(&["a", "b"]);
        deck.toggle_expand("a");
        deck.like();
        deck.undo();

        assert_eq!(deck.current().unwrap().id(), "a");
        assert!(!deck.is_expanded("a"));
    }

    #[test]
    fn interleaved_decisions_keep_history_aligned_with_cursor() {
        let mut deck = deck(&["a", "b", "c"]);
        deck.like();
        deck.pass();
        deck.undo();
        deck.like();
        deck.like();

        assert_eq!(deck.cursor(), 3);
        assert_eq!(deck.history().len(), 3);
        assert_eq!(deck.history()[1].id, "b");
        assert_eq!(deck.history()[1].decision, Decision::Like);
        assert!(deck.is_exhausted());
        assert_invariants(&deck);
    }

    #[test]
    fn decision_wire_labels() {
        assert_eq!(Decision::Like.as_str(), "like");
        assert_eq!(Decision::Pass.as_str(), "pass");
    }
}

//! Interactive editing session over one initial graph.

use std::sync::OnceLock;

use indexmap::IndexSet;
use tracing::debug;

use crate::embed::embed_action_nodes;
use crate::view::{HiddenNeighbors, ViewFilter, apply_view, hidden_neighbors, removal_cascade};
use crate::{Direction, Graph, History, Id, LayoutDirection, Removal, ViewState};

/// Owns the raw initial graph and an undoable [`ViewState`].
///
/// Every structural action goes through [`History::commit`]; selecting a
/// node does not. The rendered graph is rebuilt from the initial graph on
/// demand and cached until the view state changes.
#[derive(Debug)]
pub struct GraphEditor {
    raw: Graph,
    embedded: OnceLock<Graph>,
    history: History<ViewState>,
    rendered: OnceLock<Graph>,
}

impl GraphEditor {
    pub fn new(raw: Graph) -> Self {
        Self::with_state(raw, ViewState::default())
    }

    /// Start from a restored view state, for example one decoded from a URL
    /// fragment. The restored state is the bottom of the undo stack.
    pub fn with_state(raw: Graph, state: ViewState) -> Self {
        Self {
            raw,
            embedded: OnceLock::new(),
            history: History::new(state),
            rendered: OnceLock::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        self.history.current()
    }

    pub fn history(&self) -> &History<ViewState> {
        &self.history
    }

    pub fn raw_graph(&self) -> &Graph {
        &self.raw
    }

    /// The graph views are replayed against: the raw graph, or its embedded
    /// variant when `embed_special_actions` is on.
    pub fn initial_graph(&self) -> &Graph {
        if self.state().embed_special_actions {
            self.embedded.get_or_init(|| embed_action_nodes(&self.raw))
        } else {
            &self.raw
        }
    }

    /// The initial graph filtered by the current view state.
    pub fn rendered(&self) -> &Graph {
        self.rendered.get_or_init(|| {
            let filter = ViewFilter::from(self.state());
            apply_view(self.initial_graph(), &filter)
        })
    }

    /// Hidden parent and child counts of `id` in the rendered graph.
    pub fn hidden_neighbors(&self, id: &str) -> HiddenNeighbors {
        hidden_neighbors(self.initial_graph(), self.rendered(), id)
    }

    pub fn select_node(&mut self, id: Option<&str>) {
        self.history.current_mut().selected_id = id.map(Id::from);
    }

    /// Show only what `id` reaches. Clears every reveal exception.
    pub fn focus_node(&mut self, id: Option<&str>) {
        let focus = id.map(Id::from);
        self.commit(|state| {
            state.focus_id = focus;
            state.white_list_ids.clear();
        });
    }

    pub fn change_layout(&mut self, layout_direction: LayoutDirection) {
        self.commit(|state| state.layout_direction = layout_direction);
    }

    pub fn change_group_by_modules(&mut self, group_by_modules: bool) {
        self.commit(|state| state.group_by_modules = group_by_modules);
    }

    pub fn change_embed_special_actions(&mut self, embed_special_actions: bool) {
        self.commit(|state| state.embed_special_actions = embed_special_actions);
    }

    /// Hide a node (or cluster) and the private subtree behind it.
    ///
    /// Reveal exceptions for anything the removal sweeps up are dropped so
    /// the removal actually takes effect.
    pub fn remove_node(&mut self, id: &str, dir: Direction) {
        let cascade = removal_cascade(self.initial_graph(), id, dir);
        debug!(id, dir = dir.as_str(), cascade = cascade.len(), "removing node from view");

        let removal = Removal::new(id, dir);
        self.commit(|state| {
            state
                .white_list_ids
                .retain(|w| !cascade.contains(w) && w.as_str() != removal.id.as_str());
            state.removed_ids.push(removal);
            state.selected_id = None;
        });
    }

    /// Bring back the direct parents (`Backward`) or children (`Forward`) of
    /// `id` as reveal exceptions, selecting the first of them.
    ///
    /// Returns `false` without creating a checkpoint when there is nothing to
    /// reveal.
    pub fn reveal_node(&mut self, id: &str, dir: Direction) -> bool {
        let revealed: Vec<Id> = match dir {
            Direction::Backward => self.initial_graph().parent_ids(id).cloned().collect(),
            Direction::Forward => self.initial_graph().child_ids(id).cloned().collect(),
        };
        let Some(first) = revealed.first().cloned() else {
            return false;
        };

        self.commit(|state| {
            let mut white_list: IndexSet<Id> = state.white_list_ids.drain(..).collect();
            white_list.extend(revealed);
            state.white_list_ids = white_list.into_iter().collect();
            state.selected_id = Some(first);
        });
        true
    }

    /// Undo every removal of `id`.
    pub fn restore_node(&mut self, id: &str) {
        self.commit(|state| state.removed_ids.retain(|r| r.id.as_str() != id));
    }

    pub fn restore_all(&mut self) {
        self.commit(|state| state.removed_ids.clear());
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.rendered.take();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.rendered.take();
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut ViewState),
    {
        self.history.commit(mutate);
        self.rendered.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Node};

    /// root -> a -> b, root -> c, d -> c
    fn editor() -> GraphEditor {
        let mut graph = Graph::new();
        for (id, module) in [("root", "app"), ("a", "app/x"), ("b", "app/x"), ("c", "lib"), ("d", "lib")] {
            graph.insert_node(id, Node::component(id, Location::new("f.tsx", module)));
        }
        for (from, to) in [("root", "a"), ("a", "b"), ("root", "c"), ("d", "c")] {
            graph.add_relation(from, to);
        }
        GraphEditor::new(graph)
    }

    fn rendered_ids(editor: &GraphEditor) -> Vec<String> {
        editor.rendered().node_ids().map(|id| id.to_string()).collect()
    }

    #[test]
    fn history_round_trip() {
        let mut editor = editor();
        let start = editor.state().clone();

        editor.remove_node("a", Direction::Forward);
        editor.focus_node(Some("root"));
        let focused = editor.state().clone();

        assert!(editor.undo());
        assert!(editor.undo());
        assert_eq!(editor.state(), &start);
        assert!(!editor.undo());

        assert!(editor.redo());
        assert!(editor.redo());
        assert_eq!(editor.state(), &focused);
        assert!(!editor.redo());
    }

    #[test]
    fn selection_is_not_undoable() {
        let mut editor = editor();
        editor.select_node(Some("a"));
        assert_eq!(editor.state().selected_id, Some(Id::from("a")));
        assert!(!editor.can_undo());
    }

    #[test]
    fn remove_and_restore_update_rendering() {
        let mut editor = editor();
        editor.select_node(Some("a"));
        editor.remove_node("a", Direction::Forward);
        assert_eq!(rendered_ids(&editor), vec!["root", "c", "d"]);
        assert_eq!(editor.state().selected_id, None);
        assert_eq!(editor.hidden_neighbors("root").forward, 1);

        editor.restore_node("a");
        assert_eq!(editor.rendered().node_count(), 5);
        assert!(editor.state().removed_ids.is_empty());
    }

    #[test]
    fn reveal_then_remove_drops_exceptions() {
        let mut editor = editor();
        editor.remove_node("root", Direction::Forward);
        assert_eq!(rendered_ids(&editor), vec!["c", "d"]);

        assert!(editor.reveal_node("root", Direction::Forward));
        assert_eq!(editor.state().white_list_ids, vec![Id::from("a"), Id::from("c")]);
        assert_eq!(editor.state().selected_id, Some(Id::from("a")));
        assert_eq!(rendered_ids(&editor), vec!["a", "c", "d"]);

        editor.remove_node("a", Direction::Forward);
        assert_eq!(editor.state().white_list_ids, vec![Id::from("c")]);
        assert_eq!(rendered_ids(&editor), vec!["c", "d"]);
    }

    #[test]
    fn reveal_without_neighbours_is_not_a_checkpoint() {
        let mut editor = editor();
        assert!(!editor.reveal_node("b", Direction::Forward));
        assert!(!editor.reveal_node("ghost", Direction::Backward));
        assert!(!editor.can_undo());
    }

    #[test]
    fn removing_a_cluster_clears_member_exceptions() {
        let mut editor = editor();
        editor.reveal_node("root", Direction::Forward);
        editor.remove_node("cluster_app", Direction::Forward);
        assert_eq!(editor.state().white_list_ids, vec![Id::from("c")]);
        assert_eq!(rendered_ids(&editor), vec!["c", "d"]);
    }

    #[test]
    fn focus_clears_white_list() {
        let mut editor = editor();
        editor.reveal_node("c", Direction::Backward);
        editor.focus_node(Some("a"));
        assert!(editor.state().white_list_ids.is_empty());
        assert_eq!(rendered_ids(&editor), vec!["a", "b"]);

        editor.focus_node(None);
        assert_eq!(editor.rendered().node_count(), 5);
    }

    #[test]
    fn toggling_embedding_switches_initial_graph() {
        let mut graph = Graph::new();
        graph.insert_node("e", Node::epic("loadEpic", Location::new("e.ts", "svc")));
        graph.insert_node("s", Node::action("loadSuccess", Location::new("a.ts", "svc")));
        graph.add_relation("e", "s");

        let mut editor = GraphEditor::new(graph);
        assert_eq!(editor.rendered().node_count(), 1);
        editor.change_embed_special_actions(false);
        assert_eq!(editor.rendered().node_count(), 2);
        editor.undo();
        assert_eq!(editor.rendered().node_count(), 1);
    }

    #[test]
    fn display_preferences_are_checkpoints() {
        let mut editor = editor();
        editor.change_layout(LayoutDirection::TB);
        editor.change_group_by_modules(false);
        assert_eq!(editor.history().undo_depth(), 2);
        editor.restore_all();
        editor.undo();
        editor.undo();
        assert_eq!(editor.state().layout_direction, LayoutDirection::TB);
        assert!(editor.state().group_by_modules);
    }
}

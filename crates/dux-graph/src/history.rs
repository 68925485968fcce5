//! Linear undo/redo over snapshots of a value.

/// A current value with a back stack of earlier values and a forward stack
/// of undone ones.
///
/// Snapshots are whole values, so `T` should be small. In this crate it is
/// always a [`ViewState`](crate::ViewState), never a graph.
#[derive(Debug, Clone, Default)]
pub struct History<T> {
    current: T,
    past: Vec<T>,
    future: Vec<T>,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Edit the current value without creating an undo checkpoint.
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// Checkpoint the current value, then apply `mutate` to it.
    ///
    /// Any undone values are discarded.
    pub fn commit<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut T),
    {
        self.past.push(self.current.clone());
        self.future.clear();
        mutate(&mut self.current);
    }

    /// Step back one checkpoint. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.future.push(undone);
        true
    }

    /// Step forward one checkpoint. Returns `false` when nothing was undone.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let redone = std::mem::replace(&mut self.current, next);
        self.past.push(redone);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn into_current(self) -> T {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_and_redo_walk_the_stacks() {
        let mut history = History::new(0);
        history.commit(|v| *v = 1);
        history.commit(|v| *v = 2);

        assert!(history.undo());
        assert_eq!(*history.current(), 1);
        assert!(history.undo());
        assert_eq!(*history.current(), 0);
        assert!(!history.undo());
        assert_eq!(*history.current(), 0);

        assert!(history.redo());
        assert!(history.redo());
        assert_eq!(*history.current(), 2);
        assert!(!history.redo());
    }

    #[test]
    fn commit_clears_redo() {
        let mut history = History::new("a".to_string());
        history.commit(|v| v.push('b'));
        history.undo();
        assert!(history.can_redo());

        history.commit(|v| v.push('c'));
        assert!(!history.can_redo());
        assert_eq!(history.current(), "ac");
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn current_mut_is_not_a_checkpoint() {
        let mut history = History::new(vec![1]);
        history.current_mut().push(2);
        assert!(!history.can_undo());
        assert_eq!(history.into_current(), vec![1, 2]);
    }
}

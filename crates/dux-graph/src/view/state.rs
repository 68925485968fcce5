//! View state values shared by the editor, the history and the codec.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Direction, Error, Id};

/// Graph layout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    LR,
    /// Top to bottom.
    TB,
}

impl LayoutDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutDirection::LR => "LR",
            LayoutDirection::TB => "TB",
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LR" | "lr" => Ok(LayoutDirection::LR),
            "TB" | "tb" => Ok(LayoutDirection::TB),
            other => Err(Error::InvalidViewState(format!(
                "unknown layout direction '{other}', expected LR or TB"
            ))),
        }
    }
}

/// One user-issued removal: a node or cluster id and the cascade direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Removal {
    pub id: Id,
    pub dir: Direction,
}

impl Removal {
    pub fn new(id: impl Into<Id>, dir: Direction) -> Self {
        Self { id: id.into(), dir }
    }
}

/// Everything the user has done to the view, in a form that can be
/// persisted, compared and pushed onto the undo stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub selected_id: Option<Id>,
    pub focus_id: Option<Id>,
    /// Removals in the order they were issued.
    pub removed_ids: Vec<Removal>,
    /// Ids protected from removal cascades.
    pub white_list_ids: Vec<Id>,
    pub layout_direction: LayoutDirection,
    pub group_by_modules: bool,
    pub embed_special_actions: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_id: None,
            focus_id: None,
            removed_ids: Vec::new(),
            white_list_ids: Vec::new(),
            layout_direction: LayoutDirection::LR,
            group_by_modules: true,
            embed_special_actions: true,
        }
    }
}

impl ViewState {
    /// True when nothing is hidden and nothing is focused.
    pub fn shows_everything(&self) -> bool {
        self.removed_ids.is_empty() && self.focus_id.is_none()
    }

    pub fn is_removed(&self, id: &str) -> bool {
        self.removed_ids.iter().any(|r| r.id.as_str() == id)
    }

    pub fn is_white_listed(&self, id: &str) -> bool {
        self.white_list_ids.iter().any(|w| w.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_grouped_embedded_lr() {
        let state = ViewState::default();
        assert_eq!(state.layout_direction, LayoutDirection::LR);
        assert!(state.group_by_modules);
        assert!(state.embed_special_actions);
        assert!(state.shows_everything());
    }

    #[test]
    fn serde_uses_camel_case_and_fills_defaults() {
        let state: ViewState = serde_json::from_str(
            r#"{"focusId": "a", "removedIds": [{"id": "b", "dir": "backward"}], "layoutDirection": "TB"}"#,
        )
        .unwrap();
        assert_eq!(state.focus_id, Some(Id::from("a")));
        assert_eq!(state.removed_ids, vec![Removal::new("b", Direction::Backward)]);
        assert_eq!(state.layout_direction, LayoutDirection::TB);
        assert!(state.embed_special_actions);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["whiteListIds"], serde_json::json!([]));
        assert_eq!(json["groupByModules"], serde_json::json!(true));
    }

    #[test]
    fn layout_direction_parses() {
        assert_eq!("TB".parse::<LayoutDirection>().unwrap(), LayoutDirection::TB);
        assert_eq!("lr".parse::<LayoutDirection>().unwrap(), LayoutDirection::LR);
        assert!("diagonal".parse::<LayoutDirection>().is_err());
    }
}

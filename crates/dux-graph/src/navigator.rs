//! Arrow-key movement between rendered node rectangles.

use serde::{Deserialize, Serialize};

use crate::Id;

/// Cross-axis misalignment costs this much per unit of gap.
const CROSS_AXIS_WEIGHT: f64 = 10.0;
/// Center drift costs this much per unit.
const CENTER_ALIGN_WEIGHT: f64 = 0.1;

/// Screen-space box of a rendered node. `y` grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub id: Id,
    pub cx: f64,
    pub cy: f64,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Box from its top-left corner and size.
    pub fn from_bounds(id: impl Into<Id>, left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            cx: left + width / 2.0,
            cy: top + height / 2.0,
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowDirection {
    pub fn opposite(self) -> Self {
        match self {
            ArrowDirection::Up => ArrowDirection::Down,
            ArrowDirection::Down => ArrowDirection::Up,
            ArrowDirection::Left => ArrowDirection::Right,
            ArrowDirection::Right => ArrowDirection::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Move {
    from: Id,
    to: Id,
    direction: ArrowDirection,
}

/// Picks the next node for an arrow key press.
///
/// Remembers the last move so that reversing direction immediately retraces
/// it instead of jumping to some other equidistant node.
#[derive(Debug, Clone, Default)]
pub struct SpatialNavigator {
    last_move: Option<Move>,
}

impl SpatialNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last move. Call on any mouse interaction.
    pub fn reset(&mut self) {
        self.last_move = None;
    }

    /// Id of the node to move to from `current`, or `None` if `current` is
    /// not among `rects` or nothing lies in that direction.
    pub fn find_next(&mut self, current: &str, direction: ArrowDirection, rects: &[Rect]) -> Option<Id> {
        let current_rect = rects.iter().find(|r| r.id.as_str() == current)?;

        let target = match self.retrace_target(current, direction, rects) {
            Some(source) => source,
            None => best_candidate(current_rect, direction, rects)?.id.clone(),
        };

        self.last_move = Some(Move {
            from: current_rect.id.clone(),
            to: target.clone(),
            direction,
        });
        Some(target)
    }

    fn retrace_target(&self, current: &str, direction: ArrowDirection, rects: &[Rect]) -> Option<Id> {
        let last = self.last_move.as_ref()?;
        if last.to.as_str() != current || direction != last.direction.opposite() {
            return None;
        }
        rects
            .iter()
            .any(|r| r.id == last.from)
            .then(|| last.from.clone())
    }
}

fn best_candidate<'a>(current: &Rect, direction: ArrowDirection, rects: &'a [Rect]) -> Option<&'a Rect> {
    let mut best: Option<(&Rect, f64)> = None;
    for candidate in rects.iter().filter(|r| r.id != current.id) {
        let Some(score) = score(current, candidate, direction) else {
            continue;
        };
        if best.is_none_or(|(_, min)| score < min) {
            best = Some((candidate, score));
        }
    }
    best.map(|(rect, _)| rect)
}

/// Score of moving from `src` to `cand`; `None` unless `cand` lies entirely
/// on the `direction` side of `src`. Lower is better.
fn score(src: &Rect, cand: &Rect, direction: ArrowDirection) -> Option<f64> {
    let (main, cross, center) = match direction {
        ArrowDirection::Right if cand.left >= src.right => (
            cand.left - src.right,
            cross_gap(src.top, src.bottom, cand.top, cand.bottom),
            (cand.cy - src.cy).abs(),
        ),
        ArrowDirection::Left if cand.right <= src.left => (
            src.left - cand.right,
            cross_gap(src.top, src.bottom, cand.top, cand.bottom),
            (cand.cy - src.cy).abs(),
        ),
        ArrowDirection::Down if cand.top >= src.bottom => (
            cand.top - src.bottom,
            cross_gap(src.left, src.right, cand.left, cand.right),
            (cand.cx - src.cx).abs(),
        ),
        ArrowDirection::Up if cand.bottom <= src.top => (
            src.top - cand.bottom,
            cross_gap(src.left, src.right, cand.left, cand.right),
            (cand.cx - src.cx).abs(),
        ),
        _ => return None,
    };
    Some(main + cross * CROSS_AXIS_WEIGHT + center * CENTER_ALIGN_WEIGHT)
}

/// Zero when the spans overlap, otherwise the gap between them.
fn cross_gap(start1: f64, end1: f64, start2: f64, end2: f64) -> f64 {
    let overlap = end1.min(end2) - start1.max(start2);
    if overlap > 0.0 {
        0.0
    } else {
        (start1.max(start2) - end1.min(end2)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: &str, left: f64, top: f64) -> Rect {
        Rect::from_bounds(id, left, top, 10.0, 10.0)
    }

    #[test]
    fn prefers_aligned_over_nearer() {
        let rects = vec![
            rect("x", 0.0, 0.0),
            // Slightly closer but below the row.
            rect("low", 15.0, 30.0),
            rect("ahead", 40.0, 2.0),
        ];
        let mut nav = SpatialNavigator::new();
        assert_eq!(nav.find_next("x", ArrowDirection::Right, &rects), Some(Id::from("ahead")));
    }

    #[test]
    fn retrace_wins_over_closer_candidate() {
        let mut nav = SpatialNavigator::new();
        let before = vec![rect("x", 0.0, 0.0), rect("y", 100.0, 0.0)];
        assert_eq!(nav.find_next("x", ArrowDirection::Right, &before), Some(Id::from("y")));

        let after = vec![rect("x", 0.0, 0.0), rect("y", 100.0, 0.0), rect("near", 70.0, 0.0)];
        assert_eq!(nav.find_next("y", ArrowDirection::Left, &after), Some(Id::from("x")));

        nav.reset();
        assert_eq!(nav.find_next("y", ArrowDirection::Left, &after), Some(Id::from("near")));
    }

    #[test]
    fn missing_source_falls_back_to_search() {
        let mut nav = SpatialNavigator::new();
        let before = vec![rect("x", 0.0, 0.0), rect("y", 100.0, 0.0)];
        nav.find_next("x", ArrowDirection::Right, &before);

        let after = vec![rect("y", 100.0, 0.0), rect("near", 70.0, 0.0)];
        assert_eq!(nav.find_next("y", ArrowDirection::Left, &after), Some(Id::from("near")));
    }

    #[test]
    fn nothing_in_direction_or_unknown_current() {
        let rects = vec![rect("x", 0.0, 0.0), rect("y", 100.0, 0.0)];
        let mut nav = SpatialNavigator::new();
        assert_eq!(nav.find_next("x", ArrowDirection::Up, &rects), None);
        assert_eq!(nav.find_next("ghost", ArrowDirection::Right, &rects), None);
    }

    #[test]
    fn vertical_moves_use_horizontal_cross_axis() {
        let rects = vec![rect("x", 0.0, 0.0), rect("below", 0.0, 50.0), rect("diag", 30.0, 20.0)];
        let mut nav = SpatialNavigator::new();
        assert_eq!(nav.find_next("x", ArrowDirection::Down, &rects), Some(Id::from("below")));
        assert_eq!(nav.find_next("below", ArrowDirection::Up, &rects), Some(Id::from("x")));
    }

    #[test]
    fn cross_gap_is_zero_on_overlap() {
        assert_eq!(cross_gap(0.0, 10.0, 5.0, 15.0), 0.0);
        assert_eq!(cross_gap(0.0, 10.0, 20.0, 30.0), 10.0);
        assert_eq!(cross_gap(0.0, 10.0, 10.0, 20.0), 0.0);
    }
}

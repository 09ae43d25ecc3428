//! Visual state projection - per-position values and roles derived from the
//! events applied so far.
//!
//! Comparison and current roles are transient: they are cleared at the start
//! of each tick before the new event's marks land. Sorted and found roles
//! are sticky for the remainder of the run and are never downgraded by a
//! later transient mark.

use serde::{Deserialize, Serialize};

use crate::trace::{AnimationEvent, EventKind};

/// Visual classification of one array position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Default,
    /// Being examined this tick.
    Current,
    /// Part of this tick's comparison or active window.
    Compared,
    /// In final sorted position.
    Sorted,
    /// Matched the search target.
    Found,
}

impl Role {
    /// Sticky roles survive the per-tick transient reset.
    #[inline]
    pub fn is_sticky(self) -> bool {
        matches!(self, Role::Sorted | Role::Found)
    }
}

/// One renderable array position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualElement {
    pub value: u32,
    pub role: Role,
}

/// The renderable projection of an array mid-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualState {
    elements: Vec<VisualElement>,
}

impl VisualState {
    /// Fresh projection with every position in the default role.
    pub fn new(values: &[u32]) -> Self {
        Self {
            elements: values
                .iter()
                .map(|&value| VisualElement {
                    value,
                    role: Role::Default,
                })
                .collect(),
        }
    }

    /// All positions in array order.
    pub fn elements(&self) -> &[VisualElement] {
        &self.elements
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Current values in array order.
    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Role at a position.
    pub fn role(&self, index: usize) -> Option<Role> {
        self.elements.get(index).map(|e| e.role)
    }

    /// Apply one event: reset transient roles, then land the event's marks.
    ///
    /// Out-of-range positions are ignored rather than treated as errors;
    /// a trace can reference the boundary of an emptied search window.
    pub fn apply(&mut self, event: &AnimationEvent) {
        for element in &mut self.elements {
            if !element.role.is_sticky() {
                element.role = Role::Default;
            }
        }

        match &event.kind {
            EventKind::Compare { a, b } => {
                self.mark_transient(*a, Role::Compared);
                self.mark_transient(*b, Role::Compared);
            }
            EventKind::Swap { a, b } => {
                if *a < self.elements.len() && *b < self.elements.len() {
                    let tmp = self.elements[*a].value;
                    self.elements[*a].value = self.elements[*b].value;
                    self.elements[*b].value = tmp;
                }
            }
            EventKind::Overwrite { index, value } => {
                if let Some(element) = self.elements.get_mut(*index) {
                    element.value = *value;
                }
            }
            EventKind::MarkSorted { indices } => {
                for &index in indices {
                    if let Some(element) = self.elements.get_mut(index) {
                        if element.role != Role::Found {
                            element.role = Role::Sorted;
                        }
                    }
                }
            }
            EventKind::Visit { index } => {
                self.mark_transient(*index, Role::Current);
            }
            EventKind::Enqueue { index } => {
                self.mark_transient(*index, Role::Compared);
            }
            EventKind::Found { index } => {
                if let Some(element) = self.elements.get_mut(*index) {
                    element.role = Role::Found;
                }
            }
            EventKind::Narrate => {}
        }
    }

    fn mark_transient(&mut self, index: usize, role: Role) {
        if let Some(element) = self.elements.get_mut(index) {
            if !element.role.is_sticky() {
                element.role = role;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(a: usize, b: usize) -> AnimationEvent {
        AnimationEvent::new(EventKind::Compare { a, b })
    }

    #[test]
    fn test_transient_roles_cleared_each_tick() {
        let mut visual = VisualState::new(&[5, 3, 8]);

        visual.apply(&compare(0, 1));
        assert_eq!(visual.role(0), Some(Role::Compared));
        assert_eq!(visual.role(1), Some(Role::Compared));

        visual.apply(&compare(1, 2));
        assert_eq!(visual.role(0), Some(Role::Default));
        assert_eq!(visual.role(1), Some(Role::Compared));
        assert_eq!(visual.role(2), Some(Role::Compared));
    }

    #[test]
    fn test_swap_exchanges_values() {
        let mut visual = VisualState::new(&[5, 3]);
        visual.apply(&AnimationEvent::new(EventKind::Swap { a: 0, b: 1 }));
        assert_eq!(visual.values(), vec![3, 5]);
    }

    #[test]
    fn test_overwrite_sets_value() {
        let mut visual = VisualState::new(&[4, 2]);
        visual.apply(&AnimationEvent::new(EventKind::Overwrite {
            index: 0,
            value: 2,
        }));
        assert_eq!(visual.values(), vec![2, 2]);
    }

    #[test]
    fn test_sorted_is_sticky() {
        let mut visual = VisualState::new(&[1, 2, 3]);
        visual.apply(&AnimationEvent::new(EventKind::MarkSorted {
            indices: vec![2],
        }));

        // A later comparison touching the sorted position must not
        // downgrade it, this tick or the next.
        visual.apply(&compare(1, 2));
        assert_eq!(visual.role(1), Some(Role::Compared));
        assert_eq!(visual.role(2), Some(Role::Sorted));

        visual.apply(&AnimationEvent::new(EventKind::Narrate));
        assert_eq!(visual.role(1), Some(Role::Default));
        assert_eq!(visual.role(2), Some(Role::Sorted));
    }

    #[test]
    fn test_found_is_sticky_and_wins() {
        let mut visual = VisualState::new(&[7, 9]);
        visual.apply(&AnimationEvent::new(EventKind::Found { index: 1 }));
        visual.apply(&AnimationEvent::new(EventKind::Visit { index: 1 }));
        assert_eq!(visual.role(1), Some(Role::Found));
    }

    #[test]
    fn test_out_of_range_marks_ignored() {
        let mut visual = VisualState::new(&[1, 2]);
        visual.apply(&compare(1, 5));
        assert_eq!(visual.role(1), Some(Role::Compared));
        assert_eq!(visual.len(), 2);
    }
}

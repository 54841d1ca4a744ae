use crate::angle::{self, Direction};
use crate::sim::Phase;
use derive_more::{AsRef, Deref, Display, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WEDGES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jamie", "Avery", "Quinn",
    "Drew",
];

/// A trimmed, non-blank wedge name. Only [`Label::parse`] builds one, and
/// deserialization goes through it too.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, Into, AsRef,
)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Trims `raw`; blank input is not a label.
    pub fn parse(raw: &str) -> Result<Self, WedgeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WedgeError::EmptyLabel);
        }
        Ok(Self::new(trimmed))
    }

    /// Unchecked; callers have already trimmed and rejected blanks.
    pub(crate) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Label {
    type Error = WedgeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WedgeError {
    #[error("Wedge label must not be blank")]
    EmptyLabel,
    #[error("The last wedge cannot be removed")]
    LastWedge,
    #[error("Wedges cannot be removed while the wheel is {0}")]
    Busy(Phase),
    #[error("No wedge at index {index} (wheel has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered labels around the wheel; wedge `i` is `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WedgeList(Vec<Label>);

impl WedgeList {
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self(labels.into_iter().collect())
    }

    /// Builds a list from raw strings, skipping blank ones.
    pub fn parse_all<S: AsRef<str>>(raw: impl IntoIterator<Item = S>) -> Self {
        Self::new(raw.into_iter().filter_map(|s| match Label::parse(s.as_ref()) {
            Ok(label) => Some(label),
            Err(_) => {
                log::warn!("Skipping blank wedge label");
                None
            }
        }))
    }

    pub fn defaults() -> Self {
        Self::parse_all(DEFAULT_WEDGES)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Label> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.0.iter()
    }

    pub fn push(&mut self, label: Label) {
        self.0.push(label);
    }

    /// Removes wedge `index`, refusing to leave the wheel empty.
    pub fn remove(&mut self, index: usize) -> Result<Label, WedgeError> {
        if index >= self.len() {
            return Err(WedgeError::OutOfRange {
                index,
                len: self.len(),
            });
        }
        if self.len() <= 1 {
            return Err(WedgeError::LastWedge);
        }
        Ok(self.0.remove(index))
    }

    pub fn current_index(&self, angle: f64, pointer: Direction) -> Option<usize> {
        angle::wedge_index_at(angle, self.len(), pointer)
    }

    /// The wedge under the pointer, if there is any wedge at all.
    pub fn current(&self, angle: f64, pointer: Direction) -> Option<&Label> {
        self.current_index(angle, pointer)
            .and_then(|i| self.get(i))
    }

    pub fn can_remove(&self, phase: Phase) -> bool {
        !phase.is_busy() && self.len() > 1
    }

    /// Removal gated on the wheel being at rest.
    pub fn remove_at(&mut self, phase: Phase, index: usize) -> Result<Label, WedgeError> {
        if phase.is_busy() {
            return Err(WedgeError::Busy(phase));
        }
        self.remove(index)
    }

    pub fn remove_current(
        &mut self,
        phase: Phase,
        angle: f64,
        pointer: Direction,
    ) -> Result<Label, WedgeError> {
        if phase.is_busy() {
            return Err(WedgeError::Busy(phase));
        }
        let index = self.current_index(angle, pointer).ok_or(WedgeError::OutOfRange {
            index: 0,
            len: 0,
        })?;
        self.remove(index)
    }

    pub fn add(&mut self, raw: &str) -> Result<Label, WedgeError> {
        let label = Label::parse(raw)?;
        self.push(label.clone());
        Ok(label)
    }
}

impl<'a> IntoIterator for &'a WedgeList {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> WedgeList {
        WedgeList::parse_all(["A", "B", "C", "D"])
    }

    #[test]
    fn pointer_at_rest_reads_last_wedge() {
        let wedges = abcd();
        assert_eq!(
            wedges.current(0.0, Direction::North).map(Label::as_str),
            Some("D")
        );
    }

    #[test]
    fn empty_list_has_no_result() {
        let wedges = WedgeList::default();
        assert_eq!(wedges.current(1.0, Direction::North), None);
        assert!(!wedges.can_remove(Phase::Idle));
    }

    #[test]
    fn last_wedge_is_never_removed() {
        let mut wedges = WedgeList::parse_all(["Only"]);
        assert!(!wedges.can_remove(Phase::Settled));
        assert_eq!(
            wedges.remove_current(Phase::Settled, 0.0, Direction::North),
            Err(WedgeError::LastWedge)
        );
        assert_eq!(wedges.remove(0), Err(WedgeError::LastWedge));
        assert_eq!(wedges.len(), 1);
    }

    #[test]
    fn busy_wheel_rejects_removal() {
        let mut wedges = abcd();
        for phase in [Phase::Dragging, Phase::Spinning] {
            assert!(!wedges.can_remove(phase));
            assert_eq!(
                wedges.remove_current(phase, 0.0, Direction::North),
                Err(WedgeError::Busy(phase))
            );
            assert_eq!(wedges.remove_at(phase, 1), Err(WedgeError::Busy(phase)));
        }
        assert_eq!(wedges.len(), 4);
    }

    #[test]
    fn remove_current_takes_wedge_under_pointer() {
        let mut wedges = abcd();
        let removed = wedges
            .remove_current(Phase::Settled, 0.0, Direction::North)
            .unwrap();
        assert_eq!(removed.as_str(), "D");
        assert_eq!(wedges.len(), 3);
        assert_eq!(
            wedges.remove_at(Phase::Idle, 7),
            Err(WedgeError::OutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn add_trims_and_rejects_blank() {
        let mut wedges = abcd();
        assert_eq!(wedges.add("   "), Err(WedgeError::EmptyLabel));
        assert_eq!(wedges.add("\t\n"), Err(WedgeError::EmptyLabel));
        assert_eq!(wedges.add("  Eve ").unwrap().as_str(), "Eve");
        assert_eq!(wedges.get(4).map(Label::as_str), Some("Eve"));
    }

    #[test]
    fn deserialized_labels_are_checked() {
        let err = serde_json::from_str::<WedgeList>(r#"["   ", ""]"#).unwrap_err();
        assert!(err.to_string().contains("blank"), "{err}");

        let wedges: WedgeList = serde_json::from_str(r#"[" Ann ", "Bo"]"#).unwrap();
        let labels: Vec<_> = wedges.iter().map(Label::as_str).collect();
        assert_eq!(labels, vec!["Ann", "Bo"]);
        assert_eq!(serde_json::to_string(&wedges).unwrap(), r#"["Ann","Bo"]"#);
    }

    #[test]
    fn labels_from_strings_go_through_parse() {
        assert_eq!(Label::try_from(String::from("  ")), Err(WedgeError::EmptyLabel));
        assert_eq!(
            Label::try_from(String::from(" Kim\n")).map(String::from),
            Ok(String::from("Kim"))
        );
    }

    #[test]
    fn parse_all_skips_blank_entries() {
        let wedges = WedgeList::parse_all(["x", "", " y "]);
        let labels: Vec<_> = wedges.iter().map(Label::as_str).collect();
        assert_eq!(labels, vec!["x", "y"]);
        assert_eq!(WedgeList::defaults().len(), DEFAULT_WEDGES.len());
    }
}

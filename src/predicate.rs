//! Record predicates.
//!
//! Predicates are pure functions of a single [`AnnotationRecord`]. A record
//! of the wrong shape for a predicate (a tag list offered to a box counter,
//! or the reverse) is simply a non-match.

use std::fmt;

use crate::annotation::{AnnotationRecord, BoxRegion, CvatImageRecord, Tag};

/// Label of the regions counted by [`Predicate::CountMatches`].
pub const PERSON_LABEL: &str = "person";
/// Box attribute that excludes a region from counting.
pub const IGNORE_ATTRIBUTE: &str = "ignore";
/// The only attribute text that marks a region as ignored.
pub const IGNORE_TRUE: &str = "true";
/// Tag name checked by [`Predicate::HasNightTag`].
pub const TIME_TAG: &str = "time";
/// Tag value checked by [`Predicate::HasNightTag`].
pub const NIGHT_VALUE: &str = "night";

/// Which frames a traversal surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Frames whose count of non-ignored `person` regions equals the target.
    CountMatches(usize),
    /// Frames tagged `time` = `night`.
    HasNightTag,
}

impl Predicate {
    /// Evaluate the predicate against one record.
    pub fn matches(&self, record: &AnnotationRecord) -> bool {
        match (self, record) {
            (Predicate::CountMatches(target), AnnotationRecord::Cvat(image)) => {
                count_qualifying_regions(image, PERSON_LABEL) == *target
            }
            (Predicate::HasNightTag, AnnotationRecord::Tagged(record)) => {
                has_tag(&record.tags, TIME_TAG, NIGHT_VALUE)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::CountMatches(target) => {
                write!(f, "{target} non-ignored '{PERSON_LABEL}' region(s)")
            }
            Predicate::HasNightTag => write!(f, "tag {TIME_TAG}={NIGHT_VALUE}"),
        }
    }
}

/// Number of regions labeled `label` that are not flagged ignored.
pub fn count_qualifying_regions(image: &CvatImageRecord, label: &str) -> usize {
    image
        .boxes
        .iter()
        .filter(|region| region.label == label && !is_ignored(region))
        .count()
}

/// A region is ignored when any of its `ignore` attributes has the text
/// exactly `true`.
pub fn is_ignored(region: &BoxRegion) -> bool {
    region
        .attribute_values(IGNORE_ATTRIBUTE)
        .any(|value| value == IGNORE_TRUE)
}

/// True when any tag has exactly this name and value.
pub fn has_tag(tags: &[Tag], name: &str, value: &str) -> bool {
    tags.iter()
        .any(|tag| tag.name.as_deref() == Some(name) && tag.value.as_deref() == Some(value))
}

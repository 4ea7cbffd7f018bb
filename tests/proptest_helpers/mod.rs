#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use crate::common::Person;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 256;
    config
}

pub fn arb_person() -> impl Strategy<Value = Person> {
    prop_oneof![
        3 => Just(Person::Plain),
        2 => Just(Person::Ignore("true")),
        1 => Just(Person::Ignore("True")),
        1 => Just(Person::Ignore("1")),
        1 => Just(Person::Ignore("false")),
    ]
}

/// Scenes of images, each image a list of person boxes.
pub fn arb_scenes(
    max_scenes: usize,
    max_images: usize,
    max_persons: usize,
) -> impl Strategy<Value = Vec<Vec<Vec<Person>>>> {
    prop::collection::vec(
        prop::collection::vec(
            prop::collection::vec(arb_person(), 0..=max_persons),
            0..=max_images,
        ),
        1..=max_scenes,
    )
}

/// Tagged scenes of frames, each frame's `time` tag value (`None` = no tags).
pub fn arb_tagged_scenes(
    max_scenes: usize,
    max_frames: usize,
) -> impl Strategy<Value = Vec<Vec<Option<&'static str>>>> {
    prop::collection::vec(
        prop::collection::vec(
            prop_oneof![Just(Some("night")), Just(Some("day")), Just(None)],
            0..=max_frames,
        ),
        1..=max_scenes,
    )
}

pub fn counted(persons: &[Person]) -> usize {
    persons
        .iter()
        .filter(|p| !matches!(p, Person::Ignore("true")))
        .count()
}

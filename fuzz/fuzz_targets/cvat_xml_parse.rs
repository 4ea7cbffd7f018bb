//! Fuzz target for CVAT XML record parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the CVAT XML reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scenewalk::annotation::cvat_xml::from_cvat_xml_slice;
use scenewalk::Predicate;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }
    if let Ok(records) = from_cvat_xml_slice(data) {
        for record in records {
            let _ = Predicate::CountMatches(1)
                .matches(&scenewalk::annotation::AnnotationRecord::Cvat(record));
        }
    }
});

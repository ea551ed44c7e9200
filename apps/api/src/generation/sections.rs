//! Section inspection: reports which structured-mode markers the generated text carries.
//!
//! Advisory only. The raw text is rendered verbatim whatever the report says;
//! an incomplete report is logged and returned to the caller, never rejected.

use serde::Serialize;

/// Markers the structured prompt asks for, in document order.
pub const EXPECTED_MARKERS: [&str; 7] = [
    "Title:",
    "Relevant Experience",
    "Technical Implementation",
    "Delivery Plan",
    "Phase 1:",
    "Phase 2:",
    "Phase 3:",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub found: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

impl SectionReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Case-insensitive substring scan, so markdown decoration (`**Delivery Plan**`) still counts.
pub fn inspect_sections(text: &str) -> SectionReport {
    let haystack = text.to_lowercase();
    let (found, missing): (Vec<&'static str>, Vec<&'static str>) = EXPECTED_MARKERS
        .into_iter()
        .partition(|marker| haystack.contains(&marker.to_lowercase()));

    SectionReport { found, missing }
}

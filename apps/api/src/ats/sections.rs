//! Resume section detection.

use serde::{Deserialize, Serialize};

const SECTIONS: &[(&str, &str)] = &[
    ("education", "Education"),
    ("experience", "Experience"),
    ("projects", "Projects"),
    ("skills", "Skills"),
    ("certifications", "Certifications"),
    ("achievements", "Achievements"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

/// Reports which standard resume sections are mentioned anywhere in the text.
pub fn detect_sections(resume_text: &str) -> SectionReport {
    if resume_text.trim().is_empty() {
        return SectionReport::default();
    }

    let lower = resume_text.to_lowercase();
    let mut report = SectionReport::default();
    for (key, label) in SECTIONS {
        if lower.contains(key) {
            report.found.push(label.to_string());
        } else {
            report.missing.push(label.to_string());
        }
    }
    report
}

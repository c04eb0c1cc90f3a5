// ATS scoring engine: term extraction, synonym normalization, multi-signal
// score blending, missing-term ranking and enhancement verification.
// Everything here is synchronous, request-local and total over its input.

pub mod aggregate;
pub mod categorize;
pub mod frequency;
pub mod handlers;
pub mod matching;
pub mod sections;
pub mod similarity;
pub mod synonyms;
pub mod terms;
pub mod text;
pub mod verification;

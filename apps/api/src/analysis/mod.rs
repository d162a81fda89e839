// Résumé analysis: normalization, skill extraction, ATS scoring and the learning roadmap.
// Everything below `handlers` is synchronous and free of I/O.

pub mod ats;
pub mod catalog;
pub mod extractor;
pub mod handlers;
pub mod normalize;
pub mod pipeline;
pub mod roadmap;
pub mod vocabulary;

// ATS checker: keyword scoring, PDF text extraction, and stored check history.

pub mod extract;
pub mod handlers;
pub mod history;
pub mod samples;
pub mod scoring;

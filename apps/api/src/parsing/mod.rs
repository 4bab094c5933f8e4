// Resume parse step: raw text in, structured fields and section scores out.

pub mod prompts;
pub mod resume_parser;
pub mod sections;

pub use resume_parser::{parse_resume, ParsedResume};

pub mod extract;
pub mod prompt;
pub mod schema;
pub mod types;
pub mod upload;

pub use extract::extract_gml;
pub use prompt::build_prompt;
pub use schema::{validate_gml, SchemaIssue};
pub use types::{Difficulty, Extraction, QuizRequest};
pub use upload::strip_blank_lines;

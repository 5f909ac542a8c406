// Resume analysis: keyword classification, profile heuristics, course
// suggestions and the upload pipeline that ties them to storage and the LLM.
// The classifier itself never touches I/O; handlers and pipeline do.

pub mod classifier;
pub mod courses;
pub mod handlers;
pub mod keywords;
pub mod pipeline;
pub mod profile;
pub mod prompts;
pub mod store;

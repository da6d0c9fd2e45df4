//! Stage catalog - the fixed sequence of remote reasoning stages.
//!
//! Each stage names its endpoint, how many conversation rounds it runs and
//! how its prompt is assembled from the problem statement and the outputs of
//! earlier stages.

mod prompts;
mod stage;
mod stage_catalog;

pub use prompts::{current_system_prompt, hardness_summary_prompt, question_prompt, vocabulary_prompt};
pub use stage::{EndpointTemplate, PriorOutputs, PromptBuilder, StageDefinition, StageKind};
pub use stage_catalog::{
    DimensionGroup, StageCatalog, CURRENT_SYSTEM, HARDNESS_SUMMARY, QUESTIONS_PER_DIMENSION,
    QUESTION_NAMES, VOCABULARY,
};

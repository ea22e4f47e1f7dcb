use thiserror::Error;

use crate::task::TaskId;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Task {0} is already active")]
    DuplicateId(TaskId),

    #[error("Task {0} already completed; ids are never reused")]
    TaskIdReused(TaskId),

    #[error("Invalid task config: {0}")]
    InvalidTaskConfig(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SchedResult<T> = Result<T, SchedError>;

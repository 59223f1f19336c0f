#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("corrupt data: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl StorageError {
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutError {
    #[error("no exercise at index {0}")]
    InvalidExercise(usize),
    #[error("no set at index {1} for exercise {0}")]
    InvalidSet(usize, usize),
    #[error("sets can only be changed while tracking an exercise")]
    NotTracking,
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkBufferError>;

#[derive(Error, Debug)]
pub enum ChunkBufferError {
    #[error("Invalid range: {start}..{end}")]
    InvalidRange { start: isize, end: isize },
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Parsing error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ChunkBufferError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ExerciseError {
    #[error("Write {index} to terminal channel failed: {source}")]
    Write {
        index: usize,
        #[source]
        source: io::Error,
    },
}

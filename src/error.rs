use std::path::PathBuf;

use crate::core::error::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum NetstatError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
}

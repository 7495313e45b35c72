use thiserror::Error;

/// Rejected by [`DecorationSetBuilder`](crate::decorations::DecorationSetBuilder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecorationError {
    #[error("decoration at {from} added after one starting at {last_from}")]
    OutOfOrder { from: usize, last_from: usize },
    #[error("decoration range {from}..{to} is inverted")]
    InvertedRange { from: usize, to: usize },
}

/// Failure to hand a URL to an external program.
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("refusing to open an empty URL")]
    EmptyUrl,
    #[error("failed to open {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config Error: {0}")]
    Config(String),

    #[error("CLI Error: {0}")]
    Cli(#[from] clap::Error),

    #[error("Logging Error: {0}")]
    Logging(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialize error: {0}")]
    Serialize(String),

    #[error("unknown switch role '{name}' (expected ssw or psw)")]
    UnknownSwitchRole { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

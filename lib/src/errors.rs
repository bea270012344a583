use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbundError {
    #[error("failed to load/read/write file: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0:?}")]
    Json(#[from] serde_json::Error),
    #[error("no abundances to build a histogram from (no signatures matched and no --max given)")]
    EmptyData,
    #[error("invalid histogram range: min {min}, max {max}, bins {bins}")]
    InvalidRange { min: i64, max: i64, bins: i64 },
    #[error("{0}")]
    Message(String),
}

pub type AbundResult<T> = StdResult<T, AbundError>;

#[doc(hidden)]
#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::AbundError::Message($e.to_owned()));
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::AbundError::Message(format!($fmt, $($arg)*)))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)*) => { $crate::errors::AbundError::Message(format!($($arg)*)) }
}

use std::str::FromStr;

use thiserror::Error;

/// Takes the next line from `text`, without its terminator.
///
/// A terminator is either `\n` or `\r\n`, and is consumed. The final line may
/// be unterminated.
pub fn take_line(text: &str) -> (Option<&str>, &str) {
    if text.is_empty() {
        return (None, text);
    }

    match text.split_once('\n') {
        Some((line, rest)) => (Some(line.strip_suffix('\r').unwrap_or(line)), rest),
        None => (Some(text), ""),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to convert {str:?}")]
pub struct ConvertError {
    pub str: String,
}

/// Converts `&str` to `T` if `T: FromStr`.
pub fn convert<T: FromStr>(s: &str) -> Result<T, ConvertError> {
    let Ok(res) = s.parse::<T>() else {
        return Err(ConvertError { str: s.to_string() });
    };

    Ok(res)
}

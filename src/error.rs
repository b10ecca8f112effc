//! Render failures come in exactly two kinds: a configuration that
//! was rejected before any pixel work started, and an encoder that
//! failed while writing the finished image.  Nothing errors inside
//! the pixel loops; every per-pixel computation is total.

use std::io;

/// What can go wrong across a whole render.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The configuration was rejected up front.  Carries a
    /// human-readable description of the offending field.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// The image encoder failed while writing the output file.  This
    /// is terminal for the render; the caller reports it and gives
    /// up rather than retry a half-written file.
    #[fail(display = "could not encode image: {}", _0)]
    Encoding(#[cause] io::Error),
}

impl RenderError {
    /// A configuration rejection with the given description.
    pub fn config(reason: &str) -> RenderError {
        RenderError::Config(reason.to_string())
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> RenderError {
        RenderError::Encoding(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_problem() {
        let err = RenderError::config("gradient needs at least two stops");
        assert_eq!(
            format!("{}", err),
            "invalid configuration: gradient needs at least two stops"
        );
    }

    #[test]
    fn io_errors_convert_to_encoding_errors() {
        let err: RenderError = io::Error::new(io::ErrorKind::Other, "disk full").into();
        assert!(format!("{}", err).contains("disk full"));
    }
}

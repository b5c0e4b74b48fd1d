//! Unified error type.

use std::fmt;

/// The error type returned by kiosk's fallible operations.
///
/// Application-level errors (404, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// startup and infrastructure failures: binding to a port, reading the views
/// directory, or rendering a registered template.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// A template file failed to parse at registration time.
    Template(Box<handlebars::TemplateError>),
    /// A registered template failed to render.
    Render(handlebars::RenderError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Template(e) => write!(f, "template: {e}"),
            Self::Render(e) => write!(f, "render: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Template(e) => Some(e),
            Self::Render(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(e: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(e))
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(e: handlebars::RenderError) -> Self {
        Self::Render(e)
    }
}

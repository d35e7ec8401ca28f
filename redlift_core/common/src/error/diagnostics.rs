use std::{borrow::Cow, fmt, panic::Location};

/// Human-friendly error message that records the call-site it was built at.
///
/// Error constructors throughout the workspace are `#[track_caller]`, so the
/// location points at the place the failure was classified rather than at
/// this module.
#[derive(Clone, Debug)]
pub struct DiagnosticMessage {
    message: Cow<'static, str>,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        let location = Location::caller();
        Self {
            message: message.into(),
            location,
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (at {}:{})",
            self.message,
            self.location.file(),
            self.location.line()
        )
    }
}

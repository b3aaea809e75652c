//! Launch context.
//!
//! The host platform hands the app one start parameter and some platform
//! metadata, read once at page load. Development builds can run against a
//! simulated host; whether the environment is mocked is an explicit flag
//! set at construction, never mutable module state.

/// Host launch data, captured once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    start_param: Option<String>,
    platform: String,
    mocked: bool,
}

impl LaunchContext {
    /// Capture a real launch.
    pub fn new(start_param: Option<String>, platform: impl Into<String>) -> Self {
        LaunchContext {
            start_param,
            platform: platform.into(),
            mocked: false,
        }
    }

    /// Capture a simulated launch for development builds.
    pub fn mocked(start_param: Option<String>, platform: impl Into<String>) -> Self {
        LaunchContext {
            start_param,
            platform: platform.into(),
            mocked: true,
        }
    }

    /// The deep-link start parameter, if the app was entered via a link.
    pub fn start_param(&self) -> Option<&str> {
        self.start_param.as_deref()
    }

    /// Host platform identifier (e.g. `ios`, `tdesktop`).
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// True when running against a simulated host environment.
    pub fn is_mocked(&self) -> bool {
        self.mocked
    }

    /// True when verbose diagnostics were requested: either a mocked
    /// environment, or the literal `debug` start parameter.
    pub fn debug(&self) -> bool {
        self.mocked || self.start_param.as_deref() == Some("debug")
    }
}

//! Strip options DTO

/// Environment variable that turns on parallel directory processing
pub const PARALLEL_ENV: &str = "ROMSPLIT_PARALLEL";

/// Per-run configuration threaded through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripOptions {
    /// Whether to write the `.header` sidecar
    pub save_header: bool,
    /// Whether to process directory entries on the rayon pool
    pub parallel: bool,
}

impl StripOptions {
    pub fn new(save_header: bool) -> Self {
        Self {
            save_header,
            ..Default::default()
        }
    }

    /// Enables parallel processing of directory entries
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Sets `parallel` from the value of [`PARALLEL_ENV`], if any
    pub fn with_parallel_setting(mut self, value: Option<&str>) -> Self {
        self.parallel = value.is_some_and(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
        });
        self
    }
}

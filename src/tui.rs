use anyhow::Result;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub base_url: String,
}

impl Default for TuiRunOptions {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Run the interactive page against the store at `opts.base_url`.
pub fn run(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}

/// Which catalog directories a command operates on
#[derive(clap::Args, Debug, Default, Clone)]
pub struct Selection {
    /// Select every directory carrying this tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// Select the directory at this path; `~` is expanded (repeatable)
    #[arg(short, long = "path")]
    pub paths: Vec<String>,

    /// Select every directory
    #[arg(short, long)]
    pub all: bool,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        !self.all && self.tags.is_empty() && self.paths.is_empty()
    }
}

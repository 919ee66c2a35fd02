use std::path::PathBuf;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("output directory {} does not exist or is not a directory", path.display())]
    OutputDir { path: PathBuf },
    #[display("failed to draw chart '{key}' to {}: {message}", path.display())]
    Draw {
        key: String,
        path: PathBuf,
        message: String,
    },
}

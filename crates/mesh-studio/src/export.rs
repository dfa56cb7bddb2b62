//! Export side effects: clipboard and files.

use std::path::PathBuf;

use mesh_model::export::{self, PNG_FILE_NAME, SVG_FILE_NAME};
use mesh_model::{ExportError, GradientPoint};

use crate::config::StudioConfig;

/// Which export the user asked for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExportKind {
    /// CSS approximation to the clipboard.
    Css,
    Svg,
    Png,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportFailure {
    #[error("clipboard write failed: {0}")]
    ClipboardWriteFailed(#[from] arboard::Error),

    #[error(transparent)]
    File(#[from] ExportError),
}

/// Result of a successful export, for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum Exported {
    Clipboard { bytes: usize },
    File(PathBuf),
}

/// Performs exports against the system clipboard and the export directory.
pub struct Exporter {
    dir: PathBuf,
    png_size: (u32, u32),
    clipboard: Option<arboard::Clipboard>,
}

impl Exporter {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            dir: config.export_dir.clone(),
            png_size: config.png_size,
            clipboard: None,
        }
    }

    pub fn svg_path(&self) -> PathBuf {
        self.dir.join(SVG_FILE_NAME)
    }

    pub fn png_path(&self) -> PathBuf {
        self.dir.join(PNG_FILE_NAME)
    }

    pub fn run(&mut self, kind: ExportKind, points: &[GradientPoint]) -> Result<Exported, ExportFailure> {
        match kind {
            ExportKind::Css => {
                let css = export::to_css(points);
                self.clipboard()?.set_text(css.as_str())?;
                Ok(Exported::Clipboard { bytes: css.len() })
            }
            ExportKind::Svg => {
                let path = self.svg_path();
                export::write_svg(&path, points)?;
                Ok(Exported::File(path))
            }
            ExportKind::Png => {
                let path = self.png_path();
                let (w, h) = self.png_size;
                export::write_png(&path, points, w, h)?;
                Ok(Exported::File(path))
            }
        }
    }

    /// Runs `kind`, logging the outcome. Failures degrade to a no-op.
    pub fn run_logged(&mut self, kind: ExportKind, points: &[GradientPoint]) {
        match self.run(kind, points) {
            Ok(Exported::Clipboard { bytes }) => log::info!("copied css ({bytes} bytes) to clipboard"),
            Ok(Exported::File(path)) => log::info!("exported {}", path.display()),
            Err(e) => log::warn!("{kind:?} export failed: {e}"),
        }
    }

    /// Opened on first use; a failed open is retried on the next copy.
    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, ExportFailure> {
        let clipboard = match self.clipboard.take() {
            Some(c) => c,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.clipboard.insert(clipboard))
    }
}

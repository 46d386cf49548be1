use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Front-end collaborator that chooses a file to open.
///
/// Returns the selected path, or an empty string when the user cancelled.
pub trait FilePicker {
    fn open_file(&mut self, title: &str, filters: &[&str], description: &str) -> String;
}

/// Picker that always answers with a path decided up front (for example a
/// command line argument).
#[derive(Clone, Debug, Default)]
pub struct FixedPath {
    path: PathBuf,
}

impl FixedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FilePicker for FixedPath {
    fn open_file(&mut self, _title: &str, _filters: &[&str], _description: &str) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Terminal picker: prints a prompt and reads one line. An empty line (or
/// end of input) counts as a cancel.
pub struct PromptPicker<R, W> {
    input: R,
    output: W,
}

impl PromptPicker<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> FilePicker for PromptPicker<R, W> {
    fn open_file(&mut self, title: &str, filters: &[&str], description: &str) -> String {
        let prompt = format!("{title} [{description}: {}]: ", filters.join(" "));
        if let Err(err) = self
            .output
            .write_all(prompt.as_bytes())
            .and_then(|_| self.output.flush())
        {
            log::warn!("Failed to write file prompt: {err}");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(_) => line.trim().to_string(),
            Err(err) => {
                log::warn!("Failed to read file path from prompt: {err}");
                String::new()
            }
        }
    }
}

/// Desktop file dialog.
#[cfg(feature = "native-dialog")]
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeDialog;

/// `*.gb` style patterns to the bare extensions the dialog backend expects.
#[cfg(feature = "native-dialog")]
fn filter_extensions<'a>(filters: &[&'a str]) -> Vec<&'a str> {
    filters
        .iter()
        .map(|f| f.trim_start_matches('*').trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[cfg(feature = "native-dialog")]
impl FilePicker for NativeDialog {
    fn open_file(&mut self, title: &str, filters: &[&str], description: &str) -> String {
        rfd::FileDialog::new()
            .set_title(title)
            .add_filter(description, filter_extensions(filters).as_slice())
            .pick_file()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

//! Report and template file access.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::github::MonitorError;

/// Writes the rendered report to `path`, replacing any existing file.
///
/// Parent directories are created when needed.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] when a directory or the file cannot be
/// created or written.
pub fn write_report(path: &Utf8Path, html: &str) -> Result<(), MonitorError> {
    let mut file = create_file_with_parents(path)?;
    file.write_all(html.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|error| MonitorError::Io {
            message: format!("failed to write report '{path}': {error}"),
        })
}

/// Reads a report template from `path`.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] when the file cannot be opened or is not
/// valid UTF-8.
pub fn read_template(path: &Utf8Path) -> Result<String, MonitorError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| MonitorError::Io {
        message: format!("invalid template path '{path}': no file name"),
    })?;

    open_ambient(parent.as_str())?
        .read_to_string(file_name)
        .map_err(|error| MonitorError::Io {
            message: format!("failed to read template '{path}': {error}"),
        })
}

fn open_ambient(path: &str) -> Result<Dir, MonitorError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| MonitorError::Io {
        message: format!("failed to open directory '{path}' for the report: {error}"),
    })
}

fn create_file_with_parents(path: &Utf8Path) -> Result<cap_std::fs_utf8::File, MonitorError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new(""));
    let file_name = path.file_name().ok_or_else(|| MonitorError::Io {
        message: format!("invalid report path '{path}': no file name"),
    })?;

    let (dir, relative_parent) = if parent.is_absolute() {
        let relative = parent.strip_prefix("/").map_err(|_| MonitorError::Io {
            message: format!("failed to normalise report directory '{parent}'"),
        })?;
        (open_ambient("/")?, relative)
    } else {
        (open_ambient(".")?, parent)
    };

    let target = if relative_parent.as_str().is_empty() || relative_parent == Utf8Path::new(".") {
        dir
    } else {
        dir.create_dir_all(relative_parent)
            .map_err(|error| MonitorError::Io {
                message: format!("failed to create report directory '{parent}': {error}"),
            })?;
        dir.open_dir(relative_parent)
            .map_err(|error| MonitorError::Io {
                message: format!("failed to open report directory '{parent}': {error}"),
            })?
    };

    target.create(file_name).map_err(|error| MonitorError::Io {
        message: format!("failed to create report file '{path}': {error}"),
    })
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn temp_base(temp_dir: &TempDir) -> Result<Utf8PathBuf, Box<dyn std::error::Error>> {
        Ok(Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .map_err(|_| "temp directory path must be UTF-8")?)
    }

    fn read(path: &Utf8Path) -> Result<String, Box<dyn std::error::Error>> {
        let parent = path.parent().ok_or("path has no parent")?;
        let file_name = path.file_name().ok_or("path has no file name")?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok(dir.read_to_string(file_name)?)
    }

    #[rstest]
    fn creates_parent_directories() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = temp_base(&temp_dir)?.join("reports").join("output-runtime.html");

        write_report(&path, "<html></html>")?;

        if read(&path)? != "<html></html>" {
            return Err("report content mismatch".into());
        }
        Ok(())
    }

    #[rstest]
    fn replaces_existing_report() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = temp_base(&temp_dir)?.join("output-runtime.html");

        write_report(&path, "first run with a longer body")?;
        write_report(&path, "second")?;

        let content = read(&path)?;
        if content != "second" {
            return Err(format!("expected truncated rewrite, got {content:?}").into());
        }
        Ok(())
    }

    #[rstest]
    fn reads_template_back() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = temp_base(&temp_dir)?.join("templates").join("report.html.j2");
        write_report(&path, "{{ repository }}")?;

        if read_template(&path)? != "{{ repository }}" {
            return Err("template content mismatch".into());
        }
        Ok(())
    }

    #[rstest]
    fn missing_template_is_io_error() -> TestResult {
        let temp_dir = TempDir::new()?;
        let path = temp_base(&temp_dir)?.join("absent.html.j2");

        let result = read_template(&path);

        if !matches!(result, Err(MonitorError::Io { .. })) {
            return Err(format!("expected io error, got {result:?}").into());
        }
        Ok(())
    }

    #[rstest]
    fn path_without_file_name_is_rejected() {
        let result = write_report(Utf8Path::new("/"), "x");

        assert!(
            matches!(result, Err(MonitorError::Io { .. })),
            "expected io error, got {result:?}"
        );
    }
}

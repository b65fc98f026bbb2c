//! Fragment renderers and artifact writing.
//!
//! Every built table implements [`Fragment`](crate::traits::Fragment);
//! [`write_artifact`] puts a rendered fragment on disk.

mod enum_strings;
mod instructions;
mod operand_kinds;

pub use enum_strings::{CapabilityStringTable, ExtensionEnum, ExtensionStringTables};

use crate::canonical::OperandTag;
use crate::capability::Capabilities;
use crate::error::EmitError;
use crate::options::TableOptions;
use std::io::{self, Write};
use std::path::Path;

/// Write `contents` to `path`, creating missing ancestor directories.
///
/// The contents go to a temporary file next to `path` that is renamed over
/// it once complete, so `path` never holds a partial artifact.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), EmitError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let write_error = |source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

/// Create `dir` and its ancestors. An existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> Result<(), EmitError> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(EmitError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// `{a, b, c}`
fn brace_list<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> String {
    let mut out = String::from("{");
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item.as_ref());
    }
    out.push('}');
    out
}

fn render_capabilities(caps: &Capabilities, options: &TableOptions) -> String {
    match caps {
        Capabilities::List(names) => {
            brace_list(names.iter().map(|n| options.capability_symbol(n)))
        }
        Capabilities::Mask(mask) => format!("0x{mask:04x}"),
    }
}

fn render_extensions(extensions: &[String], options: &TableOptions) -> String {
    brace_list(extensions.iter().map(|e| options.extension_symbol(e)))
}

fn render_tags(tags: &[OperandTag]) -> String {
    brace_list(tags.iter().map(OperandTag::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_capabilities() {
        let options = TableOptions::default();
        let list = Capabilities::List(vec!["Shader".into(), "Kernel".into()]);
        assert_eq!(
            render_capabilities(&list, &options),
            "{SpvCapabilityShader, SpvCapabilityKernel}"
        );
        assert_eq!(render_capabilities(&Capabilities::List(vec![]), &options), "{}");
        assert_eq!(render_capabilities(&Capabilities::Mask(0x12), &options), "0x0012");
        assert_eq!(render_capabilities(&Capabilities::Mask(1 << 20), &options), "0x100000");
    }

    #[test]
    fn test_render_extensions() {
        let options = TableOptions::default();
        assert_eq!(render_extensions(&[], &options), "{}");
        assert_eq!(
            render_extensions(&["SPV_KHR_shader_ballot".to_string()], &options),
            "{Extension::kSPV_KHR_shader_ballot}"
        );
    }

    #[test]
    fn test_write_artifact_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c/table.inc");
        write_artifact(&path, "{}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");

        // Existing directories and files are fine.
        write_artifact(&path, "{1}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{1}\n");
    }

    #[test]
    fn test_write_artifact_reports_blocked_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_artifact(&blocker.join("table.inc"), "{}\n").unwrap_err();
        assert!(matches!(err, EmitError::CreateDir { .. }));
    }
}

use std::{
    ffi::OsString,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Appends the contents of a static HTML fragment verbatim. Empty fragments are rejected.
pub(super) fn append_fragment(out: &mut String, path: &Path) -> Result<()> {
    let fragment = fs::read_to_string(path).map_err(Error::io(path))?;
    if fragment.is_empty() {
        return Err(Error::EmptyFragment {
            path: path.to_owned(),
        });
    }
    out.push_str(&fragment);
    Ok(())
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn temporary_path(path: &Path) -> PathBuf {
    sibling_path(path, ".tmp")
}

fn backup_path(path: &Path) -> PathBuf {
    sibling_path(path, ".bak")
}

struct Staged<'a> {
    tmp: PathBuf,
    path: &'a Path,
    backup: Option<PathBuf>,
    committed: bool,
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("cannot remove {path:?}: {e}");
        }
    }
}

/// Puts back every target touched so far and drops the temporaries.
fn roll_back(staged: &[Staged]) {
    for s in staged.iter().rev() {
        match (&s.backup, s.committed) {
            (Some(backup), _) => {
                if let Err(e) = fs::rename(backup, s.path) {
                    warn!("cannot restore {:?} from {backup:?}: {e}", s.path);
                }
            }
            (None, true) => remove_quietly(s.path),
            (None, false) => {}
        }
        remove_quietly(&s.tmp);
    }
}

fn stage(tmp: &Path, contents: &str) -> Result<()> {
    let mut fd = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tmp)
        .map_err(Error::io(tmp))?;
    fd.write_all(contents.as_bytes())
        .and_then(|_| fd.sync_all())
        .map_err(Error::io(tmp))
}

fn swap_in(s: &mut Staged) -> Result<()> {
    if s.path.is_file() {
        let backup = backup_path(s.path);
        fs::rename(s.path, &backup).map_err(Error::io(s.path))?;
        s.backup = Some(backup);
    }
    debug!("writing {:?}", s.path);
    fs::rename(&s.tmp, s.path).map_err(Error::io(s.path))?;
    s.committed = true;
    Ok(())
}

/// Replaces every file in `outputs`, or none of them.
///
/// Contents go to `.tmp` siblings first. Existing targets are moved to `.bak`
/// siblings while the temporaries are renamed into place, and are restored if
/// any step fails.
pub(super) fn commit_outputs(outputs: &[(PathBuf, String)]) -> Result<()> {
    let mut staged: Vec<Staged> = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        let tmp = temporary_path(path);
        let result = stage(&tmp, contents);
        staged.push(Staged {
            tmp,
            path,
            backup: None,
            committed: false,
        });
        if let Err(e) = result {
            roll_back(&staged);
            return Err(e);
        }
    }

    if let Err(e) = staged.iter_mut().try_for_each(swap_in) {
        roll_back(&staged);
        return Err(e);
    }

    for s in &staged {
        if let Some(backup) = &s.backup {
            remove_quietly(backup);
        }
    }
    Ok(())
}

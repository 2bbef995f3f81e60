use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context};

/// Reads a stack list: a `.txt` file naming one image per line.
///
/// Lines are trimmed and blank lines skipped. Entries are returned as
/// written; see [`candidate_paths`] for where they are looked up.
pub fn read_stack_list(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "txt");
    if !is_txt {
        bail!(
            "Stack file '{}' does not end in .txt. It must be a text file containing the paths \
             to the images to be combined, one per line.",
            path.display()
        );
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read stack file '{}'", path.display()))?;
    Ok(parse_stack_list(&text))
}

pub fn parse_stack_list(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Lists the places a stack list entry is looked for, in order:
/// 1. the entry as written (relative to the working directory, or absolute);
/// 2. the entry under `stack_dir`, with any root or prefix stripped first so
///    absolute entries are also looked up there.
///
/// Callers try each candidate until one decodes, so a file that exists but
/// cannot be read as given still falls through to the stack directory.
pub fn candidate_paths(entry: &Path, stack_dir: &Path) -> Vec<PathBuf> {
    let relative: PathBuf = entry
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    vec![entry.to_path_buf(), stack_dir.join(relative)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines_and_trims() {
        let entries = parse_stack_list("a.pgm\n\n  b.pgm  \r\n\t\nsub/c.pgm");
        assert_eq!(
            entries,
            vec![
                PathBuf::from("a.pgm"),
                PathBuf::from("b.pgm"),
                PathBuf::from("sub/c.pgm"),
            ]
        );
    }

    #[test]
    fn rejects_non_txt_stack_files() {
        let err = read_stack_list(Path::new("stack.csv")).unwrap_err();
        assert!(err.to_string().contains("does not end in .txt"));
    }

    #[test]
    fn reads_listed_paths() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("stack.txt");
        fs::write(&list, "one.pgm\ntwo.pgm\n").unwrap();
        assert_eq!(
            read_stack_list(&list).unwrap(),
            vec![PathBuf::from("one.pgm"), PathBuf::from("two.pgm")]
        );
    }

    #[test]
    fn missing_stack_file_names_the_path() {
        let err = read_stack_list(Path::new("/nonexistent/focus/stack.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/focus/stack.txt"));
    }

    #[test]
    fn entry_as_written_comes_first() {
        let candidates = candidate_paths(Path::new("near.pgm"), Path::new("./stack/"));
        assert_eq!(
            candidates,
            vec![PathBuf::from("near.pgm"), PathBuf::from("./stack/near.pgm")]
        );
    }

    #[test]
    fn absolute_entries_are_rooted_under_stack_dir() {
        let candidates = candidate_paths(Path::new("/does/not/exist/mid.pgm"), Path::new("stack"));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/does/not/exist/mid.pgm"),
                PathBuf::from("stack/does/not/exist/mid.pgm"),
            ]
        );
    }
}

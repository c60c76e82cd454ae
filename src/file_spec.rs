use std::path::{Path, PathBuf};

/// Describes the name and path of one log file family.
///
/// The name of the active output file is built as
///
/// ```<basename>.<suffix>```
///
/// inside the configured directory. Rotated files differ from the active file
/// only in an infix that the rotation appends to the basename, e.g.
///
/// ```text
/// 2024-03-15-warn.log            (active)
/// 2024-03-15-warn_r00000.log     (rotated)
/// 2024-03-15-warn_r00001.log.gz  (rotated and compressed)
/// ```
///
/// [`Router`](crate::Router) derives one `FileSpec` per severity band from
/// the base directory and the date tag; when using
/// [`FileLogWriter`](crate::writers::FileLogWriter) standalone, the spec can
/// describe any file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileSpec {
    pub(crate) directory: PathBuf,
    pub(crate) basename: String,
    pub(crate) suffix: String,
}

impl FileSpec {
    /// Describes the file `<basename>.log` in the given directory.
    #[must_use]
    pub fn new<P: Into<PathBuf>, S: Into<String>>(directory: P, basename: S) -> Self {
        Self {
            directory: directory.into(),
            basename: basename.into(),
            suffix: "log".to_string(),
        }
    }

    /// Specifies a suffix for the log files. The default is `"log"`.
    #[must_use]
    pub fn suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// The directory in which the files live.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Derives a `PathBuf` from the spec and the given infix.
    ///
    /// With `None`, the path of the active output file is returned.
    #[must_use]
    pub fn as_pathbuf(&self, o_infix: Option<&str>) -> PathBuf {
        let mut filename =
            String::with_capacity(self.basename.len() + 10 + self.suffix.len());
        filename.push_str(&self.basename);
        if let Some(infix) = o_infix {
            filename.push_str(infix);
        }
        filename.push('.');
        filename.push_str(&self.suffix);

        let mut p_path = self.directory.clone();
        p_path.push(filename);
        p_path
    }

    // Ordered list (newest first, by name) of all files in the directory
    // whose names start with the basename. Errors while reading the
    // directory, or entries within it, are ignored; callers treat the
    // directory's content as best-effort knowledge.
    pub(crate) fn list_related_files(&self) -> Vec<PathBuf> {
        let Ok(read_dir) = std::fs::read_dir(&self.directory) else {
            return Vec::new();
        };
        let mut files = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .is_some_and(|fln| fln.to_string_lossy().starts_with(&self.basename))
            })
            .collect::<Vec<PathBuf>>();
        files.sort_unstable();
        files.reverse();
        files
    }
}

#[cfg(test)]
mod test {
    use super::FileSpec;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_active_path() {
        let spec = FileSpec::new("/a/b/c", "2024-03-15-warn");
        assert_eq!(
            spec.as_pathbuf(None),
            PathBuf::from("/a/b/c/2024-03-15-warn.log")
        );
    }

    #[test]
    fn test_infix_path() {
        let spec = FileSpec::new("/a/b/c", "2024-03-15-warn");
        assert_eq!(
            spec.as_pathbuf(Some("_r00007")),
            PathBuf::from("/a/b/c/2024-03-15-warn_r00007.log")
        );
    }

    #[test]
    fn test_suffix() {
        let spec = FileSpec::new(".", "x").suffix("trc");
        assert_eq!(spec.as_pathbuf(None), PathBuf::from("./x.trc"));
    }

    #[test]
    fn test_list_related_files() {
        let dir = temp_dir::TempDir::new().unwrap();
        let spec = FileSpec::new(dir.path(), "base");
        create_file(dir.path(), "base.log");
        create_file(dir.path(), "base_r00000.log");
        create_file(dir.path(), "base_r00001.log.gz");
        create_file(dir.path(), "unrelated.log");

        let files = spec.list_related_files();
        assert_eq!(files.len(), 3);
        // newest (highest index) first
        assert!(files[0].to_string_lossy().contains("_r00001"));
        assert!(files[1].to_string_lossy().contains("_r00000"));
    }

    fn create_file(dir: &Path, filename: &str) {
        std::fs::File::create(dir.join(filename)).unwrap();
    }
}

use crate::{
    util::{eprint_err, ErrorCode},
    FileSpec, LogfileSelector, RotationPolicy,
};
#[cfg(feature = "compress")]
use std::fs::File;
use std::{
    path::{Path, PathBuf},
    thread::{Builder as ThreadBuilder, JoinHandle},
    time::Duration,
};

const BACKUP_INFIX_DIGITS: usize = 5;

pub(super) fn number_infix(idx: u32) -> String {
    format!("_r{idx:0>5}")
}

// Parses the backup index out of a file name like
// `<basename>_r00042.<suffix>` or `<basename>_r00042.<suffix>.gz`.
fn backup_index(file_spec: &FileSpec, path: &Path) -> Option<u32> {
    let file_name = path.file_name()?.to_string_lossy();
    let rest = file_name
        .strip_prefix(file_spec.basename.as_str())?
        .strip_prefix("_r")?;
    let digits = rest.get(..BACKUP_INFIX_DIGITS)?;
    let tail = rest.get(BACKUP_INFIX_DIGITS..)?.strip_prefix('.')?;
    let tail = tail.strip_suffix(".gz").unwrap_or(tail);
    if tail != file_spec.suffix {
        return None;
    }
    digits.parse().ok()
}

pub(super) fn highest_backup_index(file_spec: &FileSpec) -> Option<u32> {
    file_spec
        .list_related_files()
        .iter()
        .filter_map(|path| backup_index(file_spec, path))
        .max()
}

// All backup files, youngest (highest index) first.
fn list_backup_files(file_spec: &FileSpec) -> Vec<PathBuf> {
    file_spec
        .list_related_files()
        .into_iter()
        .filter(|path| backup_index(file_spec, path).is_some())
        .collect()
}

pub(crate) fn existing_log_files(
    file_spec: &FileSpec,
    selector: &LogfileSelector,
) -> Vec<PathBuf> {
    let mut result = Vec::new();
    if selector.with_current {
        let current = file_spec.as_pathbuf(None);
        if current.exists() {
            result.push(current);
        }
    }
    for path in list_backup_files(file_spec) {
        let compressed = path.extension().is_some_and(|ext| ext == "gz");
        if (compressed && selector.with_compressed_files)
            || (!compressed && selector.with_plain_files)
        {
            result.push(path);
        }
    }
    result
}

pub(super) fn remove_or_compress_too_old_logfiles(
    o_cleanup_thread_handle: Option<&CleanupThreadHandle>,
    policy: &RotationPolicy,
    file_spec: &FileSpec,
) -> Result<(), crate::BandLogError> {
    o_cleanup_thread_handle.map_or_else(
        || {
            remove_or_compress_too_old_logfiles_impl(policy, file_spec)
                .map_err(crate::BandLogError::Io)
        },
        |cleanup_thread_handle| {
            cleanup_thread_handle
                .sender
                .send(MessageToCleanupThread::Act)
                .ok();
            Ok(())
        },
    )
}

pub(super) fn remove_or_compress_too_old_logfiles_impl(
    policy: &RotationPolicy,
    file_spec: &FileSpec,
) -> Result<(), std::io::Error> {
    // age pruning comes first, so that an ancient backup never survives
    // just because fewer than max_backups files exist
    if let Some(max_age_days) = policy.get_max_age_days() {
        for file in list_backup_files(file_spec) {
            if is_older_than_days(&file, max_age_days) {
                std::fs::remove_file(&file)?;
            }
        }
    }

    let (plain_limit, compressed_limit) = if policy.wants_compression() {
        (0, policy.get_max_backups())
    } else {
        (policy.get_max_backups(), 0)
    };

    for (index, file) in list_backup_files(file_spec).into_iter().enumerate() {
        if index >= plain_limit + compressed_limit {
            // delete (log or log.gz)
            std::fs::remove_file(&file)?;
        } else if index >= plain_limit {
            #[cfg(feature = "compress")]
            {
                // compress, if not yet compressed
                if let Some(extension) = file.extension() {
                    if extension != "gz" {
                        let mut compressed_file = file.clone();
                        match compressed_file.extension() {
                            Some(oss) => {
                                let mut oss_gz = oss.to_os_string();
                                oss_gz.push(".gz");
                                compressed_file.set_extension(oss_gz.as_os_str());
                            }
                            None => {
                                compressed_file.set_extension("gz");
                            }
                        }

                        let mut gz_encoder = flate2::write::GzEncoder::new(
                            File::create(compressed_file)?,
                            flate2::Compression::fast(),
                        );
                        let mut old_file = File::open(&file)?;
                        std::io::copy(&mut old_file, &mut gz_encoder)?;
                        gz_encoder.finish()?;
                        std::fs::remove_file(&file)?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn is_older_than_days(path: &Path, days: u32) -> bool {
    std::fs::metadata(path)
        .and_then(|md| md.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age > Duration::from_secs(u64::from(days) * 24 * 60 * 60))
}

const CLEANER: &str = "bandlog-fs-cleanup";

pub(super) struct CleanupThreadHandle {
    sender: std::sync::mpsc::Sender<MessageToCleanupThread>,
    join_handle: JoinHandle<()>,
}

enum MessageToCleanupThread {
    Act,
    Die,
}
impl CleanupThreadHandle {
    pub(super) fn shutdown(self) {
        self.sender.send(MessageToCleanupThread::Die).ok();
        self.join_handle.join().ok();
    }
}

pub(super) fn start_cleanup_thread(
    policy: RotationPolicy,
    file_spec: FileSpec,
) -> Result<CleanupThreadHandle, std::io::Error> {
    let (sender, receiver) = std::sync::mpsc::channel();
    let builder = ThreadBuilder::new().name(CLEANER.to_string());
    #[cfg(not(feature = "dont_minimize_extra_stacks"))]
    let builder = builder.stack_size(512 * 1024);
    Ok(CleanupThreadHandle {
        sender,
        join_handle: builder.spawn(move || {
            while let Ok(MessageToCleanupThread::Act) = receiver.recv() {
                remove_or_compress_too_old_logfiles_impl(&policy, &file_spec).unwrap_or_else(
                    |e| eprint_err(ErrorCode::Cleanup, "cleaning up log files failed", &e),
                );
            }
        })?,
    })
}

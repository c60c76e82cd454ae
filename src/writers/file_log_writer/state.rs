mod list_and_cleanup;

use super::config::Config;
use crate::{
    util::{eprint_err, ErrorCode},
    BandLogError, LogfileSelector, RotationPolicy,
};
use list_and_cleanup::CleanupThreadHandle;
use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::PathBuf,
};

struct RotationState {
    policy: RotationPolicy,
    // the index to which we will rotate next
    next_index: u32,
    current_size: u64,
    o_cleanup_thread_handle: Option<CleanupThreadHandle>,
}
impl RotationState {
    fn shutdown(&mut self) {
        if let Some(cleanup_thread_handle) = self.o_cleanup_thread_handle.take() {
            cleanup_thread_handle.shutdown();
        }
    }
}

enum Inner {
    Initial(Option<RotationPolicy>, bool),
    Active(Option<RotationState>, Box<dyn Write + Send>, PathBuf),
}

// The mutable state of a FileLogWriter.
//
// Filesystem activity is deferred: `Initial` turns into `Active` on the
// first write, so problems with the target directory surface as write
// errors, not at construction time.
pub(super) struct State {
    config: Config,
    inner: Inner,
}
impl State {
    pub(super) fn new(
        config: Config,
        o_rotation_policy: Option<RotationPolicy>,
        cleanup_in_background_thread: bool,
    ) -> Self {
        Self {
            config,
            inner: Inner::Initial(o_rotation_policy, cleanup_in_background_thread),
        }
    }

    fn initialize(&mut self) -> Result<(), std::io::Error> {
        let (o_policy, cleanup_in_background_thread) = match self.inner {
            Inner::Active(..) => return Ok(()),
            Inner::Initial(o_policy, cleanup_in_background_thread) => {
                (o_policy, cleanup_in_background_thread)
            }
        };
        std::fs::create_dir_all(self.config.file_spec.directory())?;

        self.inner = match o_policy {
            None => {
                let (write, path) = open_log_file(&self.config, self.config.append)?;
                Inner::Active(None, write, path)
            }
            Some(policy) => {
                let next_index = list_and_cleanup::highest_backup_index(&self.config.file_spec)
                    .map_or(0, |idx| idx + 1);
                let (write, path) = open_log_file(&self.config, self.config.append)?;
                let current_size = if self.config.append {
                    std::fs::metadata(&path)?.len()
                } else {
                    0
                };
                list_and_cleanup::remove_or_compress_too_old_logfiles_impl(
                    &policy,
                    &self.config.file_spec,
                )?;
                let o_cleanup_thread_handle = if cleanup_in_background_thread {
                    Some(list_and_cleanup::start_cleanup_thread(
                        policy,
                        self.config.file_spec.clone(),
                    )?)
                } else {
                    None
                };
                Inner::Active(
                    Some(RotationState {
                        policy,
                        next_index,
                        current_size,
                        o_cleanup_thread_handle,
                    }),
                    write,
                    path,
                )
            }
        };
        Ok(())
    }

    pub(super) fn write_buffer(&mut self, buf: &[u8]) -> std::io::Result<()> {
        if let Inner::Initial(_, _) = self.inner {
            self.initialize()?;
        }

        // rotate if necessary
        self.mount_next_writer_if_necessary(false)
            .unwrap_or_else(|e| {
                eprint_err(ErrorCode::LogFile, "cannot rotate log file", &e);
            });

        if let Inner::Active(ref mut o_rotation_state, ref mut log_file, _) = self.inner {
            log_file.write_all(buf)?;
            if let Some(ref mut rotation_state) = o_rotation_state {
                rotation_state.current_size += buf.len() as u64;
            }
        }
        Ok(())
    }

    pub(super) fn mount_next_writer_if_necessary(
        &mut self,
        force: bool,
    ) -> Result<(), BandLogError> {
        if let Inner::Active(Some(ref mut rotation_state), ref mut current_write, ref mut current_path) =
            self.inner
        {
            if force || rotation_state.current_size > rotation_state.policy.get_max_size() {
                current_write.flush().ok();
                // the active file must be closed before it can be renamed
                *current_write = Box::new(std::io::sink());
                let backup_path = self.config.file_spec.as_pathbuf(Some(
                    &list_and_cleanup::number_infix(rotation_state.next_index),
                ));
                match std::fs::rename(&*current_path, &backup_path) {
                    Ok(()) => rotation_state.next_index += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        // keep writing to the old file rather than to nowhere
                        let (write, path) = open_log_file(&self.config, true)?;
                        *current_write = write;
                        *current_path = path;
                        return Err(BandLogError::Io(e));
                    }
                }
                let (new_write, new_path) = open_log_file(&self.config, false)?;
                *current_write = new_write;
                *current_path = new_path;
                rotation_state.current_size = 0;

                list_and_cleanup::remove_or_compress_too_old_logfiles(
                    rotation_state.o_cleanup_thread_handle.as_ref(),
                    &rotation_state.policy,
                    &self.config.file_spec,
                )?;
            }
        }
        Ok(())
    }

    pub(super) fn flush(&mut self) -> std::io::Result<()> {
        if let Inner::Active(_, ref mut file, _) = self.inner {
            file.flush()
        } else {
            Ok(())
        }
    }

    pub(super) fn existing_log_files(&self, selector: &LogfileSelector) -> Vec<PathBuf> {
        list_and_cleanup::existing_log_files(&self.config.file_spec, selector)
    }

    pub(super) fn shutdown(&mut self) {
        if let Inner::Active(ref mut o_rotation_state, ref mut writer, _) = self.inner {
            if let Some(ref mut rotation_state) = o_rotation_state {
                rotation_state.shutdown();
            }
            writer.flush().ok();
        }
    }
}

fn open_log_file(
    config: &Config,
    append: bool,
) -> Result<(Box<dyn Write + Send>, PathBuf), std::io::Error> {
    let path = config.file_spec.as_pathbuf(None);
    let logfile = OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(&path)?;

    let w: Box<dyn Write + Send> = if let Some(capacity) = config.write_mode.buffersize() {
        Box::new(BufWriter::with_capacity(capacity, logfile))
    } else {
        Box::new(logfile)
    };
    Ok((w, path))
}

use super::LogWriter;
use crate::{
    util::{eprint_err, io_err, write_buffered, ErrorCode},
    DeferredNow, FormatFunction, WriteMode,
};
use log::Record;
use std::io::{BufWriter, Stdout, Write};
use std::sync::Mutex;

/// A [`LogWriter`] implementation that writes to the process's standard
/// output stream.
///
/// Writes are serialized: the unbuffered variant acquires the stdout lock
/// per record, the buffered variant goes through an internal mutex. With
/// [`WriteMode::SupportCapture`] the formatted line goes through `println!`,
/// which lets `cargo test` capture it.
pub struct ConsoleWriter {
    format: FormatFunction,
    threshold: log::LevelFilter,
    writer: InnerConsoleWriter,
}

enum InnerConsoleWriter {
    Unbuffered(Stdout),
    Buffered(Mutex<BufWriter<Stdout>>),
    SupportCapture,
}

impl ConsoleWriter {
    pub(crate) fn new(
        format: FormatFunction,
        threshold: log::LevelFilter,
        write_mode: WriteMode,
    ) -> Self {
        let writer = match write_mode {
            WriteMode::SupportCapture => InnerConsoleWriter::SupportCapture,
            _ => match write_mode.buffersize() {
                None => InnerConsoleWriter::Unbuffered(std::io::stdout()),
                Some(capacity) => InnerConsoleWriter::Buffered(Mutex::new(
                    BufWriter::with_capacity(capacity, std::io::stdout()),
                )),
            },
        };
        Self {
            format,
            threshold,
            writer,
        }
    }
}

impl LogWriter for ConsoleWriter {
    #[inline]
    fn write(&self, now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
        match &self.writer {
            InnerConsoleWriter::Unbuffered(stdout) => {
                let mut w = stdout.lock();
                write_buffered(self.format, now, record, &mut w)
            }
            InnerConsoleWriter::Buffered(m_w) => {
                let mut w = m_w.lock().map_err(|_e| io_err("Poison"))?;
                write_buffered(self.format, now, record, &mut *w)
            }
            InnerConsoleWriter::SupportCapture => {
                let mut tmp_buf = Vec::<u8>::with_capacity(200);
                (self.format)(&mut tmp_buf, now, record)
                    .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
                println!("{}", String::from_utf8_lossy(&tmp_buf));
                Ok(())
            }
        }
    }

    #[inline]
    fn flush(&self) -> std::io::Result<()> {
        match &self.writer {
            InnerConsoleWriter::Unbuffered(stdout) => {
                let mut w = stdout.lock();
                w.flush()
            }
            InnerConsoleWriter::Buffered(m_w) => {
                let mut w = m_w.lock().map_err(|_e| io_err("Poison"))?;
                w.flush()
            }
            InnerConsoleWriter::SupportCapture => Ok(()),
        }
    }

    fn max_log_level(&self) -> log::LevelFilter {
        self.threshold
    }

    fn shutdown(&self) {
        self.flush().ok();
    }
}

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use wait_timeout::ChildExt;

use crate::{Error, Result};

/// Runs ffprobe once per file and hands back its flat `key=value` report.
#[derive(Debug, Clone)]
pub struct Prober {
    program: PathBuf,
    timeout: Duration,
}

impl Prober {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Probe `path` and return the whole standard output.
    ///
    /// The child is killed if it runs past the timeout, and output still
    /// held open by a grandchild is abandoned at the same deadline. A
    /// non-zero exit status is not an error: whatever was printed is still
    /// returned.
    pub fn run(&self, path: &Path) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(["-v", "quiet", "-print_format", "flat", "-show_format"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::ProbeSpawn {
                program: self.program_name(),
                source,
            })?;

        let Some(mut stdout) = child.stdout.take() else {
            stop(&mut child);
            return Err(Error::ProbeOutput {
                program: self.program_name(),
            });
        };
        let (sender, receiver) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            let mut buf = Vec::new();
            let read = stdout.read_to_end(&mut buf).map(|_| buf);
            let _ = sender.send(read);
        });

        let deadline = Instant::now() + self.timeout;
        match child.wait_timeout(self.timeout) {
            Ok(Some(_status)) => {}
            Ok(None) => {
                stop(&mut child);
                return Err(self.timeout_error());
            }
            Err(err) => {
                stop(&mut child);
                return Err(err.into());
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        let bytes = match receiver.recv_timeout(remaining) {
            Ok(read) => read?,
            Err(RecvTimeoutError::Timeout) => return Err(self.timeout_error()),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(Error::ProbeOutput {
                    program: self.program_name(),
                })
            }
        };

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn timeout_error(&self) -> Error {
        Error::ProbeTimeout {
            program: self.program_name(),
            timeout: self.timeout,
        }
    }
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

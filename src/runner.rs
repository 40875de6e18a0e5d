use crate::error::ToolError;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of a tool that exited successfully.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn lines(&self) -> Vec<String> {
        self.stdout.lines().map(str::to_string).collect()
    }
}

/// An external tool invocation built as an explicit argument list.
///
/// Nothing goes through a shell, so target names and paths reach the tool
/// as single arguments no matter what characters they contain.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    budget: Duration,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, budget: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            budget,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str().to_os_string())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(&arg.to_string_lossy());
        }
        out
    }

    /// Runs the tool to completion, killing it once the budget is spent.
    ///
    /// The budget also covers collecting the output. A tool that exits but
    /// leaves a background child holding its pipes open still times out, and
    /// the whole process group is killed.
    pub fn run(&self) -> Result<ToolOutput, ToolError> {
        log::debug!("Running: {}", self.display());
        let deadline = Instant::now() + self.budget;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command.spawn().map_err(|e| self.spawn_error(e))?;

        // Drain both pipes while polling so a chatty tool cannot block on a full buffer.
        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Stream::Stdout, tx.clone());
        drain(child.stderr.take(), Stream::Stderr, tx);

        let status = match self.wait_until(&mut child, deadline)? {
            Some(status) => status,
            None => return Err(self.overrun(&mut child)),
        };

        let mut stdout = None;
        let mut stderr = None;
        while stdout.is_none() || stderr.is_none() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((Stream::Stdout, text)) => stdout = Some(text),
                Ok((Stream::Stderr, text)) => stderr = Some(text),
                Err(RecvTimeoutError::Timeout) => return Err(self.overrun(&mut child)),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        let stdout = stdout.unwrap_or_default();
        let stderr = stderr.unwrap_or_default();

        if !status.success() {
            return Err(ToolError::NonZeroExit {
                tool: self.program.clone(),
                code: status.code(),
                stderr,
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }

    fn wait_until(&self, child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>, ToolError> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Some(status)),
                Ok(None) if Instant::now() >= deadline => return Ok(None),
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    kill_tree(child);
                    return Err(ToolError::Io {
                        tool: self.program.clone(),
                        source,
                    });
                }
            }
        }
    }

    fn overrun(&self, child: &mut Child) -> ToolError {
        log::debug!("{} exceeded its {}s budget, killing it", self.program, self.budget.as_secs());
        kill_tree(child);
        ToolError::Timeout {
            tool: self.program.clone(),
            budget: self.budget,
        }
    }

    fn spawn_error(&self, source: io::Error) -> ToolError {
        match source.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound {
                tool: self.program.clone(),
            },
            _ => ToolError::Spawn {
                tool: self.program.clone(),
                source,
            },
        }
    }
}

enum Stream {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>, stream: Stream, tx: Sender<(Stream, String)>) {
    let Some(mut pipe) = pipe else {
        let _ = tx.send((stream, String::new()));
        return;
    };
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Kills the tool and everything it started, then reaps it.
fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        // The child leads its own group, so a negative pid reaches its descendants too.
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            unsafe {
                libc::kill(-pgid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Looks a binary up the way the OS would when spawning it by name.
pub fn resolve_binary(program: &str) -> Option<std::path::PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|full| full.is_file())
}

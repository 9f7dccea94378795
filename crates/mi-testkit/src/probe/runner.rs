//! Shell command execution with a wall-clock deadline

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Exit status reported when the deadline kills a command
pub const TIMEOUT_STATUS: i32 = 124;

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit status; 0 on success, non-zero on failure or timeout
    pub status: i32,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Whether the deadline expired before the command exited
    pub timed_out: bool,
}

impl ProcessOutput {
    /// Exited with status 0 inside the deadline
    pub fn success(&self) -> bool {
        self.status == 0 && !self.timed_out
    }
}

/// Runs shell commands on behalf of the probes.
pub trait ProcessRunner {
    /// Run `command` and wait at most `timeout` for it
    fn run(&self, command: &str, timeout: Duration) -> io::Result<ProcessOutput>;
}

/// `sh -c` runner
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &str, timeout: Duration) -> io::Result<ProcessOutput> {
        log::debug!("sh -c {:?} (timeout {:?})", command, timeout);
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // The shell leads its own group so the deadline reaches every
        // stage of a pipeline, not just `sh`.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt as _;
            cmd.process_group(0);
        }
        let mut child = cmd.spawn()?;

        // Drain both pipes while polling so a chatty child cannot block.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let (status, timed_out) = wait_with_deadline(&mut child, [&stdout, &stderr], timeout)?;
        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        let status = if timed_out {
            log::warn!("command timed out after {:?}: {}", timeout, command);
            TIMEOUT_STATUS
        } else {
            exit_code(status)
        };
        Ok(ProcessOutput {
            status,
            stdout,
            stderr,
            timed_out,
        })
    }
}

type Reader = Option<JoinHandle<io::Result<Vec<u8>>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn collect(handle: Reader) -> io::Result<String> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| io::Error::other("pipe reader panicked"))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Wait until the shell has exited and every process holding its output
/// pipes has closed them. Past the deadline the whole group is killed.
fn wait_with_deadline(
    child: &mut Child,
    readers: [&Reader; 2],
    timeout: Duration,
) -> io::Result<(std::process::ExitStatus, bool)> {
    let deadline = Instant::now().checked_add(timeout);
    let mut exited = None;
    loop {
        if exited.is_none() {
            exited = child.try_wait()?;
        }
        let drained = readers.iter().all(|r| match r {
            Some(handle) => handle.is_finished(),
            None => true,
        });
        if let (Some(status), true) = (exited, drained) {
            return Ok((status, false));
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            kill_group(child.id());
            let status = match exited {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    child.wait()?
                }
            };
            return Ok((status, true));
        }
        thread::sleep(Duration::from_millis(5));
    }
}

fn kill_group(pid: u32) {
    #[cfg(unix)]
    {
        let Ok(pid) = libc::pid_t::try_from(pid) else {
            return;
        };
        unsafe {
            let _ = libc::kill(-pid, libc::SIGKILL);
        }
    }
    #[cfg(not(unix))]
    {
        let _ = pid;
    }
}

fn exit_code(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    let signal = {
        use std::os::unix::process::ExitStatusExt as _;
        status.signal()
    };
    #[cfg(not(unix))]
    let signal: Option<i32> = None;

    match status.code() {
        Some(code) => code,
        None => signal.map(|s| 128 + s).unwrap_or(1),
    }
}

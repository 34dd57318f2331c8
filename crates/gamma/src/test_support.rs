//! Fixtures shared by the unit tests: canned executables and throwaway servers.

use axum::Router;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

/// Quiz block the fake `ollama` answers with.
pub const CANNED_BLOCK: &str = r#"questions = [];
questions[0] = "What is 2 + 2?";
questions[1] = "Capital of France?";
questions[2] = "Largest planet?";

answers = [];
answers[0] = ["3", "4", "5"];
answers[1] = ["Paris", "Rome", "Madrid"];
answers[2] = ["Mars", "Earth", "Jupiter"];

currentQuestion = 0;

correctAnswer = [];
correctAnswer[0] = 1;
correctAnswer[1] = 0;
correctAnswer[2] = 2;

soundright = -1;
soundwrong = -1;"#;

/// Write an executable shell script and return its path.
///
/// A child shell writes the file, so this process never holds a writable
/// descriptor that a concurrent spawn could inherit (ETXTBSY on exec).
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let path = dir.join(name);
    let mut child = Command::new("/bin/sh")
        .arg("-c")
        .arg(r#"cat > "$0" && chmod 755 "$0""#)
        .arg(&path)
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!("#!/bin/sh\n{body}\n").as_bytes())
        .unwrap();
    assert!(child.wait().unwrap().success(), "failed to write {name}");

    path
}

/// A stand-in for `ollama`: `list` prints two models, `run` wraps
/// [`CANNED_BLOCK`] in chatter.
#[cfg(unix)]
pub fn fake_ollama(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "ollama",
        &format!(
            r#"if [ "$1" = "list" ]; then
  printf 'NAME               ID              SIZE      MODIFIED\n'
  printf 'llama3.2:latest    a80c4f17acd5    2.0 GB    2 weeks ago\n'
  printf 'mistral:7b         f974a74358d6    4.1 GB    3 months ago\n'
  exit 0
fi
cat > /dev/null
cat <<'EOF'
Sure! Here is the GML:

{CANNED_BLOCK}

Let me know if you need more questions.
EOF"#
        ),
    )
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// Records every log line together with the thread that emitted it.
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("gamma")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut records) = self.records.lock() {
                records.push((thread::current().id(), record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

/// Install the capturing logger. Safe to call from every test.
pub fn capture_logs() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Debug);
        }
    });
}

/// Drain the lines logged at `level` by the current thread.
///
/// `#[tokio::test]` runs on the test's own thread, so parallel tests do not
/// see each other's lines.
pub fn take_logs(level: Level) -> Vec<String> {
    let current = thread::current().id();
    let mut records = LOGGER.records.lock().unwrap();
    let (mine, others): (Vec<_>, Vec<_>) = records
        .drain(..)
        .partition(|(thread, _, _)| *thread == current);
    *records = others;

    mine.into_iter()
        .filter(|(_, l, _)| *l == level)
        .map(|(_, _, message)| message)
        .collect()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scripts_run_while_others_are_written() {
        let dir = TempDir::new().unwrap();

        thread::scope(|scope| {
            for worker in 0..8 {
                let dir = dir.path();
                scope.spawn(move || {
                    for round in 0..10 {
                        let script = write_script(
                            dir,
                            &format!("echo-{worker}-{round}"),
                            &format!("echo {worker}-{round}"),
                        );
                        let output = std::process::Command::new(&script).output().unwrap();
                        assert_eq!(
                            String::from_utf8_lossy(&output.stdout).trim(),
                            format!("{worker}-{round}")
                        );
                    }
                });
            }
        });
    }
}

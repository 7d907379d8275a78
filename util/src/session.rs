//! Session management
//!
//! A session is a timestamped directory created for each run of an executable, holding the run's
//! log file and any data archived or saved during the run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use chrono::{DateTime, Utc};
use conquer_once::OnceCell;
use erased_serde::Serialize;
use log::{debug, warn};
use std::fs;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::thread;
use std::thread::JoinHandle;
use thiserror::Error;

// Internal imports
use crate::time;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static SESSION_EPOCH: OnceCell<DateTime<Utc>> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// A chrono format string which diplays a timestamp. See
/// https://docs.rs/chrono/0.4.11/chrono/format/strftime/index.html for more
/// information.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

type SaveRequest = (PathBuf, Box<dyn Serialize + Send>);

/// A struct storing information about the current session
pub struct Session {
    /// The root directory for this session
    pub session_root: PathBuf,

    /// The root directory for this session's archives
    pub arch_root: PathBuf,

    /// The path to the session's log file
    pub log_file_path: PathBuf,

    save_sender: Option<Sender<SaveRequest>>,

    save_thread: Option<JoinHandle<()>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors associated with the session module.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot determine the software root directory: {0}")]
    SwRootNotFound(std::io::Error),

    #[error("Cannot create the session directory: {0}")]
    CannotCreateDir(std::io::Error),

    #[error("Cannot start the session save thread: {0}")]
    CannotSpawnSaveThread(std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Session {
    /// Start a new session within the given directory of the software root.
    ///
    /// This will create a new session directory named `{exec_name}_{timestamp}`
    pub fn new(exec_name: &str, sessions_dir: &str) -> Result<Self, SessionError> {
        let root = crate::host::get_sw_root().map_err(SessionError::SwRootNotFound)?;

        Self::new_in(root, exec_name, sessions_dir)
    }

    /// Start a new session within `root/sessions_dir`.
    pub fn new_in<P: Into<PathBuf>>(
        root: P,
        exec_name: &str,
        sessions_dir: &str,
    ) -> Result<Self, SessionError> {
        // Set the session epoch, the first session of the process owns it
        let timestamp = SESSION_EPOCH.get_or_init(Utc::now).format(TIMESTAMP_FORMAT);

        // Create the session path
        let mut path: PathBuf = root.into();
        path.push(sessions_dir);
        path.push(format!("{}_{}", exec_name, timestamp));

        fs::create_dir_all(&path).map_err(SessionError::CannotCreateDir)?;

        // Create the archive dir
        let arch_path = path.join("arch");
        fs::create_dir_all(&arch_path).map_err(SessionError::CannotCreateDir)?;

        let log_file_path = path.join(format!("{}.log", exec_name));

        // Spawn background save thread
        let (tx, rx) = channel();
        let session_root = path.clone();
        let save_thread = thread::Builder::new()
            .name(format!("{}_save", exec_name))
            .spawn(move || save_thread(session_root, rx))
            .map_err(SessionError::CannotSpawnSaveThread)?;

        Ok(Session {
            session_root: path,
            arch_root: arch_path,
            log_file_path,
            save_sender: Some(tx),
            save_thread: Some(save_thread),
        })
    }

    /// Exit the session, waiting for the save thread to finish any pending actions
    pub fn exit(mut self) {
        self.stop_save_thread();
    }

    /// Saves the given data to the given session-relative path in a background thread.
    ///
    /// Only `.json` paths are supported.
    pub fn save<P: AsRef<Path>, T: Serialize + Send + 'static>(&self, path: P, data: T) {
        let sender = match self.save_sender {
            Some(ref s) => s,
            None => {
                warn!("Cannot save {:?} as the session has exited", path.as_ref());
                return;
            }
        };

        if let Err(e) = sender.send((path.as_ref().to_path_buf(), Box::new(data))) {
            warn!(
                "Could not send data to be saved to path {:?}: {}",
                path.as_ref(),
                e
            )
        }
    }

    fn stop_save_thread(&mut self) {
        // Dropping the sender ends the save thread's receive loop once pending data is written
        self.save_sender.take();

        if let Some(handle) = self.save_thread.take() {
            debug!("Waiting for session save thread");
            if handle.join().is_err() {
                warn!("Session save thread panicked");
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_save_thread();
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the number of seconds elapsed since the start of the session.
///
/// Returns `NAN` if no session has been started in this process.
pub fn get_elapsed_seconds() -> f64 {
    match SESSION_EPOCH.get() {
        Some(e) => time::duration_to_seconds(Utc::now() - *e).unwrap_or(std::f64::NAN),
        None => std::f64::NAN,
    }
}

/// Return a reference to the session's epoch, or `None` if no session has been started.
pub fn get_epoch() -> Option<&'static DateTime<Utc>> {
    SESSION_EPOCH.get()
}

// -----------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// -----------------------------------------------------------------------------------------------

fn save_thread(session_root: PathBuf, receiver: Receiver<SaveRequest>) {
    for (path, data) in receiver {
        let full_path = session_root.join(path);

        match full_path.extension().and_then(|s| s.to_str()) {
            Some("json") => {
                // Create the parent path if needed
                if let Some(parent) = full_path.parent() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        warn!("Couldn't create parent directory for {:?}: {}", full_path, e);
                        continue;
                    }
                }

                let file = match OpenOptions::new()
                    .write(true)
                    .truncate(true)
                    .create(true)
                    .open(&full_path)
                {
                    Ok(f) => f,
                    Err(e) => {
                        warn!("Couldn't create file {:?}: {}", full_path, e);
                        continue;
                    }
                };

                if let Err(e) = serde_json::to_writer_pretty(&file, &data) {
                    warn!("Couldn't serialize data for file {:?}: {}", full_path, e);
                }
            }
            ext => warn!(
                "Unrecognised file path extension for {:?} (got {:?})",
                full_path, ext
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_session_save() {
        let root = std::env::temp_dir().join("util_session_test");

        let session = Session::new_in(&root, "session_test", "sessions").unwrap();
        assert!(session.session_root.starts_with(&root));
        assert!(session.arch_root.is_dir());
        assert!(get_epoch().is_some());
        assert!(get_elapsed_seconds() >= 0.0);

        session.save("data/values.json", vec![1.0f64, 2.0, 3.0]);
        let saved = session.session_root.join("data/values.json");
        session.exit();

        let values: Vec<f64> =
            serde_json::from_str(&std::fs::read_to_string(saved).unwrap()).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}

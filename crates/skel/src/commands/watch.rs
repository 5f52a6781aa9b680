//! `skel watch` command implementation.
//!
//! Re-runs the conversion every time the component file changes. In remote
//! mode each change starts a generation on its own thread; results are
//! routed through a [`RequestSequencer`] so a slow reply to an earlier save
//! never replaces the output of a later one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use clap::Args;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use skel_config::Config;
use skel_engine::SkeletonGenerator;
use skel_generate::{
    GenerateError, GenerateRequest, GenerateResponse, GeneratorClient, RequestSequencer,
    RequestTicket,
};
use tracing::{debug, warn};

use super::{local_generator, report_generate_error};
use crate::debouncer::ChangeDebouncer;
use crate::error::CliError;
use crate::output::Output;

const DEBOUNCE: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Completion = (RequestTicket, Result<GenerateResponse, GenerateError>);

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Component file to watch.
    file: PathBuf,

    /// Generate with the remote service instead of the local engine.
    #[arg(long)]
    remote: bool,

    /// Print local skeletons on a single line.
    #[arg(long)]
    compact: bool,

    /// Path to configuration file (default: auto-discover skel.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl WatchArgs {
    /// Execute the watch command. Runs until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the file does not exist, or
    /// the watcher cannot be installed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let target = std::fs::canonicalize(&self.file)?;

        let (completion_tx, completion_rx) = mpsc::channel();
        let remote = self.remote.then(|| RemotePipeline {
            client: Arc::new(GeneratorClient::from_config(&config.generator)),
            sequencer: RequestSequencer::new(),
            completions: completion_tx,
        });
        if remote.is_some() && config.generator.api_key().is_none() {
            output.warning("No generator.api_key configured, remote generations will fail");
        }
        let session = WatchSession {
            output,
            local: local_generator(&config, self.compact),
            remote,
        };

        let debouncer = Arc::new(ChangeDebouncer::new(DEBOUNCE));
        let _watcher = watch_file(&target, Arc::clone(&debouncer))?;

        session
            .output
            .highlight(&format!("Watching {} (Ctrl+C to stop)", target.display()));
        session.run(&target);

        loop {
            match completion_rx.recv_timeout(POLL_INTERVAL) {
                Ok((ticket, result)) => session.complete(ticket, result),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                // Local mode holds no sender
                Err(mpsc::RecvTimeoutError::Disconnected) => std::thread::sleep(POLL_INTERVAL),
            }

            for path in debouncer.drain_ready() {
                session.run(&path);
            }
        }
    }
}

/// Remote generation state for one watch session.
struct RemotePipeline {
    client: Arc<GeneratorClient>,
    sequencer: RequestSequencer,
    completions: mpsc::Sender<Completion>,
}

impl RemotePipeline {
    /// Start a generation in the background, superseding any in flight.
    fn start(&self, source: String) -> RequestTicket {
        let ticket = self.sequencer.begin();
        let client = Arc::clone(&self.client);
        let completions = self.completions.clone();
        std::thread::spawn(move || {
            let result = client.generate(&GenerateRequest::new(source));
            let _ = completions.send((ticket, result));
        });
        ticket
    }
}

struct WatchSession {
    output: Output,
    local: SkeletonGenerator,
    remote: Option<RemotePipeline>,
}

impl WatchSession {
    fn run(&self, path: &Path) {
        self.output.separator();
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                self.output
                    .error(&format!("Failed to read {}: {e}", path.display()));
                return;
            }
        };

        if let Some(remote) = &self.remote {
            let ticket = remote.start(source);
            debug!(ticket = ticket.id(), "Started remote generation");
            self.output.info("Generating...");
            return;
        }

        let started = Instant::now();
        match self.local.generate(&source) {
            Ok(Some(skeleton)) => {
                self.emit(&skeleton.markup);
                self.output.success(&format!(
                    "Skeleton updated in {}ms",
                    started.elapsed().as_millis()
                ));
            }
            Ok(None) => self
                .output
                .warning("Component has no content, no skeleton generated"),
            Err(e) => self.output.error(&e.to_string()),
        }
    }

    fn complete(&self, ticket: RequestTicket, result: Result<GenerateResponse, GenerateError>) {
        let Some(remote) = &self.remote else {
            return;
        };
        let Some(result) = remote.sequencer.accept(ticket, result) else {
            debug!(ticket = ticket.id(), "Discarded stale generation");
            return;
        };

        match result {
            Ok(response) => {
                self.emit(&response.skeleton_code);
                self.output.success(&format!(
                    "Generated {} skeleton with {}",
                    response.framework, response.generated_with
                ));
            }
            Err(e) => {
                self.output.error(&e.to_string());
                report_generate_error(&self.output, &e);
            }
        }
    }

    fn emit(&self, text: &str) {
        if let Err(e) = self.output.result(text) {
            warn!(error = %e, "Failed to write skeleton");
        }
    }
}

/// Watch `target` and record its changes into `debouncer`.
///
/// The parent directory is watched so editors that save by replacing the
/// file are still seen.
fn watch_file(
    target: &Path,
    debouncer: Arc<ChangeDebouncer>,
) -> Result<RecommendedWatcher, CliError> {
    let dir = target
        .parent()
        .ok_or_else(|| std::io::Error::other(format!("{} has no parent", target.display())))?;
    let watched = target.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res| {
        record_change(res, &debouncer, &watched);
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;

    Ok(watcher)
}

/// Record a notify event if it creates or modifies `target`.
fn record_change(
    res: Result<notify::Event, notify::Error>,
    debouncer: &ChangeDebouncer,
    target: &Path,
) {
    let event = match res {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "File watcher error");
            return;
        }
    };
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return;
    }
    if event
        .paths
        .iter()
        .any(|path| path.file_name() == target.file_name())
    {
        debouncer.record(target.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use pretty_assertions::assert_eq;

    fn event(kind: EventKind, path: &str) -> Result<notify::Event, notify::Error> {
        Ok(notify::Event::new(kind).add_path(PathBuf::from(path)))
    }

    #[test]
    fn test_record_change_matches_target() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);
        let target = Path::new("/src/card.html");

        record_change(
            event(EventKind::Modify(ModifyKind::Any), "/src/card.html"),
            &debouncer,
            target,
        );

        assert_eq!(debouncer.drain_ready(), vec![target.to_path_buf()]);
    }

    #[test]
    fn test_record_change_ignores_other_files() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);

        record_change(
            event(EventKind::Modify(ModifyKind::Any), "/src/other.html"),
            &debouncer,
            Path::new("/src/card.html"),
        );

        assert!(debouncer.drain_ready().is_empty());
    }

    #[test]
    fn test_record_change_ignores_removal() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);

        record_change(
            event(EventKind::Remove(RemoveKind::File), "/src/card.html"),
            &debouncer,
            Path::new("/src/card.html"),
        );

        assert!(debouncer.drain_ready().is_empty());
    }

    #[test]
    fn test_record_change_accepts_replacement() {
        let debouncer = ChangeDebouncer::new(Duration::ZERO);
        let target = Path::new("/src/card.html");

        record_change(
            event(EventKind::Create(CreateKind::File), "/src/card.html"),
            &debouncer,
            target,
        );

        assert_eq!(debouncer.drain_ready(), vec![target.to_path_buf()]);
    }

    #[test]
    fn test_watch_file_sees_write() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("card.html");
        std::fs::write(&target, "<p>a</p>").unwrap();
        let target = std::fs::canonicalize(&target).unwrap();

        let debouncer = Arc::new(ChangeDebouncer::new(Duration::from_millis(10)));
        let _watcher = watch_file(&target, Arc::clone(&debouncer)).unwrap();

        // Give the watcher time to start
        std::thread::sleep(Duration::from_millis(100));
        std::fs::write(&target, "<p>b</p>").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut changed = Vec::new();
        while changed.is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            changed = debouncer.drain_ready();
        }

        assert_eq!(changed, vec![target]);
    }
}

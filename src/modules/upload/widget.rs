use bytes::Bytes;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use super::client::UploadClient;
use super::message::ResponseMessage;
use super::validation::{check_extension, check_size, validate_file};

pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select a file to upload.";

/// Delay before the progress indicator drops back to zero after an upload
const DEFAULT_PROGRESS_RESET_DELAY: Duration = Duration::from_secs(2);

type StatusCallback = Box<dyn Fn(ResponseMessage) + Send + Sync>;

/// File that passed local validation and is waiting to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub name: String,
    pub contents: Bytes,
}

/// Progress indicator state published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadProgress {
    /// 0..=100
    pub percent: u8,
    /// True while a request is in flight
    pub loading: bool,
}

fn percent_of(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent.min(total) * 100 + total / 2) / total) as u8
}

/// Client-side upload form state
///
/// Holds at most one [`UploadCandidate`]. `submit` borrows the widget
/// mutably, so a widget never has more than one upload in flight.
pub struct UploadWidget {
    client: UploadClient,
    candidate: Option<UploadCandidate>,
    /// Name shown in the file input, cleared on rejection and after every upload
    input: Option<String>,
    progress: Arc<watch::Sender<UploadProgress>>,
    /// Bumped per submit so a stale reset timer cannot zero a newer upload
    generation: Arc<AtomicU64>,
    reset_delay: Duration,
    on_status: StatusCallback,
}

impl UploadWidget {
    pub fn new<F>(client: UploadClient, on_status: F) -> Self
    where
        F: Fn(ResponseMessage) + Send + Sync + 'static,
    {
        let (progress, _) = watch::channel(UploadProgress::default());
        Self {
            client,
            candidate: None,
            input: None,
            progress: Arc::new(progress),
            generation: Arc::new(AtomicU64::new(0)),
            reset_delay: DEFAULT_PROGRESS_RESET_DELAY,
            on_status: Box::new(on_status),
        }
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Stream of progress updates, starting from the current state
    pub fn subscribe(&self) -> watch::Receiver<UploadProgress> {
        self.progress.subscribe()
    }

    pub fn progress(&self) -> UploadProgress {
        *self.progress.borrow()
    }

    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    pub fn input_value(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn emit(&self, message: ResponseMessage) {
        (self.on_status)(message);
    }

    fn reject(&mut self, message: impl Into<String>) -> bool {
        self.candidate = None;
        self.input = None;
        self.emit(ResponseMessage::error(message));
        false
    }

    /// Select an in-memory file. Returns whether it was accepted.
    pub fn select_file(&mut self, name: &str, contents: Bytes) -> bool {
        self.input = Some(name.to_string());

        if let Err(e) = validate_file(name, &contents) {
            debug!("Rejected {}: {}", name, e);
            return self.reject(e.to_string());
        }

        debug!("Accepted {} ({} bytes)", name, contents.len());
        self.candidate = Some(UploadCandidate {
            name: name.to_string(),
            contents,
        });
        self.emit(ResponseMessage::default());
        true
    }

    /// Select a file from disk. Extension and size are checked before the
    /// contents are read.
    pub async fn select_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.input = Some(name.clone());

        if let Err(e) = check_extension(&name) {
            return self.reject(e.to_string());
        }

        let size = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata.len(),
            Err(e) => return self.reject(format!("Unable to read {}: {}", name, e)),
        };
        if let Err(e) = check_size(size) {
            return self.reject(e.to_string());
        }

        match tokio::fs::read(path).await {
            Ok(contents) => self.select_file(&name, Bytes::from(contents)),
            Err(e) => self.reject(format!("Unable to read {}: {}", name, e)),
        }
    }

    /// Upload the held candidate
    ///
    /// Without a candidate this reports an error and makes no request.
    /// The input is cleared once the request completes; a failed upload
    /// also drops the candidate. The outcome is both passed to the status
    /// callback and returned.
    pub async fn submit(&mut self) -> ResponseMessage {
        let Some(candidate) = self.candidate.clone() else {
            let message = ResponseMessage::error(NO_FILE_SELECTED_MESSAGE);
            self.emit(message.clone());
            return message;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress.send_modify(|p| {
            p.percent = 0;
            p.loading = true;
        });

        let progress = Arc::clone(&self.progress);
        let result = self
            .client
            .upload_csv(&candidate.name, candidate.contents, move |sent, total| {
                let percent = percent_of(sent, total);
                progress.send_modify(|p| p.percent = percent);
            })
            .await;

        let message = match result {
            Ok(reply) => {
                info!("Upload finished: {}", reply.message);
                reply.into()
            }
            Err(e) => {
                info!("Upload failed: {}", e);
                self.candidate = None;
                e.into_message()
            }
        };
        self.input = None;

        self.progress.send_modify(|p| p.loading = false);
        self.schedule_progress_reset(generation);
        self.emit(message.clone());
        message
    }

    fn schedule_progress_reset(&self, generation: u64) {
        let progress = Arc::clone(&self.progress);
        let current = Arc::clone(&self.generation);
        let delay = self.reset_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                progress.send_modify(|p| p.percent = 0);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::upload::message::MessageStatus;
    use crate::shared::constants::MAX_CSV_FILE_SIZE;
    use crate::shared::test_helpers::{
        contacts_csv, fake_contacts, spawn_app, InMemoryContactStore,
    };
    use std::io::Write;
    use std::sync::Mutex;

    const VALID: &str = "First_Name,Last_Name,Country_Code,Whatsapp_Number,Email,Tags\nJane,Doe,+1,5551234,jane@x.com,vip";

    /// Widget whose status messages are captured in order
    fn widget(base_url: &str) -> (UploadWidget, Arc<Mutex<Vec<ResponseMessage>>>) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let widget = UploadWidget::new(UploadClient::new(base_url), move |m| {
            sink.lock().unwrap().push(m)
        });
        (widget, messages)
    }

    fn last(messages: &Arc<Mutex<Vec<ResponseMessage>>>) -> ResponseMessage {
        messages.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent_of(0, 200), 0);
        assert_eq!(percent_of(1, 200), 1);
        assert_eq!(percent_of(100, 200), 50);
        assert_eq!(percent_of(199, 200), 100);
        assert_eq!(percent_of(300, 200), 100);
        assert_eq!(percent_of(0, 0), 100);
    }

    #[test]
    fn test_accepts_valid_file() {
        let (mut widget, messages) = widget("http://127.0.0.1:9");
        let contents = Bytes::from_static(VALID.as_bytes());

        assert!(widget.select_file("contacts.csv", contents.clone()));

        let candidate = widget.candidate().unwrap();
        assert_eq!(candidate.name, "contacts.csv");
        assert_eq!(candidate.contents, contents);
        assert_eq!(widget.input_value(), Some("contacts.csv"));
        assert!(last(&messages).is_idle());
    }

    #[test]
    fn test_rejections_drop_candidate_and_clear_input() {
        let (mut widget, messages) = widget("http://127.0.0.1:9");
        assert!(widget.select_file("contacts.csv", Bytes::from_static(VALID.as_bytes())));

        assert!(!widget.select_file("contacts.txt", Bytes::from_static(VALID.as_bytes())));
        assert!(widget.candidate().is_none());
        assert!(widget.input_value().is_none());
        assert_eq!(
            last(&messages),
            ResponseMessage::error("Please upload a valid CSV file.")
        );

        let mut oversized = VALID.as_bytes().to_vec();
        oversized.resize(MAX_CSV_FILE_SIZE + 1, b'\n');
        assert!(!widget.select_file("contacts.csv", Bytes::from(oversized)));
        assert_eq!(
            last(&messages),
            ResponseMessage::error("Please upload a file smaller than 2 MB.")
        );

        assert!(!widget.select_file("contacts.csv", Bytes::from_static(b"name,email\n")));
        assert!(widget.candidate().is_none());
        assert_eq!(last(&messages).status, MessageStatus::Error);
        assert!(last(&messages)
            .message
            .starts_with("The CSV file should have the columns in the following order:"));
    }

    #[tokio::test]
    async fn test_select_path_reads_file() {
        let (mut widget, _messages) = widget("http://127.0.0.1:9");
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        assert!(widget.select_path(file.path()).await);
        assert_eq!(widget.candidate().unwrap().contents.as_ref(), VALID.as_bytes());
    }

    #[tokio::test]
    async fn test_select_path_checks_size_before_reading() {
        let (mut widget, messages) = widget("http://127.0.0.1:9");
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.as_file().set_len(MAX_CSV_FILE_SIZE as u64 + 1).unwrap();

        assert!(!widget.select_path(file.path()).await);
        assert_eq!(
            last(&messages),
            ResponseMessage::error("Please upload a file smaller than 2 MB.")
        );
    }

    #[tokio::test]
    async fn test_select_path_missing_file() {
        let (mut widget, messages) = widget("http://127.0.0.1:9");

        assert!(!widget.select_path("/nonexistent/dir/contacts.csv").await);
        assert!(last(&messages).message.starts_with("Unable to read contacts.csv"));
    }

    #[tokio::test]
    async fn test_submit_without_candidate_makes_no_request() {
        // Nothing listens on port 9; a request would surface a transport error
        let (mut widget, messages) = widget("http://127.0.0.1:9");
        let progress = widget.subscribe();

        let message = widget.submit().await;

        assert_eq!(message, ResponseMessage::error(NO_FILE_SELECTED_MESSAGE));
        assert_eq!(last(&messages), message);
        assert!(!progress.has_changed().unwrap());
        assert_eq!(widget.progress(), UploadProgress::default());
    }

    #[tokio::test]
    async fn test_submit_round_trip() {
        let store = Arc::new(InMemoryContactStore::default());
        let base_url = spawn_app(store.clone()).await;
        let client = UploadClient::new(&base_url);
        let (widget, messages) = widget(&base_url);
        let mut widget = widget.with_reset_delay(Duration::from_millis(50));
        let rows = fake_contacts(3);

        assert!(widget.select_file("contacts.csv", Bytes::from(contacts_csv(&rows))));
        let message = widget.submit().await;

        assert_eq!(message.status, MessageStatus::Success);
        assert_eq!(
            message.message,
            "A total of 3 users have been successfully added to the database"
        );
        assert_eq!(last(&messages), message);
        assert_eq!(
            widget.progress(),
            UploadProgress {
                percent: 100,
                loading: false
            }
        );
        assert!(widget.candidate().is_some());
        assert!(widget.input_value().is_none());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(widget.progress().percent, 0);

        let listed = client.list_contacts().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].first_name, rows[0].first_name);
        assert_eq!(listed[2].email, rows[2].email);
    }

    #[tokio::test]
    async fn test_stale_reset_does_not_zero_newer_upload() {
        let base_url = spawn_app(Arc::new(InMemoryContactStore::default())).await;
        let (widget, _messages) = widget(&base_url);
        let mut widget = widget.with_reset_delay(Duration::from_millis(400));
        let rows = fake_contacts(2);

        assert!(widget.select_file("contacts.csv", Bytes::from(contacts_csv(&rows))));
        widget.submit().await;

        tokio::time::sleep(Duration::from_millis(250)).await;
        let message = widget.submit().await;
        assert_eq!(message.status, MessageStatus::Success);

        // First upload's timer has fired by now, the second one's has not
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(widget.progress().percent, 100);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(widget.progress().percent, 0);
    }

    #[tokio::test]
    async fn test_server_failure_drops_candidate() {
        let base_url = spawn_app(Arc::new(InMemoryContactStore::failing())).await;
        let (mut widget, messages) = widget(&base_url);

        assert!(widget.select_file("contacts.csv", Bytes::from_static(VALID.as_bytes())));
        let message = widget.submit().await;

        assert_eq!(
            message,
            ResponseMessage::new(MessageStatus::Failure, "Database error occurred")
        );
        assert_eq!(last(&messages), message);
        assert!(widget.candidate().is_none());
        assert!(widget.input_value().is_none());
        assert!(!widget.progress().loading);
    }

    #[tokio::test]
    async fn test_transport_failure_reports_error() {
        let (mut widget, messages) = widget("http://127.0.0.1:9");

        assert!(widget.select_file("contacts.csv", Bytes::from_static(VALID.as_bytes())));
        let message = widget.submit().await;

        assert_eq!(message.status, MessageStatus::Error);
        assert!(message.message.starts_with("Request failed"));
        assert_eq!(last(&messages), message);
        assert!(widget.candidate().is_none());
    }
}

use std::{
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use tokio::sync::oneshot;

use crate::{
    drag::HoverNotification,
    geometry::{Offset, Point, Rect},
    record::ContactRecord,
    settings::FillSettings,
    tokens::{Token, TokenKey},
    zones::DropTarget,
};

use super::{
    events::EventSink,
    state::{DropReport, GestureEvent, ManualFillState},
};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

type FillTask = Box<dyn FnOnce(&mut ManualFillState) + Send + 'static>;

enum FillCommand {
    Execute(FillTask),
    Shutdown,
}

struct ControllerInner {
    sender: mpsc::Sender<FillCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ControllerInner {
    /// Asks the update thread to stop and hands back its handle for joining.
    ///
    /// Returns `None` when already stopped, or when called on the update thread
    /// itself (a queued task dropped the last handle), which cannot join itself.
    fn shutdown(&self) -> Option<JoinHandle<()>> {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let handle = guard.take()?;
        // the thread may already be gone if it panicked
        let _ = self.sender.send(FillCommand::Shutdown);

        if handle.thread().id() == thread::current().id() {
            return None;
        }
        Some(handle)
    }

    fn stop(&self) {
        if let Some(handle) = self.shutdown() {
            if let Err(join_err) = handle.join() {
                log_error!("Failed to join fill update thread: {join_err:?}");
            }
        }
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Handle to the thread that owns the manual-fill state.
///
/// Gesture, layout and edit callbacks may come from any thread; each one is
/// queued and applied in order on the single update thread, so the registry
/// and the contact record are never touched concurrently.
#[derive(Clone)]
pub struct FillController {
    inner: Arc<ControllerInner>,
}

impl FillController {
    pub fn new(
        record: ContactRecord,
        settings: FillSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<FillCommand>();

        let worker = thread::Builder::new()
            .name("cardfill-update".into())
            .spawn(move || {
                let mut state = ManualFillState::new(record, &settings, sink);

                while let Ok(command) = command_rx.recv() {
                    match command {
                        FillCommand::Execute(task) => task(&mut state),
                        FillCommand::Shutdown => break,
                    }
                }

                log_info!("Fill update thread shutting down");
            })
            .context("failed to spawn fill update thread")?;

        Ok(Self {
            inner: Arc::new(ControllerInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    /// Runs `task` on the update thread and waits for its result.
    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut ManualFillState) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = FillCommand::Execute(Box::new(move |state| {
            let result = task(state);
            if reply_tx.send(result).is_err() {
                log_error!("Fill caller dropped before receiving result");
            }
        }));

        self.inner
            .sender
            .send(command)
            .map_err(|_| anyhow!("fill update thread has stopped"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("fill update thread terminated unexpectedly"))
    }

    /// Queues `task` without waiting. Used from gesture callbacks that must not block.
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut ManualFillState) + Send + 'static,
    {
        self.inner
            .sender
            .send(FillCommand::Execute(Box::new(task)))
            .map_err(|_| anyhow!("fill update thread has stopped"))
    }

    pub fn post_gesture(&self, event: GestureEvent) -> Result<()> {
        self.post(move |state| state.handle_gesture(event))
    }

    pub async fn load_tokens(&self, raw_text: impl Into<String>) -> Result<Vec<Token>> {
        let raw_text = raw_text.into();
        self.execute(move |state| state.load_tokens(&raw_text).to_vec())
            .await
    }

    pub async fn load_payload(&self, payload: impl Into<String>) -> Result<Vec<Token>> {
        let payload = payload.into();
        self.execute(move |state| state.load_payload(&payload).to_vec())
            .await
    }

    pub async fn tokens(&self) -> Result<Vec<Token>> {
        self.execute(|state| state.tokens().to_vec()).await
    }

    pub async fn report_bounds(&self, field_id: impl Into<String>, rect: Rect) -> Result<DropTarget> {
        let field_id = field_id.into();
        self.execute(move |state| state.report_bounds(&field_id, rect))
            .await?
    }

    pub async fn gesture_start(&self, token: TokenKey, pointer: Point) -> Result<bool> {
        self.execute(move |state| state.gesture_start(token, pointer))
            .await
    }

    pub async fn gesture_update(
        &self,
        token: TokenKey,
        pointer: Point,
        translation: Offset,
    ) -> Result<Option<HoverNotification>> {
        self.execute(move |state| state.gesture_update(token, pointer, translation))
            .await
    }

    pub async fn gesture_end(&self, token: TokenKey, pointer: Point) -> Result<Option<DropReport>> {
        self.execute(move |state| state.gesture_end(token, pointer))
            .await
    }

    pub async fn edit_field(&self, field_id: impl Into<String>, value: impl Into<String>) -> Result<bool> {
        let field_id = field_id.into();
        let value = value.into();
        self.execute(move |state| state.edit_field(&field_id, value))
            .await?
    }

    pub async fn clear_field(&self, field_id: impl Into<String>) -> Result<bool> {
        let field_id = field_id.into();
        self.execute(move |state| state.clear_field(&field_id))
            .await?
    }

    pub async fn add_phone_slot(&self) -> Result<usize> {
        self.execute(|state| state.add_phone_slot()).await
    }

    pub async fn record(&self) -> Result<ContactRecord> {
        self.execute(|state| state.record().clone()).await
    }

    /// Hands the record back as JSON for saving and stops the update thread.
    ///
    /// The join runs on the blocking pool so the caller's runtime keeps going
    /// while queued work drains.
    pub async fn finish(&self) -> Result<String> {
        let json = self.execute(|state| state.record().to_json()).await??;

        if let Some(handle) = self.inner.shutdown() {
            tokio::task::spawn_blocking(move || handle.join())
                .await
                .context("failed to wait for fill update thread")?
                .map_err(|_| anyhow!("fill update thread panicked"))?;
        }
        Ok(json)
    }
}

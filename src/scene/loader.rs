//! Asynchronous asset loading.
//!
//! A load runs off the frame thread and reports back through a
//! [`LoadHandle`]. The frame loop polls the handle without blocking; headless
//! runs can await it instead.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use futures::channel::oneshot;
use log::{debug, info};

use super::model::Model;
use crate::error::{SceneError, SceneResult};

/// Starts loads; each call yields an independent handle
pub trait AssetLoader {
    fn load(&self, path: &Path) -> LoadHandle;
}

/// Snapshot of a load in progress
#[derive(Debug)]
pub enum LoadStatus {
    Pending,
    Ready(Model),
    Failed(SceneError),
}

/// Completing side of a [`LoadHandle`]
#[derive(Debug)]
pub struct LoadSender {
    path: PathBuf,
    sender: oneshot::Sender<SceneResult<Model>>,
}

impl LoadSender {
    /// Deliver the outcome; a dropped handle just discards it
    pub fn complete(self, result: SceneResult<Model>) {
        if self.sender.send(result).is_err() {
            debug!("Load of {:?} finished after its handle was dropped", self.path);
        }
    }

    /// Deliver an import result, turning the error into an `AssetLoadFailure`
    pub fn complete_import(self, result: anyhow::Result<Model>) {
        let path = self.path.clone();
        self.complete(result.map_err(|e| SceneError::AssetLoadFailure {
            path,
            message: format!("{:#}", e),
        }));
    }
}

/// Future-like result of a load: poll it each frame or await it
#[derive(Debug)]
pub struct LoadHandle {
    path: PathBuf,
    receiver: oneshot::Receiver<SceneResult<Model>>,
}

impl LoadHandle {
    /// Unfinished handle plus the sender that completes it
    pub fn channel(path: impl Into<PathBuf>) -> (LoadSender, LoadHandle) {
        let path = path.into();
        let (sender, receiver) = oneshot::channel();
        (
            LoadSender {
                path: path.clone(),
                sender,
            },
            LoadHandle { path, receiver },
        )
    }

    /// Handle that already holds `result`
    pub fn ready(path: impl Into<PathBuf>, result: SceneResult<Model>) -> Self {
        let (sender, handle) = Self::channel(path);
        sender.complete(result);
        handle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn abandoned(&self) -> SceneError {
        SceneError::AssetLoadFailure {
            path: self.path.clone(),
            message: "loader stopped without a result".to_string(),
        }
    }

    /// Non-blocking check.
    ///
    /// Yields `Ready` or `Failed` once; polling again after that reports the
    /// load as abandoned.
    pub fn poll(&mut self) -> LoadStatus {
        match self.receiver.try_recv() {
            Ok(None) => LoadStatus::Pending,
            Ok(Some(Ok(model))) => LoadStatus::Ready(model),
            Ok(Some(Err(e))) => LoadStatus::Failed(e),
            Err(oneshot::Canceled) => LoadStatus::Failed(self.abandoned()),
        }
    }
}

impl Future for LoadHandle {
    type Output = SceneResult<Model>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(self.abandoned())),
        }
    }
}

/// Imports glTF files on a background thread
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoader;

impl AssetLoader for GltfLoader {
    fn load(&self, path: &Path) -> LoadHandle {
        info!("Loading model {:?} in the background", path);

        let (sender, handle) = LoadHandle::channel(path);
        let owned = path.to_path_buf();

        let spawned = thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || sender.complete_import(Model::from_gltf(&owned)));

        match spawned {
            Ok(_) => handle,
            // The sender moved into the failed closure and was dropped with it
            Err(e) => LoadHandle::ready(
                path,
                Err(SceneError::AssetLoadFailure {
                    path: path.to_path_buf(),
                    message: format!("could not start loader thread: {}", e),
                }),
            ),
        }
    }
}

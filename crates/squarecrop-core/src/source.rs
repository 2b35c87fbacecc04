//! Picking a photo from the camera or the photo library.
//!
//! The platform picker lives in the host application. This module defines
//! the request it receives and the future the crop flow awaits, plus the
//! display orientation the host must hold while the picker is up.

use std::future::Future;

use futures::channel::{mpsc, oneshot};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::decode::SourceImage;

/// Where the photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceKind {
    /// Take a new photo with the capture device
    Camera,
    /// Pick an existing photo
    #[default]
    Library,
}

/// Display orientation the presentation layer should allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrientationLock {
    #[default]
    Free,
    Portrait,
}

/// What the host needs to present a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerOptions {
    pub kind: SourceKind,
    pub orientation: OrientationLock,
}

/// Something that can present a picker and yield zero or one photo.
///
/// The future resolves to `None` when the user cancels.
pub trait ImageProvider {
    fn pick(&mut self, options: PickerOptions) -> impl Future<Output = Option<SourceImage>>;
}

/// Runs pickers and tracks the orientation lock around them.
#[derive(Debug, Default)]
pub struct SourceSelector {
    orientation: OrientationLock,
}

impl SourceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orientation the presentation layer should currently allow.
    pub fn orientation(&self) -> OrientationLock {
        self.orientation
    }

    /// Pin the display to portrait, await a photo from `provider`, then
    /// release the lock.
    ///
    /// The lock is also released if the returned future is dropped early.
    pub async fn select<P: ImageProvider>(
        &mut self,
        provider: &mut P,
        kind: SourceKind,
    ) -> Option<SourceImage> {
        let lock = PortraitLock::engage(&mut self.orientation);
        let options = PickerOptions {
            kind,
            orientation: OrientationLock::Portrait,
        };

        let picked = provider.pick(options).await;
        drop(lock);

        match &picked {
            Some(source) => debug!(
                "{:?} returned {}x{} photo",
                kind, source.image.width, source.image.height
            ),
            None => debug!("{:?} pick cancelled", kind),
        }
        picked
    }
}

/// Holds the orientation at `Portrait` until dropped.
struct PortraitLock<'a> {
    orientation: &'a mut OrientationLock,
}

impl<'a> PortraitLock<'a> {
    fn engage(orientation: &'a mut OrientationLock) -> Self {
        *orientation = OrientationLock::Portrait;
        Self { orientation }
    }
}

impl Drop for PortraitLock<'_> {
    fn drop(&mut self) {
        *self.orientation = OrientationLock::Free;
    }
}

/// A pending pick, handed to the host.
///
/// Dropping it without answering counts as a cancel.
#[derive(Debug)]
pub struct PickRequest {
    options: PickerOptions,
    reply: oneshot::Sender<Option<SourceImage>>,
}

impl PickRequest {
    pub fn options(&self) -> PickerOptions {
        self.options
    }

    pub fn respond(self, image: SourceImage) {
        // The waiting side may already be gone; nothing to do then.
        let _ = self.reply.send(Some(image));
    }

    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

/// [`ImageProvider`] that forwards each pick to the host over a channel.
#[derive(Debug, Clone)]
pub struct ChannelProvider {
    requests: mpsc::UnboundedSender<PickRequest>,
}

impl ChannelProvider {
    /// Provider plus the stream of requests the host must answer.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PickRequest>) {
        let (requests, receiver) = mpsc::unbounded();
        (Self { requests }, receiver)
    }
}

impl ImageProvider for ChannelProvider {
    fn pick(&mut self, options: PickerOptions) -> impl Future<Output = Option<SourceImage>> {
        let (reply, response) = oneshot::channel();
        let sent = self
            .requests
            .unbounded_send(PickRequest { options, reply })
            .is_ok();

        async move {
            if !sent {
                return None;
            }
            response.await.ok().flatten()
        }
    }
}

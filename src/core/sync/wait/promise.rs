/*!
 * Promise / Future Pair
 *
 * Single-assignment completion handle built on `tokio::sync::oneshot`.
 * The promise side is resolved exactly once, either with a value or as
 * canceled. The future side is awaited (or blocked on) by the waiter.
 */

use crate::core::errors::{PromiseError, PromiseResult, WaitError, WaitResult};
use crate::core::id::{SourceLease, WaiterId};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot::{self, error::TryRecvError};

enum Resolution<T> {
    Completed(T),
    Canceled,
}

impl<T> Resolution<T> {
    #[inline]
    fn into_result(self) -> WaitResult<T> {
        match self {
            Resolution::Completed(value) => Ok(value),
            Resolution::Canceled => Err(WaitError::Cancelled),
        }
    }
}

/// Create a linked promise/future pair sharing `id`
pub fn promise<T>(id: WaiterId) -> (Promise<T>, WaitFuture<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        Promise {
            id,
            sender: Some(sender),
        },
        WaitFuture {
            id,
            receiver,
            _source: None,
        },
    )
}

/// Resolving side of a waiter
///
/// Dropping an unresolved promise resolves its future as cancelled.
pub struct Promise<T> {
    id: WaiterId,
    sender: Option<oneshot::Sender<Resolution<T>>>,
}

impl<T> Promise<T> {
    #[inline]
    pub fn id(&self) -> WaiterId {
        self.id
    }

    /// Resolve the future with `value`
    ///
    /// # Errors
    ///
    /// - `AlreadyCompleted` if the promise was resolved before
    /// - `Detached` if the future was dropped (the promise still counts as resolved)
    pub fn complete(&mut self, value: T) -> PromiseResult<()> {
        self.resolve(Resolution::Completed(value))
    }

    /// Resolve the future as cancelled
    pub fn cancel(&mut self) -> PromiseResult<()> {
        self.resolve(Resolution::Canceled)
    }

    /// True once `complete` or `cancel` has been called
    pub fn is_resolved(&self) -> bool {
        self.sender.is_none()
    }

    /// True when nobody is waiting on the future any more
    pub fn is_detached(&self) -> bool {
        self.sender.as_ref().map_or(true, |sender| sender.is_closed())
    }

    fn resolve(&mut self, resolution: Resolution<T>) -> PromiseResult<()> {
        let sender = self.sender.take().ok_or(PromiseError::AlreadyCompleted)?;
        sender.send(resolution).map_err(|_| PromiseError::Detached)
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("id", &self.id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Waiting side of a waiter
///
/// Resolves to `Ok(value)` when completed and `Err(WaitError::Cancelled)`
/// when canceled or when the promise is dropped unresolved. Combinators from
/// `futures::FutureExt` attach continuations.
#[must_use = "a waiter does nothing unless awaited or polled"]
pub struct WaitFuture<T> {
    id: WaiterId,
    receiver: oneshot::Receiver<Resolution<T>>,
    _source: Option<SourceLease>,
}

impl<T> WaitFuture<T> {
    /// Identity used for targeted cancellation
    #[inline]
    pub fn id(&self) -> WaiterId {
        self.id
    }

    /// Pin the issuing allocator's source tag for the lifetime of this future
    pub(crate) fn retaining(mut self, lease: SourceLease) -> Self {
        self._source = Some(lease);
        self
    }

    /// Block the current thread until the waiter resolves
    ///
    /// # Panics
    ///
    /// Panics when called from inside an async runtime; `.await` instead.
    pub fn blocking_wait(self) -> WaitResult<T> {
        match self.receiver.blocking_recv() {
            Ok(resolution) => resolution.into_result(),
            Err(_) => Err(WaitError::Cancelled),
        }
    }

    /// Non-blocking check; `None` while still pending
    ///
    /// Once this has returned `Some(Ok(_))` the value is consumed and later
    /// calls report `Cancelled`.
    pub fn try_result(&mut self) -> Option<WaitResult<T>> {
        match self.receiver.try_recv() {
            Ok(resolution) => Some(resolution.into_result()),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(WaitError::Cancelled)),
        }
    }
}

impl<T> Future for WaitFuture<T> {
    type Output = WaitResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.receiver).poll(cx).map(|received| match received {
            Ok(resolution) => resolution.into_result(),
            Err(_) => Err(WaitError::Cancelled),
        })
    }
}

impl<T> fmt::Debug for WaitFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitFuture").field("id", &self.id).finish()
    }
}

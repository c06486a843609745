//! Future returned by the non-blocking entry points.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::error::JpegError;

/// Completion of a dispatched codec call.
///
/// Resolves once with the codec's result. A worker that panics or is torn
/// down with its runtime resolves to [`JpegError::Dispatch`]. Dropping the
/// future does not stop the codec; the call runs to completion and its
/// result is discarded.
#[derive(Debug)]
pub struct Pending<T> {
    handle: JoinHandle<Result<T, JpegError>>,
}

impl<T> Pending<T> {
    pub(crate) fn new(handle: JoinHandle<Result<T, JpegError>>) -> Self {
        Self { handle }
    }

    /// Whether the codec call has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, JpegError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => Poll::Ready(Err(JpegError::Dispatch(format!(
                "Codec worker did not complete: {}",
                e
            )))),
        }
    }
}

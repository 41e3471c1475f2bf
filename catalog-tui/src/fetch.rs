//! The one catalog fetch, run on its own task.
//!
//! The task owns a child [`CancellationToken`]. Cancelling it (explicitly or
//! by dropping the [`FetchHandle`]) aborts the request, and any outcome that
//! still arrives afterwards is discarded instead of reaching the screen.

use std::future::Future;

use catalog_lib::CatalogClient;
use catalog_lib::Error;
use log::debug;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::screen::{CatalogScreen, FetchResult};

pub struct FetchHandle {
    token: CancellationToken,
    receiver: Option<oneshot::Receiver<FetchResult>>,
    task: JoinHandle<()>,
}

impl FetchHandle {
    /// Fetches the catalog with `client`.
    pub fn spawn_catalog(client: CatalogClient, parent: &CancellationToken) -> Self {
        Self::spawn(parent, move |token| async move {
            client.fetch_products_with_cancel(&token).await
        })
    }

    /// Runs `fetch` on a new task with a child of `parent`.
    pub fn spawn<F, Fut>(parent: &CancellationToken, fetch: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = FetchResult> + Send + 'static,
    {
        let token = parent.child_token();
        let (tx, rx) = oneshot::channel();
        let future = fetch(token.clone());
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            let result = future.await;
            if task_token.is_cancelled() || matches!(result, Err(Error::Cancelled)) {
                debug!("Fetch finished after teardown, discarding outcome");
                return;
            }
            let _ = tx.send(result);
        });

        Self {
            token,
            receiver: Some(rx),
            task,
        }
    }

    /// Cancels the fetch. Safe to call more than once.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the outcome may still be applied.
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Waits for the outcome.
    ///
    /// Returns `None` if the task ended without sending one, or if the
    /// handle was cancelled meanwhile. Waits forever once the outcome has
    /// been taken, so it can sit in a `select!` branch.
    pub async fn recv(&mut self) -> Option<FetchResult> {
        let Some(receiver) = self.receiver.as_mut() else {
            return std::future::pending().await;
        };
        let received = receiver.await.ok();
        self.receiver = None;
        received.filter(|_| self.is_live())
    }

    /// Applies `result` to `screen` if this handle is still live.
    pub fn deliver(&self, screen: &mut CatalogScreen, result: FetchResult) -> bool {
        if !self.is_live() {
            debug!("Screen torn down, dropping fetch outcome");
            return false;
        }
        screen.apply_fetch(result)
    }

    /// Whether the fetch task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use catalog_lib::{Product, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Product {}", id),
            price: Decimal::new(1, 0),
            description: String::new(),
            category: "misc".to_string(),
            image: String::new(),
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_outcome_reaches_screen() {
        let root = CancellationToken::new();
        let mut handle = FetchHandle::spawn(&root, |_| async { Ok(vec![product(1), product(2)]) });
        let mut screen = CatalogScreen::new();

        let result = handle.recv().await.unwrap();
        assert!(handle.deliver(&mut screen, result));

        assert!(!screen.is_loading());
        assert_eq!(screen.products().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_discards_outcome() {
        let root = CancellationToken::new();
        let mut handle = FetchHandle::spawn(&root, |token| async move {
            token.cancelled().await;
            Err(Error::Cancelled)
        });

        handle.cancel();
        assert!(!handle.is_live());
        assert!(handle.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_late_outcome_after_teardown_is_dropped() {
        let root = CancellationToken::new();
        // Ignores the token, the way a callback without a liveness check would.
        let mut handle = FetchHandle::spawn(&root, |_| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(vec![product(1)])
        });

        root.cancel();
        assert!(handle.recv().await.is_none());

        let mut screen = CatalogScreen::new();
        assert!(!handle.deliver(&mut screen, Ok(vec![product(9)])));
        assert!(screen.is_loading());
    }

    #[tokio::test]
    async fn test_drop_cancels_token() {
        let root = CancellationToken::new();
        let (seen_tx, seen_rx) = oneshot::channel();
        let handle = FetchHandle::spawn(&root, |token| async move {
            token.cancelled().await;
            let _ = seen_tx.send(());
            Err(Error::Cancelled)
        });

        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), seen_rx)
            .await
            .unwrap()
            .unwrap();
        assert!(!root.is_cancelled());
    }
}

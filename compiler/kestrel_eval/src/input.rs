//! Line input behind the `readline` native.
//!
//! Hosts implement [`InputProvider`]; [`LineQueue`] is the stock provider,
//! fed from anywhere through a [`LineSender`].

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Source of input lines.
pub trait InputProvider {
    /// Wait for the next line. `None` means input is exhausted.
    fn read_line<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + 'a>>;
}

pub type SharedInputProvider = Rc<dyn InputProvider>;

/// Input provider backed by an unbounded channel.
pub struct LineQueue {
    receiver: tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>,
    prompts: Mutex<Vec<String>>,
}

/// Feeding end of a [`LineQueue`]. Dropping every sender ends the input.
#[derive(Clone, Debug)]
pub struct LineSender(mpsc::UnboundedSender<String>);

impl LineSender {
    /// Queue a line. Returns `false` if the queue has been dropped.
    pub fn send(&self, line: impl Into<String>) -> bool {
        self.0.send(line.into()).is_ok()
    }
}

impl LineQueue {
    pub fn channel() -> (LineQueue, LineSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let queue = LineQueue {
            receiver: tokio::sync::Mutex::new(rx),
            prompts: Mutex::new(Vec::new()),
        };
        (queue, LineSender(tx))
    }

    /// Queue pre-filled with `lines`; reads past the end return `None`.
    pub fn from_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> LineQueue {
        let (queue, sender) = Self::channel();
        for line in lines {
            sender.send(line);
        }
        queue
    }

    /// Prompts passed to `read_line` so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl InputProvider for LineQueue {
    fn read_line<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Option<String>> + 'a>> {
        Box::pin(async move {
            self.prompts.lock().push(prompt.to_owned());
            self.receiver.lock().await.recv().await
        })
    }
}

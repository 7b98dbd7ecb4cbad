use std::sync::mpsc;

/// Producer/consumer queue between input threads and the run loop.
///
/// Input threads own [`CommandSender`]s; the loop drains everything queued
/// so far once per frame, in arrival order.
#[derive(Debug)]
pub struct CommandQueue<C> {
    tx: mpsc::Sender<C>,
    rx: mpsc::Receiver<C>,
}

impl<C> CommandQueue<C> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender<C> {
        CommandSender(self.tx.clone())
    }

    /// Commands queued so far. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = C> + '_ {
        self.rx.try_iter()
    }
}

impl<C> Default for CommandQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle for pushing commands into a [`CommandQueue`].
#[derive(Debug)]
pub struct CommandSender<C>(mpsc::Sender<C>);

impl<C> CommandSender<C> {
    /// Queues `cmd`. Returns `false` once the queue has been dropped.
    pub fn send(&self, cmd: C) -> bool {
        self.0.send(cmd).is_ok()
    }
}

impl<C> Clone for CommandSender<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

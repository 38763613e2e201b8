// eepcheck/src/transport/mock.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// One scripted read result.
#[derive(Debug, Clone)]
pub enum MockRead {
    Byte(u8),
    Timeout,
    Error(std::io::ErrorKind),
}

/// Mock transport for unit tests. It records sent frames and replays a
/// scripted byte stream; an exhausted script reads as `Timeout`.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub incoming: VecDeque<MockRead>,
    /// Number of `reset` calls (one per reconnect)
    pub resets: usize,
    /// Testing hook: number of subsequent sends that should fail
    pub send_failures: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes, e.g. a complete encoded frame.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.incoming
            .extend(bytes.iter().copied().map(MockRead::Byte));
    }

    /// Queue one per-byte timeout.
    pub fn push_timeout(&mut self) {
        self.incoming.push_back(MockRead::Timeout);
    }

    /// Queue a hard read error.
    pub fn push_error(&mut self, kind: std::io::ErrorKind) {
        self.incoming.push_back(MockRead::Error(kind));
    }

    /// Set how many subsequent sends should fail (for tests).
    pub fn set_send_failures(&mut self, n: usize) {
        self.send_failures = n;
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// Wrap in a shared handle so a test can keep inspecting the mock after
    /// handing it over as `Box<dyn Transport>`.
    pub fn shared(self) -> SharedMock {
        Rc::new(RefCell::new(self))
    }
}

pub type SharedMock = Rc<RefCell<MockTransport>>;

impl Transport for SharedMock {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.borrow_mut().send(data)
    }

    fn read_byte(&mut self, timeout_ms: u64) -> Result<u8> {
        self.borrow_mut().read_byte(timeout_ms)
    }

    fn reset(&mut self) -> Result<()> {
        self.borrow_mut().reset()
    }

    fn describe(&self) -> String {
        self.borrow().describe()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        if self.send_failures > 0 {
            self.send_failures -= 1;
            return Err(Error::Io(std::io::Error::from(
                std::io::ErrorKind::BrokenPipe,
            )));
        }
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn read_byte(&mut self, _timeout_ms: u64) -> Result<u8> {
        match self.incoming.pop_front() {
            Some(MockRead::Byte(b)) => Ok(b),
            Some(MockRead::Timeout) | None => Err(Error::Timeout),
            Some(MockRead::Error(kind)) => Err(Error::Io(std::io::Error::from(kind))),
        }
    }

    fn reset(&mut self) -> Result<()> {
        // Queued bytes survive a reconnect so tests can pre-seed replies.
        self.resets += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

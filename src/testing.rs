//! Fakes for the peripherals the recorder talks to.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_hal::digital;
use embedded_hal::i2c::{self, ErrorKind, Operation};

use crate::buttons::{ButtonEdges, ButtonInput};
use crate::display::StatusDisplay;
use crate::storage::Storage;

/// accel = (100, 200, 600), raw temperature = 6700, gyro = (10, 20, 30)
pub const REFERENCE_BYTES: [u8; 14] = [
    0x00, 0x64, 0x00, 0xC8, 0x02, 0x58, 0x1A, 0x2C, 0x00, 0x0A, 0x00, 0x14, 0x00, 0x1E,
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    Write(u8, Vec<u8>),
    /// Address, bytes written, number of bytes read.
    WriteRead(u8, Vec<u8>, usize),
    Other(u8),
}

/// I2C bus that records every transaction and answers reads from a
/// queue of canned responses (the last one repeats).
#[derive(Debug, Default)]
pub struct FakeBus {
    transfers: Vec<Transfer>,
    responses: VecDeque<Vec<u8>>,
    fail_next: Option<ErrorKind>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&mut self, bytes: [u8; 14]) {
        self.responses.push_back(bytes.to_vec());
    }

    pub fn fail_next(&mut self, kind: ErrorKind) {
        self.fail_next = Some(kind);
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    fn next_response(&mut self) -> Vec<u8> {
        if self.responses.len() > 1 {
            self.responses.pop_front().unwrap_or_default()
        } else {
            self.responses.front().cloned().unwrap_or_default()
        }
    }

    fn apply(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        let transfer = match &*operations {
            [Operation::Write(bytes)] => Transfer::Write(address, bytes.to_vec()),
            [Operation::Write(bytes), Operation::Read(buf)] => {
                Transfer::WriteRead(address, bytes.to_vec(), buf.len())
            }
            _ => Transfer::Other(address),
        };
        self.transfers.push(transfer);

        if let Some(kind) = self.fail_next.take() {
            return Err(kind);
        }
        for op in operations.iter_mut() {
            if let Operation::Read(buf) = op {
                let response = self.next_response();
                for (i, byte) in buf.iter_mut().enumerate() {
                    *byte = response.get(i).copied().unwrap_or(0);
                }
            }
        }
        Ok(())
    }
}

impl i2c::ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl i2c::I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.apply(address, operations)
    }
}

impl embedded_hal_async::i2c::I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.apply(address, operations)
    }
}

/// GPIO input whose level and health can be changed after it was moved.
#[derive(Clone, Debug)]
pub struct FakePin {
    high: Rc<Cell<bool>>,
    broken: Rc<Cell<bool>>,
}

impl FakePin {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(Cell::new(high)),
            broken: Rc::new(Cell::new(false)),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.set(broken);
    }
}

impl digital::ErrorType for FakePin {
    type Error = digital::ErrorKind;
}

impl digital::InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.broken.get() {
            Err(digital::ErrorKind::Other)
        } else {
            Ok(self.high.get())
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Everything the recorder emitted, across all peripherals, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Display(String),
    Console(String),
    Create(String, String),
    Append(String, String),
}

#[derive(Clone, Debug, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn display_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Display(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn console_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Console(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn appended_rows(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Append(_, row) => Some(row),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeDisplay(pub Journal);

impl StatusDisplay for FakeDisplay {
    fn show_message(&mut self, text: &str) {
        self.0.push(Event::Display(text.to_string()));
    }
}

pub struct FakeConsole(pub Journal);

impl core::fmt::Write for FakeConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.push(Event::Console(s.to_string()));
        Ok(())
    }
}

/// Button panel fed one poll at a time; polls with nothing queued see no edges.
#[derive(Clone, Debug, Default)]
pub struct FakeButtons(Rc<RefCell<VecDeque<ButtonEdges>>>);

impl FakeButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, edges: ButtonEdges) {
        self.0.borrow_mut().push_back(edges);
    }
}

impl ButtonInput for FakeButtons {
    fn poll_edges(&mut self) -> ButtonEdges {
        self.0.borrow_mut().pop_front().unwrap_or(ButtonEdges::NONE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StorageFault;

#[derive(Debug, Default)]
struct MemStorageInner {
    files: BTreeMap<String, String>,
    unavailable: bool,
    failing_appends: usize,
    creates: usize,
    appends: usize,
}

/// In-memory file store. Clones share the same files, so a test can keep a
/// handle while the recorder owns another.
#[derive(Clone, Debug, Default)]
pub struct MemStorage {
    inner: Rc<RefCell<MemStorageInner>>,
    journal: Option<Journal>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            inner: Rc::default(),
            journal: Some(journal),
        }
    }

    pub fn insert(&self, name: &str, contents: &str) {
        self.inner
            .borrow_mut()
            .files
            .insert(name.to_string(), contents.to_string());
    }

    pub fn contents(&self, name: &str) -> Option<String> {
        self.inner.borrow().files.get(name).cloned()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.borrow_mut().unavailable = unavailable;
    }

    /// Make the next `n` appends fail.
    pub fn fail_appends(&self, n: usize) {
        self.inner.borrow_mut().failing_appends = n;
    }

    pub fn creates(&self) -> usize {
        self.inner.borrow().creates
    }

    /// Append attempts, failed ones included.
    pub fn appends(&self) -> usize {
        self.inner.borrow().appends
    }

    fn record(&self, event: Event) {
        if let Some(journal) = &self.journal {
            journal.push(event);
        }
    }
}

impl Storage for MemStorage {
    type Error = StorageFault;

    fn exists(&mut self, name: &str) -> Result<bool, Self::Error> {
        let inner = self.inner.borrow();
        if inner.unavailable {
            return Err(StorageFault);
        }
        Ok(inner.files.contains_key(name))
    }

    fn create(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error> {
        let text = String::from_utf8_lossy(contents).into_owned();
        {
            let mut inner = self.inner.borrow_mut();
            if inner.unavailable {
                return Err(StorageFault);
            }
            inner.creates += 1;
            inner.files.insert(name.to_string(), text.clone());
        }
        self.record(Event::Create(name.to_string(), text));
        Ok(())
    }

    fn append(&mut self, name: &str, contents: &[u8]) -> Result<(), Self::Error> {
        let text = String::from_utf8_lossy(contents).into_owned();
        {
            let mut inner = self.inner.borrow_mut();
            inner.appends += 1;
            if inner.unavailable || inner.failing_appends > 0 {
                inner.failing_appends = inner.failing_appends.saturating_sub(1);
                return Err(StorageFault);
            }
            match inner.files.get_mut(name) {
                Some(file) => file.push_str(&text),
                None => return Err(StorageFault),
            }
        }
        self.record(Event::Append(name.to_string(), text));
        Ok(())
    }
}

/// Clock that only records the requested delays.
#[derive(Clone, Debug, Default)]
pub struct FakeDelay(Rc<RefCell<Vec<u32>>>);

impl FakeDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }
}

impl embedded_hal::delay::DelayNs for FakeDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms);
    }
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms);
    }
}

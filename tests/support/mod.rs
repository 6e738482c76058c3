//! In-memory collaborators for driving scanning surfaces in tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use tokio::sync::oneshot;
use zbar_web::{
    ConfigType, Error, FeedSettings, HardwareDevice, Image, Result, Symbol, SymbolDecoder,
    VideoCapture,
};

/// One `set_config` call as seen by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCall {
    pub handle: u32,
    pub symbol_type: String,
    pub config_type: ConfigType,
    pub value: i32,
}

#[derive(Default)]
pub struct FakeDecoder {
    next_handle: Cell<u32>,
    pub calls: RefCell<Vec<ConfigCall>>,
    pub destroyed: RefCell<Vec<u32>>,
    pub symbols: RefCell<Vec<Symbol>>,
    pub decodes: Cell<usize>,
    pub fail_create: Cell<bool>,
    pub reject: Cell<Option<ConfigType>>,
    fail_config_after: Cell<Option<usize>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeDecoder {
    pub fn returning(symbols: Vec<Symbol>) -> Self {
        let decoder = Self::default();
        *decoder.symbols.borrow_mut() = symbols;
        decoder
    }

    /// Let `successes` more `set_config` calls through, then fail one.
    pub fn fail_config_after(&self, successes: usize) {
        self.fail_config_after.set(Some(successes));
    }

    /// Make the next decode wait until the returned sender fires.
    pub fn hold_next_decode(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    pub fn take_calls(&self) -> Vec<ConfigCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl SymbolDecoder for FakeDecoder {
    type Handle = u32;

    async fn create_scanner(&self) -> Result<u32> {
        if self.fail_create.get() {
            return Err(Error::DecoderCreation("wasm module unavailable".to_string()));
        }
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        Ok(handle)
    }

    async fn set_config(
        &self,
        scanner: &u32,
        symbol_type: &str,
        config_type: ConfigType,
        value: i32,
    ) -> Result<bool> {
        match self.fail_config_after.get() {
            Some(0) => {
                self.fail_config_after.set(None);
                return Err(Error::Decode("wasm trap".to_string()));
            }
            Some(n) => self.fail_config_after.set(Some(n - 1)),
            None => {}
        }
        self.calls.borrow_mut().push(ConfigCall {
            handle: *scanner,
            symbol_type: symbol_type.to_string(),
            config_type,
            value,
        });
        Ok(self.reject.get() != Some(config_type))
    }

    async fn decode(&self, _scanner: &u32, _image: &Image) -> Result<Vec<Symbol>> {
        self.decodes.set(self.decodes.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        Ok(self.symbols.borrow().clone())
    }

    async fn destroy(&self, scanner: u32) -> Result<()> {
        self.destroyed.borrow_mut().push(scanner);
        Ok(())
    }
}

pub struct FakeCapture {
    pub devices: Vec<HardwareDevice>,
    pub started: RefCell<Vec<FeedSettings>>,
    pub stopped: Cell<usize>,
    pub intervals: RefCell<Vec<u32>>,
    pub captures: Cell<usize>,
    pub deny: Cell<bool>,
}

impl Default for FakeCapture {
    fn default() -> Self {
        FakeCapture {
            devices: vec![
                HardwareDevice {
                    id: "cam-1".to_string(),
                    name: "Front Camera".to_string(),
                },
                HardwareDevice {
                    id: "cam-2".to_string(),
                    name: "Back Camera".to_string(),
                },
            ],
            started: RefCell::new(Vec::new()),
            stopped: Cell::new(0),
            intervals: RefCell::new(Vec::new()),
            captures: Cell::new(0),
            deny: Cell::new(false),
        }
    }
}

impl VideoCapture for FakeCapture {
    async fn available_devices(&self) -> Result<Vec<HardwareDevice>> {
        if self.deny.get() {
            return Err(Error::PermissionDenied);
        }
        Ok(self.devices.clone())
    }

    async fn start_feed(&self, settings: &FeedSettings) -> Result<()> {
        if self.deny.get() {
            return Err(Error::PermissionDenied);
        }
        self.started.borrow_mut().push(settings.clone());
        Ok(())
    }

    async fn stop_feed(&self) -> Result<()> {
        self.stopped.set(self.stopped.get() + 1);
        Ok(())
    }

    async fn capture_frame(&self) -> Result<Image> {
        self.captures.set(self.captures.get() + 1);
        blank_frame()
    }

    async fn set_interval(&self, interval_ms: u32) -> Result<()> {
        self.intervals.borrow_mut().push(interval_ms);
        Ok(())
    }
}

pub fn blank_frame() -> Result<Image> {
    Image::from_gray(vec![255u8; 16 * 8], 16, 8)
}

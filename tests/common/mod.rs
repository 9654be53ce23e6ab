// SPDX-License-Identifier: MPL-2.0

//! Mock backends shared by the integration tests

#![allow(dead_code)]

use hwaccel::backends::{BackendError, BackendResult, Capability, ContextState, HwAccelBackend};
use hwaccel::{BackendRegistry, CodecParams, Config, HwAccels, PixelFormat};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FULL: &[Capability] = &Capability::ALL;
pub const DECODE_ONLY: &[Capability] = &[Capability::SetupDecode, Capability::CloseDecode];
pub const NO_SHUTDOWN: &[Capability] = &[
    Capability::SetupDecode,
    Capability::CloseDecode,
    Capability::SetupEncode,
    Capability::CloseEncode,
    Capability::ScaleFilter,
    Capability::DeintFilter,
];

/// Call counters, shared between a test and its mock
#[derive(Debug, Default)]
pub struct Counters {
    pub setup_decode: AtomicUsize,
    pub close_decode: AtomicUsize,
    pub setup_encode: AtomicUsize,
    pub close_encode: AtomicUsize,
    pub shutdown: AtomicUsize,
}

impl Counters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// State a mock hands out on setup
#[derive(Debug)]
pub struct MockState {
    pub format: PixelFormat,
}

pub struct MockBackend {
    pub name: &'static str,
    pub format: PixelFormat,
    pub caps: &'static [Capability],
    pub fail_setup: bool,
    pub fail_shutdown: bool,
    pub fail_close: bool,
    pub fail_filters: bool,
    pub filter_len: Option<usize>,
    pub counters: Arc<Counters>,
}

impl MockBackend {
    pub fn new(name: &'static str, format: PixelFormat) -> Self {
        Self {
            name,
            format,
            caps: FULL,
            fail_setup: false,
            fail_shutdown: false,
            fail_close: false,
            fail_filters: false,
            filter_len: None,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn caps(mut self, caps: &'static [Capability]) -> Self {
        self.caps = caps;
        self
    }

    pub fn failing_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }

    pub fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn failing_filters(mut self) -> Self {
        self.fail_filters = true;
        self
    }

    pub fn filter_len(mut self, len: usize) -> Self {
        self.filter_len = Some(len);
        self
    }

    fn setup(&self) -> BackendResult<ContextState> {
        if self.fail_setup {
            return Err(BackendError::DeviceUnavailable(format!("{} offline", self.name)));
        }
        Ok(Box::new(MockState {
            format: self.format,
        }))
    }

    fn release(&self, state: &ContextState) -> BackendResult<()> {
        self.check(state)?;
        if self.fail_close {
            return Err(BackendError::Other(format!("{} failed to release", self.name)));
        }
        Ok(())
    }

    fn filter_check(&self, state: &ContextState) -> BackendResult<()> {
        self.check(state)?;
        if self.fail_filters {
            return Err(BackendError::Other(format!("{} filter graph unavailable", self.name)));
        }
        Ok(())
    }

    fn check(&self, state: &ContextState) -> BackendResult<()> {
        match state.downcast_ref::<MockState>() {
            Some(s) if s.format == self.format => Ok(()),
            _ => Err(BackendError::InvalidContext),
        }
    }
}

impl HwAccelBackend for MockBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    fn capabilities(&self) -> &'static [Capability] {
        self.caps
    }

    fn setup_decode(&self, _params: &CodecParams) -> BackendResult<ContextState> {
        self.counters.setup_decode.fetch_add(1, Ordering::SeqCst);
        self.setup()
    }

    fn close_decode(&self, state: ContextState) -> BackendResult<()> {
        self.counters.close_decode.fetch_add(1, Ordering::SeqCst);
        self.release(&state)
    }

    fn setup_encode(&self, _params: &CodecParams) -> BackendResult<ContextState> {
        self.counters.setup_encode.fetch_add(1, Ordering::SeqCst);
        self.setup()
    }

    fn close_encode(&self, state: ContextState) -> BackendResult<()> {
        self.counters.close_encode.fetch_add(1, Ordering::SeqCst);
        self.release(&state)
    }

    fn scale_filter(
        &self,
        state: &ContextState,
        _input: &CodecParams,
        output: &CodecParams,
    ) -> BackendResult<String> {
        self.filter_check(state)?;
        if let Some(len) = self.filter_len {
            return Ok("s".repeat(len));
        }
        Ok(format!("scale_{}=w={}:h={}", self.name, output.width, output.height))
    }

    fn deint_filter(&self, state: &ContextState, _params: &CodecParams) -> BackendResult<String> {
        self.filter_check(state)?;
        if let Some(len) = self.filter_len {
            return Ok("d".repeat(len));
        }
        Ok(format!("deinterlace_{}", self.name))
    }

    fn shutdown(&self) -> BackendResult<()> {
        self.counters.shutdown.fetch_add(1, Ordering::SeqCst);
        if self.fail_shutdown {
            Err(BackendError::Other(format!("{} refused to shut down", self.name)))
        } else {
            Ok(())
        }
    }
}

/// Build an isolated instance around the given mocks
pub fn hwaccels_with(backends: Vec<MockBackend>) -> HwAccels {
    hwaccels_with_config(&Config::default(), backends)
}

pub fn hwaccels_with_config(config: &Config, backends: Vec<MockBackend>) -> HwAccels {
    let registry = BackendRegistry::builder()
        .register_all(
            backends
                .into_iter()
                .map(|b| Arc::new(b) as Arc<dyn HwAccelBackend>),
        )
        .expect("mock registration")
        .build();
    HwAccels::with_registry(config, registry)
}

/// A decoder record natively supporting the given hardware formats
pub fn decoder(formats: &[PixelFormat]) -> CodecParams {
    CodecParams::new("h264")
        .with_size(1920, 1080)
        .with_hw_formats(formats.iter().copied())
}

// SPDX-License-Identifier: MPL-2.0

//! Integration test for the process-wide instance
//!
//! Kept to a single test: the instance can only be initialized once per
//! process, and each file under `tests/` runs as its own process.

use hwaccel::hwaccel::global;
use hwaccel::{CodecParams, Config, EncodeSetup, HwAccelError, PixelFormat};

#[test]
fn test_global_lifecycle() {
    let mut params = CodecParams::new("h264")
        .with_size(1920, 1080)
        .with_hw_formats([PixelFormat::Vaapi]);

    // Before init everything behaves as software-only
    assert!(global::instance().is_none());
    assert_eq!(
        global::select_decode_format(&mut params, &[PixelFormat::Vaapi]),
        PixelFormat::None
    );
    assert_eq!(
        global::setup_encode_context(&mut params),
        Ok(EncodeSetup::Software)
    );
    assert_eq!(global::get_deint_filter(&params), Err(HwAccelError::NoContext));
    global::close_decode_context(&mut params);
    global::close_encode_context(&mut params);
    assert!(global::module_done().is_clean());

    let config = Config {
        enabled: false,
        ..Config::default()
    };
    let hw = global::module_init(&config).unwrap();
    assert!(hw.registry().is_empty());
    assert!(global::instance().is_some());

    assert_eq!(
        global::module_init(&Config::default()).err(),
        Some(HwAccelError::AlreadyInitialized)
    );

    let report = global::module_done();
    assert!(report.is_clean());
    assert!(hw.is_shut_down());
}

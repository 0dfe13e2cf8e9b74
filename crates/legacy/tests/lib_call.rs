#![allow(deprecated)]

mod common;

use std::cell::Cell;
use std::sync::{Arc, Mutex};

use common::{capture_warnings, EchoEntry};
use direct::{DirectError, XmlServiceEntry};
use legacy::{ILibCall, LegacyError, LibCallOptions};
use transport::RawXml;

type Seen = Arc<Mutex<Vec<(String, String, String)>>>;

fn echo(seen: &Seen) -> impl FnOnce() -> Box<dyn XmlServiceEntry> {
    let seen = Arc::clone(seen);
    move || Box::new(EchoEntry { seen }) as Box<dyn XmlServiceEntry>
}

#[test]
fn test_construction_logs_deprecation() {
    let seen = Seen::default();

    let (result, logged) = capture_warnings(|| ILibCall::new(echo(&seen), LibCallOptions::default()));

    assert!(result.is_ok());
    assert!(logged.contains("ILibCall is deprecated, use direct::DirectTransport instead"));
}

#[test]
fn test_omitted_options_take_defaults() {
    let seen = Seen::default();

    let call = ILibCall::new(echo(&seen), LibCallOptions::default()).unwrap();

    assert_eq!(call.transport().ctl(), "*here *cdata");
    assert_eq!(call.transport().ipc(), "*na");
}

#[test]
fn test_explicit_options_are_forwarded() {
    let seen = Seen::default();
    let options = LibCallOptions {
        ctl: Some("*sbmjob".to_string()),
        ipc: Some("/tmp/myunique".to_string()),
        ..LibCallOptions::default()
    };

    let mut call = ILibCall::new(echo(&seen), options).unwrap();
    call.call(&RawXml::new("<in/>")).unwrap();

    assert_eq!(
        seen.lock().unwrap()[0],
        (
            "<in/>".to_string(),
            "*sbmjob".to_string(),
            "/tmp/myunique".to_string()
        )
    );
}

#[test]
fn test_invalid_iccsid_fails_before_entry_is_created() {
    let created = Cell::new(false);
    let options = LibCallOptions {
        iccsid: 37,
        ..LibCallOptions::default()
    };

    let err = ILibCall::new(
        || {
            created.set(true);
            Box::new(EchoEntry {
                seen: Seen::default(),
            }) as Box<dyn XmlServiceEntry>
        },
        options,
    )
    .unwrap_err();

    match err {
        LegacyError::InvalidParameter { parameter, reason } => {
            assert_eq!(parameter, "iccsid");
            assert_eq!(reason, "iccsid must be 0 (job ccsid)");
        }
        other => panic!("expected invalid parameter, got {other:?}"),
    }
    assert!(!created.get());
}

#[test]
fn test_invalid_pccsid_fails_before_entry_is_created() {
    let created = Cell::new(false);
    let options = LibCallOptions {
        pccsid: 819,
        ..LibCallOptions::default()
    };

    let err = ILibCall::new(
        || {
            created.set(true);
            Box::new(EchoEntry {
                seen: Seen::default(),
            }) as Box<dyn XmlServiceEntry>
        },
        options,
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid parameter 'pccsid': pccsid must be 1208 (UTF-8)"
    );
    assert!(!created.get());
}

#[test]
fn test_end_to_end_call_then_close() {
    let seen = Seen::default();
    let mut call = ILibCall::new(echo(&seen), LibCallOptions::default()).unwrap();

    let xml = call.call(&RawXml::new("<cmd>DSPLIBL</cmd>")).unwrap();
    assert_eq!(xml, "<echo><cmd>DSPLIBL</cmd></echo>");

    call.close().unwrap();
    assert!(matches!(
        call.call(&RawXml::new("<cmd>DSPLIBL</cmd>")),
        Err(DirectError::Closed(_))
    ));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_into_transport_keeps_state() {
    let seen = Seen::default();
    let call = ILibCall::new(echo(&seen), LibCallOptions::default()).unwrap();

    let mut transport = call.into_transport();

    assert!(transport.is_open());
    assert_eq!(
        transport.call(&RawXml::new("<x/>")).unwrap(),
        "<echo><x/></echo>"
    );
}

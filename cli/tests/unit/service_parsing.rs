//! Mapping of real `launchctl print` service dumps into `ServiceInfo`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet};

use launchkit::domain::service::{
    DaemonInfo, Environment, ExitReason, LoginItemInfo, ServiceKind, parse_service_info,
};

use crate::mocks::fixture;

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

#[test]
fn test_daemon_dump() {
    let info = parse_service_info(&fixture("akd_daemon.txt")).expect("daemon dump maps");
    let akd = "/System/Library/PrivateFrameworks/AuthKit.framework/Versions/A/Support/akd";

    assert_eq!(info.pid, Some(928));
    assert_eq!(
        info.kind,
        ServiceKind::Daemon(DaemonInfo {
            plist_path: "/System/Library/LaunchDaemons/com.apple.akd.plist".to_string(),
            program: akd.to_string(),
            arguments: Some(vec![akd.to_string()]),
            bundle_id: None,
        })
    );
    assert_eq!(
        info.endpoints,
        Some(set(&["com.apple.ak.auth.xpc", "com.apple.ak.anisette.xpc"]))
    );
    assert_eq!(
        info.environment,
        Environment {
            generic: Some(map(&[
                ("MallocSpaceEfficient", "1"),
                ("XPC_SERVICE_NAME", "com.apple.akd"),
            ])),
            default: Some(map(&[("PATH", "/usr/bin:/bin:/usr/sbin:/sbin")])),
            inherited: None,
        }
    );
    assert_eq!(info.last_exit_reason, None);
}

#[test]
fn test_login_item_dump() {
    let info = parse_service_info(&fixture("login_item.txt")).expect("login item dump maps");

    assert_eq!(info.pid, None);
    assert_eq!(
        info.login_item(),
        Some(&LoginItemInfo {
            identifier: "com.vendor.helper".to_string(),
            parent_identifier: "com.vendor.vendor".to_string(),
        })
    );
    assert!(info.daemon().is_none());
    assert_eq!(info.endpoints, Some(set(&["com.vendor.helper"])));
    assert_eq!(
        info.environment,
        Environment {
            generic: Some(map(&[("XPC_SERVICE_NAME", "com.vendor.helper")])),
            default: Some(map(&[("PATH", "/usr/bin:/bin:/usr/sbin:/sbin")])),
            inherited: Some(map(&[(
                "SSH_AUTH_SOCK",
                "/private/tmp/com.apple.launchd.jAKz5dz9eY/Listeners"
            )])),
        }
    );
    assert_eq!(info.last_exit_reason, Some(ExitReason::ExitCode(0)));
}

#[test]
fn test_signal_wins_over_exit_code() {
    let dump = fixture("akd_daemon.txt").replace(
        "last exit code = (never exited)",
        "last exit code = 0\n    last terminating signal = Killed: 9",
    );
    let info = parse_service_info(&dump).unwrap();
    assert_eq!(info.last_exit_reason, Some(ExitReason::Signal(9)));
}

#[test]
fn test_service_info_serializes_kind_tag() {
    let info = parse_service_info(&fixture("login_item.txt")).unwrap();
    let value = serde_json::to_value(&info).expect("serializes");
    assert_eq!(
        value["kind"]["login_item"]["identifier"],
        "com.vendor.helper"
    );
    assert_eq!(value["last_exit_reason"]["exit_code"], 0);
}

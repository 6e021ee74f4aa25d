//! CLI integration tests for lla-recipe.
//!
//! These tests run the binary end to end, from flags and config files
//! through to the rendered output.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the lla-recipe binary command, isolated from the user's config.
fn lla_recipe(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lla-recipe").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("LLA_RECIPE_SCHEMA")
        .current_dir(home.path());
    cmd
}

/// Create a temporary directory used as both home and working directory.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const LINUX: [&str; 6] = ["--os", "linux", "--arch", "x86_64", "--compiler", "gcc"];

// ============================================================================
// lla-recipe resolve
// ============================================================================

#[test]
fn test_resolve_text() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .arg("resolve")
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::contains("schema:      3.4.0"))
        .stdout(predicate::str::contains("boost/1.83.0"))
        .stdout(predicate::str::contains("LIBLOGICALACCESS_WINDOWS_VERSION = 3,4,0,0"))
        .stdout(predicate::str::contains("pcscreaders"));
}

#[test]
fn test_resolve_json() {
    let tmp = temp_dir();

    let output = lla_recipe(&tmp)
        .args(["resolve", "--format", "json"])
        .args(LINUX)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["schema"], "3.4.0");
    assert_eq!(json["definitions"]["TARGET_ARCH"], "x86_64");
    assert_eq!(json["definitions"]["LLA_BUILD_PKCS"], true);
    assert_eq!(json["fingerprint"].as_str().unwrap().len(), 64);
    assert!(json["manifest"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a == "llacommon"));
}

#[test]
fn test_resolve_is_deterministic() {
    let tmp = temp_dir();

    let run = || {
        lla_recipe(&tmp)
            .args(["resolve", "--format", "json", "-o", "LLA_BUILD_LIBUSB=true"])
            .args(LINUX)
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_unknown_toggle_fails() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["resolve", "-o", "LLA_BUILD_TELEPORT=true"])
        .args(LINUX)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown toggle `LLA_BUILD_TELEPORT`"));
}

#[test]
fn test_invalid_os_fails() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["resolve", "--os", "beos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("beos"));
}

#[test]
fn test_malformed_package_version_fails() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["defines", "--package-version", "3.4"])
        .args(LINUX)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed version string `3.4`"));
}

// ============================================================================
// lla-recipe deps / defines / manifest
// ============================================================================

#[test]
fn test_deps_follow_toggles() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["deps", "-o", "LLA_BUILD_LIBUSB=true", "-o", "LLA_BUILD_PKCS=false"])
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::contains("libusb/1.0.26"))
        .stdout(predicate::str::contains("cppkcs11").not());
}

#[test]
fn test_deps_profile_lines_on_windows() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["deps", "--profile", "--os", "windows", "--arch", "x86_64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("boost/*:shared=False"))
        .stdout(predicate::str::contains("openssl/*:no_asm=True"));
}

#[test]
fn test_dep_option_override() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["deps", "--profile", "--os", "windows", "--dep-option", "boost:shared=True"])
        .assert()
        .success()
        .stdout(predicate::str::contains("boost/*:shared=True"));
}

#[test]
fn test_defines_cmake_args() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["defines", "--cmake-args", "-o", "LLA_BUILD_PKCS=false"])
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::contains("-DLLA_BUILD_PKCS=OFF"))
        .stdout(predicate::str::contains("-DTARGET_ARCH=x86_64"));
}

#[test]
fn test_defines_android() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["defines", "--os", "android", "--arch", "armv8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LLA_BOOST_ASIO_HAS_STD_STRING_VIEW=1"))
        .stdout(predicate::str::contains("CONAN_LIBCXX="));
}

#[test]
fn test_defines_json_entries() {
    let tmp = temp_dir();

    let output = lla_recipe(&tmp)
        .args(["defines", "--format", "json"])
        .args(LINUX)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json.as_array().unwrap();
    let arch = entries
        .iter()
        .find(|e| e["key"] == "TARGET_ARCH")
        .unwrap();
    assert_eq!(arch["value"], "x86_64");
}

#[test]
fn test_defines_cmake_cache() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["defines", "--cmake-cache", "--os", "windows", "--build-type", "Debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "set(CMAKE_CONFIGURATION_TYPES \"Debug\" CACHE STRING \"\" FORCE)",
        ));
}

#[test]
fn test_older_schema_drops_windows_only_toggle() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["defines", "--schema", "3.0", "-o", "LLA_BUILD_RFIDEAS=true"])
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::contains("LLA_BUILD_RFIDEAS").not())
        .stdout(predicate::str::contains("LIBLOGICALACCESS_VERSION_STRING=3.0.0"));
}

#[test]
fn test_manifest_windows_hook_library() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["manifest", "--os", "windows", "--arch", "x86"])
        .assert()
        .success()
        .stdout(predicate::str::contains("islogkbdhooklib32"))
        .stdout(predicate::str::contains("islogkbdhooklib64").not());
}

#[test]
fn test_manifest_android_subset() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["manifest", "--os", "android", "--arch", "armv8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seoscards"))
        .stdout(predicate::str::contains("pcscreaders").not());
}

// ============================================================================
// lla-recipe fingerprint
// ============================================================================

#[test]
fn test_fingerprint_changes_with_lock_file() {
    let tmp = temp_dir();
    let lock = tmp.path().join("lla.lock");
    fs::write(&lock, "[packages]\nboost = \"a1b2c3\"\n").unwrap();

    let plain = lla_recipe(&tmp)
        .arg("fingerprint")
        .args(LINUX)
        .output()
        .unwrap();
    let locked = lla_recipe(&tmp)
        .arg("fingerprint")
        .args(LINUX)
        .arg("--lock")
        .arg(&lock)
        .output()
        .unwrap();

    assert!(plain.status.success());
    assert!(locked.status.success());
    assert_ne!(plain.stdout, locked.stdout);
}

#[test]
fn test_fingerprint_short() {
    let tmp = temp_dir();

    let output = lla_recipe(&tmp)
        .args(["fingerprint", "--short"])
        .args(LINUX)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim().len(), 12);
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_project_config_supplies_defaults() {
    let tmp = temp_dir();
    let config_dir = tmp.path().join(".lla-recipe");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
[defaults]
os = "windows"
arch = "x86_64"

[toggles]
LLA_BUILD_LIBUSB = true
"#,
    )
    .unwrap();

    lla_recipe(&tmp)
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("islogkbdhooklib64"))
        .stdout(predicate::str::contains("libusbreaders"));
}

#[test]
fn test_flags_override_project_config() {
    let tmp = temp_dir();
    let config_dir = tmp.path().join(".lla-recipe");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[defaults]\nos = \"windows\"\n\n[toggles]\nLLA_BUILD_LIBUSB = true\n",
    )
    .unwrap();

    lla_recipe(&tmp)
        .args(["manifest", "--os", "linux", "-o", "LLA_BUILD_LIBUSB=false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keyboardreaders").not())
        .stdout(predicate::str::contains("libusbreaders").not());
}

// ============================================================================
// lla-recipe toggles / schemas / completions
// ============================================================================

#[test]
fn test_toggles_lists_availability() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["toggles", "--schema", "3.0", "--os", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LLA_BUILD_PKCS"))
        .stdout(predicate::str::contains("LLA_BUILD_RFIDEAS"))
        .stdout(predicate::str::contains("not available on linux"));
}

#[test]
fn test_schemas() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .arg("schemas")
        .assert()
        .success()
        .stdout(predicate::str::contains("2.1.0"))
        .stdout(predicate::str::contains("3.0.0"))
        .stdout(predicate::str::contains("3.4.0 (latest)"));
}

#[test]
fn test_completions() {
    let tmp = temp_dir();

    lla_recipe(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lla-recipe"));
}

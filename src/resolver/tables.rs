//! Built-in rule tables, one per recipe release.

use crate::core::definition::Precedence;
use crate::core::platform::{Arch, Os};
use crate::resolver::rules::Condition;
use crate::resolver::schema::{DefinitionContribution, RuleTable, ToggleSpec};

pub const PKCS: &str = "LLA_BUILD_PKCS";
pub const LIBUSB: &str = "LLA_BUILD_LIBUSB";
pub const IKS: &str = "LLA_BUILD_IKS";
pub const UNITTEST: &str = "LLA_BUILD_UNITTEST";
pub const RFIDEAS: &str = "LLA_BUILD_RFIDEAS";

/// Packaged on Android instead of the full plugin set.
const ANDROID_SUBSET: &[&str] = &[
    "logicalaccess",
    "llacommon",
    "logicalaccess-cryptolib",
    "iso7816readers",
    "desfirecards",
    "mifarecards",
    "iso7816cards",
    "samavcards",
    "epasscards",
];

// Common plugins up to the USB reader slot, then the rest. Split so the
// toggle-gated reader keeps its place in the listing.
const COMMON_HEAD: &[&str] = &[
    "llacommon",
    "logicalaccess-cryptolib",
    "cps3cards",
    "deisterreaders",
    "desfirecards",
    "elatecreaders",
    "em4102cards",
    "em4135cards",
    "felicacards",
    "generictagcards",
    "gunneboreaders",
    "icode1cards",
    "icode2cards",
    "indalacards",
    "infineonmydcards",
    "iso15693cards",
    "iso7816cards",
    "iso7816readers",
    "legicprimecards",
];

const COMMON_TAIL: &[&str] = &[
    "logicalaccess",
    "mifarecards",
    "mifarepluscards",
    "mifareultralightcards",
    "ok5553readers",
    "osdpreaders",
    "pcscreaders",
    "proxcards",
    "proxlitecards",
    "samavcards",
    "smartframecards",
    "stidstrreaders",
    "stmlri512cards",
    "tagitcards",
    "topazcards",
    "twiccards",
    "epasscards",
];

fn with_seos(list: &[&'static str]) -> Vec<&'static str> {
    let mut list = list.to_vec();
    let at = list
        .iter()
        .position(|a| *a == "samavcards")
        .map_or(list.len(), |i| i + 1);
    list.insert(at, "seoscards");
    list
}

/// Android subset with the SEOS plugin, which is packaged after the others.
fn android_with_seos() -> Vec<&'static str> {
    [ANDROID_SUBSET, &["seoscards"]].concat()
}

/// Definitions shared by every release.
fn common_definitions(table: RuleTable) -> RuleTable {
    table
        .define(
            Condition::Always,
            Precedence::Generic,
            DefinitionContribution::Toggles,
        )
        .define(
            Condition::Always,
            Precedence::Generic,
            DefinitionContribution::VersionString {
                key: "LIBLOGICALACCESS_VERSION_STRING".to_string(),
            },
        )
        .define(
            Condition::Always,
            Precedence::Generic,
            DefinitionContribution::ResourceVersion {
                key: "LIBLOGICALACCESS_WINDOWS_VERSION".to_string(),
            },
        )
        .define(
            Condition::Always,
            Precedence::Generic,
            DefinitionContribution::TargetArch {
                key: "TARGET_ARCH".to_string(),
            },
        )
        // Keep the toolchain from forcing -stdlib=libc++ on Android.
        .define(
            Condition::Os(Os::Android),
            Precedence::Platform,
            DefinitionContribution::Fixed {
                key: "CONAN_LIBCXX".to_string(),
                value: "".into(),
            },
        )
        .define(
            Condition::Os(Os::Android),
            Precedence::Platform,
            DefinitionContribution::Fixed {
                key: "LLA_BOOST_ASIO_HAS_STD_STRING_VIEW".to_string(),
                value: 1i64.into(),
            },
        )
}

/// Windows keyboard integration: the wedge reader and the hook library
/// matching the target architecture.
fn windows_artifacts(table: RuleTable) -> RuleTable {
    table
        .artifacts(Condition::Os(Os::Windows), &["keyboardreaders"])
        .artifacts(
            Condition::all([Condition::Os(Os::Windows), Condition::Arch(Arch::X86_64)]),
            &["islogkbdhooklib64"],
        )
        .artifacts(
            Condition::all([Condition::Os(Os::Windows), Condition::NotArch(Arch::X86_64)]),
            &["islogkbdhooklib32"],
        )
}

pub fn v3_4() -> RuleTable {
    let table = RuleTable::new("3.4.0", "3.4.0")
        .toggle(ToggleSpec::new(PKCS, true).describe("PKCS#11 key storage support"))
        .toggle(ToggleSpec::new(LIBUSB, false).describe("USB transport reader backend (libusb)"))
        .require(Condition::Always, "boost", "1.83.0")
        .require(Condition::Always, "openssl", "3.4.1")
        .require(Condition::Always, "nlohmann_json", "3.11.3")
        .require(Condition::Always, "zlib", "1.3.1")
        .test_require(Condition::Always, "gtest", "1.15.0")
        .require(Condition::toggle(PKCS), "cppkcs11", "1.2")
        .require(Condition::toggle(LIBUSB), "libusb", "1.0.26")
        .option_default(Condition::Always, "openssl", "shared", true)
        .option_default(Condition::Always, "gtest", "shared", true)
        .option_default(Condition::Os(Os::Windows), "openssl", "no_asm", true)
        .option_default(Condition::Os(Os::Windows), "boost", "shared", false)
        .option_default(Condition::NotOs(Os::Windows), "boost", "shared", true)
        .full_package_mode("boost")
        .full_package_mode("openssl");

    let table = common_definitions(table).define(
        Condition::Os(Os::Windows),
        Precedence::Platform,
        DefinitionContribution::BuildType {
            key: "CMAKE_CONFIGURATION_TYPES".to_string(),
        },
    );

    let table = table.terminal_artifacts(Condition::Os(Os::Android), &android_with_seos());
    windows_artifacts(table)
        .artifacts(Condition::Always, COMMON_HEAD)
        .artifacts(Condition::toggle(LIBUSB), &["libusbreaders"])
        .artifacts(Condition::Always, &with_seos(COMMON_TAIL))
        .artifacts(Condition::Always, &["yubikeycards"])
}

pub fn v3_0() -> RuleTable {
    let table = RuleTable::new("3.0.0", "3.0.0")
        .toggle(ToggleSpec::new(IKS, false).describe("Islog Key Server remote key storage (gRPC)"))
        .toggle(ToggleSpec::new(PKCS, true).describe("PKCS#11 key storage support"))
        .toggle(ToggleSpec::new(LIBUSB, false).describe("USB transport reader backend (libusb)"))
        .toggle(ToggleSpec::new(UNITTEST, false).describe("Build the unit test suite"))
        .toggle(
            ToggleSpec::new(RFIDEAS, true)
                .describe("RFIDeas pcProx reader plugin")
                .only_on(&[Os::Windows]),
        )
        .require(Condition::Always, "boost", "1.76.0")
        .require(Condition::Always, "openssl", "1.1.1k")
        .require(Condition::Always, "nlohmann_json", "3.9.1")
        .require(Condition::Always, "zlib", "1.2.11")
        .require(Condition::toggle(IKS), "grpc", "1.39.1")
        .require(Condition::toggle(PKCS), "cppkcs11", "1.1")
        .require(Condition::toggle(LIBUSB), "libusb", "1.0.24")
        .test_require(Condition::toggle(UNITTEST), "gtest", "1.10.0")
        .option_default(Condition::Always, "openssl", "shared", true)
        .option_default(Condition::Always, "gtest", "shared", true)
        .option_default(Condition::Os(Os::Windows), "openssl", "no_asm", true)
        .option_default(Condition::Os(Os::Windows), "boost", "shared", false)
        .option_default(Condition::NotOs(Os::Windows), "boost", "shared", true)
        .full_package_mode("boost")
        .full_package_mode("openssl");

    let table = common_definitions(table).define(
        Condition::all([Condition::Os(Os::Windows), Condition::compiler("msvc")]),
        Precedence::Platform,
        DefinitionContribution::BuildType {
            key: "CMAKE_CONFIGURATION_TYPES".to_string(),
        },
    );

    let table = table.terminal_artifacts(Condition::Os(Os::Android), ANDROID_SUBSET);
    windows_artifacts(table)
        .artifacts(
            Condition::all([Condition::Os(Os::Windows), Condition::toggle(RFIDEAS)]),
            &["rfideasreaders"],
        )
        .artifacts(Condition::Always, COMMON_HEAD)
        .artifacts(Condition::toggle(LIBUSB), &["libusbreaders"])
        .artifacts(Condition::Always, COMMON_TAIL)
}

pub fn v2_1() -> RuleTable {
    let table = RuleTable::new("2.1.0", "2.1.0")
        .toggle(ToggleSpec::new(IKS, false).describe("Islog Key Server remote key storage (gRPC)"))
        .toggle(ToggleSpec::new(PKCS, true).describe("PKCS#11 key storage support"))
        .toggle(ToggleSpec::new(UNITTEST, false).describe("Build the unit test suite"))
        .toggle(
            ToggleSpec::new(RFIDEAS, true)
                .describe("RFIDeas pcProx reader plugin")
                .only_on(&[Os::Windows]),
        )
        .require(Condition::Always, "boost", "1.71.0")
        .require(Condition::Always, "openssl", "1.1.1g")
        .require(Condition::Always, "nlohmann_json", "3.7.3")
        .require(Condition::Always, "zlib", "1.2.11")
        .require(Condition::toggle(IKS), "grpc", "1.25.0")
        .require(Condition::toggle(PKCS), "cppkcs11", "1.0")
        .test_require(Condition::toggle(UNITTEST), "gtest", "1.8.1")
        .option_default(Condition::Always, "openssl", "shared", true)
        .option_default(Condition::Always, "boost", "shared", false)
        .option_default(Condition::Always, "gtest", "shared", true)
        .full_package_mode("boost")
        .full_package_mode("openssl");

    let table = common_definitions(table).define(
        Condition::all([Condition::Os(Os::Windows), Condition::compiler("msvc")]),
        Precedence::Platform,
        DefinitionContribution::BuildType {
            key: "CMAKE_CONFIGURATION_TYPES".to_string(),
        },
    );

    let table = table.terminal_artifacts(Condition::Os(Os::Android), ANDROID_SUBSET);
    windows_artifacts(table)
        .artifacts(
            Condition::all([Condition::Os(Os::Windows), Condition::toggle(RFIDEAS)]),
            &["rfideasreaders"],
        )
        .artifacts(Condition::Always, COMMON_HEAD)
        .artifacts(Condition::Always, COMMON_TAIL)
}

//! Artifact manifest construction.

use crate::core::artifact::ArtifactManifest;
use crate::core::platform::PlatformDescriptor;
use crate::resolver::errors::ResolveError;
use crate::resolver::normalize::NormalizedOptions;
use crate::resolver::schema::RuleTable;

/// List the component libraries the package ships, in link order.
///
/// Rules run in declaration order. A matching terminal rule contributes its
/// artifacts and ends evaluation, so nothing after it is consulted.
pub fn build_manifest(
    table: &RuleTable,
    platform: &PlatformDescriptor,
    options: &NormalizedOptions,
) -> Result<ArtifactManifest, ResolveError> {
    let mut manifest = ArtifactManifest::new();

    for rule in &table.manifest {
        if !rule.condition.evaluate(platform, &options.toggles)? {
            continue;
        }

        manifest.extend(rule.artifacts.iter().map(String::as_str));

        if rule.terminal {
            tracing::debug!("manifest closed by `{}`", rule.condition);
            break;
        }
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{Arch, BuildType, Os};
    use crate::core::toggle::FeatureToggleSet;
    use crate::resolver::normalize::normalize;
    use crate::resolver::rules::Condition;
    use crate::resolver::schema::{SchemaVersion, ToggleSpec};
    use crate::resolver::tables::{LIBUSB, RFIDEAS};
    use crate::test_support::{android_armv8, linux_x86_64, platform, windows_x86, windows_x86_64};

    fn manifest(
        schema: SchemaVersion,
        platform: &PlatformDescriptor,
        toggles: FeatureToggleSet,
    ) -> ArtifactManifest {
        let table = schema.rules();
        let options = normalize(table, platform, &toggles, &[]).unwrap();
        build_manifest(table, platform, &options).unwrap()
    }

    #[test]
    fn test_android_is_a_subset_of_linux() {
        let android = manifest(SchemaVersion::V3_4, &android_armv8(), FeatureToggleSet::new());
        let linux = manifest(SchemaVersion::V3_4, &linux_x86_64(), FeatureToggleSet::new());

        assert_eq!(android.len(), 10);
        assert_eq!(android.as_slice()[0], "logicalaccess");
        assert!(android.contains("seoscards"));
        assert!(!android.contains("pcscreaders"));
        assert!(android.is_subset_of(&linux));
        assert!(android.len() < linux.len());
    }

    #[test]
    fn test_android_manifest_order() {
        let android = manifest(SchemaVersion::V3_4, &android_armv8(), FeatureToggleSet::new());

        assert_eq!(
            android.as_slice(),
            [
                "logicalaccess",
                "llacommon",
                "logicalaccess-cryptolib",
                "iso7816readers",
                "desfirecards",
                "mifarecards",
                "iso7816cards",
                "samavcards",
                "epasscards",
                "seoscards",
            ]
        );
    }

    #[test]
    fn test_android_ignores_later_rules() {
        // LIBUSB would add a reader everywhere else
        let toggles = FeatureToggleSet::new().with(LIBUSB, true);
        let android = manifest(SchemaVersion::V3_4, &android_armv8(), toggles);

        assert!(!android.contains("libusbreaders"));
        assert!(!android.contains("yubikeycards"));
    }

    #[test]
    fn test_windows_hook_library_matches_arch() {
        let x64 = manifest(SchemaVersion::V3_4, &windows_x86_64(), FeatureToggleSet::new());
        assert!(x64.contains("keyboardreaders"));
        assert!(x64.contains("islogkbdhooklib64"));
        assert!(!x64.contains("islogkbdhooklib32"));

        let x86 = manifest(SchemaVersion::V3_4, &windows_x86(), FeatureToggleSet::new());
        assert!(x86.contains("islogkbdhooklib32"));
        assert!(!x86.contains("islogkbdhooklib64"));

        let arm = platform(Os::Windows, Arch::Armv8, "msvc", BuildType::Release);
        let arm = manifest(SchemaVersion::V3_4, &arm, FeatureToggleSet::new());
        assert!(arm.contains("islogkbdhooklib32"));
    }

    #[test]
    fn test_linux_has_no_windows_artifacts() {
        let linux = manifest(SchemaVersion::V3_4, &linux_x86_64(), FeatureToggleSet::new());

        assert!(!linux.contains("keyboardreaders"));
        assert!(!linux.contains("islogkbdhooklib64"));
        assert_eq!(linux.as_slice()[0], "llacommon");
        assert!(linux.contains("yubikeycards"));
    }

    #[test]
    fn test_libusb_reader_gated_by_toggle() {
        let without = manifest(SchemaVersion::V3_4, &linux_x86_64(), FeatureToggleSet::new());
        assert!(!without.contains("libusbreaders"));

        let toggles = FeatureToggleSet::new().with(LIBUSB, true);
        let with = manifest(SchemaVersion::V3_4, &linux_x86_64(), toggles);
        assert!(with.contains("libusbreaders"));

        let slice = with.as_slice();
        let at = slice.iter().position(|a| a == "libusbreaders").unwrap();
        assert_eq!(slice[at - 1], "legicprimecards");
        assert_eq!(slice[at + 1], "logicalaccess");
    }

    #[test]
    fn test_rfideas_reader_windows_only() {
        let windows = manifest(SchemaVersion::V3_0, &windows_x86_64(), FeatureToggleSet::new());
        assert!(windows.contains("rfideasreaders"));

        let toggles = FeatureToggleSet::new().with(RFIDEAS, false);
        let windows = manifest(SchemaVersion::V3_0, &windows_x86_64(), toggles);
        assert!(!windows.contains("rfideasreaders"));

        // guarded by the OS check, so the removed toggle is never read
        let linux = manifest(SchemaVersion::V3_0, &linux_x86_64(), FeatureToggleSet::new());
        assert!(!linux.contains("rfideasreaders"));
    }

    #[test]
    fn test_unguarded_removed_toggle_fails() {
        let table = RuleTable::new("unguarded", "1.0.0")
            .toggle(ToggleSpec::new("WIN_ONLY", true).only_on(&[Os::Windows]))
            .artifacts(Condition::toggle("WIN_ONLY"), &["winreaders"]);
        let linux = linux_x86_64();
        let options = normalize(&table, &linux, &FeatureToggleSet::new(), &[]).unwrap();

        assert!(matches!(
            build_manifest(&table, &linux, &options),
            Err(ResolveError::InapplicableToggleReference { .. })
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let table = RuleTable::new("dups", "1.0.0")
            .artifacts(Condition::Always, &["core", "cards"])
            .artifacts(Condition::Os(Os::Linux), &["cards", "readers"]);
        let linux = linux_x86_64();
        let options = normalize(&table, &linux, &FeatureToggleSet::new(), &[]).unwrap();

        let manifest = build_manifest(&table, &linux, &options).unwrap();
        assert_eq!(manifest.as_slice(), ["core", "cards", "readers"]);
    }
}

//! Integration tests for types

#[cfg(test)]
mod tests {
    use jslaunch_types::*;
    use proptest::prelude::*;

    fn known_os() -> impl Strategy<Value = (&'static str, &'static str)> {
        prop_oneof![
            Just(("win32", "windows")),
            Just(("windows", "windows")),
            Just(("darwin", "darwin")),
            Just(("macos", "darwin")),
            Just(("linux", "linux")),
        ]
    }

    fn known_arch() -> impl Strategy<Value = (&'static str, &'static str)> {
        prop_oneof![
            Just(("x64", "x86_64")),
            Just(("x86_64", "x86_64")),
            Just(("arm64", "arm64")),
            Just(("aarch64", "arm64")),
        ]
    }

    proptest! {
        #[test]
        fn executable_name_follows_release_pattern(
            (raw_os, os) in known_os(),
            (raw_arch, arch) in known_arch(),
        ) {
            let pair = PlatformPair::from_raw(raw_os, raw_arch);
            let ext = if os == "windows" { ".exe" } else { "" };
            prop_assert_eq!(pair.executable_name(), format!("jsonschema-{os}-{arch}{ext}"));
        }

        #[test]
        fn unknown_identifiers_pass_through(
            os in "[a-z]{3,10}",
            arch in "[a-z0-9]{3,10}",
        ) {
            prop_assume!(!["win32", "windows", "darwin", "macos", "linux"].contains(&os.as_str()));
            prop_assume!(!["x64", "x86_64", "arm64", "aarch64"].contains(&arch.as_str()));

            let pair = PlatformPair::from_raw(&os, &arch);
            prop_assert_eq!(pair.os.as_str(), os.as_str());
            prop_assert_eq!(pair.arch.as_str(), arch.as_str());
            prop_assert!(!pair.executable_name().ends_with(".exe"));
        }
    }

    #[test]
    fn test_host_pair_is_stable() {
        let first = RawPlatform::host().normalize();
        let second = RawPlatform::host().normalize();
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serialization_keeps_json_stdout_inline() {
        let result = InvocationResult {
            code: Some(0),
            stdout: Stdout::Json(serde_json::json!({"locations": {}, "references": {}})),
            stderr: String::new(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["code"], 0);
        assert!(value["stdout"]["locations"].is_object());
    }
}

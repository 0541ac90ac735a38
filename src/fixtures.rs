#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use tempfile::TempDir;

    use crate::mask::Mask;
    use crate::setting::Setting;
    use crate::source::Sources;
    use crate::value::External;

    /// Storage for the settings built by [`settings`].
    #[derive(Debug, Default)]
    pub struct Slots {
        pub name: String,
        pub mode: i64,
        pub address: String,
        pub timeout: Duration,
        pub tls: bool,
        pub config: External,
    }

    /// A representative declaration: two required values, three optional
    /// ones, and a config file flag.
    pub fn settings(slots: &mut Slots) -> Vec<Setting<'_>> {
        let Slots {
            name,
            mode,
            address,
            timeout,
            tls,
            config,
        } = slots;

        vec![
            Setting::optional(
                "Config File",
                "config",
                config,
                External::default(),
                Sources::COMMAND_LINE,
                Mask::REPORT_VALUE,
                "Provide configuration from an external JSON file",
            )
            .unwrap(),
            Setting::required(
                "App Name",
                "name",
                name,
                Sources::ALL_SOURCES,
                Mask::REPORT_VALUE,
                "Application name",
            )
            .unwrap(),
            Setting::required(
                "Mode",
                "mode",
                mode,
                Sources::FLAG,
                Mask::REPORT_VALUE,
                "Mode indicator",
            )
            .unwrap(),
            Setting::optional(
                "IP Address",
                "address",
                address,
                String::new(),
                Sources::ALL_SOURCES,
                Mask::MASK_UNSET,
                "Remote server address",
            )
            .unwrap(),
            Setting::optional(
                "Timeout",
                "timeout",
                timeout,
                Duration::from_secs(60),
                Sources::ALL_SOURCES,
                Mask::REPORT_VALUE,
                "Remote server timeout",
            )
            .unwrap(),
            Setting::optional(
                "TLS",
                "tls",
                tls,
                false,
                Sources::NAMED_SOURCES,
                Mask::REPORT_VALUE,
                "Use TLS",
            )
            .unwrap(),
        ]
    }

    /// The external file most tests load.
    pub const CONFIG_JSON: &str = r#"{
    "name": "overridden",
    "address": "localhost:8000",
    "unknown": "ignored"
}"#;

    /// Write `content` to `dir/name` and return the path as a string.
    pub fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// A synthetic environment.
    pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn fixture_settings_start_from_defaults() {
        let mut slots = Slots::default();
        let settings = settings(&mut slots);
        assert_eq!(settings.len(), 6);
        drop(settings);
        assert_eq!(slots.timeout, Duration::from_secs(60));
        assert!(!slots.tls);
    }
}

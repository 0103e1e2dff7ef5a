#[cfg(test)]
pub mod tests {
    use crate::settings::Settings;

    pub fn crate_test_settings_str() -> String {
        r#"
            [validation]
            time_gap_secs = 30

            [[signing.keys]]
            key_id = "key1"
            secret = "secret1"
            algorithm = "hmac-sha256"

            [[signing.keys]]
            key_id = "edge-2026-08"
            secret = "0f1e2d3c4b5a69788796a5b4c3d2e1f0"
            algorithm = "ed25519"
            "#
        .to_string()
    }

    pub fn create_test_settings() -> Settings {
        let toml_str = crate_test_settings_str();
        Settings::from_toml(&toml_str).expect("Invalid config")
    }
}

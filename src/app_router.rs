use web_sys::UrlSearchParams;

use kreide_core::{is_valid_player_count, Variant, DEFAULT_PLAYER_COUNT};

const VARIANT_PARAM: &str = "variant";
const PLAYERS_PARAM: &str = "players";

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InitConfig {
    pub(crate) variant: Variant,
    pub(crate) player_count: usize,
    /// Parameters that were present but unusable.
    pub(crate) warnings: Vec<String>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            player_count: DEFAULT_PLAYER_COUNT,
            warnings: Vec::new(),
        }
    }
}

pub(crate) fn load_init_config() -> InitConfig {
    let Some(window) = web_sys::window() else {
        return InitConfig::default();
    };
    let search = window.location().search().unwrap_or_default();
    let Ok(params) = UrlSearchParams::new_with_str(&search) else {
        return InitConfig::default();
    };
    let config = parse_init_config(
        params.get(VARIANT_PARAM).as_deref(),
        params.get(PLAYERS_PARAM).as_deref(),
    );
    for warning in &config.warnings {
        gloo::console::warn!(warning.clone());
    }
    config
}

pub(crate) fn parse_init_config(variant: Option<&str>, players: Option<&str>) -> InitConfig {
    let mut config = InitConfig::default();
    if let Some(raw) = variant.filter(|raw| !raw.trim().is_empty()) {
        match raw.parse::<Variant>() {
            Ok(variant) => config.variant = variant,
            Err(err) => config.warnings.push(err.to_string()),
        }
    }
    if let Some(raw) = players.filter(|raw| !raw.trim().is_empty()) {
        match raw.trim().parse::<usize>() {
            Ok(count) if is_valid_player_count(count) => config.player_count = count,
            _ => config
                .warnings
                .push(format!("ignoring players={raw}: expected 2, 3 or 4")),
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_params() {
        let config = parse_init_config(None, None);
        assert_eq!(config, InitConfig::default());
        assert_eq!(config.variant, Variant::Tap);
        assert_eq!(config.player_count, 4);
    }

    #[test]
    fn reads_variant_and_players() {
        let config = parse_init_config(Some("buttons"), Some(" 3 "));
        assert_eq!(config.variant, Variant::Buttons);
        assert_eq!(config.player_count, 3);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn bad_values_fall_back_with_warnings() {
        let config = parse_init_config(Some("kreuz"), Some("9"));
        assert_eq!(config.variant, Variant::Tap);
        assert_eq!(config.player_count, DEFAULT_PLAYER_COUNT);
        assert_eq!(config.warnings.len(), 2);
        assert!(config.warnings[1].contains("players=9"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = parse_init_config(Some(" "), Some(""));
        assert!(config.warnings.is_empty());
    }
}

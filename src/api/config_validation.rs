use crate::core::Selector;
use crate::error::{LandingError, LandingResult};

use super::{
    CounterTargetSource, CounterTiming, PageControllerConfig, PanelTransition, RevealEffect,
};

pub(super) fn validate_config(config: &PageControllerConfig) -> LandingResult<()> {
    if config.smooth_scroll.enabled {
        Selector::parse(&config.smooth_scroll.anchor_selector)?;
    }

    let panel = &config.author_panel;
    if panel.enabled {
        Selector::parse(&panel.toggle_selector)?;
        Selector::parse(&panel.content_selector)?;
        validate_class_name("author_panel.open_class", &panel.open_class)?;
        if let PanelTransition::Fade { delay_ms } = panel.transition {
            validate_non_negative_ms("author_panel.transition.delay_ms", delay_ms)?;
        }
    }

    let reveal = &config.reveal;
    if reveal.enabled {
        Selector::parse(&reveal.selector)?;
        reveal.options.validate()?;
        match &reveal.effect {
            RevealEffect::InlineAnimation { animation } if animation.trim().is_empty() => {
                return Err(LandingError::InvalidConfig(
                    "reveal.effect.animation must not be empty".to_owned(),
                ));
            }
            RevealEffect::AddClass { class } => validate_class_name("reveal.effect.class", class)?,
            RevealEffect::InlineAnimation { .. } => {}
        }
    }

    if config.navbar.enabled {
        Selector::parse(&config.navbar.selector)?;
        validate_threshold("navbar.threshold_px", config.navbar.threshold_px)?;
    }

    let scroll_top = &config.scroll_top;
    if scroll_top.enabled {
        Selector::id(&scroll_top.element_id)?;
        validate_threshold("scroll_top.threshold_px", scroll_top.threshold_px)?;
    }

    let counters = &config.counters;
    if counters.enabled {
        Selector::parse(&counters.selector)?;
        counters.options.validate()?;
        match &counters.target_source {
            CounterTargetSource::Attribute { name }
            | CounterTargetSource::AttributeOrText { name } => {
                validate_attribute_name("counters.target_source.name", name)?;
            }
            CounterTargetSource::Text => {}
        }
        match counters.timing {
            CounterTiming::Stepped { tick_ms, steps } => {
                validate_positive_ms("counters.timing.tick_ms", tick_ms)?;
                if steps == 0 {
                    return Err(LandingError::InvalidConfig(
                        "counters.timing.steps must be > 0".to_owned(),
                    ));
                }
            }
            CounterTiming::Eased { duration_ms } => {
                validate_positive_ms("counters.timing.duration_ms", duration_ms)?;
            }
        }
    }

    let videos = &config.videos;
    if videos.enabled {
        Selector::parse(&videos.video_selector)?;
        Selector::parse(&videos.control_selector)?;
        validate_attribute_name("videos.video_attribute", &videos.video_attribute)?;
    }

    let modals = &config.modals;
    if modals.enabled {
        Selector::parse(&modals.trigger_selector)?;
        Selector::parse(&modals.modal_selector)?;
        Selector::parse(&modals.close_selector)?;
        validate_attribute_name("modals.trigger_attribute", &modals.trigger_attribute)?;
        validate_class_name("modals.open_class", &modals.open_class)?;
    }

    Ok(())
}

fn validate_threshold(field: &str, value: f64) -> LandingResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LandingError::InvalidConfig(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn validate_positive_ms(field: &str, value: f64) -> LandingResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LandingError::InvalidConfig(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

fn validate_non_negative_ms(field: &str, value: f64) -> LandingResult<()> {
    validate_threshold(field, value)
}

fn validate_class_name(field: &str, value: &str) -> LandingResult<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(LandingError::InvalidConfig(format!(
            "{field} must be a single non-empty class name"
        )));
    }
    Ok(())
}

fn validate_attribute_name(field: &str, value: &str) -> LandingResult<()> {
    let valid = !value.is_empty()
        && value
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b':'));
    if !valid {
        return Err(LandingError::InvalidConfig(format!(
            "{field} must be a valid attribute name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_config;
    use crate::api::{CounterTiming, PageControllerConfig, PanelTransition};
    use crate::core::IntersectionOptions;
    use crate::error::LandingError;

    #[test]
    fn default_config_is_valid() {
        validate_config(&PageControllerConfig::default()).expect("defaults must validate");
    }

    #[test]
    fn rejects_zero_counter_steps_and_negative_thresholds() {
        let config =
            PageControllerConfig::new().with_counter_timing(CounterTiming::Stepped {
                tick_ms: 30.0,
                steps: 0,
            });
        assert!(matches!(
            validate_config(&config),
            Err(LandingError::InvalidConfig(_))
        ));

        let mut config = PageControllerConfig::new();
        config.navbar.threshold_px = -1.0;
        assert!(validate_config(&config).is_err());

        let config = PageControllerConfig::new()
            .with_author_panel_transition(PanelTransition::Fade { delay_ms: f64::NAN });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_unsupported_selectors() {
        let mut config = PageControllerConfig::new();
        config.navbar.selector = "header .navbar".to_owned();
        assert!(matches!(
            validate_config(&config),
            Err(LandingError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn disabled_features_skip_validation() {
        let mut config = PageControllerConfig::new();
        config.reveal.enabled = false;
        config.reveal.options = IntersectionOptions::new(4.0, "nonsense");
        validate_config(&config).expect("disabled feature is not validated");
    }
}

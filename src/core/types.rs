use serde::{Deserialize, Serialize};

use crate::error::{LandingError, LandingResult};

/// Opaque handle for an element owned by a `Dom` implementation.
///
/// Handles are only meaningful for the `Dom` that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementRef(pub u32);

impl ElementRef {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What the host should do with the browser's default action after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDisposition {
    /// Let the browser continue with its default action.
    Default,
    /// Call `preventDefault()` on the originating event.
    PreventDefault,
}

impl EventDisposition {
    #[must_use]
    pub fn prevents_default(self) -> bool {
        self == Self::PreventDefault
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
}

impl ScrollBehavior {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Smooth => "smooth",
        }
    }
}

/// Vertical alignment used by `scroll_into_view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

impl ScrollBlock {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Nearest => "nearest",
        }
    }
}

/// Intersection observer groups the controller registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObserverKind {
    Reveal,
    Counter,
}

/// Options mirroring `IntersectionObserverInit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionOptions {
    /// Fraction of the target that must be visible, in `[0, 1]`.
    pub threshold: f64,
    /// CSS margin applied to the root box, e.g. `0px 0px -80px 0px`.
    pub root_margin: String,
}

impl IntersectionOptions {
    #[must_use]
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        Self {
            threshold,
            root_margin: root_margin.into(),
        }
    }

    pub fn validate(&self) -> LandingResult<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(LandingError::InvalidConfig(format!(
                "intersection threshold must be finite and in [0, 1], got {}",
                self.threshold
            )));
        }
        let parts: Vec<&str> = self.root_margin.split_whitespace().collect();
        if parts.is_empty() || parts.len() > 4 {
            return Err(LandingError::InvalidConfig(format!(
                "root margin `{}` must have one to four components",
                self.root_margin
            )));
        }
        for part in parts {
            let numeric = part
                .strip_suffix("px")
                .or_else(|| part.strip_suffix('%'))
                .unwrap_or(part);
            if numeric.parse::<f64>().is_err() {
                return Err(LandingError::InvalidConfig(format!(
                    "root margin component `{part}` must be a px or % length"
                )));
            }
        }
        Ok(())
    }
}

/// One intersection notification delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    pub target: ElementRef,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    #[must_use]
    pub const fn entering(target: ElementRef) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    #[must_use]
    pub const fn leaving(target: ElementRef) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IntersectionOptions;

    #[test]
    fn intersection_options_accept_default_reveal_margin() {
        IntersectionOptions::new(0.1, "0px 0px -80px 0px")
            .validate()
            .expect("valid options");
        IntersectionOptions::new(0.5, "0px")
            .validate()
            .expect("single component margin");
    }

    #[test]
    fn intersection_options_reject_bad_threshold_and_margin() {
        assert!(IntersectionOptions::new(1.5, "0px").validate().is_err());
        assert!(IntersectionOptions::new(f64::NAN, "0px").validate().is_err());
        assert!(IntersectionOptions::new(0.1, "").validate().is_err());
        assert!(IntersectionOptions::new(0.1, "1em").validate().is_err());
    }
}

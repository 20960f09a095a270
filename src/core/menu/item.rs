//=========================================================================
// Menu Items
//=========================================================================
//
// The closed set of things a menu line can be.
//
//=========================================================================

//=== MenuValue ===========================================================

/// Current value of an adjustable item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuValue {
    /// Selected option of a `Selector`.
    Index(usize),
    /// Position of a `Slider`.
    Number(f32),
}

//=== MenuItem ============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    /// Activated with Enter/Space.
    Button { label: String },

    /// Cycles through `options` with Left/Right (wrapping).
    Selector {
        label: String,
        options: Vec<String>,
        index: usize,
    },

    /// Moves by `step` with Left/Right, clamped to `[min, max]`.
    Slider {
        label: String,
        value: f32,
        min: f32,
        max: f32,
        step: f32,
    },

    /// Static line; never selected.
    Text { label: String },
}

impl MenuItem {
    //--- Construction -----------------------------------------------------

    pub fn button(label: impl Into<String>) -> Self {
        Self::Button { label: label.into() }
    }

    /// `index` is clamped into `options`.
    pub fn selector<I, S>(label: impl Into<String>, options: I, index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let index = index.min(options.len().saturating_sub(1));
        Self::Selector {
            label: label.into(),
            options,
            index,
        }
    }

    /// `value` is clamped into `[min, max]`; a reversed range is swapped.
    pub fn slider(label: impl Into<String>, value: f32, min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self::Slider {
            label: label.into(),
            value: value.clamp(min, max),
            min,
            max,
            step: step.abs(),
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::Text { label: label.into() }
    }

    //--- Queries ----------------------------------------------------------

    pub fn label(&self) -> &str {
        match self {
            Self::Button { label }
            | Self::Selector { label, .. }
            | Self::Slider { label, .. }
            | Self::Text { label } => label,
        }
    }

    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Text { .. })
    }

    pub fn value(&self) -> Option<MenuValue> {
        match *self {
            Self::Selector { index, .. } => Some(MenuValue::Index(index)),
            Self::Slider { value, .. } => Some(MenuValue::Number(value)),
            Self::Button { .. } | Self::Text { .. } => None,
        }
    }

    /// Slider position in `[0, 1]`.
    pub fn fraction(&self) -> Option<f32> {
        match *self {
            Self::Slider { value, min, max, .. } if max > min => Some((value - min) / (max - min)),
            Self::Slider { .. } => Some(0.0),
            _ => None,
        }
    }

    /// Line shown on screen.
    pub fn display_text(&self) -> String {
        match self {
            Self::Button { label } | Self::Text { label } => label.clone(),
            Self::Selector { label, options, index } => match options.get(*index) {
                Some(option) => format!("{}: < {} >", label, option),
                None => label.clone(),
            },
            Self::Slider { label, value, .. } => format!("{}: {:.2}", label, value),
        }
    }

    //--- Adjustment -------------------------------------------------------

    /// Moves the value one notch left (`-1`) or right (`+1`). Returns the
    /// new value when it actually changed.
    pub(super) fn adjust(&mut self, direction: i32) -> Option<MenuValue> {
        match self {
            Self::Selector { options, index, .. } if options.len() > 1 => {
                let len = options.len() as i64;
                *index = (*index as i64 + direction as i64).rem_euclid(len) as usize;
                Some(MenuValue::Index(*index))
            }
            Self::Slider { value, min, max, step, .. } => {
                let next = (*value + *step * direction as f32).clamp(*min, *max);
                if next == *value {
                    return None;
                }
                *value = next;
                Some(MenuValue::Number(next))
            }
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_not_selectable() {
        assert!(!MenuItem::text("Options").is_selectable());
        assert!(MenuItem::button("Play").is_selectable());
    }

    #[test]
    fn selector_wraps_both_ways() {
        let mut item = MenuItem::selector("Difficulty", ["Easy", "Normal", "Hard"], 0);

        assert_eq!(item.adjust(-1), Some(MenuValue::Index(2)));
        assert_eq!(item.adjust(1), Some(MenuValue::Index(0)));
        assert_eq!(item.display_text(), "Difficulty: < Easy >");
    }

    #[test]
    fn single_option_selector_never_changes() {
        let mut item = MenuItem::selector("Mode", ["Only"], 5);
        assert_eq!(item.value(), Some(MenuValue::Index(0)));
        assert_eq!(item.adjust(1), None);
    }

    #[test]
    fn slider_clamps_and_reports_no_change_at_ends() {
        let mut item = MenuItem::slider("Volume", 0.9, 0.0, 1.0, 0.25);

        assert_eq!(item.adjust(1), Some(MenuValue::Number(1.0)));
        assert_eq!(item.adjust(1), None);
        assert_eq!(item.adjust(-1), Some(MenuValue::Number(0.75)));
        assert_eq!(item.fraction(), Some(0.75));
        assert_eq!(item.display_text(), "Volume: 0.75");
    }

    #[test]
    fn slider_normalises_range() {
        let item = MenuItem::slider("Speed", 10.0, 5.0, 1.0, -1.0);
        assert_eq!(
            item,
            MenuItem::Slider {
                label: "Speed".into(),
                value: 5.0,
                min: 1.0,
                max: 5.0,
                step: 1.0,
            }
        );
    }

    #[test]
    fn buttons_have_no_value() {
        let mut item = MenuItem::button("Quit");
        assert_eq!(item.value(), None);
        assert_eq!(item.adjust(1), None);
        assert_eq!(item.label(), "Quit");
    }
}

//! Raw inputs accepted by the adapters and what became of them

use crate::page::MovementDirection;

/// One wheel/trackpad tick. Fields mirror the browser's wheel events; a
/// host fills whichever it has.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelInput {
    /// Legacy `wheelDelta` (positive scrolls up)
    pub wheel_delta: Option<f64>,
    /// Legacy horizontal `wheelDeltaX`
    pub wheel_delta_x: Option<f64>,
    /// `deltaX` (positive scrolls right)
    pub delta_x: Option<f64>,
    /// `deltaY` (positive scrolls down)
    pub delta_y: Option<f64>,
    /// Legacy `detail` (positive scrolls down)
    pub detail: Option<f64>,
}

impl WheelInput {
    /// Vertical tick in `deltaY` convention
    pub fn vertical(delta_y: f64) -> Self {
        Self {
            delta_x: Some(0.0),
            delta_y: Some(delta_y),
            ..Default::default()
        }
    }

    /// Horizontal tick in `deltaX` convention
    pub fn horizontal(delta_x: f64) -> Self {
        Self {
            delta_x: Some(delta_x),
            delta_y: Some(0.0),
            ..Default::default()
        }
    }

    /// Signed tick value: positive means towards the start
    pub fn value(&self) -> f64 {
        non_zero(self.wheel_delta)
            .or_else(|| non_zero(self.delta_y.map(|d| -d)))
            .or_else(|| non_zero(self.detail.map(|d| -d)))
            .unwrap_or(0.0)
    }

    /// Signed horizontal tick value: positive means towards the start
    pub fn horizontal_value(&self) -> f64 {
        non_zero(self.wheel_delta_x)
            .or_else(|| non_zero(self.delta_x.map(|d| -d)))
            .unwrap_or(0.0)
    }

    /// Primarily vertical, or no horizontal component reported at all
    pub fn is_vertical(&self) -> bool {
        let has_horizontal = self.wheel_delta_x.is_some() || self.delta_x.is_some();
        if !has_horizontal {
            return true;
        }
        match (self.wheel_delta_x, self.wheel_delta) {
            (Some(x), Some(y)) if x.abs() < y.abs() => return true,
            _ => {}
        }
        let dx = self.delta_x.unwrap_or(0.0).abs();
        let dy = self.delta_y.unwrap_or(0.0).abs();
        dx < dy
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

/// Direction selected by a signed tick value
pub fn wheel_direction(value: f64) -> Option<MovementDirection> {
    let delta = value.clamp(-1.0, 1.0);
    if delta < 0.0 {
        Some(MovementDirection::Forward)
    } else if delta > 0.0 {
        Some(MovementDirection::Backward)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Touch,
    Pen,
    /// Mouse pointers are not treated as touch
    Mouse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub kind: PointerKind,
}

impl PointerInput {
    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Touch,
        }
    }

    pub fn is_touch(&self) -> bool {
        self.kind != PointerKind::Mouse
    }
}

/// Keys that drive paging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
}

impl PageKey {
    /// Legacy `keyCode` mapping
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            33 => Some(Self::PageUp),
            34 => Some(Self::PageDown),
            35 => Some(Self::End),
            36 => Some(Self::Home),
            37 => Some(Self::ArrowLeft),
            38 => Some(Self::ArrowUp),
            39 => Some(Self::ArrowRight),
            40 => Some(Self::ArrowDown),
            _ => None,
        }
    }

    /// Direction of a stepping key; `None` for Home/End
    pub fn direction(&self) -> Option<MovementDirection> {
        match self {
            Self::ArrowUp | Self::PageUp | Self::ArrowLeft => Some(MovementDirection::Backward),
            Self::ArrowDown | Self::PageDown | Self::ArrowRight => Some(MovementDirection::Forward),
            Self::Home | Self::End => None,
        }
    }
}

/// A destination for explicit navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position
    Index(usize),
    /// Page id
    Anchor(String),
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Target {
    fn from(anchor: &str) -> Self {
        Self::Anchor(anchor.to_string())
    }
}

impl From<String> for Target {
    fn from(anchor: String) -> Self {
        Self::Anchor(anchor)
    }
}

/// What an adapter did with an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Adapter disabled, wrong modality, or no usable signal
    Ignored,
    /// Inside the cooldown window
    Locked,
    /// Wheel momentum tail
    Decelerating,
    /// Below the touch threshold
    BelowThreshold,
    /// The page scrolls internally and is not at the edge; let it scroll
    NativeScroll(MovementDirection),
    /// No page in that direction (or unknown target)
    NoDestination,
    /// Destination is already active
    AlreadyActive,
    /// A transition started
    Transitioned(MovementDirection),
}

impl InputOutcome {
    pub fn transitioned(&self) -> bool {
        matches!(self, Self::Transitioned(_))
    }
}

/// Result of a touch move: the outcome plus whether the host should
/// suppress its default scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchOutcome {
    pub outcome: InputOutcome,
    pub prevent_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_prefers_legacy_wheel_delta() {
        let input = WheelInput {
            wheel_delta: Some(-120.0),
            delta_y: Some(3.0),
            ..Default::default()
        };
        assert_eq!(input.value(), -120.0);
    }

    #[test]
    fn test_value_from_delta_y_then_detail() {
        assert_eq!(WheelInput::vertical(40.0).value(), -40.0);
        let legacy = WheelInput {
            detail: Some(3.0),
            ..Default::default()
        };
        assert_eq!(legacy.value(), -3.0);
        assert_eq!(WheelInput::default().value(), 0.0);
    }

    #[test]
    fn test_wheel_direction_sign() {
        assert_eq!(wheel_direction(-120.0), Some(MovementDirection::Forward));
        assert_eq!(wheel_direction(0.5), Some(MovementDirection::Backward));
        assert_eq!(wheel_direction(0.0), None);
    }

    #[test]
    fn test_is_vertical() {
        assert!(WheelInput::vertical(10.0).is_vertical());
        assert!(!WheelInput::horizontal(10.0).is_vertical());
        let no_horizontal = WheelInput {
            detail: Some(3.0),
            ..Default::default()
        };
        assert!(no_horizontal.is_vertical());
        let legacy = WheelInput {
            wheel_delta: Some(-120.0),
            wheel_delta_x: Some(5.0),
            ..Default::default()
        };
        assert!(legacy.is_vertical());
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(PageKey::from_key_code(40), Some(PageKey::ArrowDown));
        assert_eq!(PageKey::from_key_code(36), Some(PageKey::Home));
        assert_eq!(PageKey::from_key_code(13), None);
    }

    #[test]
    fn test_key_direction() {
        assert_eq!(PageKey::PageDown.direction(), Some(MovementDirection::Forward));
        assert_eq!(PageKey::ArrowLeft.direction(), Some(MovementDirection::Backward));
        assert_eq!(PageKey::End.direction(), None);
    }

    #[test]
    fn test_target_conversions() {
        assert_eq!(Target::from(2), Target::Index(2));
        assert_eq!(Target::from("about"), Target::Anchor("about".into()));
    }
}

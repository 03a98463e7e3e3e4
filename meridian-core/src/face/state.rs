//! Face state machine
//!
//! Visibility (shown/hidden) and power mode (interactive/ambient) are
//! orthogonal. The redraw timer runs iff the face is shown and interactive;
//! every transition re-evaluates that predicate, and the render loop cancels
//! and reschedules rather than accumulating timers.

/// Whether the face surface is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Display power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Normal mode: full chrome, minute-aligned redraws
    Interactive,
    /// Low-power mode: background and time only, no redraw timer
    Ambient,
}

/// Events that drive face state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceEvent {
    /// The surface became visible
    SurfaceShown,
    /// The surface was hidden
    SurfaceHidden,
    /// The device entered ambient mode
    AmbientEntered,
    /// The device returned to interactive mode
    AmbientExited,
    /// The wall-clock zone offset changed (minutes east of UTC)
    ///
    /// Honored only while visible; the hidden face has no zone-change
    /// listener registered.
    ZoneOffsetChanged(i32),
}

/// Face engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceState {
    visibility: Visibility,
    mode: PowerMode,
    /// Panel reports limited bit depth in ambient mode
    low_bit_ambient: bool,
    /// Minutes east of UTC
    zone_offset_minutes: i32,
}

impl FaceState {
    /// Create the initial state: hidden, interactive
    pub const fn new(low_bit_ambient: bool, zone_offset_minutes: i32) -> Self {
        Self {
            visibility: Visibility::Hidden,
            mode: PowerMode::Interactive,
            low_bit_ambient,
            zone_offset_minutes,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: FaceEvent) -> Self {
        use FaceEvent::*;

        match event {
            SurfaceShown => Self {
                visibility: Visibility::Shown,
                ..self
            },
            SurfaceHidden => Self {
                visibility: Visibility::Hidden,
                ..self
            },
            AmbientEntered => Self {
                mode: PowerMode::Ambient,
                ..self
            },
            AmbientExited => Self {
                mode: PowerMode::Interactive,
                ..self
            },
            ZoneOffsetChanged(offset) => match self.visibility {
                Visibility::Shown => Self {
                    zone_offset_minutes: offset,
                    ..self
                },
                Visibility::Hidden => self,
            },
        }
    }

    /// Whether the minute-aligned redraw timer should be scheduled
    pub fn timer_should_run(&self) -> bool {
        self.visibility == Visibility::Shown && self.mode == PowerMode::Interactive
    }

    /// Whether the surface is visible
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    /// Whether the face is in ambient mode
    pub fn is_ambient(&self) -> bool {
        self.mode == PowerMode::Ambient
    }

    /// Whether ambient rendering is restricted to 1-bit styles
    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    /// Current zone offset in minutes east of UTC
    pub fn zone_offset_minutes(&self) -> i32 {
        self.zone_offset_minutes
    }
}

//! Per-frame scene composition
//!
//! `compose` turns face state, weather state, and the current wall-clock
//! instant into a `FaceScene`: everything the paint layer needs, with all
//! visibility rules already decided. Ambient frames carry only background
//! and time; interactive frames add date, divider, condition icon, and,
//! only when both temperatures are set, the high/low text.

use heapless::String;

use crate::clock::LocalTime;
use crate::face::state::FaceState;
use crate::format;
use crate::icon::Icon;
use crate::layout::Layout;
use crate::weather::WeatherState;

/// Frame background fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Background {
    /// Theme color fill (interactive mode)
    Theme,
    /// Pure black (ambient mode)
    Black,
}

/// How the time glyphs should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeStyle {
    /// Full-intensity interactive rendering
    Normal,
    /// Ambient on a panel that can dim
    Dimmed,
    /// Ambient on a panel restricted to 1-bit colors
    LowBit,
}

/// Date line placed on the frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLine {
    pub text: String<20>,
    pub x: i32,
    pub y: i32,
}

/// Divider line placed on the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divider {
    pub start_x: i32,
    pub end_x: i32,
    pub y: i32,
}

/// Condition icon placed on the frame
#[derive(Debug, Clone, Copy)]
pub struct IconAt<'a> {
    pub icon: &'a Icon,
    pub x: i32,
    pub y: i32,
}

/// High/low temperature text placed on the frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temps {
    pub high_text: String<16>,
    pub low_text: String<16>,
    pub high_x: i32,
    pub low_x: i32,
    pub y: i32,
}

/// A fully composed frame, ready to paint
#[derive(Debug, Clone)]
pub struct FaceScene<'a> {
    pub background: Background,
    pub time_text: String<8>,
    pub time_x: i32,
    pub time_y: i32,
    pub time_style: TimeStyle,
    pub date: Option<DateLine>,
    pub divider: Option<Divider>,
    pub icon: Option<IconAt<'a>>,
    pub temps: Option<Temps>,
}

/// Compose one frame
pub fn compose<'a>(
    state: &FaceState,
    weather: &'a WeatherState,
    now: &LocalTime,
    layout: &Layout,
) -> FaceScene<'a> {
    let ambient = state.is_ambient();

    let background = if ambient {
        Background::Black
    } else {
        Background::Theme
    };

    let time_style = if !ambient {
        TimeStyle::Normal
    } else if state.low_bit_ambient() {
        TimeStyle::LowBit
    } else {
        TimeStyle::Dimmed
    };

    let mut scene = FaceScene {
        background,
        time_text: format::time_text(now.hour, now.minute),
        time_x: layout.time_x,
        time_y: layout.time_y,
        time_style,
        date: None,
        divider: None,
        icon: None,
        temps: None,
    };

    if ambient {
        return scene;
    }

    scene.date = Some(DateLine {
        text: format::date_text(now),
        x: layout.date_x,
        y: layout.date_y,
    });

    scene.divider = Some(Divider {
        start_x: layout.divider_start_x,
        end_x: layout.divider_end_x,
        y: layout.divider_y,
    });

    scene.icon = weather.icon.as_ref().map(|icon| IconAt {
        icon,
        x: layout.icon_x,
        y: layout.icon_y,
    });

    // Both-or-nothing: a single received temperature renders no text at all
    if weather.has_both_temps() {
        scene.temps = Some(Temps {
            high_text: format::temp_text(weather.high),
            low_text: format::temp_text(weather.low),
            high_x: layout.high_x,
            low_x: layout.low_x,
            y: layout.temps_y,
        });
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::state::FaceEvent;
    use crate::layout::Shape;
    use crate::weather::TEMP_UNSET;
    use meridian_protocol::WeatherUpdate;

    fn shown_state() -> FaceState {
        FaceState::new(false, 0).transition(FaceEvent::SurfaceShown)
    }

    fn nine_oh_five() -> LocalTime {
        LocalTime {
            year: 2016,
            month: 3,
            day: 4,
            weekday: 5,
            hour: 9,
            minute: 5,
        }
    }

    fn layout() -> &'static Layout {
        Layout::for_shape(Shape::Round)
    }

    #[test]
    fn test_interactive_frame_has_full_chrome() {
        let mut weather = WeatherState::new();
        weather
            .apply(&WeatherUpdate {
                high: 25,
                low: 16,
                icon: None,
            })
            .unwrap();

        let scene = compose(&shown_state(), &weather, &nine_oh_five(), layout());

        assert_eq!(scene.background, Background::Theme);
        assert_eq!(scene.time_text.as_str(), "9:05");
        assert_eq!(scene.time_style, TimeStyle::Normal);
        assert_eq!(scene.date.unwrap().text.as_str(), "Fri, Mar 04 2016");
        assert!(scene.divider.is_some());

        let temps = scene.temps.unwrap();
        assert_eq!(temps.high_text.as_str(), "25\u{00B0}");
        assert_eq!(temps.low_text.as_str(), "16\u{00B0}");
    }

    #[test]
    fn test_ambient_frame_is_background_and_time_only() {
        let mut weather = WeatherState::new();
        weather
            .apply(&WeatherUpdate {
                high: 25,
                low: 16,
                icon: None,
            })
            .unwrap();

        let state = shown_state().transition(FaceEvent::AmbientEntered);
        let scene = compose(&state, &weather, &nine_oh_five(), layout());

        assert_eq!(scene.background, Background::Black);
        assert_eq!(scene.time_text.as_str(), "9:05");
        assert_eq!(scene.time_style, TimeStyle::Dimmed);
        assert!(scene.date.is_none());
        assert!(scene.divider.is_none());
        assert!(scene.icon.is_none());
        assert!(scene.temps.is_none());
    }

    #[test]
    fn test_low_bit_ambient_time_style() {
        let state = FaceState::new(true, 0)
            .transition(FaceEvent::SurfaceShown)
            .transition(FaceEvent::AmbientEntered);
        let weather = WeatherState::new();
        let scene = compose(&state, &weather, &nine_oh_five(), layout());
        assert_eq!(scene.time_style, TimeStyle::LowBit);
    }

    #[test]
    fn test_one_missing_temperature_renders_neither() {
        for (high, low) in [(25, TEMP_UNSET), (TEMP_UNSET, 16)] {
            let mut weather = WeatherState::new();
            weather
                .apply(&WeatherUpdate {
                    high,
                    low,
                    icon: None,
                })
                .unwrap();

            let scene = compose(&shown_state(), &weather, &nine_oh_five(), layout());
            assert!(scene.temps.is_none());
        }
    }

    #[test]
    fn test_negative_temps_render_signed() {
        let mut weather = WeatherState::new();
        weather
            .apply(&WeatherUpdate {
                high: -1,
                low: -12,
                icon: None,
            })
            .unwrap();

        let scene = compose(&shown_state(), &weather, &nine_oh_five(), layout());
        let temps = scene.temps.unwrap();
        assert_eq!(temps.high_text.as_str(), "-1\u{00B0}");
        assert_eq!(temps.low_text.as_str(), "-12\u{00B0}");
    }

    #[test]
    fn test_icon_appears_once_decoded() {
        let mut weather = WeatherState::new();
        let scene = compose(&shown_state(), &weather, &nine_oh_five(), layout());
        assert!(scene.icon.is_none());

        let mut icon_bytes = heapless::Vec::new();
        icon_bytes
            .extend_from_slice(&[2, 2, 0b1000_0000, 0b0100_0000])
            .unwrap();
        weather
            .apply(&WeatherUpdate {
                high: 1,
                low: 0,
                icon: Some(icon_bytes),
            })
            .unwrap();

        let scene = compose(&shown_state(), &weather, &nine_oh_five(), layout());
        let placed = scene.icon.unwrap();
        assert_eq!(placed.x, layout().icon_x);
        assert_eq!(placed.icon.width(), 2);
    }

    #[test]
    fn test_midnight_formats_as_zero_hour() {
        let time = LocalTime {
            hour: 0,
            minute: 0,
            ..nine_oh_five()
        };
        let weather = WeatherState::new();
        let scene = compose(&shown_state(), &weather, &time, layout());
        assert_eq!(scene.time_text.as_str(), "0:00");
    }
}

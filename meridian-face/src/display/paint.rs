//! Scene painting
//!
//! Turns a composed `FaceScene` into embedded-graphics draw calls. All
//! placement decisions were already made during composition; this layer only
//! maps scene elements to styles and primitives.

use embedded_graphics::mono_font::iso_8859_1::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use profont::PROFONT_24_POINT;

use meridian_core::face::{Background, FaceScene, TimeStyle};

/// Theme background fill (interactive mode)
const THEME_BLUE: Rgb565 = Rgb565::new(1, 21, 24);

/// Full-intensity text
const TEXT_WHITE: Rgb565 = Rgb565::WHITE;

/// Dimmed text for the date and low temperature
const TEXT_DIM: Rgb565 = Rgb565::new(24, 50, 26);

/// Ambient time on panels that can dim
const TIME_AMBIENT_GRAY: Rgb565 = Rgb565::new(18, 38, 18);

/// Divider line color
const DIVIDER_GRAY: Rgb565 = Rgb565::new(16, 34, 18);

/// Paint one frame into the target
pub fn paint<D>(target: &mut D, scene: &FaceScene) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let background = match scene.background {
        Background::Theme => THEME_BLUE,
        Background::Black => Rgb565::BLACK,
    };
    target.clear(background)?;

    let time_color = match scene.time_style {
        TimeStyle::Normal => TEXT_WHITE,
        TimeStyle::Dimmed => TIME_AMBIENT_GRAY,
        TimeStyle::LowBit => TEXT_WHITE,
    };
    Text::new(
        scene.time_text.as_str(),
        Point::new(scene.time_x, scene.time_y),
        MonoTextStyle::new(&PROFONT_24_POINT, time_color),
    )
    .draw(target)?;

    if let Some(date) = &scene.date {
        Text::new(
            date.text.as_str(),
            Point::new(date.x, date.y),
            MonoTextStyle::new(&FONT_10X20, TEXT_DIM),
        )
        .draw(target)?;
    }

    if let Some(divider) = &scene.divider {
        Line::new(
            Point::new(divider.start_x, divider.y),
            Point::new(divider.end_x, divider.y),
        )
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_GRAY, 1))
        .draw(target)?;
    }

    if let Some(placed) = &scene.icon {
        let icon = placed.icon;
        let origin = Point::new(placed.x, placed.y);
        target.draw_iter(
            (0..icon.height())
                .flat_map(|y| (0..icon.width()).map(move |x| (x, y)))
                .filter(|&(x, y)| icon.pixel(x, y))
                .map(|(x, y)| {
                    Pixel(origin + Point::new(x as i32, y as i32), TEXT_WHITE)
                }),
        )?;
    }

    if let Some(temps) = &scene.temps {
        Text::new(
            temps.high_text.as_str(),
            Point::new(temps.high_x, temps.y),
            MonoTextStyle::new(&FONT_10X20, TEXT_WHITE),
        )
        .draw(target)?;
        Text::new(
            temps.low_text.as_str(),
            Point::new(temps.low_x, temps.y),
            MonoTextStyle::new(&FONT_10X20, TEXT_DIM),
        )
        .draw(target)?;
    }

    Ok(())
}

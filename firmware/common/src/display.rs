//! Display collaborator and draw command execution.
//!
//! [`MenuDisplay`] is the small surface the engine needs from a screen.
//! [`GraphicsDisplay`] implements it for any embedded-graphics
//! [`DrawTarget`], which covers both the ST7789 framebuffer on the Pico 2 and
//! the SDL window of the simulator.

use embedded_graphics::geometry::Point;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use profont::{PROFONT_12_POINT, PROFONT_24_POINT};

use crate::colors::BACKGROUND;
use crate::view::{DrawCommand, TextSize};

// =============================================================================
// Styles (const - zero runtime cost)
// =============================================================================

/// Text is positioned by its top-left corner.
const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Menu rows, captions and hints.
pub const NORMAL_FONT: &MonoFont<'static> = &PROFONT_12_POINT;

/// Titles, header readings and edited values.
pub const LARGE_FONT: &MonoFont<'static> = &PROFONT_24_POINT;

#[inline]
pub const fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Normal => NORMAL_FONT,
        TextSize::Large => LARGE_FONT,
    }
}

// =============================================================================
// Display Trait
// =============================================================================

/// Output surface for the menu.
pub trait MenuDisplay {
    /// Fill the whole screen with the background color.
    fn clear(&mut self);

    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    );

    /// Draw `text` with its top-left corner at `position`.
    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        color: Rgb565,
        background: Option<Rgb565>,
        size: TextSize,
    );

    fn draw_line(
        &mut self,
        start: Point,
        end: Point,
        color: Rgb565,
    );

    /// Make everything drawn since the last call visible.
    fn present(&mut self);
}

/// Run a command list against a display, in order.
pub fn execute<D: MenuDisplay + ?Sized>(
    display: &mut D,
    commands: &[DrawCommand],
) {
    for command in commands {
        match command {
            DrawCommand::Clear => display.clear(),
            DrawCommand::FillRect { area, color } => display.fill_rect(*area, *color),
            DrawCommand::Text {
                position,
                text,
                color,
                background,
                size,
            } => display.draw_text(*position, text, *color, *background, *size),
            DrawCommand::Line { start, end, color } => display.draw_line(*start, *end, *color),
            DrawCommand::Present => display.present(),
        }
    }
}

// =============================================================================
// embedded-graphics Adaptor
// =============================================================================

/// [`MenuDisplay`] on top of an embedded-graphics draw target.
///
/// Drawing goes straight into the target. `present` only raises a flag; the
/// owner checks [`take_presented`](Self::take_presented) and pushes the
/// target to the panel or window when it is set.
pub struct GraphicsDisplay<D> {
    target: D,
    presented: bool,
}

impl<D> GraphicsDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(target: D) -> Self {
        Self {
            target,
            presented: false,
        }
    }

    #[inline]
    pub const fn target(&self) -> &D { &self.target }

    #[inline]
    pub fn target_mut(&mut self) -> &mut D { &mut self.target }

    pub fn into_inner(self) -> D { self.target }

    /// True once after each `present`.
    #[inline]
    pub fn take_presented(&mut self) -> bool { core::mem::take(&mut self.presented) }
}

impl<D> MenuDisplay for GraphicsDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self) { self.target.clear(BACKGROUND).ok(); }

    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        area.into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        color: Rgb565,
        background: Option<Rgb565>,
        size: TextSize,
    ) {
        let builder = MonoTextStyleBuilder::new().font(font(size)).text_color(color);
        let style = match background {
            Some(bg) => builder.background_color(bg).build(),
            None => builder.build(),
        };
        Text::with_text_style(text, position, style, TOP_LEFT)
            .draw(&mut self.target)
            .ok();
    }

    fn draw_line(
        &mut self,
        start: Point,
        end: Point,
        color: Rgb565,
    ) {
        Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .ok();
    }

    fn present(&mut self) { self.presented = true; }
}

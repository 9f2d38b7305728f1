//! Menu renderer.
//!
//! [`ViewRenderer::render`] turns the current menu state into a list of
//! [`DrawCommand`]s. The commands are plain data, so the renderer can be
//! checked in tests without a display and executed later by any
//! [`MenuDisplay`](crate::display::MenuDisplay).
//!
//! # Redraw Zones
//!
//! | Zone | Contents | Redrawn when |
//! |------|----------|--------------|
//! | Header (top half) | Moisture, clock, divider | Displayed moisture or time changes |
//! | Menu (bottom half) | Title and visible rows, or the edit page | Selection, scroll, cursor, item values, page or flash phase changes |
//!
//! A dirty zone is filled with the background and redrawn. After a full
//! screen takeover (status overlay, first frame) both zones are redrawn from
//! a cleared screen.
//!
//! # Flashing
//!
//! The flash phase advances once per render call, independent of input. The
//! selected row alternates white/red in Browse. The edited value alternates
//! white/black in Edit. The phase restarts (visible) on every page change.

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use crate::colors::{BACKGROUND, BLACK, GRAY, RED, WHITE, YELLOW};
use crate::config::TEXT_LEN;
use crate::config::layout::{
    CLOCK_POS,
    DIVIDER_Y,
    EDIT_CAPTION_POS,
    EDIT_RULE_Y,
    EDIT_VALUE_POS,
    HEADER_ZONE,
    MENU_FIRST_ROW_Y,
    MENU_ROW_HEIGHT,
    MENU_TITLE_POS,
    MENU_ZONE,
    MOISTURE_POS,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    TEXT_X,
};
use crate::config::timing::FLASH_PERIOD_TICKS;
use crate::error::InitError;
use crate::menu::{MenuStateMachine, Page};
use crate::peripherals::Readout;
use crate::registry::ItemRegistry;

/// Capacity of a single frame's command list.
pub const DRAW_LIST_LEN: usize = 24;

// =============================================================================
// Draw Commands
// =============================================================================

/// Font size of a text command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

/// One display operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    /// Fill the whole screen with the background color.
    Clear,
    FillRect {
        area: Rectangle,
        color: Rgb565,
    },
    /// Text with its top-left corner at `position`.
    Text {
        position: Point,
        text: String<TEXT_LEN>,
        color: Rgb565,
        background: Option<Rgb565>,
        size: TextSize,
    },
    Line {
        start: Point,
        end: Point,
        color: Rgb565,
    },
    /// Make everything drawn so far visible.
    Present,
}

impl DrawCommand {
    /// Text command, truncated to [`TEXT_LEN`] bytes on a char boundary.
    pub fn text(
        position: Point,
        text: &str,
        color: Rgb565,
        size: TextSize,
    ) -> Self {
        let mut owned = String::new();
        for c in text.chars() {
            if owned.push(c).is_err() {
                break;
            }
        }
        Self::Text {
            position,
            text: owned,
            color,
            background: None,
            size,
        }
    }

    /// Same command with an opaque text background.
    #[must_use]
    pub fn on(
        self,
        bg: Rgb565,
    ) -> Self {
        match self {
            Self::Text {
                position,
                text,
                color,
                size,
                ..
            } => Self::Text {
                position,
                text,
                color,
                background: Some(bg),
                size,
            },
            other => other,
        }
    }

    /// Text payload, if this is a text command.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Commands for one frame.
pub type DrawList = Vec<DrawCommand, DRAW_LIST_LEN>;

#[inline]
pub(crate) fn push(
    list: &mut DrawList,
    command: DrawCommand,
) {
    // A full list only loses trailing detail; Present is always reserved.
    if list.len() + 1 < DRAW_LIST_LEN || command == DrawCommand::Present {
        list.push(command).ok();
    }
}

// =============================================================================
// Flash Cadence
// =============================================================================

/// Blink phase for the selected row / edited value.
#[derive(Clone, Copy, Debug)]
pub struct FlashState {
    counter: u32,
    period: u32,
    visible: bool,
}

impl FlashState {
    /// Phase flips every `period` calls to [`advance`](Self::advance).
    pub const fn new(period: u32) -> Self {
        Self {
            counter: 0,
            period: if period == 0 { 1 } else { period },
            visible: true,
        }
    }

    /// Count one render. Returns the phase to draw with.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
            self.visible = !self.visible;
        }
        self.visible
    }

    /// Restart in the visible phase.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.visible = true;
    }

    #[inline]
    pub const fn visible(&self) -> bool { self.visible }
}

impl Default for FlashState {
    fn default() -> Self { Self::new(FLASH_PERIOD_TICKS) }
}

// =============================================================================
// Render State Tracking
// =============================================================================

/// Everything the menu zone depends on. Equal snapshots mean equal pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MenuSnapshot {
    page: Page,
    selected: usize,
    viewport_start: usize,
    cursor: Option<i32>,
    revision: u32,
    flash_visible: bool,
}

/// Tracks what is on screen for conditional redraws.
#[derive(Clone, Copy, Debug)]
struct RenderState {
    /// Screen content is unknown (first frame or after an overlay).
    full_redraw: bool,
    prev_header: Option<Readout>,
    prev_menu: Option<MenuSnapshot>,
}

impl RenderState {
    const fn new() -> Self {
        Self {
            full_redraw: true,
            prev_header: None,
            prev_menu: None,
        }
    }

    fn mark_display_cleared(&mut self) {
        self.full_redraw = true;
        self.prev_header = None;
        self.prev_menu = None;
    }

    fn check_header_dirty(
        &mut self,
        readout: Readout,
    ) -> bool {
        let dirty = self.full_redraw || self.prev_header != Some(readout);
        self.prev_header = Some(readout);
        dirty
    }

    fn check_menu_dirty(
        &mut self,
        snapshot: MenuSnapshot,
    ) -> bool {
        let dirty = self.full_redraw || self.prev_menu != Some(snapshot);
        self.prev_menu = Some(snapshot);
        dirty
    }

    fn end_frame(&mut self) { self.full_redraw = false; }
}

// =============================================================================
// Renderer
// =============================================================================

/// Produces draw commands for the header and menu zones.
pub struct ViewRenderer {
    flash: FlashState,
    state: RenderState,
    /// Page of the last render. Survives `invalidate`, so leaving Edit
    /// behind an overlay still restarts the flash.
    last_page: Option<Page>,
}

impl ViewRenderer {
    pub const fn new(flash_period: u32) -> Self {
        Self {
            flash: FlashState::new(flash_period),
            state: RenderState::new(),
            last_page: None,
        }
    }

    #[inline]
    pub const fn flash(&self) -> &FlashState { &self.flash }

    /// Forget what is on screen. The next frame starts with a clear.
    pub fn invalidate(&mut self) { self.state.mark_display_cleared(); }

    /// Commands bringing the screen up to date. Empty when nothing changed.
    pub fn render(
        &mut self,
        machine: &MenuStateMachine,
        registry: &ItemRegistry,
        readout: &Readout,
    ) -> DrawList {
        let nav = machine.state();
        if self.last_page.is_some_and(|page| page != nav.page()) {
            self.flash.reset();
        }
        self.last_page = Some(nav.page());
        let flash_visible = self.flash.advance();

        let snapshot = MenuSnapshot {
            page: nav.page(),
            selected: nav.selected(),
            viewport_start: nav.viewport_start(),
            cursor: machine.edit_cursor(),
            revision: registry.revision(),
            flash_visible,
        };

        let full = self.state.full_redraw;
        let header_dirty = self.state.check_header_dirty(*readout);
        let menu_dirty = self.state.check_menu_dirty(snapshot);
        self.state.end_frame();

        let mut list = DrawList::new();
        if full {
            push(&mut list, DrawCommand::Clear);
        }
        if header_dirty {
            if !full {
                push(&mut list, DrawCommand::FillRect { area: HEADER_ZONE, color: BACKGROUND });
            }
            draw_header(&mut list, readout);
        }
        if menu_dirty {
            if !full {
                push(&mut list, DrawCommand::FillRect { area: MENU_ZONE, color: BACKGROUND });
            }
            match nav.page() {
                Page::Browse => draw_browse(&mut list, machine, registry, flash_visible),
                Page::Edit => draw_edit(&mut list, machine, registry, flash_visible),
            }
        }
        if !list.is_empty() {
            push(&mut list, DrawCommand::Present);
        }
        list
    }
}

impl Default for ViewRenderer {
    fn default() -> Self { Self::new(FLASH_PERIOD_TICKS) }
}

fn draw_header(
    list: &mut DrawList,
    readout: &Readout,
) {
    let mut line: String<TEXT_LEN> = String::new();
    core::fmt::write(&mut line, format_args!("Moisture: {}", readout.moisture)).ok();
    push(list, DrawCommand::text(MOISTURE_POS, &line, WHITE, TextSize::Large));
    push(list, DrawCommand::text(CLOCK_POS, &readout.time.hhmm(), WHITE, TextSize::Large));
    push(
        list,
        DrawCommand::Line {
            start: Point::new(0, DIVIDER_Y),
            end: Point::new(SCREEN_WIDTH as i32 - 1, DIVIDER_Y),
            color: GRAY,
        },
    );
}

fn draw_browse(
    list: &mut DrawList,
    machine: &MenuStateMachine,
    registry: &ItemRegistry,
    flash_visible: bool,
) {
    let nav = machine.state();
    push(list, DrawCommand::text(MENU_TITLE_POS, "MAIN MENU", YELLOW, TextSize::Large));

    for (row, index) in nav.visible_range(registry.count()).enumerate() {
        let y = MENU_FIRST_ROW_Y + row as i32 * MENU_ROW_HEIGHT;
        let selected = index == nav.selected();
        let mut line: String<TEXT_LEN> = String::new();
        line.push_str(if selected { "> " } else { "  " }).ok();
        line.push_str(&registry.label(index)).ok();
        let color = if selected && !flash_visible { RED } else { WHITE };
        push(list, DrawCommand::text(Point::new(TEXT_X, y), &line, color, TextSize::Normal));
    }
}

fn draw_edit(
    list: &mut DrawList,
    machine: &MenuStateMachine,
    registry: &ItemRegistry,
    flash_visible: bool,
) {
    let Some(mut item) = registry.get(machine.state().selected()).copied() else {
        return;
    };
    item.value = machine.edit_cursor().unwrap_or(item.value);

    push(list, DrawCommand::text(MENU_TITLE_POS, item.name, YELLOW, TextSize::Large));
    push(
        list,
        DrawCommand::Line {
            start: Point::new(TEXT_X, EDIT_RULE_Y),
            end: Point::new(SCREEN_WIDTH as i32 - TEXT_X, EDIT_RULE_Y),
            color: GRAY,
        },
    );
    push(list, DrawCommand::text(EDIT_CAPTION_POS, "Value", GRAY, TextSize::Normal));
    let color = if flash_visible { WHITE } else { BLACK };
    push(
        list,
        DrawCommand::text(EDIT_VALUE_POS, &item.value_text(), color, TextSize::Large).on(BACKGROUND),
    );
}

// =============================================================================
// Fatal Diagnostic
// =============================================================================

/// Full screen halt message for a start-up failure.
pub fn render_fatal(error: InitError) -> DrawList {
    let mut list = DrawList::new();
    push(&mut list, DrawCommand::Clear);
    push(&mut list, DrawCommand::text(Point::new(TEXT_X, 16), "ERROR", RED, TextSize::Large));
    push(&mut list, DrawCommand::text(Point::new(TEXT_X, 64), error.message(), RED, TextSize::Normal));
    push(
        &mut list,
        DrawCommand::text(
            Point::new(TEXT_X, SCREEN_HEIGHT as i32 - 32),
            "System halted",
            GRAY,
            TextSize::Normal,
        ),
    );
    push(&mut list, DrawCommand::Present);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::peripherals::TimeOfDay;
    use crate::registry::MenuItem;

    fn registry() -> ItemRegistry {
        let mut reg = ItemRegistry::new();
        reg.push(MenuItem::integer(0, "Volume", 0, 100, 50)).unwrap();
        reg.push(MenuItem::boolean(1, "Light", true)).unwrap();
        reg.push(MenuItem::integer(2, "Speed", 0, 255, 0)).unwrap();
        reg.push(MenuItem::status(3, "Moisture", 0)).unwrap();
        reg
    }

    fn readout() -> Readout {
        Readout {
            moisture: 512,
            time: TimeOfDay::new(9, 30),
        }
    }

    fn texts(list: &DrawList) -> heapless::Vec<&str, DRAW_LIST_LEN> {
        list.iter().filter_map(DrawCommand::as_text).collect()
    }

    fn text_color(
        list: &DrawList,
        prefix: &str,
    ) -> Option<Rgb565> {
        list.iter().find_map(|cmd| match cmd {
            DrawCommand::Text { text, color, .. } if text.starts_with(prefix) => Some(*color),
            _ => None,
        })
    }

    #[test]
    fn test_flash_state_toggles_on_period() {
        let mut flash = FlashState::new(3);
        assert!(flash.advance());
        assert!(flash.advance());
        assert!(!flash.advance());
        assert!(!flash.advance());
        flash.reset();
        assert!(flash.visible());
    }

    #[test]
    fn test_first_frame_is_full_redraw() {
        let reg = registry();
        let machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(100);
        let list = view.render(&machine, &reg, &readout());
        assert_eq!(list.first(), Some(&DrawCommand::Clear));
        assert_eq!(list.last(), Some(&DrawCommand::Present));
        let t = texts(&list);
        assert!(t.contains(&"Moisture: 512"));
        assert!(t.contains(&"09:30"));
        assert!(t.contains(&"MAIN MENU"));
        assert!(t.contains(&"> Volume: 50"));
        assert!(t.contains(&"  Light: ON"));
        assert!(t.contains(&"  Speed: 0"));
        // only the viewport is drawn
        assert!(!t.iter().any(|s| s.contains("Moisture: 0")));
    }

    #[test]
    fn test_unchanged_frame_draws_nothing() {
        let reg = registry();
        let machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(100);
        view.render(&machine, &reg, &readout());
        assert!(view.render(&machine, &reg, &readout()).is_empty());
    }

    #[test]
    fn test_selection_change_redraws_menu_zone_only() {
        let mut reg = registry();
        let mut machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(100);
        view.render(&machine, &reg, &readout());
        machine.apply(InputEvent::step(1), &mut reg);
        let list = view.render(&machine, &reg, &readout());
        assert_eq!(list[0], DrawCommand::FillRect { area: MENU_ZONE, color: BACKGROUND });
        assert!(!list.iter().any(|c| matches!(c, DrawCommand::FillRect { area, .. } if *area == HEADER_ZONE)));
        assert!(texts(&list).contains(&"> Light: ON"));
    }

    #[test]
    fn test_header_change_redraws_header_zone_only() {
        let reg = registry();
        let machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(100);
        view.render(&machine, &reg, &readout());
        let later = Readout {
            time: TimeOfDay::new(9, 31),
            ..readout()
        };
        let list = view.render(&machine, &reg, &later);
        assert_eq!(list[0], DrawCommand::FillRect { area: HEADER_ZONE, color: BACKGROUND });
        assert!(texts(&list).contains(&"09:31"));
        assert!(!texts(&list).contains(&"MAIN MENU"));
    }

    #[test]
    fn test_selected_row_flashes_red() {
        let reg = registry();
        let machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(2);
        let first = view.render(&machine, &reg, &readout());
        assert_eq!(text_color(&first, "> "), Some(WHITE));
        let second = view.render(&machine, &reg, &readout());
        assert_eq!(text_color(&second, "> "), Some(RED));
        assert_eq!(text_color(&second, "  Light"), Some(WHITE));
    }

    #[test]
    fn test_edit_page_layout_and_flash_reset() {
        let mut reg = registry();
        let mut machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(2);
        view.render(&machine, &reg, &readout());
        view.render(&machine, &reg, &readout());
        assert!(!view.flash().visible());

        machine.apply(InputEvent::click(), &mut reg);
        let list = view.render(&machine, &reg, &readout());
        let t = texts(&list);
        assert!(t.contains(&"Volume"));
        assert!(t.contains(&"Value"));
        assert!(t.contains(&"50"));
        // page change restarts the flash in the visible phase
        assert_eq!(text_color(&list, "50"), Some(WHITE));

        let list = view.render(&machine, &reg, &readout());
        assert_eq!(text_color(&list, "50"), Some(BLACK));
    }

    #[test]
    fn test_edit_shows_cursor_not_stored_value() {
        let mut reg = registry();
        let mut machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(100);
        machine.apply(InputEvent::click(), &mut reg);
        machine.apply(InputEvent::step(1), &mut reg);
        let list = view.render(&machine, &reg, &readout());
        assert!(texts(&list).contains(&"51"));
        assert_eq!(reg.get(0).unwrap().value, 50);
    }

    #[test]
    fn test_invalidate_forces_clear() {
        let reg = registry();
        let machine = MenuStateMachine::new(3);
        let mut view = ViewRenderer::new(100);
        view.render(&machine, &reg, &readout());
        view.invalidate();
        let list = view.render(&machine, &reg, &readout());
        assert_eq!(list.first(), Some(&DrawCommand::Clear));
        assert!(texts(&list).contains(&"MAIN MENU"));
    }

    #[test]
    fn test_render_fatal_shows_message() {
        let list = render_fatal(InitError::ClockNotFound);
        assert_eq!(list.first(), Some(&DrawCommand::Clear));
        assert_eq!(text_color(&list, "Couldn't find RTC"), Some(RED));
        assert_eq!(list.last(), Some(&DrawCommand::Present));
    }

    #[test]
    fn test_text_truncates_to_capacity() {
        let long = "abcdefghijklmnopqrstuvwxyz0123456789ABCDEF";
        let cmd = DrawCommand::text(Point::zero(), long, WHITE, TextSize::Normal);
        assert_eq!(cmd.as_text().map(str::len), Some(TEXT_LEN));
    }
}

//! The menu loop.
//!
//! [`MenuEngine::tick`] runs one iteration of the cooperative main loop:
//!
//! 1. Every `HEADER_REFRESH_TICKS`, sample the clock and moisture sensor
//! 2. Poll the input source once
//! 3. If an overlay is up: a click dismisses it, otherwise count it down
//! 4. Otherwise apply the input to the state machine and react to the
//!    resulting [`MenuAction`] (actuators, overlays, event log)
//! 5. Draw the overlay or the changed menu zones
//!
//! The engine owns the registry, the navigation state and the collaborators.
//! Nothing in here is global; the firmware and the simulator each build one
//! engine and call `tick` on a fixed period.

use crate::config::timing::{HEADER_REFRESH_TICKS, STATUS_DURATION_TICKS, VALUE_SET_TICKS};
use crate::config::VIEWPORT_SIZE;
use crate::display::{MenuDisplay, execute};
use crate::error::InitError;
use crate::input::InputSource;
use crate::log::EventLog;
use crate::menu::{MenuAction, MenuStateMachine, NavigationState};
pub use crate::peripherals::{Actuators, Clock, MoistureSensor, Readout, TimeOfDay};
use crate::registry::{Action, Binding, ItemRegistry};
use crate::status::{OverlayTick, StatusPresenter};
use crate::view::ViewRenderer;

/// Menu engine wired to its hardware collaborators.
pub struct MenuEngine<C, S, A> {
    registry: ItemRegistry,
    machine: MenuStateMachine,
    view: ViewRenderer,
    status: StatusPresenter,
    clock: C,
    sensor: S,
    actuators: A,
    readout: Readout,
    ticks: u32,
    log: EventLog,
}

impl<C, S, A> MenuEngine<C, S, A>
where
    C: Clock,
    S: MoistureSensor,
    A: Actuators,
{
    /// Build the engine and push bound item values to the actuators.
    pub fn new(
        registry: ItemRegistry,
        clock: C,
        sensor: S,
        actuators: A,
    ) -> Result<Self, InitError> {
        if registry.is_empty() {
            return Err(InitError::RegistryEmpty);
        }
        let mut engine = Self {
            registry,
            machine: MenuStateMachine::new(VIEWPORT_SIZE),
            view: ViewRenderer::default(),
            status: StatusPresenter::new(),
            clock,
            sensor,
            actuators,
            readout: Readout::default(),
            ticks: 0,
            log: EventLog::new(),
        };
        engine.apply_outputs();
        engine.refresh_readout();
        info!("menu ready: {} items", engine.registry.count());
        engine.log.record(format_args!("Menu ready ({} items)", engine.registry.count()));
        Ok(engine)
    }

    #[inline]
    pub const fn registry(&self) -> &ItemRegistry { &self.registry }

    #[inline]
    pub const fn state(&self) -> &NavigationState { self.machine.state() }

    #[inline]
    pub const fn machine(&self) -> &MenuStateMachine { &self.machine }

    #[inline]
    pub const fn status(&self) -> &StatusPresenter { &self.status }

    #[inline]
    pub const fn readout(&self) -> Readout { self.readout }

    #[inline]
    pub fn log_mut(&mut self) -> &mut EventLog { &mut self.log }

    #[inline]
    pub fn actuators(&self) -> &A { &self.actuators }

    /// Run one loop iteration.
    pub fn tick<I, D>(
        &mut self,
        input: &mut I,
        display: &mut D,
    ) where
        I: InputSource + ?Sized,
        D: MenuDisplay + ?Sized,
    {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks.is_multiple_of(HEADER_REFRESH_TICKS) {
            self.refresh_readout();
        }

        let event = input.poll();

        if self.status.is_active() {
            let finished = if event.clicked {
                self.status.dismiss();
                self.log.push("Status closed");
                true
            } else {
                self.status.tick() == OverlayTick::Finished
            };
            if finished {
                self.view.invalidate();
            } else {
                execute(display, &self.status.draw(&self.registry));
                return;
            }
        } else {
            let action = self.machine.apply(event, &mut self.registry);
            self.handle(action);
            if self.status.is_active() {
                execute(display, &self.status.draw(&self.registry));
                return;
            }
        }

        let frame = self.view.render(&self.machine, &self.registry, &self.readout);
        execute(display, &frame);
    }

    fn handle(
        &mut self,
        action: MenuAction,
    ) {
        match action {
            MenuAction::None => {}
            MenuAction::Moved { from, to } => {
                debug!("select {} -> {}", from, to);
            }
            MenuAction::Toggled { index, value } => {
                self.log.record(format_args!("{}", self.registry.label(index)));
                debug!("toggle {} = {}", index, value);
                self.apply_output(index);
            }
            MenuAction::EnterEdit { index, cursor } => {
                let name = self.item_name(index);
                self.log.record(format_args!("Edit {name} ({cursor})"));
            }
            MenuAction::CursorMoved { index, cursor } => {
                // live preview for bound outputs, committed or not
                if let Some(binding) = self.registry.get(index).and_then(|item| item.binding) {
                    Self::drive(&mut self.actuators, binding, cursor);
                }
            }
            MenuAction::Committed { index, value } => {
                let name = self.item_name(index);
                self.log.record(format_args!("{name} = {value}"));
                info!("commit {} = {}", index, value);
                self.apply_output(index);
                self.status.confirm(index, value, VALUE_SET_TICKS);
            }
            MenuAction::ShowStatus { index } => {
                let name = self.item_name(index);
                self.log.record(format_args!("Show {name}"));
                self.status.present(index, STATUS_DURATION_TICKS);
            }
            MenuAction::Performed { index, action } => match action {
                Action::ResetDefaults => {
                    warn!("defaults restored by item {}", index);
                    self.log.push("Defaults restored");
                    self.apply_outputs();
                }
            },
        }
    }

    fn item_name(
        &self,
        index: usize,
    ) -> &'static str {
        self.registry.get(index).map_or("?", |item| item.name)
    }

    /// Sample the header sources and publish bound readings.
    fn refresh_readout(&mut self) {
        let moisture = self.sensor.read();
        self.readout = Readout {
            moisture,
            time: self.clock.now(),
        };
        self.registry.update_reading(Binding::Moisture, moisture);
    }

    /// Push one item's stored value to its output, if bound.
    fn apply_output(
        &mut self,
        index: usize,
    ) {
        if let Some(item) = self.registry.get(index)
            && let Some(binding) = item.binding
        {
            Self::drive(&mut self.actuators, binding, item.value);
        }
    }

    /// Push every bound value to the outputs.
    fn apply_outputs(&mut self) {
        for (binding, value) in self.registry.bound_values() {
            Self::drive(&mut self.actuators, binding, value);
        }
    }

    fn drive(
        actuators: &mut A,
        binding: Binding,
        value: i32,
    ) {
        match binding {
            Binding::Backlight => actuators.set_backlight(value != 0),
            Binding::Contrast => actuators.set_contrast(value.clamp(0, 100) as u8),
            Binding::Moisture => {}
        }
    }
}

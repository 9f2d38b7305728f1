//! Properties that must hold for any input sequence.

mod support;

use menu_common::registry::{ItemRegistry, MenuItem};
use menu_common::{InputEvent, MenuStateMachine, Page};
use support::Lcg;

const NAMES: [&str; 12] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];

fn integers(count: usize) -> ItemRegistry {
    let mut reg = ItemRegistry::new();
    for (i, name) in NAMES.into_iter().take(count).enumerate() {
        reg.push(MenuItem::integer(i as u8, name, -50, 50, 0)).unwrap();
    }
    reg
}

#[test]
fn test_browse_selection_and_viewport_invariants() {
    let mut rng = Lcg::new(0x5eed);
    for count in 1..=NAMES.len() {
        for size in 1..=4 {
            let mut reg = integers(count);
            let mut machine = MenuStateMachine::new(size);
            for _ in 0..400 {
                let step = rng.range(-9, 9);
                let before = machine.state().selected();
                machine.apply(InputEvent::step(step), &mut reg);
                let nav = machine.state();
                let after = nav.selected();

                assert_eq!(nav.page(), Page::Browse);
                assert!(after < count);
                let expected = (before as i32 + step.signum()).clamp(0, count as i32 - 1) as usize;
                assert_eq!(after, expected, "count={count} size={size} step={step}");

                let start = nav.viewport_start();
                assert!(start <= after && after < start + size);
                assert!(start <= count.saturating_sub(size));
            }
        }
    }
}

#[test]
fn test_edit_cursor_stays_in_range() {
    let mut rng = Lcg::new(42);
    let mut reg = ItemRegistry::new();
    reg.push(MenuItem::integer(0, "Level", 0, 20, 10)).unwrap();
    let mut machine = MenuStateMachine::new(3);
    machine.apply(InputEvent::click(), &mut reg);
    for _ in 0..500 {
        let before = machine.edit_cursor().unwrap();
        let step = rng.range(-3, 3);
        machine.apply(InputEvent::step(step), &mut reg);
        let after = machine.edit_cursor().unwrap();
        assert!((0..=20).contains(&after));
        assert_eq!(after, (before + step.signum()).clamp(0, 20));
    }
}

#[test]
fn test_clamp_law() {
    let mut rng = Lcg::new(7);
    let mut reg = integers(1);
    for _ in 0..500 {
        let v = rng.range(-1000, 1000);
        reg.set_value(0, v);
        assert_eq!(reg.get(0).unwrap().value, v.clamp(-50, 50));
    }
}

#[test]
fn test_toggle_law() {
    let mut reg = ItemRegistry::new();
    reg.push(MenuItem::boolean(0, "A", false)).unwrap();
    reg.push(MenuItem::boolean(1, "B", true)).unwrap();
    for index in 0..2 {
        let before = reg.clone();
        reg.toggle(index);
        assert_ne!(reg.get(index), before.get(index));
        reg.toggle(index);
        assert_eq!(reg.get(index), before.get(index));
    }
}

#[test]
fn test_commit_is_idempotent() {
    let mut reg = integers(3);
    let mut machine = MenuStateMachine::new(3);
    let commit = |machine: &mut MenuStateMachine, reg: &mut ItemRegistry| {
        machine.apply(InputEvent::click(), reg);
        machine.apply(InputEvent::step(1), reg);
        machine.apply(InputEvent::step(-1), reg);
        machine.apply(InputEvent::click(), reg);
    };

    machine.apply(InputEvent::click(), &mut reg);
    for _ in 0..7 {
        machine.apply(InputEvent::step(1), &mut reg);
    }
    machine.apply(InputEvent::click(), &mut reg);
    let once = reg.clone();

    commit(&mut machine, &mut reg);
    assert_eq!(reg, once);
    commit(&mut machine, &mut reg);
    assert_eq!(reg, once);
    assert_eq!(once.get(0).unwrap().value, 7);
}

#[test]
fn test_mixed_input_never_breaks_invariants() {
    let choices: &'static [&'static str] = &["X", "Y", "Z"];
    let mut reg = ItemRegistry::new();
    reg.push(MenuItem::integer(0, "I", 0, 9, 5)).unwrap();
    reg.push(MenuItem::boolean(1, "B", false)).unwrap();
    reg.push(MenuItem::choice(2, "E", choices, 1)).unwrap();
    reg.push(MenuItem::status(3, "S", 0)).unwrap();
    reg.push(MenuItem::integer(4, "J", -5, 5, 0)).unwrap();

    let mut rng = Lcg::new(0xdead_beef);
    let mut machine = MenuStateMachine::new(3);
    for _ in 0..2000 {
        let event = InputEvent {
            step: rng.range(-2, 2),
            clicked: rng.range(0, 5) == 0,
        };
        machine.apply(event, &mut reg);

        let nav = machine.state();
        assert!(nav.selected() < reg.count());
        assert!(nav.viewport_start() <= nav.selected());
        assert!(nav.selected() < nav.viewport_start() + nav.viewport_size());
        for i in 0..reg.count() {
            let item = reg.get(i).unwrap();
            assert_eq!(item.clamp(item.value), item.value, "{} out of range", item.name);
        }
        if let Some(cursor) = machine.edit_cursor() {
            let item = reg.get(nav.selected()).unwrap();
            assert!(item.is_editable());
            assert_eq!(item.clamp(cursor), cursor);
        }
    }
}

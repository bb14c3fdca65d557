#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::config::DesktopConfig;
    use crate::core::desktop::{Desktop, DesktopEvent};
    use crate::core::errors::CoreError;
    use crate::core::input::{DragMode, InputEvent, SessionState};
    use crate::core::render::RecordingContext;
    use crate::core::widgets::{button, label, slider, Action, ButtonStyle, ValueCallback, WidgetState};
    use crate::core::window::{Anchors, Role, WindowId};
    use crate::platform::StubPlatform;
    use crate::util::geometry::{Point, Rect, Size};

    fn desktop() -> (Desktop, Rc<Cell<u64>>) {
        let platform = StubPlatform::new();
        let repaints = platform.repaint_counter();
        (Desktop::new(DesktopConfig::default(), Box::new(platform)), repaints)
    }

    fn click(desktop: &mut Desktop, x: f64, y: f64) {
        desktop.pressed(x, y).unwrap();
        desktop.released(x, y).unwrap();
    }

    fn counting_button(desktop: &mut Desktop, window: WindowId, clicks: &Rc<Cell<u32>>) -> WindowId {
        let clicks = Rc::clone(clicks);
        desktop
            .attach_child(
                window,
                button(
                    Rect::new(10.0, 30.0, 80.0, 24.0),
                    "Ok",
                    Anchors::TOP | Anchors::LEFT,
                    "OK",
                    ButtonStyle::default(),
                    Some(Action::new(move |_, _| clicks.set(clicks.get() + 1))),
                ),
            )
            .unwrap()
    }

    #[test]
    fn test_title_drag_moves_window() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 10.0, 200.0, 150.0, "Notes").unwrap();
        desktop.take_events();

        desktop.pressed(110.0, 12.0).unwrap();
        assert_eq!(desktop.session().state(), SessionState::Pressed(DragMode::Move));
        assert_eq!(desktop.session().grab().unwrap().offset, (10.0, 2.0));

        desktop.dragged(200.0, 80.0).unwrap();
        assert_eq!(desktop.session().state(), SessionState::DraggingMove);
        desktop.released(200.0, 80.0).unwrap();

        assert_eq!(desktop.tree().node(window).unwrap().origin(), Point::new(190.0, 78.0));
        assert_eq!(desktop.session().state(), SessionState::Idle);
        assert!(desktop.take_events().contains(&DesktopEvent::WindowMoved {
            window,
            x: 190.0,
            y: 78.0
        }));
    }

    #[test]
    fn test_move_off_screen_is_rejected() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 10.0, 200.0, 150.0, "Notes").unwrap();

        desktop.pressed(110.0, 12.0).unwrap();
        desktop.dragged(110.0, -20.0).unwrap();
        assert_eq!(desktop.tree().node(window).unwrap().origin(), Point::new(100.0, 10.0));

        desktop.dragged(200.0, 80.0).unwrap();
        desktop.released(200.0, 80.0).unwrap();
        assert_eq!(desktop.tree().node(window).unwrap().origin(), Point::new(190.0, 78.0));
    }

    #[test]
    fn test_corner_drag_resizes_window() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Notes").unwrap();

        desktop.pressed(295.0, 245.0).unwrap();
        assert_eq!(desktop.session().state(), SessionState::Pressed(DragMode::Resize));
        desktop.dragged(335.0, 285.0).unwrap();
        assert_eq!(desktop.session().state(), SessionState::DraggingResize);
        assert_eq!(desktop.tree().node(window).unwrap().size(), Size::new(240.0, 190.0));

        let bar = desktop.tree().find_child_by_role(window, Role::TitleBar).unwrap();
        assert_eq!(desktop.tree().node(bar).unwrap().width, 240.0);

        desktop.dragged(100.0, 100.0).unwrap();
        desktop.released(100.0, 100.0).unwrap();
        assert_eq!(desktop.tree().node(window).unwrap().size(), Size::new(80.0, 40.0));
        assert_eq!(desktop.tree().node(window).unwrap().origin(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_click_versus_drag() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Notes").unwrap();
        let clicks = Rc::new(Cell::new(0));
        counting_button(&mut desktop, window, &clicks);

        // within tolerance
        desktop.pressed(120.0, 140.0).unwrap();
        desktop.released(121.0, 141.0).unwrap();
        assert_eq!(clicks.get(), 1);

        // wandered away and came back
        desktop.pressed(120.0, 140.0).unwrap();
        desktop.dragged(130.0, 140.0).unwrap();
        desktop.dragged(120.0, 140.0).unwrap();
        desktop.released(120.0, 140.0).unwrap();
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_button_visual_states() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Notes").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let ok = counting_button(&mut desktop, window, &clicks);
        let state = |desktop: &Desktop| desktop.tree().widget_state(ok).unwrap();

        assert_eq!(state(&desktop), WidgetState::Normal);
        desktop.moved(120.0, 140.0).unwrap();
        assert_eq!(state(&desktop), WidgetState::Hovered);
        assert_eq!(desktop.pointer().hovered, Some(ok));

        desktop.pressed(120.0, 140.0).unwrap();
        assert_eq!(state(&desktop), WidgetState::Pressed);
        desktop.released(120.0, 140.0).unwrap();
        assert_eq!(state(&desktop), WidgetState::Hovered);
        assert_eq!(clicks.get(), 1);

        desktop.moved(400.0, 400.0).unwrap();
        assert_eq!(state(&desktop), WidgetState::Normal);

        // released outside: no click
        desktop.pressed(120.0, 140.0).unwrap();
        desktop.dragged(400.0, 400.0).unwrap();
        desktop.released(400.0, 400.0).unwrap();
        assert_eq!(state(&desktop), WidgetState::Normal);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_slider_drag_updates_value() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Mixer").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let volume = desktop
            .attach_child(
                window,
                slider(
                    Rect::new(10.0, 30.0, 120.0, 20.0),
                    "Volume",
                    Anchors::TOP | Anchors::LEFT,
                    30.0,
                    0.5,
                    Some(ValueCallback::new(move |_, _, value| sink.borrow_mut().push(value))),
                ),
            )
            .unwrap();

        // handle centre is at local x=60
        desktop.pressed(170.0, 140.0).unwrap();
        assert_eq!(desktop.tree().widget_state(volume).unwrap(), WidgetState::Pressed);
        assert_eq!(desktop.tree().slider_value(volume).unwrap(), 0.5);
        assert!(seen.borrow().is_empty());

        desktop.dragged(110.0, 140.0).unwrap();
        assert_eq!(desktop.tree().slider_value(volume).unwrap(), 0.0);
        desktop.dragged(500.0, 140.0).unwrap();
        desktop.released(500.0, 140.0).unwrap();

        assert_eq!(desktop.tree().slider_value(volume).unwrap(), 1.0);
        assert_eq!(desktop.tree().widget_state(volume).unwrap(), WidgetState::Normal);
        assert_eq!(*seen.borrow(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_close_button_removes_window() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Notes").unwrap();
        desktop.take_events();

        click(&mut desktop, 290.0, 108.0);

        assert!(!desktop.tree().contains(window));
        assert!(desktop.tree().top_level_windows().is_empty());
        assert!(desktop.take_events().contains(&DesktopEvent::WindowClosed {
            window,
            identifier: "Notes".to_string()
        }));
    }

    #[test]
    fn test_minimize_and_restore() {
        let (mut desktop, _) = desktop();
        let back = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Back").unwrap();
        let front = desktop.create_window(400.0, 100.0, 200.0, 150.0, "Front").unwrap();
        desktop.take_events();

        click(&mut desktop, 560.0, 108.0);

        assert!(desktop.tree().node(front).unwrap().minimized);
        assert_eq!(desktop.tree().focused(), Some(back));
        assert_eq!(desktop.locate(450.0, 200.0), desktop.tree().root());
        let events = desktop.take_events();
        assert!(events.contains(&DesktopEvent::WindowMinimized { window: front }));
        assert!(events.contains(&DesktopEvent::FocusChanged { window: back }));

        desktop.restore(front).unwrap();
        assert!(!desktop.tree().node(front).unwrap().minimized);
        assert_eq!(desktop.tree().focused(), Some(front));
        assert_eq!(desktop.locate(450.0, 200.0), front);
    }

    #[test]
    fn test_maximize_toggles() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(100.0, 100.0, 200.0, 150.0, "Notes").unwrap();

        click(&mut desktop, 275.0, 108.0);
        assert!(desktop.manager().is_maximized(window));
        assert_eq!(desktop.tree().node(window).unwrap().frame(), Rect::new(0.0, 0.0, 800.0, 600.0));

        click(&mut desktop, 775.0, 8.0);
        assert!(!desktop.manager().is_maximized(window));
        assert_eq!(
            desktop.tree().node(window).unwrap().frame(),
            Rect::new(100.0, 100.0, 200.0, 150.0)
        );
    }

    #[test]
    fn test_press_raises_window() {
        let (mut desktop, _) = desktop();
        let a = desktop.create_window(10.0, 10.0, 100.0, 100.0, "A").unwrap();
        let b = desktop.create_window(50.0, 50.0, 100.0, 100.0, "B").unwrap();
        assert_eq!(desktop.tree().focused(), Some(b));
        desktop.take_events();

        click(&mut desktop, 20.0, 40.0);

        assert_eq!(desktop.tree().focused(), Some(a));
        let events = desktop.take_events();
        assert!(events.contains(&DesktopEvent::FocusChanged { window: a }));
        assert!(events.contains(&DesktopEvent::Clicked { target: a }));
    }

    #[test]
    fn test_background_press_is_ignored() {
        let (mut desktop, repaints) = desktop();
        desktop.create_window(10.0, 10.0, 100.0, 100.0, "A").unwrap();
        let before = repaints.get();
        assert!(before > 0);

        desktop.pressed(700.0, 500.0).unwrap();
        assert_eq!(desktop.session().state(), SessionState::Idle);
        desktop.released(700.0, 500.0).unwrap();
        desktop.moved(650.0, 450.0).unwrap();
        assert_eq!(repaints.get(), before);
    }

    #[test]
    fn test_keys_go_to_focused_window() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(10.0, 10.0, 200.0, 100.0, "Editor").unwrap();
        let typed = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&typed);
        desktop.set_key_handler(window, move |_, _, ch| sink.borrow_mut().push(ch));

        desktop.process_input_event(InputEvent::Key { ch: 'h' }).unwrap();
        desktop.process_input_event(InputEvent::Key { ch: 'i' }).unwrap();
        assert_eq!(typed.borrow().as_str(), "hi");

        desktop.create_window(300.0, 10.0, 200.0, 100.0, "Other").unwrap();
        desktop.key('!').unwrap();
        assert_eq!(typed.borrow().as_str(), "hi");
    }

    #[test]
    fn test_invalid_widget_states() {
        let (mut desktop, _) = desktop();
        let window = desktop.create_window(10.0, 10.0, 200.0, 100.0, "Widgets").unwrap();
        let text = desktop
            .attach_child(
                window,
                label(Rect::new(5.0, 20.0, 100.0, 20.0), "Text", Anchors::TOP | Anchors::LEFT, "Hi"),
            )
            .unwrap();
        let knob = desktop
            .attach_child(
                window,
                slider(Rect::new(5.0, 50.0, 100.0, 20.0), "Knob", Anchors::TOP | Anchors::LEFT, 30.0, 0.0, None),
            )
            .unwrap();

        assert!(matches!(
            desktop.tree_mut().set_widget_state(knob, WidgetState::Hovered),
            Err(CoreError::InvalidState { .. })
        ));
        assert!(matches!(
            desktop.tree_mut().set_widget_state(text, WidgetState::Pressed),
            Err(CoreError::InvalidState { .. })
        ));
        assert!("bogus".parse::<WidgetState>().is_err());
        assert_eq!("hovered".parse::<WidgetState>().unwrap(), WidgetState::Hovered);
    }

    #[test]
    fn test_paint_draws_titles_and_skips_minimized() {
        let (mut desktop, _) = desktop();
        desktop.create_window(10.0, 10.0, 200.0, 100.0, "Visible").unwrap();
        let gone = desktop.create_window(300.0, 10.0, 200.0, 100.0, "Tucked").unwrap();
        desktop.tree_mut().node_mut(gone).unwrap().minimized = true;

        let mut ctx = RecordingContext::new();
        desktop.paint(&mut ctx).unwrap();

        let texts = ctx.texts();
        assert!(texts.contains(&"Visible"));
        assert!(!texts.contains(&"Tucked"));
    }

    #[test]
    fn test_instance_labels_count_per_name() {
        let (mut desktop, _) = desktop();
        assert_eq!(desktop.instance_label("Calculator"), "1 Calculator");
        assert_eq!(desktop.instance_label("Calculator"), "2 Calculator");
        assert_eq!(desktop.instance_label("Greeting"), "1 Greeting");
    }
}

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use trellis::core::input::InputEvent;
use trellis::core::render::{self, RecordingContext};
use trellis::core::widgets::{button, label, slider, Action, ButtonStyle, ValueCallback};
use trellis::core::window::{Anchors, WindowNode};
use trellis::platform::{Platform, StubPlatform};
use trellis::util::color::Color;
use trellis::util::geometry::Rect;
use trellis::util::logging::{MAIN, TIMESTAMP_FORMAT};
use trellis::{Desktop, DesktopConfig};

fn main() -> Result<()> {
    // Set default log level to info
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,trellis=debug");
    }
    // Initialize logging with standardized format
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_ansi(false)
        .init();

    let mut platform = StubPlatform::new();
    platform.initialize()?;
    let repaints = platform.repaint_counter();

    let mut desktop = Desktop::new(DesktopConfig::default(), Box::new(platform));
    let resizing = open_resizing_demo(&mut desktop)?;
    let greeting = open_greeting_demo(&mut desktop)?;

    // Drag the resizing demo by its title bar, then grow it from the corner.
    let script = [
        InputEvent::PointerMoved { x: 60.0, y: 50.0 },
        InputEvent::PointerPressed { x: 60.0, y: 50.0 },
        InputEvent::PointerDragged { x: 90.0, y: 70.0 },
        InputEvent::PointerDragged { x: 120.0, y: 90.0 },
        InputEvent::PointerReleased { x: 120.0, y: 90.0 },
        InputEvent::PointerPressed { x: 395.0, y: 295.0 },
        InputEvent::PointerDragged { x: 435.0, y: 335.0 },
        InputEvent::PointerReleased { x: 435.0, y: 335.0 },
        InputEvent::Key { ch: 'h' },
    ];
    for event in script {
        desktop.process_input_event(event)?;
    }

    for event in desktop.take_events() {
        trellis::wlog!(MAIN, "{:?}", event);
    }

    let mut ctx = RecordingContext::new();
    desktop.paint(&mut ctx)?;
    trellis::wlog!(
        MAIN,
        "Painted {} ops, {} repaint requests",
        ctx.ops.len(),
        repaints.get()
    );
    for line in render::dump(desktop.tree()).lines() {
        tracing::debug!("{}", line);
    }

    let frame = desktop.tree().node(resizing)?.frame();
    trellis::wlog!(MAIN, "Resizing demo ended at {:?}", frame);
    desktop.close_window(greeting)?;
    Ok(())
}

/// A window whose children exercise each anchor regime.
fn open_resizing_demo(desktop: &mut Desktop) -> Result<trellis::core::window::WindowId> {
    let label_text = desktop.instance_label("Resizing");
    let window = desktop.create_window(40.0, 40.0, 300.0, 220.0, label_text)?;
    let specs = [
        ("Top Left", Anchors::TOP | Anchors::LEFT, Color::RED),
        ("Top Right", Anchors::TOP | Anchors::RIGHT, Color::BLUE),
        ("Bottom Left", Anchors::BOTTOM | Anchors::LEFT, Color::ORANGE),
        ("Bottom Right", Anchors::BOTTOM | Anchors::RIGHT, Color::PURPLE),
        ("Stretched", Anchors::all(), Color::PINK),
        ("Centered", Anchors::empty(), Color::BROWN),
    ];
    let positions = [
        (10.0, 28.0),
        (250.0, 28.0),
        (10.0, 170.0),
        (250.0, 170.0),
        (70.0, 70.0),
        (130.0, 100.0),
    ];
    for ((name, anchors, color), (x, y)) in specs.into_iter().zip(positions) {
        desktop.attach_child(
            window,
            WindowNode::new(x, y, 40.0, 40.0, name)
                .with_anchors(anchors)
                .with_background(Some(color)),
        )?;
    }
    Ok(window)
}

/// A window with a greeting label, a button that changes it and a slider.
fn open_greeting_demo(desktop: &mut Desktop) -> Result<trellis::core::window::WindowId> {
    let label_text = desktop.instance_label("Greeting");
    let window = desktop.create_window(380.0, 80.0, 240.0, 160.0, label_text)?;
    let greeting = desktop.attach_child(
        window,
        label(
            Rect::new(10.0, 30.0, 200.0, 20.0),
            "Greeting",
            Anchors::TOP | Anchors::LEFT | Anchors::RIGHT,
            "Hello",
        ),
    )?;
    let handle_width = desktop.config().slider_handle_width;
    desktop.attach_child(
        window,
        button(
            Rect::new(10.0, 60.0, 80.0, 24.0),
            "Wave",
            Anchors::TOP | Anchors::LEFT,
            "Wave",
            ButtonStyle::default(),
            Some(Action::new(move |tree, _| {
                if let Err(err) = tree.set_label_text(greeting, "Hello again") {
                    tracing::warn!("Greeting update failed: {}", err);
                }
            })),
        ),
    )?;
    desktop.attach_child(
        window,
        slider(
            Rect::new(10.0, 100.0, 200.0, 20.0),
            "Volume",
            Anchors::TOP | Anchors::LEFT | Anchors::RIGHT,
            handle_width,
            0.5,
            Some(ValueCallback::new(|_, _, value| {
                tracing::info!("Volume now {:.2}", value);
            })),
        ),
    )?;
    desktop.set_key_handler(window, move |tree, _, ch| {
        if let Err(err) = tree.set_label_text(greeting, format!("Typed {}", ch)) {
            tracing::warn!("Greeting update failed: {}", err);
        }
    });
    Ok(window)
}

use vsview_core::viewport::ViewInput;

/// Approximate points per wheel line, used to turn pixel scrolling into notches.
const POINTS_PER_WHEEL_LINE: f32 = 50.0;

/// Input gathered for one frame.
#[derive(Default)]
pub struct FrameInput {
    pub quit: bool,
    pub view: Vec<ViewInput>,
}

/// Translate this frame's egui events into viewport inputs.
///
/// Space resets the zoom; Ctrl+Space fits the height, Shift+Space the width.
/// Escape quits. The wheel zooms and the left button drags.
pub fn collect(ctx: &egui::Context) -> FrameInput {
    ctx.input(|i| {
        let mut out = FrameInput::default();

        for event in &i.events {
            match event {
                egui::Event::Key {
                    key: egui::Key::Escape,
                    pressed: true,
                    ..
                } => out.quit = true,
                egui::Event::Key {
                    key: egui::Key::Space,
                    pressed: true,
                    modifiers,
                    ..
                } => out.view.push(if modifiers.ctrl {
                    ViewInput::FitHeight
                } else if modifiers.shift {
                    ViewInput::FitWidth
                } else {
                    ViewInput::ResetZoom
                }),
                egui::Event::MouseWheel { unit, delta, .. } => {
                    let notches = match unit {
                        egui::MouseWheelUnit::Point => delta.y / POINTS_PER_WHEEL_LINE,
                        egui::MouseWheelUnit::Line | egui::MouseWheelUnit::Page => delta.y,
                    };
                    if notches != 0.0 {
                        out.view.push(ViewInput::Wheel(notches));
                    }
                }
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => out.view.push(if *pressed {
                    ViewInput::DragStart
                } else {
                    ViewInput::DragEnd
                }),
                _ => {}
            }
        }

        let motion = i.pointer.delta();
        if motion != egui::Vec2::ZERO {
            out.view.push(ViewInput::DragMove {
                dx: motion.x.round() as i32,
                dy: motion.y.round() as i32,
            });
        }

        out
    })
}

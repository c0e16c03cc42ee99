use vsview_core::viewport::Rect;

use crate::app::ViewerApp;

pub fn show(ctx: &egui::Context, app: &ViewerApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            paint_background(ui, rect);

            match (app.image(), app.viewport.as_ref()) {
                (Some(image), Some(viewport)) => {
                    draw_image(ui, image.texture.id(), to_egui_rect(viewport.dest_rect()));
                }
                _ => show_placeholder(ui, app),
            }
        });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().rect_filled(rect, 0.0, egui::Color32::BLACK);
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &mut egui::Ui, app: &ViewerApp) {
    let text = match app.failure() {
        Some(message) => message.to_string(),
        None => format!("Loading {}", app.source_name()),
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}

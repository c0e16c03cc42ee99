use vsview_core::error::{Result, ViewerError};
use vsview_core::frame::{PixelBuffer, PixelLayout};
use vsview_core::job::TextureFactory;

/// Uploads converted images into egui-managed GPU textures.
pub struct EguiTextures {
    ctx: egui::Context,
    options: egui::TextureOptions,
}

impl EguiTextures {
    pub fn new(ctx: egui::Context, linear_filtering: bool) -> Self {
        let options = if linear_filtering {
            egui::TextureOptions::LINEAR
        } else {
            egui::TextureOptions::NEAREST
        };
        Self { ctx, options }
    }
}

impl TextureFactory for EguiTextures {
    type Texture = egui::TextureHandle;

    const LAYOUT: PixelLayout = PixelLayout::Rgb24;

    fn create_texture(&mut self, pixels: PixelBuffer) -> Result<egui::TextureHandle> {
        let max_side = self.ctx.input(|i| i.max_texture_side);
        let size = [pixels.width() as usize, pixels.height() as usize];
        if size[0] > max_side || size[1] > max_side {
            return Err(ViewerError::InvalidDimensions {
                width: pixels.width(),
                height: pixels.height(),
            });
        }

        let image = egui::ColorImage::from_rgb(size, pixels.as_bytes());
        drop(pixels);

        let texture = self.ctx.load_texture("vsview-image", image, self.options);
        self.ctx.request_repaint();
        Ok(texture)
    }
}

use crate::raster::Raster;
use pixels::{Pixels, SurfaceTexture};
use std::cmp::{max, min};
use winit::{
    dpi::PhysicalSize,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

pub struct Gfx {
    pub window: Window,
    pixels: Pixels,
    pub width: u32,
    pub height: u32,
}

impl Gfx {
    pub fn new(width: u32, height: u32, title: &str) -> (Self, EventLoop<()>) {
        let pixel_scale = max(1, min(1000 / max(1, height), 1500 / max(1, width)));
        let event_loop = EventLoop::new();
        // physical window size = virtual size × scale
        let physical_size = PhysicalSize::new(width * pixel_scale, height * pixel_scale);

        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(physical_size)
            .with_resizable(false)
            .build(&event_loop)
            .unwrap();

        // SurfaceTexture uses the physical (window) pixels,
        // but the 'logical' pixel buffer stays at width×height
        let surface_texture =
            SurfaceTexture::new(physical_size.width, physical_size.height, &window);

        let pixels = Pixels::new(width, height, surface_texture).unwrap();

        (
            Gfx {
                window,
                pixels,
                width,
                height,
            },
            event_loop,
        )
    }

    pub fn render(&mut self) {
        self.pixels.render().unwrap();
    }

    /// Copy an RGB raster into the RGBA frame, fully opaque.
    pub fn display(&mut self, img: &Raster) {
        let frame = self.pixels.frame_mut();
        for (dst, src) in frame.chunks_exact_mut(4).zip(img.pixels.chunks_exact(3)) {
            dst[..3].copy_from_slice(src);
            dst[3] = 255;
        }
    }
}

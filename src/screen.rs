use crate::config::DrawPolicy;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const PIXEL_COUNT: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// row-major, index = x + y * 64
pub type PixelArray = [bool; PIXEL_COUNT];

/// Monochrome framebuffer.
#[derive(Clone)]
pub struct Screen {
    pixels: PixelArray,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            pixels: [false; PIXEL_COUNT],
        }
    }
}

impl Screen {
    /// XOR a sprite onto the screen, one byte per row, MSB leftmost.
    /// Returns true if any set sprite bit hit an already lit pixel.
    pub fn render_sprite(&mut self, x: usize, y: usize, source: &[u8], policy: DrawPolicy) -> bool {
        let mut collided = false;
        for (i, row) in source.iter().enumerate() {
            for j in 0..8 {
                if row >> (7 - j) & 1 == 0 {
                    continue;
                }
                let index = match policy {
                    DrawPolicy::Clip => {
                        let index = (x + j) + (y + i) * SCREEN_WIDTH;
                        if index >= PIXEL_COUNT {
                            continue;
                        }
                        index
                    }
                    DrawPolicy::Wrap => {
                        (x + j) % SCREEN_WIDTH + ((y + i) % SCREEN_HEIGHT) * SCREEN_WIDTH
                    }
                };
                collided |= self.flip_pixel(index);
            }
        }
        collided
    }

    pub fn clear_screen(&mut self) {
        self.pixels = [false; PIXEL_COUNT];
    }

    pub fn pixels(&self) -> &PixelArray {
        &self.pixels
    }

    /// Off-screen coordinates read as unlit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < SCREEN_WIDTH && y < SCREEN_HEIGHT && self.pixels[x + y * SCREEN_WIDTH]
    }

    /// returns whether the pixel was lit before
    fn flip_pixel(&mut self, index: usize) -> bool {
        let pixel = &mut self.pixels[index];
        let collided = *pixel;
        *pixel = !*pixel;
        collided
    }
}

/*
 * Terminal Display Module
 *
 * Shows rendered frames inline in the terminal using the iTerm2 inline
 * image protocol (OSC 1337). Each frame is PNG encoded, base64 wrapped and
 * written at the same screen position so successive frames overwrite each
 * other. The cursor is hidden for the lifetime of the display and restored
 * when it is dropped.
 */

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType},
};
use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::app::FrameSink;
use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::renderer::render_frame;

pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    // Clear the screen and hide the cursor
    pub fn new(mut out: W) -> Result<Self> {
        queue!(out, Clear(ClearType::All), Hide).context("failed to prepare terminal")?;
        out.flush().context("failed to flush terminal")?;
        Ok(Self { out })
    }

    // Write one frame followed by the loop counter, returns the payload size
    pub fn show_frame(&mut self, frame: &RgbaImage, tick: usize) -> Result<usize> {
        let png = encode_png(frame)?;
        let sequence = inline_image_sequence(&png);

        queue!(self.out, MoveTo(0, 1)).context("failed to move cursor")?;
        self.out
            .write_all(sequence.as_bytes())
            .context("failed to write inline image")?;
        write!(self.out, "\nLoop: {}", tick).context("failed to write loop counter")?;
        self.out.flush().context("failed to flush terminal")?;

        debug!(tick, png_bytes = png.len(), "frame written");
        Ok(sequence.len())
    }
}

impl<W: Write> FrameSink for TerminalDisplay<W> {
    fn present(&mut self, tick: usize, boids: &[Boid], params: &SimulationParams) -> Result<usize> {
        let frame = render_frame(boids, params.width, params.height);
        self.show_frame(&frame, tick)
    }
}

impl<W: Write> Drop for TerminalDisplay<W> {
    fn drop(&mut self) {
        let _ = queue!(self.out, Show);
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}

pub fn encode_png(frame: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode frame as PNG")?;
    Ok(bytes)
}

// OSC 1337 inline file escape, terminated by BEL
pub fn inline_image_sequence(png: &[u8]) -> String {
    format!("\x1b]1337;File=inline=1:{}\x07", BASE64.encode(png))
}

use super::color::Rgb16;
use super::font::FontMetrics;
use crate::config::defaults::FALLBACK_FONT;
use crate::error::{Error, Result};
use crate::Lifecycle::{EventPoster, EventSource, PopupEvent, Trigger};
use crate::Text::{LayoutMetrics, LineBuffer};
use std::fmt::Display;
use std::sync::Arc;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, Char2b, ClientMessageEvent, Colormap, ConnectionExt as _, CreateGCAux,
    CreateWindowAux, EventMask, Font, Gcontext, Window, WindowClass,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;

/// Atom naming the synthetic events posted by the signal layer.
const TRIGGER_ATOM: &[u8] = b"_NOTISTACK_TRIGGER";

/// ImageText16 draws at most this many characters per request.
const MAX_TEXT_CHARS: usize = 255;

fn display_error<E: Display>(context: &'static str) -> impl FnOnce(E) -> Error {
    move |e| Error::Display(format!("{}: {}", context, e))
}

fn clamp_i16(v: i64) -> i16 {
    v.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
}

fn clamp_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Encode a line for ImageText16. Characters outside the BMP become '?'.
pub fn encode_line(line: &str) -> Vec<Char2b> {
    line.chars()
        .take(MAX_TEXT_CHARS)
        .map(|c| {
            let code = u16::try_from(u32::from(c)).unwrap_or(u16::from(b'?'));
            Char2b {
                byte1: (code >> 8) as u8,
                byte2: (code & 0xFF) as u8,
            }
        })
        .collect()
}

/// Open display connection with the popup font loaded.
pub struct X11Shell {
    conn: Arc<RustConnection>,
    screen_num: usize,
    font: Font,
    metrics: FontMetrics,
}

/// Resolved colors for one popup.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Rgb16,
    pub border: Rgb16,
    pub foreground: Rgb16,
}

/// Everything the shell needs to put a popup on screen.
#[derive(Debug, Clone)]
pub struct PopupSpec {
    pub origin: (i32, i32),
    pub metrics: LayoutMetrics,
    pub border_size: u32,
    pub palette: Palette,
    pub lines: LineBuffer,
}

impl X11Shell {
    /// Connect to `$DISPLAY` and open `font_name`, falling back to `fixed`.
    pub fn connect(font_name: &str) -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(display_error("cannot open display"))?;
        let conn = Arc::new(conn);

        let font = match open_font(&conn, font_name) {
            Ok(font) => font,
            Err(e) => {
                tracing::warn!(font = font_name, error = %e, "falling back to {}", FALLBACK_FONT);
                open_font(&conn, FALLBACK_FONT)?
            }
        };

        let reply = conn
            .query_font(font)
            .map_err(display_error("cannot query font"))?
            .reply()
            .map_err(display_error("cannot query font"))?;
        let metrics = FontMetrics::from_reply(&reply);
        tracing::debug!(
            ascent = metrics.ascent,
            descent = metrics.descent,
            max_advance = metrics.max_advance,
            "font loaded"
        );

        Ok(Self {
            conn,
            screen_num,
            font,
            metrics,
        })
    }

    pub fn font_metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn screen_size(&self) -> (u32, u32) {
        let screen = &self.conn.setup().roots[self.screen_num];
        (
            u32::from(screen.width_in_pixels),
            u32::from(screen.height_in_pixels),
        )
    }

    fn alloc_pixel(&self, colormap: Colormap, color: Rgb16) -> Result<u32> {
        let reply = self
            .conn
            .alloc_color(colormap, color.red, color.green, color.blue)
            .map_err(display_error("cannot allocate color"))?
            .reply()
            .map_err(display_error("cannot allocate color"))?;
        Ok(reply.pixel)
    }

    /// Create and map the borderless, override-redirect popup window.
    pub fn open_popup(self, spec: PopupSpec) -> Result<Popup> {
        let screen = &self.conn.setup().roots[self.screen_num];
        let (root, depth, visual, colormap) = (
            screen.root,
            screen.root_depth,
            screen.root_visual,
            screen.default_colormap,
        );

        let background = self.alloc_pixel(colormap, spec.palette.background)?;
        let border = self.alloc_pixel(colormap, spec.palette.border)?;
        let foreground = self.alloc_pixel(colormap, spec.palette.foreground)?;

        let window = self
            .conn
            .generate_id()
            .map_err(display_error("cannot allocate window id"))?;
        let (width, height) = spec.metrics.size();
        let aux = CreateWindowAux::new()
            .override_redirect(1)
            .background_pixel(background)
            .border_pixel(border)
            .event_mask(EventMask::EXPOSURE | EventMask::BUTTON_PRESS);
        self.conn
            .create_window(
                depth,
                window,
                root,
                clamp_i16(i64::from(spec.origin.0)),
                clamp_i16(i64::from(spec.origin.1)),
                clamp_u16(width.max(1)),
                clamp_u16(height.max(1)),
                clamp_u16(spec.border_size),
                WindowClass::INPUT_OUTPUT,
                visual,
                &aux,
            )
            .map_err(display_error("cannot create window"))?;

        let gc = self
            .conn
            .generate_id()
            .map_err(display_error("cannot allocate graphics context id"))?;
        self.conn
            .create_gc(
                gc,
                window,
                &CreateGCAux::new()
                    .foreground(foreground)
                    .background(background)
                    .font(self.font),
            )
            .map_err(display_error("cannot create graphics context"))?;

        let atom = self
            .conn
            .intern_atom(false, TRIGGER_ATOM)
            .map_err(display_error("cannot intern trigger atom"))?
            .reply()
            .map_err(display_error("cannot intern trigger atom"))?
            .atom;

        self.conn
            .map_window(window)
            .map_err(display_error("cannot map window"))?;
        self.conn
            .flush()
            .map_err(display_error("cannot flush display"))?;

        tracing::debug!(
            window,
            x = spec.origin.0,
            y = spec.origin.1,
            width,
            height,
            "popup mapped"
        );

        let lines = spec
            .lines
            .iter()
            .zip(0u32..)
            .map(|(line, index)| (spec.metrics.baseline(index), encode_line(line)))
            .collect();

        Ok(Popup {
            conn: Arc::clone(&self.conn),
            window,
            gc,
            font: self.font,
            atom,
            text_x: spec.metrics.padding,
            lines,
        })
    }
}

fn open_font(conn: &RustConnection, name: &str) -> Result<Font> {
    let font = conn
        .generate_id()
        .map_err(display_error("cannot allocate font id"))?;
    conn.open_font(font, name.as_bytes())
        .map_err(display_error("cannot open font"))?
        .check()
        .map_err(|e| Error::Display(format!("cannot open font {:?}: {}", name, e)))?;
    Ok(font)
}

/// A mapped popup window. Destroyed, with its font and graphics context, on drop.
pub struct Popup {
    conn: Arc<RustConnection>,
    window: Window,
    gc: Gcontext,
    font: Font,
    atom: Atom,
    text_x: u32,
    /// Baseline and encoded text of every line.
    lines: Vec<(u32, Vec<Char2b>)>,
}

impl Popup {
    /// Handle the signal layer uses to wake this popup's event loop.
    pub fn poster(&self) -> X11Poster {
        X11Poster {
            conn: Arc::clone(&self.conn),
            window: self.window,
            atom: self.atom,
        }
    }
}

impl EventSource for Popup {
    fn next_event(&mut self) -> Result<PopupEvent> {
        let event = self
            .conn
            .wait_for_event()
            .map_err(display_error("lost display connection"))?;

        Ok(match event {
            Event::Expose(e) if e.count == 0 => PopupEvent::Expose,
            Event::ButtonPress(e) => PopupEvent::Button(e.detail),
            Event::ClientMessage(e) if e.type_ == self.atom && e.format == 32 => {
                match Trigger::from_code(e.data.as_data32()[0]) {
                    Some(trigger) => PopupEvent::Synthetic(trigger),
                    None => PopupEvent::Other,
                }
            }
            _ => PopupEvent::Other,
        })
    }

    fn redraw(&mut self) -> Result<()> {
        self.conn
            .clear_area(false, self.window, 0, 0, 0, 0)
            .map_err(display_error("cannot clear window"))?;
        let x = clamp_i16(i64::from(self.text_x));
        for (baseline, text) in &self.lines {
            self.conn
                .image_text16(self.window, self.gc, x, clamp_i16(i64::from(*baseline)), text)
                .map_err(display_error("cannot draw text"))?;
        }
        self.conn
            .flush()
            .map_err(display_error("cannot flush display"))?;
        Ok(())
    }
}

impl Drop for Popup {
    fn drop(&mut self) {
        let _ = self.conn.free_gc(self.gc);
        let _ = self.conn.destroy_window(self.window);
        let _ = self.conn.close_font(self.font);
        let _ = self.conn.flush();
    }
}

/// Posts synthetic ClientMessage events to a popup window.
pub struct X11Poster {
    conn: Arc<RustConnection>,
    window: Window,
    atom: Atom,
}

impl EventPoster for X11Poster {
    fn post(&self, trigger: Trigger) -> Result<()> {
        let event = ClientMessageEvent::new(32, self.window, self.atom, [trigger.code(), 0, 0, 0, 0]);
        self.conn
            .send_event(false, self.window, EventMask::NO_EVENT, event)
            .map_err(display_error("cannot post synthetic event"))?;
        self.conn
            .flush()
            .map_err(display_error("cannot flush display"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bmp_characters_big_endian() {
        let encoded = encode_line("a€");
        assert_eq!(encoded[0].byte1, 0);
        assert_eq!(encoded[0].byte2, b'a');
        assert_eq!(encoded[1].byte1, 0x20);
        assert_eq!(encoded[1].byte2, 0xAC);
    }

    #[test]
    fn replaces_astral_characters_and_truncates() {
        let encoded = encode_line("🦀");
        assert_eq!(encoded[0].byte2, b'?');

        let long = "x".repeat(400);
        assert_eq!(encode_line(&long).len(), MAX_TEXT_CHARS);
    }
}

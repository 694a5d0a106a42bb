// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based depth viewer
//!
//! Renders the colorized depth stream to the terminal using Unicode
//! half-block characters for improved vertical resolution. Keybindings
//! adjust the range window through the depth range channel; the render
//! loop reads one snapshot of it per tick.

use crate::backends::depth::{DepthSource, SyntheticDepthSource};
use crate::config::Config;
use crate::constants::{RANGE_STEP_M, TICK_INTERVAL};
use crate::errors::{AppError, RenderError};
use crate::shaders::depth_view::{
    ColorMode, ViewFrame, color_mode, depth_range, get_depth_view_processor, quantize_bands,
    render_depth_view, set_color_mode, set_depth_range, set_max_depth, set_min_depth,
    set_quantize_enabled,
};
use crate::storage::save_view_frame;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use tracing::{error, warn};

/// Run the terminal depth viewer
pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // A missing GPU is a startup failure, not something to retry per frame
    pollster::block_on(get_depth_view_processor())
        .map_err(|e| AppError::Render(RenderError::DeviceUnavailable(e)))?;

    // Seed the shared visualization settings from config
    let range = config.depth_range();
    set_depth_range(range.min_m, range.max_m);
    set_color_mode(config.color_mode);
    set_quantize_enabled(config.quantize);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist settings adjusted during the session
    if result.is_ok() {
        let range = depth_range();
        let config = Config {
            min_depth_m: range.min_m,
            max_depth_m: range.max_m,
            color_mode: color_mode(),
            quantize: quantize_bands() > 0.0,
        };
        if let Err(e) = config.save() {
            warn!("Failed to save config: {}", e);
        }
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = SyntheticDepthSource::new();
    let mut view_widget = DepthViewWidget::new();
    let mut show_help = false;
    let mut notice: Option<String> = None;

    loop {
        // One frame tick: poll the source, snapshot the range window once,
        // render. A tick without new source data re-renders the last
        // uploaded frame so range changes stay live; a failed tick keeps
        // the previous presented frame.
        let frame = source.poll_frame();
        let size = terminal.size()?;
        let view_rows = size.height.saturating_sub(1);

        if size.width > 0 && view_rows > 0 {
            let (src_w, src_h) = source.dimensions();
            let (out_w, out_h) =
                fit_output_dims(src_w, src_h, size.width as u32, view_rows as u32 * 2);

            match pollster::block_on(render_depth_view(
                frame.as_ref(),
                out_w,
                out_h,
                depth_range(),
                color_mode(),
                quantize_bands(),
            )) {
                Ok(Some(view)) => view_widget.update_frame(view),
                Ok(None) => {} // no frame has arrived yet, skip presenting
                Err(e) => warn!("Frame tick failed: {}", e),
            }
        }

        // Draw
        let status_text = match (&notice, show_help) {
            (Some(msg), _) => msg.clone(),
            (None, true) => help_message(),
            (None, false) => status_message(),
        };

        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let view_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };

            f.render_widget(&view_widget, view_area);

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };

            let status = StatusBar {
                message: &status_text,
            };
            f.render_widget(status, status_area);
        })?;

        // Handle input with timeout for frame pacing
        if event::poll(TICK_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            notice = None;

            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            match key.code {
                KeyCode::Char('q') => break,

                // Range window controls (cross-linked clamping happens
                // inside the channel)
                KeyCode::Char(',') => set_min_depth(depth_range().min_m - RANGE_STEP_M),
                KeyCode::Char('.') => set_min_depth(depth_range().min_m + RANGE_STEP_M),
                KeyCode::Char('[') => set_max_depth(depth_range().max_m - RANGE_STEP_M),
                KeyCode::Char(']') => set_max_depth(depth_range().max_m + RANGE_STEP_M),

                KeyCode::Char('c') => {
                    let next = match color_mode() {
                        ColorMode::Grayscale => ColorMode::Turbo,
                        ColorMode::Turbo => ColorMode::Grayscale,
                    };
                    set_color_mode(next);
                }
                KeyCode::Char('b') => set_quantize_enabled(quantize_bands() == 0.0),

                KeyCode::Char('r') => {
                    let (w, h) = source.cycle_resolution();
                    notice = Some(format!("Source resolution {}x{}", w, h));
                }

                KeyCode::Char('p') => {
                    if let Some(view) = &view_widget.frame {
                        match save_view_frame(view) {
                            Ok(path) => notice = Some(format!("Saved: {}", path.display())),
                            Err(e) => {
                                error!("Failed to save snapshot: {}", e);
                                notice = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }

                KeyCode::Char('h') => show_help = !show_help,
                _ => {}
            }
        }
    }

    Ok(())
}

fn status_message() -> String {
    let range = depth_range();
    format!(
        "min {:.1} m | max {:.1} m | {} | 'h' help | 'q' quit",
        range.min_m,
        range.max_m,
        color_mode().display_name()
    )
}

fn help_message() -> String {
    ",/.: min depth | [/]: max depth | c: colormap | b: bands | r: resolution | p: snapshot | q/Ctrl+C: quit".to_string()
}

/// Fit the source aspect ratio into the available pixel area.
///
/// Returns output dimensions in pixels (two pixels per terminal row);
/// the height is forced even so rows pair up into half-block cells.
fn fit_output_dims(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let out_w = ((src_w as f64 * scale) as u32).clamp(1, max_w);
    let out_h = ((src_h as f64 * scale) as u32).clamp(2, max_h);
    (out_w, out_h & !1)
}

/// Widget that renders a colorized frame using half-block characters
struct DepthViewWidget {
    frame: Option<ViewFrame>,
}

impl DepthViewWidget {
    fn new() -> Self {
        Self { frame: None }
    }

    fn update_frame(&mut self, frame: ViewFrame) {
        self.frame = Some(frame);
    }
}

impl Widget for &DepthViewWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = &self.frame else {
            // No frame yet - show placeholder
            let msg = "Waiting for depth data...";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, ratatui::style::Style::default());
            }
            return;
        };

        // The frame was rendered at most area.width x area.height*2; center it
        let cell_width = (frame.width as u16).min(area.width);
        let cell_height = ((frame.height / 2) as u16).min(area.height);
        let x_offset = area.x + (area.width - cell_width) / 2;
        let y_offset = area.y + (area.height - cell_height) / 2;

        // Each terminal cell shows 2 vertical pixels:
        // upper half (▀) colored with fg, lower half with bg
        for ty in 0..cell_height {
            for tx in 0..cell_width {
                let top = sample_rgb(frame, tx as u32, ty as u32 * 2);
                let bottom = sample_rgb(frame, tx as u32, ty as u32 * 2 + 1);

                if let Some(cell) = buf.cell_mut((x_offset + tx, y_offset + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

fn sample_rgb(frame: &ViewFrame, x: u32, y: u32) -> Color {
    let x = x.min(frame.width - 1);
    let y = y.min(frame.height - 1);
    let idx = ((y * frame.width + x) * 4) as usize;
    Color::Rgb(frame.rgba[idx], frame.rgba[idx + 1], frame.rgba[idx + 2])
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        // Render text
        let text = if self.message.len() > area.width as usize {
            &self.message[..area.width as usize]
        } else {
            self.message
        };

        buf.set_string(
            area.x,
            area.y,
            text,
            ratatui::style::Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_output_dims_preserves_aspect() {
        // 640x480 source into an 80x48 pixel area: width-limited
        let (w, h) = fit_output_dims(640, 480, 80, 48);
        assert!(w <= 80 && h <= 48);
        assert_eq!(h % 2, 0);
        let src_aspect = 640.0 / 480.0;
        let out_aspect = w as f64 / h as f64;
        assert!((src_aspect - out_aspect).abs() < 0.2);
    }

    #[test]
    fn test_fit_output_dims_never_zero() {
        let (w, h) = fit_output_dims(640, 480, 1, 2);
        assert!(w >= 1);
        assert!(h >= 2);
    }
}

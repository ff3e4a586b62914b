use log::info;
use pagemenu_gfx::Frame128x64;

const HEIGHT: usize = 64;

/// Logs the frame two pixel rows per text line using half-block glyphs.
pub fn log_frame(label: &str, frame: &Frame128x64) {
    info!("frame: after {}", label);
    let lit = |x, y| frame.pixel(x, y).unwrap_or(false);

    for y in (0..HEIGHT).step_by(2) {
        let text: String = (0..Frame128x64::WIDTH)
            .map(|x| match (lit(x, y), lit(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            })
            .collect();
        info!("|{}|", text.trim_end());
    }
}

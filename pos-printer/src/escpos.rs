//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

/// Raw ESC/POS command literals
///
/// These are the exact byte sequences sent to the printer. Receipt layouts
/// depend on them being bit-exact.
pub mod cmd {
    pub const ESC: u8 = 0x1B;
    pub const GS: u8 = 0x1D;
    pub const LF: u8 = 0x0A;

    /// ESC @ - Initialize printer
    pub const INIT: [u8; 2] = [ESC, b'@'];
    /// ESC a 1
    pub const ALIGN_CENTER: [u8; 3] = [ESC, b'a', 0x01];
    /// ESC a 0
    pub const ALIGN_LEFT: [u8; 3] = [ESC, b'a', 0x00];
    /// ESC E 1
    pub const BOLD_ON: [u8; 3] = [ESC, b'E', 0x01];
    /// ESC E 0
    pub const BOLD_OFF: [u8; 3] = [ESC, b'E', 0x00];
    /// ESC ! 0x10 - Print mode: double height
    pub const DOUBLE_HEIGHT: [u8; 3] = [ESC, b'!', 0x10];
    /// ESC ! 0x00 - Print mode: normal
    pub const NORMAL: [u8; 3] = [ESC, b'!', 0x00];
    /// GS V 0 - Full cut
    pub const CUT_PAPER: [u8; 3] = [GS, b'V', 0x00];
}

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
/// Text is written as UTF-8.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(&cmd::INIT);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(cmd::LF);
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(cmd::LF);
        self
    }

    /// Write `lines` bare line feeds
    pub fn feed_lines(&mut self, lines: usize) -> &mut Self {
        self.buf.extend(std::iter::repeat_n(cmd::LF, lines));
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.raw(&cmd::ALIGN_CENTER)
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.raw(&cmd::ALIGN_LEFT)
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.raw(&cmd::BOLD_ON)
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.raw(&cmd::BOLD_OFF)
    }

    /// Double height (ESC ! print mode)
    pub fn double_height(&mut self) -> &mut Self {
        self.raw(&cmd::DOUBLE_HEIGHT)
    }

    /// Reset print mode to normal size
    pub fn normal(&mut self) -> &mut Self {
        self.raw(&cmd::NORMAL)
    }

    // === Separators ===

    /// Print a full-width line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    /// Print a full-width line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.raw(&cmd::CUT_PAPER)
    }

    // === Raw Commands ===

    /// Write raw bytes directly
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    // === Build ===

    /// Build the final byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(32)
    }
}

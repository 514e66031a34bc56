use std::os::fd::AsRawFd;

/// Width used when stdin is not a terminal or reports zero columns.
pub const FALLBACK_WIDTH: usize = 80;

nix::ioctl_read_bad!(tiocgwinsz, nix::libc::TIOCGWINSZ, nix::libc::winsize);

/// Column count of the terminal attached to stdin.
pub fn width() -> usize {
    let mut ws = nix::libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ only writes a `winsize` through the pointer, and
    // `ws` outlives the call.
    let result = unsafe { tiocgwinsz(std::io::stdin().as_raw_fd(), &mut ws) };
    match result {
        Ok(_) => columns_or_fallback(ws.ws_col),
        Err(errno) => {
            tracing::trace!(%errno, "no terminal size on stdin");
            FALLBACK_WIDTH
        }
    }
}

fn columns_or_fallback(cols: u16) -> usize {
    if cols == 0 {
        FALLBACK_WIDTH
    } else {
        usize::from(cols)
    }
}

//! Clipboard
//!
//! Copies with a timed clear. Each copy bumps a generation counter so a
//! newer copy is never clobbered by an older timeout firing late.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use zeroize::Zeroize;

static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

pub fn copy_with_timeout(text: &str, timeout: Duration) {
    let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
    let mut text = text.to_string();

    std::thread::spawn(move || {
        let Ok(mut clipboard) = arboard::Clipboard::new() else {
            return;
        };
        if clipboard.set_text(&*text).is_err() {
            return;
        }

        std::thread::sleep(timeout);
        text.zeroize();

        if CLIPBOARD_COPY_ID.load(Ordering::SeqCst) == copy_id {
            let _ = clipboard.clear();
        }
    });
}

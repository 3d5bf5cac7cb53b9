//! Inline wait spinner drawn on the current terminal line.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::theme::StyleFn;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);
const CLEAR_LINE: &str = "\r\x1b[2K";

pub type SharedWriter<W> = Arc<Mutex<W>>;

pub struct Loader<W: Write + Send + 'static> {
    writer: SharedWriter<W>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl<W: Write + Send + 'static> Loader<W> {
    /// Draws the first frame immediately, then animates until [`Loader::stop`].
    pub fn start(writer: SharedWriter<W>, message: &str, spinner_style: StyleFn) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        draw_frame(&writer, spinner_style(SPINNER_FRAMES[0]), message);

        let thread_writer = Arc::clone(&writer);
        let thread_stop = Arc::clone(&stop_flag);
        let message = message.to_string();
        let thread = thread::spawn(move || {
            let mut frame = 0usize;
            loop {
                thread::sleep(FRAME_INTERVAL);
                if thread_stop.load(Ordering::SeqCst) {
                    break;
                }
                frame = (frame + 1) % SPINNER_FRAMES.len();
                draw_frame(&thread_writer, spinner_style(SPINNER_FRAMES[frame]), &message);
            }
        });

        Self {
            writer,
            stop_flag,
            thread: Some(thread),
        }
    }

    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            let mut writer = lock_writer(&self.writer);
            let _ = writer.write_all(CLEAR_LINE.as_bytes());
            let _ = writer.flush();
        }
    }
}

impl<W: Write + Send + 'static> Drop for Loader<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn draw_frame<W: Write>(writer: &Mutex<W>, spinner: String, message: &str) {
    let mut writer = lock_writer(writer);
    let _ = write!(writer, "\r{spinner} {message}");
    let _ = writer.flush();
}

pub(crate) fn lock_writer<W>(writer: &Mutex<W>) -> MutexGuard<'_, W> {
    writer
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

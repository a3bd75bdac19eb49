use opencv::core::Mat;
use opencv::highgui;

/// Keys the session reacts to; everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    CaptureBackground,
    Ignored,
}

/// Output half of the interaction loop: show a frame, then poll briefly for a
/// key so the window stays responsive.
pub trait Screen {
    fn present(&mut self, frame: &Mat) -> opencv::Result<()>;
    fn poll_key(&mut self) -> opencv::Result<Key>;
}

/// highgui-backed window. Destroyed on drop so the window goes away on every
/// exit path, the fatal ones included.
pub struct HighguiScreen {
    window: String,
}

impl HighguiScreen {
    pub fn open(window: &str) -> opencv::Result<Self> {
        highgui::named_window(window, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            window: window.to_string(),
        })
    }
}

impl Screen for HighguiScreen {
    fn present(&mut self, frame: &Mat) -> opencv::Result<()> {
        highgui::imshow(&self.window, frame)
    }

    fn poll_key(&mut self) -> opencv::Result<Key> {
        Ok(match highgui::wait_key(1)? & 0xff {
            code if code == i32::from(b'q') => Key::Quit,
            code if code == i32::from(b'b') => Key::CaptureBackground,
            _ => Key::Ignored,
        })
    }
}

impl Drop for HighguiScreen {
    fn drop(&mut self) {
        let _ = highgui::destroy_all_windows();
    }
}
